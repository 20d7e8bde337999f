//! Language-neutral static types.
//!
//! A [`CrossType`] describes the type of a value once; the per-target
//! renderers in [`crate::output`] turn it into a Python annotation, a
//! TypeScript type or a PHP strict type plus docblock type.

use crate::imports::ImportSpec;
use crate::target::Target;

/// A literal scalar value, usable both in `Literal[...]` types and as the
/// payload of literal expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for LiteralValue {
    fn from(v: bool) -> Self {
        LiteralValue::Bool(v)
    }
}

impl From<i64> for LiteralValue {
    fn from(v: i64) -> Self {
        LiteralValue::Int(v)
    }
}

impl From<i32> for LiteralValue {
    fn from(v: i32) -> Self {
        LiteralValue::Int(v.into())
    }
}

impl From<&str> for LiteralValue {
    fn from(v: &str) -> Self {
        LiteralValue::Str(v.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(v: String) -> Self {
        LiteralValue::Str(v)
    }
}

/// The value set of a `Literal` type.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSet {
    values: Vec<LiteralValue>,
}

impl LiteralSet {
    /// Values are kept in rendering order: `True`, `False`, integers
    /// ascending, then strings in lexicographic order. Duplicates are dropped.
    pub fn new(values: impl IntoIterator<Item = LiteralValue>) -> Self {
        let mut values: Vec<LiteralValue> = values.into_iter().collect();
        values.sort_by(|a, b| Self::order_key(a).cmp(&Self::order_key(b)));
        values.dedup();
        Self { values }
    }

    fn order_key(value: &LiteralValue) -> (u8, i64, &str) {
        match value {
            LiteralValue::Bool(b) => (0, i64::from(!*b), ""),
            LiteralValue::Int(i) => (1, *i, ""),
            LiteralValue::Str(s) => (2, 0, s),
        }
    }

    pub fn sorted(&self) -> Vec<&LiteralValue> {
        self.values.iter().collect()
    }

    /// Names of the vanilla PHP types covered by this set, sorted.
    pub(crate) fn php_subtypes(&self) -> Vec<&'static str> {
        let mut subtypes: Vec<&'static str> = self
            .values
            .iter()
            .map(|v| match v {
                LiteralValue::Bool(_) => "bool",
                LiteralValue::Int(_) => "int",
                LiteralValue::Str(_) => "string",
            })
            .collect();
        subtypes.sort_unstable();
        subtypes.dedup();
        subtypes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// PHP rendering of a custom type.
#[derive(Debug, Clone, PartialEq)]
pub struct PhpCustom {
    /// Strict type usable in signatures, if PHP can express one.
    pub lang: Option<String>,
    /// Type for `@var`/`@param` docblocks.
    pub doc: String,
}

/// A caller-supplied type with verbatim per-target spellings.
///
/// The Python spelling is always quoted so that it can refer to names which
/// are only imported for type checking.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomType {
    pub python: Option<String>,
    pub typescript: Option<String>,
    pub php: Option<PhpCustom>,
    pub imports: Vec<(Target, ImportSpec)>,
}

impl CustomType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn python(mut self, expr: impl Into<String>) -> Self {
        self.python = Some(expr.into());
        self
    }

    pub fn typescript(mut self, expr: impl Into<String>) -> Self {
        self.typescript = Some(expr.into());
        self
    }

    pub fn php(mut self, lang: Option<&str>, doc: impl Into<String>) -> Self {
        self.php = Some(PhpCustom {
            lang: lang.map(str::to_string),
            doc: doc.into(),
        });
        self
    }

    /// Import `names` from a Python module, or the module itself when empty.
    pub fn also_import_py(mut self, module: &str, names: &[&str]) -> Self {
        push_named(&mut self.imports, Target::Python, module, names);
        self
    }

    /// Import `names` from a TypeScript module, or the module for its side
    /// effects when empty.
    pub fn also_import_ts(mut self, module: &str, names: &[&str]) -> Self {
        push_named(&mut self.imports, Target::TypeScript, module, names);
        self
    }

    /// `use` a PHP namespace, optionally under an alias.
    pub fn also_import_php(mut self, module: &str, alias: Option<&str>) -> Self {
        let spec = match alias {
            Some(alias) => ImportSpec::named(module, alias),
            None => ImportSpec::module(module),
        };
        self.imports.push((Target::Php, spec));
        self
    }
}

fn push_named(out: &mut Vec<(Target, ImportSpec)>, target: Target, module: &str, names: &[&str]) {
    if names.is_empty() {
        out.push((target, ImportSpec::module(module)));
    }
    for name in names {
        out.push((target, ImportSpec::named(module, *name)));
    }
}

/// A value's static type.
#[derive(Debug, Clone, PartialEq)]
pub enum CrossType {
    Any,
    Str,
    Num,
    Bool,
    Null,
    /// Type of the "argument was not supplied" sentinel.
    Omit,
    Literal(LiteralSet),
    Optional(Box<CrossType>),
    List(Box<CrossType>),
    Set(Box<CrossType>),
    Dict(Box<CrossType>, Box<CrossType>),
    /// Like `Dict`, but rendered as a map object where the target has one.
    Map(Box<CrossType>, Box<CrossType>),
    Union(Vec<CrossType>),
    Callable {
        args: Vec<CrossType>,
        ret: Box<CrossType>,
    },
    /// A named alias registered with [`crate::Script::add_new_type`]. Targets
    /// without alias syntax render the base type.
    NewType {
        name: String,
        base: Box<CrossType>,
    },
    Custom(Box<CustomType>),
    PythonOnly {
        expr: String,
        quoted: bool,
    },
    TypeScriptOnly(String),
}

impl CrossType {
    /// Whether this is a union that accepts the [`CrossType::Omit`] sentinel.
    pub fn has_omittable(&self) -> bool {
        match self {
            CrossType::Union(members) => members.iter().any(|m| *m == CrossType::Omit),
            _ => false,
        }
    }

    /// Widen the type with more alternatives.
    ///
    /// A union gains members, an optional becomes a union that still accepts
    /// null, anything else becomes a union headed by itself.
    pub fn expand_with(self, extra: impl IntoIterator<Item = CrossType>) -> CrossType {
        match self {
            CrossType::Union(mut members) => {
                members.extend(extra);
                CrossType::Union(members)
            }
            CrossType::Optional(inner) => {
                let mut members = vec![*inner];
                members.extend(extra);
                members.push(CrossType::Null);
                CrossType::Union(members)
            }
            other => {
                let mut members = vec![other];
                members.extend(extra);
                CrossType::Union(members)
            }
        }
    }

    /// Import requirements of this type for `target`, duplicates included.
    pub fn imports(&self, target: Target) -> Vec<ImportSpec> {
        let mut out = Vec::new();
        self.collect_imports(target, &mut out);
        out
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) {
        let typing = |name: &str| ImportSpec::named("typing", name);
        match self {
            CrossType::Str
            | CrossType::Num
            | CrossType::Bool
            | CrossType::Null
            | CrossType::PythonOnly { .. }
            | CrossType::TypeScriptOnly(_) => {}
            CrossType::NewType { base, .. } => {
                // The alias line pulls in the base's imports elsewhere.
                if target == Target::Php {
                    base.collect_imports(target, out);
                }
            }
            CrossType::Any => {
                if target == Target::Python {
                    out.push(typing("Any"));
                }
            }
            CrossType::Omit => {
                if target == Target::Python {
                    out.push(ImportSpec::module("builtins"));
                }
            }
            CrossType::Literal(_) => {
                if target == Target::Python {
                    out.push(typing("Literal"));
                }
            }
            CrossType::Optional(inner) | CrossType::List(inner) | CrossType::Set(inner) => {
                if target == Target::Python {
                    out.push(typing(match self {
                        CrossType::Optional(_) => "Optional",
                        CrossType::List(_) => "List",
                        _ => "Set",
                    }));
                }
                inner.collect_imports(target, out);
            }
            CrossType::Dict(key, value) | CrossType::Map(key, value) => {
                if target == Target::Python {
                    let name = if matches!(self, CrossType::Dict(..)) {
                        "Dict"
                    } else {
                        "Mapping"
                    };
                    out.push(typing(name));
                }
                key.collect_imports(target, out);
                value.collect_imports(target, out);
            }
            CrossType::Union(members) => {
                if target == Target::Python {
                    out.push(typing("Union"));
                }
                for member in members {
                    member.collect_imports(target, out);
                }
            }
            CrossType::Callable { args, ret } => {
                if target == Target::Python {
                    out.push(typing("Callable"));
                }
                for arg in args {
                    arg.collect_imports(target, out);
                }
                ret.collect_imports(target, out);
            }
            CrossType::Custom(custom) => {
                out.extend(
                    custom
                        .imports
                        .iter()
                        .filter(|(t, _)| *t == target)
                        .map(|(_, spec)| spec.clone()),
                );
            }
        }
    }
}

impl From<CustomType> for CrossType {
    fn from(custom: CustomType) -> Self {
        CrossType::Custom(Box::new(custom))
    }
}

/// Loose spelling of a type, for builder APIs that accept primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum FlexiType {
    Str,
    Int,
    Bool,
    Null,
    Cross(CrossType),
}

impl From<CrossType> for FlexiType {
    fn from(t: CrossType) -> Self {
        FlexiType::Cross(t)
    }
}

impl From<FlexiType> for CrossType {
    fn from(t: FlexiType) -> Self {
        match t {
            FlexiType::Str => CrossType::Str,
            FlexiType::Int => CrossType::Num,
            FlexiType::Bool => CrossType::Bool,
            FlexiType::Null => CrossType::Null,
            FlexiType::Cross(t) => t,
        }
    }
}

pub fn unflex(t: impl Into<FlexiType>) -> CrossType {
    t.into().into()
}

pub fn listof(inner: impl Into<CrossType>) -> CrossType {
    CrossType::List(Box::new(inner.into()))
}

pub fn setof(inner: impl Into<CrossType>) -> CrossType {
    CrossType::Set(Box::new(inner.into()))
}

pub fn dictof(key: impl Into<CrossType>, value: impl Into<CrossType>) -> CrossType {
    CrossType::Dict(Box::new(key.into()), Box::new(value.into()))
}

pub fn mapof(key: impl Into<CrossType>, value: impl Into<CrossType>) -> CrossType {
    CrossType::Map(Box::new(key.into()), Box::new(value.into()))
}

pub fn unionof(members: impl IntoIterator<Item = CrossType>) -> CrossType {
    CrossType::Union(members.into_iter().collect())
}

pub fn callable(args: impl IntoIterator<Item = CrossType>, ret: impl Into<CrossType>) -> CrossType {
    CrossType::Callable {
        args: args.into_iter().collect(),
        ret: Box::new(ret.into()),
    }
}

pub fn newtype(name: impl Into<String>, base: impl Into<CrossType>) -> CrossType {
    CrossType::NewType {
        name: name.into(),
        base: Box::new(base.into()),
    }
}

pub fn lit<V: Into<LiteralValue>>(values: impl IntoIterator<Item = V>) -> CrossType {
    CrossType::Literal(LiteralSet::new(values.into_iter().map(Into::into)))
}

/// Make a type nullable without nesting optionals.
pub fn maybe(t: impl Into<CrossType>) -> CrossType {
    match t.into() {
        t @ CrossType::Optional(_) => t,
        CrossType::Union(mut members) => {
            members.push(CrossType::Null);
            CrossType::Union(members)
        }
        t => CrossType::Optional(Box::new(t)),
    }
}

/// Make a type accept the [`CrossType::Omit`] sentinel.
pub fn omittable(t: impl Into<CrossType>) -> CrossType {
    match t.into() {
        CrossType::Optional(inner) => CrossType::Union(vec![*inner, CrossType::Null, CrossType::Omit]),
        CrossType::Union(mut members) => {
            members.push(CrossType::Omit);
            CrossType::Union(members)
        }
        t => CrossType::Union(vec![t, CrossType::Omit]),
    }
}
