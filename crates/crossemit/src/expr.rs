//! Language-neutral expressions.
//!
//! A [`PanExpr`] owns its children. Rendering lives in the per-target
//! modules under [`crate::output`]; this module only holds the tree, its
//! constructors and target-independent queries (static type, negation,
//! imports).

use crate::imports::ImportSpec;
use crate::precedence::{PhpPrecedence, PyPrecedence, TsPrecedence};
use crate::target::Target;
use crate::traits::{EmitError, Result};
use crate::types::{CrossType, LiteralValue};
use std::fmt;
use std::sync::Arc;

/// Logical combinator for [`PanExpr::AndOr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// Operator for [`PanExpr::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Strict equality (`===`, Python `==`).
    Eq,
    Lt,
    Gt,
}

/// Runtime type test for [`PanExpr::IsType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCheck {
    Str,
    Int,
    Bool,
    List,
}

/// One piece of a [`PanExpr::StringBuilder`].
#[derive(Debug, Clone)]
pub enum StringPart {
    Text(String),
    Expr(PanExpr),
}

impl From<&str> for StringPart {
    fn from(s: &str) -> Self {
        StringPart::Text(s.to_string())
    }
}

impl From<String> for StringPart {
    fn from(s: String) -> Self {
        StringPart::Text(s)
    }
}

impl From<PanExpr> for StringPart {
    fn from(e: PanExpr) -> Self {
        StringPart::Expr(e)
    }
}

/// What a [`PanCall`] invokes.
#[derive(Debug, Clone)]
pub enum Callee {
    /// A free function or class name.
    Function(String),
    /// Any expression, usually a property such as `obj.method`.
    Expr(Box<PanExpr>),
}

/// A function, method or constructor call.
#[derive(Debug, Clone)]
pub struct PanCall {
    pub callee: Callee,
    pub args: Vec<PanExpr>,
    pub kwargs: Vec<(String, PanExpr)>,
    /// Render as object construction (`new X(...)` where the target has it).
    pub constructor: bool,
}

impl PanCall {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            callee: Callee::Function(name.into()),
            args: Vec::new(),
            kwargs: Vec::new(),
            constructor: false,
        }
    }

    pub fn method(target: PanExpr) -> Self {
        Self {
            callee: Callee::Expr(Box::new(target)),
            args: Vec::new(),
            kwargs: Vec::new(),
            constructor: false,
        }
    }

    /// Instantiate a class.
    pub fn construct(class_name: impl Into<String>) -> Self {
        Self {
            constructor: true,
            ..Self::function(class_name)
        }
    }

    pub fn arg(mut self, value: impl Into<PanExpr>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn add_arg(&mut self, value: impl Into<PanExpr>) {
        self.args.push(value.into());
    }

    /// Append a keyword argument. Names must be unique.
    pub fn add_kwarg(&mut self, name: impl Into<String>, value: impl Into<PanExpr>) -> Result<()> {
        let name = name.into();
        if self.kwargs.iter().any(|(n, _)| *n == name) {
            return Err(EmitError::logic(format!("duplicate kwarg {name:?}")));
        }
        self.kwargs.push((name, value.into()));
        Ok(())
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<PanExpr>) -> Result<Self> {
        self.add_kwarg(name, value)?;
        Ok(self)
    }
}

impl From<PanCall> for PanExpr {
    fn from(call: PanCall) -> Self {
        PanExpr::Call(call)
    }
}

/// Lazily produced code for one target.
pub type RenderFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Ad hoc expression with optional per-target renderers.
///
/// Rendering for a target without a renderer is an
/// [`EmitError::ImplementationMissing`].
#[derive(Clone, Default)]
pub struct HardCodedExpr {
    pub(crate) python: Option<(RenderFn, PyPrecedence)>,
    pub(crate) typescript: Option<(RenderFn, TsPrecedence)>,
    pub(crate) php: Option<(RenderFn, PhpPrecedence)>,
}

impl HardCodedExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn python<F>(mut self, render: F, prec: PyPrecedence) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.python = Some((Arc::new(render), prec));
        self
    }

    pub fn typescript<F>(mut self, render: F, prec: TsPrecedence) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.typescript = Some((Arc::new(render), prec));
        self
    }

    pub fn php<F>(mut self, render: F, prec: PhpPrecedence) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.php = Some((Arc::new(render), prec));
        self
    }
}

impl fmt::Debug for HardCodedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HardCodedExpr")
            .field("python", &self.python.is_some())
            .field("typescript", &self.typescript.is_some())
            .field("php", &self.php.is_some())
            .finish()
    }
}

/// An expression tree.
#[derive(Debug, Clone)]
pub enum PanExpr {
    Literal(LiteralValue),
    Null,
    /// The "argument was not supplied" sentinel value.
    Omit,
    List {
        values: Vec<PanExpr>,
        inner: CrossType,
    },
    /// Associative literal with string keys.
    Dict {
        entries: Vec<(String, PanExpr)>,
        value_type: CrossType,
    },
    Cast {
        ty: CrossType,
        value: Box<PanExpr>,
    },
    IndexAccess {
        target: Box<PanExpr>,
        index: Box<PanExpr>,
        fallback: Option<Box<PanExpr>>,
    },
    KeyAccess {
        target: Box<PanExpr>,
        key: Box<PanExpr>,
        fallback: Option<Box<PanExpr>>,
    },
    Var {
        name: String,
        ty: Option<CrossType>,
    },
    /// A property; without an owner it belongs to `self`/`this`.
    Prop {
        name: String,
        ty: CrossType,
        owner: Option<Box<PanExpr>>,
    },
    Call(PanCall),
    StringBuilder(Vec<StringPart>),
    PyOnly {
        code: String,
        prec: PyPrecedence,
    },
    TsOnly {
        code: String,
        prec: TsPrecedence,
    },
    PhpOnly {
        code: String,
        prec: PhpPrecedence,
    },
    AndOr {
        op: BoolOp,
        args: Vec<PanExpr>,
    },
    Not(Box<PanExpr>),
    Length(Box<PanExpr>),
    IsNull {
        target: Box<PanExpr>,
        negated: bool,
    },
    Compare {
        op: CompareOp,
        left: Box<PanExpr>,
        right: Box<PanExpr>,
        negated: bool,
    },
    IsType {
        value: Box<PanExpr>,
        check: TypeCheck,
    },
    /// True when the value is anything but the omission sentinel.
    NotOmitted(Box<PanExpr>),
    Await(Box<PanExpr>),
    HardCoded(HardCodedExpr),
}

impl PanExpr {
    pub fn var(name: impl Into<String>, ty: Option<CrossType>) -> Self {
        PanExpr::Var {
            name: name.into(),
            ty,
        }
    }

    /// A property of `self`/`this`.
    pub fn prop(name: impl Into<String>, ty: CrossType) -> Self {
        PanExpr::Prop {
            name: name.into(),
            ty,
            owner: None,
        }
    }

    pub fn py_only(code: impl Into<String>, prec: PyPrecedence) -> Self {
        PanExpr::PyOnly {
            code: code.into(),
            prec,
        }
    }

    pub fn ts_only(code: impl Into<String>, prec: TsPrecedence) -> Self {
        PanExpr::TsOnly {
            code: code.into(),
            prec,
        }
    }

    pub fn php_only(code: impl Into<String>, prec: PhpPrecedence) -> Self {
        PanExpr::PhpOnly {
            code: code.into(),
            prec,
        }
    }

    pub fn string_builder(parts: impl IntoIterator<Item = StringPart>) -> Self {
        PanExpr::StringBuilder(parts.into_iter().collect())
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, PanExpr::Literal(_) | PanExpr::Null)
    }

    pub fn is_omit(&self) -> bool {
        matches!(self, PanExpr::Omit)
    }

    /// Name of a plain variable.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            PanExpr::Var { name, .. } => Some(name),
            _ => None,
        }
    }

    /// A property of this expression.
    pub fn getprop(self, name: impl Into<String>, ty: CrossType) -> PanExpr {
        PanExpr::Prop {
            name: name.into(),
            ty,
            owner: Some(Box::new(self)),
        }
    }

    /// `self[key]` on an associative value.
    pub fn getitem(self, key: impl Into<PanExpr>) -> PanExpr {
        PanExpr::KeyAccess {
            target: Box::new(self),
            key: Box::new(key.into()),
            fallback: None,
        }
    }

    /// `self[key]`, or `fallback` when the key is missing.
    pub fn getitem_or(self, key: impl Into<PanExpr>, fallback: impl Into<PanExpr>) -> PanExpr {
        PanExpr::KeyAccess {
            target: Box::new(self),
            key: Box::new(key.into()),
            fallback: Some(Box::new(fallback.into())),
        }
    }

    /// `self[index]` on a list.
    pub fn getindex(self, index: impl Into<PanExpr>) -> PanExpr {
        PanExpr::IndexAccess {
            target: Box::new(self),
            index: Box::new(index.into()),
            fallback: None,
        }
    }

    /// `self[index]`, or `fallback` when the list is too short.
    pub fn getindex_or(self, index: impl Into<PanExpr>, fallback: impl Into<PanExpr>) -> PanExpr {
        PanExpr::IndexAccess {
            target: Box::new(self),
            index: Box::new(index.into()),
            fallback: Some(Box::new(fallback.into())),
        }
    }

    /// Call a method on this expression.
    pub fn call_method(self, method: impl Into<String>, args: Vec<PanExpr>) -> PanExpr {
        PanExpr::Call(PanCall {
            args,
            ..PanCall::method(self.getprop(method, CrossType::Any))
        })
    }

    pub fn cast(self, ty: CrossType) -> PanExpr {
        PanExpr::Cast {
            ty,
            value: Box::new(self),
        }
    }

    pub fn length(self) -> PanExpr {
        PanExpr::Length(Box::new(self))
    }

    pub fn is_null(self) -> PanExpr {
        isnull(self)
    }

    /// The logically negated twin, for nodes that have one.
    pub fn negated(&self) -> Option<PanExpr> {
        match self {
            PanExpr::IsNull { target, negated } => Some(PanExpr::IsNull {
                target: target.clone(),
                negated: !negated,
            }),
            PanExpr::Compare {
                op,
                left,
                right,
                negated,
            } => Some(PanExpr::Compare {
                op: *op,
                left: left.clone(),
                right: right.clone(),
                negated: !negated,
            }),
            PanExpr::Not(inner) => Some((**inner).clone()),
            _ => None,
        }
    }

    /// Static type of the expression.
    pub fn pan_type(&self) -> Result<CrossType> {
        let missing = |what: &str| Err(EmitError::TypeMissing(what.to_string()));
        match self {
            PanExpr::Literal(LiteralValue::Bool(_)) => Ok(CrossType::Bool),
            PanExpr::Literal(LiteralValue::Int(_)) => Ok(CrossType::Num),
            PanExpr::Literal(LiteralValue::Str(_)) => Ok(CrossType::Str),
            PanExpr::Null => Ok(CrossType::Null),
            PanExpr::Omit => Ok(CrossType::Omit),
            PanExpr::List { inner, .. } => Ok(CrossType::List(Box::new(inner.clone()))),
            PanExpr::Dict { value_type, .. } => Ok(CrossType::Dict(
                Box::new(CrossType::Str),
                Box::new(value_type.clone()),
            )),
            PanExpr::Cast { ty, .. } => Ok(ty.clone()),
            PanExpr::IndexAccess { target, .. } => match target.pan_type()? {
                CrossType::List(inner) => Ok(*inner),
                _ => missing("index access on a value that is not a list"),
            },
            PanExpr::KeyAccess { target, .. } => match target.pan_type()? {
                CrossType::Dict(_, value) | CrossType::Map(_, value) => Ok(*value),
                _ => missing("key access on a value that is not a dict"),
            },
            PanExpr::Var { name, ty } => match ty {
                Some(ty) => Ok(ty.clone()),
                None => Err(EmitError::TypeMissing(format!("variable {name} has no type"))),
            },
            PanExpr::Prop { ty, .. } => Ok(ty.clone()),
            PanExpr::Call(_) => missing("call results are untyped"),
            PanExpr::StringBuilder(_) => Ok(CrossType::Str),
            PanExpr::PyOnly { .. } | PanExpr::TsOnly { .. } | PanExpr::PhpOnly { .. } => {
                missing("language-specific expressions are untyped")
            }
            PanExpr::AndOr { .. }
            | PanExpr::Not(_)
            | PanExpr::IsNull { .. }
            | PanExpr::Compare { .. }
            | PanExpr::IsType { .. }
            | PanExpr::NotOmitted(_) => Ok(CrossType::Bool),
            PanExpr::Length(_) => Ok(CrossType::Num),
            PanExpr::Await(_) => missing("await results are untyped"),
            PanExpr::HardCoded(_) => missing("hard-coded expressions are untyped"),
        }
    }

    /// Import requirements of this expression for `target`.
    pub fn imports(&self, target: Target) -> Vec<ImportSpec> {
        let mut out = Vec::new();
        self.collect_imports(target, &mut out);
        out
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) {
        match self {
            PanExpr::Literal(_)
            | PanExpr::Null
            | PanExpr::Omit
            | PanExpr::Var { .. }
            | PanExpr::PyOnly { .. }
            | PanExpr::TsOnly { .. }
            | PanExpr::PhpOnly { .. }
            | PanExpr::HardCoded(_) => {}
            PanExpr::List { values, .. } => {
                for v in values {
                    v.collect_imports(target, out);
                }
            }
            PanExpr::Dict { entries, .. } => {
                for (_, v) in entries {
                    v.collect_imports(target, out);
                }
            }
            PanExpr::Cast { ty, value } => {
                if target == Target::Python {
                    out.push(ImportSpec::named("typing", "cast"));
                }
                ty.collect_imports(target, out);
                value.collect_imports(target, out);
            }
            PanExpr::IndexAccess {
                target: base,
                index: key,
                fallback,
            }
            | PanExpr::KeyAccess {
                target: base,
                key,
                fallback,
            } => {
                base.collect_imports(target, out);
                key.collect_imports(target, out);
                if let Some(fallback) = fallback {
                    fallback.collect_imports(target, out);
                }
            }
            PanExpr::Prop { owner, .. } => {
                if let Some(owner) = owner {
                    owner.collect_imports(target, out);
                }
            }
            PanExpr::Call(call) => {
                if let Callee::Expr(callee) = &call.callee {
                    callee.collect_imports(target, out);
                }
                for arg in &call.args {
                    arg.collect_imports(target, out);
                }
                for (_, arg) in &call.kwargs {
                    arg.collect_imports(target, out);
                }
            }
            PanExpr::StringBuilder(parts) => {
                for part in parts {
                    if let StringPart::Expr(e) = part {
                        e.collect_imports(target, out);
                    }
                }
            }
            PanExpr::AndOr { args, .. } => {
                for arg in args {
                    arg.collect_imports(target, out);
                }
            }
            PanExpr::Compare { left, right, .. } => {
                left.collect_imports(target, out);
                right.collect_imports(target, out);
            }
            PanExpr::Not(inner)
            | PanExpr::Length(inner)
            | PanExpr::NotOmitted(inner)
            | PanExpr::Await(inner)
            | PanExpr::IsNull { target: inner, .. }
            | PanExpr::IsType { value: inner, .. } => inner.collect_imports(target, out),
        }
    }
}

impl From<LiteralValue> for PanExpr {
    fn from(v: LiteralValue) -> Self {
        PanExpr::Literal(v)
    }
}

impl From<bool> for PanExpr {
    fn from(v: bool) -> Self {
        PanExpr::Literal(LiteralValue::Bool(v))
    }
}

impl From<i32> for PanExpr {
    fn from(v: i32) -> Self {
        PanExpr::Literal(LiteralValue::Int(v.into()))
    }
}

impl From<i64> for PanExpr {
    fn from(v: i64) -> Self {
        PanExpr::Literal(LiteralValue::Int(v))
    }
}

impl From<&str> for PanExpr {
    fn from(v: &str) -> Self {
        PanExpr::Literal(LiteralValue::Str(v.to_string()))
    }
}

impl From<String> for PanExpr {
    fn from(v: String) -> Self {
        PanExpr::Literal(LiteralValue::Str(v))
    }
}

impl<T: Into<PanExpr>> From<Option<T>> for PanExpr {
    fn from(v: Option<T>) -> Self {
        v.map_or(PanExpr::Null, Into::into)
    }
}

/// Convert any literal-ish value into an expression.
pub fn pan(v: impl Into<PanExpr>) -> PanExpr {
    v.into()
}

pub fn pan_omit() -> PanExpr {
    PanExpr::Omit
}

pub fn panlist(values: impl IntoIterator<Item = PanExpr>, inner: CrossType) -> PanExpr {
    PanExpr::List {
        values: values.into_iter().collect(),
        inner,
    }
}

pub fn pandict<K: Into<String>>(
    entries: impl IntoIterator<Item = (K, PanExpr)>,
    value_type: CrossType,
) -> PanExpr {
    PanExpr::Dict {
        entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        value_type,
    }
}

/// Call a free function with positional arguments.
pub fn call(name: impl Into<String>, args: Vec<PanExpr>) -> PanExpr {
    PanExpr::Call(PanCall {
        args,
        ..PanCall::function(name)
    })
}

/// Verbatim Python, binding like a multiplication.
pub fn pyexpr(code: impl Into<String>) -> PanExpr {
    PanExpr::py_only(code, PyPrecedence::MultDiv)
}

/// Verbatim TypeScript, binding like a multiplication.
pub fn tsexpr(code: impl Into<String>) -> PanExpr {
    PanExpr::ts_only(code, TsPrecedence::MultDiv)
}

/// Verbatim PHP, binding like a multiplication.
pub fn phpexpr(code: impl Into<String>) -> PanExpr {
    PanExpr::php_only(code, PhpPrecedence::MultDiv)
}

pub fn or_(args: impl IntoIterator<Item = PanExpr>) -> PanExpr {
    PanExpr::AndOr {
        op: BoolOp::Or,
        args: args.into_iter().collect(),
    }
}

pub fn and_(args: impl IntoIterator<Item = PanExpr>) -> PanExpr {
    PanExpr::AndOr {
        op: BoolOp::And,
        args: args.into_iter().collect(),
    }
}

pub fn not_(e: PanExpr) -> PanExpr {
    PanExpr::Not(Box::new(e))
}

pub fn isnull(e: PanExpr) -> PanExpr {
    PanExpr::IsNull {
        target: Box::new(e),
        negated: false,
    }
}

fn compare(op: CompareOp, left: PanExpr, right: PanExpr) -> PanExpr {
    PanExpr::Compare {
        op,
        left: Box::new(left),
        right: Box::new(right),
        negated: false,
    }
}

pub fn exacteq_(left: PanExpr, right: PanExpr) -> PanExpr {
    compare(CompareOp::Eq, left, right)
}

pub fn lessthan(left: PanExpr, right: PanExpr) -> PanExpr {
    compare(CompareOp::Lt, left, right)
}

pub fn greaterthan(left: PanExpr, right: PanExpr) -> PanExpr {
    compare(CompareOp::Gt, left, right)
}

fn is_type(value: PanExpr, check: TypeCheck) -> PanExpr {
    PanExpr::IsType {
        value: Box::new(value),
        check,
    }
}

pub fn isstr(value: PanExpr) -> PanExpr {
    is_type(value, TypeCheck::Str)
}

pub fn isint(value: PanExpr) -> PanExpr {
    is_type(value, TypeCheck::Int)
}

pub fn isbool(value: PanExpr) -> PanExpr {
    is_type(value, TypeCheck::Bool)
}

pub fn islist(value: PanExpr) -> PanExpr {
    is_type(value, TypeCheck::List)
}

/// True when `value` was actually supplied.
pub fn pannotomit(value: PanExpr) -> PanExpr {
    PanExpr::NotOmitted(Box::new(value))
}

pub fn await_(value: PanExpr) -> PanExpr {
    PanExpr::Await(Box::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{dictof, listof};

    #[test]
    fn test_negation_folds_comparisons() {
        let a = PanExpr::var("a", Some(CrossType::Num));
        let eq = exacteq_(a.clone(), pan(5));
        match eq.negated() {
            Some(PanExpr::Compare { negated, op, .. }) => {
                assert!(negated);
                assert_eq!(op, CompareOp::Eq);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(a.negated().is_none());
        assert!(matches!(
            isnull(a).negated(),
            Some(PanExpr::IsNull { negated: true, .. })
        ));
    }

    #[test]
    fn test_pan_type() {
        assert_eq!(pan("x").pan_type().unwrap(), CrossType::Str);
        assert_eq!(pan(Option::<i32>::None).pan_type().unwrap(), CrossType::Null);
        let items = PanExpr::var("items", Some(listof(CrossType::Num)));
        assert_eq!(items.clone().getindex(0).pan_type().unwrap(), CrossType::Num);
        assert_eq!(items.length().pan_type().unwrap(), CrossType::Num);
        let d = PanExpr::var("d", Some(dictof(CrossType::Str, CrossType::Bool)));
        assert_eq!(d.getitem("k").pan_type().unwrap(), CrossType::Bool);
        assert!(matches!(
            PanExpr::var("x", None).pan_type(),
            Err(EmitError::TypeMissing(_))
        ));
        assert!(matches!(
            call("f", vec![]).pan_type(),
            Err(EmitError::TypeMissing(_))
        ));
    }

    #[test]
    fn test_duplicate_kwarg_rejected() {
        let call = PanCall::function("f").kwarg("a", 1).unwrap();
        assert!(matches!(call.kwarg("a", 2), Err(EmitError::InvalidLogic(_))));
    }

    #[test]
    fn test_cast_imports() {
        let e = pan(1).cast(CrossType::Any);
        assert_eq!(
            e.imports(Target::Python),
            vec![
                ImportSpec::named("typing", "cast"),
                ImportSpec::named("typing", "Any"),
            ]
        );
        assert!(e.imports(Target::Php).is_empty());
    }
}
