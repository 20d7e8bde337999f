//! Language-neutral statements.
//!
//! [`Statements`] is both a statement and an ordered container of them. Any
//! type that holds a body implements [`AcceptsStatements`], which provides
//! the builder API (`also`, `also_assign`, `with_cond`, ...).

mod blocks;
mod class;
mod function;

pub use blocks::{
    CatchBlock, ConditionalBlock, DictLoopBlock, ExceptionClasses, ForLoopBlock, TryCatchBlock,
};
pub use class::{ClassProperty, ClassSpec, InterfaceSpec};
pub use function::{ArgSpec, FunctionArg, FunctionSpec, Overload, ReturnType};

use crate::expr::PanExpr;
use crate::imports::ImportSpec;
use crate::target::Target;
use crate::traits::{EmitError, Result};
use crate::types::CrossType;

/// Per-target payload of a [`HardCodedStatement`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HardCoded {
    /// No code was provided; rendering fails.
    #[default]
    Missing,
    /// Deliberately emits nothing.
    Omitted,
    /// Verbatim code, one or more lines.
    Code(String),
}

impl From<Option<&str>> for HardCoded {
    fn from(code: Option<&str>) -> Self {
        match code {
            Some(code) => HardCoded::Code(code.to_string()),
            None => HardCoded::Omitted,
        }
    }
}

/// Verbatim per-target statement.
#[derive(Debug, Clone, Default)]
pub struct HardCodedStatement {
    pub python: HardCoded,
    pub typescript: HardCoded,
    pub php: HardCoded,
}

impl HardCodedStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn python(mut self, code: Option<&str>) -> Self {
        self.python = code.into();
        self
    }

    pub fn typescript(mut self, code: Option<&str>) -> Self {
        self.typescript = code.into();
        self
    }

    pub fn php(mut self, code: Option<&str>) -> Self {
        self.php = code.into();
        self
    }

    pub fn for_target(&self, target: Target) -> &HardCoded {
        match target {
            Target::Python => &self.python,
            Target::TypeScript => &self.typescript,
            Target::Php => &self.php,
        }
    }
}

/// What a raise statement reports.
#[derive(Debug, Clone)]
pub enum RaiseMessage {
    Text(String),
    Expr(PanExpr),
}

/// `raise`/`throw`.
#[derive(Debug, Clone)]
pub struct RaiseStatement {
    pub(crate) message: RaiseMessage,
    pub(crate) ctor: Option<String>,
    pub(crate) py_ctor: Option<String>,
    pub(crate) ts_ctor: Option<String>,
    pub(crate) php_ctor: Option<String>,
}

impl RaiseStatement {
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_message(RaiseMessage::Text(message.into()))
    }

    pub fn with_expr(message: PanExpr) -> Self {
        Self::from_message(RaiseMessage::Expr(message))
    }

    fn from_message(message: RaiseMessage) -> Self {
        Self {
            message,
            ctor: None,
            py_ctor: None,
            ts_ctor: None,
            php_ctor: None,
        }
    }

    /// Exception class for every target.
    pub fn ctor(mut self, name: impl Into<String>) -> Self {
        self.ctor = Some(name.into());
        self
    }

    pub fn python_ctor(mut self, name: impl Into<String>) -> Self {
        self.py_ctor = Some(name.into());
        self
    }

    pub fn typescript_ctor(mut self, name: impl Into<String>) -> Self {
        self.ts_ctor = Some(name.into());
        self
    }

    pub fn php_ctor(mut self, name: impl Into<String>) -> Self {
        self.php_ctor = Some(name.into());
        self
    }

    /// Exception class to instantiate for `target`.
    pub fn ctor_for(&self, target: Target) -> &str {
        let specific = match target {
            Target::Python => &self.py_ctor,
            Target::TypeScript => &self.ts_ctor,
            Target::Php => &self.php_ctor,
        };
        specific
            .as_deref()
            .or(self.ctor.as_deref())
            .unwrap_or(match target {
                Target::Python => "Exception",
                Target::TypeScript => "Error",
                Target::Php => "\\Exception",
            })
    }
}

/// Assignment, optionally declaring the variable.
#[derive(Debug, Clone)]
pub struct AssignmentStatement {
    pub(crate) target: PanExpr,
    pub(crate) value: Option<PanExpr>,
    pub(crate) declare: bool,
    /// Type written on the declaration; `None` declares without a type.
    pub(crate) declared_type: Option<CrossType>,
}

impl AssignmentStatement {
    /// Assign to a variable, property or item.
    pub fn assign(target: PanExpr, value: PanExpr) -> Result<Self> {
        match target {
            PanExpr::Var { .. }
            | PanExpr::Prop { .. }
            | PanExpr::IndexAccess { .. }
            | PanExpr::KeyAccess { .. } => Ok(Self {
                target,
                value: Some(value),
                declare: false,
                declared_type: None,
            }),
            other => Err(EmitError::logic(format!("cannot assign to {other:?}"))),
        }
    }

    /// Declare a variable, with its own type when `typed` is set.
    pub fn declare(var: PanExpr, value: Option<PanExpr>, typed: bool) -> Result<Self> {
        let PanExpr::Var { name, ty } = &var else {
            return Err(EmitError::logic(format!("can only declare variables, not {var:?}")));
        };
        let declared_type = match (typed, ty) {
            (true, Some(ty)) => Some(ty.clone()),
            (true, None) => {
                return Err(EmitError::logic(format!(
                    "cannot declare variable {name} with a type it does not have"
                )));
            }
            (false, _) => None,
        };
        Ok(Self {
            target: var,
            value,
            declare: true,
            declared_type,
        })
    }
}

/// Append a value to a list.
#[derive(Debug, Clone)]
pub struct ListAppendStatement {
    pub(crate) list: PanExpr,
    pub(crate) value: PanExpr,
}

impl ListAppendStatement {
    pub fn new(list: PanExpr, value: impl Into<PanExpr>) -> Self {
        Self {
            list,
            value: value.into(),
        }
    }
}

/// One entry of a [`DictBuilderStatement`].
#[derive(Debug, Clone)]
pub struct DictBuilderEntry {
    pub key: String,
    pub value: PanExpr,
    /// Skip the key when the value is the omission sentinel.
    pub allow_omit: bool,
}

/// Declares a dict from loose variables, leaving out omitted ones.
#[derive(Debug, Clone)]
pub struct DictBuilderStatement {
    pub(crate) var: String,
    pub(crate) key_type: CrossType,
    pub(crate) value_type: CrossType,
    pub(crate) entries: Vec<DictBuilderEntry>,
}

impl DictBuilderStatement {
    pub fn new(var: impl Into<String>, key_type: CrossType, value_type: CrossType) -> Result<Self> {
        if key_type != CrossType::Str {
            return Err(EmitError::NotYetSupported(
                "dict builders only support str keys".into(),
            ));
        }
        Ok(Self {
            var: var.into(),
            key_type,
            value_type,
            entries: Vec::new(),
        })
    }

    /// Build into an existing dict-typed variable.
    pub fn from_var(var: &PanExpr) -> Result<Self> {
        let name = var
            .var_name()
            .ok_or_else(|| EmitError::logic("dict builders need a variable"))?;
        match var.pan_type()? {
            CrossType::Dict(key, value) => Self::new(name, *key, *value),
            other => Err(EmitError::logic(format!(
                "variable {name} has type {other:?}, not a dict"
            ))),
        }
    }

    pub fn add_pair(&mut self, key: impl Into<String>, value: PanExpr, allow_omit: bool) -> &mut Self {
        self.entries.push(DictBuilderEntry {
            key: key.into(),
            value,
            allow_omit,
        });
        self
    }

    pub fn var(&self) -> PanExpr {
        PanExpr::var(
            &self.var,
            Some(CrossType::Dict(
                Box::new(self.key_type.clone()),
                Box::new(self.value_type.clone()),
            )),
        )
    }
}

/// One emittable unit.
#[derive(Debug, Clone)]
pub enum Statement {
    Blank,
    Comment(String),
    Expr(PanExpr),
    HardCoded(HardCodedStatement),
    Raise(RaiseStatement),
    Return(PanExpr),
    Assign(AssignmentStatement),
    ListAppend(ListAppendStatement),
    DictBuilder(DictBuilderStatement),
    Conditional(ConditionalBlock),
    ForLoop(ForLoopBlock),
    DictLoop(DictLoopBlock),
    TryCatch(TryCatchBlock),
    Function(FunctionSpec),
    Class(ClassSpec),
    Interface(InterfaceSpec),
    Block(Statements),
}

/// A concrete statement type that can be pushed with
/// [`AcceptsStatements::also`] and handed back for further configuration.
pub trait StatementKind: Sized {
    fn into_statement(self) -> Statement;
    fn downcast_mut(stmt: &mut Statement) -> Option<&mut Self>;
}

macro_rules! statement_kind {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl StatementKind for $ty {
                fn into_statement(self) -> Statement {
                    Statement::$variant(self)
                }

                fn downcast_mut(stmt: &mut Statement) -> Option<&mut Self> {
                    match stmt {
                        Statement::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

statement_kind! {
    PanExpr => Expr,
    HardCodedStatement => HardCoded,
    RaiseStatement => Raise,
    AssignmentStatement => Assign,
    ListAppendStatement => ListAppend,
    DictBuilderStatement => DictBuilder,
    ConditionalBlock => Conditional,
    ForLoopBlock => ForLoop,
    DictLoopBlock => DictLoop,
    TryCatchBlock => TryCatch,
    FunctionSpec => Function,
    ClassSpec => Class,
    InterfaceSpec => Interface,
    Statements => Block,
}

/// An ordered block of statements plus the imports it asked for.
#[derive(Debug, Clone, Default)]
pub struct Statements {
    pub(crate) statements: Vec<Statement>,
    pub(crate) imports: Vec<(Target, ImportSpec)>,
}

impl Statements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) -> Result<()> {
        out.extend(
            self.imports
                .iter()
                .filter(|(t, _)| *t == target)
                .map(|(_, spec)| spec.clone()),
        );
        for stmt in &self.statements {
            stmt.collect_imports(target, out)?;
        }
        Ok(())
    }
}

impl Statement {
    /// Import requirements of this statement for `target`.
    pub fn imports(&self, target: Target) -> Result<Vec<ImportSpec>> {
        let mut out = Vec::new();
        self.collect_imports(target, &mut out)?;
        Ok(out)
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) -> Result<()> {
        match self {
            Statement::Blank | Statement::Comment(_) | Statement::HardCoded(_) => {}
            Statement::Expr(e) | Statement::Return(e) => e.collect_imports(target, out),
            Statement::Raise(raise) => {
                if let RaiseMessage::Expr(e) = &raise.message {
                    e.collect_imports(target, out);
                }
            }
            Statement::Assign(assign) => {
                assign.target.collect_imports(target, out);
                if let Some(value) = &assign.value {
                    value.collect_imports(target, out);
                }
                if let Some(ty) = &assign.declared_type {
                    ty.collect_imports(target, out);
                }
            }
            Statement::ListAppend(append) => {
                append.list.collect_imports(target, out);
                append.value.collect_imports(target, out);
            }
            Statement::DictBuilder(builder) => {
                builder.key_type.collect_imports(target, out);
                builder.value_type.collect_imports(target, out);
                if target == Target::Python {
                    out.push(ImportSpec::named("typing", "Dict"));
                }
                for entry in &builder.entries {
                    entry.value.collect_imports(target, out);
                }
            }
            Statement::Conditional(cond) => cond.collect_imports(target, out)?,
            Statement::ForLoop(looped) => {
                looped.iterable.collect_imports(target, out);
                looped.body.collect_imports(target, out)?;
            }
            Statement::DictLoop(looped) => {
                looped.iterable.collect_imports(target, out);
                looped.body.collect_imports(target, out)?;
            }
            Statement::TryCatch(block) => block.collect_imports(target, out)?,
            Statement::Function(func) => func.collect_imports(target, out)?,
            Statement::Class(class) => class.collect_imports(target, out)?,
            Statement::Interface(iface) => {
                for (_, ty) in &iface.properties {
                    ty.collect_imports(target, out);
                }
            }
            Statement::Block(block) => block.collect_imports(target, out)?,
        }
        Ok(())
    }
}

/// Builder API shared by everything that has a body.
pub trait AcceptsStatements {
    fn block_mut(&mut self) -> &mut Statements;

    /// Append a statement (or an expression statement) and return it for
    /// further configuration.
    fn also<S: StatementKind>(&mut self, stmt: S) -> &mut S {
        let block = self.block_mut();
        block.statements.push(stmt.into_statement());
        match block.statements.last_mut().and_then(S::downcast_mut) {
            Some(stmt) => stmt,
            None => unreachable!("statement was pushed just above"),
        }
    }

    fn blank(&mut self) {
        self.block_mut().statements.push(Statement::Blank);
    }

    fn remark(&mut self, text: impl Into<String>) {
        self.block_mut().statements.push(Statement::Comment(text.into()));
    }

    fn also_return(&mut self, value: impl Into<PanExpr>) {
        self.block_mut().statements.push(Statement::Return(value.into()));
    }

    /// Raise the default exception class with a message.
    fn also_raise(&mut self, message: impl Into<String>) -> &mut RaiseStatement {
        self.also(RaiseStatement::new(message))
    }

    fn also_append(&mut self, list: PanExpr, value: impl Into<PanExpr>) {
        self.also(ListAppendStatement::new(list, value));
    }

    fn also_assign(&mut self, target: PanExpr, value: impl Into<PanExpr>) -> Result<()> {
        self.also(AssignmentStatement::assign(target, value.into())?);
        Ok(())
    }

    /// Declare a typed variable and return it.
    fn also_declare(
        &mut self,
        name: impl Into<String>,
        ty: impl Into<CrossType>,
        value: impl Into<Option<PanExpr>>,
    ) -> PanExpr {
        let var = PanExpr::var(name, Some(ty.into()));
        self.also(AssignmentStatement {
            target: var.clone(),
            value: value.into(),
            declare: true,
            declared_type: var.pan_type().ok(),
        });
        var
    }

    /// Declare a variable without writing its type.
    fn also_declare_untyped(&mut self, name: impl Into<String>, value: PanExpr) -> PanExpr {
        let var = PanExpr::var(name, None);
        self.also(AssignmentStatement {
            target: var.clone(),
            value: Some(value),
            declare: true,
            declared_type: None,
        });
        var
    }

    /// Declare a variable typed after its value.
    fn also_declare_inferred(&mut self, name: impl Into<String>, value: PanExpr) -> Result<PanExpr> {
        let ty = value.pan_type()?;
        Ok(self.also_declare(name, ty, value))
    }

    /// Declare an existing typed variable again, e.g. in another scope.
    fn also_redeclare(&mut self, var: &PanExpr, value: impl Into<Option<PanExpr>>) -> Result<()> {
        self.also(AssignmentStatement::declare(var.clone(), value.into(), true)?);
        Ok(())
    }

    /// Import `names` from a Python module, or the module itself when empty.
    fn also_import_py(&mut self, module: &str, names: &[&str]) {
        push_imports(&mut self.block_mut().imports, Target::Python, module, names);
    }

    /// Import `names` from a TypeScript module, or the module for its side
    /// effects when empty.
    fn also_import_ts(&mut self, module: &str, names: &[&str]) {
        push_imports(&mut self.block_mut().imports, Target::TypeScript, module, names);
    }

    fn also_import_php(&mut self, module: &str, alias: Option<&str>) {
        let spec = match alias {
            Some(alias) => ImportSpec::named(module, alias),
            None => ImportSpec::module(module),
        };
        self.block_mut().imports.push((Target::Php, spec));
    }

    fn with_cond<R>(&mut self, expr: PanExpr, f: impl FnOnce(&mut ConditionalBlock) -> R) -> R {
        f(self.also(ConditionalBlock::new(expr)))
    }

    /// Loop over a list; the block's [`ForLoopBlock::var`] is the element.
    fn with_for<R>(
        &mut self,
        var: impl Into<String>,
        iterable: PanExpr,
        f: impl FnOnce(&mut ForLoopBlock) -> R,
    ) -> R {
        f(self.also(ForLoopBlock::new(var, iterable)))
    }

    /// Loop over a dict's values, and its keys when `key` is given.
    fn with_dict_iter<R>(
        &mut self,
        iterable: PanExpr,
        value: impl Into<String>,
        key: Option<&str>,
        f: impl FnOnce(&mut DictLoopBlock) -> R,
    ) -> R {
        f(self.also(DictLoopBlock::new(iterable, value, key)))
    }

    fn with_try<R>(&mut self, f: impl FnOnce(&mut TryCatchBlock) -> R) -> R {
        f(self.also(TryCatchBlock::new()))
    }
}

fn push_imports(out: &mut Vec<(Target, ImportSpec)>, target: Target, module: &str, names: &[&str]) {
    if names.is_empty() {
        out.push((target, ImportSpec::module(module)));
    }
    for name in names {
        out.push((target, ImportSpec::named(module, *name)));
    }
}

impl AcceptsStatements for Statements {
    fn block_mut(&mut self) -> &mut Statements {
        self
    }
}
