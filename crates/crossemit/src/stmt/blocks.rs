//! Control-flow blocks: conditionals, loops and try/catch.

use super::{AcceptsStatements, Statements};
use crate::expr::PanExpr;
use crate::imports::ImportSpec;
use crate::target::Target;
use crate::traits::{EmitError, Result};
use crate::types::CrossType;

/// `if` / `elif`* / `else`.
#[derive(Debug, Clone)]
pub struct ConditionalBlock {
    pub(crate) expr: PanExpr,
    pub(crate) body: Statements,
    pub(crate) elifs: Vec<(PanExpr, Statements)>,
    pub(crate) else_body: Option<Statements>,
}

impl ConditionalBlock {
    pub fn new(expr: PanExpr) -> Self {
        Self {
            expr,
            body: Statements::new(),
            elifs: Vec::new(),
            else_body: None,
        }
    }

    pub fn with_elseif<R>(&mut self, expr: PanExpr, f: impl FnOnce(&mut Statements) -> R) -> R {
        self.elifs.push((expr, Statements::new()));
        let (_, body) = self
            .elifs
            .last_mut()
            .unwrap_or_else(|| unreachable!("elseif arm was pushed just above"));
        f(body)
    }

    pub fn with_else<R>(&mut self, f: impl FnOnce(&mut Statements) -> R) -> Result<R> {
        if self.else_body.is_some() {
            return Err(EmitError::logic("conditional already has an else block"));
        }
        Ok(f(self.else_body.insert(Statements::new())))
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) -> Result<()> {
        self.expr.collect_imports(target, out);
        self.body.collect_imports(target, out)?;
        for (expr, body) in &self.elifs {
            expr.collect_imports(target, out);
            body.collect_imports(target, out)?;
        }
        if let Some(body) = &self.else_body {
            body.collect_imports(target, out)?;
        }
        Ok(())
    }
}

impl AcceptsStatements for ConditionalBlock {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.body
    }
}

fn element_type(iterable: &PanExpr) -> Option<CrossType> {
    match iterable.pan_type().ok()? {
        CrossType::List(inner) | CrossType::Set(inner) => Some(*inner),
        _ => None,
    }
}

/// `for var in iterable`.
#[derive(Debug, Clone)]
pub struct ForLoopBlock {
    pub(crate) var: PanExpr,
    pub(crate) iterable: PanExpr,
    pub(crate) body: Statements,
}

impl ForLoopBlock {
    pub fn new(var: impl Into<String>, iterable: PanExpr) -> Self {
        let ty = element_type(&iterable);
        Self {
            var: PanExpr::var(var, ty),
            iterable,
            body: Statements::new(),
        }
    }

    /// The loop variable.
    pub fn var(&self) -> PanExpr {
        self.var.clone()
    }
}

impl AcceptsStatements for ForLoopBlock {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.body
    }
}

/// Iteration over a dict or map, binding values and optionally keys.
#[derive(Debug, Clone)]
pub struct DictLoopBlock {
    pub(crate) iterable: PanExpr,
    pub(crate) key: Option<PanExpr>,
    pub(crate) value: PanExpr,
    pub(crate) body: Statements,
}

impl DictLoopBlock {
    pub fn new(iterable: PanExpr, value: impl Into<String>, key: Option<&str>) -> Self {
        let (key_ty, value_ty) = match iterable.pan_type() {
            Ok(CrossType::Dict(k, v)) | Ok(CrossType::Map(k, v)) => (Some(*k), Some(*v)),
            _ => (None, None),
        };
        Self {
            key: key.map(|k| PanExpr::var(k, key_ty)),
            value: PanExpr::var(value, value_ty),
            iterable,
            body: Statements::new(),
        }
    }

    pub fn key(&self) -> Option<PanExpr> {
        self.key.clone()
    }

    pub fn value(&self) -> PanExpr {
        self.value.clone()
    }

    /// Whether the iterable is known to be a map object rather than a dict.
    pub(crate) fn is_map(&self) -> bool {
        matches!(self.iterable.pan_type(), Ok(CrossType::Map(..)))
    }
}

impl AcceptsStatements for DictLoopBlock {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.body
    }
}

/// Exception class caught by one arm, per target. A missing class catches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionClasses {
    pub python: Option<String>,
    pub typescript: Option<String>,
    pub php: Option<String>,
}

impl ExceptionClasses {
    /// Catch everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// The same class name in every target.
    pub fn all(name: &str) -> Self {
        Self {
            python: Some(name.to_string()),
            typescript: Some(name.to_string()),
            php: Some(name.to_string()),
        }
    }

    pub fn python(mut self, name: impl Into<String>) -> Self {
        self.python = Some(name.into());
        self
    }

    pub fn typescript(mut self, name: impl Into<String>) -> Self {
        self.typescript = Some(name.into());
        self
    }

    pub fn php(mut self, name: impl Into<String>) -> Self {
        self.php = Some(name.into());
        self
    }
}

/// One `catch`/`except` arm.
#[derive(Debug, Clone)]
pub struct CatchBlock {
    pub(crate) var: Option<String>,
    pub(crate) classes: ExceptionClasses,
    pub(crate) body: Statements,
}

impl CatchBlock {
    /// The bound exception, if the arm binds one.
    pub fn var(&self) -> Option<PanExpr> {
        self.var.as_ref().map(|name| PanExpr::var(name, None))
    }
}

impl AcceptsStatements for CatchBlock {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.body
    }
}

/// `try` with any number of catch arms and an optional `finally`.
#[derive(Debug, Clone, Default)]
pub struct TryCatchBlock {
    pub(crate) body: Statements,
    pub(crate) catches: Vec<CatchBlock>,
    pub(crate) finally: Option<Statements>,
}

impl TryCatchBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catch<R>(
        &mut self,
        var: Option<&str>,
        classes: ExceptionClasses,
        f: impl FnOnce(&mut CatchBlock) -> R,
    ) -> R {
        self.catches.push(CatchBlock {
            var: var.map(str::to_string),
            classes,
            body: Statements::new(),
        });
        let arm = self
            .catches
            .last_mut()
            .unwrap_or_else(|| unreachable!("catch arm was pushed just above"));
        f(arm)
    }

    pub fn with_finally<R>(&mut self, f: impl FnOnce(&mut Statements) -> R) -> Result<R> {
        if self.finally.is_some() {
            return Err(EmitError::logic("try block already has a finally block"));
        }
        Ok(f(self.finally.insert(Statements::new())))
    }

    pub(crate) fn check_has_handlers(&self) -> Result<()> {
        if self.catches.is_empty() && self.finally.is_none() {
            return Err(EmitError::logic(
                "try block needs at least one catch or finally block",
            ));
        }
        Ok(())
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) -> Result<()> {
        self.body.collect_imports(target, out)?;
        for arm in &self.catches {
            arm.body.collect_imports(target, out)?;
        }
        if let Some(finally) = &self.finally {
            finally.collect_imports(target, out)?;
        }
        Ok(())
    }
}

impl AcceptsStatements for TryCatchBlock {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.body
    }
}
