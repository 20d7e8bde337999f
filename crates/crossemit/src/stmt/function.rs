//! Function and method specifications.

use super::{AcceptsStatements, HardCodedStatement, Statements};
use crate::expr::PanExpr;
use crate::imports::ImportSpec;
use crate::target::Target;
use crate::traits::{EmitError, Result};
use crate::types::{CrossType, FlexiType, maybe, omittable};

/// Declared result of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnType {
    /// Nothing is returned (`-> None`, `void`, no PHP return type).
    NoReturn,
    Type(CrossType),
}

impl From<CrossType> for ReturnType {
    fn from(t: CrossType) -> Self {
        ReturnType::Type(t)
    }
}

impl From<FlexiType> for ReturnType {
    fn from(t: FlexiType) -> Self {
        ReturnType::Type(t.into())
    }
}

/// A declared parameter.
#[derive(Debug, Clone)]
pub struct FunctionArg {
    pub name: String,
    pub ty: CrossType,
    pub default: Option<PanExpr>,
}

/// Builder for a parameter before it is added to a function.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    name: String,
    ty: CrossType,
    default: Option<PanExpr>,
    nullable: bool,
    allow_omit: bool,
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<CrossType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            nullable: false,
            allow_omit: false,
        }
    }

    pub fn default(mut self, value: impl Into<PanExpr>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Also accept null.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Make the argument optional. Without an explicit default it defaults
    /// to the omission sentinel.
    pub fn omittable(mut self) -> Self {
        self.allow_omit = true;
        self
    }

    fn build(self) -> Result<FunctionArg> {
        let mut ty = self.ty;
        if self.nullable {
            ty = maybe(ty);
        }
        let mut default = self.default;
        if self.allow_omit {
            ty = omittable(ty);
            if default.is_none() {
                default = Some(PanExpr::Omit);
            }
        } else if matches!(default, Some(PanExpr::Omit)) {
            return Err(EmitError::logic(format!(
                "argument {} must be omittable to default to the omission sentinel",
                self.name
            )));
        }
        Ok(FunctionArg {
            name: self.name,
            ty,
            default,
        })
    }
}

impl<T: Into<CrossType>> From<(&str, T)> for ArgSpec {
    fn from((name, ty): (&str, T)) -> Self {
        ArgSpec::new(name, ty)
    }
}

/// A restricted signature for the same function.
///
/// Each modification retypes (`Some`) or removes (`None`) an argument.
#[derive(Debug, Clone)]
pub struct Overload {
    pub modifications: Vec<(String, Option<CrossType>)>,
    pub ret: ReturnType,
}

/// A function, method or constructor.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub(crate) name: String,
    pub(crate) ret: ReturnType,
    pub(crate) pargs: Vec<FunctionArg>,
    pub(crate) kwargs: Vec<FunctionArg>,
    pub(crate) overloads: Vec<Overload>,
    pub(crate) decorators_py: Vec<String>,
    pub(crate) decorators_ts: Vec<String>,
    pub(crate) is_method: bool,
    pub(crate) is_static: bool,
    pub(crate) is_abstract: bool,
    pub(crate) is_async: bool,
    pub(crate) is_constructor: bool,
    pub(crate) docstring: Vec<String>,
    pub(crate) body: Statements,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>, ret: impl Into<ReturnType>) -> Self {
        Self {
            name: name.into(),
            ret: ret.into(),
            pargs: Vec::new(),
            kwargs: Vec::new(),
            overloads: Vec::new(),
            decorators_py: Vec::new(),
            decorators_ts: Vec::new(),
            is_method: false,
            is_static: false,
            is_abstract: false,
            is_async: false,
            is_constructor: false,
            docstring: Vec::new(),
            body: Statements::new(),
        }
    }

    pub(crate) fn method(name: impl Into<String>, ret: impl Into<ReturnType>) -> Self {
        Self {
            is_method: true,
            ..Self::new(name, ret)
        }
    }

    pub(crate) fn constructor() -> Self {
        Self {
            is_constructor: true,
            ..Self::method("__construct", ReturnType::NoReturn)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_method(&self) -> bool {
        self.is_method
    }

    pub fn set_abstract(&mut self, value: bool) -> &mut Self {
        self.is_abstract = value;
        self
    }

    pub fn set_static(&mut self, value: bool) -> &mut Self {
        self.is_static = value;
        self
    }

    pub fn set_async(&mut self, value: bool) -> &mut Self {
        self.is_async = value;
        self
    }

    pub fn set_docstring<S: Into<String>>(&mut self, lines: impl IntoIterator<Item = S>) -> &mut Self {
        self.docstring = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Decorator written as `@name` above the Python `def`.
    pub fn add_decorator_py(&mut self, decorator: impl Into<String>) -> &mut Self {
        self.decorators_py.push(decorator.into());
        self
    }

    /// Decorator written as `@name` above the TypeScript method.
    pub fn add_decorator_ts(&mut self, decorator: impl Into<String>) -> &mut Self {
        self.decorators_ts.push(decorator.into());
        self
    }

    fn check_no_overloads(&self, name: &str) -> Result<()> {
        if self.overloads.is_empty() {
            Ok(())
        } else {
            Err(EmitError::logic(format!(
                "cannot add argument {name} to {}() after overloads",
                self.name
            )))
        }
    }

    /// Add a positional argument and return it as a variable.
    pub fn add_positional_arg(&mut self, arg: impl Into<ArgSpec>) -> Result<PanExpr> {
        let arg = arg.into().build()?;
        self.check_no_overloads(&arg.name)?;
        let var = PanExpr::var(&arg.name, Some(arg.ty.clone()));
        self.pargs.push(arg);
        Ok(var)
    }

    /// Add a keyword-only argument and return it as a variable.
    pub fn add_kwarg(&mut self, arg: impl Into<ArgSpec>) -> Result<PanExpr> {
        let arg = arg.into().build()?;
        self.check_no_overloads(&arg.name)?;
        let var = PanExpr::var(&arg.name, Some(arg.ty.clone()));
        self.kwargs.push(arg);
        Ok(var)
    }

    /// Declare a narrower signature for the same function.
    pub fn add_overload<S: Into<String>>(
        &mut self,
        modifications: impl IntoIterator<Item = (S, Option<CrossType>)>,
        ret: impl Into<ReturnType>,
    ) -> Result<()> {
        let modifications: Vec<(String, Option<CrossType>)> = modifications
            .into_iter()
            .map(|(name, ty)| (name.into(), ty))
            .collect();
        for (name, _) in &modifications {
            let known = self.pargs.iter().chain(&self.kwargs).any(|a| a.name == *name);
            if !known {
                return Err(EmitError::logic(format!(
                    "overload of {}() modifies unknown argument {name}",
                    self.name
                )));
            }
        }
        self.overloads.push(Overload {
            modifications,
            ret: ret.into(),
        });
        Ok(())
    }

    /// The signature of one overload, with a `...` body.
    pub(crate) fn overload_variant(&self, overload: &Overload) -> FunctionSpec {
        let apply = |args: &[FunctionArg]| -> Vec<FunctionArg> {
            args.iter()
                .filter_map(|arg| {
                    match overload.modifications.iter().find(|(name, _)| *name == arg.name) {
                        Some((_, None)) => None,
                        Some((_, Some(ty))) => Some(FunctionArg {
                            name: arg.name.clone(),
                            ty: ty.clone(),
                            default: None,
                        }),
                        None => Some(FunctionArg {
                            default: None,
                            ..arg.clone()
                        }),
                    }
                })
                .collect()
        };
        let mut body = Statements::new();
        body.also(HardCodedStatement::new().python(Some("...")));
        let mut decorators_py = vec!["typing.overload".to_string()];
        decorators_py.extend(self.decorators_py.iter().cloned());
        FunctionSpec {
            name: self.name.clone(),
            ret: overload.ret.clone(),
            pargs: apply(&self.pargs),
            kwargs: apply(&self.kwargs),
            overloads: Vec::new(),
            decorators_py,
            decorators_ts: Vec::new(),
            is_method: self.is_method,
            is_static: self.is_static,
            is_abstract: false,
            is_async: self.is_async,
            is_constructor: self.is_constructor,
            docstring: Vec::new(),
            body,
        }
    }

    pub(crate) fn check_abstract_body(&self) -> Result<()> {
        if self.is_abstract && !self.body.is_empty() {
            return Err(EmitError::logic(format!(
                "Abstract FunctionSpec {}() must not have any statements",
                self.name
            )));
        }
        Ok(())
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) -> Result<()> {
        if target == Target::Python {
            if self.is_abstract {
                out.push(ImportSpec::module("abc"));
            }
            for overload in &self.overloads {
                out.push(ImportSpec::module("typing"));
                self.overload_variant(overload).collect_imports(target, out)?;
            }
        }
        for arg in self.pargs.iter().chain(&self.kwargs) {
            arg.ty.collect_imports(target, out);
            if let Some(default) = &arg.default {
                default.collect_imports(target, out);
            }
        }
        if let ReturnType::Type(ty) = &self.ret {
            ty.collect_imports(target, out);
        }
        self.body.collect_imports(target, out)
    }
}

impl AcceptsStatements for FunctionSpec {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.body
    }
}
