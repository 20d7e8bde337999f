//! Class and interface specifications, including constructor synthesis.

use super::{AcceptsStatements, AssignmentStatement, FunctionSpec, HardCodedStatement, ReturnType};
use crate::expr::PanExpr;
use crate::imports::ImportSpec;
use crate::stmt::ArgSpec;
use crate::target::Target;
use crate::traits::{EmitError, Result};
use crate::types::CrossType;

/// A class property.
#[derive(Debug, Clone)]
pub struct ClassProperty {
    pub(crate) name: String,
    pub(crate) ty: CrossType,
    pub(crate) default: Option<PanExpr>,
    pub(crate) initarg: bool,
    pub(crate) ts_observable: bool,
    pub(crate) ts_readonly: bool,
}

impl ClassProperty {
    pub fn new(name: impl Into<String>, ty: impl Into<CrossType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            initarg: false,
            ts_observable: false,
            ts_readonly: false,
        }
    }

    /// Take the property's value as a constructor argument.
    pub fn initarg(mut self) -> Self {
        self.initarg = true;
        self
    }

    pub fn default(mut self, value: impl Into<PanExpr>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Decorate with MobX's `@observable` in TypeScript.
    pub fn ts_observable(mut self) -> Self {
        self.ts_observable = true;
        self
    }

    pub fn ts_readonly(mut self) -> Self {
        self.ts_readonly = true;
        self
    }

    /// Whether the default is written as a field initializer in the class
    /// body (TypeScript and PHP) rather than assigned in the constructor.
    pub(crate) fn has_literal_default(&self) -> bool {
        self.default.as_ref().is_some_and(PanExpr::is_literal)
    }
}

/// A class.
#[derive(Debug, Clone)]
pub struct ClassSpec {
    pub(crate) name: String,
    pub(crate) docstring: Vec<String>,
    pub(crate) is_abstract: bool,
    pub(crate) py_dataclass: bool,
    pub(crate) ts_export: bool,
    pub(crate) py_bases: Vec<String>,
    pub(crate) py_forward_args: bool,
    pub(crate) ts_parent: Option<String>,
    pub(crate) php_parent: Option<String>,
    pub(crate) properties: Vec<ClassProperty>,
    pub(crate) methods: Vec<FunctionSpec>,
    pub(crate) remarks: Vec<String>,
    pub(crate) imports: Vec<(Target, ImportSpec)>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docstring: Vec::new(),
            is_abstract: false,
            py_dataclass: false,
            ts_export: false,
            py_bases: Vec::new(),
            py_forward_args: false,
            ts_parent: None,
            php_parent: None,
            properties: Vec::new(),
            methods: Vec::new(),
            remarks: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_docstring<S: Into<String>>(&mut self, lines: impl IntoIterator<Item = S>) -> &mut Self {
        self.docstring = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_abstract(&mut self, value: bool) -> &mut Self {
        self.is_abstract = value;
        self
    }

    /// Decorate with `@dataclasses.dataclass` in Python.
    pub fn set_dataclass(&mut self, value: bool) -> &mut Self {
        self.py_dataclass = value;
        self
    }

    pub fn set_ts_export(&mut self, value: bool) -> &mut Self {
        self.ts_export = value;
        self
    }

    /// Use the same parent class in every target.
    pub fn set_parent(&mut self, name: &str) -> Result<&mut Self> {
        self.add_python_base(name, false)?;
        self.set_typescript_parent(name)?;
        self.set_php_parent(name)
    }

    /// Add a Python base class. With `forward_args`, the Python constructor
    /// accepts `*args, **kwargs` and passes them on to the parent
    /// constructor; every base must then agree on forwarding.
    pub fn add_python_base(&mut self, name: impl Into<String>, forward_args: bool) -> Result<&mut Self> {
        let name = name.into();
        if !self.py_bases.is_empty() && self.py_forward_args != forward_args {
            return Err(EmitError::logic(format!(
                "cannot add Python base {name} to {}: bases must all forward *args, **kwargs or none may",
                self.name
            )));
        }
        self.py_forward_args = forward_args;
        self.py_bases.push(name);
        Ok(self)
    }

    pub fn set_typescript_parent(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        if self.ts_parent.is_some() {
            return Err(EmitError::logic(format!(
                "cannot add multiple TypeScript parent classes to {}",
                self.name
            )));
        }
        self.ts_parent = Some(name.into());
        Ok(self)
    }

    pub fn set_php_parent(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        if self.php_parent.is_some() {
            return Err(EmitError::logic(format!(
                "cannot add multiple PHP parent classes to {}",
                self.name
            )));
        }
        self.php_parent = Some(name.into());
        Ok(self)
    }

    /// Add a property and return it as a `self`/`this` expression.
    pub fn add_property(&mut self, prop: ClassProperty) -> Result<PanExpr> {
        if self.properties.iter().any(|p| p.name == prop.name) {
            return Err(EmitError::logic(format!(
                "duplicate property {}.{}",
                self.name, prop.name
            )));
        }
        let expr = PanExpr::prop(&prop.name, prop.ty.clone());
        self.properties.push(prop);
        Ok(expr)
    }

    pub fn create_method(&mut self, name: impl Into<String>, ret: impl Into<ReturnType>) -> &mut FunctionSpec {
        self.methods.push(FunctionSpec::method(name, ret));
        match self.methods.last_mut() {
            Some(method) => method,
            None => unreachable!("method was pushed just above"),
        }
    }

    pub fn remark(&mut self, text: impl Into<String>) -> &mut Self {
        self.remarks.push(text.into());
        self
    }

    pub fn also_import_py(&mut self, module: &str, names: &[&str]) -> &mut Self {
        if names.is_empty() {
            self.imports.push((Target::Python, ImportSpec::module(module)));
        }
        for name in names {
            self.imports.push((Target::Python, ImportSpec::named(module, *name)));
        }
        self
    }

    pub fn also_import_ts(&mut self, module: &str, names: &[&str]) -> &mut Self {
        if names.is_empty() {
            self.imports.push((Target::TypeScript, ImportSpec::module(module)));
        }
        for name in names {
            self.imports.push((Target::TypeScript, ImportSpec::named(module, *name)));
        }
        self
    }

    pub fn also_import_php(&mut self, module: &str, alias: Option<&str>) -> &mut Self {
        let spec = match alias {
            Some(alias) => ImportSpec::named(module, alias),
            None => ImportSpec::module(module),
        };
        self.imports.push((Target::Php, spec));
        self
    }

    fn parent_call(&self, target: Target) -> Option<HardCodedStatement> {
        let stmt = HardCodedStatement::new()
            .python(None)
            .typescript(None)
            .php(None);
        match target {
            Target::Python if !self.py_bases.is_empty() => Some(stmt.python(Some(
                if self.py_forward_args {
                    "super().__init__(*args, **kwargs)"
                } else {
                    "super().__init__()"
                },
            ))),
            Target::TypeScript if self.ts_parent.is_some() => Some(stmt.typescript(Some("super();"))),
            Target::Php if self.php_parent.is_some() => {
                Some(stmt.php(Some("parent::__construct();")))
            }
            _ => None,
        }
    }

    /// The constructor to emit for `target`, if one is needed.
    ///
    /// Initializer-arg properties become parameters assigned in order.
    /// Defaulted properties that are not initializer args follow; TypeScript
    /// and PHP skip literal defaults since those are field initializers. The
    /// parent constructor runs first in TypeScript and after the parameter
    /// assignments elsewhere.
    pub(crate) fn constructor_for(&self, target: Target) -> Result<Option<FunctionSpec>> {
        let initargs: Vec<&ClassProperty> = self.properties.iter().filter(|p| p.initarg).collect();
        let defaults: Vec<&ClassProperty> = self
            .properties
            .iter()
            .filter(|p| !p.initarg && p.default.is_some())
            .filter(|p| target == Target::Python || !p.has_literal_default())
            .collect();
        if initargs.is_empty() && defaults.is_empty() {
            return Ok(None);
        }

        let mut ctor = FunctionSpec::constructor();
        let parent_call = self.parent_call(target);
        if target == Target::TypeScript {
            if let Some(call) = parent_call.clone() {
                ctor.also(call);
            }
        }
        for prop in &initargs {
            let mut arg = ArgSpec::new(&prop.name, prop.ty.clone());
            if let Some(default) = &prop.default {
                arg = arg.default(default.clone());
            }
            let value = ctor.add_positional_arg(arg)?;
            ctor.also(AssignmentStatement::assign(
                PanExpr::prop(&prop.name, prop.ty.clone()),
                value,
            )?);
        }
        if target == Target::Python && self.py_forward_args && !self.py_bases.is_empty() {
            ctor.add_positional_arg(ArgSpec::new("*args", CrossType::Any))?;
            ctor.add_positional_arg(ArgSpec::new("**kwargs", CrossType::Any))?;
        }
        if target != Target::TypeScript {
            if let Some(call) = parent_call {
                ctor.also(call);
            }
        }
        for prop in &defaults {
            if let Some(default) = &prop.default {
                ctor.also(AssignmentStatement::assign(
                    PanExpr::prop(&prop.name, prop.ty.clone()),
                    default.clone(),
                )?);
            }
        }
        Ok(Some(ctor))
    }

    pub(crate) fn collect_imports(&self, target: Target, out: &mut Vec<ImportSpec>) -> Result<()> {
        out.extend(
            self.imports
                .iter()
                .filter(|(t, _)| *t == target)
                .map(|(_, spec)| spec.clone()),
        );
        match target {
            Target::Python => {
                if self.is_abstract {
                    out.push(ImportSpec::module("abc"));
                }
                if self.py_dataclass {
                    out.push(ImportSpec::named("dataclasses", "dataclass"));
                }
            }
            Target::TypeScript => {
                if self.properties.iter().any(|p| p.ts_observable) {
                    out.push(ImportSpec::named("mobx", "observable"));
                }
            }
            Target::Php => {}
        }
        for prop in &self.properties {
            prop.ty.collect_imports(target, out);
            if let Some(default) = &prop.default {
                default.collect_imports(target, out);
            }
        }
        if let Some(ctor) = self.constructor_for(target)? {
            ctor.collect_imports(target, out)?;
        }
        for method in &self.methods {
            method.collect_imports(target, out)?;
        }
        Ok(())
    }
}

/// A TypeScript interface.
#[derive(Debug, Clone)]
pub struct InterfaceSpec {
    pub(crate) name: String,
    pub(crate) ts_export: bool,
    pub(crate) properties: Vec<(String, CrossType)>,
}

impl InterfaceSpec {
    pub fn new(name: impl Into<String>, ts_export: bool) -> Self {
        Self {
            name: name.into(),
            ts_export,
            properties: Vec::new(),
        }
    }

    pub fn add_property(&mut self, name: impl Into<String>, ty: impl Into<CrossType>) -> Result<&mut Self> {
        let name = name.into();
        if self.properties.iter().any(|(n, _)| *n == name) {
            return Err(EmitError::logic(format!(
                "duplicate property {}.{name}",
                self.name
            )));
        }
        self.properties.push((name, ty.into()));
        Ok(self)
    }
}
