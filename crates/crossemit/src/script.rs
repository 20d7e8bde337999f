//! The output driver: a whole file's worth of statements.
//!
//! A [`Script`] holds file comments, registered new-type aliases and a body.
//! Rendering walks the tree once to collect imports, then hands the script to
//! the target's [`Writer`](crate::Writer), which emits the preamble, imports,
//! aliases and body.
//!
//! Example options file:
//! ```toml
//! indent = "  "
//! php_namespace = "App\\Models"
//! ```

use std::io::Write;
use std::path::Path;

use serde::Deserialize;

use crate::imports::ImportSpec;
use crate::prettify;
use crate::registry::writer_for_target;
use crate::stmt::{AcceptsStatements, Statements};
use crate::target::Target;
use crate::traits::{EmitError, Result};
use crate::types::CrossType;

/// How a script is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// One level of indentation.
    pub indent: String,
    /// Run external formatters on the written file.
    pub pretty: bool,
    /// `namespace` declaration for PHP files.
    pub php_namespace: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            pretty: false,
            php_namespace: None,
        }
    }
}

impl RenderOptions {
    /// Parse options from TOML; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_php_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.php_namespace = Some(namespace.into());
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// A named alias over a base type.
#[derive(Debug, Clone)]
pub(crate) struct NewTypeDecl {
    pub(crate) name: String,
    pub(crate) base: CrossType,
    pub(crate) ts_export: bool,
}

/// A source file under construction.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub(crate) content: Statements,
    pub(crate) file_comments: Vec<String>,
    pub(crate) new_types: Vec<NewTypeDecl>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line to the file header.
    pub fn add_file_comment(&mut self, text: impl Into<String>) {
        self.file_comments.push(text.into());
    }

    /// Register a new type and return the type to annotate with.
    ///
    /// Python gets `typing.NewType`, TypeScript a branded type; PHP has no
    /// aliases and uses the base type wherever the new type appears.
    pub fn add_new_type(
        &mut self,
        name: impl Into<String>,
        base: impl Into<CrossType>,
        ts_export: bool,
    ) -> Result<CrossType> {
        let name = name.into();
        if self.new_types.iter().any(|decl| decl.name == name) {
            return Err(EmitError::logic(format!("new type {name} is already defined")));
        }
        let base = base.into();
        self.new_types.push(NewTypeDecl {
            name: name.clone(),
            base: base.clone(),
            ts_export,
        });
        Ok(CrossType::NewType {
            name,
            base: Box::new(base),
        })
    }

    /// Everything the script needs imported for `target`, duplicates included.
    pub(crate) fn imports(&self, target: Target) -> Result<Vec<ImportSpec>> {
        let mut out = Vec::new();
        self.content.collect_imports(target, &mut out)?;
        if target != Target::Php {
            for decl in &self.new_types {
                decl.base.collect_imports(target, &mut out);
            }
        }
        if target == Target::Python && !self.new_types.is_empty() {
            out.push(ImportSpec::named("typing", "NewType"));
        }
        tracing::trace!(%target, count = out.len(), "collected imports");
        Ok(out)
    }

    fn render(&self, target: Target, options: &RenderOptions) -> Result<String> {
        tracing::debug!(%target, "rendering script");
        let code = writer_for_target(target).write(self, options)?;
        tracing::debug!(%target, bytes = code.len(), "rendered script");
        Ok(code)
    }

    /// Render to a string.
    pub fn get_source_code(&self, target: Target, options: &RenderOptions) -> Result<String> {
        if options.pretty {
            return Err(EmitError::NotYetSupported(
                "cannot prettify source code in memory".into(),
            ));
        }
        self.render(target, options)
    }

    /// Render into a file, running the formatters afterwards when
    /// `options.pretty` is set.
    pub fn write_to_path(&self, path: &Path, target: Target, options: &RenderOptions) -> Result<()> {
        if options.pretty && target != Target::Python {
            return Err(EmitError::NotYetSupported(format!(
                "prettifying {target} files"
            )));
        }
        let code = self.render(target, options)?;
        std::fs::write(path, code)?;
        if options.pretty {
            prettify::prettify_python(path)?;
        }
        Ok(())
    }

    /// Render into an open destination.
    pub fn write_to_handle(
        &self,
        handle: &mut impl Write,
        target: Target,
        options: &RenderOptions,
    ) -> Result<()> {
        if options.pretty {
            return Err(EmitError::NotYetSupported(
                "cannot prettify an open handle".into(),
            ));
        }
        let code = self.render(target, options)?;
        handle.write_all(code.as_bytes())?;
        Ok(())
    }
}

impl AcceptsStatements for Script {
    fn block_mut(&mut self) -> &mut Statements {
        &mut self.content
    }
}
