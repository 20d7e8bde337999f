//! Error type and the per-language writer trait.

use crate::script::{RenderOptions, Script};
use crate::target::Target;

/// Error that can occur while building or rendering a script.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("{construct} is not supported by {target}")]
    NotSupported { construct: String, target: Target },

    #[error("{construct} was not given a {target} implementation")]
    ImplementationMissing { construct: String, target: Target },

    #[error("invalid logic: {0}")]
    InvalidLogic(String),

    #[error("type missing: {0}")]
    TypeMissing(String),

    #[error("not yet supported: {0}")]
    NotYetSupported(String),

    #[error("formatter `{program}` failed: {message}")]
    Formatter { program: String, message: String },

    #[error("invalid render options: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EmitError {
    pub(crate) fn not_supported(construct: impl Into<String>, target: Target) -> Self {
        EmitError::NotSupported {
            construct: construct.into(),
            target,
        }
    }

    pub(crate) fn missing(construct: impl Into<String>, target: Target) -> Self {
        EmitError::ImplementationMissing {
            construct: construct.into(),
            target,
        }
    }

    pub(crate) fn logic(msg: impl Into<String>) -> Self {
        EmitError::InvalidLogic(msg.into())
    }
}

pub type Result<T, E = EmitError> = std::result::Result<T, E>;

/// A writer emits a [`Script`] as source code in one target language.
pub trait Writer: Send + Sync {
    /// The language this writer produces.
    fn target(&self) -> Target;

    /// File extension for output (e.g., "py").
    fn extension(&self) -> &'static str {
        self.target().extension()
    }

    /// Emit the script as source code.
    fn write(&self, script: &Script, options: &RenderOptions) -> Result<String>;
}
