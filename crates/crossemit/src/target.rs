//! The fixed set of output languages.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A language that scripts can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Python,
    TypeScript,
    Php,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Python, Target::TypeScript, Target::Php];

    /// Lowercase identifier (e.g., "python", "typescript").
    pub fn id(self) -> &'static str {
        match self {
            Target::Python => "python",
            Target::TypeScript => "typescript",
            Target::Php => "php",
        }
    }

    /// File extension for rendered output.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Python => "py",
            Target::TypeScript => "ts",
            Target::Php => "php",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Python => "Python",
            Target::TypeScript => "TypeScript",
            Target::Php => "PHP",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown target language: {0}")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Target::Python),
            "typescript" | "ts" => Ok(Target::TypeScript),
            "php" => Ok(Target::Php),
            _ => Err(UnknownTarget(s.to_string())),
        }
    }
}
