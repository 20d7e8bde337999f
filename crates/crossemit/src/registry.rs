//! Lookup for the built-in writers.
//!
//! The set of targets is closed, so there is no registration step: every
//! [`Target`] maps to exactly one static writer.

use crate::output::{php::PHP_WRITER, python::PYTHON_WRITER, typescript::TYPESCRIPT_WRITER};
use crate::target::Target;
use crate::traits::Writer;

/// Get the writer for a target.
pub fn writer_for_target(target: Target) -> &'static dyn Writer {
    match target {
        Target::Python => &PYTHON_WRITER,
        Target::TypeScript => &TYPESCRIPT_WRITER,
        Target::Php => &PHP_WRITER,
    }
}

/// Get a writer by language name or file extension.
pub fn writer_for_language(lang: &str) -> Option<&'static dyn Writer> {
    writers()
        .into_iter()
        .find(|w| w.target().id() == lang || w.extension() == lang)
}

/// Get all built-in writers.
pub fn writers() -> Vec<&'static dyn Writer> {
    Target::ALL.iter().map(|t| writer_for_target(*t)).collect()
}
