//! Output writers - emit scripts as source code.

pub mod php;
pub mod python;
pub mod typescript;

pub use php::{PHP_WRITER, PhpWriterImpl};
pub use python::{PYTHON_WRITER, PythonWriterImpl};
pub use typescript::{TYPESCRIPT_WRITER, TypeScriptWriterImpl};

use std::fmt::Write;

/// Indentation-aware line sink.
///
/// Lines are written at the writer's depth; [`FileWriter::with_more_indent`]
/// hands out a writer one level deeper over the same buffer.
pub struct FileWriter<'a> {
    out: &'a mut String,
    indent: &'a str,
    depth: usize,
}

impl<'a> FileWriter<'a> {
    pub fn new(out: &'a mut String, indent: &'a str) -> Self {
        Self {
            out,
            indent,
            depth: 0,
        }
    }

    fn line_at(&mut self, depth: usize, text: &str) {
        for line in text.split('\n') {
            if !line.is_empty() {
                for _ in 0..depth {
                    self.out.push_str(self.indent);
                }
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    /// Write a line at the current depth.
    pub fn line0(&mut self, text: impl AsRef<str>) {
        self.line_at(self.depth, text.as_ref());
    }

    /// Write a line one level deeper than the current depth.
    pub fn line1(&mut self, text: impl AsRef<str>) {
        self.line_at(self.depth + 1, text.as_ref());
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn with_more_indent(&mut self) -> FileWriter<'_> {
        FileWriter {
            out: &mut *self.out,
            indent: self.indent,
            depth: self.depth + 1,
        }
    }
}

/// Python `repr()` of a string: single quotes unless the text contains a
/// single quote and no double quote.
pub(crate) fn py_repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Single-quoted PHP string literal.
pub(crate) fn php_str(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Lines of a `/** ... */` docblock.
pub(crate) fn doc_block(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push("/**".to_string());
    for line in lines {
        if line.is_empty() {
            out.push(" *".to_string());
        } else {
            out.push(format!(" * {line}"));
        }
    }
    out.push(" */".to_string());
    out
}
