//! Build code once as a language-neutral tree, emit it as Python,
//! TypeScript or PHP.
//!
//! `crossemit` is for code generators that need the same classes, functions
//! and expressions in several languages. Callers assemble a [`Script`] out of
//! [`Statement`]s, [`PanExpr`]s and [`CrossType`]s, then ask for the source
//! code of one [`Target`] at a time.
//!
//! # Architecture
//!
//! ```text
//! Builders                 Tree                 Writers
//! ─────────────────    ───────────────    ─────────────────────
//! AcceptsStatements ─┐                   ┌─> PythonWriterImpl
//! pan / maybe / ... ─┼─> Script ─────────┼─> TypeScriptWriterImpl
//! ClassSpec / ...   ─┘   (imports)       └─> PhpWriterImpl
//! ```
//!
//! # Example
//!
//! ```
//! use crossemit::{AcceptsStatements, CrossType, RenderOptions, Script, Target, pan};
//!
//! let mut script = Script::new();
//! let greeting = script.also_declare("greeting", CrossType::Str, pan("hello"));
//! script.also_return(greeting);
//!
//! let py = script.get_source_code(Target::Python, &RenderOptions::default()).unwrap();
//! assert_eq!(py, "greeting: str = 'hello'\nreturn greeting\n");
//! ```
//!
//! # Note on Translation Fidelity
//!
//! Constructs that a target cannot express are reported as
//! [`EmitError::NotSupported`] at render time instead of being approximated.
//! Hard-coded snippets ([`HardCodedStatement`], [`pyexpr`], [`tsexpr`],
//! [`phpexpr`]) are the escape hatch for target-specific code.

pub mod expr;
pub mod imports;
pub mod output;
pub mod precedence;
mod prettify;
pub mod registry;
pub mod script;
pub mod stmt;
pub mod target;
pub mod traits;
pub mod types;

// Re-exports: types
pub use types::{
    CrossType, CustomType, FlexiType, LiteralSet, LiteralValue, callable, dictof, lit, listof,
    mapof, maybe, newtype, omittable, setof, unflex, unionof,
};

// Re-exports: expressions
pub use expr::{
    BoolOp, Callee, CompareOp, HardCodedExpr, PanCall, PanExpr, StringPart, TypeCheck, and_,
    await_, call, exacteq_, greaterthan, isbool, isint, islist, isnull, isstr, lessthan, not_,
    or_, pan, pan_omit, pandict, panlist, pannotomit, phpexpr, pyexpr, tsexpr,
};
pub use precedence::{PhpPrecedence, PyPrecedence, TsPrecedence};

// Re-exports: statements
pub use stmt::{
    AcceptsStatements, ArgSpec, AssignmentStatement, CatchBlock, ClassProperty, ClassSpec,
    ConditionalBlock, DictBuilderStatement, DictLoopBlock, ExceptionClasses, ForLoopBlock,
    FunctionArg, FunctionSpec, HardCoded, HardCodedStatement, InterfaceSpec, ListAppendStatement,
    Overload, RaiseMessage, RaiseStatement, ReturnType, Statement, StatementKind, Statements,
    TryCatchBlock,
};

// Re-exports: driver
pub use imports::{ImportGroups, ImportSpec};
pub use script::{RenderOptions, Script};
pub use target::{Target, UnknownTarget};

// Re-exports: traits and registry
pub use registry::{writer_for_language, writer_for_target, writers};
pub use traits::{EmitError, Result, Writer};

// Re-exports: built-in writers
pub use output::{
    PHP_WRITER, PYTHON_WRITER, PhpWriterImpl, PythonWriterImpl, TYPESCRIPT_WRITER,
    TypeScriptWriterImpl,
};
