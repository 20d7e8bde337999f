//! Binding-tightness tags attached to rendered expressions.
//!
//! Python and TypeScript share a four-level lattice, PHP has three levels.
//! A lower rank binds more tightly. Parents decide whether to parenthesize a
//! child from the child's tag alone, using one of two policies:
//!
//! - [`wrap_dot`] for the base of a member access, index or call;
//! - [`wrap_mult`] for operands of comparisons, negation and concatenation.

/// A precedence lattice for one target.
pub trait Precedence: Copy + Eq {
    /// Rank of member access, the tightest non-atomic level.
    const DOT: Self;
    /// Rank of comparisons and unary operators.
    const MULT: Self;

    fn rank(self) -> u8;
}

/// Python precedence tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyPrecedence {
    Literal,
    Dot,
    MultDiv,
    AddSub,
}

/// TypeScript precedence tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrecedence {
    Literal,
    Dot,
    MultDiv,
    AddSub,
}

/// PHP precedence tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhpPrecedence {
    Literal,
    Arrow,
    MultDiv,
}

impl Precedence for PyPrecedence {
    const DOT: Self = PyPrecedence::Dot;
    const MULT: Self = PyPrecedence::MultDiv;

    fn rank(self) -> u8 {
        match self {
            PyPrecedence::Literal => 1,
            PyPrecedence::Dot => 2,
            PyPrecedence::MultDiv => 3,
            PyPrecedence::AddSub => 4,
        }
    }
}

impl Precedence for TsPrecedence {
    const DOT: Self = TsPrecedence::Dot;
    const MULT: Self = TsPrecedence::MultDiv;

    fn rank(self) -> u8 {
        match self {
            TsPrecedence::Literal => 1,
            TsPrecedence::Dot => 2,
            TsPrecedence::MultDiv => 3,
            TsPrecedence::AddSub => 4,
        }
    }
}

impl Precedence for PhpPrecedence {
    const DOT: Self = PhpPrecedence::Arrow;
    const MULT: Self = PhpPrecedence::MultDiv;

    fn rank(self) -> u8 {
        match self {
            PhpPrecedence::Literal => 1,
            PhpPrecedence::Arrow => 2,
            PhpPrecedence::MultDiv => 3,
        }
    }
}

fn paren(code: String) -> String {
    format!("({code})")
}

/// Wrap a child used as the base of `.x`, `[i]` or `(...)`.
pub fn wrap_dot<P: Precedence>((code, prec): (String, P)) -> String {
    if prec.rank() > P::DOT.rank() {
        paren(code)
    } else {
        code
    }
}

/// Wrap a child used as an operand of a comparison, negation or
/// concatenation.
pub fn wrap_mult<P: Precedence>((code, prec): (String, P)) -> String {
    if prec.rank() >= P::MULT.rank() {
        paren(code)
    } else {
        code
    }
}
