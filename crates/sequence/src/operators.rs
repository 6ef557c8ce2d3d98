//! Built-in operators and the operator-name table
//!
//! Every binary operator of a sequence is `combine` with one of these
//! functions. The same functions back the string-driven API (`map_named`,
//! `combine_named`, `fold_*_named`), which resolves a fixed set of tokens:
//!
//! | Token | Operator | Token | Operator |
//! |-------|----------|-------|----------|
//! | `+`   | add      | `&`   | bit and  |
//! | `-`   | subtract | `\|`  | bit or   |
//! | `*`   | multiply | `^`   | bit xor  |
//! | `/`   | divide   | `>>`  | shift right |
//! | `%`   | modulo   | `<<`  | shift left |
//! | `max` | maximum  | `min` | minimum  |
//! | `++`  | increment (unary) | `--` | decrement (unary) |
//!
//! On floating-point element types `%` and the bitwise and shift operators
//! work on the operands truncated to integers (see `Scalar::bitwise`).
//! Binary operators are called as `op(earlier, later)`, so `-` computes
//! `earlier - later`.

use lazyseq_core::{BinaryFn, GeneratorFn, Scalar};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Built-in two-argument operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shr,
    Shl,
    Max,
    Min,
}

/// Built-in one-argument operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Increment,
    Decrement,
}

static BINARY_TOKENS: LazyLock<HashMap<&'static str, BinaryOperator>> = LazyLock::new(|| {
    BinaryOperator::ALL
        .iter()
        .map(|&op| (op.token(), op))
        .collect()
});

static UNARY_TOKENS: LazyLock<HashMap<&'static str, UnaryOperator>> = LazyLock::new(|| {
    UnaryOperator::ALL
        .iter()
        .map(|&op| (op.token(), op))
        .collect()
});

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 12] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Rem,
        BinaryOperator::BitAnd,
        BinaryOperator::BitOr,
        BinaryOperator::BitXor,
        BinaryOperator::Shr,
        BinaryOperator::Shl,
        BinaryOperator::Max,
        BinaryOperator::Min,
    ];

    /// Look up an operator by its token
    pub fn from_token(token: &str) -> Option<Self> {
        BINARY_TOKENS.get(token).copied()
    }

    pub fn token(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Rem => "%",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::Shr => ">>",
            BinaryOperator::Shl => "<<",
            BinaryOperator::Max => "max",
            BinaryOperator::Min => "min",
        }
    }

    /// The operator as a plain function pointer
    pub fn as_fn<T: Scalar>(self) -> fn(T, T) -> T {
        match self {
            BinaryOperator::Add => T::plus,
            BinaryOperator::Sub => T::minus,
            BinaryOperator::Mul => T::times,
            BinaryOperator::Div => T::quotient,
            BinaryOperator::Rem => T::remainder,
            BinaryOperator::Max => max_op::<T>,
            BinaryOperator::Min => min_op::<T>,
            BinaryOperator::BitAnd => T::bitwise().and,
            BinaryOperator::BitOr => T::bitwise().or,
            BinaryOperator::BitXor => T::bitwise().xor,
            BinaryOperator::Shr => T::bitwise().shr,
            BinaryOperator::Shl => T::bitwise().shl,
        }
    }

    /// The operator as a program pool entry
    pub fn function<T: Scalar>(self) -> BinaryFn<T> {
        Arc::new(self.as_fn::<T>())
    }
}

impl UnaryOperator {
    pub const ALL: [UnaryOperator; 2] = [UnaryOperator::Increment, UnaryOperator::Decrement];

    /// Look up an operator by its token
    pub fn from_token(token: &str) -> Option<Self> {
        UNARY_TOKENS.get(token).copied()
    }

    pub fn token(self) -> &'static str {
        match self {
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
        }
    }

    pub fn as_fn<T: Scalar>(self) -> fn(T) -> T {
        match self {
            UnaryOperator::Increment => T::succ,
            UnaryOperator::Decrement => T::pred,
        }
    }

    /// The operator as a program pool entry
    pub fn function<T: Scalar>(self) -> GeneratorFn<T> {
        Arc::new(self.as_fn::<T>())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Resolve a binary operator token for element type `T`
///
/// Tokens outside the table resolve to `None`.
pub fn resolve_binary<T: Scalar>(token: &str) -> Option<BinaryFn<T>> {
    Some(BinaryOperator::from_token(token)?.function::<T>())
}

/// Resolve a unary operator token
pub fn resolve_unary<T: Scalar>(token: &str) -> Option<GeneratorFn<T>> {
    Some(UnaryOperator::from_token(token)?.function::<T>())
}

fn max_op<T: Scalar>(x1: T, x2: T) -> T {
    if x1 > x2 { x1 } else { x2 }
}

fn min_op<T: Scalar>(x1: T, x2: T) -> T {
    if x1 < x2 { x1 } else { x2 }
}
