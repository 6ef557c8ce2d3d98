//! lazyseq: lazily evaluated infinite numeric sequences
//!
//! A [`SequenceExpression`] represents an index-addressable sequence whose
//! values are computed on demand. It is built from constants, generator
//! functions of the domain value `start + step * index`, unary transforms and
//! binary combinators, and records them as a postfix program that is replayed
//! for each requested index (see `lazyseq-core`).
//!
//! ```rust,ignore
//! use lazyseq::{Operand, SequenceExpression};
//!
//! let mut seq = SequenceExpression::from_generator(|x: i64| x);
//! seq *= 3i64;
//! seq += Operand::generator(|x| x * x);
//!
//! assert_eq!(seq.first(4)?, vec![0, 4, 10, 18]);
//! assert_eq!(seq.fold_first_named(4, "+")?, Some(32));
//! ```
//!
//! # Modules
//!
//! - `expression`: `SequenceExpression` construction, append and evaluation
//! - `range`: `range`, `first` and the fold family
//! - `operand`: `Operand`, what `combine` and the constructors accept
//! - `operators`: built-in operators and the operator-name table
//! - `overloads`: `+`, `-=`, `<<` and friends
//! - `config`: `SeqConfig`, loadable from TOML
//! - `error`: `SeqError`

pub mod config;
pub mod error;
pub mod expression;
pub mod operand;
pub mod operators;
pub mod overloads;
pub mod range;

pub use config::{ConfigError, OperatorNamePolicy, SeqConfig};
pub use error::SeqError;
pub use expression::SequenceExpression;
pub use operand::Operand;
pub use operators::{BinaryOperator, UnaryOperator, resolve_binary, resolve_unary};
pub use range::RangeIndices;

// Core re-exports
pub use lazyseq_core::{
    BinaryFn, DEFAULT_STACK_CAPACITY, GeneratorFn, OpRef, Program, ProgramError, Scalar,
};
