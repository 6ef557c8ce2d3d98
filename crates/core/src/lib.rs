//! lazyseq Core: the stack machine behind lazily evaluated sequences
//!
//! A sequence is recorded as a flattened postfix program rather than as
//! computed values. Evaluating an index replays the program on a small value
//! stack.
//!
//! Key design principles:
//! - OpRef: a tagged index into one of the program's pools
//! - Program: append-only op list plus constant, generator and binary pools
//! - EvalStack: the value stack the program runs on
//!
//! # Modules
//!
//! - `scalar`: The `Scalar` element trait (integers and floats)
//! - `program`: `OpRef`, `Program`, splicing and evaluation
//! - `eval_stack`: Value stack for evaluation
//! - `error`: `ProgramError` for malformed programs

pub mod error;
pub mod eval_stack;
pub mod program;
pub mod scalar;

// Re-export key types
pub use error::ProgramError;
pub use eval_stack::{DEFAULT_STACK_CAPACITY, EvalStack};
pub use program::{BinaryFn, GeneratorFn, OpRef, PoolSizes, Program};
pub use scalar::{Bitwise, Scalar};
