//! Program error types.

use crate::program::OpRef;

/// A program that cannot be evaluated.
///
/// Programs grown through the append protocol are always well formed, so any
/// of these indicates a broken internal invariant rather than a user error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// The program has no operations
    EmptyProgram,
    /// An operation needed more values than the stack held
    StackUnderflow {
        position: usize,
        op: OpRef,
        depth: usize,
    },
    /// An operation references a pool slot that does not exist
    DanglingReference { position: usize, op: OpRef },
    /// Evaluation finished with other than exactly one value on the stack
    UnbalancedStack { depth: usize },
}

impl std::fmt::Display for ProgramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramError::EmptyProgram => write!(f, "evaluate: program is empty"),
            ProgramError::StackUnderflow {
                position,
                op,
                depth,
            } => write!(
                f,
                "evaluate: stack underflow at op {} ({}): needs {} value(s), stack has {}",
                position,
                op,
                op.arity(),
                depth
            ),
            ProgramError::DanglingReference { position, op } => {
                write!(f, "evaluate: op {} ({}) references a missing pool entry", position, op)
            }
            ProgramError::UnbalancedStack { depth } => write!(
                f,
                "evaluate: program left {} values on the stack, expected 1",
                depth
            ),
        }
    }
}

impl std::error::Error for ProgramError {}
