//! Sequence error types.

use lazyseq_core::ProgramError;

/// Error type for sequence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// The recorded program could not be evaluated (internal invariant violation)
    Program(ProgramError),
    /// An operator name is not in the table. Only raised under the strict
    /// operator-name policy.
    UnresolvedOperator(String),
    /// A range would materialize more values than the configured limit
    RangeTooLarge { len: u128, limit: usize },
}

impl std::fmt::Display for SeqError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeqError::Program(e) => write!(f, "{}", e),
            SeqError::UnresolvedOperator(token) => {
                write!(f, "unresolved operator name '{}'", token)
            }
            SeqError::RangeTooLarge { len, limit } => write!(
                f,
                "range of {} values exceeds the configured limit of {}",
                len, limit
            ),
        }
    }
}

impl std::error::Error for SeqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeqError::Program(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProgramError> for SeqError {
    fn from(e: ProgramError) -> Self {
        SeqError::Program(e)
    }
}
