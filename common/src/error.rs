use thiserror::Error;

pub type Result<T> = std::result::Result<T, DdError>;

/// Every failure surfaced by the library. All of these are synchronous and
/// indicate a misuse at the call site; none are recoverable by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdError {
    #[error("variable {var} out of range for a universe of {num_vars} variables")]
    VariableOutOfRange { var: usize, num_vars: usize },

    #[error("malformed variable ordering: {0}")]
    MalformedOrdering(String),

    #[error("operand belongs to a different factory")]
    ForeignFactory,

    #[error("assignment has {actual} entries, expected {expected}")]
    AssignmentLength { expected: usize, actual: usize },

    #[error("factories disagree on universe size: {left} vs {right}")]
    UniverseMismatch { left: usize, right: usize },

    #[error("diagram is not a single element chain")]
    NotSinglePath,

    #[error("set pool capacity of {0} elements exhausted")]
    PoolExhausted(usize),

    /// Iteration over a pooled set after its handle was replaced. The safe
    /// API rules this out through exclusive borrows; the kind is part of
    /// the facade's documented contract.
    #[error("iterator invalidated by concurrent modification")]
    ConcurrentModification,
}
