use std::fmt;

/// Caller-contract violations. Both are recoverable: the engine leaves its
/// state untouched when returning either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Operation not permitted in the current drag phase.
    InvalidSequence {
        operation: &'static str,
        phase: &'static str,
    },
    /// Argument outside its domain (e.g. a non-positive display dimension).
    InvalidArgument(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidSequence { operation, phase } => {
                write!(f, "invalid sequence: {operation} not allowed while {phase}")
            }
            EngineError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
