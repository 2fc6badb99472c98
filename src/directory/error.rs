use thiserror::Error;

use crate::engine::SolveError;

/// Errors from roster and restriction management
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("participant name is blank")]
    BlankName,

    #[error("participant already exists: {0}")]
    DuplicateParticipant(String),

    #[error("no such participant: {0}")]
    UnknownParticipant(String),

    #[error("{0} cannot be restricted from themselves")]
    SelfRestriction(String),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
