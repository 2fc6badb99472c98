//! Solver failures.
//!
//! Two failures mean "no draw": `NoOptions` is structural and found before
//! any search runs, `Exhausted` comes from the matching check or from the
//! restart driver giving up.
//! The remaining variants reject malformed input.

use std::fmt;

use thiserror::Error;

use crate::types::ParticipantKey;

/// Why a draw is infeasible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfeasibleReason {
    /// Some participant has no permissible recipient at all
    NoOptions,
    /// Every randomized attempt failed
    Exhausted,
}

impl InfeasibleReason {
    /// Stable reason code
    pub fn as_str(self) -> &'static str {
        match self {
            InfeasibleReason::NoOptions => "no-options",
            InfeasibleReason::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`MatchingEngine::solve`](crate::engine::MatchingEngine::solve)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Pre-check found a participant whose candidate set is empty
    #[error("no permissible recipients for at least one participant ({participant})")]
    NoOptions { participant: ParticipantKey },

    /// No draw exists, or the attempt bound ran out before one was found
    ///
    /// `attempts` is 0 when the matching check proved infeasibility up front.
    #[error(
        "no assignment found under the given restrictions ({attempts} randomized attempt(s) made)"
    )]
    Exhausted { attempts: u32 },

    /// The same normalized name appears twice in the participant set
    #[error("duplicate participant: {0}")]
    DuplicateParticipant(ParticipantKey),

    /// A restriction names someone outside the participant set
    #[error("restriction references unknown participant: {0}")]
    UnknownParticipant(ParticipantKey),

    /// Two participants share a numeric id
    #[error("duplicate participant id: {0}")]
    DuplicateParticipantId(u64),
}

impl SolveError {
    /// Infeasibility reason, or None for rejected input
    pub fn reason(&self) -> Option<InfeasibleReason> {
        match self {
            SolveError::NoOptions { .. } => Some(InfeasibleReason::NoOptions),
            SolveError::Exhausted { .. } => Some(InfeasibleReason::Exhausted),
            SolveError::DuplicateParticipant(_)
            | SolveError::UnknownParticipant(_)
            | SolveError::DuplicateParticipantId(_) => None,
        }
    }

    /// Check if this error reports an infeasible draw
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.reason().is_some()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
