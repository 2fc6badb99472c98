//! # Gift Exchange
//!
//! Randomized draws for secret-gift exchanges with exclusion rules.
//!
//! ## Architecture
//!
//! - **Types**: Participants, restrictions, pairings and assignments
//! - **Directory**: Roster with slab-based storage and restriction upkeep
//! - **Engine**: Randomized backtracking solver with restarts
//!
//! ## Guarantees
//!
//! 1. **Validity**: Every draw is a bijection with no self-gifting and no
//!    forbidden pair
//! 2. **Variety**: Repeated draws over the same input differ
//! 3. **Reproducibility**: A seeded RNG yields the same draw every time
//! 4. **Synchronous Execution**: No I/O or shared state inside the solver

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Participant, Restrictions, Assignment
pub mod types;

/// Roster: participants and restrictions with slab-based storage
pub mod directory;

/// Matching engine: randomized backtracking draws
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use directory::{DirectoryError, Roster};
pub use engine::{MatchingEngine, SolveError, SolverConfig};
pub use types::{Assignment, GiftPair, Participant, ParticipantKey, Restrictions};
