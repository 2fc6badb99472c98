//! Matching engine for gift-exchange draws.
//!
//! ## Pipeline
//!
//! 1. **Validation**: duplicate participants or ids, and restrictions naming
//!    outsiders, are rejected
//! 2. **Pre-check**: a giver with no permissible recipient fails the draw
//!    with `NoOptions` before any search
//! 3. **Matching check**: no perfect matching on the candidate graph means
//!    no draw exists; fails with `Exhausted { attempts: 0 }`
//! 4. **Ordering**: givers sorted by candidate count, fewest first, with
//!    random tie-breaks
//! 5. **Backtracking**: depth-first commit/undo with shuffled candidates
//! 6. **Restarts**: steps 4-5 repeated up to `max_attempts` times
//! 7. **Fallback** (optional): the matching from step 3, when every attempt
//!    hit the step limit
//!
//! ## Guarantees
//!
//! - Every returned assignment is a bijection with no self or forbidden pair
//! - Results vary across calls but are not uniform over all valid draws
//! - Synchronous, no I/O; all randomness comes from the caller's RNG
//!
//! ## Example
//!
//! ```
//! use gift_exchange::engine::{MatchingEngine, SolveError};
//! use gift_exchange::types::{Participant, ParticipantKey, Restrictions};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let group = vec![
//!     Participant::new(1, "Alice").unwrap(),
//!     Participant::new(2, "Bob").unwrap(),
//! ];
//! let mut restrictions = Restrictions::new();
//! restrictions.forbid_mutual(
//!     ParticipantKey::new("alice").unwrap(),
//!     ParticipantKey::new("bob").unwrap(),
//! );
//!
//! let mut engine = MatchingEngine::new();
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let result = engine.solve(&group, &restrictions, &mut rng);
//!
//! assert!(matches!(result, Err(SolveError::NoOptions { .. })));
//! assert_eq!(engine.last_stats().attempts, 0);
//! ```

pub mod config;
pub mod error;
pub mod matcher;

mod candidates;
mod fallback;
mod search;

pub use config::{ConfigError, SolverConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::{InfeasibleReason, SolveError};
pub use matcher::{MatchingEngine, SolveStats};
