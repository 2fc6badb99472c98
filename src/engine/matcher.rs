//! The matching engine: restart driver and result assembly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::engine::candidates::{validate_inputs, CandidateTable};
use crate::engine::fallback::perfect_matching;
use crate::engine::search::{Attempt, Outcome};
use crate::engine::{ConfigError, SolveError, SolverConfig};
use crate::types::{Assignment, GiftPair, Participant, Restrictions};

/// Counters describing the most recent solve call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Randomized attempts started (0 if input was rejected or trivial)
    pub attempts: u32,

    /// Tentative commits across all attempts
    pub steps: u64,

    /// Commits undone across all attempts
    pub backtracks: u64,

    /// The assignment came from the exhaustive fallback
    pub used_fallback: bool,
}

/// Randomized backtracking solver for gift-exchange draws.
///
/// The engine keeps no search state between calls. It only remembers the
/// statistics of the last call and running totals.
///
/// ## Completeness
///
/// Before any attempt the engine looks for a perfect matching on the
/// candidate graph, in polynomial time. If there is none, no draw exists and
/// `Exhausted { attempts: 0 }` is returned without searching. Otherwise a
/// draw exists, and each attempt without a step limit is guaranteed to find
/// one. With a step limit, attempts may all be cut off; `exhaustive_fallback`
/// then returns the matching found up front instead of `Exhausted`.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: SolverConfig,
    last_stats: SolveStats,
    total_solves: u64,
    total_attempts: u64,
}

impl MatchingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a validated configuration
    pub fn with_config(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Statistics of the most recent solve call
    #[inline]
    pub fn last_stats(&self) -> SolveStats {
        self.last_stats
    }

    /// Solve calls made on this engine
    #[inline]
    pub fn total_solves(&self) -> u64 {
        self.total_solves
    }

    /// Attempts made across all solve calls
    #[inline]
    pub fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    /// Draw with an RNG seeded from the configuration
    ///
    /// A configured seed gives reproducible draws; otherwise the RNG is
    /// seeded from OS entropy.
    pub fn draw(
        &mut self,
        participants: &[Participant],
        restrictions: &Restrictions,
    ) -> Result<Assignment, SolveError> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.solve(participants, restrictions, &mut rng)
    }

    /// Assign every participant exactly one recipient
    ///
    /// # Arguments
    ///
    /// * `participants` - The group; order only affects the output pair order
    /// * `restrictions` - Forbidden recipients per giver, read as a snapshot
    /// * `rng` - Source of all randomness used by the search
    ///
    /// # Returns
    ///
    /// The empty assignment for fewer than two participants, otherwise a
    /// bijection with no self or forbidden pairs, in participant order.
    ///
    /// # Example
    ///
    /// ```
    /// use gift_exchange::engine::MatchingEngine;
    /// use gift_exchange::types::{Participant, Restrictions};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let group: Vec<Participant> = ["Ann", "Ben", "Cat"]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, name)| Participant::new(i as u64 + 1, name).unwrap())
    ///     .collect();
    ///
    /// let mut engine = MatchingEngine::new();
    /// let mut rng = ChaCha8Rng::seed_from_u64(1);
    /// let assignment = engine.solve(&group, &Restrictions::new(), &mut rng).unwrap();
    ///
    /// assert_eq!(assignment.len(), 3);
    /// assert!(assignment.verify(&group, &Restrictions::new()).is_ok());
    /// ```
    pub fn solve<R: Rng + ?Sized>(
        &mut self,
        participants: &[Participant],
        restrictions: &Restrictions,
        rng: &mut R,
    ) -> Result<Assignment, SolveError> {
        self.last_stats = SolveStats::default();
        self.total_solves += 1;

        validate_inputs(participants, restrictions)?;

        if participants.len() < 2 {
            debug!(participants = participants.len(), "nothing to draw");
            return Ok(Assignment::empty());
        }

        let table = CandidateTable::build(participants, restrictions).map_err(|err| {
            warn!(error = %err, "draw is structurally infeasible");
            err
        })?;

        // A perfect matching on the candidate graph exists iff a draw does
        let Some(witness) = perfect_matching(&table) else {
            warn!(
                participants = participants.len(),
                "no perfect matching on the candidate graph"
            );
            return Err(SolveError::Exhausted { attempts: 0 });
        };

        for attempt in 1..=self.config.max_attempts {
            let report = Attempt::new(&table, &mut *rng, self.config.step_limit).run();

            self.last_stats.attempts = attempt;
            self.last_stats.steps += report.steps;
            self.last_stats.backtracks += report.backtracks;
            self.total_attempts += 1;

            match report.outcome {
                Outcome::Complete(pairs) => {
                    info!(
                        participants = participants.len(),
                        attempts = attempt,
                        steps = self.last_stats.steps,
                        "draw complete"
                    );
                    return Ok(assemble(participants, restrictions, pairs));
                }
                Outcome::CutOff => {
                    debug!(attempt, steps = report.steps, "attempt hit step limit");
                }
                Outcome::Dead => {
                    // Unreachable while a perfect matching exists
                    debug!(attempt, steps = report.steps, "search tree exhausted");
                    break;
                }
            }
        }

        if self.config.exhaustive_fallback {
            self.last_stats.used_fallback = true;
            info!(
                participants = participants.len(),
                attempts = self.last_stats.attempts,
                "draw completed by exhaustive fallback"
            );
            return Ok(assemble(participants, restrictions, witness));
        }

        warn!(attempts = self.last_stats.attempts, "no assignment found");
        Err(SolveError::Exhausted {
            attempts: self.last_stats.attempts,
        })
    }
}

/// Turn index pairs into an assignment ordered by giver input position
fn assemble(
    participants: &[Participant],
    restrictions: &Restrictions,
    mut pairs: Vec<(usize, usize)>,
) -> Assignment {
    pairs.sort_unstable();
    let assignment = Assignment::new(
        pairs
            .into_iter()
            .map(|(giver, recipient)| {
                GiftPair::new(participants[giver].clone(), participants[recipient].clone())
            })
            .collect(),
    );
    debug_assert!(assignment.verify(participants, restrictions).is_ok());
    assignment
}

// ============================================================================
// Unit Tests
// ============================================================================
