//! One randomized backtracking attempt.
//!
//! Givers are committed in a fixed most-restricted-first order. At each
//! level the open candidates are shuffled, then tried in turn:
//!
//! ```text
//! commit (mark used, push onto trail) -> recurse
//!   found    -> done
//!   dead end -> undo (pop trail, unmark) -> next candidate
//! ```
//!
//! Without a step limit an attempt explores its whole search tree, so a
//! dead end at the root proves no assignment exists.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::candidates::CandidateTable;

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Every giver committed; `(giver, recipient)` by index, in commit order
    Complete(Vec<(usize, usize)>),
    /// Search tree exhausted without a solution
    Dead,
    /// Step limit reached before the tree was exhausted
    CutOff,
}

/// Result of one attempt, with counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttemptReport {
    pub outcome: Outcome,
    pub steps: u64,
    pub backtracks: u64,
}

enum Step {
    Found,
    Dead,
    CutOff,
}

/// Per-attempt search state, discarded afterwards
pub(crate) struct Attempt<'a, R: Rng + ?Sized> {
    table: &'a CandidateTable,
    rng: &'a mut R,
    order: Vec<usize>,
    used: Vec<bool>,
    trail: Vec<(usize, usize)>,
    step_limit: Option<u64>,
    steps: u64,
    backtracks: u64,
}

impl<'a, R: Rng + ?Sized> Attempt<'a, R> {
    /// Fresh attempt with a newly randomized giver order
    pub(crate) fn new(table: &'a CandidateTable, rng: &'a mut R, step_limit: Option<u64>) -> Self {
        let order = table.mrv_order(rng);
        let n = table.len();
        Self {
            table,
            rng,
            order,
            used: vec![false; n],
            trail: Vec::with_capacity(n),
            step_limit,
            steps: 0,
            backtracks: 0,
        }
    }

    /// Run the search to completion, dead end, or cut-off
    pub(crate) fn run(mut self) -> AttemptReport {
        let outcome = match self.descend(0) {
            Step::Found => Outcome::Complete(std::mem::take(&mut self.trail)),
            Step::Dead => Outcome::Dead,
            Step::CutOff => Outcome::CutOff,
        };
        AttemptReport {
            outcome,
            steps: self.steps,
            backtracks: self.backtracks,
        }
    }

    fn descend(&mut self, depth: usize) -> Step {
        let Some(&giver) = self.order.get(depth) else {
            return Step::Found;
        };

        let mut open: Vec<usize> = self
            .table
            .of(giver)
            .iter()
            .copied()
            .filter(|&recipient| !self.used[recipient])
            .collect();
        open.shuffle(&mut *self.rng);

        for recipient in open {
            if self.step_limit.is_some_and(|limit| self.steps >= limit) {
                return Step::CutOff;
            }
            self.steps += 1;

            self.used[recipient] = true;
            self.trail.push((giver, recipient));

            match self.descend(depth + 1) {
                Step::Found => return Step::Found,
                // Abandoned attempts are dropped whole, no undo needed
                Step::CutOff => return Step::CutOff,
                Step::Dead => {}
            }

            self.trail.pop();
            self.used[recipient] = false;
            self.backtracks += 1;
        }

        Step::Dead
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
