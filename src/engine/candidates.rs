//! Input validation, feasibility pre-check and giver ordering.
//!
//! Participants are mapped to dense indices `0..n` in input order. For each
//! giver the table stores `candidates(g) = all − {g} − forbidden[g]`, the
//! recipients the search may ever try for that giver.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::SolveError;
use crate::types::{Participant, ParticipantKey, Restrictions};

/// Reject duplicate participants and restrictions naming outsiders
pub(crate) fn validate_inputs(
    participants: &[Participant],
    restrictions: &Restrictions,
) -> Result<(), SolveError> {
    let index = index_participants(participants)?;

    for (giver, recipients) in restrictions.iter() {
        if !index.contains_key(giver) {
            return Err(SolveError::UnknownParticipant(giver.clone()));
        }
        if let Some(outsider) = recipients.iter().find(|r| !index.contains_key(*r)) {
            return Err(SolveError::UnknownParticipant(outsider.clone()));
        }
    }
    Ok(())
}

fn index_participants(
    participants: &[Participant],
) -> Result<HashMap<&ParticipantKey, usize>, SolveError> {
    let mut index = HashMap::with_capacity(participants.len());
    let mut ids = HashSet::with_capacity(participants.len());
    for (i, participant) in participants.iter().enumerate() {
        if index.insert(participant.key(), i).is_some() {
            return Err(SolveError::DuplicateParticipant(participant.key().clone()));
        }
        // Digests are keyed on ids
        if !ids.insert(participant.id) {
            return Err(SolveError::DuplicateParticipantId(participant.id));
        }
    }
    Ok(index)
}

/// Permissible recipients per giver, by participant index
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CandidateTable {
    candidates: Vec<Vec<usize>>,
}

impl CandidateTable {
    /// Build the table, failing fast on a giver with no candidates
    ///
    /// This is a necessary condition only: two givers sharing a single
    /// candidate pass here and are caught by the search.
    pub(crate) fn build(
        participants: &[Participant],
        restrictions: &Restrictions,
    ) -> Result<Self, SolveError> {
        let n = participants.len();
        let mut candidates = Vec::with_capacity(n);

        for (giver, participant) in participants.iter().enumerate() {
            let forbidden = restrictions.forbidden_for(participant.key());
            let open: Vec<usize> = (0..n)
                .filter(|&recipient| recipient != giver)
                .filter(|&recipient| {
                    forbidden.map_or(true, |set| !set.contains(participants[recipient].key()))
                })
                .collect();

            if open.is_empty() {
                return Err(SolveError::NoOptions {
                    participant: participant.key().clone(),
                });
            }
            candidates.push(open);
        }

        Ok(Self { candidates })
    }

    /// Number of givers
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Candidates for one giver
    #[inline]
    pub(crate) fn of(&self, giver: usize) -> &[usize] {
        &self.candidates[giver]
    }

    /// Most-restricted-first giver order with random tie-breaks
    ///
    /// Shuffling before a stable sort leaves givers with equal candidate
    /// counts in uniformly random relative order.
    pub(crate) fn mrv_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.candidates.len()).collect();
        order.shuffle(rng);
        order.sort_by_key(|&giver| self.candidates[giver].len());
        order
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
