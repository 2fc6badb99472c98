//! Participant roster with restriction management.
//!
//! ## Architecture
//!
//! - **Slab**: storage for roster entries, O(1) insert/remove/lookup
//! - **HashMap**: normalized name to slab key, for case-insensitive lookup
//! - **Linked list**: insertion order threaded through the entries, so the
//!   roster iterates in the order people were added even after removals
//! - **Restrictions**: the directional forbidden relation, kept consistent
//!   with membership (removing someone drops every restriction naming them)
//!
//! ## Example
//!
//! ```
//! use gift_exchange::directory::Roster;
//!
//! let mut roster = Roster::new();
//! roster.add("Alice").unwrap();
//! roster.add("Bob").unwrap();
//! roster.add("Carol").unwrap();
//! roster.forbid_mutual("alice", "BOB").unwrap();
//!
//! assert!(roster.contains("ALICE"));
//! assert_eq!(roster.restrictions().len(), 2);
//! ```

use std::collections::HashMap;

use rand::Rng;
use slab::Slab;
use tracing::debug;

use crate::directory::{DirectoryError, RosterEntry};
use crate::engine::MatchingEngine;
use crate::types::{Assignment, Participant, ParticipantKey, Restrictions};

/// The group taking part in a gift exchange
#[derive(Debug, Clone)]
pub struct Roster {
    /// Entry storage
    entries: Slab<RosterEntry>,

    /// Normalized name -> slab key
    index: HashMap<ParticipantKey, usize>,

    /// Forbidden recipients per giver
    restrictions: Restrictions,

    /// First added (slab key)
    head: Option<usize>,

    /// Last added (slab key)
    tail: Option<usize>,

    /// Next participant id to hand out
    next_participant_id: u64,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a roster with room for `capacity` participants
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            restrictions: Restrictions::new(),
            head: None,
            tail: None,
            next_participant_id: 1,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated entry slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Number of participants
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the roster is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========================================================================
    // Participants
    // ========================================================================

    /// Add a participant
    ///
    /// # Arguments
    ///
    /// * `name` - Name as entered; identity is the trimmed, lowercased form
    ///
    /// # Returns
    ///
    /// The new participant, with the next free id
    ///
    /// # Example
    ///
    /// ```
    /// use gift_exchange::directory::{DirectoryError, Roster};
    ///
    /// let mut roster = Roster::new();
    /// assert_eq!(roster.add(" Alice ").unwrap().display_name(), "Alice");
    /// assert!(matches!(
    ///     roster.add("ALICE"),
    ///     Err(DirectoryError::DuplicateParticipant(_))
    /// ));
    /// ```
    pub fn add(&mut self, name: &str) -> Result<&Participant, DirectoryError> {
        let participant =
            Participant::new(self.next_participant_id, name).ok_or(DirectoryError::BlankName)?;
        if self.index.contains_key(participant.key()) {
            return Err(DirectoryError::DuplicateParticipant(
                participant.display_name().to_string(),
            ));
        }
        self.next_participant_id += 1;

        let key = participant.key().clone();
        debug!(participant = %key, id = participant.id, "participant added");

        let slot = self.entries.insert(RosterEntry::new(participant));
        self.index.insert(key, slot);
        self.push_back(slot);

        Ok(&self.entries[slot].participant)
    }

    /// Remove a participant and every restriction naming them
    ///
    /// # Returns
    ///
    /// The removed participant, or None if not found
    pub fn remove(&mut self, name: &str) -> Option<Participant> {
        let key = ParticipantKey::new(name)?;
        let slot = self.index.remove(&key)?;
        self.unlink(slot);

        let dropped = self.restrictions.remove_participant(&key);
        debug!(participant = %key, restrictions_dropped = dropped, "participant removed");

        Some(self.entries.remove(slot).participant)
    }

    /// Look up a participant by name, ignoring case and surrounding whitespace
    pub fn get(&self, name: &str) -> Option<&Participant> {
        let key = ParticipantKey::new(name)?;
        let slot = *self.index.get(&key)?;
        self.entries.get(slot).map(|entry| &entry.participant)
    }

    /// Check if a participant exists
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over participants in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: &self.entries,
            cursor: self.head,
            remaining: self.entries.len(),
        }
    }

    /// Participants in insertion order
    pub fn participants(&self) -> Vec<Participant> {
        self.iter().cloned().collect()
    }

    /// Remove every participant and restriction
    ///
    /// Ids keep counting up from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.restrictions.clear();
        self.head = None;
        self.tail = None;
    }

    // ========================================================================
    // Restrictions
    // ========================================================================

    /// Forbid `giver` from drawing `recipient`
    ///
    /// Returns true if the restriction is new.
    pub fn forbid(&mut self, giver: &str, recipient: &str) -> Result<bool, DirectoryError> {
        let (giver, recipient) = self.resolve_pair(giver, recipient)?;
        Ok(self.restrictions.forbid(giver, recipient))
    }

    /// Forbid both directions between `a` and `b`
    ///
    /// Returns the number of restrictions added.
    pub fn forbid_mutual(&mut self, a: &str, b: &str) -> Result<usize, DirectoryError> {
        let (a, b) = self.resolve_pair(a, b)?;
        Ok(self.restrictions.forbid_mutual(a, b))
    }

    /// Lift the restriction on `giver` drawing `recipient`
    ///
    /// Returns true if a restriction was removed.
    pub fn allow(&mut self, giver: &str, recipient: &str) -> Result<bool, DirectoryError> {
        let (giver, recipient) = self.resolve_pair(giver, recipient)?;
        Ok(self.restrictions.allow(&giver, &recipient))
    }

    /// Lift both directions between `a` and `b`
    ///
    /// Returns the number of restrictions removed.
    pub fn allow_mutual(&mut self, a: &str, b: &str) -> Result<usize, DirectoryError> {
        let (a, b) = self.resolve_pair(a, b)?;
        Ok(self.restrictions.allow_mutual(&a, &b))
    }

    /// Recipients `giver` may not draw, in roster order
    pub fn forbidden_for(&self, giver: &str) -> Result<Vec<&Participant>, DirectoryError> {
        let giver = self.resolve(giver)?;
        let Some(forbidden) = self.restrictions.forbidden_for(giver.key()) else {
            return Ok(Vec::new());
        };
        Ok(self
            .iter()
            .filter(|participant| forbidden.contains(participant.key()))
            .collect())
    }

    /// The full restriction relation
    #[inline]
    pub fn restrictions(&self) -> &Restrictions {
        &self.restrictions
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Owned copy of participants and restrictions for the engine
    pub fn snapshot(&self) -> (Vec<Participant>, Restrictions) {
        (self.participants(), self.restrictions.clone())
    }

    /// Draw an assignment for the current roster
    ///
    /// Pairs come back in roster order by giver.
    ///
    /// # Example
    ///
    /// ```
    /// use gift_exchange::directory::Roster;
    /// use gift_exchange::engine::MatchingEngine;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut roster = Roster::new();
    /// for name in ["Ann", "Ben", "Cat", "Dan"] {
    ///     roster.add(name).unwrap();
    /// }
    /// roster.forbid_mutual("Ann", "Ben").unwrap();
    ///
    /// let mut engine = MatchingEngine::new();
    /// let mut rng = ChaCha8Rng::seed_from_u64(42);
    /// let assignment = roster.draw(&mut engine, &mut rng).unwrap();
    ///
    /// assert_eq!(assignment.len(), 4);
    /// assert_eq!(assignment.pairs()[0].giver.display_name(), "Ann");
    /// ```
    pub fn draw<R: Rng + ?Sized>(
        &self,
        engine: &mut MatchingEngine,
        rng: &mut R,
    ) -> Result<Assignment, DirectoryError> {
        let participants = self.participants();
        Ok(engine.solve(&participants, &self.restrictions, rng)?)
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn resolve(&self, name: &str) -> Result<&Participant, DirectoryError> {
        self.get(name)
            .ok_or_else(|| DirectoryError::UnknownParticipant(name.trim().to_string()))
    }

    fn resolve_pair(
        &self,
        giver: &str,
        recipient: &str,
    ) -> Result<(ParticipantKey, ParticipantKey), DirectoryError> {
        let giver = self.resolve(giver)?;
        let recipient = self.resolve(recipient)?;
        if giver == recipient {
            return Err(DirectoryError::SelfRestriction(
                giver.display_name().to_string(),
            ));
        }
        Ok((giver.key().clone(), recipient.key().clone()))
    }

    /// Append an entry to the insertion-order list
    fn push_back(&mut self, slot: usize) {
        let prev = self.tail;
        if let Some(entry) = self.entries.get_mut(slot) {
            debug_assert!(entry.is_unlinked(), "entry {slot} is already linked");
            entry.prev = prev;
            entry.next = None;
        }

        match prev {
            Some(tail) => {
                if let Some(tail_entry) = self.entries.get_mut(tail) {
                    tail_entry.next = Some(slot);
                }
            }
            // Empty list - this is also the head
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    /// Detach an entry from the insertion-order list
    fn unlink(&mut self, slot: usize) {
        let Some(entry) = self.entries.get_mut(slot) else {
            return;
        };
        let prev = entry.prev.take();
        let next = entry.next.take();

        match prev {
            Some(p) => {
                if let Some(prev_entry) = self.entries.get_mut(p) {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(next_entry) = self.entries.get_mut(n) {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        debug_assert!(self.entries.get(slot).map_or(true, RosterEntry::is_unlinked));
    }
}

/// Insertion-order iterator over a [`Roster`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    entries: &'a Slab<RosterEntry>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Participant;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&entry.participant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{InfeasibleReason, SolveError};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster_of(names: &[&str]) -> Roster {
        let mut roster = Roster::with_capacity(names.len());
        for name in names {
            roster.add(name).unwrap();
        }
        roster
    }

    fn names(roster: &Roster) -> Vec<&str> {
        roster.iter().map(Participant::display_name).collect()
    }

    #[test]
    fn test_roster_new() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
        assert_eq!(roster.iter().count(), 0);
        assert!(roster.restrictions().is_empty());
    }

    #[test]
    fn test_roster_with_capacity() {
        let roster = Roster::with_capacity(64);
        assert!(roster.capacity() >= 64);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut roster = Roster::new();
        assert_eq!(roster.add("Ann").unwrap().id, 1);
        assert_eq!(roster.add("Ben").unwrap().id, 2);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_add_rejects_blank_and_duplicates() {
        let mut roster = roster_of(&["Ann"]);

        assert_eq!(roster.add("   "), Err(DirectoryError::BlankName));
        assert_eq!(
            roster.add(" ANN"),
            Err(DirectoryError::DuplicateParticipant("ANN".to_string()))
        );
        assert_eq!(roster.len(), 1);
        // A rejected add does not burn an id
        assert_eq!(roster.add("Ben").unwrap().id, 2);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let roster = roster_of(&["Ann"]);

        assert_eq!(roster.get("  aNN ").unwrap().display_name(), "Ann");
        assert!(roster.contains("ANN"));
        assert!(!roster.contains("Anne"));
        assert!(roster.get("").is_none());
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let roster = roster_of(&["Cat", "Ann", "Ben"]);
        assert_eq!(names(&roster), vec!["Cat", "Ann", "Ben"]);
        assert_eq!(roster.iter().size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_remove_keeps_order_of_the_rest() {
        let mut roster = roster_of(&["Ann", "Ben", "Cat", "Dan"]);

        assert_eq!(roster.remove("ben").unwrap().display_name(), "Ben");
        assert_eq!(names(&roster), vec!["Ann", "Cat", "Dan"]);

        // Head and tail
        roster.remove("ANN");
        roster.remove("dan");
        assert_eq!(names(&roster), vec!["Cat"]);

        // Slots are reused but order stays by insertion
        roster.add("Eve").unwrap();
        roster.add("Fay").unwrap();
        assert_eq!(names(&roster), vec!["Cat", "Eve", "Fay"]);
    }

    #[test]
    fn test_remove_nonexistent() {
        let mut roster = roster_of(&["Ann"]);
        assert!(roster.remove("Zed").is_none());
        assert!(roster.remove(" ").is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_remove_cascades_restrictions() {
        let mut roster = roster_of(&["Ann", "Ben", "Cat"]);
        roster.forbid_mutual("Ann", "Ben").unwrap();
        roster.forbid("Cat", "Ben").unwrap();

        roster.remove("Ben");
        assert!(roster.restrictions().is_empty());
        assert!(roster.forbidden_for("Ann").unwrap().is_empty());
    }

    #[test]
    fn test_readding_removed_name_is_a_new_participant() {
        let mut roster = roster_of(&["Ann", "Ben"]);
        roster.forbid("Ann", "Ben").unwrap();

        roster.remove("Ben");
        let id = roster.add("Ben").unwrap().id;

        assert_eq!(id, 3);
        assert!(roster.forbidden_for("Ann").unwrap().is_empty());
    }

    #[test]
    fn test_forbid_and_allow() {
        let mut roster = roster_of(&["Ann", "Ben", "Cat"]);

        assert_eq!(roster.forbid("ann", "ben"), Ok(true));
        assert_eq!(roster.forbid("ANN", "BEN"), Ok(false));
        assert!(roster.restrictions().len() == 1);

        assert_eq!(roster.allow("Ann", "Ben"), Ok(true));
        assert_eq!(roster.allow("Ann", "Ben"), Ok(false));
        assert!(roster.restrictions().is_empty());
    }

    #[test]
    fn test_forbid_mutual_and_allow_mutual() {
        let mut roster = roster_of(&["Ann", "Ben"]);

        assert_eq!(roster.forbid_mutual("Ann", "Ben"), Ok(2));
        assert_eq!(roster.allow_mutual("Ben", "Ann"), Ok(2));
        assert_eq!(roster.allow_mutual("Ben", "Ann"), Ok(0));
    }

    #[test]
    fn test_restriction_errors() {
        let mut roster = roster_of(&["Ann", "Ben"]);

        assert_eq!(
            roster.forbid("Ann", "Zed"),
            Err(DirectoryError::UnknownParticipant("Zed".to_string()))
        );
        assert_eq!(
            roster.forbid_mutual("ann", "ANN"),
            Err(DirectoryError::SelfRestriction("Ann".to_string()))
        );
        assert!(matches!(
            roster.forbidden_for("nobody"),
            Err(DirectoryError::UnknownParticipant(_))
        ));
    }

    #[test]
    fn test_forbidden_for_in_roster_order() {
        let mut roster = roster_of(&["Ann", "Ben", "Cat", "Dan"]);
        roster.forbid("Ann", "Dan").unwrap();
        roster.forbid("Ann", "Ben").unwrap();

        let forbidden: Vec<&str> = roster
            .forbidden_for("Ann")
            .unwrap()
            .into_iter()
            .map(Participant::display_name)
            .collect();
        assert_eq!(forbidden, vec!["Ben", "Dan"]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut roster = roster_of(&["Ann", "Ben"]);
        roster.forbid("Ann", "Ben").unwrap();

        let (participants, restrictions) = roster.snapshot();
        roster.remove("Ann");

        assert_eq!(participants.len(), 2);
        assert_eq!(restrictions.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut roster = roster_of(&["Ann", "Ben"]);
        roster.forbid("Ann", "Ben").unwrap();

        roster.clear();
        assert!(roster.is_empty());
        assert!(roster.restrictions().is_empty());
        assert_eq!(roster.iter().count(), 0);
        assert_eq!(roster.add("Cat").unwrap().id, 3);
    }

    #[test]
    fn test_draw_in_roster_order() {
        let mut roster = roster_of(&["Dan", "Ann", "Cat", "Ben"]);
        roster.forbid_mutual("Ann", "Ben").unwrap();
        let mut engine = MatchingEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let assignment = roster.draw(&mut engine, &mut rng).unwrap();
        let givers: Vec<&str> = assignment
            .iter()
            .map(|pair| pair.giver.display_name())
            .collect();
        assert_eq!(givers, vec!["Dan", "Ann", "Cat", "Ben"]);

        let (participants, restrictions) = roster.snapshot();
        assert!(assignment.verify(&participants, &restrictions).is_ok());
    }

    #[test]
    fn test_draw_reports_infeasible() {
        let mut roster = roster_of(&["Ann", "Ben"]);
        roster.forbid("Ann", "Ben").unwrap();
        let mut engine = MatchingEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = roster.draw(&mut engine, &mut rng).unwrap_err();
        match err {
            DirectoryError::Solve(solve) => {
                assert_eq!(solve.reason(), Some(InfeasibleReason::NoOptions));
                assert!(matches!(solve, SolveError::NoOptions { .. }));
            }
            other => panic!("expected a solve error, got {other:?}"),
        }
    }
}
