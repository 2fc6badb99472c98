//! Roster entry for slab-based storage.
//!
//! ## Design
//!
//! `RosterEntry` wraps a `Participant` with doubly-linked list pointers that
//! thread the roster's insertion order through the slab. Removing a
//! participant unlinks it in O(1) given its slab key.
//!
//! ```text
//! head (first added) <-> entry <-> entry <-> tail (last added)
//! ```

use crate::types::Participant;

/// Participant plus insertion-order links (slab keys)
#[derive(Debug, Clone)]
pub struct RosterEntry {
    /// The participant
    pub participant: Participant,

    /// Next entry in insertion order; None at the tail
    pub next: Option<usize>,

    /// Previous entry in insertion order; None at the head
    pub prev: Option<usize>,
}

impl RosterEntry {
    /// Create an unlinked entry
    ///
    /// # Example
    ///
    /// ```
    /// use gift_exchange::directory::RosterEntry;
    /// use gift_exchange::types::Participant;
    ///
    /// let entry = RosterEntry::new(Participant::new(1, "Alice").unwrap());
    /// assert!(entry.is_unlinked());
    /// ```
    #[inline]
    pub fn new(participant: Participant) -> Self {
        Self {
            participant,
            next: None,
            prev: None,
        }
    }

    /// Check if this entry has no neighbours
    ///
    /// True for a lone entry as well as a detached one.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
