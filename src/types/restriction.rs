//! Directional "may-not-give-to" relation.
//!
//! `Restrictions` maps each giver to the recipients they must not draw.
//! The relation is one-way: Alice forbidding Bob says nothing about Bob
//! giving to Alice. Mutual restrictions are simply both directions.
//!
//! Self-assignment is always forbidden by the engine and does not need to
//! be recorded here.

use std::collections::{HashMap, HashSet};

use crate::types::ParticipantKey;

/// Forbidden-recipient sets keyed by giver.
///
/// Givers with no restrictions have no entry; empty sets are pruned on
/// removal so `len()` counts only real one-way restrictions.
///
/// ## Example
///
/// ```
/// use gift_exchange::types::{ParticipantKey, Restrictions};
///
/// let alice = ParticipantKey::new("Alice").unwrap();
/// let bob = ParticipantKey::new("Bob").unwrap();
///
/// let mut restrictions = Restrictions::new();
/// restrictions.forbid(alice.clone(), bob.clone());
///
/// assert!(restrictions.is_forbidden(&alice, &bob));
/// assert!(!restrictions.is_forbidden(&bob, &alice));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restrictions {
    forbidden: HashMap<ParticipantKey, HashSet<ParticipantKey>>,
}

impl Restrictions {
    /// Create an empty relation
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid `giver` from drawing `recipient`
    ///
    /// Returns true if the restriction was not already present.
    pub fn forbid(&mut self, giver: ParticipantKey, recipient: ParticipantKey) -> bool {
        self.forbidden.entry(giver).or_default().insert(recipient)
    }

    /// Forbid both directions between `a` and `b`
    ///
    /// Returns the number of restrictions newly added (0, 1 or 2).
    pub fn forbid_mutual(&mut self, a: ParticipantKey, b: ParticipantKey) -> usize {
        let forward = self.forbid(a.clone(), b.clone());
        let backward = self.forbid(b, a);
        usize::from(forward) + usize::from(backward)
    }

    /// Lift the restriction on `giver` drawing `recipient`
    ///
    /// Returns true if a restriction was removed.
    pub fn allow(&mut self, giver: &ParticipantKey, recipient: &ParticipantKey) -> bool {
        let Some(set) = self.forbidden.get_mut(giver) else {
            return false;
        };
        let removed = set.remove(recipient);
        if set.is_empty() {
            self.forbidden.remove(giver);
        }
        removed
    }

    /// Lift both directions between `a` and `b`
    ///
    /// Returns the number of restrictions removed (0, 1 or 2).
    pub fn allow_mutual(&mut self, a: &ParticipantKey, b: &ParticipantKey) -> usize {
        usize::from(self.allow(a, b)) + usize::from(self.allow(b, a))
    }

    /// Check whether `giver` may not draw `recipient`
    #[inline]
    pub fn is_forbidden(&self, giver: &ParticipantKey, recipient: &ParticipantKey) -> bool {
        self.forbidden
            .get(giver)
            .is_some_and(|set| set.contains(recipient))
    }

    /// Recipients forbidden for `giver`, if any
    #[inline]
    pub fn forbidden_for(&self, giver: &ParticipantKey) -> Option<&HashSet<ParticipantKey>> {
        self.forbidden.get(giver)
    }

    /// Drop every restriction that names `key` on either side
    ///
    /// Returns the number of one-way restrictions removed.
    pub fn remove_participant(&mut self, key: &ParticipantKey) -> usize {
        let mut removed = self.forbidden.remove(key).map_or(0, |set| set.len());
        self.forbidden.retain(|_, set| {
            if set.remove(key) {
                removed += 1;
            }
            !set.is_empty()
        });
        removed
    }

    /// Iterate over `(giver, forbidden recipients)`
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantKey, &HashSet<ParticipantKey>)> {
        self.forbidden.iter()
    }

    /// Number of one-way restrictions
    pub fn len(&self) -> usize {
        self.forbidden.values().map(HashSet::len).sum()
    }

    /// Check if there are no restrictions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }

    /// Remove every restriction
    pub fn clear(&mut self) {
        self.forbidden.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ParticipantKey {
        ParticipantKey::new(name).unwrap()
    }

    #[test]
    fn test_restrictions_new() {
        let restrictions = Restrictions::new();
        assert!(restrictions.is_empty());
        assert_eq!(restrictions.len(), 0);
        assert!(restrictions.forbidden_for(&key("a")).is_none());
    }

    #[test]
    fn test_forbid_is_directional() {
        let mut restrictions = Restrictions::new();

        assert!(restrictions.forbid(key("a"), key("b")));
        assert!(!restrictions.forbid(key("a"), key("b")), "duplicate is a no-op");

        assert!(restrictions.is_forbidden(&key("a"), &key("b")));
        assert!(!restrictions.is_forbidden(&key("b"), &key("a")));
        assert_eq!(restrictions.len(), 1);
    }

    #[test]
    fn test_forbid_mutual() {
        let mut restrictions = Restrictions::new();
        restrictions.forbid(key("a"), key("b"));

        // Only the missing direction is new
        assert_eq!(restrictions.forbid_mutual(key("a"), key("b")), 1);
        assert!(restrictions.is_forbidden(&key("b"), &key("a")));
        assert_eq!(restrictions.len(), 2);
    }

    #[test]
    fn test_allow_prunes_empty_sets() {
        let mut restrictions = Restrictions::new();
        restrictions.forbid(key("a"), key("b"));

        assert!(restrictions.allow(&key("a"), &key("b")));
        assert!(!restrictions.allow(&key("a"), &key("b")));
        assert!(restrictions.is_empty());
    }

    #[test]
    fn test_allow_mutual() {
        let mut restrictions = Restrictions::new();
        restrictions.forbid_mutual(key("a"), key("b"));
        restrictions.forbid(key("a"), key("c"));

        assert_eq!(restrictions.allow_mutual(&key("b"), &key("a")), 2);
        assert_eq!(restrictions.len(), 1);
        assert!(restrictions.is_forbidden(&key("a"), &key("c")));
    }

    #[test]
    fn test_remove_participant_cascades() {
        let mut restrictions = Restrictions::new();
        restrictions.forbid_mutual(key("a"), key("b"));
        restrictions.forbid(key("c"), key("a"));
        restrictions.forbid(key("c"), key("b"));

        // a→b, b→a, c→a
        assert_eq!(restrictions.remove_participant(&key("a")), 3);
        assert_eq!(restrictions.len(), 1);
        assert!(restrictions.is_forbidden(&key("c"), &key("b")));
        assert!(restrictions.forbidden_for(&key("b")).is_none());
    }

    #[test]
    fn test_clear() {
        let mut restrictions = Restrictions::new();
        restrictions.forbid_mutual(key("a"), key("b"));
        restrictions.clear();
        assert!(restrictions.is_empty());
    }
}
