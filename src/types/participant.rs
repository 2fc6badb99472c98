//! Participant identity for the gift exchange.
//!
//! ## Identity
//!
//! A participant is identified solely by its normalized name: trimmed and
//! lowercased. "Alice", " alice " and "ALICE" are the same person.
//!
//! The normalized form lives in [`ParticipantKey`], an immutable value that
//! the engine and the restriction relation use for every comparison. The
//! spelling a user typed is kept separately as `display_name` and never takes
//! part in equality or hashing.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// ParticipantKey
// ============================================================================

/// Normalized participant name used for identity.
///
/// ## Example
///
/// ```
/// use gift_exchange::types::ParticipantKey;
///
/// let a = ParticipantKey::new("  Alice ").unwrap();
/// let b = ParticipantKey::new("ALICE").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "alice");
///
/// assert!(ParticipantKey::new("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantKey(String);

impl ParticipantKey {
    /// Normalize a raw name into a key
    ///
    /// Returns None if the name is empty after trimming.
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// The normalized name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ParticipantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Participant
// ============================================================================

/// A member of the gift exchange.
///
/// ## Fields
///
/// - `id`: numeric handle assigned by the roster, used for compact encodings
/// - `key`: normalized name, the participant's identity
/// - `display_name`: trimmed name as originally entered
///
/// Equality and hashing consider `key` only, so two records that differ only
/// in `id` or spelling are the same participant.
///
/// ## Example
///
/// ```
/// use gift_exchange::types::Participant;
///
/// let a = Participant::new(1, "Alice").unwrap();
/// let b = Participant::new(7, "alice").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.display_name(), "Alice");
/// ```
#[derive(Debug, Clone)]
pub struct Participant {
    /// Numeric handle (assigned by the roster)
    pub id: u64,

    key: ParticipantKey,

    display_name: String,
}

impl Participant {
    /// Create a participant from a raw name
    ///
    /// # Arguments
    ///
    /// * `id` - Numeric handle for this participant
    /// * `name` - Name as entered; surrounding whitespace is dropped
    ///
    /// # Returns
    ///
    /// None if the name is blank
    pub fn new(id: u64, name: &str) -> Option<Self> {
        let key = ParticipantKey::new(name)?;
        Some(Self {
            id,
            key,
            display_name: name.trim().to_string(),
        })
    }

    /// The participant's identity
    #[inline]
    pub fn key(&self) -> &ParticipantKey {
        &self.key
    }

    /// Name as originally entered (trimmed)
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Borrow<ParticipantKey> for Participant {
    fn borrow(&self) -> &ParticipantKey {
        &self.key
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
