//! The result of a draw: who gives to whom.
//!
//! An `Assignment` is created fresh by every solve call and owned by the
//! caller. Pair order is whatever the search produced; use
//! [`Assignment::sorted_by`] to present it in a stable order.
//!
//! ## Digest
//!
//! The 32-byte digest is a SHA-256 hash of the SSZ-encoded pairings sorted
//! by giver id. Two assignments with the same pairs have the same digest
//! regardless of pair order, which makes digests handy for comparing draws
//! without revealing them.

use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;
use thiserror::Error;

use crate::types::{Pairing, Participant, ParticipantKey, Restrictions};

// ============================================================================
// GiftPair
// ============================================================================

/// A single giver → recipient pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GiftPair {
    /// Participant giving the gift
    pub giver: Participant,

    /// Participant receiving the gift
    pub recipient: Participant,
}

impl GiftPair {
    /// Create a new pair
    pub fn new(giver: Participant, recipient: Participant) -> Self {
        Self { giver, recipient }
    }

    /// Compact id form of this pair
    pub fn pairing(&self) -> Pairing {
        Pairing::new(self.giver.id, self.recipient.id)
    }
}

// ============================================================================
// Violation
// ============================================================================

/// Ways an assignment can break the correctness contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0} is assigned to themselves")]
    SelfAssigned(ParticipantKey),

    #[error("{giver} is assigned to forbidden recipient {recipient}")]
    Forbidden {
        giver: ParticipantKey,
        recipient: ParticipantKey,
    },

    #[error("{0} appears in the assignment but not in the participant set")]
    Unknown(ParticipantKey),

    #[error("{0} gives more than one gift")]
    DuplicateGiver(ParticipantKey),

    #[error("{0} receives more than one gift")]
    DuplicateRecipient(ParticipantKey),

    #[error("{0} is missing from the assignment")]
    Missing(ParticipantKey),
}

// ============================================================================
// Assignment
// ============================================================================

/// A complete draw over a participant set.
///
/// ## Example
///
/// ```
/// use gift_exchange::types::{Assignment, GiftPair, Participant, ParticipantKey, Restrictions};
///
/// let a = Participant::new(1, "Alice").unwrap();
/// let b = Participant::new(2, "Bob").unwrap();
///
/// let assignment = Assignment::new(vec![
///     GiftPair::new(a.clone(), b.clone()),
///     GiftPair::new(b.clone(), a.clone()),
/// ]);
///
/// assert_eq!(assignment.recipient_of(a.key()), Some(&b));
/// assert!(assignment.verify(&[a, b], &Restrictions::new()).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    pairs: Vec<GiftPair>,
}

impl Assignment {
    /// Create an assignment from pairs
    ///
    /// No validation is performed; see [`Assignment::verify`].
    pub fn new(pairs: Vec<GiftPair>) -> Self {
        Self { pairs }
    }

    /// The empty assignment (fewer than two participants)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of pairs
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if no pairs were drawn
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over pairs in stored order
    pub fn iter(&self) -> impl Iterator<Item = &GiftPair> {
        self.pairs.iter()
    }

    /// Borrow the pairs
    #[inline]
    pub fn pairs(&self) -> &[GiftPair] {
        &self.pairs
    }

    /// Who `giver` gives to
    pub fn recipient_of(&self, giver: &ParticipantKey) -> Option<&Participant> {
        self.pairs
            .iter()
            .find(|pair| pair.giver.key() == giver)
            .map(|pair| &pair.recipient)
    }

    /// Who gives to `recipient`
    pub fn giver_of(&self, recipient: &ParticipantKey) -> Option<&Participant> {
        self.pairs
            .iter()
            .find(|pair| pair.recipient.key() == recipient)
            .map(|pair| &pair.giver)
    }

    /// Reorder pairs to follow `order` by giver
    ///
    /// Givers not present in `order` keep their relative order at the end.
    pub fn sorted_by(mut self, order: &[Participant]) -> Self {
        let rank: HashMap<&ParticipantKey, usize> = order
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key(), i))
            .collect();
        self.pairs
            .sort_by_key(|pair| rank.get(pair.giver.key()).copied().unwrap_or(usize::MAX));
        self
    }

    /// Check the correctness contract against the inputs that produced it
    ///
    /// Every participant gives exactly once and receives exactly once, never
    /// to themselves, and never to a forbidden recipient.
    pub fn verify(
        &self,
        participants: &[Participant],
        restrictions: &Restrictions,
    ) -> Result<(), Violation> {
        let members: HashSet<&ParticipantKey> = participants.iter().map(Participant::key).collect();
        let mut givers = HashSet::with_capacity(self.pairs.len());
        let mut recipients = HashSet::with_capacity(self.pairs.len());

        for pair in &self.pairs {
            let giver = pair.giver.key();
            let recipient = pair.recipient.key();

            for key in [giver, recipient] {
                if !members.contains(key) {
                    return Err(Violation::Unknown(key.clone()));
                }
            }
            if giver == recipient {
                return Err(Violation::SelfAssigned(giver.clone()));
            }
            if restrictions.is_forbidden(giver, recipient) {
                return Err(Violation::Forbidden {
                    giver: giver.clone(),
                    recipient: recipient.clone(),
                });
            }
            if !givers.insert(giver) {
                return Err(Violation::DuplicateGiver(giver.clone()));
            }
            if !recipients.insert(recipient) {
                return Err(Violation::DuplicateRecipient(recipient.clone()));
            }
        }

        // Below two participants nobody is required to give
        if participants.len() < 2 {
            return Ok(());
        }
        for key in members {
            if !givers.contains(key) || !recipients.contains(key) {
                return Err(Violation::Missing(key.clone()));
            }
        }
        Ok(())
    }

    /// Compact pairings sorted by giver id
    pub fn pairings(&self) -> Vec<Pairing> {
        let mut pairings: Vec<Pairing> = self.pairs.iter().map(GiftPair::pairing).collect();
        pairings.sort_unstable();
        pairings
    }

    /// SSZ encoding of the sorted pairings
    ///
    /// Pairings are fixed-size containers, so the concatenation is the SSZ
    /// encoding of the list.
    pub fn encode(&self) -> Result<Vec<u8>, SerializeError> {
        let mut buffer = Vec::with_capacity(self.pairs.len() * 16);
        for pairing in self.pairings() {
            pairing.serialize(&mut buffer)?;
        }
        Ok(buffer)
    }

    /// SHA-256 digest of the encoded pairings
    pub fn digest(&self) -> Result<[u8; 32], SerializeError> {
        let encoded = self.encode()?;

        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Ok(hash)
    }

    /// Digest as a hex string
    pub fn digest_hex(&self) -> Result<String, SerializeError> {
        self.digest().map(hex::encode)
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a GiftPair;
    type IntoIter = std::slice::Iter<'a, GiftPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
