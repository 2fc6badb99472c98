//! Compact giver → recipient record.
//!
//! ## SSZ Serialization
//!
//! Pairings are serialized using SSZ for deterministic encoding, so the
//! same assignment always hashes to the same digest.

use ssz_rs::prelude::*;

/// One drawn pair, by participant id.
///
/// ## Example
///
/// ```
/// use gift_exchange::types::Pairing;
///
/// let pairing = Pairing::new(1, 2);
/// assert_eq!(pairing.giver_id, 1);
/// assert_eq!(pairing.recipient_id, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, SimpleSerialize)]
pub struct Pairing {
    /// Id of the participant giving the gift
    pub giver_id: u64,

    /// Id of the participant receiving it
    pub recipient_id: u64,
}

impl Pairing {
    /// Create a new pairing
    pub fn new(giver_id: u64, recipient_id: u64) -> Self {
        Self {
            giver_id,
            recipient_id,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
