//! Core data types for the gift exchange
//!
//! ## Types
//!
//! - [`ParticipantKey`]: Normalized name, the identity of a participant
//! - [`Participant`]: A member of the exchange (id, key, display name)
//! - [`Restrictions`]: Directional "may-not-give-to" relation
//! - [`Pairing`]: Compact giver → recipient record (SSZ encoded)
//! - [`Assignment`]: A complete draw, with verification and digest

mod participant;
mod restriction;
mod pairing;
mod assignment;

// Re-export all types at module level
pub use participant::{Participant, ParticipantKey};
pub use restriction::Restrictions;
pub use pairing::Pairing;
pub use assignment::{Assignment, GiftPair, Violation};
