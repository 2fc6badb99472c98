//! Participant directory.
//!
//! ## Structure
//!
//! ```text
//! Roster
//! ├── entries: Slab<RosterEntry>       (participants, insertion-linked)
//! ├── index: HashMap<key, slab key>    (case-insensitive lookup)
//! └── restrictions: Restrictions       (giver -> forbidden recipients)
//! ```
//!
//! The roster owns membership and restrictions and hands the engine an
//! immutable snapshot for each draw.

pub mod entry;
pub mod roster;

mod error;

pub use entry::RosterEntry;
pub use error::DirectoryError;
pub use roster::Roster;
