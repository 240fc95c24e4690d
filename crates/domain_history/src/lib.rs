//! Vehicle History
//!
//! Rebuilds the story of a vehicle's insurance as a single ordered timeline:
//! each policy appears on its start date, each claim on its claim date.
//!
//! # Ordering
//!
//! Entries are sorted by event date. On equal dates policies come before
//! claims, and entries of the same kind are ordered by id, so the same stored
//! data always produces the same timeline.
//!
//! ```text
//! 2023-12-01  Claim   #4  "Windshield chip"
//! 2024-01-01  Policy  #1  2024-01-01 .. 2024-12-31
//! 2024-03-15  Claim   #2  "Rear bumper damage"
//! ```

pub mod timeline;
pub mod composer;
pub mod error;

pub use timeline::{EntryKind, TimelineEntry, VehicleHistory, merge_timeline};
pub use composer::HistoryComposer;
pub use error::HistoryError;
