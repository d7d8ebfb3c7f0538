//! Finds the earliest transit platform a group of travellers starting from
//! different stations can all reach, given a GTFS schedule feed.
//!
//! The crate is split the way the search itself is: [`gtfs`] streams the raw
//! CSV tables, [`feed`] normalizes them into a read-only in-memory graph,
//! and [`search`] runs the per-person frontiers to a meeting point.

pub mod error;
pub mod feed;
pub mod gtfs;
pub mod search;
pub mod shared;

pub use error::Error;

/// Common imports for callers driving a search end to end.
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::feed::Feed;
    pub use crate::gtfs::Gtfs;
    pub use crate::search::{
        Action, ActionKind, MeetingResult, MeetingSearch, Person, ProgressEvent, SearchConfig,
    };
    pub use crate::shared::{Coordinate, Duration, Time};
}
