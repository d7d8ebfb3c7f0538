use std::sync::Arc;

use crate::{feed::WalkSource, shared::Time};

/// One step of a person's itinerary: a tagged variant rather than a
/// polymorphic object, since START/WALK/RIDE carry distinct payloads.
#[derive(Debug, Clone)]
pub enum ActionKind {
    Start,
    Walk {
        source: WalkSource,
    },
    Ride {
        trip_id: Arc<str>,
        route_id: Arc<str>,
        headsign: Option<Arc<str>>,
        wait_s: u32,
        ride_s: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Action {
    pub kind: ActionKind,
    /// Absent only for the synthetic START action at the seed platform.
    pub from_platform_index: Option<u32>,
    pub to_platform_index: u32,
    /// Real GTFS `stop_id` of `from_platform_index`, absent alongside it.
    pub from_platform_id: Option<Arc<str>>,
    /// Real GTFS `stop_id` of `to_platform_index`.
    pub to_platform_id: Arc<str>,
    pub departure_abs: Time,
    pub arrival_abs: Time,
}

impl Action {
    pub fn start(to_platform_index: u32, to_platform_id: Arc<str>, t0: Time) -> Self {
        Self {
            kind: ActionKind::Start,
            from_platform_index: None,
            to_platform_index,
            from_platform_id: None,
            to_platform_id,
            departure_abs: t0,
            arrival_abs: t0,
        }
    }
}
