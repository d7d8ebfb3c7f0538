use std::sync::Arc;

use crate::shared::{Coordinate, Duration, Time};

/// A physical vehicle boarding/alighting point.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Internal array index, used for O(1) lookups throughout the feed.
    pub index: u32,
    pub id: Arc<str>,
    /// Index of the owning [`Station`]. Always set — a platform with no
    /// `parent_station` becomes the sole child of its own station.
    pub station_index: u32,
    pub name: Arc<str>,
    pub label: Option<Arc<str>>,
    pub coordinate: Coordinate,
}

/// Logical grouping of platforms sharing a `station_id`.
#[derive(Debug, Clone)]
pub struct Station {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub platforms: Box<[u32]>,
}

/// Normalized GTFS route type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteType {
    Tram,
    Rail,
    Bus,
    Metro,
    Other,
}

impl From<i32> for RouteType {
    fn from(value: i32) -> Self {
        match value {
            0 | 900 => Self::Tram,
            2 | 100 => Self::Rail,
            3 | 700 => Self::Bus,
            400 => Self::Metro,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub index: u32,
    pub id: Arc<str>,
    pub short_name: Option<Arc<str>>,
    pub long_name: Option<Arc<str>>,
    pub route_type: RouteType,
    pub agency_id: Option<Arc<str>>,
}

/// A scheduled vehicle run. Its stop sequence lives in the
/// feed's global `stop_times` slice, addressed by [`Slice`].
#[derive(Debug, Clone)]
pub struct Trip {
    pub index: u32,
    pub id: Arc<str>,
    pub route_index: u32,
    pub headsign: Option<Arc<str>>,
    pub direction: Option<u8>,
    pub stop_times: Slice,
}

/// A contiguous range within the feed's flattened `stop_times` array.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slice {
    pub start: u32,
    pub count: u32,
}

/// One `(stop_sequence, platform, arrival, departure)` row of a trip.
///
/// A missing `arrival` makes the row unusable as a ride terminus; it is
/// still kept so earlier rows in the same trip can use it as part of
/// their own forward scan boundary.
#[derive(Debug, Clone)]
pub struct StopTimeRow {
    pub trip_index: u32,
    pub platform_index: u32,
    pub sequence: u32,
    /// Position of this row within its trip's [`Slice`], used to scan
    /// forward for ride enumeration.
    pub inner_index: u32,
    pub arrival: Option<Time>,
    pub departure: Option<Time>,
}

/// Origin of a directed pedestrian link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkSource {
    Pathways,
    Transfers,
    Geo,
}

#[derive(Debug, Clone)]
pub struct WalkEdge {
    pub from_platform_index: u32,
    pub to_platform_index: u32,
    pub duration: Duration,
    pub source: WalkSource,
}

/// Floors a walk duration at the minimum required for any source.
pub fn floor_walk_duration(seconds: u32) -> Duration {
    Duration::from_seconds(seconds.max(30))
}
