pub mod entities;
pub mod grid;
mod source;

pub use entities::*;
pub use grid::*;

use std::{collections::HashMap, sync::Arc};

use crate::shared::{Coordinate, Distance};

/// The in-memory graph model: platforms, stations, trips, routes, and the
/// walk-edge/spatial-index tables derived from them. Built once at startup
/// via [`Feed::from_gtfs`] and read-only thereafter.
#[derive(Debug, Default)]
pub struct Feed {
    pub platforms: Box<[Platform]>,
    pub stations: Box<[Station]>,
    pub routes: Box<[Route]>,
    pub trips: Box<[Trip]>,
    pub stop_times: Box<[StopTimeRow]>,
    pub walk_edges: Box<[WalkEdge]>,
    pub grid: Grid,

    pub(crate) platform_lookup: HashMap<Arc<str>, u32>,
    pub(crate) station_lookup: HashMap<Arc<str>, u32>,
    pub(crate) route_lookup: HashMap<Arc<str>, u32>,
    pub(crate) trip_lookup: HashMap<Arc<str>, u32>,

    /// `platform_index -> [walk_edges index, ...]`, pathways/transfers first
    /// in construction order.
    pub(crate) platform_to_walks: Box<[Box<[u32]>]>,
    /// `platform_index -> [stop_times index, ...]` sorted by ascending
    /// departure, rows with no departure excluded.
    pub(crate) platform_departures: Box<[Box<[u32]>]>,
    /// Ordered pairs already covered by an explicit pathway/transfer edge,
    /// so GEO enumeration can suppress them.
    pub(crate) explicit_pairs: std::collections::HashSet<(u32, u32)>,
}

impl Feed {
    pub fn platform_by_id(&self, id: &str) -> Option<&Platform> {
        self.platform_lookup
            .get(id)
            .map(|&idx| &self.platforms[idx as usize])
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        self.station_lookup
            .get(id)
            .map(|&idx| &self.stations[idx as usize])
    }

    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        self.route_lookup
            .get(id)
            .map(|&idx| &self.routes[idx as usize])
    }

    pub fn trip_by_id(&self, id: &str) -> Option<&Trip> {
        self.trip_lookup
            .get(id)
            .map(|&idx| &self.trips[idx as usize])
    }

    /// Full stop-time sequence of a trip, ordered by `stop_sequence`.
    pub fn stop_times_by_trip(&self, trip_index: u32) -> &[StopTimeRow] {
        let slice = self.trips[trip_index as usize].stop_times;
        let start = slice.start as usize;
        &self.stop_times[start..start + slice.count as usize]
    }

    /// Explicit pathway/transfer walks leaving a platform.
    pub fn walks_from(&self, platform_index: u32) -> impl Iterator<Item = &WalkEdge> {
        self.platform_to_walks[platform_index as usize]
            .iter()
            .map(|&idx| &self.walk_edges[idx as usize])
    }

    /// Stop-time rows departing a platform, ascending by departure. Used for
    /// both seeding and ride enumeration.
    pub fn departures_from(&self, platform_index: u32) -> impl Iterator<Item = &StopTimeRow> {
        self.platform_departures[platform_index as usize]
            .iter()
            .map(|&idx| &self.stop_times[idx as usize])
    }

    pub fn is_explicit(&self, from_platform_index: u32, to_platform_index: u32) -> bool {
        self.explicit_pairs
            .contains(&(from_platform_index, to_platform_index))
    }

    /// Geodesic walk candidates within `radius_m` of a platform that are not
    /// already covered by an explicit edge.
    pub fn nearby_platforms(&self, platform_index: u32, radius_m: f64) -> Vec<(u32, Distance)> {
        let origin = self.platforms[platform_index as usize].coordinate;
        self.grid
            .nearby(platform_index, origin, radius_m)
            .into_iter()
            .filter(|(candidate_index, _)| !self.is_explicit(platform_index, *candidate_index))
            .collect()
    }

    pub fn coordinate_of(&self, platform_index: u32) -> Coordinate {
        self.platforms[platform_index as usize].coordinate
    }
}
