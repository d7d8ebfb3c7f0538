use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Instant,
};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    error::Error,
    feed::{
        Feed, Grid, Platform, Route, RouteType, Slice, Station, StopTimeRow, Trip, WalkEdge,
        WalkSource, floor_walk_duration,
        grid::{DLAT, DLON},
    },
    gtfs::{Gtfs, models::*},
    shared::{Coordinate, Time},
};

struct RawPlatform {
    platform: Platform,
    parent_station: Option<String>,
    stop_desc: Option<String>,
}

impl Feed {
    /// Builds a [`Feed`] from a GTFS source in a single pass: stops
    /// are grouped into stations, stop_times sorted and indexed by both
    /// trip and platform, and walk edges constructed in pathways-then-
    /// transfers order.
    pub fn from_gtfs(gtfs: &mut Gtfs) -> Result<Self, Error> {
        let mut feed = Feed::default();
        feed.load_stops(gtfs)?;
        feed.load_routes(gtfs)?;
        feed.load_trips(gtfs)?;
        feed.load_stop_times(gtfs)?;
        feed.load_walk_edges(gtfs)?;
        feed.build_grid();
        Ok(feed)
    }

    fn load_stops(&mut self, gtfs: &mut Gtfs) -> Result<(), Error> {
        debug!("loading stops");
        let now = Instant::now();

        let mut platform_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut raw: Vec<RawPlatform> = Vec::new();

        gtfs.stream_stops(|(i, row): (usize, GtfsStop)| {
            let id: Arc<str> = row.stop_id.into();
            platform_lookup.insert(id.clone(), i as u32);
            raw.push(RawPlatform {
                platform: Platform {
                    index: i as u32,
                    id,
                    station_index: u32::MAX,
                    name: row.stop_name.into(),
                    label: row.platform_code.map(Into::into),
                    coordinate: Coordinate::new(row.stop_lat, row.stop_lon),
                },
                parent_station: row.parent_station,
                stop_desc: row.stop_desc,
            });
        })?;

        // Group platforms into stations. A platform whose parent_station is
        // absent (or points nowhere) becomes the sole child of its own
        // station.
        let mut children_by_station: HashMap<Arc<str>, Vec<u32>> = HashMap::new();
        let mut descs_by_station: HashMap<Arc<str>, Vec<&str>> = HashMap::new();
        let mut names_by_station: HashMap<Arc<str>, Vec<&str>> = HashMap::new();

        for entry in &raw {
            let station_id: Arc<str> = match &entry.parent_station {
                Some(parent) if platform_lookup.contains_key(parent.as_str()) => {
                    parent.as_str().into()
                }
                _ => entry.platform.id.clone(),
            };
            children_by_station
                .entry(station_id.clone())
                .or_default()
                .push(entry.platform.index);
            descs_by_station
                .entry(station_id.clone())
                .or_default()
                .push(entry.stop_desc.as_deref().unwrap_or(""));
            names_by_station
                .entry(station_id)
                .or_default()
                .push(&entry.platform.name);
        }

        let mut station_ids: Vec<Arc<str>> = children_by_station.keys().cloned().collect();
        station_ids.sort();

        let mut station_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut stations: Vec<Station> = Vec::with_capacity(station_ids.len());
        for (index, station_id) in station_ids.into_iter().enumerate() {
            let children = children_by_station.remove(&station_id).unwrap();
            let descs = descs_by_station.remove(&station_id).unwrap();
            let names = names_by_station.remove(&station_id).unwrap();
            // Modal non-empty stop_desc, else modal non-empty stop_name,
            // else the first child's stop_id.
            let display_name = modal_non_empty(&descs)
                .or_else(|| modal_non_empty(&names))
                .map(str::to_string)
                .unwrap_or_else(|| raw[children[0] as usize].platform.id.to_string());
            station_lookup.insert(station_id.clone(), index as u32);
            stations.push(Station {
                index: index as u32,
                id: station_id,
                name: display_name.into(),
                platforms: children.into_boxed_slice(),
            });
        }

        let mut platforms: Vec<Platform> = Vec::with_capacity(raw.len());
        for entry in raw {
            let mut platform = entry.platform;
            let station_id: Arc<str> = match &entry.parent_station {
                Some(parent) if platform_lookup.contains_key(parent.as_str()) => {
                    parent.as_str().into()
                }
                _ => platform.id.clone(),
            };
            platform.station_index = *station_lookup.get(&station_id).unwrap();
            platforms.push(platform);
        }

        self.platforms = platforms.into_boxed_slice();
        self.stations = stations.into_boxed_slice();
        self.platform_lookup = platform_lookup;
        self.station_lookup = station_lookup;

        debug!(
            "loaded {} platforms into {} stations in {:?}",
            self.platforms.len(),
            self.stations.len(),
            now.elapsed()
        );
        Ok(())
    }

    fn load_routes(&mut self, gtfs: &mut Gtfs) -> Result<(), Error> {
        debug!("loading routes");
        let now = Instant::now();
        let mut route_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut routes: Vec<Route> = Vec::new();

        gtfs.stream_routes(|(i, row): (usize, GtfsRoute)| {
            let id: Arc<str> = row.route_id.into();
            route_lookup.insert(id.clone(), i as u32);
            routes.push(Route {
                index: i as u32,
                id,
                short_name: row.route_short_name.map(Into::into),
                long_name: row.route_long_name.map(Into::into),
                route_type: RouteType::from(row.route_type),
                agency_id: row.agency_id.map(Into::into),
            });
        })?;

        self.routes = routes.into_boxed_slice();
        self.route_lookup = route_lookup;
        debug!("loaded {} routes in {:?}", self.routes.len(), now.elapsed());
        Ok(())
    }

    fn load_trips(&mut self, gtfs: &mut Gtfs) -> Result<(), Error> {
        debug!("loading trips");
        let now = Instant::now();
        let mut trip_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let mut trips: Vec<Trip> = Vec::new();

        gtfs.stream_trips(|(i, row): (usize, GtfsTrip)| {
            let Some(&route_index) = self.route_lookup.get(row.route_id.as_str()) else {
                warn!("trip {} references unknown route {}", row.trip_id, row.route_id);
                return;
            };
            let id: Arc<str> = row.trip_id.into();
            trip_lookup.insert(id.clone(), trips.len() as u32);
            trips.push(Trip {
                index: trips.len() as u32,
                id,
                route_index,
                headsign: row.trip_headsign.map(Into::into),
                direction: row.direction_id,
                stop_times: Slice::default(),
            });
        })?;

        self.trips = trips.into_boxed_slice();
        self.trip_lookup = trip_lookup;
        debug!("loaded {} trips in {:?}", self.trips.len(), now.elapsed());
        Ok(())
    }

    fn load_stop_times(&mut self, gtfs: &mut Gtfs) -> Result<(), Error> {
        debug!("loading stop times");
        let now = Instant::now();

        let mut rows_by_trip: Vec<Vec<(u32, u32, Option<Time>, Option<Time>)>> =
            vec![Vec::new(); self.trips.len()];

        gtfs.stream_stop_times(|(_, row): (usize, GtfsStopTime)| {
            let Some(&trip_index) = self.trip_lookup.get(row.trip_id.as_str()) else {
                return;
            };
            let Some(&platform_index) = self.platform_lookup.get(row.stop_id.as_str()) else {
                warn!("stop_time references unknown stop {}", row.stop_id);
                return;
            };

            let arrival = match parse_optional_time(&row.arrival_time) {
                Ok(value) => value,
                Err(()) => {
                    warn!("unparseable arrival_time for trip {}, row excluded", row.trip_id);
                    return;
                }
            };
            let departure = match parse_optional_time(&row.departure_time) {
                Ok(value) => value,
                Err(()) => {
                    warn!("unparseable departure_time for trip {}, row excluded", row.trip_id);
                    return;
                }
            };

            rows_by_trip[trip_index as usize].push((
                platform_index,
                row.stop_sequence,
                arrival,
                departure,
            ));
        })?;

        // Each trip's rows sort independently of every other trip's, so the
        // per-trip sort parallelizes cleanly.
        rows_by_trip
            .par_iter_mut()
            .for_each(|rows| rows.sort_by_key(|(_, sequence, _, _)| *sequence));

        let mut trips = std::mem::take(&mut self.trips).into_vec();
        let mut flat: Vec<StopTimeRow> = Vec::new();
        let mut platform_departures: Vec<Vec<(u32, Time)>> = vec![Vec::new(); self.platforms.len()];

        for (trip_index, rows) in rows_by_trip.into_iter().enumerate() {
            let trip_index = trip_index as u32;
            let start = flat.len() as u32;
            for (inner_index, (platform_index, sequence, arrival, departure)) in
                rows.into_iter().enumerate()
            {
                let global_index = flat.len() as u32;
                if let Some(departure) = departure {
                    platform_departures[platform_index as usize].push((global_index, departure));
                }
                flat.push(StopTimeRow {
                    trip_index,
                    platform_index,
                    sequence,
                    inner_index: inner_index as u32,
                    arrival,
                    departure,
                });
            }
            let count = flat.len() as u32 - start;
            trips[trip_index as usize].stop_times = Slice { start, count };
        }

        // Likewise, each platform's departure list is independent of every
        // other platform's.
        platform_departures
            .par_iter_mut()
            .for_each(|departures| departures.sort_by_key(|(_, departure)| *departure));

        self.trips = trips.into_boxed_slice();
        self.stop_times = flat.into_boxed_slice();
        self.platform_departures = platform_departures
            .into_iter()
            .map(|rows| rows.into_iter().map(|(idx, _)| idx).collect::<Vec<_>>().into_boxed_slice())
            .collect();

        debug!(
            "loaded {} stop time rows in {:?}",
            self.stop_times.len(),
            now.elapsed()
        );
        Ok(())
    }

    /// Constructs walk edges in pathways-then-transfers order, marking each
    /// ordered pair "explicit" so GEO enumeration skips it later.
    fn load_walk_edges(&mut self, gtfs: &mut Gtfs) -> Result<(), Error> {
        debug!("loading walk edges");
        let now = Instant::now();

        let mut edges: Vec<WalkEdge> = Vec::new();
        let mut explicit_pairs: HashSet<(u32, u32)> = HashSet::new();

        gtfs.stream_pathways(|(_, row): (usize, GtfsPathway)| {
            let (Some(&from), Some(&to), Some(traversal_time)) = (
                self.platform_lookup.get(row.from_stop_id.as_str()),
                self.platform_lookup.get(row.to_stop_id.as_str()),
                row.traversal_time,
            ) else {
                return;
            };
            explicit_pairs.insert((from, to));
            edges.push(WalkEdge {
                from_platform_index: from,
                to_platform_index: to,
                duration: floor_walk_duration(traversal_time),
                source: WalkSource::Pathways,
            });
        })?;

        gtfs.stream_transfers(|(_, row): (usize, GtfsTransfer)| {
            let (Some(&from), Some(&to), Some(min_transfer_time)) = (
                self.platform_lookup.get(row.from_stop_id.as_str()),
                self.platform_lookup.get(row.to_stop_id.as_str()),
                row.min_transfer_time,
            ) else {
                return;
            };
            explicit_pairs.insert((from, to));
            edges.push(WalkEdge {
                from_platform_index: from,
                to_platform_index: to,
                duration: floor_walk_duration(min_transfer_time),
                source: WalkSource::Transfers,
            });
        })?;

        let mut platform_to_walks: Vec<Vec<u32>> = vec![Vec::new(); self.platforms.len()];
        for (edge_index, edge) in edges.iter().enumerate() {
            platform_to_walks[edge.from_platform_index as usize].push(edge_index as u32);
        }

        self.walk_edges = edges.into_boxed_slice();
        self.explicit_pairs = explicit_pairs;
        self.platform_to_walks = platform_to_walks
            .into_iter()
            .map(|v| v.into_boxed_slice())
            .collect();

        debug!(
            "loaded {} explicit walk edges in {:?}",
            self.walk_edges.len(),
            now.elapsed()
        );
        Ok(())
    }

    fn build_grid(&mut self) {
        debug!("building spatial index");
        let now = Instant::now();
        let mut grid = Grid::new(DLAT, DLON);
        for platform in self.platforms.iter() {
            grid.insert(platform.index, platform.coordinate);
        }
        self.grid = grid;
        debug!("built spatial index in {:?}", now.elapsed());
    }
}

fn parse_optional_time(field: &Option<String>) -> Result<Option<Time>, ()> {
    match field {
        None => Ok(None),
        Some(raw) => Time::parse(raw).map(Some).ok_or(()),
    }
}

/// Most-frequent non-empty value, ties broken by first occurrence.
fn modal_non_empty<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &value in values {
        if value.is_empty() {
            continue;
        }
        if let Some(entry) = counts.iter_mut().find(|(v, _)| *v == value) {
            entry.1 += 1;
        } else {
            counts.push((value, 1));
        }
    }
    // `max_by_key` returns the *last* element on a tie; walk manually so the
    // first-occurring value among equally frequent ones wins.
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

#[test]
fn modal_non_empty_breaks_ties_by_first_occurrence() {
    assert_eq!(modal_non_empty(&["b", "a", "b", "a"]), Some("b"));
    assert_eq!(modal_non_empty(&["", "", "x"]), Some("x"));
    assert_eq!(modal_non_empty(&["", ""]), None);
}
