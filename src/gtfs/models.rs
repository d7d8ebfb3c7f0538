use serde::{Deserialize, Serialize};

/// Raw `stops.txt` row. `parent_station` absent means the stop is its own
/// station.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_desc: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub parent_station: Option<String>,
    pub platform_code: Option<String>,
}

/// Raw `stop_times.txt` row. Times are kept as strings here; parsing into
/// [`crate::shared::Time`] happens in [`crate::feed`], where an unparseable
/// time silently excludes the row instead of aborting ingest.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsStopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: u32,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsTrip {
    pub trip_id: String,
    pub route_id: String,
    pub trip_headsign: Option<String>,
    pub direction_id: Option<u8>,
    pub shape_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsRoute {
    pub route_id: String,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub route_type: i32,
    pub agency_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsPathway {
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub traversal_time: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsTransfer {
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub min_transfer_time: Option<u32>,
}
