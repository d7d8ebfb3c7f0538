/// File names within a GTFS source, overridable for feeds that don't follow
/// the standard naming.
#[derive(Debug, Clone)]
pub struct Config {
    pub stops_path: String,
    pub stop_times_path: String,
    pub trips_path: String,
    pub routes_path: String,
    /// Optional; absence means no pathway edges are ingested.
    pub pathways_path: String,
    /// Optional; absence means no transfer edges are ingested.
    pub transfers_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_path: "stops.txt".into(),
            stop_times_path: "stop_times.txt".into(),
            trips_path: "trips.txt".into(),
            routes_path: "routes.txt".into(),
            pathways_path: "pathways.txt".into(),
            transfers_path: "transfers.txt".into(),
        }
    }
}
