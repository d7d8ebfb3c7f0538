use meetgrid::feed::RouteType;
use meetgrid::prelude::*;

fn load() -> Feed {
    let dir = format!("{}/tests/fixtures/load_basic", env!("CARGO_MANIFEST_DIR"));
    let mut gtfs = Gtfs::new().from_directory(dir);
    Feed::from_gtfs(&mut gtfs).expect("fixture should load")
}

#[test]
fn platforms_group_into_stations_by_parent_station() {
    let feed = load();
    let station = feed.station_by_id("HUB").expect("HUB station present");
    // HUB itself plus three children all share the HUB station.
    assert_eq!(station.platforms.len(), 4);

    let lone = feed.station_by_id("LONE").expect("LONE forms its own station");
    assert_eq!(lone.platforms.len(), 1);
}

#[test]
fn station_display_name_prefers_modal_non_empty_stop_desc() {
    let feed = load();
    let station = feed.station_by_id("HUB").unwrap();
    // Two of three children share "Central Hub" in stop_desc, which wins
    // over the lone "Other Desc" outlier and over every stop_name.
    assert_eq!(&*station.name, "Central Hub");
}

#[test]
fn malformed_stop_time_row_is_excluded_not_fatal() {
    let feed = load();
    let t1 = feed.trip_by_id("T1").unwrap();
    // The third row of T1 (LONE, garbage departure_time) is dropped; only
    // the two valid rows survive.
    assert_eq!(feed.stop_times_by_trip(t1.index).len(), 2);
}

#[test]
fn extended_service_day_times_parse_past_hour_24() {
    let feed = load();
    let t2 = feed.trip_by_id("T2").unwrap();
    let rows = feed.stop_times_by_trip(t2.index);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].departure, Some(Time::parse("25:15:00").unwrap()));
    assert_eq!(rows[1].arrival, Some(Time::parse("25:45:00").unwrap()));
}

#[test]
fn route_types_normalize_from_gtfs_integers() {
    let feed = load();
    let bus = feed.route_by_id("BUS1").unwrap();
    let rail = feed.route_by_id("RAIL1").unwrap();
    assert_eq!(bus.route_type, RouteType::Bus);
    assert_eq!(rail.route_type, RouteType::Rail);
}
