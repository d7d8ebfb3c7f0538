use meetgrid::feed::WalkSource;
use meetgrid::prelude::*;

fn load(fixture: &str) -> Feed {
    let dir = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), fixture);
    let mut gtfs = Gtfs::new().from_directory(dir);
    Feed::from_gtfs(&mut gtfs).expect("fixture should load")
}

fn person(label: &str, station_query: &str) -> Person {
    Person {
        label: label.into(),
        station_query: station_query.to_string(),
    }
}

#[test]
fn s1_trivial_meet_at_shared_start() {
    let feed = load("s1_trivial");
    let people = [person("A", "Platform X1"), person("B", "Platform X1")];
    let t0 = Time::parse("13:00:00").unwrap();
    let result = MeetingSearch::new(&feed, SearchConfig::default(), &people, t0)
        .unwrap()
        .run();

    match result {
        MeetingResult::Ok {
            platform_id,
            meeting_time,
            people,
        } => {
            assert_eq!(&*platform_id, "X1");
            assert_eq!(meeting_time, t0);
            assert_eq!(people.len(), 2);
            for outcome in &people {
                assert_eq!(outcome.elapsed, Duration::from_seconds(0));
                assert_eq!(outcome.arrival_abs, t0);
            }
        }
        other => panic!("expected Ok, got {other:?}"),
    }
}

#[test]
fn s2_walk_only_meet_settles_at_nearer_platform() {
    let feed = load("s2_walk_only");
    let people = [person("A", "X1"), person("B", "X2")];
    let t0 = Time::parse("13:00:00").unwrap();
    let result = MeetingSearch::new(&feed, SearchConfig::default(), &people, t0)
        .unwrap()
        .run();

    match result {
        MeetingResult::Ok {
            platform_id,
            meeting_time,
            people,
        } => {
            // A starts on X1, so the meeting settles there once B's geodesic
            // walk from X2 reaches it.
            assert_eq!(&*platform_id, "X1");
            assert_eq!(meeting_time, Time::parse("13:01:26").unwrap());

            let a = people.iter().find(|p| &*p.label == "A").unwrap();
            let b = people.iter().find(|p| &*p.label == "B").unwrap();
            assert_eq!(a.elapsed, Duration::from_seconds(0));
            assert_eq!(b.elapsed, Duration::from_seconds(86));
        }
        other => panic!("expected Ok, got {other:?}"),
    }
}

#[test]
fn s3_ride_meet_at_central_with_fairness_gap() {
    let feed = load("s3_ride");
    let people = [person("A", "North"), person("B", "South")];
    let t0 = Time::parse("13:00:00").unwrap();
    let result = MeetingSearch::new(&feed, SearchConfig::default(), &people, t0)
        .unwrap()
        .run();

    match result {
        MeetingResult::Ok {
            platform_id,
            meeting_time,
            people,
        } => {
            assert_eq!(&*platform_id, "C1");
            assert_eq!(meeting_time, Time::parse("13:20:00").unwrap());

            let a = people.iter().find(|p| &*p.label == "A").unwrap();
            let b = people.iter().find(|p| &*p.label == "B").unwrap();
            assert_eq!(a.elapsed, Duration::from_seconds(900));
            assert_eq!(b.elapsed, Duration::from_seconds(1200));
        }
        other => panic!("expected Ok, got {other:?}"),
    }
}

#[test]
fn s4_time_cap_aborts_before_meeting() {
    let feed = load("s3_ride");
    let people = [person("A", "North"), person("B", "South")];
    let t0 = Time::parse("13:00:00").unwrap();
    let config = SearchConfig::default().with_max_trip_time(60);
    let result = MeetingSearch::new(&feed, config, &people, t0)
        .unwrap()
        .run();

    assert!(matches!(result, MeetingResult::Cap { .. }));
}

#[test]
fn s5_explicit_pathway_shadows_derived_geodesic_walk() {
    let feed = load("s5_shadow");
    let a1 = feed.platform_by_id("A1").unwrap().index;
    let a2 = feed.platform_by_id("A2").unwrap().index;

    assert!(feed.is_explicit(a1, a2));

    let radius_m = SearchConfig::default().max_walk_radius_m();
    let nearby: Vec<u32> = feed
        .nearby_platforms(a1, radius_m)
        .into_iter()
        .map(|(idx, _)| idx)
        .collect();
    assert!(!nearby.contains(&a2));

    let walks: Vec<_> = feed.walks_from(a1).collect();
    assert_eq!(walks.len(), 1);
    assert_eq!(walks[0].to_platform_index, a2);
    assert_eq!(walks[0].duration, Duration::from_seconds(120));
    assert_eq!(walks[0].source, WalkSource::Pathways);
}

#[test]
fn s6_disconnected_platforms_never_meet() {
    let feed = load("s6_disconnected");
    let people = [person("A", "P1"), person("B", "P2")];
    let t0 = Time::parse("13:00:00").unwrap();
    let result = MeetingSearch::new(&feed, SearchConfig::default(), &people, t0)
        .unwrap()
        .run();

    assert!(matches!(result, MeetingResult::None));
}

#[test]
fn property_zero_trip_cap_triggers_on_first_nonzero_step() {
    let feed = load("s3_ride");
    let people = [person("A", "North"), person("B", "South")];
    let t0 = Time::parse("13:00:00").unwrap();
    let config = SearchConfig::default().with_max_trip_time(0);
    let result = MeetingSearch::new(&feed, config, &people, t0)
        .unwrap()
        .run();

    assert!(matches!(result, MeetingResult::Cap { .. }));
}
