use criterion::{Criterion, criterion_group, criterion_main};
use meetgrid::prelude::*;
use std::{env, hint::black_box, path::Path, time::Duration as StdDuration};

fn two_person_search(feed: &Feed, config: SearchConfig, t0: Time) {
    let people = [
        Person {
            label: "A".into(),
            station_query: "A".into(),
        },
        Person {
            label: "B".into(),
            station_query: "B".into(),
        },
    ];
    let search = MeetingSearch::new(feed, config, &people, t0).expect("search setup");
    let _ = black_box(search.run());
}

fn criterion_benchmark(c: &mut Criterion) {
    let gtfs_data_path = match env::var("GTFS_DATA_PATH") {
        Ok(path_str) => Path::new(&path_str).to_owned(),
        Err(err) => {
            println!("Missing GTFS_DATA_PATH environment variable: {err}");
            return;
        }
    };

    let mut gtfs = Gtfs::new().from_zip(gtfs_data_path).expect("load GTFS zip");
    let feed = Feed::from_gtfs(&mut gtfs).expect("build feed");
    let config = SearchConfig::default();
    let t0 = Time::from_seconds(8 * 3600);

    let mut group = c.benchmark_group("Meeting search");
    group.warm_up_time(StdDuration::from_secs(5));
    group.measurement_time(StdDuration::from_secs(20));

    group.bench_function("Two-person search", |b| {
        b.iter(|| two_person_search(&feed, config, t0))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
