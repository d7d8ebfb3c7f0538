mod action;
mod config;
mod frontier;
mod resolver;

pub use action::{Action, ActionKind};
pub use config::SearchConfig;
pub use resolver::resolve_station;

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    error::Error,
    feed::Feed,
    shared::{Duration, Time},
};
use frontier::PersonFrontier;

/// One traveller's starting point, as given by the caller.
#[derive(Debug, Clone)]
pub struct Person {
    pub label: Arc<str>,
    pub station_query: String,
}

/// A live-progress notification, fired whenever a person's elapsed cost
/// crosses the next `progress_step_s` mark.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub label: Arc<str>,
    pub action_summary: String,
    pub elapsed_s: u32,
    pub unique_platforms: usize,
}

#[derive(Debug, Clone)]
pub struct PersonOutcome {
    pub label: Arc<str>,
    pub elapsed: Duration,
    pub arrival_abs: Time,
    pub steps: Vec<Action>,
}

/// The engine's output record.
#[derive(Debug, Clone)]
pub enum MeetingResult {
    Ok {
        platform_id: Arc<str>,
        meeting_time: Time,
        people: Vec<PersonOutcome>,
    },
    Cap {
        label: Arc<str>,
    },
    None,
}

impl MeetingResult {
    /// Group fairness: `max(elapsed) - min(elapsed)` across persons.
    pub fn fairness(&self) -> Option<Duration> {
        match self {
            MeetingResult::Ok { people, .. } => {
                let max = people.iter().map(|p| p.elapsed).max()?;
                let min = people.iter().map(|p| p.elapsed).min()?;
                Some(max - min)
            }
            _ => None,
        }
    }
}

/// One run of the global interleaved search across N people.
pub struct MeetingSearch<'a> {
    feed: &'a Feed,
    config: SearchConfig,
    people: Vec<PersonFrontier>,
    counter: u64,
    next_progress_mark: u32,
    progress: Option<Box<dyn FnMut(ProgressEvent) + 'a>>,
}

impl<'a> MeetingSearch<'a> {
    pub fn new(
        feed: &'a Feed,
        config: SearchConfig,
        people: &[Person],
        t0: Time,
    ) -> Result<Self, Error> {
        let mut frontiers = Vec::with_capacity(people.len());
        for person in people {
            let station = resolve_station(feed, &person.station_query)?;
            let seed = pick_seed(feed, station, t0);
            let seed_id = feed.platforms[seed as usize].id.clone();
            debug!(
                person = %person.label,
                station = %station.name,
                seed_platform = %seed_id,
                t0 = %t0.to_hms_string(),
                "resolved seed platform"
            );
            frontiers.push(PersonFrontier::new(
                person.label.clone(),
                feed.platforms.len(),
                seed,
                seed_id,
                t0,
            ));
        }
        Ok(Self {
            feed,
            config,
            people: frontiers,
            counter: 0,
            next_progress_mark: config.progress_step_s,
            progress: None,
        })
    }

    /// Registers a progress callback so a caller can surface progress
    /// without depending on a `tracing` subscriber.
    pub fn with_progress(mut self, callback: impl FnMut(ProgressEvent) + 'a) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    fn next_counter(&mut self) -> u64 {
        let value = self.counter;
        self.counter += 1;
        value
    }

    fn min_person_index(&self) -> Option<usize> {
        self.people
            .iter()
            .enumerate()
            .filter_map(|(idx, person)| person.peek_key().map(|key| (idx, key)))
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(idx, _)| idx)
    }

    /// Runs the global loop to termination.
    pub fn run(mut self) -> MeetingResult {
        loop {
            let Some(person_idx) = self.min_person_index() else {
                return MeetingResult::None;
            };

            let (elapsed_s, action) = match self.people[person_idx].pop() {
                Some(popped) => popped,
                None => continue,
            };

            if elapsed_s > self.config.max_trip_time_s {
                return MeetingResult::Cap {
                    label: self.people[person_idx].label.clone(),
                };
            }

            let to = action.to_platform_index;
            if self.people[person_idx].is_visited(to) {
                continue;
            }

            let elapsed = Duration::from_seconds(elapsed_s);
            self.people[person_idx].settle(&action, elapsed);
            self.maybe_report_progress(person_idx, &action, elapsed_s);

            if self.people.iter().all(|person| person.has_reached(to)) {
                return self.finish_ok(to);
            }

            self.expand(person_idx, &action, elapsed_s);
        }
    }

    fn finish_ok(&self, platform_index: u32) -> MeetingResult {
        let platform_id = self.feed.platforms[platform_index as usize].id.clone();
        let mut meeting_time = crate::shared::time::MIN;
        let mut people = Vec::with_capacity(self.people.len());
        for person in &self.people {
            let (arrival_abs, elapsed) = person
                .reached_at(platform_index)
                .expect("meeting predicate guarantees every person has reached this platform");
            if arrival_abs > meeting_time {
                meeting_time = arrival_abs;
            }
            people.push(PersonOutcome {
                label: person.label.clone(),
                elapsed,
                arrival_abs,
                steps: person.reconstruct(platform_index),
            });
        }
        MeetingResult::Ok {
            platform_id,
            meeting_time,
            people,
        }
    }

    fn maybe_report_progress(&mut self, person_idx: usize, action: &Action, elapsed_s: u32) {
        if elapsed_s < self.next_progress_mark {
            return;
        }
        let label = self.people[person_idx].label.clone();
        let unique_platforms = self.people[person_idx].unique_visited;
        let summary = summarize(action);

        info!(
            person = %label,
            action = %summary,
            unique_platforms,
            elapsed_s,
            "progress"
        );
        if let Some(callback) = self.progress.as_mut() {
            callback(ProgressEvent {
                label,
                action_summary: summary,
                elapsed_s,
                unique_platforms,
            });
        }

        while elapsed_s >= self.next_progress_mark {
            self.next_progress_mark += self.config.progress_step_s;
        }
    }

    /// Expands the just-settled platform into its person's own frontier:
    /// explicit walks, then derived geodesic walks, then rides. Platform,
    /// trip, and route identifiers are resolved to their real GTFS ids here,
    /// once, so every `Action` carries the ids a caller can act on rather
    /// than ephemeral ingest-order array positions.
    fn expand(&mut self, person_idx: usize, action: &Action, elapsed_s: u32) {
        let feed = self.feed;
        let from = action.to_platform_index;
        let from_id = action.to_platform_id.clone();
        let t = action.arrival_abs;

        for walk in feed.walks_from(from) {
            let to = walk.to_platform_index;
            let to_id = feed.platforms[to as usize].id.clone();
            let arrival = t + walk.duration;
            let counter = self.next_counter();
            self.people[person_idx].push(
                elapsed_s + walk.duration.as_seconds(),
                arrival,
                to_id.clone(),
                Action {
                    kind: ActionKind::Walk {
                        source: walk.source,
                    },
                    from_platform_index: Some(from),
                    to_platform_index: to,
                    from_platform_id: Some(from_id.clone()),
                    to_platform_id: to_id,
                    departure_abs: t,
                    arrival_abs: arrival,
                },
                counter,
            );
        }

        let radius_m = self.config.max_walk_radius_m();
        for (to, distance) in feed.nearby_platforms(from, radius_m) {
            let walk_s = ((distance.as_meters() / self.config.walk_speed_mps).ceil() as u32).max(30);
            if walk_s > self.config.max_walk_time_s {
                continue;
            }
            let to_id = feed.platforms[to as usize].id.clone();
            let arrival = t + Duration::from_seconds(walk_s);
            let counter = self.next_counter();
            self.people[person_idx].push(
                elapsed_s + walk_s,
                arrival,
                to_id.clone(),
                Action {
                    kind: ActionKind::Walk {
                        source: crate::feed::WalkSource::Geo,
                    },
                    from_platform_index: Some(from),
                    to_platform_index: to,
                    from_platform_id: Some(from_id.clone()),
                    to_platform_id: to_id,
                    departure_abs: t,
                    arrival_abs: arrival,
                },
                counter,
            );
        }

        for row in feed.departures_from(from) {
            let Some(departure) = row.departure else {
                continue;
            };
            if departure < t {
                continue;
            }
            let wait_s = (departure - t).as_seconds();
            let trip = &feed.trips[row.trip_index as usize];
            let route = &feed.routes[trip.route_index as usize];
            for later in feed.stop_times_by_trip(row.trip_index) {
                if later.inner_index <= row.inner_index {
                    continue;
                }
                let Some(arrival) = later.arrival else {
                    continue;
                };
                let ride_s = (arrival - departure).as_seconds();
                let to = later.platform_index;
                let to_id = feed.platforms[to as usize].id.clone();
                let counter = self.next_counter();
                self.people[person_idx].push(
                    elapsed_s + wait_s + ride_s,
                    arrival,
                    to_id.clone(),
                    Action {
                        kind: ActionKind::Ride {
                            trip_id: trip.id.clone(),
                            route_id: route.id.clone(),
                            headsign: trip.headsign.clone(),
                            wait_s,
                            ride_s,
                        },
                        from_platform_index: Some(from),
                        to_platform_index: to,
                        from_platform_id: Some(from_id.clone()),
                        to_platform_id: to_id,
                        departure_abs: departure,
                        arrival_abs: arrival,
                    },
                    counter,
                );
            }
        }
    }
}

/// Seed selection: the child platform of `station` with the smallest
/// departure at or after `t0`, falling back to the station's first
/// platform when none has a future departure.
fn pick_seed(feed: &Feed, station: &crate::feed::Station, t0: Time) -> u32 {
    let mut best: Option<(Time, u32)> = None;
    for &platform_index in station.platforms.iter() {
        let Some(row) = feed
            .departures_from(platform_index)
            .find(|row| row.departure.is_some_and(|d| d >= t0))
        else {
            continue;
        };
        let departure = row.departure.unwrap();
        if best.is_none_or(|(best_departure, _)| departure < best_departure) {
            best = Some((departure, platform_index));
        }
    }
    best.map(|(_, platform_index)| platform_index)
        .unwrap_or(station.platforms[0])
}

fn summarize(action: &Action) -> String {
    let to = &action.to_platform_id;
    match &action.kind {
        ActionKind::Start => format!("START at {to}"),
        ActionKind::Walk { source } => format!("WALK({source:?}) -> {to}"),
        ActionKind::Ride { route_id, ride_s, .. } => {
            format!("RIDE {route_id} -> {to} ({ride_s}s)")
        }
    }
}
