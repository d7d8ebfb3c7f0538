use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meetgrid::prelude::*;
use tracing::warn;

use crate::{dto::MeetRequestDto, dto::MeetResponseDto, state::AppState};

pub async fn meet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MeetRequestDto>,
) -> Result<Response, StatusCode> {
    let Some(feed) = &*state.feed.read().await else {
        warn!("meet request received before GTFS data finished loading");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let t0 = Time::parse(&request.start_time).ok_or(StatusCode::BAD_REQUEST)?;

    let people: Vec<Person> = request
        .people
        .into_iter()
        .map(|person| Person {
            label: person.label.into(),
            station_query: person.station_query,
        })
        .collect();
    if people.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut config = SearchConfig::default();
    if let Some(value) = request.walk_speed_mps {
        config = config.with_walk_speed(value);
    }
    if let Some(value) = request.max_walk_time_s {
        config = config.with_max_walk_time(value);
    }
    if let Some(value) = request.max_trip_time_s {
        config = config.with_max_trip_time(value);
    }

    let search = MeetingSearch::new(feed, config, &people, t0).map_err(|err| {
        warn!("failed to start search: {err}");
        StatusCode::BAD_REQUEST
    })?;

    let result = search.run();
    Ok(Json(MeetResponseDto::from(result)).into_response())
}
