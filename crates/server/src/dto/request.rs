use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MeetRequestDto {
    pub start_time: String,
    pub people: Vec<PersonDto>,
    pub walk_speed_mps: Option<f64>,
    pub max_walk_time_s: Option<u32>,
    pub max_trip_time_s: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonDto {
    pub label: String,
    pub station_query: String,
}
