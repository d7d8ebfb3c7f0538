use thiserror::Error;

/// Crate-wide error surface. Non-fatal search-loop outcomes
/// (`NoMeeting`, `TimeCap`) are not represented here — they are
/// [`crate::search::MeetingResult`] statuses, not `Result::Err` values.
/// Feed reading failures (missing/malformed GTFS files) surface through
/// [`crate::gtfs::Error`], wrapped rather than duplicated here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no station matches query {0:?}")]
    StationUnresolved(String),
    #[error(transparent)]
    Gtfs(#[from] crate::gtfs::Error),
}
