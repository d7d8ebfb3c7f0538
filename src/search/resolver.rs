use crate::{error::Error, feed::Station};
use crate::feed::Feed;

/// Case-insensitive substring match against station display names, ties
/// broken by ascending display name, first result returned.
pub fn resolve_station<'a>(feed: &'a Feed, query: &str) -> Result<&'a Station, Error> {
    let needle = query.to_lowercase();
    let mut matches: Vec<&Station> = feed
        .stations
        .iter()
        .filter(|station| station.name.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| a.name.cmp(&b.name));
    matches
        .into_iter()
        .next()
        .ok_or_else(|| Error::StationUnresolved(query.to_string()))
}
