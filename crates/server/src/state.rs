use std::path::PathBuf;

use meetgrid::feed::Feed;
use tokio::sync::RwLock;

pub struct AppState {
    pub gtfs_data_path: PathBuf,
    pub feed: RwLock<Option<Feed>>,
}
