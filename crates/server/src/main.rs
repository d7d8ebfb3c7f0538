mod api;
mod dto;
mod state;

use std::{env, path::Path, process, sync::Arc, time::Instant};

use axum::routing::post;
use meetgrid::{feed::Feed, gtfs::Gtfs};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::state::AppState;

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let gtfs_data_path = match env::var("GTFS_DATA_PATH") {
        Ok(path_str) => Path::new(&path_str).to_owned(),
        Err(err) => {
            error!("failed reading GTFS_DATA_PATH: {}", err);
            process::exit(1);
        }
    };

    let app_state = AppState {
        feed: RwLock::new(None),
        gtfs_data_path,
    };

    if app_state.gtfs_data_path.exists() {
        info!("loading GTFS data...");
        let now = Instant::now();
        let mut gtfs = if app_state.gtfs_data_path.extension().is_some_and(|ext| ext == "zip") {
            Gtfs::new().from_zip(&app_state.gtfs_data_path).unwrap()
        } else {
            Gtfs::new().from_directory(&app_state.gtfs_data_path)
        };
        let feed = Feed::from_gtfs(&mut gtfs).unwrap();
        let _ = app_state.feed.write().await.replace(feed);
        info!("loading GTFS data took {:?}", now.elapsed());
    } else {
        warn!("no GTFS data found at {:?}", app_state.gtfs_data_path);
    }

    info!("starting server...");

    let app = axum::Router::new()
        .route("/meet", post(api::meet))
        .with_state(Arc::new(app_state));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .unwrap();
    info!("listening on port {PORT}");
    axum::serve(listener, app).await.unwrap();
}
