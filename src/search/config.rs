/// Tunable search constants, defaulting to the reference values.
/// Mirrors the builder style of `Raptor::departure_at`/`arrival_at`.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub walk_speed_mps: f64,
    pub max_walk_time_s: u32,
    pub max_trip_time_s: u32,
    pub progress_step_s: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            walk_speed_mps: 1.3,
            max_walk_time_s: 600,
            max_trip_time_s: 7_200,
            progress_step_s: 600,
        }
    }
}

impl SearchConfig {
    pub fn with_walk_speed(mut self, walk_speed_mps: f64) -> Self {
        self.walk_speed_mps = walk_speed_mps;
        self
    }

    pub fn with_max_walk_time(mut self, max_walk_time_s: u32) -> Self {
        self.max_walk_time_s = max_walk_time_s;
        self
    }

    pub fn with_max_trip_time(mut self, max_trip_time_s: u32) -> Self {
        self.max_trip_time_s = max_trip_time_s;
        self
    }

    pub fn with_progress_step(mut self, progress_step_s: u32) -> Self {
        self.progress_step_s = progress_step_s;
        self
    }

    /// Maximum radius a geodesic walk may span.
    pub fn max_walk_radius_m(&self) -> f64 {
        self.walk_speed_mps * self.max_walk_time_s as f64
    }
}

#[test]
fn default_matches_reference_values() {
    let config = SearchConfig::default();
    assert_eq!(config.max_walk_radius_m(), 780.0);
    assert_eq!(config.max_trip_time_s, 7_200);
}
