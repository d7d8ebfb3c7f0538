use std::collections::HashMap;

use crate::shared::{Coordinate, Distance};

/// Metres per degree of latitude, used to size the cell neighbourhood for a
/// given search radius.
const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Grid cell size — fixed design parameters of the spatial index,
/// distinct from the runtime-tunable walk/trip-time search constants.
pub const DLAT: f64 = 0.004;
pub const DLON: f64 = 0.007;

pub type Cell = (i32, i32);

/// Uniform lat/lon grid over platform coordinates.
///
/// Built once at ingest and never mutated; `nearby` enumerates candidates
/// for geodesic walks on demand at search time.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    dlat: f64,
    dlon: f64,
    cells: HashMap<Cell, Vec<(u32, Coordinate)>>,
}

impl Grid {
    pub fn new(dlat: f64, dlon: f64) -> Self {
        Self {
            dlat,
            dlon,
            cells: HashMap::new(),
        }
    }

    pub fn insert(&mut self, platform_index: u32, coordinate: Coordinate) {
        let cell = coordinate.to_cell(self.dlat, self.dlon);
        self.cells
            .entry(cell)
            .or_default()
            .push((platform_index, coordinate));
    }

    /// Platforms within `radius_m` of `origin` (`origin_index` itself
    /// excluded), alongside their true haversine distance.
    pub fn nearby(
        &self,
        origin_index: u32,
        origin: Coordinate,
        radius_m: f64,
    ) -> Vec<(u32, Distance)> {
        let lat_rad = origin.latitude.to_radians();
        let meters_per_degree_lon = (METERS_PER_DEGREE_LAT * lat_rad.cos()).max(1.0);

        let nlat = ((radius_m / METERS_PER_DEGREE_LAT / self.dlat).ceil() as i32).max(1);
        let nlon = ((radius_m / meters_per_degree_lon / self.dlon).ceil() as i32).max(1);

        let (ox, oy) = origin.to_cell(self.dlat, self.dlon);
        let mut out = Vec::new();
        for x in (ox - nlat)..=(ox + nlat) {
            for y in (oy - nlon)..=(oy + nlon) {
                let Some(candidates) = self.cells.get(&(x, y)) else {
                    continue;
                };
                for &(candidate_index, candidate_coordinate) in candidates {
                    if candidate_index == origin_index {
                        continue;
                    }
                    let distance = origin.haversine(&candidate_coordinate);
                    if distance.as_meters() <= radius_m {
                        out.push((candidate_index, distance));
                    }
                }
            }
        }
        out.sort_unstable_by_key(|(idx, _)| *idx);
        out.dedup_by_key(|(idx, _)| *idx);
        out
    }
}

#[test]
fn nearby_finds_point_within_radius_and_excludes_self() {
    let mut grid = Grid::new(0.004, 0.007);
    let a = Coordinate::new(52.520, 13.400);
    let b = Coordinate::new(52.521, 13.400);
    grid.insert(0, a);
    grid.insert(1, b);

    let found = grid.nearby(0, a, 780.0);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, 1);
}

#[test]
fn nearby_excludes_points_outside_radius() {
    let mut grid = Grid::new(0.004, 0.007);
    let a = Coordinate::new(52.520, 13.400);
    let far = Coordinate::new(53.0, 14.0);
    grid.insert(0, a);
    grid.insert(1, far);

    assert!(grid.nearby(0, a, 780.0).is_empty());
}
