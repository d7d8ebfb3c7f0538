use serde::{Deserialize, Serialize};
use std::{
    cmp,
    fmt::Display,
    ops::{Add, Div, Mul, Sub},
};

/// Mean radius of the earth in metres, as used by the reference haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Distance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Distance {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Distance {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }
}

/// Latitude/longitude location of a platform.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance between two coordinates.
    pub fn haversine(&self, other: &Self) -> Distance {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::from_meters(EARTH_RADIUS_M * c)
    }

    /// Cell this coordinate falls into in the uniform spatial grid.
    pub fn to_cell(&self, dlat: f64, dlon: f64) -> (i32, i32) {
        let x = (self.latitude / dlat).floor() as i32;
        let y = (self.longitude / dlon).floor() as i32;
        (x, y)
    }
}

#[test]
fn haversine_known_distance() {
    // Berlin Alexanderplatz-ish to a point ~111m north.
    let a = Coordinate::new(52.520, 13.400);
    let b = Coordinate::new(52.521, 13.400);
    let d = a.haversine(&b).as_meters();
    assert!((d - 111.0).abs() < 5.0, "distance was {d}");
}

#[test]
fn haversine_zero_for_identical_points() {
    let a = Coordinate::new(48.8566, 2.3522);
    assert_eq!(a.haversine(&a).as_meters(), 0.0);
}

#[test]
fn cell_buckets_nearby_points_together() {
    let a = Coordinate::new(52.5200, 13.4000);
    let b = Coordinate::new(52.5201, 13.4001);
    assert_eq!(a.to_cell(0.004, 0.007), b.to_cell(0.004, 0.007));
}
