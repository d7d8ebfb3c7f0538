use std::ops::{Add, AddAssign, Sub, SubAssign};

pub const MAX: Time = Time(u32::MAX);
pub const MIN: Time = Time(0);

/// A point in time expressed as seconds since midnight of the service day.
///
/// GTFS allows hours beyond 23 to express trips that run past midnight; this
/// type stores raw seconds and never does day arithmetic on top of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Add<Time> for Time {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Time> for Time {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Time {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub fn to_hms_string(&self) -> String {
        let h = self.0 / 3600;
        let m = (self.0 % 3600) / 60;
        let s = self.0 % 60;
        format!("{h:02}:{m:02}:{s:02}")
    }

    /// Parses `H+:MM:SS`, accepting hours beyond 23 for the GTFS extended
    /// service day. Rejects any other shape.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let hours: u32 = parts.next()?.parse().ok()?;
        let minutes: u32 = parts.next()?.parse().ok()?;
        let seconds: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(Self(hours * 3600 + minutes * 60 + seconds))
    }
}

#[test]
fn parse_plain_time() {
    assert_eq!(Time::parse("00:00:00").unwrap().as_seconds(), 0);
    assert_eq!(
        Time::parse("12:30:30").unwrap().as_seconds(),
        12 * 3600 + 30 * 60 + 30
    );
}

#[test]
fn parse_extended_service_day() {
    // property 6: parse_time("25:30:00") = 25*3600 + 30*60
    assert_eq!(
        Time::parse("25:30:00").unwrap().as_seconds(),
        25 * 3600 + 30 * 60
    );
}

#[test]
fn parse_rejects_other_shapes() {
    assert!(Time::parse("00:00").is_none());
    assert!(Time::parse("00:00:0a").is_none());
    assert!(Time::parse("").is_none());
    assert!(Time::parse("00:60:00").is_none());
}

#[test]
fn hms_roundtrip() {
    for s in ["00:00:00", "00:00:30", "00:30:00", "12:00:00", "25:30:00"] {
        assert_eq!(Time::parse(s).unwrap().to_hms_string(), s);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    pub const fn from_hours(hours: u32) -> Self {
        Self(hours * 60 * 60)
    }

    pub const fn from_days(days: u32) -> Self {
        Self(days * 60 * 60 * 24)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
