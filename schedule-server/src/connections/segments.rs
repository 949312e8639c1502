//! Which two route segments make up the trip in each direction.

use std::fmt;
use std::str::FromStr;

use crate::domain::{Direction, RouteId};

/// Error returned when parsing a segment pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid segment pair {input:?}: {reason}")]
pub struct InvalidSegmentPair {
    input: String,
    reason: &'static str,
}

/// The first and second route segments of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPair {
    pub first: RouteId,
    pub second: RouteId,
}

impl SegmentPair {
    pub fn new(first: RouteId, second: RouteId) -> Self {
        Self { first, second }
    }

    /// Parse `"<first>,<second>"` route ids, e.g. `"1,2"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::connections::SegmentPair;
    /// use schedule_server::domain::RouteId;
    ///
    /// let pair = SegmentPair::parse("3, 4").unwrap();
    /// assert_eq!(pair.first, RouteId(3));
    /// assert_eq!(pair.second, RouteId(4));
    ///
    /// assert!(SegmentPair::parse("3").is_err());
    /// assert!(SegmentPair::parse("3,3").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidSegmentPair> {
        let err = |reason| InvalidSegmentPair {
            input: s.to_string(),
            reason,
        };

        let (first, second) = s
            .split_once(',')
            .ok_or_else(|| err("expected two comma-separated route ids"))?;
        let first: u64 = first
            .trim()
            .parse()
            .map_err(|_| err("first route id is not a number"))?;
        let second: u64 = second
            .trim()
            .parse()
            .map_err(|_| err("second route id is not a number"))?;

        if first == second {
            return Err(err("segments must be different routes"));
        }

        Ok(Self::new(RouteId(first), RouteId(second)))
    }
}

impl fmt::Display for SegmentPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first, self.second)
    }
}

impl FromStr for SegmentPair {
    type Err = InvalidSegmentPair;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Direction → segment pair lookup.
///
/// Kept apart from the matcher, which only ever sees two ordered slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTable {
    outbound: SegmentPair,
    return_trip: SegmentPair,
}

impl SegmentTable {
    pub fn new(outbound: SegmentPair, return_trip: SegmentPair) -> Self {
        Self {
            outbound,
            return_trip,
        }
    }

    /// Segments to combine for the given direction.
    pub fn get(&self, direction: Direction) -> SegmentPair {
        match direction {
            Direction::Outbound => self.outbound,
            Direction::Return => self.return_trip,
        }
    }
}

impl Default for SegmentTable {
    fn default() -> Self {
        Self {
            outbound: SegmentPair::new(RouteId(1), RouteId(2)),
            return_trip: SegmentPair::new(RouteId(3), RouteId(4)),
        }
    }
}
