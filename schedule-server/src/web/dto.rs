//! Data transfer objects for web requests and responses.
//!
//! Request bodies carry raw strings; they are validated into domain types
//! here, before anything reaches the store.

use serde::{Deserialize, Serialize};

use crate::connections::Connection;
use crate::domain::{
    ClockTime, DayType, Direction, LineId, NewEntry, NewLine, NewRoute, Route, RouteId,
    TimetableEntry,
};
use crate::store::{LineDetail, RouteDetail};

use super::error::AppError;

/// Body for creating or replacing a line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub name: String,
}

impl LineRequest {
    pub fn validate(&self) -> Result<NewLine, AppError> {
        Ok(NewLine::new(&self.name)?)
    }
}

/// Body for creating or replacing a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub line_id: u64,
    pub origin: String,
    pub destination: String,
}

impl RouteRequest {
    pub fn validate(&self) -> Result<NewRoute, AppError> {
        Ok(NewRoute::new(
            LineId(self.line_id),
            &self.origin,
            &self.destination,
        )?)
    }
}

/// Body for creating or replacing a timetable entry.
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub route_id: u64,

    /// Day-type label (e.g. "workday", "habil", "domingo")
    pub day_type: String,

    /// Departure time in HH:MM format
    pub departure: String,

    /// Arrival time in HH:MM format
    pub arrival: String,

    #[serde(default)]
    pub direct: bool,
}

impl EntryRequest {
    pub fn validate(&self) -> Result<NewEntry, AppError> {
        Ok(NewEntry {
            route_id: RouteId(self.route_id),
            day_type: parse_day_type(&self.day_type)?,
            departure: parse_time("departure", &self.departure)?,
            arrival: parse_time("arrival", &self.arrival)?,
            direct: self.direct,
        })
    }
}

/// Filters for listing routes.
#[derive(Debug, Deserialize)]
pub struct RouteListQuery {
    pub line_id: Option<u64>,
}

/// Filters for listing timetable entries.
#[derive(Debug, Deserialize)]
pub struct EntryListQuery {
    pub route_id: Option<u64>,
    pub day_type: Option<String>,
}

impl EntryListQuery {
    pub fn day_type(&self) -> Result<Option<DayType>, AppError> {
        self.day_type.as_deref().map(parse_day_type).transpose()
    }
}

/// Parameters for the connections query.
#[derive(Debug, Deserialize)]
pub struct ConnectionsQuery {
    pub day_type: String,
    pub direction: String,
}

impl ConnectionsQuery {
    pub fn validate(&self) -> Result<(Direction, DayType), AppError> {
        let direction = Direction::parse(&self.direction)
            .map_err(|e| AppError::bad_request(e.to_string()))?;
        let day_type = parse_day_type(&self.day_type)?;
        Ok((direction, day_type))
    }
}

/// A route with its timetable entries.
#[derive(Debug, Serialize)]
pub struct RouteDetailResult {
    #[serde(flatten)]
    pub route: Route,

    pub entries: Vec<TimetableEntry>,
}

impl RouteDetailResult {
    pub fn from_detail(detail: RouteDetail) -> Self {
        Self {
            route: detail.route,
            entries: detail.entries,
        }
    }
}

/// A line with its routes.
#[derive(Debug, Serialize)]
pub struct LineDetailResult {
    pub id: LineId,
    pub name: String,
    pub routes: Vec<RouteDetailResult>,
}

impl LineDetailResult {
    pub fn from_detail(detail: LineDetail) -> Self {
        Self {
            id: detail.line.id,
            name: detail.line.name,
            routes: detail
                .routes
                .into_iter()
                .map(RouteDetailResult::from_detail)
                .collect(),
        }
    }
}

/// One connection between the two segments.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConnectionResult {
    #[serde(rename = "segmentA_departure")]
    pub first_departure: String,

    #[serde(rename = "segmentA_arrival")]
    pub first_arrival: String,

    #[serde(rename = "segmentB_departure")]
    pub second_departure: String,

    #[serde(rename = "segmentB_arrival")]
    pub second_arrival: String,

    pub wait_minutes: u32,
}

impl ConnectionResult {
    pub fn from_connection(c: &Connection) -> Self {
        Self {
            first_departure: c.first_departure.to_string(),
            first_arrival: c.first_arrival.to_string(),
            second_departure: c.second_departure.to_string(),
            second_arrival: c.second_arrival.to_string(),
            wait_minutes: c.wait_minutes,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn parse_day_type(s: &str) -> Result<DayType, AppError> {
    DayType::parse(s).map_err(|e| AppError::bad_request(e.to_string()))
}

fn parse_time(field: &str, s: &str) -> Result<ClockTime, AppError> {
    ClockTime::parse_hhmm(s).map_err(|e| AppError::bad_request(format!("{field}: {e}")))
}
