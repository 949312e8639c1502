//! Lines, route segments and timetable entries.
//!
//! The `New*` types carry validated field values for a create or replace
//! operation; the store assigns identifiers and produces the full entity.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::{ClockTime, DayType, EntryId, LineId, RouteId};

/// A named bus line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
}

/// A directed origin → destination leg operated by a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub line_id: LineId,
    pub origin: String,
    pub destination: String,
}

/// One scheduled trip on a route for a given day-type.
///
/// Arrival is expected to be later than departure but this is not
/// enforced; the connection matcher only looks at each time on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: EntryId,
    pub route_id: RouteId,
    pub day_type: DayType,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    pub direct: bool,
}

/// Validated fields for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    name: String,
}

impl NewLine {
    /// Validate a line name. Surrounding whitespace is removed.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: non_empty(name, "name")?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_line(self, id: LineId) -> Line {
        Line {
            id,
            name: self.name,
        }
    }
}

/// Validated fields for a route segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
    line_id: LineId,
    origin: String,
    destination: String,
}

impl NewRoute {
    /// Validate a route.
    ///
    /// Origin and destination are trimmed and must differ, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::{LineId, NewRoute};
    ///
    /// assert!(NewRoute::new(LineId(1), "Centro", "Terminal").is_ok());
    /// assert!(NewRoute::new(LineId(1), "Centro", " centro ").is_err());
    /// assert!(NewRoute::new(LineId(1), "", "Terminal").is_err());
    /// ```
    pub fn new(line_id: LineId, origin: &str, destination: &str) -> Result<Self, DomainError> {
        let origin = non_empty(origin, "origin")?;
        let destination = non_empty(destination, "destination")?;

        if origin.to_lowercase() == destination.to_lowercase() {
            return Err(DomainError::SameOriginAndDestination(origin));
        }

        Ok(Self {
            line_id,
            origin,
            destination,
        })
    }

    pub fn line_id(&self) -> LineId {
        self.line_id
    }

    pub(crate) fn into_route(self, id: RouteId) -> Route {
        Route {
            id,
            line_id: self.line_id,
            origin: self.origin,
            destination: self.destination,
        }
    }
}

/// Fields for a timetable entry.
///
/// Every field is already typed, so there is nothing further to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEntry {
    pub route_id: RouteId,
    pub day_type: DayType,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    pub direct: bool,
}

impl NewEntry {
    pub(crate) fn into_entry(self, id: EntryId) -> TimetableEntry {
        TimetableEntry {
            id,
            route_id: self.route_id,
            day_type: self.day_type,
            departure: self.departure,
            arrival: self.arrival,
            direct: self.direct,
        }
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_name_is_trimmed() {
        let line = NewLine::new("  Línea 60 ").unwrap();
        assert_eq!(line.name(), "Línea 60");
        assert_eq!(line.into_line(LineId(4)).name, "Línea 60");
    }

    #[test]
    fn line_name_required() {
        assert_eq!(NewLine::new("   "), Err(DomainError::EmptyField("name")));
    }

    #[test]
    fn route_requires_both_ends() {
        assert_eq!(
            NewRoute::new(LineId(1), "", "Terminal"),
            Err(DomainError::EmptyField("origin"))
        );
        assert_eq!(
            NewRoute::new(LineId(1), "Centro", "  "),
            Err(DomainError::EmptyField("destination"))
        );
    }

    #[test]
    fn route_rejects_same_origin_and_destination() {
        assert_eq!(
            NewRoute::new(LineId(1), "Centro", "CENTRO"),
            Err(DomainError::SameOriginAndDestination("Centro".into()))
        );
    }

    #[test]
    fn route_keeps_line() {
        let route = NewRoute::new(LineId(2), "Centro", "Terminal")
            .unwrap()
            .into_route(RouteId(9));
        assert_eq!(route.id, RouteId(9));
        assert_eq!(route.line_id, LineId(2));
        assert_eq!(route.origin, "Centro");
        assert_eq!(route.destination, "Terminal");
    }

    #[test]
    fn entry_serializes_times_as_strings() {
        let entry = NewEntry {
            route_id: RouteId(1),
            day_type: DayType::Saturday,
            departure: ClockTime::parse_hhmm("08:30").unwrap(),
            arrival: ClockTime::parse_hhmm("09:15").unwrap(),
            direct: true,
        }
        .into_entry(EntryId(5));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["route_id"], 1);
        assert_eq!(json["day_type"], "saturday");
        assert_eq!(json["departure"], "08:30");
        assert_eq!(json["arrival"], "09:15");
        assert_eq!(json["direct"], true);
    }
}
