//! Day-type classification for timetables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown day-type label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day type: {label:?}")]
pub struct InvalidDayType {
    label: String,
}

/// Which kind of day a timetable entry applies to.
///
/// Operators publish separate timetables for working days, Saturdays,
/// Sundays and public holidays. Both the English names and the Spanish
/// labels used by the operators are accepted when parsing. Ordering follows
/// declaration order.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::DayType;
///
/// assert_eq!(DayType::parse("workday").unwrap(), DayType::Workday);
/// assert_eq!(DayType::parse("Sábado").unwrap(), DayType::Saturday);
/// assert_eq!(DayType::parse("feriado").unwrap(), DayType::Holiday);
/// assert!(DayType::parse("weekend").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Workday,
    Saturday,
    Sunday,
    Holiday,
}

impl DayType {
    /// All day-types, in week order.
    pub const ALL: [DayType; 4] = [
        DayType::Workday,
        DayType::Saturday,
        DayType::Sunday,
        DayType::Holiday,
    ];

    /// Parse a day-type label, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidDayType> {
        match s.trim().to_lowercase().as_str() {
            "workday" | "habil" | "hábil" => Ok(DayType::Workday),
            "saturday" | "sabado" | "sábado" => Ok(DayType::Saturday),
            "sunday" | "domingo" => Ok(DayType::Sunday),
            "holiday" | "feriado" => Ok(DayType::Holiday),
            _ => Err(InvalidDayType {
                label: s.to_string(),
            }),
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Workday => "workday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
            DayType::Holiday => "holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = InvalidDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
