//! Travel direction for connection queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown direction label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {label:?}")]
pub struct InvalidDirection {
    label: String,
}

/// Direction of travel along the two-segment trip.
///
/// Accepts `outbound`/`ida` and `return`/`vuelta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    Return,
}

impl Direction {
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s.trim().to_lowercase().as_str() {
            "outbound" | "ida" => Ok(Direction::Outbound),
            "return" | "vuelta" => Ok(Direction::Return),
            _ => Err(InvalidDirection {
                label: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outbound => "outbound",
            Direction::Return => "return",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
