//! Domain types for the bus schedule server.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity. Times in particular are parsed
//! once at the boundary; nothing downstream handles raw "HH:MM" strings.

mod day_type;
mod direction;
mod entities;
mod error;
mod ids;
mod time;

pub use day_type::{DayType, InvalidDayType};
pub use direction::{Direction, InvalidDirection};
pub use entities::{Line, NewEntry, NewLine, NewRoute, Route, TimetableEntry};
pub use error::DomainError;
pub use ids::{EntryId, LineId, RouteId};
pub use time::{ClockTime, TimeError};
