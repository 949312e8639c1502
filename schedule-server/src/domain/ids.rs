//! Typed identifiers for stored entities.
//!
//! Identifiers are assigned by the store, starting at 1. Keeping them as
//! distinct types stops a route id being passed where a line id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a bus line.
    LineId
);

entity_id!(
    /// Identifier of a route segment.
    RouteId
);

entity_id!(
    /// Identifier of a timetable entry.
    EntryId
);
