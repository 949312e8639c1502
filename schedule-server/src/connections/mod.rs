//! Two-segment connection search.
//!
//! A trip is made of two route segments, chosen per direction by a
//! [`SegmentTable`]. The matcher pairs every trip on the first segment with
//! the earliest trip on the second segment that leaves after it arrives.

mod matcher;
mod query;
mod segments;

pub use matcher::{Connection, find_connections};
pub use query::connections_for;
pub use segments::{InvalidSegmentPair, SegmentPair, SegmentTable};
