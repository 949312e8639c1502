//! Connections for a direction and day-type, straight from the store.

use tracing::debug;

use crate::domain::{DayType, Direction};
use crate::store::{ScheduleStore, StoreError};

use super::matcher::{Connection, find_connections};
use super::segments::SegmentTable;

/// Look up the direction's segments, fetch their entries and match them.
///
/// Fails only if a configured segment route does not exist.
pub async fn connections_for(
    store: &ScheduleStore,
    table: &SegmentTable,
    direction: Direction,
    day_type: DayType,
) -> Result<Vec<Connection>, StoreError> {
    let pair = table.get(direction);

    let first = store.entries_for(pair.first, day_type).await?;
    let second = store.entries_for(pair.second, day_type).await?;

    let connections = find_connections(&first, &second);

    debug!(
        %direction,
        %day_type,
        segments = %pair,
        first_trips = first.len(),
        second_trips = second.len(),
        connections = connections.len(),
        "matched connections"
    );

    Ok(connections)
}
