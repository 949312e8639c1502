//! Schedule storage.
//!
//! Lines, routes and timetable entries live in memory behind a read-write
//! lock. When a snapshot file is configured, every successful mutation is
//! written through to it before becoming visible, so a failed write leaves
//! both the file and the in-memory state unchanged.

mod error;
mod snapshot;
mod tables;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{
    DayType, EntryId, Line, LineId, NewEntry, NewLine, NewRoute, Route, RouteId, TimetableEntry,
};

pub use error::StoreError;
pub use snapshot::SnapshotFile;
pub use tables::{LineDetail, RouteDetail};

use tables::Tables;

/// Shared store for schedule data.
pub struct ScheduleStore {
    tables: RwLock<Tables>,
    snapshot: Option<SnapshotFile>,
}

impl ScheduleStore {
    /// Create an empty store that is not persisted.
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            snapshot: None,
        }
    }

    /// Open a store backed by a snapshot file, loading it if present.
    pub fn open(snapshot: SnapshotFile) -> Result<Self, StoreError> {
        let tables = snapshot.load()?;
        info!(
            path = %snapshot.path().display(),
            lines = tables.lines().len(),
            routes = tables.routes(None).len(),
            entries = tables.entries(None, None).len(),
            "loaded schedule snapshot"
        );

        Ok(Self {
            tables: RwLock::new(tables),
            snapshot: Some(snapshot),
        })
    }

    /// Apply a mutation to a copy of the tables, persist it, then publish it.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.tables.write().await;
        let mut next = guard.clone();
        let out = op(&mut next)?;

        if let Some(snapshot) = &self.snapshot {
            let file = snapshot.clone();
            let staged = next.clone();
            tokio::task::spawn_blocking(move || file.save(&staged))
                .await
                .map_err(|e| StoreError::Snapshot {
                    message: format!("snapshot writer failed: {e}"),
                })??;
            debug!(path = %snapshot.path().display(), "snapshot written");
        }

        *guard = next;
        Ok(out)
    }

    // Lines

    pub async fn create_line(&self, new: NewLine) -> Result<Line, StoreError> {
        let line = self.mutate(|t| t.insert_line(new)).await?;
        info!(line_id = %line.id, name = %line.name, "line created");
        Ok(line)
    }

    pub async fn list_lines(&self) -> Vec<Line> {
        self.tables.read().await.lines()
    }

    pub async fn get_line(&self, id: LineId) -> Result<LineDetail, StoreError> {
        self.tables.read().await.line_detail(id)
    }

    pub async fn update_line(&self, id: LineId, new: NewLine) -> Result<Line, StoreError> {
        let line = self.mutate(|t| t.replace_line(id, new)).await?;
        info!(line_id = %id, "line updated");
        Ok(line)
    }

    pub async fn delete_line(&self, id: LineId) -> Result<Line, StoreError> {
        let line = self.mutate(|t| t.remove_line(id)).await?;
        info!(line_id = %id, "line deleted");
        Ok(line)
    }

    // Routes

    pub async fn create_route(&self, new: NewRoute) -> Result<Route, StoreError> {
        let route = self.mutate(|t| t.insert_route(new)).await?;
        info!(
            route_id = %route.id,
            line_id = %route.line_id,
            origin = %route.origin,
            destination = %route.destination,
            "route created"
        );
        Ok(route)
    }

    /// All routes, optionally only those of one line.
    pub async fn list_routes(&self, line: Option<LineId>) -> Vec<Route> {
        self.tables.read().await.routes(line)
    }

    pub async fn get_route(&self, id: RouteId) -> Result<RouteDetail, StoreError> {
        self.tables.read().await.route_detail(id)
    }

    pub async fn update_route(&self, id: RouteId, new: NewRoute) -> Result<Route, StoreError> {
        let route = self.mutate(|t| t.replace_route(id, new)).await?;
        info!(route_id = %id, "route updated");
        Ok(route)
    }

    pub async fn delete_route(&self, id: RouteId) -> Result<Route, StoreError> {
        let route = self.mutate(|t| t.remove_route(id)).await?;
        info!(route_id = %id, "route deleted");
        Ok(route)
    }

    // Timetable entries

    pub async fn create_entry(&self, new: NewEntry) -> Result<TimetableEntry, StoreError> {
        let entry = self.mutate(|t| t.insert_entry(new)).await?;
        info!(
            entry_id = %entry.id,
            route_id = %entry.route_id,
            day_type = %entry.day_type,
            departure = %entry.departure,
            "timetable entry created"
        );
        Ok(entry)
    }

    /// Entries matching the optional filters, ordered by departure.
    pub async fn list_entries(
        &self,
        route: Option<RouteId>,
        day_type: Option<DayType>,
    ) -> Vec<TimetableEntry> {
        self.tables.read().await.entries(route, day_type)
    }

    pub async fn get_entry(&self, id: EntryId) -> Result<TimetableEntry, StoreError> {
        self.tables.read().await.entry(id)
    }

    pub async fn update_entry(
        &self,
        id: EntryId,
        new: NewEntry,
    ) -> Result<TimetableEntry, StoreError> {
        let entry = self.mutate(|t| t.replace_entry(id, new)).await?;
        info!(entry_id = %id, "timetable entry updated");
        Ok(entry)
    }

    pub async fn delete_entry(&self, id: EntryId) -> Result<TimetableEntry, StoreError> {
        let entry = self.mutate(|t| t.remove_entry(id)).await?;
        info!(entry_id = %id, "timetable entry deleted");
        Ok(entry)
    }

    /// One route's entries for one day-type, ordered by departure.
    ///
    /// Entries sharing a departure time stay in insertion order.
    pub async fn entries_for(
        &self,
        route: RouteId,
        day_type: DayType,
    ) -> Result<Vec<TimetableEntry>, StoreError> {
        self.tables.read().await.entries_for(route, day_type)
    }
}
