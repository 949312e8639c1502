//! In-memory tables and their referential rules.
//!
//! Identifiers are handed out sequentially per table and never reused, even
//! after a delete. Entries keyed by id therefore iterate in insertion order,
//! which is what breaks departure-time ties.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    DayType, EntryId, Line, LineId, NewEntry, NewLine, NewRoute, Route, RouteId, TimetableEntry,
};

use super::error::StoreError;

/// A line together with its routes and their entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetail {
    pub line: Line,
    pub routes: Vec<RouteDetail>,
}

/// A route together with its timetable entries.
///
/// Entries are grouped by day-type, then ordered by departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDetail {
    pub route: Route,
    pub entries: Vec<TimetableEntry>,
}

/// Serialized form of [`Tables`], written to the snapshot file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct TablesSnapshot {
    #[serde(default)]
    last_line_id: u64,
    #[serde(default)]
    last_route_id: u64,
    #[serde(default)]
    last_entry_id: u64,
    #[serde(default)]
    lines: Vec<Line>,
    #[serde(default)]
    routes: Vec<Route>,
    #[serde(default)]
    entries: Vec<TimetableEntry>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    lines: BTreeMap<LineId, Line>,
    routes: BTreeMap<RouteId, Route>,
    entries: BTreeMap<EntryId, TimetableEntry>,
    last_line_id: u64,
    last_route_id: u64,
    last_entry_id: u64,
}

impl Tables {
    /// Rebuild tables from a snapshot, holding stored rows to the same rules
    /// as the write path.
    pub(crate) fn from_snapshot(snapshot: TablesSnapshot) -> Result<Self, StoreError> {
        let mut tables = Tables::default();

        for line in snapshot.lines {
            let id = line.id;
            check_stored_id(tables.lines.contains_key(&id), "line", id.0)?;
            let new = NewLine::new(&line.name).map_err(|e| invalid_row("line", id.0, e))?;
            tables
                .check_line_name(new.name(), None)
                .map_err(|e| invalid_row("line", id.0, e))?;
            tables.lines.insert(id, new.into_line(id));
        }

        for route in snapshot.routes {
            let id = route.id;
            check_stored_id(tables.routes.contains_key(&id), "route", id.0)?;
            let new = NewRoute::new(route.line_id, &route.origin, &route.destination)
                .map_err(|e| invalid_row("route", id.0, e))?;
            tables
                .require_line(new.line_id())
                .map_err(|e| invalid_row("route", id.0, e))?;
            tables.routes.insert(id, new.into_route(id));
        }

        for entry in snapshot.entries {
            let id = entry.id;
            check_stored_id(tables.entries.contains_key(&id), "timetable entry", id.0)?;
            tables
                .require_route(entry.route_id)
                .map_err(|e| invalid_row("timetable entry", id.0, e))?;
            tables.entries.insert(id, entry);
        }

        // A hand-edited file may hold ids beyond the stored counters
        let max_line = tables.lines.keys().next_back().map_or(0, |id| id.0);
        let max_route = tables.routes.keys().next_back().map_or(0, |id| id.0);
        let max_entry = tables.entries.keys().next_back().map_or(0, |id| id.0);

        tables.last_line_id = snapshot.last_line_id.max(max_line);
        tables.last_route_id = snapshot.last_route_id.max(max_route);
        tables.last_entry_id = snapshot.last_entry_id.max(max_entry);

        Ok(tables)
    }

    pub(crate) fn to_snapshot(&self) -> TablesSnapshot {
        TablesSnapshot {
            last_line_id: self.last_line_id,
            last_route_id: self.last_route_id,
            last_entry_id: self.last_entry_id,
            lines: self.lines.values().cloned().collect(),
            routes: self.routes.values().cloned().collect(),
            entries: self.entries.values().cloned().collect(),
        }
    }

    // Lines

    pub(crate) fn insert_line(&mut self, new: NewLine) -> Result<Line, StoreError> {
        self.check_line_name(new.name(), None)?;

        let id = next_id(&mut self.last_line_id, "line")?;
        let line = new.into_line(LineId(id));
        self.lines.insert(line.id, line.clone());
        Ok(line)
    }

    pub(crate) fn lines(&self) -> Vec<Line> {
        self.lines.values().cloned().collect()
    }

    pub(crate) fn line_detail(&self, id: LineId) -> Result<LineDetail, StoreError> {
        let line = self
            .lines
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::line_not_found(id))?;

        let routes = self
            .routes
            .values()
            .filter(|r| r.line_id == id)
            .map(|r| self.detail_of(r))
            .collect();

        Ok(LineDetail { line, routes })
    }

    pub(crate) fn replace_line(&mut self, id: LineId, new: NewLine) -> Result<Line, StoreError> {
        if !self.lines.contains_key(&id) {
            return Err(StoreError::line_not_found(id));
        }
        self.check_line_name(new.name(), Some(id))?;

        let line = new.into_line(id);
        self.lines.insert(id, line.clone());
        Ok(line)
    }

    pub(crate) fn remove_line(&mut self, id: LineId) -> Result<Line, StoreError> {
        if !self.lines.contains_key(&id) {
            return Err(StoreError::line_not_found(id));
        }
        if self.routes.values().any(|r| r.line_id == id) {
            return Err(StoreError::HasDependents {
                entity: "line",
                id: id.0,
                dependents: "routes",
            });
        }

        self.lines
            .remove(&id)
            .ok_or_else(|| StoreError::line_not_found(id))
    }

    fn check_line_name(&self, name: &str, except: Option<LineId>) -> Result<(), StoreError> {
        let taken = self
            .lines
            .values()
            .any(|l| l.name == name && Some(l.id) != except);
        if taken {
            return Err(StoreError::DuplicateLineName(name.to_string()));
        }
        Ok(())
    }

    // Routes

    pub(crate) fn insert_route(&mut self, new: NewRoute) -> Result<Route, StoreError> {
        self.require_line(new.line_id())?;

        let id = next_id(&mut self.last_route_id, "route")?;
        let route = new.into_route(RouteId(id));
        self.routes.insert(route.id, route.clone());
        Ok(route)
    }

    pub(crate) fn routes(&self, line: Option<LineId>) -> Vec<Route> {
        self.routes
            .values()
            .filter(|r| line.is_none_or(|id| r.line_id == id))
            .cloned()
            .collect()
    }

    pub(crate) fn route_detail(&self, id: RouteId) -> Result<RouteDetail, StoreError> {
        let route = self
            .routes
            .get(&id)
            .ok_or_else(|| StoreError::route_not_found(id))?;
        Ok(self.detail_of(route))
    }

    pub(crate) fn replace_route(&mut self, id: RouteId, new: NewRoute) -> Result<Route, StoreError> {
        if !self.routes.contains_key(&id) {
            return Err(StoreError::route_not_found(id));
        }
        self.require_line(new.line_id())?;

        let route = new.into_route(id);
        self.routes.insert(id, route.clone());
        Ok(route)
    }

    pub(crate) fn remove_route(&mut self, id: RouteId) -> Result<Route, StoreError> {
        if !self.routes.contains_key(&id) {
            return Err(StoreError::route_not_found(id));
        }
        if self.entries.values().any(|e| e.route_id == id) {
            return Err(StoreError::HasDependents {
                entity: "route",
                id: id.0,
                dependents: "timetable entries",
            });
        }

        self.routes
            .remove(&id)
            .ok_or_else(|| StoreError::route_not_found(id))
    }

    fn require_line(&self, id: LineId) -> Result<(), StoreError> {
        if self.lines.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::line_not_found(id))
        }
    }

    fn detail_of(&self, route: &Route) -> RouteDetail {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.route_id == route.id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.day_type, e.departure));

        RouteDetail {
            route: route.clone(),
            entries,
        }
    }

    // Timetable entries

    pub(crate) fn insert_entry(&mut self, new: NewEntry) -> Result<TimetableEntry, StoreError> {
        self.require_route(new.route_id)?;

        let id = next_id(&mut self.last_entry_id, "timetable entry")?;
        let entry = new.into_entry(EntryId(id));
        self.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Entries matching the optional filters, ordered by departure.
    pub(crate) fn entries(
        &self,
        route: Option<RouteId>,
        day_type: Option<DayType>,
    ) -> Vec<TimetableEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| route.is_none_or(|id| e.route_id == id))
            .filter(|e| day_type.is_none_or(|day| e.day_type == day))
            .cloned()
            .collect();
        // Stable sort: equal departures stay in id order
        entries.sort_by_key(|e| e.departure);
        entries
    }

    /// One route's entries for one day-type, ordered by departure.
    pub(crate) fn entries_for(
        &self,
        route: RouteId,
        day_type: DayType,
    ) -> Result<Vec<TimetableEntry>, StoreError> {
        self.require_route(route)?;
        Ok(self.entries(Some(route), Some(day_type)))
    }

    pub(crate) fn entry(&self, id: EntryId) -> Result<TimetableEntry, StoreError> {
        self.entries
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::entry_not_found(id))
    }

    pub(crate) fn replace_entry(
        &mut self,
        id: EntryId,
        new: NewEntry,
    ) -> Result<TimetableEntry, StoreError> {
        if !self.entries.contains_key(&id) {
            return Err(StoreError::entry_not_found(id));
        }
        self.require_route(new.route_id)?;

        let entry = new.into_entry(id);
        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    pub(crate) fn remove_entry(&mut self, id: EntryId) -> Result<TimetableEntry, StoreError> {
        self.entries
            .remove(&id)
            .ok_or_else(|| StoreError::entry_not_found(id))
    }

    fn require_route(&self, id: RouteId) -> Result<(), StoreError> {
        if self.routes.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::route_not_found(id))
        }
    }
}

/// Advance a table's id counter.
fn next_id(last: &mut u64, entity: &'static str) -> Result<u64, StoreError> {
    *last = last
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted { entity })?;
    Ok(*last)
}

fn check_stored_id(taken: bool, entity: &str, id: u64) -> Result<(), StoreError> {
    if id == 0 {
        return Err(invalid_row(entity, id, "ids start at 1"));
    }
    if taken {
        return Err(invalid_row(entity, id, "duplicate id"));
    }
    Ok(())
}

fn invalid_row(entity: &str, id: u64, reason: impl fmt::Display) -> StoreError {
    StoreError::Snapshot {
        message: format!("stored {entity} {id}: {reason}"),
    }
}
