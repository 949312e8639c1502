//! Schedule store error types.

/// Errors from schedule store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Line names must be unique
    #[error("a line named {0:?} already exists")]
    DuplicateLineName(String),

    /// The entity still owns child entities and cannot be deleted
    #[error("{entity} {id} still has {dependents}; delete them first")]
    HasDependents {
        entity: &'static str,
        id: u64,
        dependents: &'static str,
    },

    /// A table has handed out every identifier
    #[error("no {entity} ids left to assign")]
    IdsExhausted { entity: &'static str },

    /// Reading, writing or validating the snapshot file failed
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}

impl StoreError {
    pub(crate) fn line_not_found(id: crate::domain::LineId) -> Self {
        StoreError::NotFound {
            entity: "line",
            id: id.0,
        }
    }

    pub(crate) fn route_not_found(id: crate::domain::RouteId) -> Self {
        StoreError::NotFound {
            entity: "route",
            id: id.0,
        }
    }

    pub(crate) fn entry_not_found(id: crate::domain::EntryId) -> Self {
        StoreError::NotFound {
            entity: "timetable entry",
            id: id.0,
        }
    }
}
