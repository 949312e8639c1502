//! Web layer for the bus schedule server.
//!
//! Provides JSON endpoints for schedule CRUD and connection queries.

mod dto;
mod error;
mod extract;
mod routes;
mod state;

pub use dto::*;
pub use error::AppError;
pub use extract::{ApiPath, ApiQuery};
pub use routes::create_router;
pub use state::AppState;
