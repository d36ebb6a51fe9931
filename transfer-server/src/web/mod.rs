//! Web layer for the transfer timetable service.
//!
//! Provides the per-direction query endpoints and the board endpoint.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
