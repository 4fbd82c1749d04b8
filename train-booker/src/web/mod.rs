//! Web layer for the train booker.
//!
//! Provides JSON endpoints for searching trains and confirming bookings.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
