//! Web layer for ticket verification.
//!
//! Provides JSON endpoints for verifying a booking reference and for
//! dashboard statistics.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
