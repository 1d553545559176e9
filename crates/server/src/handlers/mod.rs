//! # API Route Handlers
//!
//! All Axum route handlers for the `inkwell-server`, split by endpoint.

pub mod analyze;
pub mod general;
pub mod process;
pub mod transcribe;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use analyze::*;
pub use general::*;
pub use process::*;
pub use transcribe::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
