//! HTTP API for the timecard frontend
//!
//! - GET / - Liveness text
//! - GET /health - Health check
//! - POST /upload_timecard - Extract and total hours from an image (multipart `file`)
//! - PUT /edit_timecard - Recompute hours for edited entries (JSON array)

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, ParseFailureResponse, FILE_FIELD};
pub use routes::{create_router, RouterOptions};
pub use state::AppState;
