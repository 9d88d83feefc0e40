//! HTTP API for editor plugins and scripts
//!
//! - POST /rooms - Create a collaboration room and record it in a note
//! - GET /settings - Current settings
//! - PUT /settings - Update settings (saved immediately)
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, UpdateSettingsRequest};
pub use routes::create_router;
pub use state::AppState;
