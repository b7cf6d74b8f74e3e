//! Heron Backend Mock - offline stand-in for the hosted backend
//!
//! Serves the same REST + auth surface the dashboard talks to in
//! production, backed by seeded in-memory collections.

pub mod api;
pub mod state;

pub use api::router;
pub use state::AppState;
