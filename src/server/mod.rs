//! HTTP server: routes, handlers and pages

pub mod api;
pub mod error;
pub mod pages;

pub use api::{create_router, run_server, AppState};
