//! todocrm-server: JSON API over the todo and contact operations
//!
//! Serves the core operations over HTTP and provides the PostgreSQL
//! document store backend.

pub mod connector;
pub mod db;
pub mod http;
pub mod revalidate;
pub mod state;

pub use connector::DocumentConnector;
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use revalidate::{RevalidateEvent, Revalidator};
pub use state::AppState;
