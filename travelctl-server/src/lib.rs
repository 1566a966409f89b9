//! travelctl-server: REST backend for a travel agency
//!
//! Manages locations, holidays (package tours at a location) and
//! reservations (bookings against a holiday) in PostgreSQL, and exposes
//! them over HTTP.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, migrations, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
