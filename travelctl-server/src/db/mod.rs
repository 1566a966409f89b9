//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One shared connection pool for every repository
//! - Schema is created once at startup, never from request handlers
//! - Parameter binding for every value, including list filters
//! - Foreign keys declared in the schema back up the explicit reference checks

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
