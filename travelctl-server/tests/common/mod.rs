//! Shared helpers for integration tests
//!
//! Database tests run with:
//!   DATABASE_URL=postgres://... cargo test -p travelctl-server -- --ignored
//!
//! Each test gets its own schema so tests can run in parallel and start
//! from empty tables.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tower::ServiceExt;

use travelctl_server::db::{migrations, HolidayRepo, LocationRepo, ReservationRepo};

static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Repositories wired the same way the server wires them
pub struct Stores {
    pub pool: PgPool,
    pub schema: String,
    pub locations: Arc<LocationRepo>,
    pub holidays: Arc<HolidayRepo>,
    pub reservations: Arc<ReservationRepo>,
}

impl Stores {
    /// Drop the test schema. Failures are ignored.
    pub async fn cleanup(self) {
        let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.pool)
            .await;
        self.pool.close().await;
    }
}

/// Connect to DATABASE_URL, create a fresh schema and run migrations in it.
pub async fn stores() -> Stores {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    let schema = format!(
        "travelctl_test_{}_{}_{}",
        std::process::id(),
        SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst),
        nanos
    );

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("connect failed");
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&admin)
        .await
        .expect("create schema failed");
    admin.close().await;

    let options = PgConnectOptions::from_str(&url)
        .expect("invalid DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .expect("connect failed");

    migrations::run(&pool).await.expect("migrations failed");

    let locations = Arc::new(LocationRepo::new(pool.clone()));
    let holidays = Arc::new(HolidayRepo::new(pool.clone(), Arc::clone(&locations)));
    let reservations = Arc::new(ReservationRepo::new(pool.clone(), Arc::clone(&holidays)));

    Stores {
        pool,
        schema,
        locations,
        holidays,
        reservations,
    }
}

/// Pool that never connects unless a query runs.
///
/// Good for requests rejected before they reach a repository.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://travelctl@127.0.0.1:1/travelctl_unreachable")
        .expect("lazy pool")
}

/// Send a request and return `(status, json_body)`.
///
/// Empty bodies come back as `Value::Null`.
pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("request build should succeed"))
        .await
        .expect("app should handle request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("response body should be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body must be JSON")
    };
    (status, json)
}

/// Send a raw (possibly malformed) JSON body.
pub async fn send_raw(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .expect("request build should succeed"),
        )
        .await
        .expect("app should handle request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("response body should be readable");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
