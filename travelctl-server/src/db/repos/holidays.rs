//! Holiday repository
//!
//! Holidays optionally point at a location. Reads resolve that location
//! through `LocationRepo`, one lookup per row, and fail as a whole if any
//! lookup fails.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tokio::sync::Mutex;

use super::{is_foreign_key_violation, DbError, Location, LocationRepo};
use crate::models::{HolidayFields, HolidayFilter};

const RESOURCE: &str = "holiday";

/// Holiday row as stored, with the bare location reference
#[derive(Debug, Clone, FromRow)]
struct HolidayRow {
    id: i64,
    title: String,
    start_date: NaiveDate,
    duration: i32,
    free_slots: i32,
    price: Decimal,
    location_id: Option<i64>,
}

/// Holiday with its location resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub id: i64,
    pub title: String,
    pub start_date: NaiveDate,
    pub duration: i32,
    pub free_slots: i32,
    pub price: Decimal,
    pub location: Option<Location>,
}

/// Just enough of a holiday to confirm it exists and name it
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HolidaySummary {
    pub id: i64,
    pub title: String,
    pub start_date: NaiveDate,
}

/// Holiday repository
pub struct HolidayRepo {
    pool: PgPool,
    lock: Mutex<()>,
    locations: Arc<LocationRepo>,
}

impl HolidayRepo {
    pub fn new(pool: PgPool, locations: Arc<LocationRepo>) -> Self {
        Self {
            pool,
            lock: Mutex::new(()),
            locations,
        }
    }

    /// Insert a holiday and return it with its location resolved.
    ///
    /// A referenced location must exist, otherwise `MissingReference`.
    pub async fn create(&self, fields: HolidayFields) -> Result<Holiday, DbError> {
        let _guard = self.lock.lock().await;

        self.check_location(fields.location_id).await?;

        let row: HolidayRow = sqlx::query_as(
            r#"
            INSERT INTO holidays (title, start_date, duration, free_slots, price, location_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, start_date, duration, free_slots, price, location_id
            "#,
        )
        .bind(&fields.title)
        .bind(fields.start_date)
        .bind(fields.duration)
        .bind(fields.free_slots)
        .bind(fields.price.as_decimal())
        .bind(fields.location_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| location_write_error(e, fields.location_id))?;

        tracing::debug!(id = row.id, location_id = ?row.location_id, "holiday created");
        self.resolve(row).await
    }

    /// Delete a holiday.
    ///
    /// Zero affected rows is `NotFound`; a holiday with reservations is
    /// rejected by the foreign key and reported as `Conflict`.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let _guard = self.lock.lock().await;

        let result = sqlx::query("DELETE FROM holidays WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DbError::Conflict {
                        resource: RESOURCE,
                        id,
                        dependents: "reservations",
                    }
                } else {
                    DbError::Sqlx(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: RESOURCE,
                id,
            });
        }

        tracing::debug!(id, "holiday deleted");
        Ok(())
    }

    /// List holidays matching the filter, each with its location resolved.
    ///
    /// Filter values are bound as parameters. A failed location lookup
    /// aborts the whole listing.
    pub async fn list(&self, filter: HolidayFilter) -> Result<Vec<Holiday>, DbError> {
        let _guard = self.lock.lock().await;

        let rows: Vec<HolidayRow> = sqlx::query_as(
            r#"
            SELECT id, title, start_date, duration, free_slots, price, location_id
            FROM holidays
            WHERE ($1::date IS NULL OR start_date = $1)
              AND ($2::int IS NULL OR duration = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.duration)
        .fetch_all(&self.pool)
        .await?;

        let mut holidays = Vec::with_capacity(rows.len());
        for row in rows {
            holidays.push(self.resolve(row).await?);
        }

        tracing::debug!(count = holidays.len(), ?filter, "holidays listed");
        Ok(holidays)
    }

    /// Get a single holiday with its location resolved.
    pub async fn get(&self, id: i64) -> Result<Holiday, DbError> {
        let _guard = self.lock.lock().await;

        let row: HolidayRow = sqlx::query_as(
            r#"
            SELECT id, title, start_date, duration, free_slots, price, location_id
            FROM holidays
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: RESOURCE,
            id,
        })?;

        self.resolve(row).await
    }

    /// Look up id, title and start date only, without resolving the location.
    ///
    /// Used by reservations to confirm a holiday exists.
    pub async fn get_minimal(&self, id: i64) -> Result<HolidaySummary, DbError> {
        let _guard = self.lock.lock().await;

        let summary: HolidaySummary =
            sqlx::query_as("SELECT id, title, start_date FROM holidays WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(DbError::NotFound {
                    resource: RESOURCE,
                    id,
                })?;

        Ok(summary)
    }

    /// Overwrite every mutable field of a holiday, location reference included.
    pub async fn update(&self, id: i64, fields: HolidayFields) -> Result<Holiday, DbError> {
        let _guard = self.lock.lock().await;

        self.check_location(fields.location_id).await?;

        let row: HolidayRow = sqlx::query_as(
            r#"
            UPDATE holidays
            SET title = $2, start_date = $3, duration = $4, free_slots = $5, price = $6,
                location_id = $7
            WHERE id = $1
            RETURNING id, title, start_date, duration, free_slots, price, location_id
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(fields.start_date)
        .bind(fields.duration)
        .bind(fields.free_slots)
        .bind(fields.price.as_decimal())
        .bind(fields.location_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| location_write_error(e, fields.location_id))?
        .ok_or(DbError::NotFound {
            resource: RESOURCE,
            id,
        })?;

        tracing::debug!(id, "holiday updated");
        self.resolve(row).await
    }

    async fn check_location(&self, location_id: Option<i64>) -> Result<(), DbError> {
        let Some(location_id) = location_id else {
            return Ok(());
        };

        if !self.locations.exists(location_id).await? {
            return Err(DbError::MissingReference {
                resource: "location",
                id: location_id,
            });
        }
        Ok(())
    }

    async fn resolve(&self, row: HolidayRow) -> Result<Holiday, DbError> {
        let location = match row.location_id {
            Some(location_id) => Some(
                self.locations
                    .get(location_id)
                    .await
                    .map_err(|e| e.into_broken_reference(RESOURCE, row.id))?,
            ),
            None => None,
        };

        Ok(Holiday {
            id: row.id,
            title: row.title,
            start_date: row.start_date,
            duration: row.duration,
            free_slots: row.free_slots,
            price: row.price,
            location,
        })
    }
}

/// A location deleted between the existence check and the write still
/// trips the foreign key.
fn location_write_error(err: sqlx::Error, location_id: Option<i64>) -> DbError {
    match location_id {
        Some(id) if is_foreign_key_violation(&err) => DbError::MissingReference {
            resource: "location",
            id,
        },
        _ => DbError::Sqlx(err),
    }
}
