//! Reservation repository
//!
//! Every reservation belongs to exactly one holiday. Creation checks the
//! holiday first; every read embeds the holiday as `HolidayRepo::get`
//! returns it.

use std::sync::Arc;

use sqlx::{FromRow, PgPool};
use tokio::sync::Mutex;

use super::{is_foreign_key_violation, DbError, Holiday, HolidayRepo};
use crate::models::ReservationFields;

const RESOURCE: &str = "reservation";

/// Reservation row as stored
#[derive(Debug, Clone, FromRow)]
struct ReservationRow {
    id: i64,
    phone_number: String,
    contact_name: String,
    holiday_id: i64,
}

/// Reservation with its holiday resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: i64,
    pub phone_number: String,
    pub contact_name: String,
    pub holiday: Holiday,
}

/// Reservation repository
pub struct ReservationRepo {
    pool: PgPool,
    lock: Mutex<()>,
    holidays: Arc<HolidayRepo>,
}

impl ReservationRepo {
    pub fn new(pool: PgPool, holidays: Arc<HolidayRepo>) -> Self {
        Self {
            pool,
            lock: Mutex::new(()),
            holidays,
        }
    }

    /// Book a holiday.
    ///
    /// Fails fast with `MissingReference` when the holiday does not exist;
    /// nothing is inserted in that case.
    pub async fn create(
        &self,
        holiday_id: i64,
        fields: ReservationFields,
    ) -> Result<Reservation, DbError> {
        let _guard = self.lock.lock().await;

        self.holidays
            .get_minimal(holiday_id)
            .await
            .map_err(DbError::into_missing_reference)?;

        let row: ReservationRow = sqlx::query_as(
            r#"
            INSERT INTO reservations (phone_number, contact_name, holiday_id)
            VALUES ($1, $2, $3)
            RETURNING id, phone_number, contact_name, holiday_id
            "#,
        )
        .bind(fields.phone_number.as_str())
        .bind(&fields.contact_name)
        .bind(holiday_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DbError::MissingReference {
                    resource: "holiday",
                    id: holiday_id,
                }
            } else {
                DbError::Sqlx(e)
            }
        })?;

        tracing::debug!(id = row.id, holiday_id, "reservation created");
        self.resolve(row).await
    }

    /// Delete a reservation; zero affected rows is `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let _guard = self.lock.lock().await;

        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: RESOURCE,
                id,
            });
        }

        tracing::debug!(id, "reservation deleted");
        Ok(())
    }

    /// List all reservations, each with its holiday resolved.
    pub async fn list(&self) -> Result<Vec<Reservation>, DbError> {
        let _guard = self.lock.lock().await;

        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id, phone_number, contact_name, holiday_id
            FROM reservations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut reservations = Vec::with_capacity(rows.len());
        for row in rows {
            reservations.push(self.resolve(row).await?);
        }

        tracing::debug!(count = reservations.len(), "reservations listed");
        Ok(reservations)
    }

    /// Get a single reservation with its holiday resolved.
    pub async fn get(&self, id: i64) -> Result<Reservation, DbError> {
        let _guard = self.lock.lock().await;

        let row: ReservationRow = sqlx::query_as(
            r#"
            SELECT id, phone_number, contact_name, holiday_id
            FROM reservations
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

    /// Overwrite phone number and contact name. The holiday stays as booked.
    pub async fn update(
        &self,
        id: i64,
        fields: ReservationFields,
    ) -> Result<Reservation, DbError> {
        let _guard = self.lock.lock().await;

        let row: ReservationRow = sqlx::query_as(
            r#"
            UPDATE reservations
            SET phone_number = $2, contact_name = $3
            WHERE id = $1
            RETURNING id, phone_number, contact_name, holiday_id
            "#,
        )
        .bind(id)
        .bind(fields.phone_number.as_str())
        .bind(&fields.contact_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: RESOURCE,
            id,
        })?;

        tracing::debug!(id, "reservation updated");
        self.resolve(row).await
    }

    async fn resolve(&self, row: ReservationRow) -> Result<Reservation, DbError> {
        let holiday = self
            .holidays
            .get(row.holiday_id)
            .await
            .map_err(|e| e.into_broken_reference(RESOURCE, row.id))?;

        Ok(Reservation {
            id: row.id,
            phone_number: row.phone_number,
            contact_name: row.contact_name,
            holiday,
        })
    }
}
