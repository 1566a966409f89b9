//! Location repository
//!
//! Leaf of the reference graph: locations depend on nothing, holidays
//! point at them.

use sqlx::{FromRow, PgPool};
use tokio::sync::Mutex;

use super::{is_foreign_key_violation, DbError};
use crate::models::LocationFields;

const RESOURCE: &str = "location";

/// Location record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Location {
    pub id: i64,
    pub number: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub image_url: String,
}

/// Location repository
pub struct LocationRepo {
    pool: PgPool,
    lock: Mutex<()>,
}

impl LocationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock: Mutex::new(()),
        }
    }

    /// Insert a location and return it with its assigned id.
    pub async fn create(&self, fields: LocationFields) -> Result<Location, DbError> {
        let _guard = self.lock.lock().await;

        let location: Location = sqlx::query_as(
            r#"
            INSERT INTO locations (number, country, city, street, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, number, country, city, street, image_url
            "#,
        )
        .bind(&fields.number)
        .bind(&fields.country)
        .bind(&fields.city)
        .bind(&fields.street)
        .bind(&fields.image_url)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = location.id, "location created");
        Ok(location)
    }

    /// Delete a location.
    ///
    /// Zero affected rows is `NotFound`; a location still used by a holiday
    /// is rejected by the foreign key and reported as `Conflict`.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let _guard = self.lock.lock().await;

        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DbError::Conflict {
                        resource: RESOURCE,
                        id,
                        dependents: "holidays",
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

        tracing::debug!(id, "location deleted");
        Ok(())
    }

    /// List all locations ordered by id. Empty when none exist.
    pub async fn list(&self) -> Result<Vec<Location>, DbError> {
        let _guard = self.lock.lock().await;

        let locations: Vec<Location> = sqlx::query_as(
            r#"
            SELECT id, number, country, city, street, image_url
            FROM locations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = locations.len(), "locations listed");
        Ok(locations)
    }

    /// Get a single location by id.
    pub async fn get(&self, id: i64) -> Result<Location, DbError> {
        let _guard = self.lock.lock().await;

        let location: Location = sqlx::query_as(
            r#"
            SELECT id, number, country, city, street, image_url
            FROM locations
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

        Ok(location)
    }

    /// Check whether a location exists.
    pub async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let _guard = self.lock.lock().await;

        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Overwrite every mutable field of a location.
    pub async fn update(&self, id: i64, fields: LocationFields) -> Result<Location, DbError> {
        let _guard = self.lock.lock().await;

        let location: Location = sqlx::query_as(
            r#"
            UPDATE locations
            SET number = $2, country = $3, city = $4, street = $5, image_url = $6
            WHERE id = $1
            RETURNING id, number, country, city, street, image_url
            "#,
        )
        .bind(id)
        .bind(&fields.number)
        .bind(&fields.country)
        .bind(&fields.city)
        .bind(&fields.street)
        .bind(&fields.image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: RESOURCE,
            id,
        })?;

        tracing::debug!(id, "location updated");
        Ok(location)
    }
}
