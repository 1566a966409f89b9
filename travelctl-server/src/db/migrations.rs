//! Schema bootstrap for locations, holidays and reservations
//!
//! Idempotent: every statement uses `IF NOT EXISTS`, so running it on each
//! startup is safe.

use sqlx::PgPool;

/// Create all tables and indexes. Tables are created parent-first so the
/// foreign keys resolve.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running travelctl migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id BIGSERIAL PRIMARY KEY,
            number VARCHAR(255) NOT NULL DEFAULT '',
            country VARCHAR(255) NOT NULL,
            city VARCHAR(255) NOT NULL,
            street VARCHAR(255) NOT NULL DEFAULT '',
            image_url VARCHAR(255) NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS holidays (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            start_date DATE NOT NULL,
            duration INT NOT NULL CHECK (duration > 0),
            free_slots INT NOT NULL CHECK (free_slots >= 0),
            price NUMERIC(10,2) NOT NULL CHECK (price >= 0),
            location_id BIGINT REFERENCES locations(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id BIGSERIAL PRIMARY KEY,
            phone_number VARCHAR(255) NOT NULL,
            contact_name VARCHAR(255) NOT NULL,
            holiday_id BIGINT NOT NULL REFERENCES holidays(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("travelctl migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_holidays_location ON holidays(location_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_holidays_start_date ON holidays(start_date)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_reservations_holiday ON reservations(holiday_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
