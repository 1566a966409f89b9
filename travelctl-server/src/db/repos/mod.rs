//! Repository implementations for database access
//!
//! Each repository owns one table and follows these patterns:
//! - One `tokio::sync::Mutex` per repository instance serializes its operations
//! - Related rows are resolved by calling the owning repository, never by
//!   cross-table queries (Holiday -> Location, Reservation -> Holiday)
//! - Every statement is independent; no transaction spans repositories
//!
//! The per-repository lock does not give cross-repository atomicity: a
//! holiday delete can race a reservation create for the same holiday.

pub mod locations;
pub mod holidays;
pub mod reservations;

pub use locations::{Location, LocationRepo};
pub use holidays::{Holiday, HolidayRepo, HolidaySummary};
pub use reservations::{Reservation, ReservationRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// A write referenced a parent row that does not exist
    #[error("associated {resource} not found: {resource} with ID {id} not found")]
    MissingReference { resource: &'static str, id: i64 },

    /// A stored row points at a parent that no longer exists
    #[error("{owner} with ID {owner_id} references missing {resource} with ID {id}")]
    BrokenReference {
        owner: &'static str,
        owner_id: i64,
        resource: &'static str,
        id: i64,
    },

    /// Delete rejected because other rows still reference the target
    #[error("{resource} with ID {id} is still referenced by {dependents}")]
    Conflict {
        resource: &'static str,
        id: i64,
        dependents: &'static str,
    },
}

impl DbError {
    /// Turn a parent lookup miss into a referential violation for a write.
    pub(crate) fn into_missing_reference(self) -> Self {
        match self {
            Self::NotFound { resource, id } => Self::MissingReference { resource, id },
            other => other,
        }
    }

    /// Turn a parent lookup miss into a resolution failure for a read.
    pub(crate) fn into_broken_reference(self, owner: &'static str, owner_id: i64) -> Self {
        match self {
            Self::NotFound { resource, id } => Self::BrokenReference {
                owner,
                owner_id,
                resource,
                id,
            },
            other => other,
        }
    }
}

/// True when the database rejected a statement because of a foreign key.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
