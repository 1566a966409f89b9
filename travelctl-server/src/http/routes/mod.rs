//! Route handlers organized by resource
//!
//! Each module owns its wire shapes (request and response DTOs) and the
//! translation to and from validated models and repository records.

pub mod health;
pub mod locations;
pub mod holidays;
pub mod reservations;
