//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod price;
pub mod location;
pub mod holiday;
pub mod reservation;

pub use validation::ValidationError;
pub use price::Price;
pub use location::LocationFields;
pub use holiday::{parse_date, HolidayFields, HolidayFilter, DATE_FORMAT};
pub use reservation::{PhoneNumber, ReservationFields};
