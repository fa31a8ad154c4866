//! Domain types for telegram and schedule parsing.
//!
//! These types enforce their invariants at construction time, so code that
//! receives them can trust their validity. Free-text telegram fields stay as
//! strings; only tokens with a fixed shape get a dedicated type.

mod airline;
mod airport;
mod category;
mod error;
mod time;

pub use airline::{AirlineCode, InvalidAirlineCode};
pub use airport::{AirportCode, InvalidAirportCode};
pub use category::{Category, InvalidCategory};
pub use error::ValidationError;
pub use time::{DayStamp, ScheduleTime, TimeError};
