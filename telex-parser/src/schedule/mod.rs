//! Airline schedule telex parsing.
//!
//! Each airline prints its schedule as positional text lines. A
//! [`ScheduleTemplate`] says which token holds which field and where the
//! route begins; the route tokens are read into an ordered chain of
//! [`Waypoint`]s. Line parsing never fails, so a whole telex can be read
//! even when some lines are malformed.

mod fields;
mod line;
mod template;
mod waypoint;

pub use fields::{expand_flight_numbers, match_field};
pub use line::{CANCELLED, ScheduleLine, ScheduleParser, parse_with_template};
pub use template::{ScheduleField, ScheduleTemplate, TemplateTable, TemplateTableBuilder};
pub use waypoint::{Waypoint, WaypointError, extract_waypoint, parse_waypoints};
