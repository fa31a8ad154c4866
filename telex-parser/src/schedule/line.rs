//! Schedule line parsing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::{expand_flight_numbers, match_field};
use super::template::{ScheduleField, ScheduleTemplate, TemplateTable};
use super::waypoint::{Waypoint, parse_waypoints};
use crate::domain::{AirlineCode, DayStamp, ValidationError};

/// Marker an airline prints, as a token of its own, on a cancelled flight's line.
pub const CANCELLED: &str = "CNL";

/// One line of an airline schedule telex.
///
/// Parsing never fails: a line that cannot be read keeps its text in
/// `reference` and says why in `comment`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DayStamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flight_numbers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<Waypoint>,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ScheduleLine {
    fn annotated(reference: &str, comment: impl Into<String>) -> Self {
        Self {
            reference: reference.to_string(),
            comment: Some(comment.into()),
            ..Self::default()
        }
    }

    /// Check the line carries enough to publish: a flight number, a
    /// registration and at least two waypoints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.flight_numbers.is_empty() {
            return Err(ValidationError::IncompleteSchedule("flight number is required"));
        }
        if self.registration.is_none() {
            return Err(ValidationError::IncompleteSchedule("registration is required"));
        }
        if self.waypoints.len() < 2 {
            return Err(ValidationError::IncompleteSchedule(
                "at least two waypoints are required",
            ));
        }
        Ok(())
    }

    fn set(&mut self, field: ScheduleField, value: &str) {
        match field {
            ScheduleField::Index => self.index = Some(value.to_string()),
            ScheduleField::Date => match DayStamp::parse(value) {
                Ok(stamp) => self.date = Some(stamp),
                Err(e) => debug!(value, error = %e, "ignoring malformed date"),
            },
            ScheduleField::Task => self.task = Some(value.to_string()),
            ScheduleField::FlightNumber => self.flight_numbers = expand_flight_numbers(value),
            ScheduleField::Registration => self.registration = Some(value.to_string()),
        }
    }
}

/// Parses schedule telex lines using per-airline templates.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::AirlineCode;
/// use telex_parser::schedule::ScheduleParser;
///
/// let parser = ScheduleParser::builtin();
/// let hu = AirlineCode::parse("HU").unwrap();
/// let line = parser.parse_line("L05 W/Z HU7205 B5406 (9) TSN/2355(30OCT) PVG", hu);
///
/// assert_eq!(line.flight_numbers, ["HU7205"]);
/// assert_eq!(line.registration.as_deref(), Some("B5406"));
/// assert_eq!(line.waypoints.len(), 2);
/// assert_eq!(line.comment, None);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleParser {
    templates: TemplateTable,
}

impl ScheduleParser {
    pub fn new(templates: TemplateTable) -> Self {
        Self { templates }
    }

    /// A parser using [`TemplateTable::builtin`].
    pub fn builtin() -> Self {
        Self::new(TemplateTable::builtin())
    }

    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    /// Parse one line of `airline`'s schedule telex.
    pub fn parse_line(&self, line: &str, airline: AirlineCode) -> ScheduleLine {
        let reference = line.trim();
        if reference.split_whitespace().any(|token| token == CANCELLED) {
            return ScheduleLine::annotated(reference, "Cancelled");
        }

        match self.templates.find(airline) {
            Some(template) => parse_with_template(line, template),
            None => {
                debug!(%airline, "no schedule template");
                ScheduleLine::annotated(
                    reference,
                    format!("no definition found for airline {airline}"),
                )
            }
        }
    }

    /// Parse every non-blank line of a schedule telex.
    pub fn parse_telex(&self, text: &str, airline: AirlineCode) -> Vec<ScheduleLine> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line, airline))
            .collect()
    }
}

impl Default for ScheduleParser {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Parse a line against an explicit template.
///
/// Template fields whose token does not match are left empty.
pub fn parse_with_template(line: &str, template: &ScheduleTemplate) -> ScheduleLine {
    let reference = line.trim();
    let tokens: Vec<&str> = reference.split_whitespace().collect();

    if tokens.len() < template.min_tokens {
        debug!(
            tokens = tokens.len(),
            min_tokens = template.min_tokens,
            "schedule line too short"
        );
        return ScheduleLine::annotated(
            reference,
            format!(
                "too few tokens: expected at least {}, found {}",
                template.min_tokens,
                tokens.len()
            ),
        );
    }

    let mut schedule = ScheduleLine {
        reference: reference.to_string(),
        ..ScheduleLine::default()
    };

    for (&position, &field) in &template.fields {
        let Some(&token) = tokens.get(position) else {
            continue;
        };
        match match_field(field, token) {
            Some(value) => schedule.set(field, value),
            None => debug!(%field, position, token, "token does not match template field"),
        }
    }

    let route = tokens.get(template.waypoint_start..).unwrap_or_default();
    match parse_waypoints(route) {
        Ok(waypoints) => schedule.waypoints = waypoints,
        Err(e) => {
            debug!(error = %e, line = reference, "schedule line has no route");
            schedule.comment = Some("No waypoints found".to_string());
        }
    }

    schedule
}
