//! Domain error types.
//!
//! These errors describe records that were built successfully but do not
//! carry everything their category requires. They are only produced when a
//! caller explicitly validates a record.

use super::Category;

/// Validation failures for built records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field the category requires is empty
    #[error("{category}: {field} is required")]
    MissingField {
        category: Category,
        field: &'static str,
    },

    /// A schedule line lacks data needed to publish it
    #[error("schedule line: {0}")]
    IncompleteSchedule(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::MissingField {
            category: Category::Arr,
            field: "aircraft_id",
        };
        assert_eq!(err.to_string(), "ARR: aircraft_id is required");

        let err = ValidationError::IncompleteSchedule("registration is required");
        assert_eq!(err.to_string(), "schedule line: registration is required");
    }
}
