//! Typed telegram records.
//!
//! One struct per category, joined in the [`TelegramRecord`] sum type.
//! Required fields are plain strings and may be empty straight after
//! extraction; call [`TelegramRecord::validate`] to check them. Optional
//! fields are omitted from JSON when absent.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, ValidationError};

/// Return the first required field that is empty.
fn require(category: Category, fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(ValidationError::MissingField {
            category,
            field: *field,
        }),
        None => Ok(()),
    }
}

/// Arrival message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArrRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub departure_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    /// Filed destination, when the flight landed elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
}

impl ArrRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Arr,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("arrival_airport", self.arrival_airport.as_str()),
            ],
        )
    }
}

/// Departure message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub departure_airport: String,
    pub departure_time: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_elapsed_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
}

impl DepRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Dep,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("departure_time", self.departure_time.as_str()),
                ("destination", self.destination.as_str()),
            ],
        )
    }
}

/// Filed flight plan.
///
/// Item 18 ("other information") is split into its well-known indicators.
/// `other_info` recomposes the recognised indicators in a fixed order and
/// `supplementary_info` carries the remark; `item18` keeps the trailer as
/// received so nothing unrecognised is lost.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FplRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub flight_rules_and_type: String,
    pub aircraft_and_equipment: String,
    pub surveillance_equipment: String,
    pub departure_airport: String,
    pub departure_time: String,
    pub cruising_speed_and_level: String,
    pub route: String,
    pub destination_and_total_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplementary_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item18: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_elapsed_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selcal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reroute_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl FplRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Fpl,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("flight_rules_and_type", self.flight_rules_and_type.as_str()),
                ("aircraft_and_equipment", self.aircraft_and_equipment.as_str()),
                ("surveillance_equipment", self.surveillance_equipment.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("departure_time", self.departure_time.as_str()),
                ("cruising_speed_and_level", self.cruising_speed_and_level.as_str()),
                ("route", self.route.as_str()),
                ("destination_and_total_time", self.destination_and_total_time.as_str()),
            ],
        )
    }
}

/// Cancellation message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CnlRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub departure_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
}

impl CnlRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Cnl,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("arrival_airport", self.arrival_airport.as_str()),
            ],
        )
    }
}

/// Delay message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DlaRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub departure_airport: String,
    pub new_departure_time: String,
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_elapsed_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
}

impl DlaRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Dla,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("new_departure_time", self.new_departure_time.as_str()),
                ("arrival_airport", self.arrival_airport.as_str()),
            ],
        )
    }
}

/// Modification message.
///
/// Either carries item 22 amendments (`change_part`, with recognised items
/// lifted into the plan fields) or restates the whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChgRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub departure_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_rules_and_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_and_equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cruising_speed_and_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_and_total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_part: Option<String>,
}

impl ChgRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Chg,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("arrival_airport", self.arrival_airport.as_str()),
            ],
        )
    }
}

/// Current flight plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CplRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    pub flight_rules_and_type: String,
    pub aircraft_and_equipment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surveillance_equipment: Option<String>,
    pub departure_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    /// Item 14: boundary point, estimated time, and cleared level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_data: Option<String>,
    pub cruising_speed_and_level: String,
    pub route: String,
    pub destination_and_total_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
}

impl CplRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Cpl,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("flight_rules_and_type", self.flight_rules_and_type.as_str()),
                ("aircraft_and_equipment", self.aircraft_and_equipment.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("cruising_speed_and_level", self.cruising_speed_and_level.as_str()),
                ("route", self.route.as_str()),
                ("destination_and_total_time", self.destination_and_total_time.as_str()),
            ],
        )
    }
}

/// Alerting message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlnRecord {
    pub aircraft_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssr_mode_and_code: Option<String>,
    /// INCERFA, ALERFA, or DETRESFA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerting_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_text: Option<String>,
    pub flight_rules_and_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_and_equipment: Option<String>,
    pub departure_airport: String,
    pub departure_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cruising_speed_and_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub arrival_airport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_airport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
}

impl AlnRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(
            Category::Aln,
            &[
                ("aircraft_id", self.aircraft_id.as_str()),
                ("flight_rules_and_type", self.flight_rules_and_type.as_str()),
                ("departure_airport", self.departure_airport.as_str()),
                ("departure_time", self.departure_time.as_str()),
                ("arrival_airport", self.arrival_airport.as_str()),
            ],
        )
    }
}

/// A parsed telegram body, tagged by category.
///
/// Serialises with the category tag inline:
///
/// ```
/// use telex_parser::telegram::{ArrRecord, TelegramRecord};
///
/// let record = TelegramRecord::Arr(ArrRecord {
///     aircraft_id: "CCA1532".into(),
///     departure_airport: "ZSSS".into(),
///     arrival_airport: "ZBAA".into(),
///     ..ArrRecord::default()
/// });
/// let json = serde_json::to_string(&record).unwrap();
/// assert_eq!(
///     json,
///     r#"{"category":"ARR","aircraft_id":"CCA1532","departure_airport":"ZSSS","arrival_airport":"ZBAA"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum TelegramRecord {
    #[serde(rename = "ARR")]
    Arr(ArrRecord),
    #[serde(rename = "DEP")]
    Dep(DepRecord),
    #[serde(rename = "FPL")]
    Fpl(FplRecord),
    #[serde(rename = "CNL")]
    Cnl(CnlRecord),
    #[serde(rename = "DLA")]
    Dla(DlaRecord),
    #[serde(rename = "CHG")]
    Chg(ChgRecord),
    #[serde(rename = "CPL")]
    Cpl(CplRecord),
    #[serde(rename = "ALN")]
    Aln(AlnRecord),
}

impl TelegramRecord {
    pub fn category(&self) -> Category {
        match self {
            TelegramRecord::Arr(_) => Category::Arr,
            TelegramRecord::Dep(_) => Category::Dep,
            TelegramRecord::Fpl(_) => Category::Fpl,
            TelegramRecord::Cnl(_) => Category::Cnl,
            TelegramRecord::Dla(_) => Category::Dla,
            TelegramRecord::Chg(_) => Category::Chg,
            TelegramRecord::Cpl(_) => Category::Cpl,
            TelegramRecord::Aln(_) => Category::Aln,
        }
    }

    /// Aircraft identification, common to every category.
    pub fn aircraft_id(&self) -> &str {
        match self {
            TelegramRecord::Arr(r) => &r.aircraft_id,
            TelegramRecord::Dep(r) => &r.aircraft_id,
            TelegramRecord::Fpl(r) => &r.aircraft_id,
            TelegramRecord::Cnl(r) => &r.aircraft_id,
            TelegramRecord::Dla(r) => &r.aircraft_id,
            TelegramRecord::Chg(r) => &r.aircraft_id,
            TelegramRecord::Cpl(r) => &r.aircraft_id,
            TelegramRecord::Aln(r) => &r.aircraft_id,
        }
    }

    /// Check every field the category requires is non-empty.
    ///
    /// The error names the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            TelegramRecord::Arr(r) => r.validate(),
            TelegramRecord::Dep(r) => r.validate(),
            TelegramRecord::Fpl(r) => r.validate(),
            TelegramRecord::Cnl(r) => r.validate(),
            TelegramRecord::Dla(r) => r.validate(),
            TelegramRecord::Chg(r) => r.validate(),
            TelegramRecord::Cpl(r) => r.validate(),
            TelegramRecord::Aln(r) => r.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr() -> ArrRecord {
        ArrRecord {
            aircraft_id: "AB123".into(),
            ssr_mode_and_code: Some("SSR1234".into()),
            departure_airport: "KJFK".into(),
            arrival_airport: "KLAX".into(),
            ..ArrRecord::default()
        }
    }

    #[test]
    fn valid_record_passes() {
        assert_eq!(TelegramRecord::Arr(arr()).validate(), Ok(()));
    }

    #[test]
    fn first_missing_field_is_named() {
        let record = TelegramRecord::Dep(DepRecord {
            aircraft_id: "AB123".into(),
            departure_airport: "KJFK".into(),
            ..DepRecord::default()
        });
        let err = record.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                category: Category::Dep,
                field: "departure_time"
            }
        );
        assert_eq!(err.to_string(), "DEP: departure_time is required");
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut record = arr();
        record.arrival_airport = "  ".into();
        assert_eq!(
            record.validate(),
            Err(ValidationError::MissingField {
                category: Category::Arr,
                field: "arrival_airport"
            })
        );
    }

    #[test]
    fn default_records_fail_on_aircraft_id() {
        let defaults = [
            TelegramRecord::Arr(ArrRecord::default()),
            TelegramRecord::Dep(DepRecord::default()),
            TelegramRecord::Fpl(FplRecord::default()),
            TelegramRecord::Cnl(CnlRecord::default()),
            TelegramRecord::Dla(DlaRecord::default()),
            TelegramRecord::Chg(ChgRecord::default()),
            TelegramRecord::Cpl(CplRecord::default()),
            TelegramRecord::Aln(AlnRecord::default()),
        ];
        for record in defaults {
            let category = record.category();
            assert_eq!(
                record.validate(),
                Err(ValidationError::MissingField {
                    category,
                    field: "aircraft_id"
                })
            );
        }
    }

    #[test]
    fn dla_requires_new_departure_time() {
        let record = DlaRecord {
            aircraft_id: "CCA7890".into(),
            departure_airport: "ZBTJ".into(),
            arrival_airport: "ZGGG".into(),
            ..DlaRecord::default()
        };
        assert_eq!(
            record.validate().unwrap_err().to_string(),
            "DLA: new_departure_time is required"
        );
    }

    #[test]
    fn json_tag_and_omitted_options() {
        let json = serde_json::to_value(TelegramRecord::Arr(arr())).unwrap();
        assert_eq!(json["category"], "ARR");
        assert_eq!(json["ssr_mode_and_code"], "SSR1234");
        assert!(json.get("arrival_time").is_none());
    }

    #[test]
    fn deserialize_missing_options() {
        let json = r#"{"category":"CNL","aircraft_id":"CCA1532","departure_airport":"ZSSS","arrival_airport":"ZBAA"}"#;
        let record: TelegramRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category(), Category::Cnl);
        assert_eq!(record.aircraft_id(), "CCA1532");
        match record {
            TelegramRecord::Cnl(cnl) => assert_eq!(cnl.other_info, None),
            other => panic!("unexpected record: {other:?}"),
        }
    }
}
