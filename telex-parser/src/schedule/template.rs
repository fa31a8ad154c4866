//! Per-airline positional templates for schedule lines.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AirlineCode, InvalidAirlineCode};
use ScheduleField::{Date, FlightNumber, Index, Registration, Task};

/// A field a template can place at a token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleField {
    Index,
    Date,
    Task,
    FlightNumber,
    Registration,
}

impl fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScheduleField::Index => "index",
            ScheduleField::Date => "date",
            ScheduleField::Task => "task",
            ScheduleField::FlightNumber => "flight number",
            ScheduleField::Registration => "registration",
        })
    }
}

/// Where each field sits in one airline's schedule lines.
///
/// `fields` maps a token position to the field expected there. Route tokens
/// start at `waypoint_start`; lines shorter than `min_tokens` are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTemplate {
    pub airlines: Vec<AirlineCode>,
    pub min_tokens: usize,
    pub waypoint_start: usize,
    pub fields: BTreeMap<usize, ScheduleField>,
}

impl ScheduleTemplate {
    pub fn covers(&self, airline: AirlineCode) -> bool {
        self.airlines.contains(&airline)
    }
}

/// Airline → schedule template lookup.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    templates: Vec<ScheduleTemplate>,
}

impl TemplateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Templates for the airlines whose schedule telexes are known.
    ///
    /// # Examples
    ///
    /// ```
    /// use telex_parser::domain::AirlineCode;
    /// use telex_parser::schedule::TemplateTable;
    ///
    /// let table = TemplateTable::builtin();
    /// let mf = table.find(AirlineCode::parse("MF").unwrap()).unwrap();
    /// assert_eq!(mf.waypoint_start, 4);
    /// assert!(table.find(AirlineCode::parse("XX").unwrap()).is_none());
    /// ```
    pub fn builtin() -> Self {
        let mut builder = TemplateTableBuilder::new();
        for (airline, min_tokens, waypoint_start, fields) in BUILTIN {
            builder = builder.add(
                [*airline],
                *min_tokens,
                *waypoint_start,
                fields.iter().copied(),
            );
        }
        builder.build().expect("built-in airline codes are valid")
    }

    pub fn push(&mut self, template: ScheduleTemplate) {
        self.templates.push(template);
    }

    /// The first template covering `airline`.
    pub fn find(&self, airline: AirlineCode) -> Option<&ScheduleTemplate> {
        self.templates.iter().find(|t| t.covers(airline))
    }

    pub fn templates(&self) -> &[ScheduleTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

type TemplateSource = (Vec<String>, usize, usize, BTreeMap<usize, ScheduleField>);

/// Builder for template tables.
///
/// Airline codes are checked when the table is built.
#[derive(Debug, Default)]
pub struct TemplateTableBuilder {
    sources: Vec<TemplateSource>,
}

impl TemplateTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template shared by `airlines`.
    pub fn add<A, F>(
        mut self,
        airlines: A,
        min_tokens: usize,
        waypoint_start: usize,
        fields: F,
    ) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        F: IntoIterator<Item = (usize, ScheduleField)>,
    {
        self.sources.push((
            airlines.into_iter().map(Into::into).collect(),
            min_tokens,
            waypoint_start,
            fields.into_iter().collect(),
        ));
        self
    }

    pub fn build(self) -> Result<TemplateTable, InvalidAirlineCode> {
        let mut table = TemplateTable::new();
        for (airlines, min_tokens, waypoint_start, fields) in self.sources {
            let airlines = airlines
                .iter()
                .map(|code| AirlineCode::parse(code))
                .collect::<Result<Vec<_>, _>>()?;
            table.push(ScheduleTemplate {
                airlines,
                min_tokens,
                waypoint_start,
                fields,
            });
        }
        Ok(table)
    }
}

/// Airline, minimum tokens, first route token, field positions.
const BUILTIN: &[(&str, usize, usize, &[(usize, ScheduleField)])] = &[
    // W/Z FM9134 B2688 1/1ILS (00) TSN0100 SHA
    ("FM", 6, 5, &[(0, Task), (1, FlightNumber), (2, Registration)]),
    // 01) MF8193 B5595 ILS(8) HGH1100 1305TSN
    ("MF", 5, 4, &[(0, Index), (1, FlightNumber), (2, Registration)]),
    // L1:  29OCT  BK2735 B2863  ILS  IS (3/6)  TSN2350(28OCT)   HAK
    ("8X", 9, 7, &[(0, Index), (1, Date), (2, FlightNumber), (3, Registration)]),
    // L05 W/Z HU7205 B5406 (9) TSN/2355(30OCT) PVG
    ("HU", 6, 5, &[(0, Index), (1, Task), (2, FlightNumber), (3, Registration)]),
    // 1)  JD5195 B6727 ILS I(9) SYX/0800 1135/TSN
    ("JD", 7, 5, &[(0, Index), (1, FlightNumber), (2, Registration)]),
    // 01 GS7635 B3193 XIY0020(16APR) CGD
    ("GS", 4, 3, &[(0, Index), (1, FlightNumber), (2, Registration)]),
    // 13 Y87444 B2578 ICN 0235 TSN
    ("Y8", 6, 3, &[(0, Index), (1, FlightNumber), (2, Registration)]),
    // 01)  31OCT 3U8863 B6598 CAT1 (10) CKG0010 0235TSN
    ("3U", 8, 6, &[(0, Index), (1, Date), (2, FlightNumber), (3, Registration)]),
    // 01)H/Z CK261 B2076 PVG1535(30OCT) 1705TPE
    ("CK", 4, 3, &[(0, Task), (1, FlightNumber), (2, Registration)]),
    // L01 W/Z G52665 B7762 (6) CKG/0725 CIH/0940 TSN
    ("G5", 8, 5, &[(0, Index), (1, Task), (2, FlightNumber), (3, Registration)]),
    // 31OCT W/Z 9C8884 B6573 ILS1/1 (06) TSN0650 SYX
    ("9C", 8, 6, &[(0, Date), (1, Task), (2, FlightNumber), (3, Registration)]),
    // 204) W/Z 31OCT ZH9783 B5670 CAT1 (10) SZX0045 0355TSN
    ("ZH", 9, 7, &[(0, Index), (1, Task), (2, Date), (3, FlightNumber), (4, Registration)]),
    // L59 W/Z 8L9976 B6959 TSN/0510 CTU/0855 KMG
    ("8L", 6, 4, &[(0, Index), (1, Task), (2, FlightNumber), (3, Registration)]),
    // (1) SC4717 B3080 CRJ7 ILS I (6) TAO/2350 TSN
    ("SC", 8, 7, &[(0, Index), (1, FlightNumber), (2, Registration)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> AirlineCode {
        AirlineCode::parse(s).unwrap()
    }

    #[test]
    fn builtin_covers_known_airlines() {
        let table = TemplateTable::builtin();
        assert_eq!(table.len(), 14);
        let airlines = [
            "FM", "MF", "8X", "HU", "JD", "GS", "Y8", "3U", "CK", "G5", "9C", "ZH", "8L", "SC",
        ];
        for airline in airlines {
            let template = table.find(code(airline)).unwrap();
            assert!(template.covers(code(airline)));
            assert!(template.waypoint_start < template.min_tokens, "{airline}");
            assert!(
                template.fields.values().any(|f| *f == ScheduleField::FlightNumber),
                "{airline}"
            );
        }
        assert!(table.find(code("XX")).is_none());
    }

    #[test]
    fn zh_field_positions() {
        let table = TemplateTable::builtin();
        let zh = table.find(code("ZH")).unwrap();
        assert_eq!(zh.min_tokens, 9);
        assert_eq!(zh.waypoint_start, 7);
        assert_eq!(zh.fields.get(&2), Some(&ScheduleField::Date));
        assert_eq!(zh.fields.get(&4), Some(&ScheduleField::Registration));
    }

    #[test]
    fn shared_template_and_first_match() {
        let table = TemplateTableBuilder::new()
            .add(["CA", "ZH"], 3, 2, [(0, ScheduleField::FlightNumber)])
            .add(["CA"], 9, 8, [(0, ScheduleField::Index)])
            .build()
            .unwrap();
        assert_eq!(table.find(code("ZH")).unwrap().min_tokens, 3);
        assert_eq!(table.find(code("CA")).unwrap().min_tokens, 3);
        assert_eq!(table.templates().len(), 2);
    }

    #[test]
    fn invalid_airline_rejected() {
        let err = TemplateTableBuilder::new()
            .add(["ca"], 3, 2, [(0, ScheduleField::Index)])
            .build()
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid airline code"));
    }

    #[test]
    fn field_names() {
        assert_eq!(
            serde_json::to_string(&ScheduleField::FlightNumber).unwrap(),
            "\"flight_number\""
        );
        assert_eq!(
            serde_json::from_str::<ScheduleField>("\"registration\"").unwrap(),
            ScheduleField::Registration
        );
        assert_eq!(ScheduleField::FlightNumber.to_string(), "flight number");
    }
}
