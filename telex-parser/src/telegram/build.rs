//! Field map → typed record.
//!
//! A pure mapping per category. Composite fields are assembled here:
//! destination plus total elapsed time, speed plus level, and the split of
//! FPL item 18 and CHG item 22 into their sub-fields.

use std::sync::LazyLock;

use regex::Regex;

use super::body::FieldMap;
use super::record::{
    AlnRecord, ArrRecord, ChgRecord, CnlRecord, CplRecord, DepRecord, DlaRecord, FplRecord,
    TelegramRecord,
};
use crate::domain::Category;

static PBN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPBN/(?P<pbn>[A-Z0-9]+)").expect("valid regex"));
static NAV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNAV/(?P<nav>\w+)").expect("valid regex"));
static REG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bREG/(?P<reg>[A-Z0-9]+)").expect("valid regex"));
static EET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bEET/(?P<eet>(?:[A-Z]{4}\d{4}\s*)+)").expect("valid regex")
});
static SEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bSEL/(?P<sel>\w+)").expect("valid regex"));
static PER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPER/(?P<per>[A-Z])").expect("valid regex"));
static RIF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\bRIF/(?P<rif>.*?)(?:\s+[A-Z]{3,4}/|$)").expect("valid regex")
});
static RMK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\bRMK/(?P<remark>.*)").expect("valid regex"));

/// Start of an item 22 amendment: "<item number>/".
static AMENDMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|-)\s*(?P<item>\d{1,2})/").expect("valid regex"));

/// Collapse runs of whitespace, including line breaks, to single spaces.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply a single-group pattern to `text`.
fn capture(re: &Regex, text: &str, group: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.name(group).map(|m| collapse(m.as_str())))
        .filter(|v| !v.is_empty())
}

/// Concatenate two fields; the first must be present.
fn joined(fields: &FieldMap, head: &str, tail: &str) -> Option<String> {
    fields
        .get(head)
        .map(|h| format!("{h}{}", fields.get(tail).unwrap_or_default()))
}

fn collapsed(fields: &FieldMap, name: &str) -> Option<String> {
    fields.get(name).map(collapse).filter(|v| !v.is_empty())
}

/// The sub-fields of FPL item 18.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtherInformation {
    pub pbn: Option<String>,
    pub nav: Option<String>,
    pub reg: Option<String>,
    pub eet: Option<String>,
    pub sel: Option<String>,
    pub per: Option<String>,
    pub rif: Option<String>,
    pub remark: Option<String>,
}

impl OtherInformation {
    /// Pull the recognised indicators out of an item 18 trailer.
    ///
    /// Each indicator is matched independently; absent ones stay `None`.
    pub fn parse(text: &str) -> Self {
        Self {
            pbn: capture(&PBN, text, "pbn"),
            nav: capture(&NAV, text, "nav"),
            reg: capture(&REG, text, "reg"),
            eet: capture(&EET, text, "eet"),
            sel: capture(&SEL, text, "sel"),
            per: capture(&PER, text, "per"),
            rif: capture(&RIF, text, "rif"),
            remark: capture(&RMK, text, "remark"),
        }
    }

    /// The recognised indicators other than the remark, space-joined in
    /// PBN, NAV, REG, EET, SEL, PER, RIF order.
    pub fn compose(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("PBN", &self.pbn),
            ("NAV", &self.nav),
            ("REG", &self.reg),
            ("EET", &self.eet),
            ("SEL", &self.sel),
            ("PER", &self.per),
            ("RIF", &self.rif),
        ]
        .into_iter()
        .filter_map(|(tag, value)| value.as_ref().map(|v| format!("{tag}/{v}")))
        .collect();

        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// The remark as an item 18 indicator.
    pub fn supplementary(&self) -> Option<String> {
        self.remark.as_ref().map(|r| format!("RMK/{r}"))
    }
}

/// The recognised items of a CHG item 22 amendment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Amendments {
    flight_rules: Option<String>,
    aircraft: Option<String>,
    speed_and_level: Option<String>,
    route: Option<String>,
    destination: Option<String>,
    alternates: Option<String>,
    other: Option<String>,
}

impl Amendments {
    fn parse(block: &str) -> Self {
        let starts: Vec<(usize, usize, &str)> = AMENDMENT
            .captures_iter(block)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let item = caps.name("item")?;
                Some((whole.start(), whole.end(), item.as_str()))
            })
            .collect();

        let mut out = Amendments::default();
        for (i, (_, value_start, item)) in starts.iter().enumerate() {
            let value_end = starts.get(i + 1).map_or(block.len(), |next| next.0);
            let value = collapse(&block[*value_start..value_end]);
            if value.is_empty() {
                continue;
            }
            match item.trim_start_matches('0') {
                "8" => out.flight_rules = Some(value),
                "9" => out.aircraft = Some(value),
                "15" => {
                    let (head, rest) = value.split_once(' ').unwrap_or((value.as_str(), ""));
                    out.speed_and_level = Some(head.to_string());
                    out.route = (!rest.is_empty()).then(|| rest.to_string());
                }
                "16" => {
                    let (head, rest) = value.split_once(' ').unwrap_or((value.as_str(), ""));
                    out.destination = Some(head.to_string());
                    out.alternates = (!rest.is_empty()).then(|| rest.to_string());
                }
                "18" => out.other = Some(value),
                _ => {}
            }
        }
        out
    }
}

/// Build the record for `category` from an extracted field map.
///
/// Missing required fields become empty strings; nothing is validated here.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::Category;
/// use telex_parser::telegram::{FieldMap, TelegramRecord, build_record};
///
/// let mut fields = FieldMap::new();
/// fields.insert("number", "AB123");
/// fields.insert("dep", "KJFK");
/// fields.insert("dep_time", "1500");
/// fields.insert("dest", "KLAX");
///
/// match build_record(Category::Dep, &fields) {
///     TelegramRecord::Dep(dep) => {
///         assert_eq!(dep.departure_time, "1500");
///         assert_eq!(dep.destination, "KLAX");
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn build_record(category: Category, fields: &FieldMap) -> TelegramRecord {
    match category {
        Category::Arr => TelegramRecord::Arr(ArrRecord {
            aircraft_id: fields.text_or_empty("number"),
            ssr_mode_and_code: fields.text("ssr"),
            departure_airport: fields.text_or_empty("dep"),
            departure_time: fields.text("dep_time"),
            arrival_airport: fields.text_or_empty("arr"),
            arrival_time: fields.text("arr_time"),
            planned_destination: fields.text("dest"),
            other_info: collapsed(fields, "other"),
        }),
        Category::Dep => TelegramRecord::Dep(DepRecord {
            aircraft_id: fields.text_or_empty("number"),
            ssr_mode_and_code: fields.text("ssr"),
            departure_airport: fields.text_or_empty("dep"),
            departure_time: fields.text_or_empty("dep_time"),
            destination: fields.text_or_empty("dest"),
            estimated_elapsed_time: fields.text("estt"),
            alternate_airport: collapsed(fields, "alter"),
            other_info: collapsed(fields, "other"),
        }),
        Category::Fpl => TelegramRecord::Fpl(build_fpl(fields)),
        Category::Cnl => TelegramRecord::Cnl(CnlRecord {
            aircraft_id: fields.text_or_empty("number"),
            ssr_mode_and_code: fields.text("ssr"),
            departure_airport: fields.text_or_empty("dep"),
            departure_time: fields.text("dep_time"),
            arrival_airport: fields.text_or_empty("arr"),
            other_info: collapsed(fields, "other"),
        }),
        Category::Dla => TelegramRecord::Dla(DlaRecord {
            aircraft_id: fields.text_or_empty("number"),
            ssr_mode_and_code: fields.text("ssr"),
            departure_airport: fields.text_or_empty("dep"),
            new_departure_time: fields.text_or_empty("dep_time"),
            arrival_airport: fields.text_or_empty("arr"),
            estimated_elapsed_time: fields.text("estt"),
            alternate_airport: collapsed(fields, "alter"),
            other_info: collapsed(fields, "other"),
        }),
        Category::Chg => TelegramRecord::Chg(build_chg(fields)),
        Category::Cpl => TelegramRecord::Cpl(CplRecord {
            aircraft_id: fields.text_or_empty("number"),
            ssr_mode_and_code: fields.text("ssr"),
            flight_rules_and_type: fields.text_or_empty("indicator"),
            aircraft_and_equipment: fields.text_or_empty("aircraft"),
            surveillance_equipment: fields.text("surve"),
            departure_airport: fields.text_or_empty("dep"),
            departure_time: fields.text("dep_time"),
            estimate_data: fields.text("estimate"),
            cruising_speed_and_level: joined(fields, "speed", "level").unwrap_or_default(),
            route: collapsed(fields, "route").unwrap_or_default(),
            destination_and_total_time: joined(fields, "dest", "estt").unwrap_or_default(),
            alternate_airport: collapsed(fields, "alter"),
            other_info: collapsed(fields, "other"),
        }),
        Category::Aln => TelegramRecord::Aln(AlnRecord {
            aircraft_id: fields.text_or_empty("number"),
            ssr_mode_and_code: fields.text("ssr"),
            emergency_phase: fields.text("phase"),
            alerting_unit: fields.text("unit"),
            alert_text: collapsed(fields, "alert_text"),
            flight_rules_and_type: fields.text_or_empty("indicator"),
            aircraft_and_equipment: fields.text("aircraft"),
            departure_airport: fields.text_or_empty("dep"),
            departure_time: fields.text_or_empty("dep_time"),
            cruising_speed_and_level: joined(fields, "speed", "level"),
            route: collapsed(fields, "route"),
            arrival_airport: fields.text_or_empty("arr"),
            arrival_time: fields.text("arr_time"),
            alternate_airport: collapsed(fields, "alter"),
            other_info: collapsed(fields, "other"),
        }),
    }
}

fn build_fpl(fields: &FieldMap) -> FplRecord {
    let item18 = collapsed(fields, "other");
    let info = item18
        .as_deref()
        .map(OtherInformation::parse)
        .unwrap_or_default();

    FplRecord {
        aircraft_id: fields.text_or_empty("number"),
        ssr_mode_and_code: fields.text("ssr"),
        flight_rules_and_type: fields.text_or_empty("indicator"),
        aircraft_and_equipment: fields.text_or_empty("aircraft"),
        surveillance_equipment: fields.text_or_empty("surve"),
        departure_airport: fields.text_or_empty("dep"),
        departure_time: fields.text_or_empty("dep_time"),
        cruising_speed_and_level: joined(fields, "speed", "level").unwrap_or_default(),
        route: collapsed(fields, "route").unwrap_or_default(),
        destination_and_total_time: joined(fields, "dest", "estt").unwrap_or_default(),
        alternate_airport: collapsed(fields, "alter"),
        other_info: info.compose(),
        supplementary_info: info.supplementary(),
        item18,
        pbn: info.pbn,
        navigation_equipment: info.nav,
        registration: info.reg,
        estimated_elapsed_time: info.eet,
        selcal_code: info.sel,
        performance_category: info.per,
        reroute_information: info.rif,
        remarks: info.remark,
    }
}

fn build_chg(fields: &FieldMap) -> ChgRecord {
    let change_part = collapsed(fields, "change");
    let amended = change_part
        .as_deref()
        .map(Amendments::parse)
        .unwrap_or_default();

    let filed_destination = fields
        .get("estt")
        .and_then(|_| joined(fields, "arr", "estt"));

    ChgRecord {
        aircraft_id: fields.text_or_empty("number"),
        ssr_mode_and_code: fields.text("ssr"),
        departure_airport: fields.text_or_empty("dep"),
        departure_time: fields.text("dep_time"),
        arrival_airport: fields.text_or_empty("arr"),
        flight_rules_and_type: amended.flight_rules.or_else(|| fields.text("indicator")),
        aircraft_and_equipment: amended.aircraft.or_else(|| fields.text("aircraft")),
        cruising_speed_and_level: amended
            .speed_and_level
            .or_else(|| joined(fields, "speed", "level")),
        route: amended.route.or_else(|| collapsed(fields, "route")),
        destination_and_total_time: amended.destination.or(filed_destination),
        alternate_airport: amended.alternates.or_else(|| collapsed(fields, "alter")),
        other_info: amended.other.or_else(|| collapsed(fields, "other")),
        change_part,
    }
}
