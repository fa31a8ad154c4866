//! Built-in AFTN body grammars.
//!
//! Every grammar anchors on the bracketed category prefix and the closing
//! parenthesis. Fields are separated by a hyphen that may be preceded by a
//! line break. Grammars whose free-text parts can span lines are compiled
//! with `(?s)`.
//!
//! Capture names are shared across categories so the record builder can
//! treat them uniformly: `number` (aircraft id), `ssr`, `indicator` (flight
//! rules and type), `aircraft`, `surve`, `dep`/`dep_time`, `speed`/`level`,
//! `route`, `dest`/`estt`, `alter`, `arr`/`arr_time`, `other`.
//!
//! An SSR code is any alphanumeric token that does not open with four
//! letters; that shape is an aerodrome, possibly with a time attached.

use super::PatternTableBuilder;
use crate::domain::Category;

const ARR_PLAIN: &str = r"^\((?P<category>ARR)-(?P<number>[A-Z0-9]+)(?:[/-](?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})?\s*-(?P<arr>[A-Z]{4})(?P<arr_time>\d{4})?\s*\)$";

const ARR_DIVERTED: &str = r"^\((?P<category>ARR)-(?P<number>[A-Z0-9]+)(?:[/-](?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})?\s*-(?P<dest>[A-Z]{4})(?P<estt>\d{4})?(?:\s+[A-Z]{4}){0,2}\s*-(?P<arr>[A-Z]{4})(?P<arr_time>\d{4})?(?:\s+(?P<other>[^)]*?))?\s*\)$";

const DEP_TIMED: &str = r"(?s)^\((?P<category>DEP)-(?P<number>[A-Z0-9]+)(?:[/-](?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})(?:\s*-)?(?P<dep_time>\d{4})\s*-(?P<dest>[A-Z]{4})(?P<estt>\d{4})?(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

const DEP_UNTIMED: &str = r"(?s)^\((?P<category>DEP)-(?P<number>[A-Z0-9]+)(?:[/-](?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})\s*-(?P<dest>[A-Z]{4})(?P<estt>\d{4})?(?:\s*-(?P<other>.*?))?\s*\)$";

const FPL_FULL: &str = r"(?s)^\((?P<category>FPL)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<indicator>[A-Z]{1,2})\s*-(?P<aircraft>(?:\d{1,2})?[A-Z][A-Z0-9]{1,3}/[LMHJ])\s*-(?P<surve>[A-Z0-9/]+)\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})\s*-(?P<speed>[KNM]\d{3,4})(?P<level>[FSAM]\d{3,4}|VFR)\s+(?P<route>.*?)\s*-(?P<dest>[A-Z]{4})(?P<estt>\d{4})(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

const FPL_LOOSE: &str = r"(?s)^\((?P<category>FPL)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<indicator>[A-Z]{1,2})\s*-(?P<aircraft>[A-Z0-9]+(?:/[A-Z])?)\s*-(?P<surve>[^-]*?)\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})\s*-(?P<speed>[A-Z]\d{3,4})(?P<level>[A-Z0-9]+)\s+(?P<route>.*?)\s*-(?P<dest>[A-Z]{4})(?P<estt>\d{4})(?P<alter>(?:\s+[A-Z]{4})*)(?:\s*-(?P<other>.*?))?\s*\)$";

const CNL_FULL: &str = r"(?s)^\((?P<category>CNL)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})?\s*-(?P<arr>[A-Z]{4})(?P<estt>\d{4})?(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

const CNL_LOOSE: &str = r"^\((?P<category>CNL)-(?P<number>[A-Z0-9]+)-?(?P<dep>[A-Z]{4})?-?(?P<arr>[A-Z]{4})\)$";

const DLA_FULL: &str = r"(?s)^\((?P<category>DLA)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})\s*-(?P<arr>[A-Z]{4})(?P<estt>\d{4})?(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

const DLA_LOOSE: &str = r"^\((?P<category>DLA)-(?P<number>[A-Z0-9]+)-?(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})?-?(?P<arr>[A-Z]{4})(?P<estt>\d{4})?\)$";

const CHG_AMENDMENT: &str = r"(?s)^\((?P<category>CHG)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})?\s*-(?P<arr>[A-Z]{4})(?P<estt>\d{4})?(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>0|[A-Z]{3,4}/.*?))?\s*-(?P<change>\d{1,2}/.*?)\s*\)$";

const CHG_RESTATED: &str = r"(?s)^\((?P<category>CHG)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<indicator>[A-Z]{1,2})\s*-(?P<aircraft>(?:\d{1,2})?[A-Z][A-Z0-9]{1,3}/[LMHJ])\s*-(?P<surve>[A-Z0-9/]+)\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})\s*-(?P<speed>[KNM]\d{3,4})(?P<level>[FSAM]\d{3,4}|VFR)\s+(?P<route>.*?)\s*-(?P<arr>[A-Z]{4})(?P<estt>\d{4})(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

const CPL_FULL: &str = r"(?s)^\((?P<category>CPL)-(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<indicator>[A-Z]{1,2})\s*-(?P<aircraft>(?:\d{1,2})?[A-Z][A-Z0-9]{1,3}/[LMHJ])\s*-(?P<surve>[A-Z0-9/]+)\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})?(?:\s*-(?P<estimate>[A-Z0-9]{2,11}/\d{4}[FSAM]\d{3,4}[A-Z0-9]*))?\s*-(?P<speed>[KNM]\d{3,4})(?P<level>[FSAM]\d{3,4}|VFR)\s+(?P<route>.*?)\s*-(?P<dest>[A-Z]{4})(?P<estt>\d{4})(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

const ALN_FULL: &str = r"(?s)^\((?P<category>ALN)-(?:(?P<phase>INCERFA|ALERFA|DETRESFA)/(?P<unit>[A-Z]{4,8})(?:/(?P<alert_text>[^-]*?))?\s*-)?(?P<number>[A-Z0-9]+)(?:/(?P<ssr>[A-Z]{0,3}\d[A-Z0-9]*|[A-Z]{1,3}))?\s*-(?P<indicator>[A-Z]{1,2})(?:\s*-(?P<aircraft>(?:\d{1,2})?[A-Z][A-Z0-9]{1,3}/[LMHJ])\s*-(?P<surve>[A-Z0-9/]+))?\s*-(?P<dep>[A-Z]{4})(?P<dep_time>\d{4})(?:\s*-(?P<speed>[KNM]\d{3,4})(?P<level>[FSAM]\d{3,4}|VFR)\s+(?P<route>.*?))?\s*-(?P<arr>[A-Z]{4})(?P<arr_time>\d{4})?(?P<alter>(?:\s+[A-Z]{4}){0,2})(?:\s*-(?P<other>.*?))?\s*\)$";

/// Builder pre-loaded with the built-in grammar set.
pub(super) fn builder() -> PatternTableBuilder {
    PatternTableBuilder::new()
        .add(Category::Arr, ARR_PLAIN, "arrival: id, optional SSR, departure and arrival aerodromes")
        .add(Category::Arr, ARR_DIVERTED, "arrival at an aerodrome other than the planned destination")
        .add(Category::Dep, DEP_TIMED, "departure with actual departure time")
        .add(Category::Dep, DEP_UNTIMED, "departure without departure time")
        .add(Category::Fpl, FPL_FULL, "filed flight plan, items 7 to 18")
        .add(Category::Fpl, FPL_LOOSE, "filed flight plan with loose equipment and level fields")
        .add(Category::Cnl, CNL_FULL, "cancellation with optional times and item 18")
        .add(Category::Cnl, CNL_LOOSE, "cancellation with optional separators")
        .add(Category::Dla, DLA_FULL, "delay with new departure time")
        .add(Category::Dla, DLA_LOOSE, "delay with optional separators")
        .add(Category::Chg, CHG_AMENDMENT, "modification with item 22 amendments")
        .add(Category::Chg, CHG_RESTATED, "modification restating the whole plan")
        .add(Category::Cpl, CPL_FULL, "current flight plan with optional estimate data")
        .add(Category::Aln, ALN_FULL, "alerting with optional emergency phase")
}
