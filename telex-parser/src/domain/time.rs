//! Schedule times.
//!
//! Schedule telex lines print times as four digits ("HHMM"), optionally
//! followed by a bracketed day stamp when the time falls on a different day
//! from the line's own date, e.g. "2350(28OCT)". No time-zone handling is
//! done here; times are kept exactly as printed.

use chrono::{Month, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid schedule time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A day-of-month and month pair printed as "DDMON", e.g. "28OCT".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayStamp {
    day: u32,
    month: Month,
}

impl DayStamp {
    /// Parse a "DDMON" stamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use telex_parser::domain::DayStamp;
    /// use chrono::Month;
    ///
    /// let stamp = DayStamp::parse("28OCT").unwrap();
    /// assert_eq!(stamp.day(), 28);
    /// assert_eq!(stamp.month(), Month::October);
    /// assert!(DayStamp::parse("32OCT").is_err());
    /// assert!(DayStamp::parse("28XYZ").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 {
            return Err(TimeError::new("expected DDMON format"));
        }

        let day = parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid day digits"))?;
        if !(1..=31).contains(&day) {
            return Err(TimeError::new("day must be 1-31"));
        }

        let month_str = &s[2..5];
        if !month_str.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(TimeError::new("month must be uppercase letters"));
        }
        let month = month_str
            .parse::<Month>()
            .map_err(|_| TimeError::new("unknown month abbreviation"))?;

        Ok(Self { day, month })
    }

    /// Day of month (1-31).
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }
}

impl TryFrom<String> for DayStamp {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DayStamp> for String {
    fn from(stamp: DayStamp) -> Self {
        stamp.to_string()
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.month.name();
        write!(f, "{:02}{}", self.day, name[..3].to_ascii_uppercase())
    }
}

/// A time of day from a schedule line, with an optional day stamp.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("2350(28OCT)").unwrap();
/// assert_eq!(t.to_string(), "2350(28OCT)");
/// assert_eq!(t.hour(), 23);
/// assert!(t.day_stamp().is_some());
///
/// let plain = ScheduleTime::parse("0100").unwrap();
/// assert_eq!(plain.to_string(), "0100");
/// assert!(plain.day_stamp().is_none());
///
/// assert!(ScheduleTime::parse("01:00").is_err());
/// assert!(ScheduleTime::parse("2460").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleTime {
    time: NaiveTime,
    day: Option<DayStamp>,
}

impl ScheduleTime {
    /// Create a time with no day stamp.
    pub fn new(time: NaiveTime) -> Self {
        Self { time, day: None }
    }

    /// Parse "HHMM" or "HHMM(DDMON)".
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hhmm, day) = match s.find('(') {
            Some(open) => {
                let stamp = s[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| TimeError::new("unterminated day stamp"))?;
                (&s[..open], Some(DayStamp::parse(stamp)?))
            }
            None => (s, None),
        };

        let bytes = hhmm.as_bytes();
        if bytes.len() != 4 {
            return Err(TimeError::new("expected HHMM format"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[2..4])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { time, day })
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// The day stamp, if the time was printed with one.
    pub fn day_stamp(&self) -> Option<DayStamp> {
        self.day
    }
}

impl TryFrom<String> for ScheduleTime {
    type Error = TimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ScheduleTime> for String {
    fn from(t: ScheduleTime) -> Self {
        t.to_string()
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({})", self)
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour(), self.minute())?;
        if let Some(day) = self.day {
            write!(f, "({day})")?;
        }
        Ok(())
    }
}

/// Parse exactly two ASCII digits into a number.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_time() {
        let t = ScheduleTime::parse("1305").unwrap();
        assert_eq!(t.hour(), 13);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.day_stamp(), None);
    }

    #[test]
    fn parse_time_with_day_stamp() {
        let t = ScheduleTime::parse("0020(16APR)").unwrap();
        let stamp = t.day_stamp().unwrap();
        assert_eq!(stamp.day(), 16);
        assert_eq!(stamp.month(), Month::April);
        assert_eq!(t.to_string(), "0020(16APR)");
    }

    #[test]
    fn reject_bad_times() {
        assert!(ScheduleTime::parse("").is_err());
        assert!(ScheduleTime::parse("130").is_err());
        assert!(ScheduleTime::parse("13050").is_err());
        assert!(ScheduleTime::parse("2400").is_err());
        assert!(ScheduleTime::parse("1260").is_err());
        assert!(ScheduleTime::parse("12a0").is_err());
    }

    #[test]
    fn reject_bad_day_stamps() {
        assert!(ScheduleTime::parse("1200(16APR").is_err());
        assert!(ScheduleTime::parse("1200(00APR)").is_err());
        assert!(ScheduleTime::parse("1200(16apr)").is_err());
        assert!(ScheduleTime::parse("1200(16ABC)").is_err());
        assert!(ScheduleTime::parse("1200()").is_err());
    }

    #[test]
    fn error_display() {
        let err = ScheduleTime::parse("2500").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour must be 0-23");
    }

    #[test]
    fn debug() {
        let t = ScheduleTime::parse("0845").unwrap();
        assert_eq!(format!("{:?}", t), "ScheduleTime(0845)");
    }

    #[test]
    fn serde_as_string() {
        let t = ScheduleTime::parse("2355(30OCT)").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2355(30OCT)\"");
        assert_eq!(serde_json::from_str::<ScheduleTime>(&json).unwrap(), t);
    }

    #[test]
    fn month_abbreviations_display_uppercase() {
        for (s, month) in [("01JAN", Month::January), ("15SEP", Month::September), ("31DEC", Month::December)] {
            let stamp = DayStamp::parse(s).unwrap();
            assert_eq!(stamp.month(), month);
            assert_eq!(stamp.to_string(), s);
        }
    }
}
