use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minute-precision wall-clock time within a single day.
///
/// Parsed from "HH:mm" or "HH:mm:ss" strings; seconds are truncated so that
/// every value is normalized to minute precision before comparison. Carries
/// no date and no timezone. Ordering is numeric on minutes since midnight,
/// which matches lexicographic ordering of the zero-padded "HH:mm" form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

const MINUTES_PER_DAY: u16 = 24 * 60;

impl TimeOfDay {
    /// Create from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    /// Create from raw minutes since midnight (0-1439).
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Signed distance from `self` to `other` in fractional hours.
    /// Negative when `other` is earlier than `self`.
    pub fn hours_until(&self, other: TimeOfDay) -> qtty::Hours {
        qtty::Hours::new((other.0 as f64 - self.0 as f64) / 60.0)
    }

    /// Advance by a number of minutes, or `None` past the end of the day.
    pub fn checked_add_minutes(&self, minutes: u16) -> Option<Self> {
        Self::from_minutes(self.0.checked_add(minutes)?)
    }

    /// Anchor this wall-clock time to a calendar date.
    pub fn at_date(&self, date: chrono::NaiveDate) -> chrono::NaiveDateTime {
        date.and_hms_opt(self.hour() as u32, self.minute() as u32, 0)
            .unwrap_or_else(|| chrono::NaiveDateTime::new(date, chrono::NaiveTime::MIN))
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(CoreError::time_parse(s, "expected HH:mm or HH:mm:ss"));
        }
        let hour: u8 = parts[0]
            .parse()
            .map_err(|_| CoreError::time_parse(s, "hour is not a number"))?;
        let minute: u8 = parts[1]
            .parse()
            .map_err(|_| CoreError::time_parse(s, "minute is not a number"))?;
        // Seconds are validated then discarded: minute precision only.
        if parts.len() == 3 {
            let second: u8 = parts[2]
                .parse()
                .map_err(|_| CoreError::time_parse(s, "second is not a number"))?;
            if second > 59 {
                return Err(CoreError::time_parse(s, "second out of range"));
            }
        }
        if hour > 23 {
            return Err(CoreError::time_parse(s, "hour out of range"));
        }
        if minute > 59 {
            return Err(CoreError::time_parse(s, "minute out of range"));
        }
        Ok(Self(hour as u16 * 60 + minute as u16))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// One contiguous open-to-close interval ("shift") within a single day.
///
/// A facility may configure up to three disjoint shifts per day; gaps
/// between shifts represent closed periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
}

impl OperatingWindow {
    /// Create a new operating window. Returns `None` when the close time
    /// precedes the open time. `open_time == close_time` is allowed and
    /// represents a degenerate single-point window; callers that do not
    /// want such windows must filter them out upstream.
    pub fn new(open_time: TimeOfDay, close_time: TimeOfDay) -> Option<Self> {
        if close_time < open_time {
            None
        } else {
            Some(Self {
                open_time,
                close_time,
            })
        }
    }

    /// Whether the window covers a single instant.
    pub fn is_degenerate(&self) -> bool {
        self.open_time == self.close_time
    }

    /// Whether a time mark falls inside the window, boundaries included.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.open_time <= t && t <= self.close_time
    }

    /// Length of the window in fractional hours.
    pub fn duration(&self) -> qtty::Hours {
        self.open_time.hours_until(self.close_time)
    }
}

#[cfg(test)]
mod tests {
    use super::{OperatingWindow, TimeOfDay};
    use std::str::FromStr;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_hh_mm() {
        let time = t("09:30");
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 30);
    }

    #[test]
    fn test_parse_hh_mm_ss_truncates_seconds() {
        assert_eq!(t("09:30:45"), t("09:30"));
    }

    #[test]
    fn test_parse_midnight() {
        assert_eq!(t("00:00").minutes_from_midnight(), 0);
    }

    #[test]
    fn test_parse_end_of_day() {
        assert_eq!(t("23:59").minutes_from_midnight(), 1439);
    }

    #[test]
    fn test_parse_rejects_hour_out_of_range() {
        assert!(TimeOfDay::from_str("24:00").is_err());
    }

    #[test]
    fn test_parse_rejects_minute_out_of_range() {
        assert!(TimeOfDay::from_str("10:60").is_err());
    }

    #[test]
    fn test_parse_rejects_second_out_of_range() {
        assert!(TimeOfDay::from_str("10:00:99").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TimeOfDay::from_str("morning").is_err());
        assert!(TimeOfDay::from_str("10").is_err());
        assert!(TimeOfDay::from_str("10:00:00:00").is_err());
        assert!(TimeOfDay::from_str("").is_err());
    }

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(t("06:05").to_string(), "06:05");
        assert_eq!(t("17:00").to_string(), "17:00");
    }

    #[test]
    fn test_ordering_matches_clock_order() {
        assert!(t("06:00") < t("06:30"));
        assert!(t("09:59") < t("10:00"));
        assert!(t("23:59") > t("00:00"));
    }

    #[test]
    fn test_from_hm_bounds() {
        assert!(TimeOfDay::from_hm(23, 59).is_some());
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(12, 60).is_none());
    }

    #[test]
    fn test_hours_until_fractional() {
        let hours = t("16:30").hours_until(t("18:00"));
        assert!((hours.value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_hours_until_negative_when_reversed() {
        assert!(t("18:00").hours_until(t("16:30")).value() < 0.0);
    }

    #[test]
    fn test_checked_add_minutes() {
        assert_eq!(t("08:45").checked_add_minutes(30), Some(t("09:15")));
        assert_eq!(t("23:45").checked_add_minutes(30), None);
    }

    #[test]
    fn test_at_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let dt = t("09:30").at_date(date);
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-14 09:30");
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let json = serde_json::to_string(&t("07:30")).unwrap();
        assert_eq!(json, "\"07:30\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("07:30"));
    }

    #[test]
    fn test_serde_accepts_seconds_form() {
        let back: TimeOfDay = serde_json::from_str("\"07:30:00\"").unwrap();
        assert_eq!(back, t("07:30"));
    }

    #[test]
    fn test_operating_window_new_valid() {
        let window = OperatingWindow::new(t("06:00"), t("12:00")).unwrap();
        assert_eq!(window.open_time, t("06:00"));
        assert_eq!(window.close_time, t("12:00"));
        assert!(!window.is_degenerate());
    }

    #[test]
    fn test_operating_window_rejects_reversed() {
        assert!(OperatingWindow::new(t("12:00"), t("06:00")).is_none());
    }

    #[test]
    fn test_operating_window_degenerate() {
        let window = OperatingWindow::new(t("08:00"), t("08:00")).unwrap();
        assert!(window.is_degenerate());
        assert_eq!(window.duration().value(), 0.0);
    }

    #[test]
    fn test_operating_window_contains_boundaries() {
        let window = OperatingWindow::new(t("06:00"), t("12:00")).unwrap();
        assert!(window.contains(t("06:00")));
        assert!(window.contains(t("12:00")));
        assert!(window.contains(t("09:15")));
        assert!(!window.contains(t("12:01")));
        assert!(!window.contains(t("05:59")));
    }

    #[test]
    fn test_operating_window_duration() {
        let window = OperatingWindow::new(t("14:00"), t("17:30")).unwrap();
        assert!((window.duration().value() - 3.5).abs() < 1e-12);
    }
}
