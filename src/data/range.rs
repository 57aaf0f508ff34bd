//! Time-range selection for the check series window.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The display window for the check series.
///
/// Exactly one range is active at a time. The wire encoding (`"30m"`,
/// `"7d"`, ...) is shared between the API query parameter and the
/// `range` location parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "3h")]
    ThreeHours,
    #[serde(rename = "6h")]
    SixHours,
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "2d")]
    TwoDays,
    #[serde(rename = "7d")]
    SevenDays,
}

impl TimeRange {
    /// All ranges, in tab order.
    pub const ALL: [TimeRange; 7] = [
        TimeRange::ThirtyMinutes,
        TimeRange::OneHour,
        TimeRange::ThreeHours,
        TimeRange::SixHours,
        TimeRange::OneDay,
        TimeRange::TwoDays,
        TimeRange::SevenDays,
    ];

    /// The wire encoding used in URLs and the location state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ThirtyMinutes => "30m",
            TimeRange::OneHour => "1h",
            TimeRange::ThreeHours => "3h",
            TimeRange::SixHours => "6h",
            TimeRange::OneDay => "1d",
            TimeRange::TwoDays => "2d",
            TimeRange::SevenDays => "7d",
        }
    }

    /// Parse a wire encoding. Returns `None` for unrecognized values.
    pub fn parse(s: &str) -> Option<TimeRange> {
        TimeRange::ALL.iter().copied().find(|r| r.as_str() == s)
    }

    /// The window length this range covers.
    pub fn window(&self) -> Duration {
        match self {
            TimeRange::ThirtyMinutes => Duration::minutes(30),
            TimeRange::OneHour => Duration::hours(1),
            TimeRange::ThreeHours => Duration::hours(3),
            TimeRange::SixHours => Duration::hours(6),
            TimeRange::OneDay => Duration::days(1),
            TimeRange::TwoDays => Duration::days(2),
            TimeRange::SevenDays => Duration::days(7),
        }
    }

    /// The next-wider range, clamped at 7d.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// The next-narrower range, clamped at 30m.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[idx.saturating_sub(1)]
    }

    /// Default display window for a monitor of the given age.
    ///
    /// Young monitors get a narrow window so the few checks they have fill
    /// the chart; anything older than a day maxes out at 2d.
    pub fn default_for_age(age: Duration) -> TimeRange {
        if age < Duration::minutes(30) {
            TimeRange::ThirtyMinutes
        } else if age < Duration::hours(1) {
            TimeRange::OneHour
        } else if age < Duration::hours(3) {
            TimeRange::ThreeHours
        } else if age < Duration::hours(6) {
            TimeRange::SixHours
        } else if age < Duration::days(1) {
            TimeRange::OneDay
        } else {
            TimeRange::TwoDays
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for range in TimeRange::ALL {
            assert_eq!(TimeRange::parse(range.as_str()), Some(range));
        }
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(TimeRange::parse("90m"), None);
        assert_eq!(TimeRange::parse(""), None);
        assert_eq!(TimeRange::parse("1D"), None);
    }

    #[test]
    fn test_default_is_one_day() {
        assert_eq!(TimeRange::default(), TimeRange::OneDay);
    }

    #[test]
    fn test_default_for_age_boundaries() {
        let age = Duration::minutes(29) + Duration::seconds(59);
        assert_eq!(TimeRange::default_for_age(age), TimeRange::ThirtyMinutes);
        assert_eq!(
            TimeRange::default_for_age(Duration::minutes(30)),
            TimeRange::OneHour
        );
        assert_eq!(
            TimeRange::default_for_age(Duration::minutes(59)),
            TimeRange::OneHour
        );
        assert_eq!(
            TimeRange::default_for_age(Duration::hours(1)),
            TimeRange::ThreeHours
        );
        assert_eq!(
            TimeRange::default_for_age(Duration::hours(3)),
            TimeRange::SixHours
        );
        assert_eq!(
            TimeRange::default_for_age(Duration::hours(6)),
            TimeRange::OneDay
        );
        let age = Duration::hours(23) + Duration::minutes(59);
        assert_eq!(TimeRange::default_for_age(age), TimeRange::OneDay);
        assert_eq!(
            TimeRange::default_for_age(Duration::hours(25)),
            TimeRange::TwoDays
        );
        assert_eq!(
            TimeRange::default_for_age(Duration::days(400)),
            TimeRange::TwoDays
        );
    }

    #[test]
    fn test_next_prev_clamp() {
        assert_eq!(TimeRange::ThirtyMinutes.prev(), TimeRange::ThirtyMinutes);
        assert_eq!(TimeRange::SevenDays.next(), TimeRange::SevenDays);
        assert_eq!(TimeRange::OneDay.next(), TimeRange::TwoDays);
        assert_eq!(TimeRange::OneDay.prev(), TimeRange::SixHours);
    }

    #[test]
    fn test_serde_wire_encoding() {
        let json = serde_json::to_string(&TimeRange::SevenDays).unwrap();
        assert_eq!(json, r#""7d""#);
        let range: TimeRange = serde_json::from_str(r#""30m""#).unwrap();
        assert_eq!(range, TimeRange::ThirtyMinutes);
    }
}
