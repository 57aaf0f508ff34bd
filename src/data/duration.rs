//! Parsing and formatting of human-facing durations.

use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to seconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[("ms", 0.001), ("s", 1.0), ("m", 60.0), ("h", 3600.0)];

/// Parse interval strings like "30s", "90s", "5m", "1.5h"
pub fn parse_interval(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.parse()?;
            if val < 0.0 {
                bail!("Negative interval: {}", s);
            }
            return Ok(Duration::from_secs_f64(val * multiplier));
        }
    }

    // Bare numbers are taken as seconds
    if let Ok(val) = s.parse::<f64>() {
        if val >= 0.0 {
            return Ok(Duration::from_secs_f64(val));
        }
    }

    bail!("Unknown interval format: {}", s)
}

/// Format a whole number of seconds for display (e.g. "30s", "5m", "1h 30m")
pub fn format_secs(secs: u32) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        let m = secs / 60;
        let s = secs % 60;
        if s == 0 {
            format!("{}m", m)
        } else {
            format!("{}m {}s", m, s)
        }
    } else {
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        if m == 0 {
            format!("{}h", h)
        } else {
            format!("{}h {}m", h, m)
        }
    }
}

/// Format a latency in milliseconds for display
pub fn format_millis(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{:.0} ms", ms)
    } else {
        format!("{:.2} s", ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_interval("5m").unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_parse_fractional_hours() {
        assert_eq!(parse_interval("1.5h").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_parse_bare_number_is_seconds() {
        assert_eq!(parse_interval("45").unwrap(), Duration::from_secs(45));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_interval("soon").is_err());
        assert!(parse_interval("").is_err());
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(30), "30s");
        assert_eq!(format_secs(90), "1m 30s");
        assert_eq!(format_secs(300), "5m");
        assert_eq!(format_secs(3600), "1h");
        assert_eq!(format_secs(5400), "1h 30m");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(133.4), "133 ms");
        assert_eq!(format_millis(0.0), "0 ms");
        assert_eq!(format_millis(1234.0), "1.23 s");
    }
}
