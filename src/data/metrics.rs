//! Derived statistics computed from the check series.

use super::model::Check;

/// Uptime and latency aggregates for the active window.
///
/// Purely derived: never persisted, always recomputed when the series
/// changes. Both fields are `None` for an empty series, which is how the
/// view distinguishes "no data" from "0% uptime". No rounding happens
/// here; formatting is the view's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    /// Share of checks that returned the expected status, times 100.
    pub uptime_percentage: Option<f64>,
    /// Mean response time in milliseconds, counting a missing response
    /// time as 0.
    pub average_latency: Option<f64>,
}

impl DerivedMetrics {
    /// Compute metrics over a check series.
    pub fn from_series(checks: &[Check]) -> Self {
        if checks.is_empty() {
            return Self::default();
        }

        let total = checks.len() as f64;
        let expected = checks.iter().filter(|c| c.is_expected_status).count() as f64;
        let latency_sum: f64 = checks
            .iter()
            .map(|c| f64::from(c.response_time.unwrap_or(0)))
            .sum();

        Self {
            uptime_percentage: Some(expected / total * 100.0),
            average_latency: Some(latency_sum / total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MonitorId;

    fn check(is_expected: bool, response_time: Option<u32>) -> Check {
        Check {
            endpoint_monitor_id: MonitorId::new("mon-1"),
            timestamp: "2026-07-01T12:00:00Z".parse().unwrap(),
            status: if is_expected { 200 } else { 500 },
            is_expected_status: is_expected,
            response_time,
        }
    }

    #[test]
    fn test_empty_series_is_undefined() {
        let metrics = DerivedMetrics::from_series(&[]);
        assert_eq!(metrics.uptime_percentage, None);
        assert_eq!(metrics.average_latency, None);
    }

    #[test]
    fn test_uptime_three_of_four() {
        let series = vec![
            check(true, Some(100)),
            check(true, Some(100)),
            check(true, Some(100)),
            check(false, Some(100)),
        ];
        let metrics = DerivedMetrics::from_series(&series);
        assert_eq!(metrics.uptime_percentage, Some(75.0));
    }

    #[test]
    fn test_average_latency_counts_missing_as_zero() {
        let series = vec![
            check(true, Some(100)),
            check(false, None),
            check(true, Some(300)),
        ];
        let metrics = DerivedMetrics::from_series(&series);
        let avg = metrics.average_latency.unwrap();
        assert!((avg - 400.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_up() {
        let series = vec![check(true, Some(50)), check(true, Some(150))];
        let metrics = DerivedMetrics::from_series(&series);
        assert_eq!(metrics.uptime_percentage, Some(100.0));
        assert_eq!(metrics.average_latency, Some(100.0));
    }
}
