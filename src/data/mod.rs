//! Data models for the monitor detail view.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of human-facing durations
//! - [`metrics`]: Derived statistics ([`DerivedMetrics`]) over a check series
//! - [`model`]: Wire types ([`Monitor`], [`Check`]) for the status API
//! - [`range`]: The [`TimeRange`] window enum and its age-based default

pub mod duration;
pub mod metrics;
pub mod model;
pub mod range;

pub use metrics::DerivedMetrics;
pub use model::{Check, Monitor, MonitorId};
pub use range::TimeRange;
