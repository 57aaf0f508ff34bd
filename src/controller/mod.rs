//! The synchronization controller for the detail view.
//!
//! Three independently-failing fetchers feed one reconciled state:
//!
//! ```text
//!                    ┌───────────────────────────────┐
//!  tokio interval ──▶│ refresh driver (background)   │
//!  manual refresh ──▶│  metadata ┐                   │
//!  range change  ──▶ │  series   ├─ join ─▶ events ──┼──▶ mpsc
//!                    │  latest   ┘                   │      │
//!                    └───────────────────────────────┘      ▼
//!                                            DetailState::apply (view loop)
//! ```
//!
//! - [`refresh`]: the driver task, fan-out/join orchestration, and the
//!   call-time parameter cell
//! - [`state`]: the authoritative view state and event application rules
//!   (stale-data retention, one-shot range default, generation guard)
//! - [`transition`]: the deferred range-switch state machine

pub mod refresh;
pub mod state;
pub mod transition;

pub use refresh::{FetchParams, Refresher};
pub use state::{DetailState, FetchEvent, FetcherStatus, Followup};
pub use transition::{Phase, TransitionScheduler, RANGE_SETTLE};
