// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # pulsewatch
//!
//! A terminal dashboard and synchronization controller for a single
//! uptime monitor.
//!
//! The crate polls an uptime-monitoring service for one endpoint
//! monitor's metadata, its windowed check series, and its most recent
//! check; reconciles the three independently-failing sources into one
//! view state; and renders the detail view in an interactive TUI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌────────────┐    ┌─────────┐   ┌─────────┐ │
//! │  │  app    │───▶│ controller │───▶│   ui    │──▶│ Terminal│ │
//! │  │ (view   │    │ (state +   │    │(render) │   │         │ │
//! │  │  loop)  │    │  refresh)  │    └─────────┘   └─────────┘ │
//! │  └────┬────┘    └─────┬──────┘                              │
//! │       │               ▼                                     │
//! │       │          ┌─────────┐                                │
//! │       └─────────▶│   api   │◀── HttpApi (reqwest)           │
//! │                  │ (fetch) │                                │
//! │                  └─────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: View-loop state: the committed/presented render buffer,
//!   the shared header slot, the edit-dialog gate, and the location history
//! - **[`controller`]**: The synchronization core: a background refresh
//!   driver that fans out to three fetchers and joins them, the
//!   authoritative [`DetailState`] with stale-data retention and the
//!   request-generation guard, and the range-switch transition scheduler
//! - **[`api`]**: The [`MonitorApi`] trait and its HTTP implementation
//! - **[`data`]**: Wire types, the [`TimeRange`] window enum, and derived
//!   metrics
//! - **[`ui`]**: Terminal rendering with ratatui: header, range tabs,
//!   section cards, charts, and overlays
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a monitor against a local service
//! pulsewatch mon-1
//!
//! # Deep-link into a window and poll faster
//! pulsewatch mon-1 --range 7d --refresh 10s
//!
//! # One-shot JSON snapshot, no TUI
//! pulsewatch mon-1 --export snapshot.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use pulsewatch::{App, HttpApi, MonitorId};
//!
//! # tokio_test::block_on(async {
//! let api = Arc::new(HttpApi::new("http://localhost:3000/api").unwrap());
//! let mut app = App::new(
//!     api,
//!     MonitorId::new("mon-1"),
//!     None,
//!     Duration::from_secs(30),
//! );
//!
//! // Each pass of a view loop drains fetch results and reconciles the
//! // snapshot the charts render from
//! app.pump();
//! app.present();
//! # });
//! ```

pub mod api;
pub mod app;
pub mod controller;
pub mod data;
pub mod events;
pub mod route;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use api::{ApiError, HttpApi, MonitorApi};
pub use app::{App, HeaderContent, HeaderStatus, Presented};
pub use controller::{
    DetailState, FetchEvent, FetchParams, FetcherStatus, Followup, Phase, Refresher,
    TransitionScheduler, RANGE_SETTLE,
};
pub use data::{Check, DerivedMetrics, Monitor, MonitorId, TimeRange};
pub use route::{Location, Route};
pub use settings::Settings;
