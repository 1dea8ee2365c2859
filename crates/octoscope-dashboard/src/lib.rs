//! # octoscope-dashboard
//!
//! Interactive terminal dashboard for a GitHub account.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ OCTOSCOPE                     [↑↓] select [o] open [Esc] back │
//! ├───────────────────────────────┬──────────────────────────────┤
//! │ PROFILE                       │ STATS                        │
//! │ The Octocat  @octocat         │  7.0k    8    12.3k   280    │
//! ├───────────────────────────────┴──────────────────────────────┤
//! │ TOP REPOSITORIES                                             │
//! ├────────────────────────┬─────────────────────────────────────┤
//! │ LANGUAGES              │ ACTIVITY (last 12 months)           │
//! └────────────────────────┴─────────────────────────────────────┘
//! ```
//!
//! The `ViewController` decides which of the search, loading, error and
//! dashboard panels is visible; searches run on spawned tasks and report back
//! over a channel, tagged with the generation they were issued under.

mod app;
mod charts;
mod controller;
mod event;
mod run;
mod terminal;
mod ui;
mod widgets;

#[cfg(test)]
mod testing;

pub use app::App;
pub use charts::DashboardCharts;
pub use controller::{
    MountedDashboard, Panel, PanelKind, SearchOutcome, SearchSession, SearchTicket, ViewController,
};
pub use event::{map_key, Action};
pub use octoscope_core::Result;
pub use run::run;
