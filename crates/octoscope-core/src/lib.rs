//! # octoscope-core
//!
//! Core types for the octoscope profile dashboard.
//!
//! A search cycle is a straight line: fetch an account and its projects,
//! reduce them into counters and histograms, then turn the result into a
//! display-agnostic view model. This crate owns everything after the fetch:
//!
//! - Account / project records as returned by the GitHub REST API
//! - Aggregation (totals, rankings, language and activity histograms)
//! - Formatting helpers (abbreviated counts, join dates, colors, escaping)
//! - The `DashboardView` view model consumed by every display binding

mod config;
mod error;
pub mod aggregate;
pub mod fail_open;
pub mod format;
mod types;
pub mod view;

pub use config::{ApiConfig, DashboardSettings, OctoscopeConfig};
pub use error::{OctoscopeError, Result};
pub use types::*;
pub use view::{
    ActivityBar, ActivityChart, DashboardPresenter, DashboardView, ErrorView, ExternalLink,
    LanguageChart, LanguageSlice, ProfileView, ProjectCard, StatsView, NO_DESCRIPTION,
    NO_LANGUAGE_MESSAGE, NO_PROJECTS_MESSAGE,
};
