//! # octoscope-client
//!
//! Fetch side of a search cycle.
//!
//! - `GitHubClient`: reqwest-backed client that maps status codes and
//!   transport failures onto `OctoscopeError`
//! - `ProfileSource`: the three API calls a search needs, as a trait so the
//!   fetch logic can run against a mock
//! - Pagination, concurrent language sampling and `load_profile`, which
//!   produces one complete `ProfileSnapshot`

mod client;
mod pipeline;
mod source;

pub use client::GitHubClient;
pub use pipeline::{fetch_all_projects, fetch_sampled_languages, load_profile, MAX_PAGES, PAGE_SIZE};
pub use source::{MockProfileSource, ProfileSource};
