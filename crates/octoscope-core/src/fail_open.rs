//! Fail-open helper for supplementary data
//!
//! Some fetches only enrich the dashboard (per-project language maps). When
//! one of them fails the search still succeeds; the failure is logged and the
//! missing piece simply contributes nothing.
//!
//! DO NOT use fail-open for the account record or the project collection:
//! those failures must abort the search and reach the error panel.

use std::future::Future;
use tracing::warn;

use crate::Result;

/// Await an operation whose failure should degrade instead of propagate.
///
/// Logs the error via `tracing::warn!` on failure and returns `None`.
///
/// # Usage
///
/// ```no_run
/// use octoscope_core::fail_open::fail_open;
/// use octoscope_core::{LanguageUsage, Result};
///
/// async fn fetch_languages() -> Result<LanguageUsage> {
///     Ok(LanguageUsage::new())
/// }
///
/// async fn example() {
///     let languages = fail_open("languages for octocat/hello", fetch_languages()).await;
///     // None if the fetch failed, otherwise Some(map)
/// }
/// ```
pub async fn fail_open<Fut, T>(operation_name: &str, fut: Fut) -> Option<T>
where
    Fut: Future<Output = Result<T>>,
{
    match fut.await {
        Ok(val) => Some(val),
        Err(e) => {
            warn!("{} failed (fail-open): {}", operation_name, e);
            None
        }
    }
}
