//! Fetch pipeline for one search cycle
//!
//! Three suspension points: the account record and the project collection are
//! fetched concurrently; project pages are fetched one after another; the
//! sampled language maps are fetched concurrently and allowed to fail.

use crate::source::ProfileSource;
use futures::future::join_all;
use octoscope_core::aggregate::{language_sample, merge_languages};
use octoscope_core::fail_open::fail_open;
use octoscope_core::{LanguageUsage, ProfileSnapshot, Project, Result};
use tracing::{debug, info};

/// Projects requested per page
pub const PAGE_SIZE: usize = 100;

/// Hard cap on page requests per search (at most 500 projects)
pub const MAX_PAGES: u32 = 5;

/// Fetch an account's projects page by page.
///
/// Stops at the first short page or after `MAX_PAGES` pages. Pages are
/// concatenated in the order they were fetched.
pub async fn fetch_all_projects<S>(source: &S, account: &str) -> Result<Vec<Project>>
where
    S: ProfileSource + ?Sized,
{
    let mut projects = Vec::new();

    for page in 1..=MAX_PAGES {
        let batch = source.fetch_project_page(account, page).await?;
        let full = batch.len() >= PAGE_SIZE;
        projects.extend(batch);

        if !full {
            break;
        }
        if page == MAX_PAGES {
            debug!("Stopping after {} pages for {}", MAX_PAGES, account);
        }
    }

    Ok(projects)
}

/// Fetch and merge language maps for the most-starred projects.
///
/// All requests run concurrently and every one is awaited. Failed requests
/// are logged and contribute nothing; they never fail the search.
pub async fn fetch_sampled_languages<S>(source: &S, projects: &[Project]) -> LanguageUsage
where
    S: ProfileSource + ?Sized,
{
    let sample = language_sample(projects);
    let requested = sample.len();

    let results = join_all(sample.into_iter().map(|project| async move {
        let operation = format!("languages for {}/{}", project.owner.login, project.name);
        fail_open(
            &operation,
            source.fetch_languages(&project.owner.login, &project.name),
        )
        .await
    }))
    .await;

    let answered: Vec<LanguageUsage> = results.into_iter().flatten().collect();
    debug!(
        "Language sample: {} of {} requests answered",
        answered.len(),
        requested
    );

    merge_languages(answered)
}

/// Fetch everything the dashboard needs for `account`.
///
/// Account or project failures abort the cycle with that error.
pub async fn load_profile<S>(source: &S, account: &str) -> Result<ProfileSnapshot>
where
    S: ProfileSource + ?Sized,
{
    info!("Loading profile for {}", account);

    let (account_record, projects) = tokio::try_join!(
        source.fetch_account(account),
        fetch_all_projects(source, account)
    )?;

    let languages = fetch_sampled_languages(source, &projects).await;

    info!(
        "Loaded {}: {} projects, {} languages",
        account_record.login,
        projects.len(),
        languages.len()
    );

    Ok(ProfileSnapshot {
        account: account_record,
        projects,
        languages,
    })
}
