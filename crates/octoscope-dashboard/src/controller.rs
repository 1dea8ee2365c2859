//! Panel state machine
//!
//! ```text
//! Search ──submit──▶ Loading ──ok──▶ Dashboard
//!   ▲                  │  └──err──▶ Error ──retry──▶ Loading
//!   └──────back────────┴────────────┴──back (Dashboard, Error)
//! ```
//!
//! Every transition into Loading and every back action bumps the generation.
//! A search outcome carries the generation it was issued under and is dropped
//! unless it is still current.

use crate::charts::DashboardCharts;
use octoscope_core::{DashboardView, ErrorView, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which panel is showing, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Search,
    Loading,
    Error,
    Dashboard,
}

/// A dashboard panel together with the chart state it owns
#[derive(Debug)]
pub struct MountedDashboard {
    pub account: String,
    pub view: DashboardView,
    pub charts: DashboardCharts,
}

/// The one visible panel
#[derive(Debug)]
pub enum Panel {
    Search,
    Loading { account: String },
    Error(ErrorView),
    Dashboard(Box<MountedDashboard>),
}

impl Panel {
    pub fn kind(&self) -> PanelKind {
        match self {
            Panel::Search => PanelKind::Search,
            Panel::Loading { .. } => PanelKind::Loading,
            Panel::Error(_) => PanelKind::Error,
            Panel::Dashboard(_) => PanelKind::Dashboard,
        }
    }
}

/// Identifier of the most recent search, used by retry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    last_account: Option<String>,
}

impl SearchSession {
    pub fn last_account(&self) -> Option<&str> {
        self.last_account.as_deref()
    }
}

/// A search the caller must now run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub account: String,
}

/// What came back for a ticket
#[derive(Debug)]
pub struct SearchOutcome {
    pub generation: u64,
    pub account: String,
    pub result: Result<DashboardView>,
}

impl SearchOutcome {
    pub fn new(ticket: &SearchTicket, result: Result<DashboardView>) -> Self {
        Self {
            generation: ticket.generation,
            account: ticket.account.clone(),
            result,
        }
    }
}

/// Owns the panel, the search session and the generation counter
#[derive(Debug)]
pub struct ViewController {
    panel: Panel,
    session: SearchSession,
    generation: u64,
    count_up: Duration,
}

impl ViewController {
    /// Start on the search panel; `count_up` is the counter animation length
    pub fn new(count_up: Duration) -> Self {
        Self {
            panel: Panel::Search,
            session: SearchSession::default(),
            generation: 0,
            count_up,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Form submission. Blank input is ignored.
    pub fn submit(&mut self, input: &str) -> Option<SearchTicket> {
        let account = input.trim();
        if account.is_empty() {
            return None;
        }
        Some(self.begin(account.to_string()))
    }

    /// Search for a preset account
    pub fn quick_select(&mut self, account: &str) -> Option<SearchTicket> {
        self.submit(account)
    }

    /// Re-run the last search. Only available on the error panel.
    pub fn retry(&mut self) -> Option<SearchTicket> {
        if self.panel.kind() != PanelKind::Error {
            return None;
        }
        let account = self.session.last_account()?.to_string();
        Some(self.begin(account))
    }

    /// Return to the search panel from any other panel.
    ///
    /// Returns false if already on the search panel.
    pub fn back(&mut self) -> bool {
        if self.panel.kind() == PanelKind::Search {
            return false;
        }
        self.generation += 1;
        self.panel = Panel::Search;
        debug!("Back to search (generation {})", self.generation);
        true
    }

    /// Apply a finished search.
    ///
    /// Returns false, leaving the panel untouched, for stale outcomes.
    pub fn resolve(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.generation != self.generation || self.panel.kind() != PanelKind::Loading {
            debug!(
                "Discarding stale outcome for {} (generation {}, current {})",
                outcome.account, outcome.generation, self.generation
            );
            return false;
        }

        self.panel = match outcome.result {
            Ok(view) => {
                info!("Showing dashboard for {}", outcome.account);
                let charts = DashboardCharts::mount(&view, self.count_up);
                Panel::Dashboard(Box::new(MountedDashboard {
                    account: outcome.account,
                    view,
                    charts,
                }))
            }
            Err(e) => {
                warn!("Search for {} failed: {}", outcome.account, e);
                Panel::Error(ErrorView::classify(&e, &outcome.account))
            }
        };
        true
    }

    fn begin(&mut self, account: String) -> SearchTicket {
        self.generation += 1;
        self.session.last_account = Some(account.clone());
        info!("Searching for {} (generation {})", account, self.generation);
        self.panel = Panel::Loading {
            account: account.clone(),
        };
        SearchTicket {
            generation: self.generation,
            account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_view;
    use octoscope_core::OctoscopeError;

    fn controller() -> ViewController {
        ViewController::new(Duration::from_millis(600))
    }

    #[test]
    fn test_starts_on_search() {
        let controller = controller();
        assert_eq!(controller.panel().kind(), PanelKind::Search);
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.session().last_account(), None);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut controller = controller();
        assert!(controller.submit("   ").is_none());
        assert_eq!(controller.panel().kind(), PanelKind::Search);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn test_submit_trims_and_loads() {
        let mut controller = controller();
        let ticket = controller.submit("  octocat ").unwrap();
        assert_eq!(ticket.account, "octocat");
        assert_eq!(ticket.generation, 1);
        assert!(matches!(
            controller.panel(),
            Panel::Loading { account } if account == "octocat"
        ));
        assert_eq!(controller.session().last_account(), Some("octocat"));
    }

    #[test]
    fn test_success_mounts_dashboard() {
        let mut controller = controller();
        let ticket = controller.submit("octocat").unwrap();

        assert!(controller.resolve(SearchOutcome::new(&ticket, Ok(sample_view()))));
        match controller.panel() {
            Panel::Dashboard(mounted) => {
                assert_eq!(mounted.account, "octocat");
                assert_eq!(mounted.view.stats.stars, sample_view().stats.stars);
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_not_found_escapes_identifier() {
        let mut controller = controller();
        let ticket = controller.submit("<script>").unwrap();
        let outcome = SearchOutcome::new(
            &ticket,
            Err(OctoscopeError::NotFound("/users/<script>".to_string())),
        );

        assert!(controller.resolve(outcome));
        match controller.panel() {
            Panel::Error(error) => {
                assert_eq!(error.title, "Account not found");
                assert!(error.message.contains("&lt;script&gt;"));
                assert!(!error.message.contains("<script>"));
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_retry_only_from_error() {
        let mut controller = controller();
        assert!(controller.retry().is_none());

        let ticket = controller.submit("octocat").unwrap();
        assert!(controller.retry().is_none());

        controller.resolve(SearchOutcome::new(&ticket, Err(OctoscopeError::RateLimited)));
        let retry = controller.retry().unwrap();
        assert_eq!(retry.account, "octocat");
        assert_eq!(retry.generation, ticket.generation + 1);
        assert_eq!(controller.panel().kind(), PanelKind::Loading);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut controller = controller();
        let first = controller.submit("alice").unwrap();
        let second = controller.submit("bob").unwrap();

        assert!(!controller.resolve(SearchOutcome::new(&first, Ok(sample_view()))));
        assert!(matches!(
            controller.panel(),
            Panel::Loading { account } if account == "bob"
        ));

        assert!(controller.resolve(SearchOutcome::new(&second, Err(OctoscopeError::Http { status: 502 }))));
        assert_eq!(controller.panel().kind(), PanelKind::Error);
    }

    #[test]
    fn test_back_from_loading_supersedes_search() {
        let mut controller = controller();
        let ticket = controller.submit("octocat").unwrap();

        assert!(controller.back());
        assert_eq!(controller.panel().kind(), PanelKind::Search);
        assert!(!controller.resolve(SearchOutcome::new(&ticket, Ok(sample_view()))));
        assert_eq!(controller.panel().kind(), PanelKind::Search);
    }

    #[test]
    fn test_back_from_dashboard_and_error() {
        let mut controller = controller();
        assert!(!controller.back());

        let ticket = controller.submit("octocat").unwrap();
        controller.resolve(SearchOutcome::new(&ticket, Ok(sample_view())));
        assert!(controller.back());
        assert_eq!(controller.panel().kind(), PanelKind::Search);

        let ticket = controller.submit("ghost").unwrap();
        controller.resolve(SearchOutcome::new(
            &ticket,
            Err(OctoscopeError::NotFound("/users/ghost".to_string())),
        ));
        assert!(controller.back());
        assert_eq!(controller.panel().kind(), PanelKind::Search);
        assert_eq!(controller.session().last_account(), Some("ghost"));
    }

    #[test]
    fn test_generation_is_monotonic() {
        let mut controller = controller();
        let mut seen = vec![controller.generation()];
        controller.submit("a");
        seen.push(controller.generation());
        controller.back();
        seen.push(controller.generation());
        controller.quick_select("b");
        seen.push(controller.generation());
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }
}
