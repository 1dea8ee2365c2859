//! Application state and action handling
//!
//! The `App` owns the controller, the search input and the channel that
//! spawned searches report back on.

use crate::controller::{Panel, PanelKind, SearchOutcome, SearchTicket, ViewController};
use crate::event::Action;
use chrono::Local;
use octoscope_client::{load_profile, ProfileSource};
use octoscope_core::{DashboardSettings, DashboardView};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Poll interval while the stat counters are counting up
pub const ANIMATION_FRAME: Duration = Duration::from_millis(33);

pub struct App {
    pub controller: ViewController,
    /// Text typed into the search field
    pub input: String,
    pub quick_picks: Vec<String>,
    /// Highlighted quick pick, if any
    pub quick_pick: Option<usize>,
    /// Highlighted row of the project table
    pub selected_project: usize,
    pub should_quit: bool,
    source: Arc<dyn ProfileSource>,
    outcome_tx: UnboundedSender<SearchOutcome>,
    outcome_rx: UnboundedReceiver<SearchOutcome>,
}

impl App {
    pub fn new(settings: &DashboardSettings, source: Arc<dyn ProfileSource>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            controller: ViewController::new(settings.count_up_duration()),
            input: String::new(),
            quick_picks: settings.quick_picks.clone(),
            quick_pick: None,
            selected_project: 0,
            should_quit: false,
            source,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Search for `account` as if it had been typed and submitted
    pub fn search(&mut self, account: &str) {
        if let Some(ticket) = self.controller.submit(account) {
            self.spawn_search(ticket);
        }
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Input(c) => {
                self.input.push(c);
                self.quick_pick = None;
            }
            Action::DeleteChar => {
                self.input.pop();
            }
            Action::ClearInput => self.input.clear(),
            Action::Submit => self.submit(),
            Action::NextQuickPick => self.cycle_quick_pick(1),
            Action::PrevQuickPick => self.cycle_quick_pick(-1),
            Action::Retry => {
                if let Some(ticket) = self.controller.retry() {
                    self.spawn_search(ticket);
                }
            }
            Action::Back => {
                self.controller.back();
            }
            Action::NextProject => self.move_selection(1),
            Action::PrevProject => self.move_selection(-1),
            Action::OpenProject => {
                if let Some(url) = self.selected_project_url() {
                    open_link(&url);
                }
            }
            Action::OpenProfile => {
                if let Some(view) = self.dashboard_view() {
                    open_link(&view.profile.profile_url);
                }
            }
        }
    }

    /// Apply every search outcome that has arrived so far
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
        }
    }

    /// Wait for the next outcome and apply it. Returns whether it was current.
    pub async fn next_outcome(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => self.apply(outcome),
            None => false,
        }
    }

    pub fn dashboard_view(&self) -> Option<&DashboardView> {
        match self.controller.panel() {
            Panel::Dashboard(mounted) => Some(&mounted.view),
            _ => None,
        }
    }

    /// How long the event loop may wait at `now` before drawing again.
    ///
    /// `idle` normally; shorter while a mounted dashboard is animating.
    pub fn frame_interval(&self, now: Instant, idle: Duration) -> Duration {
        match self.controller.panel() {
            Panel::Dashboard(mounted) if mounted.charts.animating(now) => idle.min(ANIMATION_FRAME),
            _ => idle,
        }
    }

    fn apply(&mut self, outcome: SearchOutcome) -> bool {
        let applied = self.controller.resolve(outcome);
        if applied && self.controller.panel().kind() == PanelKind::Dashboard {
            self.selected_project = 0;
        }
        applied
    }

    fn submit(&mut self) {
        let ticket = if self.input.trim().is_empty() {
            let pick = self
                .quick_pick
                .and_then(|i| self.quick_picks.get(i))
                .cloned();
            pick.and_then(|account| self.controller.quick_select(&account))
        } else {
            self.controller.submit(&self.input)
        };

        if let Some(ticket) = ticket {
            self.spawn_search(ticket);
        }
    }

    fn spawn_search(&self, ticket: SearchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = load_profile(source.as_ref(), &ticket.account)
                .await
                .map(|snapshot| DashboardView::build(&snapshot, &Local::now()));
            if tx.send(SearchOutcome::new(&ticket, result)).is_err() {
                debug!("Dashboard closed before search for {} finished", ticket.account);
            }
        });
    }

    fn cycle_quick_pick(&mut self, step: isize) {
        let len = self.quick_picks.len();
        if len == 0 {
            return;
        }
        self.quick_pick = Some(match self.quick_pick {
            None if step > 0 => 0,
            None => len - 1,
            Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
        });
    }

    fn move_selection(&mut self, step: isize) {
        let len = self.dashboard_view().map(|v| v.projects.len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        self.selected_project =
            (self.selected_project as isize + step).clamp(0, len as isize - 1) as usize;
    }

    fn selected_project_url(&self) -> Option<String> {
        self.dashboard_view()
            .and_then(|view| view.projects.get(self.selected_project))
            .map(|card| card.url.clone())
    }
}

fn open_link(url: &str) {
    debug!("Opening {}", url);
    if let Err(e) = open::that(url) {
        warn!("Failed to open {}: {}", url, e);
    }
}
