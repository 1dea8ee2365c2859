//! Main loop of the terminal dashboard

use crate::{
    app::App,
    event::{self, map_key, AppEvent},
    terminal, ui, Result,
};
use octoscope_client::ProfileSource;
use octoscope_core::DashboardSettings;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Run the dashboard until the user quits.
///
/// With `initial_account` the dashboard starts with that search in flight.
pub async fn run(
    settings: DashboardSettings,
    source: Arc<dyn ProfileSource>,
    initial_account: Option<String>,
) -> Result<()> {
    let mut terminal = terminal::init()?;
    let _guard = terminal::TerminalGuard::new();

    let mut app = App::new(&settings, source);
    if let Some(account) = initial_account {
        app.input = account.clone();
        app.search(&account);
    }
    info!("Dashboard started");

    let tick = settings.tick();
    loop {
        app.drain_outcomes();
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match event::poll_event(app.frame_interval(Instant::now(), tick))? {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(app.controller.panel().kind(), key) {
                    app.handle(action);
                }
            }
            // Redrawn on the next iteration
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    terminal::restore()?;
    info!("Dashboard closed");
    Ok(())
}
