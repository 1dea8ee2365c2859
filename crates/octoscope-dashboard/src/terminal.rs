//! Raw mode and alternate screen handling

use crate::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use octoscope_core::OctoscopeError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn terminal_error(action: &'static str) -> impl FnOnce(io::Error) -> OctoscopeError {
    move |e| OctoscopeError::Dashboard(format!("Failed to {}: {}", action, e))
}

/// Switch the terminal into raw mode on the alternate screen
pub fn init() -> Result<Tui> {
    enable_raw_mode().map_err(terminal_error("enable raw mode"))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error("enter alternate screen"))?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error("create terminal"))
}

/// Leave the alternate screen and raw mode
pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).map_err(terminal_error("leave alternate screen"))?;
    disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
    Ok(())
}

/// Restores the terminal when dropped, including on panic unwinding
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_error_message() {
        let err = terminal_error("enable raw mode")(io::Error::new(io::ErrorKind::Other, "no tty"));
        assert_eq!(
            err.to_string(),
            "Dashboard error: Failed to enable raw mode: no tty"
        );
    }

    #[test]
    #[ignore]
    fn test_init_restore() {
        let terminal = init().expect("Failed to init terminal");
        assert!(terminal.size().is_ok());
        restore().expect("Failed to restore terminal");
    }
}
