//! Terminal events and key bindings
//!
//! Keys are mapped to `Action`s per panel. On the search panel letters are
//! input, so only Esc and Ctrl+C quit there.

use crate::controller::PanelKind;
use crate::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Timer tick; drives outcome polling and the count-up animation
    Tick,
    Resize(u16, u16),
}

/// Poll for the next event, yielding a tick on timeout
pub fn poll_event(timeout: Duration) -> Result<AppEvent> {
    if !event::poll(timeout)? {
        return Ok(AppEvent::Tick);
    }
    Ok(match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
        Event::Resize(width, height) => AppEvent::Resize(width, height),
        _ => AppEvent::Tick,
    })
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Input(char),
    DeleteChar,
    ClearInput,
    Submit,
    NextQuickPick,
    PrevQuickPick,
    Retry,
    Back,
    NextProject,
    PrevProject,
    OpenProject,
    OpenProfile,
}

/// Map a key press on `panel` to an action
pub fn map_key(panel: PanelKind, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match panel {
        PanelKind::Search => match key.code {
            KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
            KeyCode::Char(c) if !ctrl => Some(Action::Input(c)),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Down | KeyCode::Tab => Some(Action::NextQuickPick),
            KeyCode::Up | KeyCode::BackTab => Some(Action::PrevQuickPick),
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        PanelKind::Loading => match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        PanelKind::Error => match key.code {
            KeyCode::Char('r') | KeyCode::Enter | KeyCode::F(5) => Some(Action::Retry),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        PanelKind::Dashboard => match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextProject),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevProject),
            KeyCode::Enter | KeyCode::Char('o') => Some(Action::OpenProject),
            KeyCode::Char('p') => Some(Action::OpenProfile),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
    }
}
