//! Panel layout and rendering
//!
//! Exactly one panel is drawn per frame, chosen by the controller.

use crate::{
    app::App,
    controller::{MountedDashboard, Panel},
    widgets::{
        plain, ActivityChartWidget, LanguageChartWidget, ProfileCardWidget, ProjectTableWidget,
        StatsPanelWidget,
    },
};
use octoscope_core::format::escape_markup;
use octoscope_core::ErrorView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Draw the current panel
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Panel
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app.controller.panel());

    match app.controller.panel() {
        Panel::Search => render_search(frame, chunks[1], app),
        Panel::Loading { account } => render_loading(frame, chunks[1], account),
        Panel::Error(error) => render_error(frame, chunks[1], error),
        Panel::Dashboard(mounted) => render_dashboard(frame, chunks[1], mounted, app.selected_project),
    }
}

fn key_hints(panel: &Panel) -> Vec<(&'static str, &'static str)> {
    match panel {
        Panel::Search => vec![("Enter", "search"), ("↑↓", "pick"), ("Esc", "quit")],
        Panel::Loading { .. } => vec![("Esc", "back"), ("q", "quit")],
        Panel::Error(_) => vec![("r", "retry"), ("Esc", "back"), ("q", "quit")],
        Panel::Dashboard(_) => vec![
            ("↑↓", "select"),
            ("o", "open"),
            ("p", "profile"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
    }
}

fn render_header(frame: &mut Frame, area: Rect, panel: &Panel) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![Span::styled(
        "OCTOSCOPE",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, header_chunks[0]);

    let mut spans = Vec::new();
    for (key, label) in key_hints(panel) {
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {} ", label)));
    }
    let keybindings = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);
    frame.render_widget(keybindings, header_chunks[1]);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Quick picks
        ])
        .split(area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .title(" GITHUB USERNAME ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(input, chunks[0]);

    let picks: Vec<Line> = app
        .quick_picks
        .iter()
        .enumerate()
        .map(|(i, account)| {
            if app.quick_pick == Some(i) {
                Line::styled(
                    format!("▶ {}", account),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else {
                Line::styled(format!("  {}", account), Style::default().fg(Color::Gray))
            }
        })
        .collect();
    let picks = Paragraph::new(picks).block(
        Block::default()
            .title(" TRY ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(picks, chunks[1]);
}

fn render_loading(frame: &mut Frame, area: Rect, account: &str) {
    let text = vec![
        Line::default(),
        Line::styled(
            format!("Loading {}...", plain(&escape_markup(account))),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Fetching profile, repositories and languages",
            Style::default().fg(Color::Gray),
        ),
    ];
    let loading = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(loading, area);
}

fn render_error(frame: &mut Frame, area: Rect, error: &ErrorView) {
    let text = vec![
        Line::default(),
        Line::styled(
            error.title.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(plain(&error.message).into_owned()),
    ];
    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(panel, area);
}

fn render_dashboard(frame: &mut Frame, area: Rect, mounted: &MountedDashboard, selected: usize) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),  // Profile + stats
            Constraint::Length(9),  // Top projects
            Constraint::Min(8),     // Charts
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);

    let view = &mounted.view;
    let charts = &mounted.charts;
    let now = Instant::now();

    frame.render_widget(
        WidgetAdapter::new(|area, buf| ProfileCardWidget::render(&view.profile, area, buf)),
        top[0],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| StatsPanelWidget::render(charts, now, area, buf)),
        top[1],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| ProjectTableWidget::render(view, selected, area, buf)),
        rows[1],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| LanguageChartWidget::render(charts, area, buf)),
        bottom[0],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| ActivityChartWidget::render(charts, area, buf)),
        bottom[1],
    );
}

/// Bridges the widgets' associated render functions to ratatui's `Widget` trait
struct WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    render_fn: F,
}

impl<F> WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    fn new(render_fn: F) -> Self {
        Self { render_fn }
    }
}

impl<F> Widget for WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        (self.render_fn)(area, buf);
    }
}
