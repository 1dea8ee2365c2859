//! Headline counters with count-up animation

use crate::charts::DashboardCharts;
use octoscope_core::format::format_count;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};
use std::time::Instant;

pub struct StatsPanelWidget;

impl StatsPanelWidget {
    /// Render the four counters as they stand at `now`
    pub fn render(charts: &DashboardCharts, now: Instant, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" STATS ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(inner);

        for ((caption, value), column) in charts.counter_values(now).into_iter().zip(columns.iter()) {
            let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            Line::styled(format_count(value), value_style)
                .alignment(Alignment::Center)
                .render(Rect { height: 1, ..*column }, buf);

            if column.height >= 2 {
                Line::styled(caption, Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center)
                    .render(
                        Rect {
                            y: column.y + 1,
                            height: 1,
                            ..*column
                        },
                        buf,
                    );
            }
        }
    }
}
