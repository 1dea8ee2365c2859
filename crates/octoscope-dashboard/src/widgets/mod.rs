//! Dashboard widgets
//!
//! Each widget renders one region of a panel from the view model or the
//! mounted chart state.

mod activity_chart;
mod language_chart;
mod profile_card;
mod project_table;
mod stats_panel;

pub use activity_chart::ActivityChartWidget;
pub use language_chart::LanguageChartWidget;
pub use profile_card::ProfileCardWidget;
pub use project_table::ProjectTableWidget;
pub use stats_panel::StatsPanelWidget;

pub(crate) use octoscope_core::format::plain_text as plain;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

/// Dimmed empty-state message, clipped to `area` however small it is
pub(crate) fn render_placeholder(message: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::styled(
        format!(" {}", message),
        Style::default().fg(Color::DarkGray),
    ))
    .render(area, buf);
}

/// Truncate to `max` characters with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let width = buf.area.width.max(1) as usize;
    let mut text = String::new();
    for row in buf.content.chunks(width) {
        for cell in row {
            text.push_str(cell.symbol());
        }
        text.push('\n');
    }
    text
}
