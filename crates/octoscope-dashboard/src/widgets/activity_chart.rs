//! Monthly activity chart (vertical bars)

use crate::charts::DashboardCharts;
use ratatui::{
    prelude::*,
    widgets::{BarChart, BarGroup, Block, Borders},
};

pub struct ActivityChartWidget;

impl ActivityChartWidget {
    pub fn render(charts: &DashboardCharts, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" ACTIVITY (last 12 months) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let columns = charts.activity().len().max(1) as u16;
        let inner_width = block.inner(area).width;
        let bar_width = (inner_width.saturating_sub(columns - 1) / columns).clamp(1, 6);

        let bars = charts.activity_bars();
        BarChart::default()
            .block(block)
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Green))
            .value_style(Style::default().fg(Color::Black).bg(Color::Green))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
