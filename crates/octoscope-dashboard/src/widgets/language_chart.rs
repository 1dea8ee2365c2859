//! Language share chart (horizontal bars)

use super::render_placeholder;
use crate::charts::{DashboardCharts, PERCENT_SCALE};
use octoscope_core::NO_LANGUAGE_MESSAGE;
use ratatui::{
    prelude::*,
    widgets::{BarChart, BarGroup, Block, Borders},
};

pub struct LanguageChartWidget;

impl LanguageChartWidget {
    pub fn render(charts: &DashboardCharts, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" LANGUAGES ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if charts.languages().is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            render_placeholder(NO_LANGUAGE_MESSAGE, inner, buf);
            return;
        }

        let bars = charts.language_bars();
        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .max((100.0 * PERCENT_SCALE) as u64)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_view;
    use crate::widgets::buffer_text;
    use octoscope_core::LanguageChart;
    use std::time::Duration;

    #[test]
    fn test_bars_are_labelled() {
        let charts = DashboardCharts::mount(&sample_view(), Duration::ZERO);
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        LanguageChartWidget::render(&charts, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Rust"));
        assert!(text.contains("Shell"));
    }

    #[test]
    fn test_no_language_data() {
        let mut view = sample_view();
        view.languages = LanguageChart::Empty {
            message: NO_LANGUAGE_MESSAGE,
        };
        let charts = DashboardCharts::mount(&view, Duration::ZERO);
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);
        LanguageChartWidget::render(&charts, area, &mut buf);

        assert!(buffer_text(&buf).contains(NO_LANGUAGE_MESSAGE));
    }

    #[test]
    fn test_no_language_data_in_tiny_areas() {
        let mut view = sample_view();
        view.languages = LanguageChart::Empty {
            message: NO_LANGUAGE_MESSAGE,
        };
        let charts = DashboardCharts::mount(&view, Duration::ZERO);
        for (width, height) in [(50, 0), (50, 1), (50, 2), (2, 3), (1, 1), (0, 0)] {
            let area = Rect::new(0, 0, width, height);
            let mut buf = Buffer::empty(area);
            LanguageChartWidget::render(&charts, area, &mut buf);
        }
    }
}
