//! Top projects table
//!
//! One row per project card, the selected row highlighted.

use super::{plain, render_placeholder, truncate};
use crate::charts::hex_color;
use octoscope_core::{DashboardView, ProjectCard};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

pub struct ProjectTableWidget;

impl ProjectTableWidget {
    pub fn render(view: &DashboardView, selected: usize, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" TOP REPOSITORIES ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(message) = view.projects_placeholder() {
            render_placeholder(message, inner, buf);
            return;
        }

        let widths = [
            Constraint::Length(24), // Name
            Constraint::Length(12), // Language
            Constraint::Length(7),  // Stars
            Constraint::Length(7),  // Forks
            Constraint::Min(10),    // Description
        ];

        let header = Row::new(vec![
            Cell::from("Name"),
            Cell::from("Language"),
            Cell::from("Stars"),
            Cell::from("Forks"),
            Cell::from("Description"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = view
            .projects
            .iter()
            .enumerate()
            .map(|(i, card)| Self::row(card, i == selected))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1);

        Widget::render(table, inner, buf);
    }

    fn row(card: &ProjectCard, selected: bool) -> Row<'static> {
        let language = card.language.as_deref().map(plain).unwrap_or_default();
        let language_color = card.language_color.map(hex_color).unwrap_or(Color::Gray);

        let marker = if selected { "▶ " } else { "  " };
        let row = Row::new(vec![
            Cell::from(format!("{}{}", marker, truncate(&plain(&card.name), 21)))
                .style(Style::default().fg(Color::White)),
            Cell::from(truncate(&language, 12)).style(Style::default().fg(language_color)),
            Cell::from(card.stars.clone()).style(Style::default().fg(Color::Yellow)),
            Cell::from(card.forks.clone()).style(Style::default().fg(Color::Cyan)),
            Cell::from(plain(&card.description).into_owned())
                .style(Style::default().fg(Color::Gray)),
        ]);

        if selected {
            row.style(Style::default().add_modifier(Modifier::REVERSED))
        } else {
            row
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_view;
    use crate::widgets::buffer_text;

    #[test]
    fn test_table_lists_top_projects() {
        let view = sample_view();
        let area = Rect::new(0, 0, 100, 10);
        let mut buf = Buffer::empty(area);
        ProjectTableWidget::render(&view, 0, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("▶ project-7"));
        assert!(text.contains("project-2"));
        assert!(!text.contains("project-1 "));
        assert!(text.contains("1.5k"));
        assert!(text.contains("No description provided"));
    }

    #[test]
    fn test_empty_state() {
        let mut view = sample_view();
        view.projects.clear();
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        ProjectTableWidget::render(&view, 0, area, &mut buf);

        assert!(buffer_text(&buf).contains("No public repositories"));
    }

    #[test]
    fn test_empty_state_in_tiny_areas() {
        let mut view = sample_view();
        view.projects.clear();
        for (width, height) in [(60, 0), (60, 1), (60, 2), (2, 3), (1, 1), (0, 0)] {
            let area = Rect::new(0, 0, width, height);
            let mut buf = Buffer::empty(area);
            ProjectTableWidget::render(&view, 0, area, &mut buf);
        }
    }
}
