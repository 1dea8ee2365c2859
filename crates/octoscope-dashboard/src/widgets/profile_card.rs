//! Profile card widget
//!
//! Name, handle, bio and the small facts line of the searched account.

use super::plain;
use octoscope_core::ProfileView;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct ProfileCardWidget;

impl ProfileCardWidget {
    pub fn render(profile: &ProfileView, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" PROFILE ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        Paragraph::new(Self::lines(profile))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn lines(profile: &ProfileView) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                plain(&profile.display_name).into_owned(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                plain(&profile.handle).into_owned(),
                Style::default().fg(Color::Gray),
            ),
        ])];

        if !profile.bio.is_empty() {
            lines.push(Line::from(plain(&profile.bio).into_owned()));
        }
        lines.push(Line::default());

        if let Some(location) = &profile.location {
            lines.push(Self::fact("Location", plain(location).into_owned()));
        }
        if let Some(link) = &profile.link {
            lines.push(Self::fact("Link", plain(&link.label).into_owned()));
        }
        lines.push(Line::styled(
            profile.joined.clone(),
            Style::default().fg(Color::Gray),
        ));
        lines.push(Line::styled(
            profile.profile_url.clone(),
            Style::default().fg(Color::DarkGray),
        ));
        lines
    }

    fn fact(caption: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{}: ", caption), Style::default().fg(Color::Yellow)),
            Span::raw(value),
        ])
    }
}
