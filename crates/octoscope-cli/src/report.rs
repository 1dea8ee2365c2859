//! Non-interactive presenters for `octoscope show`

use octoscope_core::format::{plain_text, strip_control};
use octoscope_core::{DashboardPresenter, DashboardView, ErrorView, LanguageChart, Result};
use serde::Serialize;
use std::io::Write;

const BAR_WIDTH: usize = 30;

/// Human-readable report
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn profile(&mut self, view: &DashboardView) -> Result<()> {
        let profile = &view.profile;
        writeln!(
            self.out,
            "{} ({})",
            plain_text(&profile.display_name),
            plain_text(&profile.handle)
        )?;
        if !profile.bio.is_empty() {
            writeln!(self.out, "{}", plain_text(&profile.bio))?;
        }
        if let Some(location) = &profile.location {
            writeln!(self.out, "Location: {}", plain_text(location))?;
        }
        if let Some(link) = &profile.link {
            writeln!(self.out, "Link: {}", strip_control(&link.href))?;
        }
        writeln!(self.out, "{}", profile.joined)?;
        writeln!(self.out, "{}", strip_control(&profile.profile_url))?;
        Ok(())
    }

    fn stats(&mut self, view: &DashboardView) -> Result<()> {
        let counters: Vec<String> = view
            .stats
            .counters()
            .iter()
            .map(|(caption, value)| {
                format!("{} {}", caption, octoscope_core::format::format_count(*value))
            })
            .collect();
        writeln!(self.out, "{}", counters.join(" | "))?;
        Ok(())
    }

    fn projects(&mut self, view: &DashboardView) -> Result<()> {
        writeln!(self.out, "Top repositories")?;
        if let Some(message) = view.projects_placeholder() {
            writeln!(self.out, "  {}", message)?;
            return Ok(());
        }
        for card in &view.projects {
            let language = card
                .language
                .as_deref()
                .map(|l| format!("  {}", plain_text(l)))
                .unwrap_or_default();
            writeln!(
                self.out,
                "  {}  ★ {}  forks {}{}",
                plain_text(&card.name),
                card.stars,
                card.forks,
                language
            )?;
            writeln!(self.out, "      {}", plain_text(&card.description))?;
        }
        Ok(())
    }

    fn languages(&mut self, view: &DashboardView) -> Result<()> {
        writeln!(self.out, "Languages")?;
        match &view.languages {
            LanguageChart::Empty { message } => writeln!(self.out, "  {}", message)?,
            LanguageChart::Ranked { slices } => {
                let width = slices
                    .iter()
                    .map(|s| plain_text(&s.language).chars().count())
                    .max()
                    .unwrap_or(0);
                for slice in slices {
                    let filled = ((slice.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
                    writeln!(
                        self.out,
                        "  {:<width$}  {:>6}  {}",
                        plain_text(&slice.language),
                        slice.label,
                        "█".repeat(filled.max(1)),
                        width = width
                    )?;
                }
            }
        }
        Ok(())
    }

    fn activity(&mut self, view: &DashboardView) -> Result<()> {
        writeln!(
            self.out,
            "Activity (last 12 months, {} pushed)",
            view.activity.total()
        )?;
        let peak = view.activity.peak().max(1);
        for bar in &view.activity.bars {
            let filled = ((bar.count as f64 / peak as f64) * BAR_WIDTH as f64).round() as usize;
            writeln!(
                self.out,
                "  {} {}  {:>3} {}",
                bar.label,
                bar.key.split('-').next().unwrap_or(&bar.key),
                bar.count,
                "█".repeat(filled)
            )?;
        }
        Ok(())
    }
}

impl<W: Write> DashboardPresenter for TextReport<W> {
    fn present(&mut self, view: &DashboardView) -> Result<()> {
        self.profile(view)?;
        writeln!(self.out)?;
        self.stats(view)?;
        writeln!(self.out)?;
        self.projects(view)?;
        writeln!(self.out)?;
        self.languages(view)?;
        writeln!(self.out)?;
        self.activity(view)?;
        self.out.flush()?;
        Ok(())
    }

    fn present_error(&mut self, error: &ErrorView) -> Result<()> {
        writeln!(self.out, "{}", error.title)?;
        writeln!(self.out, "{}", plain_text(&error.message))?;
        self.out.flush()?;
        Ok(())
    }
}

/// The view model as pretty-printed JSON
pub struct JsonReport<W: Write> {
    out: W,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a ErrorView,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> DashboardPresenter for JsonReport<W> {
    fn present(&mut self, view: &DashboardView) -> Result<()> {
        self.write(view)
    }

    fn present_error(&mut self, error: &ErrorView) -> Result<()> {
        self.write(&ErrorEnvelope { error })
    }
}
