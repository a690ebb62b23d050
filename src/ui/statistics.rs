//! Statistics screen rendering
//!
//! Renders aggregates over the full country list: totals, a per-region
//! breakdown with population bars, the most populous countries, and the
//! most widespread languages.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{format_compact, group_digits};
use crate::app::App;
use crate::stats::WorldStats;

/// Width of the population bars in the region breakdown
const BAR_WIDTH: usize = 20;

/// Renders the statistics screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let Some(stats) = app.stats.as_ref() else {
        let paragraph = Paragraph::new("Computing statistics...")
            .style(Style::default().fg(app.theme.accent()))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Totals header
            Constraint::Min(6),    // Regions and rankings
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_totals(frame, app, stats, chunks[0]);
    render_breakdowns(frame, app, stats, chunks[1]);
    render_help(frame, app, chunks[2]);
}

/// Renders the totals header
fn render_totals(frame: &mut Frame, app: &App, stats: &WorldStats, area: Rect) {
    let theme = app.theme;
    let separator = "─".repeat(area.width.saturating_sub(2) as usize);

    let lines = vec![
        Line::from(vec![
            Span::styled("WORLD STATISTICS", theme.title_style()),
            Span::styled(
                format!("  {} favorites", app.favorites.len()),
                theme.muted_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} countries", stats.total_countries),
                Style::default().fg(theme.text()),
            ),
            Span::styled("  │  ", theme.muted_style()),
            Span::styled(
                format!("{} people", group_digits(stats.total_population)),
                Style::default().fg(theme.text()),
            ),
            Span::styled("  │  ", theme.muted_style()),
            Span::styled(
                format!("{} avg", format_compact(stats.average_population)),
                theme.muted_style(),
            ),
        ]),
        Line::from(Span::styled(separator, theme.muted_style())),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the region breakdown and the ranking columns
fn render_breakdowns(frame: &mut Frame, app: &App, stats: &WorldStats, area: Rect) {
    let theme = app.theme;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left: regions with population bars, scaled to the largest region
    let max_population = stats
        .regions
        .first()
        .map(|r| r.population)
        .unwrap_or(0)
        .max(1);
    let mut region_lines: Vec<Line> = Vec::new();
    for region in &stats.regions {
        let fraction = region.population as f64 / max_population as f64;
        region_lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", region.region),
                Style::default().fg(theme.text()),
            ),
            Span::styled(
                format!("{:<width$} ", bar(fraction, BAR_WIDTH), width = BAR_WIDTH),
                Style::default().fg(theme.accent()),
            ),
            Span::styled(
                format!("{:>8}", format_compact(region.population)),
                Style::default().fg(theme.highlight()),
            ),
            Span::styled(format!("  {} countries", region.countries), theme.muted_style()),
        ]));
    }

    let regions_block = Block::default()
        .title(" Regions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));
    frame.render_widget(
        Paragraph::new(region_lines).block(regions_block),
        columns[0],
    );

    // Right: most populous countries and most widespread languages
    let mut ranking_lines: Vec<Line> = Vec::new();
    ranking_lines.push(Line::from(Span::styled(
        "Most populous",
        theme.muted_style(),
    )));
    for (rank, country) in stats.most_populous.iter().enumerate() {
        ranking_lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", rank + 1), theme.muted_style()),
            Span::styled(
                format!("{:<24}", country.name),
                Style::default().fg(theme.text()),
            ),
            Span::styled(
                format!("{:>8}", format_compact(country.population)),
                Style::default().fg(theme.highlight()),
            ),
        ]));
    }
    ranking_lines.push(Line::from(""));
    ranking_lines.push(Line::from(Span::styled(
        "Most widespread languages",
        theme.muted_style(),
    )));
    for language in &stats.top_languages {
        ranking_lines.push(Line::from(vec![
            Span::styled(
                format!("{:<24}", language.language),
                Style::default().fg(theme.text()),
            ),
            Span::styled(
                format!("{:>3} countries", language.countries),
                theme.muted_style(),
            ),
        ]));
    }

    let rankings_block = Block::default()
        .title(" Rankings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));
    frame.render_widget(
        Paragraph::new(ranking_lines).block(rankings_block),
        columns[1],
    );
}

/// Renders the help text at the bottom of the screen
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let help_spans = vec![
        Span::styled("Esc", theme.key_style()),
        Span::raw(" Back  "),
        Span::styled("r", theme.key_style()),
        Span::raw(" Refresh  "),
        Span::styled("t", theme.key_style()),
        Span::raw(" Theme  "),
        Span::styled("q", theme.key_style()),
        Span::raw(" Quit"),
    ];
    let paragraph = Paragraph::new(Line::from(help_spans)).style(theme.muted_style());
    frame.render_widget(paragraph, area);
}

/// Builds a horizontal bar of block characters for a 0.0-1.0 fraction
fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::cache::CacheStore;
    use crate::data::{Country, CountryGateway, Favorites};
    use crate::stats;
    use ratatui::{backend::TestBackend, Terminal};

    fn country(name: &str, region: &str, population: u64) -> Country {
        let mut c = Country::default();
        c.name.common = name.to_string();
        c.cca3 = name[..3].to_uppercase();
        c.region = region.to_string();
        c.population = population;
        c.languages.insert("l".to_string(), "English".to_string());
        c
    }

    fn create_test_app() -> App {
        let mut app = App::with_parts(
            CountryGateway::with_cache(CacheStore::new()).with_base_url("http://127.0.0.1:9"),
            Favorites::in_memory(),
        );
        app.state = AppState::Statistics;
        app.stats = Some(stats::compute(&[
            country("France", "Europe", 67_000_000),
            country("Brazil", "Americas", 212_000_000),
            country("Japan", "Asia", 125_000_000),
        ]));
        app
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(110, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0.0, 10), "");
        assert_eq!(bar(0.5, 10), "█████");
        assert_eq!(bar(1.0, 10), "██████████");
        // Out-of-range fractions are clamped
        assert_eq!(bar(1.5, 10), "██████████");
        assert_eq!(bar(-0.5, 10), "");
    }

    #[test]
    fn test_render_shows_totals() {
        let content = render_to_string(&create_test_app());
        assert!(content.contains("WORLD STATISTICS"));
        assert!(content.contains("3 countries"));
        assert!(content.contains("404,000,000"));
    }

    #[test]
    fn test_render_shows_regions_and_rankings() {
        let content = render_to_string(&create_test_app());
        assert!(content.contains("Americas"));
        assert!(content.contains("Most populous"));
        assert!(content.contains("Brazil"));
        assert!(content.contains("English"));
    }

    #[test]
    fn test_render_without_stats_shows_placeholder() {
        let mut app = create_test_app();
        app.stats = None;
        let content = render_to_string(&app);
        assert!(content.contains("Computing statistics"));
    }
}
