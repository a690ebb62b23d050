//! Country detail screen rendering
//!
//! Renders the full record for one country: name forms, geography,
//! population, currencies, languages, and a selectable row of bordering
//! countries for onward navigation.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::group_digits;
use crate::app::{App, CountryDetailData, Status};

/// Renders the country detail screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state
/// * `code` - The alpha code the view was opened with
pub fn render(frame: &mut Frame, app: &App, code: &str) {
    let area = frame.area();

    let Some(detail) = app.detail.as_ref() else {
        render_placeholder(frame, app, code, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Overview and culture columns
            Constraint::Length(4), // Borders
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, app, detail, chunks[0]);
    render_body(frame, app, detail, chunks[1]);
    render_borders(frame, app, detail, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);
}

/// Renders the view shown before data arrives or after a failed lookup
fn render_placeholder(frame: &mut Frame, app: &App, code: &str, area: Rect) {
    let theme = app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let (message, style) = match &app.status {
        Some(Status::Error(message)) => (message.clone(), theme.error_style()),
        _ => (
            format!("Loading country \"{}\"...", code),
            Style::default().fg(theme.accent()),
        ),
    };

    let paragraph = Paragraph::new(message)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[1]);
}

/// Renders the name header
fn render_header(frame: &mut Frame, app: &App, detail: &CountryDetailData, area: Rect) {
    let theme = app.theme;
    let country = &detail.country;

    let star = if app.favorites.contains(&country.cca3) {
        "\u{2605} " // ★
    } else {
        ""
    };
    let flag = country.flag.as_deref().unwrap_or("");
    let separator = "─".repeat(area.width.saturating_sub(2) as usize);

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", flag)),
            Span::styled(country.name.common.clone(), theme.title_style()),
            Span::styled(format!("  {}", country.name.official), theme.muted_style()),
            Span::styled(format!("  {}", star), Style::default().fg(theme.success())),
        ]),
        Line::from(Span::styled(
            format!("{} / {}", country.cca2, country.cca3),
            theme.muted_style(),
        )),
        Line::from(Span::styled(separator, theme.muted_style())),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the overview and culture columns
fn render_body(frame: &mut Frame, app: &App, detail: &CountryDetailData, area: Rect) {
    let theme = app.theme;
    let country = &detail.country;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let field = |label: &str, value: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<13}", label), theme.muted_style()),
            Span::styled(value, Style::default().fg(theme.text())),
        ])
    };

    let coordinates = if country.latlng.len() == 2 {
        format!("{:.1}, {:.1}", country.latlng[0], country.latlng[1])
    } else {
        "—".to_string()
    };

    let mut overview = vec![
        field("Capital", country.capital_display()),
        field(
            "Region",
            match &country.subregion {
                Some(subregion) => format!("{} ({})", country.region, subregion),
                None => country.region.clone(),
            },
        ),
        field("Population", group_digits(country.population)),
        field("Area", format!("{} km²", group_digits(country.area as u64))),
        field("Coordinates", coordinates),
        field(
            "UN member",
            if country.un_member { "yes" } else { "no" }.to_string(),
        ),
    ];
    if !country.tld.is_empty() {
        overview.push(field("TLD", country.tld.join(", ")));
    }

    let overview_block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));
    frame.render_widget(Paragraph::new(overview).block(overview_block), columns[0]);

    let mut culture: Vec<Line> = Vec::new();
    let currencies = country.currency_names();
    culture.push(Line::from(Span::styled("Currencies", theme.muted_style())));
    if currencies.is_empty() {
        culture.push(Line::from(Span::styled("  —", theme.muted_style())));
    }
    for currency in currencies {
        culture.push(Line::from(Span::styled(
            format!("  {}", currency),
            Style::default().fg(theme.text()),
        )));
    }
    culture.push(Line::from(""));
    culture.push(Line::from(Span::styled("Languages", theme.muted_style())));
    let languages = country.language_names();
    if languages.is_empty() {
        culture.push(Line::from(Span::styled("  —", theme.muted_style())));
    }
    for language in languages {
        culture.push(Line::from(Span::styled(
            format!("  {}", language),
            Style::default().fg(theme.text()),
        )));
    }
    if let Some(alt) = &country.flags.alt {
        culture.push(Line::from(""));
        culture.push(Line::from(Span::styled(alt.clone(), theme.muted_style())));
    }

    let culture_block = Block::default()
        .title(" Currencies & Languages ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));
    frame.render_widget(
        Paragraph::new(culture)
            .block(culture_block)
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}

/// Renders the selectable row of bordering countries
fn render_borders(frame: &mut Frame, app: &App, detail: &CountryDetailData, area: Rect) {
    let theme = app.theme;

    let mut spans: Vec<Span> = Vec::new();
    if detail.borders.is_empty() {
        spans.push(Span::styled("No land borders", theme.muted_style()));
    }
    for (index, (code, name)) in detail.borders.iter().enumerate() {
        let style = if index == app.border_index {
            theme.selected_style()
        } else {
            Style::default().fg(theme.text())
        };
        spans.push(Span::styled(format!(" {} ({}) ", name, code), style));
        if index + 1 < detail.borders.len() {
            spans.push(Span::styled("·", theme.muted_style()));
        }
    }

    let block = Block::default()
        .title(format!(" Borders ({}) ", detail.borders.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Renders the status line
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let line = match &app.status {
        Some(Status::Error(message)) => {
            Line::from(Span::styled(message.clone(), theme.error_style()))
        }
        Some(Status::Info(message)) => {
            Line::from(Span::styled(message.clone(), theme.muted_style()))
        }
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the help text at the bottom of the screen
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let help_spans = vec![
        Span::styled("←/→", theme.key_style()),
        Span::raw(" Border  "),
        Span::styled("Enter", theme.key_style()),
        Span::raw(" Open border  "),
        Span::styled("f", theme.key_style()),
        Span::raw(" Favorite  "),
        Span::styled("r", theme.key_style()),
        Span::raw(" Refresh  "),
        Span::styled("Esc", theme.key_style()),
        Span::raw(" Back  "),
        Span::styled("q", theme.key_style()),
        Span::raw(" Quit"),
    ];
    let paragraph = Paragraph::new(Line::from(help_spans)).style(theme.muted_style());
    frame.render_widget(paragraph, area);
}
