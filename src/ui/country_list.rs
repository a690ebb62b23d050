//! Country list screen rendering
//!
//! Renders the main list view showing countries for the current query with
//! flag, name, code, region, and population columns, plus the search input
//! line and a status/help footer.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::format_compact;
use crate::app::{App, ListQuery, Status};

/// Renders the country list screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing country data and selection
pub fn render_country_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Country list
            Constraint::Length(1), // Status / search input
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);
}

/// Title for the current query, with the favorites filter appended
fn list_title(app: &App) -> String {
    let base = match &app.current_query {
        ListQuery::All => "All countries".to_string(),
        ListQuery::Search(term) => format!("Search: \"{}\"", term),
        ListQuery::Region(region) => format!("Region: {}", region.label()),
    };
    if app.favorites_only {
        format!("{} — favorites only", base)
    } else {
        base
    }
}

/// Renders the application header with the current query and time
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let now = Local::now().format("%a %b %d, %H:%M").to_string();
    let separator = "─".repeat(area.width.saturating_sub(2) as usize);

    let lines = vec![
        Line::from(vec![
            Span::styled("COUNTRY ATLAS", theme.title_style()),
            Span::raw("  "),
            Span::styled(now, Style::default().fg(theme.text())),
        ]),
        Line::from(vec![
            Span::styled(list_title(app), Style::default().fg(theme.text())),
            Span::styled(
                format!("  ({} shown)", app.visible_count()),
                theme.muted_style(),
            ),
        ]),
        Line::from(Span::styled(separator, theme.muted_style())),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the country rows
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let countries = app.visible_countries();

    let visible_height = area.height.saturating_sub(2) as usize;
    // Window the rows so the cursor stays on screen
    let skip = app
        .selected_index
        .saturating_sub(visible_height.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();

    if countries.is_empty() {
        let hint = if app.favorites_only {
            "No favorites yet. Press f on a country to star it."
        } else {
            "No countries loaded. Press r to retry, 0 for the full list."
        };
        lines.push(Line::from(Span::styled(hint, theme.muted_style())));
    }

    for (index, country) in countries
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible_height)
    {
        let is_selected = index == app.selected_index;

        let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸
        let star = if app.favorites.contains(&country.cca3) {
            "\u{2605} " // ★
        } else {
            "  "
        };
        let flag = country.flag.as_deref().unwrap_or("  ");

        let name_style = if is_selected {
            theme.selected_style()
        } else {
            Style::default().fg(theme.text())
        };

        let line = Line::from(vec![
            Span::styled(cursor, Style::default().fg(theme.accent())),
            Span::styled(star, Style::default().fg(theme.success())),
            Span::raw(format!("{} ", flag)),
            Span::styled(format!("{:<28}", country.name.common), name_style),
            Span::styled(format!("{:<4}", country.cca2), theme.muted_style()),
            Span::styled(format!("{:<12}", country.region), theme.muted_style()),
            Span::styled(
                format!("{:>8}", format_compact(country.population)),
                Style::default().fg(theme.highlight()),
            ),
        ]);
        lines.push(line);
    }

    let block = Block::default()
        .title(format!(" Countries ({}) ", countries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the status line (or the active search input)
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;

    let line = if app.input_mode {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.highlight())),
            Span::styled(
                format!("{}\u{258C}", app.search_input), // ▌ cursor
                Style::default().fg(theme.text()),
            ),
        ])
    } else {
        match &app.status {
            Some(Status::Error(message)) => {
                Line::from(Span::styled(message.clone(), theme.error_style()))
            }
            Some(Status::Info(message)) => {
                Line::from(Span::styled(message.clone(), theme.muted_style()))
            }
            None => Line::from(""),
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the help text at the bottom of the screen with data freshness
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let mut help_spans = vec![
        Span::styled("↑/↓", theme.key_style()),
        Span::raw(" Navigate  "),
        Span::styled("Enter", theme.key_style()),
        Span::raw(" Details  "),
        Span::styled("/", theme.key_style()),
        Span::raw(" Search  "),
        Span::styled("1-6", theme.key_style()),
        Span::raw(" Region  "),
        Span::styled("f/F", theme.key_style()),
        Span::raw(" Favorites  "),
        Span::styled("s", theme.key_style()),
        Span::raw(" Stats  "),
        Span::styled("r", theme.key_style()),
        Span::raw(" Refresh  "),
        Span::styled("?", theme.key_style()),
        Span::raw(" Help  "),
        Span::styled("q", theme.key_style()),
        Span::raw(" Quit"),
    ];

    if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Data: {}m ago", mins_ago)
        } else {
            format!(" │ Data: {}h ago", elapsed.num_hours())
        };
        help_spans.push(Span::styled(freshness_text, theme.muted_style()));
    }

    let paragraph = Paragraph::new(Line::from(help_spans)).style(theme.muted_style());
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::cache::CacheStore;
    use crate::data::{Country, CountryGateway, Favorites};
    use ratatui::{backend::TestBackend, Terminal};

    fn country(name: &str, cca2: &str, cca3: &str, region: &str, population: u64) -> Country {
        let mut c = Country::default();
        c.name.common = name.to_string();
        c.cca2 = cca2.to_string();
        c.cca3 = cca3.to_string();
        c.region = region.to_string();
        c.population = population;
        c
    }

    fn create_test_app() -> App {
        let mut app = App::with_parts(
            CountryGateway::with_cache(CacheStore::new()).with_base_url("http://127.0.0.1:9"),
            Favorites::in_memory(),
        );
        app.state = AppState::CountryList;
        app.countries = vec![
            country("France", "FR", "FRA", "Europe", 67_391_582),
            country("Japan", "JP", "JPN", "Asia", 125_800_000),
        ];
        app
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_country_list(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_produces_non_empty_buffer() {
        let content = render_to_string(&create_test_app());
        assert!(content.contains("COUNTRY ATLAS"));
        assert!(content.contains("France"));
        assert!(content.contains("Japan"));
    }

    #[test]
    fn test_selected_item_has_cursor() {
        let content = render_to_string(&create_test_app());
        assert!(content.contains('\u{25B8}'), "Cursor indicator should render");
    }

    #[test]
    fn test_populations_are_compact() {
        let content = render_to_string(&create_test_app());
        assert!(content.contains("67.4M"));
        assert!(content.contains("125.8M"));
    }

    #[test]
    fn test_favorite_star_is_rendered() {
        let mut app = create_test_app();
        app.favorites.toggle("FRA");
        let content = render_to_string(&app);
        assert!(content.contains('\u{2605}'), "Star should render for favorites");
    }

    #[test]
    fn test_error_status_is_rendered() {
        let mut app = create_test_app();
        app.status = Some(Status::Error("request for `all` failed".to_string()));
        let content = render_to_string(&app);
        assert!(content.contains("request for `all` failed"));
    }

    #[test]
    fn test_search_input_is_rendered() {
        let mut app = create_test_app();
        app.input_mode = true;
        app.search_input = "jap".to_string();
        let content = render_to_string(&app);
        assert!(content.contains("Search: jap"));
    }

    #[test]
    fn test_empty_list_shows_hint() {
        let mut app = create_test_app();
        app.countries.clear();
        let content = render_to_string(&app);
        assert!(content.contains("No countries loaded"));
    }

    #[test]
    fn test_empty_favorites_shows_hint() {
        let mut app = create_test_app();
        app.favorites_only = true;
        let content = render_to_string(&app);
        assert!(content.contains("No favorites yet"));
    }

    #[test]
    fn test_region_query_title() {
        let mut app = create_test_app();
        app.current_query = ListQuery::Region(crate::data::Region::Europe);
        let content = render_to_string(&app);
        assert!(content.contains("Region: Europe"));
    }

    #[test]
    fn test_help_text_is_rendered() {
        let content = render_to_string(&create_test_app());
        assert!(content.contains("Navigate"));
        assert!(content.contains("Quit"));
    }
}
