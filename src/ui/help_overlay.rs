//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::theme::Theme;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme;
    let area = frame.area();

    let overlay_width = 54;
    let overlay_height = 22;
    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", theme.title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        help_line(theme, "↑/k, ↓/j", "Move selection up/down"),
        help_line(theme, "Enter", "Open country details"),
        help_line(theme, "←/h, →/l", "Select a border (detail view)"),
        help_line(theme, "Esc", "Go back / Close"),
        help_line(theme, "q", "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "Queries",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        help_line(theme, "/", "Search by name"),
        help_line(theme, "0", "All countries"),
        help_line(theme, "1-6", "Filter by region"),
        Line::from(""),
        Line::from(Span::styled(
            "Other",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        help_line(theme, "f / F", "Star country / favorites filter"),
        help_line(theme, "s", "Statistics view"),
        help_line(theme, "t", "Toggle light/dark theme"),
        help_line(theme, "r", "Refresh (drops the cache)"),
        help_line(theme, "?", "Toggle this help"),
        Line::from(""),
        Line::from(Span::styled("Press Esc or ? to close", theme.muted_style())),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Creates a help line with key and description
fn help_line(theme: Theme, key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), theme.key_style()),
        Span::raw(description.to_string()),
    ])
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
