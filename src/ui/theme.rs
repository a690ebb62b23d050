//! Light and dark color themes for the TUI
//!
//! A theme maps the roles used by the render modules (text, accent, muted,
//! error) to concrete colors. Toggled at runtime with the `t` key.

use ratatui::style::{Color, Modifier, Style};

/// Available color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Switches to the other theme
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Human-readable name, shown in the footer
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Primary text color
    pub fn text(&self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Light => Color::Black,
        }
    }

    /// Color for secondary information
    pub fn muted(&self) -> Color {
        match self {
            Theme::Dark => Color::DarkGray,
            Theme::Light => Color::Gray,
        }
    }

    /// Color for titles, borders, and the selection cursor
    pub fn accent(&self) -> Color {
        match self {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::Blue,
        }
    }

    /// Color for key hints and highlighted values
    pub fn highlight(&self) -> Color {
        match self {
            Theme::Dark => Color::Yellow,
            Theme::Light => Color::Magenta,
        }
    }

    /// Color for error messages
    pub fn error(&self) -> Color {
        Color::Red
    }

    /// Color for positive markers (e.g. favorites)
    pub fn success(&self) -> Color {
        Color::Green
    }

    /// Style for view titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row
    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted())
    }

    /// Style for error messages
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error()).add_modifier(Modifier::BOLD)
    }

    /// Style for key hints in footers
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.highlight())
    }
}
