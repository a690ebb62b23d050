//! Application state management for Country Atlas CLI
//!
//! This module contains the main application state, handling keyboard input,
//! data loading through the gateway, and state transitions between views.
//! Key handling never performs I/O: it queues a pending fetch which the
//! event loop drains, so input logic stays synchronous and testable.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::StartupConfig;
use crate::data::{Country, CountryError, CountryGateway, Favorites, Region};
use crate::stats::{self, WorldStats};
use crate::ui::theme::Theme;

/// How long a "not found" detail view stays up before returning to the list
const NOT_FOUND_REDIRECT: Duration = Duration::from_secs(5);

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// List view showing countries for the current query
    CountryList,
    /// Detail view for a specific country, keyed by lowercase alpha code
    CountryDetail(String),
    /// Aggregate statistics view
    Statistics,
}

/// The query behind the current list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// All known countries
    All,
    /// Fuzzy name search
    Search(String),
    /// Countries in one region
    Region(Region),
}

/// A fetch queued by key handling, drained by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingFetch {
    /// Load the list view for a query
    LoadList(ListQuery),
    /// Load the detail view for an alpha code
    LoadDetail(String),
    /// Load the statistics view
    LoadStatistics,
    /// Clear the cache and reload the current view
    Refresh,
}

/// A user-facing status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Informational message
    Info(String),
    /// Error message
    Error(String),
}

/// Detail view contents: the country plus its resolved neighbors
#[derive(Debug, Clone)]
pub struct CountryDetailData {
    /// The country being shown
    pub country: Country,
    /// (alpha-3 code, display name) for each bordering country
    pub borders: Vec<(String, String)>,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Countries shown in the list view, sorted by common name
    pub countries: Vec<Country>,
    /// Index of the currently selected country among visible ones
    pub selected_index: usize,
    /// The query that produced the current list
    pub current_query: ListQuery,
    /// Loaded detail view data, if any
    pub detail: Option<CountryDetailData>,
    /// Index of the selected border in the detail view
    pub border_index: usize,
    /// The user's starred countries
    pub favorites: Favorites,
    /// Whether the list shows starred countries only
    pub favorites_only: bool,
    /// Current color theme
    pub theme: Theme,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Whether the search input line is active
    pub input_mode: bool,
    /// Contents of the search input line
    pub search_input: String,
    /// Current status line, if any
    pub status: Option<Status>,
    /// Timestamp of the last successful data load
    pub last_refresh: Option<DateTime<Local>>,
    /// Statistics for the statistics view, computed on entry
    pub stats: Option<WorldStats>,
    /// When to leave a failed detail view and return to the list
    error_redirect_at: Option<Instant>,
    /// Fetch queued by key handling
    pending: Option<PendingFetch>,
    /// Gateway to the country-data provider
    gateway: CountryGateway,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self::build(CountryGateway::new(), Favorites::load())
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// This is used to apply CLI arguments like --country or --stats to
    /// choose the first view. Precedence: statistics, then country detail,
    /// then region filter, then the full list.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let mut app = Self::new();
        app.pending = Some(if config.start_in_statistics {
            PendingFetch::LoadStatistics
        } else if let Some(code) = config.initial_country {
            PendingFetch::LoadDetail(code)
        } else if let Some(region) = config.initial_region {
            PendingFetch::LoadList(ListQuery::Region(region))
        } else {
            PendingFetch::LoadList(ListQuery::All)
        });
        app
    }

    /// Creates a new App instance with custom parts (for testing)
    #[cfg(test)]
    pub fn with_parts(gateway: CountryGateway, favorites: Favorites) -> Self {
        Self::build(gateway, favorites)
    }

    fn build(gateway: CountryGateway, favorites: Favorites) -> Self {
        Self {
            state: AppState::Loading,
            countries: Vec::new(),
            selected_index: 0,
            current_query: ListQuery::All,
            detail: None,
            border_index: 0,
            favorites,
            favorites_only: false,
            theme: Theme::Dark,
            should_quit: false,
            show_help: false,
            input_mode: false,
            search_input: String::new(),
            status: None,
            last_refresh: None,
            stats: None,
            error_redirect_at: None,
            pending: Some(PendingFetch::LoadList(ListQuery::All)),
            gateway,
        }
    }

    /// Returns the countries visible in the list view
    ///
    /// With the favorites filter on, only starred countries are shown.
    pub fn visible_countries(&self) -> Vec<&Country> {
        self.countries
            .iter()
            .filter(|country| !self.favorites_only || self.favorites.contains(&country.cca3))
            .collect()
    }

    /// Returns the number of visible countries
    pub fn visible_count(&self) -> usize {
        self.visible_countries().len()
    }

    /// Returns the currently selected country, if any
    pub fn selected_country(&self) -> Option<&Country> {
        self.visible_countries().get(self.selected_index).copied()
    }

    /// Takes the queued fetch, if any, for the event loop to run
    pub fn take_pending(&mut self) -> Option<PendingFetch> {
        self.pending.take()
    }

    /// Runs a queued fetch and applies its outcome to the state
    pub async fn run_pending(&mut self, action: PendingFetch) {
        match action {
            PendingFetch::LoadList(query) => self.load_list(query).await,
            PendingFetch::LoadDetail(code) => self.load_detail(&code).await,
            PendingFetch::LoadStatistics => self.load_statistics().await,
            PendingFetch::Refresh => self.refresh_current().await,
        }
    }

    /// Advances time-driven state; called once per event-loop iteration
    pub fn tick(&mut self) {
        if let Some(deadline) = self.error_redirect_at {
            if Instant::now() >= deadline {
                self.error_redirect_at = None;
                self.detail = None;
                self.state = AppState::CountryList;
            }
        }
    }

    /// Loads the list view for a query
    async fn load_list(&mut self, query: ListQuery) {
        let result = match &query {
            ListQuery::All => self.gateway.fetch_all().await,
            ListQuery::Search(term) => self.gateway.fetch_by_name(term).await,
            ListQuery::Region(region) => self.gateway.fetch_by_region(*region).await,
        };

        match result {
            Ok(mut countries) => {
                // Provider order is unspecified for display; sort by name
                countries.sort_by(|a, b| a.name.common.cmp(&b.name.common));
                self.countries = countries;
                self.selected_index = 0;
                self.current_query = query;
                self.state = AppState::CountryList;
                self.status = None;
                self.last_refresh = Some(Local::now());
            }
            Err(err) => {
                self.status = Some(Status::Error(match (&err, &query) {
                    (CountryError::NotFound { .. }, ListQuery::Search(term)) => {
                        format!("No country matches \"{}\"", term)
                    }
                    _ => err.to_string(),
                }));
                // Never strand the user on the loading screen
                if self.state == AppState::Loading {
                    self.state = AppState::CountryList;
                }
            }
        }
    }

    /// Loads the detail view for an alpha code
    async fn load_detail(&mut self, code: &str) {
        match self.gateway.fetch_by_code(code).await {
            Ok(country) => {
                let borders = self.resolve_borders(&country).await;
                self.detail = Some(CountryDetailData { country, borders });
                self.border_index = 0;
                self.state = AppState::CountryDetail(code.trim().to_lowercase());
                self.status = None;
            }
            Err(err) => self.apply_detail_error(code, err),
        }
    }

    /// Applies a detail fetch failure to the state
    ///
    /// An unknown code shows a "not found" message and schedules a return to
    /// the list view after a fixed delay. Transport failures keep the current
    /// view so the user can retry.
    fn apply_detail_error(&mut self, code: &str, err: CountryError) {
        if err.is_not_found() {
            self.detail = None;
            self.state = AppState::CountryDetail(code.trim().to_lowercase());
            self.status = Some(Status::Error(format!(
                "Country with code \"{}\" not found. Returning to the list...",
                code.trim()
            )));
            self.error_redirect_at = Some(Instant::now() + NOT_FOUND_REDIRECT);
        } else {
            self.status = Some(Status::Error(err.to_string()));
            if self.state == AppState::Loading {
                self.state = AppState::CountryList;
            }
        }
    }

    /// Resolves border codes to display names, concurrently
    ///
    /// Neighbors that cannot be fetched fall back to their raw code; a
    /// missing name should not block the detail view.
    async fn resolve_borders(&self, country: &Country) -> Vec<(String, String)> {
        let lookups = country
            .borders
            .iter()
            .map(|code| self.gateway.fetch_by_code(code));
        let results = futures::future::join_all(lookups).await;

        country
            .borders
            .iter()
            .zip(results)
            .map(|(code, result)| {
                let display = result
                    .map(|neighbor| neighbor.name.common)
                    .unwrap_or_else(|_| code.clone());
                (code.clone(), display)
            })
            .collect()
    }

    /// Loads the statistics view over the full country list
    async fn load_statistics(&mut self) {
        match self.gateway.fetch_all().await {
            Ok(countries) => {
                self.stats = Some(stats::compute(&countries));
                self.state = AppState::Statistics;
                self.status = None;
            }
            Err(err) => {
                self.status = Some(Status::Error(err.to_string()));
                if self.state == AppState::Loading {
                    self.state = AppState::CountryList;
                }
            }
        }
    }

    /// Clears the cache and reloads whatever view is current
    async fn refresh_current(&mut self) {
        self.gateway.clear_cache();
        match self.state.clone() {
            AppState::CountryDetail(code) => self.load_detail(&code).await,
            AppState::Statistics => self.load_statistics().await,
            _ => self.load_list(self.current_query.clone()).await,
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit (any view); `Esc` also quits from the list
    /// - `Up`/`k`, `Down`/`j`: Move selection in the list
    /// - `Enter`: Open detail for the selection (or selected border)
    /// - `/`: Search by name; `0`: All countries; `1`-`6`: Filter by region
    /// - `f`: Toggle favorite; `F`: Favorites-only filter
    /// - `s`: Statistics view; `t`: Toggle theme; `r`: Refresh (drops cache)
    /// - `h`/`Left`, `l`/`Right`: Select a border in the detail view
    /// - `Esc` (detail/statistics): Back to the list
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state.clone() {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::CountryList => {
                if self.input_mode {
                    self.handle_search_input(key_event);
                } else {
                    self.handle_list_key(key_event);
                }
            }
            AppState::CountryDetail(code) => self.handle_detail_key(key_event, &code),
            AppState::Statistics => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.state = AppState::CountryList;
                }
                KeyCode::Char('t') => {
                    self.theme = self.theme.toggle();
                }
                KeyCode::Char('r') => {
                    self.pending = Some(PendingFetch::Refresh);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Handles keys while the search input line is active
    fn handle_search_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.input_mode = false;
                self.search_input.clear();
            }
            KeyCode::Enter => {
                let term = self.search_input.trim().to_string();
                self.input_mode = false;
                self.search_input.clear();
                if !term.is_empty() {
                    self.pending = Some(PendingFetch::LoadList(ListQuery::Search(term)));
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }

    /// Handles keys in the list view
    fn handle_list_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }
            KeyCode::Enter => {
                if let Some(code) = self.selected_country().map(|c| c.cca3.to_lowercase()) {
                    self.pending = Some(PendingFetch::LoadDetail(code));
                }
            }
            KeyCode::Char('/') => {
                self.input_mode = true;
                self.search_input.clear();
            }
            KeyCode::Char('0') => {
                self.pending = Some(PendingFetch::LoadList(ListQuery::All));
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = (c as usize) - ('1' as usize);
                self.pending = Some(PendingFetch::LoadList(ListQuery::Region(
                    Region::ALL[index],
                )));
            }
            KeyCode::Char('f') => {
                self.toggle_selected_favorite();
            }
            KeyCode::Char('F') => {
                self.favorites_only = !self.favorites_only;
                self.selected_index = 0;
            }
            KeyCode::Char('s') => {
                self.pending = Some(PendingFetch::LoadStatistics);
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggle();
            }
            KeyCode::Char('r') => {
                self.pending = Some(PendingFetch::Refresh);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Handles keys in the detail view
    fn handle_detail_key(&mut self, key_event: KeyEvent, code: &str) {
        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.detail = None;
                self.border_index = 0;
                self.error_redirect_at = None;
                self.state = AppState::CountryList;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_border_left();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_border_right();
            }
            KeyCode::Enter => {
                let border = self
                    .detail
                    .as_ref()
                    .and_then(|d| d.borders.get(self.border_index))
                    .map(|pair| pair.0.to_lowercase());
                if let Some(border_code) = border {
                    self.pending = Some(PendingFetch::LoadDetail(border_code));
                }
            }
            KeyCode::Char('f') => {
                // Prefer the loaded record's alpha-3 code; the state key may
                // be the 2-letter form the user typed
                let code = self
                    .detail
                    .as_ref()
                    .map(|d| d.country.cca3.clone())
                    .unwrap_or_else(|| code.to_string());
                let starred = self.favorites.toggle(&code);
                self.status = Some(Status::Info(if starred {
                    "Added to favorites".to_string()
                } else {
                    "Removed from favorites".to_string()
                }));
            }
            KeyCode::Char('s') => {
                self.pending = Some(PendingFetch::LoadStatistics);
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggle();
            }
            KeyCode::Char('r') => {
                self.pending = Some(PendingFetch::Refresh);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Toggles the favorite state of the selected country
    fn toggle_selected_favorite(&mut self) {
        if let Some(code) = self.selected_country().map(|c| c.cca3.clone()) {
            self.favorites.toggle(&code);
            if self.favorites_only {
                // The visible list may have shrunk; keep the cursor in bounds
                let count = self.visible_count();
                if count == 0 {
                    self.selected_index = 0;
                } else if self.selected_index >= count {
                    self.selected_index = count - 1;
                }
            }
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the border selection left, wrapping at the start
    fn move_border_left(&mut self) {
        let count = self.detail.as_ref().map(|d| d.borders.len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        if self.border_index == 0 {
            self.border_index = count - 1;
        } else {
            self.border_index -= 1;
        }
    }

    /// Moves the border selection right, wrapping at the end
    fn move_border_right(&mut self) {
        let count = self.detail.as_ref().map(|d| d.borders.len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        self.border_index = (self.border_index + 1) % count;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
