use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::assistant::Recommendation;
use crate::catalog::{unique_genres, ContentRecord};
use crate::errors::SnapshotError;
use crate::filter::{continue_watching, filter_content};
use crate::pagination::{page_slice, total_pages, PAGE_SIZE};
use crate::snapshot::Snapshot;
use crate::state::{Prefs, ViewState};
use crate::store::{LoadedState, PersistStore};

pub use crate::state::CategoryFilter;

/// Delay between the last filter change and the catalog viewport snapping
/// back to the top. A new filter change supersedes the pending deadline, so
/// a burst of changes scrolls once.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

/// Completions delivered into the event loop from spawned tasks.
#[derive(Debug)]
pub enum AsyncAction {
    SummaryReady(u32, String),
    RecommendationReady(Recommendation),
    ImportLoaded(Result<Snapshot, SnapshotError>),
}

/// Work the event loop must spawn on behalf of a key press.
#[derive(Debug)]
pub enum Command {
    Summarize(ContentRecord),
    Recommend(String, Vec<ContentRecord>),
    ImportFile(PathBuf),
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum CurrentScreen {
    Browse,    // Catalog grid with filters, search, pagination
    Detail,    // One item: description, rating, progress, summary
    Assistant, // Chat with the recommender
    Settings,  // Import/export
}

#[derive(PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Id of the item the model recommended, if any.
    pub recommended: Option<u32>,
}

pub struct App {
    // Persisted entities, owned by the root.
    pub catalog: Vec<ContentRecord>,
    pub prefs: Prefs,
    store: Option<PersistStore>,

    // Transient view selection.
    pub view: ViewState,

    // Derived lists, recomputed only when their inputs change.
    pub filtered: Vec<ContentRecord>,
    pub continue_watching: Vec<ContentRecord>,
    pub genres: Vec<String>,

    pub current_screen: CurrentScreen,
    pub input_mode: InputMode,
    pub should_quit: bool,

    // Browse screen
    pub search_input: Input,
    pub selected_index: usize,
    pub grid_list_state: ListState,
    scroll_deadline: Option<Instant>,

    // Genre picker overlay
    pub show_genre_picker: bool,
    pub selected_genre_index: usize,
    pub genre_list_state: ListState,

    // Help overlay
    pub show_help: bool,

    // Detail screen
    pub detail_id: Option<u32>,
    pub summary: Option<String>,
    pub summary_loading: bool,

    // Assistant screen
    pub assistant_available: bool,
    pub chat_messages: Vec<ChatMessage>,
    pub chat_input: Input,
    pub chat_busy: bool,
    pub chat_scroll: u16,

    // Settings screen
    pub import_input: Input,
    pub settings_status: Option<String>,
    pub settings_error: Option<String>,
}

impl App {
    pub fn new(loaded: LoadedState, store: Option<PersistStore>) -> App {
        let genres = unique_genres(&loaded.catalog);
        let mut app = App {
            catalog: loaded.catalog,
            prefs: loaded.prefs,
            store,
            view: ViewState::new(),
            filtered: Vec::new(),
            continue_watching: Vec::new(),
            genres,
            current_screen: CurrentScreen::Browse,
            input_mode: InputMode::Normal,
            should_quit: false,
            search_input: Input::default(),
            selected_index: 0,
            grid_list_state: ListState::default(),
            scroll_deadline: None,
            show_genre_picker: false,
            selected_genre_index: 0,
            genre_list_state: ListState::default(),
            show_help: false,
            detail_id: None,
            summary: None,
            summary_loading: false,
            assistant_available: false,
            chat_messages: Vec::new(),
            chat_input: Input::default(),
            chat_busy: false,
            chat_scroll: 0,
            import_input: Input::default(),
            settings_status: None,
            settings_error: None,
        };
        app.refresh_filtered();
        app.refresh_continue_watching();
        // Startup is not a mutation: no write-through here, or defaults would
        // overwrite a store that failed to load.
        app.scroll_deadline = None;
        app
    }

    // ---- derived state ----

    /// Recompute the filtered list. Callers are the mutators whose inputs
    /// feed it: filter/genre/query changes, watchlist toggles, and catalog
    /// replacement. Rating and progress changes never land here.
    fn refresh_filtered(&mut self) {
        self.filtered = filter_content(
            &self.catalog,
            self.view.filter,
            &self.view.genre,
            &self.view.query,
            &self.prefs.watchlist,
        );
        // A shrink can strand the page past the end (e.g. un-watchlisting
        // the last item of the last page). Clamp to the last valid page.
        let pages = self.total_pages();
        if pages > 0 && self.view.page > pages {
            self.view.page = pages;
        }
        self.clamp_selection();
    }

    fn refresh_continue_watching(&mut self) {
        self.continue_watching = continue_watching(&self.catalog, &self.prefs.progress);
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), PAGE_SIZE)
    }

    /// The slice of the filtered list the grid renders.
    pub fn visible_page(&self) -> &[ContentRecord] {
        page_slice(&self.filtered, self.view.page, PAGE_SIZE).unwrap_or(&[])
    }

    /// First catalog record; rendered as the hero banner.
    pub fn featured(&self) -> Option<&ContentRecord> {
        self.catalog.first()
    }

    pub fn selected_item(&self) -> Option<&ContentRecord> {
        self.visible_page().get(self.selected_index)
    }

    pub fn detail_item(&self) -> Option<&ContentRecord> {
        let id = self.detail_id?;
        self.catalog.iter().find(|i| i.id == id)
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_page().len();
        if len == 0 {
            self.selected_index = 0;
            self.grid_list_state.select(None);
        } else {
            if self.selected_index >= len {
                self.selected_index = len - 1;
            }
            self.grid_list_state.select(Some(self.selected_index));
        }
    }

    // ---- persistence ----

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.save(&self.catalog, &self.prefs);
        }
    }

    // ---- facet mutations (reset page, debounce the scroll) ----

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.view.set_filter(filter);
        self.refresh_filtered();
        self.arm_scroll();
    }

    pub fn set_genre(&mut self, genre: String) {
        self.view.set_genre(genre);
        self.refresh_filtered();
        self.arm_scroll();
    }

    pub fn set_query(&mut self, query: String) {
        self.view.set_query(query);
        self.refresh_filtered();
        self.arm_scroll();
    }

    fn arm_scroll(&mut self) {
        // Supersedes any pending deadline: one scroll per burst.
        self.scroll_deadline = Some(Instant::now() + SCROLL_DEBOUNCE);
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.scroll_deadline.is_some()
    }

    /// Called once per event-loop tick. Fires the deferred scroll when the
    /// debounce window has settled.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.scroll_deadline {
            if now >= deadline {
                self.scroll_deadline = None;
                self.scroll_to_top();
            }
        }
    }

    fn scroll_to_top(&mut self) {
        self.selected_index = 0;
        self.grid_list_state = ListState::default();
        if !self.visible_page().is_empty() {
            self.grid_list_state.select(Some(0));
        }
    }

    // ---- pagination ----

    /// Apply a page change. Out-of-range requests are a silent no-op; a
    /// successful change scrolls immediately (no debounce for page moves).
    pub fn request_page(&mut self, page: usize) {
        if page_slice(&self.filtered, page, PAGE_SIZE).is_none() {
            return;
        }
        self.view.page = page;
        self.scroll_to_top();
    }

    pub fn next_page(&mut self) {
        self.request_page(self.view.page + 1);
    }

    pub fn previous_page(&mut self) {
        if self.view.page > 1 {
            self.request_page(self.view.page - 1);
        }
    }

    // ---- preference mutations (write-through) ----

    pub fn toggle_watchlist(&mut self, id: u32) {
        self.prefs.toggle_watchlist(id);
        if self.view.filter == CategoryFilter::Watchlist {
            // Membership is a filter input only for the Watchlist tab.
            self.refresh_filtered();
        }
        self.persist();
    }

    pub fn set_rating(&mut self, id: u32, stars: u8) {
        self.prefs.set_rating(id, stars);
        self.persist();
    }

    pub fn set_progress(&mut self, id: u32, pct: f32) {
        self.prefs.set_progress(id, pct);
        self.refresh_continue_watching();
        self.persist();
    }

    // ---- import / export ----

    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.catalog, &self.prefs)
    }

    /// Replace all four entities wholesale and reset the view. Only called
    /// with an already-validated snapshot, so this cannot partially apply.
    pub fn apply_import(&mut self, snapshot: Snapshot) {
        let (catalog, prefs) = snapshot.into_state();
        self.catalog = catalog;
        self.prefs = prefs;
        self.genres = unique_genres(&self.catalog);
        self.view.reset();
        self.search_input = Input::default();
        self.refresh_filtered();
        self.refresh_continue_watching();
        self.scroll_to_top();
        // A successful import closes the settings screen.
        self.current_screen = CurrentScreen::Browse;
        self.settings_error = None;
        self.settings_status = Some("Import complete.".to_string());
        self.persist();
    }

    // ---- async completions ----

    pub fn handle_async_action(&mut self, action: AsyncAction) {
        match action {
            AsyncAction::SummaryReady(id, text) => {
                self.summary_loading = false;
                // Ignore a summary for an item the user already left.
                if self.detail_id == Some(id) {
                    self.summary = Some(text);
                }
            }
            AsyncAction::RecommendationReady(rec) => {
                self.chat_busy = false;
                self.chat_messages.push(ChatMessage {
                    role: ChatRole::Model,
                    text: rec.explanation,
                    recommended: rec.recommended_content_id,
                });
            }
            AsyncAction::ImportLoaded(Ok(snapshot)) => {
                self.apply_import(snapshot);
            }
            AsyncAction::ImportLoaded(Err(err)) => {
                self.settings_status = None;
                self.settings_error = Some(err.user_message());
            }
        }
    }

    /// Last recommendation the model made that names an item, if any.
    pub fn last_recommended_item(&self) -> Option<&ContentRecord> {
        let id = self
            .chat_messages
            .iter()
            .rev()
            .find_map(|m| m.recommended)?;
        self.catalog.iter().find(|i| i.id == id)
    }

    fn open_detail(&mut self, id: u32) {
        self.detail_id = Some(id);
        self.summary = None;
        self.summary_loading = false;
        self.current_screen = CurrentScreen::Detail;
    }

    // ---- key handling ----

    /// Handle a key event and return the async work it requires, if any.
    /// Keeps the logic testable without running the full TUI.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Command> {
        if self.show_help {
            self.show_help = false;
            return None;
        }
        if self.show_genre_picker {
            self.handle_genre_picker_key(key);
            return None;
        }
        match self.current_screen {
            CurrentScreen::Browse => self.handle_browse_key(key),
            CurrentScreen::Detail => self.handle_detail_key(key),
            CurrentScreen::Assistant => self.handle_assistant_key(key),
            CurrentScreen::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.input_mode == InputMode::Editing {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                }
                _ => {
                    self.search_input.handle_event(&Event::Key(key));
                    let query = self.search_input.value().to_string();
                    if query != self.view.query {
                        self.set_query(query);
                    }
                }
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('f') | KeyCode::Char('/') => self.input_mode = InputMode::Editing,
            KeyCode::Char('1') => self.set_filter(CategoryFilter::All),
            KeyCode::Char('2') => self.set_filter(CategoryFilter::Movie),
            KeyCode::Char('3') => self.set_filter(CategoryFilter::TvSeries),
            KeyCode::Char('4') => self.set_filter(CategoryFilter::TvProgram),
            KeyCode::Char('5') => self.set_filter(CategoryFilter::Watchlist),
            KeyCode::Char('g') => self.open_genre_picker(),
            KeyCode::Char('j') | KeyCode::Down => self.next_item(),
            KeyCode::Char('k') | KeyCode::Up => self.previous_item(),
            KeyCode::Char('n') | KeyCode::Right => self.next_page(),
            KeyCode::Char('p') | KeyCode::Left => self.previous_page(),
            KeyCode::Char('w') => {
                if let Some(id) = self.selected_item().map(|i| i.id) {
                    self.toggle_watchlist(id);
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_item().map(|i| i.id) {
                    self.open_detail(id);
                }
            }
            KeyCode::Char('a') => self.current_screen = CurrentScreen::Assistant,
            KeyCode::Char('s') => {
                self.settings_status = None;
                self.settings_error = None;
                self.current_screen = CurrentScreen::Settings;
            }
            KeyCode::Char('h') => self.show_help = true,
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Command> {
        let item = self.detail_item().cloned();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.detail_id = None;
                self.summary = None;
                self.current_screen = CurrentScreen::Browse;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('w') => {
                if let Some(item) = &item {
                    self.toggle_watchlist(item.id);
                }
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(item) = &item {
                    self.set_rating(item.id, c as u8 - b'0');
                }
            }
            // Stand-in for the trailer player's progress callback.
            KeyCode::Right => {
                if let Some(item) = &item {
                    let pct = self.prefs.progress(item.id) + 5.0;
                    self.set_progress(item.id, pct);
                }
            }
            KeyCode::Left => {
                if let Some(item) = &item {
                    let pct = self.prefs.progress(item.id) - 5.0;
                    self.set_progress(item.id, pct);
                }
            }
            KeyCode::Char('s') => {
                if let Some(item) = item {
                    if self.assistant_available && !self.summary_loading {
                        self.summary_loading = true;
                        return Some(Command::Summarize(item));
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn handle_assistant_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.current_screen = CurrentScreen::Browse;
            }
            KeyCode::Enter => {
                let query = self.chat_input.value().trim().to_string();
                if query.is_empty() || self.chat_busy || !self.assistant_available {
                    return None;
                }
                self.chat_input = Input::default();
                self.chat_messages.push(ChatMessage {
                    role: ChatRole::User,
                    text: query.clone(),
                    recommended: None,
                });
                self.chat_busy = true;
                return Some(Command::Recommend(query, self.catalog.clone()));
            }
            KeyCode::Up => self.chat_scroll = self.chat_scroll.saturating_sub(1),
            KeyCode::Down => self.chat_scroll = self.chat_scroll.saturating_add(1),
            // Open the item the model last recommended.
            KeyCode::Tab => {
                if let Some(id) = self.last_recommended_item().map(|i| i.id) {
                    self.open_detail(id);
                }
            }
            _ => {
                self.chat_input.handle_event(&Event::Key(key));
            }
        }
        None
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.input_mode == InputMode::Editing {
            match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                    let path = self.import_input.value().trim().to_string();
                    if !path.is_empty() {
                        self.settings_status = Some("Importing...".to_string());
                        self.settings_error = None;
                        return Some(Command::ImportFile(PathBuf::from(path)));
                    }
                }
                _ => {
                    self.import_input.handle_event(&Event::Key(key));
                }
            }
            return None;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                self.current_screen = CurrentScreen::Browse;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('e') => {
                let path = PathBuf::from(crate::snapshot::EXPORT_FILE_NAME);
                match self.export_snapshot().write_to(&path) {
                    Ok(()) => {
                        self.settings_error = None;
                        self.settings_status =
                            Some(format!("Exported to {}", path.display()));
                    }
                    Err(err) => {
                        self.settings_status = None;
                        self.settings_error = Some(err.user_message());
                    }
                }
            }
            KeyCode::Char('i') => self.input_mode = InputMode::Editing,
            _ => {}
        }
        None
    }

    fn open_genre_picker(&mut self) {
        self.show_genre_picker = true;
        self.selected_genre_index = self
            .genres
            .iter()
            .position(|g| *g == self.view.genre)
            .unwrap_or(0);
        self.genre_list_state.select(Some(self.selected_genre_index));
    }

    fn handle_genre_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.show_genre_picker = false,
            KeyCode::Char('j') | KeyCode::Down => Self::navigate_list(
                self.genres.len(),
                &mut self.selected_genre_index,
                &mut self.genre_list_state,
                true,
            ),
            KeyCode::Char('k') | KeyCode::Up => Self::navigate_list(
                self.genres.len(),
                &mut self.selected_genre_index,
                &mut self.genre_list_state,
                false,
            ),
            KeyCode::Enter => {
                if let Some(genre) = self.genres.get(self.selected_genre_index).cloned() {
                    self.set_genre(genre);
                }
                self.show_genre_picker = false;
            }
            _ => {}
        }
    }

    fn next_item(&mut self) {
        let len = self.visible_page().len();
        Self::navigate_list(
            len,
            &mut self.selected_index,
            &mut self.grid_list_state,
            true,
        );
    }

    fn previous_item(&mut self) {
        let len = self.visible_page().len();
        Self::navigate_list(
            len,
            &mut self.selected_index,
            &mut self.grid_list_state,
            false,
        );
    }

    fn navigate_list(
        len: usize,
        current_index: &mut usize,
        list_state: &mut ListState,
        forward: bool,
    ) {
        if len == 0 {
            return;
        }
        let i = match list_state.selected() {
            Some(i) => {
                if forward {
                    (i + 1) % len
                } else if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        *current_index = i;
        list_state.select(Some(i));
    }
}
