//! The application shell: owns the catalog and session and maps discrete
//! user actions onto state changes.
//!
//! Callers re-render after each action. Search text is debounced; every
//! other action takes effect immediately.

use crate::config::BrowserConfig;
use crate::debounce::Debouncer;
use crate::favorites::{FavoritesStore, FileFavoritesStore, MemoryFavoritesStore};
use crate::model::Catalog;
use crate::pipeline::{self, PipelineOptions, View};
use crate::session::{Filter, SectionKind, SessionState, SortOrder};
use std::time::Instant;
use tracing::{debug, warn};

pub struct RecipeBrowser {
    catalog: Catalog,
    state: SessionState,
    store: Box<dyn FavoritesStore>,
    search_input: Debouncer<String>,
    options: PipelineOptions,
}

impl RecipeBrowser {
    /// Starts a session over `catalog`, loading favorites from `store`.
    pub fn new(catalog: Catalog, config: &BrowserConfig, store: Box<dyn FavoritesStore>) -> Self {
        let favorites = store.load();
        debug!(
            recipes = catalog.len(),
            favorites = favorites.len(),
            "Starting recipe browser session"
        );

        RecipeBrowser {
            catalog,
            state: SessionState::new(favorites),
            store,
            search_input: Debouncer::new(config.debounce()),
            options: config.pipeline_options(),
        }
    }

    /// Like [`RecipeBrowser::new`], persisting favorites to
    /// `config.favorites_path` or, when unset, in memory.
    pub fn from_config(catalog: Catalog, config: &BrowserConfig) -> Self {
        let store: Box<dyn FavoritesStore> = match &config.favorites_path {
            Some(path) => Box::new(FileFavoritesStore::new(path.clone())),
            None => Box::new(MemoryFavoritesStore::new()),
        };
        Self::new(catalog, config, store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn select_filter(&mut self, value: &str) {
        let filter: Filter = value.parse().unwrap_or_default();
        self.state.filter = filter;
    }

    pub fn select_sort(&mut self, value: &str) {
        let sort: SortOrder = value.parse().unwrap_or_default();
        self.state.sort = sort;
    }

    /// Records a keystroke in the search box. The query is applied by a
    /// later [`flush_search`](Self::flush_search) once input has settled.
    pub fn input_search(&mut self, text: &str, now: Instant) {
        self.search_input.schedule(text.to_string(), now);
    }

    /// Applies the latest search text if its quiet period has passed.
    ///
    /// Returns true when the query changed state and a render is due.
    pub fn flush_search(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(text) => {
                self.state.set_search_query(&text);
                true
            }
            None => false,
        }
    }

    /// When a pending search becomes due, for hosts that arm a timer.
    pub fn pending_search_deadline(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    /// Empties the query right away and discards any pending input.
    pub fn clear_search(&mut self) {
        self.search_input.cancel();
        self.state.clear_search();
    }

    /// Flips a recipe's favorite flag and persists the new set.
    ///
    /// A failed write is logged; the in-memory change stands.
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        if !self.catalog.contains(id) {
            debug!(id, "Toggling favorite for a recipe outside the catalog");
        }
        let now_favorite = self.state.toggle_favorite(id);
        if let Err(e) = self.store.save(self.state.favorite_ids()) {
            warn!(id, error = %e, "Failed to persist favorites");
        }
        now_favorite
    }

    pub fn toggle_section(&mut self, id: u32, section: SectionKind) -> bool {
        self.state.toggle_expansion(id, section)
    }

    /// Back to default filter, sort and query; favorites are kept.
    pub fn reset(&mut self) {
        self.search_input.cancel();
        self.state.reset();
    }

    pub fn render(&self) -> View<'_> {
        pipeline::render(&self.catalog, &self.state, &self.options)
    }

    pub fn counter_text(&self) -> String {
        self.render().counter_text()
    }
}
