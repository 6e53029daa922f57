//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! Exposes the browser shell as an object with interior locking, and flattens
//! recursive step trees into depth-tagged lines, since records crossing the
//! boundary cannot nest themselves.

use crate::browser::RecipeBrowser;
use crate::config::{BrowserConfig, ConfigError};
use crate::model::{Catalog, CatalogError};
use crate::pipeline::{RecipeCard, View};
use crate::session::SectionKind;
use crate::steps::FlatStep;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum BrowserError {
    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },
}

impl From<CatalogError> for BrowserError {
    fn from(e: CatalogError) -> Self {
        BrowserError::CatalogError {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for BrowserError {
    fn from(e: ConfigError) -> Self {
        BrowserError::ConfigError {
            message: e.to_string(),
        }
    }
}

/// A collapsible panel on a recipe card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSectionKind {
    Ingredients,
    Steps,
}

impl From<FfiSectionKind> for SectionKind {
    fn from(kind: FfiSectionKind) -> Self {
        match kind {
            FfiSectionKind::Ingredients => SectionKind::Ingredients,
            FfiSectionKind::Steps => SectionKind::Steps,
        }
    }
}

/// One step line; `depth` 0 belongs to the top-level list.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiStepLine {
    pub depth: u32,
    pub text: String,
}

impl From<FlatStep> for FfiStepLine {
    fn from(line: FlatStep) -> Self {
        FfiStepLine {
            depth: line.depth as u32,
            text: line.text,
        }
    }
}

/// FFI-safe representation of a recipe card.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipeCard {
    pub id: u32,
    pub title: String,
    /// Preparation time in minutes
    pub time: u32,
    /// Category label, e.g. "veg" or "hard"
    pub category: String,
    pub rating: Option<f64>,
    pub ingredients: Vec<String>,
    pub is_favorite: bool,
    pub ingredients_expanded: bool,
    pub steps_expanded: bool,
    /// Flattened step tree; empty while the steps panel is closed
    pub steps: Vec<FfiStepLine>,
}

impl From<&RecipeCard<'_>> for FfiRecipeCard {
    fn from(card: &RecipeCard<'_>) -> Self {
        let recipe = card.recipe;
        FfiRecipeCard {
            id: recipe.id,
            title: recipe.title.clone(),
            time: recipe.time,
            category: recipe.category.to_string(),
            rating: recipe.rating,
            ingredients: recipe.ingredients.clone(),
            is_favorite: card.is_favorite,
            ingredients_expanded: card.ingredients_expanded,
            steps_expanded: card.steps_expanded,
            steps: card
                .steps
                .as_ref()
                .map(|block| block.flatten().into_iter().map(FfiStepLine::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// FFI-safe representation of a rendered view.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiView {
    pub cards: Vec<FfiRecipeCard>,
    pub count: u32,
    pub total: u32,
    pub counter_text: String,
}

impl From<&View<'_>> for FfiView {
    fn from(view: &View<'_>) -> Self {
        FfiView {
            cards: view.cards.iter().map(FfiRecipeCard::from).collect(),
            count: view.count() as u32,
            total: view.total as u32,
            counter_text: view.counter_text(),
        }
    }
}

/// A browsing session usable from Swift, Kotlin and friends.
///
/// Debounce timing is expressed in milliseconds since the session was
/// created, so hosts can pass their own monotonic clock readings.
#[derive(uniffi::Object)]
pub struct FfiRecipeBrowser {
    inner: Mutex<RecipeBrowser>,
    created: Instant,
}

impl FfiRecipeBrowser {
    fn wrap(browser: RecipeBrowser) -> Arc<Self> {
        Arc::new(FfiRecipeBrowser {
            inner: Mutex::new(browser),
            created: Instant::now(),
        })
    }

    // Actions never leave the session half-updated, so a poisoned lock is
    // still safe to use.
    fn lock(&self) -> MutexGuard<'_, RecipeBrowser> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn at(&self, elapsed_ms: u64) -> Instant {
        self.created + Duration::from_millis(elapsed_ms)
    }
}

#[uniffi::export]
impl FfiRecipeBrowser {
    /// Creates a session over the built-in sample catalog.
    ///
    /// Favorites are kept in `favorites_path` when given, in memory otherwise.
    #[uniffi::constructor]
    pub fn new(favorites_path: Option<String>) -> Arc<Self> {
        let config = BrowserConfig {
            favorites_path: favorites_path.map(Into::into),
            ..Default::default()
        };
        Self::wrap(RecipeBrowser::from_config(Catalog::sample(), &config))
    }

    /// Creates a session over a YAML catalog with optional YAML config.
    #[uniffi::constructor]
    pub fn from_yaml(
        catalog_yaml: String,
        config_yaml: Option<String>,
    ) -> Result<Arc<Self>, BrowserError> {
        let catalog = Catalog::from_yaml_str(&catalog_yaml)?;
        let config = match config_yaml {
            Some(yaml) => BrowserConfig::from_yaml_str(&yaml)?,
            None => BrowserConfig::default(),
        };
        Ok(Self::wrap(RecipeBrowser::from_config(catalog, &config)))
    }

    /// Creates a session over a JSON catalog with optional YAML config.
    ///
    /// JSON catalogs may nest steps deeper than YAML ones.
    #[uniffi::constructor]
    pub fn from_json(
        catalog_json: String,
        config_yaml: Option<String>,
    ) -> Result<Arc<Self>, BrowserError> {
        let catalog = Catalog::from_json_str(&catalog_json)?;
        let config = match config_yaml {
            Some(yaml) => BrowserConfig::from_yaml_str(&yaml)?,
            None => BrowserConfig::default(),
        };
        Ok(Self::wrap(RecipeBrowser::from_config(catalog, &config)))
    }

    pub fn select_filter(&self, value: String) {
        self.lock().select_filter(&value);
    }

    pub fn select_sort(&self, value: String) {
        self.lock().select_sort(&value);
    }

    /// Current filter value, e.g. "quick".
    pub fn filter(&self) -> String {
        self.lock().state().filter.to_string()
    }

    /// Current sort value, e.g. "time".
    pub fn sort(&self) -> String {
        self.lock().state().sort.to_string()
    }

    pub fn search_query(&self) -> String {
        self.lock().state().search_query().to_string()
    }

    /// Records search text typed at `elapsed_ms`.
    pub fn input_search(&self, text: String, elapsed_ms: u64) {
        let now = self.at(elapsed_ms);
        self.lock().input_search(&text, now);
    }

    /// Applies settled search text; true means the view should be refreshed.
    pub fn flush_search(&self, elapsed_ms: u64) -> bool {
        let now = self.at(elapsed_ms);
        self.lock().flush_search(now)
    }

    /// Milliseconds since creation at which pending search text settles.
    pub fn pending_search_deadline_ms(&self) -> Option<u64> {
        self.lock()
            .pending_search_deadline()
            .map(|deadline| deadline.saturating_duration_since(self.created).as_millis() as u64)
    }

    pub fn clear_search(&self) {
        self.lock().clear_search();
    }

    pub fn toggle_favorite(&self, id: u32) -> bool {
        self.lock().toggle_favorite(id)
    }

    pub fn toggle_section(&self, id: u32, section: FfiSectionKind) -> bool {
        self.lock().toggle_section(id, section.into())
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn render(&self) -> FfiView {
        FfiView::from(&self.lock().render())
    }

    pub fn counter_text(&self) -> String {
        self.lock().counter_text()
    }
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
