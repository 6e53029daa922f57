pub mod browser;
pub mod config;
pub mod debounce;
pub mod favorites;
pub mod ffi;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod steps;

pub use browser::RecipeBrowser;
pub use config::{BrowserConfig, ConfigError};
pub use debounce::Debouncer;
pub use favorites::{FavoritesError, FavoritesStore, FileFavoritesStore, MemoryFavoritesStore};
pub use model::*;
pub use pipeline::{render, PipelineOptions, RecipeCard, View};
pub use session::{Filter, SectionKind, SessionState, SortOrder};
pub use steps::{render_steps, FlatStep, RenderedBlock, RenderedItem};

uniffi::setup_scaffolding!();
