//! Persistence of favorite recipe ids.
//!
//! Favorites are stored as a JSON array of integer ids, e.g. `[2,5,8]`.
//! Reading never fails: a missing, unreadable or malformed record loads as
//! an empty set.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when writing favorites.
#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to write favorites: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to serialize favorites: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Key-value storage for the favorite set.
pub trait FavoritesStore: Send {
    /// Reads the stored set, falling back to empty on any problem.
    fn load(&self) -> BTreeSet<u32>;

    /// Replaces the stored set.
    fn save(&mut self, ids: &BTreeSet<u32>) -> Result<(), FavoritesError>;
}

/// Decodes a stored favorites record.
///
/// `null`, invalid JSON, or anything other than an array of non-negative
/// integers yields an empty set.
pub fn parse_favorites(content: &str) -> BTreeSet<u32> {
    match serde_json::from_str::<Option<Vec<u32>>>(content) {
        Ok(ids) => ids.unwrap_or_default().into_iter().collect(),
        Err(e) => {
            warn!(error = %e, "Discarding malformed favorites record");
            BTreeSet::new()
        }
    }
}

/// Encodes favorites as an ascending JSON array.
pub fn serialize_favorites(ids: &BTreeSet<u32>) -> Result<String, FavoritesError> {
    Ok(serde_json::to_string(&ids.iter().collect::<Vec<_>>())?)
}

/// Favorites kept in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileFavoritesStore {
    path: Utf8PathBuf,
}

impl FileFavoritesStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        FileFavoritesStore { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl FavoritesStore for FileFavoritesStore {
    fn load(&self) -> BTreeSet<u32> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_favorites(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path, "No favorites file yet");
                BTreeSet::new()
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "Failed to read favorites file");
                BTreeSet::new()
            }
        }
    }

    fn save(&mut self, ids: &BTreeSet<u32>) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serialize_favorites(ids)?)?;
        Ok(())
    }
}

/// Favorites kept as serialized text in memory.
///
/// Useful where the host owns its own key-value storage and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFavoritesStore {
    content: Option<String>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing serialized record.
    pub fn with_content(content: impl Into<String>) -> Self {
        MemoryFavoritesStore {
            content: Some(content.into()),
        }
    }

    /// The last saved record, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl FavoritesStore for MemoryFavoritesStore {
    fn load(&self) -> BTreeSet<u32> {
        self.content
            .as_deref()
            .map(parse_favorites)
            .unwrap_or_default()
    }

    fn save(&mut self, ids: &BTreeSet<u32>) -> Result<(), FavoritesError> {
        self.content = Some(serialize_favorites(ids)?);
        Ok(())
    }
}
