//! Mutable browsing state owned by the application shell.

use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which recipes the filter stage keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
    /// Recipes at or under the quick time threshold
    Quick,
    Favorites,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Category(category) => category.as_str(),
            Filter::Quick => "quick",
            Filter::Favorites => "favorites",
        }
    }
}

/// Parses a UI filter value. Unknown values select [`Filter::All`].
impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => Filter::All,
            "quick" => Filter::Quick,
            "favorites" => Filter::Favorites,
            other => match Category::from_label(other) {
                Some(category) => Filter::Category(category),
                None => {
                    debug!(value = other, "Unrecognized filter value, showing all recipes");
                    Filter::All
                }
            },
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied by the sort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Keep catalog order
    #[default]
    None,
    /// Title, ascending
    Name,
    /// Minutes, ascending
    Time,
    /// Rating, descending
    Rating,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::Name => "name",
            SortOrder::Time => "time",
            SortOrder::Rating => "rating",
        }
    }
}

/// Parses a UI sort value. `"default"` and unknown values keep catalog order.
impl FromStr for SortOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" | "default" => SortOrder::None,
            "name" => SortOrder::Name,
            "time" => SortOrder::Time,
            "rating" => SortOrder::Rating,
            other => {
                debug!(value = other, "Unrecognized sort value, keeping catalog order");
                SortOrder::None
            }
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collapsible panel on a recipe card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Ingredients,
    Steps,
}

/// Filter, sort, search, favorites and open panels for one browsing session.
///
/// Every mutation is a discrete user action; callers re-render afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub filter: Filter,
    pub sort: SortOrder,
    search_query: String,
    favorite_ids: BTreeSet<u32>,
    expanded: BTreeSet<(u32, SectionKind)>,
}

impl SessionState {
    /// Fresh state with default filter/sort, no query and the given favorites.
    pub fn new(favorite_ids: BTreeSet<u32>) -> Self {
        SessionState {
            favorite_ids,
            ..Default::default()
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Stores the query with surrounding whitespace removed.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn favorite_ids(&self) -> &BTreeSet<u32> {
        &self.favorite_ids
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorite_ids.contains(&id)
    }

    /// Adds `id` to favorites if absent, removes it otherwise.
    ///
    /// Returns whether the recipe is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        if self.favorite_ids.remove(&id) {
            false
        } else {
            self.favorite_ids.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: u32, section: SectionKind) -> bool {
        self.expanded.contains(&(id, section))
    }

    /// Opens a closed panel or closes an open one.
    ///
    /// Returns whether the panel is open afterwards.
    pub fn toggle_expansion(&mut self, id: u32, section: SectionKind) -> bool {
        let key = (id, section);
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    /// Back to defaults, keeping favorites.
    pub fn reset(&mut self) {
        let favorite_ids = std::mem::take(&mut self.favorite_ids);
        *self = SessionState::new(favorite_ids);
    }
}
