use crate::model::Recipe;
use crate::steps::RenderedBlock;
use serde::Serialize;

/// Everything the presentation layer needs to paint one recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard<'a> {
    pub recipe: &'a Recipe,
    pub is_favorite: bool,
    pub ingredients_expanded: bool,
    pub steps_expanded: bool,
    /// Rendered step tree, present only while the steps panel is open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<RenderedBlock>,
}

/// The ordered result of one pipeline pass.
///
/// Painted wholesale on every render; nothing here is patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<'a> {
    pub cards: Vec<RecipeCard<'a>>,
    /// Size of the whole catalog, before search and filter
    pub total: usize,
}

impl View<'_> {
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.cards.iter().map(|card| card.recipe.id).collect()
    }

    /// The "Showing X of Y recipes" line.
    pub fn counter_text(&self) -> String {
        counter_text(self.count(), self.total)
    }
}

pub(crate) fn counter_text(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} recipes")
}
