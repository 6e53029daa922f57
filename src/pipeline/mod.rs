use crate::model::{Catalog, Recipe};
use crate::session::{Filter, SectionKind, SessionState, SortOrder};
use crate::steps::render_steps;
use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

mod model;
pub use model::{RecipeCard, View};

/// Recipes taking at most this many minutes pass the quick filter.
pub const DEFAULT_QUICK_MAX_MINUTES: u32 = 30;

/// Tunables for the view pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub quick_max_minutes: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            quick_max_minutes: DEFAULT_QUICK_MAX_MINUTES,
        }
    }
}

/// Keep recipes whose title or any ingredient contains `query`,
/// ignoring case. An empty query keeps everything.
pub fn search<'a>(recipes: &[&'a Recipe], query: &str) -> Vec<&'a Recipe> {
    if query.is_empty() {
        return recipes.to_vec();
    }

    let query = query.to_lowercase();
    recipes
        .iter()
        .copied()
        .filter(|recipe| recipe.mentions_lowercase(&query))
        .collect()
}

/// Keep recipes selected by `filter`.
pub fn filter<'a>(
    recipes: &[&'a Recipe],
    filter: Filter,
    favorites: &BTreeSet<u32>,
    options: &PipelineOptions,
) -> Vec<&'a Recipe> {
    let keep = |recipe: &Recipe| match filter {
        Filter::All => true,
        Filter::Category(category) => recipe.category == category,
        Filter::Quick => recipe.time <= options.quick_max_minutes,
        Filter::Favorites => favorites.contains(&recipe.id),
    };

    recipes.iter().copied().filter(|r| keep(*r)).collect()
}

/// Return a newly ordered copy of `recipes`. All orderings are stable.
pub fn sort<'a>(recipes: &[&'a Recipe], order: SortOrder) -> Vec<&'a Recipe> {
    let mut sorted = recipes.to_vec();
    match order {
        SortOrder::None => {}
        SortOrder::Name => sorted.sort_by_cached_key(|r| collation_key(&r.title)),
        SortOrder::Time => sorted.sort_by_key(|r| r.time),
        SortOrder::Rating => sorted.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a))),
    }
    sorted
}

/// Search, then filter, then sort.
pub fn run<'a>(
    recipes: &'a [Recipe],
    state: &SessionState,
    options: &PipelineOptions,
) -> Vec<&'a Recipe> {
    let all: Vec<&Recipe> = recipes.iter().collect();
    let found = search(&all, state.search_query());
    let kept = filter(&found, state.filter, state.favorite_ids(), options);
    sort(&kept, state.sort)
}

/// Derive the full view model for the current session.
///
/// Step trees are rendered only for cards whose steps panel is open.
pub fn render<'a>(catalog: &'a Catalog, state: &SessionState, options: &PipelineOptions) -> View<'a> {
    let cards = run(catalog.recipes(), state, options)
        .into_iter()
        .map(|recipe| {
            let steps_expanded = state.is_expanded(recipe.id, SectionKind::Steps);
            RecipeCard {
                recipe,
                is_favorite: state.is_favorite(recipe.id),
                ingredients_expanded: state.is_expanded(recipe.id, SectionKind::Ingredients),
                steps_expanded,
                steps: steps_expanded.then(|| render_steps(&recipe.steps, 0)),
            }
        })
        .collect();

    View {
        cards,
        total: catalog.len(),
    }
}

/// Sort key for titles, compared in three tiers: letters with accents and
/// case folded away, so "Éclair" sorts next to "eclair" rather than after
/// "zucchini"; then unaccented before accented; then lowercase before
/// uppercase. Titles equal on all tiers keep their input order.
fn collation_key(title: &str) -> (String, String, Vec<bool>) {
    let letters = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    let accents = title.nfd().flat_map(char::to_lowercase).collect();
    let uppercase = title.chars().map(char::is_uppercase).collect();
    (letters, accents, uppercase)
}

// Unrated recipes sort after every rated one.
fn rating_key(recipe: &Recipe) -> f64 {
    recipe.rating.unwrap_or(f64::NEG_INFINITY)
}
