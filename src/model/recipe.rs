use super::step::Step;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of category labels a recipe can carry.
///
/// Catalogs use either a difficulty scale (`easy`, `medium`, `hard`) or a
/// diet type (`veg`, `non-veg`). Both live in one enum so a single filter
/// stage can match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Easy,
    Medium,
    Hard,
    Veg,
    NonVeg,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Easy,
        Category::Medium,
        Category::Hard,
        Category::Veg,
        Category::NonVeg,
    ];

    /// Returns the label used in catalog data and UI filter values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Easy => "easy",
            Category::Medium => "medium",
            Category::Hard => "hard",
            Category::Veg => "veg",
            Category::NonVeg => "non-veg",
        }
    }

    /// Parses a label exactly as written in data (`"non-veg"`, not `"Non-Veg"`).
    ///
    /// Returns `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry.
///
/// Recipes are read-only once loaded; identity is the `id`.
///
/// # Examples
///
/// ```
/// use recipe_browser::{Category, Recipe, Step};
///
/// let recipe = Recipe::new(1, "Omelette", 10, Category::Easy)
///     .with_rating(4.0)
///     .with_ingredients(["eggs", "salt"])
///     .with_steps(vec![Step::leaf("Beat eggs"), Step::leaf("Cook on pan")]);
///
/// assert!(recipe.mentions("EGG"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    /// Preparation time in minutes
    pub time: u32,
    #[serde(alias = "type", alias = "difficulty")]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    pub fn new(id: u32, title: impl Into<String>, time: u32, category: Category) -> Self {
        Recipe {
            id,
            title: title.into(),
            time,
            category,
            rating: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// Case-insensitive substring match against the title or any ingredient.
    ///
    /// An empty needle matches every recipe.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.mentions_lowercase(&needle)
    }

    /// Same as [`Recipe::mentions`] for a needle that is already lower-cased.
    pub(crate) fn mentions_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .ingredients
                .iter()
                .any(|ing| ing.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_category_labels() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_label("non-veg"), Some(Category::NonVeg));
        assert_eq!(Category::from_label("Veg"), None);
        assert_eq!(Category::from_label("spicy"), None);
    }

    #[test]
    fn test_mentions_title_and_ingredients() {
        let recipe = Recipe::new(3, "Veg Biryani", 40, Category::Veg)
            .with_ingredients(["Rice", "vegetables"]);

        assert!(recipe.mentions("biryani"));
        assert!(recipe.mentions("RICE"));
        assert!(recipe.mentions("table"));
        assert!(recipe.mentions(""));
        assert!(!recipe.mentions("chicken"));
    }

    #[test]
    fn test_deserialize_with_type_alias() {
        let yaml = indoc! {r#"
            id: 4
            title: Grilled Fish
            type: non-veg
            time: 25
            rating: 4.3
            ingredients: [fish, lemon]
            steps:
              - Marinate
              - Grill
        "#};

        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recipe.id, 4);
        assert_eq!(recipe.category, Category::NonVeg);
        assert_eq!(recipe.rating, Some(4.3));
        assert_eq!(recipe.steps, vec![Step::leaf("Marinate"), Step::leaf("Grill")]);
    }

    #[test]
    fn test_deserialize_with_difficulty_alias_and_defaults() {
        let json = r#"{"id": 9, "title": "Toast", "difficulty": "easy", "time": 5}"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.category, Category::Easy);
        assert!(recipe.rating.is_none());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }
}
