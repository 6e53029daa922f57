use super::recipe::{Category, Recipe};
use super::step::Step;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur when loading a catalog from text.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Recipe ids must be positive")]
    InvalidId,

    #[error("Duplicate recipe id: {0}")]
    DuplicateId(u32),

    #[error("Recipe {0} has an empty title")]
    EmptyTitle(u32),

    #[error("Recipe {0} must take at least one minute")]
    InvalidTime(u32),

    #[error("Steps nest deeper than {0} levels")]
    TooDeep(usize),
}

/// Deepest step nesting accepted from a JSON catalog.
pub const MAX_STEP_DEPTH: usize = 256;

/// Deepest step nesting a YAML catalog can hold. The YAML parser allows 128
/// nested collections; the catalog, a recipe and its step list take three
/// and every composite step two more.
pub const MAX_YAML_STEP_DEPTH: usize = 62;

// Catalog array, recipe object and steps array.
const ENCLOSING_COLLECTIONS: usize = 3;

/// The fixed, read-only collection of recipes a browser session works on.
///
/// Order is significant: it is the order shown when no sort is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Builds a catalog after checking ids are unique and fields are sane.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if recipe.id == 0 {
                return Err(CatalogError::InvalidId);
            }
            if !seen.insert(recipe.id) {
                return Err(CatalogError::DuplicateId(recipe.id));
            }
            if recipe.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(recipe.id));
            }
            if recipe.time == 0 {
                return Err(CatalogError::InvalidTime(recipe.id));
            }
        }
        Ok(Catalog { recipes })
    }

    /// Parses a YAML sequence of recipes.
    ///
    /// Steps may nest at most [`MAX_YAML_STEP_DEPTH`] levels; use
    /// [`Catalog::from_json_str`] for deeper trees.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_yaml::from_str(yaml).map_err(|e| {
            // serde_yaml reports its fixed nesting limit only through the message
            if e.to_string().contains("recursion limit exceeded") {
                CatalogError::TooDeep(MAX_YAML_STEP_DEPTH)
            } else {
                CatalogError::Yaml(e)
            }
        })?;
        Self::new(recipes)
    }

    /// Parses a JSON array of recipes. Steps may nest up to
    /// [`MAX_STEP_DEPTH`] levels.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        if json_nesting(json) > ENCLOSING_COLLECTIONS + 2 * MAX_STEP_DEPTH {
            return Err(CatalogError::TooDeep(MAX_STEP_DEPTH));
        }

        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let recipes = Vec::<Recipe>::deserialize(&mut de)?;
        de.end()?;
        Self::new(recipes)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// The built-in eight recipe catalog shipped with the browser.
    pub fn sample() -> Self {
        let recipe = |id: u32,
                      title: &str,
                      category: Category,
                      time: u32,
                      rating: f64,
                      ingredients: &[&str],
                      steps: &[&str]| {
            Recipe::new(id, title, time, category)
                .with_rating(rating)
                .with_ingredients(ingredients.iter().copied())
                .with_steps(steps.iter().map(|s| Step::leaf(*s)).collect())
        };

        #[rustfmt::skip]
        let recipes = vec![
            recipe(1, "Paneer Butter Masala", Category::Veg, 30, 4.5, &["paneer", "butter", "tomato"], &["Cook gravy", "Add paneer"]),
            recipe(2, "Chicken Curry", Category::NonVeg, 45, 4.7, &["chicken", "spices"], &["Cook chicken", "Add masala"]),
            recipe(3, "Veg Biryani", Category::Veg, 40, 4.2, &["rice", "vegetables"], &["Cook rice", "Mix veggies"]),
            recipe(4, "Grilled Fish", Category::NonVeg, 25, 4.3, &["fish", "lemon"], &["Marinate", "Grill"]),
            recipe(5, "Dal Tadka", Category::Veg, 20, 4.1, &["dal", "spices"], &["Boil dal", "Add tadka"]),
            recipe(6, "Mutton Curry", Category::NonVeg, 60, 4.8, &["mutton", "spices"], &["Cook mutton", "Simmer"]),
            recipe(7, "Pasta Alfredo", Category::Veg, 35, 4.4, &["pasta", "cream"], &["Boil pasta", "Add sauce"]),
            recipe(8, "Omelette", Category::NonVeg, 10, 4.0, &["eggs", "salt"], &["Beat eggs", "Cook on pan"]),
        ];

        Catalog { recipes }
    }
}

/// Deepest bracket nesting in a JSON document, skipping string contents.
fn json_nesting(json: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;
    for byte in json.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.recipes().iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(catalog.get(8).unwrap().title, "Omelette");
        assert!(Catalog::new(catalog.recipes().to_vec()).is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = indoc! {r#"
            - id: 1
              title: Carbonara
              difficulty: medium
              time: 25
              ingredients: [spaghetti, eggs, pancetta]
              steps:
                - Boil water
                - text: Prepare sauce
                  substeps: [Beat eggs, Grate cheese]
            - id: 2
              title: Toast
              difficulty: easy
              time: 5
        "#};

        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        let carbonara = catalog.get(1).unwrap();
        assert_eq!(carbonara.category, Category::Medium);
        assert_eq!(carbonara.steps[1].substeps().len(), 2);
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"id": 1, "title": "Dal Tadka", "type": "veg", "time": 20, "rating": 4.1}]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.get(1).unwrap().rating, Some(4.1));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_yaml_str("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_duplicate_id() {
        let recipes = vec![
            Recipe::new(1, "A", 5, Category::Easy),
            Recipe::new(1, "B", 5, Category::Easy),
        ];
        assert!(matches!(
            Catalog::new(recipes),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_invalid_fields() {
        assert!(matches!(
            Catalog::new(vec![Recipe::new(2, "  ", 5, Category::Easy)]),
            Err(CatalogError::EmptyTitle(2))
        ));
        assert!(matches!(
            Catalog::new(vec![Recipe::new(3, "Water", 0, Category::Easy)]),
            Err(CatalogError::InvalidTime(3))
        ));
    }

    #[test]
    fn test_zero_id_rejected() {
        assert!(matches!(
            Catalog::new(vec![Recipe::new(0, "Tea", 5, Category::Easy)]),
            Err(CatalogError::InvalidId)
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"[{"id": 0, "title": "Tea", "type": "easy", "time": 5}]"#),
            Err(CatalogError::InvalidId)
        ));
    }

    /// A one-recipe catalog whose steps form a chain `depth` composites deep.
    fn deep_chain(depth: usize) -> String {
        let mut steps = String::from("\"bottom\"");
        for level in (0..depth).rev() {
            steps = format!(r#"{{"text": "level {level}", "substeps": [{steps}]}}"#);
        }
        format!(r#"[{{"id": 1, "title": "Layers", "type": "hard", "time": 90, "steps": [{steps}]}}]"#)
    }

    fn chain_depth(catalog: &Catalog) -> usize {
        let mut step = &catalog.recipes()[0].steps[0];
        let mut depth = 0;
        while let Some(next) = step.substeps().first() {
            step = next;
            depth += 1;
        }
        assert_eq!(step.text(), "bottom");
        depth
    }

    #[test]
    fn test_deep_steps_from_json() {
        let catalog = Catalog::from_json_str(&deep_chain(150)).unwrap();
        assert_eq!(chain_depth(&catalog), 150);

        assert!(matches!(
            Catalog::from_json_str(&deep_chain(MAX_STEP_DEPTH + 1)),
            Err(CatalogError::TooDeep(MAX_STEP_DEPTH))
        ));
    }

    #[test]
    fn test_deep_steps_from_yaml() {
        let catalog = Catalog::from_yaml_str(&deep_chain(50)).unwrap();
        assert_eq!(chain_depth(&catalog), 50);

        assert!(matches!(
            Catalog::from_yaml_str(&deep_chain(100)),
            Err(CatalogError::TooDeep(MAX_YAML_STEP_DEPTH))
        ));
    }

    #[test]
    fn test_json_nesting_skips_strings() {
        assert_eq!(json_nesting(r#"[{"text": "[[{{", "esc": "\"[" }]"#), 2);
        assert_eq!(json_nesting("[]"), 1);
        assert_eq!(json_nesting("\"plain\""), 0);
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let yaml = "- {id: 1, title: Soup, type: spicy, time: 10}";
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::Yaml(_))
        ));
    }
}
