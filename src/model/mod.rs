mod catalog;
mod recipe;
mod step;

pub use catalog::{Catalog, CatalogError, MAX_STEP_DEPTH, MAX_YAML_STEP_DEPTH};
pub use recipe::{Category, Recipe};
pub use step::Step;
