//! Recipe lookup by application id with a guaranteed fallback.

use oneai_config::schema::builtin_recipes;
use oneai_config::{AutomationConfig, AutomationRecipe};
use tracing::debug;

use crate::AutomationError;

/// Immutable recipe table. Always holds a `"default"` recipe.
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: Vec<AutomationRecipe>,
    default: AutomationRecipe,
}

impl RecipeBook {
    /// Build a book from an ordered table. The table must contain a
    /// `"default"` recipe; the first entry for an id wins on lookup.
    pub fn from_recipes(recipes: Vec<AutomationRecipe>) -> Result<Self, AutomationError> {
        let (defaults, recipes): (Vec<_>, Vec<_>) =
            recipes.into_iter().partition(AutomationRecipe::is_default);
        let default = defaults
            .into_iter()
            .next()
            .ok_or(AutomationError::MissingDefaultRecipe)?;
        for recipe in recipes.iter().chain(std::iter::once(&default)) {
            if recipe.input_selectors.is_empty() {
                return Err(AutomationError::InvalidRecipe {
                    app_id: recipe.app_id.clone(),
                    reason: "no input selectors".into(),
                });
            }
        }
        Ok(Self { recipes, default })
    }

    /// The built-in table.
    pub fn builtin() -> Result<Self, AutomationError> {
        Self::from_recipes(builtin_recipes())
    }

    /// The built-in table with `config.recipes` layered on top: a matching
    /// id replaces the built-in entry in place, a new id is appended.
    pub fn from_config(config: &AutomationConfig) -> Result<Self, AutomationError> {
        let mut recipes = builtin_recipes();
        for recipe in &config.recipes {
            match recipes.iter_mut().find(|r| r.app_id == recipe.app_id) {
                Some(existing) => *existing = recipe.clone(),
                None => recipes.push(recipe.clone()),
            }
        }
        Self::from_recipes(recipes)
    }

    /// The recipe for `app_id`, or the default recipe.
    pub fn resolve(&self, app_id: &str) -> &AutomationRecipe {
        match self.recipes.iter().find(|r| r.app_id == app_id) {
            Some(recipe) => recipe,
            None => {
                debug!(app_id, "No automation recipe, using default");
                &self.default
            }
        }
    }

    /// Number of recipes, including the default.
    pub fn len(&self) -> usize {
        self.recipes.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
