use crate::models::Recipe;
use crate::navigation::Route;
use crate::utils::{contains_ignore_case, format_optional, truncate_string};

/// Longest description shown on a card before it is cut off
const CARD_DESCRIPTION_MAX: usize = 160;

/// What a recipe list shows for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub cooking_time: String,
    pub route: Route,
}

impl RecipeCard {
    pub fn href(&self) -> String {
        self.route.path()
    }

    pub fn difficulty_line(&self) -> String {
        format!("Difficulty: {}", self.difficulty)
    }

    pub fn cooking_time_line(&self) -> String {
        format!("Cooking Time: {}", self.cooking_time)
    }
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.name.clone(),
            description: truncate_string(
                recipe.description.as_deref().unwrap_or_default(),
                CARD_DESCRIPTION_MAX,
            ),
            difficulty: format_optional(recipe.difficulty.as_deref(), "Unknown"),
            cooking_time: format_optional(recipe.cooking_time.as_deref(), "Unknown"),
            route: Route::Recipe(recipe.id),
        }
    }
}

/// Recipes whose name, category or description mention `query`.
/// An empty query keeps everything.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.trim();
    if query.is_empty() {
        return recipes.iter().collect();
    }
    recipes
        .iter()
        .filter(|r| {
            contains_ignore_case(&r.name, query)
                || r.category.as_deref().is_some_and(|c| contains_ignore_case(c, query))
                || r.description.as_deref().is_some_and(|d| contains_ignore_case(d, query))
        })
        .collect()
}
