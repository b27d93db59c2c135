//! Recipe models: list entries, tips, and the aggregated detail view.

use serde::{Deserialize, Serialize};

/// A recipe as returned by the list, search and detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Recipe {
    #[serde(rename = "RecipeID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Difficulty", default)]
    pub difficulty: Option<String>,
    #[serde(rename = "CookingTime", default)]
    pub cooking_time: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "UserID", default)]
    pub user_id: Option<i64>,
    /// Moderation status: "Pending", "approved" or "rejected"
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

impl Recipe {
    /// Whether an admin has approved the recipe. The API is not consistent
    /// about casing, so compare case-insensitively.
    pub fn is_approved(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("approved"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Tip {
    #[serde(rename = "TipID")]
    pub id: i64,
    #[serde(rename = "RecipeID", default)]
    pub recipe_id: Option<i64>,
    #[serde(rename = "UserID", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DetailStep {
    #[serde(rename = "StepOrder")]
    pub order: i32,
    #[serde(rename = "Content")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DetailIngredient {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Unit", default)]
    pub unit: Option<String>,
    #[serde(rename = "Quantity", default)]
    pub quantity: Option<f64>,
}

impl DetailIngredient {
    /// Format as "2 cups flour", dropping whatever parts are missing.
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if let Some(qty) = self.quantity {
            if qty.fract() == 0.0 {
                parts.push(format!("{}", qty as i64));
            } else {
                parts.push(format!("{}", qty));
            }
        }
        if let Some(ref unit) = self.unit {
            if !unit.is_empty() {
                parts.push(unit.clone());
            }
        }
        parts.push(self.name.clone());
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DetailTip {
    #[serde(rename = "Content")]
    pub content: String,
}

/// A celebration or ethnicity attached to a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NamedGroup {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SeasonSummary {
    #[serde(rename = "Season")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// Everything `/recipe/{id}/details` returns in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(rename = "Steps", default)]
    pub steps: Vec<DetailStep>,
    #[serde(rename = "Ingredients", default)]
    pub ingredients: Vec<DetailIngredient>,
    #[serde(rename = "Tips", default)]
    pub tips: Vec<DetailTip>,
    #[serde(rename = "Ethnicities", default)]
    pub ethnicities: Vec<NamedGroup>,
    #[serde(rename = "Celebrations", default)]
    pub celebrations: Vec<NamedGroup>,
    #[serde(rename = "Seasons", default)]
    pub seasons: Vec<SeasonSummary>,
}

impl RecipeDetails {
    /// Steps in cooking order. The API sorts them already; this is for
    /// payloads assembled elsewhere.
    pub fn ordered_steps(&self) -> Vec<&DetailStep> {
        let mut steps: Vec<&DetailStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }
}
