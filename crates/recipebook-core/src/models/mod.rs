//! Data models for recipe catalog entities.
//!
//! Field names on the wire follow the catalog API (PascalCase, e.g.
//! `RecipeID`, `CookingTime`); the Rust side uses snake_case.
//!
//! - `User`: the authenticated account returned by `/profile`
//! - `Recipe`, `RecipeDetails`, `Tip`: recipes and their full detail view
//! - `Season`, `Celebration`, `Ethnicity`: catalog groupings

pub mod catalog;
pub mod recipe;
pub mod user;

pub use catalog::{Celebration, Ethnicity, Season};
pub use recipe::{
    DetailIngredient, DetailStep, DetailTip, NamedGroup, Recipe, RecipeDetails, SeasonSummary, Tip,
};
pub use user::{User, ADMIN_ROLE};
