//! View models for the pieces of UI that sit on top of the session.
//!
//! These are front-end agnostic: they decide what to show, and the
//! front end decides how to draw it.

pub mod nav;
pub mod recipe_card;
pub mod seasons;

pub use nav::{nav_items, NavItem};
pub use recipe_card::{filter_recipes, RecipeCard};
pub use seasons::{seasons_page, SeasonCard, SeasonsPage, LOGIN_PROMPT};
