//! The seasonal recipes landing page.

use tracing::warn;

use crate::api::ApiClient;
use crate::auth::use_auth;
use crate::models::Season;
use crate::navigation::Route;

/// Shown instead of the list when nobody is logged in
pub const LOGIN_PROMPT: &str = "Please log in to view seasons.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCard {
    pub name: String,
    pub description: String,
    /// Link to the season's recipes
    pub route: Route,
}

impl From<&Season> for SeasonCard {
    fn from(season: &Season) -> Self {
        Self {
            name: season.name.clone(),
            description: season.description.clone().unwrap_or_default(),
            route: Route::SeasonRecipes(season.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonsPage {
    /// Not logged in: show `LOGIN_PROMPT` and a link to the login view
    LoginRequired,
    Loaded(Vec<SeasonCard>),
}

/// Build the seasons page for the current session.
///
/// Must run inside `AuthProvider::mount`. Nothing is requested while
/// logged out. A failed request is logged and shows an empty list.
pub async fn seasons_page(api: &ApiClient) -> SeasonsPage {
    let auth = use_auth();
    let Some(token) = auth.token().filter(|_| auth.is_authenticated()) else {
        return SeasonsPage::LoginRequired;
    };

    match api.with_token(token).fetch_seasons().await {
        Ok(seasons) => SeasonsPage::Loaded(seasons.iter().map(SeasonCard::from).collect()),
        Err(e) => {
            warn!(error = %e, "Error fetching seasons");
            SeasonsPage::Loaded(Vec::new())
        }
    }
}
