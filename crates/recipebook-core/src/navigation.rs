//! Application routes and the seam the session manager navigates through.

use std::fmt;
use std::sync::Mutex;

use tracing::debug;

/// A view the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Recipes,
    Recipe(i64),
    Celebrations,
    Ethnicities,
    Seasons,
    SeasonRecipes(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Recipes => "/recipes".to_string(),
            Route::Recipe(id) => format!("/recipes/{}", id),
            Route::Celebrations => "/celebrations".to_string(),
            Route::Ethnicities => "/ethnicities".to_string(),
            Route::Seasons => "/seasons".to_string(),
            Route::SeasonRecipes(id) => format!("/seasons/{}/recipes", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Something that can move the user to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// In-process navigator that remembers where it has been.
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<Route>>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: Mutex::new(vec![start]),
        }
    }

    pub fn current(&self) -> Route {
        self.lock().last().copied().unwrap_or(Route::Home)
    }

    /// Every route visited, oldest first, including the start route
    pub fn entries(&self) -> Vec<Route> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Route>> {
        // A poisoned history is still a valid list of routes
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "Navigating");
        self.lock().push(route);
    }
}
