use crate::auth::AuthState;
use crate::navigation::Route;

/// Catalog sections always shown in the navigation bar, in order
const SECTIONS: [(&str, Route); 4] = [
    ("Recipes", Route::Recipes),
    ("Celebrations", Route::Celebrations),
    ("Ethnicities", Route::Ethnicities),
    ("Seasons", Route::Seasons),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, route: Route },
    /// Button that calls `logout` instead of navigating
    Logout,
}

impl NavItem {
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::Link { label, .. } => label,
            NavItem::Logout => "Logout",
        }
    }
}

/// Items for the navigation bar: the catalog sections, then Logout when
/// logged in or a Login link otherwise.
pub fn nav_items(state: &AuthState) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = SECTIONS
        .iter()
        .map(|&(label, route)| NavItem::Link { label, route })
        .collect();

    if state.is_authenticated() {
        items.push(NavItem::Logout);
    } else {
        items.push(NavItem::Link {
            label: "Login",
            route: Route::Login,
        });
    }
    items
}
