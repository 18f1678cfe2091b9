//! Routing definitions for the FileDeck UI.

use yew_router::prelude::*;

/// Client-side routes.
#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    /// Entry point; forwards to the dashboard.
    #[at("/")]
    Home,
    /// Account creation form.
    #[at("/register")]
    Register,
    /// Login form.
    #[at("/login")]
    Login,
    /// File manager; requires a session.
    #[at("/dashboard")]
    Dashboard,
    /// Anything else.
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Whether the route is wrapped in the session guard.
    #[must_use]
    pub const fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_links() {
        assert_eq!(Route::Login.to_path(), "/login");
        assert_eq!(Route::Register.to_path(), "/register");
        assert_eq!(Route::Dashboard.to_path(), "/dashboard");
    }

    #[test]
    fn only_dashboard_is_guarded() {
        assert!(Route::Dashboard.requires_session());
        assert!(!Route::Login.requires_session());
        assert!(!Route::Home.requires_session());
    }
}
