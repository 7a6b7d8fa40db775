use crate::models::Route;

/// Public Route Module
///
/// Screens that exist for users who are not signed in yet. Both are marked
/// public-only: a user who already holds a token is sent on to the contacts
/// dashboard instead.
pub fn public_routes() -> Vec<Route> {
    vec![
        // /login
        // Bundled eagerly; it is the first screen every new session sees.
        Route::view(super::LOGIN_PATH, "login", "LoginView", false).public_only(),
        // /register
        Route::view("/register", "register", "RegisterView", true).public_only(),
    ]
}
