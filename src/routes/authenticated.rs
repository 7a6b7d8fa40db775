use crate::models::Route;

/// Authenticated Route Module
///
/// Screens that need a token in client storage. The guard sends anyone
/// without one to the login screen.
pub fn authenticated_routes() -> Vec<Route> {
    vec![
        // /contacts
        // The contacts dashboard. Split out of the main bundle and loaded lazily.
        Route::view(super::CONTACTS_PATH, "contacts", "DashboardView", true).protected(),
    ]
}
