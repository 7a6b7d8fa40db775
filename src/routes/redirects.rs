use crate::models::Route;

/// Redirect records. These never reach the guard themselves; the navigator
/// follows them first and guards the destination.
pub fn redirect_routes() -> Vec<Route> {
    vec![Route::redirect("/", "root", super::CONTACTS_PATH)]
}
