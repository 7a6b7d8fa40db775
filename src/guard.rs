use crate::{
    models::{GuardDecision, Route},
    routes::{CONTACTS_PATH, LOGIN_PATH},
};

/// guard
///
/// The navigation guard. Decides, for the route a navigation is about to land
/// on, whether to let it through or send the user elsewhere.
///
/// - protected route, no token: redirect to the login screen.
/// - public-only route (login/register), token present: redirect to contacts.
/// - anything else, including paths that match no route: allow.
///
/// Pure and synchronous. A missing token is not an error, only "unauthenticated".
pub fn guard(route: Option<&Route>, has_token: bool) -> GuardDecision {
    let Some(route) = route else {
        return GuardDecision::Allow;
    };

    if route.requires_auth && !has_token {
        GuardDecision::Redirect(LOGIN_PATH.to_string())
    } else if route.guest_only && has_token {
        GuardDecision::Redirect(CONTACTS_PATH.to_string())
    } else {
        GuardDecision::Allow
    }
}
