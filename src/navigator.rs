use std::sync::Arc;

use crate::{
    error::{NavigationError, StorageError},
    guard::guard,
    models::{GuardDecision, Navigation, NavigationRequest},
    routes::{RouteTable, normalize_path},
    storage::{StorageState, TOKEN_KEY, TokenStore},
};

/// Upper bound on redirects (records plus guard) within one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// navigate
///
/// Settles one navigation against a route table and a token store.
///
/// Redirect records are followed first; the guard only sees the route a hop
/// would actually render. A guard redirect starts a fresh hop from the new
/// target, and the guard runs again there. Paths that match nothing settle
/// with no route.
pub fn navigate(
    table: &RouteTable,
    store: &dyn TokenStore,
    request: NavigationRequest,
) -> Result<Navigation, NavigationError> {
    let has_token = store.has_token();
    let requested = normalize_path(&request.target_path);

    let mut source = request.source_path.map(|path| normalize_path(&path));
    let mut target = requested.clone();
    let mut redirects = 0;

    loop {
        let route = table.find(&target);

        if let Some(to) = route.and_then(|r| r.redirect_to()) {
            tracing::debug!(from = ?source, to = %target, redirect = %to, "following redirect record");
            redirects += 1;
            source = Some(std::mem::replace(&mut target, normalize_path(to)));
        } else {
            let decision = guard(route, has_token);
            tracing::debug!(from = ?source, to = %target, has_token, ?decision, "navigation guard");

            match decision {
                GuardDecision::Allow => {
                    return Ok(Navigation {
                        requested,
                        resolved: target,
                        route: route.cloned(),
                        redirects,
                    });
                }
                GuardDecision::Redirect(to) => {
                    redirects += 1;
                    source = Some(std::mem::replace(&mut target, normalize_path(&to)));
                }
            }
        }

        if redirects > MAX_REDIRECTS {
            return Err(NavigationError::RedirectLoop {
                path: requested,
                hops: MAX_REDIRECTS,
            });
        }
    }
}

/// Navigator
///
/// A client session: the route table plus the storage its token lives in.
/// Tracks the current location so each navigation knows where it came from.
pub struct Navigator {
    table: Arc<RouteTable>,
    store: StorageState,
    current: Option<String>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>, store: StorageState) -> Self {
        Self {
            table,
            store,
            current: None,
        }
    }

    /// The path the last successful navigation settled on.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.has_token()
    }

    /// push
    ///
    /// Navigates to `path` from the current location. On error the current
    /// location is left unchanged.
    pub fn push(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let mut request = NavigationRequest::new(path);
        if let Some(current) = &self.current {
            request = request.leaving(current.clone());
        }

        let navigation = navigate(&self.table, self.store.as_ref(), request)?;
        self.current = Some(navigation.resolved.clone());
        Ok(navigation)
    }

    /// Stores a freshly issued token. Does not navigate.
    pub fn login(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)?;
        tracing::info!("session token stored");
        Ok(())
    }

    /// Clears the stored token. Does not navigate.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        tracing::info!("session token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Route, storage::MemoryTokenStore};

    fn settle(path: &str, store: &dyn TokenStore) -> Navigation {
        navigate(&RouteTable::default(), store, NavigationRequest::new(path)).unwrap()
    }

    #[test]
    fn root_without_token_ends_on_login() {
        let nav = settle("/", &MemoryTokenStore::new());
        assert_eq!(nav.requested, "/");
        assert_eq!(nav.resolved, "/login");
        assert_eq!(nav.redirects, 2);
        assert_eq!(nav.route.unwrap().name, "login");
    }

    #[test]
    fn root_with_token_ends_on_contacts() {
        let nav = settle("/", &MemoryTokenStore::with_token("abc123"));
        assert_eq!(nav.resolved, "/contacts");
        assert_eq!(nav.redirects, 1);
    }

    #[test]
    fn contacts_with_token_is_not_redirected() {
        let nav = settle("/contacts", &MemoryTokenStore::with_token("abc123"));
        assert_eq!(nav.resolved, "/contacts");
        assert!(!nav.was_redirected());
        assert_eq!(nav.route.unwrap().component(), Some("DashboardView"));
    }

    #[test]
    fn register_with_token_ends_on_contacts() {
        let nav = settle("/register?ref=mail", &MemoryTokenStore::with_token("abc123"));
        assert_eq!(nav.requested, "/register");
        assert_eq!(nav.resolved, "/contacts");
    }

    #[test]
    fn unknown_path_settles_unmatched() {
        let nav = settle("/does-not-exist", &MemoryTokenStore::new());
        assert_eq!(nav.resolved, "/does-not-exist");
        assert!(nav.route.is_none());
    }

    #[test]
    fn redirect_cycle_is_reported() {
        let table = RouteTable::new(vec![
            Route::redirect("/a", "a", "/b"),
            Route::redirect("/b", "b", "/a"),
        ]);
        let err = navigate(&table, &MemoryTokenStore::new(), NavigationRequest::new("/a"))
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::RedirectLoop {
                path: "/a".to_string(),
                hops: MAX_REDIRECTS,
            }
        );
    }

    #[test]
    fn navigator_tracks_location_and_session() {
        let store: StorageState = Arc::new(MemoryTokenStore::new());
        let mut navigator = Navigator::new(Arc::new(RouteTable::default()), store);

        assert_eq!(navigator.push("/contacts").unwrap().resolved, "/login");
        assert_eq!(navigator.current(), Some("/login"));

        navigator.login("abc123").unwrap();
        assert!(navigator.is_authenticated());
        assert_eq!(navigator.push("/login").unwrap().resolved, "/contacts");

        navigator.logout().unwrap();
        assert!(!navigator.is_authenticated());
        assert_eq!(navigator.push("/contacts").unwrap().resolved, "/login");
    }
}
