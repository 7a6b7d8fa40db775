/// Route Table Index
///
/// Organizes the SPA's route table into access-segregated modules, the same way
/// the guard reads them: screens only guests may see, screens that need a
/// session, and redirect records that never render anything themselves.

/// Login and registration screens. Guests only.
pub mod public;

/// Screens that require a token.
pub mod authenticated;

/// Redirect records, resolved before the guard runs.
pub mod redirects;

use crate::models::Route;

/// Path of the login screen; unauthenticated users are sent here.
pub const LOGIN_PATH: &str = "/login";
/// Path of the contacts dashboard; authenticated users are sent here.
pub const CONTACTS_PATH: &str = "/contacts";

/// RouteTable
///
/// The complete, immutable list of routes. Built once at startup and shared
/// behind an `Arc` in the application state.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::contacts_app()
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// contacts_app
    ///
    /// Assembles the contacts application's route table from the segregated modules.
    pub fn contacts_app() -> Self {
        let mut routes = public::public_routes();
        routes.extend(authenticated::authenticated_routes());
        routes.extend(redirects::redirect_routes());
        Self::new(routes)
    }

    /// Finds the route for a path. The path is normalised first, so query
    /// strings, fragments and a trailing slash are ignored.
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// normalize_path
///
/// Reduces a navigation target to the form stored in the table: no query or
/// fragment, a leading slash, no trailing slash (except for the root itself).
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// strip_base
///
/// Removes the deployment base (e.g. `/app/`) from a request path. Returns
/// `None` for paths outside the base; those are not pages of the SPA.
pub fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Some(path);
    }

    match path.strip_prefix(base)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// with_base
///
/// Prefixes a table path with the deployment base for use in a `Location` header.
pub fn with_base(path: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_query_fragment_and_trailing_slash() {
        assert_eq!(normalize_path("/contacts/"), "/contacts");
        assert_eq!(normalize_path("/contacts?page=2"), "/contacts");
        assert_eq!(normalize_path("/login#top"), "/login");
        assert_eq!(normalize_path("contacts"), "/contacts");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/?next=x"), "/");
    }

    #[test]
    fn base_is_stripped_and_reapplied() {
        assert_eq!(strip_base("/app/contacts", "/app/"), Some("/contacts"));
        assert_eq!(strip_base("/app", "/app/"), Some("/"));
        assert_eq!(strip_base("/application", "/app/"), None);
        assert_eq!(strip_base("/contacts", "/app/"), None);
        assert_eq!(strip_base("/contacts", "/"), Some("/contacts"));
        assert_eq!(with_base("/login", "/app/"), "/app/login");
        assert_eq!(with_base("/login", "/"), "/login");
    }

    #[test]
    fn table_contains_every_screen_once() {
        let table = RouteTable::contacts_app();
        assert_eq!(table.len(), 4);

        for path in ["/", LOGIN_PATH, "/register", CONTACTS_PATH] {
            assert_eq!(
                table.iter().filter(|r| r.path == path).count(),
                1,
                "{path} should appear exactly once"
            );
        }
    }

    #[test]
    fn lookup_by_path_and_name() {
        let table = RouteTable::default();

        let contacts = table.find("/contacts/").expect("contacts route");
        assert_eq!(contacts.name, "contacts");
        assert!(contacts.requires_auth);

        let login = table.find_by_name("login").expect("login route");
        assert_eq!(login.path, LOGIN_PATH);
        assert!(login.guest_only);

        assert!(table.find("/settings").is_none());
    }

    #[test]
    fn root_redirects_to_contacts() {
        let table = RouteTable::default();
        let root = table.find("/").expect("root route");
        assert_eq!(root.redirect_to(), Some(CONTACTS_PATH));
        assert!(root.component().is_none());
    }
}
