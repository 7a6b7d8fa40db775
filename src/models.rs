use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Route Table Schemas ---

/// RouteTarget
///
/// What a route resolves to: either a view component the SPA renders, or a
/// redirect record pointing at another path of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RouteTarget {
    /// A view component. `lazy` marks components the bundle splits out and
    /// loads on first navigation.
    View { component: String, lazy: bool },
    /// An unconditional redirect, resolved before the guard runs.
    Redirect { to: String },
}

/// Route
///
/// One entry of the static route table. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub target: RouteTarget,
    /// Navigating here without a token sends the user to the login screen.
    pub requires_auth: bool,
    /// Login/register screens: navigating here with a token sends the user to contacts.
    pub guest_only: bool,
}

impl Route {
    pub fn view(path: &str, name: &str, component: &str, lazy: bool) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            target: RouteTarget::View {
                component: component.to_string(),
                lazy,
            },
            requires_auth: false,
            guest_only: false,
        }
    }

    pub fn redirect(path: &str, name: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            target: RouteTarget::Redirect { to: to.to_string() },
            requires_auth: false,
            guest_only: false,
        }
    }

    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn public_only(mut self) -> Self {
        self.guest_only = true;
        self
    }

    /// The redirect destination, if this is a redirect record.
    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect { to } => Some(to.as_str()),
            RouteTarget::View { .. } => None,
        }
    }

    /// The view component name, if this route renders one.
    pub fn component(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::View { component, .. } => Some(component.as_str()),
            RouteTarget::Redirect { .. } => None,
        }
    }
}

// --- Navigation ---

/// NavigationRequest
///
/// A single navigation attempt. Created per navigation and dropped once settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_path: String,
    /// `None` on the initial navigation (page load).
    pub source_path: Option<String>,
}

impl NavigationRequest {
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            source_path: None,
        }
    }

    pub fn leaving(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }
}

/// GuardDecision
///
/// Outcome of the navigation guard for one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Navigation
///
/// A settled navigation: where the user asked to go and where they ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub resolved: String,
    /// `None` when the resolved path matches no route.
    pub route: Option<Route>,
    /// Redirect records followed plus guard redirects taken.
    pub redirects: usize,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.redirects > 0
    }
}

// --- API Schemas (Output) ---

/// RouteSummary
///
/// Output schema describing one route of the table (GET /api/routes).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    pub path: String,
    pub name: String,
    pub target: RouteTarget,
    pub requires_auth: bool,
    pub guest_only: bool,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path.clone(),
            name: route.name.clone(),
            target: route.target.clone(),
            requires_auth: route.requires_auth,
            guest_only: route.guest_only,
        }
    }
}

/// NavigationResponse
///
/// Output schema for the navigation resolver (GET /api/navigate).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationResponse {
    pub requested: String,
    pub resolved: String,
    /// Name of the settled route; absent when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub route_name: Option<String>,
    /// View component to render; absent when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub component: Option<String>,
    pub matched: bool,
    pub redirected: bool,
}

impl From<&Navigation> for NavigationResponse {
    fn from(navigation: &Navigation) -> Self {
        Self {
            requested: navigation.requested.clone(),
            resolved: navigation.resolved.clone(),
            route_name: navigation.route.as_ref().map(|r| r.name.clone()),
            component: navigation
                .route
                .as_ref()
                .and_then(|r| r.component())
                .map(str::to_string),
            matched: navigation.route.is_some(),
            redirected: navigation.was_redirected(),
        }
    }
}

/// NavigateQuery
///
/// Query parameters accepted by the navigation resolver.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct NavigateQuery {
    /// Path the client wants to open.
    pub to: String,
    /// Path the client is leaving, if any.
    pub from: Option<String>,
}
