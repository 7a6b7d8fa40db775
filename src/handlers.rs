use crate::{
    AppState,
    auth::{SessionCookies, clear_token_cookie},
    error::AppError,
    models::{NavigateQuery, NavigationRequest, NavigationResponse, RouteSummary},
    navigator::navigate,
    routes::{LOGIN_PATH, strip_base, with_base},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};

// --- API Handlers ---

/// list_routes
///
/// [Public Route] Returns the SPA's route table so the frontend and the host
/// agree on paths, names and access flags.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route table", body = [RouteSummary]))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(state.routes.iter().map(RouteSummary::from).collect())
}

/// resolve_navigation
///
/// [Public Route] Runs a navigation against the request's `token` cookie and
/// reports where it settles. Unknown targets are not an error: they come back
/// with `matched=false`.
#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateQuery),
    responses(
        (status = 200, description = "Settled navigation", body = NavigationResponse),
        (status = 500, description = "Redirect loop")
    )
)]
pub async fn resolve_navigation(
    cookies: SessionCookies,
    State(state): State<AppState>,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigationResponse>, AppError> {
    let mut request = NavigationRequest::new(query.to);
    if let Some(from) = query.from {
        request = request.leaving(from);
    }

    let navigation = navigate(&state.routes, cookies.store(), request)?;
    Ok(Json(NavigationResponse::from(&navigation)))
}

/// logout
///
/// [Public Route] Clears the session cookie and sends the browser to the
/// login screen. Revoking the token server-side is the backend's job.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Token cookie cleared, redirect to login"))
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let base = &state.config.base_url;
    tracing::info!("clearing session cookie");

    (
        [(header::SET_COOKIE, clear_token_cookie(base))],
        Redirect::to(&with_base(LOGIN_PATH, base)),
    )
}

// --- Page Handler ---

/// serve_page
///
/// Fallback for every path not claimed by the API or the static assets.
/// Applies the navigation guard server-side before any script runs:
///
/// - a guarded or redirected navigation answers 307 to where it settled;
/// - an allowed view answers the SPA shell;
/// - a path outside the base, or matching no route, answers 404.
pub async fn serve_page(
    method: Method,
    uri: Uri,
    cookies: SessionCookies,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let base = &state.config.base_url;
    let Some(path) = strip_base(uri.path(), base) else {
        return Ok((StatusCode::NOT_FOUND, "not found").into_response());
    };
    let navigation = navigate(&state.routes, cookies.store(), NavigationRequest::new(path))?;

    if navigation.was_redirected() {
        let location = with_base(&navigation.resolved, base);
        tracing::debug!(requested = %navigation.requested, %location, "page request redirected");
        return Ok(Redirect::temporary(&location).into_response());
    }

    if navigation.route.is_none() {
        return Ok((StatusCode::NOT_FOUND, "not found").into_response());
    }

    let shell_path = state.config.shell_path();
    let shell = tokio::fs::read_to_string(&shell_path).await.map_err(|e| {
        tracing::warn!(path = %shell_path.display(), error = %e, "SPA shell missing");
        AppError::ShellUnavailable
    })?;

    Ok(Html(shell).into_response())
}
