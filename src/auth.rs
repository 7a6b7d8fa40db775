use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::storage::{CookieTokenStore, TokenStore};

/// SessionCookies Extractor Result
///
/// The request's cookie jar, exposed as a read-only token store so handlers
/// can hand it straight to the navigator. This is the server-side stand-in
/// for the browser's persistent client storage.
#[derive(Debug, Clone, Default)]
pub struct SessionCookies(pub CookieTokenStore);

impl SessionCookies {
    /// Token presence as the guard sees it.
    pub fn has_token(&self) -> bool {
        self.0.has_token()
    }

    pub fn store(&self) -> &CookieTokenStore {
        &self.0
    }
}

/// SessionCookies Extractor Implementation
///
/// Never rejects: a request without cookies, or without a `token` cookie, is
/// simply unauthenticated and the guard decides what happens next. Token
/// validation is the backend's concern, not the shell's.
impl<S> FromRequestParts<S> for SessionCookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionCookies(CookieTokenStore::from_headers(&parts.headers)))
    }
}

/// clear_token_cookie
///
/// The `Set-Cookie` value that removes the session token from the browser.
pub fn clear_token_cookie(base_url: &str) -> String {
    format!(
        "{}=; Path={}; Max-Age=0; SameSite=Lax",
        crate::storage::TOKEN_KEY,
        base_url
    )
}
