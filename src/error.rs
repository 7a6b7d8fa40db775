use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// StorageError
///
/// Failures of the token store. Reading a token never fails: an unreadable
/// value is treated the same as a missing one. Only writes and opening a
/// persisted store can fail.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("token store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("token store file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("token store is read-only")]
    ReadOnly,
}

/// NavigationError
///
/// A navigation that could not settle.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("navigation to {path} exceeded {hops} redirects")]
    RedirectLoop { path: String, hops: usize },
}

/// AppError
///
/// Errors surfaced by the HTTP host. Mapped to a status code and a small JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("application shell is unavailable")]
    ShellUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Navigation(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ShellUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
