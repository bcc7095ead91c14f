//! Request-level failures.
//!
//! Store and connectivity failures abort the request with a generic page;
//! not-found and malformed parameters never reach this type.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dyncrud_core::db::DbError;
use dyncrud_core::RepoError;
use log::error;
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("customer store unavailable: {0}")]
    Db(#[from] DbError),
    #[error("customer store operation failed: {0}")]
    Repo(#[from] RepoError),
    #[error("customer store connection lock poisoned")]
    LockPoisoned,
    #[error("customer store task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Repo(RepoError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(
            "event=http_request module=web status=error http_status={} error={}",
            status.as_u16(),
            self
        );
        (status, Html(views::error_page(status))).into_response()
    }
}
