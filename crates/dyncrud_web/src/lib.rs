//! HTTP surface for the dyncrud customer page.
//!
//! # Responsibility
//! - Map the listing, add, edit and delete interactions onto routes.
//! - Render HTML pages from store results.
//!
//! # Invariants
//! - Handlers reach storage only through the injected `CustomerStore`.
//! - Store failures become a generic error page; nothing else is fatal.

pub mod error;
pub mod routes;
pub mod settings;
pub mod store;
pub mod views;

use axum::routing::get;
use axum::Router;

pub use error::AppError;
pub use settings::Settings;
pub use store::CustomerStore;

/// Builds the application router around `store`.
pub fn router(store: CustomerStore) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/edit", get(routes::edit_form).post(routes::edit_submit))
        .with_state(store)
}
