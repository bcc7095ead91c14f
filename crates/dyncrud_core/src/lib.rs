//! Core record store for the dyncrud customer page.
//! Owns the schema, the customer model and every SQL statement.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::customer::{Customer, CustomerDraft, CustomerId, CustomerValidationError};
pub use repo::customer_repo::{CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository};
pub use service::customer_service::CustomerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
