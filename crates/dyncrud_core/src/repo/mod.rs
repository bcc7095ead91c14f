//! Persistence layer.
//!
//! # Responsibility
//! - Define the data-access contract the service layer depends on.
//! - Keep SQLite query details behind that contract.
//!
//! # Invariants
//! - Writes run `CustomerDraft::validate()` before any SQL.
//! - "Not found" is expressed as `Ok(None)` / `Ok(false)`; only transport
//!   and schema problems are errors.

pub mod customer_repo;
