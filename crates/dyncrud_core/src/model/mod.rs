//! Domain model for the customer page.
//!
//! A single entity, `Customer`, identified by a store-assigned integer id.
//! Deletion is permanent; no tombstones are kept.

pub mod customer;
