//! Use-case services wrapping repositories.
//!
//! Keeps the HTTP layer independent of storage details.

pub mod customer_service;
