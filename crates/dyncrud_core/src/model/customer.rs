//! Customer record and its mutable-field draft.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned primary key. Never reused by SQLite `AUTOINCREMENT`.
pub type CustomerId = i64;

/// A persisted customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub salary: f64,
}

/// Field values for create and update; everything except `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub salary: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomerValidationError {
    /// SQLite stores NaN as NULL, which would fail the `NOT NULL` column.
    NonFiniteSalary(f64),
}

impl Display for CustomerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteSalary(value) => write!(f, "salary must be a finite number, got {value}"),
        }
    }
}

impl Error for CustomerValidationError {}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            salary,
        }
    }

    /// Checks only what storage needs; names and emails are taken as-is.
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if !self.salary.is_finite() {
            return Err(CustomerValidationError::NonFiniteSalary(self.salary));
        }
        Ok(())
    }
}
