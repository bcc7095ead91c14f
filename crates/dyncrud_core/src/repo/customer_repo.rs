//! Customer repository contract and its SQLite implementation.
//!
//! # Responsibility
//! - Own every SQL statement that touches the `customers` table.
//! - Map rows to `Customer` and back using bound parameters only.
//!
//! # Invariants
//! - Each mutation is one statement and commits on return.
//! - Update/delete of a missing id is `Ok(false)`, never an error.
//! - List order is primary-key ascending.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::customer::{Customer, CustomerDraft, CustomerId, CustomerValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMERS_TABLE: &str = "customers";
const CUSTOMER_COLUMNS: [&str; 4] = ["id", "name", "email", "salary"];

const CUSTOMER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    salary
FROM customers";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(CustomerValidationError),
    Db(DbError),
    InvalidData(String),
    /// Connection schema is not at the version this binary migrates to.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted customer data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "customer repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "customer repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "customer repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<CustomerValidationError> for RepoError {
    fn from(value: CustomerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access for customer records.
pub trait CustomerRepository {
    /// Inserts a row and returns the id SQLite assigned to it.
    fn create_customer(&self, draft: &CustomerDraft) -> RepoResult<CustomerId>;
    /// All rows in primary-key order.
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Overwrites every mutable field. Returns whether a row matched.
    fn update_customer(&self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<bool>;
    /// Hard-deletes one row. Returns whether a row matched.
    fn delete_customer(&self, id: CustomerId) -> RepoResult<bool>;
}

/// SQLite-backed customer repository borrowing a migrated connection.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Wraps `conn` after checking it carries the expected schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, draft: &CustomerDraft) -> RepoResult<CustomerId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO customers (name, email, salary) VALUES (?1, ?2, ?3);",
            params![draft.name.as_str(), draft.email.as_str(), draft.salary],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();

        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }

    fn update_customer(&self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<bool> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE customers
             SET
                name = ?1,
                email = ?2,
                salary = ?3
             WHERE id = ?4;",
            params![draft.name.as_str(), draft.email.as_str(), draft.salary, id],
        )?;

        Ok(changed > 0)
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM customers WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id: CustomerId = row.get("id")?;
    let salary: f64 = row.get("salary")?;
    if !salary.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "non-finite salary `{salary}` in customers.salary for id {id}"
        )));
    }

    Ok(Customer {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
        salary,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, CUSTOMERS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(CUSTOMERS_TABLE));
    }

    let present = table_columns(conn, CUSTOMERS_TABLE)?;
    for column in CUSTOMER_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: CUSTOMERS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
