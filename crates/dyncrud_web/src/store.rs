//! Request-scoped access to the customer store.
//!
//! `CustomerStore` is injected through router state. Each operation runs on
//! the blocking pool against its own SQLite connection (file mode) or a
//! mutex-guarded shared connection (in-memory mode, used by tests).

use dyncrud_core::db::{open_db, open_db_in_memory, DbError};
use dyncrud_core::{CustomerService, RepoResult, SqliteCustomerRepository};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::AppError;

#[derive(Clone)]
pub struct CustomerStore {
    source: Source,
}

#[derive(Clone)]
enum Source {
    File(Arc<PathBuf>),
    Shared(Arc<Mutex<Connection>>),
}

impl CustomerStore {
    /// Opens `path` once so schema problems fail at startup, then hands out
    /// a fresh connection per operation.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let path = path.into();
        drop(open_db(&path)?);
        Ok(Self {
            source: Source::File(Arc::new(path)),
        })
    }

    /// Private in-memory database shared by every clone of the handle.
    pub fn in_memory() -> Result<Self, DbError> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already-migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            source: Source::Shared(Arc::new(Mutex::new(conn))),
        }
    }

    /// Runs `op` against the store off the async executor.
    pub async fn run<T, F>(&self, op: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&CustomerService<SqliteCustomerRepository<'c>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let source = self.source.clone();
        tokio::task::spawn_blocking(move || source.with_service(op)).await?
    }
}

impl Source {
    fn with_service<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: for<'c> FnOnce(&CustomerService<SqliteCustomerRepository<'c>>) -> RepoResult<T>,
    {
        match self {
            Self::File(path) => {
                let conn = open_db(path.as_path())?;
                serve(&conn, op)
            }
            Self::Shared(conn) => {
                let guard = conn.lock().map_err(|_| AppError::LockPoisoned)?;
                serve(&guard, op)
            }
        }
    }
}

fn serve<T, F>(conn: &Connection, op: F) -> Result<T, AppError>
where
    F: for<'c> FnOnce(&CustomerService<SqliteCustomerRepository<'c>>) -> RepoResult<T>,
{
    let service = CustomerService::new(SqliteCustomerRepository::try_new(conn)?);
    Ok(op(&service)?)
}
