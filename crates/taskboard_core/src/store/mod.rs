//! Storage contract shared by the relational and flat-file backends.
//!
//! # Responsibility
//! - Define the entity-level CRUD contract every backend satisfies.
//! - Select exactly one backend from configuration at startup.
//!
//! # Invariants
//! - Storage never validates business rules; it persists what it is given.
//! - Update and delete of a missing id are no-ops, not errors.
//! - Malformed persisted data is reported as an error, never skipped.
//! - Listing order is insertion order.

use crate::config::StorageConfig;
use crate::db::DbError;
use crate::model::user::{User, UserId};
use crate::model::work_item::{WorkItem, WorkItemId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod json;
pub mod seed;
pub mod sqlite;

pub use json::JsonStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage fault. Callers treat every variant as unrecoverable.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "malformed json in `{}`: {source}", path.display())
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for work items and users.
pub trait Storage {
    /// Creates missing structures and seeds mock data on first run.
    ///
    /// Idempotent. Users are seeded only when no user exists; work items only
    /// when no work item exists.
    fn initialize(&self) -> StoreResult<()>;

    fn list_work_items(&self) -> StoreResult<Vec<WorkItem>>;
    fn get_work_item(&self, id: WorkItemId) -> StoreResult<Option<WorkItem>>;
    /// Returns every work item whose assignee equals `user_id`.
    fn list_work_items_by_user(&self, user_id: UserId) -> StoreResult<Vec<WorkItem>>;
    /// Persists the item verbatim; id and timestamps are the caller's job.
    fn add_work_item(&self, item: WorkItem) -> StoreResult<WorkItem>;
    /// Replaces the stored item with the same id. Missing id is a no-op.
    fn update_work_item(&self, item: &WorkItem) -> StoreResult<()>;
    /// Removes the item. Missing id is a no-op.
    fn delete_work_item(&self, id: WorkItemId) -> StoreResult<()>;

    fn list_users(&self) -> StoreResult<Vec<User>>;
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;
    fn add_user(&self, user: User) -> StoreResult<User>;
    fn update_user(&self, user: &User) -> StoreResult<()>;
    fn delete_user(&self, id: UserId) -> StoreResult<()>;
}

/// Builds the backend named by configuration.
///
/// No I/O happens here; call [`Storage::initialize`] before first use.
pub fn open_store(config: &StorageConfig) -> Box<dyn Storage> {
    match config {
        StorageConfig::Sqlite { path } => Box::new(SqliteStore::new(path.clone())),
        StorageConfig::Json { directory } => Box::new(JsonStore::new(directory.clone())),
    }
}
