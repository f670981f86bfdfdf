//! Flat-file storage backend on JSON documents.
//!
//! # Responsibility
//! - Keep each collection in one file (`workitems.json`, `users.json`).
//!
//! # Invariants
//! - Every read deserializes the whole file; every write rewrites it.
//! - One process-wide lock is held across the full read-modify-write span of
//!   each operation, so writers never interleave.
//! - A missing file reads as an empty collection.

use crate::model::user::{User, UserId};
use crate::model::work_item::{today, WorkItem, WorkItemId};
use crate::store::seed::{mock_users, mock_work_items, SEEDED_ASSIGNEES};
use crate::store::{Storage, StoreError, StoreResult};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

const WORK_ITEMS_FILE_NAME: &str = "workitems.json";
const USERS_FILE_NAME: &str = "users.json";

static JSON_FILE_LOCK: Mutex<()> = Mutex::new(());

/// JSON-file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    directory: PathBuf,
    work_items_path: PathBuf,
    users_path: PathBuf,
}

impl JsonStore {
    /// Creates a store rooted at `directory`. No I/O happens here.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        Self {
            work_items_path: directory.join(WORK_ITEMS_FILE_NAME),
            users_path: directory.join(USERS_FILE_NAME),
            directory,
        }
    }

    /// Data directory holding both collection files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of `workitems.json`.
    pub fn work_items_path(&self) -> &Path {
        &self.work_items_path
    }

    /// Path of `users.json`.
    pub fn users_path(&self) -> &Path {
        &self.users_path
    }

    fn read_work_items(&self) -> StoreResult<Vec<WorkItem>> {
        read_collection(&self.work_items_path)
    }

    fn write_work_items(&self, items: &[WorkItem]) -> StoreResult<()> {
        write_collection(&self.work_items_path, items)
    }

    fn read_users(&self) -> StoreResult<Vec<User>> {
        read_collection(&self.users_path)
    }

    fn write_users(&self, users: &[User]) -> StoreResult<()> {
        write_collection(&self.users_path, users)
    }
}

impl Storage for JsonStore {
    fn initialize(&self) -> StoreResult<()> {
        let _guard = lock_files();

        fs::create_dir_all(&self.directory).map_err(|source| StoreError::Io {
            path: self.directory.clone(),
            source,
        })?;
        for path in [&self.work_items_path, &self.users_path] {
            if !path.exists() {
                write_collection::<User>(path, &[])?;
            }
        }

        let mut users = self.read_users()?;
        if users.is_empty() {
            users = mock_users();
            self.write_users(&users)?;
            info!(
                "event=seed_users module=store status=ok backend=json count={}",
                users.len()
            );
        } else {
            info!("event=seed_users module=store status=skip backend=json reason=not_empty");
        }

        if !self.read_work_items()?.is_empty() {
            info!("event=seed_work_items module=store status=skip backend=json reason=not_empty");
        } else if users.is_empty() {
            warn!("event=seed_work_items module=store status=skip backend=json reason=no_users");
        } else {
            let assignees: Vec<UserId> = users
                .iter()
                .take(SEEDED_ASSIGNEES)
                .map(|user| user.id)
                .collect();
            let items = mock_work_items(&assignees, today());
            self.write_work_items(&items)?;
            info!(
                "event=seed_work_items module=store status=ok backend=json count={}",
                items.len()
            );
        }

        info!(
            "event=store_init module=store status=ok backend=json dir={}",
            self.directory.display()
        );
        Ok(())
    }

    fn list_work_items(&self) -> StoreResult<Vec<WorkItem>> {
        let _guard = lock_files();
        self.read_work_items()
    }

    fn get_work_item(&self, id: WorkItemId) -> StoreResult<Option<WorkItem>> {
        let _guard = lock_files();
        Ok(self
            .read_work_items()?
            .into_iter()
            .find(|item| item.id == id))
    }

    fn list_work_items_by_user(&self, user_id: UserId) -> StoreResult<Vec<WorkItem>> {
        let _guard = lock_files();
        Ok(self
            .read_work_items()?
            .into_iter()
            .filter(|item| item.assigned_to_user_id == Some(user_id))
            .collect())
    }

    fn add_work_item(&self, item: WorkItem) -> StoreResult<WorkItem> {
        let _guard = lock_files();
        let mut items = self.read_work_items()?;
        items.push(item.clone());
        self.write_work_items(&items)?;
        Ok(item)
    }

    fn update_work_item(&self, item: &WorkItem) -> StoreResult<()> {
        let _guard = lock_files();
        let mut items = self.read_work_items()?;
        if let Some(slot) = items.iter_mut().find(|current| current.id == item.id) {
            *slot = item.clone();
            self.write_work_items(&items)?;
        }
        Ok(())
    }

    fn delete_work_item(&self, id: WorkItemId) -> StoreResult<()> {
        let _guard = lock_files();
        let mut items = self.read_work_items()?;
        if let Some(index) = items.iter().position(|item| item.id == id) {
            items.remove(index);
            self.write_work_items(&items)?;
        }
        Ok(())
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        let _guard = lock_files();
        self.read_users()
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let _guard = lock_files();
        Ok(self.read_users()?.into_iter().find(|user| user.id == id))
    }

    fn add_user(&self, user: User) -> StoreResult<User> {
        let _guard = lock_files();
        let mut users = self.read_users()?;
        users.push(user.clone());
        self.write_users(&users)?;
        Ok(user)
    }

    fn update_user(&self, user: &User) -> StoreResult<()> {
        let _guard = lock_files();
        let mut users = self.read_users()?;
        if let Some(slot) = users.iter_mut().find(|current| current.id == user.id) {
            *slot = user.clone();
            self.write_users(&users)?;
        }
        Ok(())
    }

    fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let _guard = lock_files();
        let mut users = self.read_users()?;
        if let Some(index) = users.iter().position(|user| user.id == id) {
            users.remove(index);
            self.write_users(&users)?;
        }
        Ok(())
    }
}

// The guarded state lives on disk, so a panic in another holder leaves
// nothing half-updated in memory and the poison flag can be ignored.
fn lock_files() -> MutexGuard<'static, ()> {
    JSON_FILE_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_collection<T: Serialize>(path: &Path, values: &[T]) -> StoreResult<()> {
    let text = serde_json::to_string_pretty(values).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
