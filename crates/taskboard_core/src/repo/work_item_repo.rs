//! Work item repository contract and store-backed implementation.
//!
//! # Invariants
//! - Every call forwards to the matching `Storage` method unchanged.

use crate::model::user::UserId;
use crate::model::work_item::{WorkItem, WorkItemId};
use crate::store::{Storage, StoreResult};

/// Entity-shaped data access for work items.
pub trait WorkItemRepository {
    fn get_all(&self) -> StoreResult<Vec<WorkItem>>;
    fn get_by_id(&self, id: WorkItemId) -> StoreResult<Option<WorkItem>>;
    fn get_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<WorkItem>>;
    fn add(&self, item: WorkItem) -> StoreResult<WorkItem>;
    fn update(&self, item: &WorkItem) -> StoreResult<()>;
    fn delete(&self, id: WorkItemId) -> StoreResult<()>;
}

/// Work item repository over whichever backend was configured.
pub struct StoreWorkItemRepository<'store> {
    store: &'store dyn Storage,
}

impl<'store> StoreWorkItemRepository<'store> {
    /// Borrows `store` for the repository's lifetime.
    pub fn new(store: &'store dyn Storage) -> Self {
        Self { store }
    }
}

impl WorkItemRepository for StoreWorkItemRepository<'_> {
    fn get_all(&self) -> StoreResult<Vec<WorkItem>> {
        self.store.list_work_items()
    }

    fn get_by_id(&self, id: WorkItemId) -> StoreResult<Option<WorkItem>> {
        self.store.get_work_item(id)
    }

    fn get_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<WorkItem>> {
        self.store.list_work_items_by_user(user_id)
    }

    fn add(&self, item: WorkItem) -> StoreResult<WorkItem> {
        self.store.add_work_item(item)
    }

    fn update(&self, item: &WorkItem) -> StoreResult<()> {
        self.store.update_work_item(item)
    }

    fn delete(&self, id: WorkItemId) -> StoreResult<()> {
        self.store.delete_work_item(id)
    }
}
