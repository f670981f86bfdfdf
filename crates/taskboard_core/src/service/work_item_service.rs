//! Work item use-case service.
//!
//! # Responsibility
//! - Validate requests, apply creation defaults and partial updates.
//! - Enrich outbound views with the assignee's display name.
//!
//! # Invariants
//! - New work items are always `Todo`, with `created_at` set and
//!   `updated_at` unset.
//! - Every successful update stamps `updated_at`, even when no field changes.
//! - A supplied assignee must exist at write time; nothing is persisted
//!   otherwise.
//! - Update validates before looking the item up, so bad input on a missing
//!   id is `InvalidInput` rather than `None`.
//! - A missing assignee on read leaves the name unset instead of failing.

use crate::model::user::{User, UserId};
use crate::model::work_item::{today, WorkItem, WorkItemId};
use crate::repo::user_repo::UserRepository;
use crate::repo::work_item_repo::WorkItemRepository;
use crate::service::dto::{CreateWorkItemInput, UpdateWorkItemInput, WorkItemView};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::validation::{validate_create, validate_update, violation_message};
use log::{info, warn};

/// Work item service over entity repositories.
pub struct WorkItemService<W: WorkItemRepository, U: UserRepository> {
    work_items: W,
    users: U,
}

impl<W: WorkItemRepository, U: UserRepository> WorkItemService<W, U> {
    /// Creates a service over work item and user repositories.
    pub fn new(work_items: W, users: U) -> Self {
        Self { work_items, users }
    }

    /// Lists every work item, each enriched with its assignee's name.
    pub fn list_all(&self) -> ServiceResult<Vec<WorkItemView>> {
        self.work_items
            .get_all()?
            .into_iter()
            .map(|item| self.enrich(item))
            .collect()
    }

    /// Loads one work item with its assignee's name. `None` when missing.
    pub fn get_by_id(&self, id: WorkItemId) -> ServiceResult<Option<WorkItemView>> {
        match self.work_items.get_by_id(id)? {
            Some(item) => self.enrich(item).map(Some),
            None => Ok(None),
        }
    }

    /// Lists items assigned to `user_id`. The user is looked up once and its
    /// name attached to every item.
    pub fn list_by_user(&self, user_id: UserId) -> ServiceResult<Vec<WorkItemView>> {
        let items = self.work_items.get_by_user_id(user_id)?;
        let user_name = self.users.get_by_id(user_id)?.map(|user| user.name);

        Ok(items
            .into_iter()
            .map(|item| {
                let mut view = WorkItemView::from(item);
                view.assigned_to_user_name = user_name.clone();
                view
            })
            .collect())
    }

    /// Creates a `Todo` work item.
    ///
    /// # Errors
    /// - `InvalidInput` listing every violated rule.
    /// - `InvalidInput` when the assignee does not exist.
    pub fn create(&self, input: CreateWorkItemInput) -> ServiceResult<WorkItemView> {
        let violations = validate_create(&input, today());
        if !violations.is_empty() {
            warn!(
                "event=work_item_create module=service status=error error_code=invalid_input violations={}",
                violations.len()
            );
            return Err(ServiceError::InvalidInput(violation_message(&violations)));
        }

        let assignee = match input.assigned_to_user_id {
            Some(user_id) => Some(self.require_user(user_id)?),
            None => None,
        };

        let item = WorkItem::new(
            input.title,
            input.description,
            input.due_date,
            input.priority,
            input.assigned_to_user_id,
        );
        let created = self.work_items.add(item)?;
        info!(
            "event=work_item_create module=service status=ok id={}",
            created.id
        );

        let mut view = WorkItemView::from(created);
        view.assigned_to_user_name = assignee.map(|user| user.name);
        Ok(view)
    }

    /// Applies a partial update.
    ///
    /// Returns `Ok(None)` when no work item has `id`.
    pub fn update(
        &self,
        id: WorkItemId,
        input: UpdateWorkItemInput,
    ) -> ServiceResult<Option<WorkItemView>> {
        let violations = validate_update(&input, today());
        if !violations.is_empty() {
            warn!(
                "event=work_item_update module=service status=error error_code=invalid_input id={} violations={}",
                id,
                violations.len()
            );
            return Err(ServiceError::InvalidInput(violation_message(&violations)));
        }

        let Some(mut item) = self.work_items.get_by_id(id)? else {
            return Ok(None);
        };

        if let Some(user_id) = input.assigned_to_user_id {
            self.require_user(user_id)?;
        }

        input.apply_to(&mut item);
        item.touch();
        self.work_items.update(&item)?;
        info!("event=work_item_update module=service status=ok id={id}");

        self.enrich(item).map(Some)
    }

    /// Deletes a work item. Returns `false` when it did not exist.
    pub fn delete(&self, id: WorkItemId) -> ServiceResult<bool> {
        if self.work_items.get_by_id(id)?.is_none() {
            return Ok(false);
        }

        self.work_items.delete(id)?;
        info!("event=work_item_delete module=service status=ok id={id}");
        Ok(true)
    }

    fn require_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.users.get_by_id(user_id)?.ok_or_else(|| {
            warn!(
                "event=assignee_check module=service status=error error_code=user_not_found user_id={user_id}"
            );
            ServiceError::InvalidInput(format!("User with ID {user_id} not found"))
        })
    }

    fn enrich(&self, item: WorkItem) -> ServiceResult<WorkItemView> {
        let user_name = match item.assigned_to_user_id {
            Some(user_id) => self.users.get_by_id(user_id)?.map(|user| user.name),
            None => None,
        };
        let mut view = WorkItemView::from(item);
        view.assigned_to_user_name = user_name;
        Ok(view)
    }
}
