//! Request and view records exchanged with service callers.

use crate::model::user::{User, UserId};
use crate::model::work_item::{Priority, Status, WorkItem, WorkItemId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Input for creating a work item. There is no status field: new items are
/// always `Todo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateWorkItemInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to_user_id: Option<UserId>,
}

/// Partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateWorkItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub assigned_to_user_id: Option<UserId>,
}

impl UpdateWorkItemInput {
    /// Applies every present field to `item`.
    pub(crate) fn apply_to(self, item: &mut WorkItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(due_date) = self.due_date {
            item.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(user_id) = self.assigned_to_user_id {
            item.assigned_to_user_id = Some(user_id);
        }
    }
}

/// Outbound work item shape, enriched with the assignee's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItemView {
    pub id: WorkItemId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
    pub assigned_to_user_id: Option<UserId>,
    /// Display name of the assignee; `None` when unassigned or the user is
    /// gone.
    pub assigned_to_user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<WorkItem> for WorkItemView {
    fn from(item: WorkItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            due_date: item.due_date,
            priority: item.priority,
            status: item.status,
            assigned_to_user_id: item.assigned_to_user_id,
            assigned_to_user_name: None,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
