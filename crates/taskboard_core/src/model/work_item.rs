//! Work item domain model.
//!
//! # Responsibility
//! - Define the canonical work item record persisted by every backend.
//! - Own the integer codes used for `Priority` and `Status` in storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another work item.
//! - `created_at` is set once at creation and never changes.
//! - `updated_at` is `None` until the first mutation.

use crate::model::user::UserId;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a work item.
pub type WorkItemId = Uuid;

/// Current calendar date in the local time zone.
///
/// Due dates are calendar dates, so "today" follows the local clock rather
/// than UTC.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Work item urgency. Persisted as `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Work item lifecycle state. Persisted as `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Created but not started. Every new work item starts here.
    Todo,
    InProgress,
    Done,
}

/// Raised when an integer code does not map to a known enum variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownCode {
    Priority(i64),
    Status(i64),
}

impl Display for UnknownCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Priority(code) => write!(f, "Invalid priority value `{code}`"),
            Self::Status(code) => write!(f, "Invalid status value `{code}`"),
        }
    }
}

impl Error for UnknownCode {}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Integer code stored in `WorkItems.Priority`.
    pub fn code(self) -> i64 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = UnknownCode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Critical),
            other => Err(UnknownCode::Priority(other)),
        }
    }
}

impl Status {
    pub const ALL: [Status; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Integer code stored in `WorkItems.Status`.
    pub fn code(self) -> i64 {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }
}

impl TryFrom<i64> for Status {
    type Error = UnknownCode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Todo),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Done),
            other => Err(UnknownCode::Status(other)),
        }
    }
}

/// Canonical work item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
    /// Optional assignee. Existence is checked by the service at write time;
    /// storage keeps whatever it is given.
    pub assigned_to_user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkItem {
    /// Creates a new `Todo` work item with a generated id.
    ///
    /// # Invariants
    /// - `status` is always `Status::Todo`.
    /// - `created_at` is the current UTC time; `updated_at` is `None`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
        assigned_to_user_id: Option<UserId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            due_date,
            priority,
            status: Status::Todo,
            assigned_to_user_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Records a mutation at the current UTC time.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
