//! Deterministic mock data written by `Storage::initialize` on first run.

use crate::model::user::{User, UserId};
use crate::model::work_item::{Priority, Status, WorkItem};
use chrono::{Days, NaiveDate, Utc};
use uuid::{uuid, Uuid};

/// Number of users that receive seeded work items.
pub const SEEDED_ASSIGNEES: usize = 5;

const MOCK_USERS: [(Uuid, &str, &str); SEEDED_ASSIGNEES] = [
    (
        uuid!("01234567-89ab-cdef-0123-456789abcdef"),
        "User One",
        "user1@example.com",
    ),
    (
        uuid!("12345678-89ab-cdef-0123-456789abcdef"),
        "User Two",
        "user2@example.com",
    ),
    (
        uuid!("23456789-89ab-cdef-0123-456789abcdef"),
        "User Three",
        "user3@example.com",
    ),
    (
        uuid!("34567890-89ab-cdef-0123-456789abcdef"),
        "User Four",
        "user4@example.com",
    ),
    (
        uuid!("45678901-89ab-cdef-0123-456789abcdef"),
        "User Five",
        "user5@example.com",
    ),
];

struct MockWorkItem {
    title: &'static str,
    description: &'static str,
    due_in_days: u64,
    priority: Priority,
    status: Status,
}

// Two consecutive entries per assignee.
const MOCK_WORK_ITEMS: [MockWorkItem; 10] = [
    MockWorkItem {
        title: "Implement login page",
        description: "Create a login page with email and password fields",
        due_in_days: 5,
        priority: Priority::High,
        status: Status::InProgress,
    },
    MockWorkItem {
        title: "Design database schema",
        description: "Create the database schema for the application",
        due_in_days: 3,
        priority: Priority::Medium,
        status: Status::Done,
    },
    MockWorkItem {
        title: "Fix navigation bug",
        description: "Fix the navigation bug in the mobile app",
        due_in_days: 2,
        priority: Priority::Critical,
        status: Status::Todo,
    },
    MockWorkItem {
        title: "Update documentation",
        description: "Update the API documentation",
        due_in_days: 7,
        priority: Priority::Low,
        status: Status::InProgress,
    },
    MockWorkItem {
        title: "Implement payment gateway",
        description: "Integrate with Stripe for payments",
        due_in_days: 10,
        priority: Priority::High,
        status: Status::Todo,
    },
    MockWorkItem {
        title: "Create user profile page",
        description: "Design and implement the user profile page",
        due_in_days: 6,
        priority: Priority::Medium,
        status: Status::InProgress,
    },
    MockWorkItem {
        title: "Optimize database queries",
        description: "Improve performance of database queries",
        due_in_days: 4,
        priority: Priority::Medium,
        status: Status::Todo,
    },
    MockWorkItem {
        title: "Add unit tests",
        description: "Write unit tests for the core functionality",
        due_in_days: 8,
        priority: Priority::Low,
        status: Status::Done,
    },
    MockWorkItem {
        title: "Deploy to production",
        description: "Deploy the application to production servers",
        due_in_days: 1,
        priority: Priority::Critical,
        status: Status::InProgress,
    },
    MockWorkItem {
        title: "Conduct security audit",
        description: "Perform a security audit of the application",
        due_in_days: 9,
        priority: Priority::High,
        status: Status::Todo,
    },
];

/// Returns the five mock users with their fixed ids.
pub fn mock_users() -> Vec<User> {
    MOCK_USERS
        .iter()
        .map(|(id, name, email)| User::with_id(*id, *name, *email))
        .collect()
}

/// Builds the ten mock work items, two per assignee.
///
/// Only the first [`SEEDED_ASSIGNEES`] ids are used; with fewer ids the
/// assignments wrap around. Returns nothing when `assignees` is empty.
pub fn mock_work_items(assignees: &[UserId], today: NaiveDate) -> Vec<WorkItem> {
    let assignees = &assignees[..assignees.len().min(SEEDED_ASSIGNEES)];
    if assignees.is_empty() {
        return Vec::new();
    }

    let created_at = Utc::now();
    MOCK_WORK_ITEMS
        .iter()
        .enumerate()
        .map(|(index, mock)| WorkItem {
            id: Uuid::new_v4(),
            title: mock.title.to_string(),
            description: mock.description.to_string(),
            due_date: today + Days::new(mock.due_in_days),
            priority: mock.priority,
            status: mock.status,
            assigned_to_user_id: Some(assignees[(index / 2) % assignees.len()]),
            created_at,
            updated_at: None,
        })
        .collect()
}
