//! Relational storage backend on SQLite.
//!
//! # Responsibility
//! - Persist work items and users in the `WorkItems` and `Users` tables.
//! - Map enum codes and ISO-8601 text columns to and from domain types.
//!
//! # Invariants
//! - One short-lived connection per operation; nothing is shared between
//!   calls.
//! - Enums are stored as integers, `DueDate` as `YYYY-MM-DD`, timestamps as
//!   RFC 3339 UTC text with nanosecond precision.
//! - Read paths reject malformed rows instead of masking them.

use crate::db::migrations::apply_migrations;
use crate::db::open_db;
use crate::model::user::{User, UserId};
use crate::model::work_item::{today, Priority, Status, WorkItem, WorkItemId};
use crate::store::seed::{mock_users, mock_work_items, SEEDED_ASSIGNEES};
use crate::store::{Storage, StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::{info, warn};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const WORK_ITEM_SELECT_SQL: &str = "SELECT
    Id,
    Title,
    Description,
    DueDate,
    Priority,
    Status,
    AssignedToUserId,
    CreatedAt,
    UpdatedAt
FROM WorkItems";

const USER_SELECT_SQL: &str = "SELECT Id, Name, Email FROM Users";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed store addressed by database file path.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Creates a store for the database file at `path`. No I/O happens here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Database file this store opens on every operation.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> StoreResult<Connection> {
        Ok(open_db(&self.path)?)
    }
}

impl Storage for SqliteStore {
    fn initialize(&self) -> StoreResult<()> {
        let mut conn = self.connect()?;
        apply_migrations(&mut conn)?;

        let tx = conn.transaction()?;
        seed_users_if_empty(&tx)?;
        seed_work_items_if_empty(&tx)?;
        tx.commit()?;

        info!(
            "event=store_init module=store status=ok backend=sqlite path={}",
            self.path.display()
        );
        Ok(())
    }

    fn list_work_items(&self) -> StoreResult<Vec<WorkItem>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{WORK_ITEM_SELECT_SQL} ORDER BY rowid;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_work_item_row(row)?);
        }
        Ok(items)
    }

    fn get_work_item(&self, id: WorkItemId) -> StoreResult<Option<WorkItem>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{WORK_ITEM_SELECT_SQL} WHERE Id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_work_item_row(row)?));
        }
        Ok(None)
    }

    fn list_work_items_by_user(&self, user_id: UserId) -> StoreResult<Vec<WorkItem>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{WORK_ITEM_SELECT_SQL} WHERE AssignedToUserId = ?1 ORDER BY rowid;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_work_item_row(row)?);
        }
        Ok(items)
    }

    fn add_work_item(&self, item: WorkItem) -> StoreResult<WorkItem> {
        let conn = self.connect()?;
        insert_work_item(&conn, &item)?;
        Ok(item)
    }

    fn update_work_item(&self, item: &WorkItem) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute(
            "UPDATE WorkItems
             SET
                Title = ?2,
                Description = ?3,
                DueDate = ?4,
                Priority = ?5,
                Status = ?6,
                AssignedToUserId = ?7,
                CreatedAt = ?8,
                UpdatedAt = ?9
             WHERE Id = ?1;",
            params![
                item.id.to_string(),
                item.title.as_str(),
                item.description.as_str(),
                format_date(item.due_date),
                item.priority.code(),
                item.status.code(),
                item.assigned_to_user_id.map(|id| id.to_string()),
                format_timestamp(item.created_at),
                item.updated_at.map(format_timestamp),
            ],
        )?;
        Ok(())
    }

    fn delete_work_item(&self, id: WorkItemId) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM WorkItems WHERE Id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        let conn = self.connect()?;
        load_users(&conn)
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} WHERE Id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn add_user(&self, user: User) -> StoreResult<User> {
        let conn = self.connect()?;
        insert_user(&conn, &user)?;
        Ok(user)
    }

    fn update_user(&self, user: &User) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute(
            "UPDATE Users SET Name = ?2, Email = ?3 WHERE Id = ?1;",
            params![user.id.to_string(), user.name.as_str(), user.email.as_str()],
        )?;
        Ok(())
    }

    fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM Users WHERE Id = ?1;", [id.to_string()])?;
        Ok(())
    }
}

fn seed_users_if_empty(conn: &Connection) -> StoreResult<()> {
    if table_has_rows(conn, "Users")? {
        info!("event=seed_users module=store status=skip backend=sqlite reason=not_empty");
        return Ok(());
    }

    let users = mock_users();
    for user in &users {
        insert_user(conn, user)?;
    }
    info!(
        "event=seed_users module=store status=ok backend=sqlite count={}",
        users.len()
    );
    Ok(())
}

fn seed_work_items_if_empty(conn: &Connection) -> StoreResult<()> {
    if table_has_rows(conn, "WorkItems")? {
        info!("event=seed_work_items module=store status=skip backend=sqlite reason=not_empty");
        return Ok(());
    }

    let assignees: Vec<UserId> = load_users(conn)?
        .into_iter()
        .take(SEEDED_ASSIGNEES)
        .map(|user| user.id)
        .collect();
    if assignees.is_empty() {
        warn!("event=seed_work_items module=store status=skip backend=sqlite reason=no_users");
        return Ok(());
    }

    let items = mock_work_items(&assignees, today());
    for item in &items {
        insert_work_item(conn, item)?;
    }
    info!(
        "event=seed_work_items module=store status=ok backend=sqlite count={}",
        items.len()
    );
    Ok(())
}

fn table_has_rows(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table});"),
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn load_users(conn: &Connection) -> StoreResult<Vec<User>> {
    let mut stmt = conn.prepare(&format!("{USER_SELECT_SQL} ORDER BY rowid;"))?;
    let mut rows = stmt.query([])?;
    let mut users = Vec::new();
    while let Some(row) = rows.next()? {
        users.push(parse_user_row(row)?);
    }
    Ok(users)
}

fn insert_work_item(conn: &Connection, item: &WorkItem) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO WorkItems (
            Id,
            Title,
            Description,
            DueDate,
            Priority,
            Status,
            AssignedToUserId,
            CreatedAt,
            UpdatedAt
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        params![
            item.id.to_string(),
            item.title.as_str(),
            item.description.as_str(),
            format_date(item.due_date),
            item.priority.code(),
            item.status.code(),
            item.assigned_to_user_id.map(|id| id.to_string()),
            format_timestamp(item.created_at),
            item.updated_at.map(format_timestamp),
        ],
    )?;
    Ok(())
}

fn insert_user(conn: &Connection, user: &User) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO Users (Id, Name, Email) VALUES (?1, ?2, ?3);",
        params![user.id.to_string(), user.name.as_str(), user.email.as_str()],
    )?;
    Ok(())
}

fn parse_work_item_row(row: &Row<'_>) -> StoreResult<WorkItem> {
    let id_text: String = row.get("Id")?;
    let id = parse_uuid(&id_text, "WorkItems.Id")?;

    let due_text: String = row.get("DueDate")?;
    let due_date = NaiveDate::parse_from_str(&due_text, DATE_FORMAT).map_err(|_| {
        StoreError::InvalidData(format!("invalid date `{due_text}` in WorkItems.DueDate"))
    })?;

    let priority_code: i64 = row.get("Priority")?;
    let priority = Priority::try_from(priority_code)
        .map_err(|err| StoreError::InvalidData(format!("{err} in WorkItems.Priority")))?;

    let status_code: i64 = row.get("Status")?;
    let status = Status::try_from(status_code)
        .map_err(|err| StoreError::InvalidData(format!("{err} in WorkItems.Status")))?;

    let assigned_to_user_id = match row.get::<_, Option<String>>("AssignedToUserId")? {
        Some(value) => Some(parse_uuid(&value, "WorkItems.AssignedToUserId")?),
        None => None,
    };

    let created_text: String = row.get("CreatedAt")?;
    let created_at = parse_timestamp(&created_text, "WorkItems.CreatedAt")?;

    let updated_at = match row.get::<_, Option<String>>("UpdatedAt")? {
        Some(value) => Some(parse_timestamp(&value, "WorkItems.UpdatedAt")?),
        None => None,
    };

    Ok(WorkItem {
        id,
        title: row.get("Title")?,
        description: row
            .get::<_, Option<String>>("Description")?
            .unwrap_or_default(),
        due_date,
        priority,
        status,
        assigned_to_user_id,
        created_at,
        updated_at,
    })
}

fn parse_user_row(row: &Row<'_>) -> StoreResult<User> {
    let id_text: String = row.get("Id")?;
    Ok(User {
        id: parse_uuid(&id_text, "Users.Id")?,
        name: row.get("Name")?,
        email: row.get("Email")?,
    })
}

fn parse_uuid(value: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn parse_timestamp(value: &str, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidData(format!("invalid timestamp `{value}` in {column}")))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
