use chrono::{Days, NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use taskboard_core::model::work_item::today;
use taskboard_core::{
    open_store, JsonStore, Priority, SqliteStore, Status, Storage, StorageConfig, StoreError,
    User, WorkItem,
};
use uuid::Uuid;

fn for_each_backend(check: impl Fn(&dyn Storage)) {
    let dir = tempfile::tempdir().unwrap();
    let sqlite = SqliteStore::new(dir.path().join("taskboard.db"));
    sqlite.initialize().unwrap();
    check(&sqlite);

    let json = JsonStore::new(dir.path().join("data"));
    json.initialize().unwrap();
    check(&json);
}

fn sample_item(assignee: Option<Uuid>) -> WorkItem {
    let mut item = WorkItem::new(
        "Write release notes",
        "Summarize changes since last tag",
        NaiveDate::from_ymd_opt(2031, 7, 4).unwrap(),
        Priority::Critical,
        assignee,
    );
    item.status = Status::InProgress;
    item.created_at = Utc.timestamp_opt(1_900_000_000, 987_654_321).unwrap();
    item.updated_at = Some(Utc.timestamp_opt(1_900_000_100, 5).unwrap());
    item
}

#[test]
fn initialize_seeds_five_users_and_ten_work_items() {
    for_each_backend(|store| {
        let users = store.list_users().unwrap();
        let items = store.list_work_items().unwrap();
        assert_eq!(users.len(), 5);
        assert_eq!(items.len(), 10);

        let priorities: HashSet<Priority> = items.iter().map(|item| item.priority).collect();
        let statuses: HashSet<Status> = items.iter().map(|item| item.status).collect();
        assert_eq!(priorities.len(), 4);
        assert_eq!(statuses.len(), 3);

        let today = today();
        for item in &items {
            assert!(item.due_date >= today + Days::new(1));
            assert!(item.due_date <= today + Days::new(10));
            assert!(item.updated_at.is_none());
        }
        for user in &users {
            assert_eq!(store.list_work_items_by_user(user.id).unwrap().len(), 2);
        }
    });
}

#[test]
fn open_store_builds_the_configured_backend() {
    let dir = tempfile::tempdir().unwrap();
    let configs = [
        StorageConfig::Sqlite {
            path: dir.path().join("configured.db"),
        },
        StorageConfig::Json {
            directory: dir.path().join("configured"),
        },
    ];

    for config in &configs {
        let store = open_store(config);
        store.initialize().unwrap();
        assert_eq!(store.list_users().unwrap().len(), 5);
    }
    assert!(dir.path().join("configured.db").is_file());
    assert!(dir.path().join("configured").join("users.json").is_file());
}

#[test]
fn second_initialize_changes_nothing() {
    for_each_backend(|store| {
        let users_before = store.list_users().unwrap();
        let items_before = store.list_work_items().unwrap();

        store.initialize().unwrap();

        assert_eq!(store.list_users().unwrap(), users_before);
        assert_eq!(store.list_work_items().unwrap(), items_before);
    });
}

#[test]
fn seeding_is_decided_per_collection() {
    for_each_backend(|store| {
        let users_before = store.list_users().unwrap();
        for item in store.list_work_items().unwrap() {
            store.delete_work_item(item.id).unwrap();
        }

        store.initialize().unwrap();
        assert_eq!(store.list_users().unwrap(), users_before);
        assert_eq!(store.list_work_items().unwrap().len(), 10);

        let items_before = store.list_work_items().unwrap();
        for user in store.list_users().unwrap() {
            store.delete_user(user.id).unwrap();
        }

        store.initialize().unwrap();
        assert_eq!(store.list_users().unwrap().len(), 5);
        assert_eq!(store.list_work_items().unwrap(), items_before);
    });
}

#[test]
fn work_item_round_trips_every_field() {
    for_each_backend(|store| {
        let assignee = store.list_users().unwrap()[0].id;
        let item = sample_item(Some(assignee));

        let returned = store.add_work_item(item.clone()).unwrap();
        assert_eq!(returned, item);
        assert_eq!(store.get_work_item(item.id).unwrap(), Some(item.clone()));

        let unassigned = sample_item(None);
        store.add_work_item(unassigned.clone()).unwrap();
        let loaded = store.get_work_item(unassigned.id).unwrap().unwrap();
        assert_eq!(loaded.assigned_to_user_id, None);
    });
}

#[test]
fn listing_keeps_insertion_order() {
    for_each_backend(|store| {
        let first = sample_item(None);
        let second = sample_item(None);
        store.add_work_item(first.clone()).unwrap();
        store.add_work_item(second.clone()).unwrap();

        let items = store.list_work_items().unwrap();
        let tail: Vec<Uuid> = items[items.len() - 2..].iter().map(|item| item.id).collect();
        assert_eq!(tail, vec![first.id, second.id]);
    });
}

#[test]
fn list_by_user_returns_only_that_users_items() {
    for_each_backend(|store| {
        let user = User::new("Dana", "dana@example.com");
        store.add_user(user.clone()).unwrap();

        let mine = sample_item(Some(user.id));
        store.add_work_item(mine.clone()).unwrap();
        store.add_work_item(sample_item(None)).unwrap();

        assert_eq!(store.list_work_items_by_user(user.id).unwrap(), vec![mine]);
        assert!(store
            .list_work_items_by_user(Uuid::new_v4())
            .unwrap()
            .is_empty());
    });
}

#[test]
fn update_replaces_the_whole_record() {
    for_each_backend(|store| {
        let mut item = sample_item(None);
        store.add_work_item(item.clone()).unwrap();

        item.title = "Renamed".to_string();
        item.description = String::new();
        item.status = Status::Done;
        item.priority = Priority::Low;
        item.assigned_to_user_id = Some(store.list_users().unwrap()[1].id);
        item.updated_at = Some(Utc::now());
        store.update_work_item(&item).unwrap();

        assert_eq!(store.get_work_item(item.id).unwrap(), Some(item));
    });
}

#[test]
fn update_and_delete_of_missing_ids_are_no_ops() {
    for_each_backend(|store| {
        let items_before = store.list_work_items().unwrap();
        let users_before = store.list_users().unwrap();

        store.update_work_item(&sample_item(None)).unwrap();
        store.delete_work_item(Uuid::new_v4()).unwrap();
        store
            .update_user(&User::new("Ghost", "ghost@example.com"))
            .unwrap();
        store.delete_user(Uuid::new_v4()).unwrap();

        assert_eq!(store.list_work_items().unwrap(), items_before);
        assert_eq!(store.list_users().unwrap(), users_before);
    });
}

#[test]
fn delete_twice_is_safe() {
    for_each_backend(|store| {
        let item = sample_item(None);
        store.add_work_item(item.clone()).unwrap();

        store.delete_work_item(item.id).unwrap();
        store.delete_work_item(item.id).unwrap();
        assert!(store.get_work_item(item.id).unwrap().is_none());
    });
}

#[test]
fn user_crud_round_trips() {
    for_each_backend(|store| {
        let mut user = User::new("Eve", "eve@example.com");
        store.add_user(user.clone()).unwrap();
        assert_eq!(store.get_user(user.id).unwrap(), Some(user.clone()));

        user.email = "eve@example.org".to_string();
        store.update_user(&user).unwrap();
        assert_eq!(store.get_user(user.id).unwrap(), Some(user.clone()));

        store.delete_user(user.id).unwrap();
        assert!(store.get_user(user.id).unwrap().is_none());
    });
}

#[test]
fn deleting_a_user_keeps_referencing_work_items() {
    for_each_backend(|store| {
        let user = User::new("Frank", "frank@example.com");
        store.add_user(user.clone()).unwrap();
        let item = sample_item(Some(user.id));
        store.add_work_item(item.clone()).unwrap();

        store.delete_user(user.id).unwrap();

        let loaded = store.get_work_item(item.id).unwrap().unwrap();
        assert_eq!(loaded.assigned_to_user_id, Some(user.id));
    });
}

#[test]
fn storage_accepts_unknown_assignee_references() {
    for_each_backend(|store| {
        let item = sample_item(Some(Uuid::new_v4()));
        store.add_work_item(item.clone()).unwrap();
        assert_eq!(store.get_work_item(item.id).unwrap(), Some(item));
    });
}

#[test]
fn sqlite_persists_enums_as_integers_and_dates_as_iso_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.db");
    let store = SqliteStore::new(&path);
    store.initialize().unwrap();
    let item = sample_item(None);
    store.add_work_item(item.clone()).unwrap();

    let conn = Connection::open(&path).unwrap();
    let (due, priority, status, created): (String, i64, i64, String) = conn
        .query_row(
            "SELECT DueDate, Priority, Status, CreatedAt FROM WorkItems WHERE Id = ?1",
            [item.id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert_eq!(due, "2031-07-04");
    assert_eq!(priority, 3);
    assert_eq!(status, 1);
    assert!(created.ends_with('Z'));
}

#[test]
fn sqlite_rejects_out_of_range_enum_codes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.db");
    let store = SqliteStore::new(&path);
    store.initialize().unwrap();

    let id = Uuid::new_v4();
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO WorkItems (Id, Title, Description, DueDate, Priority, Status, CreatedAt)
         VALUES (?1, 'bad', '', '2031-01-01', 9, 0, '2030-01-01T00:00:00Z');",
        params![id.to_string()],
    )
    .unwrap();

    let err = store.get_work_item(id).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
    assert!(store.list_work_items().is_err());
}

#[test]
fn sqlite_rejects_unparseable_dates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.db");
    let store = SqliteStore::new(&path);
    store.initialize().unwrap();

    let id = Uuid::new_v4();
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO WorkItems (Id, Title, Description, DueDate, Priority, Status, CreatedAt)
         VALUES (?1, 'bad', '', 'next tuesday', 0, 0, '2030-01-01T00:00:00Z');",
        params![id.to_string()],
    )
    .unwrap();

    let err = store.get_work_item(id).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(message) if message.contains("DueDate")));
}

#[test]
fn json_store_reads_missing_files_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("never-initialized"));

    assert!(store.list_work_items().unwrap().is_empty());
    assert!(store.list_users().unwrap().is_empty());
    assert!(store.get_user(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn json_store_writes_whole_collection_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("data"));
    store.initialize().unwrap();

    let text = std::fs::read_to_string(store.users_path()).unwrap();
    let users: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(users.as_array().map(Vec::len), Some(5));

    let text = std::fs::read_to_string(store.work_items_path()).unwrap();
    let items: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(items.as_array().map(Vec::len), Some(10));
}

#[test]
fn json_store_rejects_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("data"));
    store.initialize().unwrap();

    std::fs::write(store.work_items_path(), "{ not json").unwrap();
    let err = store.list_work_items().unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
}

#[test]
fn json_store_serializes_concurrent_writers() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("data"));
    store.initialize().unwrap();
    let before = store.list_users().unwrap().len();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let store = &store;
            scope.spawn(move || {
                for index in 0..5 {
                    let user = User::new(
                        format!("worker-{worker}-{index}"),
                        format!("w{worker}-{index}@example.com"),
                    );
                    store.add_user(user).unwrap();
                }
            });
        }
    });

    assert_eq!(store.list_users().unwrap().len(), before + 20);
}
