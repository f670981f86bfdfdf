use taskboard_core::{
    CreateUserInput, ServiceError, SqliteStore, Storage, StoreUserRepository, UserService,
};
use tempfile::TempDir;
use uuid::Uuid;

fn setup() -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("taskboard.db"));
    store.initialize().unwrap();
    (dir, store)
}

fn input(name: &str, email: &str) -> CreateUserInput {
    CreateUserInput {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn create_requires_name_before_email() {
    let (_dir, store) = setup();
    let service = UserService::new(StoreUserRepository::new(&store));

    let err = service.create(input(" ", "")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidInput(ref message) if message == "User name is required"
    ));

    let err = service.create(input("Judy", "  ")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidInput(ref message) if message == "User email is required"
    ));

    assert_eq!(service.list_all().unwrap().len(), 5);
}

#[test]
fn created_user_can_be_fetched() {
    let (_dir, store) = setup();
    let service = UserService::new(StoreUserRepository::new(&store));

    let created = service.create(input("Judy", "judy@example.com")).unwrap();
    let loaded = service.get_by_id(created.id).unwrap().unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Judy");
    assert!(service.get_by_id(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_includes_seeded_users() {
    let (_dir, store) = setup();
    let service = UserService::new(StoreUserRepository::new(&store));

    let users = service.list_all().unwrap();
    let names: Vec<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["User One", "User Two", "User Three", "User Four", "User Five"]
    );
}

#[test]
fn delete_reports_whether_user_existed() {
    let (_dir, store) = setup();
    let service = UserService::new(StoreUserRepository::new(&store));
    let created = service.create(input("Mallory", "mallory@example.com")).unwrap();

    assert!(service.delete(created.id).unwrap());
    assert!(!service.delete(created.id).unwrap());
    assert!(service.get_by_id(created.id).unwrap().is_none());
}

#[test]
fn deleting_seeded_user_with_assigned_items_succeeds() {
    let (_dir, store) = setup();
    let service = UserService::new(StoreUserRepository::new(&store));
    let user_one = Uuid::parse_str("01234567-89ab-cdef-0123-456789abcdef").unwrap();
    assert_eq!(store.list_work_items_by_user(user_one).unwrap().len(), 2);

    assert!(service.delete(user_one).unwrap());

    assert!(service.get_by_id(user_one).unwrap().is_none());
    assert_eq!(store.list_work_items_by_user(user_one).unwrap().len(), 2);
}
