//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskboard_core` linkage and the configured storage backend.
//! - Initialize (and on first run seed) the store, then print a summary.

use std::process::ExitCode;
use taskboard_core::{
    core_version, init_logging, open_store, ping, AppConfig, StorageConfig, StoreUserRepository,
    StoreWorkItemRepository, UserService, WorkItemService,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("taskboard: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("taskboard_core ping={}", ping());
    println!("taskboard_core version={}", core_version());

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    match &config.storage {
        StorageConfig::Sqlite { path } => println!("storage=sqlite path={}", path.display()),
        StorageConfig::Json { directory } => {
            println!("storage=json dir={}", directory.display())
        }
    }

    let store = open_store(&config.storage);
    store.initialize().map_err(|err| err.to_string())?;

    let users = UserService::new(StoreUserRepository::new(store.as_ref()));
    let work_items = WorkItemService::new(
        StoreWorkItemRepository::new(store.as_ref()),
        StoreUserRepository::new(store.as_ref()),
    );

    let user_views = users.list_all().map_err(|err| err.to_string())?;
    println!("users={}", user_views.len());
    for user in &user_views {
        let assigned = work_items
            .list_by_user(user.id)
            .map_err(|err| err.to_string())?;
        println!("  {} {} work_items={}", user.id, user.name, assigned.len());
    }

    let all_items = work_items.list_all().map_err(|err| err.to_string())?;
    println!("work_items={}", all_items.len());
    Ok(())
}
