//! Core domain logic for Taskboard.
//! Work items, the users they are assigned to, and the storage backends that
//! persist both.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::{User, UserId};
pub use model::work_item::{Priority, Status, UnknownCode, WorkItem, WorkItemId};
pub use repo::user_repo::{StoreUserRepository, UserRepository};
pub use repo::work_item_repo::{StoreWorkItemRepository, WorkItemRepository};
pub use service::dto::{
    CreateUserInput, CreateWorkItemInput, UpdateWorkItemInput, UserView, WorkItemView,
};
pub use service::error::{ServiceError, ServiceResult};
pub use service::user_service::UserService;
pub use service::work_item_service::WorkItemService;
pub use store::{open_store, JsonStore, SqliteStore, Storage, StoreError, StoreResult};

/// Minimal health-check API for smoke probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
