//! User repository contract and store-backed implementation.

use crate::model::user::{User, UserId};
use crate::store::{Storage, StoreResult};

/// Entity-shaped data access for users.
pub trait UserRepository {
    fn get_all(&self) -> StoreResult<Vec<User>>;
    fn get_by_id(&self, id: UserId) -> StoreResult<Option<User>>;
    fn add(&self, user: User) -> StoreResult<User>;
    fn update(&self, user: &User) -> StoreResult<()>;
    fn delete(&self, id: UserId) -> StoreResult<()>;
}

/// User repository over whichever backend was configured.
pub struct StoreUserRepository<'store> {
    store: &'store dyn Storage,
}

impl<'store> StoreUserRepository<'store> {
    /// Borrows `store` for the repository's lifetime.
    pub fn new(store: &'store dyn Storage) -> Self {
        Self { store }
    }
}

impl UserRepository for StoreUserRepository<'_> {
    fn get_all(&self) -> StoreResult<Vec<User>> {
        self.store.list_users()
    }

    fn get_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        self.store.get_user(id)
    }

    fn add(&self, user: User) -> StoreResult<User> {
        self.store.add_user(user)
    }

    fn update(&self, user: &User) -> StoreResult<()> {
        self.store.update_user(user)
    }

    fn delete(&self, id: UserId) -> StoreResult<()> {
        self.store.delete_user(id)
    }
}
