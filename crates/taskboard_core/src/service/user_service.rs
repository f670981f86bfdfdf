//! User use-case service.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::service::dto::{CreateUserInput, UserView};
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

/// User service over a user repository.
pub struct UserService<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    /// Creates a service over `users`.
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Lists every user in insertion order.
    pub fn list_all(&self) -> ServiceResult<Vec<UserView>> {
        Ok(self
            .users
            .get_all()?
            .into_iter()
            .map(UserView::from)
            .collect())
    }

    /// Loads one user. `None` when missing.
    pub fn get_by_id(&self, id: UserId) -> ServiceResult<Option<UserView>> {
        Ok(self.users.get_by_id(id)?.map(UserView::from))
    }

    /// Creates a user after checking that name and email are present.
    ///
    /// Name is checked first; only the first missing field is reported.
    pub fn create(&self, input: CreateUserInput) -> ServiceResult<UserView> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "User name is required".to_string(),
            ));
        }
        if input.email.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "User email is required".to_string(),
            ));
        }

        let created = self.users.add(User::new(input.name, input.email))?;
        info!("event=user_create module=service status=ok id={}", created.id);
        Ok(UserView::from(created))
    }

    /// Deletes a user. Returns `false` when it did not exist.
    ///
    /// Work items assigned to the user keep their `assigned_to_user_id`.
    pub fn delete(&self, id: UserId) -> ServiceResult<bool> {
        if self.users.get_by_id(id)?.is_none() {
            return Ok(false);
        }

        self.users.delete(id)?;
        info!("event=user_delete module=service status=ok id={id}");
        Ok(true)
    }
}
