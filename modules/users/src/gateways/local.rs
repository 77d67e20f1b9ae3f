use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UsersApi,
    error::UsersError,
    model::{NewUser, User, UserId, UserPatch},
};
use crate::domain::store::UserStore;

/// Local implementation of the UsersApi trait that delegates to the in-memory store
pub struct UsersLocalClient {
    store: Arc<UserStore>,
}

impl UsersLocalClient {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UsersApi for UsersLocalClient {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError> {
        self.store.create(new_user).map_err(UsersError::from)
    }

    async fn list_users(&self) -> Result<Vec<User>, UsersError> {
        Ok(self.store.list())
    }

    async fn get_user(&self, id: UserId) -> Result<User, UsersError> {
        self.store.get(id).map_err(UsersError::from)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UsersError> {
        self.store.update(id, patch).map_err(UsersError::from)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UsersError> {
        self.store.delete(id).map_err(UsersError::from)
    }

    async fn reset(&self) -> Result<(), UsersError> {
        self.store.reset();
        Ok(())
    }
}
