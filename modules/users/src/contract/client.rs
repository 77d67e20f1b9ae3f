use async_trait::async_trait;

use crate::contract::error::UsersError;
use crate::contract::model::{NewUser, User, UserId, UserPatch};

/// Public API trait for the users module that other modules can use
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Create a new user; both fields must be non-empty
    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError>;

    /// List all users in creation order
    async fn list_users(&self) -> Result<Vec<User>, UsersError>;

    /// Get a user by ID
    async fn get_user(&self, id: UserId) -> Result<User, UsersError>;

    /// Update a user with partial data
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UsersError>;

    /// Delete a user by ID
    async fn delete_user(&self, id: UserId) -> Result<(), UsersError>;

    /// Drop every user and restart id allocation at 1
    async fn reset(&self) -> Result<(), UsersError>;
}
