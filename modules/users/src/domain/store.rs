use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserId, UserPatch};
use crate::domain::allocator::IdAllocator;
use crate::domain::error::DomainError;

/// In-memory user store: the single authority over user records and id allocation.
///
/// Every operation runs under one lock covering both the records and the
/// allocator, so readers never see a half-applied mutation and a reset racing
/// a create resolves to one of the two orders.
#[derive(Debug, Default)]
pub struct UserStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    // Ids only grow between resets and a reset empties the map, so key order
    // is creation order.
    users: BTreeMap<UserId, User>,
    ids: IdAllocator,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(
        name = "users.store.create",
        skip(self, new_user),
        fields(name = %new_user.name, email = %new_user.email)
    )]
    pub fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        validate_new_user(&new_user)?;

        let mut state = self.state.lock();
        let id = state.ids.next();
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
        };
        state.users.insert(id, user.clone());

        info!(user_id = id, "Created user");
        Ok(user)
    }

    #[instrument(name = "users.store.list", skip(self))]
    pub fn list(&self) -> Vec<User> {
        let users: Vec<User> = self.state.lock().users.values().cloned().collect();
        debug!(count = users.len(), "Listed users");
        users
    }

    #[instrument(name = "users.store.get", skip(self), fields(user_id = id))]
    pub fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.state
            .lock()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(name = "users.store.update", skip(self, patch), fields(user_id = id))]
    pub fn update(&self, id: UserId, patch: UserPatch) -> Result<User, DomainError> {
        let mut state = self.state.lock();
        let current = state
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        if patch.is_empty() {
            debug!("Empty patch, nothing to change");
            return Ok(current.clone());
        }

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }

        info!("Updated user");
        Ok(current.clone())
    }

    #[instrument(name = "users.store.delete", skip(self), fields(user_id = id))]
    pub fn delete(&self, id: UserId) -> Result<(), DomainError> {
        self.state
            .lock()
            .users
            .remove(&id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Deleted user");
        Ok(())
    }

    #[instrument(name = "users.store.reset", skip(self))]
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let dropped = state.users.len();
        state.users.clear();
        state.ids.reset();

        info!(dropped, "Store reset");
    }
}

/// Creation is strict: both fields must be present and non-empty.
fn validate_new_user(new_user: &NewUser) -> Result<(), DomainError> {
    if new_user.name.is_empty() {
        return Err(DomainError::missing_field("name"));
    }
    if new_user.email.is_empty() {
        return Err(DomainError::missing_field("email"));
    }
    Ok(())
}
