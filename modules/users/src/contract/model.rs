/// System-assigned user identifier (strictly positive).
pub type UserId = u64;

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Data for creating a new user. Empty strings stand for absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update data for a user.
///
/// `None` leaves the stored value untouched; `Some` overwrites it, including
/// with an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
