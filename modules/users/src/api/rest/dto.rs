use serde::{Deserialize, Serialize};

use crate::contract::model::{NewUser, User, UserId, UserPatch};

/// REST DTO for user representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// REST DTO for creating a new user. Fields are optional at the wire level so
/// that a missing field surfaces as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// REST DTO for updating a user (partial). `null` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body of every error response: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_dto_serializes_numeric_id() {
        let dto = UserDto::from(User {
            id: 7,
            name: "flo".into(),
            email: "flo@live.fr".into(),
        });
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({ "id": 7, "name": "flo", "email": "flo@live.fr" })
        );
    }

    #[test]
    fn missing_create_fields_become_empty() {
        let req: CreateUserReq =
            serde_json::from_value(serde_json::json!({ "email": "flo@live.fr" })).unwrap();
        let new_user = NewUser::from(req);
        assert_eq!(new_user.name, "");
        assert_eq!(new_user.email, "flo@live.fr");
    }

    #[test]
    fn update_keeps_absent_and_empty_distinct() {
        let req: UpdateUserReq =
            serde_json::from_value(serde_json::json!({ "email": "" })).unwrap();
        let patch = UserPatch::from(req);
        assert_eq!(patch.name, None);
        assert_eq!(patch.email, Some(String::new()));

        let req: UpdateUserReq =
            serde_json::from_value(serde_json::json!({ "name": null, "extra": 1 })).unwrap();
        assert!(UserPatch::from(req).is_empty());
    }
}
