use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        Path,
    },
    http::{header, HeaderMap, StatusCode},
    response::Json,
    Extension,
};
use tracing::{debug, info};

use crate::api::rest::dto::{CreateUserReq, UpdateUserReq, UserDto};
use crate::api::rest::error::ApiError;
use crate::contract::model::{UserId, UserPatch};
use crate::domain::store::UserStore;

/// Path ids that are not positive integers can never match a record.
pub fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.parse::<UserId>().ok().filter(|id| *id > 0)
}

fn lookup_id(raw: &str) -> Result<UserId, ApiError> {
    parse_user_id(raw).ok_or_else(|| {
        debug!(raw_id = raw, "Path id is not a positive integer");
        ApiError::not_found()
    })
}

/// List all users in creation order
pub async fn list_users(Extension(store): Extension<Arc<UserStore>>) -> Json<Vec<UserDto>> {
    info!("Listing users");
    Json(store.list().into_iter().map(UserDto::from).collect())
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(store): Extension<Arc<UserStore>>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    info!("Getting user with id: {}", raw_id);

    let id = lookup_id(&raw_id)?;
    let user = store.get(id)?;
    Ok(Json(UserDto::from(user)))
}

/// Create a new user
pub async fn create_user(
    Extension(store): Extension<Arc<UserStore>>,
    payload: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(JsonRejection::BytesRejection(rejection)) => {
            debug!(%rejection, "Create body unreadable");
            return Err(ApiError::unreadable_body(&rejection));
        }
        // A body that parses to nothing usable carries no fields.
        Err(rejection) => {
            debug!(%rejection, "Create body rejected");
            return Err(ApiError::missing_fields());
        }
    };
    info!("Creating user: {:?}", req);

    let user = store.create(req.into())?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Update an existing user
pub async fn update_user(
    Extension(store): Extension<Arc<UserStore>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let id = lookup_id(&raw_id)?;

    let patch = match body {
        Ok(bytes) => match parse_patch(&headers, &bytes) {
            Ok(patch) => patch,
            Err(e) => {
                debug!(error = %e, "Update body rejected");
                store.get(id)?;
                return Err(ApiError::invalid_body());
            }
        },
        Err(rejection) => {
            debug!(%rejection, "Update body unreadable");
            store.get(id)?;
            return Err(ApiError::unreadable_body(&rejection));
        }
    };
    info!("Updating user {} with: {:?}", id, patch);

    let user = store.update(id, patch)?;
    Ok(Json(UserDto::from(user)))
}

/// Blank bodies and bodies not declared as JSON carry no fields.
fn parse_patch(headers: &HeaderMap, body: &[u8]) -> Result<UserPatch, serde_json::Error> {
    if !has_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UserPatch::default());
    }
    serde_json::from_slice::<UpdateUserReq>(body).map(UserPatch::from)
}

/// `application/json` or any `+json` suffix, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Delete a user by ID
pub async fn delete_user(
    Extension(store): Extension<Arc<UserStore>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting user: {}", raw_id);

    let id = lookup_id(&raw_id)?;
    store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drop every user and restart ids at 1
pub async fn reset_users(Extension(store): Extension<Arc<UserStore>>) -> StatusCode {
    info!("Resetting users");
    store.reset();
    StatusCode::NO_CONTENT
}
