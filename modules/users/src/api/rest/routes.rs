use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::config::UsersConfig;
use crate::domain::store::UserStore;

pub fn register_routes(router: Router, store: Arc<UserStore>, config: &UsersConfig) -> Router {
    let mut users = Router::new()
        // GET /users - List all users, POST /users - Create a new user
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        // GET/PUT/DELETE /users/{id}
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        );

    // POST /test/reset - Test support: clear all users and restart ids
    if config.expose_reset {
        users = users.route("/test/reset", post(handlers::reset_users));
    }

    router.merge(users.layer(Extension(store)))
}
