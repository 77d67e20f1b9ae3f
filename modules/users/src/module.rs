use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::api::rest::routes;
use crate::config::UsersConfig;
use crate::contract::client::UsersApi;
use crate::domain::store::UserStore;
use crate::gateways::local::UsersLocalClient;

/// Users module: owns the store and hands out its REST routes and local client.
#[derive(Clone)]
pub struct UsersModule {
    store: Arc<UserStore>,
    config: UsersConfig,
}

impl UsersModule {
    pub fn new(config: UsersConfig) -> Self {
        info!(expose_reset = config.expose_reset, "Initializing users module");
        Self {
            store: Arc::new(UserStore::new()),
            config,
        }
    }

    /// In-process client over the same store the REST routes use.
    pub fn client(&self) -> Arc<dyn UsersApi> {
        Arc::new(UsersLocalClient::new(self.store.clone()))
    }

    pub fn store(&self) -> Arc<UserStore> {
        self.store.clone()
    }

    pub fn register_rest(&self, router: Router) -> Router {
        let router = routes::register_routes(router, self.store.clone(), &self.config);
        info!("Users REST routes registered");
        router
    }
}

impl Default for UsersModule {
    fn default() -> Self {
        Self::new(UsersConfig::default())
    }
}
