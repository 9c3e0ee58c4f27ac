use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use stockroom_config::{CorsConfig, DatabaseConfig, ServerConfig, ValidationPolicy};
use stockroom_core::{BcryptHasher, PasswordHasher};

use crate::modules::auth::AuthService;
use crate::modules::categories::CategoryService;
use crate::modules::products::ProductService;
use crate::repository::{CategoryRepository, PgStore, ProductRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub cors_config: CorsConfig,
    /// Serves `/metrics` when present.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires every service to the same backing store.
    pub fn new<S>(
        store: S,
        hasher: Arc<dyn PasswordHasher>,
        policy: ValidationPolicy,
        cors_config: CorsConfig,
    ) -> Self
    where
        S: UserRepository + ProductRepository + CategoryRepository + 'static,
    {
        let store = Arc::new(store);
        let users: Arc<dyn UserRepository> = store.clone();
        let products: Arc<dyn ProductRepository> = store.clone();
        let categories: Arc<dyn CategoryRepository> = store;

        Self {
            auth: Arc::new(AuthService::new(users, hasher, policy)),
            products: Arc::new(ProductService::new(products, categories.clone())),
            categories: Arc::new(CategoryService::new(categories)),
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Builds the PostgreSQL-backed state from the environment, applying
/// migrations unless `RUN_MIGRATIONS=false`.
pub async fn init_app_state(server: &ServerConfig) -> anyhow::Result<AppState> {
    let database = DatabaseConfig::from_env()?;
    let pool = stockroom_db::connect(&database)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(AppState::new(
        PgStore::new(pool),
        Arc::new(BcryptHasher::new(server.bcrypt_cost)),
        ValidationPolicy::from_env(),
        CorsConfig::from_env(),
    ))
}
