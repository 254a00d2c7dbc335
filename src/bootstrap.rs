//! Startup sequence: config, time policy, models, routes, then clients. The first
//! failure aborts startup; no partially built state is ever returned.

use crate::config::ApiConfig;
use crate::error::StartupError;
use crate::model::{ModelManifest, ModelRegistry};
use crate::routes::RouteTable;
use crate::service::ClientSetup;
use crate::state::AppState;
use crate::time::TimeFormatPolicy;
use std::path::Path;
use std::sync::Arc;

/// Everything that can be derived without touching the network.
#[derive(Debug)]
pub struct Bootstrap {
    pub config: ApiConfig,
    pub time: TimeFormatPolicy,
    pub registry: ModelRegistry,
    pub routes: RouteTable,
}

impl Bootstrap {
    pub fn prepare(config: ApiConfig, manifest: &ModelManifest) -> Result<Self, StartupError> {
        let time = TimeFormatPolicy::init(&config.time.zone, config.time.format.clone())?;
        tracing::info!(zone = time.zone().name(), format = %time.format(), "time policy");

        let registry = ModelRegistry::discover_and_register(manifest)?;
        let routes = RouteTable::from_registry(&registry);
        tracing::info!(
            models = registry.len(),
            queryable = registry.queryable_models().len(),
            searchable = registry.searchable_models().len(),
            "registered models"
        );
        if routes.collection.slugs().is_empty() {
            tracing::warn!("no queryable models; collection route matches nothing");
        }
        if routes.search.slugs().is_empty() {
            tracing::warn!("no searchable models; search route matches nothing");
        }
        tracing::info!(collection = %routes.collection.describe(), search = %routes.search.describe(), "routes");

        Ok(Bootstrap {
            config,
            time,
            registry,
            routes,
        })
    }

    pub fn from_path(path: impl AsRef<Path>, manifest: &ModelManifest) -> Result<Self, StartupError> {
        let config = ApiConfig::load(path)?;
        Self::prepare(config, manifest)
    }

    /// Configure clients and freeze everything into shared state.
    pub async fn start(self, setup: &dyn ClientSetup) -> Result<AppState, StartupError> {
        let engines = setup
            .configure(&self.config, &self.time)
            .await
            .map_err(StartupError::Clients)?;
        Ok(AppState {
            config: Arc::new(self.config),
            time: Arc::new(self.time),
            registry: Arc::new(self.registry),
            routes: Arc::new(self.routes),
            engines,
        })
    }
}

/// Full startup from a config path.
pub async fn start(
    config_path: impl AsRef<Path>,
    manifest: &ModelManifest,
    setup: &dyn ClientSetup,
) -> Result<AppState, StartupError> {
    Bootstrap::from_path(config_path, manifest)?.start(setup).await
}
