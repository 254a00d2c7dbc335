//! Shared application state for all routes. Built once at startup and never mutated.

use crate::config::ApiConfig;
use crate::model::ModelRegistry;
use crate::routes::RouteTable;
use crate::service::Engines;
use crate::time::TimeFormatPolicy;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub time: Arc<TimeFormatPolicy>,
    pub registry: Arc<ModelRegistry>,
    pub routes: Arc<RouteTable>,
    pub engines: Engines,
}
