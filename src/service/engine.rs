//! Query and search engines. Execution lives outside this crate; the router only needs
//! these seams.

use crate::config::ApiConfig;
use crate::error::{BoxError, EngineError};
use crate::magic::RequestParams;
use crate::model::ModelDescriptor;
use crate::time::TimeFormatPolicy;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// One page of result documents.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ResultPage {
    pub results: Vec<Value>,
    /// Total matching documents, which may exceed `results.len()`.
    pub count: u64,
}

#[async_trait]
pub trait QueryEngine: Send + Sync {
    async fn query(&self, model: &ModelDescriptor, params: &RequestParams) -> Result<ResultPage, EngineError>;
}

#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn search(&self, models: &[&ModelDescriptor], params: &RequestParams) -> Result<ResultPage, EngineError>;
}

#[derive(Clone)]
pub struct Engines {
    pub query: Arc<dyn QueryEngine>,
    pub search: Arc<dyn SearchEngine>,
}

/// Configures storage and search clients once, before the server accepts requests.
/// Engines keep a copy of `time` to read zone-less filter values and to render the
/// timestamps they emit.
#[async_trait]
pub trait ClientSetup: Send + Sync {
    async fn configure(&self, config: &ApiConfig, time: &TimeFormatPolicy) -> Result<Engines, BoxError>;
}
