#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use congress_api::error::BoxError;
use congress_api::{
    ApiConfig, ClientSetup, EngineError, Engines, ModelDefinition, ModelDescriptor, ModelManifest, QueryEngine,
    Queryable, RequestParams, ResultPage, SearchEngine, Searchable, TimeFormatPolicy,
};
use serde_json::json;
use std::sync::{Arc, Mutex, OnceLock};

/// Model assembled from plain data so tests can vary one attribute at a time.
pub struct Fixture {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub slug: Option<&'static str>,
    pub queryable: bool,
    pub searchable: bool,
}

impl Fixture {
    pub fn new(name: &'static str) -> Self {
        Fixture {
            name,
            fields: &["id"],
            slug: None,
            queryable: false,
            searchable: false,
        }
    }

    pub fn queryable(mut self) -> Self {
        self.queryable = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn fields(mut self, fields: &'static [&'static str]) -> Self {
        self.fields = fields;
        self
    }

    pub fn slug(mut self, slug: &'static str) -> Self {
        self.slug = Some(slug);
        self
    }
}

impl Queryable for Fixture {}

impl Searchable for Fixture {
    fn search_fields(&self) -> &[&'static str] {
        &["id"]
    }
}

impl ModelDefinition for Fixture {
    fn name(&self) -> &str {
        self.name
    }
    fn fields(&self) -> &[&'static str] {
        self.fields
    }
    fn plural_slug(&self) -> Option<&str> {
        self.slug
    }
    fn as_queryable(&self) -> Option<&dyn Queryable> {
        if self.queryable {
            Some(self)
        } else {
            None
        }
    }
    fn as_searchable(&self) -> Option<&dyn Searchable> {
        if self.searchable {
            Some(self)
        } else {
            None
        }
    }
}

/// Bill (queryable + searchable) and Legislator (queryable only).
pub fn congress_manifest() -> ModelManifest {
    ModelManifest::new()
        .register(
            Fixture::new("Legislator")
                .fields(&["bioguide_id", "party", "state"])
                .queryable(),
        )
        .register(
            Fixture::new("Bill")
                .fields(&["bill_id", "congress", "sponsor"])
                .queryable()
                .searchable(),
        )
}

/// One engine call as seen by the recording engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub models: Vec<String>,
    pub params: RequestParams,
    /// `__gte` / `__lte` filters read through the time policy handed to client setup.
    pub bounds: Vec<(String, DateTime<FixedOffset>)>,
}

/// Records every call and answers with one document per addressed model.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<Call>>,
    pub fail_with: Option<fn() -> EngineError>,
    pub time: OnceLock<TimeFormatPolicy>,
}

impl RecordingEngine {
    fn bounds(&self, params: &RequestParams) -> Result<Vec<(String, DateTime<FixedOffset>)>, EngineError> {
        let Some(time) = self.time.get() else {
            return Ok(Vec::new());
        };
        params
            .filters
            .iter()
            .filter(|(key, _)| key.ends_with("__gte") || key.ends_with("__lte"))
            .map(|(key, value)| {
                time.parse_client_timestamp(value)
                    .map(|t| (key.clone(), t))
                    .map_err(|e| EngineError::InvalidRequest(e.to_string()))
            })
            .collect()
    }

    fn answer(&self, models: &[&ModelDescriptor], params: &RequestParams) -> Result<ResultPage, EngineError> {
        let bounds = self.bounds(params)?;
        self.calls.lock().unwrap().push(Call {
            models: models.iter().map(|m| m.name.clone()).collect(),
            params: params.clone(),
            bounds,
        });
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        let results: Vec<_> = models.iter().map(|m| json!({ "model": m.name })).collect();
        Ok(ResultPage {
            count: results.len() as u64,
            results,
        })
    }
}

#[async_trait]
impl QueryEngine for RecordingEngine {
    async fn query(&self, model: &ModelDescriptor, params: &RequestParams) -> Result<ResultPage, EngineError> {
        self.answer(&[model], params)
    }
}

#[async_trait]
impl SearchEngine for RecordingEngine {
    async fn search(&self, models: &[&ModelDescriptor], params: &RequestParams) -> Result<ResultPage, EngineError> {
        self.answer(models, params)
    }
}

/// Hands out a shared recording engine, or fails when `fail` is set.
pub struct StubSetup {
    pub engine: Arc<RecordingEngine>,
    pub fail: bool,
}

impl StubSetup {
    pub fn new(engine: RecordingEngine) -> Self {
        StubSetup {
            engine: Arc::new(engine),
            fail: false,
        }
    }
}

#[async_trait]
impl ClientSetup for StubSetup {
    async fn configure(&self, _config: &ApiConfig, time: &TimeFormatPolicy) -> Result<Engines, BoxError> {
        if self.fail {
            return Err("search cluster unreachable".into());
        }
        let _ = self.engine.time.set(time.clone());
        Ok(Engines {
            query: self.engine.clone(),
            search: self.engine.clone(),
        })
    }
}
