//! Example consumer: a separate Rust project that uses congress-api as a dependency.
//!
//! Run from repo root: `CONFIG_PATH=example_consumer/config.json cargo run -p example-consumer`

use async_trait::async_trait;
use congress_api::error::BoxError;
use congress_api::{
    api_routes, config_path_from_env, telemetry, ApiConfig, ClientSetup, EngineError, Engines, ModelDefinition,
    ModelDescriptor, ModelManifest, QueryEngine, Queryable, RequestParams, ResultPage, SearchEngine, Searchable,
    TimeFormatPolicy,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;

struct Bill;

impl ModelDefinition for Bill {
    fn name(&self) -> &str {
        "Bill"
    }
    fn fields(&self) -> &[&'static str] {
        &["bill_id", "congress", "official_title", "sponsor", "introduced_on"]
    }
    fn as_queryable(&self) -> Option<&dyn Queryable> {
        Some(self)
    }
    fn as_searchable(&self) -> Option<&dyn Searchable> {
        Some(self)
    }
}

impl Queryable for Bill {
    fn basic_fields(&self) -> &[&'static str] {
        &["bill_id", "congress", "official_title", "introduced_on"]
    }
}

impl Searchable for Bill {
    fn search_fields(&self) -> &[&'static str] {
        &["official_title"]
    }
}

struct Legislator;

impl ModelDefinition for Legislator {
    fn name(&self) -> &str {
        "Legislator"
    }
    fn fields(&self) -> &[&'static str] {
        &["bioguide_id", "first_name", "last_name", "party", "state"]
    }
    fn as_queryable(&self) -> Option<&dyn Queryable> {
        Some(self)
    }
}

impl Queryable for Legislator {}

/// Documents keyed by model name. Plain filters match exactly; `__gte` / `__lte`
/// compare timestamps read through the API time policy.
struct MemoryStore {
    documents: HashMap<String, Vec<Value>>,
    time: TimeFormatPolicy,
}

impl MemoryStore {
    fn matching(&self, model: &ModelDescriptor, keep: impl Fn(&Value) -> bool) -> Vec<Value> {
        self.documents
            .get(&model.name)
            .map(|docs| docs.iter().filter(|d| keep(d)).cloned().collect())
            .unwrap_or_default()
    }

    fn filter_matches(&self, doc: &Value, key: &str, expected: &str) -> Result<bool, EngineError> {
        let (field, op) = match key.rsplit_once("__") {
            Some((field, op)) if !field.is_empty() => (field, Some(op)),
            _ => (key, None),
        };
        let Some(op) = op else {
            return Ok(field_matches(doc, field, expected));
        };
        if op != "gte" && op != "lte" {
            return Err(EngineError::InvalidRequest(format!("unsupported operator: {}", op)));
        }
        let bound = self
            .time
            .parse_client_timestamp(expected)
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))?;
        let Some(actual) = doc
            .get(field)
            .and_then(Value::as_str)
            .and_then(|s| self.time.parse_client_timestamp(s).ok())
        else {
            return Ok(false);
        };
        Ok(if op == "gte" { actual >= bound } else { actual <= bound })
    }
}

fn field_matches(doc: &Value, field: &str, expected: &str) -> bool {
    match doc.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

#[async_trait]
impl QueryEngine for MemoryStore {
    async fn query(&self, model: &ModelDescriptor, params: &RequestParams) -> Result<ResultPage, EngineError> {
        let docs = self.documents.get(&model.name).map(Vec::as_slice).unwrap_or_default();
        let mut results = Vec::new();
        'docs: for doc in docs {
            for (key, value) in &params.filters {
                if !self.filter_matches(doc, key, value)? {
                    continue 'docs;
                }
            }
            results.push(doc.clone());
        }
        Ok(ResultPage {
            count: results.len() as u64,
            results,
        })
    }
}

#[async_trait]
impl SearchEngine for MemoryStore {
    async fn search(&self, models: &[&ModelDescriptor], params: &RequestParams) -> Result<ResultPage, EngineError> {
        let text = params
            .control("query")
            .ok_or_else(|| EngineError::InvalidRequest("query is required".into()))?
            .to_lowercase();
        let mut results = Vec::new();
        for model in models {
            results.extend(self.matching(model, |doc| {
                model.search_fields.iter().any(|f| {
                    doc.get(f)
                        .and_then(Value::as_str)
                        .map(|s| s.to_lowercase().contains(&text))
                        .unwrap_or(false)
                })
            }));
        }
        Ok(ResultPage {
            count: results.len() as u64,
            results,
        })
    }
}

struct MemorySetup;

#[async_trait]
impl ClientSetup for MemorySetup {
    async fn configure(&self, config: &ApiConfig, time: &TimeFormatPolicy) -> Result<Engines, BoxError> {
        tracing::info!(database = ?config.get_str("mongodb.database"), "using in-memory documents");
        let introduced = time.parse_client_timestamp("2013-01-03")?;
        let mut documents = HashMap::new();
        documents.insert(
            "Bill".to_string(),
            vec![json!({
                "bill_id": "hr1-113",
                "congress": 113,
                "official_title": "To provide for reconciliation pursuant to the budget resolution.",
                "sponsor": "B000589",
                "introduced_on": time.format_timestamp(&introduced)
            })],
        );
        documents.insert(
            "Legislator".to_string(),
            vec![json!({
                "bioguide_id": "B000589",
                "first_name": "John",
                "last_name": "Boehner",
                "party": "R",
                "state": "OH"
            })],
        );
        let store = Arc::new(MemoryStore {
            documents,
            time: time.clone(),
        });
        Ok(Engines {
            query: store.clone(),
            search: store,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init("congress_api=info,example_consumer=info");

    let manifest = ModelManifest::new().register(Bill).register(Legislator);
    let state = congress_api::start(config_path_from_env(), &manifest, &MemorySetup).await?;
    let bind = state.config.server.bind.clone();

    let app = api_routes(state);
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
