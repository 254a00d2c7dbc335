//! congress-api: bootstrap and routing core for a read-only, model-driven data API.

pub mod bootstrap;
pub mod case;
pub mod config;
pub mod error;
pub mod handlers;
pub mod magic;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod time;

pub use bootstrap::{start, Bootstrap};
pub use config::{config_path_from_env, ApiConfig};
pub use error::{AppError, ConfigLoadError, EngineError, RegistrationError, StartupError};
pub use magic::{is_magic, RequestParams, MAGIC_FIELDS};
pub use model::{ModelDefinition, ModelDescriptor, ModelManifest, ModelRegistry, Queryable, Searchable};
pub use routes::{api_routes, build_collection_route, build_search_route, RoutePattern, RouteTable, RouteTarget};
pub use service::{ClientSetup, Engines, QueryEngine, ResultPage, SearchEngine};
pub use state::AppState;
pub use time::{TimeFormatPolicy, TimestampFormat};
