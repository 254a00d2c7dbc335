//! Data handlers: resolve the path against the route table, split control parameters
//! from filters, and hand the request to the matching engine.

use crate::error::AppError;
use crate::magic::RequestParams;
use crate::model::ModelDescriptor;
use crate::response::success_page;
use crate::routes::RouteTarget;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, Uri},
};

/// Fallback for every path not claimed by a fixed route.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let path = uri.path();
    let target = state
        .routes
        .resolve(path)
        .ok_or_else(|| AppError::NotFound(path.to_string()))?;
    if method != Method::GET && method != Method::HEAD {
        return Err(AppError::MethodNotAllowed(method.to_string()));
    }
    let Query(pairs) = query?;
    let params = RequestParams::partition(pairs);
    if let Some(format) = params.control("format").filter(|f| *f != "json") {
        return Err(AppError::BadRequest(format!("unsupported format: {}", format)));
    }

    let page = match target {
        RouteTarget::Collection(slug) => {
            let model = state
                .registry
                .queryable_by_slug(&slug)
                .ok_or_else(|| AppError::NotFound(path.to_string()))?;
            state.engines.query.query(model, &params).await
        }
        RouteTarget::Search(slugs) => {
            let models = searchable_models(&state, &slugs).ok_or_else(|| AppError::NotFound(path.to_string()))?;
            state.engines.search.search(&models, &params).await
        }
    }
    .inspect_err(|e| tracing::error!(path = %path, error = %e, "engine failed"))?;

    Ok(success_page(page))
}

/// Descriptors for the requested slugs, first occurrence wins.
fn searchable_models<'a>(state: &'a AppState, slugs: &[String]) -> Option<Vec<&'a ModelDescriptor>> {
    let mut models: Vec<&ModelDescriptor> = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let model = state.registry.searchable_by_slug(slug)?;
        if !models.iter().any(|m| m.name == model.name) {
            models.push(model);
        }
    }
    Some(models)
}
