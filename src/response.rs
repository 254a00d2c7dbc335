//! Standard response envelope helpers.

use crate::service::ResultPage;
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Results {
    pub results: Vec<serde_json::Value>,
    pub count: u64,
    pub page: PageMeta,
}

#[derive(Serialize)]
pub struct PageMeta {
    /// Documents in this response.
    pub count: u64,
}

pub fn success_page(page: ResultPage) -> (StatusCode, Json<Results>) {
    let returned = page.results.len() as u64;
    (
        StatusCode::OK,
        Json(Results {
            results: page.results,
            count: page.count,
            page: PageMeta { count: returned },
        }),
    )
}
