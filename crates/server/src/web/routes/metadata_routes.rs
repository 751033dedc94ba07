use axum::{
    extract::{Query, State, rejection::QueryRejection},
    Json,
};
use linkshelf_common::validation::{URL_INVALID, URL_REQUIRED};
use linkshelf_common::{ApiResponse, MetadataResponse};
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;

use crate::web::{AppError, AppState};

#[derive(Deserialize)]
pub struct MetadataQuery {
    url: Option<String>,
}

/// Best-effort title lookup for the add form. Fetch failures still answer
/// 200 with a `null` title; only a missing or malformed `url` is an error.
pub async fn fetch_metadata_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<MetadataQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<MetadataResponse>>, AppError> {
    let Query(query) = query?;
    let raw_url = query
        .url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::InvalidInput(URL_REQUIRED.to_string()))?;
    let url = Url::parse(&raw_url).map_err(|_| AppError::InvalidInput(URL_INVALID.to_string()))?;

    let title = app_state.metadata.fetch_title(&url).await;
    Ok(Json(ApiResponse::ok(MetadataResponse { title })))
}
