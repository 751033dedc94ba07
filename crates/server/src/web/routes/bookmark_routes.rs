use axum::{
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use linkshelf_common::{ApiResponse, Bookmark, BookmarkPayload};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::metadata_routes;
use crate::web::{AppError, AppState};

// --- Request/Response Structs ---

#[derive(Deserialize)]
pub struct ListBookmarksQuery {
    tag: Option<String>,
}

type BookmarkResponse = Json<ApiResponse<Bookmark>>;

// --- Route Handlers ---

async fn list_bookmarks_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<ListBookmarksQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Bookmark>>>, AppError> {
    let Query(query) = query?;
    let bookmarks = app_state.store.lock().await.list(query.tag.as_deref());
    debug!(count = bookmarks.len(), tag = ?query.tag, "Listed bookmarks.");
    Ok(Json(ApiResponse::ok(bookmarks)))
}

async fn create_bookmark_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<BookmarkPayload>, JsonRejection>,
) -> Result<(StatusCode, BookmarkResponse), AppError> {
    let Json(payload) = payload?;
    let bookmark = app_state.store.lock().await.create(payload)?;
    info!(bookmark_id = %bookmark.id, url = %bookmark.url, "Created bookmark.");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(bookmark))))
}

async fn update_bookmark_handler(
    State(app_state): State<Arc<AppState>>,
    Path(bookmark_id): Path<String>,
    payload: Result<Json<BookmarkPayload>, JsonRejection>,
) -> Result<BookmarkResponse, AppError> {
    let Json(payload) = payload?;
    let bookmark = app_state.store.lock().await.update(&bookmark_id, payload)?;
    info!(bookmark_id = %bookmark.id, "Updated bookmark.");
    Ok(Json(ApiResponse::ok(bookmark)))
}

async fn delete_bookmark_handler(
    State(app_state): State<Arc<AppState>>,
    Path(bookmark_id): Path<String>,
) -> Result<BookmarkResponse, AppError> {
    let removed = app_state.store.lock().await.delete(&bookmark_id)?;
    info!(bookmark_id = %removed.id, "Deleted bookmark.");
    Ok(Json(ApiResponse::ok(removed)))
}

// --- Router ---

pub fn create_bookmarks_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/bookmarks",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route(
            "/bookmarks/metadata",
            get(metadata_routes::fetch_metadata_handler),
        )
        .route(
            "/bookmarks/{bookmark_id}",
            put(update_bookmark_handler).delete(delete_bookmark_handler),
        )
}
