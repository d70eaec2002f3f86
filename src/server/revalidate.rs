//! Cache revalidation webhook.
//!
//! A CMS posts here when a content item changes. The handler checks the
//! shared secret, then drops the cached renders of every page that shows
//! the item: its own page, the static pages, and one page per tag.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::{AppState, ServerError};

#[derive(Debug, Deserialize)]
pub struct SecretQuery {
    secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RevalidateRequest {
    contents: ContentRef,
}

#[derive(Debug, Deserialize)]
struct ContentRef {
    id: String,
    #[serde(default)]
    tags: Vec<TagRef>,
}

#[derive(Debug, Deserialize)]
struct TagRef {
    id: String,
}

#[derive(Debug, Serialize)]
struct RevalidateResponse {
    revalidated: bool,
    id: String,
    /// Unix timestamp in milliseconds.
    now: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    error: String,
}

/// `GET /api/revalidate`
pub async fn liveness() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Revalidation endpoint is live".to_string(),
    })
}

/// `POST /api/revalidate?secret=...`
pub async fn revalidate(
    State(state): State<AppState>,
    Query(query): Query<SecretQuery>,
    body: String,
) -> Response {
    if !state.revalidate.secret_matches(query.secret.as_deref()) {
        tracing::warn!("rejected revalidation request with invalid secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse {
                message: "Invalid secret".to_string(),
            }),
        )
            .into_response();
    }

    match revalidate_content(&state, &body) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "revalidation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    message: "Error revalidating".to_string(),
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn revalidate_content(state: &AppState, body: &str) -> Result<RevalidateResponse, ServerError> {
    let request: RevalidateRequest = serde_json::from_str(body)?;
    let contents = request.contents;

    let paths = state
        .revalidate
        .affected_paths(&contents.id, contents.tags.iter().map(|tag| tag.id.as_str()));

    for path in &paths {
        state.cache.invalidate(path);
    }

    tracing::info!(id = %contents.id, paths = paths.len(), "revalidated content");

    Ok(RevalidateResponse {
        revalidated: true,
        id: contents.id,
        now: chrono::Utc::now().timestamp_millis(),
    })
}
