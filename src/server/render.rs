//! Format endpoint and highlight stylesheet.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use super::{AppState, ServerError};
use crate::format::TypeHint;

/// Response header reporting whether a render came from the cache.
pub const CACHE_HEADER: &str = "x-render-cache";

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    content: String,
    #[serde(default, rename = "type")]
    hint: Option<TypeHint>,
    /// Page path the render belongs to. Renders for paths the revalidation
    /// webhook can invalidate are cached until it does.
    #[serde(default)]
    path: Option<String>,
}

/// `POST /api/format`
pub async fn format_content(
    State(state): State<AppState>,
    Json(request): Json<FormatRequest>,
) -> Response {
    let cache_path = request
        .path
        .filter(|path| state.revalidate.is_revalidated_path(path));

    if let Some(page) = cache_path.as_deref().and_then(|path| state.cache.get(path)) {
        return ([(CACHE_HEADER, "hit")], Html(page.html)).into_response();
    }

    let generation = cache_path
        .as_deref()
        .map(|path| state.cache.generation(path));

    match render(&state, request.content, request.hint).await {
        Ok(html) => {
            if let (Some(path), Some(generation)) = (cache_path, generation) {
                state.cache.insert_if_current(path, html.clone(), generation);
            }
            ([(CACHE_HEADER, "miss")], Html(html)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "formatting failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn render(
    state: &AppState,
    content: String,
    hint: Option<TypeHint>,
) -> Result<String, ServerError> {
    let formatter = state.formatter.clone();
    let html =
        tokio::task::spawn_blocking(move || formatter.format(&content, hint.as_ref())).await?;
    Ok(html)
}

/// `GET /api/highlight.css`
pub async fn stylesheet(State(state): State<AppState>) -> Response {
    let highlighter = state.formatter.highlighter();
    match highlighter.generate_css() {
        Some(css) => ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response(),
        None => {
            tracing::warn!(theme = highlighter.theme_name(), "unknown highlight theme");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::config::{HighlightConfig, MarkdownConfig, RevalidateConfig};
    use crate::format::ContentFormatter;

    fn state() -> AppState {
        AppState::new(ContentFormatter::default(), RevalidateConfig::default())
    }

    fn request(content: &str, hint: Option<&str>, path: Option<&str>) -> Json<FormatRequest> {
        Json(FormatRequest {
            content: content.to_string(),
            hint: hint.map(TypeHint::from),
            path: path.map(str::to_string),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_format_markdown() {
        let response = format_content(State(state()), request("# Title", None, None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_HEADER], "miss");
        assert!(body_text(response).await.contains("<h1>Title</h1>"));
    }

    #[tokio::test]
    async fn test_format_caches_by_path() {
        let state = state();

        let first = format_content(
            State(state.clone()),
            request("# First", Some("markdown"), Some("/articles/a")),
        )
        .await;
        assert_eq!(first.headers()[CACHE_HEADER], "miss");
        assert!(state.cache.contains("/articles/a"));

        let second = format_content(
            State(state.clone()),
            request("# Second", Some("markdown"), Some("/articles/a")),
        )
        .await;
        assert_eq!(second.headers()[CACHE_HEADER], "hit");
        assert!(body_text(second).await.contains("First"));
    }

    #[tokio::test]
    async fn test_format_after_invalidation_rerenders() {
        let state = state();
        state.cache.insert("/articles/a", "<p>stale</p>".to_string());
        state.cache.invalidate("/articles/a");

        let response = format_content(
            State(state.clone()),
            request("<p>fresh</p>", Some("html"), Some("/articles/a")),
        )
        .await;
        assert_eq!(response.headers()[CACHE_HEADER], "miss");
        assert_eq!(body_text(response).await, "<p>fresh</p>");
    }

    #[tokio::test]
    async fn test_format_without_path_is_not_cached() {
        let state = state();
        format_content(State(state.clone()), request("plain", None, None)).await;
        assert!(state.cache.is_empty());
    }

    #[tokio::test]
    async fn test_paths_outside_revalidation_are_not_cached() {
        let state = state();

        for i in 0..50 {
            let path = format!("/junk/{i}");
            format_content(State(state.clone()), request("<p>x</p>", None, Some(&path))).await;
        }
        format_content(
            State(state.clone()),
            request("<p>x</p>", None, Some("/articles/a/b")),
        )
        .await;

        assert!(state.cache.is_empty());
    }

    #[tokio::test]
    async fn test_static_and_tag_paths_are_cached() {
        let state = state();

        for path in ["/", "/search", "/tags/rust"] {
            format_content(State(state.clone()), request("<p>x</p>", None, Some(path))).await;
        }

        assert_eq!(state.cache.len(), 3);
    }

    #[tokio::test]
    async fn test_render_invalidated_midway_is_not_cached() {
        let state = state();
        let generation = state.cache.generation("/articles/a");
        state.cache.invalidate("/articles/a");

        assert!(
            !state
                .cache
                .insert_if_current("/articles/a", "<p>stale</p>".to_string(), generation)
        );

        let response = format_content(
            State(state.clone()),
            request("<p>fresh</p>", Some("html"), Some("/articles/a")),
        )
        .await;
        assert_eq!(response.headers()[CACHE_HEADER], "miss");
        assert_eq!(state.cache.get("/articles/a").unwrap().html, "<p>fresh</p>");
    }

    #[test]
    fn test_request_accepts_list_hint() {
        let request: FormatRequest =
            serde_json::from_str(r#"{"content":"x","type":["html","markdown"]}"#).unwrap();
        assert_eq!(request.hint.unwrap().normalized(), Some("html"));
        assert!(request.path.is_none());
    }

    #[tokio::test]
    async fn test_stylesheet() {
        let response = stylesheet(State(state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
        assert!(!body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_stylesheet_unknown_theme() {
        let formatter = ContentFormatter::new(
            &MarkdownConfig::default(),
            &HighlightConfig {
                theme: "no-such-theme".to_string(),
            },
        )
        .unwrap();
        let state = AppState::new(formatter, RevalidateConfig::default());

        let response = stylesheet(State(state)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
