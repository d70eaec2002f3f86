//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub revalidate: RevalidateConfig,
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "footnotes".to_string(),
        "gfm".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
        "tasklists".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}

// =============================================================================
// Highlighting configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Theme used to generate the highlighting stylesheet
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dracula".to_string()
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

// =============================================================================
// Server configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// The port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

// =============================================================================
// Revalidation configuration
// =============================================================================

/// Placeholder substituted with a content or tag id in path templates.
pub const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevalidateConfig {
    /// Shared secret expected in the `secret` query parameter.
    /// When unset, every revalidation request is rejected.
    #[serde(default)]
    pub secret: Option<String>,
    /// Page path of a content item, e.g. `/articles/{id}`
    #[serde(default = "default_content_path")]
    pub content_path: String,
    /// Page path of a tag listing, e.g. `/tags/{id}`
    #[serde(default = "default_tag_path")]
    pub tag_path: String,
    /// Paths invalidated on every content change (site root, search page)
    #[serde(default = "default_static_paths")]
    pub static_paths: Vec<String>,
}

fn default_content_path() -> String {
    "/articles/{id}".to_string()
}

fn default_tag_path() -> String {
    "/tags/{id}".to_string()
}

fn default_static_paths() -> Vec<String> {
    vec!["/".to_string(), "/search".to_string()]
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            secret: None,
            content_path: default_content_path(),
            tag_path: default_tag_path(),
            static_paths: default_static_paths(),
        }
    }
}

impl RevalidateConfig {
    pub fn content_page(&self, id: &str) -> String {
        self.content_path.replace(ID_PLACEHOLDER, id)
    }

    pub fn tag_page(&self, id: &str) -> String {
        self.tag_path.replace(ID_PLACEHOLDER, id)
    }

    /// Every page path affected by a change to `content_id`, in
    /// invalidation order: the content page, the static paths, then one
    /// path per tag.
    pub fn affected_paths<'a>(
        &self,
        content_id: &str,
        tag_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<String> {
        let mut paths = vec![self.content_page(content_id)];
        paths.extend(self.static_paths.iter().cloned());
        paths.extend(tag_ids.into_iter().map(|tag| self.tag_page(tag)));
        paths
    }

    /// Whether `candidate` matches the configured secret.
    pub fn secret_matches(&self, candidate: Option<&str>) -> bool {
        match (self.secret.as_deref(), candidate) {
            (Some(expected), Some(given)) => {
                !expected.is_empty() && constant_time_eq(expected, given)
            }
            _ => false,
        }
    }

    /// Whether `path` is a page the webhook can invalidate: a static path,
    /// or a content or tag page for some id.
    pub fn is_revalidated_path(&self, path: &str) -> bool {
        self.static_paths.iter().any(|p| p == path)
            || matches_template(&self.content_path, path)
            || matches_template(&self.tag_path, path)
    }
}

/// True when `path` is `template` with a single non-empty path segment in
/// place of the id.
fn matches_template(template: &str, path: &str) -> bool {
    let Some((prefix, suffix)) = template.split_once(ID_PLACEHOLDER) else {
        return false;
    };
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
