//! Single entry point from raw content to highlighted HTML.

use crate::config::{HighlightConfig, MarkdownConfig};

use super::classify::{ContentKind, classify};
use super::highlight::SyntaxHighlighter;
use super::hint::TypeHint;
use super::markdown::{MarkdownError, MarkdownRenderer};
use super::patterns::has_html_tags;
use super::reduce::reduce_to_markdown;

/// How a piece of content travels through the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Render as Markdown, then highlight.
    Markdown,
    /// Declared Markdown that arrived already rendered: reduce back to
    /// Markdown, render, then highlight.
    RecoveredMarkdown,
    /// Highlight the HTML as given.
    Html,
}

/// Normalizes Markdown or HTML content into syntax-highlighted HTML.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ContentFormatter {
    renderer: MarkdownRenderer,
    highlighter: SyntaxHighlighter,
}

impl ContentFormatter {
    pub fn new(
        markdown_config: &MarkdownConfig,
        highlight_config: &HighlightConfig,
    ) -> Result<Self, MarkdownError> {
        Ok(Self {
            renderer: MarkdownRenderer::new(markdown_config)?,
            highlighter: SyntaxHighlighter::new(&highlight_config.theme),
        })
    }

    pub fn highlighter(&self) -> &SyntaxHighlighter {
        &self.highlighter
    }

    /// Decide how `content` is processed given an optional type hint.
    pub fn route(content: &str, hint: Option<&TypeHint>) -> Route {
        match hint.and_then(TypeHint::normalized) {
            Some("markdown") if has_html_tags(content) => Route::RecoveredMarkdown,
            Some("markdown") => Route::Markdown,
            Some("html") => Route::Html,
            _ => match classify(content) {
                ContentKind::Markdown => Route::Markdown,
                ContentKind::Html => Route::Html,
            },
        }
    }

    /// Format `content` into highlighted HTML.
    ///
    /// The highlighter always runs last, so the result is HTML on every
    /// route, never bare Markdown.
    pub fn format(&self, content: &str, hint: Option<&TypeHint>) -> String {
        let route = Self::route(content, hint);
        tracing::debug!(?route, hint = ?hint.and_then(TypeHint::normalized), "formatting content");

        let html = match route {
            Route::Markdown => self.renderer.render(content),
            Route::RecoveredMarkdown => {
                let markdown = reduce_to_markdown(content);
                self.renderer.render(&markdown)
            }
            Route::Html => content.to_string(),
        };

        self.highlighter.highlight_html(&html)
    }
}

impl Default for ContentFormatter {
    fn default() -> Self {
        Self {
            renderer: MarkdownRenderer::default(),
            highlighter: SyntaxHighlighter::default(),
        }
    }
}
