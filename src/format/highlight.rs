use autumnus::{HtmlLinkedBuilder, formatter::Formatter, languages::Language, themes};
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use super::dom::{self, DomError, ParsedDocument};

/// Class added to every code element the highlighter has processed.
pub const MARKER_CLASS: &str = "hljs";

/// A syntax highlighter using autumnus (tree-sitter based).
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    /// Theme name for CSS generation.
    theme_name: String,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with the given theme.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme_name: theme_name.to_string(),
        }
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Highlight every `<pre><code>` block in an HTML fragment.
    ///
    /// Fragments without code blocks are returned unchanged. Each processed
    /// code element gets its children replaced by highlighted markup and
    /// [`MARKER_CLASS`] appended to its class list.
    pub fn highlight_html(&self, html: &str) -> String {
        match self.rewrite_code_blocks(html) {
            Ok(Some(highlighted)) => highlighted,
            Ok(None) => html.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to highlight code blocks, keeping original HTML");
                html.to_string()
            }
        }
    }

    fn rewrite_code_blocks(&self, html: &str) -> Result<Option<String>, DomError> {
        let doc = ParsedDocument::parse(html)?;
        let blocks = doc.select("pre > code")?;
        if blocks.is_empty() {
            return Ok(None);
        }

        tracing::debug!(blocks = blocks.len(), "highlighting code blocks");

        for code in blocks {
            let language = dom::declared_language(&code);
            let text = code.as_node().text_contents();
            let markup = self.highlight_code(&text, language.as_deref());

            let node = code.as_node();
            dom::clear_children(node);
            for child in fragment_nodes(&markup)? {
                node.append(child);
            }
            add_marker_class(&code);
        }

        Ok(Some(doc.inner_html()?))
    }

    /// Highlight a single code snippet, returning the inner markup of its
    /// `<code>` element.
    ///
    /// An unrecognized `language` falls back to detection from the code
    /// itself. If highlighting fails the escaped source is returned.
    pub fn highlight_code(&self, code: &str, language: Option<&str>) -> String {
        let lang = resolve_language(language, code);

        let rendered = match HtmlLinkedBuilder::new().source(code).lang(lang).build() {
            Ok(formatter) => {
                let mut output: Vec<u8> = Vec::new();
                match formatter.format(&mut output) {
                    Ok(()) => String::from_utf8(output).ok(),
                    Err(e) => {
                        tracing::warn!(error = %e, "highlighter failed to format code");
                        None
                    }
                }
            }
            Err(_) => {
                tracing::warn!("failed to build highlighter formatter");
                None
            }
        };

        rendered
            .and_then(|full| inner_code_markup(&full))
            .unwrap_or_else(|| html_escape::encode_text(code).into_owned())
    }

    /// Generate CSS for the current theme.
    pub fn generate_css(&self) -> Option<String> {
        let theme = themes::get(&self.theme_name).ok()?;
        Some(theme.css(false)) // false = don't enable italic
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new("dracula")
    }
}

/// Map a declared language token to a highlighter language, falling back to
/// detection from the source when the token is missing or unknown.
fn resolve_language(declared: Option<&str>, code: &str) -> Language {
    if let Some(name) = declared.filter(|name| !name.is_empty()) {
        let lang = Language::guess(name, "");
        if !matches!(lang, Language::PlainText) || matches!(name, "plaintext" | "text") {
            return lang;
        }
        tracing::debug!(language = name, "unrecognized language, detecting from content");
    }

    Language::guess("", code)
}

/// Children of the `<code>` element in a fully formatted highlighter block.
fn inner_code_markup(full: &str) -> Option<String> {
    let doc = ParsedDocument::parse(full).ok()?;
    let code = doc.body().select_first("code").ok()?;

    let mut output = Vec::new();
    for child in code.as_node().children() {
        child.serialize(&mut output).ok()?;
    }
    String::from_utf8(output).ok()
}

/// Parse highlighted markup into detached nodes ready to be appended.
fn fragment_nodes(markup: &str) -> Result<Vec<NodeRef>, DomError> {
    let fragment = ParsedDocument::parse(markup)?;
    let nodes: Vec<NodeRef> = fragment.body().children().collect();
    for node in &nodes {
        node.detach();
    }
    Ok(nodes)
}

fn add_marker_class(element: &NodeDataRef<ElementData>) {
    let mut attributes = element.attributes.borrow_mut();
    let class = match attributes.get("class") {
        Some(existing) if existing.split_whitespace().any(|c| c == MARKER_CLASS) => return,
        Some(existing) if !existing.trim().is_empty() => {
            format!("{} {}", existing.trim(), MARKER_CLASS)
        }
        _ => MARKER_CLASS.to_string(),
    };
    attributes.insert("class", class);
}
