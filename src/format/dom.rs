//! Parsed HTML documents shared by the highlighter and the reducer.
//!
//! Every call parses its own tree, rewrites it in place and serializes it;
//! nothing here is shared between calls.

use kuchiki::iter::NodeIterator;
use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

/// Prefix carried by code elements that declare their language.
pub const LANGUAGE_PREFIX: &str = "language-";

#[derive(thiserror::Error, Debug)]
pub enum DomError {
    #[error("parsed document has no body element")]
    MissingBody,

    #[error("invalid selector: {0}")]
    Selector(&'static str),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// An HTML fragment parsed into an owned, mutable tree.
pub struct ParsedDocument {
    // Holds the root alive while passes work on the body.
    _document: NodeRef,
    body: NodeRef,
}

impl ParsedDocument {
    /// Parse `html` as the content of a document body.
    pub fn parse(html: &str) -> Result<Self, DomError> {
        let document = kuchiki::parse_html().one(html);
        let body = document
            .select_first("body")
            .map_err(|()| DomError::MissingBody)?
            .as_node()
            .clone();

        Ok(Self {
            _document: document,
            body,
        })
    }

    pub fn body(&self) -> &NodeRef {
        &self.body
    }

    /// Collect every element matching `selector`, in document order.
    ///
    /// Matches are collected up front so callers can detach nodes while
    /// walking the result.
    pub fn select(&self, selector: &'static str) -> Result<Vec<NodeDataRef<ElementData>>, DomError> {
        Ok(self
            .body
            .select(selector)
            .map_err(|()| DomError::Selector(selector))?
            .collect())
    }

    /// Serialize the body's children back to HTML.
    pub fn inner_html(&self) -> Result<String, DomError> {
        let mut output = Vec::new();
        for child in self.body.children() {
            child.serialize(&mut output)?;
        }
        Ok(String::from_utf8(output)?)
    }

    /// Text projection of the body: element wrappers dropped, text kept.
    pub fn text(&self) -> String {
        self.body.text_contents()
    }
}

/// Extract a language token from a class attribute value.
///
/// Removes the first `language-` prefix and takes the first
/// whitespace-delimited segment of what remains.
pub fn language_token(class: &str) -> Option<String> {
    class
        .replacen(LANGUAGE_PREFIX, "", 1)
        .split_whitespace()
        .next()
        .map(str::to_string)
}

/// Language token declared on an element's `class` attribute, if any.
pub fn declared_language(element: &NodeDataRef<ElementData>) -> Option<String> {
    element
        .attributes
        .borrow()
        .get("class")
        .and_then(language_token)
}

/// Replace `node` with a single text node.
pub fn replace_with_text(node: &NodeRef, text: String) {
    node.insert_before(NodeRef::new_text(text));
    node.detach();
}

/// Remove every child of `node`.
pub fn clear_children(node: &NodeRef) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        child.detach();
    }
}

pub fn is_element(node: &NodeRef, tag: &str) -> bool {
    node.as_element().is_some_and(|element| &*element.name.local == tag)
}

/// True when any ancestor of `node` is a `tag` element.
pub fn has_ancestor(node: &NodeRef, tag: &str) -> bool {
    node.ancestors().any(|ancestor| is_element(&ancestor, tag))
}

/// 1-based position of `node` among its sibling `tag` elements.
pub fn sibling_position(node: &NodeRef, tag: &str) -> usize {
    node.preceding_siblings()
        .elements()
        .filter(|sibling| &*sibling.name.local == tag)
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_token() {
        assert_eq!(language_token("language-rust"), Some("rust".to_string()));
        assert_eq!(
            language_token("language-js line-numbers"),
            Some("js".to_string())
        );
        assert_eq!(language_token("python"), Some("python".to_string()));
        assert_eq!(language_token("language-"), None);
        assert_eq!(language_token("   "), None);
    }

    #[test]
    fn test_inner_html_round_trip() {
        let doc = ParsedDocument::parse("<p>Hello <em>there</em></p>").unwrap();
        assert_eq!(doc.inner_html().unwrap(), "<p>Hello <em>there</em></p>");
        assert_eq!(doc.text(), "Hello there");
    }

    #[test]
    fn test_replace_with_text() {
        let doc = ParsedDocument::parse("<p>a <b>b</b> c</p>").unwrap();
        for bold in doc.select("b").unwrap() {
            replace_with_text(bold.as_node(), "**b**".to_string());
        }
        assert_eq!(doc.text(), "a **b** c");
    }

    #[test]
    fn test_ancestry_and_position() {
        let doc = ParsedDocument::parse("<pre><code>x</code></pre><ol><li>a</li><li>b</li></ol>")
            .unwrap();

        let code = doc.select("code").unwrap();
        assert!(has_ancestor(code[0].as_node(), "pre"));

        let items = doc.select("li").unwrap();
        assert_eq!(sibling_position(items[0].as_node(), "li"), 1);
        assert_eq!(sibling_position(items[1].as_node(), "li"), 2);
    }
}
