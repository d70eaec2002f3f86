//! Best-effort HTML to Markdown reduction.
//!
//! Used to undo accidental Markdown to HTML promotion before content is
//! re-rendered. Passes run in a fixed order over one parsed tree: each pass
//! replaces the elements it understands with Markdown text nodes, and later
//! passes read the text left behind by earlier ones. Tables, blockquotes and
//! nested inline formatting degrade to plain text.

use std::sync::LazyLock;

use regex::Regex;

use super::dom::{self, DomError, ParsedDocument};
use super::patterns::PatternKind;

#[derive(thiserror::Error, Debug)]
pub enum ReduceError {
    #[error("{pass} pass failed: {source}")]
    Pass {
        pass: &'static str,
        #[source]
        source: DomError,
    },

    #[error(transparent)]
    Parse(#[from] DomError),
}

type Pass = fn(&ParsedDocument) -> Result<(), DomError>;

/// Reduction passes, in execution order.
const PASSES: [(&'static str, Pass); 6] = [
    ("code", reduce_code),
    ("headings", reduce_headings),
    ("lists", reduce_lists),
    ("emphasis", reduce_emphasis),
    ("links", reduce_links),
    ("paragraphs", reduce_paragraphs),
];

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(#{1,6})\s+(.+)$").expect("heading pattern must compile"));

/// Reduce an HTML fragment to approximate Markdown.
///
/// Never fails: if the tree cannot be processed the failure is logged and
/// `html` is returned unchanged.
pub fn reduce_to_markdown(html: &str) -> String {
    reduce_with(html, &PASSES)
}

fn reduce_with(html: &str, passes: &[(&'static str, Pass)]) -> String {
    match try_reduce(html, passes) {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::warn!(error = %e, "failed to reduce HTML to markdown, keeping original");
            html.to_string()
        }
    }
}

fn try_reduce(html: &str, passes: &[(&'static str, Pass)]) -> Result<String, ReduceError> {
    let doc = ParsedDocument::parse(html)?;

    for &(pass, run) in passes {
        run(&doc).map_err(|source| ReduceError::Pass { pass, source })?;
    }

    Ok(doc.text().trim().to_string())
}

/// Fenced blocks for `<pre><code>`, backticks for inline `<code>`.
fn reduce_code(doc: &ParsedDocument) -> Result<(), DomError> {
    for code in doc.select("pre > code")? {
        let language = dom::declared_language(&code).unwrap_or_default();
        let text = code.as_node().text_contents();
        let body = text.trim_start_matches('\n').trim_end();
        let fence = format!("\n```{language}\n{body}\n```\n\n");

        match code.as_node().parent() {
            Some(pre) => dom::replace_with_text(&pre, fence),
            None => dom::replace_with_text(code.as_node(), fence),
        }
    }

    for code in doc.select("code")? {
        let node = code.as_node();
        if dom::has_ancestor(node, "pre") {
            continue;
        }
        let text = node.text_contents();
        dom::replace_with_text(node, format!("`{text}`"));
    }

    Ok(())
}

fn reduce_headings(doc: &ParsedDocument) -> Result<(), DomError> {
    for heading in doc.select("h1, h2, h3, h4, h5, h6")? {
        let tag: &str = &heading.name.local;
        let level = tag[1..].parse::<usize>().unwrap_or(1);
        let text = heading.as_node().text_contents();
        let line = format!("{} {}\n\n", "#".repeat(level), text.trim());
        dom::replace_with_text(heading.as_node(), line);
    }
    Ok(())
}

/// `- text` for unordered items, `<n>. text` for ordered ones.
///
/// Positions are read from the tree before any item is replaced, so every
/// item still sees its preceding siblings as elements.
fn reduce_lists(doc: &ParsedDocument) -> Result<(), DomError> {
    let lines: Vec<_> = doc
        .select("li")?
        .into_iter()
        .map(|item| {
            let node = item.as_node().clone();
            let text = node.text_contents();
            let ordered = node
                .parent()
                .is_some_and(|parent| dom::is_element(&parent, "ol"));

            let line = if ordered {
                format!("{}. {}\n", dom::sibling_position(&node, "li"), text.trim())
            } else {
                format!("- {}\n", text.trim())
            };
            (node, line)
        })
        .collect();

    for (node, line) in lines {
        dom::replace_with_text(&node, line);
    }
    Ok(())
}

fn reduce_emphasis(doc: &ParsedDocument) -> Result<(), DomError> {
    for bold in doc.select("strong, b")? {
        let text = bold.as_node().text_contents();
        dom::replace_with_text(bold.as_node(), format!("**{text}**"));
    }
    for italic in doc.select("em, i")? {
        let text = italic.as_node().text_contents();
        dom::replace_with_text(italic.as_node(), format!("*{text}*"));
    }
    Ok(())
}

fn reduce_links(doc: &ParsedDocument) -> Result<(), DomError> {
    for link in doc.select("a")? {
        let href = link
            .attributes
            .borrow()
            .get("href")
            .unwrap_or_default()
            .to_string();
        let text = link.as_node().text_contents();
        dom::replace_with_text(link.as_node(), format!("[{text}]({href})"));
    }
    Ok(())
}

/// What a paragraph's text looks like once earlier passes have run.
#[derive(Debug, PartialEq, Eq)]
enum ParagraphShape {
    Heading,
    ListItem,
    Prose,
}

fn paragraph_shape(text: &str) -> ParagraphShape {
    if HEADING_LINE.is_match(text) {
        ParagraphShape::Heading
    } else if PatternKind::UnorderedList.is_match(text) || PatternKind::OrderedList.is_match(text)
    {
        ParagraphShape::ListItem
    } else {
        ParagraphShape::Prose
    }
}

fn reduce_paragraphs(doc: &ParsedDocument) -> Result<(), DomError> {
    for paragraph in doc.select("p")? {
        let text = paragraph.as_node().text_contents();
        let text = text.trim();

        let block = match paragraph_shape(text) {
            ParagraphShape::Heading => match HEADING_LINE.captures(text) {
                Some(caps) => format!("{} {}\n\n", &caps[1], caps[2].trim()),
                None => format!("{text}\n\n"),
            },
            ParagraphShape::ListItem | ParagraphShape::Prose => format!("{text}\n\n"),
        };
        dom::replace_with_text(paragraph.as_node(), block);
    }
    Ok(())
}
