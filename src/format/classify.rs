//! Heuristic Markdown/HTML sniffing.

use std::fmt;

use super::patterns::{PatternMatches, scan};

/// Below this many HTML tags, embedded markup does not rule out Markdown.
pub const MAX_EMBEDDED_TAGS: usize = 5;

/// Markdown categories required when the content also carries HTML tags.
pub const MIN_PATTERNS_WITH_TAGS: usize = 2;

/// Markdown categories required when the content has no HTML tags.
pub const MIN_PATTERNS_WITHOUT_TAGS: usize = 1;

/// The format a content blob is treated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markdown,
    Html,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Markdown => "markdown",
            ContentKind::Html => "html",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether `content` is Markdown or HTML.
///
/// Empty and whitespace-only input is HTML. A handful of inline tags in
/// otherwise Markdown prose does not defeat Markdown detection, but a
/// tag-dense document is HTML.
pub fn classify(content: &str) -> ContentKind {
    if content.trim().is_empty() {
        return ContentKind::Html;
    }

    let matches = scan(content);
    let kind = decide(&matches);

    let patterns: Vec<&str> = matches.matched.iter().map(|k| k.name()).collect();
    tracing::debug!(
        tag_count = matches.tag_count,
        pattern_count = matches.pattern_count,
        ?patterns,
        %kind,
        "classified content"
    );

    kind
}

fn decide(matches: &PatternMatches) -> ContentKind {
    let is_markdown = if matches.tag_count > 0 {
        matches.tag_count < MAX_EMBEDDED_TAGS && matches.pattern_count >= MIN_PATTERNS_WITH_TAGS
    } else {
        matches.pattern_count >= MIN_PATTERNS_WITHOUT_TAGS
    };

    if is_markdown {
        ContentKind::Markdown
    } else {
        ContentKind::Html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_html() {
        assert_eq!(classify(""), ContentKind::Html);
        assert_eq!(classify("   \n\t  "), ContentKind::Html);
    }

    #[test]
    fn test_plain_text_is_html() {
        assert_eq!(classify("Hello world"), ContentKind::Html);
    }

    #[test]
    fn test_single_signal_without_tags_is_markdown() {
        assert_eq!(classify("# Just a heading"), ContentKind::Markdown);
    }

    #[test]
    fn test_few_tags_with_two_signals_is_markdown() {
        let content = "# Release notes\n\n- fixed the <kbd>Ctrl</kbd> shortcut\n";
        assert_eq!(classify(content), ContentKind::Markdown);
    }

    #[test]
    fn test_few_tags_with_one_signal_is_html() {
        let content = "# Release notes\n\nPress <kbd>Ctrl</kbd> to continue.";
        assert_eq!(classify(content), ContentKind::Html);
    }

    #[test]
    fn test_tag_dense_content_is_html_regardless_of_patterns() {
        let content = "# Title\n\n- item with **bold** and `code`\n\n\
            <div><p>one</p><p>two</p></div>";
        assert_eq!(classify(content), ContentKind::Html);
    }

    #[test]
    fn test_rendered_html_is_html() {
        let content = "<h1>Title</h1>\n<p>Some <strong>bold</strong> text.</p>";
        assert_eq!(classify(content), ContentKind::Html);
    }

    #[test]
    fn test_threshold_boundary() {
        // Four tags stay under the threshold.
        let four = "- item\n\n**bold** <b>a</b> <i>b</i>";
        assert_eq!(classify(four), ContentKind::Markdown);

        // Five tags cross it.
        let five = "- item\n\n**bold** <b>a</b> <i>b</i> <br>";
        assert_eq!(classify(five), ContentKind::Html);
    }

    #[test]
    fn test_display() {
        assert_eq!(ContentKind::Markdown.to_string(), "markdown");
        assert_eq!(ContentKind::Html.to_string(), "html");
    }
}
