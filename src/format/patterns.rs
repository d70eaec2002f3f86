//! Markdown syntax detectors used to sniff the format of a content blob.
//!
//! The library is pure data: an ordered, immutable list of named matchers
//! compiled once on first use. Classification thresholds live in
//! [`super::classify`], not here.

use std::sync::LazyLock;

use regex::Regex;

/// A category of Markdown syntax that counts as a format signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Heading,
    UnorderedList,
    OrderedList,
    FencedCode,
    InlineCode,
    Link,
    Image,
    BoldAsterisk,
    ItalicAsterisk,
    BoldUnderscore,
    ItalicUnderscore,
    Blockquote,
    HorizontalRule,
    TableRow,
    Checkbox,
}

impl PatternKind {
    /// Stable name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Heading => "heading",
            PatternKind::UnorderedList => "unordered_list",
            PatternKind::OrderedList => "ordered_list",
            PatternKind::FencedCode => "fenced_code",
            PatternKind::InlineCode => "inline_code",
            PatternKind::Link => "link",
            PatternKind::Image => "image",
            PatternKind::BoldAsterisk => "bold_asterisk",
            PatternKind::ItalicAsterisk => "italic_asterisk",
            PatternKind::BoldUnderscore => "bold_underscore",
            PatternKind::ItalicUnderscore => "italic_underscore",
            PatternKind::Blockquote => "blockquote",
            PatternKind::HorizontalRule => "horizontal_rule",
            PatternKind::TableRow => "table_row",
            PatternKind::Checkbox => "checkbox",
        }
    }

    /// The compiled matcher for this category.
    pub fn regex(self) -> &'static Regex {
        &MARKDOWN_PATTERNS
            .iter()
            .find(|pattern| pattern.kind == self)
            .unwrap_or_else(|| unreachable!("every pattern kind is registered"))
            .regex
    }

    pub fn is_match(self, text: &str) -> bool {
        self.regex().is_match(text)
    }
}

/// A named Markdown matcher.
pub struct Pattern {
    pub kind: PatternKind,
    pub regex: Regex,
}

fn pattern(kind: PatternKind, source: &str) -> Pattern {
    Pattern {
        kind,
        regex: Regex::new(source).expect("markdown pattern must compile"),
    }
}

/// All Markdown categories, in evaluation order.
pub static MARKDOWN_PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        pattern(PatternKind::Heading, r"(?m)^#{1,6}\s+\S"),
        pattern(PatternKind::UnorderedList, r"(?m)^[ \t]*[-*+]\s+\S"),
        pattern(PatternKind::OrderedList, r"(?m)^[ \t]*\d+\.\s+\S"),
        pattern(PatternKind::FencedCode, r"(?s)```.*?```"),
        pattern(PatternKind::InlineCode, r"`[^`\n]+`"),
        pattern(PatternKind::Link, r"\[[^\]\n]+\]\([^)\n]+\)"),
        pattern(PatternKind::Image, r"!\[[^\]\n]*\]\([^)\n]+\)"),
        pattern(PatternKind::BoldAsterisk, r"\*\*[^*\n]+\*\*"),
        pattern(PatternKind::ItalicAsterisk, r"\*[^*\s][^*\n]*\*"),
        pattern(PatternKind::BoldUnderscore, r"__[^_\n]+__"),
        pattern(PatternKind::ItalicUnderscore, r"_[^_\s][^_\n]*_"),
        pattern(PatternKind::Blockquote, r"(?m)^>\s+\S"),
        pattern(
            PatternKind::HorizontalRule,
            r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$",
        ),
        pattern(PatternKind::TableRow, r"(?m)^\|.+\|[ \t]*$"),
        pattern(PatternKind::Checkbox, r"(?m)^[ \t]*[-*+]\s+\[[ xX]\]\s"),
    ]
});

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[a-zA-Z][a-zA-Z0-9-]*(?:\s[^<>]*)?/?>").expect("html tag pattern must compile")
});

/// Number of HTML tag tokens (opening, closing or self-closing) in `content`.
pub fn count_html_tags(content: &str) -> usize {
    HTML_TAG.find_iter(content).count()
}

pub fn has_html_tags(content: &str) -> bool {
    HTML_TAG.is_match(content)
}

/// Signal counts for a single classification call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatches {
    /// HTML tag occurrences.
    pub tag_count: usize,
    /// Distinct Markdown categories matching at least once.
    pub pattern_count: usize,
    /// The categories that matched, in library order.
    pub matched: Vec<PatternKind>,
}

/// Evaluate the full pattern library against `content`.
pub fn scan(content: &str) -> PatternMatches {
    let matched: Vec<PatternKind> = MARKDOWN_PATTERNS
        .iter()
        .filter(|pattern| pattern.regex.is_match(content))
        .map(|pattern| pattern.kind)
        .collect();

    PatternMatches {
        tag_count: count_html_tags(content),
        pattern_count: matched.len(),
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_has_fifteen_categories() {
        assert_eq!(MARKDOWN_PATTERNS.len(), 15);
    }

    #[test]
    fn test_each_category_matches_its_syntax() {
        let samples = [
            (PatternKind::Heading, "## Install"),
            (PatternKind::UnorderedList, "- apples"),
            (PatternKind::OrderedList, "1. first"),
            (PatternKind::FencedCode, "```\nlet x = 1;\n```"),
            (PatternKind::InlineCode, "run `cargo build` now"),
            (PatternKind::Link, "see [docs](https://example.com)"),
            (PatternKind::Image, "![logo](logo.png)"),
            (PatternKind::BoldAsterisk, "a **strong** word"),
            (PatternKind::ItalicAsterisk, "an *emphasized* word"),
            (PatternKind::BoldUnderscore, "a __strong__ word"),
            (PatternKind::ItalicUnderscore, "an _emphasized_ word"),
            (PatternKind::Blockquote, "> quoted"),
            (PatternKind::HorizontalRule, "---"),
            (PatternKind::TableRow, "| a | b |"),
            (PatternKind::Checkbox, "- [x] done"),
        ];

        for (kind, sample) in samples {
            assert!(kind.is_match(sample), "{} should match {:?}", kind.name(), sample);
        }
    }

    #[test]
    fn test_plain_prose_matches_nothing() {
        let matches = scan("Hello world, nothing to see here.");
        assert_eq!(matches.pattern_count, 0);
        assert_eq!(matches.tag_count, 0);
    }

    #[test]
    fn test_heading_requires_line_start() {
        assert!(!PatternKind::Heading.is_match("issue #42 is fixed"));
        assert!(PatternKind::Heading.is_match("intro\n# Title"));
    }

    #[test]
    fn test_count_html_tags() {
        assert_eq!(count_html_tags("<p>Hello <br/> <em>there</em></p>"), 5);
        assert_eq!(count_html_tags("1 < 2 and 3 > 2"), 0);
        assert!(has_html_tags("<div class=\"x\">"));
        assert!(!has_html_tags("a <- b"));
    }

    #[test]
    fn test_scan_counts_distinct_categories() {
        let matches = scan("**one** **two** **three**");
        // Bold implies the looser single-asterisk italic matcher too.
        assert_eq!(
            matches.matched,
            vec![PatternKind::BoldAsterisk, PatternKind::ItalicAsterisk]
        );
        assert_eq!(matches.pattern_count, 2);
    }
}
