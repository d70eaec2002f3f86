mod classify;
mod dom;
mod formatter;
mod highlight;
mod hint;
mod markdown;
mod patterns;
mod reduce;

pub use classify::{ContentKind, classify};
pub use formatter::{ContentFormatter, Route};
pub use highlight::SyntaxHighlighter;
pub use hint::TypeHint;
pub use markdown::{MarkdownError, MarkdownRenderer};
pub use reduce::reduce_to_markdown;
