//! HTML to plain text
//!
//! Question bodies, options, descriptions and comments all arrive as HTML
//! fragments. `sanitize` turns them into display text:
//! - `<br>` variants become newlines
//! - tags are dropped, text content is kept
//! - entities are decoded by the HTML parser

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Strip markup from an HTML fragment and return trimmed plain text.
///
/// Never fails: malformed markup is handed to the HTML parser, which
/// recovers the way a browser would.
pub fn sanitize(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let with_breaks = BR_TAG.replace_all(html, "\n");
    let fragment = Html::parse_fragment(&with_breaks);
    let text: String = fragment.root_element().text().collect();

    text.trim().to_string()
}
