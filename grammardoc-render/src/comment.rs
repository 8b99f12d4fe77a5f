//! Doc-comment conversion (grammar doc comments → HTML)
//!
//! Doc comments are CommonMark; conversion is delegated entirely to comrak.
//! The comment fences are removed with a plain both-ends character trim;
//! leading `*` on interior lines is left alone, matching how grammar doc
//! comments are conventionally written (no gutter).

use comrak::{markdown_to_html, ComrakOptions};

/// Converts one `/** ... */` doc comment into a self-contained HTML fragment.
pub fn doc_comment_to_html(text: &str) -> String {
    let body = text.trim_matches(|c| matches!(c, ' ' | '\n' | '*' | '/'));
    let html = markdown_to_html(body, &ComrakOptions::default());
    format!("<div class=\"gd-comment\">{html}</div>")
}
