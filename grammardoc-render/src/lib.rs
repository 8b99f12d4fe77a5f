//! HTML documentation rendering for grammar files
//!
//!     This crate turns parsed grammar trees (grammardoc-syntax) into
//!     annotated HTML: one fragment per doc-comment block and one per rule,
//!     with cross-links between rule/token uses and their declarations and
//!     trivial literal tokens substituted inline.
//!
//!     This is a pure lib: it powers grammardoc-cli but is shell agnostic;
//!     no std printing, env vars or file IO happens here.
//!
//!     The file structure:
//!     .
//!     ├── collect.rs        # rule extraction across files
//!     ├── tokens.rs         # simple-token resolution → TokenMap
//!     ├── order.rs          # optional lexicographic reordering
//!     ├── comment.rs        # doc comments → HTML (comrak)
//!     ├── html
//!     │   ├── dom.rs        # rcdom construction + fragment serialization
//!     │   ├── renderer.rs   # the recursive syntax visitor
//!     │   └── mod.rs        # themes, options, complete-document wrapper
//!     └── error.rs
//!
//! Pipeline
//!
//!     Each run is one synchronous pass in a fixed order: collect rules →
//!     resolve the token map → optionally sort → render token specs → render
//!     parser rules. Rules share nothing mutable, so fragments never depend
//!     on each other; links only need every referenced anchor to be emitted
//!     somewhere in the same document. Referential integrity is deliberately
//!     unchecked: a reference to an undefined rule renders as a link that
//!     resolves to nothing.
//!
//! Library Choices
//!
//!     Markup is never assembled by string concatenation: fragments are built
//!     as rcdom trees and serialized with html5ever, so escaping and balance
//!     come from the library. Doc comments are CommonMark, delegated to
//!     comrak.

pub mod collect;
pub mod comment;
pub mod error;
pub mod html;
pub mod order;
pub mod tokens;

pub use error::RenderError;
pub use html::{wrap_in_document, HtmlOptions, HtmlTheme};
pub use tokens::TokenMap;

use grammardoc_syntax::ast::GrammarFile;
use html::renderer::SyntaxRenderer;

/// Knobs of the rendering core.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Omit simple lexer rules from the output entirely (their value is
    /// already inlined everywhere they are referenced).
    pub skip_simple_tokens: bool,
    /// Sort the two rule sequences by name instead of declaration order.
    pub sort_lexical: bool,
    /// Reproduce the original whitespace and comments inside rule bodies.
    pub preserve_layout: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            skip_simple_tokens: true,
            sort_lexical: false,
            preserve_layout: false,
        }
    }
}

/// Renders a batch of grammar files into an ordered sequence of HTML
/// fragments: file-level doc comments first, then lexer rules, then parser
/// rules, each rule preceded by its own doc-comment fragments.
pub fn render_fragments(
    files: &[GrammarFile],
    options: &RenderOptions,
) -> Result<Vec<String>, RenderError> {
    let mut collected = collect::collect(files);
    if options.sort_lexical {
        order::sort_by_name(&mut collected.lexer_rules);
        order::sort_by_name(&mut collected.parser_rules);
    }
    let token_map = tokens::build_token_map(&collected.lexer_rules);

    let mut fragments = Vec::new();
    for file in files {
        for comment in &file.doc_comments {
            fragments.push(comment::doc_comment_to_html(comment));
        }
    }
    for entry in &collected.lexer_rules {
        if options.skip_simple_tokens && tokens::simple_token_value(entry.rule).is_some() {
            continue;
        }
        for comment in &entry.rule.doc_comments {
            fragments.push(comment::doc_comment_to_html(comment));
        }
        let layout = options.preserve_layout.then_some(&entry.file.tokens);
        let mut renderer = SyntaxRenderer::new(&token_map, layout);
        let fragment = renderer.render_lexer_rule(entry.rule);
        fragments.push(html::dom::serialize_fragment(&fragment)?);
    }
    for entry in &collected.parser_rules {
        for comment in &entry.rule.doc_comments {
            fragments.push(comment::doc_comment_to_html(comment));
        }
        let layout = options.preserve_layout.then_some(&entry.file.tokens);
        let mut renderer = SyntaxRenderer::new(&token_map, layout);
        let fragment = renderer.render_parser_rule(entry.rule);
        fragments.push(html::dom::serialize_fragment(&fragment)?);
    }
    Ok(fragments)
}

/// Renders a batch and concatenates the fragments into one HTML body.
pub fn render_body(
    files: &[GrammarFile],
    options: &RenderOptions,
) -> Result<String, RenderError> {
    Ok(render_fragments(files, options)?.concat())
}

/// Renders a batch into a complete, self-contained HTML document.
pub fn render_document(
    files: &[GrammarFile],
    options: &RenderOptions,
    html_options: &HtmlOptions,
) -> Result<String, RenderError> {
    let body = render_body(files, options)?;
    Ok(wrap_in_document(&body, html_options))
}
