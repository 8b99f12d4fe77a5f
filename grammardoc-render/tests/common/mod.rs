//! Shared helpers for the rendering tests

use grammardoc_render::{render_fragments, RenderOptions};
use grammardoc_syntax::{parse_grammar, GrammarFile};

pub fn parse(source: &str) -> GrammarFile {
    parse_grammar(source).expect("grammar should parse")
}

/// Parse one grammar file and render it with the given options.
pub fn render_with(source: &str, options: &RenderOptions) -> String {
    let files = [parse(source)];
    render_fragments(&files, options)
        .expect("rendering should succeed")
        .concat()
}

/// Parse one grammar file and render it with default options.
pub fn render(source: &str) -> String {
    render_with(source, &RenderOptions::default())
}
