//! Layout-preserving mode tests
//!
//! With `preserve_layout` on, the renderer re-emits the hidden whitespace
//! and comment tokens inside rule bodies. These tests check that comments
//! survive verbatim, whitespace becomes markup-safe equivalents, nothing is
//! emitted twice, and nothing the plain mode renders goes missing.
//!
//! The serializer writes U+00A0 as `&nbsp;`, so assertions use the entity.

use crate::common::render_with;
use grammardoc_render::RenderOptions;

fn layout_options() -> RenderOptions {
    RenderOptions {
        preserve_layout: true,
        ..RenderOptions::default()
    }
}

#[test]
fn test_comment_between_alternatives_is_preserved() {
    let source = "grammar G;\nexpr : mul // fast path\n | add ;";
    let html = render_with(source, &layout_options());

    assert!(html.contains("<span class=\"gd-trivia\">"));
    assert!(html.contains("//&nbsp;fast&nbsp;path"));
}

#[test]
fn test_block_comment_before_element_is_preserved() {
    let source = "grammar G;\nexpr : /* left */ mul ;";
    let html = render_with(source, &layout_options());
    assert!(html.contains("/*&nbsp;left&nbsp;*/"));
}

#[test]
fn test_newlines_become_br() {
    let source = "grammar G;\nexpr :\n    mul\n    | add ;";
    let html = render_with(source, &layout_options());
    assert!(html.contains("<br>"));
    assert!(html.contains("&nbsp;&nbsp;&nbsp;&nbsp;"));
}

#[test]
fn test_tab_becomes_four_spaces() {
    let source = "grammar G;\nexpr : mul |\tadd ;";
    let html = render_with(source, &layout_options());
    assert!(html.contains("<span class=\"gd-trivia\">&nbsp;&nbsp;&nbsp;&nbsp;</span>"));
}

#[test]
fn test_plain_mode_emits_no_trivia() {
    let source = "grammar G;\nexpr : mul // fast path\n | add ;";
    let html = render_with(source, &RenderOptions::default());
    assert!(!html.contains("gd-trivia"));
    assert!(!html.contains("fast"));
}

#[test]
fn test_layout_mode_renders_everything_plain_mode_does() {
    let source = "grammar G;\nexpr : mul ('+' mul)* // sum\n | INT ;";
    let plain = render_with(source, &RenderOptions::default());
    let layout = render_with(source, &layout_options());

    for needle in [
        "<a id=\"expr\">expr</a>",
        "<a href=\"#mul\">mul</a>",
        "<span class=\"gd-token-ref gd-string-literal\">+</span>",
        "<span class=\"gd-ebnf-suffix\">*</span>",
        "<a href=\"#INT\">INT</a>",
        "<span class=\"gd-meta\">;</span>",
    ] {
        assert!(plain.contains(needle), "plain mode missing {needle}");
        assert!(layout.contains(needle), "layout mode missing {needle}");
    }
}

#[test]
fn test_trivia_is_not_emitted_twice() {
    // the run before `mul` precedes both the alternative and its first
    // element, which share a start token
    let source = "grammar G;\nexpr : /* once */ mul ;";
    let html = render_with(source, &layout_options());
    assert_eq!(html.matches("once").count(), 1);
}

#[test]
fn test_nothing_before_the_rule_header_leaks_in() {
    let source = "grammar G;\n// between rules\nexpr : mul ;";
    let html = render_with(source, &layout_options());
    assert!(!html.contains("between"));
}

#[test]
fn test_trivia_before_terminator_and_close_paren() {
    let source = "grammar G;\nexpr : ( mul /* inner */ ) /* outer */ ;";
    let html = render_with(source, &layout_options());
    assert!(html.contains("/*&nbsp;inner&nbsp;*/"));
    assert!(html.contains("/*&nbsp;outer&nbsp;*/"));
}
