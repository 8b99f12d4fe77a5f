//! Rendering tests (grammar → HTML fragments)
//!
//! These verify the structure of the emitted markup: anchors, cross-links,
//! inline substitution of simple tokens, alternation markers, and the fixed
//! fragment order of a batch.

use crate::common::{parse, render, render_with};
use grammardoc_render::{render_document, render_fragments, HtmlOptions, RenderOptions};
use once_cell::sync::Lazy;
use regex::Regex;

fn options() -> RenderOptions {
    RenderOptions::default()
}

// ============================================================================
// BASIC RULE STRUCTURE
// ============================================================================

#[test]
fn test_rule_anchor_literal_link_terminator_in_order() {
    let html = render("grammar G;\ngreeting : 'hello' ID ;");

    let anchor = html.find("<a id=\"greeting\">greeting</a>").expect("anchor");
    let literal = html
        .find("<span class=\"gd-token-ref gd-string-literal\">hello</span>")
        .expect("literal");
    let link = html.find("<a href=\"#ID\">ID</a>").expect("link");
    let terminator = html.find("<span class=\"gd-meta\">;</span>").expect(";");
    assert!(anchor < literal);
    assert!(literal < link);
    assert!(link < terminator);
}

#[test]
fn test_rule_wrapper_structure() {
    let html = render("grammar G;\na : 'x' ;");
    assert!(html.contains("<div class=\"gd-rule\">"));
    assert!(html.contains("<div class=\"gd-rule-body\">"));
    assert!(html.contains("<span class=\"gd-alternative-list\">"));
    assert!(html.contains("<span class=\"gd-alternative gd-alternative-0\">"));
}

#[test]
fn test_lexer_rule_gets_terminator_too() {
    let html = render("lexer grammar L;\nID : [a-z]+ ;");
    assert!(html.contains("<a id=\"ID\">ID</a>"));
    assert!(html.contains("<span class=\"gd-meta\">;</span>"));
}

// ============================================================================
// ALTERNATION
// ============================================================================

#[test]
fn test_two_alternatives_one_separator() {
    let html = render("grammar G;\nexpr : expr '+' expr | INT ;");

    assert_eq!(html.matches("<span class=\"gd-meta\">|</span>").count(), 1);
    assert!(html.contains("gd-alternative gd-alternative-0"));
    assert!(html.contains("gd-alternative gd-alternative-1"));
    assert!(!html.contains("gd-alternative gd-alternative-2"));
}

#[test]
fn test_separator_is_inside_every_container_but_the_first() {
    let html = render("grammar G;\nx : A | B | C ;");
    assert_eq!(html.matches("<span class=\"gd-meta\">|</span>").count(), 2);
    let first = html.find("gd-alternative gd-alternative-0").expect("alt 0");
    let first_sep = html.find("<span class=\"gd-meta\">|</span>").expect("|");
    assert!(first < first_sep);
}

#[test]
fn test_labeled_alternatives_render_label_markers() {
    let html = render("grammar G;\nexpr : expr '*' expr # Mult | INT # Atom ;");
    assert!(html.contains("<span class=\"gd-label\">Mult</span>"));
    assert!(html.contains("<span class=\"gd-label\">Atom</span>"));
}

// ============================================================================
// TERMINALS AND SUBSTITUTION
// ============================================================================

#[test]
fn test_simple_token_reference_is_substituted_inline() {
    let html = render("grammar G;\nPLUS : '+' ;\nsum : INT PLUS INT ;");

    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">+</span>"));
    assert!(!html.contains("href=\"#PLUS\""));
    // INT has no rule at all; the link is still emitted, unchecked
    assert!(html.contains("<a href=\"#INT\">INT</a>"));
}

#[test]
fn test_simple_token_rule_is_skipped_from_output() {
    let html = render("grammar G;\nPLUS : '+' ;\nsum : INT PLUS INT ;");
    assert!(!html.contains("<a id=\"PLUS\">"));
}

#[test]
fn test_keep_simple_tokens_renders_their_specs() {
    let html = render_with(
        "grammar G;\nPLUS : '+' ;\nsum : INT PLUS INT ;",
        &RenderOptions {
            skip_simple_tokens: false,
            ..options()
        },
    );
    assert!(html.contains("<a id=\"PLUS\">PLUS</a>"));
    // uses are still substituted, not linked
    assert!(!html.contains("href=\"#PLUS\""));
}

#[test]
fn test_non_simple_token_reference_is_linked() {
    let html = render("grammar G;\nID : [a-z]+ ;\nname : ID ;");
    assert!(html.contains("<span class=\"gd-token-ref\"> <a href=\"#ID\">ID</a> </span>"));
    assert!(html.contains("<a id=\"ID\">ID</a>"));
}

#[test]
fn test_literal_unescaping_and_quote_stripping() {
    let html = render_with(
        "lexer grammar L;\nBACKSLASH : '\\\\' ;",
        &RenderOptions {
            skip_simple_tokens: false,
            ..options()
        },
    );
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">\\</span>"));
}

#[test]
fn test_literal_markup_characters_are_escaped() {
    let html = render_with(
        "lexer grammar L;\nLT : '<' ;",
        &RenderOptions {
            skip_simple_tokens: false,
            ..options()
        },
    );
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">&lt;</span>"));
}

// ============================================================================
// COMPOSITE ELEMENTS
// ============================================================================

#[test]
fn test_no_element_is_dropped() {
    let html = render(
        "grammar G;\nkitchen : X y 'z' (q)* ~[abc] . {act();} ;",
    );
    assert!(html.contains("<a href=\"#X\">X</a>"));
    assert!(html.contains("<a href=\"#y\">y</a>"));
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">z</span>"));
    assert!(html.contains("<span class=\"gd-meta\">(</span>"));
    assert!(html.contains("<span class=\"gd-meta\">)</span>"));
    assert!(html.contains("<span class=\"gd-ebnf-suffix\">*</span>"));
    assert!(html.contains("<span class=\"gd-not-marker\">^</span>"));
    assert!(html.contains("[abc]"));
    assert!(html.contains("<span class=\"gd-meta\">.</span>"));
    assert!(html.contains("<span class=\"gd-action\">{act();}</span>"));
}

#[test]
fn test_block_with_nested_alternatives() {
    let html = render("grammar G;\nlist : item (',' item)* ;");
    // nested list gets its own containers and separator-free first slot
    assert_eq!(html.matches("gd-alternative-list").count(), 2);
    assert!(html.contains("<span class=\"gd-ebnf-suffix\">*</span>"));
}

#[test]
fn test_labeled_element_renders_sub_label() {
    let html = render("grammar G;\npair : key=ID value+=INT ;");
    assert!(html.contains("<span class=\"gd-labeled-element\">"));
    assert!(html.contains("<sub class=\"gd-label\">key</sub>"));
    // += renders identically to =
    assert!(html.contains("<sub class=\"gd-label\">value</sub>"));
    assert!(!html.contains("+="));
}

#[test]
fn test_negated_block_set() {
    let html = render("lexer grammar L;\nNOT : ~('a'|'b') ;");
    assert!(html.contains("<span class=\"gd-not\">"));
    assert!(html.contains("<span class=\"gd-not-marker\">^</span>"));
    assert_eq!(html.matches("<span class=\"gd-meta\">|</span>").count(), 1);
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">a</span>"));
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">b</span>"));
}

#[test]
fn test_character_range_renders_both_bounds() {
    let html = render("lexer grammar L;\nLOWER : 'a'..'z' ;");
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">a</span>"));
    assert!(html.contains("<span class=\"gd-meta\">..</span>"));
    assert!(html.contains("<span class=\"gd-token-ref gd-string-literal\">z</span>"));
}

#[test]
fn test_element_options_render_verbatim_between_angle_markers() {
    let html = render("grammar G;\nexpr : expr '^'<assoc=right> expr ;");
    assert!(html.contains("<span class=\"gd-meta\">&lt;</span>"));
    assert!(html.contains("<span class=\"gd-element-option\">assoc=right</span>"));
    assert!(html.contains("<span class=\"gd-meta\">&gt;</span>"));
}

#[test]
fn test_rule_ref_args_render_verbatim() {
    let html = render("grammar G;\nexpr : atom[0] ;");
    assert!(html.contains("<a href=\"#atom\">atom</a>"));
    assert!(html.contains("<span class=\"gd-action\">[0]</span>"));
}

#[test]
fn test_lexer_commands_are_not_rendered() {
    let html = render("lexer grammar L;\nWS : [ \\t]+ -> skip ;");
    assert!(!html.contains("skip"));
    assert!(!html.contains("-&gt;"));
}

// ============================================================================
// FRAGMENT ORDER AND BATCH BEHAVIOR
// ============================================================================

#[test]
fn test_fragment_order_comments_tokens_rules() {
    let source = "/** File overview. */\ngrammar G;\n/** Names things. */\nname : ID ;\n\
                  /** Identifier token. */\nID : [a-z]+ ;";
    let files = [parse(source)];
    let fragments = render_fragments(&files, &options()).unwrap();

    assert_eq!(fragments.len(), 5);
    assert!(fragments[0].contains("File overview."));
    assert!(fragments[1].contains("Identifier token."));
    assert!(fragments[2].contains("<a id=\"ID\">"));
    assert!(fragments[3].contains("Names things."));
    assert!(fragments[4].contains("<a id=\"name\">"));
}

#[test]
fn test_skipped_simple_token_skips_its_comments_too() {
    let source = "grammar G;\n/** plus sign */\nPLUS : '+' ;\nsum : INT PLUS INT ;";
    let files = [parse(source)];
    let fragments = render_fragments(&files, &options()).unwrap();
    assert!(fragments.iter().all(|f| !f.contains("plus sign")));
}

#[test]
fn test_empty_batch_renders_nothing() {
    let fragments = render_fragments(&[], &options()).unwrap();
    assert!(fragments.is_empty());
}

#[test]
fn test_multiple_files_are_concatenated() {
    let files = [
        parse("grammar A;\nfirst : SECOND ;"),
        parse("lexer grammar B;\nSECOND : [0-9]+ ;"),
    ];
    let fragments = render_fragments(&files, &options()).unwrap();
    let joined = fragments.concat();
    // token specs come before parser rules regardless of file order
    let second = joined.find("<a id=\"SECOND\">").expect("SECOND spec");
    let first = joined.find("<a id=\"first\">").expect("first spec");
    assert!(second < first);
    // and the cross-file reference resolves to the other file's anchor
    assert!(joined.contains("<a href=\"#SECOND\">SECOND</a>"));
}

#[test]
fn test_duplicate_rule_names_render_independently() {
    let html = render("grammar G;\na : 'x' ;\na : 'y' ;");
    assert_eq!(html.matches("<a id=\"a\">a</a>").count(), 2);
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_sort_lexical_orders_both_sequences_independently() {
    let source = "grammar G;\nzed : APPLE ;\nalpha : ZEBRA ;\nZEBRA : [z]+ ;\nAPPLE : [a]+ ;";
    let html = render_with(
        source,
        &RenderOptions {
            sort_lexical: true,
            ..options()
        },
    );
    let apple = html.find("<a id=\"APPLE\">").expect("APPLE");
    let zebra = html.find("<a id=\"ZEBRA\">").expect("ZEBRA");
    let alpha = html.find("<a id=\"alpha\">").expect("alpha");
    let zed = html.find("<a id=\"zed\">").expect("zed");
    assert!(apple < zebra);
    assert!(alpha < zed);
    // token specs still come before parser rules
    assert!(zebra < alpha);
}

#[test]
fn test_default_order_is_declaration_order() {
    let html = render("grammar G;\nzed : 'z' ;\nalpha : 'a' ;");
    let zed = html.find("<a id=\"zed\">").expect("zed");
    let alpha = html.find("<a id=\"alpha\">").expect("alpha");
    assert!(zed < alpha);
}

// ============================================================================
// DOCUMENT WRAPPING
// ============================================================================

#[test]
fn test_render_document_wraps_fragments() {
    let files = [parse("grammar G;\na : 'x' ;")];
    let html = render_document(
        &files,
        &options(),
        &HtmlOptions::default().with_title("G Reference"),
    )
    .unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>G Reference</title>"));
    assert!(html.contains("<a id=\"a\">a</a>"));
}

fn without_styles(html: &str) -> String {
    static STYLE_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new("(?is)<style[^>]*?>.*?</style>").expect("valid regex for stripping style blocks")
    });
    STYLE_REGEX.replace_all(html, "<style></style>").into_owned()
}

#[test]
fn test_document_structure_with_styles_stripped() {
    let files = [parse("grammar G;\na : 'x' b ;\nb : 'y' ;")];
    let html = render_document(&files, &options(), &HtmlOptions::default()).unwrap();

    let stripped = without_styles(&html);
    assert!(stripped.contains("<style></style>"));
    assert!(!stripped.contains("--gd-fg"));
    // everything structural survives the strip
    assert!(stripped.contains("<div class=\"gd-document\">"));
    assert!(stripped.contains("<a id=\"a\">a</a>"));
    assert!(stripped.contains("<a href=\"#b\">b</a>"));
}
