//! Syntax rendering (rule spec → HTML fragment)
//!
//! The central recursive visitor. Given a rule spec and the batch token map,
//! it rebuilds the rule's concrete syntax as a DOM fragment: an anchor for
//! the rule itself, cross-reference links for rule/token references, inline
//! substitution for simple tokens, and literal markers for the grammar
//! punctuation. Dispatch over `ElementKind`/`SetElementKind` is exhaustive,
//! so a new construct cannot be silently skipped.
//!
//! With a token stream attached (`preserve_layout`), the visitor additionally
//! re-emits the run of hidden whitespace/comment tokens immediately before
//! every dispatched node and before recorded `|`/`)`/`;` markers. A per-rule
//! high-water mark keeps each hidden token from being emitted twice when a
//! parent and its first child share a start index.

use grammardoc_syntax::ast::{
    AltList, Alternative, Block, BlockSet, CharRange, Element, ElementKind, ElementOptions,
    LabeledElement, LexerRuleSpec, NotSet, NotSetTarget, ParserRuleSpec, RuleRef, SetElement,
    SetElementKind, Terminal, TerminalValue,
};
use grammardoc_syntax::{Channel, TokenStream};
use markup5ever_rcdom::Handle;

use crate::html::dom::{append, create_element, create_text};
use crate::tokens::TokenMap;

pub struct SyntaxRenderer<'a> {
    token_map: &'a TokenMap,
    trivia: Option<TriviaCursor<'a>>,
}

struct TriviaCursor<'a> {
    tokens: &'a TokenStream,
    /// Index just past the last hidden token already emitted for this rule.
    emitted: usize,
}

impl<'a> SyntaxRenderer<'a> {
    /// `layout` carries the owning file's token stream when the run preserves
    /// original layout; `None` selects the plain mode.
    pub fn new(token_map: &'a TokenMap, layout: Option<&'a TokenStream>) -> Self {
        SyntaxRenderer {
            token_map,
            trivia: layout.map(|tokens| TriviaCursor { tokens, emitted: 0 }),
        }
    }

    pub fn render_lexer_rule(&mut self, rule: &LexerRuleSpec) -> Handle {
        self.render_rule(&rule.name, &rule.body, rule.start, rule.stop)
    }

    pub fn render_parser_rule(&mut self, rule: &ParserRuleSpec) -> Handle {
        self.render_rule(&rule.name, &rule.body, rule.start, rule.stop)
    }

    fn render_rule(&mut self, name: &str, body: &AltList, start: usize, stop: usize) -> Handle {
        if let Some(cursor) = self.trivia.as_mut() {
            // nothing before the rule header belongs to this fragment
            cursor.emitted = start;
        }
        let rule = create_element("div", vec![("class", "gd-rule")]);
        let anchor = create_element("a", vec![("id", name)]);
        append(&anchor, create_text(name));
        append(&rule, anchor);
        append(&rule, create_text(":"));
        let body_div = create_element("div", vec![("class", "gd-rule-body")]);
        self.visit_alt_list(&body_div, body);
        self.emit_trivia(&body_div, stop);
        append(&body_div, meta(";"));
        append(&rule, body_div);
        rule
    }

    fn visit_alt_list(&mut self, parent: &Handle, list: &AltList) {
        let class = if list.alternatives.is_empty() {
            "gd-empty-alternative-list"
        } else {
            "gd-alternative-list"
        };
        let container = create_element("span", vec![("class", class)]);
        for (index, alternative) in list.alternatives.iter().enumerate() {
            let class = format!("gd-alternative gd-alternative-{index}");
            let slot = create_element("span", vec![("class", class.as_str())]);
            if index != 0 {
                if let Some(sep) = alternative.sep {
                    self.emit_trivia(&slot, sep);
                }
                append(&slot, meta("|"));
            }
            self.visit_alternative(&slot, alternative);
            if let Some(label) = &alternative.label {
                let marker = create_element("span", vec![("class", "gd-label")]);
                append(&marker, create_text(label));
                append(&slot, marker);
            }
            append(&container, slot);
        }
        append(parent, container);
    }

    fn visit_alternative(&mut self, parent: &Handle, alternative: &Alternative) {
        self.emit_trivia(parent, alternative.start);
        for (index, element) in alternative.elements.iter().enumerate() {
            if index != 0 {
                append(parent, create_text(" "));
            }
            self.visit_element(parent, element);
        }
    }

    fn visit_element(&mut self, parent: &Handle, element: &Element) {
        self.emit_trivia(parent, element.start);
        match &element.kind {
            ElementKind::Terminal(terminal) => self.visit_terminal(parent, terminal),
            ElementKind::RuleRef(reference) => self.visit_rule_ref(parent, reference),
            ElementKind::Labeled(labeled) => self.visit_labeled(parent, labeled),
            ElementKind::Block(block) => self.visit_block(parent, block),
            ElementKind::NotSet(not_set) => self.visit_not_set(parent, not_set),
            ElementKind::BlockSet(set) => self.visit_block_set(parent, set),
            ElementKind::EbnfSuffix(suffix) => {
                let marker = create_element("span", vec![("class", "gd-ebnf-suffix")]);
                append(&marker, create_text(&suffix.text));
                append(parent, marker);
            }
            ElementKind::ElementOptions(options) => self.visit_element_options(parent, options),
            ElementKind::Wildcard(wildcard) => {
                append(parent, meta("."));
                if let Some(options) = &wildcard.options {
                    self.visit_element_options(parent, options);
                }
            }
            ElementKind::CharSet(text) => append(parent, create_text(text)),
            ElementKind::CharRange(range) => self.visit_char_range(parent, range),
            ElementKind::Action(action) => append(parent, action_span(&action.text)),
        }
    }

    fn visit_terminal(&mut self, parent: &Handle, terminal: &Terminal) {
        let span = create_element("span", vec![("class", "gd-terminal")]);
        match &terminal.value {
            TerminalValue::TokenRef(name) => {
                if let Some(value) = self.token_map.get(name) {
                    append_literal(&span, value);
                } else {
                    let wrapper = create_element("span", vec![("class", "gd-token-ref")]);
                    append_reference(&wrapper, name);
                    append(&span, wrapper);
                }
            }
            TerminalValue::Literal(text) => append_literal(&span, text),
        }
        if let Some(options) = &terminal.options {
            self.visit_element_options(&span, options);
        }
        append(parent, span);
    }

    fn visit_rule_ref(&mut self, parent: &Handle, reference: &RuleRef) {
        let span = create_element("span", vec![("class", "gd-rule-ref")]);
        append_reference(&span, &reference.name);
        if let Some(args) = &reference.args {
            append(&span, action_span(args));
        }
        if let Some(options) = &reference.options {
            self.visit_element_options(&span, options);
        }
        append(parent, span);
    }

    fn visit_labeled(&mut self, parent: &Handle, labeled: &LabeledElement) {
        let span = create_element("span", vec![("class", "gd-labeled-element")]);
        if let Some(atom) = &labeled.atom {
            self.visit_element(&span, atom);
        }
        if let Some(block) = &labeled.block {
            self.visit_element(&span, block);
        }
        let marker = create_element("sub", vec![("class", "gd-label")]);
        append(&marker, create_text(&labeled.label));
        append(&span, marker);
        append(&span, create_text(" "));
        append(parent, span);
    }

    fn visit_block(&mut self, parent: &Handle, block: &Block) {
        append(parent, meta("("));
        if let Some(options) = &block.options_spec {
            append(parent, action_span(options));
        }
        for action in &block.rule_actions {
            append(parent, action_span(action));
        }
        if block.colon {
            append(parent, meta(":"));
        }
        self.visit_alt_list(parent, &block.alts);
        self.emit_trivia(parent, block.stop);
        append(parent, meta(")"));
    }

    fn visit_not_set(&mut self, parent: &Handle, not_set: &NotSet) {
        let span = create_element("span", vec![("class", "gd-not")]);
        let marker = create_element("span", vec![("class", "gd-not-marker")]);
        append(&marker, create_text("^"));
        append(&span, marker);
        match &not_set.target {
            NotSetTarget::Element(element) => self.visit_set_element(&span, element),
            NotSetTarget::Set(set) => self.visit_block_set(&span, set),
        }
        append(parent, span);
    }

    fn visit_block_set(&mut self, parent: &Handle, set: &BlockSet) {
        append(parent, meta("("));
        for (index, element) in set.elements.iter().enumerate() {
            if index != 0 {
                if let Some(sep) = element.sep {
                    self.emit_trivia(parent, sep);
                }
                append(parent, meta("|"));
            }
            self.visit_set_element(parent, element);
        }
        self.emit_trivia(parent, set.stop);
        append(parent, meta(")"));
    }

    fn visit_set_element(&mut self, parent: &Handle, element: &SetElement) {
        self.emit_trivia(parent, element.start);
        match &element.kind {
            SetElementKind::TokenRef { name, options } => {
                append_reference(parent, name);
                if let Some(options) = options {
                    self.visit_element_options(parent, options);
                }
            }
            SetElementKind::Literal(text) => append_literal(parent, text),
            SetElementKind::CharRange(range) => self.visit_char_range(parent, range),
            SetElementKind::CharSet(text) => append(parent, create_text(text)),
        }
    }

    fn visit_char_range(&mut self, parent: &Handle, range: &CharRange) {
        append_literal(parent, &range.lo);
        append(parent, meta(".."));
        append_literal(parent, &range.hi);
    }

    fn visit_element_options(&mut self, parent: &Handle, options: &ElementOptions) {
        self.emit_trivia(parent, options.start);
        append(parent, meta("<"));
        for option in &options.options {
            let span = create_element("span", vec![("class", "gd-element-option")]);
            append(&span, create_text(option));
            append(parent, span);
        }
        append(parent, meta(">"));
    }

    /// Re-emits the contiguous run of hidden tokens immediately before the
    /// token at index `at`, each as a trivia span. No-op in plain mode.
    fn emit_trivia(&mut self, parent: &Handle, at: usize) {
        let Some(cursor) = self.trivia.as_mut() else {
            return;
        };
        let mut lo = at;
        while lo > cursor.emitted {
            match cursor.tokens.get(lo - 1) {
                Some(token) if token.channel == Channel::Hidden => lo -= 1,
                _ => break,
            }
        }
        for index in lo..at {
            let Some(token) = cursor.tokens.get(index) else {
                break;
            };
            if token.channel == Channel::Hidden {
                append(parent, trivia_span(&token.text));
            }
        }
        if at > cursor.emitted {
            cursor.emitted = at;
        }
    }
}

fn meta(text: &str) -> Handle {
    let span = create_element("span", vec![("class", "gd-meta")]);
    append(&span, create_text(text));
    span
}

fn action_span(text: &str) -> Handle {
    let span = create_element("span", vec![("class", "gd-action")]);
    append(&span, create_text(text));
    span
}

/// ` <a href="#name">name</a> `, the padded cross-reference form.
fn append_reference(parent: &Handle, name: &str) {
    append(parent, create_text(" "));
    let href = format!("#{name}");
    let anchor = create_element("a", vec![("href", href.as_str())]);
    append(&anchor, create_text(name));
    append(parent, anchor);
    append(parent, create_text(" "));
}

/// Literal rendering: escaped backslashes collapsed, surrounding quotes
/// stripped, padded like references.
fn append_literal(parent: &Handle, raw: &str) {
    let unescaped = raw.replace("\\\\", "\\");
    let text = unescaped.trim_matches('\'');
    append(parent, create_text(" "));
    let span = create_element(
        "span",
        vec![("class", "gd-token-ref gd-string-literal")],
    );
    append(&span, create_text(text));
    append(parent, span);
    append(parent, create_text(" "));
}

/// One hidden token as markup-safe text: space → NBSP, tab → four NBSPs,
/// newline → `<br>`, comment text verbatim.
fn trivia_span(text: &str) -> Handle {
    let span = create_element("span", vec![("class", "gd-trivia")]);
    let mut buffer = String::new();
    for ch in text.chars() {
        match ch {
            ' ' => buffer.push('\u{a0}'),
            '\t' => buffer.push_str("\u{a0}\u{a0}\u{a0}\u{a0}"),
            '\r' => {}
            '\n' => {
                if !buffer.is_empty() {
                    append(&span, create_text(&buffer));
                    buffer.clear();
                }
                append(&span, create_element("br", vec![]));
            }
            other => buffer.push(other),
        }
    }
    if !buffer.is_empty() {
        append(&span, create_text(&buffer));
    }
    span
}
