//! Simple-token resolution (lexer rules → literal token map)
//!
//! A lexer rule is "simple" when every alternative is a single bare string
//! literal. Such tokens carry no information as named references, so the
//! renderer inlines their literal value at use sites instead of linking.
//!
//! The canonical value is the FIRST alternative's literal; later alternatives
//! are not required to match. That looseness is deliberate and inherited:
//! resolution is a rendering convenience, not validation.

use std::collections::HashMap;

use grammardoc_syntax::ast::{ElementKind, LexerRuleSpec, Terminal, TerminalValue};

use crate::collect::RuleEntry;

/// Lexer-rule name → raw (still-quoted) literal text of the first alternative.
pub type TokenMap = HashMap<String, String>;

/// Returns the canonical literal for a simple lexer rule, or `None` when the
/// rule is not simple. Absence is the only "not simple" signal downstream.
pub fn simple_token_value(rule: &LexerRuleSpec) -> Option<&str> {
    let alternatives = &rule.body.alternatives;
    if alternatives.is_empty() {
        return None;
    }
    let mut first = None;
    for alternative in alternatives {
        if alternative.label.is_some() || alternative.elements.len() != 1 {
            return None;
        }
        match &alternative.elements[0].kind {
            ElementKind::Terminal(Terminal {
                value: TerminalValue::Literal(text),
                options: None,
            }) => {
                if first.is_none() {
                    first = Some(text.as_str());
                }
            }
            _ => return None,
        }
    }
    first
}

/// Builds the token map for a batch. Rules that are not simple are omitted.
pub fn build_token_map(rules: &[RuleEntry<'_, LexerRuleSpec>]) -> TokenMap {
    rules
        .iter()
        .filter_map(|entry| {
            simple_token_value(entry.rule)
                .map(|value| (entry.rule.name.clone(), value.to_string()))
        })
        .collect()
}
