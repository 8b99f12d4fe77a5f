//! Optional lexicographic reordering of the rule sequences
//!
//! Pure pass: either leave the collected sequences in declaration order
//! (the default) or sort each sequence independently by rule name. The sort
//! is stable, so same-named rules keep their relative order.

use grammardoc_syntax::ast::{LexerRuleSpec, ParserRuleSpec};

use crate::collect::RuleEntry;

/// Anything orderable by rule name.
pub trait NamedRule {
    fn name(&self) -> &str;
}

impl NamedRule for RuleEntry<'_, LexerRuleSpec> {
    fn name(&self) -> &str {
        &self.rule.name
    }
}

impl NamedRule for RuleEntry<'_, ParserRuleSpec> {
    fn name(&self) -> &str {
        &self.rule.name
    }
}

/// Sorts `rules` by ascending name, stable with respect to equal names.
pub fn sort_by_name<T: NamedRule>(rules: &mut [T]) {
    rules.sort_by(|a, b| a.name().cmp(b.name()));
}
