//! Rule collection (grammar trees → ordered rule sequences)
//!
//! Walks one or more parsed grammar files and extracts the lexer-rule and
//! parser-rule specs in declaration order, files in input order. Rules are
//! always top-level items, but the walk goes through the generic item list so
//! non-rule constructs (`options`, `import`, mode markers, ...) are skipped
//! rather than assumed absent.

use grammardoc_syntax::ast::{GrammarFile, GrammarItem, LexerRuleSpec, ParserRuleSpec, RuleSpec};

/// A collected rule together with the file it came from. The file is carried
/// along because layout reproduction needs that file's token stream.
pub struct RuleEntry<'a, R> {
    pub rule: &'a R,
    pub file: &'a GrammarFile,
}

impl<R> Clone for RuleEntry<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RuleEntry<'_, R> {}

/// The two rule sequences of a rendering batch.
pub struct Collected<'a> {
    pub lexer_rules: Vec<RuleEntry<'a, LexerRuleSpec>>,
    pub parser_rules: Vec<RuleEntry<'a, ParserRuleSpec>>,
}

/// Collects every rule spec across `files`, in declaration order.
/// An empty input yields two empty sequences.
pub fn collect(files: &[GrammarFile]) -> Collected<'_> {
    let mut lexer_rules = Vec::new();
    let mut parser_rules = Vec::new();
    for file in files {
        for item in &file.items {
            match item {
                GrammarItem::Rule(RuleSpec::Lexer(rule)) => {
                    lexer_rules.push(RuleEntry { rule, file });
                }
                GrammarItem::Rule(RuleSpec::Parser(rule)) => {
                    parser_rules.push(RuleEntry { rule, file });
                }
                _ => {}
            }
        }
    }
    Collected {
        lexer_rules,
        parser_rules,
    }
}
