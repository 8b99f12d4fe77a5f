//! Syntax tree for parsed grammar files
//!
//! The tree is a read-only view over one parsed file: the parser builds it
//! once and nothing downstream mutates it. Nodes record the index of their
//! first token in the file's [`TokenStream`](crate::lexer::TokenStream)
//! (and, where a closing marker matters, the index of that marker) so layout
//! reproduction is a constant-time lookup per node.

use serde::Serialize;

use crate::lexer::TokenStream;

/// One parsed grammar file.
#[derive(Debug, Serialize)]
pub struct GrammarFile {
    pub decl: GrammarDecl,
    /// Doc comments preceding the grammar declaration (file-scoped).
    pub doc_comments: Vec<String>,
    pub items: Vec<GrammarItem>,
    /// The flat token stream of the file, hidden tokens included.
    #[serde(skip)]
    pub tokens: TokenStream,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarDecl {
    pub kind: GrammarKind,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrammarKind {
    Combined,
    Lexer,
    Parser,
}

/// Top-level constructs. Only rules are rendered; the remaining variants are
/// kept so traversals can skip them without losing declaration order.
#[derive(Debug, Serialize)]
pub enum GrammarItem {
    Rule(RuleSpec),
    Options(String),
    Import(String),
    Tokens(String),
    Channels(String),
    NamedAction { name: String, code: String },
    Mode(String),
}

#[derive(Debug, Serialize)]
pub enum RuleSpec {
    Lexer(LexerRuleSpec),
    Parser(ParserRuleSpec),
}

#[derive(Debug, Serialize)]
pub struct LexerRuleSpec {
    pub name: String,
    pub fragment: bool,
    pub doc_comments: Vec<String>,
    pub body: AltList,
    /// Token index of the rule's first token.
    pub start: usize,
    /// Token index of the terminating `;`.
    pub stop: usize,
}

#[derive(Debug, Serialize)]
pub struct ParserRuleSpec {
    pub name: String,
    /// Raw `[...]` argument action following the rule name, if any.
    pub args: Option<String>,
    /// Raw `returns [...]` action, if any. Parsed, never rendered.
    pub returns: Option<String>,
    /// Raw `locals [...]` action, if any. Parsed, never rendered.
    pub locals: Option<String>,
    pub doc_comments: Vec<String>,
    pub body: AltList,
    pub start: usize,
    pub stop: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct AltList {
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Default, Serialize)]
pub struct Alternative {
    /// Alternative label (`# Name`), only on parser-rule top-level lists.
    pub label: Option<String>,
    pub elements: Vec<Element>,
    /// Raw lexer command text after `->` (`skip`, `channel(HIDDEN)`, ...).
    /// Parsed and kept for inspection, never rendered.
    pub commands: Option<String>,
    /// Token index of the alternative's first token.
    pub start: usize,
    /// Token index of the `|` preceding this alternative, if any.
    pub sep: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct Element {
    /// Token index of the element's first token.
    pub start: usize,
    pub kind: ElementKind,
}

/// Closed set of renderable constructs. The renderer dispatches with an
/// exhaustive match, so a new variant is a compile-time obligation there.
#[derive(Debug, Serialize)]
pub enum ElementKind {
    Terminal(Terminal),
    RuleRef(RuleRef),
    Labeled(LabeledElement),
    Block(Block),
    NotSet(NotSet),
    BlockSet(BlockSet),
    EbnfSuffix(EbnfSuffix),
    ElementOptions(ElementOptions),
    /// The `.` wildcard atom.
    Wildcard(Wildcard),
    /// Raw `[...]` lexer character set used as an atom.
    CharSet(String),
    /// `'a'..'z'` character range used as a lexer atom.
    CharRange(CharRange),
    /// Inline `{...}` action code.
    Action(ActionCode),
}

#[derive(Debug, Serialize)]
pub struct Terminal {
    pub value: TerminalValue,
    pub options: Option<ElementOptions>,
}

#[derive(Debug, Serialize)]
pub enum TerminalValue {
    /// Reference to a lexer rule by name.
    TokenRef(String),
    /// Raw string literal, quotes included.
    Literal(String),
}

#[derive(Debug, Serialize)]
pub struct RuleRef {
    pub name: String,
    /// Raw `[...]` argument action, brackets included.
    pub args: Option<String>,
    pub options: Option<ElementOptions>,
}

/// `label=atom`, `label+=atom` or the block-wrapping forms. Assign and append
/// are not distinguished: both just mean "has a label".
#[derive(Debug, Serialize)]
pub struct LabeledElement {
    pub label: String,
    pub atom: Option<Box<Element>>,
    pub block: Option<Box<Element>>,
}

#[derive(Debug, Serialize)]
pub struct Block {
    /// Raw `options {...}` text, if the block carries one.
    pub options_spec: Option<String>,
    /// Raw `@name {...}` rule actions, in source order.
    pub rule_actions: Vec<String>,
    /// Whether the source had the `:` after the block prelude.
    pub colon: bool,
    pub alts: AltList,
    /// Token index of the closing `)`.
    pub stop: usize,
}

#[derive(Debug, Serialize)]
pub struct NotSet {
    pub target: NotSetTarget,
}

#[derive(Debug, Serialize)]
pub enum NotSetTarget {
    Element(SetElement),
    Set(BlockSet),
}

#[derive(Debug, Serialize)]
pub struct BlockSet {
    pub elements: Vec<SetElement>,
    /// Token index of the closing `)`.
    pub stop: usize,
}

#[derive(Debug, Serialize)]
pub struct SetElement {
    /// Token index of the set element's first token.
    pub start: usize,
    /// Token index of the `|` preceding this set element, if any.
    pub sep: Option<usize>,
    pub kind: SetElementKind,
}

#[derive(Debug, Serialize)]
pub enum SetElementKind {
    TokenRef {
        name: String,
        options: Option<ElementOptions>,
    },
    /// Raw string literal, quotes included.
    Literal(String),
    /// `'a'..'z'`, both bounds raw with quotes.
    CharRange(CharRange),
    /// Raw `[...]` text, brackets included.
    CharSet(String),
}

#[derive(Debug, Serialize)]
pub struct CharRange {
    pub lo: String,
    pub hi: String,
}

/// Suffix text exactly as written: `?`, `*`, `+`, `??`, `*?`, `+?`.
#[derive(Debug, Serialize)]
pub struct EbnfSuffix {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ElementOptions {
    /// Each option's raw text (`assoc=right`, `p=1`, ...).
    pub options: Vec<String>,
    /// Token index of the opening `<`.
    pub start: usize,
}

#[derive(Debug, Serialize)]
pub struct Wildcard {
    pub options: Option<ElementOptions>,
}

#[derive(Debug, Serialize)]
pub struct ActionCode {
    /// Raw action text, braces included.
    pub text: String,
}

impl GrammarFile {
    /// Iterates the file's rule specs in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleSpec> {
        self.items.iter().filter_map(|item| match item {
            GrammarItem::Rule(rule) => Some(rule),
            _ => None,
        })
    }
}

impl RuleSpec {
    pub fn name(&self) -> &str {
        match self {
            RuleSpec::Lexer(rule) => &rule.name,
            RuleSpec::Parser(rule) => &rule.name,
        }
    }

    pub fn doc_comments(&self) -> &[String] {
        match self {
            RuleSpec::Lexer(rule) => &rule.doc_comments,
            RuleSpec::Parser(rule) => &rule.doc_comments,
        }
    }
}
