//! Recursive-descent parser for ANTLR4-style grammar files
//!
//! The parser walks the on-channel view of a [`TokenStream`] and builds the
//! read-only tree in [`crate::ast`]. Keywords (`grammar`, `options`, `mode`,
//! ...) are ordinary lowercase identifiers matched by text, which keeps the
//! lexer free of keyword states. Doc comments are collected at the two places
//! the grammar allows them: the file head and immediately before a rule.
//!
//! Every node records the index of its first token (and closing markers where
//! relevant) so the renderer can reproduce surrounding layout without
//! rescanning the stream by position.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::{tokenize, TokenStream};
use crate::token::{Channel, Token};

/// Parses one grammar file into a [`GrammarFile`].
///
/// A lexical or syntactic error anywhere in the file fails the whole parse;
/// there is no recovery or partial tree.
pub fn parse_grammar(source: &str) -> Result<GrammarFile, SyntaxError> {
    let stream = tokenize(source)?;
    Parser {
        source,
        stream,
        pos: 0,
    }
    .parse()
}

/// Where an alternative list sits; controls labels, commands and lexer atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleCtx {
    /// Top level of a parser rule: `# Label` alternatives allowed.
    ParserTop,
    /// Inside a parser-rule block.
    ParserNested,
    /// Anywhere in a lexer rule: char sets, ranges and `->` commands allowed.
    Lexer,
}

impl RuleCtx {
    fn nested(self) -> RuleCtx {
        match self {
            RuleCtx::ParserTop | RuleCtx::ParserNested => RuleCtx::ParserNested,
            RuleCtx::Lexer => RuleCtx::Lexer,
        }
    }
}

struct Parser<'a> {
    source: &'a str,
    stream: TokenStream,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse(mut self) -> Result<GrammarFile, SyntaxError> {
        let doc_comments = self.take_doc_comments();
        let decl = self.parse_grammar_decl()?;
        let mut items = Vec::new();
        loop {
            let docs = self.take_doc_comments();
            let Some(kind) = self.peek_kind() else {
                break;
            };
            let item = match kind {
                Token::RuleRef
                    if self.at_keyword("options")
                        && self.peek2_kind() == Some(Token::Action) =>
                {
                    self.bump();
                    let action = self.bump();
                    GrammarItem::Options(self.token_text(action))
                }
                Token::RuleRef
                    if self.at_keyword("tokens")
                        && self.peek2_kind() == Some(Token::Action) =>
                {
                    self.bump();
                    let action = self.bump();
                    GrammarItem::Tokens(self.token_text(action))
                }
                Token::RuleRef
                    if self.at_keyword("channels")
                        && self.peek2_kind() == Some(Token::Action) =>
                {
                    self.bump();
                    let action = self.bump();
                    GrammarItem::Channels(self.token_text(action))
                }
                Token::RuleRef if self.at_keyword("import") => {
                    self.bump();
                    GrammarItem::Import(self.take_raw_until_semi("import list")?)
                }
                Token::RuleRef if self.at_keyword("mode") => {
                    self.bump();
                    let (_, name) = self.expect_identifier("mode name")?;
                    self.expect(Token::Semi, "`;`")?;
                    GrammarItem::Mode(name)
                }
                Token::At => {
                    self.bump();
                    let (_, mut name) = self.expect_identifier("action name")?;
                    if self.peek_kind() == Some(Token::Colon)
                        && self.peek2_kind() == Some(Token::Colon)
                    {
                        self.bump();
                        self.bump();
                        let (_, member) = self.expect_identifier("action name")?;
                        name = format!("{name}::{member}");
                    }
                    let action = self.expect(Token::Action, "action code")?;
                    GrammarItem::NamedAction {
                        name,
                        code: self.token_text(action),
                    }
                }
                Token::TokenRef => GrammarItem::Rule(self.parse_lexer_rule(docs, false)?),
                Token::RuleRef if self.at_keyword("fragment") => {
                    self.bump();
                    GrammarItem::Rule(self.parse_lexer_rule(docs, true)?)
                }
                Token::RuleRef => GrammarItem::Rule(self.parse_parser_rule(docs)?),
                _ => return Err(self.error_here("expected rule or declaration")),
            };
            items.push(item);
        }
        Ok(GrammarFile {
            decl,
            doc_comments,
            items,
            tokens: self.stream,
        })
    }

    fn parse_grammar_decl(&mut self) -> Result<GrammarDecl, SyntaxError> {
        let kind = if self.at_keyword("lexer") {
            self.bump();
            GrammarKind::Lexer
        } else if self.at_keyword("parser") {
            self.bump();
            GrammarKind::Parser
        } else {
            GrammarKind::Combined
        };
        if !self.at_keyword("grammar") {
            return Err(self.error_here("expected `grammar` declaration"));
        }
        self.bump();
        let (_, name) = self.expect_identifier("grammar name")?;
        self.expect(Token::Semi, "`;`")?;
        Ok(GrammarDecl { kind, name })
    }

    fn parse_lexer_rule(
        &mut self,
        doc_comments: Vec<String>,
        fragment: bool,
    ) -> Result<RuleSpec, SyntaxError> {
        let start = self.peek_index();
        let (_, name) = match self.peek_kind() {
            Some(Token::TokenRef) => self.expect_identifier("token rule name")?,
            _ => return Err(self.error_here("expected token rule name")),
        };
        self.expect(Token::Colon, "`:`")?;
        let body = self.parse_alt_list(RuleCtx::Lexer)?;
        let stop = self.expect(Token::Semi, "`;`")?;
        Ok(RuleSpec::Lexer(LexerRuleSpec {
            name,
            fragment,
            doc_comments,
            body,
            start,
            stop,
        }))
    }

    fn parse_parser_rule(&mut self, doc_comments: Vec<String>) -> Result<RuleSpec, SyntaxError> {
        let start = self.peek_index();
        let (_, name) = self.expect_identifier("rule name")?;
        let args = self.take_bracket_text();
        let mut returns = None;
        let mut locals = None;
        if self.at_keyword("returns") {
            self.bump();
            returns = self.take_bracket_text();
        }
        if self.at_keyword("locals") {
            self.bump();
            locals = self.take_bracket_text();
        }
        self.expect(Token::Colon, "`:`")?;
        let body = self.parse_alt_list(RuleCtx::ParserTop)?;
        let stop = self.expect(Token::Semi, "`;`")?;
        Ok(RuleSpec::Parser(ParserRuleSpec {
            name,
            args,
            returns,
            locals,
            doc_comments,
            body,
            start,
            stop,
        }))
    }

    fn parse_alt_list(&mut self, ctx: RuleCtx) -> Result<AltList, SyntaxError> {
        let mut alternatives = Vec::new();
        let mut sep = None;
        loop {
            alternatives.push(self.parse_alternative(ctx, sep)?);
            if self.peek_kind() == Some(Token::Pipe) {
                sep = Some(self.bump());
            } else {
                break;
            }
        }
        Ok(AltList { alternatives })
    }

    fn parse_alternative(
        &mut self,
        ctx: RuleCtx,
        sep: Option<usize>,
    ) -> Result<Alternative, SyntaxError> {
        let start = self.peek_index();
        let mut elements = Vec::new();
        loop {
            match self.peek_kind() {
                None
                | Some(
                    Token::Pipe | Token::Semi | Token::RParen | Token::Pound | Token::Arrow,
                ) => break,
                _ => self.parse_element(ctx, &mut elements)?,
            }
        }
        let label = if ctx == RuleCtx::ParserTop && self.peek_kind() == Some(Token::Pound) {
            self.bump();
            let (_, label) = self.expect_identifier("alternative label")?;
            Some(label)
        } else {
            None
        };
        let commands = if ctx == RuleCtx::Lexer && self.peek_kind() == Some(Token::Arrow) {
            self.bump();
            Some(self.parse_lexer_commands()?)
        } else {
            None
        };
        Ok(Alternative {
            label,
            elements,
            commands,
            start,
            sep,
        })
    }

    /// Parses one element, plus its EBNF suffix if one follows, into
    /// `elements`. Suffixes are sequence elements of their own, attached to
    /// whatever construct precedes them.
    fn parse_element(
        &mut self,
        ctx: RuleCtx,
        elements: &mut Vec<Element>,
    ) -> Result<(), SyntaxError> {
        let start = self.peek_index();
        let element = match self.peek_kind() {
            Some(Token::TokenRef | Token::RuleRef)
                if matches!(
                    self.peek2_kind(),
                    Some(Token::Assign | Token::PlusAssign)
                ) =>
            {
                let (_, label) = self.expect_identifier("element label")?;
                self.bump(); // `=` or `+=`; the distinction is not kept
                let (atom, block) = if self.peek_kind() == Some(Token::LParen) {
                    (None, Some(Box::new(self.parse_block(ctx)?)))
                } else {
                    (Some(Box::new(self.parse_atom(ctx)?)), None)
                };
                Element {
                    start,
                    kind: ElementKind::Labeled(LabeledElement { label, atom, block }),
                }
            }
            Some(Token::LParen) => self.parse_block(ctx)?,
            Some(Token::Action) => {
                let action = self.bump();
                Element {
                    start,
                    kind: ElementKind::Action(ActionCode {
                        text: self.token_text(action),
                    }),
                }
            }
            _ => self.parse_atom(ctx)?,
        };
        elements.push(element);
        self.take_suffix(elements);
        Ok(())
    }

    fn parse_atom(&mut self, ctx: RuleCtx) -> Result<Element, SyntaxError> {
        let start = self.peek_index();
        let kind = match self.peek_kind() {
            Some(Token::TokenRef) => {
                let (_, name) = self.expect_identifier("token reference")?;
                let options = self.parse_element_options()?;
                ElementKind::Terminal(Terminal {
                    value: TerminalValue::TokenRef(name),
                    options,
                })
            }
            Some(Token::StringLiteral) => {
                if ctx == RuleCtx::Lexer && self.peek2_kind() == Some(Token::Range) {
                    let lo = self.bump();
                    self.bump(); // `..`
                    let hi = self.expect(Token::StringLiteral, "range upper bound")?;
                    ElementKind::CharRange(CharRange {
                        lo: self.token_text(lo),
                        hi: self.token_text(hi),
                    })
                } else {
                    let literal = self.bump();
                    let options = self.parse_element_options()?;
                    ElementKind::Terminal(Terminal {
                        value: TerminalValue::Literal(self.token_text(literal)),
                        options,
                    })
                }
            }
            Some(Token::RuleRef) => {
                let (_, name) = self.expect_identifier("rule reference")?;
                let args = self.take_bracket_text();
                let options = self.parse_element_options()?;
                ElementKind::RuleRef(RuleRef {
                    name,
                    args,
                    options,
                })
            }
            Some(Token::Dot) => {
                self.bump();
                let options = self.parse_element_options()?;
                ElementKind::Wildcard(Wildcard { options })
            }
            Some(Token::Tilde) => {
                self.bump();
                let target = if self.peek_kind() == Some(Token::LParen) {
                    NotSetTarget::Set(self.parse_block_set()?)
                } else {
                    NotSetTarget::Element(self.parse_set_element(None)?)
                };
                ElementKind::NotSet(NotSet { target })
            }
            Some(Token::BracketText) if ctx == RuleCtx::Lexer => {
                let set = self.bump();
                ElementKind::CharSet(self.token_text(set))
            }
            _ => return Err(self.error_here("expected grammar element")),
        };
        Ok(Element { start, kind })
    }

    fn parse_block(&mut self, ctx: RuleCtx) -> Result<Element, SyntaxError> {
        let start = self.peek_index();
        self.expect(Token::LParen, "`(`")?;
        let mut options_spec = None;
        if self.at_keyword("options") && self.peek2_kind() == Some(Token::Action) {
            let keyword = self.bump();
            let action = self.bump();
            options_spec = Some(self.slice(keyword, action));
        }
        let mut rule_actions = Vec::new();
        while self.peek_kind() == Some(Token::At) {
            let at = self.bump();
            self.expect_identifier("action name")?;
            let action = self.expect(Token::Action, "action code")?;
            rule_actions.push(self.slice(at, action));
        }
        let colon = if self.peek_kind() == Some(Token::Colon) {
            self.bump();
            true
        } else {
            false
        };
        let alts = self.parse_alt_list(ctx.nested())?;
        let stop = self.expect(Token::RParen, "`)`")?;
        Ok(Element {
            start,
            kind: ElementKind::Block(Block {
                options_spec,
                rule_actions,
                colon,
                alts,
                stop,
            }),
        })
    }

    fn parse_block_set(&mut self) -> Result<BlockSet, SyntaxError> {
        self.expect(Token::LParen, "`(`")?;
        let mut elements = Vec::new();
        let mut sep = None;
        loop {
            elements.push(self.parse_set_element(sep)?);
            if self.peek_kind() == Some(Token::Pipe) {
                sep = Some(self.bump());
            } else {
                break;
            }
        }
        let stop = self.expect(Token::RParen, "`)`")?;
        Ok(BlockSet { elements, stop })
    }

    fn parse_set_element(&mut self, sep: Option<usize>) -> Result<SetElement, SyntaxError> {
        let start = self.peek_index();
        let kind = match self.peek_kind() {
            Some(Token::TokenRef) => {
                let (_, name) = self.expect_identifier("token reference")?;
                let options = self.parse_element_options()?;
                SetElementKind::TokenRef { name, options }
            }
            Some(Token::StringLiteral) => {
                if self.peek2_kind() == Some(Token::Range) {
                    let lo = self.bump();
                    self.bump(); // `..`
                    let hi = self.expect(Token::StringLiteral, "range upper bound")?;
                    SetElementKind::CharRange(CharRange {
                        lo: self.token_text(lo),
                        hi: self.token_text(hi),
                    })
                } else {
                    let literal = self.bump();
                    SetElementKind::Literal(self.token_text(literal))
                }
            }
            Some(Token::BracketText) => {
                let set = self.bump();
                SetElementKind::CharSet(self.token_text(set))
            }
            _ => return Err(self.error_here("expected set element")),
        };
        Ok(SetElement { start, sep, kind })
    }

    fn parse_element_options(&mut self) -> Result<Option<ElementOptions>, SyntaxError> {
        if self.peek_kind() != Some(Token::Lt) {
            return Ok(None);
        }
        let start = self.bump();
        let mut options = Vec::new();
        loop {
            let (first, _) = self.expect_identifier("element option")?;
            let mut last = first;
            if self.peek_kind() == Some(Token::Assign) {
                self.bump();
                last = match self.peek_kind() {
                    Some(
                        Token::RuleRef | Token::TokenRef | Token::StringLiteral | Token::Int,
                    ) => self.bump(),
                    _ => return Err(self.error_here("expected element option value")),
                };
            }
            options.push(self.slice(first, last));
            if self.peek_kind() == Some(Token::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(Token::Gt, "`>`")?;
        Ok(Some(ElementOptions { options, start }))
    }

    /// Raw command text after `->`, up to the end of the alternative.
    /// Command arguments like `channel(HIDDEN)` carry their own parens, so
    /// only an unbalanced `)` ends the command list.
    fn parse_lexer_commands(&mut self) -> Result<String, SyntaxError> {
        let from = match self.peek() {
            Some(token) => token.span.start,
            None => return Err(self.error_here("expected lexer command")),
        };
        let mut to = from;
        let mut depth = 0usize;
        loop {
            match self.peek_kind() {
                None | Some(Token::Pipe | Token::Semi) => break,
                Some(Token::RParen) if depth == 0 => break,
                Some(kind) => {
                    match kind {
                        Token::LParen => depth += 1,
                        Token::RParen => depth -= 1,
                        _ => {}
                    }
                    let index = self.bump();
                    to = self.span_end(index);
                }
            }
        }
        if to == from {
            return Err(self.error_here("expected lexer command"));
        }
        Ok(self.source[from..to].to_string())
    }

    fn take_suffix(&mut self, elements: &mut Vec<Element>) {
        let Some(kind) = self.peek_kind() else {
            return;
        };
        if !kind.is_suffix_start() {
            return;
        }
        let start = self.peek_index();
        let index = self.bump();
        let mut text = self.token_text(index);
        if self.peek_kind() == Some(Token::Question) {
            self.bump();
            text.push('?');
        }
        elements.push(Element {
            start,
            kind: ElementKind::EbnfSuffix(EbnfSuffix { text }),
        });
    }

    fn take_doc_comments(&mut self) -> Vec<String> {
        let mut comments = Vec::new();
        while self.peek_kind() == Some(Token::DocComment) {
            let index = self.bump();
            comments.push(self.token_text(index));
        }
        comments
    }

    fn take_bracket_text(&mut self) -> Option<String> {
        if self.peek_kind() == Some(Token::BracketText) {
            let index = self.bump();
            Some(self.token_text(index))
        } else {
            None
        }
    }

    fn take_raw_until_semi(&mut self, what: &str) -> Result<String, SyntaxError> {
        let from = match self.peek() {
            Some(token) => token.span.start,
            None => return Err(self.error_here(&format!("expected {what}"))),
        };
        let mut to = from;
        while !matches!(self.peek_kind(), None | Some(Token::Semi)) {
            let index = self.bump();
            to = self.span_end(index);
        }
        self.expect(Token::Semi, "`;`")?;
        if to == from {
            return Err(self.error_here(&format!("expected {what}")));
        }
        Ok(self.source[from..to].to_string())
    }

    // ---- token cursor ----------------------------------------------------

    fn skip_hidden(&mut self) {
        while let Some(token) = self.stream.get(self.pos) {
            if token.channel == Channel::Hidden {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&mut self) -> Option<&crate::lexer::SourceToken> {
        self.skip_hidden();
        self.stream.get(self.pos)
    }

    fn peek_kind(&mut self) -> Option<Token> {
        self.peek().map(|token| token.kind)
    }

    /// Kind of the second on-channel token, without consuming anything.
    fn peek2_kind(&mut self) -> Option<Token> {
        self.skip_hidden();
        let mut index = self.pos + 1;
        while let Some(token) = self.stream.get(index) {
            if token.channel == Channel::Hidden {
                index += 1;
            } else {
                return Some(token.kind);
            }
        }
        None
    }

    fn peek_index(&mut self) -> usize {
        self.skip_hidden();
        self.pos
    }

    /// Consumes the next on-channel token, returning its stream index.
    /// Callers check with `peek_kind` first.
    fn bump(&mut self) -> usize {
        self.skip_hidden();
        let index = self.pos;
        if index < self.stream.len() {
            self.pos += 1;
        }
        index
    }

    fn expect(&mut self, kind: Token, what: &str) -> Result<usize, SyntaxError> {
        self.skip_hidden();
        match self.stream.get(self.pos) {
            Some(token) if token.kind == kind => {
                let index = self.pos;
                self.pos += 1;
                Ok(index)
            }
            Some(token) => Err(SyntaxError::at(
                format!("expected {what}, found `{}`", token.text),
                self.source,
                token.span.start,
            )),
            None => Err(SyntaxError::at(
                format!("expected {what}, found end of file"),
                self.source,
                self.source.len(),
            )),
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<(usize, String), SyntaxError> {
        self.skip_hidden();
        match self.stream.get(self.pos) {
            Some(token) if matches!(token.kind, Token::RuleRef | Token::TokenRef) => {
                let index = self.pos;
                let text = token.text.clone();
                self.pos += 1;
                Ok((index, text))
            }
            Some(token) => Err(SyntaxError::at(
                format!("expected {what}, found `{}`", token.text),
                self.source,
                token.span.start,
            )),
            None => Err(SyntaxError::at(
                format!("expected {what}, found end of file"),
                self.source,
                self.source.len(),
            )),
        }
    }

    fn at_keyword(&mut self, keyword: &str) -> bool {
        self.skip_hidden();
        matches!(
            self.stream.get(self.pos),
            Some(token) if token.kind == Token::RuleRef && token.text == keyword
        )
    }

    fn error_here(&mut self, message: &str) -> SyntaxError {
        self.skip_hidden();
        match self.stream.get(self.pos) {
            Some(token) => SyntaxError::at(
                format!("{message}, found `{}`", token.text),
                self.source,
                token.span.start,
            ),
            None => SyntaxError::at(
                format!("{message}, found end of file"),
                self.source,
                self.source.len(),
            ),
        }
    }

    fn token_text(&self, index: usize) -> String {
        self.stream
            .get(index)
            .map(|token| token.text.clone())
            .unwrap_or_default()
    }

    fn span_end(&self, index: usize) -> usize {
        self.stream
            .get(index)
            .map(|token| token.span.end)
            .unwrap_or(0)
    }

    /// Raw source text from the start of token `from` to the end of token `to`.
    fn slice(&self, from: usize, to: usize) -> String {
        let lo = self
            .stream
            .get(from)
            .map(|token| token.span.start)
            .unwrap_or(0);
        let hi = self.span_end(to);
        self.source[lo..hi].to_string()
    }
}
