//! Token definitions for ANTLR4-style grammar files
//!
//! Tokens are produced by the logos derive macro. Whitespace and ordinary
//! comments are kept in the stream on a hidden channel so that layout can be
//! reproduced later; doc comments (`/** ... */`) stay on the default channel
//! because the parser attaches them to grammar files and rules.

use logos::{Lexer, Logos};
use serde::Serialize;

/// Channel a token lives on, in the ANTLR sense: hidden tokens are invisible
/// to the parser but preserved in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    Default,
    Hidden,
}

/// All tokens of the grammar syntax
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Token {
    // `/** ... */` must win over the plain block comment on equal-length matches
    #[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", priority = 7)]
    DocComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 6)]
    BlockComment,

    #[regex(r"//[^\n\r]*")]
    LineComment,

    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    /// Single-quoted literal with backslash escapes
    #[regex(r"'([^'\\\n\r]|\\.)*'")]
    StringLiteral,

    /// `[...]`: a lexer character set or an argument action, disambiguated
    /// by the parser from context
    #[regex(r"\[([^\]\\]|\\.)*\]")]
    BracketText,

    /// `{...}` action code, brace-balanced by the callback
    #[token("{", lex_action)]
    Action,

    /// Uppercase-initial identifier (token reference)
    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    TokenRef,

    /// Lowercase-initial identifier (rule reference or keyword)
    #[regex(r"[a-z][a-zA-Z0-9_]*")]
    RuleRef,

    #[regex(r"[0-9]+")]
    Int,

    #[token("->")]
    Arrow,
    #[token("..")]
    Range,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("|")]
    Pipe,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("+=")]
    PlusAssign,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token("@")]
    At,
    #[token("#")]
    Pound,
}

impl Token {
    /// The channel this token kind is emitted on.
    pub fn channel(&self) -> Channel {
        match self {
            Token::Whitespace | Token::LineComment | Token::BlockComment => Channel::Hidden,
            _ => Channel::Default,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.channel() == Channel::Hidden
    }

    /// Whether this token can start an EBNF suffix (`?`, `*`, `+`).
    pub fn is_suffix_start(&self) -> bool {
        matches!(self, Token::Question | Token::Star | Token::Plus)
    }
}

/// Consumes a brace-balanced `{...}` action. Quoted strings are skipped so
/// braces inside string literals do not affect the depth count.
fn lex_action(lex: &mut Lexer<Token>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return true;
                }
            }
            quote @ (b'\'' | b'"') => {
                i += 1;
                while i < rest.len() && rest[i] != quote {
                    if rest[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    false
}
