//! Tokenization of grammar source text
//!
//! Produces a flat, position-ordered [`TokenStream`] covering the whole file,
//! including hidden whitespace/comment tokens. Downstream consumers address
//! tokens by index, so layout reproduction never has to rescan by position.

use std::ops::Range;

use logos::Logos;
use serde::Serialize;

use crate::error::SyntaxError;
use crate::token::{Channel, Token};

/// One lexed token with its raw text, byte span and channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceToken {
    pub kind: Token,
    pub text: String,
    pub span: Range<usize>,
    pub channel: Channel,
}

/// Flat token stream for one grammar file, hidden tokens included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenStream {
    tokens: Vec<SourceToken>,
}

impl TokenStream {
    pub fn get(&self, index: usize) -> Option<&SourceToken> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[SourceToken] {
        &self.tokens
    }
}

/// Tokenizes a whole grammar file.
///
/// Any input the lexer cannot recognize aborts tokenization with a
/// [`SyntaxError`] at the offending offset.
pub fn tokenize(source: &str) -> Result<TokenStream, SyntaxError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = result
            .map_err(|()| SyntaxError::at("unrecognized input", source, span.start))?;
        tokens.push(SourceToken {
            kind,
            text: lexer.slice().to_string(),
            span,
            channel: kind.channel(),
        });
    }
    Ok(TokenStream { tokens })
}
