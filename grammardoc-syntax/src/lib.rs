//! Grammar syntax for grammardoc
//!
//! This crate turns ANTLR4-style grammar source into a read-only syntax tree
//! plus a flat, channel-annotated token stream. It is the input side of the
//! toolchain: everything downstream (rule collection, token-map resolution,
//! HTML rendering) consumes the tree without mutating it.
//!
//! The file structure:
//!     .
//!     ├── token.rs     # logos token definitions and channels
//!     ├── lexer.rs     # source → TokenStream (hidden tokens included)
//!     ├── ast.rs       # GrammarFile / RuleSpec / Element / SetElement
//!     ├── parser.rs    # recursive descent, doc-comment attachment
//!     └── error.rs     # SyntaxError with line/column
//!
//! Coverage is the ANTLR4 subset a documentation renderer needs: combined,
//! lexer and parser grammars; prequel sections (`options`, `import`,
//! `tokens`, `channels`, named actions, `mode`); parser and lexer rules with
//! labeled alternatives, labeled elements, blocks, negated sets, character
//! sets/ranges, EBNF suffixes, element options, inline actions and lexer
//! commands. A syntax error anywhere fails the whole file; there is no
//! recovery, and callers are expected to abort their batch.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::GrammarFile;
pub use error::SyntaxError;
pub use lexer::{SourceToken, TokenStream};
pub use parser::parse_grammar;
pub use token::{Channel, Token};
