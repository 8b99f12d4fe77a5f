//! Error type for grammar parsing

use std::fmt;

/// A lexical or syntactic error in a grammar file.
///
/// Carries a 1-based line/column derived from the byte offset at which the
/// error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    /// Builds an error positioned at `offset` within `source`.
    pub fn at(message: impl Into<String>, source: &str, offset: usize) -> Self {
        let (line, column) = line_column(source, offset);
        SyntaxError {
            message: message.into(),
            line,
            column,
        }
    }
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|i| offset - i)
        .unwrap_or(offset + 1);
    (line, column)
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_first_line() {
        let err = SyntaxError::at("boom", "abc", 1);
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn test_line_column_later_line() {
        let err = SyntaxError::at("boom", "a\nbc\nd", 3);
        assert_eq!((err.line, err.column), (2, 2));
        assert_eq!(err.to_string(), "2:2: boom");
    }

    #[test]
    fn test_offset_clamped_to_source_end() {
        let err = SyntaxError::at("eof", "ab", 99);
        assert_eq!((err.line, err.column), (1, 3));
    }
}
