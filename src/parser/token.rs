// Copyright 2026 Jobfilter Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Token types for the filter lexer
//!
//! This module defines the token types produced by the lexer and consumed
//! by the parser.

use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::LazyLock;

/// Position represents a position in the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset, starting at 0
    pub offset: usize,
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Raw lexical shape of a literal, before coercion
///
/// The lexer records what it saw; [`crate::value::coerce`] decides what it
/// means.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Bare word (`published`, `full-time`, `Remote`)
    Word(String),
    /// Quoted string with the quotes stripped (`'x y'`, `"Dubai"`)
    Quoted(String),
    /// Numeric-shaped text (`42`, `-3.5`)
    Number(String),
    /// Parenthesized comma list; elements are never themselves lists
    List(Vec<Literal>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Word(s) | Literal::Number(s) => write!(f, "{}", s),
            Literal::Quoted(s) => write!(f, "'{}'", s),
            Literal::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The kind of a lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier (field name, relation name, `attribute:name`)
    Ident(String),
    /// Comparison or membership operator, verbatim (`=`, `>=`, `NOT IN`)
    Operator(String),
    /// Literal value
    Literal(Literal),
    /// Grouping open parenthesis
    LParen,
    /// Grouping close parenthesis
    RParen,
    /// Logical AND keyword
    And,
    /// Logical OR keyword
    Or,
    /// Comma outside a value list (always a syntax error downstream)
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Operator(s) => write!(f, "{}", s),
            TokenKind::Literal(l) => write!(f, "{}", l),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Comma => write!(f, ","),
        }
    }
}

/// Token represents a lexical token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of the token
    pub kind: TokenKind,
    /// The position in the source
    pub position: Position,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Check if this is an operator token
    pub fn is_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Operator(_))
    }

    /// Check if this is an operator token with the given literal
    pub fn is_operator_str(&self, op: &str) -> bool {
        matches!(&self.kind, TokenKind::Operator(s) if s == op)
    }

    /// Check if this token can appear in value position
    pub fn is_value(&self) -> bool {
        matches!(self.kind, TokenKind::Literal(_) | TokenKind::Ident(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {}", self.kind, self.position)
    }
}

/// Symbolic comparison operators
pub static SYMBOL_OPERATORS: &[&str] = &["=", "!=", "<>", ">", "<", ">=", "<="];

/// Keyword operators, recognized case-sensitively in uppercase
///
/// `NOT IN` is assembled by the lexer's lookahead; `NOT` alone is not an
/// operator.
pub static KEYWORD_OPERATORS: &[&str] = &["LIKE", "IN", "NOT IN", "HAS_ANY", "IS_ANY", "EXISTS"];

/// Compiled symbol-operator set for O(1) lookups
static SYMBOL_OPERATOR_SET: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    let mut set = FxHashSet::with_capacity_and_hasher(SYMBOL_OPERATORS.len(), Default::default());
    for op in SYMBOL_OPERATORS {
        set.insert(*op);
    }
    set
});

/// Compiled keyword-operator set for O(1) lookups
static KEYWORD_OPERATOR_SET: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    let mut set = FxHashSet::with_capacity_and_hasher(KEYWORD_OPERATORS.len(), Default::default());
    for op in KEYWORD_OPERATORS {
        set.insert(*op);
    }
    set
});

/// Check if a string is a symbolic operator
#[inline]
pub fn is_symbol_operator(s: &str) -> bool {
    SYMBOL_OPERATOR_SET.contains(s)
}

/// Check if a string is a keyword operator (case-sensitive)
#[inline]
pub fn is_keyword_operator(s: &str) -> bool {
    KEYWORD_OPERATOR_SET.contains(s)
}

/// Characters that can be part of a symbolic operator
pub fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = Position::new(10, 2, 5);
        assert_eq!(pos.to_string(), "line 2, column 5");
    }

    #[test]
    fn test_is_symbol_operator() {
        assert!(is_symbol_operator("="));
        assert!(is_symbol_operator(">="));
        assert!(is_symbol_operator("<>"));
        assert!(!is_symbol_operator("=="));
        assert!(!is_symbol_operator("LIKE"));
    }

    #[test]
    fn test_is_keyword_operator_case_sensitive() {
        assert!(is_keyword_operator("LIKE"));
        assert!(is_keyword_operator("NOT IN"));
        assert!(is_keyword_operator("HAS_ANY"));
        assert!(!is_keyword_operator("like"));
        assert!(!is_keyword_operator("NOT"));
    }

    #[test]
    fn test_token_helpers() {
        let tok = Token::new(
            TokenKind::Operator("NOT IN".to_string()),
            Position::default(),
        );
        assert!(tok.is_operator());
        assert!(tok.is_operator_str("NOT IN"));
        assert!(!tok.is_value());

        let val = Token::new(
            TokenKind::Literal(Literal::Word("x".to_string())),
            Position::default(),
        );
        assert!(val.is_value());
    }

    #[test]
    fn test_token_display() {
        let tok = Token::new(TokenKind::And, Position::new(0, 1, 1));
        assert_eq!(tok.to_string(), "'AND' at line 1, column 1");

        let lit = Token::new(
            TokenKind::Literal(Literal::Quoted("x y".to_string())),
            Position::new(4, 1, 5),
        );
        assert!(lit.to_string().contains("'x y'"));
    }
}
