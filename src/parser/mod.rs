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

//! Filter parser
//!
//! This module turns a filter string into a [`FilterExpression`] AST:
//!
//! - [`lexer`] - Tokenizer for filter input
//! - [`parser`] - Recursive-descent parser building the AST
//! - [`ast`] - Abstract Syntax Tree types
//! - [`token`] - Token types
//! - [`error`] - Lexer and parser error types
//!
//! # Example
//!
//! ```
//! use jobfilter::parser::parse_filter;
//!
//! let expr = parse_filter("salary_min >= 50000 AND languages HAS_ANY (PHP, Go)").unwrap();
//! assert!(!expr.is_empty());
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod token;

use rustc_hash::FxHashSet;

pub use ast::{Condition, FilterExpression, LogicalOp, Operator, Subject};
pub use error::{LexError, ParseError};
pub use lexer::{tokenize, Lexer};
pub use parser::{Parser, DEFAULT_RELATIONS};
pub use token::{
    is_keyword_operator, is_symbol_operator, Literal, Position, Token, TokenKind,
    KEYWORD_OPERATORS, SYMBOL_OPERATORS,
};

use crate::error::FilterError;

/// Parse a filter string with the default relation names
///
/// This is the main entry point for parsing filter strings. An empty or
/// whitespace-only string is valid and parses to
/// [`FilterExpression::Empty`]; callers must not treat it as an error.
pub fn parse_filter(input: &str) -> Result<FilterExpression, FilterError> {
    let tokens = tokenize(input)?;
    Ok(Parser::new(tokens).parse()?)
}

/// Parse a filter string recognizing a custom relation-name set
pub fn parse_filter_with_relations(
    input: &str,
    relations: FxHashSet<String>,
) -> Result<FilterExpression, FilterError> {
    let tokens = tokenize(input)?;
    Ok(Parser::with_relations(tokens, relations).parse()?)
}
