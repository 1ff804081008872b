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

//! Lexer and parser error types
//!
//! Both carry the source [`Position`] of the offending input so a hosting
//! layer can point at the problem.

use thiserror::Error;

use super::token::Position;

/// Errors produced while tokenizing a filter string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A quoted literal ran to end of input without its closing quote
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },

    /// Grouping parenthesis depth went negative or ended non-zero
    #[error("unbalanced parentheses at {position}")]
    UnbalancedParentheses { position: Position },
}

/// Errors produced while parsing a token stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token appeared where the grammar does not allow it
    #[error("unexpected token {token} at {position}")]
    UnexpectedToken { token: String, position: Position },

    /// An operator token is not in the supported set
    #[error("unknown operator '{operator}' at {position}")]
    UnknownOperator { operator: String, position: Position },

    /// A condition does not match `subject operator value`
    #[error("malformed condition at {position}: {reason}")]
    MalformedCondition { reason: String, position: Position },

    /// A value list has no elements
    #[error("empty value list at {position}")]
    EmptyList { position: Position },
}
