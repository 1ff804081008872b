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

//! Filter parser - recursive descent over the token stream
//!
//! Grammar, precedence low to high (`AND` binds tighter than `OR`;
//! parenthesization is the only override):
//!
//! ```text
//! Expr      := OrExpr
//! OrExpr    := AndExpr (OR AndExpr)*
//! AndExpr   := Primary (AND Primary)*
//! Primary   := '(' Expr ')' | Condition
//! Condition := Subject Operator Value
//! ```
//!
//! Chained operands of the same logical kind collapse into one N-ary
//! [`FilterExpression::Logical`] node, never a binary-nested tree.

use rustc_hash::FxHashSet;
use std::sync::LazyLock;

use super::ast::{Condition, FilterExpression, LogicalOp, Operator, Subject};
use super::error::ParseError;
use super::token::{Literal, Position, Token, TokenKind};
use crate::value::{coerce, FilterValue};

/// Relation names recognized in subject position by default
pub static DEFAULT_RELATIONS: &[&str] = &["languages", "locations", "categories"];

static DEFAULT_RELATION_SET: LazyLock<FxHashSet<String>> = LazyLock::new(|| {
    DEFAULT_RELATIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
});

/// Subject prefix marking an EAV attribute condition
const ATTRIBUTE_PREFIX: &str = "attribute:";

/// Recursive-descent filter parser
pub struct Parser {
    /// The token stream
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// Relation names recognized in subject position
    relations: FxHashSet<String>,
}

impl Parser {
    /// Create a parser over a token stream with the default relation names
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_relations(tokens, DEFAULT_RELATION_SET.clone())
    }

    /// Create a parser recognizing a custom relation-name set
    pub fn with_relations(tokens: Vec<Token>, relations: FxHashSet<String>) -> Self {
        Self {
            tokens,
            pos: 0,
            relations,
        }
    }

    /// Parse the whole token stream into an expression
    ///
    /// An empty stream is valid and yields [`FilterExpression::Empty`].
    pub fn parse(mut self) -> Result<FilterExpression, ParseError> {
        if self.tokens.is_empty() {
            return Ok(FilterExpression::Empty);
        }

        let expr = self.parse_expression()?;

        if let Some(token) = self.cur() {
            return Err(ParseError::UnexpectedToken {
                token: token.kind.to_string(),
                position: token.position,
            });
        }

        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<FilterExpression, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<FilterExpression, ParseError> {
        let mut operands = vec![self.parse_and()?];

        while matches!(self.cur_kind(), Some(TokenKind::Or)) {
            self.advance();
            operands.push(self.parse_and()?);
        }

        Ok(flatten(LogicalOp::Or, operands))
    }

    fn parse_and(&mut self) -> Result<FilterExpression, ParseError> {
        let mut operands = vec![self.parse_primary()?];

        while matches!(self.cur_kind(), Some(TokenKind::And)) {
            self.advance();
            operands.push(self.parse_primary()?);
        }

        Ok(flatten(LogicalOp::And, operands))
    }

    fn parse_primary(&mut self) -> Result<FilterExpression, ParseError> {
        if matches!(self.cur_kind(), Some(TokenKind::LParen)) {
            self.advance();
            let inner = self.parse_expression()?;

            match self.cur() {
                Some(token) if token.kind == TokenKind::RParen => {
                    self.advance();
                    Ok(FilterExpression::Group(Box::new(inner)))
                }
                Some(token) => Err(ParseError::UnexpectedToken {
                    token: token.kind.to_string(),
                    position: token.position,
                }),
                // The lexer guarantees balance, but guard anyway
                None => Err(ParseError::MalformedCondition {
                    reason: "expected ')'".to_string(),
                    position: self.end_position(),
                }),
            }
        } else {
            self.parse_condition()
        }
    }

    fn parse_condition(&mut self) -> Result<FilterExpression, ParseError> {
        let subject = self.parse_subject()?;
        let (operator, op_position) = self.parse_operator()?;
        let value = self.parse_value(operator, op_position)?;

        Ok(FilterExpression::Condition(Condition {
            subject,
            operator,
            value,
        }))
    }

    fn parse_subject(&mut self) -> Result<Subject, ParseError> {
        let token = match self.cur() {
            Some(t) => t.clone(),
            None => {
                return Err(ParseError::MalformedCondition {
                    reason: "expected a condition".to_string(),
                    position: self.end_position(),
                })
            }
        };

        let name = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            other => {
                return Err(ParseError::UnexpectedToken {
                    token: other.to_string(),
                    position: token.position,
                })
            }
        };

        self.advance();

        if let Some(rest) = name.strip_prefix(ATTRIBUTE_PREFIX) {
            if rest.is_empty() {
                return Err(ParseError::MalformedCondition {
                    reason: "attribute name is empty".to_string(),
                    position: token.position,
                });
            }
            return Ok(Subject::Attribute(rest.to_string()));
        }

        if self.relations.contains(&name) {
            return Ok(Subject::Relationship(name));
        }

        Ok(Subject::Field(name))
    }

    fn parse_operator(&mut self) -> Result<(Operator, Position), ParseError> {
        let token = match self.cur() {
            Some(t) => t.clone(),
            None => {
                return Err(ParseError::MalformedCondition {
                    reason: "expected operator after subject".to_string(),
                    position: self.end_position(),
                })
            }
        };

        let raw = match &token.kind {
            TokenKind::Operator(s) => s.clone(),
            _ => {
                return Err(ParseError::MalformedCondition {
                    reason: "expected operator after subject".to_string(),
                    position: token.position,
                })
            }
        };

        let operator = Operator::parse(&raw).ok_or(ParseError::UnknownOperator {
            operator: raw,
            position: token.position,
        })?;

        self.advance();
        Ok((operator, token.position))
    }

    fn parse_value(
        &mut self,
        operator: Operator,
        op_position: Position,
    ) -> Result<FilterValue, ParseError> {
        // EXISTS ignores its value operand; accept one if written
        if operator == Operator::Exists {
            return match self.cur() {
                Some(token) if token.is_value() => {
                    let value = self.coerce_current(token.clone())?;
                    self.advance();
                    Ok(value)
                }
                _ => Ok(FilterValue::Bool(true)),
            };
        }

        let token = match self.cur() {
            Some(t) if t.is_value() => t.clone(),
            Some(t) => {
                return Err(ParseError::MalformedCondition {
                    reason: "expected value after operator".to_string(),
                    position: t.position,
                })
            }
            None => {
                return Err(ParseError::MalformedCondition {
                    reason: "expected value after operator".to_string(),
                    position: op_position,
                })
            }
        };

        let value = self.coerce_current(token)?;
        self.advance();
        Ok(value)
    }

    /// Coerce a value token, rejecting empty lists
    fn coerce_current(&self, token: Token) -> Result<FilterValue, ParseError> {
        let literal = match token.kind {
            TokenKind::Literal(lit) => lit,
            TokenKind::Ident(word) => Literal::Word(word),
            _ => unreachable!("callers check is_value() first"),
        };

        if matches!(&literal, Literal::List(items) if items.is_empty()) {
            return Err(ParseError::EmptyList {
                position: token.position,
            });
        }

        Ok(coerce(&literal))
    }

    fn cur(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn cur_kind(&self) -> Option<&TokenKind> {
        self.cur().map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Position just past the last token, for end-of-input errors
    fn end_position(&self) -> Position {
        self.tokens
            .last()
            .map(|t| t.position)
            .unwrap_or_default()
    }
}

/// Collapse a chain into one N-ary logical node, or pass a single operand
/// through untouched
fn flatten(op: LogicalOp, mut operands: Vec<FilterExpression>) -> FilterExpression {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        FilterExpression::Logical { op, operands }
    }
}
