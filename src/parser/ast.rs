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

//! Abstract Syntax Tree (AST) types for the filter parser
//!
//! A filter string parses into a [`FilterExpression`] tree. The tree is
//! built fresh per string, consumed once by the predicate compiler, and
//! discarded; nothing retains it afterwards.

use std::fmt;

use crate::value::FilterValue;

/// Logical combinator for multi-operand expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// All operands must hold
    And,
    /// At least one operand must hold
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// Comparison, membership, and relationship operators
///
/// A closed enumeration parsed once at the lexer/parser boundary. All
/// downstream code matches exhaustively, so an unsupported combination is
/// a missing match arm, not a runtime string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=` — equality; exact-set match on relationships
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `LIKE` — substring containment on text
    Like,
    /// `IN` — list membership
    In,
    /// `NOT IN` — list non-membership
    NotIn,
    /// `HAS_ANY` — relationship intersects the given values
    HasAny,
    /// `IS_ANY` — like HAS_ANY, with the remote sentinel on locations
    IsAny,
    /// `EXISTS` — relationship has at least one related entity
    Exists,
}

impl Operator {
    /// Map a surface operator string to the closed enumeration
    pub fn parse(s: &str) -> Option<Operator> {
        match s {
            "=" => Some(Operator::Eq),
            "!=" | "<>" => Some(Operator::NotEq),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Gte),
            "<=" => Some(Operator::Lte),
            "LIKE" => Some(Operator::Like),
            "IN" => Some(Operator::In),
            "NOT IN" => Some(Operator::NotIn),
            "HAS_ANY" => Some(Operator::HasAny),
            "IS_ANY" => Some(Operator::IsAny),
            "EXISTS" => Some(Operator::Exists),
            _ => None,
        }
    }

    /// The canonical surface spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::HasAny => "HAS_ANY",
            Operator::IsAny => "IS_ANY",
            Operator::Exists => "EXISTS",
        }
    }

    /// Whether this operator requires a list operand
    pub fn expects_list(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a condition targets
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// A basic scalar field on the record (`salary_min`, `status`)
    Field(String),
    /// An EAV attribute by declared name (`attribute:years_experience`)
    Attribute(String),
    /// A many-to-many relation (`languages`, `locations`, `categories`)
    ///
    /// Carries no sub-field; the comparison field is relation-specific and
    /// resolved by the compiler's relation registry.
    Relationship(String),
}

impl Subject {
    /// The subject's name, without any prefix
    pub fn name(&self) -> &str {
        match self {
            Subject::Field(n) | Subject::Attribute(n) | Subject::Relationship(n) => n,
        }
    }

    /// A short label for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Subject::Field(_) => "field",
            Subject::Attribute(_) => "attribute",
            Subject::Relationship(_) => "relationship",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Field(n) => write!(f, "{}", n),
            Subject::Attribute(n) => write!(f, "attribute:{}", n),
            Subject::Relationship(n) => write!(f, "{}", n),
        }
    }
}

/// A single `subject operator value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// What the condition targets
    pub subject: Subject,
    /// The comparison operator
    pub operator: Operator,
    /// The right-hand side value
    ///
    /// `EXISTS` takes no operand; the parser stores `Bool(true)` and the
    /// compiler ignores it.
    pub value: FilterValue,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operator == Operator::Exists {
            write!(f, "{} EXISTS", self.subject)
        } else {
            write!(f, "{} {} {}", self.subject, self.operator, self.value)
        }
    }
}

/// A parsed filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Empty filter; compiles to the identity predicate
    Empty,
    /// A single condition
    Condition(Condition),
    /// N-ary logical combination; always has at least two operands
    ///
    /// Chained operands of the same kind collapse into one node rather
    /// than nesting binary trees, so structurally equal filters produce
    /// structurally equal ASTs.
    Logical {
        op: LogicalOp,
        operands: Vec<FilterExpression>,
    },
    /// Parenthesized group; compiles under a nested scope
    Group(Box<FilterExpression>),
}

impl FilterExpression {
    /// Check whether this is the empty filter
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterExpression::Empty)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Empty => Ok(()),
            FilterExpression::Condition(c) => write!(f, "{}", c),
            FilterExpression::Logical { op, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    write!(f, "{}", operand)?;
                }
                Ok(())
            }
            FilterExpression::Group(inner) => write!(f, "({})", inner),
        }
    }
}
