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

//! Compiled predicate tree for in-memory evaluation

use super::job::Job;
use crate::compiler::AttributeType;
use crate::parser::{LogicalOp, Operator};
use crate::value::FilterValue;

use chrono::NaiveDate;
use rustc_hash::FxHashSet;

/// One node of a compiled filter, evaluated directly against [`Job`]
/// records.
///
/// Structural equality (`PartialEq`) compares trees node for node, so
/// two filters that compile to the same shape are equal predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record
    True,
    /// Scalar field comparison
    Field {
        field: String,
        op: Operator,
        value: FilterValue,
    },
    /// Typed EAV attribute comparison
    Attribute {
        name: String,
        ty: AttributeType,
        op: Operator,
        value: FilterValue,
    },
    /// Related value set equals the given values exactly
    RelationExact {
        relation: String,
        values: Vec<FilterValue>,
    },
    /// Related value set intersects the given values
    RelationAny {
        relation: String,
        values: Vec<FilterValue>,
    },
    /// At least one related entity exists
    RelationExists { relation: String },
    /// Boolean flag field on the record itself
    Flag { field: String },
    /// Boolean combination of child predicates
    Group {
        kind: LogicalOp,
        children: Vec<Predicate>,
    },
}

impl Predicate {
    /// Evaluate against a single record
    pub fn matches(&self, job: &Job) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Field { field, op, value } => match job.field(field) {
                Some(actual) => scalar_matches(&actual, *op, value),
                None => false,
            },
            Predicate::Attribute {
                name,
                ty,
                op,
                value,
            } => match job.attributes.get(name) {
                Some(stored) => attribute_matches(stored, *ty, *op, value),
                None => false,
            },
            Predicate::RelationExact { relation, values } => {
                match job.relation_values(relation) {
                    Some(actual) => {
                        let have = lowered_set(actual);
                        let want: FxHashSet<String> =
                            values.iter().map(|v| v.to_string().to_lowercase()).collect();
                        have == want
                    }
                    None => false,
                }
            }
            Predicate::RelationAny { relation, values } => match job.relation_values(relation) {
                Some(actual) => {
                    let want: FxHashSet<String> =
                        values.iter().map(|v| v.to_string().to_lowercase()).collect();
                    actual.iter().any(|v| want.contains(&v.to_lowercase()))
                }
                None => false,
            },
            Predicate::RelationExists { relation } => job
                .relation_values(relation)
                .is_some_and(|v| !v.is_empty()),
            Predicate::Flag { field } => job.flag(field),
            Predicate::Group { kind, children } => match kind {
                LogicalOp::And => children.iter().all(|c| c.matches(job)),
                LogicalOp::Or => children.iter().any(|c| c.matches(job)),
            },
        }
    }

    /// Collapse degenerate groups so that `(a AND b)` and `a AND b`
    /// compile to structurally equal trees.
    pub fn simplify(self) -> Predicate {
        match self {
            Predicate::Group { kind, children } => {
                let mut simplified: Vec<Predicate> =
                    children.into_iter().map(Predicate::simplify).collect();
                match simplified.len() {
                    0 => Predicate::True,
                    1 => simplified.remove(0),
                    _ => Predicate::Group {
                        kind,
                        children: simplified,
                    },
                }
            }
            other => other,
        }
    }
}

fn lowered_set(values: &[String]) -> FxHashSet<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

/// Compare an actual scalar value against an operand per the operator
fn scalar_matches(actual: &FilterValue, op: Operator, operand: &FilterValue) -> bool {
    match op {
        Operator::Eq => actual.loosely_equals(operand),
        Operator::NotEq => !actual.loosely_equals(operand),
        Operator::Gt => actual.compare(operand) == std::cmp::Ordering::Greater,
        Operator::Lt => actual.compare(operand) == std::cmp::Ordering::Less,
        Operator::Gte => actual.compare(operand) != std::cmp::Ordering::Less,
        Operator::Lte => actual.compare(operand) != std::cmp::Ordering::Greater,
        Operator::Like => match operand {
            FilterValue::Text(pattern) => like_match(pattern, &actual.to_string()),
            _ => false,
        },
        Operator::In => match operand {
            FilterValue::List(items) => items.iter().any(|i| actual.loosely_equals(i)),
            _ => false,
        },
        Operator::NotIn => match operand {
            FilterValue::List(items) => !items.iter().any(|i| actual.loosely_equals(i)),
            _ => false,
        },
        // Relationship-only operators never reach scalar evaluation
        Operator::HasAny | Operator::IsAny | Operator::Exists => false,
    }
}

/// Evaluate a typed attribute comparison against the stored text value
fn attribute_matches(stored: &str, ty: AttributeType, op: Operator, operand: &FilterValue) -> bool {
    match ty {
        AttributeType::Number => {
            if op == Operator::Like {
                if let FilterValue::Text(pattern) = operand {
                    return like_match(pattern, stored);
                }
                return false;
            }
            match stored.trim().parse::<f64>() {
                Ok(n) => scalar_matches(&FilterValue::Number(n), op, operand),
                Err(_) => false,
            }
        }
        AttributeType::Boolean => match operand {
            FilterValue::Bool(want) => stored_truthy(stored) == *want,
            _ => false,
        },
        AttributeType::Date => {
            if op == Operator::Like {
                if let FilterValue::Text(pattern) = operand {
                    return like_match(pattern, stored);
                }
                return false;
            }
            let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
            match (parse(stored), operand) {
                (Some(have), FilterValue::Text(want)) => match parse(want) {
                    Some(want) => match op {
                        Operator::Eq => have == want,
                        Operator::NotEq => have != want,
                        Operator::Gt => have > want,
                        Operator::Lt => have < want,
                        Operator::Gte => have >= want,
                        Operator::Lte => have <= want,
                        _ => false,
                    },
                    None => false,
                },
                (Some(_), FilterValue::List(_)) => {
                    scalar_matches(&FilterValue::Text(stored.to_string()), op, operand)
                }
                _ => false,
            }
        }
        AttributeType::Select | AttributeType::Text => {
            scalar_matches(&FilterValue::Text(stored.to_string()), op, operand)
        }
    }
}

fn stored_truthy(stored: &str) -> bool {
    matches!(
        stored.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// SQL-style pattern match: `%` spans any run of characters, `_` exactly
/// one. Matching is case-insensitive.
pub fn like_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    let t: Vec<char> = text.to_lowercase().chars().collect();

    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '_' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '%' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            // Backtrack: let the last % absorb one more character
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '%' {
        pi += 1;
    }
    pi == p.len()
}
