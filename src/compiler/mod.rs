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

//! Predicate compiler
//!
//! Lowers a parsed [`FilterExpression`] onto an abstract [`QueryTarget`].
//! The compiler owns the semantic rules - operator/subject compatibility,
//! attribute type checking, operand normalization, and the remote
//! sentinel rewrite - while the target owns representation. Compilation
//! is fail-fast: the first semantic error aborts with a [`CompileError`]
//! and the target must be considered poisoned.
//!
//! ```
//! use jobfilter::compiler::{FilterCompiler, RelationRegistry};
//! use jobfilter::parser::parse_filter;
//!
//! let expr = parse_filter("job_type = full-time AND languages HAS_ANY (PHP, Ruby)").unwrap();
//! let compiler = FilterCompiler::new(RelationRegistry::standard());
//! # let _ = (expr, compiler);
//! ```

mod attribute;
mod error;
mod relation;
mod target;

pub use attribute::{AttributeCatalog, AttributeType};
pub use error::CompileError;
pub use relation::{RelationRegistry, RemoteSentinel, DEFAULT_COMPARISON_FIELD};
pub use target::{GroupBody, QueryTarget};

use crate::parser::{Condition, FilterExpression, LogicalOp, Operator, Subject};
use crate::value::FilterValue;

use chrono::NaiveDate;

/// Compiles filter expressions onto query targets
pub struct FilterCompiler {
    relations: RelationRegistry,
}

impl FilterCompiler {
    pub fn new(relations: RelationRegistry) -> Self {
        FilterCompiler { relations }
    }

    /// The registry this compiler lowers relationship predicates through
    pub fn relations(&self) -> &RelationRegistry {
        &self.relations
    }

    /// Lower an expression tree onto a target, fail-fast
    ///
    /// An [`FilterExpression::Empty`] tree compiles to nothing: the
    /// target's root scope stays untouched and matches every record.
    pub fn compile(
        &self,
        expr: &FilterExpression,
        target: &mut dyn QueryTarget,
    ) -> Result<(), CompileError> {
        match expr {
            FilterExpression::Empty => Ok(()),
            FilterExpression::Condition(cond) => self.compile_condition(cond, target),
            FilterExpression::Logical { op, operands } => {
                target.group(*op, &mut |scope| {
                    for operand in operands {
                        self.compile(operand, scope)?;
                    }
                    Ok(())
                })
            }
            FilterExpression::Group(inner) => target.group(LogicalOp::And, &mut |scope| {
                self.compile(inner, scope)
            }),
        }
    }

    fn compile_condition(
        &self,
        cond: &Condition,
        target: &mut dyn QueryTarget,
    ) -> Result<(), CompileError> {
        match &cond.subject {
            Subject::Field(name) => self.compile_field(name, cond.operator, &cond.value, target),
            Subject::Attribute(name) => {
                self.compile_attribute(name, cond.operator, &cond.value, target)
            }
            Subject::Relationship(name) => {
                self.compile_relationship(name, cond.operator, &cond.value, target)
            }
        }
    }

    fn compile_field(
        &self,
        field: &str,
        op: Operator,
        value: &FilterValue,
        target: &mut dyn QueryTarget,
    ) -> Result<(), CompileError> {
        match op {
            Operator::Eq
            | Operator::NotEq
            | Operator::Gt
            | Operator::Lt
            | Operator::Gte
            | Operator::Lte => target.filter_field(field, op, value),
            Operator::Like => {
                let pattern = like_pattern(field, value)?;
                target.filter_field(field, Operator::Like, &pattern)
            }
            Operator::In | Operator::NotIn => {
                require_list(op, field, value)?;
                target.filter_field(field, op, value)
            }
            Operator::HasAny | Operator::IsAny | Operator::Exists => {
                Err(CompileError::UnsupportedOperator {
                    operator: op.as_str().to_string(),
                    subject: "field".to_string(),
                    name: field.to_string(),
                })
            }
        }
    }

    fn compile_attribute(
        &self,
        name: &str,
        op: Operator,
        value: &FilterValue,
        target: &mut dyn QueryTarget,
    ) -> Result<(), CompileError> {
        let ty = target
            .attribute_type(name)
            .ok_or_else(|| CompileError::UnknownAttribute(name.to_string()))?;

        match op {
            Operator::HasAny | Operator::IsAny | Operator::Exists => {
                return Err(CompileError::UnsupportedOperator {
                    operator: op.as_str().to_string(),
                    subject: "attribute".to_string(),
                    name: name.to_string(),
                });
            }
            Operator::In | Operator::NotIn => {
                require_list(op, name, value)?;
                return target.filter_attribute(name, ty, op, value);
            }
            _ => {}
        }

        match ty {
            AttributeType::Boolean => {
                // The stored value is itself boolean text, so the operator
                // degenerates to an equality check against the truth value.
                let flag = truthy(value);
                target.filter_attribute(name, ty, Operator::Eq, &FilterValue::Bool(flag))
            }
            AttributeType::Number => {
                if op == Operator::Like {
                    let pattern = like_pattern(name, value)?;
                    return target.filter_attribute(name, ty, op, &pattern);
                }
                let n = value.as_number().ok_or_else(|| {
                    CompileError::TypeMismatch(format!(
                        "attribute {} is numeric but operand {} is not",
                        name, value
                    ))
                })?;
                target.filter_attribute(name, ty, op, &FilterValue::Number(n))
            }
            AttributeType::Date => {
                if op == Operator::Like {
                    let pattern = like_pattern(name, value)?;
                    return target.filter_attribute(name, ty, op, &pattern);
                }
                let text = match value {
                    FilterValue::Text(s) => s.as_str(),
                    other => {
                        return Err(CompileError::TypeMismatch(format!(
                            "attribute {} is a date but operand {} is not",
                            name, other
                        )))
                    }
                };
                if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() {
                    return Err(CompileError::TypeMismatch(format!(
                        "attribute {} expects a YYYY-MM-DD date, got {}",
                        name, text
                    )));
                }
                target.filter_attribute(name, ty, op, value)
            }
            AttributeType::Select | AttributeType::Text => {
                if op == Operator::Like {
                    let pattern = like_pattern(name, value)?;
                    return target.filter_attribute(name, ty, op, &pattern);
                }
                target.filter_attribute(name, ty, op, value)
            }
        }
    }

    fn compile_relationship(
        &self,
        relation: &str,
        op: Operator,
        value: &FilterValue,
        target: &mut dyn QueryTarget,
    ) -> Result<(), CompileError> {
        if !self.relations.contains(relation) {
            return Err(CompileError::UnknownRelation(relation.to_string()));
        }
        let field = self
            .relations
            .comparison_field(relation)
            .unwrap_or(relation::DEFAULT_COMPARISON_FIELD)
            .to_string();
        match op {
            Operator::Exists => target.filter_relation_exists(relation),
            Operator::Eq => {
                let values = value_list(value);
                target.filter_relation_exact(relation, &field, &values)
            }
            Operator::HasAny => {
                let values = value_list(value);
                target.filter_relation_any(relation, &field, &values)
            }
            Operator::IsAny => self.compile_is_any(relation, &field, value, target),
            _ => Err(CompileError::UnsupportedOperator {
                operator: op.as_str().to_string(),
                subject: "relationship".to_string(),
                name: relation.to_string(),
            }),
        }
    }

    /// `IS_ANY` with the remote sentinel present splits into an OR of the
    /// membership test and a flag check on the record itself.
    fn compile_is_any(
        &self,
        relation: &str,
        field: &str,
        value: &FilterValue,
        target: &mut dyn QueryTarget,
    ) -> Result<(), CompileError> {
        let values = value_list(value);
        let sentinel = match self.relations.remote_sentinel() {
            Some(s) if s.relation == relation => s,
            _ => return target.filter_relation_any(relation, field, &values),
        };

        let (sentinel_hits, remaining): (Vec<_>, Vec<_>) = values
            .into_iter()
            .partition(|v| matches!(v, FilterValue::Text(t) if t.eq_ignore_ascii_case(&sentinel.value)));
        if sentinel_hits.is_empty() {
            return target.filter_relation_any(relation, field, &remaining);
        }
        if remaining.is_empty() {
            return target.filter_flag(&sentinel.flag_field);
        }
        target.group(LogicalOp::Or, &mut |scope| {
            scope.filter_relation_any(relation, field, &remaining)?;
            scope.filter_flag(&sentinel.flag_field)
        })
    }
}

/// Membership operators take a parenthesized list; anything else is a
/// type error
fn require_list(op: Operator, name: &str, value: &FilterValue) -> Result<(), CompileError> {
    if op.expects_list() && !value.is_list() {
        return Err(CompileError::TypeMismatch(format!(
            "operator {} on {} requires a value list",
            op, name
        )));
    }
    Ok(())
}

/// Wrap a scalar operand in `%` markers for containment matching
fn like_pattern(name: &str, value: &FilterValue) -> Result<FilterValue, CompileError> {
    match value {
        FilterValue::List(_) => Err(CompileError::TypeMismatch(format!(
            "operator LIKE on {} requires a scalar value",
            name
        ))),
        scalar => Ok(FilterValue::Text(format!("%{}%", scalar))),
    }
}

/// Promote a scalar operand to a singleton list for relationship predicates
fn value_list(value: &FilterValue) -> Vec<FilterValue> {
    match value {
        FilterValue::List(items) => items.clone(),
        scalar => vec![scalar.clone()],
    }
}

/// Loose boolean reading of an operand: `1`, `true`, `on`, and `yes`
/// (case-insensitive) are true, everything else is false.
fn truthy(value: &FilterValue) -> bool {
    match value {
        FilterValue::Bool(b) => *b,
        FilterValue::Number(n) => *n != 0.0,
        FilterValue::Text(s) => {
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes")
        }
        FilterValue::List(_) => false,
    }
}
