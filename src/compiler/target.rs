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

//! Queryable record store capability
//!
//! The predicate compiler never constructs storage-specific statements;
//! it only issues calls against this trait. Implementations decide what a
//! predicate call means - an in-memory evaluation tree (see
//! [`crate::engine`]), generated query text, or anything else that
//! preserves boolean semantics.

use super::attribute::AttributeType;
use super::error::CompileError;
use crate::parser::{LogicalOp, Operator};
use crate::value::FilterValue;

/// Callback compiling predicates into a nested scope
pub type GroupBody<'a> = dyn FnMut(&mut dyn QueryTarget) -> Result<(), CompileError> + 'a;

/// A record store the compiler can lower predicates onto
///
/// All `filter_*` calls add one predicate to the current scope.
/// Predicates are issued in left-to-right source order, but a target is
/// free to execute them in any order that preserves boolean semantics -
/// ordering matters only for determinism of generated query text.
pub trait QueryTarget {
    /// Look up an attribute's declared type, or `None` if unregistered
    fn attribute_type(&self, name: &str) -> Option<AttributeType>;

    /// Scalar comparison on a record field
    ///
    /// `op` is always one of the comparison/membership operators; `LIKE`
    /// values arrive already wrapped in `%` wildcard markers.
    fn filter_field(
        &mut self,
        field: &str,
        op: Operator,
        value: &FilterValue,
    ) -> Result<(), CompileError>;

    /// EAV attribute comparison
    ///
    /// The compiler has already resolved `ty` through the catalog and
    /// validated/normalized the operand for it.
    fn filter_attribute(
        &mut self,
        name: &str,
        ty: AttributeType,
        op: Operator,
        value: &FilterValue,
    ) -> Result<(), CompileError>;

    /// Record's related set equals the given values exactly
    fn filter_relation_exact(
        &mut self,
        relation: &str,
        field: &str,
        values: &[FilterValue],
    ) -> Result<(), CompileError>;

    /// Record relates to at least one of the given values
    fn filter_relation_any(
        &mut self,
        relation: &str,
        field: &str,
        values: &[FilterValue],
    ) -> Result<(), CompileError>;

    /// Record has at least one related entity
    fn filter_relation_exists(&mut self, relation: &str) -> Result<(), CompileError>;

    /// Record's boolean flag field is true (remote sentinel lowering)
    fn filter_flag(&mut self, field: &str) -> Result<(), CompileError>;

    /// Compile predicates into a nested scope
    ///
    /// Everything added inside `body` combines per `kind`, and the scope
    /// as a whole participates in the parent scope as one unit. The scope
    /// is finalized when this call returns, error or not.
    fn group(&mut self, kind: LogicalOp, body: &mut GroupBody) -> Result<(), CompileError>;
}
