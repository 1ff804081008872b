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

//! Predicate compiler error types

use thiserror::Error;

/// Errors produced while lowering an AST onto a query target
///
/// The compiler fails fast: the first error aborts the whole compilation
/// and no partial filter is applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Attribute name is not registered in the catalog
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// Operand type does not fit the operator or attribute type
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Operator is not valid for the condition's subject kind
    #[error("operator {operator} is not supported for {subject} '{name}'")]
    UnsupportedOperator {
        operator: String,
        subject: String,
        name: String,
    },

    /// Relation name is not registered
    #[error("unknown relation '{0}'")]
    UnknownRelation(String),
}
