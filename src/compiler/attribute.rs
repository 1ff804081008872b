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

//! EAV attribute schema
//!
//! Attributes are dynamically named and stored as text; their declared
//! type dictates the comparison semantics at compile time. The type set
//! is a closed enumeration resolved once through the catalog, then
//! dispatched over exhaustively - never open-ended runtime inspection.

use rustc_hash::FxHashMap;
use std::fmt;

/// Declared type of an EAV attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// Numeric cast comparison
    Number,
    /// Exact match against normalized `1`/`0`
    Boolean,
    /// Date-typed comparison (`YYYY-MM-DD`)
    Date,
    /// Field-style exact/`IN` match against the stored text
    Select,
    /// Free text; `LIKE` becomes substring containment
    Text,
}

impl AttributeType {
    /// Map a declared type name to the enumeration
    ///
    /// Anything unrecognized is free text, matching how undeclared types
    /// behave in the stored schema.
    pub fn parse(s: &str) -> AttributeType {
        match s {
            "number" => AttributeType::Number,
            "boolean" => AttributeType::Boolean,
            "date" => AttributeType::Date,
            "select" => AttributeType::Select,
            _ => AttributeType::Text,
        }
    }

    /// The canonical type name
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
            AttributeType::Select => "select",
            AttributeType::Text => "text",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry of declared attributes and their types
///
/// The compiler resolves every attribute condition through this catalog;
/// an unregistered name is a compile error, never a silently dropped
/// condition.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    types: FxHashMap<String, AttributeType>,
}

impl AttributeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute with its type
    pub fn declare(&mut self, name: impl Into<String>, ty: AttributeType) {
        self.types.insert(name.into(), ty);
    }

    /// Look up an attribute's declared type
    pub fn get(&self, name: &str) -> Option<AttributeType> {
        self.types.get(name).copied()
    }

    /// Number of declared attributes
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
