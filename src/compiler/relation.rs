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

//! Relation registry
//!
//! Each many-to-many relation compares against one field of the related
//! entity (`languages` by `name`, `locations` by `city`, ...). The
//! mapping is configuration, not per-relation code: new relations
//! register a comparison field externally, with `name` as the default.
//!
//! The registry also carries the remote sentinel: the one value of the
//! one relation that redirects an `IS_ANY` match to a boolean flag on the
//! record itself instead of a related row.

use rustc_hash::{FxHashMap, FxHashSet};

/// Default comparison field for relations registered without one
pub const DEFAULT_COMPARISON_FIELD: &str = "name";

/// Sentinel configuration for `IS_ANY` on a flagged relation
///
/// When the sentinel value appears in an `IS_ANY` list for the sentinel
/// relation, it matches records whose flag field is true - even records
/// with no related rows at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSentinel {
    /// Relation the sentinel applies to
    pub relation: String,
    /// The sentinel value inside the `IS_ANY` list
    pub value: String,
    /// Boolean flag field on the record
    pub flag_field: String,
}

/// Registry mapping relation names to their comparison fields
#[derive(Debug, Clone, Default)]
pub struct RelationRegistry {
    fields: FxHashMap<String, String>,
    sentinel: Option<RemoteSentinel>,
}

impl RelationRegistry {
    /// Create an empty registry with no sentinel
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard job-posting registry
    ///
    /// `languages` and `categories` compare by `name`, `locations` by
    /// `city`, and `Remote` in a location `IS_ANY` list matches the
    /// record's `is_remote` flag.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("languages");
        registry.register_with_field("locations", "city");
        registry.register("categories");
        registry.sentinel = Some(RemoteSentinel {
            relation: "locations".to_string(),
            value: "Remote".to_string(),
            flag_field: "is_remote".to_string(),
        });
        registry
    }

    /// Register a relation comparing by the default `name` field
    pub fn register(&mut self, relation: impl Into<String>) {
        self.register_with_field(relation, DEFAULT_COMPARISON_FIELD);
    }

    /// Register a relation with an explicit comparison field
    pub fn register_with_field(&mut self, relation: impl Into<String>, field: impl Into<String>) {
        self.fields.insert(relation.into(), field.into());
    }

    /// Look up a relation's comparison field
    pub fn comparison_field(&self, relation: &str) -> Option<&str> {
        self.fields.get(relation).map(|s| s.as_str())
    }

    /// Check whether a relation is registered
    pub fn contains(&self, relation: &str) -> bool {
        self.fields.contains_key(relation)
    }

    /// Registered relation names, for the parser's subject disambiguation
    pub fn names(&self) -> FxHashSet<String> {
        self.fields.keys().cloned().collect()
    }

    /// The configured remote sentinel, if any
    pub fn remote_sentinel(&self) -> Option<&RemoteSentinel> {
        self.sentinel.as_ref()
    }

    /// Configure the remote sentinel
    pub fn set_remote_sentinel(&mut self, sentinel: RemoteSentinel) {
        self.sentinel = Some(sentinel);
    }
}
