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

//! In-memory job store and query target
//!
//! [`QueryBuilder`] is the reference [`QueryTarget`]: it materializes
//! compiled filters as [`Predicate`] trees evaluated directly against
//! [`Job`] records. [`JobStore`] wires the whole pipeline together.
//!
//! ```
//! use jobfilter::engine::{Job, JobStore};
//!
//! let mut store = JobStore::new();
//! let mut job = Job::new(1, "Backend Engineer");
//! job.job_type = "full-time".to_string();
//! store.insert(job);
//!
//! let hits = store.filter("job_type = full-time").unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

mod job;
mod predicate;

pub use job::Job;
pub use predicate::{like_match, Predicate};

use crate::compiler::{
    AttributeCatalog, AttributeType, CompileError, FilterCompiler, GroupBody, QueryTarget,
    RelationRegistry,
};
use crate::error::Result;
use crate::parser::{parse_filter_with_relations, LogicalOp, Operator};
use crate::value::FilterValue;

/// Query target that materializes predicates as a [`Predicate`] tree
///
/// Predicates added at the same nesting depth combine with AND at the
/// root; nested scopes carry the logical kind the compiler requested.
pub struct QueryBuilder {
    attributes: AttributeCatalog,
    children: Vec<Predicate>,
}

impl QueryBuilder {
    pub fn new(attributes: AttributeCatalog) -> Self {
        QueryBuilder {
            attributes,
            children: Vec::new(),
        }
    }

    /// Finish the build, collapsing degenerate grouping
    ///
    /// An untouched builder yields [`Predicate::True`], so an empty
    /// filter matches every record.
    pub fn build(self) -> Predicate {
        Predicate::Group {
            kind: LogicalOp::And,
            children: self.children,
        }
        .simplify()
    }
}

impl QueryTarget for QueryBuilder {
    fn attribute_type(&self, name: &str) -> Option<AttributeType> {
        self.attributes.get(name)
    }

    fn filter_field(
        &mut self,
        field: &str,
        op: Operator,
        value: &FilterValue,
    ) -> std::result::Result<(), CompileError> {
        self.children.push(Predicate::Field {
            field: field.to_string(),
            op,
            value: value.clone(),
        });
        Ok(())
    }

    fn filter_attribute(
        &mut self,
        name: &str,
        ty: AttributeType,
        op: Operator,
        value: &FilterValue,
    ) -> std::result::Result<(), CompileError> {
        self.children.push(Predicate::Attribute {
            name: name.to_string(),
            ty,
            op,
            value: value.clone(),
        });
        Ok(())
    }

    fn filter_relation_exact(
        &mut self,
        relation: &str,
        _field: &str,
        values: &[FilterValue],
    ) -> std::result::Result<(), CompileError> {
        self.children.push(Predicate::RelationExact {
            relation: relation.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn filter_relation_any(
        &mut self,
        relation: &str,
        _field: &str,
        values: &[FilterValue],
    ) -> std::result::Result<(), CompileError> {
        self.children.push(Predicate::RelationAny {
            relation: relation.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    fn filter_relation_exists(&mut self, relation: &str) -> std::result::Result<(), CompileError> {
        self.children.push(Predicate::RelationExists {
            relation: relation.to_string(),
        });
        Ok(())
    }

    fn filter_flag(&mut self, field: &str) -> std::result::Result<(), CompileError> {
        self.children.push(Predicate::Flag {
            field: field.to_string(),
        });
        Ok(())
    }

    fn group(
        &mut self,
        kind: LogicalOp,
        body: &mut GroupBody,
    ) -> std::result::Result<(), CompileError> {
        let mut scope = QueryBuilder::new(self.attributes.clone());
        body(&mut scope)?;
        self.children.push(Predicate::Group {
            kind,
            children: scope.children,
        });
        Ok(())
    }
}

/// In-memory collection of job postings with filter support
pub struct JobStore {
    jobs: Vec<Job>,
    attributes: AttributeCatalog,
    compiler: FilterCompiler,
}

impl JobStore {
    /// A store with the standard relation registry and no attributes
    pub fn new() -> Self {
        Self::with_relations(RelationRegistry::standard())
    }

    pub fn with_relations(relations: RelationRegistry) -> Self {
        JobStore {
            jobs: Vec::new(),
            attributes: AttributeCatalog::new(),
            compiler: FilterCompiler::new(relations),
        }
    }

    /// Declare an EAV attribute and its type
    pub fn declare_attribute(&mut self, name: impl Into<String>, ty: AttributeType) {
        self.attributes.declare(name, ty);
    }

    pub fn insert(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Compile filter text into a predicate without running it
    ///
    /// The parser recognizes exactly the relation names the compiler's
    /// registry knows, so subject classification and lowering agree.
    pub fn compile(&self, filter: &str) -> Result<Predicate> {
        let expr = parse_filter_with_relations(filter, self.compiler.relations().names())?;
        let mut builder = QueryBuilder::new(self.attributes.clone());
        self.compiler.compile(&expr, &mut builder)?;
        Ok(builder.build())
    }

    /// All jobs matching the filter, in insertion order
    pub fn filter(&self, filter: &str) -> Result<Vec<&Job>> {
        let predicate = self.compile(filter)?;
        Ok(self.jobs.iter().filter(|j| predicate.matches(j)).collect())
    }

    /// Published jobs matching the filter, in insertion order
    pub fn published(&self, filter: &str) -> Result<Vec<&Job>> {
        let predicate = self.compile(filter)?;
        Ok(self
            .jobs
            .iter()
            .filter(|j| j.status == "published" && predicate.matches(j))
            .collect())
    }
}

impl Default for JobStore {
    fn default() -> Self {
        JobStore::new()
    }
}
