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

//! # Jobfilter
//!
//! A filter-expression compiler for job posting records. Filter text
//! like
//!
//! ```text
//! (job_type = full-time AND languages HAS_ANY (PHP, Ruby))
//!   OR (locations IS_ANY (New York, Remote) AND attribute:years_experience >= 3)
//! ```
//!
//! is lexed, parsed into an expression tree, and lowered onto an
//! abstract [`QueryTarget`](compiler::QueryTarget). Filters compose
//! conditions on three kinds of subject:
//!
//! - plain fields of the record (`job_type`, `salary_min`, ...)
//! - many-to-many relationships (`languages`, `locations`, `categories`)
//! - dynamic EAV attributes, written with an `attribute:` prefix
//!
//! The crate ships an in-memory [`engine`] that evaluates compiled
//! filters directly; other backends implement
//! [`QueryTarget`](compiler::QueryTarget) themselves. Every stage is
//! fail-fast: malformed input or a semantic error aborts with a typed
//! error instead of silently dropping conditions.
//!
//! ```
//! use jobfilter::engine::{Job, JobStore};
//!
//! let mut store = JobStore::new();
//! let mut job = Job::new(1, "Backend Engineer");
//! job.job_type = "full-time".to_string();
//! job.languages = vec!["PHP".to_string()];
//! store.insert(job);
//!
//! let hits = store
//!     .filter("job_type = full-time AND languages HAS_ANY (PHP, Ruby)")
//!     .unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

pub mod compiler;
pub mod engine;
pub mod error;
pub mod parser;
pub mod value;

pub use compiler::{AttributeCatalog, AttributeType, FilterCompiler, QueryTarget, RelationRegistry};
pub use engine::{Job, JobStore, Predicate};
pub use error::{FilterError, Result};
pub use parser::{parse_filter, parse_filter_with_relations, FilterExpression};
pub use value::FilterValue;
