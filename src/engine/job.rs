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

//! Job posting record

use crate::value::FilterValue;
use rustc_hash::FxHashMap;

/// A job posting with scalar fields, related entity sets, and dynamic
/// EAV attributes keyed by name.
///
/// Attribute values are stored as text regardless of declared type; the
/// predicate evaluator interprets them per the attribute catalog.
#[derive(Debug, Clone, Default)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub salary_min: f64,
    pub salary_max: f64,
    pub is_remote: bool,
    pub job_type: String,
    pub status: String,
    pub published_at: Option<String>,
    pub languages: Vec<String>,
    pub locations: Vec<String>,
    pub categories: Vec<String>,
    pub attributes: FxHashMap<String, String>,
}

impl Job {
    pub fn new(id: u64, title: &str) -> Self {
        Job {
            id,
            title: title.to_string(),
            status: "published".to_string(),
            ..Default::default()
        }
    }

    /// Read a scalar field by name, or `None` for an unknown field
    pub fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(FilterValue::Number(self.id as f64)),
            "title" => Some(FilterValue::Text(self.title.clone())),
            "description" => Some(FilterValue::Text(self.description.clone())),
            "company_name" => Some(FilterValue::Text(self.company_name.clone())),
            "salary_min" => Some(FilterValue::Number(self.salary_min)),
            "salary_max" => Some(FilterValue::Number(self.salary_max)),
            "is_remote" => Some(FilterValue::Bool(self.is_remote)),
            "job_type" => Some(FilterValue::Text(self.job_type.clone())),
            "status" => Some(FilterValue::Text(self.status.clone())),
            "published_at" => self
                .published_at
                .as_ref()
                .map(|d| FilterValue::Text(d.clone())),
            _ => None,
        }
    }

    /// Read a boolean flag field; unknown flags are false
    pub fn flag(&self, name: &str) -> bool {
        match name {
            "is_remote" => self.is_remote,
            _ => false,
        }
    }

    /// The related value set for a relation, or `None` for an unknown one
    pub fn relation_values(&self, relation: &str) -> Option<&[String]> {
        match relation {
            "languages" => Some(&self.languages),
            "locations" => Some(&self.locations),
            "categories" => Some(&self.categories),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let mut job = Job::new(7, "Backend Engineer");
        job.salary_min = 60000.0;
        job.is_remote = true;

        assert_eq!(
            job.field("title"),
            Some(FilterValue::Text("Backend Engineer".to_string()))
        );
        assert_eq!(job.field("salary_min"), Some(FilterValue::Number(60000.0)));
        assert_eq!(job.field("is_remote"), Some(FilterValue::Bool(true)));
        assert_eq!(job.field("nonexistent"), None);
    }

    #[test]
    fn test_published_at_absent() {
        let job = Job::new(1, "Intern");
        assert_eq!(job.field("published_at"), None);
    }

    #[test]
    fn test_relation_values() {
        let mut job = Job::new(2, "Polyglot");
        job.languages = vec!["PHP".to_string(), "Ruby".to_string()];
        assert_eq!(
            job.relation_values("languages"),
            Some(&["PHP".to_string(), "Ruby".to_string()][..])
        );
        assert_eq!(job.relation_values("tags"), None);
    }
}
