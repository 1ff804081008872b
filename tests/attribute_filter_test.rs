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

//! EAV attribute predicate semantics on the in-memory store

use jobfilter::compiler::{AttributeType, CompileError};
use jobfilter::engine::{Job, JobStore};
use jobfilter::FilterError;

fn setup_store() -> JobStore {
    let mut store = JobStore::new();
    store.declare_attribute("years_experience", AttributeType::Number);
    store.declare_attribute("urgent", AttributeType::Boolean);
    store.declare_attribute("start_date", AttributeType::Date);
    store.declare_attribute("seniority", AttributeType::Select);
    store.declare_attribute("notes", AttributeType::Text);

    let mut a = Job::new(1, "Backend Engineer");
    a.set_attribute("years_experience", "5")
        .set_attribute("urgent", "1")
        .set_attribute("start_date", "2024-06-15")
        .set_attribute("seniority", "senior")
        .set_attribute("notes", "team lead experience required");
    store.insert(a);

    let mut b = Job::new(2, "Junior Developer");
    b.set_attribute("years_experience", "1")
        .set_attribute("urgent", "false")
        .set_attribute("start_date", "2023-11-01")
        .set_attribute("seniority", "junior");
    store.insert(b);

    // No attribute rows at all
    store.insert(Job::new(3, "Mystery Role"));

    store
}

fn ids(store: &JobStore, filter: &str) -> Vec<u64> {
    store
        .filter(filter)
        .expect("filter should run")
        .iter()
        .map(|j| j.id)
        .collect()
}

#[test]
fn test_number_comparisons() {
    let store = setup_store();
    assert_eq!(ids(&store, "attribute:years_experience >= 3"), vec![1]);
    assert_eq!(ids(&store, "attribute:years_experience < 3"), vec![2]);
    assert_eq!(ids(&store, "attribute:years_experience = 5"), vec![1]);
    assert_eq!(ids(&store, "attribute:years_experience != 5"), vec![2]);
}

#[test]
fn test_number_rejects_text_operand() {
    let store = setup_store();
    let err = store.filter("attribute:years_experience > plenty").unwrap_err();
    assert!(matches!(
        err,
        FilterError::Compile(CompileError::TypeMismatch(_))
    ));
}

#[test]
fn test_boolean_truthy_spellings() {
    let store = setup_store();
    // Stored "1" and operand "yes" both read as true
    assert_eq!(ids(&store, "attribute:urgent = yes"), vec![1]);
    assert_eq!(ids(&store, "attribute:urgent = true"), vec![1]);
    assert_eq!(ids(&store, "attribute:urgent = 1"), vec![1]);
    assert_eq!(ids(&store, "attribute:urgent = false"), vec![2]);
}

#[test]
fn test_boolean_ignores_operator() {
    let store = setup_store();
    // Any comparison on a boolean attribute is an equality check
    assert_eq!(ids(&store, "attribute:urgent >= true"), vec![1]);
}

#[test]
fn test_date_comparisons() {
    let store = setup_store();
    assert_eq!(ids(&store, "attribute:start_date >= '2024-01-01'"), vec![1]);
    assert_eq!(ids(&store, "attribute:start_date < '2024-01-01'"), vec![2]);
    assert_eq!(ids(&store, "attribute:start_date = '2024-06-15'"), vec![1]);
}

#[test]
fn test_date_rejects_malformed_operand() {
    let store = setup_store();
    let err = store.filter("attribute:start_date >= 'soonish'").unwrap_err();
    assert!(matches!(
        err,
        FilterError::Compile(CompileError::TypeMismatch(_))
    ));
}

#[test]
fn test_select_equality_and_membership() {
    let store = setup_store();
    assert_eq!(ids(&store, "attribute:seniority = senior"), vec![1]);
    assert_eq!(
        ids(&store, "attribute:seniority IN (junior, senior)"),
        vec![1, 2]
    );
    assert_eq!(ids(&store, "attribute:seniority NOT IN (junior)"), vec![1]);
}

#[test]
fn test_text_like_containment() {
    let store = setup_store();
    assert_eq!(ids(&store, "attribute:notes LIKE lead"), vec![1]);
    assert!(ids(&store, "attribute:notes LIKE astronaut").is_empty());
}

#[test]
fn test_missing_attribute_row_never_matches() {
    let store = setup_store();
    // Job 3 has no rows; it matches neither polarity
    assert!(!ids(&store, "attribute:urgent = true").contains(&3));
    assert!(!ids(&store, "attribute:urgent = false").contains(&3));
    assert!(!ids(&store, "attribute:years_experience != 99").contains(&3));
}

#[test]
fn test_unknown_attribute_fails_fast() {
    let store = setup_store();
    let err = store.filter("attribute:nonexistent = 1").unwrap_err();
    match err {
        FilterError::Compile(CompileError::UnknownAttribute(name)) => {
            assert_eq!(name, "nonexistent");
        }
        other => panic!("expected unknown attribute, got {:?}", other),
    }
}

#[test]
fn test_attributes_compose_with_relationships() {
    let mut store = JobStore::new();
    store.declare_attribute("years_experience", AttributeType::Number);

    let mut a = Job::new(1, "Backend Engineer");
    a.languages = vec!["PHP".to_string()];
    a.set_attribute("years_experience", "5");
    store.insert(a);

    let mut b = Job::new(2, "Junior Developer");
    b.languages = vec!["PHP".to_string()];
    b.set_attribute("years_experience", "1");
    store.insert(b);

    assert_eq!(
        ids(
            &store,
            "languages HAS_ANY (PHP) AND attribute:years_experience >= 3"
        ),
        vec![1]
    );
}
