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

//! Filter value model
//!
//! Values carry the coerced form of literals from filter text. Coercion
//! happens once, at parse time, so the compiler and evaluators work with
//! typed values instead of re-reading strings.

use crate::parser::Literal;
use std::cmp::Ordering;
use std::fmt;

/// A coerced operand value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Bool(bool),
    Text(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Numeric reading of this value: numbers directly, text if it
    /// parses as a number. Bools and lists have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) if is_numeric_text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FilterValue::List(_))
    }

    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            FilterValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Total ordering: numeric when both sides read as numbers,
    /// rendered-text ordering otherwise.
    pub fn compare(&self, other: &FilterValue) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => compare_floats(a, b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }

    /// Equality with the same numeric looseness as [`compare`], so
    /// `Number(3.0)` equals `Text("3")`.
    ///
    /// [`compare`]: FilterValue::compare
    pub fn loosely_equals(&self, other: &FilterValue) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// NaN sorts after every real number; two NaNs are equal
fn compare_floats(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Ordering::Equal,
        },
    }
}

/// Coerce a lexed literal into a typed value
///
/// Coercion is total: quoted text stays text verbatim, number literals
/// parse, bare words become booleans or numbers when they read as such
/// and text otherwise, and lists coerce per element.
pub fn coerce(literal: &Literal) -> FilterValue {
    match literal {
        Literal::Quoted(s) => FilterValue::Text(s.clone()),
        Literal::Number(s) => match s.parse::<f64>() {
            Ok(n) => FilterValue::Number(n),
            Err(_) => FilterValue::Text(s.clone()),
        },
        Literal::Word(s) => {
            // Boolean spellings coerce case-insensitively: TRUE, True, true
            if s.eq_ignore_ascii_case("true") {
                FilterValue::Bool(true)
            } else if s.eq_ignore_ascii_case("false") {
                FilterValue::Bool(false)
            } else if is_numeric_text(s) {
                match s.parse::<f64>() {
                    Ok(n) => FilterValue::Number(n),
                    Err(_) => FilterValue::Text(s.clone()),
                }
            } else {
                FilterValue::Text(s.clone())
            }
        }
        Literal::List(items) => FilterValue::List(items.iter().map(coerce).collect()),
    }
}

/// Decimal number shape: optional sign, digits, optional fraction.
/// Rejects the exotic forms `f64::parse` accepts, like `inf` and `1e3`.
fn is_numeric_text(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    if s.is_empty() {
        return false;
    }
    let mut parts = s.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next();
    if whole.is_empty() && frac.map_or(true, str::is_empty) {
        return false;
    }
    whole.chars().all(|c| c.is_ascii_digit())
        && frac.map_or(true, |p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_bare_word_number() {
        assert_eq!(
            coerce(&Literal::Word("42.0".to_string())),
            FilterValue::Number(42.0)
        );
        assert_eq!(
            coerce(&Literal::Word("-5".to_string())),
            FilterValue::Number(-5.0)
        );
    }

    #[test]
    fn test_coerce_quoted_number_stays_text() {
        assert_eq!(
            coerce(&Literal::Quoted("42".to_string())),
            FilterValue::Text("42".to_string())
        );
    }

    #[test]
    fn test_coerce_word_stays_text() {
        assert_eq!(
            coerce(&Literal::Word("full-time".to_string())),
            FilterValue::Text("full-time".to_string())
        );
    }

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce(&Literal::Word("true".to_string())), FilterValue::Bool(true));
        assert_eq!(coerce(&Literal::Word("false".to_string())), FilterValue::Bool(false));
    }

    #[test]
    fn test_coerce_booleans_case_insensitive() {
        assert_eq!(coerce(&Literal::Word("TRUE".to_string())), FilterValue::Bool(true));
        assert_eq!(coerce(&Literal::Word("False".to_string())), FilterValue::Bool(false));
        // Quoting suppresses coercion as usual
        assert_eq!(
            coerce(&Literal::Quoted("TRUE".to_string())),
            FilterValue::Text("TRUE".to_string())
        );
    }

    #[test]
    fn test_coerce_list_elementwise() {
        let lit = Literal::List(vec![
            Literal::Word("3".to_string()),
            Literal::Quoted("New York".to_string()),
        ]);
        assert_eq!(
            coerce(&lit),
            FilterValue::List(vec![
                FilterValue::Number(3.0),
                FilterValue::Text("New York".to_string()),
            ])
        );
    }

    #[test]
    fn test_loose_equality_across_forms() {
        assert!(FilterValue::Number(3.0).loosely_equals(&FilterValue::Text("3".to_string())));
        assert!(!FilterValue::Number(3.0).loosely_equals(&FilterValue::Text("4".to_string())));
        assert!(FilterValue::Text("PHP".to_string())
            .loosely_equals(&FilterValue::Text("PHP".to_string())));
    }

    #[test]
    fn test_compare_numeric_vs_textual() {
        assert_eq!(
            FilterValue::Number(9.0).compare(&FilterValue::Number(10.0)),
            Ordering::Less
        );
        // Textual ordering when either side is non-numeric
        assert_eq!(
            FilterValue::Text("9".to_string()).compare(&FilterValue::Text("abc".to_string())),
            Ordering::Less
        );
    }

    #[test]
    fn test_is_numeric_text_shapes() {
        assert!(is_numeric_text("42"));
        assert!(is_numeric_text("42.5"));
        assert!(is_numeric_text("-7"));
        assert!(!is_numeric_text("1e3"));
        assert!(!is_numeric_text("inf"));
        assert!(!is_numeric_text("4.2.1"));
        assert!(!is_numeric_text(""));
        assert!(!is_numeric_text("."));
    }

    #[test]
    fn test_display_integral_number() {
        assert_eq!(FilterValue::Number(50000.0).to_string(), "50000");
        assert_eq!(FilterValue::Number(2.5).to_string(), "2.5");
    }
}
