//! Clause types for query predicates.
//!
//! A [`Clause`] represents a single compiled filter predicate: a field name,
//! an operator, and the expected value.

use crate::accessor::Accessor;
use crate::error::Result;
use crate::op::Op;
use crate::value::Value;

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use sift::{Clause, Op, Value};
///
/// let clause = Clause::new("tags", Op::Not, "spam");
/// assert!(clause.matches(&Value::from(vec!["ham", "eggs"])));
/// assert!(!clause.matches(&Value::from(vec!["spam", "eggs"])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The field name to read.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub expected: Value,
}

impl Clause {
    /// Creates a new clause.
    pub fn new(field: impl Into<String>, op: Op, expected: impl Into<Value>) -> Self {
        Clause {
            field: field.into(),
            op,
            expected: expected.into(),
        }
    }

    /// Evaluates this clause against the value read from a record.
    ///
    /// A list field is searched for `expected` as one item, even when
    /// `expected` is itself a list. A scalar field is compared by equality,
    /// except that `Not` against a list of alternatives excludes every
    /// alternative.
    pub fn matches(&self, actual: &Value) -> bool {
        match (actual, &self.expected, self.op) {
            (Value::List(_), expected, Op::Eq) => actual.contains(expected),
            (Value::List(_), expected, Op::Not) => !actual.contains(expected),
            (actual, Value::List(alternatives), Op::Not) => !alternatives.contains(actual),
            (actual, expected, Op::Eq) => actual == expected,
            (actual, expected, Op::Not) => actual != expected,
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.op {
            Op::Eq => write!(f, "{} = {}", self.field, self.expected),
            Op::Not => write!(f, "{} != {}", self.field, self.expected),
        }
    }
}

/// Tests a record against every clause, stopping at the first miss.
///
/// Read errors from the accessor are returned as-is.
pub fn matches_all<R, A>(record: &R, accessor: &A, clauses: &[Clause]) -> Result<bool>
where
    A: Accessor<R> + ?Sized,
{
    for clause in clauses {
        let actual = accessor.read(record, &clause.field)?;
        if !clause.matches(&actual) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::KeyAccessor;
    use crate::error::SiftError;
    use crate::value::Document;

    #[test]
    fn scalar_eq() {
        let clause = Clause::new("name", Op::Eq, "hello");
        assert!(clause.matches(&Value::from("hello")));
        assert!(!clause.matches(&Value::from("world")));
        assert!(!clause.matches(&Value::from("Hello"))); // case sensitive
    }

    #[test]
    fn scalar_not() {
        let clause = Clause::new("age", Op::Not, 25);
        assert!(!clause.matches(&Value::from(25)));
        assert!(clause.matches(&Value::from(30)));
    }

    #[test]
    fn type_mismatch_is_unequal() {
        let clause = Clause::new("age", Op::Eq, "25");
        assert!(!clause.matches(&Value::from(25)));
        let clause = Clause::new("age", Op::Not, "25");
        assert!(clause.matches(&Value::from(25)));
    }

    #[test]
    fn list_field_eq_is_membership() {
        let clause = Clause::new("tags", Op::Eq, "smart");
        assert!(clause.matches(&Value::from(vec!["friendly", "smart"])));
        assert!(!clause.matches(&Value::from(vec!["friendly"])));
    }

    #[test]
    fn list_field_not_is_non_membership() {
        let clause = Clause::new("tags", Op::Not, "smart");
        assert!(!clause.matches(&Value::from(vec!["friendly", "smart"])));
        assert!(clause.matches(&Value::from(vec!["friendly"])));
    }

    #[test]
    fn list_expected_against_list_field_is_one_candidate() {
        let nested = Value::List(vec![Value::from(vec!["a", "b"]), Value::from("c")]);
        let clause = Clause::new("pairs", Op::Eq, vec!["a", "b"]);
        assert!(clause.matches(&nested));
        // Not a subset test
        assert!(!clause.matches(&Value::from(vec!["a", "b", "c"])));

        let clause = Clause::new("pairs", Op::Not, vec!["a", "b"]);
        assert!(!clause.matches(&nested));
        assert!(clause.matches(&Value::from(vec!["a", "b", "c"])));
    }

    #[test]
    fn list_expected_against_scalar_field() {
        let clause = Clause::new("name", Op::Eq, vec!["alice", "charlie"]);
        assert!(!clause.matches(&Value::from("alice")));

        let clause = Clause::new("name", Op::Not, vec!["alice", "charlie"]);
        assert!(!clause.matches(&Value::from("alice")));
        assert!(!clause.matches(&Value::from("charlie")));
        assert!(clause.matches(&Value::from("bob")));
    }

    #[test]
    fn matches_all_short_circuits_before_missing_field() {
        let doc: Document = [("name".to_string(), Value::from("Bob"))].into();
        let clauses = vec![
            Clause::new("name", Op::Eq, "Alice"),
            Clause::new("age", Op::Eq, 30),
        ];
        assert_eq!(matches_all(&doc, &KeyAccessor, &clauses), Ok(false));
    }

    #[test]
    fn matches_all_propagates_read_errors() {
        let doc: Document = [("name".to_string(), Value::from("Alice"))].into();
        let clauses = vec![
            Clause::new("name", Op::Eq, "Alice"),
            Clause::new("age", Op::Eq, 30),
        ];
        assert_eq!(
            matches_all(&doc, &KeyAccessor, &clauses),
            Err(SiftError::MissingKey {
                key: "age".to_string()
            })
        );
    }

    #[test]
    fn empty_clauses_match_everything() {
        let doc = Document::new();
        assert_eq!(matches_all(&doc, &KeyAccessor, &[]), Ok(true));
    }

    #[test]
    fn clause_display() {
        assert_eq!(Clause::new("age", Op::Not, 3).to_string(), "age != 3");
        assert_eq!(Clause::new("name", Op::Eq, "x").to_string(), "name = \"x\"");
    }
}
