//! Filter expressions and their compilation into clauses.
//!
//! A [`Filter`] carries the criteria exactly as the caller gave them: an
//! explicit mapping, named arguments, or neither. [`Filter::compile`]
//! normalizes that into a list of [`Clause`]s joined by AND.

use std::fmt;

use tracing::trace;

use crate::clause::Clause;
use crate::error::{Result, SiftError};
use crate::op::Op;
use crate::value::{Document, Value};

/// Match criteria for a search or mutation.
///
/// There are two equivalent ways to spell the same criteria, and they
/// cannot be mixed:
///
/// ```
/// use sift::{filter, Filter, SiftError};
///
/// let by_mapping = Filter::mapping([("name", "Alice")]);
/// let by_args = filter! { name = "Alice" };
/// assert_eq!(by_mapping.compile(), by_args.compile());
///
/// let mixed = Filter::mapping([("name", "Alice")]).arg("name", "Alice");
/// assert_eq!(mixed.compile(), Err(SiftError::AmbiguousQuery));
/// ```
///
/// Keys may end in `__not` to negate the clause: `filter! { age__not = 25 }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    explicit: Vec<(String, Value)>,
    named: Vec<(String, Value)>,
}

impl Filter {
    /// The empty filter. Matches every record.
    pub fn all() -> Self {
        Filter::default()
    }

    /// Builds a filter from an explicit mapping of keys to expected values.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Filter {
            explicit: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            named: Vec::new(),
        }
    }

    /// Adds one named argument.
    ///
    /// This is the keyword-style shorthand; the [`filter!`](crate::filter)
    /// macro expands to a chain of these calls.
    pub fn arg(mut self, key: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.named.push((key.into(), expected.into()));
        self
    }

    /// Returns `true` if neither a mapping nor named arguments were given.
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.named.is_empty()
    }

    /// Compiles the criteria into clauses.
    ///
    /// Fails with [`SiftError::AmbiguousQuery`] when both the mapping and the
    /// named arguments are non-empty.
    pub fn compile(&self) -> Result<Vec<Clause>> {
        let entries = match (self.explicit.is_empty(), self.named.is_empty()) {
            (false, false) => return Err(SiftError::AmbiguousQuery),
            (false, true) => &self.explicit,
            (true, _) => &self.named,
        };

        let clauses: Vec<Clause> = entries
            .iter()
            .map(|(key, expected)| {
                let (field, op) = Op::parse_key(key);
                Clause::new(field, op, expected.clone())
            })
            .collect();

        trace!(target: "sift::filter", clauses = clauses.len(), filter = %self, "compiled filter");
        Ok(clauses)
    }

    fn entries(&self) -> impl Iterator<Item = &(String, Value)> {
        self.explicit.iter().chain(self.named.iter())
    }
}

impl From<Document> for Filter {
    fn from(doc: Document) -> Self {
        Filter::mapping(doc)
    }
}

impl From<&Document> for Filter {
    fn from(doc: &Document) -> Self {
        Filter::mapping(doc.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, expected)) in self.entries().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {expected}")?;
        }
        write!(f, "}}")
    }
}

/// Builds a [`Filter`] from named arguments.
///
/// ```
/// use sift::{filter, Filter};
///
/// let f = filter! { name = "Alice", tags__not = "spam" };
/// assert_eq!(f, Filter::all().arg("name", "Alice").arg("tags__not", "spam"));
/// assert!(filter!().is_empty());
/// ```
#[macro_export]
macro_rules! filter {
    () => {
        $crate::Filter::all()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        $crate::Filter::all()$(.arg(stringify!($key), $value))+
    };
}
