//! Sift - query and mutation engine for ordered in-memory record collections.
//!
//! Sift works on two record shapes with one algorithm:
//!
//! - documents: string-keyed [`Document`] maps, read through [`KeyAccessor`]
//! - objects: any struct implementing [`Attributes`], read through
//!   [`AttrAccessor`]
//!
//! A [`Container`] owns the records and offers searching, counting,
//! summing, grouping, sorting, deduplication, and in-place update and
//! delete. The same operations exist as free functions in [`ops`] for
//! callers that keep their records elsewhere.
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{filter, Document, DocumentContainer, Filter, Number, SiftError, Value};
//!
//! let doc = |name: &str, age: i64, money: i64| -> Document {
//!     [
//!         ("name".to_string(), Value::from(name)),
//!         ("age".to_string(), Value::from(age)),
//!         ("money".to_string(), Value::from(money)),
//!     ]
//!     .into()
//! };
//!
//! let mut people = DocumentContainer::new(vec![
//!     doc("Alice", 30, 40),
//!     doc("Bob", 25, 30),
//!     doc("Charlie", 35, 25),
//! ]);
//!
//! // Named arguments and explicit mappings spell the same filter
//! assert_eq!(people.first(&filter! { name = "Bob" }).unwrap()["age"], Value::from(25));
//! assert_eq!(people.count(&Filter::mapping([("age__not", 25)])).unwrap(), 2);
//! assert_eq!(people.sum("money", &Filter::all()).unwrap(), Number::I64(95));
//!
//! // Mutations report how many records they touched
//! assert_eq!(people.update(&filter! { name = "Bob" }, [("age", 26)]).unwrap(), 1);
//! assert_eq!(people.delete(&filter! { age = 35 }).unwrap(), 1);
//! assert!(matches!(
//!     people.delete_first(&filter! { name = "Charlie" }),
//!     Err(SiftError::NotFound { .. })
//! ));
//!
//! people.sort("age", false).unwrap();
//! assert_eq!(people[0]["name"], Value::from("Bob"));
//! ```
//!
//! # Filter Semantics
//!
//! A filter is a conjunction of clauses. Each key names a field, optionally
//! followed by the `__not` tag:
//!
//! | Field value | `field = x` | `field__not = x` |
//! |-------------|-------------|------------------|
//! | scalar | equal to `x` | not equal to `x` |
//! | scalar, `x` a list | equal to the list (never) | not one of the items of `x` |
//! | list | contains `x` | does not contain `x` |
//!
//! A filter may be given as an explicit mapping or as named arguments, but
//! not both; mixing them fails with [`SiftError::AmbiguousQuery`].
//!
//! # Logging
//!
//! Mutations emit `tracing` events under the `sift::ops` target and filter
//! compilation under `sift::filter`. No subscriber is installed.

mod accessor;
mod clause;
mod container;
mod error;
mod filter;
mod grouping;
mod op;
pub mod ops;
mod ordering;
mod stream;
mod value;

// Re-export public API
pub use accessor::{Accessor, AttrAccessor, Attributes, KeyAccessor};
pub use clause::{matches_all, Clause};
pub use container::{Container, DocumentContainer, ObjectContainer};
pub use error::{Result, SiftError};
pub use filter::Filter;
pub use grouping::Groups;
pub use op::Op;
pub use ordering::{compare_values, SortKey};
pub use stream::Search;
pub use value::{Document, Number, Value};
