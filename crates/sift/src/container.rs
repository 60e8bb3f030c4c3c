//! The record container.
//!
//! [`Container`] owns an ordered `Vec` of records together with the accessor
//! used to read and write their fields. Every operation forwards to the
//! matching function in [`ops`](crate::ops).

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::accessor::{Accessor, AttrAccessor, KeyAccessor};
use crate::error::Result;
use crate::filter::Filter;
use crate::grouping::Groups;
use crate::ops;
use crate::ordering::SortKey;
use crate::stream::Search;
use crate::value::{Document, Number, Value};

/// Container of attribute-bearing records.
pub type ObjectContainer<R> = Container<R, AttrAccessor>;

/// Container of string-keyed documents.
pub type DocumentContainer = Container<Document, KeyAccessor>;

/// Ordered, owned collection of records with query and mutation operations.
///
/// Only [`delete`](Container::delete), [`delete_first`](Container::delete_first)
/// and [`extend`](Container::extend) change the length. Updates write in
/// place and [`sort`](Container::sort) permutes.
///
/// ```
/// use sift::{filter, DocumentContainer, Document, Value};
///
/// let doc = |name: &str, age: i64| -> Document {
///     [("name".to_string(), Value::from(name)), ("age".to_string(), Value::from(age))].into()
/// };
/// let mut people = DocumentContainer::new(vec![doc("Alice", 30), doc("Bob", 25)]);
///
/// assert_eq!(people.count(&filter! { age__not = 25 }).unwrap(), 1);
/// people.update(&filter! { name = "Bob" }, [("age", 26)]).unwrap();
/// assert_eq!(people[1]["age"], Value::from(26));
/// ```
#[derive(Clone)]
pub struct Container<R, A> {
    records: Vec<R>,
    accessor: A,
}

impl<R, A: Default> Container<R, A> {
    /// Takes ownership of `records`.
    pub fn new(records: impl IntoIterator<Item = R>) -> Self {
        Container::with_accessor(records, A::default())
    }

    /// Builds a container from clones of borrowed records.
    ///
    /// Later mutations of the container leave the originals untouched.
    pub fn deep_copy<'r>(records: impl IntoIterator<Item = &'r R>) -> Self
    where
        R: Clone + 'r,
    {
        Container::new(records.into_iter().cloned())
    }
}

impl<R, A> Container<R, A> {
    /// Takes ownership of `records`, reading fields through `accessor`.
    pub fn with_accessor(records: impl IntoIterator<Item = R>, accessor: A) -> Self {
        Container {
            records: records.into_iter().collect(),
            accessor,
        }
    }

    /// The accessor used to read and write fields.
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the container holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index`. Negative indices count from the end,
    /// so `-1` is the last record.
    pub fn get(&self, index: isize) -> Option<&R> {
        let index = self.resolve(index)?;
        Some(&self.records[index])
    }

    /// Mutable variant of [`get`](Container::get).
    pub fn get_mut(&mut self, index: isize) -> Option<&mut R> {
        let index = self.resolve(index)?;
        Some(&mut self.records[index])
    }

    fn resolve(&self, index: isize) -> Option<usize> {
        let index = if index < 0 {
            self.records.len().checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        (index < self.records.len()).then_some(index)
    }

    /// Iterates the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// The records as a slice, in order.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Releases the records.
    pub fn into_inner(self) -> Vec<R> {
        self.records
    }

    /// Appends every record of `other`, which may be another container.
    pub fn extend(&mut self, other: impl IntoIterator<Item = R>) {
        ops::extend(&mut self.records, other);
    }
}

impl<R, A: Accessor<R>> Container<R, A> {
    /// Returns the first record matching `filter`.
    pub fn first(&self, filter: &Filter) -> Result<&R> {
        ops::first(&self.records, &self.accessor, filter)
    }

    /// Returns a lazy stream over the records matching `filter`.
    pub fn search(&self, filter: &Filter) -> Result<Search<'_, std::slice::Iter<'_, R>, R, A>> {
        ops::search(&self.records, &self.accessor, filter)
    }

    /// Counts the records matching `filter`.
    pub fn count(&self, filter: &Filter) -> Result<usize> {
        ops::count(&self.records, &self.accessor, filter)
    }

    /// Sums `field` over the records matching `filter`.
    pub fn sum(&self, field: &str, filter: &Filter) -> Result<Number> {
        ops::sum(&self.records, &self.accessor, field, filter)
    }

    /// Distinct values of `field`, in first-occurrence order.
    pub fn distinct(&self, field: &str) -> Result<Vec<Value>> {
        ops::distinct(&self.records, &self.accessor, field)
    }

    /// Groups the records by `field`, keys in first-occurrence order.
    pub fn groupby(&self, field: &str) -> Result<Groups<Vec<&R>>> {
        ops::groupby(&self.records, &self.accessor, field)
    }

    /// Number of records per value of `field`, keys in first-occurrence
    /// order.
    pub fn count_values(&self, field: &str) -> Result<Groups<usize>> {
        ops::count_values(&self.records, &self.accessor, field)
    }

    /// Record with the largest `field`. Ties return the first.
    pub fn max(&self, field: &str) -> Result<&R> {
        ops::max(&self.records, &self.accessor, field)
    }

    /// Record with the smallest `field`. Ties return the first.
    pub fn min(&self, field: &str) -> Result<&R> {
        ops::min(&self.records, &self.accessor, field)
    }

    /// Sorts in place by `key`. See [`ops::sort`].
    pub fn sort(&mut self, key: impl Into<SortKey>, reverse: bool) -> Result<()> {
        ops::sort(&mut self.records, &self.accessor, &key.into(), reverse)
    }

    /// Writes `changes` into every record matching `filter` and returns how
    /// many records were updated.
    ///
    /// Writes are not rolled back. If one fails, the fields already written
    /// keep their new values and the error is returned.
    pub fn update<C, K, V>(&mut self, filter: &Filter, changes: C) -> Result<usize>
    where
        C: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        ops::update(&mut self.records, &self.accessor, filter, changes)
    }

    /// Writes `changes` into the first record matching `filter`, failing
    /// with [`NotFound`](crate::SiftError::NotFound) when there is none.
    pub fn update_first<C, K, V>(&mut self, filter: &Filter, changes: C) -> Result<()>
    where
        C: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        ops::update_first(&mut self.records, &self.accessor, filter, changes)
    }

    /// Removes every record matching `filter` and returns how many went.
    pub fn delete(&mut self, filter: &Filter) -> Result<usize> {
        ops::delete(&mut self.records, &self.accessor, filter)
    }

    /// Removes and returns the first record matching `filter`, failing
    /// with [`NotFound`](crate::SiftError::NotFound) when there is none.
    pub fn delete_first(&mut self, filter: &Filter) -> Result<R> {
        ops::delete_first(&mut self.records, &self.accessor, filter)
    }
}

impl<R: Clone + PartialEq, A: Clone> Container<R, A> {
    /// New container holding one clone per distinct record, first
    /// occurrence kept. `self` is left as it was.
    pub fn unique(&self) -> Self {
        Container::with_accessor(ops::unique(&self.records), self.accessor.clone())
    }
}

impl<R, A: Default> Default for Container<R, A> {
    fn default() -> Self {
        Container::new(Vec::new())
    }
}

impl<R, A: Default> FromIterator<R> for Container<R, A> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Container::new(iter)
    }
}

impl<R: fmt::Debug, A> fmt::Debug for Container<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.records).finish()
    }
}

/// Containers are equal when they hold equal records in the same order,
/// whatever their accessors.
impl<R: PartialEq, A, B> PartialEq<Container<R, B>> for Container<R, A> {
    fn eq(&self, other: &Container<R, B>) -> bool {
        self.records == other.records
    }
}

impl<R, A> Index<usize> for Container<R, A> {
    type Output = R;

    fn index(&self, index: usize) -> &R {
        &self.records[index]
    }
}

impl<R, A> IndexMut<usize> for Container<R, A> {
    fn index_mut(&mut self, index: usize) -> &mut R {
        &mut self.records[index]
    }
}

impl<R, A> IntoIterator for Container<R, A> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R, A> IntoIterator for &'a Container<R, A> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
