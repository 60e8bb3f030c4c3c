//! Lazy filter stream.
//!
//! [`Search`] walks a source iterator and yields the records matching a
//! compiled filter, one at a time. It borrows the source, so the records
//! cannot change underneath it; every new search starts a fresh pass.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::accessor::Accessor;
use crate::clause::{matches_all, Clause};
use crate::error::Result;
use crate::filter::Filter;

/// Single-pass iterator over the records matching a filter.
///
/// Items are `Result`s because reading a field can fail. After an error has
/// been yielded the stream is exhausted.
pub struct Search<'a, I, R, A: ?Sized> {
    source: I,
    accessor: &'a A,
    clauses: Vec<Clause>,
    done: bool,
    _record: PhantomData<fn() -> &'a R>,
}

impl<'a, I, R, A> Search<'a, I, R, A>
where
    I: Iterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    /// Compiles `filter` and prepares a stream over `source`.
    ///
    /// Compilation errors surface here, before any record is read.
    pub fn new(source: I, accessor: &'a A, filter: &Filter) -> Result<Self> {
        Ok(Search::with_clauses(source, accessor, filter.compile()?))
    }

    /// Prepares a stream from already compiled clauses.
    pub fn with_clauses(source: I, accessor: &'a A, clauses: Vec<Clause>) -> Self {
        Search {
            source,
            accessor,
            clauses,
            done: false,
            _record: PhantomData,
        }
    }

    /// The clauses this stream tests against.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Drains the stream into a vector, stopping at the first error.
    pub fn try_collect(self) -> Result<Vec<&'a R>> {
        self.collect()
    }
}

impl<'a, I, R, A> Iterator for Search<'a, I, R, A>
where
    I: Iterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    type Item = Result<&'a R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for record in self.source.by_ref() {
            match matches_all(record, self.accessor, &self.clauses) {
                Ok(true) => return Some(Ok(record)),
                Ok(false) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        self.done = true;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.source.size_hint().1)
        }
    }
}

impl<'a, I, R, A> FusedIterator for Search<'a, I, R, A>
where
    I: Iterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
}

/// Indices of every record matching `clauses`, in source order.
///
/// Mutations work from this list so the full match set is known before
/// the first record changes.
pub(crate) fn positions<R, A>(
    records: &[R],
    accessor: &A,
    clauses: &[Clause],
) -> Result<Vec<usize>>
where
    A: Accessor<R> + ?Sized,
{
    let mut matched = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if matches_all(record, accessor, clauses)? {
            matched.push(index);
        }
    }
    Ok(matched)
}

/// Index of the first record matching `clauses`.
pub(crate) fn first_position<R, A>(
    records: &[R],
    accessor: &A,
    clauses: &[Clause],
) -> Result<Option<usize>>
where
    A: Accessor<R> + ?Sized,
{
    for (index, record) in records.iter().enumerate() {
        if matches_all(record, accessor, clauses)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}
