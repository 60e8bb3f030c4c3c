//! Free-function form of every container operation.
//!
//! These functions hold the actual logic; [`Container`](crate::Container)
//! methods forward to them with the container's own records and accessor.
//! Read operations take any iterator of record references, so they also
//! work on slices, vectors, maps' values, or a chain of sources.
//!
//! ```
//! use sift::{ops, filter, AttrAccessor, Attributes, Value};
//!
//! struct City { name: &'static str, pop: u32 }
//!
//! impl Attributes for City {
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "name" => Some(Value::from(self.name)),
//!             "pop" => Some(Value::from(self.pop)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let cities = [City { name: "Lyon", pop: 520 }, City { name: "Nice", pop: 340 }];
//! let big = ops::first(&cities, &AttrAccessor, &filter! { pop = 520u32 }).unwrap();
//! assert_eq!(big.name, "Lyon");
//! assert_eq!(ops::count(&cities, &AttrAccessor, &filter! { name__not = "Nice" }).unwrap(), 1);
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::accessor::Accessor;
use crate::error::{Result, SiftError};
use crate::filter::Filter;
use crate::grouping::Groups;
use crate::ordering::{compare_rows, compare_values, permute, total_cmp_rows, SortKey};
use crate::stream::{first_position, positions, Search};
use crate::value::{Number, Value};

fn not_found(filter: &Filter) -> SiftError {
    SiftError::NotFound {
        filter: filter.to_string(),
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Returns the lazy stream of records matching `filter`.
pub fn search<'a, I, R, A>(
    records: I,
    accessor: &'a A,
    filter: &Filter,
) -> Result<Search<'a, I::IntoIter, R, A>>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    Search::new(records.into_iter(), accessor, filter)
}

/// Returns the first record matching `filter`.
///
/// Fails with [`SiftError::NotFound`] if nothing matches.
pub fn first<'a, I, R, A>(records: I, accessor: &'a A, filter: &Filter) -> Result<&'a R>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    match search(records, accessor, filter)?.next() {
        Some(found) => found,
        None => Err(not_found(filter)),
    }
}

/// Counts the records matching `filter`.
pub fn count<'a, I, R, A>(records: I, accessor: &'a A, filter: &Filter) -> Result<usize>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    search(records, accessor, filter)?
        .try_fold(0, |n, found| found.map(|_| n + 1))
}

/// Sums `field` over the records matching `filter`.
///
/// Returns `Number::I64(0)` when nothing matches and fails with
/// [`SiftError::NotNumeric`] on the first non-number.
pub fn sum<'a, I, R, A>(
    records: I,
    accessor: &'a A,
    field: &str,
    filter: &Filter,
) -> Result<Number>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    let mut total = Number::I64(0);
    for found in search(records, accessor, filter)? {
        match &*accessor.read(found?, field)? {
            Value::Number(n) => total = total + *n,
            other => {
                return Err(SiftError::NotNumeric {
                    field: field.to_string(),
                    found: other.type_name(),
                })
            }
        }
    }
    Ok(total)
}

/// Distinct values of `field`, in order of first occurrence.
pub fn distinct<'a, I, R, A>(records: I, accessor: &'a A, field: &str) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        let value = accessor.read(record, field)?.into_owned();
        if seen.insert(value.clone()) {
            values.push(value);
        }
    }
    Ok(values)
}

/// Groups records by the value of `field`.
///
/// Keys keep first-occurrence order and each group keeps source order.
pub fn groupby<'a, I, R, A>(
    records: I,
    accessor: &'a A,
    field: &str,
) -> Result<Groups<Vec<&'a R>>>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    let mut groups = Groups::new();
    for record in records {
        let key = accessor.read(record, field)?.into_owned();
        groups.get_or_insert_with(key, Vec::new).push(record);
    }
    Ok(groups)
}

/// Counts how many records hold each value of `field`.
pub fn count_values<'a, I, R, A>(
    records: I,
    accessor: &'a A,
    field: &str,
) -> Result<Groups<usize>>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    let mut counts = Groups::new();
    for record in records {
        let key = accessor.read(record, field)?.into_owned();
        *counts.get_or_insert_with(key, || 0) += 1;
    }
    Ok(counts)
}

/// Clones one record per distinct full record value, first occurrence
/// kept, source order preserved.
///
/// Records are compared with `PartialEq`, so this is quadratic in the
/// number of distinct records.
pub fn unique<'a, I, R>(records: I) -> Vec<R>
where
    I: IntoIterator<Item = &'a R>,
    R: Clone + PartialEq + 'a,
{
    let mut kept: Vec<R> = Vec::new();
    for record in records {
        if !kept.contains(record) {
            kept.push(record.clone());
        }
    }
    kept
}

/// The record with the largest value of `field`; the first one on ties.
pub fn max<'a, I, R, A>(records: I, accessor: &'a A, field: &str) -> Result<&'a R>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    extremum(records, accessor, field, Ordering::Greater)
}

/// The record with the smallest value of `field`; the first one on ties.
pub fn min<'a, I, R, A>(records: I, accessor: &'a A, field: &str) -> Result<&'a R>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    extremum(records, accessor, field, Ordering::Less)
}

fn extremum<'a, I, R, A>(
    records: I,
    accessor: &'a A,
    field: &str,
    wanted: Ordering,
) -> Result<&'a R>
where
    I: IntoIterator<Item = &'a R>,
    R: 'a,
    A: Accessor<R> + ?Sized,
{
    let mut best: Option<(&'a R, Cow<'a, Value>)> = None;
    for record in records {
        let value = accessor.read(record, field)?;
        let replace = match &best {
            None => true,
            Some((_, current)) => {
                compare_values(&value, current)
                    .ok_or_else(|| SiftError::unorderable(field, &value, current))?
                    == wanted
            }
        };
        if replace {
            best = Some((record, value));
        }
    }
    best.map(|(record, _)| record)
        .ok_or_else(|| not_found(&Filter::all()))
}

// ============================================================================
// Mutations
// ============================================================================

fn collect_changes<C, K, V>(changes: C) -> Vec<(String, Value)>
where
    C: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    changes
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn apply_changes<R, A>(record: &mut R, accessor: &A, changes: &[(String, Value)]) -> Result<()>
where
    A: Accessor<R> + ?Sized,
{
    for (field, value) in changes {
        accessor.write(record, field, value.clone())?;
    }
    Ok(())
}

/// Writes `changes` into every record matching `filter`.
///
/// The match set is computed before the first write. Returns the number of
/// records updated; zero matches is not an error.
///
/// Writes are not rolled back. If one fails, the records and fields
/// written before it keep their new values and the error is returned.
pub fn update<R, A, C, K, V>(
    records: &mut [R],
    accessor: &A,
    filter: &Filter,
    changes: C,
) -> Result<usize>
where
    A: Accessor<R> + ?Sized,
    C: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let clauses = filter.compile()?;
    let changes = collect_changes(changes);
    let matched = positions(records, accessor, &clauses)?;
    for &index in &matched {
        apply_changes(&mut records[index], accessor, &changes)?;
    }
    debug!(
        target: "sift::ops",
        matched = matched.len(),
        fields = changes.len(),
        filter = %filter,
        "updated records"
    );
    Ok(matched.len())
}

/// Writes `changes` into the first record matching `filter`.
///
/// Fails with [`SiftError::NotFound`] if nothing matches. As with
/// [`update`], a failed write leaves earlier fields written.
pub fn update_first<R, A, C, K, V>(
    records: &mut [R],
    accessor: &A,
    filter: &Filter,
    changes: C,
) -> Result<()>
where
    A: Accessor<R> + ?Sized,
    C: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let clauses = filter.compile()?;
    let changes = collect_changes(changes);
    let index = first_position(records, accessor, &clauses)?
        .ok_or_else(|| not_found(filter))?;
    apply_changes(&mut records[index], accessor, &changes)?;
    debug!(target: "sift::ops", index, filter = %filter, "updated first match");
    Ok(())
}

/// Removes every record matching `filter`; survivors keep their order.
///
/// Returns the number of records removed.
pub fn delete<R, A>(records: &mut Vec<R>, accessor: &A, filter: &Filter) -> Result<usize>
where
    A: Accessor<R> + ?Sized,
{
    let clauses = filter.compile()?;
    let matched = positions(records, accessor, &clauses)?;
    if matched.is_empty() {
        return Ok(0);
    }

    let mut doomed = vec![false; records.len()];
    for &index in &matched {
        doomed[index] = true;
    }
    let mut doomed = doomed.into_iter();
    records.retain(|_| !doomed.next().unwrap_or(false));

    debug!(target: "sift::ops", removed = matched.len(), filter = %filter, "deleted records");
    Ok(matched.len())
}

/// Removes and returns the first record matching `filter`.
///
/// Fails with [`SiftError::NotFound`] if nothing matches.
pub fn delete_first<R, A>(records: &mut Vec<R>, accessor: &A, filter: &Filter) -> Result<R>
where
    A: Accessor<R> + ?Sized,
{
    let clauses = filter.compile()?;
    let index = first_position(records, accessor, &clauses)?
        .ok_or_else(|| not_found(filter))?;
    debug!(target: "sift::ops", index, filter = %filter, "deleted first match");
    Ok(records.remove(index))
}

/// Appends every record of `other`, in order.
pub fn extend<R, I>(records: &mut Vec<R>, other: I)
where
    I: IntoIterator<Item = R>,
{
    let before = records.len();
    records.extend(other);
    debug!(target: "sift::ops", appended = records.len() - before, "extended records");
}

/// Stable in-place sort by one field or a tuple of fields.
///
/// `reverse` flips the whole comparison; records that compare equal keep
/// their relative order either way. If two key values cannot be ordered the
/// records are left untouched and [`SiftError::Unorderable`] is returned.
pub fn sort<R, A>(records: &mut [R], accessor: &A, key: &SortKey, reverse: bool) -> Result<()>
where
    A: Accessor<R> + ?Sized,
{
    let fields = key.fields();
    let order = {
        let rows = records
            .iter()
            .map(|record| {
                fields
                    .iter()
                    .map(|field| accessor.read(record, field))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut order: Vec<usize> = (0..rows.len()).collect();
        let mut failure = None;
        order.sort_by(|&i, &j| {
            let ordering = match compare_rows(&rows[i], &rows[j], fields) {
                Ok(ordering) => ordering,
                Err(err) => {
                    failure.get_or_insert(err);
                    total_cmp_rows(&rows[i], &rows[j])
                }
            };
            if reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }
        order
    };

    permute(records, order);
    debug!(target: "sift::ops", records = records.len(), ?fields, reverse, "sorted records");
    Ok(())
}
