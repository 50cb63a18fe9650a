//! Reversible, field-based row ordering.
//!
//! Ordering is the three-way `(a > b) - (b > a)` over the extracted key,
//! flipped for descending. Sorting goes through `slice::sort_by`, which is
//! stable, so rows with equal keys keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Job, JobField};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// `(a > b) - (b > a)` as an `Ordering`. Values that are not comparable tie.
pub fn three_way<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    if a > b {
        Ordering::Greater
    } else if b > a {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// Compares two rows by a projected key (the "primer") in the given direction.
pub fn compare_by<'a, T, K, F>(a: &'a T, b: &'a T, key: F, direction: SortDirection) -> Ordering
where
    K: PartialOrd,
    F: Fn(&'a T) -> K,
{
    let ordering = three_way(&key(a), &key(b));
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Compares two jobs on one column. Rows missing the value sort first;
/// numbers compare by value and sort before text.
pub fn compare(a: &Job, b: &Job, field: JobField, direction: SortDirection) -> Ordering {
    compare_by(a, b, |job| job.field(field), direction)
}

/// Stable in-place sort of jobs on one column.
pub fn sort_jobs(rows: &mut [Job], field: JobField, direction: SortDirection) {
    rows.sort_by(|a, b| compare(a, b, field, direction));
}
