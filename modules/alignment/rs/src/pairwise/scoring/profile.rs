use std::fmt::Debug;
use std::hash::Hash;

use eyre::{eyre, Result};
use itertools::iproduct;

use super::symbols::Table;

/// One column of an already-built alignment. `None` is a gap inside the
/// profile; the legacy sentinel token stays at the serialization boundary.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Column<T>(Vec<Option<T>>);

impl<T> Column<T> {
    pub fn new(cells: Vec<Option<T>>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Option<T>] {
        &self.0
    }
}

impl<T: Clone + PartialEq> Column<T> {
    /// Reads a column in the legacy convention where `sentinel` marks an
    /// in-profile gap.
    pub fn from_sentinel(tokens: &[T], sentinel: &T) -> Self {
        Self(
            tokens
                .iter()
                .map(|token| {
                    if token == sentinel {
                        None
                    } else {
                        Some(token.clone())
                    }
                })
                .collect(),
        )
    }

    /// Renders the column back into the legacy sentinel convention.
    pub fn to_sentinel(&self, sentinel: &T) -> Vec<T> {
        self.0
            .iter()
            .map(|cell| cell.clone().unwrap_or_else(|| sentinel.clone()))
            .collect()
    }
}

impl<T> FromIterator<Option<T>> for Column<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Scores two profile columns as the mean over their token cross-pairs.
/// Pairs touching an in-profile gap contribute no score but weight the
/// mean by `gap_weight`.
pub fn score_columns<T>(
    a: &Column<T>,
    b: &Column<T>,
    table: &Table<T>,
    gap_weight: f64,
) -> Result<f64>
where
    T: Clone + Eq + Hash + Debug,
{
    let mut score = 0.0;
    let mut counter = 0.0;

    for (x, y) in iproduct!(a.cells(), b.cells()) {
        match (x, y) {
            (Some(x), Some(y)) => {
                score += table
                    .get(x, y)
                    .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", x, y))?;
                counter += 1.0;
            }
            _ => counter += gap_weight,
        }
    }

    // All-gap column pairs with a zero gap weight leave nothing to average.
    if counter == 0.0 {
        return Ok(0.0);
    }
    Ok(score / counter)
}
