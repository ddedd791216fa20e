use std::fmt;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// One position of an aligned sequence: a consumed token or a gap.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Slot<T> {
    Gap,
    Token(T),
}

impl<T> Slot<T> {
    /// Returns the token unless the slot is a gap.
    pub fn token(&self) -> Option<&T> {
        match self {
            Slot::Gap => None,
            Slot::Token(token) => Some(token),
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Slot::Gap)
    }
}

impl<T: fmt::Display> fmt::Display for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Gap => f.write_str("-"),
            Slot::Token(token) => token.fmt(f),
        }
    }
}

/// One side of a pairwise alignment. The flanks are populated in local mode
/// only; everywhere else the core spans the whole sequence.
#[derive(Clone, Eq, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct Aligned<T> {
    /// Unaligned tokens before the aligned region.
    prefix: Vec<T>,
    /// The aligned region itself.
    slots: Vec<Slot<T>>,
    /// Unaligned tokens after the aligned region.
    suffix: Vec<T>,
}

impl<T> Aligned<T> {
    pub(crate) fn core(slots: Vec<Slot<T>>) -> Self {
        Self {
            prefix: Vec::new(),
            slots,
            suffix: Vec::new(),
        }
    }

    /// Number of gap slots in the aligned region.
    pub fn gaps(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_gap()).count()
    }
}

impl<T: Clone> Aligned<T> {
    /// The aligned region with gaps stripped.
    pub fn tokens(&self) -> Vec<T> {
        self.slots
            .iter()
            .filter_map(|slot| slot.token().cloned())
            .collect()
    }
}

/// A scored pairwise alignment. `distance` is populated only when the caller
/// asked for the normalized distance.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct AlignedPair<T> {
    a: Aligned<T>,
    b: Aligned<T>,
    score: f64,
    #[getter(skip)]
    distance: Option<f64>,
}

impl<T> AlignedPair<T> {
    /// The normalized distance, when it was requested.
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }
}
