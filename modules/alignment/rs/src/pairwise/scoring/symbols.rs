use std::hash::Hash;
use std::marker::PhantomData;

use ahash::AHashMap;

/// The scoring capability: resolves a pair of tokens to a similarity score.
/// `None` marks a pair the scorer holds no entry for.
pub trait Scorer {
    type Symbol;

    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Option<f64>;
}

/// Explicit pair table. Lookups are directional: `(a, b)` and `(b, a)` are
/// distinct entries.
#[derive(Clone, Debug, Default)]
pub struct Table<T> {
    scores: AHashMap<(T, T), f64>,
}

impl<T: Eq + Hash + Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            scores: AHashMap::new(),
        }
    }

    pub fn insert(&mut self, a: T, b: T, score: f64) {
        self.scores.insert((a, b), score);
    }

    pub fn get(&self, a: &T, b: &T) -> Option<f64> {
        self.scores.get(&(a.clone(), b.clone())).copied()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<((T, T), f64)> for Table<T> {
    fn from_iter<I: IntoIterator<Item = ((T, T), f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash + Clone> Scorer for Table<T> {
    type Symbol = T;

    #[inline(always)]
    fn score(&self, a: &T, b: &T) -> Option<f64> {
        self.get(a, b)
    }
}

/// Fallback scoring used when no table is supplied.
#[derive(Clone, Debug)]
pub struct Equality<T> {
    pub equal: f64,
    pub different: f64,
    _phantom: PhantomData<T>,
}

impl<T> Equality<T> {
    pub fn new(equal: f64, different: f64) -> Self {
        Self {
            equal,
            different,
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for Equality<T> {
    fn default() -> Self {
        Self::new(1.0, -1.0)
    }
}

impl<T: PartialEq> Scorer for Equality<T> {
    type Symbol = T;

    #[inline(always)]
    fn score(&self, a: &T, b: &T) -> Option<f64> {
        Some(if a == b { self.equal } else { self.different })
    }
}
