pub use symbols::{Equality, Scorer, Table};

pub mod profile;
pub mod symbols;

use std::fmt::Debug;
use std::hash::Hash;

use eyre::{eyre, Result};

/// Self-alignment baseline with the prosodic factor applied at every
/// position: a position always matches its own context.
pub fn self_similarity<T>(seq: &[T], table: &Table<T>, factor: f64) -> Result<f64>
where
    T: Clone + Eq + Hash + Debug,
{
    let mut sim = 0.0;
    for token in seq {
        let score = table
            .get(token, token)
            .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", token, token))?;
        sim += score * (1.0 + factor);
    }
    Ok(sim)
}

/// Self-alignment baseline under an arbitrary scorer.
pub fn self_similarity_with<S>(seq: &[S::Symbol], scorer: &S) -> Result<f64>
where
    S: Scorer,
    S::Symbol: Debug,
{
    let mut sim = 0.0;
    for token in seq {
        sim += scorer
            .score(token, token)
            .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", token, token))?;
    }
    Ok(sim)
}
