use std::fmt::Debug;
use std::hash::Hash;

use eyre::{eyre, Result};

use super::distance::normalized_distance;
use super::matrix::{DpMatrices, Filled};
use super::mode::{DiagonalScoring, Mode};
use super::scoring::{self, Equality, Scorer, Table};
use super::slot::{Aligned, AlignedPair};
use super::traceback::{self, Trace};

/// Parameters of the basic aligner: a uniform gap penalty and no linguistic
/// context.
#[derive(Clone, Copy, Debug)]
pub struct BasicParams {
    pub mode: Mode,
    pub gop: i32,
    pub scale: f64,
    pub diagonal: DiagonalScoring,
    /// Also compute the normalized distance.
    pub distance: bool,
}

impl Default for BasicParams {
    fn default() -> Self {
        Self {
            mode: Mode::Global,
            gop: -2,
            scale: 0.5,
            diagonal: DiagonalScoring::default(),
            distance: false,
        }
    }
}

/// Aligns two plain token sequences. Falls back to `+1/-1` scoring when no
/// table is supplied.
pub fn basic_align<T>(
    seq_a: &[T],
    seq_b: &[T],
    table: Option<&Table<T>>,
    params: &BasicParams,
) -> Result<AlignedPair<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    log::trace!(
        "basic_align: {}x{} tokens, mode {}",
        seq_a.len(),
        seq_b.len(),
        params.mode
    );

    // The scoring strategy is picked once here; the fill is generic over it.
    match table {
        Some(table) => align_with(seq_a, seq_b, table, params),
        None => align_with(seq_a, seq_b, &Equality::default(), params),
    }
}

fn align_with<S>(
    seq_a: &[S::Symbol],
    seq_b: &[S::Symbol],
    scorer: &S,
    params: &BasicParams,
) -> Result<AlignedPair<S::Symbol>>
where
    S: Scorer,
    S::Symbol: Clone + Debug,
{
    let filled = fill(seq_a, seq_b, scorer, params)?;

    let (alm_a, alm_b) = if params.mode == Mode::Local {
        traceback::local(&filled.dp, seq_a, seq_b, filled.best)
    } else {
        let (core_a, core_b) = traceback::global(&filled.dp, seq_a, seq_b);
        (Aligned::core(core_a), Aligned::core(core_b))
    };

    let distance = if params.distance {
        let self_a = scoring::self_similarity_with(seq_a, scorer)?;
        let self_b = scoring::self_similarity_with(seq_b, scorer)?;
        Some(normalized_distance(filled.sim, self_a, self_b))
    } else {
        None
    };

    Ok(AlignedPair::new(alm_a, alm_b, filled.sim, distance))
}

/// The basic recurrence: the context-aware skeleton without prosody or
/// restricted characters, over a uniform gap penalty.
fn fill<S>(
    seq_a: &[S::Symbol],
    seq_b: &[S::Symbol],
    scorer: &S,
    params: &BasicParams,
) -> Result<Filled>
where
    S: Scorer,
    S::Symbol: Debug,
{
    let m = seq_a.len();
    let n = seq_b.len();
    let mode = params.mode;
    let gop = f64::from(params.gop);

    let gop_a = vec![gop; m];
    let gop_b = vec![gop; n];
    let mut dp = DpMatrices::new(&gop_a, &gop_b, mode, params.scale);

    let mut score_at = |i: usize, j: usize| {
        let (x, y) = (&seq_a[j - 1], &seq_b[i - 1]);
        scorer
            .score(x, y)
            .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", x, y))
    };

    let mut sim = 0.0;
    let mut best = (0, 0);

    for i in 1..=n {
        for j in 1..=m {
            let gap_a = if j == m && mode == Mode::Overlap {
                dp.get(i - 1, j)
            } else if mode == Mode::Dialign {
                dp.get(i - 1, j)
            } else if dp.trace(i - 1, j) == Trace::GapInA {
                dp.get(i - 1, j) + gop * params.scale
            } else {
                dp.get(i - 1, j) + gop
            };

            let gap_b = if i == n && mode == Mode::Overlap {
                dp.get(i, j - 1)
            } else if mode == Mode::Dialign {
                dp.get(i, j - 1)
            } else if dp.trace(i, j - 1) == Trace::GapInB {
                dp.get(i, j - 1) + gop * params.scale
            } else {
                dp.get(i, j - 1) + gop
            };

            // Unlike the diagonal runs of dialign, the plain match candidate
            // still has to pick up the diagonal predecessor.
            let matched = if mode == Mode::Dialign {
                super::context::best_diagonal(&dp, i, j, params.diagonal, &mut score_at)?
            } else {
                dp.get(i - 1, j - 1) + score_at(i, j)?
            };

            if mode == Mode::Local {
                if gap_a > matched && gap_a >= gap_b && gap_a >= 0.0 {
                    dp.set(i, j, gap_a);
                    dp.set_trace(i, j, Trace::GapInA);
                } else if matched >= gap_b && matched >= 0.0 {
                    dp.set(i, j, matched);
                    dp.set_trace(i, j, Trace::Match);
                } else if gap_b >= 0.0 {
                    dp.set(i, j, gap_b);
                    dp.set_trace(i, j, Trace::GapInB);
                } else {
                    dp.set(i, j, 0.0);
                    dp.set_trace(i, j, Trace::Stop);
                }

                if dp.get(i, j) >= sim {
                    sim = dp.get(i, j);
                    best = (i, j);
                }
            } else if gap_a > matched && gap_a >= gap_b {
                dp.set(i, j, gap_a);
                dp.set_trace(i, j, Trace::GapInA);
            } else if matched >= gap_b {
                dp.set(i, j, matched);
                dp.set_trace(i, j, Trace::Match);
            } else {
                dp.set(i, j, gap_b);
                dp.set_trace(i, j, Trace::GapInB);
            }
        }
    }

    if mode != Mode::Local {
        sim = dp.get(n, m);
        best = (n, m);
    }

    Ok(Filled { dp, sim, best })
}
