use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{eyre, Result};

use super::matrix::{DpMatrices, Filled};
use super::mode::Mode;
use super::scoring::{Equality, Scorer, Table};
use super::slot::{Aligned, AlignedPair, Slot};
use super::traceback::{self, Trace};

/// One non-overlapping local alignment extracted by `we_align`. The ranges
/// are the token spans the cores cover in the original sequences.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct LocalHit<T> {
    a: Vec<Slot<T>>,
    b: Vec<Slot<T>>,
    a_range: Range<usize>,
    b_range: Range<usize>,
    score: f64,
}

/// Needleman-Wunsch alignment with a uniform gap penalty. Scores every
/// pair `+1/-1` when no table is supplied.
pub fn nw_align<T>(
    seq_a: &[T],
    seq_b: &[T],
    table: Option<&Table<T>>,
    gap: f64,
) -> Result<AlignedPair<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    log::trace!("nw_align: {}x{} tokens", seq_a.len(), seq_b.len());
    match table {
        Some(table) => nw_with(seq_a, seq_b, table, gap),
        None => nw_with(seq_a, seq_b, &Equality::default(), gap),
    }
}

fn nw_with<S>(
    seq_a: &[S::Symbol],
    seq_b: &[S::Symbol],
    scorer: &S,
    gap: f64,
) -> Result<AlignedPair<S::Symbol>>
where
    S: Scorer,
    S::Symbol: Clone + Debug,
{
    let m = seq_a.len();
    let n = seq_b.len();
    let gop_a = vec![gap; m];
    let gop_b = vec![gap; n];
    let mut dp = DpMatrices::new(&gop_a, &gop_b, Mode::Global, 1.0);

    for i in 1..=n {
        for j in 1..=m {
            let gap_a = dp.get(i - 1, j) + gap;
            let gap_b = dp.get(i, j - 1) + gap;
            let (x, y) = (&seq_a[j - 1], &seq_b[i - 1]);
            let matched = dp.get(i - 1, j - 1)
                + scorer
                    .score(x, y)
                    .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", x, y))?;

            if gap_a > matched && gap_a >= gap_b {
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

    let sim = dp.get(n, m);
    let (core_a, core_b) = traceback::global(&dp, seq_a, seq_b);
    Ok(AlignedPair::new(
        Aligned::core(core_a),
        Aligned::core(core_b),
        sim,
        None,
    ))
}

/// Smith-Waterman local alignment. The unaligned flanks are preserved on
/// both sides of the returned cores.
pub fn sw_align<T>(
    seq_a: &[T],
    seq_b: &[T],
    table: Option<&Table<T>>,
    gap: f64,
) -> Result<AlignedPair<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    log::trace!("sw_align: {}x{} tokens", seq_a.len(), seq_b.len());
    match table {
        Some(table) => sw_with(seq_a, seq_b, table, gap),
        None => sw_with(seq_a, seq_b, &Equality::default(), gap),
    }
}

fn sw_with<S>(
    seq_a: &[S::Symbol],
    seq_b: &[S::Symbol],
    scorer: &S,
    gap: f64,
) -> Result<AlignedPair<S::Symbol>>
where
    S: Scorer,
    S::Symbol: Clone + Debug,
{
    let filled = local_fill(seq_a, seq_b, scorer, gap)?;
    let (alm_a, alm_b) = traceback::local(&filled.dp, seq_a, seq_b, filled.best);
    Ok(AlignedPair::new(alm_a, alm_b, filled.sim, None))
}

/// Waterman-Eggert enumeration of non-overlapping local alignments in
/// non-increasing score order.
pub fn we_align<T>(
    seq_a: &[T],
    seq_b: &[T],
    table: Option<&Table<T>>,
    gap: f64,
) -> Result<Vec<LocalHit<T>>>
where
    T: Clone + Eq + Hash + Debug,
{
    log::trace!("we_align: {}x{} tokens", seq_a.len(), seq_b.len());
    match table {
        Some(table) => we_with(seq_a, seq_b, table, gap),
        None => we_with(seq_a, seq_b, &Equality::default(), gap),
    }
}

fn we_with<S>(
    seq_a: &[S::Symbol],
    seq_b: &[S::Symbol],
    scorer: &S,
    gap: f64,
) -> Result<Vec<LocalHit<S::Symbol>>>
where
    S: Scorer,
    S::Symbol: Clone + Debug,
{
    let Filled { mut dp, .. } = local_fill(seq_a, seq_b, scorer, gap)?;
    let (rows, cols) = (dp.rows(), dp.cols());

    // Flat copy of the cell scores; consumed regions are zeroed out here and
    // in the traceback so later walks cannot enter them.
    let mut tracer = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            tracer[i * cols + j] = dp.get(i, j);
        }
    }

    let mut hits = Vec::new();
    loop {
        let mut score = 0.0;
        let mut start = (0, 0);
        for i in 0..rows {
            for j in 0..cols {
                if tracer[i * cols + j] > score {
                    score = tracer[i * cols + j];
                    start = (i, j);
                }
            }
        }
        if score <= 0.0 {
            break;
        }

        let (imax, jmax) = start;
        let (core_a, core_b, (imin, jmin)) = traceback::walk(&dp, seq_a, seq_b, start);

        hits.push(LocalHit::new(
            core_a,
            core_b,
            jmin..jmax,
            imin..imax,
            score,
        ));

        tracer[imax * cols + jmax] = 0.0;
        for i in imin + 1..=imax {
            for j in jmin + 1..=jmax {
                tracer[i * cols + j] = 0.0;
                dp.set_trace(i, j, Trace::Stop);
            }
        }
    }

    Ok(hits)
}

fn local_fill<S>(
    seq_a: &[S::Symbol],
    seq_b: &[S::Symbol],
    scorer: &S,
    gap: f64,
) -> Result<Filled>
where
    S: Scorer,
    S::Symbol: Debug,
{
    let m = seq_a.len();
    let n = seq_b.len();
    let gop_a = vec![gap; m];
    let gop_b = vec![gap; n];
    let mut dp = DpMatrices::new(&gop_a, &gop_b, Mode::Local, 1.0);

    let mut sim = 0.0;
    let mut best = (0, 0);

    for i in 1..=n {
        for j in 1..=m {
            let gap_a = dp.get(i - 1, j) + gap;
            let gap_b = dp.get(i, j - 1) + gap;
            let (x, y) = (&seq_a[j - 1], &seq_b[i - 1]);
            let matched = dp.get(i - 1, j - 1)
                + scorer
                    .score(x, y)
                    .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", x, y))?;

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
        }
    }

    Ok(Filled { dp, sim, best })
}

/// Unit-cost Levenshtein distance. Both sequences may be empty.
pub fn edit_dist<T: PartialEq>(seq_a: &[T], seq_b: &[T]) -> usize {
    let m = seq_a.len();
    let mut previous: Vec<usize> = (0..=m).collect();
    let mut current = vec![0; m + 1];

    for (i, y) in seq_b.iter().enumerate() {
        current[0] = i + 1;
        for (j, x) in seq_a.iter().enumerate() {
            let substitution = previous[j] + usize::from(x != y);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[m]
}

/// Edit distance rescaled by the longer sequence into `[0, 1]`.
pub fn edit_dist_normalized<T: PartialEq>(seq_a: &[T], seq_b: &[T]) -> f64 {
    let longest = seq_a.len().max(seq_b.len());
    if longest == 0 {
        return 0.0;
    }
    edit_dist(seq_a, seq_b) as f64 / longest as f64
}
