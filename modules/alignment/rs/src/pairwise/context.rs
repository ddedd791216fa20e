use std::fmt::Debug;
use std::hash::Hash;

use ahash::AHashSet;
use eyre::{eyre, Result};

use super::distance::normalized_distance;
use super::matrix::{DpMatrices, Filled};
use super::mode::{DiagonalScoring, Mode};
use super::scoring::{self, Table};
use super::slot::{Aligned, AlignedPair};
use super::traceback::{self, Trace};

/// Score floor that forbids aligning a restricted-context position against
/// an unrestricted one. Cannot be outscored by any realistic recurrence.
pub(crate) const FORBIDDEN: f64 = -1e9;

/// A token sequence with its per-position gap weights and prosodic context.
/// The three slices run in parallel and must be of equal length.
#[derive(Clone, Copy, Debug)]
pub struct SeqContext<'a, T> {
    pub tokens: &'a [T],
    pub weights: &'a [f64],
    pub prosody: &'a [char],
}

impl<'a, T> SeqContext<'a, T> {
    pub fn new(tokens: &'a [T], weights: &'a [f64], prosody: &'a [char]) -> Self {
        debug_assert_eq!(tokens.len(), weights.len());
        debug_assert_eq!(tokens.len(), prosody.len());
        Self {
            tokens,
            weights,
            prosody,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Effective gap-opening penalties: the base penalty modulated by the
    /// per-position weights.
    pub(crate) fn effective_gop(&self, gop: i32) -> Vec<f64> {
        self.weights.iter().map(|w| f64::from(gop) * w).collect()
    }
}

/// Parameters of the context-aware aligner.
#[derive(Clone, Debug)]
pub struct ContextParams {
    pub mode: Mode,
    /// Base gap-opening penalty, rescaled per position by the gap weights.
    pub gop: i32,
    /// Multiplier applied to a gap that extends a gap in the same sequence.
    pub scale: f64,
    /// Bonus applied to matches with agreeing prosodic context.
    pub factor: f64,
    /// Prosodic codes that may only align against other restricted codes.
    pub restricted: AHashSet<char>,
    pub diagonal: DiagonalScoring,
    /// Also compute the normalized distance.
    pub distance: bool,
}

impl Default for ContextParams {
    fn default() -> Self {
        Self {
            mode: Mode::Global,
            gop: -2,
            scale: 0.5,
            factor: 0.3,
            restricted: ['T', '_'].into_iter().collect(),
            diagonal: DiagonalScoring::default(),
            distance: false,
        }
    }
}

/// The context-aware recurrence shared by the sound-class and the profile
/// aligners. `score_at(i, j)` must yield the raw similarity of aligning
/// position `j` of the first sequence against position `i` of the second,
/// both one-based.
pub(crate) fn fill<F>(
    pro_a: &[char],
    pro_b: &[char],
    gop_a: &[f64],
    gop_b: &[f64],
    scale: f64,
    factor: f64,
    restricted: &AHashSet<char>,
    mode: Mode,
    diagonal: DiagonalScoring,
    mut score_at: F,
) -> Result<Filled>
where
    F: FnMut(usize, usize) -> Result<f64>,
{
    let m = gop_a.len();
    let n = gop_b.len();
    let mut dp = DpMatrices::new(gop_a, gop_b, mode, scale);

    let mut sim = 0.0;
    let mut best = (0, 0);

    for i in 1..=n {
        for j in 1..=m {
            // Gap in the first sequence, consuming a token of the second.
            let gap_a = if j == m && mode == Mode::Overlap {
                dp.get(i - 1, j)
            } else if restricted.contains(&pro_b[i - 1])
                && !restricted.contains(&pro_a[j - 1])
                && j != m
            {
                dp.get(i - 1, j) + FORBIDDEN
            } else if mode == Mode::Dialign {
                dp.get(i - 1, j)
            } else if dp.trace(i - 1, j) == Trace::GapInA {
                dp.get(i - 1, j) + gop_b[i - 1] * scale
            } else {
                dp.get(i - 1, j) + gop_b[i - 1]
            };

            // Gap in the second sequence, consuming a token of the first.
            let gap_b = if i == n && mode == Mode::Overlap {
                dp.get(i, j - 1)
            } else if restricted.contains(&pro_a[j - 1])
                && !restricted.contains(&pro_b[i - 1])
                && i != n
            {
                dp.get(i, j - 1) + FORBIDDEN
            } else if mode == Mode::Dialign {
                dp.get(i, j - 1)
            } else if dp.trace(i, j - 1) == Trace::GapInB {
                dp.get(i, j - 1) + gop_a[j - 1] * scale
            } else {
                dp.get(i, j - 1) + gop_a[j - 1]
            };

            let mut matched = if mode == Mode::Dialign {
                best_diagonal(&dp, i, j, diagonal, &mut score_at)?
            } else {
                score_at(i, j)?
            };

            // Prosodic bonus: full for agreeing context, half for context
            // at least two code points apart, none in between.
            let pa = pro_a[j - 1];
            let pb = pro_b[i - 1];
            if pa == pb {
                matched = dp.get(i - 1, j - 1) + matched + matched * factor;
            } else if (pa as i64 - pb as i64).abs() >= 2 {
                matched = dp.get(i - 1, j - 1) + matched + matched * factor * 0.5;
            } else {
                matched = dp.get(i - 1, j - 1) + matched;
            }

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

/// Best diagonal run ending at `(i, j)`: every run starts from the matrix
/// value above its head and charges no internal gaps.
pub(crate) fn best_diagonal<F>(
    dp: &DpMatrices,
    i: usize,
    j: usize,
    diagonal: DiagonalScoring,
    score_at: &mut F,
) -> Result<f64>
where
    F: FnMut(usize, usize) -> Result<f64>,
{
    let mut run_best = 0.0;
    match diagonal {
        DiagonalScoring::Terminal => {
            // The terminal pair is accumulated once per run cell.
            let terminal = score_at(i, j)?;
            for k in 0..i.min(j) {
                let mut candidate = dp.get(i - k - 1, j - k - 1);
                for _ in 0..=k {
                    candidate += terminal;
                }
                if candidate > run_best {
                    run_best = candidate;
                }
            }
        }
        DiagonalScoring::PerSite => {
            for k in 0..i.min(j) {
                let mut candidate = dp.get(i - k - 1, j - k - 1);
                for l in 0..=k {
                    candidate += score_at(i - l, j - l)?;
                }
                if candidate > run_best {
                    run_best = candidate;
                }
            }
        }
    }
    Ok(run_best)
}

/// Sound-class alignment of two annotated token sequences.
pub fn sc_align<T>(
    a: &SeqContext<'_, T>,
    b: &SeqContext<'_, T>,
    table: &Table<T>,
    params: &ContextParams,
) -> Result<AlignedPair<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    log::trace!(
        "sc_align: {}x{} tokens, mode {}",
        a.len(),
        b.len(),
        params.mode
    );

    let gop_a = a.effective_gop(params.gop);
    let gop_b = b.effective_gop(params.gop);

    let filled = fill(
        a.prosody,
        b.prosody,
        &gop_a,
        &gop_b,
        params.scale,
        params.factor,
        &params.restricted,
        params.mode,
        params.diagonal,
        |i, j| {
            let (x, y) = (&a.tokens[j - 1], &b.tokens[i - 1]);
            table
                .get(x, y)
                .ok_or_else(|| eyre!("no score entry for pair {:?} / {:?}", x, y))
        },
    )?;

    let (alm_a, alm_b) = if params.mode == Mode::Local {
        traceback::local(&filled.dp, a.tokens, b.tokens, filled.best)
    } else {
        let (core_a, core_b) = traceback::global(&filled.dp, a.tokens, b.tokens);
        (Aligned::core(core_a), Aligned::core(core_b))
    };

    let distance = if params.distance {
        let self_a = scoring::self_similarity(a.tokens, table, params.factor)?;
        let self_b = scoring::self_similarity(b.tokens, table, params.factor)?;
        Some(normalized_distance(filled.sim, self_a, self_b))
    } else {
        None
    };

    Ok(AlignedPair::new(alm_a, alm_b, filled.sim, distance))
}
