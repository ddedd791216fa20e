use std::fmt::Debug;
use std::hash::Hash;

use ahash::AHashSet;
use eyre::{bail, Result};

use super::context::{self, SeqContext};
use super::mode::{DiagonalScoring, Mode};
use super::scoring::profile::{score_columns, Column};
use super::scoring::Table;
use super::slot::{Aligned, AlignedPair};
use super::traceback;

/// Parameters of the profile aligner. Profiles carry no distance option.
#[derive(Clone, Debug)]
pub struct ProfileParams {
    pub mode: Mode,
    pub gop: i32,
    pub scale: f64,
    pub factor: f64,
    pub restricted: AHashSet<char>,
    /// Weight of cross-pairs touching an in-profile gap when averaging a
    /// column pair.
    pub gap_weight: f64,
    pub diagonal: DiagonalScoring,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            mode: Mode::Global,
            gop: -2,
            scale: 0.5,
            factor: 0.3,
            restricted: ['T', '_'].into_iter().collect(),
            gap_weight: 0.5,
            diagonal: DiagonalScoring::default(),
        }
    }
}

/// Aligns two profiles column by column, scoring column pairs as weighted
/// means over their token cross-pairs. Local mode is not defined for
/// profiles.
pub fn profile_align<T>(
    a: &SeqContext<'_, Column<T>>,
    b: &SeqContext<'_, Column<T>>,
    table: &Table<T>,
    params: &ProfileParams,
) -> Result<AlignedPair<Column<T>>>
where
    T: Clone + Eq + Hash + Debug,
{
    if params.mode == Mode::Local {
        bail!("unknown alignment mode for profiles: {}", Mode::Local);
    }

    log::trace!(
        "profile_align: {}x{} columns, mode {}",
        a.len(),
        b.len(),
        params.mode
    );

    let gop_a = a.effective_gop(params.gop);
    let gop_b = b.effective_gop(params.gop);

    let filled = context::fill(
        a.prosody,
        b.prosody,
        &gop_a,
        &gop_b,
        params.scale,
        params.factor,
        &params.restricted,
        params.mode,
        params.diagonal,
        |i, j| score_columns(&a.tokens[j - 1], &b.tokens[i - 1], table, params.gap_weight),
    )?;

    let (core_a, core_b) = traceback::global(&filled.dp, a.tokens, b.tokens);
    Ok(AlignedPair::new(
        Aligned::core(core_a),
        Aligned::core(core_b),
        filled.sim,
        None,
    ))
}
