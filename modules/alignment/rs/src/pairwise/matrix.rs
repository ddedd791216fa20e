use super::mode::Mode;
use super::traceback::Trace;

/// Score and traceback storage for one alignment call, seeded per mode.
/// Rows follow the second sequence, columns the first; both matrices are
/// flat and row-major.
pub(crate) struct DpMatrices {
    score: Vec<f64>,
    trace: Vec<Trace>,
    rows: usize,
    cols: usize,
}

impl DpMatrices {
    /// Allocates `(N + 1) x (M + 1)` matrices and seeds the first row and
    /// column. The gap vectors must hold the effective per-position
    /// penalties; `scale` rescales the cumulative terminal gaps of the
    /// global seeding.
    pub fn new(gop_a: &[f64], gop_b: &[f64], mode: Mode, scale: f64) -> Self {
        let rows = gop_b.len() + 1;
        let cols = gop_a.len() + 1;
        let mut dp = Self {
            score: vec![0.0; rows * cols],
            trace: vec![Trace::Stop; rows * cols],
            rows,
            cols,
        };

        match mode {
            // The origin keeps the reset code; everything stays zero.
            Mode::Local => {}
            Mode::Global => {
                dp.set_trace(0, 0, Trace::Match);
                for j in 1..cols {
                    dp.set(0, j, dp.get(0, j - 1) + gop_a[j - 1] * scale);
                    dp.set_trace(0, j, Trace::GapInB);
                }
                for i in 1..rows {
                    dp.set(i, 0, dp.get(i - 1, 0) + gop_b[i - 1] * scale);
                    dp.set_trace(i, 0, Trace::GapInA);
                }
            }
            // Terminal gaps are free: codes only, scores stay zero.
            Mode::Overlap | Mode::Dialign => {
                dp.set_trace(0, 0, Trace::Match);
                for j in 1..cols {
                    dp.set_trace(0, j, Trace::GapInB);
                }
                for i in 1..rows {
                    dp.set_trace(i, 0, Trace::GapInA);
                }
            }
        }

        dp
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.score[row * self.cols + col]
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, score: f64) {
        self.score[row * self.cols + col] = score;
    }

    #[inline(always)]
    pub fn trace(&self, row: usize, col: usize) -> Trace {
        self.trace[row * self.cols + col]
    }

    #[inline(always)]
    pub fn set_trace(&mut self, row: usize, col: usize, trace: Trace) {
        self.trace[row * self.cols + col] = trace;
    }
}

/// Outcome of a matrix fill: the completed matrices, the best similarity,
/// and the cell it was reached at (meaningful in local mode only).
pub(crate) struct Filled {
    pub dp: DpMatrices,
    pub sim: f64,
    pub best: (usize, usize),
}
