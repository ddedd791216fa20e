use std::fmt;
use std::str::FromStr;

use eyre::eyre;

/// Alignment regime of the dynamic-programming recurrence.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Mode {
    /// Alignment covering the entirety of both sequences.
    #[default]
    Global,
    /// Alignment over the best-scoring sub-region of each sequence.
    Local,
    /// Global alignment with penalty-free terminal gaps (semi-global).
    Overlap,
    /// Alignment built from gap-free diagonal runs.
    Dialign,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Global => "global",
            Mode::Local => "local",
            Mode::Overlap => "overlap",
            Mode::Dialign => "dialign",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Mode::Global),
            "local" => Ok(Mode::Local),
            "overlap" => Ok(Mode::Overlap),
            "dialign" => Ok(Mode::Dialign),
            _ => Err(eyre!("unknown alignment mode: {}", s)),
        }
    }
}

/// How the score of a dialign diagonal run is accumulated.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum DiagonalScoring {
    /// Replicate the run-terminal pair score over the whole run.
    #[default]
    Terminal,
    /// Sum the distinct pair scores along the run.
    PerSite,
}
