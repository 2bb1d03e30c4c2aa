//! Options of a matching run.

use crate::error::{Error, Result};
use log::warn;
use std::path::PathBuf;

/// Floating point type used for the matrix arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Precision {
    /// `f32`
    Single,
    /// `f64`
    #[default]
    Double,
}

/// Where the matrix arithmetic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Host,
    Accelerator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumericConfig {
    pub precision: Precision,
    pub device: Device,
}

impl NumericConfig {
    /// The device computations will actually run on.
    ///
    /// No accelerator backend is compiled in, so an accelerator request
    /// falls back to the host. Results are the same up to rounding.
    pub fn effective_device(&self) -> Device {
        if self.device == Device::Accelerator {
            warn!("No accelerator backend available, running on the host");
        }
        Device::Host
    }
}

/// Parameters of the Frank-Wolfe iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximal number of iterations.
    pub patience: usize,
    /// Exclusive upper bound on an accepted interior step size, in `(0, 1]`.
    pub tolerance: f64,
    /// Size of an already partitioned seed block. Only 0 is supported.
    pub partition: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            patience: 20,
            tolerance: 1.,
            partition: 0,
        }
    }
}

impl SolverConfig {
    pub fn check(&self) -> Result<()> {
        if self.partition != 0 {
            return Err(Error::UnsupportedPartition(self.partition));
        }
        if !(self.tolerance > 0. && self.tolerance <= 1.) {
            return Err(Error::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Everything needed for an end-to-end run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub a_path: PathBuf,
    pub b_path: PathBuf,
    pub p_path: PathBuf,
    /// Destination of the correspondence table.
    pub outpath: PathBuf,
    /// Whether the first field of each row of the input files is a row label.
    pub index_column: bool,
    /// Directory receiving heatmaps of the seed blocks.
    pub plot: Option<PathBuf>,
    /// Destination of a JSON summary of the run.
    pub summary: Option<PathBuf>,
    pub solver: SolverConfig,
    pub numeric: NumericConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            a_path: PathBuf::from("./data/A1.ordered.csv"),
            b_path: PathBuf::from("./data/A2.ordered.csv"),
            p_path: PathBuf::from("./data/P_start.csv"),
            outpath: PathBuf::from("./_simple_corr.txt"),
            index_column: true,
            plot: None,
            summary: None,
            solver: SolverConfig::default(),
            numeric: NumericConfig::default(),
        }
    }
}
