//! Writing the results of a run.

use crate::config::RunConfig;
use crate::error::Result;
use crate::projector::Distances;
use crate::solver::Termination;
use log::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one line `i+1 corr[i]+1` per node of `A`.
///
/// Indices are 1-based: the first column is a node of `A`
/// and the second its match in `B`.
pub fn write_correspondence<W: Write>(w: &mut W, corr: &[usize]) -> Result<()> {
    for (i, &j) in corr.iter().enumerate() {
        writeln!(w, "{} {}", i + 1, j + 1)?;
    }
    Ok(())
}

pub fn save_correspondence(path: &Path, corr: &[usize]) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_correspondence(&mut w, corr)?;
    w.flush()?;
    info!("Correspondence written to {}", path.display());
    Ok(())
}

/// Everything worth keeping from a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub config: RunConfig,
    /// Size of the padded graphs.
    pub n: usize,
    pub n_seeds: usize,
    pub iterations: usize,
    pub termination: Termination,
    pub distances: Distances,
    /// Node `i` of `A` is matched with node `correspondence[i]` of `B` (0-based).
    pub correspondence: Vec<usize>,
}

impl RunSummary {
    pub fn save(&self, path: &Path) -> Result<()> {
        let w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(w, self)?;
        debug!("Summary written to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
