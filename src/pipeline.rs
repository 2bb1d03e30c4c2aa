//! End-to-end matching run: load, prepare, iterate, round, check, report.

use crate::assignment::{AssignmentOracle, ShortestPath};
use crate::config::{Precision, RunConfig, SolverConfig};
use crate::draw::Draw;
use crate::error::Result;
use crate::matrix::{Prepared, load_matrix};
use crate::projector::{Distances, Projection, check_seed_block};
use crate::report::{RunSummary, save_correspondence};
use crate::solver::{Outcome, Sgm};
use log::*;
use ndarray::{NdFloat, s};
use std::fs;

/// Result of matching two prepared graphs.
#[derive(Debug, Clone)]
pub struct Matching<T> {
    pub outcome: Outcome<T>,
    pub projection: Projection<T>,
    pub distances: Distances,
}

/// Runs the relaxation on `prepared`, rounds the result and checks that
/// the seed block of `A` is reproduced by the permuted `B`.
pub fn match_graphs<T, O>(
    prepared: &Prepared<T>,
    oracle: &O,
    config: &SolverConfig,
) -> Result<Matching<T>>
where
    T: NdFloat,
    O: AssignmentOracle<T>,
{
    let sgm = Sgm::new(prepared.a.view(), prepared.b.view(), oracle, config)?;
    let outcome = sgm.run(prepared.p.clone())?;
    let projection = Projection::new(outcome.p.view(), prepared.b_orig.view(), oracle)?;
    let distances = Distances::new(
        prepared.a_orig.view(),
        prepared.b_orig.view(),
        projection.b_perm.view(),
        prepared.n_seeds,
    );
    check_seed_block(
        prepared.a_orig.view(),
        projection.b_perm.view(),
        prepared.n_seeds,
    )?;
    info!("Seed block of A is reproduced by the permuted B");
    Ok(Matching {
        outcome,
        projection,
        distances,
    })
}

/// Runs with the floating point type selected by the configuration.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.solver.check()?;
    let device = config.numeric.effective_device();
    debug!("Running on {:?} with {:?} precision", device, config.numeric.precision);
    match config.numeric.precision {
        Precision::Double => run_with::<f64>(config),
        Precision::Single => run_with::<f32>(config),
    }
}

pub fn run_with<T: NdFloat>(config: &RunConfig) -> Result<RunSummary> {
    let a = load_matrix::<T>(&config.a_path, config.index_column)?;
    let b = load_matrix::<T>(&config.b_path, config.index_column)?;
    let p = load_matrix::<T>(&config.p_path, config.index_column)?;
    let prepared = Prepared::new(a, b, p)?;
    info!(
        "Matching graphs of size {} with {} seeds",
        prepared.size(),
        prepared.n_seeds
    );
    let matching = match_graphs(&prepared, &ShortestPath, &config.solver)?;
    save_correspondence(&config.outpath, &matching.projection.corr)?;

    if let Some(dir) = &config.plot {
        plot_seed_blocks(dir, &prepared, &matching.projection)?;
    }

    let summary = RunSummary {
        config: config.clone(),
        n: prepared.size(),
        n_seeds: prepared.n_seeds,
        iterations: matching.outcome.iterations,
        termination: matching.outcome.termination,
        distances: matching.distances,
        correspondence: matching.projection.corr,
    };
    if let Some(path) = &config.summary {
        summary.save(path)?;
    }
    Ok(summary)
}

fn plot_seed_blocks<T: NdFloat>(
    dir: &std::path::Path,
    prepared: &Prepared<T>,
    projection: &Projection<T>,
) -> Result<()> {
    let k = prepared
        .n_seeds
        .min(prepared.a_orig.nrows())
        .min(projection.b_perm.nrows());
    if k == 0 {
        warn!("No seeds, nothing to plot");
        return Ok(());
    }
    info!("Plotting seed blocks to {}", dir.display());
    fs::create_dir_all(dir)?;
    prepared
        .a_orig
        .slice(s![..k, ..k])
        .to_svg_file(dir.join("A.svg"), "A")?;
    projection
        .b_perm
        .slice(s![..k, ..k])
        .to_svg_file(dir.join("B_perm.svg"), "permuted B")
}
