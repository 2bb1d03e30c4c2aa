//! `sgm` binary: match two graphs given as CSV adjacency matrices.
//!
//! # Usage
//!
//! ```bash
//! sgm --a-path A.csv --b-path B.csv --p-path P.csv --outpath corr.txt
//! sgm --a-path A.csv --b-path B.csv --p-path P.csv --no-double --plot plots
//! ```

use clap::Parser;
use log::error;
use seeded_graph_matching::{
    Device, NumericConfig, Precision, RunConfig, SolverConfig, init_debug_log, init_default_log,
    run,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sgm",
    version,
    about = "Seeded graph matching of two adjacency matrices",
    long_about = None
)]
struct Args {
    /// Adjacency matrix of the first graph.
    #[arg(long, value_name = "FILE", default_value = "./data/A1.ordered.csv")]
    a_path: PathBuf,

    /// Adjacency matrix of the second graph.
    #[arg(long, value_name = "FILE", default_value = "./data/A2.ordered.csv")]
    b_path: PathBuf,

    /// Initial correspondence; diagonal ones mark seeds.
    #[arg(long, value_name = "FILE", default_value = "./data/P_start.csv")]
    p_path: PathBuf,

    /// Where to write the correspondence table.
    #[arg(long, value_name = "FILE", default_value = "./_simple_corr.txt")]
    outpath: PathBuf,

    /// Compute in single instead of double precision.
    #[arg(long, default_value_t = false)]
    no_double: bool,

    /// Size of a partitioned seed block (only 0 is implemented).
    #[arg(long, default_value_t = 0)]
    m: usize,

    /// Maximal number of iterations.
    #[arg(long, default_value_t = 20)]
    patience: usize,

    /// Upper bound on interior step sizes, in (0, 1].
    ///
    /// Larger values are rejected: an interior step must stay a convex
    /// combination of the current iterate and the assignment.
    #[arg(long, default_value_t = 1.)]
    tolerance: f64,

    /// Write heatmaps of the seed blocks to this directory.
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    plot: Option<PathBuf>,

    /// Request an accelerator for the matrix arithmetic.
    #[arg(long, default_value_t = false)]
    cuda: bool,

    /// The input files have no row label column.
    #[arg(long, default_value_t = false)]
    no_index_column: bool,

    /// Write a JSON summary of the run to this file.
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Log every iteration.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            a_path: args.a_path,
            b_path: args.b_path,
            p_path: args.p_path,
            outpath: args.outpath,
            index_column: !args.no_index_column,
            plot: args.plot,
            summary: args.summary,
            solver: SolverConfig {
                patience: args.patience,
                tolerance: args.tolerance,
                partition: args.m,
            },
            numeric: NumericConfig {
                precision: if args.no_double {
                    Precision::Single
                } else {
                    Precision::Double
                },
                device: if args.cuda {
                    Device::Accelerator
                } else {
                    Device::Host
                },
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.verbose {
        init_debug_log();
    } else {
        init_default_log();
    }
    let config = RunConfig::from(args);
    match run(&config) {
        Ok(summary) => {
            println!(
                "Matched {} nodes in {} iterations ({:?}), correspondence in {}",
                summary.n,
                summary.iterations,
                summary.termination,
                config.outpath.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
