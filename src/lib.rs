//!Seeded graph matching.
//!
//!Given the adjacency matrices `A` and `B` of two graphs and a doubly
//!stochastic matrix `P` whose diagonal ones mark known correspondences
//!(seeds), find the permutation of the nodes of `B` that best aligns it with `A`.
//!The quadratic assignment problem is relaxed to doubly stochastic matrices
//!and solved by Frank-Wolfe iterations, each calling a linear assignment
//!solver. The relaxed solution is then rounded to a permutation.
//!
//!# Example
//!
//!```rust
//!use ndarray::{Array2, array};
//!use seeded_graph_matching::*;
//!
//!pub fn main() {
//!    // Path 0-1-2-3 and the same path with nodes 1 and 2 exchanged.
//!    let a = array![[0., 1., 0., 0.], [1., 0., 1., 0.], [0., 1., 0., 1.], [0., 0., 1., 0.]];
//!    let b = array![[0., 0., 1., 0.], [0., 0., 1., 1.], [1., 1., 0., 0.], [0., 1., 0., 0.]];
//!    // No seeds: start from the barycenter of the permutation matrices.
//!    let p = Array2::from_elem((4, 4), 0.25);
//!
//!    let prepared = Prepared::new(a, b, p).unwrap();
//!    let matching = match_graphs(&prepared, &ShortestPath, &SolverConfig::default()).unwrap();
//!    assert_eq!(matching.distances.permuted, 0.);
//!}
//!```
//!

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_labels
)]

#[macro_use]
extern crate serde_derive;

pub mod assignment;
pub mod config;
pub mod draw;
pub mod error;
pub mod matrix;
pub mod permutation;
pub mod pipeline;
pub mod projector;
pub mod report;
pub mod solver;

pub use crate::assignment::{Assignment, AssignmentOracle, ShortestPath};
pub use crate::config::{Device, NumericConfig, Precision, RunConfig, SolverConfig};
pub use crate::error::{Error, Result};
pub use crate::matrix::Prepared;
pub use crate::pipeline::{Matching, match_graphs, run};
pub use crate::projector::{Distances, Projection};
pub use crate::report::RunSummary;
pub use crate::solver::{Outcome, Sgm, Step, Termination};

use env_logger::Env;

/// Logs at Info level unless `RUST_LOG` says otherwise.
pub fn init_default_log() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}

/// Logs everything unless `RUST_LOG` says otherwise.
pub fn init_debug_log() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("trace"))
        .format_target(false)
        .try_init();
}
