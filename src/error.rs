//! Errors raised while loading, matching and reporting.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{path}: line {line}, field {field}: cannot parse {value:?} as a number")]
    Parse {
        path: String,
        line: u64,
        field: usize,
        value: String,
    },
    #[error("{path}: matrix is empty")]
    Empty { path: String },
    #[error("{path} must be square, found {rows}x{cols}")]
    NotSquare {
        path: String,
        rows: usize,
        cols: usize,
    },
    #[error("seed matrix must be {expected}x{expected}, found {rows}x{cols}")]
    SeedShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("m = {0}: matching with a partitioned seed block is not implemented")]
    UnsupportedPartition(usize),
    #[error("graphs with a single node cannot be matched")]
    SingleNode,
    #[error("tolerance must lie in (0, 1], found {0}")]
    InvalidTolerance(f64),
    #[error("cost matrix must be square, found {0}x{1}")]
    CostShape(usize, usize),
    #[error("cost matrix has a non-finite entry at ({row}, {col})")]
    NonFiniteCost { row: usize, col: usize },
    #[error("{what}: expected shape {expected:?}, found {found:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("seed block is not reproduced at ({row}, {col}): A = {a}, permuted B = {b}")]
    SeedBlockMismatch { row: usize, col: usize, a: f64, b: f64 },
    #[error("{n_seeds} seeds but the smaller graph has only {size} nodes")]
    SeedBlockTooLarge { n_seeds: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
