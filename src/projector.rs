//! Rounding a relaxed correspondence to a permutation.

use crate::assignment::AssignmentOracle;
use crate::error::{Error, Result};
use crate::permutation::permutation_matrix;
use log::*;
use ndarray::{Array2, ArrayView2, NdFloat, s};

/// The permutation `corr` maximizing `sum_k p[k, corr[k]]`.
pub fn project<T, O>(p: ArrayView2<T>, oracle: &O) -> Result<Vec<usize>>
where
    T: NdFloat,
    O: AssignmentOracle<T>,
{
    let top = p.iter().fold(T::neg_infinity(), |m, &x| m.max(x));
    let cost = p.mapv(|x| top - x);
    Ok(oracle.solve(cost.view())?.rows)
}

/// `p B p^T`, where `p` is the matrix of `corr` trimmed to the extents of `b`.
pub fn permute<T: NdFloat>(corr: &[usize], b: ArrayView2<T>) -> Result<Array2<T>> {
    let (rows, cols) = b.dim();
    if corr.len() < rows.max(cols) {
        return Err(Error::ShapeMismatch {
            what: "permutation",
            expected: (rows, cols),
            found: (corr.len(), corr.len()),
        });
    }
    let full = permutation_matrix::<T>(corr);
    let p = full.slice(s![..rows, ..cols]);
    Ok(p.dot(&b).dot(&p.t()))
}

/// Checks that `a` and `b_perm` agree on their leading `n_seeds x n_seeds` block.
///
/// Fails with [`Error::SeedBlockTooLarge`] if the block does not fit in both.
pub fn check_seed_block<T: NdFloat>(
    a: ArrayView2<T>,
    b_perm: ArrayView2<T>,
    n_seeds: usize,
) -> Result<()> {
    let size = a.nrows().min(b_perm.nrows());
    if n_seeds > size {
        return Err(Error::SeedBlockTooLarge { n_seeds, size });
    }
    for i in 0..n_seeds {
        for j in 0..n_seeds {
            let (x, y) = (a[[i, j]], b_perm[[i, j]]);
            if x != y {
                return Err(Error::SeedBlockMismatch {
                    row: i,
                    col: j,
                    a: x.to_f64().unwrap_or(f64::NAN),
                    b: y.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
    }
    Ok(())
}

/// Frobenius norm of `a - b` on their leading `k x k` block.
pub fn frobenius_distance<T: NdFloat>(a: ArrayView2<T>, b: ArrayView2<T>, k: usize) -> f64 {
    let diff = &a.slice(s![..k, ..k]) - &b.slice(s![..k, ..k]);
    diff.iter()
        .map(|x| x.to_f64().unwrap_or(f64::NAN).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Disagreement between the graphs before and after matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distances {
    /// Between the graphs as given.
    pub unpermuted: f64,
    /// Between the seed blocks of `A` and of the permuted `B`.
    pub seeds: f64,
    /// Between `A` and the permuted `B`.
    pub permuted: f64,
}

impl Distances {
    pub fn new<T: NdFloat>(
        a: ArrayView2<T>,
        b: ArrayView2<T>,
        b_perm: ArrayView2<T>,
        n_seeds: usize,
    ) -> Self {
        let n = a.nrows().min(b.nrows());
        let res = Self {
            unpermuted: frobenius_distance(a, b, n),
            seeds: frobenius_distance(a, b_perm, n_seeds.min(n)),
            permuted: frobenius_distance(a, b_perm, n),
        };
        info!(
            "F-norm of difference between unpermuted matrices -> {}",
            res.unpermuted
        );
        info!(
            "F-norm of difference between seed sets in permuted matrices -> {}",
            res.seeds
        );
        info!(
            "F-norm of difference between permuted matrices -> {}",
            res.permuted
        );
        res
    }
}

/// A hard correspondence and the second graph reordered by it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<T> {
    /// Node `i` of `A` is matched with node `corr[i]` of `B`.
    pub corr: Vec<usize>,
    /// `B` permuted onto the nodes of `A`.
    pub b_perm: Array2<T>,
}

impl<T: NdFloat> Projection<T> {
    /// Rounds `p` and permutes the original (unpadded) `b` accordingly.
    pub fn new<O>(p: ArrayView2<T>, b: ArrayView2<T>, oracle: &O) -> Result<Self>
    where
        O: AssignmentOracle<T>,
    {
        let corr = project(p, oracle)?;
        let b_perm = permute(&corr, b)?;
        Ok(Self { corr, b_perm })
    }

    /// The hard permutation matrix.
    pub fn matrix(&self) -> Array2<T> {
        permutation_matrix(&self.corr)
    }
}
