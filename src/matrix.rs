//! Loading and preparing adjacency matrices.
//!
//! Non-edges are recoded from 0 to -1 before padding, so that the zeros
//! added by [`square_pad`] can be told apart from real non-edges.

use crate::error::{Error, Result};
use log::*;
use ndarray::{Array2, ArrayView2, NdFloat, s};
use num::NumCast;
use std::path::Path;

/// Reads a square matrix from a CSV file with a header row.
///
/// If `index_column` is set, the first field of every record is
/// a row label and is ignored.
pub fn load_matrix<T: NdFloat>(path: &Path, index_column: bool) -> Result<Array2<T>> {
    let name = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let skip = if index_column { 1 } else { 0 };
    let mut data = Vec::new();
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        for (field, value) in record.iter().enumerate().skip(skip) {
            let parsed = value
                .parse::<f64>()
                .ok()
                .and_then(|x| <T as NumCast>::from(x))
                .ok_or_else(|| Error::Parse {
                    path: name.clone(),
                    line,
                    field: field + 1,
                    value: value.to_string(),
                })?;
            data.push(parsed);
        }
        rows += 1;
    }
    if rows == 0 {
        return Err(Error::Empty { path: name });
    }
    let cols = data.len() / rows;
    let mat = Array2::from_shape_vec((rows, cols), data).map_err(|_| Error::NotSquare {
        path: name.clone(),
        rows,
        cols,
    })?;
    check_square(&mat, &name)?;
    debug!("Loaded {} ({}x{})", name, rows, cols);
    Ok(mat)
}

/// Fails with [`Error::NotSquare`] unless `mat` is square.
pub fn check_square<T>(mat: &Array2<T>, name: &str) -> Result<()> {
    let (rows, cols) = mat.dim();
    if rows != cols {
        return Err(Error::NotSquare {
            path: name.to_string(),
            rows,
            cols,
        });
    }
    Ok(())
}

/// Replaces every zero entry by -1.
pub fn recode_zeros<T: NdFloat>(mat: &mut Array2<T>) {
    mat.mapv_inplace(|x| if x == T::zero() { -T::one() } else { x })
}

/// Pads `mat` with zero rows and columns up to `n x n`.
pub fn square_pad<T: NdFloat>(mat: ArrayView2<T>, n: usize) -> Array2<T> {
    let (rows, cols) = mat.dim();
    assert!(rows <= n && cols <= n, "cannot pad {rows}x{cols} to {n}x{n}");
    let mut res = Array2::zeros((n, n));
    res.slice_mut(s![..rows, ..cols]).assign(&mat);
    res
}

/// Number of diagonal entries equal to 1, that is, of hard seeds.
pub fn count_seeds<T: NdFloat>(p: ArrayView2<T>) -> usize {
    p.diag().iter().filter(|&&x| x == T::one()).count()
}

/// Matrices ready for the matching iteration.
#[derive(Debug, Clone)]
pub struct Prepared<T> {
    /// First graph, recoded and padded.
    pub a: Array2<T>,
    /// Second graph, recoded and padded.
    pub b: Array2<T>,
    /// Initial relaxed correspondence.
    pub p: Array2<T>,
    pub a_orig: Array2<T>,
    pub b_orig: Array2<T>,
    pub n_seeds: usize,
}

impl<T: NdFloat> Prepared<T> {
    /// Recodes and pads `a` and `b` to a common size `n`.
    /// The seed matrix `p` must already be `n x n`.
    pub fn new(a: Array2<T>, b: Array2<T>, p: Array2<T>) -> Result<Self> {
        check_square(&a, "A")?;
        check_square(&b, "B")?;
        let n = a.nrows().max(b.nrows());
        match n {
            0 => return Err(Error::Empty { path: "A".into() }),
            1 => return Err(Error::SingleNode),
            _ => (),
        }
        if p.dim() != (n, n) {
            return Err(Error::SeedShape {
                expected: n,
                rows: p.nrows(),
                cols: p.ncols(),
            });
        }
        let n_seeds = count_seeds(p.view());
        let a_orig = a.clone();
        let b_orig = b.clone();
        let mut a = a;
        let mut b = b;
        recode_zeros(&mut a);
        recode_zeros(&mut b);
        if a.nrows() != b.nrows() {
            info!(
                "Padding graphs of sizes {} and {} to {}",
                a.nrows(),
                b.nrows(),
                n
            );
        }
        Ok(Self {
            a: square_pad(a.view(), n),
            b: square_pad(b.view(), n),
            p,
            a_orig,
            b_orig,
            n_seeds,
        })
    }

    /// Common size of the padded graphs.
    pub fn size(&self) -> usize {
        self.a.nrows()
    }
}
