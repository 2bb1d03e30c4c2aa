//! Permutations and their relaxations.
//!
//! In this page, `[n]` denotes the set `{0,1,...,n-1}`.
//!
//! A permutation of `[n]` is represented by a vector `t` of length `n`,
//! and its matrix has a one at position `(k, t[k])` for each `k`,
//! that is, row `k` of the matrix is row `t[k]` of the identity.

use ndarray::{Array2, ArrayView2, NdFloat};

/// Returns true if `t` is a bijection of `[t.len()]`.
pub fn is_permutation(t: &[usize]) -> bool {
    let n = t.len();
    let mut seen = vec![false; n];
    for &v in t {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// The matrix of the permutation `t`.
pub fn permutation_matrix<T: NdFloat>(t: &[usize]) -> Array2<T> {
    debug_assert!(is_permutation(t));
    let n = t.len();
    let mut res = Array2::zeros((n, n));
    for (k, &v) in t.iter().enumerate() {
        res[[k, v]] = T::one();
    }
    res
}

/// Reads back the permutation of a 0/1 matrix.
/// Returns `None` if `m` is not a permutation matrix.
pub fn permutation_of_matrix<T: NdFloat>(m: ArrayView2<T>) -> Option<Vec<usize>> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return None;
    }
    let mut res = Vec::with_capacity(rows);
    for row in m.rows() {
        let mut found = None;
        for (j, &x) in row.iter().enumerate() {
            if x == T::one() {
                if found.is_some() {
                    return None;
                }
                found = Some(j);
            } else if x != T::zero() {
                return None;
            }
        }
        res.push(found?);
    }
    if is_permutation(&res) { Some(res) } else { None }
}

/// Returns true if `m` is square, non-negative
/// and its rows and columns all sum to 1 up to `eps`.
pub fn is_doubly_stochastic<T: NdFloat>(m: ArrayView2<T>, eps: T) -> bool {
    let (rows, cols) = m.dim();
    if rows != cols || m.iter().any(|&x| x < -eps) {
        return false;
    }
    let near_one = |s: T| (s - T::one()).abs() <= eps;
    m.rows().into_iter().all(|r| near_one(r.sum()))
        && m.columns().into_iter().all(|c| near_one(c.sum()))
}
