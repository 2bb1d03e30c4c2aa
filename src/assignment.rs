//! Linear assignment.
//!
//! The matching iteration only needs an oracle answering
//! "which permutation `t` minimizes `sum_k cost[k, t[k]]`?".
//! [`ShortestPath`] is the default such oracle.

use crate::error::{Error, Result};
use ndarray::{ArrayView2, NdFloat};

/// An optimal assignment for a square cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<T> {
    /// Row `k` is assigned to column `rows[k]`.
    pub rows: Vec<usize>,
    /// Total cost of the assignment.
    pub value: T,
}

/// Solver of the linear assignment problem.
pub trait AssignmentOracle<T> {
    /// Returns a minimum cost one-to-one assignment of rows to columns.
    fn solve(&self, cost: ArrayView2<T>) -> Result<Assignment<T>>;
}

/// Shortest augmenting path solver (Hungarian method with potentials),
/// `O(n^3)` on an `n x n` matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPath;

impl<T: NdFloat> AssignmentOracle<T> for ShortestPath {
    fn solve(&self, cost: ArrayView2<T>) -> Result<Assignment<T>> {
        let (n, cols) = cost.dim();
        if n != cols {
            return Err(Error::CostShape(n, cols));
        }
        if let Some(((row, col), _)) = cost.indexed_iter().find(|(_, x)| !x.is_finite()) {
            return Err(Error::NonFiniteCost { row, col });
        }
        let inf = T::infinity();
        // Index 0 is a dummy column; rows and columns are shifted by one.
        let mut u = vec![T::zero(); n + 1];
        let mut v = vec![T::zero(); n + 1];
        // Row matched to each column, 0 if none.
        let mut p = vec![0; n + 1];
        let mut way = vec![0; n + 1];

        for i in 1..=n {
            p[0] = i;
            let mut j0 = 0;
            let mut min_val = vec![inf; n + 1];
            let mut used = vec![false; n + 1];
            loop {
                used[j0] = true;
                let i0 = p[j0];
                let mut delta = inf;
                let mut j1 = 0;
                for j in 1..=n {
                    if !used[j] {
                        let val = cost[[i0 - 1, j - 1]] - u[i0] - v[j];
                        if val < min_val[j] {
                            min_val[j] = val;
                            way[j] = j0;
                        }
                        if min_val[j] < delta {
                            delta = min_val[j];
                            j1 = j;
                        }
                    }
                }
                for j in 0..=n {
                    if used[j] {
                        u[p[j]] += delta;
                        v[j] -= delta;
                    } else {
                        min_val[j] -= delta;
                    }
                }
                j0 = j1;
                if p[j0] == 0 {
                    break;
                }
            }
            // Augment along the path
            loop {
                p[j0] = p[way[j0]];
                j0 = way[j0];
                if j0 == 0 {
                    break;
                }
            }
        }

        let mut rows = vec![0; n];
        for j in 1..=n {
            rows[p[j] - 1] = j - 1;
        }
        let value = rows
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (k, &j)| acc + cost[[k, j]]);
        Ok(Assignment { rows, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::is_permutation;
    use ndarray::{Array2, array};

    fn brute_force(cost: &Array2<f64>) -> f64 {
        fn rec(cost: &Array2<f64>, row: usize, used: &mut Vec<bool>) -> f64 {
            let n = used.len();
            if row == n {
                return 0.;
            }
            let mut best = f64::INFINITY;
            for j in 0..n {
                if !used[j] {
                    used[j] = true;
                    best = best.min(cost[[row, j]] + rec(cost, row + 1, used));
                    used[j] = false;
                }
            }
            best
        }
        rec(cost, 0, &mut vec![false; cost.nrows()])
    }

    #[test]
    fn identity_is_optimal_on_diagonal_costs() {
        let cost = array![[0., 1., 1.], [1., 0., 1.], [1., 1., 0.]];
        let sol = ShortestPath.solve(cost.view()).unwrap();
        assert_eq!(sol.rows, [0, 1, 2]);
        assert_eq!(sol.value, 0.);
    }

    #[test]
    fn swapped_2x2() {
        let cost = array![[5., 1.], [1., 5.]];
        let sol = ShortestPath.solve(cost.view()).unwrap();
        assert_eq!(sol.rows, [1, 0]);
        assert_eq!(sol.value, 2.);
    }

    #[test]
    fn matches_brute_force() {
        let cost = array![
            [7., 3., 9., 4., 1.],
            [2., 8., 6., 3., 5.],
            [4., 4., 1., 7., 6.],
            [9., 2., 5., 8., 3.],
            [6., 7., 3., 2., 9.]
        ];
        let sol = ShortestPath.solve(cost.view()).unwrap();
        assert!(is_permutation(&sol.rows));
        assert_eq!(sol.value, brute_force(&cost));
        let negative = cost.mapv(|x| 10. - x * x);
        let sol = ShortestPath.solve(negative.view()).unwrap();
        assert_eq!(sol.value, brute_force(&negative));
    }

    #[test]
    fn single_precision() {
        let cost = array![[3f32, 1., 2.], [1., 3., 2.], [2., 1., 3.]];
        let sol = ShortestPath.solve(cost.view()).unwrap();
        assert!(is_permutation(&sol.rows));
        assert_eq!(sol.value, 4.);
    }

    #[test]
    fn empty_matrix() {
        let cost = Array2::<f64>::zeros((0, 0));
        let sol = ShortestPath.solve(cost.view()).unwrap();
        assert!(sol.rows.is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            ShortestPath.solve(rect.view()),
            Err(Error::CostShape(2, 3))
        ));
        let nan = array![[0., f64::NAN], [1., 0.]];
        assert!(matches!(
            ShortestPath.solve(nan.view()),
            Err(Error::NonFiniteCost { row: 0, col: 1 })
        ));
    }
}
