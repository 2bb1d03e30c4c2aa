//! Frank-Wolfe relaxation of seeded graph matching.
//!
//! Starting from a doubly stochastic matrix `P`, each iteration
//! 1. computes the gradient `A P B^T + A^T P B` of the relaxed objective,
//! 2. finds the permutation `T` maximizing `<gradient, T>`
//!    with an [`AssignmentOracle`],
//! 3. computes the exact line search along the segment from `P` to `T`,
//! 4. moves to a point of that segment or stops.
//!
//! Every accepted point is a convex combination of permutation matrices,
//! so `P` stays doubly stochastic.

use crate::assignment::AssignmentOracle;
use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::permutation::permutation_matrix;
use log::*;
use ndarray::{Array2, ArrayView2, NdFloat};
use num::NumCast;
use std::time::Instant;

/// Cross products between the seeded and unseeded blocks of the graphs.
///
/// They enter the gradient and the line search as `x + y`.
/// Only the unseeded formulation is supported, where both are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTerms<T> {
    x: Array2<T>,
    y: Array2<T>,
}

impl<T: NdFloat> CrossTerms<T> {
    pub fn unseeded(n: usize) -> Self {
        Self {
            x: Array2::zeros((n, n)),
            y: Array2::zeros((n, n)),
        }
    }
    /// `sum(m ⊙ x) + sum(m ⊙ y)`
    fn inner(&self, m: &Array2<T>) -> T {
        (m * &self.x).sum() + (m * &self.y).sum()
    }
}

/// Candidate step size of the line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alpha<T> {
    Finite(T),
    /// The line search polynomial is linear and not constant:
    /// there is no finite critical point.
    Unbounded,
}

/// Coefficients of the objective along the segment `P + s (T - P)`.
///
/// Up to a constant the objective there is `quadratic() s^2 + linear() s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearch<T> {
    /// `sum(w ⊙ P)`
    pub c: T,
    /// `sum(wt ⊙ P) + sum(w ⊙ T)`
    pub d: T,
    /// `sum(wt ⊙ T)`
    pub e: T,
    /// Cross terms at `P`.
    pub u: T,
    /// Cross terms at `T`.
    pub v: T,
}

impl<T: NdFloat> LineSearch<T> {
    pub fn quadratic(&self) -> T {
        self.c - self.d + self.e
    }
    pub fn linear(&self) -> T {
        self.d - (self.e + self.e) + self.u - self.v
    }
    /// Value associated with a full step to `T`.
    pub fn f1(&self) -> T {
        self.c - self.e + self.u - self.v
    }
    pub fn eval(&self, s: T) -> T {
        self.quadratic() * s * s + self.linear() * s
    }
    /// Critical point of the line search polynomial.
    /// A constant polynomial gives 0.
    pub fn alpha(&self) -> Alpha<T> {
        let (q, l) = (self.quadratic(), self.linear());
        if q == T::zero() {
            if l == T::zero() {
                Alpha::Finite(T::zero())
            } else {
                Alpha::Unbounded
            }
        } else {
            Alpha::Finite(-l / (q + q))
        }
    }
    /// Chooses the next move.
    ///
    /// An interior step needs `0 < alpha < tolerance` and a value at `alpha`
    /// both positive and above `f1`; otherwise a negative `f1` gives a full step.
    pub fn decide(&self, tolerance: T) -> (Alpha<T>, Option<T>, Step<T>) {
        let alpha = self.alpha();
        let f1 = self.f1();
        let falpha = match alpha {
            Alpha::Finite(a) => Some(self.eval(a)),
            Alpha::Unbounded => None,
        };
        let step = match (alpha, falpha) {
            (Alpha::Finite(a), Some(fa))
                if a > T::zero() && a < tolerance && fa > T::zero() && fa > f1 =>
            {
                Step::Interior(a)
            }
            _ if f1 < T::zero() => Step::Full,
            _ => Step::Stop,
        };
        (alpha, falpha, step)
    }
}

/// Move chosen by an iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<T> {
    /// `P <- alpha P + (1 - alpha) T`
    Interior(T),
    /// `P <- T`
    Full,
    /// No improving move.
    Stop,
}

/// Everything computed during one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterate<T> {
    /// Permutation `T`: row `k` is matched to column `assignment[k]`.
    pub assignment: Vec<usize>,
    pub search: LineSearch<T>,
    pub alpha: Alpha<T>,
    pub f1: T,
    pub falpha: Option<T>,
    pub step: Step<T>,
}

impl<T: NdFloat> Iterate<T> {
    /// Matrix of the permutation `T`.
    pub fn target(&self) -> Array2<T> {
        permutation_matrix(&self.assignment)
    }
    /// The point reached from `p` by this iteration's step.
    pub fn apply(&self, p: Array2<T>) -> Array2<T> {
        match self.step {
            Step::Interior(alpha) => p * alpha + self.target() * (T::one() - alpha),
            Step::Full => self.target(),
            Step::Stop => p,
        }
    }
}

/// Why the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No improving step at the given (0-based) iteration.
    Stalled { iteration: usize },
    /// The iteration budget ran out.
    PatienceExhausted,
}

#[derive(Debug, Clone)]
pub struct Outcome<T> {
    /// Final relaxed correspondence.
    pub p: Array2<T>,
    /// Number of iterations run, at most the patience.
    pub iterations: usize,
    pub termination: Termination,
    pub history: Vec<Iterate<T>>,
}

/// Seeded graph matching solver on two `n x n` prepared matrices.
#[derive(Debug)]
pub struct Sgm<'a, T, O> {
    a: ArrayView2<'a, T>,
    b: ArrayView2<'a, T>,
    cross: CrossTerms<T>,
    oracle: &'a O,
    tolerance: T,
    patience: usize,
}

impl<'a, T, O> Sgm<'a, T, O>
where
    T: NdFloat,
    O: AssignmentOracle<T>,
{
    pub fn new(
        a: ArrayView2<'a, T>,
        b: ArrayView2<'a, T>,
        oracle: &'a O,
        config: &SolverConfig,
    ) -> Result<Self> {
        config.check()?;
        let n = a.nrows();
        if a.dim() != (n, n) {
            return Err(Error::ShapeMismatch {
                what: "A",
                expected: (n, n),
                found: a.dim(),
            });
        }
        if b.dim() != (n, n) {
            return Err(Error::ShapeMismatch {
                what: "B",
                expected: (n, n),
                found: b.dim(),
            });
        }
        if n == 1 {
            return Err(Error::SingleNode);
        }
        let tolerance = <T as NumCast>::from(config.tolerance)
            .ok_or(Error::InvalidTolerance(config.tolerance))?;
        Ok(Self {
            a,
            b,
            cross: CrossTerms::unseeded(n),
            oracle,
            tolerance,
            patience: config.patience,
        })
    }

    pub fn size(&self) -> usize {
        self.a.nrows()
    }

    fn check_shape(&self, p: &ArrayView2<T>) -> Result<()> {
        let n = self.size();
        if p.dim() != (n, n) {
            return Err(Error::ShapeMismatch {
                what: "P",
                expected: (n, n),
                found: p.dim(),
            });
        }
        Ok(())
    }

    /// Returns the gradient at `p` and its `A^T P B` part.
    pub fn gradient(&self, p: ArrayView2<T>) -> (Array2<T>, Array2<T>) {
        let z = self.a.dot(&p).dot(&self.b.t());
        let w = self.a.t().dot(&p).dot(&self.b);
        let grad = &self.cross.x + &self.cross.y + &z + &w;
        (grad, w)
    }

    /// Permutation maximizing `<grad, T>`.
    fn best_response(&self, grad: &Array2<T>) -> Result<Vec<usize>> {
        let shift = grad.iter().fold(T::zero(), |m, &x| m.max(x.abs()));
        let cost = grad.mapv(|x| x + shift);
        let top = cost.iter().fold(T::neg_infinity(), |m, &x| m.max(x));
        let assignment = self.oracle.solve(cost.mapv(|x| top - x).view())?;
        trace!("assignment value {}", assignment.value);
        Ok(assignment.rows)
    }

    /// Computes one iteration from `p` without moving.
    pub fn step(&self, p: ArrayView2<T>) -> Result<Iterate<T>> {
        self.check_shape(&p)?;
        let p = p.to_owned();
        let (grad, w) = self.gradient(p.view());
        let assignment = self.best_response(&grad)?;
        let t = permutation_matrix(&assignment);
        let wt = self.a.t().dot(&t).dot(&self.b);
        let search = LineSearch {
            c: (&w * &p).sum(),
            d: (&wt * &p).sum() + (&w * &t).sum(),
            e: (&wt * &t).sum(),
            u: self.cross.inner(&p),
            v: self.cross.inner(&t),
        };
        let (alpha, falpha, step) = search.decide(self.tolerance);
        Ok(Iterate {
            assignment,
            search,
            alpha,
            f1: search.f1(),
            falpha,
            step,
        })
    }

    /// Iterates from `p` until no improving step exists
    /// or the patience is exhausted.
    pub fn run(&self, p: Array2<T>) -> Result<Outcome<T>> {
        self.check_shape(&p.view())?;
        let mut p = p;
        let mut history = Vec::new();
        let start = Instant::now();
        for i in 0..self.patience {
            debug!(
                "start iteration {} ({:.3} seconds)",
                i,
                start.elapsed().as_secs_f64()
            );
            let iterate = self.step(p.view())?;
            debug!(
                "alpha = {:?}, f1 = {}, falpha = {:?}, step = {:?}",
                iterate.alpha, iterate.f1, iterate.falpha, iterate.step
            );
            p = iterate.apply(p);
            let stop = iterate.step == Step::Stop;
            history.push(iterate);
            if stop {
                info!("breaking at iteration {}", i);
                return Ok(Outcome {
                    p,
                    iterations: i + 1,
                    termination: Termination::Stalled { iteration: i },
                    history,
                });
            }
        }
        info!("patience exhausted after {} iterations", self.patience);
        Ok(Outcome {
            p,
            iterations: self.patience,
            termination: Termination::PatienceExhausted,
            history,
        })
    }
}
