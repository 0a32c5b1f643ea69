//! Optimization framework.
//!
//! Provides cost functions, constraints, end criteria, and two
//! derivative-free optimizers: an exhaustive [`BruteForce`] grid search and
//! a Nelder–Mead [`Simplex`].

mod brute_force;
mod simplex;

pub use brute_force::{BruteForce, ParameterRange};
pub use simplex::Simplex;

use ol_core::Real;

// ── Cost function trait ───────────────────────────────────────────────────────

/// A scalar objective function of several variables.
///
/// `value` takes `&mut self` so that an objective can keep per-run
/// bookkeeping (evaluation counters, running minima) without interior
/// mutability.
pub trait CostFunction {
    /// Evaluate the cost function at `x`.
    fn value(&mut self, x: &[Real]) -> Real;
}

impl<F> CostFunction for F
where
    F: FnMut(&[Real]) -> Real,
{
    fn value(&mut self, x: &[Real]) -> Real {
        self(x)
    }
}

// ── Constraints ───────────────────────────────────────────────────────────────

/// A constraint on the parameter space.
pub trait Constraint {
    /// Return `true` if `x` satisfies the constraint.
    fn test(&self, x: &[Real]) -> bool;
}

/// No constraint: all parameter values are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraint;

impl Constraint for NoConstraint {
    fn test(&self, _x: &[Real]) -> bool {
        true
    }
}

/// Per-component box constraint `lower[i] <= x[i] <= upper[i]`.
///
/// Use `Real::NEG_INFINITY` / `Real::INFINITY` for unbounded sides.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryConstraint {
    lower: Vec<Real>,
    upper: Vec<Real>,
}

impl BoundaryConstraint {
    /// Create a box constraint from matching lower and upper bound vectors.
    ///
    /// # Panics
    /// Panics if the two vectors differ in length.
    pub fn new(lower: Vec<Real>, upper: Vec<Real>) -> Self {
        assert_eq!(
            lower.len(),
            upper.len(),
            "lower and upper bounds must have the same dimension"
        );
        Self { lower, upper }
    }

    /// Lower bounds.
    pub fn lower(&self) -> &[Real] {
        &self.lower
    }

    /// Upper bounds.
    pub fn upper(&self) -> &[Real] {
        &self.upper
    }
}

impl Constraint for BoundaryConstraint {
    fn test(&self, x: &[Real]) -> bool {
        x.len() == self.lower.len()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }
}

// ── End criteria ──────────────────────────────────────────────────────────────

/// Criteria to stop a local optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct EndCriteria {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Maximum number of cost-function evaluations.
    pub max_evaluations: usize,
    /// Stop when every vertex lies within this distance of the best one.
    pub x_tolerance: Real,
    /// Stop when every vertex value lies within this distance of the best.
    pub f_tolerance: Real,
}

impl EndCriteria {
    /// Create new end criteria.
    pub fn new(
        max_iterations: usize,
        max_evaluations: usize,
        x_tolerance: Real,
        f_tolerance: Real,
    ) -> Self {
        Self {
            max_iterations,
            max_evaluations,
            x_tolerance,
            f_tolerance,
        }
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the evaluation cap.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }
}

impl Default for EndCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_evaluations: 1500,
            x_tolerance: 1e-6,
            f_tolerance: 1e-6,
        }
    }
}

/// The reason an optimization terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCriteriaType {
    /// Both the x and f tolerances were met.
    Converged,
    /// Maximum iterations reached.
    MaxIterations,
    /// Maximum cost-function evaluations reached.
    MaxEvaluations,
    /// Every grid point was evaluated (brute-force search).
    GridExhausted,
}

/// Result of an optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Final parameter values.
    pub x: Vec<Real>,
    /// Final function value.
    pub value: Real,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of cost-function evaluations performed.
    pub evaluations: usize,
    /// Reason for termination.
    pub end_type: EndCriteriaType,
}
