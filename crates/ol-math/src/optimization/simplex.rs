//! Nelder–Mead downhill simplex.
//!
//! Standard coefficients: reflection 1, expansion 2, contraction ½,
//! shrink ½. The initial simplex perturbs each coordinate of the starting
//! point by 5 % (or by 0.00025 when the coordinate is zero).

use nalgebra::DVector;
use ol_core::{ensure, errors::Result, Real};

use super::{Constraint, CostFunction, EndCriteria, EndCriteriaType, OptimizationResult};

const REFLECTION: Real = 1.0;
const EXPANSION: Real = 2.0;
const CONTRACTION: Real = 0.5;
const SHRINK: Real = 0.5;

/// Nelder–Mead simplex optimizer.
#[derive(Debug, Clone)]
pub struct Simplex {
    nonzero_delta: Real,
    zero_delta: Real,
}

impl Default for Simplex {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts evaluations and maps infeasible points to `+∞`.
struct Evaluator<'a, C: ?Sized, K: ?Sized> {
    cost_fn: &'a mut C,
    constraint: &'a K,
    evaluations: usize,
}

impl<C: CostFunction + ?Sized, K: Constraint + ?Sized> Evaluator<'_, C, K> {
    fn eval(&mut self, x: &DVector<Real>) -> Real {
        if !self.constraint.test(x.as_slice()) {
            return Real::INFINITY;
        }
        self.evaluations += 1;
        let v = self.cost_fn.value(x.as_slice());
        if v.is_nan() {
            Real::INFINITY
        } else {
            v
        }
    }
}

impl Simplex {
    /// Create a simplex optimizer with the default initial perturbation.
    pub fn new() -> Self {
        Self {
            nonzero_delta: 0.05,
            zero_delta: 0.00025,
        }
    }

    /// Override the initial simplex perturbation: relative step for non-zero
    /// coordinates and absolute step for zero coordinates.
    pub fn with_initial_steps(mut self, nonzero_delta: Real, zero_delta: Real) -> Self {
        self.nonzero_delta = nonzero_delta;
        self.zero_delta = zero_delta;
        self
    }

    /// Minimize `cost_fn` subject to `constraint`, starting from `initial_values`.
    ///
    /// Points violating `constraint` are scored `+∞` without calling
    /// `cost_fn`.
    pub fn minimize<C, K>(
        &self,
        cost_fn: &mut C,
        constraint: &K,
        initial_values: &[Real],
        end_criteria: &EndCriteria,
    ) -> Result<OptimizationResult>
    where
        C: CostFunction + ?Sized,
        K: Constraint + ?Sized,
    {
        let n = initial_values.len();
        ensure!(n > 0, "simplex needs at least one dimension");
        ensure!(
            initial_values.iter().all(|v| v.is_finite()),
            "initial values must be finite, got {initial_values:?}"
        );

        let mut ev = Evaluator {
            cost_fn,
            constraint,
            evaluations: 0,
        };

        // Initial simplex
        let x0 = DVector::from_column_slice(initial_values);
        let mut vertices: Vec<DVector<Real>> = Vec::with_capacity(n + 1);
        vertices.push(x0.clone());
        for k in 0..n {
            let mut y = x0.clone();
            y[k] = if y[k] != 0.0 {
                (1.0 + self.nonzero_delta) * y[k]
            } else {
                self.zero_delta
            };
            vertices.push(y);
        }
        let mut values: Vec<Real> = vertices.iter().map(|v| ev.eval(v)).collect();
        sort_simplex(&mut vertices, &mut values);

        let mut iterations = 1;
        while ev.evaluations < end_criteria.max_evaluations
            && iterations < end_criteria.max_iterations
        {
            if converged(&vertices, &values, end_criteria) {
                break;
            }

            // Centroid of all but the worst vertex
            let mut centroid: DVector<Real> = DVector::zeros(n);
            for v in &vertices[..n] {
                centroid += v;
            }
            centroid /= n as Real;

            let worst = vertices[n].clone();
            let reflected = &centroid * (1.0 + REFLECTION) - &worst * REFLECTION;
            let fr = ev.eval(&reflected);

            let mut shrink = false;
            if fr < values[0] {
                let expanded = &centroid * (1.0 + REFLECTION * EXPANSION)
                    - &worst * (REFLECTION * EXPANSION);
                let fe = ev.eval(&expanded);
                if fe < fr {
                    vertices[n] = expanded;
                    values[n] = fe;
                } else {
                    vertices[n] = reflected;
                    values[n] = fr;
                }
            } else if fr < values[n - 1] {
                vertices[n] = reflected;
                values[n] = fr;
            } else if fr < values[n] {
                // Outside contraction
                let contracted = &centroid * (1.0 + CONTRACTION * REFLECTION)
                    - &worst * (CONTRACTION * REFLECTION);
                let fc = ev.eval(&contracted);
                if fc <= fr {
                    vertices[n] = contracted;
                    values[n] = fc;
                } else {
                    shrink = true;
                }
            } else {
                // Inside contraction
                let contracted = &centroid * (1.0 - CONTRACTION) + &worst * CONTRACTION;
                let fc = ev.eval(&contracted);
                if fc < values[n] {
                    vertices[n] = contracted;
                    values[n] = fc;
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = vertices[0].clone();
                for j in 1..=n {
                    vertices[j] = &best + (&vertices[j] - &best) * SHRINK;
                    values[j] = ev.eval(&vertices[j]);
                }
            }

            iterations += 1;
            sort_simplex(&mut vertices, &mut values);
        }

        let end_type = if ev.evaluations >= end_criteria.max_evaluations {
            EndCriteriaType::MaxEvaluations
        } else if iterations >= end_criteria.max_iterations {
            EndCriteriaType::MaxIterations
        } else {
            EndCriteriaType::Converged
        };
        tracing::debug!(
            ?end_type,
            iterations,
            evaluations = ev.evaluations,
            value = values[0],
            "simplex finished"
        );

        Ok(OptimizationResult {
            x: vertices[0].as_slice().to_vec(),
            value: values[0],
            iterations,
            evaluations: ev.evaluations,
            end_type,
        })
    }
}

fn converged(vertices: &[DVector<Real>], values: &[Real], ec: &EndCriteria) -> bool {
    let best = &vertices[0];
    let x_spread = vertices[1..]
        .iter()
        .map(|v| (v - best).amax())
        .fold(0.0, Real::max);
    let f_spread = values[1..]
        .iter()
        .map(|f| (f - values[0]).abs())
        .fold(0.0, Real::max);
    x_spread <= ec.x_tolerance && f_spread <= ec.f_tolerance
}

/// Order vertices by ascending value (stable, so ties keep insertion order).
fn sort_simplex(vertices: &mut Vec<DVector<Real>>, values: &mut Vec<Real>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *vertices = order.iter().map(|&i| vertices[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{BoundaryConstraint, NoConstraint};
    use approx::assert_abs_diff_eq;

    /// Rosenbrock: f(x,y) = (1-x)² + 100*(y-x²)²
    fn rosenbrock(x: &[Real]) -> Real {
        (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
    }

    #[test]
    fn simplex_simple_quadratic() {
        let mut f = |x: &[Real]| (x[0] - 3.0).powi(2);
        let ec = EndCriteria::new(1000, 1000, 1e-10, 1e-14);
        let result = Simplex::new()
            .minimize(&mut f, &NoConstraint, &[0.0], &ec)
            .unwrap();
        assert_abs_diff_eq!(result.x[0], 3.0, epsilon = 1e-6);
        assert_eq!(result.end_type, EndCriteriaType::Converged);
    }

    #[test]
    fn simplex_rosenbrock() {
        let mut f = rosenbrock;
        let ec = EndCriteria::new(5000, 10_000, 1e-8, 1e-12);
        let result = Simplex::new()
            .minimize(&mut f, &NoConstraint, &[-1.2, 1.0], &ec)
            .unwrap();
        assert_abs_diff_eq!(result.x[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(result.x[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn evaluation_cap_is_respected() {
        let mut f = rosenbrock;
        let ec = EndCriteria::new(10_000, 40, 1e-12, 1e-12);
        let result = Simplex::new()
            .minimize(&mut f, &NoConstraint, &[-1.2, 1.0], &ec)
            .unwrap();
        assert_eq!(result.end_type, EndCriteriaType::MaxEvaluations);
        // One iteration can add at most n + 1 evaluations past the cap check.
        assert!(result.evaluations <= 40 + 3, "{}", result.evaluations);
    }

    #[test]
    fn iteration_cap_is_respected() {
        let mut f = rosenbrock;
        let ec = EndCriteria::new(5, 10_000, 1e-12, 1e-12);
        let result = Simplex::new()
            .minimize(&mut f, &NoConstraint, &[-1.2, 1.0], &ec)
            .unwrap();
        assert_eq!(result.end_type, EndCriteriaType::MaxIterations);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn infeasible_points_are_never_evaluated() {
        // Unconstrained minimum at x = -2; the box keeps x >= 0.
        let c = BoundaryConstraint::new(vec![0.0], vec![10.0]);
        let mut f = |x: &[Real]| {
            assert!(x[0] >= 0.0, "cost function called at {x:?}");
            (x[0] + 2.0).powi(2)
        };
        let ec = EndCriteria::new(2000, 2000, 1e-10, 1e-14);
        let result = Simplex::new().minimize(&mut f, &c, &[1.0], &ec).unwrap();
        assert!(result.x[0] >= 0.0 && result.x[0] < 1e-4, "x = {}", result.x[0]);
    }

    #[test]
    fn zero_coordinates_get_absolute_step() {
        let mut seen = Vec::new();
        let mut f = |x: &[Real]| {
            seen.push(x[0]);
            x[0] * x[0]
        };
        let ec = EndCriteria::new(1, 100, 1e-8, 1e-8);
        Simplex::new().minimize(&mut f, &NoConstraint, &[0.0], &ec).unwrap();
        assert_eq!(seen, vec![0.0, 0.00025]);
    }

    #[test]
    fn empty_start_is_rejected() {
        let mut f = |_: &[Real]| 0.0;
        let ec = EndCriteria::default();
        assert!(Simplex::new().minimize(&mut f, &NoConstraint, &[], &ec).is_err());
    }
}
