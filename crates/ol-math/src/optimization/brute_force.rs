//! Exhaustive grid search.
//!
//! Each axis is a half-open range `[start, stop)` sampled at
//! `start + k·step`. Points are visited in row-major order (the last axis
//! varies fastest) and the first point attaining the minimum wins.

use ol_core::{ensure, errors::Result, Real};

use super::{CostFunction, EndCriteriaType, OptimizationResult};

/// One axis of a search grid: `start, start + step, …` while `< stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// First sampled value.
    pub start: Real,
    /// Exclusive upper limit.
    pub stop: Real,
    /// Spacing between samples.
    pub step: Real,
}

impl ParameterRange {
    /// Create a range. Validation happens in [`validate`](Self::validate).
    pub const fn new(start: Real, stop: Real, step: Real) -> Self {
        Self { start, stop, step }
    }

    /// Check that the range is finite, has a positive step and is non-empty.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.start.is_finite() && self.stop.is_finite() && self.step.is_finite(),
            "range bounds must be finite, got {self:?}"
        );
        ensure!(self.step > 0.0, "range step must be positive, got {}", self.step);
        ensure!(
            self.stop > self.start,
            "range [{}, {}) is empty",
            self.start,
            self.stop
        );
        Ok(())
    }

    /// Number of sampled points.
    pub fn len(&self) -> usize {
        if self.step <= 0.0 || self.stop <= self.start {
            return 0;
        }
        ((self.stop - self.start) / self.step).ceil() as usize
    }

    /// `true` when the range samples nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the `k`-th sample.
    pub fn value(&self, k: usize) -> Real {
        self.start + k as Real * self.step
    }

    /// All sampled values.
    pub fn points(&self) -> Vec<Real> {
        (0..self.len()).map(|k| self.value(k)).collect()
    }
}

/// Exhaustive grid-search minimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Create a grid-search minimizer.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `cost_fn` at every point of the Cartesian grid spanned by
    /// `ranges` and return the best one.
    ///
    /// NaN values never win; if every value is NaN the first grid point is
    /// returned with a NaN value.
    pub fn minimize<C>(
        &self,
        cost_fn: &mut C,
        ranges: &[ParameterRange],
    ) -> Result<OptimizationResult>
    where
        C: CostFunction + ?Sized,
    {
        ensure!(!ranges.is_empty(), "grid search needs at least one range");
        for r in ranges {
            r.validate()?;
        }

        let sizes: Vec<usize> = ranges.iter().map(ParameterRange::len).collect();
        let total: usize = sizes.iter().product();
        tracing::debug!(points = total, ?sizes, "starting grid search");

        let mut index = vec![0usize; ranges.len()];
        let mut point: Vec<Real> = ranges.iter().map(|r| r.start).collect();
        let mut best_x = point.clone();
        let mut best_value = Real::NAN;

        for evaluation in 0..total {
            let v = cost_fn.value(&point);
            if evaluation == 0 || v < best_value || (best_value.is_nan() && !v.is_nan()) {
                best_value = v;
                best_x.copy_from_slice(&point);
            }

            // Odometer step, last axis fastest
            for axis in (0..ranges.len()).rev() {
                index[axis] += 1;
                if index[axis] < sizes[axis] {
                    point[axis] = ranges[axis].value(index[axis]);
                    break;
                }
                index[axis] = 0;
                point[axis] = ranges[axis].start;
            }
        }

        Ok(OptimizationResult {
            x: best_x,
            value: best_value,
            iterations: total,
            evaluations: total,
            end_type: EndCriteriaType::GridExhausted,
        })
    }
}
