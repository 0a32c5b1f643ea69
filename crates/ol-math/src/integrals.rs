//! Numerical integration.
//!
//! Provides the [`Integrator`] trait and a globally adaptive Gauss–Kronrod
//! rule (7-point Gauss embedded in a 15-point Kronrod rule). The interval
//! with the largest error estimate is bisected until the summed error falls
//! below `max(absolute, relative · |I|)` or the subinterval budget runs out,
//! in which case an [`Error::Integration`] is returned rather than a
//! silently approximate value.

use ol_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

/// A numerical integrator.
pub trait Integrator {
    /// Integrate `f` on `[a, b]`.
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real>;
}

// ── Gauss-Kronrod 7/15 nodes and weights on [-1, 1] ──────────────────────────

/// Kronrod abscissae, descending; `XGK[1]`, `XGK[3]`, `XGK[5]` and the
/// centre `XGK[7]` are the Gauss nodes.
const XGK: [Real; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [Real; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

const WG: [Real; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// One Gauss-Kronrod pass on `[a, b]`: returns `(kronrod, |kronrod - gauss|)`.
fn gauss_kronrod_15<F: Fn(Real) -> Real>(f: &F, a: Real, b: Real) -> (Real, Real) {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;
    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    (kronrod * half, ((kronrod - gauss) * half).abs())
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: Real,
    b: Real,
    value: Real,
    error: Real,
}

impl Segment {
    fn new<F: Fn(Real) -> Real>(f: &F, a: Real, b: Real) -> Self {
        let (value, error) = gauss_kronrod_15(f, a, b);
        Self { a, b, value, error }
    }
}

// ── Gauss-Kronrod adaptive ───────────────────────────────────────────────────

/// Globally adaptive Gauss–Kronrod (G7/K15) integration.
#[derive(Debug, Clone)]
pub struct GaussKronrodAdaptive {
    absolute_accuracy: Real,
    relative_accuracy: Real,
    max_subintervals: usize,
}

impl GaussKronrodAdaptive {
    /// Default relative tolerance (≈ √ machine epsilon).
    pub const DEFAULT_RELATIVE_ACCURACY: Real = 1.49e-8;

    /// Create a new integrator with an absolute tolerance and a budget on the
    /// number of subintervals.
    pub fn new(absolute_accuracy: Real, max_subintervals: usize) -> Self {
        Self {
            absolute_accuracy,
            relative_accuracy: Self::DEFAULT_RELATIVE_ACCURACY,
            max_subintervals,
        }
    }

    /// Override the relative tolerance.
    pub fn with_relative_accuracy(mut self, relative_accuracy: Real) -> Self {
        self.relative_accuracy = relative_accuracy;
        self
    }

    /// Absolute tolerance.
    pub fn absolute_accuracy(&self) -> Real {
        self.absolute_accuracy
    }

    /// Maximum number of subintervals.
    pub fn max_subintervals(&self) -> usize {
        self.max_subintervals
    }
}

impl Integrator for GaussKronrodAdaptive {
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real> {
        ensure!(
            a.is_finite() && b.is_finite(),
            "integration bounds must be finite, got [{a}, {b}]"
        );
        ensure!(
            self.max_subintervals > 0,
            "subinterval budget must be positive"
        );
        if a == b {
            return Ok(0.0);
        }

        let mut segments = vec![Segment::new(&f, a, b)];
        loop {
            let total: Real = segments.iter().map(|s| s.value).sum();
            let error: Real = segments.iter().map(|s| s.error).sum();
            if !total.is_finite() || !error.is_finite() {
                return Err(Error::Integration(format!(
                    "non-finite integrand on [{a}, {b}]"
                )));
            }

            let tolerance = self
                .absolute_accuracy
                .max(self.relative_accuracy * total.abs());
            if error <= tolerance {
                return Ok(total);
            }
            if segments.len() >= self.max_subintervals {
                return Err(Error::Integration(format!(
                    "no convergence on [{a}, {b}] after {} subintervals \
                     (error estimate {error:.3e}, tolerance {tolerance:.3e})",
                    segments.len()
                )));
            }

            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let seg = segments.swap_remove(worst);
            let mid = 0.5 * (seg.a + seg.b);
            if mid <= seg.a || mid >= seg.b {
                return Err(Error::Integration(format!(
                    "subinterval [{}, {}] cannot be bisected further",
                    seg.a, seg.b
                )));
            }
            segments.push(Segment::new(&f, seg.a, mid));
            segments.push(Segment::new(&f, mid, seg.b));
        }
    }
}
