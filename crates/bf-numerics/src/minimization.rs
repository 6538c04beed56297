//! Scalar minimization schemes.

use crate::equation::ScalarEquation;
use crate::error::NumericsResult;
use crate::root_solver::{RootSolution, SolverControls, ordered};
use bf_core::Dictionary;
use std::fmt;
use tracing::{trace, warn};

/// Minimize `f(x)` on `[x1, x2]`.
pub trait MinimizationScheme: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn controls(&self) -> &SolverControls;

    /// Raw iteration; `x` is an initial guess used by gradient schemes.
    fn minimize(&self, eqn: &dyn ScalarEquation, x: f64, x1: f64, x2: f64) -> RootSolution;

    fn solve(&self, eqn: &dyn ScalarEquation, x: f64, x1: f64, x2: f64) -> RootSolution {
        let sol = self.minimize(eqn, x, x1, x2);
        if !sol.converged {
            warn!(
                scheme = self.name(),
                value = sol.value,
                error = sol.error,
                iterations = sol.iterations,
                "Minimization did not converge"
            );
        }
        sol
    }
}

/// Golden-section search.
///
/// The bracket shrinks by `INV_PHI` per step, so the number of steps to reach
/// `tolerance` is computed up front. That count is capped at `max_steps`; a
/// capped run ends with a bracket wider than `tolerance` and is reported as
/// not converged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoldenRatio {
    controls: SolverControls,
}

impl GoldenRatio {
    /// (sqrt(5) - 1) / 2
    pub const INV_PHI: f64 = 0.618_033_988_749_894_9;
    /// (3 - sqrt(5)) / 2
    pub const INV_PHI2: f64 = 0.381_966_011_250_105_1;

    pub fn new(controls: SolverControls) -> Self {
        Self { controls }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self::new(SolverControls::from_dict(dict)?))
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn MinimizationScheme>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl MinimizationScheme for GoldenRatio {
    fn name(&self) -> &'static str {
        "goldenRatio"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn minimize(&self, eqn: &dyn ScalarEquation, _x: f64, x1: f64, x2: f64) -> RootSolution {
        let (mut a, mut b) = ordered(x1, x2);
        let mut h = b - a;
        let tol = self.controls.tolerance;
        if h < tol {
            return RootSolution::converged(x1, 0, h);
        }

        let n = ((tol / h).ln() / Self::INV_PHI.ln()).ceil() as usize;
        let n = n.min(self.controls.max_steps);

        let mut c = a + Self::INV_PHI2 * h;
        let mut d = a + Self::INV_PHI * h;
        let mut yc = eqn.f(c);
        let mut yd = eqn.f(d);

        for stepi in 0..n {
            if yc < yd {
                b = d;
                d = c;
                yd = yc;
                h *= Self::INV_PHI;
                c = a + Self::INV_PHI2 * h;
                yc = eqn.f(c);
            } else {
                a = c;
                c = d;
                yc = yd;
                h *= Self::INV_PHI;
                d = a + Self::INV_PHI * h;
                yd = eqn.f(d);
            }
            trace!(stepi, a, b, "goldenRatio");
        }

        let error = b - a;
        let value = 0.5 * (a + b);
        if self.controls.converged(error) {
            RootSolution::converged(value, n, error)
        } else {
            RootSolution::exhausted(value, n, error)
        }
    }
}

/// Bisection on the sign of `f'(x)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BisectionMinimization {
    controls: SolverControls,
}

impl BisectionMinimization {
    pub fn new(controls: SolverControls) -> Self {
        Self { controls }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self::new(SolverControls::from_dict(dict)?))
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn MinimizationScheme>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl MinimizationScheme for BisectionMinimization {
    fn name(&self) -> &'static str {
        "bisection"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn minimize(&self, eqn: &dyn ScalarEquation, _x: f64, x1: f64, x2: f64) -> RootSolution {
        let (mut a, mut b) = ordered(x1, x2);
        let mut error = b - a;

        for stepi in 0..self.controls.max_steps {
            if self.controls.converged(error) {
                return RootSolution::converged(0.5 * (a + b), stepi, error);
            }
            let m = 0.5 * (a + b);
            if eqn.dfdx(m) > 0.0 {
                b = m;
            } else {
                a = m;
            }
            error = b - a;
            trace!(stepi, a, b, "bisection minimization");
        }

        let value = 0.5 * (a + b);
        if self.controls.converged(error) {
            RootSolution::converged(value, self.controls.max_steps, error)
        } else {
            RootSolution::exhausted(value, self.controls.max_steps, error)
        }
    }
}

/// Newton-Raphson on `f'(x) = 0`, damped by `beta`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonRaphsonMinimization {
    controls: SolverControls,
    beta: f64,
}

impl NewtonRaphsonMinimization {
    pub fn new(controls: SolverControls, beta: f64) -> Self {
        Self { controls, beta }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self {
            controls: SolverControls::from_dict(dict)?,
            beta: dict.scalar_or("beta", 1.0)?,
        })
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn MinimizationScheme>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl MinimizationScheme for NewtonRaphsonMinimization {
    fn name(&self) -> &'static str {
        "NewtonRaphson"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn minimize(&self, eqn: &dyn ScalarEquation, x: f64, x1: f64, x2: f64) -> RootSolution {
        let (lo, hi) = ordered(x1, x2);
        let mut x = x.max(lo).min(hi);
        let mut error = f64::INFINITY;

        for stepi in 0..self.controls.max_steps {
            let d2 = eqn.d2fdx2(x);
            let step = self.beta * eqn.dfdx(x) / d2;
            if !step.is_finite() {
                return RootSolution::exhausted(x, stepi, error);
            }
            let x_new = eqn.limit(x - step, x).max(lo).min(hi);
            error = (x_new - x).abs();
            x = x_new;
            trace!(stepi, x, error, "NewtonRaphson minimization");

            if self.controls.converged(error) {
                return RootSolution::converged(x, stepi + 1, error);
            }
        }

        RootSolution::exhausted(x, self.controls.max_steps, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::FnEquation;

    fn parabola() -> FnEquation<impl Fn(f64) -> f64 + Sync> {
        FnEquation::new(|x: f64| (x - 3.7) * (x - 3.7))
    }

    #[test]
    fn golden_ratio_parabola() {
        let scheme = GoldenRatio::new(SolverControls::new(1e-8, 200));
        let sol = scheme.solve(&parabola(), 0.0, 0.0, 10.0);
        assert!(sol.converged);
        assert!((sol.value - 3.7).abs() < 1e-8);
    }

    #[test]
    fn golden_ratio_narrow_bracket_returns_first_point() {
        let scheme = GoldenRatio::new(SolverControls::new(1e-3, 100));
        let sol = scheme.solve(&parabola(), 0.0, 2.0, 2.0005);
        assert!(sol.converged);
        assert_eq!(sol.value, 2.0);
        assert_eq!(sol.iterations, 0);
    }

    #[test]
    fn bisection_on_gradient() {
        let scheme = BisectionMinimization::new(SolverControls::new(1e-8, 200));
        let sol = scheme.solve(&parabola(), 0.0, 10.0, 0.0);
        assert!(sol.converged);
        assert!((sol.value - 3.7).abs() < 1e-7);
    }

    #[test]
    fn newton_minimization_parabola() {
        let scheme = NewtonRaphsonMinimization::new(SolverControls::new(1e-8, 50), 1.0);
        let sol = scheme.solve(&parabola(), 1.0, 0.0, 10.0);
        assert!(sol.converged);
        assert!((sol.value - 3.7).abs() < 1e-6);
    }
}
