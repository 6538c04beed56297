//! Scalar root solvers.
//!
//! Every solver works on a borrowed `ScalarEquation` and returns a
//! `RootSolution` carrying the iterate, the step count and the final error.
//! Nothing is stored on the solver between calls, so repeated calls with the
//! same inputs give bit-identical answers and a solver can be shared by
//! threads.

use crate::equation::ScalarEquation;
use crate::error::NumericsResult;
use bf_core::{BfResult, Dictionary};
use std::fmt;
use tracing::{trace, warn};

/// Iteration limits shared by all scalar solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverControls {
    /// Convergence threshold on the solver-specific error measure
    pub tolerance: f64,
    /// Maximum number of iterations before giving up
    pub max_steps: usize,
}

impl Default for SolverControls {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_steps: 100,
        }
    }
}

impl SolverControls {
    pub fn new(tolerance: f64, max_steps: usize) -> Self {
        Self {
            tolerance,
            max_steps,
        }
    }

    /// Read `tolerance` and `maxSteps`, falling back to the defaults.
    pub fn from_dict(dict: &Dictionary) -> BfResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            tolerance: dict.scalar_or("tolerance", defaults.tolerance)?,
            max_steps: dict.label_or("maxSteps", defaults.max_steps)?,
        })
    }

    pub fn converged(&self, error: f64) -> bool {
        error.abs() < self.tolerance
    }
}

/// Outcome of one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    /// Converged value, or the best estimate when `converged` is false
    pub value: f64,
    pub iterations: usize,
    /// Final error measure (step size or bracket width)
    pub error: f64,
    pub converged: bool,
}

impl RootSolution {
    pub fn converged(value: f64, iterations: usize, error: f64) -> Self {
        Self {
            value,
            iterations,
            error,
            converged: true,
        }
    }

    pub fn exhausted(value: f64, iterations: usize, error: f64) -> Self {
        Self {
            value,
            iterations,
            error,
            converged: false,
        }
    }
}

/// Scalar root finding `f(x) = 0`.
pub trait RootSolver: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn controls(&self) -> &SolverControls;

    /// Raw iteration from `x0` inside `[x_low, x_high]`.
    fn find_root(
        &self,
        eqn: &dyn ScalarEquation,
        x0: f64,
        x_low: f64,
        x_high: f64,
    ) -> RootSolution;

    /// Run `find_root` and report non-convergence.
    ///
    /// An unconverged solve still returns its best estimate; the caller decides
    /// whether that is fatal.
    fn solve(&self, eqn: &dyn ScalarEquation, x0: f64, x_low: f64, x_high: f64) -> RootSolution {
        let sol = self.find_root(eqn, x0, x_low, x_high);
        if !sol.converged {
            warn!(
                solver = self.name(),
                value = sol.value,
                error = sol.error,
                iterations = sol.iterations,
                "Root solver did not converge"
            );
        }
        sol
    }

    /// Solve inside the equation's own limits.
    fn solve_from(&self, eqn: &dyn ScalarEquation, x0: f64) -> RootSolution {
        self.solve(eqn, x0, eqn.lower_limit(), eqn.upper_limit())
    }
}

pub(crate) fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn clamp_to(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Damped Newton-Raphson, `x <- x - beta f / f'`.
///
/// When the derivative degenerates or the step leaves a finite bracket the
/// iterate is replaced by a bisection step toward the side holding the sign
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonRaphson {
    controls: SolverControls,
    beta: f64,
}

impl NewtonRaphson {
    pub fn new(controls: SolverControls, beta: f64) -> Self {
        Self { controls, beta }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self {
            controls: SolverControls::from_dict(dict)?,
            beta: dict.scalar_or("beta", 1.0)?,
        })
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn RootSolver>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }

    fn bisect_step(eqn: &dyn ScalarEquation, x: f64, fx: f64, lo: f64, hi: f64) -> f64 {
        if eqn.f(lo) * fx < 0.0 {
            0.5 * (lo + x)
        } else {
            0.5 * (x + hi)
        }
    }
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self::new(SolverControls::default(), 1.0)
    }
}

impl RootSolver for NewtonRaphson {
    fn name(&self) -> &'static str {
        "NewtonRaphson"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn find_root(
        &self,
        eqn: &dyn ScalarEquation,
        x0: f64,
        x_low: f64,
        x_high: f64,
    ) -> RootSolution {
        let (lo, hi) = ordered(x_low, x_high);
        let bracketed = lo.is_finite() && hi.is_finite();
        let mut x = clamp_to(x0, lo, hi);
        let mut error = f64::INFINITY;

        for stepi in 0..self.controls.max_steps {
            let fx = eqn.f(x);
            if fx == 0.0 {
                return RootSolution::converged(x, stepi, 0.0);
            }
            let dfx = eqn.dfdx(x);
            let mut x_new = x - self.beta * fx / dfx;

            if !x_new.is_finite() || x_new < lo || x_new > hi {
                if bracketed {
                    x_new = Self::bisect_step(eqn, x, fx, lo, hi);
                } else if !x_new.is_finite() {
                    return RootSolution::exhausted(x, stepi, error);
                }
            }
            x_new = clamp_to(eqn.limit(x_new, x), lo, hi);

            error = (x_new - x).abs();
            x = x_new;
            trace!(stepi, x, error, "NewtonRaphson");

            if self.controls.converged(error) {
                // A short step only counts if the remaining Newton step is
                // short too; `limit` can pin x far from the root.
                let fx = eqn.f(x);
                let residual = if fx == 0.0 {
                    0.0
                } else {
                    (fx / eqn.dfdx(x)).abs()
                };
                if self.controls.converged(residual) {
                    return RootSolution::converged(x, stepi + 1, error.max(residual));
                }
                if error == 0.0 {
                    return RootSolution::exhausted(x, stepi + 1, residual);
                }
            }
        }

        RootSolution::exhausted(x, self.controls.max_steps, error)
    }
}

/// Interval halving on a sign-changing bracket.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bisection {
    controls: SolverControls,
}

impl Bisection {
    pub fn new(controls: SolverControls) -> Self {
        Self { controls }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self::new(SolverControls::from_dict(dict)?))
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn RootSolver>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl RootSolver for Bisection {
    fn name(&self) -> &'static str {
        "bisection"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn find_root(
        &self,
        eqn: &dyn ScalarEquation,
        x0: f64,
        x_low: f64,
        x_high: f64,
    ) -> RootSolution {
        let (mut a, mut b) = ordered(x_low, x_high);
        if !a.is_finite() || !b.is_finite() {
            return RootSolution::exhausted(x0, 0, f64::INFINITY);
        }

        let mut fa = eqn.f(a);
        let fb = eqn.f(b);
        if fa == 0.0 {
            return RootSolution::converged(a, 0, 0.0);
        }
        if fb == 0.0 {
            return RootSolution::converged(b, 0, 0.0);
        }
        if fa * fb > 0.0 {
            let best = if fa.abs() < fb.abs() { a } else { b };
            return RootSolution::exhausted(best, 0, b - a);
        }

        let mut error = b - a;
        for stepi in 0..self.controls.max_steps {
            let x = 0.5 * (a + b);
            let fx = eqn.f(x);
            if fx == 0.0 {
                return RootSolution::converged(x, stepi + 1, 0.0);
            }
            if fa * fx < 0.0 {
                b = x;
            } else {
                a = x;
                fa = fx;
            }
            error = b - a;
            trace!(stepi, a, b, "bisection");

            if self.controls.converged(error) {
                return RootSolution::converged(0.5 * (a + b), stepi + 1, error);
            }
        }

        RootSolution::exhausted(0.5 * (a + b), self.controls.max_steps, error)
    }
}

/// Secant iteration seeded by a small perturbation of the initial guess.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Secant {
    controls: SolverControls,
}

impl Secant {
    pub fn new(controls: SolverControls) -> Self {
        Self { controls }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self::new(SolverControls::from_dict(dict)?))
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn RootSolver>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl RootSolver for Secant {
    fn name(&self) -> &'static str {
        "secant"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn find_root(
        &self,
        eqn: &dyn ScalarEquation,
        x0: f64,
        x_low: f64,
        x_high: f64,
    ) -> RootSolution {
        let (lo, hi) = ordered(x_low, x_high);
        let mut x_prev = clamp_to(x0, lo, hi);
        let delta = 1e-3 * x_prev.abs().max(1.0);
        let mut x = if x_prev + delta <= hi {
            x_prev + delta
        } else {
            x_prev - delta
        };
        let mut f_prev = eqn.f(x_prev);
        let mut fx = eqn.f(x);
        let mut error = (x - x_prev).abs();

        for stepi in 0..self.controls.max_steps {
            if fx == 0.0 {
                return RootSolution::converged(x, stepi, 0.0);
            }
            let denom = fx - f_prev;
            if denom == 0.0 {
                return RootSolution::exhausted(x, stepi, error);
            }
            let x_new = clamp_to(eqn.limit(x - fx * (x - x_prev) / denom, x), lo, hi);

            error = (x_new - x).abs();
            x_prev = x;
            f_prev = fx;
            x = x_new;
            fx = eqn.f(x);
            trace!(stepi, x, error, "secant");

            if error == 0.0 && fx != 0.0 {
                return RootSolution::exhausted(x, stepi + 1, fx.abs());
            }
            if self.controls.converged(error) {
                return RootSolution::converged(x, stepi + 1, error);
            }
        }

        RootSolution::exhausted(x, self.controls.max_steps, error)
    }
}

/// Fixed-increment march that reverses and halves the step on a sign change.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    controls: SolverControls,
    dx: f64,
}

impl Step {
    pub fn new(controls: SolverControls, dx: f64) -> Self {
        Self { controls, dx }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self {
            controls: SolverControls::from_dict(dict)?,
            dx: dict.scalar("dx")?,
        })
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn RootSolver>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl RootSolver for Step {
    fn name(&self) -> &'static str {
        "step"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn find_root(
        &self,
        eqn: &dyn ScalarEquation,
        x0: f64,
        x_low: f64,
        x_high: f64,
    ) -> RootSolution {
        let (lo, hi) = ordered(x_low, x_high);
        let mut x = clamp_to(x0, lo, hi);
        let mut fx = eqn.f(x);
        if fx == 0.0 {
            return RootSolution::converged(x, 0, 0.0);
        }

        // Head downhill in |f|.
        let mut dx = self.dx.abs();
        if fx * eqn.dfdx(x) > 0.0 {
            dx = -dx;
        }
        let mut error = dx.abs();

        for stepi in 0..self.controls.max_steps {
            let x_new = clamp_to(eqn.limit(x + dx, x), lo, hi);
            let f_new = eqn.f(x_new);
            if f_new == 0.0 {
                return RootSolution::converged(x_new, stepi + 1, 0.0);
            }
            if f_new.signum() != fx.signum() {
                dx = -0.5 * dx;
            } else if x_new == x {
                return RootSolution::exhausted(x, stepi + 1, error);
            }
            x = x_new;
            fx = f_new;
            error = dx.abs();
            trace!(stepi, x, dx, "step");

            if self.controls.converged(error) {
                return RootSolution::converged(x, stepi + 1, error);
            }
        }

        RootSolution::exhausted(x, self.controls.max_steps, error)
    }
}
