//! Damped Newton-Raphson for small dense nonlinear systems.

use crate::equation::MultivariateEquation;
use crate::error::{NumericsError, NumericsResult};
use crate::root_solver::SolverControls;
use bf_core::Dictionary;
use nalgebra::DVector;
use std::fmt;
use tracing::{trace, warn};

/// Multivariate iteration result.
#[derive(Debug, Clone, PartialEq)]
pub struct MultivariateSolution {
    /// Solution vector (best estimate when not converged)
    pub values: DVector<f64>,
    pub iterations: usize,
    /// Max-norm of the last update
    pub error: f64,
    pub converged: bool,
}

/// Solve `r(x) = 0` for a vector `x`.
pub trait MultivariateRootSolver: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn controls(&self) -> &SolverControls;

    fn find_roots(
        &self,
        eqn: &dyn MultivariateEquation,
        x0: &DVector<f64>,
        x_low: &DVector<f64>,
        x_high: &DVector<f64>,
    ) -> NumericsResult<MultivariateSolution>;

    fn solve(
        &self,
        eqn: &dyn MultivariateEquation,
        x0: &DVector<f64>,
    ) -> NumericsResult<MultivariateSolution> {
        let sol = self.find_roots(eqn, x0, &eqn.lower_limits(), &eqn.upper_limits())?;
        if !sol.converged {
            warn!(
                solver = self.name(),
                error = sol.error,
                iterations = sol.iterations,
                "Multivariate root solver did not converge"
            );
        }
        Ok(sol)
    }
}

/// Newton step `J dx = -r`, update `x <- x + beta dx`, clamped to the limits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonRaphsonMultivariate {
    controls: SolverControls,
    beta: f64,
}

impl Default for NewtonRaphsonMultivariate {
    fn default() -> Self {
        Self::new(SolverControls::default(), 1.0)
    }
}

impl NewtonRaphsonMultivariate {
    pub fn new(controls: SolverControls, beta: f64) -> Self {
        Self { controls, beta }
    }

    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Ok(Self {
            controls: SolverControls::from_dict(dict)?,
            beta: dict.scalar_or("beta", 1.0)?,
        })
    }

    pub(crate) fn boxed(dict: &Dictionary) -> NumericsResult<Box<dyn MultivariateRootSolver>> {
        Ok(Box::new(Self::from_dict(dict)?))
    }
}

impl MultivariateRootSolver for NewtonRaphsonMultivariate {
    fn name(&self) -> &'static str {
        "NewtonRaphson"
    }

    fn controls(&self) -> &SolverControls {
        &self.controls
    }

    fn find_roots(
        &self,
        eqn: &dyn MultivariateEquation,
        x0: &DVector<f64>,
        x_low: &DVector<f64>,
        x_high: &DVector<f64>,
    ) -> NumericsResult<MultivariateSolution> {
        let n = eqn.n_eqns();
        if x0.len() != n || x_low.len() != n || x_high.len() != n {
            return Err(NumericsError::Dimension {
                what: format!(
                    "expected {n} unknowns, got x0={}, low={}, high={}",
                    x0.len(),
                    x_low.len(),
                    x_high.len()
                ),
            });
        }

        let mut x = x0.zip_zip_map(x_low, x_high, |v, lo, hi| v.max(lo).min(hi));
        let mut error = f64::INFINITY;

        for stepi in 0..self.controls.max_steps {
            let r = eqn.residuals(&x);
            let jac = eqn.jacobian(&x);

            let dx = jac
                .lu()
                .solve(&(-r))
                .ok_or(NumericsError::SingularJacobian { iteration: stepi })?;

            let x_new = (&x + self.beta * dx)
                .zip_zip_map(x_low, x_high, |v, lo, hi| v.max(lo).min(hi));
            error = (&x_new - &x).amax();
            x = x_new;
            trace!(stepi, error, "NewtonRaphson multivariate");

            if self.controls.converged(error) {
                return Ok(MultivariateSolution {
                    values: x,
                    iterations: stepi + 1,
                    error,
                    converged: true,
                });
            }
        }

        Ok(MultivariateSolution {
            values: x,
            iterations: self.controls.max_steps,
            error,
            converged: false,
        })
    }
}
