//! Equation objects handed to solvers.

use crate::jacobian::finite_difference_jacobian;
use nalgebra::{DMatrix, DVector};

fn fd_step(x: f64, scale: f64) -> f64 {
    scale * x.abs().max(1.0)
}

/// Scalar function of one unknown.
///
/// Only `f` is required. Derivatives default to central finite differences;
/// implementors with analytic derivatives should override them.
pub trait ScalarEquation: Sync {
    fn f(&self, x: f64) -> f64;

    fn dfdx(&self, x: f64) -> f64 {
        let h = fd_step(x, 1e-6);
        (self.f(x + h) - self.f(x - h)) / (2.0 * h)
    }

    fn d2fdx2(&self, x: f64) -> f64 {
        let h = fd_step(x, 1e-4);
        (self.f(x + h) - 2.0 * self.f(x) + self.f(x - h)) / (h * h)
    }

    fn lower_limit(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn upper_limit(&self) -> f64 {
        f64::INFINITY
    }

    /// Restrict a proposed iterate given the previous one.
    ///
    /// The default only keeps `x` inside `[lower_limit, upper_limit]`.
    fn limit(&self, x: f64, _x_old: f64) -> f64 {
        x.max(self.lower_limit()).min(self.upper_limit())
    }
}

/// Closure-backed scalar equation.
pub struct FnEquation<F, D = fn(f64) -> f64> {
    f: F,
    df: Option<D>,
    lower: f64,
    upper: f64,
}

impl<F> FnEquation<F>
where
    F: Fn(f64) -> f64 + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            df: None,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }
}

impl<F, D> FnEquation<F, D>
where
    F: Fn(f64) -> f64 + Sync,
    D: Fn(f64) -> f64 + Sync,
{
    pub fn with_derivative<D2>(self, df: D2) -> FnEquation<F, D2>
    where
        D2: Fn(f64) -> f64 + Sync,
    {
        FnEquation {
            f: self.f,
            df: Some(df),
            lower: self.lower,
            upper: self.upper,
        }
    }

    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }
}

impl<F, D> ScalarEquation for FnEquation<F, D>
where
    F: Fn(f64) -> f64 + Sync,
    D: Fn(f64) -> f64 + Sync,
{
    fn f(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    fn dfdx(&self, x: f64) -> f64 {
        match &self.df {
            Some(df) => df(x),
            None => {
                let h = fd_step(x, 1e-6);
                (self.f(x + h) - self.f(x - h)) / (2.0 * h)
            }
        }
    }

    fn lower_limit(&self) -> f64 {
        self.lower
    }

    fn upper_limit(&self) -> f64 {
        self.upper
    }
}

/// System of `n` residual equations in `n` unknowns.
pub trait MultivariateEquation: Sync {
    fn n_eqns(&self) -> usize;

    fn residuals(&self, x: &DVector<f64>) -> DVector<f64>;

    /// Jacobian `J[(i, j)] = d r_i / d x_j`, forward differences by default.
    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        finite_difference_jacobian(x, |xp| self.residuals(xp), 1e-7)
    }

    fn lower_limits(&self) -> DVector<f64> {
        DVector::from_element(self.n_eqns(), f64::NEG_INFINITY)
    }

    fn upper_limits(&self) -> DVector<f64> {
        DVector::from_element(self.n_eqns(), f64::INFINITY)
    }
}

/// Closure-backed multivariate equation with finite-difference Jacobian.
pub struct FnMultivariateEquation<F> {
    n: usize,
    residuals: F,
}

impl<F> FnMultivariateEquation<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64> + Sync,
{
    pub fn new(n: usize, residuals: F) -> Self {
        Self { n, residuals }
    }
}

impl<F> MultivariateEquation for FnMultivariateEquation<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64> + Sync,
{
    fn n_eqns(&self) -> usize {
        self.n
    }

    fn residuals(&self, x: &DVector<f64>) -> DVector<f64> {
        (self.residuals)(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cubic;

    impl ScalarEquation for Cubic {
        fn f(&self, x: f64) -> f64 {
            x * x * x
        }
    }

    #[test]
    fn finite_difference_derivatives() {
        let eqn = Cubic;
        assert!((eqn.dfdx(2.0) - 12.0).abs() < 1e-5);
        assert!((eqn.d2fdx2(2.0) - 12.0).abs() < 1e-3);
    }

    #[test]
    fn default_limit_clamps() {
        let eqn = FnEquation::new(|x: f64| x).with_limits(0.0, 1.0);
        assert_eq!(eqn.limit(2.0, 0.5), 1.0);
        assert_eq!(eqn.limit(-2.0, 0.5), 0.0);
        assert_eq!(eqn.limit(0.3, 0.5), 0.3);
    }

    #[test]
    fn analytic_derivative_is_used() {
        let eqn = FnEquation::new(|x: f64| x * x).with_derivative(|_: f64| 42.0);
        assert_eq!(eqn.dfdx(1.0), 42.0);
    }
}
