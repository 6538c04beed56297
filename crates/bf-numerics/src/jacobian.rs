//! Finite difference Jacobians for multivariate equations.

use nalgebra::{DMatrix, DVector};

/// Forward finite difference Jacobian.
///
/// Column `j` perturbs `x[j]` by `epsilon * max(|x[j]|, 1)`.
pub fn finite_difference_jacobian<F>(x: &DVector<f64>, f: F, epsilon: f64) -> DMatrix<f64>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = x.len();
    let f_x = f(x);
    let m = f_x.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let mut x_perturbed = x.clone();
        let dx = epsilon * x[j].abs().max(1.0);
        x_perturbed[j] += dx;

        let df = (f(&x_perturbed) - &f_x) / dx;
        jac.set_column(j, &df);
    }

    jac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_coupled() {
        // r = [x0 * x1, x0 + 3 x1], J = [[x1, x0], [1, 3]]
        let f = |x: &DVector<f64>| DVector::from_vec(vec![x[0] * x[1], x[0] + 3.0 * x[1]]);

        let x = DVector::from_vec(vec![2.0, 5.0]);
        let jac = finite_difference_jacobian(&x, f, 1e-7);

        assert!((jac[(0, 0)] - 5.0).abs() < 1e-5);
        assert!((jac[(0, 1)] - 2.0).abs() < 1e-5);
        assert!((jac[(1, 0)] - 1.0).abs() < 1e-5);
        assert!((jac[(1, 1)] - 3.0).abs() < 1e-5);
    }
}
