//! Nonlinear solvers and tabulated-function kernels for blastflow.
//!
//! This crate provides the scalar root solvers and minimization schemes used to
//! invert energy/temperature relations cell by cell, a damped multivariate
//! Newton-Raphson solver, and 1-D/2-D lookup tables feeding tabulated
//! thermodynamic closures. Solvers take `&self` and return their iteration
//! scratch in the result, so one instance can be shared across threads.

pub mod equation;
pub mod error;
pub mod interpolation;
pub mod jacobian;
pub mod lookup_table;
pub mod lookup_table_2d;
pub mod minimization;
pub mod multivariate;
pub mod registry;
pub mod root_solver;

pub use equation::{FnEquation, FnMultivariateEquation, MultivariateEquation, ScalarEquation};
pub use error::{NumericsError, NumericsResult};
pub use interpolation::{IndexSearch, Interpolation1D, Interpolation2D, TableMod};
pub use lookup_table::LookupTable1D;
pub use lookup_table_2d::LookupTable2D;
pub use minimization::{
    BisectionMinimization, GoldenRatio, MinimizationScheme, NewtonRaphsonMinimization,
};
pub use multivariate::{MultivariateRootSolver, MultivariateSolution, NewtonRaphsonMultivariate};
pub use registry::{new_minimization_scheme, new_multivariate_root_solver, new_root_solver};
pub use root_solver::{
    Bisection, NewtonRaphson, RootSolution, RootSolver, Secant, SolverControls, Step,
};
