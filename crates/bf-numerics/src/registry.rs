//! Name-keyed constructor tables for the solver families.
//!
//! Each builder reads the type name from the `solver` key of the given
//! dictionary and passes the whole dictionary on to the constructor.

use crate::error::NumericsResult;
use crate::minimization::{
    BisectionMinimization, GoldenRatio, MinimizationScheme, NewtonRaphsonMinimization,
};
use crate::multivariate::{MultivariateRootSolver, NewtonRaphsonMultivariate};
use crate::root_solver::{Bisection, NewtonRaphson, RootSolver, Secant, Step};
use bf_core::{Dictionary, select};
use tracing::debug;

pub type RootSolverCtor = fn(&Dictionary) -> NumericsResult<Box<dyn RootSolver>>;
pub type MinimizationCtor = fn(&Dictionary) -> NumericsResult<Box<dyn MinimizationScheme>>;
pub type MultivariateCtor = fn(&Dictionary) -> NumericsResult<Box<dyn MultivariateRootSolver>>;

pub const ROOT_SOLVERS: &[(&str, RootSolverCtor)] = &[
    ("NewtonRaphson", NewtonRaphson::boxed),
    ("bisection", Bisection::boxed),
    ("secant", Secant::boxed),
    ("step", Step::boxed),
];

pub const MINIMIZATION_SCHEMES: &[(&str, MinimizationCtor)] = &[
    ("goldenRatio", GoldenRatio::boxed),
    ("bisection", BisectionMinimization::boxed),
    ("NewtonRaphson", NewtonRaphsonMinimization::boxed),
];

pub const MULTIVARIATE_ROOT_SOLVERS: &[(&str, MultivariateCtor)] =
    &[("NewtonRaphson", NewtonRaphsonMultivariate::boxed)];

pub fn new_root_solver(dict: &Dictionary) -> NumericsResult<Box<dyn RootSolver>> {
    let name = dict.word("solver")?;
    debug!("Selecting root solver {name}");
    let ctor = select("rootSolver", name, ROOT_SOLVERS)?;
    ctor(dict)
}

pub fn new_minimization_scheme(dict: &Dictionary) -> NumericsResult<Box<dyn MinimizationScheme>> {
    let name = dict.word("solver")?;
    debug!("Selecting minimization scheme {name}");
    let ctor = select("minimizationScheme", name, MINIMIZATION_SCHEMES)?;
    ctor(dict)
}

pub fn new_multivariate_root_solver(
    dict: &Dictionary,
) -> NumericsResult<Box<dyn MultivariateRootSolver>> {
    let name = dict.word("solver")?;
    debug!("Selecting multivariate root solver {name}");
    let ctor = select("multivariateRootSolver", name, MULTIVARIATE_ROOT_SOLVERS)?;
    ctor(dict)
}
