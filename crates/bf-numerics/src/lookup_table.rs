//! One-dimensional lookup tables.

use crate::equation::FnEquation;
use crate::error::{NumericsError, NumericsResult};
use crate::interpolation::{IndexSearch, Interpolation1D, TableMod};
use crate::root_solver::{NewtonRaphson, RootSolution, RootSolver, SolverControls};
use bf_core::Dictionary;

/// Sampled function `y(x)` with an interpolation and boundary policy.
///
/// Samples are stored in transformed space (`xMod`, `mod`); every query maps
/// back through the inverse transform, derivatives included.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable1D {
    xs: Vec<f64>,
    ys: Vec<f64>,
    x_range: (f64, f64),
    x_mod: TableMod,
    y_mod: TableMod,
    scheme: Interpolation1D,
    search: IndexSearch,
}

impl LookupTable1D {
    /// Untransformed table with the bracketing search.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, scheme: Interpolation1D) -> NumericsResult<Self> {
        Self::with_options(
            xs,
            ys,
            scheme,
            IndexSearch::Bracketing,
            TableMod::None,
            TableMod::None,
        )
    }

    pub fn with_options(
        xs: Vec<f64>,
        ys: Vec<f64>,
        scheme: Interpolation1D,
        search: IndexSearch,
        x_mod: TableMod,
        y_mod: TableMod,
    ) -> NumericsResult<Self> {
        if xs.len() < 2 {
            return Err(NumericsError::InvalidTable {
                what: format!("need at least 2 samples, got {}", xs.len()),
            });
        }
        if xs.len() != ys.len() {
            return Err(NumericsError::InvalidTable {
                what: format!("{} x samples but {} y samples", xs.len(), ys.len()),
            });
        }
        let x_range = (xs[0], xs[xs.len() - 1]);

        let xs: Vec<f64> = xs.into_iter().map(|x| x_mod.apply(x)).collect();
        let ys: Vec<f64> = ys.into_iter().map(|y| y_mod.apply(y)).collect();

        if let Some(bad) = xs.iter().chain(&ys).find(|v| !v.is_finite()) {
            return Err(NumericsError::InvalidTable {
                what: format!("non-finite sample {bad} after transform"),
            });
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(NumericsError::InvalidTable {
                what: "x samples must be strictly increasing".to_string(),
            });
        }

        let search = IndexSearch::for_axis(&xs, search);
        Ok(Self {
            xs,
            ys,
            x_range,
            x_mod,
            y_mod,
            scheme,
            search,
        })
    }

    /// Read a table from `table` (rows of `[x, y]`) or from `x` and `y` lists.
    ///
    /// Optional keys: `interpolationScheme` (default `linearClamp`), `search`
    /// (`bracketing` or `literal`), `xMod` and `mod` (default `none`).
    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        let (xs, ys) = if dict.contains("table") {
            let rows = dict.table("table")?;
            let mut xs = Vec::with_capacity(rows.len());
            let mut ys = Vec::with_capacity(rows.len());
            for row in rows {
                match row.as_slice() {
                    [x, y] => {
                        xs.push(*x);
                        ys.push(*y);
                    }
                    _ => {
                        return Err(NumericsError::InvalidTable {
                            what: format!("table rows must be [x, y], got {} values", row.len()),
                        });
                    }
                }
            }
            (xs, ys)
        } else {
            (dict.list("x")?.to_vec(), dict.list("y")?.to_vec())
        };

        Self::with_options(
            xs,
            ys,
            Interpolation1D::from_name(dict.word_or("interpolationScheme", "linearClamp")?)?,
            IndexSearch::from_name(dict.word_or("search", "bracketing")?)?,
            TableMod::from_name(dict.word_or("xMod", "none")?)?,
            TableMod::from_name(dict.word_or("mod", "none")?)?,
        )
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Smallest sampled x (untransformed).
    pub fn x_min(&self) -> f64 {
        self.x_range.0
    }

    /// Largest sampled x (untransformed).
    pub fn x_max(&self) -> f64 {
        self.x_range.1
    }

    pub fn scheme(&self) -> Interpolation1D {
        self.scheme
    }

    pub fn search(&self) -> IndexSearch {
        self.search
    }

    fn locate(&self, x: f64) -> (f64, usize) {
        let xm = self.x_mod.apply(x);
        (xm, self.search.find(xm, &self.xs))
    }

    pub fn lookup(&self, x: f64) -> f64 {
        let (xm, i) = self.locate(x);
        self.y_mod
            .invert(self.scheme.interpolate(xm, i, &self.xs, &self.ys))
    }

    pub fn dfdx(&self, x: f64) -> f64 {
        let (xm, i) = self.locate(x);
        let s = self.scheme.interpolate(xm, i, &self.xs, &self.ys);
        let ds = self.scheme.derivative(xm, i, &self.xs, &self.ys);
        self.y_mod.d_invert(s) * ds * self.x_mod.d_apply(x)
    }

    pub fn d2fdx2(&self, x: f64) -> f64 {
        let (xm, i) = self.locate(x);
        let s = self.scheme.interpolate(xm, i, &self.xs, &self.ys);
        let ds = self.scheme.derivative(xm, i, &self.xs, &self.ys);
        let d2s = self.scheme.second_derivative(xm, i, &self.xs, &self.ys);
        let dm = self.x_mod.d_apply(x);
        let d2m = self.x_mod.d2_apply(x);

        self.y_mod.d2_invert(s) * (ds * dm).powi(2)
            + self.y_mod.d_invert(s) * (d2s * dm * dm + ds * d2m)
    }

    /// Find `x` with `lookup(x) = y` inside the sampled range.
    ///
    /// Requires `y(x)` to be monotonic over the table.
    pub fn reverse_lookup(&self, y: f64) -> RootSolution {
        let (lo, hi) = self.x_range;
        let eqn = FnEquation::new(|x: f64| self.lookup(x) - y)
            .with_derivative(|x: f64| self.dfdx(x))
            .with_limits(lo, hi);
        let solver = NewtonRaphson::new(SolverControls::new(1e-10 * (hi - lo), 100), 1.0);
        solver.solve(&eqn, 0.5 * (lo + hi), lo, hi)
    }
}
