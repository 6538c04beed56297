//! Two-dimensional lookup tables.

use crate::error::{NumericsError, NumericsResult};
use crate::interpolation::{IndexSearch, Interpolation1D, Interpolation2D, TableMod, cubic_stencil};
use bf_core::Dictionary;

/// Sampled function `z(x, y)` on a rectilinear grid, `zs[i][j] = z(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable2D {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<Vec<f64>>,
    x_mod: TableMod,
    y_mod: TableMod,
    z_mod: TableMod,
    scheme: Interpolation2D,
    x_search: IndexSearch,
    y_search: IndexSearch,
}

fn check_axis(name: &str, v: &[f64]) -> NumericsResult<()> {
    if v.len() < 2 {
        return Err(NumericsError::InvalidTable {
            what: format!("{name} axis needs at least 2 samples"),
        });
    }
    if v.iter().any(|s| !s.is_finite()) || v.windows(2).any(|w| w[1] <= w[0]) {
        return Err(NumericsError::InvalidTable {
            what: format!("{name} axis must be finite and strictly increasing"),
        });
    }
    Ok(())
}

impl LookupTable2D {
    pub fn new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        zs: Vec<Vec<f64>>,
        scheme: Interpolation2D,
    ) -> NumericsResult<Self> {
        Self::with_options(
            xs,
            ys,
            zs,
            scheme,
            IndexSearch::Bracketing,
            [TableMod::None; 3],
        )
    }

    /// `mods` are the x, y and z transforms.
    pub fn with_options(
        xs: Vec<f64>,
        ys: Vec<f64>,
        zs: Vec<Vec<f64>>,
        scheme: Interpolation2D,
        search: IndexSearch,
        mods: [TableMod; 3],
    ) -> NumericsResult<Self> {
        let [x_mod, y_mod, z_mod] = mods;
        let xs: Vec<f64> = xs.into_iter().map(|v| x_mod.apply(v)).collect();
        let ys: Vec<f64> = ys.into_iter().map(|v| y_mod.apply(v)).collect();
        check_axis("x", &xs)?;
        check_axis("y", &ys)?;

        if zs.len() != xs.len() || zs.iter().any(|row| row.len() != ys.len()) {
            return Err(NumericsError::InvalidTable {
                what: format!("values must be {} rows of {} samples", xs.len(), ys.len()),
            });
        }
        let zs: Vec<Vec<f64>> = zs
            .into_iter()
            .map(|row| row.into_iter().map(|v| z_mod.apply(v)).collect())
            .collect();

        Ok(Self {
            x_search: IndexSearch::for_axis(&xs, search),
            y_search: IndexSearch::for_axis(&ys, search),
            xs,
            ys,
            zs,
            x_mod,
            y_mod,
            z_mod,
            scheme,
        })
    }

    /// Keys: `x`, `y`, `table` (one row per x sample), optional
    /// `interpolationScheme`, `search`, `xMod`, `yMod`, `mod`.
    pub fn from_dict(dict: &Dictionary) -> NumericsResult<Self> {
        Self::with_options(
            dict.list("x")?.to_vec(),
            dict.list("y")?.to_vec(),
            dict.table("table")?.to_vec(),
            Interpolation2D::from_name(dict.word_or("interpolationScheme", "linearClamp")?)?,
            IndexSearch::from_name(dict.word_or("search", "bracketing")?)?,
            [
                TableMod::from_name(dict.word_or("xMod", "none")?)?,
                TableMod::from_name(dict.word_or("yMod", "none")?)?,
                TableMod::from_name(dict.word_or("mod", "none")?)?,
            ],
        )
    }

    fn locate(&self, x: f64, y: f64) -> (f64, f64, usize, usize) {
        let mut xm = self.x_mod.apply(x);
        let mut ym = self.y_mod.apply(y);
        if self.scheme.clamps() {
            xm = xm.max(self.xs[0]).min(self.xs[self.xs.len() - 1]);
            ym = ym.max(self.ys[0]).min(self.ys[self.ys.len() - 1]);
        }
        let i = self.x_search.find(xm, &self.xs);
        let j = self.y_search.find(ym, &self.ys);
        (xm, ym, i, j)
    }

    /// Rows of the x stencil around interval `i`.
    fn stencil(&self, kernel: Interpolation1D, i: usize) -> std::ops::Range<usize> {
        let n = self.xs.len();
        if kernel == Interpolation1D::CubicExtrapolated && n >= 4 {
            let j = cubic_stencil(i, n);
            j - 1..j + 3
        } else {
            i..i + 2
        }
    }

    /// Interpolate along y in every stencil row (optionally the y-derivative),
    /// then along x (optionally the x-derivative). Result is in z-mod space.
    fn eval(&self, x: f64, y: f64, d_dx: bool, d_dy: bool) -> (f64, f64, f64) {
        let (xm, ym, i, j) = self.locate(x, y);
        let kernel = self.scheme.axis_kernel();
        let rows = self.stencil(kernel, i);
        let sub_x = &self.xs[rows.clone()];
        let local_i = i - rows.start;

        let along_y = |derivative: bool| -> Vec<f64> {
            self.zs[rows.clone()]
                .iter()
                .map(|row| {
                    if derivative {
                        kernel.derivative(ym, j, &self.ys, row)
                    } else {
                        kernel.interpolate(ym, j, &self.ys, row)
                    }
                })
                .collect()
        };

        let g = along_y(false);
        let s = kernel.interpolate(xm, local_i, sub_x, &g);
        let dsdx = if d_dx {
            kernel.derivative(xm, local_i, sub_x, &g)
        } else {
            0.0
        };
        let dsdy = if d_dy {
            kernel.interpolate(xm, local_i, sub_x, &along_y(true))
        } else {
            0.0
        };
        (s, dsdx, dsdy)
    }

    pub fn lookup(&self, x: f64, y: f64) -> f64 {
        let (s, _, _) = self.eval(x, y, false, false);
        self.z_mod.invert(s)
    }

    pub fn dfdx(&self, x: f64, y: f64) -> f64 {
        let (s, dsdx, _) = self.eval(x, y, true, false);
        self.z_mod.d_invert(s) * dsdx * self.x_mod.d_apply(x)
    }

    pub fn dfdy(&self, x: f64, y: f64) -> f64 {
        let (s, _, dsdy) = self.eval(x, y, false, true);
        self.z_mod.d_invert(s) * dsdy * self.y_mod.d_apply(y)
    }
}
