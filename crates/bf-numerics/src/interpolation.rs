//! Index search, value transforms and interpolation kernels.
//!
//! Kernels operate on borrowed sample arrays with an interval index `i`
//! already found by an `IndexSearch`, so a table picks its kernels once at
//! construction and the hot path is a match on a small enum.

use bf_core::{BfResult, select};
use std::f64::consts::LN_10;

/// How a table locates the interval containing `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSearch {
    /// Direct arithmetic on evenly spaced samples.
    Uniform,
    /// Linear scan for the first sample strictly above `x`.
    ///
    /// Returns one interval past the bracketing one for interior points.
    /// Kept for compatibility with tables tuned against that behaviour.
    Literal,
    /// Binary search for `xs[i] <= x < xs[i + 1]`.
    Bracketing,
}

impl IndexSearch {
    const NAMES: &'static [(&'static str, IndexSearch)] =
        &[("bracketing", Self::Bracketing), ("literal", Self::Literal)];

    /// Nonuniform search policy by configuration name.
    pub fn from_name(name: &str) -> BfResult<Self> {
        select("search", name, Self::NAMES).copied()
    }

    /// Use the uniform fast path when `xs` is evenly spaced, `nonuniform`
    /// otherwise.
    pub fn for_axis(xs: &[f64], nonuniform: IndexSearch) -> Self {
        if is_uniform(xs) {
            Self::Uniform
        } else {
            nonuniform
        }
    }

    /// Interval index in `[0, N - 2]`. `xs` must hold at least two samples.
    pub fn find(self, x: f64, xs: &[f64]) -> usize {
        let last = xs.len() - 2;
        match self {
            Self::Uniform => {
                let ij = (x - xs[0]) / (xs[1] - xs[0]);
                if ij <= 0.0 {
                    0
                } else {
                    (ij.floor() as usize).min(last)
                }
            }
            Self::Literal => {
                if x < xs[0] {
                    return 0;
                }
                (0..=last)
                    .find(|&ij| x < xs[ij] && x < xs[ij + 1])
                    .unwrap_or(last)
            }
            Self::Bracketing => xs.partition_point(|&v| v <= x).saturating_sub(1).min(last),
        }
    }
}

/// True when the spacing of `xs` is constant to a relative 1e-8.
pub fn is_uniform(xs: &[f64]) -> bool {
    if xs.len() < 2 {
        return false;
    }
    let dx = xs[1] - xs[0];
    xs.windows(2)
        .all(|w| ((w[1] - w[0]) - dx).abs() <= 1e-8 * dx.abs())
}

/// Transform applied to table samples before interpolation.
///
/// A table stores `apply(v)` and interpolates in the transformed space;
/// `invert` maps back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMod {
    #[default]
    None,
    Log10,
    Ln,
    Exp,
    Pow10,
}

impl TableMod {
    const NAMES: &'static [(&'static str, TableMod)] = &[
        ("none", Self::None),
        ("log10", Self::Log10),
        ("ln", Self::Ln),
        ("exp", Self::Exp),
        ("pow10", Self::Pow10),
    ];

    pub fn from_name(name: &str) -> BfResult<Self> {
        select("mod", name, Self::NAMES).copied()
    }

    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::None => v,
            Self::Log10 => v.log10(),
            Self::Ln => v.ln(),
            Self::Exp => v.exp(),
            Self::Pow10 => 10f64.powf(v),
        }
    }

    pub fn invert(self, s: f64) -> f64 {
        match self {
            Self::None => s,
            Self::Log10 => 10f64.powf(s),
            Self::Ln => s.exp(),
            Self::Exp => s.ln(),
            Self::Pow10 => s.log10(),
        }
    }

    /// d apply / dv
    pub fn d_apply(self, v: f64) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Log10 => 1.0 / (v * LN_10),
            Self::Ln => 1.0 / v,
            Self::Exp => v.exp(),
            Self::Pow10 => LN_10 * 10f64.powf(v),
        }
    }

    /// d2 apply / dv2
    pub fn d2_apply(self, v: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Log10 => -1.0 / (v * v * LN_10),
            Self::Ln => -1.0 / (v * v),
            Self::Exp => v.exp(),
            Self::Pow10 => LN_10 * LN_10 * 10f64.powf(v),
        }
    }

    /// d invert / ds
    pub fn d_invert(self, s: f64) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Log10 => LN_10 * 10f64.powf(s),
            Self::Ln => s.exp(),
            Self::Exp => 1.0 / s,
            Self::Pow10 => 1.0 / (s * LN_10),
        }
    }

    /// d2 invert / ds2
    pub fn d2_invert(self, s: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Log10 => LN_10 * LN_10 * 10f64.powf(s),
            Self::Ln => s.exp(),
            Self::Exp => -1.0 / (s * s),
            Self::Pow10 => -1.0 / (s * s * LN_10),
        }
    }
}

/// 1-D interpolation kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation1D {
    #[default]
    LinearClamp,
    LinearExtrapolated,
    CubicClamp,
    CubicExtrapolated,
    /// Upper sample of the interval
    Ceil,
    /// Lower sample of the interval
    Floor,
}

impl Interpolation1D {
    const NAMES: &'static [(&'static str, Interpolation1D)] = &[
        ("linearClamp", Self::LinearClamp),
        ("linearExtrapolated", Self::LinearExtrapolated),
        ("cubicClamp", Self::CubicClamp),
        ("cubicExtrapolated", Self::CubicExtrapolated),
        ("ceil", Self::Ceil),
        ("floor", Self::Floor),
    ];

    pub fn from_name(name: &str) -> BfResult<Self> {
        select("interpolationScheme", name, Self::NAMES).copied()
    }

    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, s)| *s == self)
            .map_or("linearClamp", |(n, _)| n)
    }

    pub fn clamps(self) -> bool {
        matches!(self, Self::LinearClamp | Self::CubicClamp)
    }

    fn is_cubic(self, n: usize) -> bool {
        n >= 4 && matches!(self, Self::CubicClamp | Self::CubicExtrapolated)
    }

    /// Interpolated value at `x` in interval `i`.
    pub fn interpolate(self, x: f64, i: usize, xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len();
        if n == 1 {
            return ys[0];
        }
        match self {
            Self::Ceil => return ys[i + 1],
            Self::Floor => {
                return if x >= xs[n - 1] { ys[n - 1] } else { ys[i] };
            }
            _ => {}
        }
        if self.clamps() {
            if x <= xs[0] {
                return ys[0];
            }
            if x >= xs[n - 1] {
                return ys[n - 1];
            }
        }
        if self.is_cubic(n) {
            let j = cubic_stencil(i, n);
            lagrange(x, &xs[j - 1..j + 3], &ys[j - 1..j + 3], 0)
        } else {
            linear(x, xs[i], xs[i + 1], ys[i], ys[i + 1])
        }
    }

    /// First derivative of the local interpolant at `x`.
    ///
    /// Outside the table this is the slope of the edge interpolant, also for
    /// the clamped kernels.
    pub fn derivative(self, x: f64, i: usize, xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len();
        if n == 1 || matches!(self, Self::Ceil | Self::Floor) {
            return 0.0;
        }
        if self.is_cubic(n) {
            let j = cubic_stencil(i, n);
            lagrange(x, &xs[j - 1..j + 3], &ys[j - 1..j + 3], 1)
        } else {
            slope(i, xs, ys)
        }
    }

    /// Second derivative of the local interpolant at `x`.
    ///
    /// Piecewise linear kernels estimate it from the slopes of neighbouring
    /// intervals.
    pub fn second_derivative(self, x: f64, i: usize, xs: &[f64], ys: &[f64]) -> f64 {
        let n = xs.len();
        if n < 3 || matches!(self, Self::Ceil | Self::Floor) {
            return 0.0;
        }
        if self.is_cubic(n) {
            let j = cubic_stencil(i, n);
            lagrange(x, &xs[j - 1..j + 3], &ys[j - 1..j + 3], 2)
        } else {
            let j = i.min(n - 3);
            (slope(j + 1, xs, ys) - slope(j, xs, ys)) / (0.5 * (xs[j + 2] - xs[j]))
        }
    }
}

/// 2-D interpolation kernel (tensor product of 1-D kernels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation2D {
    #[default]
    LinearClamp,
    LinearExtrapolated,
    CubicClamp,
    CubicExtrapolated,
}

impl Interpolation2D {
    const NAMES: &'static [(&'static str, Interpolation2D)] = &[
        ("linearClamp", Self::LinearClamp),
        ("linearExtrapolated", Self::LinearExtrapolated),
        ("cubicClamp", Self::CubicClamp),
        ("cubicExtrapolated", Self::CubicExtrapolated),
    ];

    pub fn from_name(name: &str) -> BfResult<Self> {
        select("interpolationScheme", name, Self::NAMES).copied()
    }

    pub fn clamps(self) -> bool {
        matches!(self, Self::LinearClamp | Self::CubicClamp)
    }

    /// Unclamped 1-D kernel applied along each axis.
    pub fn axis_kernel(self) -> Interpolation1D {
        match self {
            Self::LinearClamp | Self::LinearExtrapolated => Interpolation1D::LinearExtrapolated,
            Self::CubicClamp | Self::CubicExtrapolated => Interpolation1D::CubicExtrapolated,
        }
    }
}

/// Pin the 4-point stencil start so `j - 1 .. j + 2` stays in the table.
pub fn cubic_stencil(i: usize, n: usize) -> usize {
    i.max(1).min(n - 3)
}

fn linear(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

fn slope(i: usize, xs: &[f64], ys: &[f64]) -> f64 {
    (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
}

/// Lagrange cubic through four points, or its first/second derivative.
fn lagrange(x: f64, xs: &[f64], ys: &[f64], order: u8) -> f64 {
    let mut sum = 0.0;
    for k in 0..4 {
        let mut others = [0.0; 3];
        let mut denom = 1.0;
        let mut m = 0;
        for (l, &xl) in xs.iter().enumerate() {
            if l != k {
                others[m] = x - xl;
                denom *= xs[k] - xl;
                m += 1;
            }
        }
        let [a, b, c] = others;
        let basis = match order {
            0 => a * b * c,
            1 => b * c + a * c + a * b,
            _ => 2.0 * (a + b + c),
        };
        sum += ys[k] * basis / denom;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

    #[test]
    fn uniform_and_bracketing_agree() {
        let xs = [0.0, 0.5, 1.0, 1.5, 2.0];
        for &x in &[-1.0, 0.0, 0.2, 0.5, 0.99, 1.7, 2.0, 5.0] {
            assert_eq!(
                IndexSearch::Uniform.find(x, &xs),
                IndexSearch::Bracketing.find(x, &xs),
                "x = {x}"
            );
        }
    }

    #[test]
    fn literal_search_is_one_past_interior_bracket() {
        let xs = [0.0, 1.0, 3.0, 7.0];
        assert_eq!(IndexSearch::Bracketing.find(2.0, &xs), 1);
        assert_eq!(IndexSearch::Literal.find(2.0, &xs), 2);
        assert_eq!(IndexSearch::Literal.find(-1.0, &xs), 0);
        assert_eq!(IndexSearch::Literal.find(10.0, &xs), 2);
    }

    #[test]
    fn uniform_detection() {
        assert!(is_uniform(&XS));
        assert!(!is_uniform(&[0.0, 1.0, 3.0]));
        assert_eq!(IndexSearch::for_axis(&XS, IndexSearch::Literal), IndexSearch::Uniform);
    }

    #[test]
    fn cubic_reproduces_cubic_polynomial() {
        let f = |x: f64| 2.0 * x * x * x - x * x + 3.0;
        let ys: Vec<f64> = XS.iter().map(|&x| f(x)).collect();
        for &x in &[0.3, 1.5, 2.2, 3.9] {
            let i = IndexSearch::Bracketing.find(x, &XS);
            let s = Interpolation1D::CubicExtrapolated;
            assert!((s.interpolate(x, i, &XS, &ys) - f(x)).abs() < 1e-10);
            assert!((s.derivative(x, i, &XS, &ys) - (6.0 * x * x - 2.0 * x)).abs() < 1e-9);
            assert!((s.second_derivative(x, i, &XS, &ys) - (12.0 * x - 2.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn ceil_and_floor() {
        let ys = [10.0, 11.0, 12.0, 13.0, 14.0];
        let i = IndexSearch::Bracketing.find(1.5, &XS);
        assert_eq!(Interpolation1D::Ceil.interpolate(1.5, i, &XS, &ys), 12.0);
        assert_eq!(Interpolation1D::Floor.interpolate(1.5, i, &XS, &ys), 11.0);
        let last = IndexSearch::Bracketing.find(9.0, &XS);
        assert_eq!(Interpolation1D::Floor.interpolate(9.0, last, &XS, &ys), 14.0);
    }

    #[test]
    fn unknown_scheme_lists_options() {
        let err = Interpolation1D::from_name("quadratic").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("quadratic"));
        assert!(msg.contains("cubicExtrapolated"));
        assert!(Interpolation2D::from_name("ceil").is_err());
    }

    #[test]
    fn mod_roundtrip_derivatives() {
        for m in [TableMod::Log10, TableMod::Ln, TableMod::Exp, TableMod::Pow10] {
            let v = 1.7;
            let s = m.apply(v);
            assert!((m.invert(s) - v).abs() < 1e-12);
            // inverse function rule
            assert!((m.d_invert(s) * m.d_apply(v) - 1.0).abs() < 1e-12);
        }
    }
}
