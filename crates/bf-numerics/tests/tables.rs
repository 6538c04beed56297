//! Lookup-table boundary behaviour.

use bf_core::Dictionary;
use bf_numerics::{IndexSearch, Interpolation1D, LookupTable1D};
use proptest::prelude::*;

const XS: [f64; 6] = [0.0, 0.5, 1.5, 2.0, 3.5, 5.0];

fn ys() -> Vec<f64> {
    XS.iter().map(|x| x.sin() + 2.0 * x).collect()
}

fn table(scheme: Interpolation1D) -> LookupTable1D {
    LookupTable1D::new(XS.to_vec(), ys(), scheme).unwrap()
}

#[test]
fn yaml_table_with_literal_search() {
    let dict = Dictionary::from_yaml_str(
        r#"
x: [0.0, 1.0, 3.0, 7.0]
y: [0.0, 1.0, 3.0, 7.0]
interpolationScheme: floor
search: literal
"#,
    )
    .unwrap();
    let t = LookupTable1D::from_dict(&dict).unwrap();
    assert_eq!(t.search(), IndexSearch::Literal);
    // literal scan lands one interval high for interior points
    assert_eq!(t.lookup(2.0), 3.0);
}

#[test]
fn samples_are_reproduced() {
    for scheme in [
        Interpolation1D::LinearClamp,
        Interpolation1D::LinearExtrapolated,
        Interpolation1D::CubicClamp,
        Interpolation1D::CubicExtrapolated,
    ] {
        let t = table(scheme);
        for (x, y) in XS.iter().zip(ys()) {
            assert!((t.lookup(*x) - y).abs() < 1e-12, "{scheme:?} at {x}");
        }
    }
}

proptest! {
    #[test]
    fn clamp_below_returns_first(x in -100.0f64..0.0) {
        let first = ys()[0];
        prop_assert_eq!(table(Interpolation1D::LinearClamp).lookup(x), first);
        prop_assert_eq!(table(Interpolation1D::CubicClamp).lookup(x), first);
    }

    #[test]
    fn clamp_above_returns_last(x in 5.0f64..100.0) {
        let last = ys()[XS.len() - 1];
        prop_assert_eq!(table(Interpolation1D::LinearClamp).lookup(x), last);
        prop_assert_eq!(table(Interpolation1D::CubicClamp).lookup(x), last);
    }

    #[test]
    fn linear_extrapolation_follows_edge_slope(dx in 0.01f64..50.0) {
        let y = ys();
        let t = table(Interpolation1D::LinearExtrapolated);
        let slope_hi = (y[5] - y[4]) / (XS[5] - XS[4]);
        let slope_lo = (y[1] - y[0]) / (XS[1] - XS[0]);
        let expect_hi = y[5] + slope_hi * dx;
        let expect_lo = y[0] - slope_lo * dx;
        prop_assert!((t.lookup(XS[5] + dx) - expect_hi).abs() < 1e-9 * (1.0 + expect_hi.abs()));
        prop_assert!((t.lookup(XS[0] - dx) - expect_lo).abs() < 1e-9 * (1.0 + expect_lo.abs()));
    }
}
