use super::{Blend, EquationOfState, mie_gruneisen_c_sqr};
use crate::error::{ThermoError, ThermoResult};
use bf_core::constants::PSTD_PA;
use bf_core::{Dictionary, floor_rho};

/// Cochran-Chan Mie-Grüneisen form for condensed explosives.
///
/// Cold curve built from two power laws in `V = rho0 / rho`.
#[derive(Debug, Clone, PartialEq)]
pub struct CochranChan {
    pub rho0: f64,
    pub gamma0: f64,
    pub a: f64,
    pub epsilon1: f64,
    pub b: f64,
    pub epsilon2: f64,
    pub e0: f64,
}

impl CochranChan {
    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        let eos = Self {
            rho0: dict.scalar("rho0")?,
            gamma0: dict.scalar("Gamma0")?,
            a: dict.scalar("A")?,
            epsilon1: dict.scalar("Epsilon1")?,
            b: dict.scalar("B")?,
            epsilon2: dict.scalar("Epsilon2")?,
            e0: dict.scalar_or("e0", 0.0)?,
        };
        if eos.rho0 <= 0.0 {
            return Err(ThermoError::NonPhysical { what: "rho0" });
        }
        if eos.epsilon1 == 1.0 || eos.epsilon2 == 1.0 {
            return Err(ThermoError::InvalidArg {
                what: "CochranChan exponents must differ from 1".to_string(),
            });
        }
        Ok(eos)
    }

    pub fn pi(&self, rho: f64) -> f64 {
        let rhos = floor_rho(rho);
        let v = self.rho0 / rhos;
        let (e1, e2) = (self.epsilon1, self.epsilon2);
        self.gamma0
            * rhos
            * (-self.a / ((1.0 - e1) * self.rho0) * (v.powf(1.0 - e1) - 1.0)
                + self.b / ((1.0 - e2) * self.rho0) * (v.powf(1.0 - e2) - 1.0))
            - self.a * v.powf(-e1)
            + self.b * v.powf(-e2)
            - self.e0 * rhos * self.gamma0
    }

    /// `d Pi / d rho / Gamma0`
    pub fn delta(&self, rho: f64) -> f64 {
        let rhos = floor_rho(rho);
        let v = self.rho0 / rhos;
        let g = self.gamma0;
        let term = |c: f64, eps: f64| {
            c * (eps * v.powf(-eps) * (eps - g - 1.0) / rhos + g / self.rho0) / (eps - 1.0)
        };
        (-term(self.a, self.epsilon1) + term(self.b, self.epsilon2) - g * self.e0) / g
    }
}

impl EquationOfState for CochranChan {
    fn type_name(&self) -> &'static str {
        "CochranChan"
    }

    fn rho0(&self) -> Option<f64> {
        Some(self.rho0)
    }

    fn p(&self, rho: f64, e: f64, _t: f64, limit: bool) -> f64 {
        let p = self.gamma0 * rho * e - self.pi(rho);
        if limit { p.max(0.0) } else { p }
    }

    fn gamma(&self, _rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma0 + 1.0
    }

    fn c_sqr(&self, p: f64, rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        mie_gruneisen_c_sqr(self.gamma0, p, rho, self.pi(rho), self.delta(rho))
    }

    fn dpdv(&self, rho: f64, e: f64, _t: f64) -> f64 {
        -rho * rho * self.gamma0 * (e - self.delta(rho))
    }

    fn dpde(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        self.gamma0 * rho
    }

    fn dpdt(&self, _rho: f64, _e: f64, _t: f64) -> ThermoResult<f64> {
        Err(ThermoError::NotImplemented {
            what: "dpdT",
            model: "CochranChan",
        })
    }

    fn e_correction(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        let v = self.rho0 / floor_rho(rho);
        let (e1, e2) = (self.epsilon1, self.epsilon2);
        self.a / ((e1 - 1.0) * self.rho0) * v.powf(1.0 - e1)
            - self.b / ((e2 - 1.0) * self.rho0) * v.powf(1.0 - e2)
            - self.e0
    }

    fn h_correction(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        let rhos = floor_rho(rho);
        let v = self.rho0 / rhos;
        let g = self.gamma0;
        let term = |c: f64, eps: f64| {
            (eps * (eps - g - 1.0) * v * v.powf(-eps) + (eps - 1.0) * g * rhos.ln()) * c
                / (self.rho0 * (eps - 1.0) * (eps - 1.0))
        };
        term(self.a, self.epsilon1) + term(self.b, self.epsilon2)
    }

    fn cp_m_cv(&self, _rho: f64, _e: f64, _t: f64, cp_cv: f64, e_based: bool) -> f64 {
        if e_based {
            self.gamma0 * cp_cv
        } else {
            cp_cv * self.gamma0 / (self.gamma0 + 1.0)
        }
    }

    fn s(&self, p: f64, _rho: f64, _t: f64, r: f64) -> f64 {
        -r * (p / PSTD_PA).ln()
    }
}

impl Blend for CochranChan {
    fn blend(&self, other: &Self, w1: f64, w2: f64) -> Self {
        let mix = |a: f64, b: f64| w1 * a + w2 * b;
        Self {
            rho0: mix(self.rho0, other.rho0),
            gamma0: mix(self.gamma0, other.gamma0),
            a: mix(self.a, other.a),
            epsilon1: mix(self.epsilon1, other.epsilon1),
            b: mix(self.b, other.b),
            epsilon2: mix(self.epsilon2, other.epsilon2),
            e0: mix(self.e0, other.e0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comp_b() -> CochranChan {
        CochranChan {
            rho0: 1800.0,
            gamma0: 0.93,
            a: 8.19e11,
            epsilon1: 4.52,
            b: 1.51e9,
            epsilon2: 1.42,
            e0: 1.0e5,
        }
    }

    #[test]
    fn pressure_is_thermal_minus_cold() {
        let eos = comp_b();
        for rho in [900.0, 1800.0, 2500.0] {
            for e in [0.0, 1.0e6, 5.0e6] {
                let p = eos.p(rho, e, 300.0, false);
                assert_eq!(p, 0.93 * rho * e - eos.pi(rho));
            }
        }
    }

    #[test]
    fn delta_is_cold_curve_slope() {
        let eos = comp_b();
        for rho in [900.0, 1800.0, 2500.0] {
            let h = 1e-5 * rho;
            let fd = (eos.pi(rho + h) - eos.pi(rho - h)) / (2.0 * h) / eos.gamma0;
            assert!((eos.delta(rho) / fd - 1.0).abs() < 1e-6, "rho = {rho}");
        }
    }

    #[test]
    fn dpdt_is_not_implemented() {
        assert!(matches!(
            comp_b().dpdt(1800.0, 1e6, 300.0),
            Err(ThermoError::NotImplemented { model: "CochranChan", .. })
        ));
    }

    proptest! {
        #[test]
        fn compressed_sound_speed_is_real(rho in 1800.0f64..3000.0, e in 0.0f64..1.0e7) {
            let eos = comp_b();
            let p = eos.p(rho, e, 300.0, false);
            prop_assert!(eos.c_sqr(p, rho, e, 300.0, 0.0) > 0.0);
        }
    }
}
