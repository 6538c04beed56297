use super::{Blend, EquationOfState};
use crate::error::ThermoResult;
use bf_core::constants::PSTD_PA;
use bf_core::{Dictionary, floor_rho};

/// Stiffened gas, `p = (gamma - 1) rho e - gamma a`.
///
/// Used for liquids and dense media; `a` is the stiffening pressure [Pa].
#[derive(Debug, Clone, PartialEq)]
pub struct StiffenedGas {
    gamma: f64,
    a: f64,
}

impl StiffenedGas {
    pub fn new(gamma: f64, a: f64) -> Self {
        Self { gamma, a }
    }

    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        Ok(Self::new(dict.scalar("gamma")?, dict.scalar("a")?))
    }

    /// Cold pressure term
    pub fn pi(&self) -> f64 {
        self.gamma * self.a
    }
}

impl EquationOfState for StiffenedGas {
    fn type_name(&self) -> &'static str {
        "stiffenedGas"
    }

    fn p(&self, rho: f64, e: f64, _t: f64, limit: bool) -> f64 {
        let p = (self.gamma - 1.0) * rho * e - self.pi();
        if limit { p.max(0.0) } else { p }
    }

    fn gamma(&self, _rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma
    }

    fn c_sqr(&self, p: f64, rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma * (p + self.a) / floor_rho(rho)
    }

    fn dpdv(&self, rho: f64, e: f64, _t: f64) -> f64 {
        -(self.gamma - 1.0) * e * rho * rho
    }

    fn dpde(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        (self.gamma - 1.0) * rho
    }

    fn dpdt(&self, _rho: f64, _e: f64, _t: f64) -> ThermoResult<f64> {
        Ok(0.0)
    }

    fn e_correction(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        self.a / floor_rho(rho)
    }

    fn h_correction(&self, _rho: f64, _e: f64, _t: f64) -> f64 {
        0.0
    }

    fn cp_m_cv(&self, _rho: f64, _e: f64, _t: f64, cp_cv: f64, e_based: bool) -> f64 {
        if e_based {
            (self.gamma - 1.0) * cp_cv
        } else {
            cp_cv * (self.gamma - 1.0) / self.gamma
        }
    }

    fn s(&self, p: f64, _rho: f64, _t: f64, r: f64) -> f64 {
        -r * ((p + self.a) / PSTD_PA).ln()
    }
}

impl Blend for StiffenedGas {
    fn blend(&self, other: &Self, w1: f64, w2: f64) -> Self {
        Self::new(
            w1 * self.gamma + w2 * other.gamma,
            w1 * self.a + w2 * other.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> StiffenedGas {
        StiffenedGas::new(4.4, 6.0e8)
    }

    #[test]
    fn pressure_identity() {
        let eos = water();
        let (rho, e) = (1000.0, 6.9e5);
        let p = eos.p(rho, e, 300.0, false);
        assert!((p - (3.4 * rho * e - 4.4 * 6.0e8)).abs() < 1e-3);
    }

    #[test]
    fn sound_speed_of_water() {
        let eos = water();
        let c2 = eos.c_sqr(1.0e5, 1000.0, 0.0, 300.0, 0.0);
        let c = c2.sqrt();
        assert!(c > 1500.0 && c < 1700.0, "c = {c}");
    }
}
