use super::{Blend, EquationOfState};
use crate::error::ThermoResult;
use bf_core::constants::PSTD_PA;
use bf_core::{Dictionary, floor_rho};

/// Calorically perfect gas, `p = (gamma - 1) rho e`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGas {
    gamma: f64,
}

impl IdealGas {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        Ok(Self::new(dict.scalar("gamma")?))
    }

    pub fn gamma0(&self) -> f64 {
        self.gamma
    }
}

impl EquationOfState for IdealGas {
    fn type_name(&self) -> &'static str {
        "idealGas"
    }

    fn p(&self, rho: f64, e: f64, _t: f64, limit: bool) -> f64 {
        let p = (self.gamma - 1.0) * rho * e;
        if limit { p.max(0.0) } else { p }
    }

    fn gamma(&self, _rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma
    }

    fn c_sqr(&self, p: f64, rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma * p / floor_rho(rho)
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

    fn e_correction(&self, _rho: f64, _e: f64, _t: f64) -> f64 {
        0.0
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
        -r * (p / PSTD_PA).ln()
    }
}

impl Blend for IdealGas {
    fn blend(&self, other: &Self, w1: f64, w2: f64) -> Self {
        Self::new(w1 * self.gamma + w2 * other.gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_at_rest() {
        let eos = IdealGas::new(1.4);
        let (rho, e) = (1.2, 2.1e5);
        let p = eos.p(rho, e, 300.0, true);
        assert!((p - 0.4 * rho * e).abs() < 1e-9);
        assert!((eos.c_sqr(p, rho, e, 300.0, 718.0) - 1.4 * p / rho).abs() < 1e-9);
    }

    #[test]
    fn limited_pressure_is_non_negative() {
        let eos = IdealGas::new(1.4);
        assert_eq!(eos.p(1.0, -10.0, 300.0, true), 0.0);
        assert!(eos.p(1.0, -10.0, 300.0, false) < 0.0);
    }
}
