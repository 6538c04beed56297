use super::{Blend, EquationOfState, mie_gruneisen_c_sqr};
use crate::error::{ThermoError, ThermoResult};
use bf_core::constants::PSTD_PA;
use bf_core::{Dictionary, floor_rho};

/// Jones-Wilkins-Lee detonation-products equation of state.
///
/// `p = omega rho e - Pi(rho)` with two exponential cold-curve terms in
/// `V = rho0 / rho`. Below `rho_cut_off` the cold curve is switched off and the
/// derivatives follow an ideal gas with `gamma_ideal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Jwl {
    /// Reference density [kg/m^3]
    pub rho0: f64,
    /// Density below which the cold curve is dropped [kg/m^3]
    pub rho_cut_off: f64,
    pub omega: f64,
    pub gamma_ideal: f64,
    /// [Pa]
    pub a: f64,
    /// [Pa]
    pub b: f64,
    pub r1: f64,
    pub r2: f64,
    /// Energy offset [J/kg]
    pub e0: f64,
}

impl Jwl {
    /// Keys: `rho0`, `omega`, `A`, `B`, `R1`, `R2`, optional `rhoCutOff`
    /// (0), `gammaIdeal` (`omega + 1`), `e0` (0).
    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        let omega = dict.scalar("omega")?;
        let jwl = Self {
            rho0: dict.scalar("rho0")?,
            rho_cut_off: dict.scalar_or("rhoCutOff", 0.0)?,
            omega,
            gamma_ideal: dict.scalar_or("gammaIdeal", omega + 1.0)?,
            a: dict.scalar("A")?,
            b: dict.scalar("B")?,
            r1: dict.scalar("R1")?,
            r2: dict.scalar("R2")?,
            e0: dict.scalar_or("e0", 0.0)?,
        };
        if jwl.rho0 <= 0.0 {
            return Err(ThermoError::NonPhysical { what: "rho0" });
        }
        Ok(jwl)
    }

    fn cold(&self, rho: f64) -> bool {
        rho >= self.rho_cut_off
    }

    /// Cold-curve pressure
    pub fn pi(&self, rho: f64) -> f64 {
        if !self.cold(rho) {
            return 0.0;
        }
        let v = self.rho0 / floor_rho(rho);
        self.a * (self.omega / (self.r1 * v) - 1.0) * (-self.r1 * v).exp()
            + self.b * (self.omega / (self.r2 * v) - 1.0) * (-self.r2 * v).exp()
            - self.omega * rho * self.e0
    }

    /// `d Pi / d rho / omega`
    pub fn delta(&self, rho: f64) -> f64 {
        if !self.cold(rho) {
            return 0.0;
        }
        let rhos = floor_rho(rho);
        let (w, rho0) = (self.omega, self.rho0);
        (self.a
            * (-self.r1 * rho0 / rhos).exp()
            * (w * (1.0 / (self.r1 * rho0) + 1.0 / rhos) - self.r1 * rho0 / (rhos * rhos))
            + self.b
                * (-self.r2 * rho0 / rhos).exp()
                * (w * (1.0 / (self.r2 * rho0) + 1.0 / rhos) - self.r2 * rho0 / (rhos * rhos))
            - w * self.e0)
            / w
    }
}

impl EquationOfState for Jwl {
    fn type_name(&self) -> &'static str {
        "JWL"
    }

    fn rho0(&self) -> Option<f64> {
        Some(self.rho0)
    }

    fn p(&self, rho: f64, e: f64, _t: f64, limit: bool) -> f64 {
        let p = self.omega * rho * e - self.pi(rho);
        if limit { p.max(0.0) } else { p }
    }

    fn gamma(&self, _rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.omega + 1.0
    }

    fn c_sqr(&self, p: f64, rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        mie_gruneisen_c_sqr(self.omega, p, rho, self.pi(rho), self.delta(rho))
    }

    fn dpdv(&self, rho: f64, e: f64, _t: f64) -> f64 {
        if !self.cold(rho) {
            return -(self.gamma_ideal - 1.0) * e * rho * rho;
        }
        -rho * rho * self.omega * (e - self.delta(rho))
    }

    fn dpde(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        if !self.cold(rho) {
            return (self.gamma_ideal - 1.0) * rho;
        }
        self.omega * rho
    }

    fn dpdt(&self, _rho: f64, _e: f64, _t: f64) -> ThermoResult<f64> {
        Err(ThermoError::NotImplemented {
            what: "dpdT",
            model: "JWL",
        })
    }

    fn e_correction(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        if !self.cold(rho) {
            return 0.0;
        }
        let v = self.rho0 / floor_rho(rho);
        (self.a / self.r1 * (-self.r1 * v).exp() + self.b / self.r2 * (-self.r2 * v).exp())
            / self.rho0
            - self.e0
    }

    fn h_correction(&self, rho: f64, _e: f64, _t: f64) -> f64 {
        if !self.cold(rho) {
            return 0.0;
        }
        let rhos = floor_rho(rho);
        self.a * (1.0 / rhos + 1.0 / (self.r1 * self.rho0)) * (-self.r1 * self.rho0 / rhos).exp()
            + self.b
                * (1.0 / rhos + 1.0 / (self.r2 * self.rho0))
                * (-self.r2 * self.rho0 / rhos).exp()
            + self.e0 * self.omega * rhos.ln()
    }

    fn cp_m_cv(&self, _rho: f64, _e: f64, _t: f64, cp_cv: f64, e_based: bool) -> f64 {
        if e_based {
            self.omega * cp_cv
        } else {
            cp_cv * self.omega / (self.omega + 1.0)
        }
    }

    fn s(&self, p: f64, _rho: f64, _t: f64, r: f64) -> f64 {
        -r * (p / PSTD_PA).ln()
    }
}

impl Blend for Jwl {
    fn blend(&self, other: &Self, w1: f64, w2: f64) -> Self {
        let mix = |a: f64, b: f64| w1 * a + w2 * b;
        Self {
            rho0: mix(self.rho0, other.rho0),
            rho_cut_off: mix(self.rho_cut_off, other.rho_cut_off),
            omega: mix(self.omega, other.omega),
            gamma_ideal: mix(self.gamma_ideal, other.gamma_ideal),
            a: mix(self.a, other.a),
            b: mix(self.b, other.b),
            r1: mix(self.r1, other.r1),
            r2: mix(self.r2, other.r2),
            e0: mix(self.e0, other.e0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tnt() -> Jwl {
        Jwl {
            rho0: 1630.0,
            rho_cut_off: 1.0,
            omega: 0.3,
            gamma_ideal: 1.4,
            a: 3.712e11,
            b: 3.231e9,
            r1: 4.15,
            r2: 0.95,
            e0: 0.0,
        }
    }

    #[test]
    fn detonation_reference_pressure() {
        // TNT at rho0 with the detonation energy 4.29 MJ/kg: about 8.38 GPa
        let p = tnt().p(1630.0, 4.29e6, 300.0, true);
        assert!((p / 8.381e9 - 1.0).abs() < 0.02, "p = {p}");
    }

    #[test]
    fn cut_off_switches_regime() {
        let eos = tnt();
        let e = 1.0e6;
        // below: pure thermal term, ideal-gas derivatives
        assert_eq!(eos.pi(0.5), 0.0);
        assert_eq!(eos.p(0.5, e, 300.0, false), 0.3 * 0.5 * e);
        assert!((eos.dpde(0.5, e, 300.0) - 0.2).abs() < 1e-12);
        assert!((eos.dpdv(0.5, e, 300.0) + 0.1 * e).abs() < 1e-6);
        assert_eq!(eos.e_correction(0.5, e, 300.0), 0.0);
        // above: cold curve present
        assert!(eos.pi(2.0) != 0.0);
        assert_eq!(eos.dpde(2.0, e, 300.0), 0.3 * 2.0);
    }

    #[test]
    fn delta_is_cold_curve_slope() {
        let eos = tnt();
        for rho in [10.0, 500.0, 1630.0, 2200.0] {
            let h = 1e-4 * rho;
            let fd = (eos.pi(rho + h) - eos.pi(rho - h)) / (2.0 * h);
            assert!(
                (eos.delta(rho) * eos.omega - fd).abs() <= 1e-6 * fd.abs().max(1.0),
                "rho = {rho}"
            );
        }
    }

    #[test]
    fn dpdv_matches_pressure_slope() {
        let eos = tnt();
        let (rho, e) = (1800.0, 3.0e6);
        let h = 1e-4 * rho;
        let dpdrho =
            (eos.p(rho + h, e, 0.0, false) - eos.p(rho - h, e, 0.0, false)) / (2.0 * h);
        let expect = -rho * rho * dpdrho;
        assert!((eos.dpdv(rho, e, 0.0) / expect - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dpdt_is_not_implemented() {
        assert!(matches!(
            tnt().dpdt(1630.0, 1e6, 300.0),
            Err(ThermoError::NotImplemented { what: "dpdT", .. })
        ));
    }
}
