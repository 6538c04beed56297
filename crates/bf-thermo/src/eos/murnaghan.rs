use super::{Blend, EquationOfState};
use crate::error::{ThermoError, ThermoResult};
use bf_core::{BfError, Dictionary, floor_rho};

/// Murnaghan isothermal solid.
///
/// Pressure depends on density only; energy and temperature do not
/// enter. Tension is allowed so `limit` is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Murnaghan {
    pub rho0: f64,
    pub p_ref: f64,
    /// Compressibility `1 / K0` [1/Pa]
    pub kappa: f64,
    /// Bulk modulus slope `K0'`
    pub n: f64,
    pub gamma: f64,
}

impl Murnaghan {
    /// Accepts either `K0` or `kappa`, and either `K0Prime` or `n`.
    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        let kappa = if dict.contains("K0") {
            1.0 / dict.scalar("K0")?
        } else if dict.contains("kappa") {
            dict.scalar("kappa")?
        } else {
            return Err(BfError::MissingKey {
                key: "K0".to_string(),
            }
            .into());
        };
        let n = if dict.contains("K0Prime") {
            dict.scalar("K0Prime")?
        } else {
            dict.scalar("n")?
        };
        let eos = Self {
            rho0: dict.scalar("rho0")?,
            p_ref: dict.scalar_or("pRef", 0.0)?,
            kappa,
            n,
            gamma: dict.scalar("Gamma")?,
        };
        if eos.rho0 <= 0.0 || !(eos.kappa > 0.0) {
            return Err(ThermoError::NonPhysical {
                what: "rho0 or K0",
            });
        }
        if eos.n == 0.0 {
            return Err(ThermoError::InvalidArg {
                what: "Murnaghan K0Prime must be non-zero".to_string(),
            });
        }
        Ok(eos)
    }
}

impl EquationOfState for Murnaghan {
    fn type_name(&self) -> &'static str {
        "Murnaghan"
    }

    fn temperature_based(&self) -> bool {
        true
    }

    fn solid(&self) -> bool {
        true
    }

    fn rho0(&self) -> Option<f64> {
        Some(self.rho0)
    }

    fn p(&self, rho: f64, _e: f64, _t: f64, _limit: bool) -> f64 {
        self.p_ref + ((rho / self.rho0).powf(self.n) - 1.0) / (self.kappa * self.n)
    }

    fn gamma(&self, _rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma
    }

    fn c_sqr(&self, _p: f64, rho: f64, _e: f64, _t: f64, _cv: f64) -> f64 {
        (floor_rho(rho) / self.rho0).powf(self.n - 1.0) / (self.kappa * self.rho0)
    }

    fn dpdv(&self, rho: f64, e: f64, t: f64) -> f64 {
        -rho * rho * self.c_sqr(0.0, rho, e, t, 0.0)
    }

    fn dpde(&self, _rho: f64, _e: f64, _t: f64) -> f64 {
        0.0
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

    fn cp_m_cv(&self, _rho: f64, _e: f64, _t: f64, _cp_cv: f64, _e_based: bool) -> f64 {
        0.0
    }

    fn s(&self, _p: f64, _rho: f64, _t: f64, _r: f64) -> f64 {
        0.0
    }
}

impl Blend for Murnaghan {
    fn blend(&self, other: &Self, w1: f64, w2: f64) -> Self {
        let mix = |a: f64, b: f64| w1 * a + w2 * b;
        Self {
            rho0: mix(self.rho0, other.rho0),
            p_ref: mix(self.p_ref, other.p_ref),
            kappa: mix(self.kappa, other.kappa),
            n: mix(self.n, other.n),
            gamma: mix(self.gamma, other.gamma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aluminium() -> Murnaghan {
        Murnaghan {
            rho0: 2785.0,
            p_ref: 0.0,
            kappa: 1.0 / 76.0e9,
            n: 4.6,
            gamma: 2.0,
        }
    }

    #[test]
    fn reference_density_gives_reference_pressure() {
        let eos = aluminium();
        assert_eq!(eos.p(2785.0, 0.0, 300.0, true), 0.0);
        let c = eos.c_sqr(0.0, 2785.0, 0.0, 300.0, 0.0).sqrt();
        assert!((c - (76.0e9f64 / 2785.0).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn tension_survives_limit() {
        let eos = aluminium();
        assert!(eos.p(2700.0, 0.0, 300.0, true) < 0.0);
    }

    #[test]
    fn energy_does_not_enter() {
        let eos = aluminium();
        assert_eq!(eos.p(3000.0, 0.0, 300.0, false), eos.p(3000.0, 1.0e7, 900.0, false));
        assert_eq!(eos.dpde(3000.0, 0.0, 300.0), 0.0);
        assert_eq!(eos.dpdt(3000.0, 0.0, 300.0).ok(), Some(0.0));
    }

    #[test]
    fn accepts_kappa_and_n_spelling() {
        let dict = Dictionary::from_yaml_str(
            "rho0: 2785\nkappa: 1.3157894736842105e-11\nn: 4.6\nGamma: 2.0\n",
        )
        .unwrap();
        let eos = Murnaghan::from_dict(&dict).unwrap();
        assert!((eos.kappa * 76.0e9 - 1.0).abs() < 1e-12);
        assert_eq!(eos.p_ref, 0.0);
    }

    #[test]
    fn missing_bulk_modulus_is_reported() {
        let dict = Dictionary::from_yaml_str("rho0: 2785\nn: 4.6\nGamma: 2.0\n").unwrap();
        let err = Murnaghan::from_dict(&dict).unwrap_err();
        assert!(err.to_string().contains("K0"));
    }
}
