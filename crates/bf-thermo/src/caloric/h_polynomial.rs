use super::ThermoModel;
use crate::error::{ThermoError, ThermoResult};
use bf_core::Dictionary;
use bf_core::constants::TSTD_K;

/// `Cp(T) = sum a_k T^k` with analytic enthalpy and entropy integrals from
/// the standard temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct HPolynomial {
    /// Ascending powers of T
    cp_coeffs: Vec<f64>,
    hf: f64,
    sf: f64,
}

impl HPolynomial {
    pub fn new(cp_coeffs: Vec<f64>, hf: f64, sf: f64) -> ThermoResult<Self> {
        if cp_coeffs.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "CpCoeffs must hold at least one coefficient".to_string(),
            });
        }
        Ok(Self { cp_coeffs, hf, sf })
    }

    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        Self::new(
            dict.list("CpCoeffs")?.to_vec(),
            dict.scalar("Hf")?,
            dict.scalar_or("Sf", 0.0)?,
        )
    }

    fn entropy(&self, t: f64) -> f64 {
        let mut s = self.sf + self.cp_coeffs[0] * (t / TSTD_K).ln();
        for (k, a) in self.cp_coeffs.iter().enumerate().skip(1) {
            let k = k as i32;
            s += a / f64::from(k) * (t.powi(k) - TSTD_K.powi(k));
        }
        s
    }
}

impl ThermoModel for HPolynomial {
    fn type_name(&self) -> &'static str {
        "hPolynomial"
    }

    fn e_based(&self) -> bool {
        false
    }

    fn cpv(&self, t: f64) -> f64 {
        // Horner
        self.cp_coeffs.iter().rev().fold(0.0, |acc, a| acc * t + a)
    }

    fn hes(&self, t: f64) -> f64 {
        self.cp_coeffs
            .iter()
            .enumerate()
            .map(|(k, a)| {
                let n = k as i32 + 1;
                a / f64::from(n) * (t.powi(n) - TSTD_K.powi(n))
            })
            .sum()
    }

    fn dcpv_dt(&self, t: f64) -> f64 {
        self.cp_coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, a)| f64::from(k as i32) * a * t.powi(k as i32 - 1))
            .sum()
    }

    fn s(&self, t: f64, _cp: f64) -> f64 {
        self.entropy(t)
    }

    fn hf(&self) -> ThermoResult<f64> {
        Ok(self.hf)
    }

    fn dgdt(&self, _p: f64, t: f64) -> ThermoResult<f64> {
        Ok(-self.entropy(t))
    }

    fn dcpdt(&self, _p: f64, t: f64) -> ThermoResult<f64> {
        Ok(self.dcpv_dt(t))
    }

    fn dcvdt(&self, t: f64) -> ThermoResult<f64> {
        Ok(self.dcpv_dt(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic() -> HPolynomial {
        HPolynomial::new(vec![900.0, 0.5, 1.0e-4], 0.0, 10.0).unwrap()
    }

    #[test]
    fn enthalpy_is_integral_of_cp() {
        let thermo = quadratic();
        assert_eq!(thermo.hes(TSTD_K), 0.0);
        let (t0, t1) = (400.0, 401.0);
        let mid = thermo.cpv(0.5 * (t0 + t1));
        assert!((thermo.hes(t1) - thermo.hes(t0) - mid).abs() < 1e-3);
    }

    #[test]
    fn cp_slope() {
        let thermo = quadratic();
        assert!((thermo.dcpv_dt(1000.0) - (0.5 + 2.0e-4 * 1000.0)).abs() < 1e-12);
        assert_eq!(thermo.dcpdt(1e5, 1000.0), Ok(thermo.dcpv_dt(1000.0)));
    }

    #[test]
    fn entropy_reference() {
        let thermo = quadratic();
        assert!((thermo.s(TSTD_K, 0.0) - 10.0).abs() < 1e-12);
        // ds/dT = Cp / T
        let t = 600.0;
        let h = 1e-3;
        let fd = (thermo.s(t + h, 0.0) - thermo.s(t - h, 0.0)) / (2.0 * h);
        assert!((fd - thermo.cpv(t) / t).abs() < 1e-6);
    }

    #[test]
    fn gibbs_slope_is_minus_entropy() {
        let thermo = quadratic();
        let g = |t: f64| thermo.hes(t) + 1.0e5 - t * thermo.s(t, 0.0);
        let (t, h) = (800.0, 1e-3);
        let fd = (g(t + h) - g(t - h)) / (2.0 * h);
        let dgdt = thermo.dgdt(1e5, t).unwrap();
        assert!((dgdt + thermo.s(t, 0.0)).abs() < 1e-12);
        assert!((fd - dgdt).abs() < 1e-4, "fd = {fd}, dgdt = {dgdt}");
    }

    #[test]
    fn empty_coefficients_rejected() {
        assert!(HPolynomial::new(Vec::new(), 0.0, 0.0).is_err());
    }
}
