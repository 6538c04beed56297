use super::ThermoModel;
use crate::error::{ThermoError, ThermoResult};
use bf_core::Dictionary;
use bf_core::constants::TSTD_K;

/// Constant `Cv`; `Es = Cv (T - Tref) + Esref`.
#[derive(Debug, Clone, PartialEq)]
pub struct EConst {
    cv: f64,
    hf: f64,
    t_ref: f64,
    es_ref: f64,
}

impl EConst {
    pub fn new(cv: f64, hf: f64) -> Self {
        Self {
            cv,
            hf,
            t_ref: TSTD_K,
            es_ref: 0.0,
        }
    }

    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        let cv = dict.scalar("Cv")?;
        if !(cv > 0.0) {
            return Err(ThermoError::NonPhysical { what: "Cv" });
        }
        Ok(Self {
            cv,
            hf: dict.scalar("Hf")?,
            t_ref: dict.scalar_or("Tref", TSTD_K)?,
            es_ref: dict.scalar_or("Esref", 0.0)?,
        })
    }
}

impl ThermoModel for EConst {
    fn type_name(&self) -> &'static str {
        "eConst"
    }

    fn e_based(&self) -> bool {
        true
    }

    fn cpv(&self, _t: f64) -> f64 {
        self.cv
    }

    fn hes(&self, t: f64) -> f64 {
        self.cv * (t - self.t_ref) + self.es_ref
    }

    fn dcpv_dt(&self, _t: f64) -> f64 {
        0.0
    }

    fn s(&self, t: f64, cp: f64) -> f64 {
        cp * (t / TSTD_K).ln()
    }

    fn hf(&self) -> ThermoResult<f64> {
        Ok(self.hf)
    }

    fn dgdt(&self, _p: f64, _t: f64) -> ThermoResult<f64> {
        Ok(0.0)
    }

    fn dcpdt(&self, _p: f64, _t: f64) -> ThermoResult<f64> {
        Ok(0.0)
    }

    fn dcvdt(&self, _t: f64) -> ThermoResult<f64> {
        Ok(0.0)
    }

    fn t_from_hes(&self, es: f64) -> Option<f64> {
        Some(self.t_ref + (es - self.es_ref) / self.cv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_form_inverse() {
        let thermo = EConst::new(718.0, 0.0);
        let es = thermo.hes(450.0);
        assert!((thermo.t_from_hes(es).unwrap() - 450.0).abs() < 1e-10);
        assert_eq!(thermo.hes(TSTD_K), 0.0);
    }

    #[test]
    fn requires_positive_cv() {
        let dict = Dictionary::new().with("Cv", 0.0).with("Hf", 0.0);
        assert!(matches!(
            EConst::from_dict(&dict),
            Err(ThermoError::NonPhysical { what: "Cv" })
        ));
    }
}
