use super::ThermoModel;
use crate::error::{ThermoError, ThermoResult};
use bf_core::Dictionary;
use bf_core::constants::TSTD_K;

/// Constant `Cp`; `Hs = Cp (T - Tref) + Hsref`.
#[derive(Debug, Clone, PartialEq)]
pub struct HConst {
    cp: f64,
    hf: f64,
    t_ref: f64,
    hs_ref: f64,
}

impl HConst {
    pub fn new(cp: f64, hf: f64) -> Self {
        Self {
            cp,
            hf,
            t_ref: TSTD_K,
            hs_ref: 0.0,
        }
    }

    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        let cp = dict.scalar("Cp")?;
        if !(cp > 0.0) {
            return Err(ThermoError::NonPhysical { what: "Cp" });
        }
        Ok(Self {
            cp,
            hf: dict.scalar("Hf")?,
            t_ref: dict.scalar_or("Tref", TSTD_K)?,
            hs_ref: dict.scalar_or("Hsref", 0.0)?,
        })
    }
}

impl ThermoModel for HConst {
    fn type_name(&self) -> &'static str {
        "hConst"
    }

    fn e_based(&self) -> bool {
        false
    }

    fn cpv(&self, _t: f64) -> f64 {
        self.cp
    }

    fn hes(&self, t: f64) -> f64 {
        self.cp * (t - self.t_ref) + self.hs_ref
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

    fn t_from_hes(&self, hs: f64) -> Option<f64> {
        Some(self.t_ref + (hs - self.hs_ref) / self.cp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_offsets() {
        let dict = Dictionary::new()
            .with("Cp", 1000.0)
            .with("Hf", 2.0e6)
            .with("Tref", 300.0)
            .with("Hsref", 5.0e3);
        let thermo = HConst::from_dict(&dict).unwrap();
        assert_eq!(thermo.hes(300.0), 5.0e3);
        assert_eq!(thermo.hes(310.0), 1.5e4);
        assert_eq!(thermo.hf(), Ok(2.0e6));
        assert_eq!(thermo.t_from_hes(1.5e4), Some(310.0));
    }
}
