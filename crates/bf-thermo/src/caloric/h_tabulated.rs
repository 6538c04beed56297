use super::ThermoModel;
use crate::error::{ThermoError, ThermoResult};
use bf_core::Dictionary;
use bf_core::constants::TSTD_K;
use bf_numerics::LookupTable1D;
use tracing::warn;

/// Sensible enthalpy tabulated against temperature.
///
/// `Cp` is the table slope. Heat of formation, flame temperature and the
/// pressure-based derivatives are not available from a table alone.
#[derive(Debug, Clone)]
pub struct HTabulated {
    hs: LookupTable1D,
    t_low: f64,
    t_high: f64,
}

impl HTabulated {
    pub fn new(hs: LookupTable1D) -> Self {
        let (t_low, t_high) = (hs.x_min(), hs.x_max());
        Self { hs, t_low, t_high }
    }

    /// Reads the `hs` sub-dictionary as a lookup table.
    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        Ok(Self::new(LookupTable1D::from_dict(dict.sub_dict("hs")?)?))
    }

    pub fn t_range(&self) -> (f64, f64) {
        (self.t_low, self.t_high)
    }

    fn not_implemented(what: &'static str) -> ThermoError {
        ThermoError::NotImplemented {
            what,
            model: "hTabulated",
        }
    }
}

impl ThermoModel for HTabulated {
    fn type_name(&self) -> &'static str {
        "hTabulated"
    }

    fn e_based(&self) -> bool {
        false
    }

    fn cpv(&self, t: f64) -> f64 {
        self.hs.dfdx(t)
    }

    fn hes(&self, t: f64) -> f64 {
        self.hs.lookup(t)
    }

    fn dcpv_dt(&self, t: f64) -> f64 {
        self.hs.d2fdx2(t)
    }

    fn s(&self, t: f64, cp: f64) -> f64 {
        cp * (t / TSTD_K).ln()
    }

    fn hf(&self) -> ThermoResult<f64> {
        Err(Self::not_implemented("Hf"))
    }

    fn flame_t(&self) -> ThermoResult<f64> {
        Err(Self::not_implemented("flameT"))
    }

    fn dgdt(&self, _p: f64, _t: f64) -> ThermoResult<f64> {
        Err(Self::not_implemented("dGdT"))
    }

    fn dcpdt(&self, _p: f64, _t: f64) -> ThermoResult<f64> {
        Err(Self::not_implemented("dCpdT"))
    }

    fn dcvdt(&self, _t: f64) -> ThermoResult<f64> {
        Err(Self::not_implemented("dCvdT"))
    }

    /// Caps growth at five times the previous iterate, otherwise clamps into
    /// the table range.
    fn limit(&self, t: f64, t_old: f64) -> f64 {
        if t / t_old > 5.0 {
            return 5.0 * t_old;
        }
        if cfg!(debug_assertions) && (t < self.t_low || t > self.t_high) {
            warn!(
                t,
                t_low = self.t_low,
                t_high = self.t_high,
                "Temperature outside hTabulated range"
            );
        }
        t.max(self.t_low).min(self.t_high)
    }
}
