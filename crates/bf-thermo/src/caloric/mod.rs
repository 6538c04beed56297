//! Caloric closures: heat capacity and sensible energy or enthalpy as
//! functions of temperature.
//!
//! An energy-based model (`e_based`) provides `Cv` and sensible internal
//! energy `Es`; an enthalpy-based one provides `Cp` and `Hs`. The composite
//! thermo adds the equation-of-state departures on top.

mod e_const;
mod h_const;
mod h_polynomial;
mod h_tabulated;

pub use e_const::EConst;
pub use h_const::HConst;
pub use h_polynomial::HPolynomial;
pub use h_tabulated::HTabulated;

use crate::error::ThermoResult;
use bf_core::constants::TSTD_K;
use std::fmt;

pub trait ThermoModel: Send + Sync + fmt::Debug {
    fn type_name(&self) -> &'static str;

    /// Natural variable is internal energy rather than enthalpy
    fn e_based(&self) -> bool;

    /// `Cv` for energy-based models, `Cp` otherwise [J/kg/K]
    fn cpv(&self, t: f64) -> f64;

    /// Sensible `Es` for energy-based models, `Hs` otherwise [J/kg]
    fn hes(&self, t: f64) -> f64;

    /// Temperature slope of `cpv`
    fn dcpv_dt(&self, t: f64) -> f64;

    /// Entropy of the caloric part given the mixture `Cp` [J/kg/K]
    fn s(&self, t: f64, cp: f64) -> f64;

    /// Heat of formation [J/kg]
    fn hf(&self) -> ThermoResult<f64>;

    /// Adiabatic flame temperature [K]
    fn flame_t(&self) -> ThermoResult<f64> {
        Ok(TSTD_K)
    }

    /// `dG/dT` at constant pressure, `-S` of the caloric part [J/kg/K].
    ///
    /// Constant heat-capacity models carry no entropy reference and give 0.
    fn dgdt(&self, p: f64, t: f64) -> ThermoResult<f64>;

    fn dcpdt(&self, p: f64, t: f64) -> ThermoResult<f64>;

    fn dcvdt(&self, t: f64) -> ThermoResult<f64>;

    /// Restrict a temperature iterate given the previous one.
    fn limit(&self, t: f64, _t_old: f64) -> f64 {
        t
    }

    /// Closed-form inverse of `hes`, when one exists.
    fn t_from_hes(&self, _hes: f64) -> Option<f64> {
        None
    }
}
