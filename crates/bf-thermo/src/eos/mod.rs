//! Equations of state.
//!
//! Each variant is a closed-form relation between pressure, density, internal
//! energy and temperature. All methods take raw SI values: density in kg/m^3,
//! specific energy in J/kg, temperature in K, pressure in Pa.

mod cochran_chan;
mod ideal_gas;
mod jwl;
mod murnaghan;
mod stiffened_gas;

pub use cochran_chan::CochranChan;
pub use ideal_gas::IdealGas;
pub use jwl::Jwl;
pub use murnaghan::Murnaghan;
pub use stiffened_gas::StiffenedGas;

use crate::error::{ThermoError, ThermoResult};
use crate::specie::Specie;
use bf_core::{SMALL, floor_rho};
use std::fmt;
use std::ops::{Add, Mul};

/// Pressure/density/energy closure of one material.
pub trait EquationOfState: Send + Sync + fmt::Debug {
    fn type_name(&self) -> &'static str;

    /// Pressure depends on temperature rather than energy
    fn temperature_based(&self) -> bool {
        false
    }

    fn solid(&self) -> bool {
        false
    }

    /// Reference density, when the material has one
    fn rho0(&self) -> Option<f64> {
        None
    }

    /// Pressure; with `limit` the result is floored at zero where the model
    /// allows it.
    fn p(&self, rho: f64, e: f64, t: f64, limit: bool) -> f64;

    /// Mie-Grüneisen coefficient
    fn gamma(&self, rho: f64, e: f64, t: f64, cv: f64) -> f64;

    /// Squared speed of sound [m^2/s^2]
    fn c_sqr(&self, p: f64, rho: f64, e: f64, t: f64, cv: f64) -> f64;

    /// `dp/dv` at constant energy, `v = 1 / rho`
    fn dpdv(&self, rho: f64, e: f64, t: f64) -> f64;

    /// `dp/de` at constant density
    fn dpde(&self, rho: f64, e: f64, t: f64) -> f64;

    /// `dp/dT` at constant density
    fn dpdt(&self, rho: f64, e: f64, t: f64) -> ThermoResult<f64>;

    /// Departure of internal energy from the caloric model [J/kg]
    fn e_correction(&self, rho: f64, e: f64, t: f64) -> f64;

    /// Departure of enthalpy from the caloric model [J/kg]
    fn h_correction(&self, rho: f64, e: f64, t: f64) -> f64;

    /// Heat capacity contribution at constant volume [J/kg/K]
    fn cv(&self, _rho: f64, _e: f64, _t: f64) -> f64 {
        0.0
    }

    /// Heat capacity contribution at constant pressure [J/kg/K]
    fn cp(&self, _rho: f64, _e: f64, _t: f64) -> f64 {
        0.0
    }

    /// `Cp - Cv` given `Cv` (`e_based`) or `Cp`
    fn cp_m_cv(&self, rho: f64, e: f64, t: f64, cp_cv: f64, e_based: bool) -> f64;

    /// Entropy departure referenced to standard pressure [J/kg/K]
    fn s(&self, p: f64, rho: f64, t: f64, r: f64) -> f64;
}

/// Sound speed of a Mie-Grüneisen form from its cold pressure and slope.
///
/// `c^2 = omega (h - delta)` with `h = ((omega + 1) p + pi) / (omega rho)`.
pub(crate) fn mie_gruneisen_c_sqr(omega: f64, p: f64, rho: f64, pi: f64, delta: f64) -> f64 {
    let h = ((omega + 1.0) * p + pi) / (omega * floor_rho(rho));
    omega * (h - delta)
}

/// Parameter-wise affine combination `w1 * self + w2 * other`.
pub trait Blend: Sized {
    fn blend(&self, other: &Self, w1: f64, w2: f64) -> Self;
}

/// Closed set of equations of state selectable by name.
#[derive(Debug, Clone, PartialEq)]
pub enum EosModel {
    IdealGas(IdealGas),
    StiffenedGas(StiffenedGas),
    Jwl(Jwl),
    CochranChan(CochranChan),
    Murnaghan(Murnaghan),
}

macro_rules! dispatch {
    ($self:ident, $eos:ident => $body:expr) => {
        match $self {
            EosModel::IdealGas($eos) => $body,
            EosModel::StiffenedGas($eos) => $body,
            EosModel::Jwl($eos) => $body,
            EosModel::CochranChan($eos) => $body,
            EosModel::Murnaghan($eos) => $body,
        }
    };
}

impl EosModel {
    /// Blend two parameter sets of the same kind.
    pub fn try_blend(&self, other: &Self, w1: f64, w2: f64) -> ThermoResult<Self> {
        Ok(match (self, other) {
            (Self::IdealGas(a), Self::IdealGas(b)) => Self::IdealGas(a.blend(b, w1, w2)),
            (Self::StiffenedGas(a), Self::StiffenedGas(b)) => {
                Self::StiffenedGas(a.blend(b, w1, w2))
            }
            (Self::Jwl(a), Self::Jwl(b)) => Self::Jwl(a.blend(b, w1, w2)),
            (Self::CochranChan(a), Self::CochranChan(b)) => Self::CochranChan(a.blend(b, w1, w2)),
            (Self::Murnaghan(a), Self::Murnaghan(b)) => Self::Murnaghan(a.blend(b, w1, w2)),
            _ => {
                return Err(ThermoError::IncompatibleMix {
                    left: self.type_name(),
                    right: other.type_name(),
                });
            }
        })
    }
}

impl EquationOfState for EosModel {
    fn type_name(&self) -> &'static str {
        dispatch!(self, eos => eos.type_name())
    }

    fn temperature_based(&self) -> bool {
        dispatch!(self, eos => eos.temperature_based())
    }

    fn solid(&self) -> bool {
        dispatch!(self, eos => eos.solid())
    }

    fn rho0(&self) -> Option<f64> {
        dispatch!(self, eos => eos.rho0())
    }

    fn p(&self, rho: f64, e: f64, t: f64, limit: bool) -> f64 {
        dispatch!(self, eos => eos.p(rho, e, t, limit))
    }

    fn gamma(&self, rho: f64, e: f64, t: f64, cv: f64) -> f64 {
        dispatch!(self, eos => eos.gamma(rho, e, t, cv))
    }

    fn c_sqr(&self, p: f64, rho: f64, e: f64, t: f64, cv: f64) -> f64 {
        dispatch!(self, eos => eos.c_sqr(p, rho, e, t, cv))
    }

    fn dpdv(&self, rho: f64, e: f64, t: f64) -> f64 {
        dispatch!(self, eos => eos.dpdv(rho, e, t))
    }

    fn dpde(&self, rho: f64, e: f64, t: f64) -> f64 {
        dispatch!(self, eos => eos.dpde(rho, e, t))
    }

    fn dpdt(&self, rho: f64, e: f64, t: f64) -> ThermoResult<f64> {
        dispatch!(self, eos => eos.dpdt(rho, e, t))
    }

    fn e_correction(&self, rho: f64, e: f64, t: f64) -> f64 {
        dispatch!(self, eos => eos.e_correction(rho, e, t))
    }

    fn h_correction(&self, rho: f64, e: f64, t: f64) -> f64 {
        dispatch!(self, eos => eos.h_correction(rho, e, t))
    }

    fn cv(&self, rho: f64, e: f64, t: f64) -> f64 {
        dispatch!(self, eos => eos.cv(rho, e, t))
    }

    fn cp(&self, rho: f64, e: f64, t: f64) -> f64 {
        dispatch!(self, eos => eos.cp(rho, e, t))
    }

    fn cp_m_cv(&self, rho: f64, e: f64, t: f64, cp_cv: f64, e_based: bool) -> f64 {
        dispatch!(self, eos => eos.cp_m_cv(rho, e, t, cp_cv, e_based))
    }

    fn s(&self, p: f64, rho: f64, t: f64, r: f64) -> f64 {
        dispatch!(self, eos => eos.s(p, rho, t, r))
    }
}

/// An equation of state carrying its mixing weight.
///
/// `+` combines two materials by mass fraction, `*` rescales the weight and
/// `==` (`difference`) removes one material from a mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEos<E> {
    pub specie: Specie,
    pub eos: E,
}

impl<E> WeightedEos<E> {
    pub fn new(specie: Specie, eos: E) -> Self {
        Self { specie, eos }
    }
}

/// Relative weights `(w1, w2)` for a combined weight `y`, or `None` when `y`
/// is too small to divide by.
fn mix_weights(y: f64, y1: f64, y2: f64) -> Option<(f64, f64)> {
    (y.abs() >= SMALL).then(|| (y1 / y, y2 / y))
}

impl<E: Blend + Clone> WeightedEos<E> {
    pub fn difference(&self, other: &Self) -> Self {
        let specie = self.specie.difference(&other.specie);
        let eos = match mix_weights(specie.y(), self.specie.y(), other.specie.y()) {
            Some((w1, w2)) => self.eos.blend(&other.eos, -w1, w2),
            None => self.eos.clone(),
        };
        Self { specie, eos }
    }
}

impl<E: Blend + Clone> Add for WeightedEos<E> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let specie = self.specie + other.specie;
        let eos = match mix_weights(specie.y(), self.specie.y(), other.specie.y()) {
            Some((w1, w2)) => self.eos.blend(&other.eos, w1, w2),
            None => self.eos,
        };
        Self { specie, eos }
    }
}

impl<E> Mul<f64> for WeightedEos<E> {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self {
            specie: self.specie * s,
            eos: self.eos,
        }
    }
}

impl WeightedEos<EosModel> {
    /// `+` for runtime-selected models; fails when the kinds differ.
    pub fn try_add(&self, other: &Self) -> ThermoResult<Self> {
        let specie = self.specie + other.specie;
        let eos = match mix_weights(specie.y(), self.specie.y(), other.specie.y()) {
            Some((w1, w2)) => self.eos.try_blend(&other.eos, w1, w2)?,
            None => self.eos.clone(),
        };
        Ok(Self { specie, eos })
    }

    pub fn try_difference(&self, other: &Self) -> ThermoResult<Self> {
        let specie = self.specie.difference(&other.specie);
        let eos = match mix_weights(specie.y(), self.specie.y(), other.specie.y()) {
            Some((w1, w2)) => self.eos.try_blend(&other.eos, -w1, w2)?,
            None => self.eos.clone(),
        };
        Ok(Self { specie, eos })
    }
}
