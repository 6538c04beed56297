//! Mass-fraction weighted mixing context.

use crate::error::{ThermoError, ThermoResult};
use bf_core::constants::RR;
use bf_core::{Dictionary, SMALL};
use std::ops::{Add, Mul};

/// Species weight and molecular weight of one material.
///
/// `y` is the mixing weight (mass fraction, or number of moles for a pure
/// material). Parameter sets of equations of state are blended with the same
/// weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specie {
    y: f64,
    /// Molecular weight [kg/kmol]
    w: f64,
}

impl Specie {
    pub fn new(y: f64, w: f64) -> Self {
        Self { y, w }
    }

    /// Read `molWeight` and the weight (`Y`, else `nMoles`, else 1).
    pub fn from_dict(dict: &Dictionary) -> ThermoResult<Self> {
        let w = dict.scalar("molWeight")?;
        if !(w.is_finite() && w > 0.0) {
            return Err(ThermoError::NonPhysical { what: "molWeight" });
        }
        let y = if dict.contains("Y") {
            dict.scalar("Y")?
        } else {
            dict.scalar_or("nMoles", 1.0)?
        };
        Ok(Self::new(y, w))
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    /// Specific gas constant [J/kg/K]
    pub fn r(&self) -> f64 {
        RR / self.w
    }

    /// Weighted difference `other - self`.
    pub fn difference(&self, other: &Self) -> Self {
        let y = other.y - self.y;
        if y.abs() < SMALL {
            return Self::new(y, self.w);
        }
        Self::new(y, y / (other.y / other.w - self.y / self.w))
    }
}

impl Add for Specie {
    type Output = Specie;

    fn add(self, other: Specie) -> Specie {
        let y = self.y + other.y;
        if y.abs() < SMALL {
            return Specie::new(y, self.w);
        }
        Specie::new(y, y / (self.y / self.w + other.y / other.w))
    }
}

impl Mul<f64> for Specie {
    type Output = Specie;

    fn mul(self, s: f64) -> Specie {
        Specie::new(s * self.y, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_constant() {
        let air = Specie::new(1.0, 28.96);
        assert!((air.r() - 287.1).abs() < 0.1);
    }

    #[test]
    fn mixing_molecular_weight() {
        let a = Specie::new(0.5, 2.0);
        let b = Specie::new(0.5, 32.0);
        let m = a + b;
        assert_eq!(m.y(), 1.0);
        // 1 / (0.5/2 + 0.5/32)
        assert!((m.w() - 1.0 / (0.25 + 0.015625)).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_keeps_first_molecular_weight() {
        let m = Specie::new(0.0, 10.0) + Specie::new(0.0, 20.0);
        assert_eq!(m.w(), 10.0);
    }

    #[test]
    fn scale_and_difference() {
        let a = Specie::new(1.0, 10.0) * 0.25;
        assert_eq!(a.y(), 0.25);
        let d = a.difference(&Specie::new(1.0, 10.0));
        assert_eq!(d.y(), 0.75);
        assert!((d.w() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn from_dict_requires_positive_weight() {
        let dict = Dictionary::new().with("molWeight", -1.0);
        assert!(matches!(
            Specie::from_dict(&dict),
            Err(ThermoError::NonPhysical { .. })
        ));
        let dict = Dictionary::new().with("molWeight", 55.0).with("nMoles", 2.0);
        assert_eq!(Specie::from_dict(&dict).unwrap().y(), 2.0);
    }
}
