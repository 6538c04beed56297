//! Composite thermo: one equation of state bound to one caloric model.
//!
//! Per-cell methods take raw SI values (density kg/m^3, specific energy J/kg,
//! temperature K, pressure Pa). Energies and enthalpies are sensible unless
//! the name says absolute (`ea`, `ha`).

use crate::caloric::ThermoModel;
use crate::eos::{EosModel, EquationOfState};
use crate::error::{ThermoError, ThermoResult};
use crate::specie::Specie;
use bf_core::units::{Density, Pressure, SpecificEnergy, Temperature, Velocity};
use bf_core::{Dictionary, RHO_MIN, floor_rho, j_per_kg, k, kg_per_m3, mps, pa};
use bf_numerics::{FnEquation, NewtonRaphson, RootSolution, RootSolver, ScalarEquation};
use rayon::prelude::*;
use std::fmt;

/// Default temperature bracket for inversions [K]
pub const T_LOW_DEFAULT: f64 = 1.0e-3;
pub const T_HIGH_DEFAULT: f64 = 1.0e5;

/// Quantity inverted for temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyKind {
    /// Sensible internal energy
    Es,
    /// Absolute internal energy
    Ea,
    /// Sensible enthalpy
    Hs,
    /// Absolute enthalpy
    Ha,
}

impl EnergyKind {
    fn absolute(self) -> bool {
        matches!(self, EnergyKind::Ea | EnergyKind::Ha)
    }

    fn enthalpy(self) -> bool {
        matches!(self, EnergyKind::Hs | EnergyKind::Ha)
    }
}

/// Dimensioned snapshot of one state.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermoState {
    /// Density [kg/m³]
    pub rho: Density,

    /// Sensible internal energy [J/kg]
    pub e: SpecificEnergy,

    /// Temperature [K]
    pub t: Temperature,

    /// Pressure [Pa]
    pub p: Pressure,

    /// Speed of sound [m/s]
    pub c: Velocity,
}

impl ThermoState {
    pub fn summary(&self) -> String {
        format!(
            "State(ρ={:.3}kg/m³,e={:.1}J/kg,T={:.1}K,P={:.0}Pa,c={:.1}m/s)",
            self.rho.value, self.e.value, self.t.value, self.p.value, self.c.value
        )
    }
}

pub struct BlastThermo {
    specie: Specie,
    eos: EosModel,
    thermo: Box<dyn ThermoModel>,
    solver: Box<dyn RootSolver>,
    t_low: f64,
    t_high: f64,
}

impl fmt::Debug for BlastThermo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlastThermo")
            .field("eos", &self.eos.type_name())
            .field("thermo", &self.thermo.type_name())
            .field("solver", &self.solver.name())
            .field("t_low", &self.t_low)
            .field("t_high", &self.t_high)
            .finish()
    }
}

/// `hes(T) + departure(rho, e, T) - target`, slope from the heat capacity.
struct TemperatureEquation<'a> {
    thermo: &'a BlastThermo,
    rho: f64,
    e: f64,
    target: f64,
}

impl ScalarEquation for TemperatureEquation<'_> {
    fn f(&self, t: f64) -> f64 {
        self.thermo.thermo.hes(t) + self.thermo.departure(self.rho, self.e, t) - self.target
    }

    fn dfdx(&self, t: f64) -> f64 {
        self.thermo.cpv(self.rho, self.e, t)
    }

    fn lower_limit(&self) -> f64 {
        self.thermo.t_low
    }

    fn upper_limit(&self) -> f64 {
        self.thermo.t_high
    }

    fn limit(&self, t: f64, t_old: f64) -> f64 {
        self.thermo
            .thermo
            .limit(t, t_old)
            .max(self.thermo.t_low)
            .min(self.thermo.t_high)
    }
}

impl BlastThermo {
    pub fn new(
        specie: Specie,
        eos: EosModel,
        thermo: Box<dyn ThermoModel>,
        solver: Box<dyn RootSolver>,
    ) -> Self {
        Self {
            specie,
            eos,
            thermo,
            solver,
            t_low: T_LOW_DEFAULT,
            t_high: T_HIGH_DEFAULT,
        }
    }

    pub fn with_t_limits(mut self, t_low: f64, t_high: f64) -> ThermoResult<Self> {
        if !(t_low > 0.0 && t_high > t_low) {
            return Err(ThermoError::InvalidArg {
                what: format!("temperature limits [{t_low}, {t_high}]"),
            });
        }
        self.t_low = t_low;
        self.t_high = t_high;
        Ok(self)
    }

    /// Apply `lowerLimit`/`upperLimit` from a `TSolver` dictionary.
    pub(crate) fn with_solver_limits(self, dict: &Dictionary) -> ThermoResult<Self> {
        let t_low = dict.scalar_or("lowerLimit", self.t_low)?;
        let t_high = dict.scalar_or("upperLimit", self.t_high)?;
        self.with_t_limits(t_low, t_high)
    }

    pub fn specie(&self) -> &Specie {
        &self.specie
    }

    pub fn eos(&self) -> &EosModel {
        &self.eos
    }

    pub fn thermo(&self) -> &dyn ThermoModel {
        self.thermo.as_ref()
    }

    pub fn solver(&self) -> &dyn RootSolver {
        self.solver.as_ref()
    }

    /// Temperature bracket of the inversions [K]
    pub fn t_limits(&self) -> (f64, f64) {
        (self.t_low, self.t_high)
    }

    pub fn e_based(&self) -> bool {
        self.thermo.e_based()
    }

    /// Specific gas constant [J/kg/K]
    pub fn r(&self) -> f64 {
        self.specie.r()
    }

    pub fn type_name(&self) -> String {
        format!("{}<{}>", self.thermo.type_name(), self.eos.type_name())
    }

    // Equation of state

    pub fn p(&self, rho: f64, e: f64, t: f64, limit: bool) -> f64 {
        self.eos.p(rho, e, t, limit)
    }

    pub fn gamma(&self, rho: f64, e: f64, t: f64) -> f64 {
        self.eos.gamma(rho, e, t, self.cv(rho, e, t))
    }

    pub fn c_sqr(&self, p: f64, rho: f64, e: f64, t: f64) -> f64 {
        self.eos.c_sqr(p, rho, e, t, self.cv(rho, e, t))
    }

    pub fn dpdv(&self, rho: f64, e: f64, t: f64) -> f64 {
        self.eos.dpdv(rho, e, t)
    }

    pub fn dpde(&self, rho: f64, e: f64, t: f64) -> f64 {
        self.eos.dpde(rho, e, t)
    }

    pub fn dpdt(&self, rho: f64, e: f64, t: f64) -> ThermoResult<f64> {
        self.eos.dpdt(rho, e, t)
    }

    // Caloric quantities

    /// Natural heat capacity: `Cv` when energy based, `Cp` otherwise.
    fn cpv(&self, rho: f64, e: f64, t: f64) -> f64 {
        if self.e_based() {
            self.thermo.cpv(t) + self.eos.cv(rho, e, t)
        } else {
            self.thermo.cpv(t) + self.eos.cp(rho, e, t)
        }
    }

    /// Equation-of-state departure of the natural energy variable.
    fn departure(&self, rho: f64, e: f64, t: f64) -> f64 {
        if self.e_based() {
            self.eos.e_correction(rho, e, t)
        } else {
            self.eos.h_correction(rho, e, t)
        }
    }

    /// [J/kg/K]
    pub fn cv(&self, rho: f64, e: f64, t: f64) -> f64 {
        let cpv = self.cpv(rho, e, t);
        if self.e_based() {
            cpv
        } else {
            cpv - self.eos.cp_m_cv(rho, e, t, cpv, false)
        }
    }

    /// [J/kg/K]
    pub fn cp(&self, rho: f64, e: f64, t: f64) -> f64 {
        let cpv = self.cpv(rho, e, t);
        if self.e_based() {
            cpv + self.eos.cp_m_cv(rho, e, t, cpv, true)
        } else {
            cpv
        }
    }

    pub fn cp_by_cv(&self, rho: f64, e: f64, t: f64) -> f64 {
        self.cp(rho, e, t) / self.cv(rho, e, t)
    }

    /// Sensible internal energy [J/kg]
    pub fn es(&self, rho: f64, e: f64, t: f64) -> f64 {
        let hes = self.thermo.hes(t) + self.departure(rho, e, t);
        if self.e_based() {
            hes
        } else {
            hes - self.p(rho, e, t, true) / floor_rho(rho)
        }
    }

    /// Sensible enthalpy [J/kg]
    pub fn hs(&self, rho: f64, e: f64, t: f64) -> f64 {
        let hes = self.thermo.hes(t) + self.departure(rho, e, t);
        if self.e_based() {
            hes + self.p(rho, e, t, true) / floor_rho(rho)
        } else {
            hes
        }
    }

    pub fn ea(&self, rho: f64, e: f64, t: f64) -> ThermoResult<f64> {
        Ok(self.es(rho, e, t) + self.thermo.hf()?)
    }

    pub fn ha(&self, rho: f64, e: f64, t: f64) -> ThermoResult<f64> {
        Ok(self.hs(rho, e, t) + self.thermo.hf()?)
    }

    pub fn hf(&self) -> ThermoResult<f64> {
        self.thermo.hf()
    }

    pub fn flame_t(&self) -> ThermoResult<f64> {
        self.thermo.flame_t()
    }

    /// Entropy [J/kg/K]
    pub fn s(&self, p: f64, rho: f64, e: f64, t: f64) -> f64 {
        self.thermo.s(t, self.cp(rho, e, t)) + self.eos.s(p, rho, t, self.r())
    }

    pub fn dgdt(&self, p: f64, t: f64) -> ThermoResult<f64> {
        self.thermo.dgdt(p, t)
    }

    pub fn dcpdt(&self, p: f64, t: f64) -> ThermoResult<f64> {
        self.thermo.dcpdt(p, t)
    }

    pub fn dcvdt(&self, t: f64) -> ThermoResult<f64> {
        self.thermo.dcvdt(t)
    }

    // Inversions

    /// Solve for the temperature at which `kind` equals `value`.
    ///
    /// `p` is used to convert between energy and enthalpy targets; when absent
    /// it is evaluated from the state at `t0`. Non-convergence is reported by
    /// the solver and the best estimate is returned.
    pub fn solve_temperature(
        &self,
        kind: EnergyKind,
        value: f64,
        p: Option<f64>,
        rho: f64,
        t0: f64,
    ) -> ThermoResult<RootSolution> {
        let rho_f = floor_rho(rho);
        let sensible = if kind.absolute() {
            value - self.thermo.hf()?
        } else {
            value
        };
        // Internal energy of the state, needed by the pressure and departures
        let e = if kind.enthalpy() {
            let p = match p {
                Some(p) => p,
                None => self.eos.p(rho, sensible, t0, true),
            };
            sensible - p / rho_f
        } else {
            sensible
        };

        let target = match (kind.enthalpy(), self.e_based()) {
            (false, true) | (true, false) => sensible,
            (true, true) => e,
            (false, false) => {
                let p = match p {
                    Some(p) => p,
                    None => self.eos.p(rho, e, t0, true),
                };
                e + p / rho_f
            }
        };

        let eos_cpv = if self.e_based() {
            self.eos.cv(rho, e, t0)
        } else {
            self.eos.cp(rho, e, t0)
        };
        if eos_cpv == 0.0
            && let Some(t) = self.thermo.t_from_hes(target - self.departure(rho, e, t0))
        {
            return Ok(RootSolution::converged(t, 0, 0.0));
        }

        let eqn = TemperatureEquation {
            thermo: self,
            rho,
            e,
            target,
        };
        let t0 = t0.max(self.t_low).min(self.t_high);
        Ok(self.solver.solve(&eqn, t0, self.t_low, self.t_high))
    }

    /// Temperature from density and sensible internal energy.
    pub fn t_rho_e(&self, t0: f64, rho: f64, e: f64) -> ThermoResult<RootSolution> {
        self.solve_temperature(EnergyKind::Es, e, None, rho, t0)
    }

    pub fn t_es(&self, es: f64, p: f64, rho: f64, t0: f64) -> ThermoResult<RootSolution> {
        self.solve_temperature(EnergyKind::Es, es, Some(p), rho, t0)
    }

    pub fn t_ea(&self, ea: f64, p: f64, rho: f64, t0: f64) -> ThermoResult<RootSolution> {
        self.solve_temperature(EnergyKind::Ea, ea, Some(p), rho, t0)
    }

    pub fn t_hs(&self, hs: f64, p: f64, rho: f64, t0: f64) -> ThermoResult<RootSolution> {
        self.solve_temperature(EnergyKind::Hs, hs, Some(p), rho, t0)
    }

    pub fn t_ha(&self, ha: f64, p: f64, rho: f64, t0: f64) -> ThermoResult<RootSolution> {
        self.solve_temperature(EnergyKind::Ha, ha, Some(p), rho, t0)
    }

    /// Internal energy consistent with `(rho, T)`.
    ///
    /// Energy-based closures give it directly. For enthalpy-based ones the
    /// pressure is affine in `e` at fixed density, `p = a e + b`, so
    /// `hs = e + p / rho` is solved in closed form. The slope is taken from
    /// the pressure itself; `dpde` may follow a different branch (JWL below
    /// its cut-off). If the limited pressure differs from the affine one the
    /// limited value is used instead.
    pub fn e_rho_t(&self, rho: f64, t: f64) -> f64 {
        if self.e_based() {
            return self.thermo.hes(t) + self.eos.e_correction(rho, 0.0, t);
        }
        let rho_f = floor_rho(rho);
        let b = self.eos.p(rho, 0.0, t, false);
        let a = self.eos.p(rho, 1.0, t, false) - b;
        let hs = self.thermo.hes(t) + self.eos.h_correction(rho, 0.0, t);
        let e = (hs - b / rho_f) / (1.0 + a / rho_f);
        let p = self.eos.p(rho, e, t, true);
        if p == self.eos.p(rho, e, t, false) {
            e
        } else {
            hs - p / rho_f
        }
    }

    /// Density from pressure and temperature by Newton-Raphson.
    pub fn rho_pt(&self, p: f64, t: f64) -> RootSolution {
        let rho0 = self
            .eos
            .rho0()
            .unwrap_or_else(|| p / (self.r() * t.max(self.t_low)));
        let eqn = FnEquation::new(|rho: f64| self.eos.p(rho, self.e_rho_t(rho, t), t, false) - p)
            .with_limits(RHO_MIN, f64::INFINITY);
        let solver = NewtonRaphson::new(*self.solver.controls(), 1.0);
        solver.solve_from(&eqn, floor_rho(rho0))
    }

    /// Internal energy matching pressure `p` at density `rho`.
    ///
    /// Temperature-based materials take the caloric energy at `t`; the others
    /// solve `p(rho, e) = p` starting from `e`.
    pub fn initialize_energy(&self, p: f64, rho: f64, e: f64, t: f64) -> f64 {
        if self.eos.temperature_based() {
            return self.es(rho, e, t);
        }
        let eqn = FnEquation::new(|e: f64| self.eos.p(rho, e, t, false) - p)
            .with_derivative(|e: f64| self.eos.dpde(rho, e, t));
        let solver = NewtonRaphson::new(*self.solver.controls(), 1.0);
        solver.solve_from(&eqn, e).value
    }

    /// Dimensioned state at `(rho, e, T)`.
    pub fn state_rho_e_t(&self, rho: Density, e: SpecificEnergy, t: Temperature) -> ThermoState {
        let (rho, e, t) = (rho.value, e.value, t.value);
        let p = self.p(rho, e, t, true);
        let c = self.c_sqr(p, rho, e, t).max(0.0).sqrt();
        ThermoState {
            rho: kg_per_m3(rho),
            e: j_per_kg(e),
            t: k(t),
            p: pa(p),
            c: mps(c),
        }
    }

    // Fields

    pub fn p_field(&self, rho: &[f64], e: &[f64], t: &[f64]) -> ThermoResult<Vec<f64>> {
        check_len(rho.len(), &[e.len(), t.len()])?;
        Ok((rho, e, t)
            .into_par_iter()
            .map(|(&rho, &e, &t)| self.p(rho, e, t, true))
            .collect())
    }

    pub fn c_sqr_field(
        &self,
        p: &[f64],
        rho: &[f64],
        e: &[f64],
        t: &[f64],
    ) -> ThermoResult<Vec<f64>> {
        check_len(p.len(), &[rho.len(), e.len(), t.len()])?;
        Ok((p, rho, e, t)
            .into_par_iter()
            .map(|(&p, &rho, &e, &t)| self.c_sqr(p, rho, e, t))
            .collect())
    }

    /// Temperature for every cell from the previous temperature field.
    pub fn t_rho_e_field(
        &self,
        t0: &[f64],
        rho: &[f64],
        e: &[f64],
    ) -> ThermoResult<Vec<RootSolution>> {
        check_len(t0.len(), &[rho.len(), e.len()])?;
        (t0, rho, e)
            .into_par_iter()
            .map(|(&t0, &rho, &e)| self.t_rho_e(t0, rho, e))
            .collect()
    }
}

pub(crate) fn check_len(n: usize, others: &[usize]) -> ThermoResult<()> {
    match others.iter().find(|&&m| m != n) {
        Some(m) => Err(ThermoError::InvalidArg {
            what: format!("field length {m} does not match {n}"),
        }),
        None => Ok(()),
    }
}
