//! bf-thermo: equations of state and thermodynamic closures for blastflow.
//!
//! Contains:
//! - specie (mixing weight, molecular weight, gas constant)
//! - eos (ideal gas, stiffened gas, JWL, Cochran-Chan, Murnaghan; mixing)
//! - caloric (eConst, hConst, hPolynomial, hTabulated)
//! - blast_thermo (composite thermo, temperature and density inversions)
//! - two_phase (volume-fraction weighted fluid mixture)
//! - registry (name-keyed construction from a dictionary)

pub mod blast_thermo;
pub mod caloric;
pub mod eos;
pub mod error;
pub mod registry;
pub mod specie;
pub mod two_phase;

pub use blast_thermo::{BlastThermo, EnergyKind, ThermoState};
pub use caloric::{EConst, HConst, HPolynomial, HTabulated, ThermoModel};
pub use eos::{
    Blend, CochranChan, EosModel, EquationOfState, IdealGas, Jwl, Murnaghan, StiffenedGas,
    WeightedEos,
};
pub use error::{ThermoError, ThermoResult};
pub use registry::{new_blast_thermo, new_equation_of_state, new_thermo_model, new_two_phase_thermo};
pub use specie::Specie;
pub use two_phase::{TwoPhaseFields, TwoPhaseThermo};
