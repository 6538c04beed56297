//! Name-keyed constructor tables for equations of state and caloric models,
//! and the builders assembling a complete thermo from a dictionary.

use crate::blast_thermo::BlastThermo;
use crate::caloric::{EConst, HConst, HPolynomial, HTabulated, ThermoModel};
use crate::eos::{
    CochranChan, EosModel, EquationOfState, IdealGas, Jwl, Murnaghan, StiffenedGas,
};
use crate::error::{ThermoError, ThermoResult};
use crate::specie::Specie;
use crate::two_phase::TwoPhaseThermo;
use bf_core::{Dictionary, select};
use bf_numerics::new_root_solver;
use tracing::debug;

pub type EosCtor = fn(&Dictionary) -> ThermoResult<EosModel>;
pub type ThermoModelCtor = fn(&Dictionary) -> ThermoResult<Box<dyn ThermoModel>>;

fn ideal_gas(d: &Dictionary) -> ThermoResult<EosModel> {
    Ok(EosModel::IdealGas(IdealGas::from_dict(d)?))
}

fn stiffened_gas(d: &Dictionary) -> ThermoResult<EosModel> {
    Ok(EosModel::StiffenedGas(StiffenedGas::from_dict(d)?))
}

fn jwl(d: &Dictionary) -> ThermoResult<EosModel> {
    Ok(EosModel::Jwl(Jwl::from_dict(d)?))
}

fn cochran_chan(d: &Dictionary) -> ThermoResult<EosModel> {
    Ok(EosModel::CochranChan(CochranChan::from_dict(d)?))
}

fn murnaghan(d: &Dictionary) -> ThermoResult<EosModel> {
    Ok(EosModel::Murnaghan(Murnaghan::from_dict(d)?))
}

fn boxed<T: ThermoModel + 'static>(model: ThermoResult<T>) -> ThermoResult<Box<dyn ThermoModel>> {
    Ok(Box::new(model?))
}

pub const EQUATIONS_OF_STATE: &[(&str, EosCtor)] = &[
    ("idealGas", ideal_gas),
    ("stiffenedGas", stiffened_gas),
    ("JWL", jwl),
    ("CochranChan", cochran_chan),
    ("Murnaghan", murnaghan),
];

pub const THERMO_MODELS: &[(&str, ThermoModelCtor)] = &[
    ("eConst", |d| boxed(EConst::from_dict(d))),
    ("hConst", |d| boxed(HConst::from_dict(d))),
    ("hPolynomial", |d| boxed(HPolynomial::from_dict(d))),
    ("hTabulated", |d| boxed(HTabulated::from_dict(d))),
];

/// Construct the equation of state `name` from its coefficients.
pub fn new_equation_of_state(name: &str, coeffs: &Dictionary) -> ThermoResult<EosModel> {
    debug!("Selecting equation of state {name}");
    let ctor = select("equationOfState", name, EQUATIONS_OF_STATE)?;
    ctor(coeffs)
}

/// Construct the caloric model `name` from its coefficients.
pub fn new_thermo_model(name: &str, coeffs: &Dictionary) -> ThermoResult<Box<dyn ThermoModel>> {
    debug!("Selecting thermo model {name}");
    let ctor = select("thermo", name, THERMO_MODELS)?;
    ctor(coeffs)
}

/// Build a thermo from `thermoType`, `specie`, `equationOfState`,
/// `thermodynamics` and the optional `TSolver` sub-dictionaries.
pub fn new_blast_thermo(dict: &Dictionary) -> ThermoResult<BlastThermo> {
    let thermo_type = dict.sub_dict("thermoType")?;
    let thermo_name = thermo_type.word("thermo")?;
    let eos_name = thermo_type.word("equationOfState")?;
    debug!("Selecting thermodynamics {thermo_name}<{eos_name}>");

    let specie = Specie::from_dict(dict.sub_dict("specie")?)?;
    let eos = new_equation_of_state(eos_name, dict.sub_dict("equationOfState")?)?;
    let thermo = new_thermo_model(thermo_name, dict.sub_dict("thermodynamics")?)?;

    let mut solver_dict = dict.sub_dict_or_empty("TSolver")?;
    if !solver_dict.contains("solver") {
        solver_dict.insert("solver", "NewtonRaphson");
    }
    let solver = new_root_solver(&solver_dict)?;

    BlastThermo::new(specie, eos, thermo, solver).with_solver_limits(&solver_dict)
}

/// Build a two-phase mixture from `phase1` and `phase2` sub-dictionaries.
pub fn new_two_phase_thermo(dict: &Dictionary) -> ThermoResult<TwoPhaseThermo> {
    let phase1 = new_blast_thermo(dict.sub_dict("phase1")?)?;
    let phase2 = new_blast_thermo(dict.sub_dict("phase2")?)?;
    if phase1.eos().solid() || phase2.eos().solid() {
        return Err(ThermoError::InvalidArg {
            what: "two-phase fluid mixture cannot hold a solid phase".to_string(),
        });
    }
    Ok(TwoPhaseThermo::new(phase1, phase2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::BfError;

    #[test]
    fn unknown_equation_of_state_lists_options() {
        let err = new_equation_of_state("vanDerWaals", &Dictionary::new()).unwrap_err();
        match err {
            ThermoError::Config(BfError::UnknownSelection { name, options, .. }) => {
                assert_eq!(name, "vanDerWaals");
                assert_eq!(
                    options,
                    vec!["idealGas", "stiffenedGas", "JWL", "CochranChan", "Murnaghan"]
                );
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn thermo_model_by_name() {
        let coeffs = Dictionary::new().with("Cp", 1005.0).with("Hf", 0.0);
        let model = new_thermo_model("hConst", &coeffs).unwrap();
        assert_eq!(model.type_name(), "hConst");
        assert!(!model.e_based());
        assert!(new_thermo_model("janaf", &coeffs).is_err());
    }

    fn thermo_dict(
        thermo: &str,
        eos: &str,
        eos_coeffs: Dictionary,
        coeffs: Dictionary,
    ) -> Dictionary {
        Dictionary::new()
            .with(
                "thermoType",
                Dictionary::new()
                    .with("thermo", thermo)
                    .with("equationOfState", eos),
            )
            .with("specie", Dictionary::new().with("molWeight", 27.0))
            .with("equationOfState", eos_coeffs)
            .with("thermodynamics", coeffs)
    }

    #[test]
    fn two_phase_rejects_solid_phase() {
        let gas = thermo_dict(
            "eConst",
            "idealGas",
            Dictionary::new().with("gamma", 1.4),
            Dictionary::new().with("Cv", 718.0).with("Hf", 0.0),
        );
        let aluminium = thermo_dict(
            "eConst",
            "Murnaghan",
            Dictionary::new()
                .with("rho0", 2785.0)
                .with("K0", 76.0e9)
                .with("K0Prime", 4.6)
                .with("Gamma", 2.0),
            Dictionary::new().with("Cv", 900.0).with("Hf", 0.0),
        );
        let mixed = Dictionary::new()
            .with("phase1", gas.clone())
            .with("phase2", aluminium);
        assert!(matches!(
            new_two_phase_thermo(&mixed),
            Err(ThermoError::InvalidArg { .. })
        ));

        let fluids = Dictionary::new()
            .with("phase1", gas.clone())
            .with("phase2", gas);
        assert!(new_two_phase_thermo(&fluids).is_ok());
    }

    #[test]
    fn equation_of_state_by_name() {
        let coeffs = Dictionary::new().with("gamma", 1.4);
        let eos = new_equation_of_state("idealGas", &coeffs).unwrap();
        assert_eq!(eos.type_name(), "idealGas");
    }
}
