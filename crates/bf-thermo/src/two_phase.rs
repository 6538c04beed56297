//! Volume-fraction weighted mixture of two fluid thermos.
//!
//! Pressure-like quantities combine each phase through `xi = 1 / (Gamma - 1)`;
//! both phases share the mixture internal energy and temperature. Energies,
//! heat capacities and molecular weight are per unit mass and use the phase
//! mass fractions `Y_i = alpha_i rho_i / rho`. `alpha1 + alpha2 = 1` is
//! maintained by the caller.

use crate::blast_thermo::{BlastThermo, check_len};
use crate::error::ThermoResult;
use bf_core::floor_rho;
use bf_numerics::{FnEquation, RootSolution};
use rayon::prelude::*;

/// Borrowed per-cell inputs of a two-phase mixture.
#[derive(Debug, Clone, Copy)]
pub struct TwoPhaseFields<'a> {
    pub alpha1: &'a [f64],
    pub alpha2: &'a [f64],
    pub rho1: &'a [f64],
    pub rho2: &'a [f64],
    pub e: &'a [f64],
    pub t: &'a [f64],
}

impl<'a> TwoPhaseFields<'a> {
    pub fn new(
        alpha1: &'a [f64],
        alpha2: &'a [f64],
        rho1: &'a [f64],
        rho2: &'a [f64],
        e: &'a [f64],
        t: &'a [f64],
    ) -> ThermoResult<Self> {
        check_len(
            alpha1.len(),
            &[alpha2.len(), rho1.len(), rho2.len(), e.len(), t.len()],
        )?;
        Ok(Self {
            alpha1,
            alpha2,
            rho1,
            rho2,
            e,
            t,
        })
    }

    pub fn len(&self) -> usize {
        self.alpha1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha1.is_empty()
    }
}

/// One phase at one cell
#[derive(Debug, Clone, Copy)]
struct PhaseCell {
    alpha: f64,
    rho: f64,
    xi: f64,
}

#[derive(Debug)]
pub struct TwoPhaseThermo {
    phase1: BlastThermo,
    phase2: BlastThermo,
}

impl TwoPhaseThermo {
    pub fn new(phase1: BlastThermo, phase2: BlastThermo) -> Self {
        Self { phase1, phase2 }
    }

    pub fn phase1(&self) -> &BlastThermo {
        &self.phase1
    }

    pub fn phase2(&self) -> &BlastThermo {
        &self.phase2
    }

    fn cells(&self, f: &TwoPhaseFields<'_>, celli: usize) -> [(PhaseCell, &BlastThermo); 2] {
        let (e, t) = (f.e[celli], f.t[celli]);
        let cell = |thermo: &BlastThermo, alpha: f64, rho: f64| PhaseCell {
            alpha,
            rho,
            xi: 1.0 / (thermo.gamma(rho, e, t) - 1.0),
        };
        [
            (cell(&self.phase1, f.alpha1[celli], f.rho1[celli]), &self.phase1),
            (cell(&self.phase2, f.alpha2[celli], f.rho2[celli]), &self.phase2),
        ]
    }

    /// `xi`-weighted average of a per-phase quantity.
    fn xi_average(
        &self,
        f: &TwoPhaseFields<'_>,
        celli: usize,
        q: impl Fn(&BlastThermo, &PhaseCell) -> f64,
    ) -> f64 {
        let cells = self.cells(f, celli);
        let (num, den) = cells.iter().fold((0.0, 0.0), |(num, den), (c, thermo)| {
            (num + c.alpha * c.xi * q(*thermo, c), den + c.alpha * c.xi)
        });
        num / den
    }

    /// Mixture density `alpha1 rho1 + alpha2 rho2`
    pub fn cell_rho(&self, f: &TwoPhaseFields<'_>, celli: usize) -> f64 {
        f.alpha1[celli] * f.rho1[celli] + f.alpha2[celli] * f.rho2[celli]
    }

    /// Mixture pressure [Pa]
    pub fn cell_p_rho_t(&self, f: &TwoPhaseFields<'_>, celli: usize, limit: bool) -> f64 {
        let (e, t) = (f.e[celli], f.t[celli]);
        self.xi_average(f, celli, |thermo, c| thermo.p(c.rho, e, t, limit))
    }

    pub fn cell_gamma(&self, f: &TwoPhaseFields<'_>, celli: usize) -> f64 {
        let xi: f64 = self
            .cells(f, celli)
            .iter()
            .map(|(c, _)| c.alpha * c.xi)
            .sum();
        1.0 + 1.0 / xi
    }

    pub fn cell_dpd_rho(&self, f: &TwoPhaseFields<'_>, celli: usize) -> f64 {
        let (e, t) = (f.e[celli], f.t[celli]);
        self.xi_average(f, celli, |thermo, c| {
            let rho = floor_rho(c.rho);
            -thermo.dpdv(c.rho, e, t) / (rho * rho)
        })
    }

    pub fn cell_dpde(&self, f: &TwoPhaseFields<'_>, celli: usize) -> f64 {
        let (e, t) = (f.e[celli], f.t[celli]);
        self.xi_average(f, celli, |thermo, c| thermo.dpde(c.rho, e, t))
    }

    /// Mixture squared sound speed [m^2/s^2]
    pub fn cell_c_sqr(&self, f: &TwoPhaseFields<'_>, celli: usize) -> f64 {
        let (e, t) = (f.e[celli], f.t[celli]);
        let cells = self.cells(f, celli);
        let (num, xi) = cells.iter().fold((0.0, 0.0), |(num, xi), (c, thermo)| {
            let p = thermo.p(c.rho, e, t, true);
            let c2 = thermo.c_sqr(p, c.rho, e, t);
            (num + c.alpha * c.rho * c.xi * c2, xi + c.alpha * c.xi)
        });
        num / (floor_rho(self.cell_rho(f, celli)) * xi)
    }

    /// Phase mass fractions
    fn mass_fractions(&self, f: &TwoPhaseFields<'_>, celli: usize) -> [f64; 2] {
        let rho = floor_rho(self.cell_rho(f, celli));
        [
            f.alpha1[celli] * f.rho1[celli] / rho,
            f.alpha2[celli] * f.rho2[celli] / rho,
        ]
    }

    /// Mass-fraction average of a per-phase quantity at temperature `t`.
    fn mass_average(
        &self,
        f: &TwoPhaseFields<'_>,
        celli: usize,
        t: f64,
        q: impl Fn(&BlastThermo, f64, f64, f64) -> f64,
    ) -> f64 {
        let [y1, y2] = self.mass_fractions(f, celli);
        let phase = |thermo: &BlastThermo, rho: f64| q(thermo, rho, thermo.e_rho_t(rho, t), t);
        y1 * phase(&self.phase1, f.rho1[celli]) + y2 * phase(&self.phase2, f.rho2[celli])
    }

    /// Mixture sensible internal energy at temperature `t` [J/kg]
    pub fn cell_he(&self, f: &TwoPhaseFields<'_>, celli: usize, t: f64) -> f64 {
        self.mass_average(f, celli, t, |_, _, e, _| e)
    }

    /// [J/kg/K]
    pub fn cell_cv(&self, f: &TwoPhaseFields<'_>, celli: usize, t: f64) -> f64 {
        self.mass_average(f, celli, t, |thermo, rho, e, t| thermo.cv(rho, e, t))
    }

    /// [J/kg/K]
    pub fn cell_cp(&self, f: &TwoPhaseFields<'_>, celli: usize, t: f64) -> f64 {
        self.mass_average(f, celli, t, |thermo, rho, e, t| thermo.cp(rho, e, t))
    }

    /// Heat capacity of the mixture energy variable, internal energy, so `Cv`.
    pub fn cell_cpv(&self, f: &TwoPhaseFields<'_>, celli: usize, t: f64) -> f64 {
        self.cell_cv(f, celli, t)
    }

    /// Mixture molecular weight [kg/kmol]
    pub fn cell_w(&self, f: &TwoPhaseFields<'_>, celli: usize) -> f64 {
        let [y1, y2] = self.mass_fractions(f, celli);
        1.0 / (y1 / self.phase1.specie().w() + y2 / self.phase2.specie().w())
    }

    /// Temperature at which the mixture energy equals `e`, starting from `t0`.
    ///
    /// Uses the root solver of the first phase inside the intersection of
    /// both temperature brackets.
    pub fn cell_t_he(
        &self,
        f: &TwoPhaseFields<'_>,
        celli: usize,
        e: f64,
        t0: f64,
    ) -> RootSolution {
        let (low1, high1) = self.phase1.t_limits();
        let (low2, high2) = self.phase2.t_limits();
        let (low, high) = (low1.max(low2), high1.min(high2));
        let eqn = FnEquation::new(|t: f64| self.cell_he(f, celli, t) - e)
            .with_derivative(|t: f64| self.cell_cpv(f, celli, t))
            .with_limits(low, high);
        self.phase1
            .solver()
            .solve(&eqn, t0.max(low).min(high), low, high)
    }

    /// Mixture temperature of every cell from `f.e`, seeded with `f.t`.
    pub fn t_field(&self, f: &TwoPhaseFields<'_>) -> Vec<RootSolution> {
        (0..f.len())
            .into_par_iter()
            .map(|celli| self.cell_t_he(f, celli, f.e[celli], f.t[celli]))
            .collect()
    }

    pub fn p_field(&self, f: &TwoPhaseFields<'_>) -> Vec<f64> {
        (0..f.len())
            .into_par_iter()
            .map(|celli| self.cell_p_rho_t(f, celli, true))
            .collect()
    }

    pub fn c_sqr_field(&self, f: &TwoPhaseFields<'_>) -> Vec<f64> {
        (0..f.len())
            .into_par_iter()
            .map(|celli| self.cell_c_sqr(f, celli))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caloric::EConst;
    use crate::eos::{EosModel, IdealGas, StiffenedGas};
    use crate::specie::Specie;
    use bf_numerics::NewtonRaphson;

    fn gas(gamma: f64) -> BlastThermo {
        BlastThermo::new(
            Specie::new(1.0, 28.96),
            EosModel::IdealGas(IdealGas::new(gamma)),
            Box::new(EConst::new(718.0, 0.0)),
            Box::new(NewtonRaphson::default()),
        )
    }

    fn light_gas(w: f64, cv: f64) -> BlastThermo {
        BlastThermo::new(
            Specie::new(1.0, w),
            EosModel::IdealGas(IdealGas::new(1.67)),
            Box::new(EConst::new(cv, 0.0)),
            Box::new(NewtonRaphson::default()),
        )
    }

    fn water() -> BlastThermo {
        BlastThermo::new(
            Specie::new(1.0, 18.0),
            EosModel::StiffenedGas(StiffenedGas::new(4.4, 6.0e8)),
            Box::new(EConst::new(4186.0, 0.0)),
            Box::new(NewtonRaphson::default()),
        )
    }

    #[test]
    fn identical_phases_reduce_to_single_phase() {
        let mix = TwoPhaseThermo::new(gas(1.4), gas(1.4));
        let (a1, a2, r1, r2, e, t) = ([0.3], [0.7], [1.2], [1.2], [2.0e5], [300.0]);
        let f = TwoPhaseFields::new(&a1, &a2, &r1, &r2, &e, &t).unwrap();
        let single = gas(1.4);
        let p = single.p(1.2, 2.0e5, 300.0, true);
        assert!((mix.cell_p_rho_t(&f, 0, true) - p).abs() < 1e-6);
        assert!((mix.cell_gamma(&f, 0) - 1.4).abs() < 1e-12);
        assert!((mix.cell_dpde(&f, 0) - 0.4 * 1.2).abs() < 1e-9);
        let c2 = single.c_sqr(p, 1.2, 2.0e5, 300.0);
        assert!((mix.cell_c_sqr(&f, 0) / c2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pure_phase_limit() {
        let mix = TwoPhaseThermo::new(water(), gas(1.4));
        let (a1, a2, r1, r2, e, t) = ([1.0], [0.0], [1000.0], [1.2], [1.0e6], [300.0]);
        let f = TwoPhaseFields::new(&a1, &a2, &r1, &r2, &e, &t).unwrap();
        let p = water().p(1000.0, 1.0e6, 300.0, true);
        assert!(p > 0.0);
        assert!((mix.cell_p_rho_t(&f, 0, true) - p).abs() < 1e-3);
        assert!((mix.cell_gamma(&f, 0) - 4.4).abs() < 1e-9);
        assert_eq!(mix.cell_rho(&f, 0), 1000.0);
        let dpdrho = -water().dpdv(1000.0, 1.0e6, 300.0) / 1.0e6;
        assert!((mix.cell_dpd_rho(&f, 0) - dpdrho).abs() < 1e-6);
    }

    #[test]
    fn mixture_gamma_between_phases() {
        let mix = TwoPhaseThermo::new(gas(1.4), gas(1.67));
        let a1 = [0.0, 0.25, 0.5, 0.75, 1.0];
        let a2: Vec<f64> = a1.iter().map(|a| 1.0 - a).collect();
        let r = [1.0; 5];
        let e = [2.0e5; 5];
        let t = [300.0; 5];
        let f = TwoPhaseFields::new(&a1, &a2, &r, &r, &e, &t).unwrap();
        for celli in 0..f.len() {
            let g = mix.cell_gamma(&f, celli);
            assert!((1.4 - 1e-12..=1.67 + 1e-12).contains(&g), "gamma = {g}");
        }
        let p = mix.p_field(&f);
        assert_eq!(p.len(), 5);
        assert!(mix.c_sqr_field(&f).iter().all(|c2| *c2 > 0.0));
    }

    #[test]
    fn identical_phases_caloric_reduce_to_single_phase() {
        let mix = TwoPhaseThermo::new(gas(1.4), gas(1.4));
        let (a1, a2, r1, r2, e, t) = ([0.3], [0.7], [1.2], [1.2], [2.0e5], [300.0]);
        let f = TwoPhaseFields::new(&a1, &a2, &r1, &r2, &e, &t).unwrap();
        let single = gas(1.4);
        let t = 450.0;
        let es = single.e_rho_t(1.2, t);
        assert!((mix.cell_he(&f, 0, t) - es).abs() < 1e-9);
        assert!((mix.cell_cv(&f, 0, t) - 718.0).abs() < 1e-12);
        assert!((mix.cell_cp(&f, 0, t) - single.cp(1.2, es, t)).abs() < 1e-9);
        assert!((mix.cell_w(&f, 0) - 28.96).abs() < 1e-12);
    }

    #[test]
    fn caloric_quantities_are_mass_weighted() {
        let mix = TwoPhaseThermo::new(gas(1.4), light_gas(4.0, 3116.0));
        // Y1 = 0.5 * 3 / 4, Y2 = 0.5 * 1 / 4
        let (a1, a2, r1, r2, e, t) = ([0.5], [0.5], [3.0], [1.0], [0.0], [300.0]);
        let f = TwoPhaseFields::new(&a1, &a2, &r1, &r2, &e, &t).unwrap();
        let (y1, y2) = (0.75, 0.25);
        let cv = y1 * 718.0 + y2 * 3116.0;
        assert!((mix.cell_cv(&f, 0, 500.0) - cv).abs() < 1e-9);
        assert!((mix.cell_cpv(&f, 0, 500.0) - cv).abs() < 1e-9);
        let cp = y1 * 1.4 * 718.0 + y2 * 1.67 * 3116.0;
        assert!((mix.cell_cp(&f, 0, 500.0) - cp).abs() < 1e-9);
        let w = 1.0 / (y1 / 28.96 + y2 / 4.0);
        assert!((mix.cell_w(&f, 0) - w).abs() < 1e-9);
        let he = cv * (500.0 - bf_core::constants::TSTD_K);
        assert!((mix.cell_he(&f, 0, 500.0) - he).abs() < 1e-6);
    }

    #[test]
    fn mixture_temperature_round_trip() {
        let mix = TwoPhaseThermo::new(water(), gas(1.4));
        let a1 = [0.2, 0.5, 0.9];
        let a2: Vec<f64> = a1.iter().map(|a| 1.0 - a).collect();
        let r1 = [1000.0; 3];
        let r2 = [1.2; 3];
        let t_true = [320.0, 600.0, 1500.0];
        let t0 = [300.0; 3];
        let seed = TwoPhaseFields::new(&a1, &a2, &r1, &r2, &t0, &t0).unwrap();
        let e: Vec<f64> = (0..3).map(|i| mix.cell_he(&seed, i, t_true[i])).collect();
        let f = TwoPhaseFields::new(&a1, &a2, &r1, &r2, &e, &t0).unwrap();

        let sol = mix.cell_t_he(&f, 1, e[1], 300.0);
        assert!(sol.converged, "{sol:?}");
        assert!((sol.value - 600.0).abs() < 1e-6);

        let sols = mix.t_field(&f);
        for (sol, t) in sols.iter().zip(t_true) {
            assert!(sol.converged, "{sol:?}");
            assert!((sol.value - t).abs() < 1e-6, "T = {}", sol.value);
        }
    }

    #[test]
    fn length_mismatch_rejected() {
        let one = [1.0];
        let two = [1.0, 2.0];
        assert!(TwoPhaseFields::new(&one, &one, &one, &one, &two, &one).is_err());
    }
}
