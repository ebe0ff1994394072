use crate::equation_of_state::CubicModel;
use crate::errors::{EosError, EosResult};
use crate::parameter::Substance;
use crate::state::{Phase, State};
use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use std::fmt;

mod bubble_dew;
mod tp_flash;
mod vle_pure;
pub use tp_flash::{rachford_rice, FlashResult};
pub use vle_pure::VaporPressure;

/// Level of detail in the iteration output.
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success of failure of the iteration.
    Result,
    /// Print a detailed outpur for every iteration.
    Iter,
}

/// Options for the iterative solvers.
///
/// If the values are [None], solver specific default
/// values are used.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Maximum number of iterations.
    pub max_iter: Option<usize>,
    /// Tolerance.
    pub tol: Option<f64>,
    /// Iteration output indicated by the [Verbosity] enum.
    pub verbosity: Verbosity,
}

impl From<(Option<usize>, Option<f64>, Option<Verbosity>)> for SolverOptions {
    fn from(options: (Option<usize>, Option<f64>, Option<Verbosity>)) -> Self {
        Self {
            max_iter: options.0,
            tol: options.1,
            verbosity: options.2.unwrap_or(Verbosity::None),
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}

/// Result of an iterative calculation.
///
/// Running out of iterations is not an error: the last iterate is
/// returned with `converged = false`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Convergence<T> {
    pub value: T,
    pub iterations: usize,
    pub converged: bool,
}

impl<T> Convergence<T> {
    pub fn new(value: T, iterations: usize, converged: bool) -> Self {
        Self {
            value,
            iterations,
            converged,
        }
    }
}

/// Result of a bubble point or dew point calculation.
#[derive(Clone, Debug, Serialize)]
pub struct VleResult {
    /// temperature in K
    pub temperature: f64,
    /// pressure in Pa
    pub pressure: f64,
    pub liquid_molefracs: Array1<f64>,
    pub vapor_molefracs: Array1<f64>,
    pub liquid_compressibility: f64,
    pub vapor_compressibility: f64,
    pub ln_phi_liquid: Array1<f64>,
    pub ln_phi_vapor: Array1<f64>,
    /// equilibrium ratios y/x
    pub k_values: Array1<f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl VleResult {
    fn from_states<E: CubicModel>(
        liquid: &State<E>,
        vapor: &State<E>,
        ln_phi_liquid: Array1<f64>,
        ln_phi_vapor: Array1<f64>,
        iterations: usize,
        converged: bool,
    ) -> Self {
        let k_values = (&ln_phi_liquid - &ln_phi_vapor).mapv(f64::exp);
        Self {
            temperature: liquid.temperature,
            pressure: liquid.pressure,
            liquid_molefracs: liquid.molefracs.clone(),
            vapor_molefracs: vapor.molefracs.clone(),
            liquid_compressibility: liquid.compressibility,
            vapor_compressibility: vapor.compressibility,
            ln_phi_liquid,
            ln_phi_vapor,
            k_values,
            iterations,
            converged,
        }
    }
}

impl fmt::Display for VleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "T = {:.5} K, p = {:.5} Pa", self.temperature, self.pressure)?;
        writeln!(
            f,
            "liquid: Z = {:.8}, x = {:.8}",
            self.liquid_compressibility, self.liquid_molefracs
        )?;
        writeln!(
            f,
            "vapor:  Z = {:.8}, y = {:.8}",
            self.vapor_compressibility, self.vapor_molefracs
        )?;
        write!(
            f,
            "{} after {} iteration(s)",
            if self.converged {
                "converged"
            } else {
                "not converged"
            },
            self.iterations
        )
    }
}

/// Vapor pressures from the Wilson correlation
/// $p_i^\mathrm{sat}=p_{c,i}\exp\left(5.373(1+\omega_i)\left(1-\frac{T_{c,i}}{T}\right)\right)$.
pub(crate) fn wilson_vapor_pressures(substances: &[Substance], temperature: f64) -> Array1<f64> {
    substances
        .iter()
        .map(|s| s.pc * (5.373 * (1.0 + s.acentric_factor) * (1.0 - s.tc / temperature)).exp())
        .collect()
}

/// Equilibrium ratios from the Wilson correlation.
pub fn wilson_k_values(substances: &[Substance], temperature: f64, pressure: f64) -> Array1<f64> {
    wilson_vapor_pressures(substances, temperature) / pressure
}

pub(crate) fn normalize(x: Array1<f64>) -> Array1<f64> {
    let s = x.sum();
    x / s
}

/// Liquid and vapor state plus their log fugacity coefficients.
pub(crate) fn phase_pair<E: CubicModel>(
    eos: &std::sync::Arc<E>,
    temperature: f64,
    pressure: f64,
    liquid_molefracs: &Array1<f64>,
    vapor_molefracs: &Array1<f64>,
) -> EosResult<(State<E>, State<E>, Array1<f64>, Array1<f64>)> {
    if !(pressure.is_finite() && pressure > 0.0) {
        return Err(EosError::IterationFailed(format!(
            "pressure iteration (p = {} Pa)",
            pressure
        )));
    }
    let liquid = State::new_tp(eos, temperature, pressure, liquid_molefracs, Phase::Liquid)?;
    let vapor = State::new_tp(eos, temperature, pressure, vapor_molefracs, Phase::Vapor)?;
    let ln_phi_liquid = liquid.ln_phi();
    let ln_phi_vapor = vapor.ln_phi();
    Ok((liquid, vapor, ln_phi_liquid, ln_phi_vapor))
}

const TRIVIAL_REL_DEVIATION: f64 = 1e-5;

/// Both phases collapsed onto the same root and the same composition.
pub(crate) fn is_trivial_solution<E>(liquid: &State<E>, vapor: &State<E>) -> bool {
    let dz = (vapor.compressibility / liquid.compressibility - 1.0).abs();
    let dx = Zip::from(&liquid.molefracs)
        .and(&vapor.molefracs)
        .fold(0.0f64, |acc, &x, &y| acc.max((x - y).abs()));
    dz < TRIVIAL_REL_DEVIATION && dx < TRIVIAL_REL_DEVIATION
}

/// `true` if the only root of `state` lies on the vapor side of the
/// inflection point of the cubic, i.e. the missing roots are liquid-like.
fn is_vapor_like<E: CubicModel>(state: &State<E>) -> bool {
    let [c3, c2, _, _] =
        state
            .eos
            .compressibility_polynomial(state.pressure, state.temperature, &state.molefracs);
    state.compressibility > -c2 / (3.0 * c3)
}

fn has_single_root<E: CubicModel>(state: &State<E>) -> bool {
    state
        .eos
        .compressibility_roots(state.pressure, state.temperature, &state.molefracs)
        .len()
        == 1
}

/// The phase that has no root of its own kind: a liquid on a vapor-like
/// root (pressure too low, temperature too high) or a vapor on a
/// liquid-like root (pressure too high, temperature too low).
pub(crate) fn missing_phase<E: CubicModel>(liquid: &State<E>, vapor: &State<E>) -> Option<Phase> {
    if has_single_root(liquid) && is_vapor_like(liquid) {
        Some(Phase::Liquid)
    } else if has_single_root(vapor) && !is_vapor_like(vapor) {
        Some(Phase::Vapor)
    } else {
        None
    }
}

/// Bracket of a state variable (pressure or temperature) in which both
/// phases have a root of their own kind.
///
/// Bounds are collected whenever an iterate leaves the bracket. Once both
/// bounds are known, the bracket is bisected geometrically.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RootWindow {
    too_low: Option<f64>,
    too_high: Option<f64>,
}

impl RootWindow {
    const STEP: f64 = 1.1;

    /// `value` lies below the bracket, returns the next iterate.
    pub(crate) fn increase(&mut self, value: f64) -> f64 {
        self.too_low = Some(self.too_low.map_or(value, |l| l.max(value)));
        self.next(value * Self::STEP)
    }

    /// `value` lies above the bracket, returns the next iterate.
    pub(crate) fn decrease(&mut self, value: f64) -> f64 {
        self.too_high = Some(self.too_high.map_or(value, |u| u.min(value)));
        self.next(value / Self::STEP)
    }

    fn next(&self, step: f64) -> f64 {
        match (self.too_low, self.too_high) {
            (Some(l), Some(u)) => (l * u).sqrt(),
            _ => self.bound(step),
        }
    }

    /// Keep an update inside the known bounds.
    pub(crate) fn bound(&self, value: f64) -> f64 {
        match (self.too_low, self.too_high) {
            (Some(l), Some(u)) if value <= l || value >= u => (l * u).sqrt(),
            (Some(l), _) if value <= l => l * Self::STEP,
            (_, Some(u)) if value >= u => u / Self::STEP,
            _ => value,
        }
    }
}
