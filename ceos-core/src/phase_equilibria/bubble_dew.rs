use super::{
    is_trivial_solution, missing_phase, normalize, phase_pair, wilson_k_values,
    wilson_vapor_pressures, RootWindow, VleResult,
};
use crate::composition::{validate_molefracs, MOLEFRAC_TOL};
use crate::equation_of_state::CubicModel;
use crate::errors::{EosError, EosResult};
use crate::parameter::Substance;
use crate::state::Phase;
use crate::SolverOptions;
use ndarray::Array1;
use std::sync::Arc;

const MAX_ITER_PRESSURE: usize = 1000;
const TOL_PRESSURE: f64 = 1e-10;
const MAX_ITER_TEMPERATURE: usize = 1000;
const TOL_TEMPERATURE: f64 = 1e-10;

/// Used for substances without normal boiling point.
const DEFAULT_BOILING_TEMPERATURE: f64 = 100.0;
/// Relative size of the first secant step.
const SECANT_STEP: f64 = 1.01;

/// The composition of one phase is specified, the composition of the
/// incipient phase is iterated.
#[derive(Clone, Copy)]
enum PointType {
    Bubble,
    Dew,
}

impl PointType {
    const fn identifier(&self) -> &'static str {
        match self {
            Self::Bubble => "Bubble point",
            Self::Dew => "Dew point",
        }
    }

    /// Σ z K for bubble points and Σ z / K for dew points.
    fn sum(&self, feed: &Array1<f64>, k: &Array1<f64>) -> f64 {
        match self {
            Self::Bubble => (feed * k).sum(),
            Self::Dew => (feed / k).sum(),
        }
    }

    fn incipient(&self, feed: &Array1<f64>, k: &Array1<f64>) -> Array1<f64> {
        match self {
            Self::Bubble => normalize(feed * k),
            Self::Dew => normalize(feed / k),
        }
    }

    /// (liquid, vapor) mole fractions
    fn phases<'a>(
        &self,
        feed: &'a Array1<f64>,
        incipient: &'a Array1<f64>,
    ) -> (&'a Array1<f64>, &'a Array1<f64>) {
        match self {
            Self::Bubble => (feed, incipient),
            Self::Dew => (incipient, feed),
        }
    }
}

/// # Bubble and dew point calculations
impl VleResult {
    /// Bubble point pressure of a liquid with composition `liquid_molefracs`.
    pub fn bubble_point_pressure<E: CubicModel>(
        eos: &Arc<E>,
        temperature: f64,
        liquid_molefracs: &Array1<f64>,
        initial_pressure: Option<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        iterate_pressure(
            eos,
            temperature,
            liquid_molefracs,
            PointType::Bubble,
            initial_pressure,
            options,
        )
    }

    /// Dew point pressure of a vapor with composition `vapor_molefracs`.
    pub fn dew_point_pressure<E: CubicModel>(
        eos: &Arc<E>,
        temperature: f64,
        vapor_molefracs: &Array1<f64>,
        initial_pressure: Option<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        iterate_pressure(
            eos,
            temperature,
            vapor_molefracs,
            PointType::Dew,
            initial_pressure,
            options,
        )
    }

    /// Bubble point temperature of a liquid with composition `liquid_molefracs`.
    pub fn bubble_point_temperature<E: CubicModel>(
        eos: &Arc<E>,
        pressure: f64,
        liquid_molefracs: &Array1<f64>,
        initial_temperature: Option<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        iterate_temperature(
            eos,
            pressure,
            liquid_molefracs,
            PointType::Bubble,
            initial_temperature,
            options,
        )
    }

    /// Dew point temperature of a vapor with composition `vapor_molefracs`.
    pub fn dew_point_temperature<E: CubicModel>(
        eos: &Arc<E>,
        pressure: f64,
        vapor_molefracs: &Array1<f64>,
        initial_temperature: Option<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        iterate_temperature(
            eos,
            pressure,
            vapor_molefracs,
            PointType::Dew,
            initial_temperature,
            options,
        )
    }
}

fn check_positive(name: &str, value: f64) -> EosResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EosError::InvalidState(
            "bubble/dew point".into(),
            name.into(),
            value,
        ))
    }
}

/// Successive substitution with the pressure rescaled by Σ xK (bubble)
/// or 1/Σ(y/K) (dew).
fn iterate_pressure<E: CubicModel>(
    eos: &Arc<E>,
    temperature: f64,
    feed: &Array1<f64>,
    point: PointType,
    initial_pressure: Option<f64>,
    options: SolverOptions,
) -> EosResult<VleResult> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_PRESSURE, TOL_PRESSURE);
    validate_molefracs(feed, eos.components(), MOLEFRAC_TOL)?;
    check_positive("temperature", temperature)?;

    // initial guess from the Wilson correlation
    let p_sat = wilson_vapor_pressures(eos.substances(), temperature);
    let mut pressure = initial_pressure.unwrap_or_else(|| match point {
        PointType::Bubble => (feed * &p_sat).sum(),
        PointType::Dew => 1.0 / (feed / &p_sat).sum(),
    });
    check_positive("pressure", pressure)?;
    let mut incipient = point.incipient(feed, &(&p_sat / pressure));

    log_iter!(
        verbosity,
        " iter |    residual    |    pressure    | incipient phase mole fractions"
    );
    log_iter!(verbosity, "{:-<77}", "");

    let mut window = RootWindow::default();
    for iter in 1..=max_iter.max(1) {
        let (x, y) = point.phases(feed, &incipient);
        let (liquid, vapor, ln_phi_l, ln_phi_v) = phase_pair(eos, temperature, pressure, x, y)?;
        let missing = missing_phase(&liquid, &vapor);
        let k = (&ln_phi_l - &ln_phi_v).mapv(f64::exp);
        let s = point.sum(feed, &k);
        let residual = (1.0 - s).abs();
        log_iter!(
            verbosity,
            " {:4} | {:14.8e} | {:14.8e} | {:.8}",
            iter,
            residual,
            pressure,
            incipient
        );
        let converged = missing.is_none() && residual < tol;
        if converged || iter >= max_iter {
            if converged {
                if is_trivial_solution(&liquid, &vapor) {
                    log_iter!(verbosity, "Trivial solution encountered!");
                    return Err(EosError::TrivialSolution);
                }
                log_result!(
                    verbosity,
                    "{}: calculation converged in {} step(s)\n",
                    point.identifier(),
                    iter
                );
            } else {
                log_result!(
                    verbosity,
                    "{}: calculation did not converge within {} step(s)\n",
                    point.identifier(),
                    iter
                );
            }
            return Ok(VleResult::from_states(
                &liquid, &vapor, ln_phi_l, ln_phi_v, iter, converged,
            ));
        }
        match missing {
            Some(Phase::Liquid) => pressure = window.increase(pressure),
            Some(Phase::Vapor) => pressure = window.decrease(pressure),
            None => {
                pressure = window.bound(match point {
                    PointType::Bubble => pressure * s,
                    PointType::Dew => pressure / s,
                });
                incipient = point.incipient(feed, &k);
            }
        }
    }
    unreachable!()
}

/// Initial temperature: average of the normal boiling points refined by
/// one secant step on the Wilson residual.
fn initial_temperature_wilson(
    substances: &[Substance],
    feed: &Array1<f64>,
    pressure: f64,
    point: PointType,
) -> (f64, f64) {
    let t0: f64 = substances
        .iter()
        .zip(feed.iter())
        .map(|(s, &z)| z * s.normal_boiling_point.unwrap_or(DEFAULT_BOILING_TEMPERATURE))
        .sum();
    let f = |t: f64| point.sum(feed, &wilson_k_values(substances, t, pressure)) - 1.0;
    let t1 = SECANT_STEP * t0;
    let (f0, f1) = (f(t0), f(t1));
    let t = t1 - f1 * (t1 - t0) / (f1 - f0);
    if t.is_finite() && t > 0.0 {
        (t0, t)
    } else {
        (t0, t1)
    }
}

/// Secant update of the temperature, `None` if the step does not give a
/// finite positive temperature.
fn secant_step(temperature: f64, residual: f64, t_old: f64, residual_old: f64) -> Option<f64> {
    let t = temperature - residual * (temperature - t_old) / (residual - residual_old);
    (t.is_finite() && t > 0.0).then_some(t)
}

/// Successive substitution of the incipient phase composition with a
/// secant step in temperature on Σ xK - 1 (bubble) or Σ y/K - 1 (dew).
fn iterate_temperature<E: CubicModel>(
    eos: &Arc<E>,
    pressure: f64,
    feed: &Array1<f64>,
    point: PointType,
    initial_temperature: Option<f64>,
    options: SolverOptions,
) -> EosResult<VleResult> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_TEMPERATURE, TOL_TEMPERATURE);
    validate_molefracs(feed, eos.components(), MOLEFRAC_TOL)?;
    check_positive("pressure", pressure)?;

    let (t0, t1) = match initial_temperature {
        Some(t) => {
            check_positive("temperature", t)?;
            (t, SECANT_STEP * t)
        }
        None => initial_temperature_wilson(eos.substances(), feed, pressure, point),
    };
    let mut temperature = t0;
    let mut incipient =
        point.incipient(feed, &wilson_k_values(eos.substances(), temperature, pressure));
    // last temperature with both phases present and its residual
    let mut previous: Option<(f64, f64)> = None;
    let mut window = RootWindow::default();

    log_iter!(
        verbosity,
        " iter |    residual    |  temperature   | incipient phase mole fractions"
    );
    log_iter!(verbosity, "{:-<77}", "");

    for iter in 1..=max_iter.max(1) {
        let (x, y) = point.phases(feed, &incipient);
        let (liquid, vapor, ln_phi_l, ln_phi_v) = phase_pair(eos, temperature, pressure, x, y)?;
        let missing = missing_phase(&liquid, &vapor);
        let k = (&ln_phi_l - &ln_phi_v).mapv(f64::exp);
        let g = point.sum(feed, &k) - 1.0;
        log_iter!(
            verbosity,
            " {:4} | {:14.8e} | {:14.8} | {:.8}",
            iter,
            g.abs(),
            temperature,
            incipient
        );

        let converged = missing.is_none() && g.abs() < tol;
        let t_new = match (missing, previous) {
            (Some(Phase::Liquid), _) => Some(window.decrease(temperature)),
            (Some(Phase::Vapor), _) => Some(window.increase(temperature)),
            (None, None) if iter == 1 => Some(window.bound(t1)),
            (None, None) => Some(window.bound(SECANT_STEP * temperature)),
            (None, Some((t_old, g_old))) => {
                secant_step(temperature, g, t_old, g_old).map(|t| window.bound(t))
            }
        };
        let breakdown = !converged && t_new.is_none();
        if breakdown {
            log::warn!(
                "{}: secant step failed at T = {} K (residual {:e}), returning last iterate",
                point.identifier(),
                temperature,
                g
            );
        }
        if converged || breakdown || iter >= max_iter {
            if converged {
                if is_trivial_solution(&liquid, &vapor) {
                    log_iter!(verbosity, "Trivial solution encountered!");
                    return Err(EosError::TrivialSolution);
                }
                log_result!(
                    verbosity,
                    "{}: calculation converged in {} step(s)\n",
                    point.identifier(),
                    iter
                );
            } else {
                log_result!(
                    verbosity,
                    "{}: calculation did not converge within {} step(s)\n",
                    point.identifier(),
                    iter
                );
            }
            return Ok(VleResult::from_states(
                &liquid, &vapor, ln_phi_l, ln_phi_v, iter, converged,
            ));
        }
        if missing.is_none() {
            incipient = point.incipient(feed, &k);
            previous = Some((temperature, g));
        }
        if let Some(t) = t_new {
            temperature = t;
        }
    }
    unreachable!()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn secant_step_breakdown() {
        // identical residuals
        assert_eq!(secant_step(300.0, 0.1, 297.0, 0.1), None);
        // extrapolation below absolute zero
        assert_eq!(secant_step(303.0, 0.07, 300.0, 0.0699), None);
        assert_eq!(secant_step(f64::NAN, 0.1, 300.0, 0.2), None);
        assert_relative_eq!(secant_step(303.0, 0.1, 300.0, -0.2).unwrap(), 302.0);
    }
}
