use super::{normalize, phase_pair, wilson_k_values, Convergence, VleResult};
use crate::composition::{validate_molefracs, MOLEFRAC_TOL};
use crate::equation_of_state::CubicModel;
use crate::errors::{EosError, EosResult};
use crate::{SolverOptions, Verbosity};
use ndarray::{Array1, Zip};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const MAX_ITER_TP: usize = 1000;
const TOL_TP: f64 = 1e-9;
const MAX_ITER_RR: usize = 100;
const TOL_RR: f64 = 1e-12;

/// Result of an isothermal-isobaric flash.
#[derive(Clone, Debug, Serialize)]
pub struct FlashResult {
    /// temperature in K
    pub temperature: f64,
    /// pressure in Pa
    pub pressure: f64,
    pub feed: Array1<f64>,
    /// moles of vapor per mole of feed
    pub vapor_fraction: f64,
    pub liquid_molefracs: Array1<f64>,
    pub vapor_molefracs: Array1<f64>,
    pub k_values: Array1<f64>,
    /// bubble point pressure of the feed in Pa
    pub bubble_pressure: f64,
    /// dew point pressure of the feed in Pa
    pub dew_pressure: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl fmt::Display for FlashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "T = {:.5} K, p = {:.5} Pa, vapor fraction = {:.8}",
            self.temperature, self.pressure, self.vapor_fraction
        )?;
        writeln!(f, "x = {:.8}", self.liquid_molefracs)?;
        write!(f, "y = {:.8}", self.vapor_molefracs)
    }
}

/// # Flash calculations
impl FlashResult {
    /// Perform a Tp-flash calculation for the given feed composition.
    ///
    /// The pressure has to lie between the dew point and the bubble point
    /// pressure of the feed at the given temperature.
    pub fn tp_flash<E: CubicModel>(
        eos: &Arc<E>,
        temperature: f64,
        pressure: f64,
        feed: &Array1<f64>,
        options: SolverOptions,
    ) -> EosResult<Self> {
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_TP, TOL_TP);
        validate_molefracs(feed, eos.components(), MOLEFRAC_TOL)?;
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(EosError::InvalidState(
                "tp_flash".into(),
                "pressure".into(),
                pressure,
            ));
        }

        // the two-phase region is bounded by the saturation pressures of the feed
        let bounds = SolverOptions::new().verbosity(reduce(verbosity));
        let bubble = VleResult::bubble_point_pressure(eos, temperature, feed, None, bounds)?;
        let dew = VleResult::dew_point_pressure(eos, temperature, feed, None, bounds)?;
        for bound in [&bubble, &dew].into_iter().filter(|b| !b.converged) {
            log::warn!(
                "Tp flash: bounding saturation pressure {} Pa did not converge within {} step(s)",
                bound.pressure,
                bound.iterations
            );
        }
        let (p_bubble, p_dew) = (bubble.pressure, dew.pressure);
        if pressure < p_dew || pressure > p_bubble {
            return Err(EosError::InfeasibleFlash {
                pressure,
                dew: p_dew,
                bubble: p_bubble,
            });
        }

        // initialization
        let mut vapor_fraction = if p_bubble > p_dew {
            (p_bubble - pressure) / (p_bubble - p_dew)
        } else {
            0.5
        };
        let mut k = wilson_k_values(eos.substances(), temperature, pressure);
        let mut x = normalize(split_liquid(feed, &k, vapor_fraction));
        let mut y = normalize(&k * &x);

        log_iter!(
            verbosity,
            " iter |    residual    | vapor fraction | liquid mole fractions | vapor mole fractions"
        );
        log_iter!(verbosity, "{:-<77}", "");
        log_iter!(
            verbosity,
            " {:4} |                | {:14.8} | {:.8} | {:.8}",
            0,
            vapor_fraction,
            x,
            y
        );

        let mut iterations = 0;
        let mut converged = false;
        while iterations < max_iter {
            iterations += 1;
            let (_, _, ln_phi_l, ln_phi_v) = phase_pair(eos, temperature, pressure, &x, &y)?;
            let k_new = (&ln_phi_l - &ln_phi_v).mapv(f64::exp);
            vapor_fraction = rachford_rice(feed, &k_new, vapor_fraction, verbosity).value;
            let x_new = split_liquid(feed, &k_new, vapor_fraction);
            y = normalize(&k_new * &x_new);
            x = normalize(x_new);
            let residual = Zip::from(&k_new)
                .and(&k)
                .fold(0.0f64, |acc, &kn, &ko| acc.max((kn / ko - 1.0).abs()));
            k = k_new;
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:14.8} | {:.8} | {:.8}",
                iterations,
                residual,
                vapor_fraction,
                x,
                y
            );
            if residual < tol {
                converged = true;
                break;
            }
        }
        if converged {
            log_result!(
                verbosity,
                "Tp flash: calculation converged in {} step(s)\n",
                iterations
            );
        } else {
            log_result!(
                verbosity,
                "Tp flash: calculation did not converge within {} step(s)\n",
                iterations
            );
        }

        Ok(Self {
            temperature,
            pressure,
            feed: feed.clone(),
            vapor_fraction,
            liquid_molefracs: x,
            vapor_molefracs: y,
            k_values: k,
            bubble_pressure: p_bubble,
            dew_pressure: p_dew,
            iterations,
            converged,
        })
    }
}

/// Iteration output of the bounding saturation pressures is only
/// shown with the highest verbosity.
fn reduce(verbosity: Verbosity) -> Verbosity {
    match verbosity {
        Verbosity::Iter => Verbosity::Result,
        _ => Verbosity::None,
    }
}

/// Unnormalized liquid composition z / (1 + v (K - 1)).
fn split_liquid(feed: &Array1<f64>, k: &Array1<f64>, vapor_fraction: f64) -> Array1<f64> {
    Zip::from(feed)
        .and(k)
        .map_collect(|&z, &k| z / (1.0 + vapor_fraction * (k - 1.0)))
}

/// Solve the Rachford-Rice equation
/// $\sum_i\frac{z_i(K_i-1)}{1+v(K_i-1)}=0$
/// for the vapor fraction with Newton's method.
///
/// Every iterate is clamped to [0, 1].
pub fn rachford_rice(
    feed: &Array1<f64>,
    k_values: &Array1<f64>,
    initial_vapor_fraction: f64,
    verbosity: Verbosity,
) -> Convergence<f64> {
    let mut v = initial_vapor_fraction.clamp(0.0, 1.0);
    for iter in 1..=MAX_ITER_RR {
        let (f, df) = Zip::from(feed)
            .and(k_values)
            .fold((0.0, 0.0), |(f, df), &z, &k| {
                let d = 1.0 + v * (k - 1.0);
                (f + z * (k - 1.0) / d, df - z * (k - 1.0).powi(2) / (d * d))
            });
        // all K = 1: the phase split is undetermined
        if df == 0.0 {
            return Convergence::new(v, iter, false);
        }
        let dv = f / df;
        v = (v - dv).clamp(0.0, 1.0);
        if dv.abs() < TOL_RR {
            return Convergence::new(v, iter, true);
        }
    }
    log_result!(
        verbosity,
        "Rachford-Rice: calculation did not converge within {} step(s)",
        MAX_ITER_RR
    );
    Convergence::new(v, MAX_ITER_RR, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn rachford_rice_two_components() {
        // z = (0.5, 0.5), K = (2, 0.5): 0.5/(1+v) - 0.25/(1-0.5v) = 0 => v = 0.5
        let z = arr1(&[0.5, 0.5]);
        let k = arr1(&[2.0, 0.5]);
        let res = rachford_rice(&z, &k, 0.1, Verbosity::None);
        assert!(res.converged);
        assert_relative_eq!(res.value, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn rachford_rice_clamps_to_single_phase() {
        // all K > 1: the feed is a superheated vapor
        let z = arr1(&[0.3, 0.7]);
        let k = arr1(&[3.0, 1.5]);
        let res = rachford_rice(&z, &k, 0.5, Verbosity::None);
        assert_eq!(res.value, 1.0);
        // all K < 1: subcooled liquid
        let k = arr1(&[0.3, 0.9]);
        let res = rachford_rice(&z, &k, 0.5, Verbosity::None);
        assert_eq!(res.value, 0.0);
    }

    #[test]
    fn rachford_rice_without_phase_split() {
        let z = arr1(&[0.4, 0.6]);
        let k = arr1(&[1.0, 1.0]);
        let res = rachford_rice(&z, &k, 0.3, Verbosity::None);
        assert!(!res.converged);
        assert_eq!(res.iterations, 1);
        assert_eq!(res.value, 0.3);
    }

    #[test]
    fn rachford_rice_mass_balance() {
        let z = arr1(&[0.2, 0.3, 0.5]);
        let k = arr1(&[3.9, 1.3, 0.45]);
        let v = rachford_rice(&z, &k, 0.4, Verbosity::None).value;
        let x = split_liquid(&z, &k, v);
        let y = &k * &x;
        assert_relative_eq!(x.sum(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(y.sum(), 1.0, epsilon = 1e-10);
        let feed = &y * v + &x * (1.0 - v);
        assert_relative_eq!(feed, z, epsilon = 1e-12);
    }
}
