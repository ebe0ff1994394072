use super::{
    is_trivial_solution, missing_phase, phase_pair, wilson_vapor_pressures, Convergence, RootWindow,
};
use crate::equation_of_state::CubicModel;
use crate::errors::{EosError, EosResult};
use crate::state::Phase;
use crate::SolverOptions;
use ndarray::Array1;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const MAX_ITER_PURE: usize = 1000;
const TOL_PURE: f64 = 1e-10;

/// Saturation state of a pure substance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VaporPressure {
    /// temperature in K
    pub temperature: f64,
    /// vapor pressure in Pa
    pub pressure: f64,
    pub liquid_compressibility: f64,
    pub vapor_compressibility: f64,
}

impl fmt::Display for VaporPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T = {:.5} K, p_sat = {:.5} Pa, Z_L = {:.8}, Z_V = {:.8}",
            self.temperature, self.pressure, self.liquid_compressibility, self.vapor_compressibility
        )
    }
}

/// # Pure component phase equilibria
impl VaporPressure {
    /// Vapor pressure of substance `component` of the model.
    ///
    /// Without an initial pressure the iteration starts from the Antoine
    /// equation if it is valid at the given temperature, otherwise from
    /// the Wilson correlation. The pressure is updated with the ratio of
    /// liquid and vapor fugacity. Pressures with a single root are moved
    /// toward the range in which liquid and vapor roots are distinct.
    pub fn new<E: CubicModel>(
        eos: &Arc<E>,
        component: usize,
        temperature: f64,
        initial_pressure: Option<f64>,
        options: SolverOptions,
    ) -> EosResult<Convergence<Self>> {
        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_PURE, TOL_PURE);
        let n = eos.components();
        let substance = eos
            .substances()
            .get(component)
            .ok_or(EosError::IncompatibleComponents(component + 1, n))?;
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(EosError::InvalidState(
                "vapor pressure".into(),
                "temperature".into(),
                temperature,
            ));
        }
        if temperature >= substance.tc {
            return Err(EosError::SuperCritical);
        }

        let mut pressure = initial_pressure
            .or_else(|| {
                substance
                    .antoine
                    .as_ref()
                    .and_then(|a| a.vapor_pressure(temperature))
            })
            .unwrap_or_else(|| {
                wilson_vapor_pressures(std::slice::from_ref(substance), temperature)[0]
            });

        let mut molefracs = Array1::zeros(n);
        molefracs[component] = 1.0;

        log_iter!(verbosity, " iter |    residual    |    pressure    ");
        log_iter!(verbosity, "{:-<38}", "");

        let mut window = RootWindow::default();
        for iter in 1..=max_iter.max(1) {
            let (liquid, vapor, ln_phi_l, ln_phi_v) =
                phase_pair(eos, temperature, pressure, &molefracs, &molefracs)?;
            let missing = missing_phase(&liquid, &vapor);
            let ratio = (ln_phi_l[component] - ln_phi_v[component]).exp();
            let residual = (ratio - 1.0).abs();
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:14.8e}",
                iter,
                residual,
                pressure
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
                        "Vapor pressure: calculation converged in {} step(s)\n",
                        iter
                    );
                } else {
                    log_result!(
                        verbosity,
                        "Vapor pressure: calculation did not converge within {} step(s)\n",
                        iter
                    );
                }
                let value = Self {
                    temperature,
                    pressure,
                    liquid_compressibility: liquid.compressibility,
                    vapor_compressibility: vapor.compressibility,
                };
                return Ok(Convergence::new(value, iter, converged));
            }
            pressure = match missing {
                Some(Phase::Liquid) => window.increase(pressure),
                Some(Phase::Vapor) => window.decrease(pressure),
                None => window.bound(pressure * ratio),
            };
        }
        unreachable!()
    }
}
