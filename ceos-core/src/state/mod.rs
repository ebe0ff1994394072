//! A homogeneous phase at given temperature, pressure and composition.
use crate::composition::{validate_molefracs, MOLEFRAC_TOL_INPUT};
use crate::equation_of_state::{CubicModel, DepartureProperties, DerivativeProperties};
use crate::errors::{EosError, EosResult};
use crate::RGAS;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

mod properties;
pub use properties::{PhaseProperties, PropertySet, TotalProperties};

/// Selection of the compressibility root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// smallest physical root
    Liquid,
    /// largest physical root
    Vapor,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquid => write!(f, "liquid"),
            Self::Vapor => write!(f, "vapor"),
        }
    }
}

/// Thermodynamic state of a single phase.
///
/// If the equation of state has only one physical root at the given
/// conditions, liquid and vapor states coincide.
#[derive(Debug)]
pub struct State<E> {
    pub eos: Arc<E>,
    /// temperature in K
    pub temperature: f64,
    /// pressure in Pa
    pub pressure: f64,
    pub molefracs: Array1<f64>,
    pub compressibility: f64,
    pub phase: Phase,
}

impl<E> Clone for State<E> {
    fn clone(&self) -> Self {
        Self {
            eos: self.eos.clone(),
            temperature: self.temperature,
            pressure: self.pressure,
            molefracs: self.molefracs.clone(),
            compressibility: self.compressibility,
            phase: self.phase,
        }
    }
}

impl<E> fmt::Display for State<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T = {:.5} K, p = {:.5} Pa, {} root Z = {:.8}, x = {:.8}",
            self.temperature, self.pressure, self.phase, self.compressibility, self.molefracs
        )
    }
}

impl<E: CubicModel> State<E> {
    /// Create a state from temperature, pressure and composition.
    ///
    /// Fails if the composition is invalid or if no physical root exists.
    pub fn new_tp(
        eos: &Arc<E>,
        temperature: f64,
        pressure: f64,
        molefracs: &Array1<f64>,
        phase: Phase,
    ) -> EosResult<Self> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(EosError::InvalidState(
                "State::new_tp".into(),
                "temperature".into(),
                temperature,
            ));
        }
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(EosError::InvalidState(
                "State::new_tp".into(),
                "pressure".into(),
                pressure,
            ));
        }
        validate_molefracs(molefracs, eos.components(), MOLEFRAC_TOL_INPUT)?;
        let roots = eos.compressibility_roots(pressure, temperature, molefracs);
        let compressibility = match phase {
            Phase::Liquid => roots.first(),
            Phase::Vapor => roots.last(),
        }
        .copied()
        .ok_or_else(|| EosError::NoRoot(phase.to_string()))?;
        Ok(Self {
            eos: eos.clone(),
            temperature,
            pressure,
            molefracs: molefracs.clone(),
            compressibility,
            phase,
        })
    }

    /// Molar volume in m³/mol.
    pub fn molar_volume(&self) -> f64 {
        self.compressibility * RGAS * self.temperature / self.pressure
    }

    /// Molar density in mol/m³.
    pub fn density(&self) -> f64 {
        1.0 / self.molar_volume()
    }

    /// Molar weight of the mixture in kg/mol.
    pub fn molar_weight(&self) -> f64 {
        self.eos
            .substances()
            .iter()
            .zip(self.molefracs.iter())
            .map(|(s, &x)| x * s.molarweight)
            .sum::<f64>()
            * 1e-3
    }

    /// Mass density in kg/m³.
    pub fn mass_density(&self) -> f64 {
        self.density() * self.molar_weight()
    }

    /// Logarithm of the fugacity coefficients.
    pub fn ln_phi(&self) -> Array1<f64> {
        self.eos.ln_phi(
            &self.molefracs,
            self.pressure,
            self.temperature,
            self.compressibility,
        )
    }

    /// Fugacities in Pa.
    pub fn fugacity(&self) -> Array1<f64> {
        self.ln_phi().mapv(f64::exp) * &self.molefracs * self.pressure
    }

    /// Departure functions relative to the ideal gas at the same
    /// temperature and pressure.
    pub fn departure_properties(&self) -> DepartureProperties {
        self.eos.departure_properties(
            self.pressure,
            self.temperature,
            &self.molefracs,
            self.compressibility,
        )
    }

    /// Derivative properties, `ideal_gas_heat_capacity` in J/(mol K).
    pub fn derivative_properties(&self, ideal_gas_heat_capacity: Option<f64>) -> DerivativeProperties {
        DerivativeProperties::new(
            self.eos.as_ref(),
            self.temperature,
            self.molar_volume(),
            &self.molefracs,
            self.molar_weight(),
            ideal_gas_heat_capacity,
        )
    }
}
