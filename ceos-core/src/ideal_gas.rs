//! Ideal gas heat capacity correlation and the ideal gas contributions
//! to caloric properties.
//!
//! The isobaric heat capacity of each substance is a fourth order
//! polynomial in temperature,
//!
//! $$\frac{c_p^\mathrm{ig}}{R}=a+bT+cT^2+dT^3+eT^4$$
//!
//! Enthalpy and entropy are integrated in closed form relative to a
//! reference state $(T_\mathrm{ref}, p_\mathrm{ref})$ at which both are zero.
use crate::RGAS;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coefficients of the ideal gas heat capacity polynomial.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct IdealGasRecord {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    /// lower temperature bound of the correlation in K
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    t_min: Option<f64>,
    /// upper temperature bound of the correlation in K
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    t_max: Option<f64>,
}

impl IdealGasRecord {
    /// Creates a new `IdealGasRecord` without range of validity.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            t_min: None,
            t_max: None,
        }
    }

    /// Set the temperature range in which the correlation is valid.
    pub fn with_range(mut self, t_min: f64, t_max: f64) -> Self {
        self.t_min = Some(t_min);
        self.t_max = Some(t_max);
        self
    }

    /// Returns `true` if `temperature` lies within the range of validity.
    pub fn is_valid(&self, temperature: f64) -> bool {
        self.t_min.map_or(true, |t| temperature >= t) && self.t_max.map_or(true, |t| temperature <= t)
    }

    /// Isobaric heat capacity in J/(mol K).
    pub fn heat_capacity(&self, temperature: f64) -> f64 {
        let t = temperature;
        RGAS * (self.a + t * (self.b + t * (self.c + t * (self.d + t * self.e))))
    }

    /// $\int_{T_0}^T c_p\,\mathrm{d}T$ in J/mol.
    pub fn enthalpy_change(&self, t0: f64, t: f64) -> f64 {
        let antiderivative = |t: f64| {
            t * (self.a + t * (self.b / 2.0 + t * (self.c / 3.0 + t * (self.d / 4.0 + t * self.e / 5.0))))
        };
        RGAS * (antiderivative(t) - antiderivative(t0))
    }

    /// $\int_{T_0}^T \frac{c_p}{T}\,\mathrm{d}T$ in J/(mol K).
    pub fn entropy_change(&self, t0: f64, t: f64) -> f64 {
        let polynomial = |t: f64| t * (self.b + t * (self.c / 2.0 + t * (self.d / 3.0 + t * self.e / 4.0)));
        RGAS * (self.a * (t / t0).ln() + polynomial(t) - polynomial(t0))
    }
}

impl fmt::Display for IdealGasRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IdealGasRecord(a={}, b={}, c={}, d={}, e={}",
            self.a, self.b, self.c, self.d, self.e
        )?;
        if let (Some(t_min), Some(t_max)) = (self.t_min, self.t_max) {
            write!(f, ", range=[{} K, {} K]", t_min, t_max)?;
        }
        write!(f, ")")
    }
}

/// Ideal gas contributions of a mixture relative to the reference state.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct IdealGasProperties {
    /// isobaric heat capacity in J/(mol K)
    pub heat_capacity: f64,
    /// enthalpy in J/mol
    pub enthalpy: f64,
    /// entropy in J/(mol K)
    pub entropy: f64,
    /// Gibbs energy in J/mol
    pub gibbs_energy: f64,
    /// internal energy in J/mol
    pub internal_energy: f64,
    /// Helmholtz energy in J/mol
    pub helmholtz_energy: f64,
}

impl IdealGasProperties {
    /// Evaluate the ideal gas contributions of a mixture between the reference
    /// state and the state (`temperature`, `pressure`).
    pub fn new(
        records: &[&IdealGasRecord],
        molefracs: &Array1<f64>,
        reference_temperature: f64,
        temperature: f64,
        reference_pressure: f64,
        pressure: f64,
    ) -> Self {
        for r in records.iter().filter(|r| !r.is_valid(temperature)) {
            log::warn!("Temperature {} K is outside the range of validity of {}", temperature, r);
        }
        let (t0, t) = (reference_temperature, temperature);
        let mut heat_capacity = 0.0;
        let mut enthalpy = 0.0;
        let mut entropy = -RGAS * (pressure / reference_pressure).ln();
        for (r, &y) in records.iter().zip(molefracs.iter()) {
            heat_capacity += y * r.heat_capacity(t);
            enthalpy += y * r.enthalpy_change(t0, t);
            entropy += y * r.entropy_change(t0, t);
        }
        let internal_energy = enthalpy - RGAS * (t - t0);
        Self {
            heat_capacity,
            enthalpy,
            entropy,
            gibbs_energy: enthalpy - t * entropy,
            internal_energy,
            helmholtz_energy: internal_energy - t * entropy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    fn methane() -> IdealGasRecord {
        IdealGasRecord::new(4.568, -8.975e-3, 3.631e-5, -3.407e-8, 1.091e-11).with_range(50.0, 1000.0)
    }

    #[test]
    fn integrals_match_quadrature() {
        let r = methane();
        let (t0, t) = (298.15, 450.0);
        let n = 2000;
        let dt = (t - t0) / n as f64;
        let (mut h, mut s) = (0.0, 0.0);
        for k in 0..n {
            let tk = t0 + (k as f64 + 0.5) * dt;
            h += r.heat_capacity(tk) * dt;
            s += r.heat_capacity(tk) / tk * dt;
        }
        assert_relative_eq!(r.enthalpy_change(t0, t), h, max_relative = 1e-6);
        assert_relative_eq!(r.entropy_change(t0, t), s, max_relative = 1e-6);
    }

    #[test]
    fn reference_state_is_zero() {
        let r = methane();
        let p = IdealGasProperties::new(&[&r], &arr1(&[1.0]), 298.15, 298.15, 1e5, 1e5);
        assert_relative_eq!(p.enthalpy, 0.0);
        assert_relative_eq!(p.entropy, 0.0);
        assert_relative_eq!(p.gibbs_energy, 0.0);
        assert_relative_eq!(p.heat_capacity, r.heat_capacity(298.15));
    }

    #[test]
    fn isothermal_pressure_change() {
        let r = methane();
        let p = IdealGasProperties::new(&[&r, &r], &arr1(&[0.4, 0.6]), 300.0, 300.0, 1e5, 2e5);
        assert_relative_eq!(p.enthalpy, 0.0);
        assert_relative_eq!(p.entropy, -RGAS * 2.0f64.ln(), max_relative = 1e-12);
        assert_relative_eq!(p.gibbs_energy, 300.0 * RGAS * 2.0f64.ln(), max_relative = 1e-12);
        assert!(r.is_valid(300.0));
        assert!(!r.is_valid(1200.0));
    }
}
