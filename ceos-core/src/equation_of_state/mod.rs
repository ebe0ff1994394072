//! The generic cubic equation of state
//!
//! $$p=\frac{RT}{v-b}-\frac{\theta}{v^2+\delta v+\varepsilon}$$
//!
//! Every model is characterized by the four mixture parameters
//! $b$, $\theta(T)$, $\delta$ and $\varepsilon$. Models only provide these
//! parameters, compressibility factors, fugacity coefficients and
//! departure functions are evaluated here.
use crate::parameter::Substance;
use crate::roots;
use crate::RGAS;
use ndarray::Array1;
use num_dual::{Dual64, DualNum};

mod residual_properties;
pub use residual_properties::{DepartureProperties, DerivativeProperties};

/// Mixture parameters of the generic cubic equation of state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureParameters<D> {
    /// effective co-volume in m³/mol
    pub b: D,
    /// attraction parameter in Pa m⁶/mol²
    pub theta: D,
    /// in m³/mol
    pub delta: D,
    /// in m⁶/mol²
    pub epsilon: D,
}

/// A cubic equation of state for one or more substances.
///
/// Implementors provide the mixture parameters as function of temperature
/// and composition. The composition passed to
/// [mixture_parameters](CubicModel::mixture_parameters) is not necessarily
/// normalized: `b`, `delta` have to be homogeneous functions of degree one
/// and `theta`, `epsilon` of degree two in the mole numbers, so that
/// derivatives with respect to a single mole fraction are partial molar
/// derivatives.
pub trait CubicModel: Send + Sync {
    /// Number of components.
    fn components(&self) -> usize;

    /// The substances in the order of the mole fractions.
    fn substances(&self) -> &[Substance];

    fn mixture_parameters<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        molefracs: &Array1<D>,
    ) -> MixtureParameters<D>;

    /// Partial derivatives of the mixture parameters with respect to the
    /// mole fraction of `component` at constant temperature.
    fn composition_derivatives(
        &self,
        temperature: f64,
        molefracs: &Array1<f64>,
        component: usize,
    ) -> MixtureParameters<f64> {
        let y = Array1::from_shape_fn(molefracs.len(), |j| {
            Dual64::new(molefracs[j], if j == component { 1.0 } else { 0.0 })
        });
        let p = self.mixture_parameters(Dual64::from(temperature), &y);
        MixtureParameters {
            b: p.b.eps,
            theta: p.theta.eps,
            delta: p.delta.eps,
            epsilon: p.epsilon.eps,
        }
    }

    /// Pressure in Pa.
    fn pressure<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        molar_volume: D,
        molefracs: &Array1<f64>,
    ) -> D {
        let p = self.mixture_parameters(temperature, &molefracs.mapv(D::from));
        let v = molar_volume;
        temperature * RGAS / (v - p.b) - p.theta / (v * (v + p.delta) + p.epsilon)
    }

    /// Residual Helmholtz energy $\frac{a^\mathrm{res}}{RT}$ at constant
    /// temperature and volume.
    fn residual_helmholtz_energy<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        molar_volume: D,
        molefracs: &Array1<f64>,
    ) -> D {
        let p = self.mixture_parameters(temperature, &molefracs.mapv(D::from));
        let v = molar_volume;
        -(-p.b / v + 1.0).ln()
            - p.theta * attraction_integral(v, p.delta, p.epsilon) / (temperature * RGAS)
    }

    /// Physical compressibility factors at (`pressure`, `temperature`) in
    /// ascending order.
    ///
    /// Only roots with $v>b$ are returned. An empty list means that no
    /// phase exists at these conditions.
    fn compressibility_roots(
        &self,
        pressure: f64,
        temperature: f64,
        molefracs: &Array1<f64>,
    ) -> Vec<f64> {
        let b = self.mixture_parameters(temperature, molefracs).b * pressure
            / (RGAS * temperature);
        let [c3, c2, c1, c0] = self.compressibility_polynomial(pressure, temperature, molefracs);
        roots::cubic(c3, c2, c1, c0)
            .unwrap_or_default()
            .into_iter()
            .filter(|&z| z >= 0.0 && z > b)
            .collect()
    }

    /// Coefficients of the cubic in the compressibility factor, highest
    /// order first.
    fn compressibility_polynomial(
        &self,
        pressure: f64,
        temperature: f64,
        molefracs: &Array1<f64>,
    ) -> [f64; 4] {
        let p = self.mixture_parameters(temperature, molefracs);
        let beta = pressure / (RGAS * temperature);
        let b = p.b * beta;
        let d = p.delta * beta;
        let t = p.theta * beta / (RGAS * temperature);
        let e = p.epsilon * beta * beta;
        [
            1.0,
            d - b - 1.0,
            t + e - d * (b + 1.0),
            -(e * (b + 1.0) + b * t),
        ]
    }

    /// Logarithm of the fugacity coefficient of `component` in a phase with
    /// compressibility factor `compressibility`.
    fn ln_phi_component(
        &self,
        component: usize,
        molefracs: &Array1<f64>,
        pressure: f64,
        temperature: f64,
        compressibility: f64,
    ) -> f64 {
        let rt = RGAS * temperature;
        let p = self.mixture_parameters(temperature, molefracs);
        let dp = self.composition_derivatives(temperature, molefracs, component);
        let v = compressibility * rt / pressure;
        let j = attraction_integral(
            Dual64::from(v),
            Dual64::new(p.delta, dp.delta),
            Dual64::new(p.epsilon, dp.epsilon),
        );
        -(1.0 - p.b / v).ln() + dp.b / (v - p.b)
            - (dp.theta * j.re + p.theta * j.eps) / rt
            - compressibility.ln()
    }

    /// Logarithm of the fugacity coefficients of all components.
    fn ln_phi(
        &self,
        molefracs: &Array1<f64>,
        pressure: f64,
        temperature: f64,
        compressibility: f64,
    ) -> Array1<f64> {
        (0..self.components())
            .map(|i| self.ln_phi_component(i, molefracs, pressure, temperature, compressibility))
            .collect()
    }

    /// Fugacity coefficient of `component`.
    fn fugacity_coefficient(
        &self,
        component: usize,
        molefracs: &Array1<f64>,
        pressure: f64,
        temperature: f64,
        compressibility: f64,
    ) -> f64 {
        self.ln_phi_component(component, molefracs, pressure, temperature, compressibility)
            .exp()
    }

    /// Departure functions (real fluid minus ideal gas at the same
    /// temperature and pressure) by quadrature of the compressibility
    /// factor over density.
    fn departure_properties(
        &self,
        pressure: f64,
        temperature: f64,
        molefracs: &Array1<f64>,
        compressibility: f64,
    ) -> DepartureProperties {
        DepartureProperties::new(self, pressure, temperature, molefracs, compressibility)
    }

    /// Difference of the departure functions between the state
    /// (`pressure`, `temperature`) and a reference state evaluated on the
    /// same root (liquid or vapor).
    fn delta_departure_properties(
        &self,
        molefracs: &Array1<f64>,
        reference: (f64, f64, f64),
        state: (f64, f64, f64),
    ) -> DepartureProperties {
        let (p_ref, t_ref, z_ref) = reference;
        let (p, t, z) = state;
        self.departure_properties(p, t, molefracs, z)
            - self.departure_properties(p_ref, t_ref, molefracs, z_ref)
    }
}

/// $J=\int_v^\infty\frac{\mathrm{d}v}{v^2+\delta v+\varepsilon}$
///
/// The closed form depends on the sign of the discriminant
/// $D=\delta^2-4\varepsilon$. For (numerically) vanishing discriminants the
/// expansion $J=\frac{1}{u}+\frac{D}{12u^3}$ with $u=v+\frac{\delta}{2}$ is
/// used, which keeps derivatives with respect to $\delta$ and
/// $\varepsilon$ exact.
pub fn attraction_integral<D: DualNum<f64> + Copy>(molar_volume: D, delta: D, epsilon: D) -> D {
    let disc = delta * delta - epsilon * 4.0;
    let u = molar_volume + delta * 0.5;
    let threshold = 100.0 * f64::EPSILON * (delta.re() * delta.re() + epsilon.re().abs());
    if disc.re().abs() <= threshold {
        u.recip() + disc / (u.powi(3) * 12.0)
    } else if disc.re() > 0.0 {
        let s = disc.sqrt();
        ((u + s * 0.5) / (u - s * 0.5)).ln() / s
    } else {
        let s = (-disc).sqrt();
        (s / (u * 2.0)).atan() * 2.0 / s
    }
}
