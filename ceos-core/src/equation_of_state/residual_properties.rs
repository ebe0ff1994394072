use super::CubicModel;
use crate::RGAS;
use ndarray::Array1;
use num_dual::{Dual2_64, Dual64};
use serde::Serialize;
use std::ops::Sub;

const GLQ10: [[f64; 2]; 10] = [
    [-0.1488743389816312, 0.2955242247147529],
    [0.1488743389816312, 0.2955242247147529],
    [-0.4333953941292472, 0.2692667193099963],
    [0.4333953941292472, 0.2692667193099963],
    [-0.6794095682990244, 0.219086362515982],
    [0.6794095682990244, 0.219086362515982],
    [-0.8650633666889845, 0.1494513491505806],
    [0.8650633666889845, 0.1494513491505806],
    [-0.9739065285171717, 0.0666713443086881],
    [0.9739065285171717, 0.0666713443086881],
];

/// Number of panels of the composite quadrature. Panels are refined
/// towards the upper density limit.
const PANELS: usize = 16;

/// Departure functions: property of the real fluid minus the property
/// of the ideal gas at the same temperature, pressure and composition.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct DepartureProperties {
    /// in J/mol
    pub enthalpy: f64,
    /// in J/(mol K)
    pub entropy: f64,
    /// in J/mol
    pub gibbs_energy: f64,
    /// in J/mol
    pub internal_energy: f64,
    /// in J/mol
    pub helmholtz_energy: f64,
}

impl DepartureProperties {
    pub fn new<E: CubicModel + ?Sized>(
        eos: &E,
        pressure: f64,
        temperature: f64,
        molefracs: &Array1<f64>,
        compressibility: f64,
    ) -> Self {
        let rt = RGAS * temperature;
        let z = compressibility;
        let density = pressure / (z * rt);
        let (a_res, u_res) = residual_integrals(eos, temperature, density, molefracs);
        Self {
            enthalpy: rt * (u_res + z - 1.0),
            entropy: RGAS * (u_res - a_res + z.ln()),
            gibbs_energy: rt * (a_res + z - 1.0 - z.ln()),
            internal_energy: rt * u_res,
            helmholtz_energy: rt * (a_res - z.ln()),
        }
    }
}

impl Sub for DepartureProperties {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            enthalpy: self.enthalpy - rhs.enthalpy,
            entropy: self.entropy - rhs.entropy,
            gibbs_energy: self.gibbs_energy - rhs.gibbs_energy,
            internal_energy: self.internal_energy - rhs.internal_energy,
            helmholtz_energy: self.helmholtz_energy - rhs.helmholtz_energy,
        }
    }
}

/// Reduced residual Helmholtz and internal energy at constant temperature
/// and volume:
///
/// $$\frac{a^\mathrm{res}}{RT}=\int_0^\rho\frac{Z-1}{\rho'}\mathrm{d}\rho'\qquad
/// \frac{u^\mathrm{res}}{RT}=-T\int_0^\rho\left(\frac{\partial Z}{\partial T}\right)_{\rho'}\frac{\mathrm{d}\rho'}{\rho'}$$
fn residual_integrals<E: CubicModel + ?Sized>(
    eos: &E,
    temperature: f64,
    density: f64,
    molefracs: &Array1<f64>,
) -> (f64, f64) {
    let t = Dual64::from(temperature).derivative();
    let p = eos.mixture_parameters(t, &molefracs.mapv(Dual64::from));
    let rt = t * RGAS;

    let n = PANELS as f64;
    let boundary = |k: usize| density * (1.0 - (1.0 - k as f64 / n).powi(2));
    let mut integral = Dual64::from(0.0);
    for k in 0..PANELS {
        let (lo, hi) = (boundary(k), boundary(k + 1));
        let (mid, half) = (0.5 * (hi + lo), 0.5 * (hi - lo));
        integral = GLQ10.iter().fold(integral, |acc, &[x, w]| {
            let rho = mid + half * x;
            // (Z - 1) / rho
            let f = p.b / (-p.b * rho + 1.0)
                - p.theta / (rt * ((p.epsilon * rho + p.delta) * rho + 1.0));
            acc + f * (w * half)
        });
    }
    (integral.re, -temperature * integral.eps)
}

/// Thermodynamic derivatives of a phase.
///
/// Properties that need the ideal gas heat capacity are `None` if it is
/// not available.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DerivativeProperties {
    /// $\left(\frac{\partial p}{\partial T}\right)_v$ in Pa/K
    pub dp_dt: f64,
    /// $\left(\frac{\partial p}{\partial v}\right)_T$ in Pa mol/m³
    pub dp_dv: f64,
    /// in 1/Pa
    pub isothermal_compressibility: f64,
    /// in J/(mol K)
    pub residual_isochoric_heat_capacity: f64,
    /// in J/(mol K)
    pub residual_isobaric_heat_capacity: f64,
    /// in J/(mol K)
    pub isochoric_heat_capacity: Option<f64>,
    /// in J/(mol K)
    pub isobaric_heat_capacity: Option<f64>,
    pub heat_capacity_ratio: Option<f64>,
    /// in m/s
    pub speed_of_sound: Option<f64>,
    /// in K/Pa
    pub joule_thomson: Option<f64>,
}

impl DerivativeProperties {
    /// `molarweight` in kg/mol, `ideal_gas_heat_capacity` in J/(mol K).
    pub fn new<E: CubicModel + ?Sized>(
        eos: &E,
        temperature: f64,
        molar_volume: f64,
        molefracs: &Array1<f64>,
        molarweight: f64,
        ideal_gas_heat_capacity: Option<f64>,
    ) -> Self {
        let (t, v) = (temperature, molar_volume);
        let dp_dt = eos
            .pressure(Dual64::from(t).derivative(), Dual64::from(v), molefracs)
            .eps;
        let dp_dv = eos
            .pressure(Dual64::from(t), Dual64::from(v).derivative(), molefracs)
            .eps;
        let f = eos.residual_helmholtz_energy(
            Dual2_64::from(t).derivative(),
            Dual2_64::from(v),
            molefracs,
        );
        let cv_res = -t * RGAS * (2.0 * f.v1 + t * f.v2);
        let dilatation = t * dp_dt * dp_dt / dp_dv;
        let cp_res = cv_res - dilatation - RGAS;

        let cv = ideal_gas_heat_capacity.map(|cp_ig| cp_ig - RGAS + cv_res);
        let cp = cv.map(|cv| cv - dilatation);
        let ratio = cp.zip(cv).map(|(cp, cv)| cp / cv);
        Self {
            dp_dt,
            dp_dv,
            isothermal_compressibility: -1.0 / (v * dp_dv),
            residual_isochoric_heat_capacity: cv_res,
            residual_isobaric_heat_capacity: cp_res,
            isochoric_heat_capacity: cv,
            isobaric_heat_capacity: cp,
            heat_capacity_ratio: ratio,
            speed_of_sound: ratio.map(|r| (-v * v * r * dp_dv / molarweight).sqrt()),
            joule_thomson: cp.map(|cp| (-t * dp_dt / dp_dv - v) / cp),
        }
    }
}
