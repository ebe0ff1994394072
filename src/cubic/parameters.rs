use super::mixing_rules::CubicForm;
use ceos_core::parameter::{ParameterError, Substance};
use ceos_core::{roots, RGAS};
use ndarray::Array1;

/// Generalized critical compressibility of Patel and Teja (1982),
/// $\zeta_c=0.329032-0.076799\omega+0.0211947\omega^2$.
const PATEL_TEJA_ZETA: [f64; 3] = [0.329032, -0.076799, 0.0211947];

/// Dimensionless critical constants of one substance:
/// $a=\Omega_a\frac{(RT_c)^2}{p_c}$, $b=\Omega_b\frac{RT_c}{p_c}$ and
/// $c=\Omega_c\frac{RT_c}{p_c}$ for the third parameter of Patel-Teja.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalConstants {
    pub omega_a: f64,
    pub omega_b: f64,
    pub omega_c: f64,
}

impl CriticalConstants {
    const fn universal(omega_a: f64, omega_b: f64) -> Self {
        Self {
            omega_a,
            omega_b,
            omega_c: 0.0,
        }
    }

    pub fn new(form: CubicForm, acentric_factor: f64) -> Result<Self, ParameterError> {
        match form {
            CubicForm::VanDerWaals => Ok(Self::universal(27.0 / 64.0, 1.0 / 8.0)),
            CubicForm::RedlichKwong => Ok(Self::universal(0.42748, 0.08664)),
            CubicForm::PengRobinson => Ok(Self::universal(0.45724, 0.07780)),
            CubicForm::PatelTeja => Self::patel_teja(acentric_factor),
            CubicForm::SchmidtWenzel => Self::schmidt_wenzel(acentric_factor),
        }
    }

    /// $\Omega_b$ is the smallest positive root of
    /// $\Omega_b^3+(2-3\zeta_c)\Omega_b^2+3\zeta_c^2\Omega_b-\zeta_c^3=0$.
    pub fn patel_teja(acentric_factor: f64) -> Result<Self, ParameterError> {
        let w = acentric_factor;
        let [z0, z1, z2] = PATEL_TEJA_ZETA;
        let zeta = z0 + w * (z1 + w * z2);
        let omega_b = smallest_root_in_unit_interval(
            [1.0, 2.0 - 3.0 * zeta, 3.0 * zeta * zeta, -zeta.powi(3)],
            "Patel-Teja",
        )?;
        let omega_c = 1.0 - 3.0 * zeta;
        let omega_a = 3.0 * zeta * zeta
            + 3.0 * (1.0 - 2.0 * zeta) * omega_b
            + omega_b * omega_b
            + 1.0
            - 3.0 * zeta;
        Ok(Self {
            omega_a,
            omega_b,
            omega_c,
        })
    }

    /// $\beta_c$ is the smallest positive root of
    /// $(6\omega+1)\beta^3+3\beta^2+3\beta-1=0$.
    pub fn schmidt_wenzel(acentric_factor: f64) -> Result<Self, ParameterError> {
        let w = acentric_factor;
        let beta = smallest_root_in_unit_interval([6.0 * w + 1.0, 3.0, 3.0, -1.0], "Schmidt-Wenzel")?;
        let zeta = 1.0 / (3.0 * (1.0 + beta * w));
        Ok(Self::universal(
            (1.0 - zeta * (1.0 - beta)).powi(3),
            beta * zeta,
        ))
    }
}

fn smallest_root_in_unit_interval(
    [a, b, c, d]: [f64; 4],
    model: &str,
) -> Result<f64, ParameterError> {
    roots::cubic(a, b, c, d)
        .unwrap_or_default()
        .into_iter()
        .filter(|&x| x > 0.0 && x < 1.0)
        .reduce(f64::min)
        .ok_or_else(|| {
            ParameterError::InvalidParameter(format!(
                "the {model} shape parameter has no root in (0, 1)"
            ))
        })
}

/// Parameters processed using model constants and substance critical data.
#[derive(Debug, Clone)]
pub struct CriticalParameters {
    /// critical temperature in K
    pub tc: Array1<f64>,
    pub acentric_factor: Array1<f64>,
    /// $RT_c/p_c$ in m³/mol
    pub rtc_pc: Array1<f64>,
    /// attraction parameter at the critical point in Pa m⁶/mol²
    pub a: Array1<f64>,
    /// co-volume in m³/mol
    pub b: Array1<f64>,
    /// third parameter (Patel-Teja) in m³/mol
    pub c: Array1<f64>,
}

impl CriticalParameters {
    pub fn new(substances: &[Substance], form: CubicForm) -> Result<Self, ParameterError> {
        let n = substances.len();
        let mut tc = Array1::zeros(n);
        let mut acentric_factor = Array1::zeros(n);
        let mut rtc_pc = Array1::zeros(n);
        let mut a = Array1::zeros(n);
        let mut b = Array1::zeros(n);
        let mut c = Array1::zeros(n);

        for (i, s) in substances.iter().enumerate() {
            if !(s.tc.is_finite() && s.tc > 0.0 && s.pc.is_finite() && s.pc > 0.0) {
                return Err(ParameterError::InvalidParameter(format!(
                    "critical point of {} (tc = {} K, pc = {} Pa)",
                    s.identifier, s.tc, s.pc
                )));
            }
            let constants = CriticalConstants::new(form, s.acentric_factor)?;
            let v = RGAS * s.tc / s.pc;
            tc[i] = s.tc;
            acentric_factor[i] = s.acentric_factor;
            rtc_pc[i] = v;
            a[i] = constants.omega_a * RGAS * s.tc * v;
            b[i] = constants.omega_b * v;
            c[i] = constants.omega_c * v;
        }

        Ok(Self {
            tc,
            acentric_factor,
            rtc_pc,
            a,
            b,
            c,
        })
    }
}
