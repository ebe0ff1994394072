use ceos_core::MixtureParameters;
use ndarray::{Array1, Array2};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Shape of the attractive denominator $v^2+\delta v+\varepsilon$
/// as function of the co-volume $b$ and the third parameter $c$.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubicForm {
    /// $\delta=\varepsilon=0$
    VanDerWaals,
    /// $\delta=b+2c$, $\varepsilon=c(b+c)$
    RedlichKwong,
    /// $\delta=2(b+c)$, $\varepsilon=c^2+2bc-b^2$
    PengRobinson,
    /// $\delta=b+c$, $\varepsilon=-bc$
    PatelTeja,
    /// $\delta_i=(1+3\omega_i)b_i$, $\varepsilon_i=-3\omega_ib_i^2$
    SchmidtWenzel,
}

impl CubicForm {
    /// Effective co-volume, $\delta$ and $\varepsilon$ from the mixture
    /// co-volume and third parameter.
    ///
    /// For the translated Redlich-Kwong and Peng-Robinson forms $c$ is the
    /// volume translation and the effective co-volume is $b-c$.
    fn shape<D: DualNum<f64> + Copy>(&self, b: D, c: D) -> (D, D, D) {
        match self {
            Self::VanDerWaals => (b, D::zero(), D::zero()),
            Self::RedlichKwong => (b - c, b + c * 2.0, c * (b + c)),
            Self::PengRobinson => (b - c, (b + c) * 2.0, c * c + b * c * 2.0 - b * b),
            Self::PatelTeja => (b, b + c, -b * c),
            // handled per substance
            Self::SchmidtWenzel => (b, D::zero(), D::zero()),
        }
    }
}

/// Quadratic mixing of the attraction parameter and linear mixing of
/// the co-volume and third parameter.
///
/// The result is a homogeneous function of the mole numbers (degree one
/// for $b$ and $\delta$, degree two for $\theta$ and $\varepsilon$).
pub fn quadratic_mixing<D: DualNum<f64> + Copy>(
    form: CubicForm,
    theta: &Array1<D>,
    b: &Array1<f64>,
    c: &Array1<D>,
    acentric_factor: &Array1<f64>,
    k_ij: &Array2<f64>,
    molefracs: &Array1<D>,
) -> MixtureParameters<D> {
    let n = molefracs.len();
    let mut theta_m = D::zero();
    let mut b_m = D::zero();
    let mut c_m = D::zero();
    for i in 0..n {
        let xi = molefracs[i];
        b_m += xi * b[i];
        c_m += xi * c[i];
        theta_m += xi * xi * theta[i];
        for j in i + 1..n {
            theta_m += xi * molefracs[j] * (theta[i] * theta[j]).sqrt() * (1.0 - k_ij[[i, j]]) * 2.0;
        }
    }

    let (b_eff, delta, epsilon) = match form {
        CubicForm::SchmidtWenzel => {
            let mut delta = D::zero();
            let mut epsilon = D::zero();
            let mut sum = D::zero();
            for i in 0..n {
                let w = acentric_factor[i];
                delta += molefracs[i] * ((1.0 + 3.0 * w) * b[i]);
                epsilon += molefracs[i] * (-3.0 * w * b[i] * b[i]);
                sum += molefracs[i];
            }
            (b_m, delta, sum * epsilon)
        }
        _ => form.shape(b_m, c_m),
    };

    MixtureParameters {
        b: b_eff,
        theta: theta_m,
        delta,
        epsilon,
    }
}
