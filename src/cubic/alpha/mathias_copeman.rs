use super::{validate_length, AlphaFunction, Soave};
use ceos_core::parameter::ParameterError;
use itertools::izip;
use ndarray::Array1;
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Mathias-Copeman (1983) alpha function with three constants per substance.
///
/// Below the critical temperature
/// $\alpha=\left(1+c_1s+c_2s^2+c_3s^3\right)^2$ with $s=1-\sqrt{T_r}$,
/// above only the linear term is kept.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MathiasCopeman(pub Vec<[f64; 3]>);

impl MathiasCopeman {
    /// Constants that reproduce Soave's alpha function.
    pub fn from_soave(soave: &Soave, acentric_factor: &Array1<f64>) -> Self {
        Self(acentric_factor.iter().map(|&w| [soave.m(w), 0.0, 0.0]).collect())
    }
}

impl AlphaFunction for MathiasCopeman {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        _: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        izip!(reduced_temperature, &self.0)
            .map(|(&tr, c)| {
                let s = -tr.sqrt() + 1.0;
                if tr.re() < 1.0 {
                    (s * (s * (s * c[2] + c[1]) + c[0]) + 1.0).powi(2)
                } else {
                    (s * c[0] + 1.0).powi(2)
                }
            })
            .collect()
    }

    fn validate(&self, components: usize) -> Result<(), ParameterError> {
        validate_length("Mathias Copeman", self.0.len(), components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn supercritical_branch() {
        let mc = MathiasCopeman(vec![[0.8, -0.3, 0.5]]);
        let tr = arr1(&[1.44]);
        let s = 1.0 - 1.2;
        assert_relative_eq!(
            mc.alpha(&arr1(&[0.0]), &tr)[0],
            (1.0 + 0.8 * s).powi(2),
            max_relative = 1e-14
        );
        let tr = arr1(&[0.64]);
        let s = 1.0 - 0.8;
        assert_relative_eq!(
            mc.alpha(&arr1(&[0.0]), &tr)[0],
            (1.0 + 0.8 * s - 0.3 * s * s + 0.5 * s * s * s).powi(2),
            max_relative = 1e-14
        );
    }
}
