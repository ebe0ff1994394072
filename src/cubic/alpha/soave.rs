use super::AlphaFunction;
use ceos_core::parameter::ParameterError;
use ndarray::{Array1, Zip};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Soave's alpha function
/// $\alpha=\left(1+m(1-\sqrt{T_r})\right)^2$
/// with a polynomial $m=\sum_k m_k\omega^k$ in the acentric factor.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Soave {
    /// coefficients for m-polynomial
    mi: Vec<f64>,
}

impl Soave {
    pub fn new(mi: Vec<f64>) -> Self {
        Soave { mi }
    }

    /// Soave (1972) for the Redlich-Kwong equation of state.
    pub fn soave_1972() -> Self {
        Self::new(vec![0.48, 1.574, -0.176])
    }

    /// https://doi.org/10.1016/j.fluid.2018.12.007
    pub fn redlich_kwong_2019() -> Self {
        Self::new(vec![0.481, 1.5963, -0.2963, 0.1223])
    }

    pub fn peng_robinson_1976() -> Self {
        Self::new(vec![0.37464, 1.54226, -0.26992])
    }

    /// https://doi.org/10.1016/j.fluid.2018.12.007
    pub fn peng_robinson_2019() -> Self {
        Self::new(vec![0.3919, 1.4996, -0.2721, 0.1063])
    }

    /// The $F$ parameter of Patel and Teja (1982).
    pub fn patel_teja() -> Self {
        Self::new(vec![0.452413, 1.30982, -0.295937])
    }

    pub fn m(&self, acentric_factor: f64) -> f64 {
        self.mi
            .iter()
            .rev()
            .fold(0.0, |m, &mi| m * acentric_factor + mi)
    }
}

impl AlphaFunction for Soave {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| ((-tr.sqrt() + 1.0) * self.m(w) + 1.0).powi(2))
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

/// Soave (1993):
/// $\alpha=1+m(1-T_r)+n(1-\sqrt{T_r})^2$.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Soave1993;

impl AlphaFunction for Soave1993 {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| {
                let m = 0.484 + w * (1.515 - w * 0.044);
                let n = 2.756 * m - 0.7;
                (-tr + 1.0) * m + (-tr.sqrt() + 1.0).powi(2) * n + 1.0
            })
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PengRobinson1978;

impl AlphaFunction for PengRobinson1978 {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| {
                let m = if w <= 0.491 {
                    0.37464 + w * (1.54226 - w * 0.26992)
                } else {
                    // heavier than n-decane
                    0.379642 + w * (1.48503 + w * (-0.164423 + w * 0.016666))
                };
                ((-tr.sqrt() + 1.0) * m + 1.0).powi(2)
            })
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

const GASEM_A: f64 = 2.0;
const GASEM_B: f64 = 0.836;
const GASEM_C: f64 = 0.134;
const GASEM_D: f64 = 0.508;
const GASEM_E: f64 = -0.0467;

/// Gasem et al. (2001):
/// $\alpha=\exp\left[(A+BT_r)\left(1-T_r^{C+D\omega+E\omega^2}\right)\right]$.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Gasem;

impl AlphaFunction for Gasem {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| {
                let exponent = GASEM_C + w * (GASEM_D + w * GASEM_E);
                ((tr * GASEM_B + GASEM_A) * (-tr.powf(exponent) + 1.0)).exp()
            })
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn polynomial() {
        let s = Soave::peng_robinson_1976();
        assert_relative_eq!(s.m(0.0), 0.37464);
        assert_relative_eq!(s.m(0.5), 0.37464 + 0.5 * 1.54226 - 0.25 * 0.26992);
    }

    #[test]
    fn peng_robinson_1978_branches() {
        // identical to PR76 for light substances
        let w = arr1(&[0.3]);
        let tr = arr1(&[0.8]);
        assert_relative_eq!(
            PengRobinson1978.alpha(&w, &tr),
            Soave::peng_robinson_1976().alpha(&w, &tr),
            max_relative = 1e-14
        );
        let w = arr1(&[0.6]);
        assert!(PengRobinson1978.alpha(&w, &tr)[0] > Soave::peng_robinson_1976().alpha(&w, &tr)[0]);
    }
}
