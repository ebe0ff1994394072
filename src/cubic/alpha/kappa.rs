//! Alpha functions of the Soave type with a temperature dependent slope.
use super::{validate_length, AlphaFunction};
use ceos_core::parameter::ParameterError;
use itertools::izip;
use ndarray::{Array1, Zip};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Stryjek-Vera (1986):
/// $\kappa=\kappa_0+\kappa_1(1+\sqrt{T_r})(0.7-T_r)$ with one adjustable
/// $\kappa_1$ per substance.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StryjekVera(Vec<f64>);

impl StryjekVera {
    pub fn new(kappa1: Vec<f64>) -> Self {
        Self(kappa1)
    }
}

impl AlphaFunction for StryjekVera {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        izip!(acentric_factor, reduced_temperature, &self.0)
            .map(|(&w, &tr, &kappa1)| {
                let kappa0 = 0.378893 + w * (1.4897153 + w * (-0.17131848 + w * 0.0196554));
                let sqrt_tr = tr.sqrt();
                let kappa = (sqrt_tr + 1.0) * (-tr + 0.7) * kappa1 + kappa0;
                ((-sqrt_tr + 1.0) * kappa + 1.0).powi(2)
            })
            .collect()
    }

    fn validate(&self, components: usize) -> Result<(), ParameterError> {
        validate_length("Stryjek Vera", self.0.len(), components)
    }
}

/// Tsai-Chen (1998):
/// $\alpha=\left(1+M(1-T_r)+N(1-T_r)(0.7-T_r)\right)^2$ with a generalized
/// $M(\omega)$ and one adjustable $N$ per substance.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TsaiChen(Vec<f64>);

impl TsaiChen {
    pub fn new(n: Vec<f64>) -> Self {
        Self(n)
    }
}

impl AlphaFunction for TsaiChen {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        izip!(acentric_factor, reduced_temperature, &self.0)
            .map(|(&w, &tr, &n)| {
                let m = 0.20473 + w * (0.83548 + w * (-0.18470 + w * (0.16675 - w * 0.09881)));
                let s = -tr + 1.0;
                (s * m + s * (-tr + 0.7) * n + 1.0).powi(2)
            })
            .collect()
    }

    fn validate(&self, components: usize) -> Result<(), ParameterError> {
        validate_length("Tsai Chen", self.0.len(), components)
    }
}

/// Schmidt-Wenzel (1980):
/// $\kappa=\kappa_0+\frac{(5T_r-3\kappa_0-1)^2}{70}$ below the critical
/// temperature, constant above.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SchmidtWenzel;

impl AlphaFunction for SchmidtWenzel {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| {
                let kappa0 = if w <= 0.4 {
                    0.465 + w * (1.347 - w * 0.528)
                } else {
                    0.5361 + w * 0.9593
                };
                let kappa = if tr.re() <= 1.0 {
                    (tr * 5.0 - 3.0 * kappa0 - 1.0).powi(2) / 70.0 + kappa0
                } else {
                    D::from(kappa0 + (4.0 - 3.0 * kappa0).powi(2) / 70.0)
                };
                ((-tr.sqrt() + 1.0) * kappa + 1.0).powi(2)
            })
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}
