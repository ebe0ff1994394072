use super::AlphaFunction;
use ceos_core::parameter::ParameterError;
use ndarray::{Array1, Zip};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Temperature independent attraction.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VanDerWaals;

impl AlphaFunction for VanDerWaals {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(&self, _: &Array1<f64>, reduced_temperature: &Array1<D>) -> Array1<D> {
        reduced_temperature.mapv(|_| D::one())
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

/// $\alpha=T_r^{-1/2}$
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RedlichKwong1949;

impl AlphaFunction for RedlichKwong1949 {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(&self, _: &Array1<f64>, reduced_temperature: &Array1<D>) -> Array1<D> {
        reduced_temperature.mapv(|tr| tr.sqrt().recip())
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}

/// $\alpha=T_r\left(1+(1.57+1.62\omega)\left(\frac{1}{T_r}-1\right)\right)$
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Wilson1964;

impl AlphaFunction for Wilson1964 {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| tr * ((tr.recip() - 1.0) * (1.57 + 1.62 * w) + 1.0))
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}
