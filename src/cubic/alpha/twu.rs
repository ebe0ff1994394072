use super::AlphaFunction;
use ceos_core::parameter::ParameterError;
use ndarray::{Array1, Zip};
use num_dual::DualNum;
use serde::{Deserialize, Serialize};

/// Generalized version of the Twu alpha function (1995).
///
/// $\alpha=\alpha^{(0)}+\omega\left(\alpha^{(1)}-\alpha^{(0)}\right)$ with
/// $\alpha^{(k)}=T_r^{N(M-1)}\exp\left(L\left(1-T_r^{NM}\right)\right)$.
/// Different parameters are used for sub- and supercritical conditions,
/// each stored as $[N(M-1), L, NM]$.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GeneralizedTwu([[[f64; 3]; 2]; 2]);

impl GeneralizedTwu {
    pub fn redlich_kwong() -> Self {
        GeneralizedTwu([
            [
                [2.496441 * (0.919422 - 1.0), 0.141599, 2.496441 * 0.919422],
                [3.291790 * (0.799457 - 1.0), 0.500315, 3.291790 * 0.799457],
            ],
            [
                [-0.2 * (6.500018 - 1.0), 0.441411, -0.2 * 6.500018],
                [-8.0 * (1.289098 - 1.0), 0.032580, -8.0 * 1.289098],
            ],
        ])
    }

    pub fn peng_robinson() -> Self {
        GeneralizedTwu([
            [
                [1.948150 * (0.911807 - 1.0), 0.125283, 1.948150 * 0.911807],
                [2.812520 * (0.784054 - 1.0), 0.511614, 2.812520 * 0.784054],
            ],
            [
                [-0.2 * (4.963070 - 1.0), 0.401219, -0.2 * 4.963070],
                [-8.0 * (1.248089 - 1.0), 0.024955, -8.0 * 1.248089],
            ],
        ])
    }
}

fn twu<D: DualNum<f64> + Copy>(tr: D, [nm_m1, l, nm]: [f64; 3]) -> D {
    tr.powf(nm_m1) * ((-tr.powf(nm) + 1.0) * l).exp()
}

impl AlphaFunction for GeneralizedTwu {
    #[inline]
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        Zip::from(acentric_factor)
            .and(reduced_temperature)
            .map_collect(|&w, &tr| {
                let [c0, c1] = if tr.re() <= 1.0 { self.0[0] } else { self.0[1] };
                let a0 = twu(tr, c0);
                let a1 = twu(tr, c1);
                a0 + (a1 - a0) * w
            })
    }

    fn validate(&self, _: usize) -> Result<(), ParameterError> {
        Ok(())
    }
}
