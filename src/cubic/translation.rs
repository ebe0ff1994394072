use super::corrections::CorrectionRecord;
use super::eos_name::EosName;
use super::parameters::CriticalParameters;
use ceos_core::parameter::{ParameterError, Substance};
use itertools::izip;
use ndarray::Array1;
use num_dual::DualNum;

/// Volume translation $c_i$ of the translated models: the model volume is
/// $v+c$, so that a positive translation lowers the predicted volume.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeTranslation {
    None,
    /// temperature independent translation in m³/mol
    Constant(Array1<f64>),
    /// $c=\frac{RT_c}{p_c}\left[k_1+k_2\left(1-T_r^{2/3}\right)+k_3\left(1-T_r^{2/3}\right)^2\right]$
    TsaiChen {
        k1: Array1<f64>,
        k2: Array1<f64>,
        k3: Array1<f64>,
    },
}

impl VolumeTranslation {
    pub fn new(
        name: EosName,
        substances: &[Substance],
        parameters: &CriticalParameters,
        corrections: &[Option<&CorrectionRecord>],
    ) -> Result<Self, ParameterError> {
        Ok(match name {
            EosName::Peneloux1982 => Self::Constant(
                izip!(&parameters.rtc_pc, &parameters.acentric_factor)
                    .map(|(&v, &w)| {
                        let z_ra = 0.29056 - 0.08775 * w;
                        0.40768 * v * (0.29441 - z_ra)
                    })
                    .collect(),
            ),
            EosName::AhlersGmehling2001 => Self::Constant(
                izip!(substances, &parameters.rtc_pc)
                    .map(|(s, &v)| {
                        let zc = s.critical_compressibility().ok_or_else(|| {
                            ParameterError::MissingParameters(format!(
                                "critical compressibility of {} is required by {}",
                                s.identifier, name
                            ))
                        })?;
                        Ok(0.252 * v * (1.5448 * zc - 0.4024))
                    })
                    .collect::<Result<_, ParameterError>>()?,
            ),
            EosName::TsaiChen1998 => {
                let k3: Array1<f64> = corrections
                    .iter()
                    .map(|r| r.and_then(|r| r.tsai_chen).map_or(0.0, |tc| tc.k3))
                    .collect();
                let k1 = parameters.acentric_factor.mapv(|w| {
                    0.00185 + w * (0.00438 + w * (0.36322 + w * (-0.90831 + w * 0.55885)))
                });
                let k2 = k3.mapv(|k3| {
                    -0.00542 + k3 * (-0.51112 + k3 * (0.04533 + k3 * (0.07447 - k3 * 0.03831)))
                });
                Self::TsaiChen { k1, k2, k3 }
            }
            _ => Self::None,
        })
    }

    /// Translation of every substance in m³/mol.
    pub fn translation<D: DualNum<f64> + Copy>(
        &self,
        rtc_pc: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D> {
        match self {
            Self::None => reduced_temperature.mapv(|_| D::zero()),
            Self::Constant(c) => c.mapv(D::from),
            Self::TsaiChen { k1, k2, k3 } => izip!(reduced_temperature, rtc_pc, k1, k2, k3)
                .map(|(&tr, &v, &k1, &k2, &k3)| {
                    let s = -tr.powf(2.0 / 3.0) + 1.0;
                    (s * k2 + s * s * k3 + k1) * v
                })
                .collect(),
        }
    }
}
