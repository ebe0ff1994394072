use ceos_core::parameter::ParameterError;
use enum_dispatch::enum_dispatch;
use ndarray::Array1;
use num_dual::DualNum;

mod classic;
pub use classic::{RedlichKwong1949, VanDerWaals, Wilson1964};
mod soave;
pub use soave::{Gasem, PengRobinson1978, Soave, Soave1993};
mod mathias_copeman;
pub use mathias_copeman::MathiasCopeman;
mod twu;
pub use twu::GeneralizedTwu;
mod kappa;
pub use kappa::{SchmidtWenzel, StryjekVera, TsaiChen};

/// Temperature dependence of the attraction parameter,
/// $\theta_i(T)=a_i\alpha_i(T)$.
#[enum_dispatch]
pub trait AlphaFunction {
    fn alpha<D: DualNum<f64> + Copy>(
        &self,
        acentric_factor: &Array1<f64>,
        reduced_temperature: &Array1<D>,
    ) -> Array1<D>;

    /// Check for validity of alpha function against the number of
    /// components, e.g. for per-substance constants.
    fn validate(&self, components: usize) -> Result<(), ParameterError>;
}

#[enum_dispatch(AlphaFunction)]
#[derive(Debug, Clone)]
pub enum Alpha {
    VanDerWaals,
    RedlichKwong1949,
    Wilson1964,
    Soave,
    Soave1993,
    PengRobinson1978,
    Gasem,
    MathiasCopeman,
    GeneralizedTwu,
    StryjekVera,
    TsaiChen,
    SchmidtWenzel,
}

fn validate_length(name: &str, len: usize, components: usize) -> Result<(), ParameterError> {
    if len == components {
        Ok(())
    } else {
        Err(ParameterError::IncompatibleParameters(format!(
            "{name} alpha function was initialized for {len} components, but the equation of state contains {components}."
        )))
    }
}
