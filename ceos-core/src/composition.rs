use crate::errors::{EosError, EosResult};
use ndarray::Array1;

/// Tolerance on the sum of mole fractions used inside equilibrium calculations.
pub const MOLEFRAC_TOL: f64 = 1e-10;
/// Tolerance on the sum of mole fractions for user supplied compositions.
pub const MOLEFRAC_TOL_INPUT: f64 = 1e-6;

/// Check that `molefracs` is a valid composition for `n` components.
///
/// Mole fractions have to be finite and non-negative and sum to one
/// within `tol`. Compositions are never renormalized silently.
pub fn validate_molefracs(molefracs: &Array1<f64>, n: usize, tol: f64) -> EosResult<()> {
    if molefracs.len() != n {
        return Err(EosError::IncompatibleComponents(n, molefracs.len()));
    }
    if let Some(x) = molefracs.iter().find(|x| !x.is_finite() || **x < 0.0) {
        return Err(EosError::InvalidComposition(format!(
            "mole fraction {} is not a non-negative number",
            x
        )));
    }
    let sum = molefracs.sum();
    if (sum - 1.0).abs() > tol {
        return Err(EosError::InvalidComposition(format!(
            "mole fractions sum to {} instead of 1",
            sum
        )));
    }
    Ok(())
}
