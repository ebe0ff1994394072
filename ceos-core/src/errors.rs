use crate::parameter::ParameterError;
use thiserror::Error;

/// Error type for improperly defined states and failed calculations.
#[derive(Error, Debug)]
pub enum EosError {
    #[error("`{0}` encountered illegal values during the iteration.")]
    IterationFailed(String),
    #[error("Iteration resulted in trivial solution.")]
    TrivialSolution,
    #[error("Equation of state is initialized for {0} components while the input specifies {1} components.")]
    IncompatibleComponents(usize, usize),
    #[error("Invalid state in {0}: {1} = {2}.")]
    InvalidState(String, String, f64),
    #[error("Invalid composition: {0}.")]
    InvalidComposition(String),
    #[error("System is supercritical.")]
    SuperCritical,
    #[error("Pressure {pressure} Pa is outside of the two-phase region [{dew} Pa, {bubble} Pa].")]
    InfeasibleFlash {
        pressure: f64,
        dew: f64,
        bubble: f64,
    },
    #[error("No {0} root of the cubic equation of state exists at these conditions.")]
    NoRoot(String),
    #[error(transparent)]
    ParameterError(#[from] ParameterError),
}

/// Convenience type for `Result<T, EosError>`.
pub type EosResult<T> = Result<T, EosError>;
