#![warn(clippy::all)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

/// Print messages with level `Verbosity::Iter` or higher.
#[macro_export]
macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Iter {
            println!($($arg)*);
        }
    }
}

/// Print messages with level `Verbosity::Result` or higher.
#[macro_export]
macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::Verbosity::Result {
            println!($($arg)*);
        }
    }
}

/// Universal gas constant in J/(mol K).
pub const RGAS: f64 = 8.314462618;

mod composition;
mod equation_of_state;
mod errors;
pub mod ideal_gas;
pub mod parameter;
mod phase_equilibria;
pub mod roots;
mod state;

pub use composition::{validate_molefracs, MOLEFRAC_TOL, MOLEFRAC_TOL_INPUT};
pub use equation_of_state::{
    attraction_integral, CubicModel, DepartureProperties, DerivativeProperties, MixtureParameters,
};
pub use errors::{EosError, EosResult};
pub use phase_equilibria::{
    rachford_rice, wilson_k_values, Convergence, FlashResult, SolverOptions, VaporPressure, Verbosity, VleResult,
};
pub use state::{Phase, PhaseProperties, PropertySet, State, TotalProperties};
