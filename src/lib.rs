//! Cubic equations of state and vapor-liquid equilibria.
//!
//! The generic equation of state, the phase equilibrium solvers and the
//! state properties are implemented in [ceos_core]. This crate provides
//! the catalogue of named cubic models in [cubic].
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod cubic;

pub use ceos_core::parameter::{Identifier, IdentifierOption, Substance, SubstanceDatabase};
pub use ceos_core::{
    CubicModel, EosError, EosResult, FlashResult, Phase, PropertySet, SolverOptions, State,
    VaporPressure, Verbosity, VleResult, RGAS,
};
