use super::{Phase, State};
use crate::composition::{validate_molefracs, MOLEFRAC_TOL_INPUT};
use crate::equation_of_state::{CubicModel, DepartureProperties, DerivativeProperties};
use crate::errors::EosResult;
use crate::ideal_gas::IdealGasProperties;
use ndarray::Array1;
use serde::Serialize;
use std::sync::Arc;

/// Caloric properties relative to the reference state: ideal gas
/// contribution plus the change of the departure functions.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct TotalProperties {
    /// in J/mol
    pub enthalpy: f64,
    /// in J/(mol K)
    pub entropy: f64,
    /// in J/mol
    pub gibbs_energy: f64,
    /// in J/mol
    pub internal_energy: f64,
    /// in J/mol
    pub helmholtz_energy: f64,
}

impl TotalProperties {
    fn new(ideal_gas: &IdealGasProperties, delta: &DepartureProperties) -> Self {
        Self {
            enthalpy: ideal_gas.enthalpy + delta.enthalpy,
            entropy: ideal_gas.entropy + delta.entropy,
            gibbs_energy: ideal_gas.gibbs_energy + delta.gibbs_energy,
            internal_energy: ideal_gas.internal_energy + delta.internal_energy,
            helmholtz_energy: ideal_gas.helmholtz_energy + delta.helmholtz_energy,
        }
    }
}

/// All properties of one phase.
#[derive(Serialize, Debug, Clone)]
pub struct PhaseProperties {
    pub phase: Phase,
    pub compressibility: f64,
    /// in m³/mol
    pub molar_volume: f64,
    /// in mol/m³
    pub density: f64,
    /// in kg/m³
    pub mass_density: f64,
    /// in Pa
    pub fugacity: Array1<f64>,
    pub ln_phi: Array1<f64>,
    pub departure: DepartureProperties,
    /// departure functions minus those of the reference state
    pub delta_departure: DepartureProperties,
    pub ideal_gas: IdealGasProperties,
    pub total: TotalProperties,
    pub derivatives: DerivativeProperties,
}

/// Liquid and vapor properties of a mixture at (T, p) relative to a
/// reference state.
#[derive(Serialize, Debug, Clone)]
pub struct PropertySet {
    pub liquid: PhaseProperties,
    pub vapor: PhaseProperties,
    /// `false` if ideal gas heat capacities are missing for at least one
    /// substance. Ideal gas contributions are zero in that case.
    pub cp_complete: bool,
    /// diagnostic messages
    pub log: String,
}

impl PropertySet {
    /// Evaluate liquid (smallest root) and vapor (largest root) properties.
    ///
    /// Missing ideal gas data does not fail the calculation, it is
    /// reported through `cp_complete` and `log`.
    pub fn new<E: CubicModel>(
        eos: &Arc<E>,
        molefracs: &Array1<f64>,
        reference_temperature: f64,
        temperature: f64,
        reference_pressure: f64,
        pressure: f64,
    ) -> EosResult<Self> {
        validate_molefracs(molefracs, eos.components(), MOLEFRAC_TOL_INPUT)?;

        let missing: Vec<String> = eos
            .substances()
            .iter()
            .filter(|s| s.ideal_gas.is_none())
            .map(|s| s.identifier.to_string())
            .collect();
        let records: Vec<_> = eos
            .substances()
            .iter()
            .filter_map(|s| s.ideal_gas.as_ref())
            .collect();
        let cp_complete = missing.is_empty();
        let (ideal_gas, log) = if cp_complete {
            let ig = IdealGasProperties::new(
                &records,
                molefracs,
                reference_temperature,
                temperature,
                reference_pressure,
                pressure,
            );
            (ig, String::new())
        } else {
            let msg = format!(
                "Ideal gas heat capacity missing for {}; ideal gas contributions are set to zero.",
                missing.join(", ")
            );
            log::warn!("{}", msg);
            (IdealGasProperties::default(), msg)
        };
        let cp_ig = cp_complete.then_some(ideal_gas.heat_capacity);

        let phase_properties = |phase: Phase| -> EosResult<PhaseProperties> {
            let state = State::new_tp(eos, temperature, pressure, molefracs, phase)?;
            let reference = State::new_tp(
                eos,
                reference_temperature,
                reference_pressure,
                molefracs,
                phase,
            )?;
            let departure = state.departure_properties();
            let delta_departure = departure - reference.departure_properties();
            let ln_phi = state.ln_phi();
            Ok(PhaseProperties {
                phase,
                compressibility: state.compressibility,
                molar_volume: state.molar_volume(),
                density: state.density(),
                mass_density: state.mass_density(),
                fugacity: ln_phi.mapv(f64::exp) * molefracs * pressure,
                ln_phi,
                departure,
                delta_departure,
                ideal_gas,
                total: TotalProperties::new(&ideal_gas, &delta_departure),
                derivatives: state.derivative_properties(cp_ig),
            })
        };

        Ok(Self {
            liquid: phase_properties(Phase::Liquid)?,
            vapor: phase_properties(Phase::Vapor)?,
            cp_complete,
            log,
        })
    }
}
