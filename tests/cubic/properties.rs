use super::eos;
use approx::assert_relative_eq;
use ceos::cubic::EosName;
use ceos::{Phase, PropertySet, State};
use ndarray::arr1;
use std::error::Error;

#[test]
fn reference_state() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &["pentane", "hexane"])?;
    let x = arr1(&[0.4, 0.6]);
    let (t, p) = (300.0, 1e4);
    let properties = PropertySet::new(&eos, &x, t, t, p, p)?;
    assert!(properties.cp_complete);
    assert!(properties.log.is_empty());
    let vapor = &properties.vapor;
    assert_relative_eq!(vapor.ideal_gas.enthalpy, 0.0, epsilon = 1e-10);
    assert_relative_eq!(vapor.total.enthalpy, 0.0, epsilon = 1e-10);
    assert_relative_eq!(vapor.total.entropy, 0.0, epsilon = 1e-10);
    Ok(())
}

#[test]
fn liquid_and_vapor() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &["pentane", "hexane"])?;
    let x = arr1(&[0.4, 0.6]);
    let (t, p) = (300.0, 3e4);
    let properties = PropertySet::new(&eos, &x, t, t, 101325.0, p)?;
    let (liquid, vapor) = (&properties.liquid, &properties.vapor);
    assert_eq!(liquid.phase, Phase::Liquid);
    assert!(liquid.compressibility < vapor.compressibility);
    assert!(liquid.mass_density > vapor.mass_density);
    assert!(liquid.departure.enthalpy < vapor.departure.enthalpy);
    for phase in [liquid, vapor] {
        let total = &phase.total;
        assert_relative_eq!(
            total.gibbs_energy,
            total.enthalpy - t * total.entropy,
            max_relative = 1e-8
        );
        assert_relative_eq!(
            phase.fugacity.sum(),
            (phase.ln_phi.mapv(f64::exp) * &x).sum() * p,
            max_relative = 1e-12
        );
        let derivatives = &phase.derivatives;
        assert!(derivatives.dp_dv < 0.0);
        let cp = derivatives.isobaric_heat_capacity.unwrap();
        let cv = derivatives.isochoric_heat_capacity.unwrap();
        assert!(cp > cv);
        assert!(derivatives.speed_of_sound.unwrap() > 0.0);
    }
    Ok(())
}

#[test]
fn missing_heat_capacity() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::Soave1972, &["methane", "nitrogen"])?;
    let x = arr1(&[0.9, 0.1]);
    let properties = PropertySet::new(&eos, &x, 298.15, 150.0, 101325.0, 2e6)?;
    assert!(!properties.cp_complete);
    assert!(properties.log.contains("nitrogen"));
    let vapor = &properties.vapor;
    assert_eq!(vapor.ideal_gas.enthalpy, 0.0);
    assert_eq!(vapor.total.enthalpy, vapor.delta_departure.enthalpy);
    assert!(vapor.derivatives.isobaric_heat_capacity.is_none());
    Ok(())
}

#[test]
fn single_root() -> Result<(), Box<dyn Error>> {
    // supercritical methane has a single root shared by both phases
    let eos = eos(EosName::PengRobinson1976, &["methane"])?;
    let x = arr1(&[1.0]);
    let liquid = State::new_tp(&eos, 250.0, 5e6, &x, Phase::Liquid)?;
    let vapor = State::new_tp(&eos, 250.0, 5e6, &x, Phase::Vapor)?;
    assert_eq!(liquid.compressibility, vapor.compressibility);
    assert!(State::new_tp(&eos, 250.0, -1.0, &x, Phase::Vapor).is_err());
    Ok(())
}
