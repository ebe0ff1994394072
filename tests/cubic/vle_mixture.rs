use super::eos;
use approx::assert_relative_eq;
use ceos::cubic::EosName;
use ceos::{EosError, FlashResult, SolverOptions, VleResult};
use ndarray::arr1;
use std::error::Error;

const ALKANES: [&str; 3] = ["pentane", "hexane", "heptane"];

#[test]
fn bubble_and_dew_point_pressure() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let x = arr1(&[0.2, 0.3, 0.5]);
    let options = SolverOptions::default();
    let bubble = VleResult::bubble_point_pressure(&eos, 315.0, &x, None, options)?;
    assert!(bubble.converged);
    assert_relative_eq!(bubble.pressure, 42763.59, max_relative = 1e-4);
    assert_relative_eq!(
        bubble.vapor_molefracs,
        arr1(&[0.55669, 0.28110, 0.16221]),
        epsilon = 1e-4
    );
    assert_relative_eq!(bubble.vapor_molefracs.sum(), 1.0, epsilon = 1e-12);

    let dew = VleResult::dew_point_pressure(&eos, 315.0, &bubble.vapor_molefracs, None, options)?;
    assert!(dew.converged);
    assert_relative_eq!(dew.pressure, bubble.pressure, max_relative = 1e-6);
    assert_relative_eq!(dew.liquid_molefracs, x, epsilon = 1e-6);
    Ok(())
}

#[test]
fn bubble_and_dew_point_temperature() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let x = arr1(&[0.2, 0.3, 0.5]);
    let options = SolverOptions::default();
    let p = VleResult::bubble_point_pressure(&eos, 315.0, &x, None, options)?;

    let bubble = VleResult::bubble_point_temperature(&eos, p.pressure, &x, None, options)?;
    assert!(bubble.converged);
    assert_relative_eq!(bubble.temperature, 315.0, max_relative = 1e-6);

    let dew = VleResult::dew_point_temperature(&eos, p.pressure, &p.vapor_molefracs, None, options)?;
    assert!(dew.converged);
    assert_relative_eq!(dew.temperature, 315.0, max_relative = 1e-6);
    Ok(())
}

#[test]
fn normal_boiling_range() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let z = arr1(&[0.2, 0.3, 0.5]);
    let options = SolverOptions::default();
    let bubble = VleResult::bubble_point_temperature(&eos, 101325.0, &z, None, options)?;
    assert_relative_eq!(bubble.temperature, 341.615, max_relative = 1e-4);
    let dew = VleResult::dew_point_temperature(&eos, 101325.0, &z, Some(350.0), options)?;
    assert_relative_eq!(dew.temperature, 357.635, max_relative = 1e-4);
    assert_relative_eq!(
        dew.liquid_molefracs,
        arr1(&[0.0539, 0.1934, 0.7527]),
        epsilon = 1e-3
    );
    assert!(bubble.temperature < dew.temperature);
    Ok(())
}

#[test]
fn tp_flash() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let z = arr1(&[0.2, 0.3, 0.5]);
    let flash = FlashResult::tp_flash(&eos, 315.0, 3e4, &z, SolverOptions::default())?;
    assert!(flash.converged);
    assert_relative_eq!(flash.dew_pressure, 21812.4, max_relative = 1e-4);
    assert_relative_eq!(flash.bubble_pressure, 42763.6, max_relative = 1e-4);
    assert_relative_eq!(flash.vapor_fraction, 0.418379, epsilon = 1e-4);
    assert_relative_eq!(
        flash.liquid_molefracs,
        arr1(&[0.08952, 0.26394, 0.64654]),
        epsilon = 1e-4
    );
    assert_relative_eq!(
        flash.vapor_molefracs,
        arr1(&[0.35358, 0.35013, 0.29629]),
        epsilon = 1e-4
    );
    // component balance
    let v = flash.vapor_fraction;
    let balance = &flash.liquid_molefracs * (1.0 - v) + &flash.vapor_molefracs * v;
    assert_relative_eq!(balance, z, epsilon = 1e-6);
    Ok(())
}

#[test]
fn infeasible_flash() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let z = arr1(&[0.2, 0.3, 0.5]);
    for p in [1e4, 1e5] {
        assert!(matches!(
            FlashResult::tp_flash(&eos, 315.0, p, &z, SolverOptions::default()),
            Err(EosError::InfeasibleFlash { .. })
        ));
    }
    Ok(())
}

#[test]
fn invalid_composition() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let options = SolverOptions::default();
    assert!(VleResult::bubble_point_pressure(&eos, 315.0, &arr1(&[0.2, 0.3]), None, options).is_err());
    assert!(
        VleResult::bubble_point_pressure(&eos, 315.0, &arr1(&[0.5, 0.5, 0.5]), None, options)
            .is_err()
    );
    Ok(())
}

#[test]
fn dew_point_temperature_from_single_root() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::VanDerWaals1890, &ALKANES)?;
    let z = arr1(&[0.2, 0.3, 0.5]);
    let options = SolverOptions::default();
    let reference = VleResult::dew_point_temperature(&eos, 1e5, &z, Some(300.0), options)?;
    assert!(reference.converged);
    assert_relative_eq!(reference.temperature, 269.157, max_relative = 1e-4);
    let dew = VleResult::dew_point_temperature(&eos, 1e5, &z, None, options)?;
    assert!(dew.converged);
    assert_relative_eq!(dew.temperature, reference.temperature, max_relative = 1e-6);
    assert!(dew.liquid_compressibility < dew.vapor_compressibility);
    Ok(())
}

#[test]
fn iteration_limit() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &ALKANES)?;
    let z = arr1(&[0.2, 0.3, 0.5]);
    let options = SolverOptions::new().max_iter(2);

    let bubble = VleResult::bubble_point_pressure(&eos, 315.0, &z, None, options)?;
    assert!(!bubble.converged);
    assert_eq!(bubble.iterations, 2);

    let bubble = VleResult::bubble_point_temperature(&eos, 101325.0, &z, None, options)?;
    assert!(!bubble.converged);
    assert_eq!(bubble.iterations, 2);

    let flash = FlashResult::tp_flash(&eos, 315.0, 3e4, &z, options)?;
    assert!(!flash.converged);
    assert_eq!(flash.iterations, 2);
    assert!((0.0..=1.0).contains(&flash.vapor_fraction));
    Ok(())
}
