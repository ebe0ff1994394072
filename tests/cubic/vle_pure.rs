use super::eos;
use approx::assert_relative_eq;
use ceos::cubic::EosName;
use ceos::{CubicModel, EosError, SolverOptions, VaporPressure};
use ndarray::arr1;
use std::error::Error;

#[test]
fn methane_compressibility_roots() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &["methane"])?;
    let roots = eos.compressibility_roots(1e5, 150.0, &arr1(&[1.0]));
    assert_eq!(roots.len(), 3);
    assert_relative_eq!(roots[0], 0.0033452, max_relative = 1e-4);
    assert_relative_eq!(roots[2], 0.98449, max_relative = 1e-4);
    Ok(())
}

#[test]
fn vapor_pressure_every_model() -> Result<(), Box<dyn Error>> {
    let t = 0.7 * 507.6;
    for name in EosName::ALL {
        let eos = eos(name, &["hexane"])?;
        let vle = VaporPressure::new(&eos, 0, t, None, SolverOptions::default())?;
        assert!(vle.converged, "{name}");
        let p = vle.value.pressure;
        let (z_l, z_v) = (vle.value.liquid_compressibility, vle.value.vapor_compressibility);
        assert!(z_l < z_v, "{name}");
        let x = arr1(&[1.0]);
        assert_relative_eq!(
            eos.ln_phi(&x, p, t, z_l)[0],
            eos.ln_phi(&x, p, t, z_v)[0],
            epsilon = 1e-8
        );
    }
    Ok(())
}

#[test]
fn acentric_factor_is_reproduced() -> Result<(), Box<dyn Error>> {
    // log10(p_sat / p_c) = -1 - omega at T_r = 0.7
    let (tc, pc, w) = (507.6, 3.025e6, 0.301);
    for name in [
        EosName::Soave1972,
        EosName::SoaveRedlichKwong2019,
        EosName::PengRobinson1976,
        EosName::PengRobinson1978,
        EosName::PengRobinson2019,
    ] {
        let eos = eos(name, &["hexane"])?;
        let vle = VaporPressure::new(&eos, 0, 0.7 * tc, None, SolverOptions::default())?;
        assert_relative_eq!(
            vle.value.pressure,
            pc * 10f64.powf(-1.0 - w),
            max_relative = 0.05
        );
    }
    Ok(())
}

#[test]
fn translation_leaves_vapor_pressure_unchanged() -> Result<(), Box<dyn Error>> {
    let t = 300.0;
    let soave = eos(EosName::Soave1972, &["pentane"])?;
    let peneloux = eos(EosName::Peneloux1982, &["pentane"])?;
    let options = SolverOptions::default();
    let untranslated = VaporPressure::new(&soave, 0, t, None, options)?.value;
    let translated = VaporPressure::new(&peneloux, 0, t, None, options)?.value;
    assert_relative_eq!(translated.pressure, untranslated.pressure, max_relative = 1e-8);
    // positive translation of pentane lowers the liquid volume
    assert!(translated.liquid_compressibility < untranslated.liquid_compressibility);
    Ok(())
}

#[test]
fn initial_pressure() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &["methane"])?;
    let options = SolverOptions::default();
    let wilson = VaporPressure::new(&eos, 0, 150.0, None, options)?;
    let guess = VaporPressure::new(&eos, 0, 150.0, Some(1e6), options)?;
    assert_relative_eq!(wilson.value.pressure, guess.value.pressure, max_relative = 1e-8);
    Ok(())
}

#[test]
fn supercritical() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &["methane"])?;
    assert!(matches!(
        VaporPressure::new(&eos, 0, 200.0, None, SolverOptions::default()),
        Err(EosError::SuperCritical)
    ));
    Ok(())
}

#[test]
fn single_root_at_initial_pressure() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::VanDerWaals1890, &["hexane"])?;
    let t = 0.95 * 507.6;
    let options = SolverOptions::default();
    let reference = VaporPressure::new(&eos, 0, t, Some(2.3e6), options)?;
    assert!(reference.converged);
    assert_relative_eq!(reference.value.pressure, 2455934.7, max_relative = 1e-5);
    // the Wilson estimate only has a vapor-like root
    let wilson = VaporPressure::new(&eos, 0, t, None, options)?;
    assert!(wilson.converged);
    assert_relative_eq!(wilson.value.pressure, reference.value.pressure, max_relative = 1e-8);
    // above the vapor spinodal only a liquid-like root exists
    let high = VaporPressure::new(&eos, 0, t, Some(3.0e6), options)?;
    assert!(high.converged);
    assert_relative_eq!(high.value.pressure, reference.value.pressure, max_relative = 1e-8);
    assert!(high.value.liquid_compressibility < high.value.vapor_compressibility);
    Ok(())
}

#[test]
fn iteration_limit() -> Result<(), Box<dyn Error>> {
    let eos = eos(EosName::PengRobinson1976, &["methane"])?;
    let options = SolverOptions::new().max_iter(2);
    let vle = VaporPressure::new(&eos, 0, 150.0, None, options)?;
    assert!(!vle.converged);
    assert_eq!(vle.iterations, 2);
    assert!(vle.value.pressure > 0.0);
    Ok(())
}
