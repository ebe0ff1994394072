use super::eos;
use approx::assert_relative_eq;
use ceos::cubic::{CubicEos, EosName, SubstanceCorrections};
use ceos::{CubicModel, EosError, Identifier, Substance};
use ndarray::arr1;
use std::error::Error;

#[test]
fn every_model_builds() -> Result<(), Box<dyn Error>> {
    for name in EosName::ALL {
        let eos = eos(name, &["methane", "pentane", "nitrogen"])?;
        assert_eq!(eos.components(), 3);
        assert_eq!(eos.name(), name);
        assert!(eos.to_string().starts_with(name.as_str()));
    }
    Ok(())
}

#[test]
fn names_from_strings() -> Result<(), Box<dyn Error>> {
    for name in EosName::ALL {
        assert_eq!(name.as_str().parse::<EosName>()?, name);
    }
    assert!("cubic-plus-association".parse::<EosName>().is_err());
    Ok(())
}

#[test]
fn ahlers_gmehling_requires_critical_compressibility() {
    let propane = Substance::new(
        Identifier::new(None, Some("propane"), None, Some("C3H8")),
        369.83,
        4.248e6,
        0.152,
        44.1,
    );
    assert!(matches!(
        CubicEos::new(EosName::AhlersGmehling2001, vec![propane.clone()], None),
        Err(EosError::ParameterError(_))
    ));
    assert!(CubicEos::new(EosName::AhlersGmehling2001, vec![propane.with_zc(0.276)], None).is_ok());
}

#[test]
fn generalized_fallback() -> Result<(), Box<dyn Error>> {
    // without substance specific constants Mathias-Copeman reduces to Soave
    let methane = eos(EosName::Soave1972, &["methane"])?;
    let substances = methane.substances().to_vec();
    let fallback = CubicEos::with_corrections(
        EosName::MathiasCopeman1983,
        substances,
        None,
        &SubstanceCorrections::default(),
    )?;
    let x = arr1(&[1.0]);
    for t in [120.0, 150.0, 180.0] {
        let soave = methane.compressibility_roots(1e5, t, &x);
        let mc = fallback.compressibility_roots(1e5, t, &x);
        assert_eq!(soave.len(), mc.len());
        for (z0, z1) in soave.iter().zip(&mc) {
            assert_relative_eq!(z0, z1, max_relative = 1e-12);
        }
    }
    Ok(())
}
