use ceos::cubic::{CubicEos, EosName};
use ceos::{IdentifierOption, SubstanceDatabase};
use std::error::Error;
use std::sync::Arc;

mod catalogue;
mod properties;
mod vle_mixture;
mod vle_pure;

fn eos(name: EosName, substances: &[&str]) -> Result<Arc<CubicEos>, Box<dyn Error>> {
    let database = SubstanceDatabase::from_json("tests/cubic/test_substances.json")?;
    let substances = database.substances(substances, IdentifierOption::Name)?;
    Ok(Arc::new(CubicEos::new(name, substances, None)?))
}
