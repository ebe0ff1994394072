use ceos_core::parameter::{Identifier, ParameterError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const BUNDLED_CORRECTIONS: &str = include_str!("corrections.json");

/// Substance specific constants of the Tsai-Chen (1998) model.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct TsaiChenRecord {
    /// $N$ of the alpha function
    pub n: f64,
    /// $k_3$ of the volume translation
    pub k3: f64,
}

/// Empirical constants of a single substance for the models that are
/// fitted to pure component vapor pressures or liquid densities.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CorrectionRecord {
    pub identifier: Identifier,
    /// $\kappa_1$ of Stryjek-Vera (1986)
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stryjek_vera: Option<f64>,
    /// Mathias-Copeman constants for the Redlich-Kwong form
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mathias_copeman_rk: Option<[f64; 3]>,
    /// Mathias-Copeman constants for the Peng-Robinson form
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mathias_copeman_pr: Option<[f64; 3]>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsai_chen: Option<TsaiChenRecord>,
}

impl CorrectionRecord {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            stryjek_vera: None,
            mathias_copeman_rk: None,
            mathias_copeman_pr: None,
            tsai_chen: None,
        }
    }
}

/// Per substance corrections keyed by [Identifier::key].
///
/// Corrections are resolved once when an equation of state is built.
/// Substances without an entry use the generalized form of the respective
/// model.
#[derive(Debug, Clone, Default)]
pub struct SubstanceCorrections {
    records: IndexMap<String, CorrectionRecord>,
}

impl SubstanceCorrections {
    pub fn from_records(records: Vec<CorrectionRecord>) -> Result<Self, ParameterError> {
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            let key = record.identifier.key();
            if map.insert(key.clone(), record).is_some() {
                return Err(ParameterError::IncompatibleParameters(format!(
                    "duplicate correction record for '{key}'"
                )));
            }
        }
        Ok(Self { records: map })
    }

    /// Read corrections from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Self, ParameterError> {
        let reader = BufReader::new(File::open(file)?);
        Self::from_records(serde_json::from_reader(reader)?)
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Result<Self, ParameterError> {
        Self::from_records(serde_json::from_str(BUNDLED_CORRECTIONS)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Corrections for a substance, looked up by its key and, if that
    /// fails, by its name.
    pub fn get(&self, identifier: &Identifier) -> Option<&CorrectionRecord> {
        self.records.get(&identifier.key()).or_else(|| {
            let name = identifier.name.as_deref().or(identifier.iupac_name.as_deref())?;
            self.records
                .values()
                .find(|r| r.identifier.matches(name, identifier.formula.as_deref()))
        })
    }
}
