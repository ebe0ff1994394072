//! Substance records, the substance provider interface and binary
//! interaction parameters.
use indexmap::{IndexMap, IndexSet};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

mod identifier;
mod substance;

pub use identifier::{Identifier, IdentifierOption};
pub use substance::{AntoineRecord, Substance};

/// Lookup of substance data by name.
///
/// A query may match zero, one or several substances (e.g. isomers
/// sharing a common name), the caller decides how to disambiguate.
pub trait SubstanceProvider {
    /// All substances whose name matches `name` and, if given, `formula`.
    fn find(&self, name: &str, formula: Option<&str>) -> Vec<&Substance>;

    /// The substance stored under the stable key (see [Identifier::key]).
    fn get(&self, key: &str) -> Option<&Substance>;
}

/// In-memory collection of substances keyed by their stable identifier.
#[derive(Debug, Clone, Default)]
pub struct SubstanceDatabase {
    records: IndexMap<String, Substance>,
}

impl SubstanceDatabase {
    /// Build the database from a list of records.
    pub fn from_records(records: Vec<Substance>) -> Result<Self, ParameterError> {
        let mut map = IndexMap::with_capacity(records.len());
        for record in records {
            let key = record.identifier.key();
            if map.insert(key.clone(), record).is_some() {
                return Err(ParameterError::IncompatibleParameters(format!(
                    "Substance '{}' was defined more than once.",
                    key
                )));
            }
        }
        Ok(Self { records: map })
    }

    /// Read substances from a json file containing a list of records.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Self, ParameterError> {
        let records: Vec<Substance> = serde_json::from_reader(BufReader::new(File::open(file)?))?;
        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substance> {
        self.records.values()
    }

    /// Collect the queried substances in the order given.
    pub fn substances(
        &self,
        substances: &[&str],
        identifier_option: IdentifierOption,
    ) -> Result<Vec<Substance>, ParameterError> {
        let queried: IndexSet<&str> = substances.iter().copied().collect();
        if queried.len() != substances.len() {
            return Err(ParameterError::IncompatibleParameters(
                "A substance was defined more than once.".to_string(),
            ));
        }

        let available: HashMap<String, &Substance> = self
            .records
            .values()
            .filter_map(|r| r.identifier.as_string(identifier_option).map(|id| (id, r)))
            .collect();
        let missing: Vec<&str> = queried
            .iter()
            .filter(|s| !available.contains_key(**s))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ParameterError::ComponentsNotFound(format!("{:?}", missing)));
        }
        Ok(substances
            .iter()
            .filter_map(|s| available.get(*s).map(|&r| r.clone()))
            .collect())
    }
}

impl SubstanceProvider for SubstanceDatabase {
    fn find(&self, name: &str, formula: Option<&str>) -> Vec<&Substance> {
        self.records
            .values()
            .filter(|r| r.identifier.matches(name, formula))
            .collect()
    }

    fn get(&self, key: &str) -> Option<&Substance> {
        self.records.get(key)
    }
}

/// Binary interaction parameter between two substances.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BinaryRecord {
    /// Identifier of the first component
    pub id1: String,
    /// Identifier of the second component
    pub id2: String,
    /// Binary interaction parameter of the attractive term
    pub k_ij: f64,
}

impl BinaryRecord {
    pub fn new(id1: &str, id2: &str, k_ij: f64) -> Self {
        Self {
            id1: id1.into(),
            id2: id2.into(),
            k_ij,
        }
    }

    /// Read a list of `BinaryRecord`s from a JSON file.
    pub fn from_json<P: AsRef<Path>>(file: P) -> Result<Vec<Self>, ParameterError> {
        Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?)
    }
}

impl std::fmt::Display for BinaryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BinaryRecord(id1={}, id2={}, k_ij={})",
            self.id1, self.id2, self.k_ij
        )
    }
}

/// Build the symmetric interaction matrix for `substances` from a list of
/// binary records.
///
/// Pairs without a record (in either order) and substances without the
/// requested identifier get `k_ij = 0`.
pub fn binary_matrix_from_records(
    substances: &[Substance],
    binary_records: &[BinaryRecord],
    identifier_option: IdentifierOption,
) -> Array2<f64> {
    let binary_map: HashMap<(&str, &str), f64> = binary_records
        .iter()
        .map(|br| ((br.id1.as_str(), br.id2.as_str()), br.k_ij))
        .collect();
    let ids: Vec<Option<String>> = substances
        .iter()
        .map(|s| s.identifier.as_string(identifier_option))
        .collect();
    let n = substances.len();
    Array2::from_shape_fn([n, n], |(i, j)| match (&ids[i], &ids[j]) {
        (Some(id1), Some(id2)) if i != j => binary_map
            .get(&(id1.as_str(), id2.as_str()))
            .or_else(|| binary_map.get(&(id2.as_str(), id1.as_str())))
            .copied()
            .unwrap_or_default(),
        _ => 0.0,
    })
}

#[derive(Error, Debug)]
pub enum ParameterError {
    #[error(transparent)]
    FileIO(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("The following component(s) were not found: {0}")]
    ComponentsNotFound(String),
    #[error("Incompatible parameters: {0}")]
    IncompatibleParameters(String),
    #[error("Missing parameters: {0}")]
    MissingParameters(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
