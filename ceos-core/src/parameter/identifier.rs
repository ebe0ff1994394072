use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Possible variants to identify a substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierOption {
    Cas,
    Name,
    IupacName,
    Formula,
}

/// A collection of identifiers for a substance.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Identifier {
    /// CAS number
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cas: Option<String>,
    /// Commonly used english name
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// IUPAC name
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    /// Chemical formula
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl Identifier {
    /// Create a new identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ceos_core::parameter::Identifier;
    /// let hexane = Identifier::new(Some("110-54-3"), Some("hexane"), Some("hexane"), Some("C6H14"));
    /// assert_eq!(hexane.key(), "110-54-3");
    /// ```
    pub fn new(
        cas: Option<&str>,
        name: Option<&str>,
        iupac_name: Option<&str>,
        formula: Option<&str>,
    ) -> Identifier {
        Identifier {
            cas: cas.map(Into::into),
            name: name.map(Into::into),
            iupac_name: iupac_name.map(Into::into),
            formula: formula.map(Into::into),
        }
    }

    pub fn as_string(&self, option: IdentifierOption) -> Option<String> {
        match option {
            IdentifierOption::Cas => self.cas.clone(),
            IdentifierOption::Name => self.name.clone(),
            IdentifierOption::IupacName => self.iupac_name.clone(),
            IdentifierOption::Formula => self.formula.clone(),
        }
    }

    /// Stable key of the substance: the CAS number if available,
    /// otherwise the lower case name.
    pub fn key(&self) -> String {
        match (&self.cas, &self.name, &self.iupac_name) {
            (Some(cas), _, _) => cas.clone(),
            (None, Some(name), _) | (None, None, Some(name)) => name.to_lowercase(),
            (None, None, None) => self.formula.clone().unwrap_or_default(),
        }
    }

    /// Case insensitive match against the common or IUPAC name and,
    /// if given, the chemical formula.
    pub fn matches(&self, name: &str, formula: Option<&str>) -> bool {
        let eq = |s: &Option<String>| {
            s.as_ref()
                .map_or(false, |s| s.eq_ignore_ascii_case(name.trim()))
        };
        let name_matches = eq(&self.name) || eq(&self.iupac_name);
        match formula {
            Some(f) => name_matches && self.formula.as_deref() == Some(f.trim()),
            None => name_matches,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = [
            ("cas", &self.cas),
            ("name", &self.name),
            ("iupac_name", &self.iupac_name),
            ("formula", &self.formula),
        ]
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| format!("{}={}", k, v)))
        .collect();
        write!(f, "Identifier({})", ids.join(", "))
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
