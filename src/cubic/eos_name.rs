use super::mixing_rules::CubicForm;
use ceos_core::parameter::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The available cubic equations of state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EosName {
    VanDerWaals1890,
    RedlichKwong1949,
    Wilson1964,
    Soave1972,
    Soave1993,
    SoaveRedlichKwong2019,
    Peneloux1982,
    MathiasCopeman1983,
    TwuRedlichKwong1995,
    PengRobinson1976,
    PengRobinson1978,
    PengRobinson2019,
    StryjekVera1986,
    PengRobinsonMathiasCopeman,
    TwuPengRobinson1995,
    Gasem2001,
    TsaiChen1998,
    AhlersGmehling2001,
    PatelTeja1982,
    SchmidtWenzel1980,
}

impl EosName {
    pub const ALL: [EosName; 20] = [
        Self::VanDerWaals1890,
        Self::RedlichKwong1949,
        Self::Wilson1964,
        Self::Soave1972,
        Self::Soave1993,
        Self::SoaveRedlichKwong2019,
        Self::Peneloux1982,
        Self::MathiasCopeman1983,
        Self::TwuRedlichKwong1995,
        Self::PengRobinson1976,
        Self::PengRobinson1978,
        Self::PengRobinson2019,
        Self::StryjekVera1986,
        Self::PengRobinsonMathiasCopeman,
        Self::TwuPengRobinson1995,
        Self::Gasem2001,
        Self::TsaiChen1998,
        Self::AhlersGmehling2001,
        Self::PatelTeja1982,
        Self::SchmidtWenzel1980,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VanDerWaals1890 => "van der Waals (1890)",
            Self::RedlichKwong1949 => "Redlich-Kwong (1949)",
            Self::Wilson1964 => "Wilson (1964)",
            Self::Soave1972 => "Soave (1972)",
            Self::Soave1993 => "Soave (1993)",
            Self::SoaveRedlichKwong2019 => "Soave-Redlich-Kwong (2019)",
            Self::Peneloux1982 => "Peneloux (1982)",
            Self::MathiasCopeman1983 => "Mathias-Copeman (1983)",
            Self::TwuRedlichKwong1995 => "Twu (1995) RK",
            Self::PengRobinson1976 => "Peng-Robinson (1976)",
            Self::PengRobinson1978 => "Peng-Robinson (1978)",
            Self::PengRobinson2019 => "Peng-Robinson (2019)",
            Self::StryjekVera1986 => "Stryjek-Vera (1986)",
            Self::PengRobinsonMathiasCopeman => "Peng-Robinson Mathias-Copeman",
            Self::TwuPengRobinson1995 => "Twu (1995) PR",
            Self::Gasem2001 => "Gasem (2001)",
            Self::TsaiChen1998 => "Tsai-Chen (1998)",
            Self::AhlersGmehling2001 => "Ahlers-Gmehling (2001)",
            Self::PatelTeja1982 => "Patel-Teja (1982)",
            Self::SchmidtWenzel1980 => "Schmidt-Wenzel (1980)",
        }
    }

    /// The form of the attractive term.
    pub const fn form(&self) -> CubicForm {
        match self {
            Self::VanDerWaals1890 => CubicForm::VanDerWaals,
            Self::RedlichKwong1949
            | Self::Wilson1964
            | Self::Soave1972
            | Self::Soave1993
            | Self::SoaveRedlichKwong2019
            | Self::Peneloux1982
            | Self::MathiasCopeman1983
            | Self::TwuRedlichKwong1995 => CubicForm::RedlichKwong,
            Self::PengRobinson1976
            | Self::PengRobinson1978
            | Self::PengRobinson2019
            | Self::StryjekVera1986
            | Self::PengRobinsonMathiasCopeman
            | Self::TwuPengRobinson1995
            | Self::Gasem2001
            | Self::TsaiChen1998
            | Self::AhlersGmehling2001 => CubicForm::PengRobinson,
            Self::PatelTeja1982 => CubicForm::PatelTeja,
            Self::SchmidtWenzel1980 => CubicForm::SchmidtWenzel,
        }
    }

    /// `true` for models with a volume translation.
    pub const fn is_translated(&self) -> bool {
        matches!(
            self,
            Self::Peneloux1982 | Self::TsaiChen1998 | Self::AhlersGmehling2001
        )
    }
}

impl fmt::Display for EosName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for EosName {
    type Err = ParameterError;

    /// Parse the display name or the variant name, ignoring case,
    /// whitespace and punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|name| normalize(name.as_str()) == key || normalize(&format!("{name:?}")) == key)
            .ok_or_else(|| ParameterError::InvalidParameter(format!("unknown equation of state '{s}'")))
    }
}
