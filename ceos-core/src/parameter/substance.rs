use super::identifier::Identifier;
use crate::ideal_gas::IdealGasRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coefficients of the Antoine equation
/// $\log_{10}(p/\mathrm{Pa})=A-\frac{B}{T/\mathrm{K}+C}$.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AntoineRecord {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// lower temperature bound in K
    pub t_min: f64,
    /// upper temperature bound in K
    pub t_max: f64,
}

impl AntoineRecord {
    pub fn new(a: f64, b: f64, c: f64, t_min: f64, t_max: f64) -> Self {
        Self {
            a,
            b,
            c,
            t_min,
            t_max,
        }
    }

    /// Vapor pressure in Pa, `None` outside of the range of validity.
    pub fn vapor_pressure(&self, temperature: f64) -> Option<f64> {
        (temperature >= self.t_min && temperature <= self.t_max)
            .then(|| 10f64.powf(self.a - self.b / (temperature + self.c)))
    }
}

/// Pure substance data required by cubic equations of state.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Substance {
    pub identifier: Identifier,
    /// critical temperature in K
    pub tc: f64,
    /// critical pressure in Pa
    pub pc: f64,
    /// acentric factor
    pub acentric_factor: f64,
    /// molar weight in g/mol
    pub molarweight: f64,
    /// critical compressibility factor
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zc: Option<f64>,
    /// critical molar volume in m³/mol
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vc: Option<f64>,
    /// normal boiling point in K
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_boiling_point: Option<f64>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_gas: Option<IdealGasRecord>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antoine: Option<AntoineRecord>,
}

impl Substance {
    /// Create a substance from its critical point and acentric factor.
    pub fn new(identifier: Identifier, tc: f64, pc: f64, acentric_factor: f64, molarweight: f64) -> Self {
        Self {
            identifier,
            tc,
            pc,
            acentric_factor,
            molarweight,
            zc: None,
            vc: None,
            normal_boiling_point: None,
            ideal_gas: None,
            antoine: None,
        }
    }

    pub fn with_zc(mut self, zc: f64) -> Self {
        self.zc = Some(zc);
        self
    }

    pub fn with_normal_boiling_point(mut self, tb: f64) -> Self {
        self.normal_boiling_point = Some(tb);
        self
    }

    pub fn with_ideal_gas(mut self, record: IdealGasRecord) -> Self {
        self.ideal_gas = Some(record);
        self
    }

    pub fn with_antoine(mut self, record: AntoineRecord) -> Self {
        self.antoine = Some(record);
        self
    }

    /// Critical compressibility factor, from `zc` or from `vc` if only the
    /// critical volume is known.
    pub fn critical_compressibility(&self) -> Option<f64> {
        self.zc
            .or_else(|| self.vc.map(|vc| self.pc * vc / (crate::RGAS * self.tc)))
    }
}

impl fmt::Display for Substance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Substance(")?;
        write!(f, "\n\tidentifier={},", self.identifier)?;
        write!(f, "\n\ttc={} K, pc={} Pa,", self.tc, self.pc)?;
        write!(f, "\n\tacentric_factor={},", self.acentric_factor)?;
        write!(f, "\n\tmolarweight={} g/mol,", self.molarweight)?;
        if let Some(zc) = self.zc {
            write!(f, "\n\tzc={},", zc)?;
        }
        if let Some(tb) = self.normal_boiling_point {
            write!(f, "\n\tnormal_boiling_point={} K,", tb)?;
        }
        if let Some(ig) = &self.ideal_gas {
            write!(f, "\n\tideal_gas={},", ig)?;
        }
        write!(f, "\n)")
    }
}
