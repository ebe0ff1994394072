//! The catalogue of cubic equations of state.
//!
//! Every [EosName] is mapped onto a [CubicEos], which combines
//! - the form of the attractive term ([CubicForm]),
//! - an [Alpha] function,
//! - critical constants per substance ([CriticalParameters]),
//! - and optionally a [VolumeTranslation].
//!
//! Substance specific constants of some models are taken from a
//! [SubstanceCorrections] table when the equation of state is built.
use ceos_core::parameter::{ParameterError, Substance};
use ceos_core::{CubicModel, EosError, EosResult, MixtureParameters};
use itertools::izip;
use ndarray::{Array1, Array2};
use num_dual::DualNum;
use std::fmt;

mod alpha;
mod corrections;
mod eos_name;
mod mixing_rules;
mod parameters;
mod translation;

pub use alpha::{
    Alpha, AlphaFunction, Gasem, GeneralizedTwu, MathiasCopeman, PengRobinson1978,
    RedlichKwong1949, SchmidtWenzel, Soave, Soave1993, StryjekVera, TsaiChen, VanDerWaals,
    Wilson1964,
};
pub use corrections::{CorrectionRecord, SubstanceCorrections, TsaiChenRecord};
pub use eos_name::EosName;
pub use mixing_rules::{quadratic_mixing, CubicForm};
pub use parameters::{CriticalConstants, CriticalParameters};
pub use translation::VolumeTranslation;

/// A cubic equation of state for one or more substances.
pub struct CubicEos {
    name: EosName,
    substances: Vec<Substance>,
    /// binary interaction parameters of the attraction parameter
    k_ij: Array2<f64>,
    /// processed parameters using model and substance critical data
    pub critical_parameters: CriticalParameters,
    pub alpha: Alpha,
    pub translation: VolumeTranslation,
}

impl CubicEos {
    /// Build the equation of state `name` with the bundled substance
    /// corrections.
    ///
    /// Without binary interaction parameters all `k_ij` are zero.
    pub fn new(
        name: EosName,
        substances: Vec<Substance>,
        k_ij: Option<Array2<f64>>,
    ) -> EosResult<Self> {
        Self::with_corrections(name, substances, k_ij, &SubstanceCorrections::bundled()?)
    }

    /// Build the equation of state `name` with a custom table of
    /// substance corrections.
    pub fn with_corrections(
        name: EosName,
        substances: Vec<Substance>,
        k_ij: Option<Array2<f64>>,
        corrections: &SubstanceCorrections,
    ) -> EosResult<Self> {
        let n = substances.len();
        if n == 0 {
            return Err(ParameterError::InvalidParameter(
                "at least one substance is required".into(),
            )
            .into());
        }
        let k_ij = match k_ij {
            Some(k) if k.dim() == (n, n) => k,
            Some(k) => return Err(EosError::IncompatibleComponents(k.nrows().max(k.ncols()), n)),
            None => Array2::zeros((n, n)),
        };

        let critical_parameters = CriticalParameters::new(&substances, name.form())?;
        let records: Vec<_> = substances
            .iter()
            .map(|s| corrections.get(&s.identifier))
            .collect();
        if uses_corrections(name) {
            for (s, _) in substances.iter().zip(&records).filter(|(_, r)| r.is_none()) {
                log::debug!(
                    "{}: no corrections for {}, using the generalized form",
                    name,
                    s.identifier
                );
            }
        }
        let alpha = build_alpha(name, &critical_parameters.acentric_factor, &records);
        alpha.validate(n)?;
        let translation =
            VolumeTranslation::new(name, &substances, &critical_parameters, &records)?;

        Ok(Self {
            name,
            substances,
            k_ij,
            critical_parameters,
            alpha,
            translation,
        })
    }

    pub fn name(&self) -> EosName {
        self.name
    }

    pub fn k_ij(&self) -> &Array2<f64> {
        &self.k_ij
    }
}

fn uses_corrections(name: EosName) -> bool {
    matches!(
        name,
        EosName::MathiasCopeman1983
            | EosName::StryjekVera1986
            | EosName::PengRobinsonMathiasCopeman
            | EosName::TsaiChen1998
            | EosName::AhlersGmehling2001
    )
}

fn mathias_copeman(
    soave: Soave,
    acentric_factor: &Array1<f64>,
    corrections: &[Option<&CorrectionRecord>],
    constants: fn(&CorrectionRecord) -> Option<[f64; 3]>,
) -> Alpha {
    let fallback = MathiasCopeman::from_soave(&soave, acentric_factor);
    let c = izip!(fallback.0, corrections)
        .map(|(c0, r)| r.and_then(constants).unwrap_or(c0))
        .collect();
    MathiasCopeman(c).into()
}

fn build_alpha(
    name: EosName,
    acentric_factor: &Array1<f64>,
    corrections: &[Option<&CorrectionRecord>],
) -> Alpha {
    match name {
        EosName::VanDerWaals1890 => VanDerWaals.into(),
        EosName::RedlichKwong1949 => RedlichKwong1949.into(),
        EosName::Wilson1964 => Wilson1964.into(),
        EosName::Soave1972 | EosName::Peneloux1982 => Soave::soave_1972().into(),
        EosName::Soave1993 => Soave1993.into(),
        EosName::SoaveRedlichKwong2019 => Soave::redlich_kwong_2019().into(),
        EosName::MathiasCopeman1983 => mathias_copeman(
            Soave::soave_1972(),
            acentric_factor,
            corrections,
            |r| r.mathias_copeman_rk,
        ),
        EosName::TwuRedlichKwong1995 => GeneralizedTwu::redlich_kwong().into(),
        EosName::PengRobinson1976 => Soave::peng_robinson_1976().into(),
        EosName::PengRobinson1978 => PengRobinson1978.into(),
        EosName::PengRobinson2019 => Soave::peng_robinson_2019().into(),
        EosName::StryjekVera1986 => StryjekVera::new(
            corrections
                .iter()
                .map(|r| r.and_then(|r| r.stryjek_vera).unwrap_or(0.0))
                .collect(),
        )
        .into(),
        EosName::PengRobinsonMathiasCopeman | EosName::AhlersGmehling2001 => mathias_copeman(
            Soave::peng_robinson_1976(),
            acentric_factor,
            corrections,
            |r| r.mathias_copeman_pr,
        ),
        EosName::TwuPengRobinson1995 => GeneralizedTwu::peng_robinson().into(),
        EosName::Gasem2001 => Gasem.into(),
        EosName::TsaiChen1998 => TsaiChen::new(
            corrections
                .iter()
                .map(|r| r.and_then(|r| r.tsai_chen).map_or(0.0, |tc| tc.n))
                .collect(),
        )
        .into(),
        EosName::PatelTeja1982 => Soave::patel_teja().into(),
        EosName::SchmidtWenzel1980 => SchmidtWenzel.into(),
    }
}

impl fmt::Display for CubicEos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        self.substances
            .iter()
            .try_for_each(|s| write!(f, "\n{}", s.identifier))?;
        write!(f, "\nk_ij:\n{}", self.k_ij)
    }
}

impl CubicModel for CubicEos {
    fn components(&self) -> usize {
        self.substances.len()
    }

    fn substances(&self) -> &[Substance] {
        &self.substances
    }

    fn mixture_parameters<D: DualNum<f64> + Copy>(
        &self,
        temperature: D,
        molefracs: &Array1<D>,
    ) -> MixtureParameters<D> {
        let p = &self.critical_parameters;
        let form = self.name.form();
        let tr = p.tc.mapv(|tc| temperature / tc);
        let theta = self.alpha.alpha(&p.acentric_factor, &tr) * &p.a;
        let c = match form {
            CubicForm::PatelTeja => p.c.mapv(D::from),
            _ => self.translation.translation(&p.rtc_pc, &tr),
        };
        quadratic_mixing(
            form,
            &theta,
            &p.b,
            &c,
            &p.acentric_factor,
            &self.k_ij,
            molefracs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ceos_core::parameter::Identifier;
    use ceos_core::RGAS;
    use ndarray::{arr1, arr2};
    use std::f64::consts::SQRT_2;

    fn propane() -> Substance {
        Substance::new(
            Identifier::new(None, Some("propane"), None, Some("C3H8")),
            369.83,
            4.21e6,
            0.153,
            44.1,
        )
    }

    fn pentane_heptane() -> Vec<Substance> {
        vec![
            Substance::new(
                Identifier::new(None, Some("pentane"), None, Some("C5H12")),
                469.7,
                3.370e6,
                0.251,
                72.15,
            )
            .with_zc(0.270),
            Substance::new(
                Identifier::new(None, Some("heptane"), None, Some("C7H16")),
                540.2,
                2.740e6,
                0.350,
                100.2,
            )
            .with_zc(0.263),
        ]
    }

    #[test]
    fn peng_robinson_residual_helmholtz_energy() {
        // closed form of the Peng-Robinson equation of state
        let (tc, pc, w) = (369.83, 4.21e6, 0.153);
        let eos = CubicEos::new(EosName::PengRobinson1976, vec![propane()], None).unwrap();
        let (t, v) = (300.0, 8.7e-5);
        let a = 0.45724 * (RGAS * tc).powi(2) / pc;
        let b = 0.07780 * RGAS * tc / pc;
        let kappa = 0.37464 + (1.54226 - 0.26992 * w) * w;
        let alpha = (1.0 + kappa * (1.0 - (t / tc).sqrt())).powi(2);
        let a_res = (v / (v - b)).ln()
            - a * alpha / (b * 2.0 * SQRT_2 * RGAS * t)
                * ((v + b * (1.0 + SQRT_2)) / (v + b * (1.0 - SQRT_2))).ln();
        let x = arr1(&[1.0]);
        assert_relative_eq!(
            eos.residual_helmholtz_energy(t, v, &x),
            a_res,
            max_relative = 1e-10
        );
        let p = RGAS * t / (v - b) - a * alpha / (v * v + 2.0 * b * v - b * b);
        assert_relative_eq!(eos.pressure(t, v, &x), p, max_relative = 1e-10);
    }

    #[test]
    fn interaction_parameters() {
        let k = arr2(&[[0.0, 0.02], [0.02, 0.0]]);
        let eos = CubicEos::new(EosName::Soave1972, pentane_heptane(), Some(k)).unwrap();
        assert_eq!(eos.k_ij()[[0, 1]], 0.02);
        let k = Array2::zeros((3, 3));
        assert!(matches!(
            CubicEos::new(EosName::Soave1972, pentane_heptane(), Some(k)),
            Err(EosError::IncompatibleComponents(3, 2))
        ));
        assert!(CubicEos::new(EosName::Soave1972, vec![], None).is_err());
    }

    #[test]
    fn ahlers_gmehling_requires_zc() {
        assert!(matches!(
            CubicEos::new(EosName::AhlersGmehling2001, vec![propane()], None),
            Err(EosError::ParameterError(ParameterError::MissingParameters(_)))
        ));
        let eos = CubicEos::new(EosName::AhlersGmehling2001, pentane_heptane(), None).unwrap();
        assert!(matches!(eos.translation, VolumeTranslation::Constant(_)));
    }

    #[test]
    fn corrections_are_resolved() {
        let eos = CubicEos::new(EosName::StryjekVera1986, pentane_heptane(), None).unwrap();
        let w = &eos.critical_parameters.acentric_factor;
        let tr = arr1(&[0.6, 0.6]);
        let with = eos.alpha.alpha(w, &tr);
        let empty = SubstanceCorrections::default();
        let eos =
            CubicEos::with_corrections(EosName::StryjekVera1986, pentane_heptane(), None, &empty)
                .unwrap();
        let without = eos.alpha.alpha(w, &tr);
        // positive kappa_1 of the n-alkanes increases alpha at Tr < 0.7
        assert!(with[0] > without[0]);
        assert!(with[1] > without[1]);
    }

    #[test]
    fn ln_phi_from_helmholtz_energy() {
        // ln phi_i = d(n a_res)/dn_i at constant T, V minus ln Z
        let k = arr2(&[[0.0, 0.03], [0.03, 0.0]]);
        let (t, p) = (350.0, 2.0e5);
        let x = arr1(&[0.4, 0.6]);
        for name in EosName::ALL {
            let eos = CubicEos::new(name, pentane_heptane(), Some(k.clone())).unwrap();
            let roots = eos.compressibility_roots(p, t, &x);
            assert!(!roots.is_empty(), "{name}");
            for z in [roots[0], roots[roots.len() - 1]] {
                let volume = z * RGAS * t / p;
                let ln_phi = eos.ln_phi(&x, p, t, z);
                let helmholtz = |n: &Array1<f64>| {
                    let n_tot = n.sum();
                    n_tot * eos.residual_helmholtz_energy(t, volume / n_tot, &(n / n_tot))
                };
                for i in 0..2 {
                    let h = 1e-6;
                    let mut n_plus = x.clone();
                    n_plus[i] += h;
                    let mut n_minus = x.clone();
                    n_minus[i] -= h;
                    let mu = (helmholtz(&n_plus) - helmholtz(&n_minus)) / (2.0 * h);
                    assert_relative_eq!(ln_phi[i], mu - z.ln(), epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn roots_reproduce_pressure() {
        let (t, p) = (350.0, 2.0e5);
        let x = arr1(&[0.4, 0.6]);
        for name in EosName::ALL {
            let eos = CubicEos::new(name, pentane_heptane(), None).unwrap();
            for z in eos.compressibility_roots(p, t, &x) {
                let v = z * RGAS * t / p;
                assert_relative_eq!(eos.pressure(t, v, &x), p, max_relative = 1e-6);
            }
        }
    }
}
