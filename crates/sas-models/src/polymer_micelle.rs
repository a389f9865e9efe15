// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Polymer Micelle
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pedersen micelle: spherical core with Gaussian polymer corona.
//!
//! Four-term sum over N = n_aggreg chains of excess scattering length
//! βs (core) and βc (corona):
//!
//!   P(q) = N²βs²Φ²(qR) + Nβc²P_c(q) + 2N²βsβc·S_sc(q) + N(N−1)βc²·S_cc(q)
//!
//! with Φ the sphere amplitude, P_c the Debye function, ψ(z) the chain
//! amplitude and the corona shell sampled at R + d·Rg. The result is
//! scaled by the micelle number density and 1e-13 to land in 1/cm.

use crate::info::{CheckInput, ModelCheck, ModelDef, ModelInfo};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;
use sas_math::real::{lit, Real};
use sas_math::special::{chain_amplitude, debye, sas_3j1x_x, sas_sinx_x, square};
use sas_types::params::{ParamKind, Parameter};

pub const NDENSITY: usize = 0;
pub const V_CORE: usize = 1;
pub const V_CORONA: usize = 2;
pub const SLD_SOLVENT: usize = 3;
pub const SLD_CORE: usize = 4;
pub const SLD_CORONA: usize = 5;
pub const RADIUS_CORE: usize = 6;
pub const RG: usize = 7;
pub const D_PENETRATION: usize = 8;
pub const N_AGGREG: usize = 9;

pub fn iq<T: Real>(q: T, pars: &[T]) -> T {
    let n = pars[N_AGGREG];
    let beta_s = pars[V_CORE] * (pars[SLD_CORE] - pars[SLD_SOLVENT]);
    let beta_c = pars[V_CORONA] * (pars[SLD_CORONA] - pars[SLD_SOLVENT]);

    let bes_core = sas_3j1x_x(q * pars[RADIUS_CORE]);
    let z = square(q * pars[RG]);
    let debye_chain = debye(z);
    let chain_ampl = chain_amplitude(z);
    let bes_corona = sas_sinx_x(q * (pars[RADIUS_CORE] + pars[D_PENETRATION] * pars[RG]));

    let term1 = square(n * beta_s * bes_core);
    let term2 = n * beta_c * beta_c * debye_chain;
    let term3 = lit::<T>(2.0) * n * n * beta_s * beta_c * bes_core * chain_ampl * bes_corona;
    let term4 = n * (n - T::ONE) * square(beta_c * chain_ampl * bes_corona);

    // rescale to 1/cm with ndensity in 1e15/cm^3
    (term1 + term2 + term3 + term4) * pars[NDENSITY] * lit(1.0e-13)
}

fn random(rng: &mut StdRng) -> Vec<(&'static str, f64)> {
    let radius_core = 10.0f64.powf(rng.gen_range(1.0..3.0));
    let rg = radius_core * 10.0f64.powf(rng.gen_range(-2.0..-0.3));
    let d_penetration: f64 = 1.0 + 0.05 * rng.sample::<f64, _>(StandardNormal);
    let n_aggreg = rng.gen_range(3..30) as f64;
    // head-group volume: core volume per chain with packing fraction 0.68
    let v_core = 4.0 * std::f64::consts::PI / 3.0 * radius_core.powi(3) / n_aggreg * 0.68;
    // v = 4/3 pi r^3 n with r = Rg sqrt(3/2n)  =>  v = pi Rg^3 sqrt(6/n)
    let tail_segments = rng.gen_range(6..30) as f64;
    let v_corona = std::f64::consts::PI * rg.powi(3) * (6.0 / tail_segments).sqrt();
    let v_micelle = 4.0 * std::f64::consts::PI / 3.0 * (radius_core + rg).powi(3);
    vec![
        ("background", 0.0),
        ("scale", 1.0e7 / v_micelle),
        ("ndensity", 8.94),
        ("v_core", v_core),
        ("v_corona", v_corona),
        ("radius_core", radius_core),
        ("rg", rg),
        ("d_penetration", d_penetration),
        ("n_aggreg", n_aggreg),
    ]
}

static CHECKS: &[ModelCheck] = &[
    ModelCheck {
        pars: &[],
        input: CheckInput::Q1d(0.01),
        expected: 1.5354214800e+01,
    },
    ModelCheck {
        pars: &[],
        input: CheckInput::Q1d(0.1),
        expected: 2.4464192787e-01,
    },
];

pub fn model() -> ModelDef {
    ModelDef {
        info: ModelInfo {
            id: "polymer_micelle",
            title: "Polymer micelle model",
            description: "Form factor for a micelle with a spherical core and \
                          Gaussian polymer chains attached to the surface; the \
                          Gaussian chains must be much smaller than the core.",
            category: "shape:sphere",
            parameters: vec![
                Parameter {
                    id: "ndensity",
                    units: "1e15/cm^3",
                    default: 8.94,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Number density of micelles",
                },
                Parameter {
                    id: "v_core",
                    units: "Ang^3",
                    default: 62624.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Core volume",
                },
                Parameter {
                    id: "v_corona",
                    units: "Ang^3",
                    default: 61940.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Corona volume",
                },
                Parameter {
                    id: "sld_solvent",
                    units: "1e-6/Ang^2",
                    default: 6.4,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Solvent scattering length density",
                },
                Parameter {
                    id: "sld_core",
                    units: "1e-6/Ang^2",
                    default: 0.34,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Core scattering length density",
                },
                Parameter {
                    id: "sld_corona",
                    units: "1e-6/Ang^2",
                    default: 0.8,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Corona scattering length density",
                },
                Parameter {
                    id: "radius_core",
                    units: "Ang",
                    default: 45.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Radius of core (must be >> rg)",
                },
                Parameter {
                    id: "rg",
                    units: "Ang",
                    default: 20.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Radius of gyration of chains in corona",
                },
                Parameter {
                    id: "d_penetration",
                    units: "None",
                    default: 1.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Factor to mimic non-penetration of Gaussian chains",
                },
                Parameter {
                    id: "n_aggreg",
                    units: "None",
                    default: 6.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Aggregation number of the micelle",
                },
            ],
        },
        iq32: iq::<f32>,
        iq64: iq::<f64>,
        iqxy32: None,
        iqxy64: None,
        form_volume: None,
        random: Some(random),
        constrain: None,
        checks: CHECKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARS: [f64; 10] = [
        8.94, 62624.0, 61940.0, 6.4, 0.34, 0.8, 45.0, 20.0, 1.0, 6.0,
    ];

    #[test]
    fn test_reference_values() {
        assert!((iq(0.01, &PARS) - 15.3532148).abs() / 15.35 < 1e-8);
        assert!((iq(0.1, &PARS) - 0.24364192787).abs() / 0.2436 < 1e-8);
    }

    #[test]
    fn test_forward_scattering_finite() {
        let v = iq(0.0, &PARS);
        assert!((v - 16.980495720).abs() / 16.98 < 1e-8, "I(0) = {v}");
    }

    #[test]
    fn test_matched_solvent_kills_all_terms() {
        let mut pars = PARS;
        pars[SLD_CORE] = 6.4;
        pars[SLD_CORONA] = 6.4;
        assert_eq!(iq(0.05, &pars), 0.0);
    }
}
