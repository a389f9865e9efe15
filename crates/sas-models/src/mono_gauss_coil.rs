// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Mono Gauss Coil
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Monodisperse Gaussian coil: the Debye function.
//!
//!   I(q) = I₀ · 2(e^{−z} + z − 1)/z²,  z = (q·Rg)²

use crate::info::{CheckInput, ModelCheck, ModelDef, ModelInfo};
use rand::rngs::StdRng;
use rand::Rng;
use sas_math::real::Real;
use sas_math::special::{debye, square};
use sas_types::params::{ParamKind, Parameter};

pub const I_ZERO: usize = 0;
pub const RG: usize = 1;

pub fn iq<T: Real>(q: T, pars: &[T]) -> T {
    pars[I_ZERO] * debye(square(q * pars[RG]))
}

fn random(rng: &mut StdRng) -> Vec<(&'static str, f64)> {
    vec![
        ("i_zero", 10.0f64.powf(rng.gen_range(1.0..3.0))),
        ("rg", 10.0f64.powf(rng.gen_range(0.0..4.0))),
    ]
}

static CHECKS: &[ModelCheck] = &[
    ModelCheck {
        pars: &[("background", 0.0)],
        input: CheckInput::Q1d(0.01),
        expected: 5.8531067140e+01,
    },
    ModelCheck {
        pars: &[("background", 0.0)],
        input: CheckInput::Q1d(0.1),
        expected: 2.4446419753e+00,
    },
];

pub fn model() -> ModelDef {
    ModelDef {
        info: ModelInfo {
            id: "mono_gauss_coil",
            title: "Scattering from monodisperse polymer coils",
            description: "Debye function: I(q) = I_zero * 2(exp(-z) + z - 1)/z^2 \
                          with z = (q Rg)^2.",
            category: "shape-independent",
            parameters: vec![
                Parameter {
                    id: "i_zero",
                    units: "1/cm",
                    default: 70.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Intensity at zero Q",
                },
                Parameter {
                    id: "rg",
                    units: "Ang",
                    default: 75.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Radius of gyration",
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

    const PARS: [f64; 2] = [70.0, 75.0];

    #[test]
    fn test_reference_values() {
        assert!((iq(0.01, &PARS) - 58.531067140).abs() / 58.5 < 1e-9);
        assert!((iq(0.1, &PARS) - 2.4446419753).abs() / 2.44 < 1e-9);
    }

    #[test]
    fn test_q_zero_is_i_zero() {
        assert_eq!(iq(0.0, &PARS), 70.0);
    }

    #[test]
    fn test_agrees_with_poly_at_pd_one() {
        let poly = [70.0, 75.0, 1.0];
        for &q in &[1e-4, 0.001, 0.01, 0.1, 0.4] {
            let a = iq(q, &PARS);
            let b = crate::poly_gauss_coil::iq(q, &poly);
            assert!((a - b).abs() / a < 1e-12, "q={q}: {a} vs {b}");
        }
    }
}
