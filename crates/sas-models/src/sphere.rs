// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Sphere
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sphere of uniform scattering length density.
//!
//! F(q) = Δρ·V·3j₁(qr)/(qr); the kernel returns 1e-4·F² and the engine
//! normalizes by the particle volume. Radially symmetric, so the 1-D
//! kernel serves 2-D data as well.

use crate::info::{CheckInput, ModelCheck, ModelDef, ModelInfo};
use rand::rngs::StdRng;
use rand::Rng;
use sas_math::real::{lit, Real};
use sas_math::special::{sas_3j1x_x, square};
use sas_types::params::{ParamKind, Parameter};

pub const SLD: usize = 0;
pub const SLD_SOLVENT: usize = 1;
pub const RADIUS: usize = 2;

pub fn form_volume<T: Real>(pars: &[T]) -> T {
    let r = pars[RADIUS];
    lit::<T>(4.0 * std::f64::consts::PI / 3.0) * r * r * r
}

pub fn iq<T: Real>(q: T, pars: &[T]) -> T {
    let drho = pars[SLD] - pars[SLD_SOLVENT];
    let f = drho * form_volume(pars) * sas_3j1x_x(q * pars[RADIUS]);
    // contrast in 1e-6/Ang^2, intensity in 1/cm
    lit::<T>(1.0e-4) * square(f)
}

fn random(rng: &mut StdRng) -> Vec<(&'static str, f64)> {
    vec![("radius", 10.0f64.powf(rng.gen_range(1.3..4.0)))]
}

static CHECKS: &[ModelCheck] = &[
    ModelCheck {
        pars: &[],
        input: CheckInput::Q1d(0.001),
        expected: 1.3083435808e+03,
    },
    ModelCheck {
        pars: &[],
        input: CheckInput::Q1d(0.1),
        expected: 4.2619400091e+00,
    },
    ModelCheck {
        pars: &[],
        input: CheckInput::Q1d(0.2),
        expected: 7.2636165493e-01,
    },
];

pub fn model() -> ModelDef {
    ModelDef {
        info: ModelInfo {
            id: "sphere",
            title: "Spheres with uniform scattering length density",
            description: "I(q) = scale/V * [V (sld - sld_solvent) 3 j1(qr)/(qr)]^2 \
                          * 1e-4 + background",
            category: "shape:sphere",
            parameters: vec![
                Parameter {
                    id: "sld",
                    units: "1e-6/Ang^2",
                    default: 1.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Sphere scattering length density",
                },
                Parameter {
                    id: "sld_solvent",
                    units: "1e-6/Ang^2",
                    default: 6.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Solvent scattering length density",
                },
                Parameter {
                    id: "radius",
                    units: "Ang",
                    default: 50.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Volume,
                    description: "Sphere radius",
                },
            ],
        },
        iq32: iq::<f32>,
        iq64: iq::<f64>,
        iqxy32: None,
        iqxy64: None,
        form_volume: Some(form_volume::<f64>),
        random: Some(random),
        constrain: None,
        checks: CHECKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARS: [f64; 3] = [1.0, 6.0, 50.0];

    #[test]
    fn test_reference_values() {
        let v = 4.0 * std::f64::consts::PI / 3.0 * 50.0f64.powi(3);
        // engine semantics: scale*kernel/V + background
        let i = |q: f64| iq(q, &PARS) / v + 0.001;
        assert!((i(0.001) - 1.3083435808e3).abs() / 1.3e3 < 1e-9);
        assert!((i(0.1) - 4.2619400091).abs() / 4.26 < 1e-9);
        assert!((i(0.2) - 0.72636165493).abs() / 0.726 < 1e-9);
    }

    #[test]
    fn test_zero_contrast_gives_zero() {
        let pars = [6.0, 6.0, 50.0];
        assert_eq!(iq(0.05, &pars), 0.0);
    }

    #[test]
    fn test_forward_scattering() {
        // q=0: kernel = 1e-4 (drho V)^2
        let v = form_volume(&PARS);
        let expect = 1.0e-4 * (5.0 * v) * (5.0 * v);
        assert!((iq(0.0, &PARS) - expect).abs() / expect < 1e-12);
    }

    #[test]
    fn test_f32_matches_f64() {
        let pars32 = [1.0f32, 6.0, 50.0];
        for &q in &[0.01, 0.05, 0.1] {
            let d = iq(q, &PARS);
            let s = iq(q as f32, &pars32) as f64;
            assert!((d - s).abs() / d < 1e-4, "q={q}: {d} vs {s}");
        }
    }
}
