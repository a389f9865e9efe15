// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Poly Gauss Coil
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Polydisperse Gaussian coil (Schulz–Zimm molecular weight distribution).
//!
//! With u = PD − 1 and z = (q·Rg)²/(1 + 2u):
//!
//!   I(q) = I₀ · 2[(1 + uz)^(−1/u) + z − 1] / [(1 + u)z²]
//!
//! PD = Mw/Mn = 1 reduces to the Debye function. The bracket cancels
//! catastrophically as z → 0, so below z = 1e-3 a Taylor expansion takes
//! over; even so the direct branch is the classic single-precision
//! trouble spot this model is precision-checked for.

use crate::info::{CheckInput, ModelCheck, ModelDef, ModelInfo};
use rand::rngs::StdRng;
use rand::Rng;
use sas_math::real::{lit, Real};
use sas_math::special::{debye, square};
use sas_types::params::{ParamKind, Parameter};

pub const I_ZERO: usize = 0;
pub const RG: usize = 1;
pub const POLYDISPERSITY: usize = 2;

/// Taylor/direct branch point in z.
const Z_CUTOFF: f64 = 1.0e-3;

pub fn iq<T: Real>(q: T, pars: &[T]) -> T {
    let i_zero = pars[I_ZERO];
    let rg = pars[RG];
    let u = pars[POLYDISPERSITY] - T::ONE;

    if u <= T::ZERO {
        // monodisperse limit
        return i_zero * debye(square(q * rg));
    }

    let z = square(q * rg) / (T::ONE + lit::<T>(2.0) * u);
    if z < lit(Z_CUTOFF) {
        // 1 − (1+2u)z/3 + (1+5u+6u²)z²/12 − (1+9u+26u²+24u³)z³/60
        let c1 = -(T::ONE + lit::<T>(2.0) * u) / lit(3.0);
        let c2 = (T::ONE + u * (lit::<T>(5.0) + u * lit(6.0))) / lit(12.0);
        let c3 = -(T::ONE + u * (lit::<T>(9.0) + u * (lit::<T>(26.0) + u * lit(24.0)))) / lit(60.0);
        i_zero * (T::ONE + z * (c1 + z * (c2 + z * c3)))
    } else {
        let numerator = (T::ONE + u * z).powf(-T::ONE / u) + z - T::ONE;
        i_zero * lit::<T>(2.0) * numerator / ((T::ONE + u) * z * z)
    }
}

fn random(rng: &mut StdRng) -> Vec<(&'static str, f64)> {
    vec![
        ("i_zero", 10.0f64.powf(rng.gen_range(1.0..3.0))),
        ("rg", 10.0f64.powf(rng.gen_range(0.0..4.0))),
        ("polydispersity", 10.0f64.powf(rng.gen_range(0.0..0.3))),
    ]
}

static CHECKS: &[ModelCheck] = &[
    ModelCheck {
        pars: &[("background", 0.0)],
        input: CheckInput::Q1d(0.0106939),
        expected: 5.7640491870e+01,
    },
    ModelCheck {
        pars: &[("background", 0.0)],
        input: CheckInput::Q1d(0.02),
        expected: 4.0000000000e+01,
    },
    ModelCheck {
        pars: &[("background", 0.0)],
        input: CheckInput::Q1d(0.469418),
        expected: 1.6901584196e-01,
    },
    // Taylor branch
    ModelCheck {
        pars: &[("background", 0.0)],
        input: CheckInput::Q1d(1.0e-4),
        expected: 6.9998687525e+01,
    },
];

pub fn model() -> ModelDef {
    ModelDef {
        info: ModelInfo {
            id: "poly_gauss_coil",
            title: "Scattering from polydisperse polymer coils",
            description: "I(q) = I_zero * 2[(1+uz)^(-1/u) + z - 1]/[(1+u)z^2] \
                          with u = polydispersity - 1 and z = (q Rg)^2/(1+2u); \
                          the monodisperse limit is the Debye function.",
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
                Parameter {
                    id: "polydispersity",
                    units: "None",
                    default: 2.0,
                    limits: (1.0, f64::INFINITY),
                    kind: ParamKind::Nil,
                    description: "Polydispersity ratio (Mw/Mn)",
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

    const PARS: [f64; 3] = [70.0, 75.0, 2.0];

    #[test]
    fn test_reference_values() {
        assert!((iq(0.0106939, &PARS) - 57.640491870).abs() / 57.64 < 1e-9);
        assert!((iq(0.469418, &PARS) - 0.16901584196).abs() / 0.169 < 1e-9);
    }

    #[test]
    fn test_exact_value_at_z_three_quarters() {
        // q=0.02, Rg=75, PD=2 gives z=3/4 and I = 4/7·I₀ exactly
        let v = iq(0.02, &PARS);
        assert!((v - 40.0).abs() < 1e-10, "I = {v}");
    }

    #[test]
    fn test_q_zero_is_i_zero() {
        assert!((iq(0.0, &PARS) - 70.0).abs() < 1e-12);
        let mono = [70.0, 75.0, 1.0];
        assert!((iq(0.0, &mono) - 70.0).abs() < 1e-12);
    }

    #[test]
    fn test_taylor_branch_matches_direct() {
        // z just above/below the cutoff agree to f64 roundoff
        let rg = 75.0f64;
        let u = 1.0f64;
        let z_to_q = |z: f64| (z * (1.0 + 2.0 * u)).sqrt() / rg;
        let lo = iq(z_to_q(0.999e-3), &PARS);
        let hi = iq(z_to_q(1.001e-3), &PARS);
        assert!((lo - hi).abs() / lo < 1e-7, "branch mismatch {lo} vs {hi}");
    }

    #[test]
    fn test_monodisperse_limit_is_debye() {
        let pars = [70.0, 75.0, 1.0];
        let q = 0.01f64;
        let z: f64 = (q * 75.0) * (q * 75.0);
        let expect = 70.0 * 2.0 * ((-z).exp_m1() + z) / (z * z);
        assert!((iq(q, &pars) - expect).abs() / expect < 1e-12);
    }

    #[test]
    fn test_monotone_decreasing() {
        let mut prev = f64::INFINITY;
        for i in 0..200 {
            let q = 1e-4 + (0.5 - 1e-4) * (i as f64) / 199.0;
            let v = iq(q, &PARS);
            assert!(v < prev, "not monotone at q={q}");
            prev = v;
        }
    }

    #[test]
    fn test_f32_agrees_at_mid_q() {
        // away from the cancellation region both precisions agree well
        let pars32 = [70.0f32, 75.0, 2.0];
        let d = iq(0.05f64, &PARS);
        let s = iq(0.05f32, &pars32) as f64;
        assert!((d - s).abs() / d < 1e-5, "{d} vs {s}");
    }
}
