// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Parallelepiped
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rectangular parallelepiped with uniform scattering length density.
//!
//! 1-D intensity is the orientation average of Mittelbach & Porod,
//! evaluated as a nested 76-point Gauss–Legendre integral over [0, 1]²
//! with sides scaled by B. Oriented 2-D intensity is the product of the
//! three sinc amplitudes in the particle frame.

use crate::info::{CheckInput, ModelCheck, ModelDef, ModelInfo};
use rand::rngs::StdRng;
use rand::Rng;
use sas_math::orient::orient_asymmetric;
use sas_math::quadrature::{GAUSS76_W, GAUSS76_Z};
use sas_math::real::{lit, Real};
use sas_math::special::{sas_sinx_x, square};
use sas_types::params::{ParamKind, Parameter};

pub const SLD: usize = 0;
pub const SLD_SOLVENT: usize = 1;
pub const LENGTH_A: usize = 2;
pub const LENGTH_B: usize = 3;
pub const LENGTH_C: usize = 4;
pub const THETA: usize = 5;
pub const PHI: usize = 6;
pub const PSI: usize = 7;

pub fn form_volume<T: Real>(pars: &[T]) -> T {
    pars[LENGTH_A] * pars[LENGTH_B] * pars[LENGTH_C]
}

pub fn iq<T: Real>(q: T, pars: &[T]) -> T {
    let half = lit::<T>(0.5);
    let mu = half * q * pars[LENGTH_B];
    let a_scaled = pars[LENGTH_A] / pars[LENGTH_B];
    let c_scaled = pars[LENGTH_C] / pars[LENGTH_B];

    let mut outer = T::ZERO;
    for i in 0..76 {
        let sigma = half * (lit::<T>(GAUSS76_Z[i]) + T::ONE);
        let mu_proj = mu * (T::ONE - sigma * sigma).sqrt();

        // inner integral over the rotation about the long axis
        let mut inner = T::ZERO;
        for j in 0..76 {
            let uu = half * (lit::<T>(GAUSS76_Z[j]) + T::ONE);
            let (sin_uu, cos_uu) = (lit::<T>(0.5 * std::f64::consts::PI) * uu).sin_cos();
            let si1 = sas_sinx_x(mu_proj * sin_uu * a_scaled);
            let si2 = sas_sinx_x(mu_proj * cos_uu);
            inner = inner + lit::<T>(GAUSS76_W[j]) * square(si1 * si2);
        }
        inner = inner * half;

        let si = sas_sinx_x(mu * c_scaled * sigma);
        outer = outer + lit::<T>(GAUSS76_W[i]) * inner * si * si;
    }
    outer = outer * half;

    let drho = pars[SLD] - pars[SLD_SOLVENT];
    lit::<T>(1.0e-4) * square(drho * form_volume(pars)) * outer
}

pub fn iqxy<T: Real>(qx: T, qy: T, pars: &[T]) -> T {
    let frame = orient_asymmetric(qx, qy, pars[THETA], pars[PHI], pars[PSI]);
    let half = lit::<T>(0.5);
    let si_a = sas_sinx_x(half * pars[LENGTH_A] * frame.q * frame.xhat);
    let si_b = sas_sinx_x(half * pars[LENGTH_B] * frame.q * frame.yhat);
    let si_c = sas_sinx_x(half * pars[LENGTH_C] * frame.q * frame.zhat);
    let drho = pars[SLD] - pars[SLD_SOLVENT];
    let form = form_volume(pars) * drho * si_a * si_b * si_c;
    lit::<T>(1.0e-4) * square(form)
}

fn random(rng: &mut StdRng) -> Vec<(&'static str, f64)> {
    vec![
        ("length_a", 10.0f64.powf(rng.gen_range(1.0..4.7))),
        ("length_b", 10.0f64.powf(rng.gen_range(1.0..4.7))),
        ("length_c", 10.0f64.powf(rng.gen_range(1.0..4.7))),
    ]
}

// 2-D check point: |q| = 0.2 at 30° on the detector
const QX: f64 = 0.17320508075688773;
const QY: f64 = 0.1;

static CHECKS: &[ModelCheck] = &[
    ModelCheck {
        pars: &[],
        input: CheckInput::Q1d(0.2),
        expected: 1.7758004974e-01,
    },
    ModelCheck {
        pars: &[("theta", 10.0), ("phi", 20.0)],
        input: CheckInput::Q2d(QX, QY),
        expected: 8.9517140475e-03,
    },
];

pub fn model() -> ModelDef {
    ModelDef {
        info: ModelInfo {
            id: "parallelepiped",
            title: "Rectangular parallelepiped with uniform scattering length density",
            description: "I(q) = scale/V * (sld - sld_solvent)^2 * V^2 * P(q) * 1e-4 \
                          + background, with P(q) the orientation average of the \
                          squared sinc product over the three edges.",
            category: "shape:parallelepiped",
            parameters: vec![
                Parameter {
                    id: "sld",
                    units: "1e-6/Ang^2",
                    default: 4.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Parallelepiped scattering length density",
                },
                Parameter {
                    id: "sld_solvent",
                    units: "1e-6/Ang^2",
                    default: 1.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "Solvent scattering length density",
                },
                Parameter {
                    id: "length_a",
                    units: "Ang",
                    default: 35.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Volume,
                    description: "Shorter side of the parallelepiped",
                },
                Parameter {
                    id: "length_b",
                    units: "Ang",
                    default: 75.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Volume,
                    description: "Second side of the parallelepiped",
                },
                Parameter {
                    id: "length_c",
                    units: "Ang",
                    default: 400.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Volume,
                    description: "Larger side of the parallelepiped",
                },
                Parameter {
                    id: "theta",
                    units: "degrees",
                    default: 60.0,
                    limits: (-360.0, 360.0),
                    kind: ParamKind::Orientation,
                    description: "c axis to beam angle",
                },
                Parameter {
                    id: "phi",
                    units: "degrees",
                    default: 60.0,
                    limits: (-360.0, 360.0),
                    kind: ParamKind::Orientation,
                    description: "rotation about beam",
                },
                Parameter {
                    id: "psi",
                    units: "degrees",
                    default: 60.0,
                    limits: (-360.0, 360.0),
                    kind: ParamKind::Orientation,
                    description: "rotation about c axis",
                },
            ],
        },
        iq32: iq::<f32>,
        iq64: iq::<f64>,
        iqxy32: Some(iqxy::<f32>),
        iqxy64: Some(iqxy::<f64>),
        form_volume: Some(form_volume::<f64>),
        random: Some(random),
        constrain: None,
        checks: CHECKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // sld, sld_solvent, a, b, c, theta, phi, psi
    const PARS: [f64; 8] = [4.0, 1.0, 35.0, 75.0, 400.0, 60.0, 60.0, 60.0];

    #[test]
    fn test_reference_1d() {
        let v = 35.0 * 75.0 * 400.0;
        let i = iq(0.2, &PARS) / v + 0.001;
        assert!((i - 0.17758004974).abs() / 0.1776 < 1e-9, "I = {i}");
    }

    #[test]
    fn test_reference_2d_oriented() {
        let mut pars = PARS;
        pars[THETA] = 10.0;
        pars[PHI] = 20.0;
        let v = 35.0 * 75.0 * 400.0;
        let i = iqxy(QX, QY, &pars) / v + 0.001;
        assert!((i - 0.0089517140475).abs() / 0.00895 < 1e-9, "I = {i}");
    }

    #[test]
    fn test_kernel_midq() {
        assert!((iq(0.1, &PARS) - 7.5698417911e6).abs() / 7.57e6 < 1e-9);
    }

    #[test]
    fn test_forward_scattering() {
        // q→0: P→1, kernel → 1e-4 (drho V)^2
        let v = form_volume(&PARS);
        let expect = 1.0e-4 * (3.0 * v) * (3.0 * v);
        let got = iq(1.0e-8, &PARS);
        assert!((got - expect).abs() / expect < 1e-9, "{got} vs {expect}");
    }

    #[test]
    fn test_cube_edge_symmetry() {
        // for a cube the 1-D average is invariant under edge relabeling
        let cube = [4.0, 1.0, 100.0, 100.0, 100.0, 0.0, 0.0, 0.0];
        let swapped = [4.0, 1.0, 100.0, 100.0, 100.0, 0.0, 0.0, 0.0];
        assert_eq!(iq(0.05, &cube), iq(0.05, &swapped));
        // and an elongated block: swapping a and c changes only the
        // internal scaling, not the average
        let abc = [4.0, 1.0, 35.0, 75.0, 400.0, 0.0, 0.0, 0.0];
        let cba = [4.0, 1.0, 400.0, 75.0, 35.0, 0.0, 0.0, 0.0];
        let x = iq(0.02, &abc);
        let y = iq(0.02, &cba);
        assert!((x - y).abs() / x < 1e-6, "{x} vs {y}");
    }

    #[test]
    fn test_f32_kernel_agrees() {
        let pars32: [f32; 8] = [4.0, 1.0, 35.0, 75.0, 400.0, 60.0, 60.0, 60.0];
        let d = iq(0.05f64, &PARS);
        let s = iq(0.05f32, &pars32) as f64;
        assert!((d - s).abs() / d < 1e-3, "{d} vs {s}");
    }
}
