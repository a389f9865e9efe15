// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Property-Based Tests (proptest) for sas-models
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the model kernels.
//!
//! Covers: positivity and finiteness over physical parameter ranges,
//! monodisperse limits, forward-scattering bounds, weight normalization.

use proptest::prelude::*;
use sas_models::polydispersity::gaussian_weights;
use sas_models::{mono_gauss_coil, poly_gauss_coil, sphere};
use sas_types::params::{ParamKind, PdSpec};

proptest! {
    /// Coil intensity is finite, positive and bounded by I₀ everywhere.
    #[test]
    fn poly_gauss_coil_bounded(
        q in 0.0f64..2.0,
        rg in 1.0f64..5000.0,
        pd in 1.0f64..10.0,
    ) {
        let pars = [70.0, rg, pd];
        let v = poly_gauss_coil::iq(q, &pars);
        prop_assert!(v.is_finite(), "I({q}) not finite");
        prop_assert!(v >= 0.0);
        prop_assert!(v <= 70.0 * (1.0 + 1e-12), "I({q}) = {v} exceeds I0");
    }

    /// PD = 1 agrees with the monodisperse kernel for any geometry.
    #[test]
    fn poly_reduces_to_mono(
        q in 0.0f64..1.0,
        rg in 1.0f64..2000.0,
    ) {
        let poly = [70.0, rg, 1.0];
        let mono = [70.0, rg];
        let a = poly_gauss_coil::iq(q, &poly);
        let b = mono_gauss_coil::iq(q, &mono);
        prop_assert!((a - b).abs() <= 1e-10 * b.max(1e-300),
            "q={}, rg={}: {} vs {}", q, rg, a, b);
    }

    /// Coil intensity is non-increasing in q for any geometry.
    #[test]
    fn poly_monotone_in_q(
        rg in 1.0f64..5000.0,
        pd in 1.0f64..10.0,
        q1 in 0.0f64..2.0,
        dq in 1.0e-6f64..0.5,
    ) {
        let pars = [70.0, rg, pd];
        let a = poly_gauss_coil::iq(q1, &pars);
        let b = poly_gauss_coil::iq(q1 + dq, &pars);
        prop_assert!(b <= a * (1.0 + 1e-10),
            "I({}) = {} < I({}) = {}", q1, a, q1 + dq, b);
    }

    /// Sphere kernel is nonnegative and finite for physical inputs.
    #[test]
    fn sphere_kernel_physical(
        q in 0.0f64..1.0,
        radius in 1.0f64..10000.0,
        sld in -2.0f64..10.0,
    ) {
        let pars = [sld, 6.0, radius];
        let v = sphere::iq(q, &pars);
        prop_assert!(v.is_finite());
        prop_assert!(v >= 0.0);
    }

    /// Gaussian weights always normalize to 1 and keep values positive
    /// for volume parameters.
    #[test]
    fn pd_weights_normalized(
        center in 0.1f64..1000.0,
        width in 0.0f64..1.0,
        npts in 1usize..80,
        nsigma in 0.5f64..5.0,
    ) {
        let pts = gaussian_weights(
            center,
            PdSpec { width, npts, nsigma },
            ParamKind::Volume,
        );
        prop_assert!(!pts.is_empty());
        let total: f64 = pts.iter().map(|p| p.weight).sum();
        prop_assert!((total - 1.0).abs() < 1e-10, "sum = {}", total);
        prop_assert!(pts.iter().all(|p| p.value > 0.0));
    }
}
