// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Polydispersity
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaussian size/orientation distributions for dispersible parameters.
//!
//! Volume parameters disperse with relative width (σ = pd·value),
//! orientation parameters with absolute width in degrees. Weights are
//! normalized to sum to 1 per parameter; the engine multiplies weights
//! across parameters and applies its cutoff to the product.

use sas_types::params::{ParamKind, PdSpec};

/// One quadrature point of a dispersed parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdPoint {
    pub value: f64,
    pub weight: f64,
}

/// Gaussian weights for one parameter over ±nsigma.
///
/// Non-positive values are dropped for volume parameters; an inactive or
/// degenerate spec collapses to the single center point with weight 1.
pub fn gaussian_weights(center: f64, spec: PdSpec, kind: ParamKind) -> Vec<PdPoint> {
    let sigma = match kind {
        ParamKind::Volume => spec.width * center,
        _ => spec.width,
    };
    if !spec.active() || sigma <= 0.0 || spec.npts < 2 {
        return vec![PdPoint {
            value: center,
            weight: 1.0,
        }];
    }

    let n = spec.npts;
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let t = -spec.nsigma + 2.0 * spec.nsigma * (i as f64) / ((n - 1) as f64);
        let value = center + sigma * t;
        if kind == ParamKind::Volume && value <= 0.0 {
            continue;
        }
        points.push(PdPoint {
            value,
            weight: (-0.5 * t * t).exp(),
        });
    }
    let total: f64 = points.iter().map(|p| p.weight).sum();
    if total > 0.0 {
        for p in &mut points {
            p.weight /= total;
        }
    }
    points
}
