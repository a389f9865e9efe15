// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Orientation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Detector-plane to particle-frame rotation for oriented 2-D kernels.

use crate::real::Real;

/// Direction cosines of the scattering vector in the particle frame.
#[derive(Debug, Clone, Copy)]
pub struct QabcFrame<T> {
    /// |q|.
    pub q: T,
    /// q̂ · â
    pub xhat: T,
    /// q̂ · b̂
    pub yhat: T,
    /// q̂ · ĉ
    pub zhat: T,
}

/// Rotate (qx, qy) into the frame of a fully asymmetric particle.
///
/// θ tilts the c axis away from the beam, φ rotates about the beam, ψ
/// rotates about the particle's own c axis; all angles in degrees.
pub fn orient_asymmetric<T: Real>(qx: T, qy: T, theta: T, phi: T, psi: T) -> QabcFrame<T> {
    let q = qx.hypot(qy);
    let (qxhat, qyhat) = if q == T::ZERO {
        (T::ZERO, T::ZERO)
    } else {
        (qx / q, qy / q)
    };

    let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
    let (sin_phi, cos_phi) = phi.to_radians().sin_cos();
    let (sin_psi, cos_psi) = psi.to_radians().sin_cos();

    let xhat = qxhat * (-sin_phi * sin_psi + cos_theta * cos_phi * cos_psi)
        + qyhat * (cos_phi * sin_psi + cos_theta * sin_phi * cos_psi);
    let yhat = qxhat * (-sin_phi * cos_psi - cos_theta * cos_phi * sin_psi)
        + qyhat * (cos_phi * cos_psi - cos_theta * sin_phi * sin_psi);
    let zhat = qxhat * (-sin_theta * cos_phi) + qyhat * (-sin_theta * sin_phi);

    QabcFrame { q, xhat, yhat, zhat }
}
