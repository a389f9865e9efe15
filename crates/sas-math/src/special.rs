// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Special Functions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scattering special functions.
//!
//! Small-argument branches guard the cancellation-prone expressions so the
//! f32 monomorphizations stay usable across the full q range.

use crate::real::{lit, Real};

/// sin(x)/x with the limit value 1 at x = 0.
#[inline]
pub fn sas_sinx_x<T: Real>(x: T) -> T {
    if x == T::ZERO {
        T::ONE
    } else {
        x.sin() / x
    }
}

/// Spherical form-factor amplitude 3·j1(x)/x = 3(sin x − x cos x)/x³.
///
/// Below |x| = 0.1 the direct expression loses all precision in f32, so a
/// Taylor branch takes over: 1 − x²/10 + x⁴/280.
pub fn sas_3j1x_x<T: Real>(x: T) -> T {
    let ax = x.abs();
    if ax < lit(0.1) {
        let x2 = x * x;
        T::ONE - x2 / lit(10.0) * (T::ONE - x2 / lit(28.0))
    } else {
        let (s, c) = x.sin_cos();
        lit::<T>(3.0) * (s - x * c) / (x * x * x)
    }
}

/// Debye function 2(e^{−z} + z − 1)/z² with the limit value 1 at z = 0.
///
/// Gaussian-chain form factor with z = (q·Rg)². Uses expm1 plus a Taylor
/// branch below z = 1e-3: 1 − z/3 + z²/12 − z³/60.
pub fn debye<T: Real>(z: T) -> T {
    if z < lit(1.0e-3) {
        T::ONE + z * (lit::<T>(-1.0 / 3.0) + z * (lit::<T>(1.0 / 12.0) + z * lit(-1.0 / 60.0)))
    } else {
        lit::<T>(2.0) * ((-z).exp_m1() + z) / (z * z)
    }
}

/// Gaussian-chain amplitude ψ(z) = (1 − e^{−z})/z with the limit 1 at z = 0.
pub fn chain_amplitude<T: Real>(z: T) -> T {
    if z == T::ZERO {
        T::ONE
    } else {
        -(-z).exp_m1() / z
    }
}

/// x².
#[inline]
pub fn square<T: Real>(x: T) -> T {
    x * x
}
