// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Error Statistics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Summary statistics over engine residuals.
//!
//! Non-finite values (masked detector points, overflowed kernels) are
//! dropped before the statistics and reported as an invalid count.

use ndarray::Array1;
use std::fmt;

/// Summary of |err| over the valid points.
#[derive(Debug, Clone, Copy)]
pub struct ErrorStats {
    pub max: f64,
    pub median: f64,
    pub p98: f64,
    pub rms: f64,
    /// Mean of |err|.
    pub zero_offset: f64,
    pub n_valid: usize,
    pub n_invalid: usize,
}

impl ErrorStats {
    /// Build from raw (signed) errors; returns None when nothing is valid.
    pub fn from_errors(err: &Array1<f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = err
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| v.abs())
            .collect();
        let n_invalid = err.len() - sorted.len();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let p50 = (n - 1) / 2;
        let p98 = (n - 1) * 98 / 100;
        let rms = (sorted.iter().map(|e| e * e).sum::<f64>() / n as f64).sqrt();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        Some(ErrorStats {
            max: sorted[n - 1],
            median: sorted[p50],
            p98: sorted[p98],
            rms,
            zero_offset: mean,
            n_valid: n,
            n_invalid,
        })
    }
}

impl fmt::Display for ErrorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max:{:.3e}  median:{:.3e}  98%:{:.3e}  rms:{:.3e}  zero-offset:{:+.3e}",
            self.max, self.median, self.p98, self.rms, self.zero_offset
        )
    }
}

/// Signed residual base − comp.
pub fn residual(base: &Array1<f64>, comp: &Array1<f64>) -> Array1<f64> {
    base - comp
}

/// Relative error resid/|comp|, with a unit denominator where comp = 0.
pub fn relative_error(resid: &Array1<f64>, comp: &Array1<f64>) -> Array1<f64> {
    let mut out = resid.clone();
    for (r, &c) in out.iter_mut().zip(comp.iter()) {
        let denom = if c != 0.0 { c.abs() } else { 1.0 };
        *r /= denom;
    }
    out
}
