// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Data Grids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Synthetic measurement grids for model evaluation.
//!
//! 1-D data is a q vector with optional resolution widths dq = res·q;
//! 2-D data is a square detector grid with a central beam-stop mask.

use ndarray::Array1;

/// Default number of q points.
pub const DEFAULT_NQ: usize = 128;

/// Beam-stop radius for 2-D grids [1/Ang].
pub const BEAM_STOP_RADIUS: f64 = 4.0e-4;

/// Preset maximum-q ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QRange {
    /// q up to 0.05 1/Ang.
    #[default]
    Low,
    /// q up to 0.2 1/Ang.
    Mid,
    /// q up to 1.0 1/Ang.
    High,
    /// q up to 10.0 1/Ang.
    Ex,
}

impl QRange {
    pub fn qmax(self) -> f64 {
        match self {
            QRange::Low => 0.05,
            QRange::Mid => 0.2,
            QRange::High => 1.0,
            QRange::Ex => 10.0,
        }
    }
}

/// One-dimensional synthetic data: q points and optional dq widths.
#[derive(Debug, Clone)]
pub struct Data1D {
    pub q: Array1<f64>,
    pub dq: Option<Array1<f64>>,
}

impl Data1D {
    /// Linearly spaced q in [0.001·qmax, qmax].
    pub fn linear(qmax: f64, nq: usize, res: f64) -> Self {
        let q = Array1::linspace(0.001 * qmax, qmax, nq);
        Self::with_resolution(q, res)
    }

    /// Log-spaced q covering three decades up to qmax.
    pub fn log(qmax: f64, nq: usize, res: f64) -> Self {
        let hi = qmax.log10();
        let q = Array1::logspace(10.0, hi - 3.0, hi, nq);
        Self::with_resolution(q, res)
    }

    fn with_resolution(q: Array1<f64>, res: f64) -> Self {
        let dq = (res > 0.0).then(|| q.mapv(|qi| res * qi));
        Data1D { q, dq }
    }

    /// Prepend the q = 0 point (dq = 0 there).
    pub fn with_zero(self) -> Self {
        let mut q = Vec::with_capacity(self.q.len() + 1);
        q.push(0.0);
        q.extend(self.q.iter().copied());
        let dq = self.dq.map(|dq| {
            let mut v = Vec::with_capacity(dq.len() + 1);
            v.push(0.0);
            v.extend(dq.iter().copied());
            Array1::from_vec(v)
        });
        Data1D {
            q: Array1::from_vec(q),
            dq,
        }
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

/// Two-dimensional synthetic data: flattened square detector grid.
///
/// `mask[i]` true means the point is excluded (beam stop).
#[derive(Debug, Clone)]
pub struct Data2D {
    pub qx: Array1<f64>,
    pub qy: Array1<f64>,
    pub mask: Vec<bool>,
    /// Grid edge length (the grid holds nq × nq points).
    pub nq: usize,
}

impl Data2D {
    /// Square grid with qx, qy in [-qmax, qmax], beam stop applied.
    pub fn square(qmax: f64, nq: usize) -> Self {
        let axis = Array1::linspace(-qmax, qmax, nq);
        let n = nq * nq;
        let mut qx = Vec::with_capacity(n);
        let mut qy = Vec::with_capacity(n);
        for iy in 0..nq {
            for ix in 0..nq {
                qx.push(axis[ix]);
                qy.push(axis[iy]);
            }
        }
        let mask = qx
            .iter()
            .zip(&qy)
            .map(|(&x, &y)| x.hypot(y) < BEAM_STOP_RADIUS)
            .collect();
        Data2D {
            qx: Array1::from_vec(qx),
            qy: Array1::from_vec(qy),
            mask,
            nq,
        }
    }

    pub fn len(&self) -> usize {
        self.qx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qx.is_empty()
    }
}
