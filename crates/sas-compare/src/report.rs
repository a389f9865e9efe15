// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Batch Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CSV output for batch comparisons.
//!
//! One row per random parameter set. A set passes when its maximum
//! relative error stays under the precision tolerance of the base engine.

use crate::engine::Precision;
use crate::stats::ErrorStats;
use std::io::{self, Write};

pub const CSV_HEADER: &str =
    "set,seed,base_ms,comp_ms,max_abs_err,max_rel_err,p98_rel_err,rms_rel_err,status";

/// Pass tolerance on max relative error per base precision.
pub fn tolerance(precision: Precision) -> f64 {
    match precision {
        Precision::Single => 5.0e-3,
        Precision::Double => 5.0e-5,
    }
}

/// One CSV row of a batch run.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub set: usize,
    pub seed: u64,
    pub base_ms: f64,
    pub comp_ms: f64,
    pub max_abs: f64,
    pub max_rel: f64,
    pub p98_rel: f64,
    pub rms_rel: f64,
    pub ok: bool,
}

impl BatchRow {
    /// Build from the per-set error statistics.
    pub fn new(
        set: usize,
        seed: u64,
        base_ms: f64,
        comp_ms: f64,
        resid: &ErrorStats,
        relerr: &ErrorStats,
        precision: Precision,
    ) -> Self {
        BatchRow {
            set,
            seed,
            base_ms,
            comp_ms,
            max_abs: resid.max,
            max_rel: relerr.max,
            p98_rel: relerr.p98,
            rms_rel: relerr.rms,
            ok: relerr.max <= tolerance(precision),
        }
    }
}

/// Accumulated rows of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn push(&mut self, row: BatchRow) {
        self.rows.push(row);
    }

    pub fn passed(&self) -> usize {
        self.rows.iter().filter(|r| r.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.rows.len() - self.passed()
    }

    pub fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        for r in &self.rows {
            writeln!(
                out,
                "{},{},{:.3},{:.3},{:.6e},{:.6e},{:.6e},{:.6e},{}",
                r.set,
                r.seed,
                r.base_ms,
                r.comp_ms,
                r.max_abs,
                r.max_rel,
                r.p98_rel,
                r.rms_rel,
                if r.ok { "OK" } else { "FAIL" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stats(values: &[f64]) -> ErrorStats {
        ErrorStats::from_errors(&array![values[0], values[1]]).unwrap()
    }

    #[test]
    fn test_tolerances() {
        assert_eq!(tolerance(Precision::Single), 5.0e-3);
        assert_eq!(tolerance(Precision::Double), 5.0e-5);
    }

    #[test]
    fn test_row_pass_fail() {
        let resid = stats(&[1.0e-6, 2.0e-6]);
        let ok_rel = stats(&[1.0e-4, 2.0e-4]);
        let row = BatchRow::new(0, 27, 1.0, 2.0, &resid, &ok_rel, Precision::Single);
        assert!(row.ok);
        let bad_rel = stats(&[1.0e-2, 2.0e-2]);
        let row = BatchRow::new(1, 27, 1.0, 2.0, &resid, &bad_rel, Precision::Single);
        assert!(!row.ok);
    }

    #[test]
    fn test_csv_shape() {
        let resid = stats(&[1.0e-6, 2.0e-6]);
        let relerr = stats(&[1.0e-4, 2.0e-4]);
        let mut report = BatchReport::default();
        report.push(BatchRow::new(0, 27, 1.0, 2.0, &resid, &relerr, Precision::Double));
        report.push(BatchRow::new(1, 27, 1.0, 2.0, &resid, &relerr, Precision::Double));

        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());
        assert!(lines[1].starts_with("0,27,"));
        assert!(lines[1].ends_with(",FAIL"));
        assert_eq!(report.passed(), 0);
        assert_eq!(report.failed(), 2);
    }
}
