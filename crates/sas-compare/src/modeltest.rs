// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Model Checks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Runner for the reference checks each model ships with.
//!
//! Checks go through the full engine (scale, background, normalization),
//! not the bare kernel, so they cover the same path a comparison uses.
//! Double precision always runs; single precision is opt-in with a
//! looser tolerance.

use crate::engine::{DirectModel, Precision, DEFAULT_CUTOFF};
use sas_models::info::{CheckInput, ModelDef};
use sas_types::error::{SasError, SasResult};

/// Relative tolerance per check precision.
pub fn check_tolerance(precision: Precision) -> f64 {
    match precision {
        Precision::Single => 5.0e-3,
        Precision::Double => 1.0e-5,
    }
}

/// Outcome of running one model's checks.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub model: String,
    pub passed: usize,
    pub failures: Vec<String>,
}

impl CheckReport {
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapse into an error when any check failed.
    pub fn into_result(self) -> SasResult<usize> {
        if self.ok() {
            Ok(self.passed)
        } else {
            Err(SasError::CheckFailure(format!(
                "{}: {}",
                self.model,
                self.failures.join("; ")
            )))
        }
    }
}

/// Run every reference check of `model`.
pub fn run_checks(model: &ModelDef, include_single: bool) -> SasResult<CheckReport> {
    let mut precisions = vec![Precision::Double];
    if include_single {
        precisions.push(Precision::Single);
    }

    let mut report = CheckReport {
        model: model.id().to_string(),
        passed: 0,
        failures: Vec::new(),
    };

    for precision in precisions {
        let engine = DirectModel::new(model, precision, DEFAULT_CUTOFF);
        let tol = check_tolerance(precision);
        for (index, check) in model.checks.iter().enumerate() {
            let mut pars = model.info.defaults();
            for &(name, value) in check.pars {
                model.info.validate_name(name)?;
                pars.set(name, value);
            }
            let actual = match check.input {
                CheckInput::Q1d(q) => engine.eval_q(&pars, q)?,
                CheckInput::Q2d(qx, qy) => engine.eval_qxy(&pars, qx, qy)?,
            };
            let scale = check.expected.abs().max(1.0e-300);
            let relerr = (actual - check.expected).abs() / scale;
            if relerr <= tol && actual.is_finite() {
                report.passed += 1;
            } else {
                report.failures.push(format!(
                    "check {index} [{}]: got {actual:.9e}, expected {:.9e} (rel {relerr:.1e})",
                    precision.label(),
                    check.expected
                ));
            }
        }
    }
    Ok(report)
}
