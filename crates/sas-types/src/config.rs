// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Job Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Batch comparison jobs as JSON files.
//!
//! Every field except `model` has a default matching the CLI flags, so a
//! minimal job is `{"model": "poly_gauss_coil"}`.

use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};

/// A file-backed batch comparison job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub model: String,
    /// Number of q points.
    #[serde(default = "default_nq")]
    pub nq: usize,
    /// Maximum q [1/Ang].
    #[serde(default = "default_qmax")]
    pub qmax: f64,
    /// Include the q = 0 point.
    #[serde(default)]
    pub zero: bool,
    /// Number of random parameter sets.
    #[serde(default = "default_sets")]
    pub sets: usize,
    /// RNG seed; drawn from entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Engine pair, e.g. "single,double".
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Polydispersity weight cutoff.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    /// Suppress polydispersity in the random sets.
    #[serde(default = "default_mono")]
    pub mono: bool,
    /// Fixed parameter overrides applied after randomization.
    #[serde(default)]
    pub pars: ParameterSet,
    /// CSV output path; stdout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

fn default_nq() -> usize {
    crate::data::DEFAULT_NQ
}
fn default_qmax() -> f64 {
    crate::data::QRange::Low.qmax()
}
fn default_sets() -> usize {
    10
}
fn default_engine() -> String {
    "single,double".to_string()
}
fn default_cutoff() -> f64 {
    1.0e-5
}
fn default_mono() -> bool {
    true
}

impl JobConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::SasResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_job_gets_defaults() {
        let cfg: JobConfig = serde_json::from_str(r#"{"model": "poly_gauss_coil"}"#).unwrap();
        assert_eq!(cfg.model, "poly_gauss_coil");
        assert_eq!(cfg.nq, 128);
        assert!((cfg.qmax - 0.05).abs() < 1e-12);
        assert_eq!(cfg.sets, 10);
        assert_eq!(cfg.engine, "single,double");
        assert!((cfg.cutoff - 1e-5).abs() < 1e-18);
        assert!(cfg.mono);
        assert!(cfg.seed.is_none());
        assert!(cfg.output.is_none());
        assert!(cfg.pars.is_empty());
    }

    #[test]
    fn test_full_job_roundtrip() {
        let cfg: JobConfig = serde_json::from_str(
            r#"{
                "model": "parallelepiped",
                "nq": 256,
                "qmax": 0.2,
                "sets": 100,
                "seed": 27,
                "engine": "double",
                "mono": false,
                "pars": {"length_a": 40.0},
                "output": "report.csv"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(27));
        assert_eq!(cfg.pars.get("length_a"), Some(40.0));

        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: JobConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg2.model, cfg.model);
        assert_eq!(cfg2.sets, cfg.sets);
        assert_eq!(cfg2.output.as_deref(), Some("report.csv"));
    }
}
