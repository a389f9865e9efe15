// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Comparison Runner
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Base-versus-comparison engine runs over a shared data grid.
//!
//! A run evaluates the base engine, optionally the comparison engine,
//! times both, and derives residual and relative-error vectors. The pair
//! may differ in model, precision, cutoff, or parameter values, which
//! are the same degrees of freedom the command line exposes.

use crate::engine::DirectModel;
use crate::stats::{relative_error, residual, ErrorStats};
use ndarray::Array1;
use sas_types::data::{Data1D, Data2D, QRange};
use sas_types::error::SasResult;
use sas_types::params::ParameterSet;
use std::time::Instant;

/// Data generation settings shared by both engines.
#[derive(Debug, Clone)]
pub struct DataSpec {
    pub qmax: f64,
    pub nq: usize,
    /// Log-spaced q (1-D only); linear otherwise.
    pub log_q: bool,
    /// Include the q = 0 point (1-D only).
    pub zero: bool,
    /// Relative resolution width dq/q.
    pub res: f64,
    pub two_d: bool,
}

impl Default for DataSpec {
    fn default() -> Self {
        DataSpec {
            qmax: QRange::Low.qmax(),
            nq: sas_types::data::DEFAULT_NQ,
            log_q: true,
            zero: false,
            res: 0.0,
            two_d: false,
        }
    }
}

/// Generated evaluation grid.
pub enum DataSet {
    One(Data1D),
    Two(Data2D),
}

impl DataSpec {
    pub fn build(&self) -> DataSet {
        if self.two_d {
            DataSet::Two(Data2D::square(self.qmax, self.nq))
        } else {
            let data = if self.log_q && !self.zero {
                Data1D::log(self.qmax, self.nq, self.res)
            } else {
                Data1D::linear(self.qmax, self.nq, self.res)
            };
            DataSet::One(if self.zero { data.with_zero() } else { data })
        }
    }
}

impl DataSet {
    pub fn len(&self) -> usize {
        match self {
            DataSet::One(d) => d.len(),
            DataSet::Two(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one base/comparison run.
pub struct Comparison {
    pub base_label: &'static str,
    pub comp_label: Option<&'static str>,
    pub base_value: Array1<f64>,
    pub comp_value: Option<Array1<f64>>,
    pub base_ms: f64,
    pub comp_ms: Option<f64>,
    pub resid: Option<Array1<f64>>,
    pub relerr: Option<Array1<f64>>,
}

impl Comparison {
    pub fn resid_stats(&self) -> Option<ErrorStats> {
        self.resid.as_ref().and_then(ErrorStats::from_errors)
    }

    pub fn relerr_stats(&self) -> Option<ErrorStats> {
        self.relerr.as_ref().and_then(ErrorStats::from_errors)
    }

    /// Human-readable summary, one line per engine plus error lines.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let sum: f64 = self.base_value.iter().filter(|v| v.is_finite()).sum();
        lines.push(format!(
            "{} t={:.2} ms, intensity={:.0}",
            self.base_label, self.base_ms, sum
        ));
        if let (Some(comp), Some(label), Some(ms)) =
            (&self.comp_value, self.comp_label, self.comp_ms)
        {
            let sum: f64 = comp.iter().filter(|v| v.is_finite()).sum();
            lines.push(format!("{label} t={ms:.2} ms, intensity={sum:.0}"));
        }
        if let (Some(label), Some(stats)) = (self.comp_label, self.resid_stats()) {
            lines.push(format!("|{}-{}|  {}", self.base_label, label, stats));
        }
        if let (Some(label), Some(stats)) = (self.comp_label, self.relerr_stats()) {
            lines.push(format!(
                "|({}-{})/{}|  {}",
                self.base_label, label, label, stats
            ));
        }
        lines
    }
}

/// Average evaluation time over `evals` runs, with a warm-up evaluation
/// (polydispersity suppressed) when more than one is requested.
pub fn time_calculation(
    engine: &DirectModel,
    pars: &ParameterSet,
    data: &DataSet,
    evals: usize,
) -> SasResult<(Array1<f64>, f64)> {
    let eval = |pars: &ParameterSet| -> SasResult<Array1<f64>> {
        match data {
            DataSet::One(d) => engine.eval1d(pars, d),
            DataSet::Two(d) => engine.eval2d(pars, d),
        }
    };

    if evals > 1 {
        let mut warm = pars.clone();
        crate::random::suppress_pd(&mut warm, true);
        eval(&warm)?;
    }
    let start = Instant::now();
    let mut value = eval(pars)?;
    for _ in 1..evals {
        value = eval(pars)?;
    }
    let average_ms = start.elapsed().as_secs_f64() * 1.0e3 / evals.max(1) as f64;
    Ok((value, average_ms))
}

/// Run base and optional comparison engines on the same grid.
pub fn run_models(
    base: &DirectModel,
    base_pars: &ParameterSet,
    comp: Option<(&DirectModel, &ParameterSet)>,
    data: &DataSet,
    neval: (usize, usize),
) -> SasResult<Comparison> {
    let (base_value, base_ms) = time_calculation(base, base_pars, data, neval.0)?;

    let mut result = Comparison {
        base_label: base.label(),
        comp_label: None,
        base_value,
        comp_value: None,
        base_ms,
        comp_ms: None,
        resid: None,
        relerr: None,
    };

    if let Some((comp_engine, comp_pars)) = comp {
        let (comp_value, comp_ms) = time_calculation(comp_engine, comp_pars, data, neval.1)?;
        let resid = residual(&result.base_value, &comp_value);
        let relerr = relative_error(&resid, &comp_value);
        result.comp_label = Some(comp_engine.label());
        result.comp_ms = Some(comp_ms);
        result.comp_value = Some(comp_value);
        result.resid = Some(resid);
        result.relerr = Some(relerr);
    }
    Ok(result)
}

/// Format a parameter set the way the comparison harness prints it.
pub fn parlist(info: &sas_models::info::ModelInfo, pars: &ParameterSet) -> String {
    let mut lines = Vec::new();
    for name in ["scale", "background"] {
        if let Some(v) = pars.get(name) {
            lines.push(format!("{name}: {v}"));
        }
    }
    for p in &info.parameters {
        let value = pars.value_or(p.id, p.default);
        let mut line = format!("{}: {}", p.id, value);
        if p.polydisperse() {
            let pd = pars.pd(p.id);
            if pd.active() {
                let width = if p.kind == sas_types::params::ParamKind::Volume {
                    pd.width * value
                } else {
                    pd.width
                };
                line += &format!(
                    " +/- {} ({} points in [-{},{}] sigma gaussian)",
                    width, pd.npts, pd.nsigma, pd.nsigma
                );
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DirectModel, Precision, DEFAULT_CUTOFF};
    use sas_models::registry::lookup;

    #[test]
    fn test_identical_engines_agree_exactly() {
        let model = lookup("sphere").unwrap();
        let base = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let comp = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let data = DataSpec::default().build();
        let result = run_models(&base, &pars, Some((&comp, &pars)), &data, (1, 1)).unwrap();
        let stats = result.relerr_stats().unwrap();
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.n_invalid, 0);
    }

    #[test]
    fn test_single_vs_double_sphere_small_error() {
        let model = lookup("sphere").unwrap();
        let base = DirectModel::new(&model, Precision::Single, DEFAULT_CUTOFF);
        let comp = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let data = DataSpec::default().build();
        let result = run_models(&base, &pars, Some((&comp, &pars)), &data, (1, 1)).unwrap();
        let stats = result.relerr_stats().unwrap();
        assert!(stats.max > 0.0, "f32 and f64 cannot agree to the last bit");
        assert!(stats.max < 1.0e-3, "sphere is single-precision safe: {stats}");
    }

    #[test]
    fn test_coil_low_q_single_precision_trouble() {
        // the low-q cancellation region is exactly why this model is
        // precision-compared; the relative error must dwarf the sphere's
        let model = lookup("poly_gauss_coil").unwrap();
        let base = DirectModel::new(&model, Precision::Single, DEFAULT_CUTOFF);
        let comp = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let mut pars = model.info.defaults();
        pars.set("background", 0.0);
        let spec = DataSpec {
            qmax: 0.05,
            nq: 128,
            log_q: true,
            ..DataSpec::default()
        };
        let result =
            run_models(&base, &pars, Some((&comp, &pars)), &spec.build(), (1, 1)).unwrap();
        let stats = result.relerr_stats().unwrap();
        assert!(stats.max > 1.0e-5, "expected visible f32 error: {stats}");
    }

    #[test]
    fn test_comparison_summary_lines() {
        let model = lookup("mono_gauss_coil").unwrap();
        let base = DirectModel::new(&model, Precision::Single, DEFAULT_CUTOFF);
        let comp = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let data = DataSpec::default().build();
        let result = run_models(&base, &pars, Some((&comp, &pars)), &data, (1, 1)).unwrap();
        let lines = result.summary();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("f32 t="));
        assert!(lines[1].starts_with("f64 t="));
        assert!(lines[2].starts_with("|f32-f64|"));
        assert!(lines[3].starts_with("|(f32-f64)/f64|"));
    }

    #[test]
    fn test_base_only_run() {
        let model = lookup("sphere").unwrap();
        let base = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let data = DataSpec::default().build();
        let result = run_models(&base, &pars, None, &data, (1, 1)).unwrap();
        assert!(result.comp_value.is_none());
        assert!(result.resid.is_none());
        assert_eq!(result.summary().len(), 1);
    }

    #[test]
    fn test_parlist_shows_pd() {
        let model = lookup("sphere").unwrap();
        let mut pars = model.info.defaults();
        pars.set("radius_pd", 0.1);
        pars.set("radius_pd_n", 35.0);
        let text = parlist(&model.info, &pars);
        assert!(text.contains("scale: 1"));
        assert!(text.contains("radius: 50 +/- 5 (35 points in [-3,3] sigma gaussian)"));
    }
}
