// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parameter metadata and named parameter sets.
//!
//! Every model publishes a table of `Parameter` entries; a `ParameterSet`
//! holds concrete values for one evaluation, including the common
//! `scale`/`background` pair and the polydispersity companions
//! `<id>_pd`, `<id>_pd_n`, `<id>_pd_nsigma` of each dispersible parameter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default for the common `scale` parameter.
pub const SCALE_DEFAULT: f64 = 1.0;

/// Default for the common `background` parameter [1/cm].
pub const BACKGROUND_DEFAULT: f64 = 0.001;

/// Default number of sigmas covered by a polydispersity distribution.
pub const PD_NSIGMA_DEFAULT: f64 = 3.0;

/// Physical role of a model parameter.
///
/// Volume and orientation parameters may carry polydispersity; the
/// distinction also decides whether the distribution width is relative
/// (volume) or absolute in degrees (orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Dimensionless or otherwise unclassified.
    Nil,
    /// Scattering length density [1e-6/Ang^2].
    Sld,
    /// Length-like parameter entering the form volume [Ang].
    Volume,
    /// Euler angle [degrees].
    Orientation,
}

/// One row of a model's parameter table.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub id: &'static str,
    pub units: &'static str,
    pub default: f64,
    pub limits: (f64, f64),
    pub kind: ParamKind,
    pub description: &'static str,
}

impl Parameter {
    pub fn polydisperse(&self) -> bool {
        matches!(self.kind, ParamKind::Volume | ParamKind::Orientation)
    }
}

/// Polydispersity settings attached to one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdSpec {
    /// Distribution width: relative for volume, degrees for orientation.
    pub width: f64,
    /// Number of quadrature points (0 disables).
    pub npts: usize,
    /// Distribution support in sigmas.
    pub nsigma: f64,
}

impl PdSpec {
    pub fn active(&self) -> bool {
        self.width > 0.0 && self.npts > 0
    }
}

/// Named parameter values for one model evaluation.
///
/// Backed by a sorted map so iteration order (and therefore anything
/// derived from it, such as seeded randomization) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(BTreeMap<String, f64>);

impl ParameterSet {
    pub fn new() -> Self {
        ParameterSet(BTreeMap::new())
    }

    /// Build the full default set for a parameter table: `scale`,
    /// `background`, every tabled parameter, and zeroed polydispersity
    /// companions for the dispersible ones.
    pub fn defaults(parameters: &[Parameter]) -> Self {
        let mut set = ParameterSet::new();
        set.set("scale", SCALE_DEFAULT);
        set.set("background", BACKGROUND_DEFAULT);
        for p in parameters {
            set.set(p.id, p.default);
            if p.polydisperse() {
                set.set(format!("{}_pd", p.id), 0.0);
                set.set(format!("{}_pd_n", p.id), 0.0);
                set.set(format!("{}_pd_nsigma", p.id), PD_NSIGMA_DEFAULT);
            }
        }
        set
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn value_or(&self, name: &str, fallback: f64) -> f64 {
        self.get(name).unwrap_or(fallback)
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Polydispersity companions of `id`, with harness defaults where unset.
    pub fn pd(&self, id: &str) -> PdSpec {
        PdSpec {
            width: self.value_or(&format!("{id}_pd"), 0.0),
            npts: self.value_or(&format!("{id}_pd_n"), 0.0).max(0.0) as usize,
            nsigma: self.value_or(&format!("{id}_pd_nsigma"), PD_NSIGMA_DEFAULT),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        ParameterSet(iter.into_iter().collect())
    }
}
