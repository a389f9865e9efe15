// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Model Info
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Model metadata and kernel entry points.
//!
//! A `ModelDef` couples the human-facing `ModelInfo` with the f32 and f64
//! monomorphizations of the kernel. Both entry points come from the same
//! generic source, so a precision comparison exercises identical code paths.

use rand::rngs::StdRng;
use sas_types::error::{SasError, SasResult};
use sas_types::params::{Parameter, ParameterSet};

pub type Iq32 = fn(f32, &[f32]) -> f32;
pub type Iq64 = fn(f64, &[f64]) -> f64;
pub type Iqxy32 = fn(f32, f32, &[f32]) -> f32;
pub type Iqxy64 = fn(f64, f64, &[f64]) -> f64;

/// Human-facing model description.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// Kernel parameters in call order (scale/background excluded).
    pub parameters: Vec<Parameter>,
}

impl ModelInfo {
    /// Full default parameter set, including scale/background and pd
    /// companions.
    pub fn defaults(&self) -> ParameterSet {
        ParameterSet::defaults(&self.parameters)
    }

    pub fn find(&self, id: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    /// Kernel parameter vector in table order.
    pub fn kernel_vector(&self, set: &ParameterSet) -> Vec<f64> {
        self.parameters
            .iter()
            .map(|p| set.value_or(p.id, p.default))
            .collect()
    }

    /// Reject names that are neither kernel parameters, common
    /// parameters, nor pd companions of dispersible parameters.
    pub fn validate_name(&self, name: &str) -> SasResult<()> {
        if name == "scale" || name == "background" {
            return Ok(());
        }
        let base = name
            .strip_suffix("_pd_nsigma")
            .or_else(|| name.strip_suffix("_pd_n"))
            .or_else(|| name.strip_suffix("_pd"));
        match base {
            Some(base) => {
                if self.find(base).map(|p| p.polydisperse()).unwrap_or(false) {
                    return Ok(());
                }
            }
            None => {
                if self.find(name).is_some() {
                    return Ok(());
                }
            }
        }
        let available = self
            .parameters
            .iter()
            .map(|p| p.id)
            .collect::<Vec<_>>()
            .join(", ");
        Err(SasError::UnknownParameter {
            model: self.id.to_string(),
            name: name.to_string(),
            available,
        })
    }
}

/// Input point of a reference check.
#[derive(Debug, Clone, Copy)]
pub enum CheckInput {
    Q1d(f64),
    Q2d(f64, f64),
}

/// One reference check: parameter overrides, input, expected intensity.
///
/// Expected values are full-model intensities (scale and background
/// applied) at double precision.
#[derive(Debug, Clone)]
pub struct ModelCheck {
    pub pars: &'static [(&'static str, f64)],
    pub input: CheckInput,
    pub expected: f64,
}

/// A registered model: metadata plus kernel entry points.
pub struct ModelDef {
    pub info: ModelInfo,
    pub iq32: Iq32,
    pub iq64: Iq64,
    /// Oriented 2-D kernels; radially symmetric models leave these unset
    /// and the engine evaluates `iq(|q|)`.
    pub iqxy32: Option<Iqxy32>,
    pub iqxy64: Option<Iqxy64>,
    /// Particle volume from the kernel vector; shape models only. Its
    /// presence switches on volume normalization in the engine.
    pub form_volume: Option<fn(&[f64]) -> f64>,
    /// Model-specific random parameter generator.
    pub random: Option<fn(&mut StdRng) -> Vec<(&'static str, f64)>>,
    /// Within-model constraints applied after randomization.
    pub constrain: Option<fn(&mut ParameterSet)>,
    pub checks: &'static [ModelCheck],
}

impl ModelDef {
    pub fn id(&self) -> &'static str {
        self.info.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sas_types::params::ParamKind;

    fn info() -> ModelInfo {
        ModelInfo {
            id: "demo",
            title: "demo",
            description: "demo",
            category: "shape:demo",
            parameters: vec![
                Parameter {
                    id: "radius",
                    units: "Ang",
                    default: 50.0,
                    limits: (0.0, f64::INFINITY),
                    kind: ParamKind::Volume,
                    description: "radius",
                },
                Parameter {
                    id: "sld",
                    units: "1e-6/Ang^2",
                    default: 1.0,
                    limits: (f64::NEG_INFINITY, f64::INFINITY),
                    kind: ParamKind::Sld,
                    description: "sld",
                },
            ],
        }
    }

    #[test]
    fn test_kernel_vector_order_and_overrides() {
        let info = info();
        let mut set = info.defaults();
        set.set("sld", 3.5);
        let v = info.kernel_vector(&set);
        assert_eq!(v, vec![50.0, 3.5]);
    }

    #[test]
    fn test_validate_name() {
        let info = info();
        assert!(info.validate_name("radius").is_ok());
        assert!(info.validate_name("scale").is_ok());
        assert!(info.validate_name("radius_pd").is_ok());
        assert!(info.validate_name("radius_pd_n").is_ok());
        // sld is not dispersible
        assert!(info.validate_name("sld_pd").is_err());
        assert!(info.validate_name("bogus").is_err());
    }
}
