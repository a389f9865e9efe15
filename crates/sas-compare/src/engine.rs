// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Direct model evaluation at a chosen floating-point precision.
//!
//! The engine owns everything outside the kernel: the polydispersity
//! product loop, volume normalization for shape models, and the common
//! scale/background parameters. The single-precision engine converts
//! inputs once and accumulates in f32, so its output reflects a genuine
//! f32 computation rather than a rounded f64 one.

use ndarray::Array1;
use sas_math::real::Real;
use sas_models::info::ModelDef;
use sas_models::polydispersity::gaussian_weights;
use sas_types::data::{Data1D, Data2D};
use sas_types::error::{SasError, SasResult};
use sas_types::params::{ParameterSet, BACKGROUND_DEFAULT, SCALE_DEFAULT};
use std::str::FromStr;

/// Default polydispersity weight cutoff.
pub const DEFAULT_CUTOFF: f64 = 1.0e-5;

/// Calculation precision of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    Single,
    #[default]
    Double,
}

impl Precision {
    /// Engine label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Precision::Single => "f32",
            Precision::Double => "f64",
        }
    }
}

impl FromStr for Precision {
    type Err = SasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" | "f32" => Ok(Precision::Single),
            "double" | "f64" | "default" => Ok(Precision::Double),
            other => Err(SasError::InvalidOption(format!(
                "unknown precision {other:?}; use single or double"
            ))),
        }
    }
}

/// Kernel dispatch per precision, so the evaluation loop has one source.
trait EnginePrecision: Real {
    fn iq(model: &ModelDef, q: Self, pars: &[Self]) -> Self;
    fn iqxy(model: &ModelDef, qx: Self, qy: Self, pars: &[Self]) -> Self;
}

impl EnginePrecision for f32 {
    fn iq(model: &ModelDef, q: f32, pars: &[f32]) -> f32 {
        (model.iq32)(q, pars)
    }
    fn iqxy(model: &ModelDef, qx: f32, qy: f32, pars: &[f32]) -> f32 {
        match model.iqxy32 {
            Some(kernel) => kernel(qx, qy, pars),
            // radially symmetric fallback
            None => (model.iq32)(qx.hypot(qy), pars),
        }
    }
}

impl EnginePrecision for f64 {
    fn iq(model: &ModelDef, q: f64, pars: &[f64]) -> f64 {
        (model.iq64)(q, pars)
    }
    fn iqxy(model: &ModelDef, qx: f64, qy: f64, pars: &[f64]) -> f64 {
        match model.iqxy64 {
            Some(kernel) => kernel(qx, qy, pars),
            None => (model.iq64)(qx.hypot(qy), pars),
        }
    }
}

/// One weighted point of the polydispersity mesh.
struct MeshPoint {
    pars: Vec<f64>,
    weight: f64,
}

/// A model bound to a precision and a polydispersity cutoff.
pub struct DirectModel<'a> {
    model: &'a ModelDef,
    precision: Precision,
    cutoff: f64,
}

impl<'a> DirectModel<'a> {
    pub fn new(model: &'a ModelDef, precision: Precision, cutoff: f64) -> Self {
        DirectModel {
            model,
            precision,
            cutoff,
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn label(&self) -> &'static str {
        self.precision.label()
    }

    pub fn model(&self) -> &ModelDef {
        self.model
    }

    /// Evaluate over 1-D data.
    pub fn eval1d(&self, pars: &ParameterSet, data: &Data1D) -> SasResult<Array1<f64>> {
        let points: Vec<(f64, Option<f64>)> = data.q.iter().map(|&q| (q, None)).collect();
        self.eval(pars, &points)
    }

    /// Evaluate over 2-D data; beam-stop points come back as NaN.
    pub fn eval2d(&self, pars: &ParameterSet, data: &Data2D) -> SasResult<Array1<f64>> {
        let points: Vec<(f64, Option<f64>)> = data
            .qx
            .iter()
            .zip(&data.qy)
            .map(|(&x, &y)| (x, Some(y)))
            .collect();
        let mut values = self.eval(pars, &points)?;
        for (v, &masked) in values.iter_mut().zip(&data.mask) {
            if masked {
                *v = f64::NAN;
            }
        }
        Ok(values)
    }

    /// Evaluate a single 1-D point.
    pub fn eval_q(&self, pars: &ParameterSet, q: f64) -> SasResult<f64> {
        Ok(self.eval(pars, &[(q, None)])?[0])
    }

    /// Evaluate a single detector point.
    pub fn eval_qxy(&self, pars: &ParameterSet, qx: f64, qy: f64) -> SasResult<f64> {
        Ok(self.eval(pars, &[(qx, Some(qy))])?[0])
    }

    fn eval(&self, pars: &ParameterSet, points: &[(f64, Option<f64>)]) -> SasResult<Array1<f64>> {
        for name in pars.names() {
            self.model.info.validate_name(name)?;
        }
        let scale = pars.value_or("scale", SCALE_DEFAULT);
        let background = pars.value_or("background", BACKGROUND_DEFAULT);
        let mesh = self.build_mesh(pars);

        let values = match self.precision {
            Precision::Single => self.sum_mesh::<f32>(&mesh, points),
            Precision::Double => self.sum_mesh::<f64>(&mesh, points),
        };

        let weight_sum: f64 = mesh.iter().map(|m| m.weight).sum();
        let volume_norm = self.model.form_volume.map(|volume| {
            mesh.iter()
                .map(|m| m.weight * volume(&m.pars))
                .sum::<f64>()
                / weight_sum
        });

        let out = values.mapv(|v| {
            let mut v = v / weight_sum;
            if let Some(vol) = volume_norm {
                v /= vol;
            }
            scale * v + background
        });
        Ok(out)
    }

    fn sum_mesh<T: EnginePrecision>(
        &self,
        mesh: &[MeshPoint],
        points: &[(f64, Option<f64>)],
    ) -> Array1<f64> {
        // convert parameter vectors once per mesh point
        let mesh_t: Vec<(Vec<T>, T)> = mesh
            .iter()
            .map(|m| {
                (
                    m.pars.iter().map(|&p| T::from_f64(p)).collect(),
                    T::from_f64(m.weight),
                )
            })
            .collect();

        let values: Vec<f64> = points
            .iter()
            .map(|&(qa, qb)| {
                let mut acc = T::ZERO;
                for (pars_t, w) in &mesh_t {
                    let f = match qb {
                        None => T::iq(self.model, T::from_f64(qa), pars_t),
                        Some(qy) => {
                            T::iqxy(self.model, T::from_f64(qa), T::from_f64(qy), pars_t)
                        }
                    };
                    acc = acc + *w * f;
                }
                acc.to_f64()
            })
            .collect();
        Array1::from_vec(values)
    }

    /// Cartesian product of per-parameter Gaussian weights, pruned by the
    /// engine cutoff on the product weight.
    fn build_mesh(&self, pars: &ParameterSet) -> Vec<MeshPoint> {
        let info = &self.model.info;
        let base = info.kernel_vector(pars);

        let axes: Vec<(usize, Vec<sas_models::polydispersity::PdPoint>)> = info
            .parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.polydisperse())
            .filter_map(|(i, p)| {
                let spec = pars.pd(p.id);
                spec.active()
                    .then(|| (i, gaussian_weights(base[i], spec, p.kind)))
            })
            .collect();

        if axes.is_empty() {
            return vec![MeshPoint {
                pars: base,
                weight: 1.0,
            }];
        }

        let mut mesh = vec![MeshPoint {
            pars: base,
            weight: 1.0,
        }];
        for (index, points) in &axes {
            let mut next = Vec::with_capacity(mesh.len() * points.len());
            for m in &mesh {
                for p in points {
                    let mut pars = m.pars.clone();
                    pars[*index] = p.value;
                    next.push(MeshPoint {
                        pars,
                        weight: m.weight * p.weight,
                    });
                }
            }
            mesh = next;
        }

        let pruned: Vec<MeshPoint> = mesh
            .iter()
            .filter(|m| m.weight >= self.cutoff)
            .map(|m| MeshPoint {
                pars: m.pars.clone(),
                weight: m.weight,
            })
            .collect();
        // an aggressive cutoff must not empty the mesh
        if pruned.is_empty() {
            mesh
        } else {
            pruned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sas_models::registry::lookup;

    #[test]
    fn test_precision_parsing() {
        assert_eq!("single".parse::<Precision>().unwrap(), Precision::Single);
        assert_eq!("f64".parse::<Precision>().unwrap(), Precision::Double);
        assert!("quad".parse::<Precision>().is_err());
    }

    #[test]
    fn test_sphere_monodisperse_value() {
        let model = lookup("sphere").unwrap();
        let engine = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let v = engine.eval_q(&pars, 0.1).unwrap();
        assert!((v - 4.2619400091).abs() / 4.26 < 1e-9, "I = {v}");
    }

    #[test]
    fn test_sphere_polydisperse_value() {
        let model = lookup("sphere").unwrap();
        let engine = DirectModel::new(&model, Precision::Double, 0.0);
        let mut pars = model.info.defaults();
        pars.set("radius_pd", 0.1);
        pars.set("radius_pd_n", 35.0);
        let v = engine.eval_q(&pars, 0.1).unwrap();
        assert!((v - 7.1239244430).abs() / 7.12 < 1e-9, "I = {v}");
    }

    #[test]
    fn test_scale_and_background_applied() {
        let model = lookup("mono_gauss_coil").unwrap();
        let engine = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let mut pars = model.info.defaults();
        pars.set("scale", 2.0);
        pars.set("background", 5.0);
        let v = engine.eval_q(&pars, 0.01).unwrap();
        assert!((v - (2.0 * 58.531067140 + 5.0)).abs() / v < 1e-9);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let model = lookup("sphere").unwrap();
        let engine = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let mut pars = model.info.defaults();
        pars.set("radius_polar", 10.0);
        assert!(engine.eval_q(&pars, 0.1).is_err());
    }

    #[test]
    fn test_2d_beam_stop_masked() {
        let model = lookup("parallelepiped").unwrap();
        let engine = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let data = Data2D::square(0.05, 33);
        let values = engine.eval2d(&pars, &data).unwrap();
        for (v, &m) in values.iter().zip(&data.mask) {
            assert_eq!(m, !v.is_finite());
        }
    }

    #[test]
    fn test_radial_fallback_matches_1d() {
        let model = lookup("sphere").unwrap();
        let engine = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF);
        let pars = model.info.defaults();
        let radial = engine.eval_q(&pars, 0.05).unwrap();
        let planar = engine.eval_qxy(&pars, 0.03, 0.04).unwrap();
        assert!((radial - planar).abs() / radial < 1e-12);
    }

    #[test]
    fn test_single_close_to_double_at_mid_q() {
        let model = lookup("sphere").unwrap();
        let pars = model.info.defaults();
        let d = DirectModel::new(&model, Precision::Double, DEFAULT_CUTOFF)
            .eval_q(&pars, 0.05)
            .unwrap();
        let s = DirectModel::new(&model, Precision::Single, DEFAULT_CUTOFF)
            .eval_q(&pars, 0.05)
            .unwrap();
        assert!((d - s).abs() / d < 1e-4, "{d} vs {s}");
    }

    #[test]
    fn test_cutoff_prunes_tail_weights() {
        let model = lookup("sphere").unwrap();
        let mut pars = model.info.defaults();
        pars.set("radius_pd", 0.3);
        pars.set("radius_pd_n", 35.0);
        let loose = DirectModel::new(&model, Precision::Double, 0.0)
            .eval_q(&pars, 0.05)
            .unwrap();
        let tight = DirectModel::new(&model, Precision::Double, 1.0e-2)
            .eval_q(&pars, 0.05)
            .unwrap();
        // pruning drops the tail radii: visible shift, same order of magnitude
        let shift = (loose - tight).abs() / loose;
        assert!(shift > 1.0e-4, "cutoff had no effect");
        assert!(shift < 0.15, "cutoff shifted intensity by {shift}");
    }
}
