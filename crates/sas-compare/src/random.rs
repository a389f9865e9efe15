// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Random Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Seeded random parameter sets for stress comparisons.
//!
//! Ranges are guessed from the parameter name and kind; a model's own
//! `random` generator overrides the guesses, and its `constrain` hook
//! repairs within-model relationships afterwards. Iteration follows the
//! sorted parameter order, so a fixed seed reproduces the same set.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use sas_models::info::ModelDef;
use sas_types::params::{ParamKind, ParameterSet};

/// Value range guessed from a parameter name and its current value.
pub fn parameter_range(name: &str, value: f64) -> (f64, f64) {
    if name.ends_with("_pd_n") {
        (0.0, 100.0)
    } else if name.ends_with("_pd_nsigma") {
        (0.0, 5.0)
    } else if ["theta", "phi", "psi"].iter().any(|s| name.contains(s)) {
        if name.ends_with("_pd") {
            (0.0, 45.0)
        } else {
            (-180.0, 180.0)
        }
    } else if name.ends_with("_pd") {
        (0.0, 1.0)
    } else if name.contains("sld") {
        (-0.5, 10.0)
    } else if name == "background" {
        (0.0, 10.0)
    } else if name == "scale" {
        (0.0, 1.0e3)
    } else if value < 0.0 {
        (2.0 * value, -2.0 * value)
    } else {
        (0.0, if value > 0.0 { 2.0 * value } else { 1.0 })
    }
}

fn randomize_one(model: &ModelDef, name: &str, value: f64, rng: &mut StdRng) -> f64 {
    let info = &model.info;

    // distribution widths: peak orientation spread near 13 degrees,
    // polydispersity near 15%
    if let Some(base) = name.strip_suffix("_pd") {
        let orientation = info
            .find(base)
            .map(|p| p.kind == ParamKind::Orientation)
            .unwrap_or(false);
        return if orientation {
            180.0 * Beta::new(2.5, 20.0).unwrap().sample(rng)
        } else {
            Beta::new(1.5, 7.0).unwrap().sample(rng)
        };
    }
    // pd point counts are assigned separately by the activation pattern
    if name.ends_with("_pd_n") {
        return 0.0;
    }
    if name.ends_with("_pd_nsigma") {
        return 3.0;
    }
    if name == "background" {
        return 10.0f64.powf(rng.gen_range(-2.0..0.0));
    }
    if name == "scale" {
        return 10.0f64.powf(rng.gen_range(-3.0..-0.5));
    }

    if let Some(par) = info.find(name) {
        if par.limits.0.is_finite() && par.limits.1.is_finite() {
            return rng.gen_range(par.limits.0..par.limits.1);
        }
        if par.kind == ParamKind::Sld {
            return rng.gen_range(-0.5..12.0);
        }
        if par.kind == ParamKind::Volume
            && ["length", "radius", "thick"].iter().any(|s| name.contains(s))
        {
            return 10.0f64.powf(rng.gen_range(2.0..4.0));
        }
    }

    let (low, high) = parameter_range(name, value);
    let (lo_lim, hi_lim) = info
        .find(name)
        .map(|p| p.limits)
        .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
    let low = low.max(lo_lim);
    let high = high.min(hi_lim);
    if low < high {
        rng.gen_range(low..high)
    } else {
        value
    }
}

/// Polydispersity activation: usually one dispersed volume parameter,
/// occasionally two or three, and a broad theta spread for oriented
/// models.
fn random_pd(model: &ModelDef, pars: &mut ParameterSet, rng: &mut StdRng) {
    let volume: Vec<String> = model
        .info
        .parameters
        .iter()
        .filter(|p| p.kind == ParamKind::Volume)
        .map(|p| p.id.to_string())
        .collect();
    let oriented: Vec<String> = model
        .info
        .parameters
        .iter()
        .filter(|p| p.kind == ParamKind::Orientation)
        .map(|p| p.id.to_string())
        .collect();

    let u: f64 = rng.gen();
    let n = volume.len();
    if u < 0.01 || n < 1 {
        // no polydispersity
    } else if u < 0.86 || n < 2 {
        let pick = &volume[rng.gen_range(0..n)];
        pars.set(format!("{pick}_pd_n"), 35.0);
    } else if u < 0.99 || n < 3 {
        for (pick, npts) in [(rng.gen_range(0..n), 25.0), (rng.gen_range(0..n), 10.0)] {
            pars.set(format!("{}_pd_n", volume[pick]), npts);
        }
    } else {
        for (pick, npts) in [
            (rng.gen_range(0..n), 25.0),
            (rng.gen_range(0..n), 10.0),
            (rng.gen_range(0..n), 5.0),
        ] {
            pars.set(format!("{}_pd_n", volume[pick]), npts);
        }
    }

    if !oriented.is_empty() {
        if oriented.iter().any(|p| p == "theta") {
            pars.set("theta_pd_n", 20.0);
        }
        if rng.gen::<f64>() < 0.1 && oriented.iter().any(|p| p == "phi") {
            pars.set("phi_pd_n", 5.0);
        }
        if rng.gen::<f64>() < 0.1 && oriented.iter().any(|p| p == "psi") {
            pars.set("psi_pd_n", 5.0);
        }
    }
}

/// Randomize every parameter of the set in place.
pub fn randomize_pars(model: &ModelDef, pars: &mut ParameterSet, rng: &mut StdRng) {
    let entries: Vec<(String, f64)> = pars.iter().map(|(k, &v)| (k.clone(), v)).collect();
    for (name, value) in entries {
        let v = randomize_one(model, &name, value, rng);
        pars.set(name, v);
    }
    if let Some(model_random) = model.random {
        for (name, value) in model_random(rng) {
            pars.set(name, value);
        }
    }
    random_pd(model, pars, rng);
    if let Some(constrain) = model.constrain {
        constrain(pars);
    }
}

/// Suppress polydispersity entirely, or force at least one dispersed
/// parameter when testing the polydisperse path.
pub fn suppress_pd(pars: &mut ParameterSet, suppress: bool) {
    let pd_counts: Vec<String> = pars
        .names()
        .filter(|n| n.ends_with("_pd_n"))
        .cloned()
        .collect();
    if suppress {
        for name in pd_counts {
            pars.set(name, 0.0);
        }
        return;
    }

    let mut any_active = false;
    for name in &pd_counts {
        let base = name.trim_end_matches("_n");
        let width = pars.value_or(base, 0.0);
        if pars.value_or(name, 0.0) != 0.0 && width != 0.0 {
            any_active = true;
        }
    }
    if !any_active {
        if let Some(first) = pd_counts.first() {
            if pars.value_or(first, 0.0) == 0.0 {
                pars.set(first.clone(), 35.0);
            }
            let base = first.trim_end_matches("_n").to_string();
            if pars.value_or(&base, 0.0) == 0.0 {
                pars.set(base, 0.15);
            }
        }
    }
}
