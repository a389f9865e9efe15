// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Model Registry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Name-to-kernel lookup for all registered models.

use crate::info::ModelDef;
use crate::{mono_gauss_coil, parallelepiped, poly_gauss_coil, polymer_micelle, sphere};
use sas_types::error::{SasError, SasResult};

/// Registered model ids, sorted.
pub fn list_models() -> Vec<&'static str> {
    vec![
        "mono_gauss_coil",
        "parallelepiped",
        "poly_gauss_coil",
        "polymer_micelle",
        "sphere",
    ]
}

/// Resolve a model id to its definition.
pub fn lookup(id: &str) -> SasResult<ModelDef> {
    match id {
        "mono_gauss_coil" => Ok(mono_gauss_coil::model()),
        "parallelepiped" => Ok(parallelepiped::model()),
        "poly_gauss_coil" => Ok(poly_gauss_coil::model()),
        "polymer_micelle" => Ok(polymer_micelle::model()),
        "sphere" => Ok(sphere::model()),
        _ => Err(SasError::UnknownModel(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_model_resolves() {
        for id in list_models() {
            let def = lookup(id).unwrap();
            assert_eq!(def.id(), id);
            assert!(!def.info.parameters.is_empty());
            assert!(!def.checks.is_empty(), "{id} has no reference checks");
        }
    }

    #[test]
    fn test_list_is_sorted() {
        let ids = list_models();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        assert!(matches!(
            lookup("cylinder"),
            Err(SasError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_oriented_models_expose_both_precisions() {
        for id in list_models() {
            let def = lookup(id).unwrap();
            assert_eq!(def.iqxy32.is_some(), def.iqxy64.is_some(), "{id}");
        }
    }
}
