// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — HTML Docs
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Static HTML documentation for the model catalogue.
//!
//! One page per model (title, category, parameter table, description)
//! plus an index page; the output tree is meant to be opened directly in
//! a browser.

use sas_models::info::ModelDef;
use sas_types::error::SasResult;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn limit(v: f64) -> String {
    if v == f64::INFINITY {
        "inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{v}")
    }
}

/// Render one model page.
pub fn model_page(model: &ModelDef) -> String {
    let info = &model.info;
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>{id}</title></head>\n<body>\n<h1>{title}</h1>\n\
         <p><b>Model:</b> {id} &mdash; <i>{category}</i></p>\n",
        id = escape(info.id),
        title = escape(info.title),
        category = escape(info.category),
    );

    html.push_str(
        "<table border=\"1\">\n<tr><th>Parameter</th><th>Units</th>\
         <th>Default</th><th>Limits</th><th>Description</th></tr>\n",
    );
    for p in &info.parameters {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>[{}, {}]</td><td>{}</td></tr>\n",
            escape(p.id),
            escape(p.units),
            p.default,
            limit(p.limits.0),
            limit(p.limits.1),
            escape(p.description),
        );
    }
    html.push_str("</table>\n");

    let _ = write!(
        html,
        "<h2>Definition</h2>\n<pre>{}</pre>\n</body></html>\n",
        escape(info.description)
    );
    html
}

/// Render the index page linking every model.
pub fn index_page(models: &[ModelDef]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>Model documentation</title></head>\n<body>\n\
         <h1>Model documentation</h1>\n<ul>\n",
    );
    for model in models {
        let _ = write!(
            html,
            "<li><a href=\"{id}.html\">{id}</a> &mdash; {title}</li>\n",
            id = escape(model.info.id),
            title = escape(model.info.title),
        );
    }
    html.push_str("</ul>\n</body></html>\n");
    html
}

/// Write the documentation tree; returns the files written.
pub fn write_docs(dir: &Path, models: &[ModelDef]) -> SasResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(models.len() + 1);

    let index = dir.join("index.html");
    fs::write(&index, index_page(models))?;
    written.push(index);

    for model in models {
        let path = dir.join(format!("{}.html", model.info.id));
        fs::write(&path, model_page(model))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sas_models::registry::{list_models, lookup};

    #[test]
    fn test_model_page_content() {
        let model = lookup("poly_gauss_coil").unwrap();
        let html = model_page(&model);
        assert!(html.contains("<h1>Scattering from polydisperse polymer coils</h1>"));
        assert!(html.contains("<td>rg</td>"));
        assert!(html.contains("[1, inf]"));
        // description is escaped into the pre block
        assert!(html.contains("(1+uz)^(-1/u)"));
    }

    #[test]
    fn test_index_links_every_model() {
        let models: Vec<_> = list_models().iter().map(|id| lookup(id).unwrap()).collect();
        let html = index_page(&models);
        for id in list_models() {
            assert!(html.contains(&format!("href=\"{id}.html\"")), "{id}");
        }
    }

    #[test]
    fn test_write_docs_tree() {
        let dir = std::env::temp_dir().join(format!("sasdoc-test-{}", std::process::id()));
        let models: Vec<_> = list_models().iter().map(|id| lookup(id).unwrap()).collect();
        let written = write_docs(&dir, &models).unwrap();
        assert_eq!(written.len(), models.len() + 1);
        for path in &written {
            assert!(path.exists(), "{path:?}");
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
