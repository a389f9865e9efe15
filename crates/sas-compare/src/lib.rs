// ─────────────────────────────────────────────────────────────────────
// SCPN Scatter Core — Compare
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Model evaluation engines and the precision-comparison harness.

pub mod compare;
pub mod engine;
pub mod htmldoc;
pub mod modeltest;
pub mod random;
pub mod report;
pub mod stats;
