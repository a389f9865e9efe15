//! Scattering model kernels and the model registry.
//!
//! Each model module defines its parameter table, a precision-generic
//! `iq` kernel, and reference checks; `registry` ties them together.

pub mod info;
pub mod mono_gauss_coil;
pub mod parallelepiped;
pub mod poly_gauss_coil;
pub mod polydispersity;
pub mod polymer_micelle;
pub mod registry;
pub mod sphere;
