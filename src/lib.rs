//! Resolves CMSIS-SVD derivation (`derivedFrom`), `dim` array/list expansion,
//! and register-properties inheritance into a fully materialised device
//! tree.
//!
//! [`xml::parse_device`] ingests a CMSIS-SVD document into [`model::parsed`],
//! and [`resolver::resolve`] turns that into [`model::processed`].

pub mod common;
pub mod derive_path;
pub mod diagnostics;
pub mod dim;
pub mod enumvalues;
pub mod error;
pub mod graph;
pub mod graph_builder;
pub mod model;
pub mod processors;
pub mod resolver;
pub mod xml;
