//! Per-level element processors: merge a parsed element with its optional
//! processed `derivedFrom` base into a processed element.
//!
//! [`properties`] holds the register-properties inheritance shared by every
//! level below Device; the rest are one module per [`crate::graph::ElementLevel`].

pub mod cluster;
pub mod enum_container;
pub mod field;
pub mod overlay;
pub mod peripheral;
pub mod properties;
pub mod register;
