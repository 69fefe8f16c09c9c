//! The two tree shapes the resolver sits between.
//!
//! [`parsed`] mirrors a CMSIS-SVD document field-for-field, optional wherever
//! the schema allows an element to be incomplete, inherited, or derived.
//! [`processed`] is the output: every inheritance, derivation and expansion
//! has been settled into concrete values.

pub mod parsed;
pub mod processed;
pub mod tokens;
