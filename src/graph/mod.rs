//! The derivation graph the resolver drives: an id-indexed arena of element
//! and placeholder nodes (see [`node`]) connected by kind-tagged edges (see
//! [`store`]).

pub mod node;
pub mod store;

pub use node::{ElementLevel, ElementNode, NodeId, NodeStatus, ParsedElement, PlaceholderNode, ProcessedElement, ResolverNode};
pub use store::{EdgeKind, Graph};
