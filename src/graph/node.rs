//! Node payloads stored in the derivation graph's arena.
//!
//! The parsed tree has no owning parent links (see `DESIGN.md`): containment
//! and derivation are both expressed as edges in [`super::store::Graph`],
//! never as fields on the element payloads themselves. Payloads are held
//! behind a tagged enum rather than as trait objects, since the set of
//! element kinds is closed and resolver code routinely needs to match on it.

use crate::model::parsed;
use crate::model::processed;

/// Index into the graph's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementLevel {
    Device,
    Peripheral,
    Cluster,
    Register,
    Field,
    EnumContainer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Unprocessed,
    Processed,
}

/// Owning payload for an Element node, tagged by [`ElementLevel`].
#[derive(Clone, Debug)]
pub enum ParsedElement {
    Device(Box<parsed::Device>),
    Peripheral(Box<parsed::Peripheral>),
    Cluster(Box<parsed::Cluster>),
    Register(Box<parsed::Register>),
    Field(Box<parsed::Field>),
    EnumContainer(Box<parsed::EnumeratedValueContainer>),
}

impl ParsedElement {
    pub fn level(&self) -> ElementLevel {
        match self {
            Self::Device(_) => ElementLevel::Device,
            Self::Peripheral(_) => ElementLevel::Peripheral,
            Self::Cluster(_) => ElementLevel::Cluster,
            Self::Register(_) => ElementLevel::Register,
            Self::Field(_) => ElementLevel::Field,
            Self::EnumContainer(_) => ElementLevel::EnumContainer,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Device(d) => Some(&d.name),
            Self::Peripheral(p) => Some(&p.name),
            Self::Cluster(c) => Some(&c.name),
            Self::Register(r) => Some(&r.name),
            Self::Field(f) => Some(&f.name),
            Self::EnumContainer(e) => e.name.as_deref(),
        }
    }

    pub fn derived_from(&self) -> Option<&str> {
        match self {
            Self::Device(_) => None,
            Self::Peripheral(p) => p.derived_from.as_deref(),
            Self::Cluster(c) => c.derived_from.as_deref(),
            Self::Register(r) => r.derived_from.as_deref(),
            Self::Field(f) => f.derived_from.as_deref(),
            Self::EnumContainer(e) => e.derived_from.as_deref(),
        }
    }
}

/// Owning payload for a processed Element node, filled once the node has
/// been through [`crate::resolver`].
#[derive(Clone, Debug)]
pub enum ProcessedElement {
    Device(Box<processed::Device>),
    Peripheral(Box<processed::Peripheral>),
    Cluster(Box<processed::Cluster>),
    Register(Box<processed::Register>),
    Field(Box<processed::Field>),
    EnumContainer(Box<processed::EnumeratedValueContainer>),
}

impl ProcessedElement {
    pub fn as_peripheral(&self) -> Option<&processed::Peripheral> {
        match self {
            Self::Peripheral(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_cluster(&self) -> Option<&processed::Cluster> {
        match self {
            Self::Cluster(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_register(&self) -> Option<&processed::Register> {
        match self {
            Self::Register(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&processed::Field> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ElementNode {
    pub level: ElementLevel,
    pub status: NodeStatus,
    /// The name this node should be searched/sorted by. Equal to the parsed
    /// payload's name until dim expansion substitutes it per instance.
    pub name: String,
    pub parsed: ParsedElement,
    pub processed: Option<ProcessedElement>,
    /// Set once this node has been split into dim instances; excluded from
    /// final child lists but left in the graph so derivation queries against
    /// it (see design note (ii)) keep working.
    pub is_dim_template: bool,
}

#[derive(Clone, Debug)]
pub struct PlaceholderNode {
    pub derive_path: String,
    /// The element node whose `derivedFrom` this placeholder represents.
    pub deriver: NodeId,
}

#[derive(Clone, Debug)]
pub enum ResolverNode {
    Element(ElementNode),
    Placeholder(PlaceholderNode),
}

impl ResolverNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(e) => Some(e),
            Self::Placeholder(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            Self::Element(e) => Some(e),
            Self::Placeholder(_) => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&PlaceholderNode> {
        match self {
            Self::Placeholder(p) => Some(p),
            Self::Element(_) => None,
        }
    }
}
