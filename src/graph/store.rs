//! The derivation graph: an arena of [`ResolverNode`]s plus edges tagged by
//! [`EdgeKind`].
//!
//! Containment (`ChildUnresolved`/`ChildResolved`) and derivation (`Derive`,
//! `Placeholder`) are segregated by tag in the same adjacency lists rather
//! than stored as separate graphs, matching the "colored edges" design
//! recorded in `DESIGN.md`. Acyclicity is enforced only on the `Derive`
//! subgraph, checked at insertion time with a DFS from the new edge's head
//! back to its tail.

use std::collections::{HashSet, VecDeque};

use crate::error::ResolveError;

use super::node::{ElementNode, ElementLevel, NodeId, NodeStatus, ParsedElement, PlaceholderNode, ResolverNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    ChildUnresolved,
    ChildResolved,
    /// placeholder -> deriving child
    Placeholder,
    /// base -> derived
    Derive,
}

#[derive(Clone, Copy, Debug)]
struct Edge {
    from: NodeId,
    to: NodeId,
    kind: EdgeKind,
}

pub struct Graph {
    nodes: Vec<Option<ResolverNode>>,
    edges: Vec<Edge>,
    pub root: NodeId,
}

impl Graph {
    pub fn new(device: ParsedElement) -> Self {
        let name = device.name().unwrap_or_default().to_string();
        let root_node = ElementNode {
            level: ElementLevel::Device,
            // The Device node is pre-marked processed: it is never routed
            // through the generic node processor, so its children can get
            // ChildResolved edges from the start.
            status: NodeStatus::Processed,
            name,
            parsed: device,
            processed: None,
            is_dim_template: false,
        };
        Graph {
            nodes: vec![Some(ResolverNode::Element(root_node))],
            edges: Vec::new(),
            root: NodeId(0),
        }
    }

    fn push_node(&mut self, node: ResolverNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> &ResolverNode {
        self.nodes[id.0 as usize].as_ref().expect("dangling node id")
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut ResolverNode {
        self.nodes[id.0 as usize].as_mut().expect("dangling node id")
    }

    pub fn element(&self, id: NodeId) -> &ElementNode {
        self.get(id).as_element().expect("expected element node")
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut ElementNode {
        self.get_mut(id).as_element_mut().expect("expected element node")
    }

    pub fn all_node_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|_| NodeId(i as u32)))
            .collect()
    }

    fn add_edge_raw(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) {
        self.edges.push(Edge { from, to, kind });
    }

    fn remove_edges_matching(&mut self, mut pred: impl FnMut(&Edge) -> bool) {
        self.edges.retain(|e| !pred(e));
    }

    pub fn outgoing(&self, id: NodeId, kind: EdgeKind) -> Vec<NodeId> {
        self.edges.iter().filter(|e| e.from == id && e.kind == kind).map(|e| e.to).collect()
    }

    pub fn incoming(&self, id: NodeId, kind: EdgeKind) -> Vec<NodeId> {
        self.edges.iter().filter(|e| e.to == id && e.kind == kind).map(|e| e.from).collect()
    }

    pub fn has_incoming_edge_of_kinds(&self, id: NodeId, kinds: &[EdgeKind]) -> bool {
        self.edges.iter().any(|e| e.to == id && kinds.contains(&e.kind))
    }

    /// Whether `id`'s structural containment edge has already been promoted
    /// to `ChildResolved` (i.e. its parent has been processed).
    pub fn parent_is_resolved(&self, id: NodeId) -> bool {
        self.edges.iter().any(|e| e.to == id && e.kind == EdgeKind::ChildResolved)
    }

    /// Marks `id` processed and promotes every outgoing `ChildUnresolved`
    /// edge to `ChildResolved`, making its structural children processable.
    pub fn mark_processed(&mut self, id: NodeId) {
        self.element_mut(id).status = NodeStatus::Processed;
        for e in self.edges.iter_mut() {
            if e.from == id && e.kind == EdgeKind::ChildUnresolved {
                e.kind = EdgeKind::ChildResolved;
            }
        }
    }

    /// Adds a new Element child under `parent`, wiring a `ChildUnresolved` or
    /// `ChildResolved` edge depending on whether `parent` is already
    /// processed, and a `Placeholder` edge if `parsed` declares
    /// `derivedFrom`.
    pub fn add_element_child(&mut self, parent: NodeId, parsed: ParsedElement) -> NodeId {
        let parent_processed = matches!(self.element(parent).status, NodeStatus::Processed);
        let name = parsed.name().unwrap_or_default().to_string();
        let derive_path = parsed.derived_from().map(str::to_string);
        let level = parsed.level();

        let child = self.push_node(ResolverNode::Element(ElementNode {
            level,
            status: NodeStatus::Unprocessed,
            name,
            parsed,
            processed: None,
            is_dim_template: false,
        }));

        let kind = if parent_processed { EdgeKind::ChildResolved } else { EdgeKind::ChildUnresolved };
        self.add_edge_raw(parent, child, kind);

        if let Some(path) = derive_path {
            self.add_placeholder(child, path);
        }

        child
    }

    /// Anchors a placeholder to `deriver`'s future co-parent (`deriver`'s
    /// current parent, resolved or not) so the resolver only considers it
    /// once that parent is processed.
    pub fn add_placeholder(&mut self, deriver: NodeId, derive_path: String) -> NodeId {
        let parent = self.get_element_parent(deriver);
        let placeholder = self.push_node(ResolverNode::Placeholder(PlaceholderNode { derive_path, deriver }));
        self.add_edge_raw(placeholder, deriver, EdgeKind::Placeholder);
        if let Some(parent) = parent {
            self.add_edge_raw(parent, placeholder, EdgeKind::Placeholder);
        }
        placeholder
    }

    pub fn remove_placeholder(&mut self, placeholder: NodeId) {
        self.remove_edges_matching(|e| e.from == placeholder || e.to == placeholder);
        self.nodes[placeholder.0 as usize] = None;
    }

    /// Attempts to add a Derive edge `base -> derived`. Returns
    /// [`ResolveError::ResolveCycle`] if it would close a cycle in the
    /// Derive subgraph.
    pub fn add_derive_edge(&mut self, base: NodeId, derived: NodeId, path_of: impl Fn(NodeId) -> crate::error::ElementPath) -> Result<(), ResolveError> {
        if base == derived || self.derive_reaches(derived, base) {
            return Err(ResolveError::ResolveCycle { path: path_of(derived) });
        }
        self.add_edge_raw(base, derived, EdgeKind::Derive);
        Ok(())
    }

    /// DFS over Derive edges: can `from` reach `to`?
    fn derive_reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        while let Some(n) = stack.pop() {
            if n == to {
                return true;
            }
            if !seen.insert(n) {
                continue;
            }
            stack.extend(self.outgoing(n, EdgeKind::Derive));
        }
        false
    }

    pub fn get_base_element_node(&self, derived: NodeId) -> Option<NodeId> {
        self.incoming(derived, EdgeKind::Derive).into_iter().next()
    }

    pub fn remove_derive_edge(&mut self, base: NodeId, derived: NodeId) {
        self.remove_edges_matching(|e| e.kind == EdgeKind::Derive && e.from == base && e.to == derived);
    }

    /// The element's structural parent via whichever containment edge
    /// currently exists (resolved or not). Elements have exactly one parent.
    pub fn get_element_parent(&self, id: NodeId) -> Option<NodeId> {
        self.edges
            .iter()
            .find(|e| e.to == id && matches!(e.kind, EdgeKind::ChildResolved | EdgeKind::ChildUnresolved))
            .map(|e| e.from)
    }

    pub fn get_element_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut resolved = self.outgoing(id, EdgeKind::ChildResolved);
        resolved.extend(self.outgoing(id, EdgeKind::ChildUnresolved));
        resolved
    }

    pub fn get_element_siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.get_element_parent(id) {
            Some(parent) => self.get_element_children(parent).into_iter().filter(|&c| c != id).collect(),
            None => Vec::new(),
        }
    }

    /// Root nodes (no unresolved containment parent among elements) that are
    /// not yet processed and reachable for this round. In practice this is
    /// just the device's direct peripheral children until they themselves
    /// become processed.
    pub fn get_unprocessed_root_nodes(&self) -> Vec<NodeId> {
        self.get_element_children(self.root)
            .into_iter()
            .filter(|&id| matches!(self.element(id).status, NodeStatus::Unprocessed))
            .collect()
    }

    pub fn get_unprocessed_nodes(&self) -> Vec<NodeId> {
        self.all_node_ids()
            .into_iter()
            .filter(|&id| matches!(self.get(id), ResolverNode::Element(e) if matches!(e.status, NodeStatus::Unprocessed)))
            .collect()
    }

    pub fn placeholders(&self) -> Vec<NodeId> {
        self.all_node_ids().into_iter().filter(|&id| matches!(self.get(id), ResolverNode::Placeholder(_))).collect()
    }

    /// Topologically sorts `nodes` (a subset reachable this round) using the
    /// "derived last" tiebreaker: among nodes with no ordering constraint
    /// between them, a node that is itself the target of a Derive edge sorts
    /// after one that is not, so a base is always processed in the same
    /// round as, but before, anything deriving from it.
    pub fn topological_sort_derived_last(&self, mut nodes: Vec<NodeId>) -> Vec<NodeId> {
        nodes.sort_by_key(|&id| self.get_base_element_node(id).is_some());
        nodes
    }

    /// Copies `source`'s non-Derive subtree (its element descendants and the
    /// structural edges between them) as new nodes under `target`, keeping
    /// each copy's edge kind equal to its source counterpart's, and
    /// re-anchoring any Derive edges that pointed *into* the source subtree
    /// so they point at the corresponding copies instead.
    pub fn replicate_descendants(&mut self, source: NodeId, target: NodeId) -> NodeId {
        let mut mapping = std::collections::HashMap::new();
        let source_node = self.element(source).clone();
        let copy_root = self.push_node(ResolverNode::Element(source_node));
        mapping.insert(source, copy_root);

        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(current) = queue.pop_front() {
            let copy_current = mapping[&current];
            for child in self.get_element_children(current) {
                let child_node = self.element(child).clone();
                let parent_processed = matches!(self.element(copy_current).status, NodeStatus::Processed);
                let child_copy = self.push_node(ResolverNode::Element(child_node));
                let kind = if parent_processed { EdgeKind::ChildResolved } else { EdgeKind::ChildUnresolved };
                self.add_edge_raw(copy_current, child_copy, kind);
                mapping.insert(child, child_copy);
                queue.push_back(child);
            }
        }

        // Re-anchor incoming Derive edges that targeted a node in the
        // original subtree so they target the copy instead.
        let redirects: Vec<(NodeId, NodeId, NodeId)> = self
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Derive && mapping.contains_key(&e.to))
            .map(|e| (e.from, e.to, mapping[&e.to]))
            .collect();
        for (from, old_to, new_to) in redirects {
            self.remove_edges_matching(|e| e.kind == EdgeKind::Derive && e.from == from && e.to == old_to);
            self.add_edge_raw(from, new_to, EdgeKind::Derive);
        }

        let parent_processed = matches!(self.element(target).status, NodeStatus::Processed);
        let kind = if parent_processed { EdgeKind::ChildResolved } else { EdgeKind::ChildUnresolved };
        self.add_edge_raw(target, copy_root, kind);

        copy_root
    }

    /// Bottom-up (leaves-first) walk with a Kahn's-algorithm-style pending
    /// count: a node is visited once every one of its element children has
    /// been visited. `finalize` is invoked for every internal node (one with
    /// at least one element child) with that node's id and its children's
    /// ids, in children-already-visited order.
    pub fn bottom_up_node_traversal(&self, mut finalize: impl FnMut(&Graph, NodeId, &[NodeId])) {
        let all = self.all_node_ids();
        let mut pending_children: std::collections::HashMap<NodeId, usize> = std::collections::HashMap::new();
        let mut children_of: std::collections::HashMap<NodeId, Vec<NodeId>> = std::collections::HashMap::new();

        for &id in &all {
            if self.get(id).as_element().is_some() {
                let children = self.get_element_children(id);
                pending_children.insert(id, children.len());
                children_of.insert(id, children);
            }
        }

        let mut queue: VecDeque<NodeId> = all
            .iter()
            .copied()
            .filter(|id| self.get(*id).as_element().is_some() && pending_children[id] == 0)
            .collect();

        let mut visited: HashSet<NodeId> = HashSet::new();
        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let children = children_of.get(&id).cloned().unwrap_or_default();
            if !children.is_empty() {
                finalize(self, id, &children);
            }
            if let Some(parent) = self.get_element_parent(id) {
                if let Some(count) = pending_children.get_mut(&parent) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(parent);
                    }
                }
            }
        }
    }
}
