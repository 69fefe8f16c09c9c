//! Resolves a `derivedFrom` path string to a node in the graph.
//!
//! A path is a dot-separated sequence of name components. The deriving
//! node's own level is the target level: the last matched component must be
//! at that level. Search tries the deriving node's siblings first (so that
//! the common case, deriving from something declared nearby, doesn't need to
//! walk the whole device), and falls back to starting from the device's
//! direct peripherals. Matches exclude the deriving node itself, so a chain
//! of same-named elements at different levels can still be expressed.

use crate::error::ResolveError;
use crate::graph::{ElementLevel, Graph, NodeId};

#[derive(Debug)]
pub enum PathResolution {
    Found(NodeId),
    NotYetFound,
}

pub fn resolve(
    graph: &Graph,
    deriver: NodeId,
    path: &str,
    path_of: impl Fn(NodeId) -> crate::error::ElementPath,
) -> Result<PathResolution, ResolveError> {
    let components: Vec<&str> = path.split('.').collect();
    let target_level = graph.element(deriver).level;

    let mut matches = Vec::new();

    let siblings = graph.get_element_siblings(deriver);
    search(graph, &siblings, &components, target_level, deriver, &mut matches);

    if matches.is_empty() {
        let roots = graph.get_element_children(graph.root);
        search(graph, &roots, &components, target_level, deriver, &mut matches);
    }

    match matches.len() {
        0 => Ok(PathResolution::NotYetFound),
        1 => Ok(PathResolution::Found(matches[0])),
        _ => Err(ResolveError::AmbiguousDerivation {
            path: path_of(deriver),
            derive_path: path.to_string(),
        }),
    }
}

fn search(
    graph: &Graph,
    candidates: &[NodeId],
    components: &[&str],
    target_level: ElementLevel,
    exclude: NodeId,
    matches: &mut Vec<NodeId>,
) {
    let Some((head, rest)) = components.split_first() else {
        return;
    };

    for &candidate in candidates {
        if candidate == exclude {
            continue;
        }
        let node = graph.element(candidate);
        if node.name != *head {
            continue;
        }

        if rest.is_empty() {
            if node.level == target_level {
                matches.push(candidate);
            }
            continue;
        }

        let children = graph.get_element_children(candidate);
        search(graph, &children, rest, target_level, exclude, matches);
    }
}
