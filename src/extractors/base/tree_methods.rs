// Tree navigation and traversal over any AssetNode
//
// Every traversal that descends into children keeps a visited set so that a
// subtree reachable through more than one parent is yielded once and cycles
// terminate.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::node::AssetNode;
use super::types::NodeKind;

/// Traversal order for [`all_nodes`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    #[default]
    BreadthFirst,
    DepthFirst,
}

/// All nodes reachable from `root` in the requested order
pub fn all_nodes<N: AssetNode>(root: N, traversal: Traversal) -> Vec<N> {
    match traversal {
        Traversal::BreadthFirst => all_nodes_breadth_first(root),
        Traversal::DepthFirst => all_nodes_depth_first(root),
    }
}

/// All nodes reachable from `root`, level by level
pub fn all_nodes_breadth_first<N: AssetNode>(root: N) -> Vec<N> {
    let mut result = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }
        result.push(node);
        queue.extend(node.children());
    }

    result
}

/// All nodes reachable from `root`, pre-order
pub fn all_nodes_depth_first<N: AssetNode>(root: N) -> Vec<N> {
    let mut result = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        result.push(node);
        push_children_reversed(&mut stack, node);
    }

    result
}

/// Number of distinct nodes reachable from `root` (queue based)
pub fn count<N: AssetNode>(root: N) -> usize {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        if visited.insert(node) {
            queue.extend(node.children());
        }
    }

    visited.len()
}

/// Number of distinct nodes reachable from `root` (explicit stack)
pub fn count_depth_first<N: AssetNode>(root: N) -> usize {
    let mut count = 0;
    let mut visited = HashSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if visited.insert(node) {
            count += 1;
            stack.extend(node.children());
        }
    }

    count
}

/// Direct children of `node` with the given kind
pub fn children_of_kind<N: AssetNode>(node: N, kind: NodeKind) -> Vec<N> {
    node.children().filter(|child| child.kind() == kind).collect()
}

/// Direct children of `node` with exactly this name
pub fn children_by_name<N: AssetNode>(node: N, name: &str) -> Vec<N> {
    node.children().filter(|child| child.name() == name).collect()
}

/// Closest ancestor with the given kind
pub fn find_parent_of_kind<N: AssetNode>(node: N, kind: NodeKind) -> Option<N> {
    ancestors(node).find(|parent| parent.kind() == kind)
}

/// Closest ancestor with exactly this name
pub fn find_parent_by_name<N: AssetNode>(node: N, name: &str) -> Option<N> {
    ancestors(node).find(|parent| parent.name() == name)
}

fn ancestors<N: AssetNode>(node: N) -> impl Iterator<Item = N> {
    let mut seen = HashSet::new();
    std::iter::successors(node.parent(), |current| current.parent())
        .take_while(move |parent| seen.insert(*parent))
}

/// Pre-order walk calling `visitor(node, depth)` once per distinct node
pub fn walk_tree<N, F>(root: N, visitor: &mut F)
where
    N: AssetNode,
    F: FnMut(N, u32),
{
    let mut visited = HashSet::new();
    let mut stack = vec![(root, 0u32)];

    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        visitor(node, depth);

        let first = stack.len();
        stack.extend(node.children().map(|child| (child, depth + 1)));
        stack[first..].reverse();
    }
}

/// Visited set for [`all_descendants_of_kind`].
///
/// Traversal is tracked by node identity. Matched nodes are additionally
/// deduplicated by resolved text within their own kind, so two leaves of the
/// target kind with equal text yield one result while a node of any other
/// kind never hides a match.
#[derive(Debug, Clone)]
pub struct VisitedSet<N> {
    nodes: HashSet<N>,
    texts: HashSet<(NodeKind, String)>,
}

impl<N: AssetNode> Default for VisitedSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: AssetNode> VisitedSet<N> {
    pub fn new() -> Self {
        Self {
            nodes: HashSet::new(),
            texts: HashSet::new(),
        }
    }

    /// Returns `false` when the node was already visited
    pub fn insert(&mut self, node: N) -> bool {
        self.nodes.insert(node)
    }

    pub fn contains(&self, node: N) -> bool {
        self.nodes.contains(&node)
    }

    /// Claim a matched node's text for its kind.
    ///
    /// Returns `false` when a node of the same kind with the same text was
    /// claimed before. Nodes without a text form always succeed.
    pub fn claim_text(&mut self, node: N) -> bool {
        let text = node
            .resolve()
            .and_then(|value| value.into_text().ok().flatten());
        match text {
            Some(text) => self.texts.insert((node.kind(), text)),
            None => true,
        }
    }

    /// Number of distinct nodes visited
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Every descendant of `root` with the given kind, pre-order.
///
/// Results are deduplicated by resolved text through `visited`. When a
/// matching node is found its parent is marked visited as well, so the parent
/// is skipped if it is reached again through another path; the parent itself
/// is never part of the result.
pub fn all_descendants_of_kind<N: AssetNode>(
    root: N,
    kind: NodeKind,
    visited: Option<&mut VisitedSet<N>>,
) -> Vec<N> {
    let mut local = VisitedSet::new();
    let visited = visited.unwrap_or(&mut local);
    let mut result = Vec::new();

    visited.insert(root);
    let mut stack = Vec::new();
    push_children_reversed(&mut stack, root);

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }

        if node.kind() == kind {
            if visited.claim_text(node) {
                result.push(node);
            }
            if let Some(parent) = node.parent() {
                visited.insert(parent);
            }
        }

        push_children_reversed(&mut stack, node);
    }

    result
}

fn push_children_reversed<N: AssetNode>(stack: &mut Vec<N>, node: N) {
    let first = stack.len();
    stack.extend(node.children());
    stack[first..].reverse();
}
