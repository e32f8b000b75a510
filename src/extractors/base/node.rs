// Node capability set consumed by the walker and the extractor
//
// Implemented by whatever loader materialises the asset tree. Handles are
// cheap `Copy` values: they borrow the tree, they never own it.

use std::fmt;
use std::hash::Hash;

use super::types::{NodeKind, ResolvedValue};
use crate::error::Result;

/// A node of a read-only, hierarchical asset tree
pub trait AssetNode: Copy + Eq + Hash + fmt::Debug {
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind;

    fn child_count(&self) -> usize;

    /// Child at `index` in document order
    fn child(&self, index: usize) -> Option<Self>;

    /// Non-owning back-reference, used only for upward lookup
    fn parent(&self) -> Option<Self>;

    /// The node's own value; `None` for containers
    fn resolve(&self) -> Option<ResolvedValue>;

    /// Whether this node is the root of a whole asset file
    fn is_file_root(&self) -> bool;

    fn children(&self) -> Children<Self> {
        Children {
            node: *self,
            next: 0,
            count: self.child_count(),
        }
    }

    fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    /// First direct child with exactly this name
    fn child_by_name(&self, name: &str) -> Option<Self> {
        self.children().find(|child| child.name() == name)
    }

    /// Follow a `/`-separated path of child names.
    ///
    /// `None`, `""` and `"."` segments stay put; `".."` moves to the parent.
    fn resolve_path(&self, path: Option<&str>) -> Option<Self> {
        let Some(path) = path else {
            return Some(*self);
        };

        let mut current = *self;
        for segment in path.split('/') {
            current = match segment {
                "" | "." => current,
                ".." => current.parent()?,
                name => current.child_by_name(name)?,
            };
        }
        Some(current)
    }

    /// Value of the node at `path` (or of this node)
    fn resolve_at(&self, path: Option<&str>) -> Option<ResolvedValue> {
        self.resolve_path(path)?.resolve()
    }

    /// Text of the node at `path`, going through the text conversion table.
    ///
    /// Missing nodes and values without a text form give `Ok(None)`;
    /// a failing numeric coercion is an error.
    fn try_resolve_text(&self, path: Option<&str>) -> Result<Option<String>> {
        match self.resolve_at(path) {
            Some(value) => value.into_text(),
            None => Ok(None),
        }
    }
}

/// Iterator over the direct children of a node
#[derive(Debug, Clone)]
pub struct Children<N> {
    node: N,
    next: usize,
    count: usize,
}

impl<N: AssetNode> Iterator for Children<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        while self.next < self.count {
            let index = self.next;
            self.next += 1;
            if let Some(child) = self.node.child(index) {
                return Some(child);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.next))
    }
}
