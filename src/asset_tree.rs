//! Arena-backed in-memory asset tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeIndex`]. Child
//! lists own their entries; the parent link is a plain index used only for
//! upward lookup. A loader fills the arena once and then hands out
//! [`NodeRef`] handles, which implement [`AssetNode`].
//!
//! [`AssetTree::link`] attaches an existing node under a second parent,
//! which is how shared substructure is represented.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::extractors::base::{AssetNode, NodeKind, ResolvedValue};

/// Position of a node inside its [`AssetTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(u32);

impl NodeIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    kind: NodeKind,
    value: Option<ResolvedValue>,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

/// A whole asset file held in memory
#[derive(Debug, Clone)]
pub struct AssetTree {
    nodes: Vec<NodeData>,
}

impl AssetTree {
    /// Create a tree whose root container is named after the file
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData {
                name: file_name.into(),
                kind: NodeKind::Container,
                value: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root_index(&self) -> NodeIndex {
        NodeIndex(0)
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root_index())
    }

    /// Handle for `index`.
    ///
    /// # Panics
    /// If `index` does not belong to this tree.
    pub fn node(&self, index: NodeIndex) -> NodeRef<'_> {
        assert!(index.as_usize() < self.nodes.len(), "node index out of range");
        NodeRef { tree: self, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a container child under `parent`
    pub fn add_container(&mut self, parent: NodeIndex, name: impl Into<String>) -> NodeIndex {
        self.add_node(parent, name, NodeKind::Container, None)
    }

    /// Add a value child whose kind follows from the value
    pub fn add_value(
        &mut self,
        parent: NodeIndex,
        name: impl Into<String>,
        value: ResolvedValue,
    ) -> NodeIndex {
        let kind = value.kind();
        self.add_node(parent, name, kind, Some(value))
    }

    /// Add a child with an explicit kind tag.
    ///
    /// The tag and the value are not cross-checked, mirroring files whose
    /// declared type disagrees with what the value resolves to.
    ///
    /// # Panics
    /// If `parent` does not belong to this tree.
    pub fn add_node(
        &mut self,
        parent: NodeIndex,
        name: impl Into<String>,
        kind: NodeKind,
        value: Option<ResolvedValue>,
    ) -> NodeIndex {
        assert!(parent.as_usize() < self.nodes.len(), "parent index out of range");
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            name: name.into(),
            kind,
            value,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.as_usize()].children.push(index);
        index
    }

    /// Attach an existing node as an extra child of `parent`.
    ///
    /// The node keeps its original parent link.
    ///
    /// # Panics
    /// If either index does not belong to this tree.
    pub fn link(&mut self, parent: NodeIndex, child: NodeIndex) {
        assert!(child.as_usize() < self.nodes.len(), "child index out of range");
        self.nodes[parent.as_usize()].children.push(child);
    }

    fn data(&self, index: NodeIndex) -> &NodeData {
        &self.nodes[index.as_usize()]
    }
}

/// Borrowed handle to one node of an [`AssetTree`]
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t AssetTree,
    index: NodeIndex,
}

impl<'t> NodeRef<'t> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn tree(&self) -> &'t AssetTree {
        self.tree
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.tree, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index.0)
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl AssetNode for NodeRef<'_> {
    fn name(&self) -> &str {
        &self.tree.data(self.index).name
    }

    fn kind(&self) -> NodeKind {
        self.tree.data(self.index).kind
    }

    fn child_count(&self) -> usize {
        self.tree.data(self.index).children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        let child = *self.tree.data(self.index).children.get(index)?;
        Some(NodeRef {
            tree: self.tree,
            index: child,
        })
    }

    fn parent(&self) -> Option<Self> {
        let parent = self.tree.data(self.index).parent?;
        Some(NodeRef {
            tree: self.tree,
            index: parent,
        })
    }

    fn resolve(&self) -> Option<ResolvedValue> {
        self.tree.data(self.index).value.clone()
    }

    fn is_file_root(&self) -> bool {
        self.index == self.tree.root_index()
    }
}
