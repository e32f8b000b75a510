// Base types and traversal for reference extraction
//
// - types.rs: node kinds, resolved values, reference kinds and records
// - node.rs: the AssetNode capability trait consumed by everything below
// - tree_methods.rs: traversal and lookup helpers
// - extractor.rs: ReferenceExtractor (section and whole-file scans)

pub mod extractor;
pub mod node;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use extractor::{
    all_references_of_kind_in_file, references_to_kind, references_to_kind_in_section,
    ReferenceExtractor,
};
pub use node::{AssetNode, Children};
pub use tree_methods::{
    all_descendants_of_kind, all_nodes, all_nodes_breadth_first, all_nodes_depth_first,
    children_by_name, children_of_kind, count, count_depth_first, find_parent_by_name,
    find_parent_of_kind, walk_tree, Traversal, VisitedSet,
};
pub use types::{AssetRef, NodeKind, ReferenceKind, ReferenceRecord, ResolvedValue};
