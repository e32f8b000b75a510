//! Reference extraction over asset trees.
//!
//! - `base` - node capability trait, traversal helpers, extractor and types
//! - `patterns` - the markup code pattern registry shared with the tokenizer

pub mod base;
pub mod patterns;

pub use base::{AssetNode, ReferenceExtractor, ReferenceKind, ReferenceRecord};
pub use patterns::{Pattern, PatternEntry, PatternRegistry};
