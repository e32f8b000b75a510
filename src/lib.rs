// nxref core - markup cross-reference extraction over read-only asset trees
//
// Two engines share one pattern table:
// - extractors: walk an asset tree and report every leaf whose text carries a
//   markup code of a given kind (`#p1001#`, `#m205#`, ...)
// - tokenizer: scan a block of text against an ordered list of patterns and
//   concatenate the matches
//
// The tree itself is consumed through the `AssetNode` trait; `asset_tree`
// provides an in-memory implementation for loaders and tests.

pub mod asset_tree;
pub mod config;
pub mod error;
pub mod extractors;
pub mod tokenizer;
pub mod utils;

pub use asset_tree::{AssetTree, NodeIndex, NodeRef};
pub use config::{BufferStrategy, PoolConfig, TokenizerConfig};
pub use error::{ExtractError, Result};
pub use extractors::base::{
    all_references_of_kind_in_file, references_to_kind_in_section, AssetNode, NodeKind,
    ReferenceKind, ReferenceRecord, ResolvedValue,
};
pub use extractors::patterns::{Pattern, PatternRegistry};
pub use tokenizer::{tokenize, tokenize_all, TokenText, Tokenizer};
pub use utils::buffer_pool::{BufferPool, PooledBuffer};
