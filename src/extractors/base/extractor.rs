// ReferenceExtractor
//
// Walks the entries of a section, collects their string leaves and matches
// each leaf's text against the registry pattern for one reference kind.
// One record is produced per matching leaf; the id comes from the leftmost
// match.

use tracing::debug;

use super::node::AssetNode;
use super::tree_methods::all_descendants_of_kind;
use super::types::{NodeKind, ReferenceKind, ReferenceRecord};
use crate::error::{ExtractError, Result};
use crate::extractors::patterns::{Pattern, PatternRegistry};
use crate::utils::is_empty_or_whitespace;

/// Reference extraction over any [`AssetNode`] tree
#[derive(Debug, Clone, Copy)]
pub struct ReferenceExtractor<'r> {
    patterns: &'r PatternRegistry,
}

impl Default for ReferenceExtractor<'static> {
    fn default() -> Self {
        Self::new(PatternRegistry::shared())
    }
}

impl<'r> ReferenceExtractor<'r> {
    pub fn new(patterns: &'r PatternRegistry) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &'r PatternRegistry {
        self.patterns
    }

    /// References of `kind` in every section of a file, in section order.
    ///
    /// Fails with `InvalidArgument` before any traversal when `root` is not
    /// the root of a whole file.
    pub fn all_references_of_kind_in_file<N: AssetNode>(
        &self,
        root: N,
        kind: ReferenceKind,
    ) -> Result<Vec<ReferenceRecord<N>>> {
        if !root.is_file_root() {
            return Err(ExtractError::invalid_argument(
                "root",
                format!("node `{}` is not a file root", root.name()),
            ));
        }

        let mut references = Vec::new();
        for section in root.children() {
            references.extend(self.references_in_section(root, section, kind)?);
        }

        debug!(
            "Found {} {} references in {}",
            references.len(),
            kind,
            root.name()
        );
        Ok(references)
    }

    /// References of `kind` under the direct child of `root` named
    /// `section_name`. A missing section yields no references.
    pub fn references_to_kind_in_section<N: AssetNode>(
        &self,
        root: N,
        section_name: &str,
        kind: ReferenceKind,
    ) -> Result<Vec<ReferenceRecord<N>>> {
        if is_empty_or_whitespace(section_name) {
            return Err(ExtractError::invalid_argument(
                "section_name",
                "section name cannot be empty",
            ));
        }

        match root.child_by_name(section_name) {
            Some(section) => self.references_in_section(root, section, kind),
            None => {
                debug!(section = section_name, "section not found under {}", root.name());
                Ok(Vec::new())
            }
        }
    }

    fn references_in_section<N: AssetNode>(
        &self,
        root: N,
        section: N,
        kind: ReferenceKind,
    ) -> Result<Vec<ReferenceRecord<N>>> {
        let mut references = Vec::new();
        for entry in section.children() {
            references.extend(self.references_to_kind(entry, kind)?);
        }

        debug!(
            file = root.name(),
            section = section.name(),
            entries = section.child_count(),
            references = references.len(),
            "scanned section"
        );
        Ok(references)
    }

    /// References of `kind` in the string leaves below one entry
    pub fn references_to_kind<N: AssetNode>(
        &self,
        entry: N,
        kind: ReferenceKind,
    ) -> Result<Vec<ReferenceRecord<N>>> {
        let registry_entry = self.patterns.entry(kind);

        let mut references = Vec::new();
        for (leaf, text) in string_leaves(entry)? {
            let Some(matched) = registry_entry.pattern().find(&text) else {
                continue;
            };
            let referenced_id = registry_entry.extract_id(matched);
            references.push(ReferenceRecord::new(entry, leaf, referenced_id, text, kind));
        }

        Ok(references)
    }

    /// String leaves below `node` whose text matches `pattern`, with that text
    pub fn children_matching_pattern<N: AssetNode>(
        &self,
        node: N,
        pattern: &Pattern,
    ) -> Result<Vec<(N, String)>> {
        Ok(string_leaves(node)?
            .into_iter()
            .filter(|(_, text)| pattern.is_match(text))
            .collect())
    }
}

/// Deduplicated string leaves with non-blank text, pre-order.
///
/// Leaves tagged as strings whose value does not resolve to text are dropped.
fn string_leaves<N: AssetNode>(node: N) -> Result<Vec<(N, String)>> {
    let mut leaves = Vec::new();
    for leaf in all_descendants_of_kind(node, NodeKind::String, None) {
        let Some(text) = leaf.try_resolve_text(None)? else {
            continue;
        };
        if is_empty_or_whitespace(&text) {
            continue;
        }
        leaves.push((leaf, text));
    }
    Ok(leaves)
}

/// [`ReferenceExtractor::all_references_of_kind_in_file`] with the shared registry
pub fn all_references_of_kind_in_file<N: AssetNode>(
    root: N,
    kind: ReferenceKind,
) -> Result<Vec<ReferenceRecord<N>>> {
    ReferenceExtractor::default().all_references_of_kind_in_file(root, kind)
}

/// [`ReferenceExtractor::references_to_kind_in_section`] with the shared registry
pub fn references_to_kind_in_section<N: AssetNode>(
    root: N,
    section_name: &str,
    kind: ReferenceKind,
) -> Result<Vec<ReferenceRecord<N>>> {
    ReferenceExtractor::default().references_to_kind_in_section(root, section_name, kind)
}

/// [`ReferenceExtractor::references_to_kind`] with the shared registry
pub fn references_to_kind<N: AssetNode>(
    entry: N,
    kind: ReferenceKind,
) -> Result<Vec<ReferenceRecord<N>>> {
    ReferenceExtractor::default().references_to_kind(entry, kind)
}
