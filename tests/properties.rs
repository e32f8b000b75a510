//! Property-based tests over generated asset trees and markup text
//!
//! Trees are built from random parent choices, so every node is reachable
//! from the root, and then extra `link` edges add shared subtrees and
//! back-edges (including edges to the root).

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::Index;

use nxref_core::extractors::base::{
    all_descendants_of_kind, all_nodes_breadth_first, all_nodes_depth_first, count,
    count_depth_first, walk_tree,
};
use nxref_core::{
    all_references_of_kind_in_file, AssetNode, AssetTree, BufferStrategy, NodeKind, Pattern,
    PatternRegistry, ReferenceKind, ResolvedValue, Tokenizer, TokenizerConfig,
};

#[derive(Debug, Clone)]
enum Slot {
    Container,
    Text(String),
    Integer(i64),
}

fn arb_slot() -> impl Strategy<Value = Slot> {
    // Small alphabets so equal texts and numbers collide often
    prop_oneof![
        Just(Slot::Container),
        "[a-c1 ]{0,3}".prop_map(Slot::Text),
        "(#[pmo][0-9]{1,2}#|[a-c ]){1,3}".prop_map(Slot::Text),
        (0i64..4).prop_map(Slot::Integer),
    ]
}

fn build_tree(nodes: Vec<(Index, Slot)>, links: Vec<(Index, Index)>) -> AssetTree {
    let mut tree = AssetTree::new("Generated.nx");
    let mut indices = vec![tree.root_index()];

    for (position, (parent, slot)) in nodes.into_iter().enumerate() {
        let parent = indices[parent.index(indices.len())];
        let name = position.to_string();
        let index = match slot {
            Slot::Container => tree.add_container(parent, name),
            Slot::Text(text) => tree.add_value(parent, name, ResolvedValue::Text(text)),
            Slot::Integer(value) => tree.add_value(parent, name, ResolvedValue::Integer(value)),
        };
        indices.push(index);
    }

    for (parent, child) in links {
        let parent = indices[parent.index(indices.len())];
        let child = indices[child.index(indices.len())];
        tree.link(parent, child);
    }

    tree
}

fn arb_tree() -> impl Strategy<Value = AssetTree> {
    (
        prop::collection::vec((any::<Index>(), arb_slot()), 0..40),
        prop::collection::vec((any::<Index>(), any::<Index>()), 0..8),
    )
        .prop_map(|(nodes, links)| build_tree(nodes, links))
}

fn arb_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "#[pPmMoOtT][0-9]{1,5}#",
        "#[lLbBeEnNkK]",
        "#L[0-9]{1,2}#",
        "#B%{1,3}#",
        "\"[a-z #]{0,6}\"",
        "\"",
        "[a-z]{1,6}",
        "[ \n]{1,2}",
    ];
    prop::collection::vec(piece, 0..30).prop_map(|pieces| format!("text {}", pieces.concat()))
}

fn arb_kinds() -> impl Strategy<Value = Vec<ReferenceKind>> {
    prop::sample::subsequence(ReferenceKind::ALL.to_vec(), 1..6).prop_shuffle()
}

fn quoted() -> Pattern {
    Pattern::new(r#""[^"]*""#).unwrap()
}

proptest! {
    #[test]
    fn counts_agree_for_any_tree(tree in arb_tree()) {
        prop_assert_eq!(count(tree.root()), tree.len());
        prop_assert_eq!(count_depth_first(tree.root()), tree.len());
    }

    #[test]
    fn traversal_orders_yield_same_node_set(tree in arb_tree()) {
        let bfs = all_nodes_breadth_first(tree.root());
        let dfs = all_nodes_depth_first(tree.root());
        prop_assert_eq!(bfs.len(), tree.len());
        prop_assert_eq!(dfs.len(), tree.len());

        let bfs: HashSet<_> = bfs.into_iter().collect();
        let dfs: HashSet<_> = dfs.into_iter().collect();
        prop_assert_eq!(bfs.len(), tree.len());
        prop_assert_eq!(bfs, dfs);

        let mut visits = 0;
        walk_tree(tree.root(), &mut |_, _| visits += 1);
        prop_assert_eq!(visits, tree.len());
    }

    #[test]
    fn descendants_are_distinct_matches(tree in arb_tree()) {
        for kind in [NodeKind::String, NodeKind::Integer, NodeKind::Container] {
            let found = all_descendants_of_kind(tree.root(), kind, None);

            let unique: HashSet<_> = found.iter().copied().collect();
            prop_assert_eq!(unique.len(), found.len());
            prop_assert!(!found.contains(&tree.root()));

            let mut texts = HashSet::new();
            for node in &found {
                prop_assert_eq!(node.kind(), kind);
                if let Some(text) = node.try_resolve_text(None).unwrap() {
                    prop_assert!(texts.insert(text));
                }
            }
        }
    }

    #[test]
    fn extraction_is_consistent_and_repeatable(tree in arb_tree(), kinds in arb_kinds()) {
        let registry = PatternRegistry::shared();
        for kind in kinds {
            let first = all_references_of_kind_in_file(tree.root(), kind).unwrap();
            let second = all_references_of_kind_in_file(tree.root(), kind).unwrap();
            prop_assert_eq!(&first, &second);

            let entry = registry.entry(kind);
            for record in &first {
                prop_assert_eq!(record.referencing().kind(), NodeKind::String);
                prop_assert!(entry.pattern().is_match(record.raw_text()));
                prop_assert_eq!(!record.referenced_id().is_empty(), entry.carries_id);
                prop_assert!(!record.raw_text().trim().is_empty());
            }
        }
    }

    #[test]
    fn single_pattern_list_equals_tokenize(
        text in arb_text(),
        kinds in arb_kinds(),
        strip in any::<bool>(),
    ) {
        let registry = PatternRegistry::shared();
        let tokenizer = Tokenizer::new(TokenizerConfig::default().with_strip_quotes(strip));
        let quote = quoted();

        let mut patterns = registry.patterns_for(&kinds);
        patterns.push(&quote);
        for pattern in patterns {
            let single = tokenizer.tokenize(&text, pattern).unwrap();
            let listed = tokenizer.tokenize_all(&text, &[pattern]).unwrap();
            prop_assert_eq!(single.as_str(), listed.as_str());
        }
    }

    #[test]
    fn buffer_strategies_agree(
        text in arb_text(),
        kinds in arb_kinds(),
        strip in any::<bool>(),
        threshold in 0usize..64,
    ) {
        let registry = PatternRegistry::shared();
        let quote = quoted();
        let mut patterns = registry.patterns_for(&kinds);
        patterns.push(&quote);
        patterns.push(registry.hyperlink_prefix());

        let config = TokenizerConfig::default()
            .with_strip_quotes(strip)
            .with_exact_threshold(threshold);
        let accumulate = Tokenizer::new(config.clone().with_strategy(BufferStrategy::Accumulate))
            .tokenize_all(&text, &patterns)
            .unwrap();
        let exact = Tokenizer::new(config.clone().with_strategy(BufferStrategy::Exact))
            .tokenize_all(&text, &patterns)
            .unwrap();
        prop_assert_eq!(accumulate.as_str(), exact.as_str());

        let tokens = Tokenizer::new(config).tokens(&text, &patterns).unwrap();
        prop_assert_eq!(tokens.concat(), exact.as_str());
    }
}
