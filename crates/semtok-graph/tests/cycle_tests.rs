//! Cycle detection and termination

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use semtok_graph::{DependencyGraph, GraphConfig, IssueKind, Severity};
use semtok_token::{MemoryTokenStore, Token};

#[test]
fn two_node_cycle_reports_once() {
    let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{a}")]);
    let graph = DependencyGraph::build(&store);

    let circular: Vec<_> = graph.issues_of(IssueKind::Circular).collect();
    assert_eq!(circular.len(), 1);
    assert_eq!(circular[0].severity, Severity::Error);

    let mut paths = circular[0].paths.clone();
    paths.sort();
    assert_eq!(paths, vec!["a", "b"]);
    assert!(graph.topological_order().is_err());
}

#[test]
fn deep_chain_warns_above_threshold() {
    let store = MemoryTokenStore::from_raw([
        ("t0", "{t1}"),
        ("t1", "{t2}"),
        ("t2", "{t3}"),
        ("t3", "{t4}"),
        ("t4", "#000000"),
    ]);
    let graph = DependencyGraph::build(&store);

    let deep: Vec<_> = graph.issues_of(IssueKind::DeepChain).collect();
    assert_eq!(deep.len(), 1);
    assert_eq!(deep[0].paths, vec!["t0"]);
    assert_eq!(graph.node("t0").unwrap().depth, 4);
}

#[test]
fn threshold_is_configurable() {
    let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{c}"), ("c", "1px")]);
    let config = GraphConfig {
        deep_chain_threshold: 1,
        ..GraphConfig::default()
    };
    let graph = DependencyGraph::build_with(&store, &config);
    assert_eq!(graph.issues_of(IssueKind::DeepChain).count(), 1);
}

#[test]
fn long_chain_does_not_overflow() {
    let n = 20_000;
    let store: MemoryTokenStore = (0..n)
        .map(|i| {
            if i + 1 == n {
                Token::from_raw(format!("t{i}"), "#fff")
            } else {
                Token::from_raw(format!("t{i}"), &format!("{{t{}}}", i + 1))
            }
        })
        .collect();

    let graph = DependencyGraph::build(&store);
    assert_eq!(graph.metrics.max_depth, n - 1);
}

fn arb_store() -> impl Strategy<Value = Vec<(usize, Vec<usize>)>> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0..n, 0..3), n)
            .prop_map(|refs| refs.into_iter().enumerate().collect())
    })
}

proptest! {
    #[test]
    fn prop_cycles_detected_iff_cyclic(adjacency in arb_store()) {
        let store: MemoryTokenStore = adjacency
            .iter()
            .map(|(i, refs)| {
                let value = if refs.is_empty() {
                    "#ffffff".to_string()
                } else {
                    refs.iter().map(|r| format!("{{t{r}}}")).collect::<Vec<_>>().join(" ")
                };
                Token::from_raw(format!("t{i}"), &value)
            })
            .collect();

        let graph = DependencyGraph::build(&store);

        let mut reference: DiGraph<(), ()> = DiGraph::new();
        let nodes: Vec<_> = adjacency.iter().map(|_| reference.add_node(())).collect();
        for (i, refs) in &adjacency {
            for r in refs {
                reference.update_edge(nodes[*i], nodes[*r], ());
            }
        }

        prop_assert_eq!(graph.has_cycles(), is_cyclic_directed(&reference));
        prop_assert!(graph.nodes.iter().all(|n| n.depth < adjacency.len().max(1) * 2));
        for node in &graph.nodes {
            prop_assert_eq!(node.isolated, node.in_refs.is_empty() && node.out_refs.is_empty());
        }
    }
}
