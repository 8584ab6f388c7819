//! Dependency graph builder
//!
//! Nodes are token paths stored in a petgraph arena; edges point from a
//! referencing token to the token it references. Depth is computed with an
//! explicit-stack DFS over a tri-state array, so pathological chains never
//! recurse and cycles terminate.

use crate::error::{GraphError, Result};
use crate::issue::{GraphIssue, IssueKind, Severity};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use petgraph::Direction;
use semtok_token::{reference, TokenStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Thresholds of the graph analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Depth above which a deep-chain warning is emitted
    pub deep_chain_threshold: usize,
    /// Stores at or below this size never report orphans
    pub orphan_min_store_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            deep_chain_threshold: 3,
            orphan_min_store_size: 10,
        }
    }
}

/// Role of a token in the reference graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// No outgoing references
    Primitive,
    /// References at least one existing token
    Semantic,
    /// References only missing tokens
    Unknown,
}

/// Per-token view of the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Token path
    pub path: String,
    /// Role
    pub kind: NodeKind,
    /// Referenced paths, resolved or not
    pub out_refs: Vec<String>,
    /// Paths referencing this token
    pub in_refs: Vec<String>,
    /// Longest resolved reference chain below this node
    pub depth: usize,
    /// No references in either direction
    pub isolated: bool,
}

/// Reference edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Referencing token
    pub from: String,
    /// Referenced path
    pub to: String,
    /// Whether `to` existed when the graph was built
    pub resolved: bool,
}

/// Aggregate graph metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    /// Number of nodes
    pub total_tokens: usize,
    /// Nodes without outgoing references
    pub primitive_count: usize,
    /// Nodes with resolved outgoing references
    pub semantic_count: usize,
    /// Nodes whose references are all missing
    pub unknown_count: usize,
    /// Deepest reference chain
    pub max_depth: usize,
    /// Mean node depth
    pub avg_depth: f64,
    /// Nodes with no references at all
    pub isolated_count: usize,
    /// All edges, resolved or not
    pub total_edges: usize,
    /// Edges to missing tokens
    pub unresolved_edges: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
    depth: usize,
}

/// Directed reference graph over a token store
///
/// Rebuilt from the store on every call to [`DependencyGraph::build`]; it
/// holds no reference to the store afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyGraph {
    /// Nodes in store iteration order
    pub nodes: Vec<GraphNode>,
    /// Edges in discovery order
    pub edges: Vec<GraphEdge>,
    /// Defects found while building
    pub issues: Vec<GraphIssue>,
    /// Aggregate metrics
    pub metrics: GraphMetrics,
    #[serde(skip)]
    graph: DiGraph<String, ()>,
    #[serde(skip)]
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build with default thresholds
    #[must_use]
    pub fn build(store: &dyn TokenStore) -> Self {
        Self::build_with(store, &GraphConfig::default())
    }

    /// Build with explicit thresholds
    #[must_use]
    pub fn build_with(store: &dyn TokenStore, config: &GraphConfig) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::with_capacity(store.len(), store.len());
        let mut index: HashMap<String, NodeIndex> = HashMap::with_capacity(store.len());

        for token in store.iter() {
            let idx = graph.add_node(token.path.clone());
            index.insert(token.path.clone(), idx);
        }

        let mut edges = Vec::new();
        let mut issues = Vec::new();
        let mut out_refs: Vec<Vec<String>> = vec![Vec::new(); graph.node_count()];

        for token in store.iter() {
            let Some(text) = token.value.as_text() else {
                continue;
            };
            let from = index[&token.path];
            let targets = reference::extract_references(&token.path, text, |p| store.contains(p));

            for target in targets {
                let resolved = index.get(&target).copied();
                if let Some(to) = resolved {
                    graph.add_edge(from, to, ());
                } else {
                    issues.push(GraphIssue::new(
                        Severity::Error,
                        IssueKind::Unresolved,
                        format!("{} references missing token {}", token.path, target),
                        vec![token.path.clone(), target.clone()],
                    ));
                }
                edges.push(GraphEdge {
                    from: token.path.clone(),
                    to: target.clone(),
                    resolved: resolved.is_some(),
                });
                out_refs[from.index()].push(target);
            }
        }

        let (depths, cycles) = compute_depths(&graph);
        for cycle in cycles {
            let mut chain = cycle.join(" -> ");
            if let Some(first) = cycle.first() {
                chain.push_str(" -> ");
                chain.push_str(first);
            }
            issues.push(GraphIssue::new(
                Severity::Error,
                IssueKind::Circular,
                format!("Circular reference: {chain}"),
                cycle,
            ));
        }

        let mut nodes = Vec::with_capacity(graph.node_count());
        for idx in graph.node_indices() {
            let path = graph[idx].clone();
            let outs = std::mem::take(&mut out_refs[idx.index()]);
            let mut ins: Vec<String> = graph
                .neighbors_directed(idx, Direction::Incoming)
                .map(|n| graph[n].clone())
                .collect();
            ins.sort();
            ins.dedup();

            let has_resolved = graph.neighbors_directed(idx, Direction::Outgoing).next().is_some();
            let kind = match (outs.is_empty(), has_resolved) {
                (true, _) => NodeKind::Primitive,
                (false, true) => NodeKind::Semantic,
                (false, false) => NodeKind::Unknown,
            };
            let depth = depths[idx.index()];
            let isolated = outs.is_empty() && ins.is_empty();

            if depth > config.deep_chain_threshold {
                issues.push(GraphIssue::new(
                    Severity::Warning,
                    IssueKind::DeepChain,
                    format!(
                        "{path} has a reference chain of depth {depth} (threshold {})",
                        config.deep_chain_threshold
                    ),
                    vec![path.clone()],
                ));
            }
            if isolated && store.len() > config.orphan_min_store_size {
                issues.push(GraphIssue::new(
                    Severity::Info,
                    IssueKind::Orphaned,
                    format!("{path} is neither referenced nor references anything"),
                    vec![path.clone()],
                ));
            }

            nodes.push(GraphNode {
                path,
                kind,
                out_refs: outs,
                in_refs: ins,
                depth,
                isolated,
            });
        }

        let metrics = compute_metrics(&nodes, &edges);
        debug!(
            tokens = metrics.total_tokens,
            edges = metrics.total_edges,
            issues = issues.len(),
            max_depth = metrics.max_depth,
            "Built dependency graph"
        );

        Self {
            nodes,
            edges,
            issues,
            metrics,
            graph,
            index,
        }
    }

    /// Node for `path`
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&GraphNode> {
        self.index.get(path).map(|idx| &self.nodes[idx.index()])
    }

    /// Paths directly referencing `path`
    #[must_use]
    pub fn dependents(&self, path: &str) -> &[String] {
        self.node(path).map_or(&[], |n| n.in_refs.as_slice())
    }

    /// Paths directly referenced by `path`
    #[must_use]
    pub fn dependencies(&self, path: &str) -> &[String] {
        self.node(path).map_or(&[], |n| n.out_refs.as_slice())
    }

    /// Every path that reaches `path` through one or more references
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `path` is not in the graph.
    pub fn transitive_dependents(&self, path: &str) -> Result<Vec<String>> {
        let start = *self
            .index
            .get(path)
            .ok_or_else(|| GraphError::NodeNotFound(path.to_string()))?;

        let reversed = Reversed(&self.graph);
        let mut bfs = Bfs::new(reversed, start);
        let mut out = Vec::new();
        while let Some(idx) = bfs.next(reversed) {
            if idx != start {
                out.push(self.graph[idx].clone());
            }
        }
        out.sort();
        Ok(out)
    }

    /// Paths ordered so every token comes after the tokens it references
    ///
    /// # Errors
    /// [`GraphError::CycleDetected`] if the resolved edges form a cycle.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let order = toposort(&self.graph, None)
            .map_err(|cycle| GraphError::CycleDetected(self.graph[cycle.node_id()].clone()))?;
        Ok(order.into_iter().rev().map(|idx| self.graph[idx].clone()).collect())
    }

    /// Whether any circular reference was found
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        self.issues.iter().any(|i| i.kind == IssueKind::Circular)
    }

    /// Issues of one kind
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &GraphIssue> + '_ {
        self.issues.iter().filter(move |i| i.kind == kind)
    }

    /// Number of error-severity issues
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    /// Number of warning-severity issues
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }
}

/// Depth per node plus every distinct cycle, as path lists
fn compute_depths(graph: &DiGraph<String, ()>) -> (Vec<usize>, Vec<Vec<String>>) {
    let n = graph.node_count();
    let mut state = vec![Visit::Unvisited; n];
    let mut depth = vec![0usize; n];
    let mut seen_cycles: HashSet<BTreeSet<NodeIndex>> = HashSet::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    let frame_for = |node: NodeIndex| {
        // petgraph yields neighbors newest-first; reverse for discovery order.
        let mut successors: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Outgoing).collect();
        successors.reverse();
        successors.dedup();
        Frame {
            node,
            successors,
            next: 0,
            depth: 0,
        }
    };

    for root in graph.node_indices() {
        if state[root.index()] != Visit::Unvisited {
            continue;
        }
        state[root.index()] = Visit::InProgress;
        let mut stack = vec![frame_for(root)];

        while let Some(top) = stack.last_mut() {
            if top.next < top.successors.len() {
                let child = top.successors[top.next];
                top.next += 1;

                match state[child.index()] {
                    Visit::Done => {
                        top.depth = top.depth.max(depth[child.index()] + 1);
                    }
                    Visit::InProgress => {
                        // Re-entered node contributes depth 0.
                        top.depth = top.depth.max(1);
                        if let Some(pos) = stack.iter().position(|f| f.node == child) {
                            let members: Vec<NodeIndex> = stack[pos..].iter().map(|f| f.node).collect();
                            if seen_cycles.insert(members.iter().copied().collect()) {
                                cycles.push(members.iter().map(|idx| graph[*idx].clone()).collect());
                            }
                        }
                    }
                    Visit::Unvisited => {
                        state[child.index()] = Visit::InProgress;
                        stack.push(frame_for(child));
                    }
                }
            } else if let Some(done) = stack.pop() {
                state[done.node.index()] = Visit::Done;
                depth[done.node.index()] = done.depth;
                if let Some(parent) = stack.last_mut() {
                    parent.depth = parent.depth.max(done.depth + 1);
                }
            }
        }
    }

    (depth, cycles)
}

fn compute_metrics(nodes: &[GraphNode], edges: &[GraphEdge]) -> GraphMetrics {
    let total = nodes.len();
    let depth_sum: usize = nodes.iter().map(|n| n.depth).sum();

    #[allow(clippy::cast_precision_loss)]
    let avg_depth = if total == 0 {
        0.0
    } else {
        depth_sum as f64 / total as f64
    };

    GraphMetrics {
        total_tokens: total,
        primitive_count: nodes.iter().filter(|n| n.kind == NodeKind::Primitive).count(),
        semantic_count: nodes.iter().filter(|n| n.kind == NodeKind::Semantic).count(),
        unknown_count: nodes.iter().filter(|n| n.kind == NodeKind::Unknown).count(),
        max_depth: nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        avg_depth,
        isolated_count: nodes.iter().filter(|n| n.isolated).count(),
        total_edges: edges.len(),
        unresolved_edges: edges.iter().filter(|e| !e.resolved).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    #[test]
    fn classifies_node_kinds() {
        let store = MemoryTokenStore::from_raw([
            ("color.blue.500", "#3B82F6"),
            ("background.action.accent", "{color.blue.500}"),
            ("text.action.accent", "{color.missing}"),
        ]);
        let graph = DependencyGraph::build(&store);

        assert_eq!(graph.node("color.blue.500").unwrap().kind, NodeKind::Primitive);
        assert_eq!(graph.node("background.action.accent").unwrap().kind, NodeKind::Semantic);
        assert_eq!(graph.node("text.action.accent").unwrap().kind, NodeKind::Unknown);
        assert_eq!(graph.dependents("color.blue.500"), &["background.action.accent".to_string()]);
    }

    #[test]
    fn edge_resolution_reflects_store() {
        let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "1px"), ("c", "{zzz}")]);
        let graph = DependencyGraph::build(&store);

        assert_eq!(graph.metrics.total_edges, 2);
        assert_eq!(graph.metrics.unresolved_edges, 1);
        assert_eq!(graph.issues_of(IssueKind::Unresolved).count(), 1);
        assert!(graph.edges.iter().any(|e| e.to == "b" && e.resolved));
    }

    #[test]
    fn depth_of_chain() {
        let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{c}"), ("c", "#fff")]);
        let graph = DependencyGraph::build(&store);

        assert_eq!(graph.node("a").unwrap().depth, 2);
        assert_eq!(graph.node("b").unwrap().depth, 1);
        assert_eq!(graph.node("c").unwrap().depth, 0);
        assert_eq!(graph.metrics.max_depth, 2);
    }

    #[test]
    fn self_reference_is_circular() {
        let store = MemoryTokenStore::from_raw([("a", "1px solid {a}")]);
        let graph = DependencyGraph::build(&store);

        let circular: Vec<_> = graph.issues_of(IssueKind::Circular).collect();
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].paths, vec!["a"]);
    }

    #[test]
    fn orphans_only_in_larger_stores() {
        let small = MemoryTokenStore::from_raw([("a", "1"), ("b", "2")]);
        assert_eq!(DependencyGraph::build(&small).issues_of(IssueKind::Orphaned).count(), 0);

        let paths: Vec<String> = (0..11).map(|i| format!("t{i}")).collect();
        let large: MemoryTokenStore = paths
            .iter()
            .map(|p| semtok_token::Token::from_raw(p.as_str(), "1px"))
            .collect();
        let graph = DependencyGraph::build(&large);
        assert_eq!(graph.issues_of(IssueKind::Orphaned).count(), 11);
        assert_eq!(graph.issues_of(IssueKind::Orphaned).next().unwrap().severity, Severity::Info);
    }

    #[test]
    fn topological_order_puts_dependencies_first() {
        let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{c}"), ("c", "#fff")]);
        let graph = DependencyGraph::build(&store);
        assert_eq!(graph.topological_order().unwrap(), vec!["c", "b", "a"]);
    }

    #[test]
    fn transitive_dependents_follow_chain() {
        let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{c}"), ("c", "#fff"), ("d", "#000")]);
        let graph = DependencyGraph::build(&store);
        assert_eq!(graph.transitive_dependents("c").unwrap(), vec!["a", "b"]);
        assert!(graph.transitive_dependents("zzz").is_err());
    }

    #[test]
    fn serializes_without_arena() {
        let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "#fff")]);
        let json = serde_json::to_value(DependencyGraph::build(&store)).unwrap();
        assert!(json.get("graph").is_none());
        assert_eq!(json["nodes"][0]["outRefs"][0], "b");
    }
}
