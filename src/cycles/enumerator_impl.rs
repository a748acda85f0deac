use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::edge_filter::{EdgeTraverser, EdgeVerdict, NonAborting};
use crate::error::GyreError;
use crate::graph::{DirectedGraph, NodeId};
use crate::scc::{SccDecomposer, SccMembers};

/// One elementary cycle: the vertex sequence in traversal order, starting
/// at the cycle's lowest-id member, without repeating the closing vertex.
///
/// A single-element loop denotes a self-edge. Loops hold [`NodeId`]s, not
/// references, so they are plain values with no tie to the source graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loop {
    vertices: Vec<NodeId>,
}

impl Loop {
    pub fn vertices(&self) -> &[NodeId] {
        &self.vertices
    }

    /// Number of distinct vertices (equivalently, edges) on the cycle.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_self_loop(&self) -> bool {
        self.vertices.len() == 1
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.vertices.contains(&node)
    }
}

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, vertex) in self.vertices.iter().enumerate() {
            if position > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{vertex}")?;
        }
        Ok(())
    }
}

/// Enumerator for every elementary cycle of a directed graph (Johnson's
/// algorithm).
///
/// Repeatedly decomposes the subgraph induced by a shrinking vertex set,
/// walks the component containing the lowest remaining vertex with a
/// blocked-set circuit search, then retires that vertex. Each elementary
/// circuit is reported exactly once, owned by its lowest-id member.
///
/// There is no early-abort path: once started, an enumeration runs to
/// completion, and a traverser [`EdgeVerdict::Abort`] verdict is downgraded
/// to [`EdgeVerdict::Ignore`] for its duration.
pub struct CycleEnumerator {
    loops: Vec<Loop>,
}

impl Default for CycleEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleEnumerator {
    pub fn new() -> Self {
        Self { loops: Vec::new() }
    }

    /// Enumerate every elementary cycle of `graph` under the edges the
    /// traverser accepts. Results accumulate in [`CycleEnumerator::loops`].
    ///
    /// Both the circuit search and its unblock cascade run on explicit work
    /// stacks, so cycle length is bounded by memory, not the call stack.
    pub fn enumerate<N, E, T>(
        &mut self,
        graph: &DirectedGraph<N, E>,
        traverser: &mut T,
    ) -> Result<(), GyreError>
    where
        T: EdgeTraverser<E>,
    {
        let mut traverser = NonAborting(traverser);
        let decomposer = SccDecomposer::new();
        let mut included: BTreeSet<NodeId> = graph.sorted_node_ids().into_iter().collect();

        while let Some(&start) = included.first() {
            let decomposition = decomposer.decompose(graph, &mut traverser, Some(&included))?;
            // The decomposition is total over the included set, so `start`
            // always has a component; singletons without a self-edge simply
            // produce no circuit.
            if let Some(component) = decomposition
                .scc_of(start)
                .and_then(|scc| decomposition.members_of(scc))
            {
                self.search_component(graph, &mut traverser, component, start);
            }
            included.remove(&start);
        }
        Ok(())
    }

    /// All loops found so far, in discovery order.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn has_loops(&self) -> bool {
        !self.loops.is_empty()
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Consume the enumerator, handing the loops to the caller.
    pub fn into_loops(self) -> Vec<Loop> {
        self.loops
    }

    /// Blocked-set circuit search rooted at `root`, restricted to edges
    /// whose endpoints both lie in `component`. Every circuit through
    /// `root` inside the component is materialized exactly once.
    fn search_component<N, E, T>(
        &mut self,
        graph: &DirectedGraph<N, E>,
        traverser: &mut T,
        component: &SccMembers,
        root: NodeId,
    ) where
        T: EdgeTraverser<E>,
    {
        let mut blocked: HashSet<NodeId> = HashSet::new();
        // B-lists: blocked_on[w] holds the vertices waiting for w to
        // unblock before they can reach the root again.
        let mut blocked_on: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut path: Vec<NodeId> = Vec::new();

        path.push(root);
        blocked.insert(root);
        let mut frames = vec![CircuitFrame::open(graph, traverser, component, root)];

        loop {
            let Some(frame) = frames.last_mut() else {
                break;
            };

            if frame.next < frame.successors.len() {
                let w = frame.successors[frame.next];
                frame.next += 1;

                if w == root {
                    // The path stack, root-first, is one elementary cycle.
                    self.loops.push(Loop {
                        vertices: path.clone(),
                    });
                    frame.found = true;
                } else if !blocked.contains(&w) {
                    path.push(w);
                    blocked.insert(w);
                    frames.push(CircuitFrame::open(graph, traverser, component, w));
                }
                continue;
            }

            let Some(finished) = frames.pop() else {
                break;
            };
            if finished.found {
                unblock(finished.node, &mut blocked, &mut blocked_on);
            } else {
                // No circuit through this vertex yet: it stays blocked
                // until one of its successors unblocks.
                for &w in &finished.successors {
                    let waiters = blocked_on.entry(w).or_default();
                    if !waiters.contains(&finished.node) {
                        waiters.push(finished.node);
                    }
                }
            }
            path.pop();
            if let Some(parent) = frames.last_mut() {
                parent.found |= finished.found;
            }
        }
    }
}

/// One explicit frame of the circuit search.
struct CircuitFrame {
    node: NodeId,
    successors: Vec<NodeId>,
    next: usize,
    found: bool,
}

impl CircuitFrame {
    fn open<N, E, T>(
        graph: &DirectedGraph<N, E>,
        traverser: &mut T,
        component: &SccMembers,
        node: NodeId,
    ) -> Self
    where
        T: EdgeTraverser<E>,
    {
        let mut successors = Vec::new();
        if let Some(entry) = graph.node(node) {
            for edge in entry.outgoing() {
                if !component.contains(&edge.sink()) {
                    continue;
                }
                match traverser.classify(edge) {
                    EdgeVerdict::Traverse => successors.push(edge.sink()),
                    // The enumerator has no abort path; see `enumerate`.
                    EdgeVerdict::Ignore | EdgeVerdict::Abort => {}
                }
            }
        }
        successors.sort_unstable();
        Self {
            node,
            successors,
            next: 0,
            found: false,
        }
    }
}

/// Cascading unblock: clear the flag on `node`, then on every vertex that
/// was waiting on it, transitively.
fn unblock(
    node: NodeId,
    blocked: &mut HashSet<NodeId>,
    blocked_on: &mut HashMap<NodeId, Vec<NodeId>>,
) {
    let mut work = vec![node];
    while let Some(current) = work.pop() {
        blocked.remove(&current);
        if let Some(waiters) = blocked_on.remove(&current) {
            for waiter in waiters {
                if blocked.contains(&waiter) {
                    work.push(waiter);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::edge_filter::AcceptAll;
    use crate::graph::Edge;

    fn id(value: u32) -> NodeId {
        NodeId::new(value)
    }

    fn graph_from_edges(node_count: u32, edges: &[(u32, u32)]) -> DirectedGraph<(), ()> {
        let mut graph = DirectedGraph::new();
        for node in 0..node_count {
            graph.add_node(id(node), ()).unwrap();
        }
        for &(source, sink) in edges {
            graph.upsert_edge(id(source), id(sink), ()).unwrap();
        }
        graph
    }

    fn enumerate(graph: &DirectedGraph<(), ()>) -> Vec<Loop> {
        let mut enumerator = CycleEnumerator::new();
        enumerator.enumerate(graph, &mut AcceptAll).unwrap();
        enumerator.into_loops()
    }

    fn loop_of(ids: &[u32]) -> Loop {
        Loop {
            vertices: ids.iter().map(|&v| id(v)).collect(),
        }
    }

    #[test]
    fn test_path_graph_has_no_loops() {
        let graph = graph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert_eq!(enumerate(&graph), vec![]);
    }

    #[test]
    fn test_empty_graph_has_no_loops() {
        let graph = graph_from_edges(0, &[]);
        assert_eq!(enumerate(&graph), vec![]);
    }

    #[test]
    fn test_triangle_yields_one_loop_root_first() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(enumerate(&graph), vec![loop_of(&[0, 1, 2])]);
    }

    #[test]
    fn test_self_edge_yields_one_vertex_loop() {
        let graph = graph_from_edges(1, &[(0, 0)]);
        let loops = enumerate(&graph);
        assert_eq!(loops, vec![loop_of(&[0])]);
        assert!(loops[0].is_self_loop());
    }

    #[test]
    fn test_two_cycle() {
        let graph = graph_from_edges(2, &[(0, 1), (1, 0)]);
        assert_eq!(enumerate(&graph), vec![loop_of(&[0, 1])]);
    }

    #[test]
    fn test_complete_digraph_on_three_vertices() {
        // All six ordered pairs: three 2-cycles plus two 3-cycles.
        let graph = graph_from_edges(3, &[(0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)]);
        let loops = enumerate(&graph);

        assert_eq!(loops.len(), 5);
        let as_sets: HashSet<BTreeSet<NodeId>> = loops
            .iter()
            .map(|l| l.vertices().iter().copied().collect())
            .collect();
        // No duplicates even as vertex sets, except the two 3-cycles which
        // share theirs.
        assert_eq!(as_sets.len(), 4);
        assert!(loops.contains(&loop_of(&[0, 1])));
        assert!(loops.contains(&loop_of(&[0, 2])));
        assert!(loops.contains(&loop_of(&[1, 2])));
        assert!(loops.contains(&loop_of(&[0, 1, 2])));
        assert!(loops.contains(&loop_of(&[0, 2, 1])));
    }

    #[test]
    fn test_chorded_six_cycle() {
        // 0→1→2→3→4→5→0 with chords 1→4, 2→5 and 1→5.
        let graph = graph_from_edges(
            6,
            &[
                (0, 1),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 0),
                (1, 4),
                (2, 5),
                (1, 5),
            ],
        );
        let mut loops = enumerate(&graph);
        loops.sort_by_key(|l| l.vertices().to_vec());

        assert_eq!(
            loops,
            vec![
                loop_of(&[0, 1, 2, 3, 4, 5]),
                loop_of(&[0, 1, 2, 5]),
                loop_of(&[0, 1, 4, 5]),
                loop_of(&[0, 1, 5]),
            ]
        );
    }

    #[test]
    fn test_disjoint_cycles_are_all_found() {
        let graph = graph_from_edges(5, &[(0, 1), (1, 0), (2, 3), (3, 4), (4, 2)]);
        let loops = enumerate(&graph);

        assert_eq!(loops.len(), 2);
        assert!(loops.contains(&loop_of(&[0, 1])));
        assert!(loops.contains(&loop_of(&[2, 3, 4])));
    }

    #[test]
    fn test_ignored_edges_remove_cycles() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let mut drop_closing_edge = |edge: &Edge<()>| {
            if edge.source() == id(2) {
                EdgeVerdict::Ignore
            } else {
                EdgeVerdict::Traverse
            }
        };

        let mut enumerator = CycleEnumerator::new();
        enumerator.enumerate(&graph, &mut drop_closing_edge).unwrap();
        assert!(!enumerator.has_loops());
    }

    #[test]
    fn test_abort_verdict_is_treated_as_ignore() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let mut abort_on_closing_edge = |edge: &Edge<()>| {
            if edge.source() == id(2) {
                EdgeVerdict::Abort
            } else {
                EdgeVerdict::Traverse
            }
        };

        let mut enumerator = CycleEnumerator::new();
        enumerator
            .enumerate(&graph, &mut abort_on_closing_edge)
            .unwrap();
        // The enumeration ran to completion; the edge was merely dropped.
        assert_eq!(enumerator.loop_count(), 0);
    }

    #[test]
    fn test_loop_display() {
        assert_eq!(loop_of(&[0, 1, 5]).to_string(), "0 → 1 → 5");
        assert_eq!(loop_of(&[3]).to_string(), "3");
    }

    #[test]
    fn test_higher_id_cycles_survive_lower_id_retirement() {
        // A cycle among high ids only, plus an acyclic low-id prefix: the
        // enumeration must not stop after retiring the acyclic vertices.
        let graph = graph_from_edges(6, &[(0, 1), (1, 2), (3, 4), (4, 5), (5, 3)]);
        assert_eq!(enumerate(&graph), vec![loop_of(&[3, 4, 5])]);
    }
}
