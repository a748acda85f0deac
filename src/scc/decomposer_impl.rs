use std::collections::{BTreeSet, HashMap};

use crate::edge_filter::{EdgeTraverser, EdgeVerdict};
use crate::error::GyreError;
use crate::graph::{DirectedGraph, NodeId};

/// Ordered member set of one SCC. The minimum id is the representative.
pub type SccMembers = BTreeSet<NodeId>;

/// Aggregate payload of one SCC-graph edge: every original (source, sink)
/// edge whose endpoints landed in the two components.
pub type InterSccEdges = Vec<(NodeId, NodeId)>;

/// The contracted component graph.
///
/// An [`SccGraph`] is itself a [`DirectedGraph`]: its node ids are SCC ids
/// assigned sequentially from 0 in finishing order, each node payload is the
/// ordered member set, and each edge payload is the aggregated list of
/// original edges crossing that component pair (empty unless tracking was
/// enabled — without tracking the SCC graph carries no edges at all).
pub type SccGraph = DirectedGraph<SccMembers, InterSccEdges>;

/// Result of one decomposition: the contracted graph plus the node → SCC
/// membership index, owned together.
#[derive(Debug, Clone)]
pub struct SccDecomposition {
    scc_graph: SccGraph,
    membership: HashMap<NodeId, NodeId>,
    aborted: bool,
}

impl SccDecomposition {
    pub fn scc_graph(&self) -> &SccGraph {
        &self.scc_graph
    }

    /// Node → SCC-id index, total over every included node after a
    /// completed run. O(1) per query.
    pub fn membership(&self) -> &HashMap<NodeId, NodeId> {
        &self.membership
    }

    /// SCC id of `node`, if it was included and finalized.
    pub fn scc_of(&self, node: NodeId) -> Option<NodeId> {
        self.membership.get(&node).copied()
    }

    /// Member set of the SCC with id `scc`.
    pub fn members_of(&self, scc: NodeId) -> Option<&SccMembers> {
        self.scc_graph.node(scc).map(|node| node.payload())
    }

    pub fn scc_count(&self) -> usize {
        self.scc_graph.node_count()
    }

    /// True when the run was cut short by an
    /// [`EdgeVerdict::Abort`](crate::edge_filter::EdgeVerdict). An aborted
    /// decomposition is a documented partial result, not an error: it
    /// carries whatever components were finalized before the abort, and
    /// nodes still on the traversal path at that moment are absent from the
    /// partition.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// The partition as a set of member sets, independent of SCC-id
    /// assignment order. Two decompositions of the same graph and filter
    /// compare equal through this view even when their discovery order (and
    /// hence their SCC ids) differ.
    pub fn partition(&self) -> BTreeSet<SccMembers> {
        self.scc_graph
            .nodes()
            .map(|node| node.payload().clone())
            .collect()
    }
}

/// Tarjan SCC decomposition over the subgraph induced by an included vertex
/// set and a caller edge-filtering policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SccDecomposer {
    track_inter_scc_edges: bool,
}

impl SccDecomposer {
    /// Create a decomposer with inter-SCC edge tracking disabled.
    pub fn new() -> Self {
        Self {
            track_inter_scc_edges: false,
        }
    }

    /// Enable or disable inter-SCC edge attribution. When enabled, every
    /// accepted edge whose endpoints end up in different components is
    /// recorded exactly once in the aggregate payload of the corresponding
    /// SCC-graph edge.
    pub fn with_inter_scc_tracking(mut self, track: bool) -> Self {
        self.track_inter_scc_edges = track;
        self
    }

    /// Decompose `graph` (or the subgraph induced by `included`) into
    /// strongly connected components.
    ///
    /// Roots are tried in ascending id order; discovery order never changes
    /// the partition, only the finishing order in which SCC ids are handed
    /// out. The DFS runs on an explicit frame stack, so component depth is
    /// bounded by memory rather than by the call stack.
    ///
    /// # Errors
    ///
    /// [`GyreError::NoSuchNode`] if `included` names an id the graph does
    /// not contain. A traverser [`EdgeVerdict::Abort`] is not an error; see
    /// [`SccDecomposition::aborted`].
    pub fn decompose<N, E, T>(
        &self,
        graph: &DirectedGraph<N, E>,
        traverser: &mut T,
        included: Option<&BTreeSet<NodeId>>,
    ) -> Result<SccDecomposition, GyreError>
    where
        T: EdgeTraverser<E>,
    {
        let included: BTreeSet<NodeId> = match included {
            Some(set) => {
                for &id in set {
                    if !graph.contains_node(id) {
                        return Err(GyreError::NoSuchNode { id });
                    }
                }
                set.clone()
            }
            None => graph.sorted_node_ids().into_iter().collect(),
        };

        let mut state = TarjanState::new(self.track_inter_scc_edges);
        for &root in &included {
            if state.visited.contains_key(&root) {
                continue;
            }
            match state.visit(graph, traverser, &included, root)? {
                Walk::Completed => {}
                Walk::Aborted => {
                    state.aborted = true;
                    break;
                }
            }
        }
        Ok(state.finish())
    }
}

#[derive(Debug, Clone, Copy)]
struct VertexState {
    index: u32,
    on_path: bool,
}

/// One explicit DFS frame. `lowlink` lives here while the vertex is open
/// and is merged into the parent frame when this one pops.
struct Frame {
    node: NodeId,
    index: u32,
    lowlink: u32,
    successors: Vec<NodeId>,
    next: usize,
}

enum Walk {
    Completed,
    Aborted,
}

struct TarjanState {
    track: bool,
    next_index: u32,
    next_scc_id: u32,
    visited: HashMap<NodeId, VertexState>,
    path: Vec<NodeId>,
    scc_graph: SccGraph,
    membership: HashMap<NodeId, NodeId>,
    /// Deferred inter-SCC edges keyed by source node, queued once the
    /// target's component is settled and drained when the source's
    /// component finalizes.
    pending: HashMap<NodeId, Vec<(NodeId, NodeId)>>,
    aborted: bool,
}

impl TarjanState {
    fn new(track: bool) -> Self {
        Self {
            track,
            next_index: 0,
            next_scc_id: 0,
            visited: HashMap::new(),
            path: Vec::new(),
            scc_graph: SccGraph::new(),
            membership: HashMap::new(),
            pending: HashMap::new(),
            aborted: false,
        }
    }

    fn visit<N, E, T>(
        &mut self,
        graph: &DirectedGraph<N, E>,
        traverser: &mut T,
        included: &BTreeSet<NodeId>,
        root: NodeId,
    ) -> Result<Walk, GyreError>
    where
        T: EdgeTraverser<E>,
    {
        let Some(first) = self.open(graph, traverser, included, root)? else {
            return Ok(Walk::Aborted);
        };
        let mut frames = vec![first];

        loop {
            let Some(frame) = frames.last_mut() else {
                return Ok(Walk::Completed);
            };

            if frame.next < frame.successors.len() {
                let v = frame.node;
                let w = frame.successors[frame.next];
                frame.next += 1;

                match self.visited.get(&w).copied() {
                    None => match self.open(graph, traverser, included, w)? {
                        Some(child) => frames.push(child),
                        None => return Ok(Walk::Aborted),
                    },
                    Some(ws) if ws.on_path => {
                        frame.lowlink = frame.lowlink.min(ws.index);
                    }
                    Some(_) => {
                        // w already settled into an older SCC: queue the
                        // crossing edge until v's own SCC is known.
                        if self.track {
                            self.pending.entry(v).or_default().push((v, w));
                        }
                    }
                }
                continue;
            }

            let Some(finished) = frames.pop() else {
                return Ok(Walk::Completed);
            };
            let rooted = finished.lowlink == finished.index;
            if rooted {
                self.finalize_scc(finished.node)?;
            }
            if let Some(parent) = frames.last_mut() {
                parent.lowlink = parent.lowlink.min(finished.lowlink);
                // If the child just rooted an SCC it is settled now and the
                // tree edge parent → child crosses components.
                if self.track && rooted {
                    self.pending
                        .entry(parent.node)
                        .or_default()
                        .push((parent.node, finished.node));
                }
            }
        }
    }

    /// Mark `node` discovered, push it on the path and collect its accepted
    /// successors within the induced subgraph. Returns `None` on an abort
    /// verdict.
    fn open<N, E, T>(
        &mut self,
        graph: &DirectedGraph<N, E>,
        traverser: &mut T,
        included: &BTreeSet<NodeId>,
        node: NodeId,
    ) -> Result<Option<Frame>, GyreError>
    where
        T: EdgeTraverser<E>,
    {
        let index = self.next_index;
        self.next_index += 1;
        self.visited.insert(
            node,
            VertexState {
                index,
                on_path: true,
            },
        );
        self.path.push(node);

        let entry = graph
            .node(node)
            .ok_or(GyreError::NoSuchNode { id: node })?;
        let mut successors = Vec::new();
        for edge in entry.outgoing() {
            if !included.contains(&edge.sink()) {
                continue;
            }
            match traverser.classify(edge) {
                EdgeVerdict::Traverse => successors.push(edge.sink()),
                EdgeVerdict::Ignore => {}
                EdgeVerdict::Abort => return Ok(None),
            }
        }
        successors.sort_unstable();

        Ok(Some(Frame {
            node,
            index,
            lowlink: index,
            successors,
            next: 0,
        }))
    }

    /// Pop the path down to and including `root`, bundle the popped nodes
    /// into a new SCC node and resolve the deferred crossing edges whose
    /// source lies in it.
    fn finalize_scc(&mut self, root: NodeId) -> Result<(), GyreError> {
        let mut members = SccMembers::new();
        while let Some(member) = self.path.pop() {
            if let Some(state) = self.visited.get_mut(&member) {
                state.on_path = false;
            }
            members.insert(member);
            if member == root {
                break;
            }
        }

        let scc_id = NodeId::new(self.next_scc_id);
        self.next_scc_id += 1;
        for &member in &members {
            self.membership.insert(member, scc_id);
        }

        let mut crossing: InterSccEdges = Vec::new();
        if self.track {
            for &member in &members {
                if let Some(edges) = self.pending.remove(&member) {
                    crossing.extend(edges);
                }
            }
        }

        self.scc_graph.add_node(scc_id, members)?;
        for (source, sink) in crossing {
            let Some(target) = self.membership.get(&sink).copied() else {
                continue;
            };
            if target == scc_id {
                continue;
            }
            if let Some(edge) = self
                .scc_graph
                .node_mut(scc_id)
                .and_then(|node| node.edge_to_mut(target))
            {
                edge.payload_mut().push((source, sink));
            } else {
                self.scc_graph
                    .upsert_edge(scc_id, target, vec![(source, sink)])?;
            }
        }
        Ok(())
    }

    fn finish(self) -> SccDecomposition {
        SccDecomposition {
            scc_graph: self.scc_graph,
            membership: self.membership,
            aborted: self.aborted,
        }
    }
}
