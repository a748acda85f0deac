//! Core graph types
//!
//! This module contains the fundamental data structures of the directed
//! graph: node identifiers, nodes and their successor-only edge maps.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Dense, non-negative node identifier, unique within one graph.
///
/// Ids are plain `u32` values, either chosen by the caller or assigned by
/// [`DirectedGraph::add_node_auto`](crate::graph::DirectedGraph::add_node_auto).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A directed edge identified by its ordered (source, sink) id pair.
///
/// The graph holds at most one edge per ordered pair; inserting a second
/// edge for the same pair replaces the payload (see
/// [`DirectedGraph::upsert_edge`](crate::graph::DirectedGraph::upsert_edge)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<E> {
    source: NodeId,
    sink: NodeId,
    payload: E,
}

impl<E> Edge<E> {
    pub(crate) fn new(source: NodeId, sink: NodeId, payload: E) -> Self {
        Self {
            source,
            sink,
            payload,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }

    pub(crate) fn into_payload(self) -> E {
        self.payload
    }

    /// True for an edge whose source and sink coincide.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.sink
    }
}

/// A node: id, caller-owned payload and the outgoing edges keyed by sink id.
///
/// Only successors are indexed; there is no predecessor list.
#[derive(Debug, Clone)]
pub struct Node<N, E> {
    id: NodeId,
    payload: N,
    outgoing: HashMap<NodeId, Edge<E>>,
}

impl<N, E> Node<N, E> {
    pub(crate) fn new(id: NodeId, payload: N) -> Self {
        Self {
            id,
            payload,
            outgoing: HashMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn payload(&self) -> &N {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut N {
        &mut self.payload
    }

    /// Outgoing edge towards `sink`, if present.
    pub fn edge_to(&self, sink: NodeId) -> Option<&Edge<E>> {
        self.outgoing.get(&sink)
    }

    pub fn edge_to_mut(&mut self, sink: NodeId) -> Option<&mut Edge<E>> {
        self.outgoing.get_mut(&sink)
    }

    /// Iterator over the outgoing edges, in unspecified order.
    pub fn outgoing(&self) -> impl Iterator<Item = &Edge<E>> {
        self.outgoing.values()
    }

    /// Successor ids sorted ascending. Traversals use this to make visit
    /// order deterministic.
    pub fn sorted_successors(&self) -> Vec<NodeId> {
        let mut sinks: Vec<NodeId> = self.outgoing.keys().copied().collect();
        sinks.sort_unstable();
        sinks
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge<E>) -> Option<Edge<E>> {
        self.outgoing.insert(edge.sink(), edge)
    }

    pub(crate) fn remove_edge(&mut self, sink: NodeId) -> Option<Edge<E>> {
        self.outgoing.remove(&sink)
    }
}
