//! The directed graph container

use std::collections::HashMap;

use super::types::{Edge, Node, NodeId};
use crate::error::GyreError;

/// Directed graph with singly-keyed edges and caller-defined payload types.
///
/// Nodes live in an arena keyed by [`NodeId`]; edges store ids rather than
/// references, so derived graphs (such as an
/// [`SccGraph`](crate::scc::SccGraph)) can outlive or be dropped
/// independently of their source graph. Lookups by id are average O(1).
///
/// The graph is polymorphic over the node payload `N` and the edge payload
/// `E`. Operations state the bounds they actually need: [`Clone`] for
/// [`DirectedGraph::clone`], [`PartialEq`] on `E` for equality, and
/// [`PayloadCodec`](crate::graph::PayloadCodec) for the binary codec.
#[derive(Debug, Clone)]
pub struct DirectedGraph<N, E> {
    nodes: HashMap<NodeId, Node<N, E>>,
    node_limit: Option<usize>,
    next_auto_id: u32,
}

impl<N, E> Default for DirectedGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DirectedGraph<N, E> {
    /// Create an empty graph without a node limit.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            node_limit: None,
            next_auto_id: 0,
        }
    }

    /// Create an empty graph that refuses to grow past `limit` nodes with
    /// [`GyreError::CapacityExceeded`].
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            nodes: HashMap::new(),
            node_limit: Some(limit),
            next_auto_id: 0,
        }
    }

    /// Insert a node under a caller-chosen id.
    ///
    /// # Errors
    ///
    /// [`GyreError::IdentifierCollision`] if a node with `id` already
    /// exists, [`GyreError::CapacityExceeded`] if a node limit is configured
    /// and reached.
    pub fn add_node(&mut self, id: NodeId, payload: N) -> Result<(), GyreError> {
        if self.nodes.contains_key(&id) {
            return Err(GyreError::IdentifierCollision { id });
        }
        self.check_node_capacity()?;
        self.nodes.insert(id, Node::new(id, payload));
        Ok(())
    }

    /// Insert a node under the lowest unused auto-assigned id and return it.
    ///
    /// Auto-assignment never collides with caller-chosen ids; it scans
    /// forward from the last id it handed out.
    pub fn add_node_auto(&mut self, payload: N) -> Result<NodeId, GyreError> {
        self.check_node_capacity()?;
        while self.nodes.contains_key(&NodeId::new(self.next_auto_id)) {
            self.next_auto_id = self.next_auto_id.checked_add(1).ok_or(
                GyreError::CapacityExceeded {
                    what: "node id space",
                    limit: u32::MAX as usize,
                },
            )?;
        }
        let id = NodeId::new(self.next_auto_id);
        self.nodes.insert(id, Node::new(id, payload));
        self.next_auto_id = self.next_auto_id.wrapping_add(1);
        Ok(id)
    }

    /// Add an edge from `source` to `sink`, replacing any existing edge for
    /// that ordered pair.
    ///
    /// This is deliberately an upsert: the previous payload, if any, is
    /// returned to the caller instead of being silently discarded.
    ///
    /// # Errors
    ///
    /// [`GyreError::NoSuchNode`] if either endpoint is absent.
    pub fn upsert_edge(
        &mut self,
        source: NodeId,
        sink: NodeId,
        payload: E,
    ) -> Result<Option<E>, GyreError> {
        if !self.nodes.contains_key(&sink) {
            return Err(GyreError::NoSuchNode { id: sink });
        }
        let node = self
            .nodes
            .get_mut(&source)
            .ok_or(GyreError::NoSuchNode { id: source })?;
        Ok(node
            .insert_edge(Edge::new(source, sink, payload))
            .map(Edge::into_payload))
    }

    /// Remove the edge from `source` to `sink`, returning its payload.
    ///
    /// A no-op returning `None` when the edge (or either endpoint) is
    /// absent.
    pub fn remove_edge(&mut self, source: NodeId, sink: NodeId) -> Option<E> {
        self.nodes
            .get_mut(&source)?
            .remove_edge(sink)
            .map(Edge::into_payload)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<N, E>> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<N, E>> {
        self.nodes.get_mut(&id)
    }

    pub fn edge(&self, source: NodeId, sink: NodeId) -> Option<&Edge<E>> {
        self.nodes.get(&source)?.edge_to(sink)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over the nodes, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<N, E>> {
        self.nodes.values()
    }

    /// All node ids sorted ascending.
    pub fn sorted_node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Total number of edges across all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::out_degree).sum()
    }

    fn check_node_capacity(&self) -> Result<(), GyreError> {
        match self.node_limit {
            Some(limit) if self.nodes.len() >= limit => Err(GyreError::CapacityExceeded {
                what: "node table",
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// Structural equality over the node-id universe and the outgoing-edge sets.
///
/// Two graphs are equal iff they hold the same node ids and, for every
/// node, the same set of (sink id, edge payload) pairs. **Node payloads are
/// intentionally excluded from the comparison** — equality answers "same
/// shape and same edge annotations", which is what the decomposition and
/// enumeration layers care about. This is a deliberate simplification, not
/// an oversight; compare payloads separately if they matter.
impl<N, E: PartialEq> PartialEq for DirectedGraph<N, E> {
    fn eq(&self, other: &Self) -> bool {
        if self.nodes.len() != other.nodes.len() {
            return false;
        }
        self.nodes.iter().all(|(id, node)| {
            let Some(other_node) = other.nodes.get(id) else {
                return false;
            };
            node.out_degree() == other_node.out_degree()
                && node.outgoing().all(|edge| {
                    other_node.edge_to(edge.sink()).map(Edge::payload) == Some(edge.payload())
                })
        })
    }
}
