//! # Strongly Connected Component Decomposition
//!
//! Tarjan's algorithm over the subgraph induced by an optional vertex
//! subset and a caller edge-filtering policy.
//!
//! ## Components
//!
//! - **SccDecomposer**: runs the decomposition; inter-SCC edge attribution
//!   is opt-in
//! - **SccDecomposition**: the contracted [`SccGraph`] plus the node → SCC
//!   membership index, owned together
//!
//! ## Example
//!
//! ```
//! use gyre::edge_filter::AcceptAll;
//! use gyre::graph::{DirectedGraph, NodeId};
//! use gyre::scc::SccDecomposer;
//!
//! # fn main() -> Result<(), gyre::error::GyreError> {
//! let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
//! for id in 0..3 {
//!     graph.add_node(NodeId::new(id), ())?;
//! }
//! graph.upsert_edge(NodeId::new(0), NodeId::new(1), ())?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(0), ())?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(2), ())?;
//!
//! let result = SccDecomposer::new().decompose(&graph, &mut AcceptAll, None)?;
//! assert_eq!(result.scc_count(), 2);
//! assert_eq!(result.scc_of(NodeId::new(0)), result.scc_of(NodeId::new(1)));
//! # Ok(())
//! # }
//! ```

mod decomposer_impl;

// Re-export main types
pub use decomposer_impl::{
    InterSccEdges, SccDecomposer, SccDecomposition, SccGraph, SccMembers,
};
