//! # Elementary Cycle Enumeration
//!
//! Johnson's algorithm for listing every elementary (simple) cycle of a
//! directed graph, driven by repeated SCC decomposition over a shrinking
//! vertex set.
//!
//! ## Example
//!
//! ```
//! use gyre::cycles::CycleEnumerator;
//! use gyre::edge_filter::AcceptAll;
//! use gyre::graph::{DirectedGraph, NodeId};
//!
//! # fn main() -> Result<(), gyre::error::GyreError> {
//! let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
//! for id in 0..3 {
//!     graph.add_node(NodeId::new(id), ())?;
//! }
//! graph.upsert_edge(NodeId::new(0), NodeId::new(1), ())?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(2), ())?;
//! graph.upsert_edge(NodeId::new(2), NodeId::new(0), ())?;
//!
//! let mut enumerator = CycleEnumerator::new();
//! enumerator.enumerate(&graph, &mut AcceptAll)?;
//!
//! assert_eq!(enumerator.loop_count(), 1);
//! assert_eq!(enumerator.loops()[0].to_string(), "0 → 1 → 2");
//! # Ok(())
//! # }
//! ```

mod enumerator_impl;

// Re-export main types
pub use enumerator_impl::{CycleEnumerator, Loop};
