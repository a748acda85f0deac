//! # Directed Graph Module
//!
//! Arena-style directed graph with caller-defined node and edge payloads.
//!
//! ## Components
//!
//! - **DirectedGraph**: node table keyed by [`NodeId`], successor-only edge
//!   maps, upsert edge semantics, deep clone, structural equality
//! - **PayloadCodec**: per-payload binary encoding used by
//!   [`DirectedGraph::to_writer`] / [`DirectedGraph::from_reader`]
//!
//! ## Example
//!
//! ```
//! use gyre::graph::{DirectedGraph, NodeId};
//!
//! # fn main() -> Result<(), gyre::error::GyreError> {
//! let mut graph: DirectedGraph<&str, u32> = DirectedGraph::new();
//! let a = NodeId::new(0);
//! let b = NodeId::new(1);
//! graph.add_node(a, "first")?;
//! graph.add_node(b, "second")?;
//!
//! // Edges are keyed by their ordered (source, sink) pair: inserting the
//! // same pair twice replaces the payload and hands the old one back.
//! assert_eq!(graph.upsert_edge(a, b, 10)?, None);
//! assert_eq!(graph.upsert_edge(a, b, 20)?, Some(10));
//!
//! assert_eq!(*graph.edge(a, b).unwrap().payload(), 20);
//! assert_eq!(graph.node_count(), 2);
//! # Ok(())
//! # }
//! ```

mod codec;
mod directed;
mod types;

// Re-export main types
pub use codec::PayloadCodec;
pub use directed::DirectedGraph;
pub use types::{Edge, Node, NodeId};
