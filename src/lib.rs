//! # Gyre - Directed Graphs, Components and Cycles
//!
//! Gyre is a directed-graph toolkit built around two algorithms: Tarjan's
//! strongly-connected-component decomposition and Johnson's enumeration of
//! all elementary cycles. Typical consumers are cyclic-dependency and
//! deadlock detectors that need not just "is there a cycle?" but the exact
//! components, the edges crossing between them, and every simple circuit.
//!
//! ## Main Components
//!
//! - **Graph**: arena-style [`graph::DirectedGraph`] with caller-defined
//!   node and edge payloads, upsert edge semantics and a binary codec
//! - **Scc**: [`scc::SccDecomposer`] contracts a graph into its strongly
//!   connected components, optionally attributing every inter-component
//!   edge to an aggregate edge of the contracted graph
//! - **Cycles**: [`cycles::CycleEnumerator`] lists every elementary cycle,
//!   each reported exactly once
//! - **Reports**: human-readable and JSON renderings of enumeration results
//!
//! Edge participation is controlled everywhere by one policy type,
//! [`edge_filter::EdgeTraverser`], whose verdict per edge is traverse,
//! ignore, or abort.
//!
//! ## Usage
//!
//! ### Decomposing a graph into components
//!
//! ```
//! use gyre::edge_filter::AcceptAll;
//! use gyre::graph::{DirectedGraph, NodeId};
//! use gyre::scc::SccDecomposer;
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
//! for (id, name) in [(0, "parser"), (1, "resolver"), (2, "emitter")] {
//!     graph.add_node(NodeId::new(id), name)?;
//! }
//! // parser <-> resolver form a component; emitter hangs off it.
//! graph.upsert_edge(NodeId::new(0), NodeId::new(1), ())?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(0), ())?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(2), ())?;
//!
//! let decomposition = SccDecomposer::new()
//!     .with_inter_scc_tracking(true)
//!     .decompose(&graph, &mut AcceptAll, None)?;
//!
//! assert_eq!(decomposition.scc_count(), 2);
//! assert_eq!(
//!     decomposition.scc_of(NodeId::new(0)),
//!     decomposition.scc_of(NodeId::new(1)),
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Enumerating every elementary cycle
//!
//! ```
//! use gyre::cycles::CycleEnumerator;
//! use gyre::edge_filter::AcceptAll;
//! use gyre::graph::{DirectedGraph, NodeId};
//! use gyre::reports::{JsonReportGenerator, LoopReportGenerator};
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph: DirectedGraph<(), ()> = DirectedGraph::new();
//! for id in 0..3 {
//!     graph.add_node(NodeId::new(id), ())?;
//! }
//! graph.upsert_edge(NodeId::new(0), NodeId::new(1), ())?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(0), ())?;
//! graph.upsert_edge(NodeId::new(2), NodeId::new(2), ())?;
//!
//! let mut enumerator = CycleEnumerator::new();
//! enumerator.enumerate(&graph, &mut AcceptAll)?;
//! assert_eq!(enumerator.loop_count(), 2);
//!
//! let json = JsonReportGenerator::new().generate_report(&enumerator)?;
//! assert!(json.contains("\"loop_count\": 2"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Filtering edges
//!
//! ```
//! use gyre::cycles::CycleEnumerator;
//! use gyre::edge_filter::EdgeVerdict;
//! use gyre::graph::{DirectedGraph, Edge, NodeId};
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph: DirectedGraph<(), u32> = DirectedGraph::new();
//! graph.add_node(NodeId::new(0), ())?;
//! graph.add_node(NodeId::new(1), ())?;
//! graph.upsert_edge(NodeId::new(0), NodeId::new(1), 10)?;
//! graph.upsert_edge(NodeId::new(1), NodeId::new(0), 1)?;
//!
//! // Only follow edges with weight >= 5: the cycle disappears.
//! let mut heavy_only = |edge: &Edge<u32>| {
//!     if *edge.payload() >= 5 {
//!         EdgeVerdict::Traverse
//!     } else {
//!         EdgeVerdict::Ignore
//!     }
//! };
//!
//! let mut enumerator = CycleEnumerator::new();
//! enumerator.enumerate(&graph, &mut heavy_only)?;
//! assert!(!enumerator.has_loops());
//! # Ok(())
//! # }
//! ```
//!
//! ### Serializing a graph
//!
//! ```
//! use gyre::graph::{DirectedGraph, NodeId};
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph: DirectedGraph<String, u32> = DirectedGraph::new();
//! graph.add_node(NodeId::new(0), "origin".to_string())?;
//! graph.add_node(NodeId::new(1), "target".to_string())?;
//! graph.upsert_edge(NodeId::new(0), NodeId::new(1), 42)?;
//!
//! let mut bytes = Vec::new();
//! graph.to_writer(&mut bytes)?;
//! let restored = DirectedGraph::<String, u32>::from_reader(&mut bytes.as_slice())?;
//!
//! assert_eq!(graph, restored);
//! assert_eq!(restored.node(NodeId::new(0)).unwrap().payload(), "origin");
//! # Ok(())
//! # }
//! ```

pub mod cycles;
pub mod edge_filter;
pub mod error;
pub mod graph;
pub mod reports;
pub mod scc;
