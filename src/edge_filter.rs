//! Edge filtering policy shared by the decomposer and the enumerator

use crate::graph::Edge;

/// Classification of a single edge during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeVerdict {
    /// Follow the edge.
    Traverse,
    /// Drop the edge from consideration entirely, as if it were not in the
    /// graph. An ignored edge contributes to no SCC and to no inter-SCC
    /// aggregate.
    Ignore,
    /// Halt the running decomposition immediately. The decomposer returns
    /// whatever partition it has finalized so far, flagged as aborted; the
    /// cycle enumerator downgrades this verdict to [`EdgeVerdict::Ignore`].
    Abort,
}

/// Caller-supplied policy deciding which edges an algorithm may follow.
///
/// Implemented for any `FnMut(&Edge<E>) -> EdgeVerdict` closure, so most
/// call sites can pass a closure directly:
///
/// ```
/// use gyre::edge_filter::{EdgeTraverser, EdgeVerdict};
/// use gyre::graph::Edge;
///
/// let mut heavy_only = |edge: &Edge<u32>| {
///     if *edge.payload() >= 10 {
///         EdgeVerdict::Traverse
///     } else {
///         EdgeVerdict::Ignore
///     }
/// };
/// # let _: &mut dyn EdgeTraverser<u32> = &mut heavy_only;
/// ```
pub trait EdgeTraverser<E> {
    fn classify(&mut self, edge: &Edge<E>) -> EdgeVerdict;
}

impl<E, F> EdgeTraverser<E> for F
where
    F: FnMut(&Edge<E>) -> EdgeVerdict,
{
    fn classify(&mut self, edge: &Edge<E>) -> EdgeVerdict {
        self(edge)
    }
}

/// Traverser that accepts every edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<E> EdgeTraverser<E> for AcceptAll {
    fn classify(&mut self, _edge: &Edge<E>) -> EdgeVerdict {
        EdgeVerdict::Traverse
    }
}

/// Adapter that downgrades [`EdgeVerdict::Abort`] to [`EdgeVerdict::Ignore`].
///
/// The cycle enumerator runs to completion once started; it wraps the caller
/// traverser in this adapter so that a verdict meant to cancel a
/// decomposition cannot tear an enumeration in half.
pub(crate) struct NonAborting<'a, T>(pub(crate) &'a mut T);

impl<E, T: EdgeTraverser<E>> EdgeTraverser<E> for NonAborting<'_, T> {
    fn classify(&mut self, edge: &Edge<E>) -> EdgeVerdict {
        match self.0.classify(edge) {
            EdgeVerdict::Abort => EdgeVerdict::Ignore,
            verdict => verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, NodeId};

    fn one_edge_graph() -> DirectedGraph<(), u32> {
        let mut graph = DirectedGraph::new();
        graph.add_node(NodeId::new(0), ()).unwrap();
        graph.add_node(NodeId::new(1), ()).unwrap();
        graph
            .upsert_edge(NodeId::new(0), NodeId::new(1), 5)
            .unwrap();
        graph
    }

    #[test]
    fn test_accept_all_traverses() {
        let graph = one_edge_graph();
        let edge = graph.edge(NodeId::new(0), NodeId::new(1)).unwrap();
        assert_eq!(AcceptAll.classify(edge), EdgeVerdict::Traverse);
    }

    #[test]
    fn test_closure_traverser() {
        let graph = one_edge_graph();
        let edge = graph.edge(NodeId::new(0), NodeId::new(1)).unwrap();

        let mut traverser = |e: &crate::graph::Edge<u32>| {
            if *e.payload() >= 10 {
                EdgeVerdict::Traverse
            } else {
                EdgeVerdict::Ignore
            }
        };
        assert_eq!(traverser.classify(edge), EdgeVerdict::Ignore);
    }

    #[test]
    fn test_non_aborting_downgrades_abort() {
        let graph = one_edge_graph();
        let edge = graph.edge(NodeId::new(0), NodeId::new(1)).unwrap();

        let mut always_abort = |_: &crate::graph::Edge<u32>| EdgeVerdict::Abort;
        let mut adapter = NonAborting(&mut always_abort);
        assert_eq!(adapter.classify(edge), EdgeVerdict::Ignore);
    }

    #[test]
    fn test_non_aborting_passes_other_verdicts() {
        let graph = one_edge_graph();
        let edge = graph.edge(NodeId::new(0), NodeId::new(1)).unwrap();

        let mut accept = AcceptAll;
        let mut adapter = NonAborting(&mut accept);
        assert_eq!(adapter.classify(edge), EdgeVerdict::Traverse);
    }
}
