use miette::Diagnostic;
use thiserror::Error;

use crate::graph::NodeId;

/// Errors surfaced by graph operations, decomposition and the binary codec.
///
/// Every failure here is recoverable; nothing in the crate terminates the
/// process. An [`EdgeVerdict::Abort`](crate::edge_filter::EdgeVerdict) from a
/// traverser is a control signal, not an error, and never maps to a variant
/// of this enum.
#[derive(Error, Debug, Diagnostic)]
pub enum GyreError {
    #[error("No node with id {id} exists in the graph")]
    #[diagnostic(
        code(gyre::no_such_node),
        help("Add the node first, or check the id for typos")
    )]
    NoSuchNode { id: NodeId },

    #[error("A node with id {id} already exists in the graph")]
    #[diagnostic(
        code(gyre::identifier_collision),
        help("Node ids must be unique per graph; use add_node_auto to let the graph assign one")
    )]
    IdentifierCollision { id: NodeId },

    #[error("Capacity exceeded: {what} is limited to {limit}")]
    #[diagnostic(
        code(gyre::capacity_exceeded),
        help("Raise or remove the configured limit, or shrink the input")
    )]
    CapacityExceeded { what: &'static str, limit: usize },

    #[error("IO error")]
    #[diagnostic(
        code(gyre::io_error),
        help("Check the stream: truncated or corrupt graph files surface here")
    )]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(gyre::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(gyre::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),
}
