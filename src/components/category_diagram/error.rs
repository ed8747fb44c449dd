//! Errors raised by graph mutations.
//!
//! None of these are fatal. The diagram state logs them and leaves the
//! graph untouched, so the worst outcome is a mutation that did not happen.

use thiserror::Error;

use super::types::{EdgeId, NodeId};

/// Rejected graph mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// Node label was empty or whitespace only.
	#[error("node label must not be empty")]
	InvalidLabel,

	/// An operation referenced a node that is not in the graph.
	#[error("unknown node {0}")]
	UnknownNode(NodeId),

	/// A second classifier was requested; the existing one is kept.
	#[error("classifier already exists as {0}")]
	DuplicateClassifier(NodeId),

	/// An operation referenced an edge that is not in the graph.
	#[error("unknown edge {0}")]
	UnknownEdge(EdgeId),
}
