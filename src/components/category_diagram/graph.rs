//! Canonical node and edge storage.
//!
//! The graph knows nothing about layout or rendering. All mutation goes
//! through the methods here, which keep three invariants:
//! - every edge endpoint refers to a live node,
//! - at most one node is a classifier,
//! - ids are handed out monotonically and never reused.

use log::debug;

use super::error::GraphError;
use super::types::{Edge, EdgeId, MorphismKind, Node, NodeId, NodeKind};

/// Label forced onto the automatically created terminal object.
pub const TERMINAL_LABEL: &str = "1";

/// Label given to the classifier object.
pub const CLASSIFIER_LABEL: &str = "Ω";

/// Mutable diagram: objects and morphisms.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_node: u32,
	next_edge: u32,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an object.
	///
	/// When `kind` is `None` and no node has ever been added, the node becomes
	/// the terminal object and its label is replaced by [`TERMINAL_LABEL`].
	/// Otherwise `None` means [`NodeKind::Plain`].
	pub fn add_node(&mut self, label: &str, kind: Option<NodeKind>) -> Result<Node, GraphError> {
		let label = label.trim();
		if label.is_empty() {
			return Err(GraphError::InvalidLabel);
		}

		let (label, kind) = match kind {
			None if self.next_node == 0 => (TERMINAL_LABEL, NodeKind::Terminal),
			None => (label, NodeKind::Plain),
			Some(kind) => (label, kind),
		};

		if kind == NodeKind::Classifier {
			if let Some(existing) = self.classifier() {
				return Err(GraphError::DuplicateClassifier(existing.id));
			}
		}

		let node = Node {
			id: NodeId(self.next_node),
			label: label.to_string(),
			kind,
		};
		self.next_node += 1;
		debug!("graph: added node {} {:?} {:?}", node.id, node.kind, node.label);
		self.nodes.push(node.clone());
		Ok(node)
	}

	/// Add a morphism. Parallel edges and self-loops are kept as-is.
	pub fn add_edge(
		&mut self,
		source: NodeId,
		target: NodeId,
		kind: MorphismKind,
	) -> Result<Edge, GraphError> {
		for id in [source, target] {
			if !self.contains_node(id) {
				return Err(GraphError::UnknownNode(id));
			}
		}

		let edge = Edge {
			id: EdgeId(self.next_edge),
			source,
			target,
			kind,
		};
		self.next_edge += 1;
		debug!("graph: added edge {} {} -> {}", edge.id, source, target);
		self.edges.push(edge.clone());
		Ok(edge)
	}

	/// Remove a node together with every edge incident to it.
	pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
		let pos = self
			.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or(GraphError::UnknownNode(id))?;
		let node = self.nodes.remove(pos);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		debug!(
			"graph: removed node {} and {} incident edges",
			id,
			before - self.edges.len()
		);
		Ok(node)
	}

	pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
		let pos = self
			.edges
			.iter()
			.position(|e| e.id == id)
			.ok_or(GraphError::UnknownEdge(id))?;
		Ok(self.edges.remove(pos))
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
		self.nodes.iter()
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
		self.edges.iter()
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn contains_node(&self, id: NodeId) -> bool {
		self.node(id).is_some()
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn terminal(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.kind == NodeKind::Terminal)
	}

	pub fn classifier(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.kind == NodeKind::Classifier)
	}

	pub fn has_classifier(&self) -> bool {
		self.classifier().is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_no_dangling(graph: &Graph) {
		for edge in graph.edges() {
			assert!(graph.contains_node(edge.source), "dangling source in {:?}", edge);
			assert!(graph.contains_node(edge.target), "dangling target in {:?}", edge);
		}
	}

	#[test]
	fn first_node_becomes_terminal() {
		let mut graph = Graph::new();
		let first = graph.add_node("X", None).unwrap();
		assert_eq!(first.kind, NodeKind::Terminal);
		assert_eq!(first.label, TERMINAL_LABEL);

		let second = graph.add_node("  Y ", None).unwrap();
		assert_eq!(second.kind, NodeKind::Plain);
		assert_eq!(second.label, "Y");
	}

	#[test]
	fn explicit_kind_skips_terminal_promotion() {
		let mut graph = Graph::new();
		let omega = graph.add_node(CLASSIFIER_LABEL, Some(NodeKind::Classifier)).unwrap();
		assert_eq!(omega.kind, NodeKind::Classifier);

		// Not the first node any more, so no promotion either.
		let a = graph.add_node("A", None).unwrap();
		assert_eq!(a.kind, NodeKind::Plain);
		assert!(graph.terminal().is_none());
	}

	#[test]
	fn blank_label_is_rejected() {
		let mut graph = Graph::new();
		assert_eq!(graph.add_node("   ", None), Err(GraphError::InvalidLabel));
		assert_eq!(graph.add_node("", Some(NodeKind::Plain)), Err(GraphError::InvalidLabel));
		assert!(graph.is_empty());

		// A rejected first attempt does not consume the terminal promotion.
		assert_eq!(graph.add_node("A", None).unwrap().kind, NodeKind::Terminal);
	}

	#[test]
	fn second_classifier_is_refused() {
		let mut graph = Graph::new();
		let omega = graph.add_node(CLASSIFIER_LABEL, Some(NodeKind::Classifier)).unwrap();
		let err = graph.add_node(CLASSIFIER_LABEL, Some(NodeKind::Classifier));
		assert_eq!(err, Err(GraphError::DuplicateClassifier(omega.id)));
		assert_eq!(
			graph.nodes().filter(|n| n.kind == NodeKind::Classifier).count(),
			1
		);
	}

	#[test]
	fn edges_require_live_endpoints() {
		let mut graph = Graph::new();
		let a = graph.add_node("A", None).unwrap().id;
		let ghost = NodeId(99);
		assert_eq!(
			graph.add_edge(a, ghost, MorphismKind::Function),
			Err(GraphError::UnknownNode(ghost))
		);
		assert_eq!(graph.edge_count(), 0);
	}

	#[test]
	fn loops_and_parallel_edges_are_kept() {
		let mut graph = Graph::new();
		let a = graph.add_node("A", None).unwrap().id;
		let b = graph.add_node("B", None).unwrap().id;
		graph.add_edge(a, a, MorphismKind::Function).unwrap();
		graph.add_edge(a, b, MorphismKind::Function).unwrap();
		graph.add_edge(a, b, MorphismKind::Continuous).unwrap();
		assert_eq!(graph.edge_count(), 3);
		assert!(graph.edges().next().unwrap().is_loop());
	}

	#[test]
	fn removing_a_node_cascades_to_its_edges() {
		let mut graph = Graph::new();
		let a = graph.add_node("A", None).unwrap().id;
		let b = graph.add_node("B", None).unwrap().id;
		let c = graph.add_node("C", None).unwrap().id;
		graph.add_edge(a, b, MorphismKind::Function).unwrap();
		graph.add_edge(b, c, MorphismKind::Function).unwrap();
		graph.add_edge(b, b, MorphismKind::Function).unwrap();
		let kept = graph.add_edge(c, a, MorphismKind::Function).unwrap();

		graph.remove_node(b).unwrap();
		assert_no_dangling(&graph);
		assert_eq!(graph.edges().map(|e| e.id).collect::<Vec<_>>(), vec![kept.id]);
		assert_eq!(graph.remove_node(b), Err(GraphError::UnknownNode(b)));
		assert_eq!(
			graph.add_edge(a, b, MorphismKind::Function),
			Err(GraphError::UnknownNode(b))
		);
	}

	#[test]
	fn ids_are_never_reused() {
		let mut graph = Graph::new();
		let a = graph.add_node("A", None).unwrap().id;
		let b = graph.add_node("B", None).unwrap().id;
		let e = graph.add_edge(a, b, MorphismKind::Function).unwrap().id;
		graph.remove_node(b).unwrap();
		let c = graph.add_node("C", None).unwrap();
		assert!(c.id > b);
		assert_eq!(c.kind, NodeKind::Plain);
		let e2 = graph.add_edge(a, c.id, MorphismKind::Function).unwrap().id;
		assert!(e2 > e);
		assert_eq!(graph.remove_edge(e), Err(GraphError::UnknownEdge(e)));
		assert!(graph.remove_edge(e2).is_ok());
	}
}
