//! Derived structural properties of the diagram.
//!
//! These are heuristics, not proofs. Terminal and classifier presence is read
//! off node kinds; the product and exponential checks only count edges and
//! nodes against fixed thresholds. Recomputation is always from scratch.

use std::collections::HashSet;

use serde::Deserialize;

use super::graph::Graph;
use super::types::NodeKind;

/// Thresholds for the counting heuristics. A property holds when the count
/// strictly exceeds its threshold.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Heuristics {
	/// Distinct (source, target) pairs needed to suggest products and coproducts.
	pub product_pairs: usize,
	/// Node count needed to suggest cartesian closure.
	pub closed_nodes: usize,
	/// Edge count needed to suggest cartesian closure.
	pub closed_edges: usize,
}

impl Default for Heuristics {
	fn default() -> Self {
		Self {
			product_pairs: 3,
			closed_nodes: 3,
			closed_edges: 5,
		}
	}
}

/// Snapshot of the inferred properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DerivedProperties {
	pub has_terminal: bool,
	pub has_classifier: bool,
	/// Heuristic: enough distinct arrows that products and coproducts look plausible.
	pub looks_like_it_has_products: bool,
	/// Heuristic: enough objects and arrows that exponentials look plausible.
	pub looks_cartesian_closed: bool,
}

/// One row of the textual properties panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelLine {
	pub text: &'static str,
	pub holds: bool,
}

impl DerivedProperties {
	/// Every property holds, so the diagram looks like it could be a topos.
	pub fn looks_like_a_topos(&self) -> bool {
		self.has_terminal
			&& self.has_classifier
			&& self.looks_like_it_has_products
			&& self.looks_cartesian_closed
	}

	pub fn panel_lines(&self) -> Vec<PanelLine> {
		vec![
			PanelLine {
				text: "Terminal object",
				holds: self.has_terminal,
			},
			PanelLine {
				text: "Subobject classifier",
				holds: self.has_classifier,
			},
			PanelLine {
				text: "Products and coproducts (heuristic)",
				holds: self.looks_like_it_has_products,
			},
			PanelLine {
				text: "Cartesian closed (heuristic)",
				holds: self.looks_cartesian_closed,
			},
			PanelLine {
				text: "Looks like a topos",
				holds: self.looks_like_a_topos(),
			},
		]
	}
}

/// Recompute every property from the current graph.
pub fn infer(graph: &Graph, heuristics: &Heuristics) -> DerivedProperties {
	let distinct_pairs: HashSet<_> = graph.edges().map(|e| (e.source, e.target)).collect();

	DerivedProperties {
		has_terminal: graph.nodes().any(|n| n.kind == NodeKind::Terminal),
		has_classifier: graph.nodes().any(|n| n.kind == NodeKind::Classifier),
		looks_like_it_has_products: distinct_pairs.len() > heuristics.product_pairs,
		looks_cartesian_closed: graph.node_count() > heuristics.closed_nodes
			&& graph.edge_count() > heuristics.closed_edges,
	}
}
