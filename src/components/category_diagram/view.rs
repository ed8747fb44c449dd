//! Drawable projection of the diagram state.
//!
//! A [`Frame`] is rebuilt from scratch every animation frame and carries no
//! state of its own. Geometry is in graph space; the renderer applies the
//! view transform.

use std::collections::HashMap;

use super::inference::DerivedProperties;
use super::state::DiagramState;
use super::types::{EdgeId, MorphismKind, NodeId, NodeKind, Vec2};

/// Distance between neighbouring curves in a bundle of parallel edges.
const PARALLEL_SPACING: f64 = 24.0;
/// Radius of the innermost self-loop, as a multiple of the node radius.
const LOOP_RADIUS: f64 = 1.0;
/// Radius added for each further self-loop on the same node, as a multiple
/// of the node radius.
const LOOP_SPACING: f64 = 0.45;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	pub id: NodeId,
	pub label: String,
	pub kind: NodeKind,
	pub position: Vec2,
	/// Pending source of a morphism.
	pub selected: bool,
	pub hovered: bool,
	pub pinned: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeShape {
	Straight,
	/// Quadratic curve through `control`, used to fan out parallel edges.
	Curved { control: Vec2 },
	/// Circle touching the node, used for self-loops.
	Loop { center: Vec2, radius: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	pub id: EdgeId,
	pub kind: MorphismKind,
	pub source: Vec2,
	pub target: Vec2,
	pub shape: EdgeShape,
}

/// Everything the renderer and the properties panel need for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub nodes: Vec<NodeSprite>,
	pub edges: Vec<EdgeSprite>,
	pub properties: DerivedProperties,
	pub morphism: MorphismKind,
	pub settled: bool,
}

impl Frame {
	/// Snapshot `state`. `node_radius` is the drawn node radius in graph
	/// space at the current zoom, so self-loops stay clear of the node.
	pub fn project(state: &DiagramState, node_radius: f64) -> Self {
		let graph = state.graph();
		let layout = state.layout();
		let selected = state.selection().selected();
		let hovered = state.hovered();

		let nodes: Vec<NodeSprite> = graph
			.nodes()
			.filter_map(|node| {
				let body = layout.body(node.id)?;
				Some(NodeSprite {
					id: node.id,
					label: node.label.clone(),
					kind: node.kind,
					position: body.position,
					selected: selected == Some(node.id),
					hovered: hovered == Some(node.id),
					pinned: body.pinned,
				})
			})
			.collect();

		// Parallel edges are bundled by unordered endpoint pair so that A->B
		// and B->A fan out instead of overlapping.
		let bundle_key = |s: NodeId, t: NodeId| if s <= t { (s, t) } else { (t, s) };
		let mut bundle_sizes: HashMap<(NodeId, NodeId), usize> = HashMap::new();
		for edge in graph.edges() {
			*bundle_sizes.entry(bundle_key(edge.source, edge.target)).or_insert(0) += 1;
		}

		let mut bundle_seen: HashMap<(NodeId, NodeId), usize> = HashMap::new();
		let mut edges = Vec::with_capacity(graph.edge_count());
		for edge in graph.edges() {
			let (Some(source), Some(target)) =
				(layout.position(edge.source), layout.position(edge.target))
			else {
				continue;
			};
			let key = bundle_key(edge.source, edge.target);
			let seen = bundle_seen.entry(key).or_insert(0);
			let slot = *seen;
			*seen += 1;

			let shape = if edge.is_loop() {
				let radius = node_radius * (LOOP_RADIUS + LOOP_SPACING * slot as f64);
				EdgeShape::Loop {
					center: source - Vec2::new(0.0, radius),
					radius,
				}
			} else {
				let size = bundle_sizes.get(&key).copied().unwrap_or(1);
				let offset = (slot as f64 - (size as f64 - 1.0) / 2.0) * PARALLEL_SPACING;
				let (from, to) = match layout.position(key.0).zip(layout.position(key.1)) {
					Some(pair) => pair,
					None => (source, target),
				};
				bend(from, to, offset)
			};

			edges.push(EdgeSprite {
				id: edge.id,
				kind: edge.kind.clone(),
				source,
				target,
				shape,
			});
		}

		Self {
			nodes,
			edges,
			properties: state.properties(),
			morphism: state.morphism_kind().clone(),
			settled: layout.is_settled(),
		}
	}
}

/// Curve with its apex `offset` units off the `from -> to` chord.
fn bend(from: Vec2, to: Vec2, offset: f64) -> EdgeShape {
	let chord = to - from;
	let length = chord.length();
	if offset == 0.0 || length < 1e-6 {
		return EdgeShape::Straight;
	}
	let normal = Vec2::new(-chord.y / length, chord.x / length);
	let mid = (from + to) * 0.5;
	// The apex of a quadratic curve sits halfway to its control point.
	EdgeShape::Curved {
		control: mid + normal * (2.0 * offset),
	}
}
