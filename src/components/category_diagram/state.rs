//! Diagram state: the graph, its layout and the interaction state, owned
//! together.
//!
//! Every command runs to completion before returning. A successful mutation
//! re-syncs the simulation and recomputes the derived properties, so the next
//! frame always sees a consistent snapshot.

use log::{debug, info, warn};

use super::config::DiagramConfig;
use super::error::GraphError;
use super::graph::{CLASSIFIER_LABEL, Graph};
use super::inference::{DerivedProperties, infer};
use super::interaction::{Action, Click, Drag, Gesture, Press, Selection};
use super::layout::Simulation;
use super::scale::{ScaleConfig, ScaledValues};
use super::types::{Edge, MorphismKind, Node, NodeId, NodeKind, Vec2};
use super::view::Frame;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
struct PanState {
	start: Vec2,
	transform_start: Vec2,
}

/// Graph model, layout and interaction state for one builder session.
pub struct DiagramState {
	graph: Graph,
	layout: Simulation,
	selection: Selection,
	morphism: MorphismKind,
	properties: DerivedProperties,
	config: DiagramConfig,
	gesture: Option<Gesture>,
	drag: Option<Drag>,
	pan: Option<PanState>,
	hovered: Option<NodeId>,
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
}

impl DiagramState {
	pub fn new(config: DiagramConfig, width: f64, height: f64) -> Self {
		let layout = Simulation::new(config.layout.clone(), Vec2::new(width / 2.0, height / 2.0));
		let graph = Graph::new();
		let properties = infer(&graph, &config.heuristics);
		Self {
			graph,
			layout,
			selection: Selection::Idle,
			morphism: config.default_morphism.clone(),
			properties,
			config,
			gesture: None,
			drag: None,
			pan: None,
			hovered: None,
			transform: ViewTransform::default(),
			width,
			height,
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn layout(&self) -> &Simulation {
		&self.layout
	}

	pub fn selection(&self) -> Selection {
		self.selection
	}

	pub fn properties(&self) -> DerivedProperties {
		self.properties
	}

	pub fn config(&self) -> &DiagramConfig {
		&self.config
	}

	pub fn morphism_kind(&self) -> &MorphismKind {
		&self.morphism
	}

	pub fn hovered(&self) -> Option<NodeId> {
		self.hovered
	}

	pub fn dragging(&self) -> Option<NodeId> {
		self.drag.map(|d| d.node)
	}

	/// Project the current state for drawing.
	pub fn frame(&self, scale: &ScaleConfig) -> Frame {
		Frame::project(self, ScaledValues::new(scale, self.transform.k).node_radius)
	}

	fn after_mutation(&mut self) {
		self.layout.sync(&self.graph);
		self.properties = infer(&self.graph, &self.config.heuristics);
	}

	/// Add an object named `label`. The very first object becomes the
	/// terminal object regardless of its name.
	pub fn add_object(&mut self, label: &str) -> Result<NodeId, GraphError> {
		let node = self.graph.add_node(label, None).inspect_err(|err| {
			debug!("diagram: add object {:?} ignored: {}", label, err);
		})?;
		info!("diagram: added object {} ({:?})", node.label, node.kind);
		self.after_mutation();
		Ok(node.id)
	}

	/// Add the subobject classifier. Refused when one already exists.
	pub fn add_classifier(&mut self) -> Result<NodeId, GraphError> {
		let node = self
			.graph
			.add_node(CLASSIFIER_LABEL, Some(NodeKind::Classifier))
			.inspect_err(|err| debug!("diagram: add classifier ignored: {}", err))?;
		info!("diagram: added classifier {}", node.id);
		self.after_mutation();
		Ok(node.id)
	}

	/// Remove a node and its incident morphisms.
	pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
		let node = self.graph.remove_node(id)?;
		if self.selection.selected() == Some(id) {
			self.selection = Selection::Idle;
		}
		if self.dragging() == Some(id) {
			self.drag_end(id);
			self.gesture = None;
		}
		if self.hovered == Some(id) {
			self.hovered = None;
		}
		self.after_mutation();
		Ok(node)
	}

	/// Morphism kind used for the next edge. Read when the edge is created,
	/// not when its source is selected.
	pub fn set_morphism_kind(&mut self, kind: MorphismKind) {
		debug!("diagram: morphism kind set to {}", kind);
		self.morphism = kind;
	}

	/// Feed a completed click through the selection state machine.
	///
	/// Returns the morphism created by this click, if any.
	pub fn click(&mut self, click: Click) -> Result<Option<Edge>, GraphError> {
		if let Click::Node(id) = click {
			if !self.graph.contains_node(id) {
				warn!("diagram: click on unknown node {} ignored", id);
				return Err(GraphError::UnknownNode(id));
			}
		}

		let (next, action) = self.selection.on_click(click, self.config.self_click);
		self.selection = next;
		match action {
			Action::Connect { source, target } => {
				let edge = self
					.graph
					.add_edge(source, target, self.morphism.clone())
					.inspect_err(|err| warn!("diagram: morphism not created: {}", err))?;
				info!("diagram: {} : {} -> {} ({})", edge.id, source, target, edge.kind);
				self.after_mutation();
				Ok(Some(edge))
			}
			Action::Select(id) => {
				debug!("diagram: {} selected as source", id);
				Ok(None)
			}
			Action::Cancel => {
				debug!("diagram: selection cancelled");
				Ok(None)
			}
			Action::None => Ok(None),
		}
	}

	/// Pin `id` under the pointer and keep the simulation warm while it moves.
	pub fn drag_start(&mut self, id: NodeId) -> Result<(), GraphError> {
		if !self.graph.contains_node(id) {
			return Err(GraphError::UnknownNode(id));
		}
		if let Some(previous) = self.drag {
			self.drag_end(previous.node);
		}
		self.drag = Some(Drag {
			node: id,
			restore_alpha_target: self.layout.alpha_target(),
		});
		self.layout.set_pinned(id, true);
		self.layout.set_alpha_target(self.config.layout.drag_alpha_target);
		debug!("diagram: drag started on {}", id);
		Ok(())
	}

	/// Move the dragged node to `position` (graph space).
	pub fn drag_move(&mut self, id: NodeId, position: Vec2) -> bool {
		match self.drag {
			Some(drag) if drag.node == id => self.layout.set_position(id, position),
			_ => false,
		}
	}

	/// Release the dragged node back to the simulation.
	pub fn drag_end(&mut self, id: NodeId) -> bool {
		match self.drag {
			Some(drag) if drag.node == id => {
				self.layout.set_pinned(id, false);
				self.layout.set_alpha_target(drag.restore_alpha_target);
				self.drag = None;
				debug!("diagram: drag ended on {}", id);
				true
			}
			_ => false,
		}
	}

	pub fn screen_to_graph(&self, screen: Vec2) -> Vec2 {
		Vec2::new(
			(screen.x - self.transform.x) / self.transform.k,
			(screen.y - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, point: Vec2) -> Vec2 {
		Vec2::new(
			point.x * self.transform.k + self.transform.x,
			point.y * self.transform.k + self.transform.y,
		)
	}

	/// Nearest node within hit radius of a screen position.
	pub fn node_at_position(&self, screen: Vec2, config: &ScaleConfig) -> Option<NodeId> {
		let point = self.screen_to_graph(screen);
		let hit_radius = ScaledValues::new(config, self.transform.k).hit_radius;
		self.layout
			.bodies()
			.map(|b| (b.id, b.position.distance(point)))
			.filter(|(_, d)| *d < hit_radius)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(id, _)| id)
	}

	pub fn pointer_down(&mut self, screen: Vec2, config: &ScaleConfig) {
		let press = match self.node_at_position(screen, config) {
			Some(id) => Press::Node(id),
			None => {
				self.pan = Some(PanState {
					start: screen,
					transform_start: Vec2::new(self.transform.x, self.transform.y),
				});
				Press::Canvas
			}
		};
		self.gesture = Some(Gesture::new(press, screen));
	}

	pub fn pointer_move(&mut self, screen: Vec2, config: &ScaleConfig) {
		let Some(mut gesture) = self.gesture else {
			self.hovered = self.node_at_position(screen, config);
			return;
		};

		let started = gesture.track(screen, self.config.click_tolerance);
		self.gesture = Some(gesture);
		if !gesture.moved {
			return;
		}

		match gesture.press {
			Press::Node(id) => {
				if started
					&& self
						.drag_start(id)
						.inspect_err(|err| warn!("diagram: drag not started: {}", err))
						.is_err()
				{
					self.gesture = None;
					return;
				}
				let point = self.screen_to_graph(screen);
				self.drag_move(id, point);
			}
			Press::Canvas => {
				if let Some(pan) = &self.pan {
					self.transform.x = pan.transform_start.x + (screen.x - pan.start.x);
					self.transform.y = pan.transform_start.y + (screen.y - pan.start.y);
				}
			}
		}
	}

	/// Finish a press: end a drag or pan, or deliver the click.
	pub fn pointer_up(&mut self) -> Option<Edge> {
		self.pan = None;
		let gesture = self.gesture.take()?;
		if let Some(drag) = self.drag {
			self.drag_end(drag.node);
		}
		let click = gesture.release()?;
		self.click(click).ok().flatten()
	}

	pub fn pointer_leave(&mut self) {
		if let Some(drag) = self.drag {
			self.drag_end(drag.node);
		}
		self.gesture = None;
		self.pan = None;
		self.hovered = None;
	}

	/// Zoom around a screen point. Positive `delta` zooms out.
	pub fn zoom(&mut self, screen: Vec2, delta: f64) {
		let factor = if delta > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = screen.x - (screen.x - self.transform.x) * ratio;
		self.transform.y = screen.y - (screen.y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Advance the layout by one frame.
	pub fn tick(&mut self, dt: f64) -> bool {
		self.layout.tick(dt)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.layout.set_center(Vec2::new(width / 2.0, height / 2.0));
	}
}
