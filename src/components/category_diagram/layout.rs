//! Force-directed layout simulation.
//!
//! Each tick applies four forces to node velocities and then integrates:
//! - link: springs along edges toward `link_distance`
//! - charge: pairwise n-body repulsion
//! - collision: pushes overlapping nodes apart
//! - centering: shifts the centroid toward the canvas center
//!
//! Link and charge forces are scaled by `alpha`, which decays geometrically
//! toward `alpha_target` every tick. Once alpha falls under `alpha_min` and
//! the kinetic energy under `energy_threshold`, the simulation is settled and
//! ticks become no-ops until something reheats it.
//!
//! Pinned bodies are read as anchors by every force but never integrated;
//! their position is only changed through [`Simulation::set_position`].
//!
//! The simulation owns its own copy of the topology, refreshed from the graph
//! by [`Simulation::sync`]. A tick reads nothing but that copy and the
//! previous positions, and uses no randomness, so equal inputs give equal
//! outputs.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use log::{debug, info};
use serde::Deserialize;

use super::graph::Graph;
use super::types::{EdgeId, NodeId, Vec2};

/// Physics constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of the spring along each edge.
	pub link_distance: f64,
	/// Pairwise charge strength; negative values repel.
	pub charge_strength: f64,
	/// Distances below this are clamped in the charge force.
	pub charge_distance_min: f64,
	/// Fraction of the centroid offset corrected each tick.
	pub center_strength: f64,
	/// Radius each node occupies for collision purposes.
	pub collision_radius: f64,
	pub collision_strength: f64,
	/// Fraction of velocity lost each tick.
	pub velocity_decay: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Alpha restored when the topology changes.
	pub reheat_alpha: f64,
	/// Alpha target held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Total kinetic energy under which the simulation may settle.
	pub energy_threshold: f64,
	/// Frame duration that corresponds to one full integration step.
	pub frame_dt: f64,
	/// Upper bound on integration steps per tick, for long frame gaps.
	pub max_step: f64,
	/// Spacing of the spiral new nodes are seeded on.
	pub seed_spacing: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			link_distance: 150.0,
			charge_strength: -300.0,
			charge_distance_min: 10.0,
			center_strength: 0.1,
			collision_radius: 30.0,
			collision_strength: 0.7,
			velocity_decay: 0.4,
			alpha_min: 0.001,
			// 1 - alpha_min^(1/300): settles in roughly 300 ticks from a cold start
			alpha_decay: 0.0228,
			reheat_alpha: 1.0,
			drag_alpha_target: 0.3,
			energy_threshold: 0.05,
			frame_dt: 1.0 / 60.0,
			max_step: 2.0,
			seed_spacing: 10.0,
		}
	}
}

/// Simulated state of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
	pub id: NodeId,
	pub position: Vec2,
	pub velocity: Vec2,
	pub pinned: bool,
}

#[derive(Clone, Debug)]
struct Link {
	source: usize,
	target: usize,
	strength: f64,
	/// Share of the correction applied to the target.
	bias: f64,
}

/// Physics state for every node in the graph.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: LayoutConfig,
	bodies: Vec<Body>,
	index: HashMap<NodeId, usize>,
	links: Vec<Link>,
	/// Every edge in the graph, self-loops included.
	edges: Vec<EdgeId>,
	/// Endpoints of the edges that carry a spring.
	topology: Vec<(NodeId, NodeId)>,
	center: Vec2,
	alpha: f64,
	alpha_target: f64,
	settled: bool,
	seeded: usize,
}

impl Simulation {
	pub fn new(config: LayoutConfig, center: Vec2) -> Self {
		Self {
			config,
			bodies: Vec::new(),
			index: HashMap::new(),
			links: Vec::new(),
			edges: Vec::new(),
			topology: Vec::new(),
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			settled: true,
			seeded: 0,
		}
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Bring bodies and links in line with `graph`.
	///
	/// New nodes are seeded on a spiral around the center, bodies of removed
	/// nodes are dropped, and any change reheats the simulation. Self-loops
	/// carry no spring but still count as a change. Returns whether anything
	/// changed.
	pub fn sync(&mut self, graph: &Graph) -> bool {
		let before = self.bodies.len();
		self.bodies.retain(|b| graph.contains_node(b.id));
		let mut changed = self.bodies.len() != before;

		let mut index: HashMap<NodeId, usize> = self
			.bodies
			.iter()
			.enumerate()
			.map(|(i, b)| (b.id, i))
			.collect();

		for node in graph.nodes() {
			if index.contains_key(&node.id) {
				continue;
			}
			let position = self.seed_position();
			index.insert(node.id, self.bodies.len());
			self.bodies.push(Body {
				id: node.id,
				position,
				velocity: Vec2::ZERO,
				pinned: false,
			});
			changed = true;
		}
		self.index = index;

		let edges: Vec<EdgeId> = graph.edges().map(|e| e.id).collect();
		if edges != self.edges {
			self.edges = edges;
			changed = true;
		}

		let topology: Vec<(NodeId, NodeId)> = graph
			.edges()
			.filter(|e| !e.is_loop())
			.map(|e| (e.source, e.target))
			.collect();
		if topology != self.topology {
			self.topology = topology;
			changed = true;
		}
		self.rebuild_links();

		if changed {
			debug!(
				"layout: synced {} bodies, {} links",
				self.bodies.len(),
				self.links.len()
			);
			self.reheat();
		}
		changed
	}

	/// Phyllotaxis spiral, so successive seeds never coincide.
	fn seed_position(&mut self) -> Vec2 {
		let i = self.seeded as f64;
		self.seeded += 1;
		let radius = self.config.seed_spacing * (0.5 + i).sqrt();
		let angle = i * PI * (3.0 - 5f64.sqrt());
		self.center + Vec2::new(radius * angle.cos(), radius * angle.sin())
	}

	fn rebuild_links(&mut self) {
		let mut degree = vec![0usize; self.bodies.len()];
		let pairs: Vec<(usize, usize)> = self
			.topology
			.iter()
			.filter_map(|(s, t)| Some((*self.index.get(s)?, *self.index.get(t)?)))
			.collect();
		for &(s, t) in &pairs {
			degree[s] += 1;
			degree[t] += 1;
		}
		self.links = pairs
			.into_iter()
			.map(|(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Link {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();
	}

	/// Restart motion after a perturbation.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(self.config.reheat_alpha);
		if self.settled {
			debug!("layout: reheated to alpha {:.3}", self.alpha);
		}
		self.settled = false;
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Alpha decays toward this value. A non-zero target keeps the
	/// simulation warm, as while dragging.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
		if target >= self.config.alpha_min {
			self.settled = false;
		}
	}

	pub fn is_settled(&self) -> bool {
		self.settled
	}

	pub fn kinetic_energy(&self) -> f64 {
		self.bodies
			.iter()
			.filter(|b| !b.pinned)
			.map(|b| 0.5 * b.velocity.length_sq())
			.sum()
	}

	pub fn center(&self) -> Vec2 {
		self.center
	}

	pub fn set_center(&mut self, center: Vec2) {
		if center != self.center {
			self.center = center;
			self.reheat();
		}
	}

	pub fn bodies(&self) -> impl ExactSizeIterator<Item = &Body> + '_ {
		self.bodies.iter()
	}

	pub fn body(&self, id: NodeId) -> Option<&Body> {
		self.index.get(&id).map(|&i| &self.bodies[i])
	}

	pub fn position(&self, id: NodeId) -> Option<Vec2> {
		self.body(id).map(|b| b.position)
	}

	/// Place a body directly. Returns false for unknown ids.
	pub fn set_position(&mut self, id: NodeId, position: Vec2) -> bool {
		match self.index.get(&id) {
			Some(&i) => {
				self.bodies[i].position = position;
				true
			}
			None => false,
		}
	}

	/// Pin or release a body. A pinned body keeps zero velocity.
	pub fn set_pinned(&mut self, id: NodeId, pinned: bool) -> bool {
		match self.index.get(&id) {
			Some(&i) => {
				let body = &mut self.bodies[i];
				body.pinned = pinned;
				body.velocity = Vec2::ZERO;
				true
			}
			None => false,
		}
	}

	/// Advance one frame. Returns false when settled and nothing moved.
	pub fn tick(&mut self, dt: f64) -> bool {
		if self.settled {
			return false;
		}
		// Nothing to push against: a lone body stays where it is.
		if self.bodies.len() < 2 {
			self.settled = true;
			return false;
		}

		let step = (dt / self.config.frame_dt).clamp(0.0, self.config.max_step);
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		let alpha = self.alpha;

		self.apply_links(alpha);
		self.apply_charge(alpha);
		self.apply_collision();

		let retain = 1.0 - self.config.velocity_decay;
		for body in &mut self.bodies {
			if body.pinned {
				body.velocity = Vec2::ZERO;
				continue;
			}
			body.velocity = body.velocity * retain;
			body.position += body.velocity * step;
		}

		self.apply_centering();

		if self.alpha < self.config.alpha_min
			&& self.alpha_target < self.config.alpha_min
			&& self.kinetic_energy() < self.config.energy_threshold
		{
			self.settled = true;
			info!("layout: settled with {} bodies", self.bodies.len());
		}
		true
	}

	fn apply_links(&mut self, alpha: f64) {
		let distance = self.config.link_distance;
		for (n, link) in self.links.iter().enumerate() {
			let (s, t) = (&self.bodies[link.source], &self.bodies[link.target]);
			let mut d = (t.position + t.velocity) - (s.position + s.velocity);
			if d.length_sq() == 0.0 {
				d = jiggle(link.source, link.target + n);
			}
			let l = d.length();
			let d = d * ((l - distance) / l * alpha * link.strength);
			self.bodies[link.target].velocity -= d * link.bias;
			self.bodies[link.source].velocity += d * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self, alpha: f64) {
		let strength = self.config.charge_strength;
		let min_sq = self.config.charge_distance_min * self.config.charge_distance_min;
		let count = self.bodies.len();
		for i in 0..count {
			for j in (i + 1)..count {
				let mut d = self.bodies[j].position - self.bodies[i].position;
				let mut l = d.length_sq();
				if l == 0.0 {
					d = jiggle(i, j);
					l = d.length_sq();
				}
				if l < min_sq {
					l = (min_sq * l).sqrt();
				}
				let push = d * (strength * alpha / l);
				self.bodies[i].velocity += push;
				self.bodies[j].velocity -= push;
			}
		}
	}

	fn apply_collision(&mut self) {
		let reach = 2.0 * self.config.collision_radius;
		let strength = self.config.collision_strength;
		let count = self.bodies.len();
		for i in 0..count {
			for j in (i + 1)..count {
				let (a, b) = (&self.bodies[i], &self.bodies[j]);
				let mut d = (a.position + a.velocity) - (b.position + b.velocity);
				let mut l = d.length_sq();
				if l >= reach * reach {
					continue;
				}
				if l == 0.0 {
					d = jiggle(i, j);
					l = d.length_sq();
				}
				let l = l.sqrt();
				let push = d * ((reach - l) / l * strength);
				// A pinned side does not absorb any of the correction.
				let (share_a, share_b) = match (a.pinned, b.pinned) {
					(true, true) => continue,
					(true, false) => (0.0, 1.0),
					(false, true) => (1.0, 0.0),
					(false, false) => (0.5, 0.5),
				};
				self.bodies[i].velocity += push * share_a;
				self.bodies[j].velocity -= push * share_b;
			}
		}
	}

	fn apply_centering(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let sum = self
			.bodies
			.iter()
			.fold(Vec2::ZERO, |acc, b| acc + b.position);
		let centroid = sum * (1.0 / self.bodies.len() as f64);
		let shift = (self.center - centroid) * self.config.center_strength;
		for body in self.bodies.iter_mut().filter(|b| !b.pinned) {
			body.position += shift;
		}
	}
}

/// Tiny deterministic displacement for coincident points.
fn jiggle(i: usize, j: usize) -> Vec2 {
	let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * TAU;
	Vec2::new(angle.cos(), angle.sin()) * 1e-3
}
