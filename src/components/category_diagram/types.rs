//! Core value types shared by the diagram engine.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::Deserialize;

/// Stable identifier of a node. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

/// Stable identifier of an edge. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "n{}", self.0)
	}
}

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "e{}", self.0)
	}
}

/// Role a node plays in the diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
	#[default]
	Plain,
	/// The distinguished object every other object maps into.
	Terminal,
	/// The truth-value object. At most one per graph.
	Classifier,
}

/// Flavor of a morphism, chosen before the edge is drawn.
///
/// The presets mirror the morphism kinds offered by the builder's selector;
/// anything else travels as [`MorphismKind::Custom`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphismKind {
	#[default]
	Function,
	/// Structure-preserving map.
	Homomorphism,
	/// Continuous map.
	Continuous,
	/// Natural transformation.
	Natural,
	Custom(String),
}

impl MorphismKind {
	/// The kinds offered in the selector, in display order.
	pub fn presets() -> [MorphismKind; 4] {
		[
			MorphismKind::Function,
			MorphismKind::Homomorphism,
			MorphismKind::Continuous,
			MorphismKind::Natural,
		]
	}

	/// Short identifier used as the `<option>` value.
	pub fn slug(&self) -> &str {
		match self {
			MorphismKind::Function => "function",
			MorphismKind::Homomorphism => "homomorphism",
			MorphismKind::Continuous => "continuous",
			MorphismKind::Natural => "natural",
			MorphismKind::Custom(name) => name,
		}
	}

	pub fn label(&self) -> &str {
		match self {
			MorphismKind::Function => "Function",
			MorphismKind::Homomorphism => "Structure-preserving map",
			MorphismKind::Continuous => "Continuous map",
			MorphismKind::Natural => "Natural transformation",
			MorphismKind::Custom(name) => name,
		}
	}

	/// Parse a selector value. Unknown non-empty values become custom kinds.
	pub fn from_slug(slug: &str) -> Option<Self> {
		let slug = slug.trim();
		let kind = match slug {
			"" => return None,
			"function" => MorphismKind::Function,
			"homomorphism" => MorphismKind::Homomorphism,
			"continuous" => MorphismKind::Continuous,
			"natural" => MorphismKind::Natural,
			other => MorphismKind::Custom(other.to_string()),
		};
		Some(kind)
	}
}

impl fmt::Display for MorphismKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// 2D point or displacement in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

impl Vec2 {
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length_sq(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	pub fn length(self) -> f64 {
		self.length_sq().sqrt()
	}

	pub fn distance(self, other: Vec2) -> f64 {
		(other - self).length()
	}
}

impl Add for Vec2 {
	type Output = Vec2;
	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Vec2 {
	type Output = Vec2;
	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;
	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Vec2) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl SubAssign for Vec2 {
	fn sub_assign(&mut self, rhs: Vec2) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

/// An object in the diagram.
///
/// Positions are not stored here; the layout simulation owns them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	pub id: NodeId,
	pub label: String,
	pub kind: NodeKind,
}

/// A morphism between two nodes. `source == target` is a self-loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	pub id: EdgeId,
	pub source: NodeId,
	pub target: NodeId,
	pub kind: MorphismKind,
}

impl Edge {
	pub fn is_loop(&self) -> bool {
		self.source == self.target
	}

	pub fn touches(&self, node: NodeId) -> bool {
		self.source == node || self.target == node
	}
}
