//! Zoom-dependent sizes for diagram visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: graph coordinates. Values scale with zoom.
//! - **Screen-space**: canvas pixels. Values stay fixed regardless of zoom.
//!
//! Each visual property picks a [`ScaleBehavior`] describing which space its
//! size lives in; [`ScaledValues`] resolves all of them once per frame.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for a base value at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Node sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Zoom below which labels stop shrinking.
	pub label_min_k: f64,
}

/// Edge and arrowhead sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// Dash pattern (dash, gap) in world units, for dashed morphism kinds.
	pub dash_pattern: (f64, f64),
	/// Arrowhead length in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
}

/// Selection and hover ring sizing, in screen pixels.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	pub width: f64,
	pub offset: f64,
}

/// Complete scale configuration for all diagram elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 18.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 20.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
				label_size: 13.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				dash_pattern: (6.0, 4.0),
				arrow_size: 8.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 18.0,
				},
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 3.0,
			},
		}
	}
}

/// Scale values resolved for one zoom level, all in world space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	/// Canvas font string, e.g. "13px sans-serif".
	pub label_font: String,
	pub edge_line_width: f64,
	pub dash_pattern: (f64, f64),
	pub arrow_size: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.node.label_size / k.max(config.node.label_min_k);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{}px sans-serif", label_font_size),
			edge_line_width: config.edge.line_width / k,
			dash_pattern: config.edge.dash_pattern,
			arrow_size: config.edge.arrow_behavior.apply(config.edge.arrow_size, k),
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
		}
	}
}
