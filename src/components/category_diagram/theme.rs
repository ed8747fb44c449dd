//! Visual theming for the diagram builder.

use super::types::{MorphismKind, NodeKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors per node role.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub plain: Color,
	pub terminal: Color,
	pub classifier: Color,
	pub label: Color,
	pub border: Color,
	pub border_width: f64,
	/// Radial highlight on node fills.
	pub use_gradient: bool,
}

impl NodeStyle {
	pub fn fill(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Plain => self.plain,
			NodeKind::Terminal => self.terminal,
			NodeKind::Classifier => self.classifier,
		}
	}
}

/// Stroke colors per morphism kind.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub function: Color,
	pub homomorphism: Color,
	pub continuous: Color,
	pub natural: Color,
	pub custom: Color,
}

impl EdgeStyle {
	pub fn stroke(&self, kind: &MorphismKind) -> Color {
		match kind {
			MorphismKind::Function => self.function,
			MorphismKind::Homomorphism => self.homomorphism,
			MorphismKind::Continuous => self.continuous,
			MorphismKind::Natural => self.natural,
			MorphismKind::Custom(_) => self.custom,
		}
	}

	/// Natural transformations are drawn dashed.
	pub fn dashed(&self, kind: &MorphismKind) -> bool {
		matches!(kind, MorphismKind::Natural)
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Outer color of the radial gradient.
	pub color_secondary: Color,
	pub use_gradient: bool,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	/// Ring around the pending morphism source.
	pub selection: Color,
	/// Ring around the node under the pointer.
	pub hover: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(18, 22, 30),
				color_secondary: Color::rgb(30, 36, 48),
				use_gradient: true,
			},
			node: NodeStyle {
				plain: Color::rgb(94, 129, 172),
				terminal: Color::rgb(46, 125, 50),
				classifier: Color::rgb(123, 31, 162),
				label: Color::rgba(255, 255, 255, 0.92),
				border: Color::rgba(255, 255, 255, 0.35),
				border_width: 1.0,
				use_gradient: true,
			},
			edge: EdgeStyle {
				function: Color::rgb(176, 190, 197),
				homomorphism: Color::rgb(100, 181, 246),
				continuous: Color::rgb(255, 183, 77),
				natural: Color::rgb(240, 98, 146),
				custom: Color::rgb(161, 136, 127),
			},
			selection: Color::rgb(255, 213, 79),
			hover: Color::rgba(255, 255, 255, 0.6),
		}
	}
}
