//! Tunable behavior of the diagram builder.
//!
//! Every field has a default, so a page can override any subset through a
//! JSON `<script id="diagram-config">` element.

use serde::Deserialize;

use super::inference::Heuristics;
use super::interaction::SelfClick;
use super::layout::LayoutConfig;
use super::types::MorphismKind;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
	pub layout: LayoutConfig,
	pub heuristics: Heuristics,
	pub self_click: SelfClick,
	/// Screen pixels a press may travel and still count as a click.
	pub click_tolerance: f64,
	/// Morphism kind selected when the builder starts.
	pub default_morphism: MorphismKind,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			heuristics: Heuristics::default(),
			self_click: SelfClick::default(),
			click_tolerance: 4.0,
			default_morphism: MorphismKind::default(),
		}
	}
}

impl DiagramConfig {
	/// Parse a JSON override. Missing fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
