//! diagram-builder: interactive category diagram builder.
//!
//! Objects and morphisms are added through a small control strip and two-click
//! gestures on a canvas. A force-directed simulation lays the diagram out
//! continuously, and a set of heuristic categorical properties (terminal
//! object, subobject classifier, products, cartesian closure) is recomputed
//! after every edit.
//!
//! The engine under [`components::category_diagram`] is headless; only the
//! component and renderer touch the DOM.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::category_diagram::{
	Click, DerivedProperties, DiagramBuilder, DiagramConfig, DiagramState, Edge, EdgeId, Graph,
	GraphError, MorphismKind, Node, NodeId, NodeKind, Selection, Vec2,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("diagram-builder: logging initialized");
}

/// Load configuration overrides from a script element with id="diagram-config".
/// Falls back to defaults when the element is absent or malformed.
fn load_config() -> DiagramConfig {
	let Some(json_text) = config_script_text() else {
		return DiagramConfig::default();
	};

	match DiagramConfig::from_json(&json_text) {
		Ok(config) => {
			info!("diagram-builder: loaded config overrides");
			config
		}
		Err(e) => {
			warn!("diagram-builder: failed to parse config: {}", e);
			DiagramConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("diagram-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Category Diagram Builder" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-diagram">
			<DiagramBuilder config=config fullscreen=true />
			<div class="diagram-overlay">
				<h1>"Diagram Builder"</h1>
				<p class="subtitle">
					"Click an object, then another, to draw a morphism. Drag objects to move them."
				</p>
			</div>
		</div>
	}
}
