//! Leptos component wrapping the diagram builder canvas.
//!
//! The component creates the canvas plus the command controls (object name,
//! morphism kind, classifier button) and the properties panel. Pointer events
//! are forwarded to [`DiagramState`]; an animation loop runs via
//! `requestAnimationFrame`, ticking the layout and redrawing each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, SubmitEvent, WheelEvent, Window,
};

use super::config::DiagramConfig;
use super::inference::DerivedProperties;
use super::render;
use super::scale::ScaleConfig;
use super::state::DiagramState;
use super::theme::Theme;
use super::types::{MorphismKind, Vec2};

/// Fixed frame step handed to the layout each animation frame.
const FRAME_DT: f64 = 1.0 / 60.0;

/// Diagram state bundled with its visual configuration.
struct BuilderContext {
	state: DiagramState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<BuilderContext>>>;

/// Run `f` against the mounted builder. Returns `None` before the canvas is
/// ready. The borrow is released before the caller touches any signal.
fn with_builder<R>(context: &SharedContext, f: impl FnOnce(&mut BuilderContext) -> R) -> Option<R> {
	context.borrow_mut().as_mut().map(f)
}

fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Pointer position relative to the canvas.
fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Vec2> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Vec2::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive category diagram builder.
///
/// Type an object name and submit to add it; the first object becomes the
/// terminal object. Click a node, then another, to draw a morphism of the
/// selected kind. Drag nodes to reposition them, drag the background to pan
/// and scroll to zoom.
#[component]
pub fn DiagramBuilder(
	#[prop(default = DiagramConfig::default())] config: DiagramConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	let properties = RwSignal::new(DerivedProperties::default());
	let label = RwSignal::new(String::new());
	let initial_kind = config.default_morphism.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("diagram-builder: canvas has no 2d context");
			return;
		};

		*context_init.borrow_mut() = Some(BuilderContext {
			state: DiagramState::new(config.clone(), w, h),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				with_builder(&context_resize, |c| c.state.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			with_builder(&context_anim, |c| {
				c.state.tick(FRAME_DT);
				let frame = c.state.frame(&c.scale);
				render::render(
					&frame,
					&c.state.transform,
					(c.state.width, c.state.height),
					&ctx,
					&c.scale,
					&c.theme,
				);
			});
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_add = context.clone();
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let name = label.get_untracked();
		let added = with_builder(&context_add, |c| {
			c.state.add_object(&name).map(|_| c.state.properties())
		});
		// A rejected name stays in the field for another try.
		if let Some(Ok(props)) = added {
			properties.set(props);
			label.set(String::new());
		}
	};

	let context_classifier = context.clone();
	let on_classifier = move |_: MouseEvent| {
		let added = with_builder(&context_classifier, |c| {
			c.state.add_classifier().map(|_| c.state.properties())
		});
		if let Some(Ok(props)) = added {
			properties.set(props);
		}
	};

	let context_kind = context.clone();
	let on_kind = move |ev: Event| {
		if let Some(kind) = MorphismKind::from_slug(&event_target_value(&ev)) {
			with_builder(&context_kind, |c| c.state.set_morphism_kind(kind));
		}
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(pos) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		with_builder(&context_md, |c| c.state.pointer_down(pos, &c.scale));
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(pos) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		with_builder(&context_mm, |c| c.state.pointer_move(pos, &c.scale));
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let props = with_builder(&context_mu, |c| {
			c.state.pointer_up();
			c.state.properties()
		});
		if let Some(props) = props {
			properties.set(props);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_builder(&context_ml, |c| c.state.pointer_leave());
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(pos) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		with_builder(&context_wh, |c| c.state.zoom(pos, ev.delta_y()));
	};

	let kind_options = MorphismKind::presets()
		.into_iter()
		.map(|kind| {
			let selected = kind == initial_kind;
			view! {
				<option value=kind.slug().to_string() selected=selected>
					{kind.label().to_string()}
				</option>
			}
		})
		.collect_view();

	view! {
		<div class="diagram-builder">
			<form class="diagram-controls" on:submit=on_submit>
				<input
					type="text"
					placeholder="Object name"
					prop:value=move || label.get()
					on:input=move |ev| label.set(event_target_value(&ev))
				/>
				<button type="submit">"Add object"</button>
				<select class="morphism-kind" on:change=on_kind>
					{kind_options}
				</select>
				<button
					type="button"
					on:click=on_classifier
					disabled=move || properties.get().has_classifier
				>
					"Add classifier Ω"
				</button>
			</form>
			<canvas
				node_ref=canvas_ref
				class="diagram-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: pointer;"
			/>
			<ul class="diagram-properties">
				{move || {
					properties
						.get()
						.panel_lines()
						.into_iter()
						.map(|line| {
							let (class, mark) = if line.holds { ("holds", "✓") } else { ("missing", "✗") };
							view! { <li class=class>{mark}" "{line.text}</li> }
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}
