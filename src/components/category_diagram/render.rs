//! Canvas rendering for the diagram.
//!
//! Draws a [`Frame`] and nothing else: every call starts from a cleared
//! canvas, so redrawing the same frame always produces the same image.
//! Passes, back to front:
//! 1. Background (screen space)
//! 2. Edges and arrowheads (world space)
//! 3. Nodes, rings and labels (world space)

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ViewTransform;
use super::theme::{Color, Theme};
use super::types::Vec2;
use super::view::{EdgeShape, EdgeSprite, Frame, NodeSprite};

/// Renders the complete diagram to the canvas.
pub fn render(
	frame: &Frame,
	transform: &ViewTransform,
	size: (f64, f64),
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, transform.k);

	draw_background(ctx, size, theme);

	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);

	for edge in &frame.edges {
		draw_edge(ctx, edge, &scale, theme);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	for node in &frame.nodes {
		draw_node(ctx, node, &scale, theme);
	}

	ctx.restore();
}

fn draw_background(ctx: &CanvasRenderingContext2d, (width, height): (f64, f64), theme: &Theme) {
	let bg = &theme.background;
	let gradient = if bg.use_gradient {
		ctx.create_radial_gradient(
			width / 2.0,
			height / 2.0,
			0.0,
			width / 2.0,
			height / 2.0,
			width.max(height) * 0.8,
		)
		.ok()
	} else {
		None
	};

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &bg.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &bg.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&bg.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn unit(from: Vec2, to: Vec2) -> Option<Vec2> {
	let d = to - from;
	let len = d.length();
	(len > 1e-3).then(|| d * (1.0 / len))
}

fn draw_edge(ctx: &CanvasRenderingContext2d, edge: &EdgeSprite, scale: &ScaledValues, theme: &Theme) {
	let color = theme.edge.stroke(&edge.kind);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_fill_style_str(&color.to_css());
	ctx.set_line_width(scale.edge_line_width);

	if theme.edge.dashed(&edge.kind) {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(scale.dash_pattern.0),
			&JsValue::from_f64(scale.dash_pattern.1),
		));
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	let r = scale.node_radius;
	match edge.shape {
		EdgeShape::Straight => {
			let Some(u) = unit(edge.source, edge.target) else {
				return;
			};
			let start = edge.source + u * r;
			let tip = edge.target - u * r;
			let end = tip - u * scale.arrow_size;
			ctx.begin_path();
			ctx.move_to(start.x, start.y);
			ctx.line_to(end.x, end.y);
			ctx.stroke();
			draw_arrowhead(ctx, tip, u, scale.arrow_size);
		}
		EdgeShape::Curved { control } => {
			let (Some(out), Some(inbound)) = (unit(edge.source, control), unit(control, edge.target))
			else {
				return;
			};
			let start = edge.source + out * r;
			let tip = edge.target - inbound * r;
			let end = tip - inbound * scale.arrow_size;
			ctx.begin_path();
			ctx.move_to(start.x, start.y);
			ctx.quadratic_curve_to(control.x, control.y, end.x, end.y);
			ctx.stroke();
			draw_arrowhead(ctx, tip, inbound, scale.arrow_size);
		}
		EdgeShape::Loop { center, radius } => {
			ctx.begin_path();
			let _ = ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
			ctx.stroke();
			// Arrow on the right flank of the loop, heading back down into the node.
			let tip = center + Vec2::new(radius, 0.0);
			draw_arrowhead(ctx, tip, Vec2::new(0.0, 1.0), scale.arrow_size);
		}
	}
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip: Vec2, dir: Vec2, size: f64) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	let back = tip - dir * size;
	let side = Vec2::new(-dir.y, dir.x) * (size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back.x + side.x, back.y + side.y);
	ctx.line_to(back.x - side.x, back.y - side.y);
	ctx.close_path();
	ctx.fill();
}

fn draw_ring(ctx: &CanvasRenderingContext2d, at: Vec2, radius: f64, color: Color, width: f64) {
	ctx.begin_path();
	let _ = ctx.arc(at.x, at.y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeSprite, scale: &ScaledValues, theme: &Theme) {
	let Vec2 { x, y } = node.position;
	let radius = scale.node_radius;
	let base = theme.node.fill(node.kind);

	let gradient = if theme.node.use_gradient {
		ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.ok()
	} else {
		None
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base.to_css()),
	}
	ctx.fill();

	let border_width = if node.pinned {
		theme.node.border_width * 2.0
	} else {
		theme.node.border_width
	};
	ctx.set_stroke_style_str(&theme.node.border.to_css());
	ctx.set_line_width(border_width / scale.k);
	ctx.stroke();

	if node.selected {
		draw_ring(
			ctx,
			node.position,
			radius + scale.ring_offset,
			theme.selection,
			scale.ring_width * 1.5,
		);
	} else if node.hovered {
		draw_ring(
			ctx,
			node.position,
			radius + scale.ring_offset,
			theme.hover,
			scale.ring_width,
		);
	}

	ctx.set_fill_style_str(&theme.node.label.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&node.label, x, y);
}
