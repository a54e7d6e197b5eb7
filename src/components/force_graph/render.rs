use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::curve::{PathCmd, Point, end_tangent};
use super::layout::edge_points;
use super::state::{ForceGraphState, NODE_RADIUS};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn ink(state: &ForceGraphState, alpha: f64) -> String {
	let (r, g, b) = state.options.theme.ink();
	format!("rgba({r}, {g}, {b}, {alpha})")
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.options.theme.background());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let positions = state.positions();
	draw_edges(state, &positions, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn trace(ctx: &CanvasRenderingContext2d, path: &[PathCmd]) {
	ctx.begin_path();
	for cmd in path {
		match *cmd {
			PathCmd::MoveTo(p) => ctx.move_to(p.x, p.y),
			PathCmd::LineTo(p) => ctx.line_to(p.x, p.y),
			PathCmd::CubicTo(a, b, p) => ctx.bezier_curve_to(a.x, a.y, b.x, b.y, p.x, p.y),
		}
	}
}

fn draw_edges(state: &ForceGraphState, positions: &[(f64, f64)], ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let (orientation, curve) = (state.options.orientation, state.options.curve);

	for edge in state.edges() {
		let (src, tgt) = (positions[edge.source], positions[edge.target]);
		let (dx, dy) = (tgt.0 - src.0, tgt.1 - src.1);
		if (dx * dx + dy * dy).sqrt() < 0.001 {
			continue;
		}

		let points: Vec<Point> = edge_points(orientation, src, tgt)
			.into_iter()
			.map(|(x, y)| Point::new(x, y))
			.collect();
		let path = curve.path(&points);
		let Some((from, tip)) = end_tangent(&path) else {
			continue;
		};

		let is_highlighted = match (state.slot_index(edge.source), state.slot_index(edge.target)) {
			(Some(a), Some(b)) => state.is_highlighted(a) && state.is_highlighted(b),
			_ => false,
		};

		// Base values when no highlight active
		// When highlighting: highlighted edges brighten, others dim
		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);
		trace(ctx, &path);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		let (ex, ey) = (tip.x - from.x, tip.y - from.y);
		let len = (ex * ex + ey * ey).sqrt();
		let (ux, uy) = (ex / len, ey / len);
		ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", arrow_alpha));
		let (tip_x, tip_y) = (tip.x - ux * NODE_RADIUS, tip.y - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if !edge.label.is_empty() {
			let alpha = if is_highlighted { 0.5 + 0.4 * t } else { 0.5 - 0.3 * t };
			ctx.set_fill_style_str(&ink(state, alpha));
			ctx.set_font(&format!("{}px sans-serif", 8.0 / k.max(0.5)));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&edge.label, (src.0 + tgt.0) / 2.0, (src.1 + tgt.1) / 2.0 - 4.0 / k);
			ctx.set_text_align("start");
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str(&ink(state, alpha * 0.8));
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&node.data.user_data.label, x + radius + 3.0, y + 3.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			draw_glow(ctx, x, y, radius, glow_radius, if is_hovered { 0.35 * t } else { 0.2 * t });
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&ink(state, 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str(&ink(state, 1.0));
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&node.data.user_data.label, x + radius + 3.0, y + 3.0);
	});
}

fn draw_glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, glow: f64, alpha: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow) else {
		return;
	};
	let stops = [
		(0.0, format!("rgba(255, 255, 255, {})", alpha)),
		(0.6, format!("rgba(200, 220, 255, {})", alpha * 0.3)),
		(1.0, "rgba(255, 255, 255, 0)".to_string()),
	];
	for (offset, color) in &stops {
		if gradient.add_color_stop(*offset, color).is_err() {
			return;
		}
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
