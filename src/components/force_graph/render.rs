use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::legend::{LEGEND_TITLE, Legend, MEASURED_MARKER, Swatch};
use super::state::{ForceGraphState, MARKER_RADIUS};
use super::tooltip::{FONT_SIZE, layout_tooltip, tooltip_lines};

const TEXT_COLOR: &str = "#222";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_tooltip(state, ctx);
	draw_legend(&state.legend, ctx);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let nodes = &state.simulation.nodes;
	ctx.set_stroke_style_str("rgba(128, 128, 128, 0.5)");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for (src, tgt) in state.simulation.link_endpoints() {
		let (s, t) = (&nodes[src], &nodes[tgt]);
		ctx.move_to(s.x, s.y);
		ctx.line_to(t.x, t.y);
	}
	ctx.stroke();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	for (idx, (layout, info)) in state.simulation.nodes.iter().zip(&state.nodes).enumerate() {
		ctx.begin_path();
		let _ = ctx.arc(layout.x, layout.y, state.radius(idx), 0.0, 2.0 * PI);
		ctx.set_global_alpha(0.7);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if state.is_dragging(idx) {
			ctx.set_stroke_style_str("black");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		if info.node.is_measured() {
			ctx.begin_path();
			let _ = ctx.arc(layout.x, layout.y, MARKER_RADIUS, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(MEASURED_MARKER);
			ctx.fill();
		}
	}
}

fn font(bold: bool) -> String {
	let weight = if bold { "bold " } else { "" };
	format!("{}{}px sans-serif", weight, FONT_SIZE)
}

fn measure(ctx: &CanvasRenderingContext2d, text: &str, bold: bool) -> f64 {
	ctx.set_font(&font(bold));
	ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(info) = state.hover.node_idx.and_then(|idx| state.nodes.get(idx)) else {
		return;
	};
	let lines = tooltip_lines(&info.node);
	let layout = layout_tooltip(
		&lines,
		state.hover.x,
		state.hover.y,
		state.width,
		state.height,
		|text, bold| measure(ctx, text, bold),
	);

	rounded_rect(
		ctx,
		layout.box_x,
		layout.box_y,
		layout.box_width,
		layout.box_height,
		5.0,
	);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.fill();
	ctx.set_stroke_style_str("rgba(0, 0, 0, 0.2)");
	ctx.set_line_width(1.0);
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_fill_style_str(TEXT_COLOR);
	for (i, (line, &baseline)) in lines.iter().zip(&layout.baselines).enumerate() {
		ctx.set_font(&font(i == 0));
		let _ = ctx.fill_text(line, layout.text_x, baseline);
	}
	ctx.set_text_align("start");
}

fn draw_legend(legend: &Legend, ctx: &CanvasRenderingContext2d) {
	let (x, y) = (legend.x, legend.y);
	rounded_rect(ctx, x, y, legend.width, legend.height, 6.0);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
	ctx.fill();

	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font("bold 12px sans-serif");
	let _ = ctx.fill_text(LEGEND_TITLE, x + 10.0, y + 18.0);

	ctx.set_font("11px sans-serif");
	for entry in &legend.entries {
		let row = y + entry.y;
		match &entry.swatch {
			Swatch::Color(color) => {
				rounded_rect(ctx, x + 10.0, row, 20.0, 15.0, 2.0);
				ctx.set_fill_style_str(&color.to_string());
				ctx.fill();
			}
			Swatch::MeasuredMarker => {
				ctx.begin_path();
				let _ = ctx.arc(x + 20.0, row + 7.5, 2.0, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(MEASURED_MARKER);
				ctx.fill();
			}
		}
		ctx.set_stroke_style_str("#333");
		ctx.set_line_width(0.5);
		ctx.stroke();

		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(&entry.label, x + 40.0, row + 12.0);
	}
}
