use super::types::GraphNode;

pub const FONT_SIZE: f64 = 12.0;
pub const LINE_HEIGHT: f64 = FONT_SIZE * 1.1;
const PAD_X: f64 = 10.0;
const PAD_Y: f64 = 5.0;
/// Space between the pointer and the nearest tooltip edge.
const POINTER_GAP: f64 = 15.0;

/// Score as a whole percentage, rounding halves up.
pub fn format_percent(score: f64) -> String {
	format!("{}%", (score * 100.0).round() as i64)
}

/// The two tooltip lines for a node: its title, then its value and origin.
pub fn tooltip_lines(node: &GraphNode) -> [String; 2] {
	let value = node
		.score
		.map(format_percent)
		.unwrap_or_else(|| "Unmeasured".to_string());
	let origin = if node.is_measured() {
		"Measured factor"
	} else {
		"Inferred factor"
	};
	[node.title.clone(), format!("{} - {}", value, origin)]
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLayout {
	pub box_x: f64,
	pub box_y: f64,
	pub box_width: f64,
	pub box_height: f64,
	/// Horizontal center of the text.
	pub text_x: f64,
	/// Baseline of each line.
	pub baselines: Vec<f64>,
}

/// Size the box around `lines` and place it next to the pointer at
/// `(px, py)` inside a `width` x `height` surface.
///
/// The box sits centered above the pointer; it flips below when there is no
/// room on top and is shifted sideways to stay on the surface.
pub fn layout_tooltip(
	lines: &[String],
	px: f64,
	py: f64,
	width: f64,
	height: f64,
	measure: impl Fn(&str, bool) -> f64,
) -> TooltipLayout {
	let text_width = lines
		.iter()
		.enumerate()
		.map(|(i, l)| measure(l, i == 0))
		.fold(0.0, f64::max);
	let text_height = LINE_HEIGHT * lines.len() as f64;
	let (box_width, box_height) = (text_width + 2.0 * PAD_X, text_height + 2.0 * PAD_Y);

	let above = py - POINTER_GAP - box_height;
	let box_y = if above >= 0.0 || py + POINTER_GAP + box_height > height {
		above
	} else {
		py + POINTER_GAP
	};
	let box_x = (px - box_width / 2.0).min(width - box_width).max(0.0);

	let baselines = (0..lines.len())
		.map(|i| box_y + PAD_Y + FONT_SIZE + LINE_HEIGHT * i as f64)
		.collect();

	TooltipLayout {
		box_x,
		box_y,
		box_width,
		box_height,
		text_x: box_x + box_width / 2.0,
		baselines,
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn node(score: Option<f64>, affected_by: Vec<i64>) -> GraphNode {
		GraphNode {
			id: 1,
			title: "Psychological safety".into(),
			score,
			affected_by,
		}
	}

	fn measure(text: &str, _bold: bool) -> f64 {
		text.len() as f64 * 6.0
	}

	#[test]
	fn measured_node_lines() {
		assert_eq!(
			tooltip_lines(&node(Some(0.8), vec![])),
			["Psychological safety".to_string(), "80% - Measured factor".to_string()]
		);
	}

	#[test]
	fn unmeasured_inferred_node_lines() {
		assert_eq!(
			tooltip_lines(&node(None, vec![3]))[1],
			"Unmeasured - Inferred factor"
		);
	}

	#[test]
	fn percent_rounds_halves_up() {
		assert_eq!(format_percent(0.125), "13%");
		assert_eq!(format_percent(0.0), "0%");
		assert_eq!(format_percent(1.0), "100%");
	}

	#[test]
	fn box_fits_widest_line() {
		let lines = ["ab".to_string(), "abcdef".to_string()];
		let layout = layout_tooltip(&lines, 400.0, 300.0, 800.0, 600.0, measure);
		assert_eq!(layout.box_width, 36.0 + 20.0);
		assert_eq!(layout.box_height, 2.0 * LINE_HEIGHT + 10.0);
		assert_eq!(layout.text_x, 400.0);
	}

	#[test]
	fn box_never_covers_pointer() {
		let lines = ["title".to_string(), "50% - Measured factor".to_string()];
		for (px, py) in [(400.0, 300.0), (400.0, 2.0), (1.0, 599.0), (799.0, 40.0)] {
			let l = layout_tooltip(&lines, px, py, 800.0, 600.0, measure);
			let covers = px >= l.box_x
				&& px <= l.box_x + l.box_width
				&& py >= l.box_y
				&& py <= l.box_y + l.box_height;
			assert!(!covers, "pointer ({}, {}) under {:?}", px, py, l);
			assert!(l.box_x >= 0.0 && l.box_x + l.box_width <= 800.0);
		}
	}

	#[test]
	fn flips_below_near_top_edge() {
		let lines = ["t".to_string()];
		let l = layout_tooltip(&lines, 100.0, 5.0, 800.0, 600.0, measure);
		assert!(l.box_y > 5.0);
	}
}
