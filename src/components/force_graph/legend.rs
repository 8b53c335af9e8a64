use super::scale::{Rgb, score_color};
use super::tooltip::format_percent;

pub const LEGEND_WIDTH: f64 = 150.0;
pub const LEGEND_TITLE: &str = "Human Factor Score";
pub const MEASURED_LABEL: &str = "Measured factor";
/// Fill of the marker dot on measured factors.
pub const MEASURED_MARKER: &str = "#065f46";

/// Reference scores shown as swatches; `None` is the unmeasured gray.
const STOPS: [Option<f64>; 6] = [None, Some(0.0), Some(0.25), Some(0.5), Some(0.75), Some(1.0)];
const MARGIN: f64 = 10.0;
const FIRST_ROW: f64 = 28.0;
const ROW_HEIGHT: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Swatch {
	Color(Rgb),
	MeasuredMarker,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub swatch: Swatch,
	pub label: String,
	/// Top of the row, relative to the panel.
	pub y: f64,
}

/// Static legend panel anchored to the top-right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub entries: Vec<LegendEntry>,
}

impl Legend {
	/// Build the whole panel for a canvas `canvas_width` wide.
	pub fn new(canvas_width: f64) -> Self {
		let mut entries: Vec<LegendEntry> = STOPS
			.iter()
			.map(|&stop| LegendEntry {
				swatch: Swatch::Color(score_color(stop)),
				label: stop.map_or_else(|| "Unmeasured".to_string(), format_percent),
				y: 0.0,
			})
			.collect();
		entries.push(LegendEntry {
			swatch: Swatch::MeasuredMarker,
			label: MEASURED_LABEL.to_string(),
			y: 0.0,
		});
		for (i, entry) in entries.iter_mut().enumerate() {
			entry.y = FIRST_ROW + ROW_HEIGHT * i as f64;
		}

		Self {
			x: canvas_width - LEGEND_WIDTH - MARGIN,
			y: 2.0 * MARGIN,
			width: LEGEND_WIDTH,
			height: FIRST_ROW + ROW_HEIGHT * entries.len() as f64,
			entries,
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::force_graph::scale::UNMEASURED;

	#[test]
	fn six_swatches_then_marker() {
		let legend = Legend::new(800.0);
		let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
		assert_eq!(
			labels,
			vec!["Unmeasured", "0%", "25%", "50%", "75%", "100%", "Measured factor"]
		);
		assert_eq!(legend.entries[0].swatch, Swatch::Color(UNMEASURED));
		assert_eq!(legend.entries[6].swatch, Swatch::MeasuredMarker);
	}

	#[test]
	fn anchored_top_right() {
		let legend = Legend::new(800.0);
		assert_eq!((legend.x, legend.y), (640.0, 20.0));
		let last = legend.entries.last().unwrap();
		assert!(last.y + ROW_HEIGHT <= legend.height);
	}

	#[test]
	fn rebuilding_is_idempotent() {
		assert_eq!(Legend::new(640.0), Legend::new(640.0));
	}
}
