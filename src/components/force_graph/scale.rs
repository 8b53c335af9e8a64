//! Diverging red-yellow-green color scale for factor scores.

use std::fmt;

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
	}
}

/// Color of factors without a score.
pub const UNMEASURED: Rgb = Rgb::new(128, 128, 128);

/// Eleven-class RdYlGn scheme, red (low) to green (high).
const RD_YL_GN: [Rgb; 11] = [
	Rgb::new(0xa5, 0x00, 0x26),
	Rgb::new(0xd7, 0x30, 0x27),
	Rgb::new(0xf4, 0x6d, 0x43),
	Rgb::new(0xfd, 0xae, 0x61),
	Rgb::new(0xfe, 0xe0, 0x8b),
	Rgb::new(0xff, 0xff, 0xbf),
	Rgb::new(0xd9, 0xef, 0x8b),
	Rgb::new(0xa6, 0xd9, 0x6a),
	Rgb::new(0x66, 0xbd, 0x63),
	Rgb::new(0x1a, 0x98, 0x50),
	Rgb::new(0x00, 0x68, 0x37),
];

/// Uniform cubic B-spline weight blend of four control values.
fn basis(t: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
	let (t2, t3) = (t * t, t * t * t);
	((1.0 - 3.0 * t + 3.0 * t2 - t3) * v0
		+ (4.0 - 6.0 * t2 + 3.0 * t3) * v1
		+ (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) * v2
		+ t3 * v3)
		/ 6.0
}

fn spline(values: &[f64], t: f64) -> f64 {
	let n = values.len() - 1;
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	let i = if t >= 1.0 { n - 1 } else { (t * n as f64).floor() as usize };
	let (v1, v2) = (values[i], values[i + 1]);
	let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
	let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };
	basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

fn channel(values: &[f64], t: f64) -> u8 {
	spline(values, t).round().clamp(0.0, 255.0) as u8
}

/// Interpolate the scheme at `t`, clamped to `[0, 1]`.
pub fn rd_yl_gn(t: f64) -> Rgb {
	let r: Vec<f64> = RD_YL_GN.iter().map(|c| c.r as f64).collect();
	let g: Vec<f64> = RD_YL_GN.iter().map(|c| c.g as f64).collect();
	let b: Vec<f64> = RD_YL_GN.iter().map(|c| c.b as f64).collect();
	Rgb::new(channel(&r, t), channel(&g, t), channel(&b, t))
}

/// Fill color for a factor score; unmeasured factors are gray.
pub fn score_color(score: Option<f64>) -> Rgb {
	score.map_or(UNMEASURED, rd_yl_gn)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_hit_the_scheme_extremes() {
		assert_eq!(rd_yl_gn(0.0), RD_YL_GN[0]);
		assert_eq!(rd_yl_gn(1.0), RD_YL_GN[10]);
		assert_eq!(rd_yl_gn(-3.0), RD_YL_GN[0]);
		assert_eq!(rd_yl_gn(7.0), RD_YL_GN[10]);
	}

	#[test]
	fn same_score_same_color() {
		for s in [0.0, 0.13, 0.5, 0.61, 0.99] {
			assert_eq!(score_color(Some(s)), score_color(Some(s)));
		}
	}

	#[test]
	fn missing_score_is_gray() {
		assert_eq!(score_color(None), UNMEASURED);
		assert_eq!(score_color(None).to_string(), "rgb(128, 128, 128)");
	}

	#[test]
	fn low_scores_red_high_scores_green() {
		let balance = |t: f64| {
			let c = rd_yl_gn(t);
			c.g as i32 - c.r as i32
		};
		let stops = [0.0, 0.25, 0.5, 0.75, 1.0];
		for pair in stops.windows(2) {
			assert!(balance(pair[0]) < balance(pair[1]), "{:?}", pair);
		}
		assert!(balance(0.0) < 0);
		assert!(balance(1.0) > 0);
	}
}
