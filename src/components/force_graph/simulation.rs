//! Force-directed layout simulation.
//!
//! Nodes are pulled together along links, pushed apart by a charge force
//! with a distance cutoff, kept from overlapping by a collision force and
//! recentered on the canvas every tick. Motion is scaled by `alpha`, which
//! decays toward `alpha_target`; dragging raises the target so the rest of
//! the graph reacts.

use std::f64::consts::PI;

/// Neutral length of a link.
pub const LINK_DISTANCE: f64 = 30.0;
/// Charge between every pair of nodes. Negative repels.
pub const CHARGE_STRENGTH: f64 = -100.0;
/// Charge cutoff as a fraction of the smaller canvas dimension.
pub const CHARGE_RANGE_FRACTION: f64 = 0.18;
/// Below this distance the charge stops growing.
pub const CHARGE_DISTANCE_MIN: f64 = 1.0;
/// Collision radius of every node.
pub const COLLIDE_RADIUS: f64 = 10.0;
/// Alpha target held while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_DECAY: f64 = 0.4;
const INITIAL_RADIUS: f64 = 10.0;

/// Position and velocity of one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned x, set while dragging.
	pub fx: Option<f64>,
	/// Pinned y, set while dragging.
	pub fy: Option<f64>,
}

impl LayoutNode {
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

#[derive(Clone, Debug)]
struct LayoutLink {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// Linear congruential generator used to separate coincident nodes.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	fn next(&mut self) -> f64 {
		self.0 = (1_664_525 * self.0 + 1_013_904_223) % 4_294_967_296;
		self.0 as f64 / 4_294_967_296.0
	}

	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Layout state for one dataset on one canvas.
#[derive(Clone, Debug)]
pub struct Simulation {
	pub nodes: Vec<LayoutNode>,
	links: Vec<LayoutLink>,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	center: (f64, f64),
	charge_distance_max: f64,
	random: Lcg,
}

impl Simulation {
	/// Create a simulation for `node_count` nodes connected by `links`
	/// (pairs of node indices) on a `width` x `height` canvas.
	pub fn new(node_count: usize, links: &[(usize, usize)], width: f64, height: f64) -> Self {
		let center = (width / 2.0, height / 2.0);
		let angle_step = PI * (3.0 - 5f64.sqrt());
		let nodes = (0..node_count)
			.map(|i| {
				let (radius, angle) = (INITIAL_RADIUS * (0.5 + i as f64).sqrt(), i as f64 * angle_step);
				LayoutNode {
					x: center.0 + radius * angle.cos(),
					y: center.1 + radius * angle.sin(),
					..Default::default()
				}
			})
			.collect();

		let mut degree = vec![0usize; node_count];
		for &(s, t) in links {
			degree[s] += 1;
			degree[t] += 1;
		}
		let links = links
			.iter()
			.map(|&(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				LayoutLink {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			center,
			charge_distance_max: width.min(height) * CHARGE_RANGE_FRACTION,
			random: Lcg(1),
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Index pairs of every link, in insertion order.
	pub fn link_endpoints(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.links.iter().map(|l| (l.source, l.target))
	}

	/// Follow a canvas resize: recenter and rescale the charge cutoff.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.center = (width / 2.0, height / 2.0);
		self.charge_distance_max = width.min(height) * CHARGE_RANGE_FRACTION;
	}

	/// Advance one step.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_collisions();
		self.apply_centering();

		let decay = 1.0 - VELOCITY_DECAY;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= decay;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= decay;
					node.y += node.vy;
				}
			}
		}
	}

	/// Pin `idx` where it stands and wake the simulation.
	pub fn begin_drag(&mut self, idx: usize) {
		self.alpha_target = DRAG_ALPHA_TARGET;
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(node.x);
			node.fy = Some(node.y);
		}
	}

	/// Move the pin of a dragged node.
	pub fn drag_to(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	/// Release a dragged node and let the layout settle.
	pub fn end_drag(&mut self, idx: usize) {
		self.alpha_target = 0.0;
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
	}

	pub(crate) fn apply_links(&mut self) {
		for i in 0..self.links.len() {
			let LayoutLink {
				source,
				target,
				strength,
				bias,
			} = self.links[i];
			let (s, t) = (&self.nodes[source], &self.nodes[target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.random.jiggle();
			}
			if y == 0.0 {
				y = self.random.jiggle();
			}
			let len = (x * x + y * y).sqrt();
			let l = (len - LINK_DISTANCE) / len * self.alpha * strength;
			let (x, y) = (x * l, y * l);

			let t = &mut self.nodes[target];
			t.vx -= x * bias;
			t.vy -= y * bias;
			let s = &mut self.nodes[source];
			s.vx += x * (1.0 - bias);
			s.vy += y * (1.0 - bias);
		}
	}

	pub(crate) fn apply_charge(&mut self) {
		let max2 = self.charge_distance_max * self.charge_distance_max;
		let min2 = CHARGE_DISTANCE_MIN * CHARGE_DISTANCE_MIN;
		let n = self.nodes.len();
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.nodes[j].x - self.nodes[i].x;
				let mut y = self.nodes[j].y - self.nodes[i].y;
				let mut l = x * x + y * y;
				if l >= max2 {
					continue;
				}
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				let w = CHARGE_STRENGTH * self.alpha / l;
				self.nodes[i].vx += x * w;
				self.nodes[i].vy += y * w;
			}
		}
	}

	pub(crate) fn apply_collisions(&mut self) {
		let r = COLLIDE_RADIUS * 2.0;
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				let mut x = (a.x + a.vx) - (b.x + b.vx);
				let mut y = (a.y + a.vy) - (b.y + b.vy);
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.random.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.random.jiggle();
					l += y * y;
				}
				let len = l.sqrt();
				let k = (r - len) / len;
				// Equal radii: each side absorbs half the overlap.
				let (x, y) = (x * k * 0.5, y * k * 0.5);
				self.nodes[i].vx += x;
				self.nodes[i].vy += y;
				self.nodes[j].vx -= x;
				self.nodes[j].vy -= y;
			}
		}
	}

	pub(crate) fn apply_centering(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (sx / n - self.center.0, sy / n - self.center.1);
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}
}
