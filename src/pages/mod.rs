use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::on_cleanup;

pub mod actions;
pub mod graph;
pub mod not_found;
pub mod team;

/// Cleared when the owning component unmounts, so late responses can be
/// dropped instead of written into a torn-down view.
#[derive(Clone, Debug)]
pub(crate) struct Mounted(Arc<AtomicBool>);

impl Mounted {
	/// Create a flag tied to the current reactive owner.
	pub fn track() -> Self {
		let flag = Arc::new(AtomicBool::new(true));
		let cleared = flag.clone();
		on_cleanup(move || cleared.store(false, Ordering::Relaxed));
		Self(flag)
	}

	pub fn get(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Progress of a screen's initial read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadStatus {
	Loading,
	Loaded,
}
