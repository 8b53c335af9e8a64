//! Force-directed factor graph drawn on a canvas.

mod component;
mod legend;
mod render;
pub mod scale;
mod simulation;
mod state;
mod tooltip;
mod types;

pub use component::ForceGraphCanvas;
pub use tooltip::format_percent;
pub use types::GraphData;
