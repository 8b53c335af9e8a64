pub mod export_toolbar;
pub mod force_graph;
pub mod nav;
