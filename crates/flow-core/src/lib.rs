pub mod bounds;
pub mod config;
pub mod graph;
pub mod id;
pub mod layout;
pub mod model;

pub use bounds::{Bounded, bound_nodes};
pub use config::{BoundsConfig, LayoutConfig};
pub use graph::{FlowGraph, GraphStore};
pub use id::{EdgeId, NodeId};
pub use layout::{apply_layout, auto_layout};
pub use model::*;
