//! Canvas widget drawing a static node/edge flow diagram.

mod component;
mod error;
mod render;
mod state;
mod types;

pub use component::FlowCanvas;
pub use error::FlowError;
pub use state::FlowConfig;
pub use types::{FlowData, FlowEdge, FlowNode, Position};
