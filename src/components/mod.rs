//! Reusable view components.

pub mod drawer;
pub mod flow_canvas;
