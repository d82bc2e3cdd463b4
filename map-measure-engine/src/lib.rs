//! Interactive distance and area measurement over a rendered map surface.
//!
//! Click a sequence of points on a globe or a projected map and get live
//! geometric feedback (a growing line or polygon with a running
//! distance/area label), then a frozen result on double-click or
//! right-click. The same interaction runs over both surface kinds; only the
//! picking and geometry strategies differ, and both are fixed when the
//! [`MeasureToolPlugin`] is built.
//!
//! Layering, outside in:
//!
//! - [`engine`]: ECS systems, rendering, camera, the plugin
//! - [`tools`]: the session state machine and tool facade
//! - [`overlay`]: the arena tracking every transient visual
//! - [`geometry`] / [`surface`]: pure per-surface math
//! - [`rpc`]: JSON-RPC control and notifications for an embedding frontend

pub mod engine;
pub mod geometry;
pub mod overlay;
pub mod rpc;
pub mod surface;
pub mod tools;

pub use engine::MeasureToolPlugin;
pub use engine::picking::SurfaceKind;
pub use tools::measure::{MeasureEvent, MeasureKind, MeasureTool};
