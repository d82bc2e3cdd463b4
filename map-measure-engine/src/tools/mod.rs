//! Interactive measurement tooling.
//!
//! The measure tool turns a click sequence into a live polyline or polygon
//! with a running distance/area label:
//!
//! 1. Left click commits a vertex at the picked surface point
//! 2. Pointer movement drives a rubber-band preview and the running value
//! 3. Double-click or right-click finishes; the result shape and label stay
//! 4. Clearing sweeps every overlay the session created
//!
//! Commands arrive as [`tool_manager::ToolCommandEvent`]s from keyboard
//! shortcuts (native) or the RPC layer (WASM frontends), and lifecycle
//! updates flow back out as frontend notifications.

/// Measurement session state machine and tool facade.
pub mod measure;

/// Command routing, keyboard shortcuts and frontend notification fan-out.
pub mod tool_manager;
