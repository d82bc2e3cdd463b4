//! JSON-RPC 2.0 communication layer for an embedding frontend.
//!
//! The engine runs inside an iframe on web deployments; the surrounding
//! application drives the measure tool and receives live measurement
//! updates over `postMessage`:
//!
//! - **Requests** (`measure_start`, `measure_terminate`, `measure_clear`,
//!   `measure_state`) expect responses with matching ids
//! - **Notifications** (`measure_started`, `measure_point_added`,
//!   `measure_updated`, `measure_completed`, `measure_cleared`,
//!   `tool_state_changed`) are one-way, engine to frontend
//!
//! On native builds the transport is a no-op and the queues simply drain.

pub mod web_rpc;
