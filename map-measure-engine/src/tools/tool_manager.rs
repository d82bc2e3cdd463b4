use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::measure::{MeasureEvent, MeasureKind, MeasureTool};

/// Commands driving the measure tool, raised by keyboard shortcuts or RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCommand {
    Start(MeasureKind),
    Terminate,
    Clear,
}

/// Source of a command, for logging and frontend echo.
#[derive(Debug, Clone, Copy)]
pub enum ToolCommandSource {
    Rpc,
    Keyboard,
}

#[derive(Event)]
pub struct ToolCommandEvent {
    pub command: ToolCommand,
    pub source: ToolCommandSource,
}

/// Apply queued tool commands and confirm state changes to the frontend.
pub fn handle_tool_command_events(
    mut events: EventReader<ToolCommandEvent>,
    mut tool: ResMut<MeasureTool>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match event.command {
            ToolCommand::Start(kind) => {
                tool.start_measure(kind);
                info!("Measurement started ({}) via {:?}", kind.as_str(), event.source);
                rpc_interface.send_notification(
                    "tool_state_changed",
                    serde_json::json!({
                        "tool": "measure",
                        "active": true,
                        "kind": kind.as_str(),
                    }),
                );
            }
            ToolCommand::Terminate => {
                tool.terminate();
            }
            ToolCommand::Clear => {
                tool.clear();
                info!("Measurement overlays cleared via {:?}", event.source);
                rpc_interface.send_notification(
                    "tool_state_changed",
                    serde_json::json!({
                        "tool": "measure",
                        "active": false,
                    }),
                );
            }
        }
    }
}

/// Forward the tool's queued lifecycle events as frontend notifications.
pub fn publish_measure_events(
    mut tool: ResMut<MeasureTool>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in tool.take_events() {
        match event {
            MeasureEvent::Started { kind } => {
                rpc_interface.send_notification(
                    "measure_started",
                    serde_json::json!({ "kind": kind.as_str() }),
                );
            }
            MeasureEvent::VertexAdded { position, count } => {
                rpc_interface.send_notification(
                    "measure_point_added",
                    serde_json::json!({
                        "position": [position.x, position.y, position.z],
                        "point_count": count,
                    }),
                );
            }
            MeasureEvent::LiveUpdated { kind, value, text } => {
                rpc_interface.send_notification(
                    "measure_updated",
                    serde_json::json!({
                        "kind": kind.as_str(),
                        "value": value,
                        "text": text,
                    }),
                );
            }
            MeasureEvent::Completed {
                kind,
                value,
                text,
                points,
            } => {
                info!("Measurement completed: {}", text);
                let positions: Vec<[f64; 3]> =
                    points.iter().map(|p| [p.x, p.y, p.z]).collect();
                rpc_interface.send_notification(
                    "measure_completed",
                    serde_json::json!({
                        "kind": kind.as_str(),
                        "value": value,
                        "text": text,
                        "points": positions,
                    }),
                );
            }
            MeasureEvent::Terminated => {
                rpc_interface.send_notification(
                    "tool_state_changed",
                    serde_json::json!({
                        "tool": "measure",
                        "active": false,
                    }),
                );
            }
            MeasureEvent::Cleared => {
                rpc_interface.send_notification("measure_cleared", serde_json::json!({}));
            }
        }
    }
}

/// Keyboard shortcuts for tool control (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_tool_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut tool_events: EventWriter<ToolCommandEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        tool_events.write(ToolCommandEvent {
            command: ToolCommand::Start(MeasureKind::Distance),
            source: ToolCommandSource::Keyboard,
        });
    }

    if keyboard.just_pressed(KeyCode::KeyG) {
        tool_events.write(ToolCommandEvent {
            command: ToolCommand::Start(MeasureKind::Area),
            source: ToolCommandSource::Keyboard,
        });
    }

    if keyboard.just_pressed(KeyCode::KeyX) {
        tool_events.write(ToolCommandEvent {
            command: ToolCommand::Clear,
            source: ToolCommandSource::Keyboard,
        });
    }
}

/// Placeholder for WASM builds where the tool is controlled via RPC only.
#[cfg(target_arch = "wasm32")]
pub fn handle_tool_keyboard_shortcuts() {}
