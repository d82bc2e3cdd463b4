use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::camera::NativeDoubleClickSuppression;
use super::picking::{CameraSurfacePicker, SurfaceKind};
use crate::tools::measure::MeasureTool;

/// Route pointer input to the measure tool.
///
/// Scheduled permanently but gated on an active session, so an idle tool
/// never sees an event. The tool itself distinguishes single from double
/// clicks by timestamp.
pub fn measure_input_system(
    mut tool: ResMut<MeasureTool>,
    surface: Res<SurfaceKind>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    time: Res<Time>,
) {
    if !tool.is_measuring() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera_transform, camera)) = cameras.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    let picker = CameraSurfacePicker {
        camera,
        camera_transform,
        surface: *surface,
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        let timestamp_ms = time.elapsed().as_millis() as u64;
        tool.on_click(&picker, cursor_pos, timestamp_ms);
    }

    if mouse_button.just_pressed(MouseButton::Right) {
        tool.on_right_click();
    }

    // The per-frame cursor sample drives the rubber band and running label.
    tool.on_move(&picker, cursor_pos);
}

/// Keep the host's native double-click action disabled while measuring;
/// the tool reinterprets double-click as "finish".
pub fn sync_double_click_suppression(
    tool: Res<MeasureTool>,
    mut suppression: ResMut<NativeDoubleClickSuppression>,
) {
    suppression.0 = tool.is_measuring();
}
