use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use constants::interaction::DOUBLE_CLICK_INTERVAL_MS;

use super::picking::{CameraSurfacePicker, SurfaceKind};
use crate::surface::CoordinateProvider;

/// While a measurement is running the double-click gesture means "finish",
/// so the camera's own double-click action must stand down.
#[derive(Resource, Default)]
pub struct NativeDoubleClickSuppression(pub bool);

#[derive(Resource)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub height: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub last_click_ms: Option<u64>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::new(0.0, 45.0, 60.0),
            height: 60.0,
            pitch: -0.64,
            yaw: 0.0,
            last_click_ms: None,
        }
    }
}

pub fn camera_controller(
    mut camera_query: Query<(&mut Transform, &GlobalTransform, &Camera), With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    suppression: Res<NativeDoubleClickSuppression>,
    surface: Res<SurfaceKind>,
    time: Res<Time>,
) {
    let Ok((mut camera_transform, global_transform, camera)) = camera_query.single_mut() else {
        return;
    };

    // Middle-drag look around; right-drag stays free for the measure tool.
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Middle) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        orbit.yaw += -mouse_delta.x * yaw_sens;
        orbit.pitch = (orbit.pitch - mouse_delta.y * pitch_sens).clamp(-1.55, 1.55);
    }

    // Mouse wheel scroll accumulation (pixel and line scroll)
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    // Dolly along the view direction
    if scroll_accum.abs() > f32::EPSILON {
        let dolly_speed = (orbit.height * 0.2).clamp(0.5, 500.0);
        let view_rot = Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0);
        let forward = (view_rot * Vec3::Z).normalize();
        orbit.focus_point -= forward * (scroll_accum * dolly_speed);
    }

    // Native double-click: recentre on the picked surface point. Stands down
    // while the measure tool owns the gesture.
    if mouse_button.just_pressed(MouseButton::Left) {
        let now_ms = time.elapsed().as_millis() as u64;
        let is_double = orbit
            .last_click_ms
            .is_some_and(|prev| now_ms.saturating_sub(prev) < DOUBLE_CLICK_INTERVAL_MS);
        orbit.last_click_ms = Some(now_ms);

        if is_double && !suppression.0 {
            if let Ok(window) = windows.single() {
                if let Some(cursor_pos) = window.cursor_position() {
                    let picker = CameraSurfacePicker {
                        camera,
                        camera_transform: global_transform,
                        surface: *surface,
                    };
                    if let Some(hit) = picker.pick(cursor_pos) {
                        let hit = hit.as_vec3();
                        // Glide over the target, keeping the current altitude.
                        orbit.focus_point = Vec3::new(hit.x, orbit.focus_point.y, hit.z);
                    }
                }
            }
        }
    }

    // Smoothed camera positioning
    let target_rot = Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0);
    let target_pos = orbit.focus_point;
    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}
