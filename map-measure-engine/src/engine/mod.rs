//! Host-engine integration.
//!
//! Everything that touches the ECS lives here: pointer input routing, the
//! per-frame overlay rebuild, label projection, the demo camera controller
//! and the plugin that wires the stack together. The measurement core in
//! [`crate::tools`] stays free of scheduling concerns and is driven purely
//! through its event entry points.

pub mod camera;
pub mod input;
pub mod overlay_render;
pub mod picking;

use bevy::prelude::*;

use crate::geometry::{PlanarGeometry, SphericalGeometry, SurfaceGeometry};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::measure::MeasureTool;
use crate::tools::tool_manager::{
    ToolCommandEvent, handle_tool_command_events, handle_tool_keyboard_shortcuts,
    publish_measure_events,
};

use self::camera::{NativeDoubleClickSuppression, OrbitCamera, camera_controller};
use self::input::{measure_input_system, sync_double_click_suppression};
use self::overlay_render::{update_measure_label, update_overlay_visuals};
use self::picking::SurfaceKind;

/// Complete measure-tool stack for one surface kind.
///
/// The surface decides both halves of the strategy pair: how screen
/// positions resolve to world points and how point sequences turn into
/// distances and areas.
pub struct MeasureToolPlugin {
    pub surface: SurfaceKind,
}

impl MeasureToolPlugin {
    /// Globe configuration: ray-picked against an earth-sized sphere,
    /// measured with spherical geometry.
    pub fn ellipsoid() -> Self {
        Self {
            surface: SurfaceKind::ellipsoid(),
        }
    }

    /// Projected-map configuration: picked against the ground plane,
    /// measured with planar geometry.
    pub fn planar() -> Self {
        Self {
            surface: SurfaceKind::planar(),
        }
    }
}

impl Plugin for MeasureToolPlugin {
    fn build(&self, app: &mut App) {
        let geometry: Box<dyn SurfaceGeometry> = match self.surface {
            SurfaceKind::Ellipsoid { radius_m } => {
                Box::new(SphericalGeometry::with_radius(radius_m))
            }
            SurfaceKind::Planar { .. } => Box::new(PlanarGeometry),
        };

        app.insert_resource(self.surface)
            .insert_resource(MeasureTool::new(geometry))
            .init_resource::<NativeDoubleClickSuppression>()
            .init_resource::<OrbitCamera>()
            .add_event::<ToolCommandEvent>()
            .add_plugins(WebRpcPlugin)
            .add_systems(
                Update,
                (
                    handle_tool_keyboard_shortcuts,
                    handle_tool_command_events,
                    measure_input_system,
                    sync_double_click_suppression,
                    camera_controller,
                    update_overlay_visuals,
                    update_measure_label,
                    publish_measure_events,
                )
                    .chain(),
            );
    }
}
