use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use constants::render_settings::{
    AREA_FILL_ALPHA, CURSOR_MARKER_SIZE, DRAW_LINE_WIDTH, DRAW_VERTEX_SIZE, FROZEN_SHAPE_COLOR,
    LABEL_FONT_SIZE, LABEL_OFFSET_PX, LIVE_SHAPE_COLOR, MIN_SEGMENT_LENGTH, VERTEX_MARKER_COLOR,
};

use crate::overlay::{OverlayShape, ShapeKind};
use crate::tools::measure::MeasureTool;

/// Tag for 3-D overlay visuals rebuilt every frame.
#[derive(Component)]
pub struct OverlayVisual;

/// Tag for the screen-space measurement label.
#[derive(Component)]
pub struct MeasureLabel;

/// Renderer: clears the previous frame's visuals and rebuilds them from the
/// overlay arena. The live shape reads the session's point sequence here, at
/// draw time, which is what makes it follow the cursor with no explicit
/// update call.
pub fn update_overlay_visuals(
    mut commands: Commands,
    tool: Res<MeasureTool>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, With<OverlayVisual>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    for overlay in tool.overlays().iter() {
        match &overlay.shape {
            OverlayShape::Marker { position } => {
                spawn_marker(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    position.as_vec3(),
                    DRAW_VERTEX_SIZE,
                    VERTEX_MARKER_COLOR,
                );
            }
            OverlayShape::FloatingMarker { position } => {
                spawn_marker(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    position.as_vec3(),
                    CURSOR_MARKER_SIZE,
                    LIVE_SHAPE_COLOR,
                );
            }
            OverlayShape::LiveShape { kind } => {
                let points: Vec<Vec3> =
                    tool.render_points().iter().map(|p| p.as_vec3()).collect();
                // Rings close visually once three vertices exist; the fill
                // appears only on the frozen shape.
                let close = *kind == ShapeKind::Polygon && points.len() >= 3;
                spawn_segments(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &points,
                    close,
                    LIVE_SHAPE_COLOR,
                );
            }
            OverlayShape::FrozenShape { kind, points } => {
                let points: Vec<Vec3> = points.iter().map(|p| p.as_vec3()).collect();
                let close = *kind == ShapeKind::Polygon;
                spawn_segments(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &points,
                    close,
                    FROZEN_SHAPE_COLOR,
                );
                if *kind == ShapeKind::Polygon && points.len() >= 3 {
                    commands.spawn((
                        Mesh3d(meshes.add(polygon_fill_mesh(&points))),
                        MeshMaterial3d(overlay_material(
                            &mut materials,
                            FROZEN_SHAPE_COLOR,
                            Some(AREA_FILL_ALPHA),
                        )),
                        OverlayVisual,
                    ));
                }
            }
            // The label is screen-space UI, handled by update_measure_label.
            OverlayShape::Label { .. } => {}
        }
    }
}

/// Keep the UI label in sync with the overlay arena, projecting its world
/// anchor into the viewport every frame.
pub fn update_measure_label(
    mut commands: Commands,
    tool: Res<MeasureTool>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    mut labels: Query<(Entity, &mut Text, &mut Node, &mut Visibility), With<MeasureLabel>>,
) {
    let Some((anchor, text)) = tool.overlays().label() else {
        for (entity, _, _, _) in labels.iter_mut() {
            commands.entity(entity).despawn();
        }
        return;
    };

    let screen = anchor.and_then(|world| {
        let (camera_transform, camera) = cameras.single().ok()?;
        camera
            .world_to_viewport(camera_transform, world.as_vec3())
            .ok()
    });

    if labels.is_empty() {
        let mut node = Node {
            position_type: PositionType::Absolute,
            ..default()
        };
        let mut visibility = Visibility::Hidden;
        if let Some(pos) = screen {
            node.left = Val::Px(pos.x);
            node.top = Val::Px(pos.y - LABEL_OFFSET_PX);
            if !text.is_empty() {
                visibility = Visibility::Visible;
            }
        }
        commands.spawn((
            Text::new(text),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            node,
            visibility,
            MeasureLabel,
        ));
        return;
    }

    for (_, mut ui_text, mut node, mut visibility) in labels.iter_mut() {
        ui_text.0 = text.to_string();
        match screen {
            Some(pos) if !text.is_empty() => {
                node.left = Val::Px(pos.x);
                node.top = Val::Px(pos.y - LABEL_OFFSET_PX);
                *visibility = Visibility::Visible;
            }
            _ => {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

fn spawn_marker(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    position: Vec3,
    size: f32,
    color: [f32; 3],
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(size))),
        MeshMaterial3d(overlay_material(materials, color, None)),
        Transform::from_translation(position),
        OverlayVisual,
    ));
}

/// Draw edges between consecutive points as oriented cuboids, optionally
/// closing the loop back to the first point.
fn spawn_segments(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    points: &[Vec3],
    close: bool,
    color: [f32; 3],
) {
    if points.len() < 2 {
        return;
    }
    let edge_count = if close {
        points.len()
    } else {
        points.len() - 1
    };

    for i in 0..edge_count {
        let start = points[i];
        let end = points[(i + 1) % points.len()];

        let direction = end - start;
        let distance = direction.length();
        if distance < MIN_SEGMENT_LENGTH {
            continue;
        }
        let midpoint = (start + end) * 0.5;
        let rotation = Quat::from_rotation_arc(Vec3::X, direction.normalize());

        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(distance, DRAW_LINE_WIDTH, DRAW_LINE_WIDTH))),
            MeshMaterial3d(overlay_material(materials, color, None)),
            Transform::from_translation(midpoint).with_rotation(rotation),
            OverlayVisual,
        ));
    }
}

fn overlay_material(
    materials: &mut ResMut<Assets<StandardMaterial>>,
    color: [f32; 3],
    alpha: Option<f32>,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: match alpha {
            Some(a) => Color::srgba(color[0], color[1], color[2], a),
            None => Color::srgb(color[0], color[1], color[2]),
        },
        emissive: LinearRgba::new(color[0], color[1], color[2], 1.0),
        unlit: true,
        alpha_mode: if alpha.is_some() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    })
}

/// Fan-triangulated fill for a frozen polygon, lifted a hair off the
/// surface to avoid z-fighting with it.
fn polygon_fill_mesh(points: &[Vec3]) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for point in points {
        vertices.push([point.x, point.y + 0.01, point.z]);
    }
    for i in 1..(points.len() - 1) {
        indices.extend_from_slice(&[0, i as u32, (i + 1) as u32]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));

    let normals: Vec<[f32; 3]> = (0..points.len()).map(|_| [0.0, 1.0, 0.0]).collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);

    mesh
}
