/// Sphere radius for committed vertex markers.
pub const DRAW_VERTEX_SIZE: f32 = 0.08;
/// Sphere radius for the floating cursor marker.
pub const CURSOR_MARKER_SIZE: f32 = 0.125;
/// Cross-section of the oriented cuboids used as line segments.
pub const DRAW_LINE_WIDTH: f32 = 0.045;
/// Segments shorter than this are skipped rather than drawn degenerate.
pub const MIN_SEGMENT_LENGTH: f32 = 0.02;

pub const VERTEX_MARKER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const LIVE_SHAPE_COLOR: [f32; 3] = [1.0, 1.0, 0.2];
pub const FROZEN_SHAPE_COLOR: [f32; 3] = [1.0, 0.27, 0.0];
/// Alpha applied to the translucent polygon fill.
pub const AREA_FILL_ALPHA: f32 = 0.3;

pub const LABEL_FONT_SIZE: f32 = 16.0;
/// Vertical screen offset lifting the label off its anchor, in logical pixels.
pub const LABEL_OFFSET_PX: f32 = 10.0;
