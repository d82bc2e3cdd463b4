//! Transient overlay lifecycle: track everything, sweep on clear.
//!
//! Every visual primitive a measurement session creates (vertex markers,
//! the floating cursor marker, the live rubber-band shape, frozen result
//! shapes, the label) is a record in one id-keyed arena owned by
//! [`OverlayManager`]. Finalised primitives stay in the same arena, so
//! `remove_all` is a single atomic sweep and nothing can leak past it.
//!
//! The manager holds state only; drawing is the host layer's job, which
//! rebuilds its visuals from this arena every frame.

use std::collections::BTreeMap;

use bevy::math::DVec3;

pub type OverlayId = u64;

/// Outline of a live or frozen shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Polygon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    /// Committed vertex marker. Persists until the sweep.
    Marker { position: DVec3 },
    /// Cursor marker that follows the pointer while measuring.
    FloatingMarker { position: DVec3 },
    /// Live rubber-band shape. Its geometry is read from the session's
    /// point sequence at draw time, so it follows the cursor without an
    /// explicit update call here.
    LiveShape { kind: ShapeKind },
    /// Frozen snapshot created when a measurement completes.
    FrozenShape { kind: ShapeKind, points: Vec<DVec3> },
    /// The measurement label. Content and anchor are replaced in place.
    Label { anchor: Option<DVec3>, text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: OverlayId,
    pub shape: OverlayShape,
}

/// Owns every visual primitive of at most one active session plus the
/// committed leftovers of finished ones.
#[derive(Default)]
pub struct OverlayManager {
    overlays: BTreeMap<OverlayId, Overlay>,
    next_id: OverlayId,
    live_shape: Option<OverlayId>,
    floating_marker: Option<OverlayId>,
    label: Option<OverlayId>,
}

impl OverlayManager {
    fn insert(&mut self, shape: OverlayShape) -> OverlayId {
        let id = self.next_id;
        self.next_id += 1;
        self.overlays.insert(id, Overlay { id, shape });
        id
    }

    /// Place a committed vertex marker.
    pub fn add_marker(&mut self, position: DVec3) -> OverlayId {
        self.insert(OverlayShape::Marker { position })
    }

    /// Create or move the floating cursor marker.
    pub fn set_floating_marker(&mut self, position: DVec3) {
        if let Some(overlay) = self
            .floating_marker
            .and_then(|id| self.overlays.get_mut(&id))
        {
            overlay.shape = OverlayShape::FloatingMarker { position };
            return;
        }
        let id = self.insert(OverlayShape::FloatingMarker { position });
        self.floating_marker = Some(id);
    }

    /// Allocate the live rubber-band shape. Allocating over an existing one
    /// replaces it.
    pub fn ensure_live_shape(&mut self, kind: ShapeKind) {
        if let Some(id) = self.live_shape.take() {
            self.overlays.remove(&id);
        }
        let id = self.insert(OverlayShape::LiveShape { kind });
        self.live_shape = Some(id);
    }

    /// Allocate a fresh empty label, discarding any prior one.
    pub fn init_label(&mut self) {
        if let Some(id) = self.label.take() {
            self.overlays.remove(&id);
        }
        let id = self.insert(OverlayShape::Label {
            anchor: None,
            text: String::new(),
        });
        self.label = Some(id);
    }

    /// Replace the label's content and anchor in place, creating the label
    /// if none exists.
    pub fn set_label(&mut self, anchor: DVec3, text: String) {
        if self.label.is_none() {
            self.init_label();
        }
        if let Some(overlay) = self.label.and_then(|id| self.overlays.get_mut(&id)) {
            overlay.shape = OverlayShape::Label {
                anchor: Some(anchor),
                text,
            };
        }
    }

    /// Freeze a completed measurement into its own shape record.
    pub fn finalize_shape(&mut self, kind: ShapeKind, points: Vec<DVec3>) -> OverlayId {
        self.insert(OverlayShape::FrozenShape { kind, points })
    }

    /// Remove the rubber-band primitives, leaving committed markers, frozen
    /// shapes and the label in place.
    pub fn release_live(&mut self) {
        if let Some(id) = self.live_shape.take() {
            self.overlays.remove(&id);
        }
        if let Some(id) = self.floating_marker.take() {
            self.overlays.remove(&id);
        }
    }

    /// Remove one primitive by handle. Returns whether it was still tracked.
    pub fn remove(&mut self, id: OverlayId) -> bool {
        let removed = self.overlays.remove(&id).is_some();
        if removed {
            if self.live_shape == Some(id) {
                self.live_shape = None;
            }
            if self.floating_marker == Some(id) {
                self.floating_marker = None;
            }
            if self.label == Some(id) {
                self.label = None;
            }
        }
        removed
    }

    /// Atomic sweep of everything this manager has created. Idempotent; all
    /// previously handed-out ids are invalid afterwards.
    pub fn remove_all(&mut self) {
        self.overlays.clear();
        self.live_shape = None;
        self.floating_marker = None;
        self.label = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.values()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn live_shape(&self) -> Option<ShapeKind> {
        self.live_shape
            .and_then(|id| self.overlays.get(&id))
            .and_then(|overlay| match overlay.shape {
                OverlayShape::LiveShape { kind } => Some(kind),
                _ => None,
            })
    }

    pub fn has_floating_marker(&self) -> bool {
        self.floating_marker.is_some()
    }

    /// Current label anchor and text, if a label has been allocated.
    pub fn label(&self) -> Option<(Option<DVec3>, &str)> {
        self.label
            .and_then(|id| self.overlays.get(&id))
            .and_then(|overlay| match &overlay.shape {
                OverlayShape::Label { anchor, text } => Some((*anchor, text.as_str())),
                _ => None,
            })
    }

    pub fn marker_count(&self) -> usize {
        self.overlays
            .values()
            .filter(|overlay| matches!(overlay.shape, OverlayShape::Marker { .. }))
            .count()
    }

    pub fn frozen_shape_count(&self) -> usize {
        self.overlays
            .values()
            .filter(|overlay| matches!(overlay.shape, OverlayShape::FrozenShape { .. }))
            .count()
    }
}
