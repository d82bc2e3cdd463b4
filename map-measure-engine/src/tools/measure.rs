use bevy::math::{DVec3, Vec2};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::interaction::DOUBLE_CLICK_INTERVAL_MS;

use crate::geometry::SurfaceGeometry;
use crate::overlay::{OverlayManager, ShapeKind};
use crate::surface::CoordinateProvider;

/// What one session measures. Fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    Distance,
    Area,
}

impl MeasureKind {
    /// Convert string identifier to measurement kind for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "distance" => Some(Self::Distance),
            "area" => Some(Self::Area),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Area => "area",
        }
    }

    fn shape(self) -> ShapeKind {
        match self {
            Self::Distance => ShapeKind::Line,
            Self::Area => ShapeKind::Polygon,
        }
    }

    /// Committed vertices required before termination freezes a shape.
    fn min_vertices(self) -> usize {
        match self {
            Self::Distance => 2,
            Self::Area => 3,
        }
    }
}

/// Lifecycle notifications queued by the tool and drained by the embedding
/// layer, which forwards them to its frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureEvent {
    Started {
        kind: MeasureKind,
    },
    VertexAdded {
        position: DVec3,
        count: usize,
    },
    LiveUpdated {
        kind: MeasureKind,
        value: f64,
        text: String,
    },
    Completed {
        kind: MeasureKind,
        value: f64,
        text: String,
        points: Vec<DVec3>,
    },
    Terminated,
    Cleared,
}

/// Interaction state of one measurement.
///
/// Committed vertices and the cursor sample are held apart on purpose: the
/// cursor sample is overwritten by every move and dropped at termination,
/// and the two are only joined when the live shape is drawn or measured.
struct MeasureSession {
    kind: MeasureKind,
    committed: Vec<DVec3>,
    pending: Option<DVec3>,
    active: bool,
    last_click_ms: Option<u64>,
}

impl MeasureSession {
    fn idle() -> Self {
        Self {
            kind: MeasureKind::Distance,
            committed: Vec::new(),
            pending: None,
            active: false,
            last_click_ms: None,
        }
    }

    fn begin(kind: MeasureKind) -> Self {
        Self {
            kind,
            committed: Vec::new(),
            pending: None,
            active: true,
            last_click_ms: None,
        }
    }
}

/// The measurement tool a host application drives.
///
/// Composes one surface geometry, one overlay arena and one session.
/// Starting while a session is running discards it; events arriving in the
/// wrong state are no-ops; a failed pick changes nothing. Nothing here
/// returns an error.
#[derive(Resource)]
pub struct MeasureTool {
    geometry: Box<dyn SurfaceGeometry>,
    overlays: OverlayManager,
    session: MeasureSession,
    events: Vec<MeasureEvent>,
}

impl MeasureTool {
    pub fn new(geometry: Box<dyn SurfaceGeometry>) -> Self {
        Self {
            geometry,
            overlays: OverlayManager::default(),
            session: MeasureSession::idle(),
            events: Vec::new(),
        }
    }

    /// Begin a measurement, implicitly clearing any session in flight.
    pub fn start_measure(&mut self, kind: MeasureKind) {
        self.clear();
        self.session = MeasureSession::begin(kind);
        self.overlays.init_label();
        self.events.push(MeasureEvent::Started { kind });
    }

    /// Tear down every overlay and reset the session. Idempotent.
    pub fn clear(&mut self) {
        let had_work = !self.overlays.is_empty() || self.session.active;
        self.overlays.remove_all();
        self.session = MeasureSession::idle();
        if had_work {
            self.events.push(MeasureEvent::Cleared);
        }
    }

    /// Register a click at `screen`. A second click within
    /// [`DOUBLE_CLICK_INTERVAL_MS`] finishes the measurement instead of
    /// committing a vertex.
    pub fn on_click(
        &mut self,
        provider: &dyn CoordinateProvider,
        screen: Vec2,
        timestamp_ms: u64,
    ) {
        if !self.session.active {
            return;
        }

        // The clock advances before the pick is attempted, so a click that
        // misses the surface still counts toward double-click timing.
        let is_double = self
            .session
            .last_click_ms
            .is_some_and(|prev| timestamp_ms.saturating_sub(prev) < DOUBLE_CLICK_INTERVAL_MS);
        self.session.last_click_ms = Some(timestamp_ms);
        if is_double {
            self.terminate();
            return;
        }

        let Some(position) = provider.pick(screen) else {
            return;
        };

        if self.session.committed.is_empty() {
            self.overlays.ensure_live_shape(self.session.kind.shape());
        }
        self.session.committed.push(position);
        self.session.pending = Some(position);
        self.overlays.add_marker(position);
        self.overlays.set_floating_marker(position);
        self.events.push(MeasureEvent::VertexAdded {
            position,
            count: self.session.committed.len(),
        });
    }

    /// Track the pointer: overwrite the cursor sample and refresh the
    /// running measurement. Ignored before the first committed vertex.
    pub fn on_move(&mut self, provider: &dyn CoordinateProvider, screen: Vec2) {
        if !self.session.active || self.session.committed.is_empty() {
            return;
        }
        let Some(position) = provider.pick(screen) else {
            return;
        };
        self.session.pending = Some(position);
        self.overlays.set_floating_marker(position);
        self.update_live_measurement();
    }

    pub fn on_right_click(&mut self) {
        self.terminate();
    }

    /// Finish the measurement: drop the cursor sample, freeze the result
    /// shape if enough vertices were committed, release the rubber band.
    /// Markers, the label and the frozen shape stay until [`Self::clear`].
    pub fn terminate(&mut self) {
        if !self.session.active {
            return;
        }
        self.session.active = false;
        // The path or ring ends at the last real vertex.
        self.session.pending = None;

        let kind = self.session.kind;
        if self.session.committed.len() >= kind.min_vertices() {
            let points = std::mem::take(&mut self.session.committed);
            self.overlays.finalize_shape(kind.shape(), points.clone());
            if let Some((value, text, anchor)) = self.measure(kind, &points) {
                self.overlays.set_label(anchor, text.clone());
                self.events.push(MeasureEvent::Completed {
                    kind,
                    value,
                    text,
                    points,
                });
            }
        } else {
            self.session.committed.clear();
        }

        self.overlays.release_live();
        self.events.push(MeasureEvent::Terminated);
    }

    pub fn is_measuring(&self) -> bool {
        self.session.active
    }

    pub fn kind(&self) -> MeasureKind {
        self.session.kind
    }

    pub fn committed_points(&self) -> &[DVec3] {
        &self.session.committed
    }

    pub fn pending_point(&self) -> Option<DVec3> {
        self.session.pending
    }

    /// Committed vertices joined with the cursor sample; the geometry the
    /// live shape draws.
    pub fn render_points(&self) -> Vec<DVec3> {
        let mut points = self.session.committed.clone();
        if let Some(pending) = self.session.pending {
            points.push(pending);
        }
        points
    }

    pub fn overlays(&self) -> &OverlayManager {
        &self.overlays
    }

    /// Drain queued lifecycle events in emission order.
    pub fn take_events(&mut self) -> Vec<MeasureEvent> {
        std::mem::take(&mut self.events)
    }

    fn update_live_measurement(&mut self) {
        let kind = self.session.kind;
        let points = self.render_points();
        let Some((value, text, anchor)) = self.measure(kind, &points) else {
            return;
        };
        self.overlays.set_label(anchor, text.clone());
        self.events.push(MeasureEvent::LiveUpdated { kind, value, text });
    }

    /// Value, label text and label anchor for `points`, or `None` when there
    /// are too few of them to mean anything yet.
    fn measure(&self, kind: MeasureKind, points: &[DVec3]) -> Option<(f64, String, DVec3)> {
        match kind {
            MeasureKind::Distance => {
                let anchor = *points.last()?;
                let value = self.geometry.path_length(points);
                Some((value, self.geometry.format_length(value), anchor))
            }
            MeasureKind::Area => {
                if points.len() < 3 {
                    return None;
                }
                let anchor = *points.first()?;
                let value = self.geometry.ring_area(points);
                Some((value, self.geometry.format_area(value), anchor))
            }
        }
    }
}
