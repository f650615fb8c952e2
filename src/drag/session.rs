use egui::{Pos2, Vec2, ViewportId};

use super::types::{ItemId, ItemKind, ZoneId};
use super::visual::NodeId;

/// How the source visual was suppressed for the duration of the drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum TransitStyle {
    /// Floating items and surfaces fade out; the ghost stands in for them.
    Faded {
        previous_opacity: f32,
        previous_pointer_events: bool,
    },

    /// Docked items stay visible but stop receiving pointer events, so hit-testing sees through.
    PassThrough { previous_pointer_events: bool },
}

/// The one drag in progress.
#[derive(Clone, Debug)]
pub struct DragSession {
    pub id: u64,
    pub item: ItemId,
    pub kind: ItemKind,
    pub source_visual: NodeId,

    /// From the item's origin to the grab point.
    pub grab_offset: Vec2,
    pub pointer_id: u64,

    /// The surface whose pointer capture this drag holds.
    pub origin_surface: ViewportId,

    /// Primary-space position where the drag started.
    pub start_pos: Pos2,

    /// Last evaluated primary-space pointer position.
    pub last_pos: Pos2,

    /// Whether the item was free-floating when picked up.
    pub was_floating: bool,

    pub active: bool,

    pub(super) transit: Option<TransitStyle>,
}

impl DragSession {
    /// Does this event belong to the pointer this session captured?
    pub fn owns_pointer(&self, pointer_id: u64, surface: ViewportId) -> bool {
        self.active && self.pointer_id == pointer_id && self.origin_surface == surface
    }
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DragOutcome {
    /// A zone's strategy consumed the drop.
    Dropped { zone: ZoneId, index: usize },

    /// No strategy took it; the item now floats at `position` (bounding-surface space).
    Floated { position: Pos2 },

    /// The floating fallback failed too (no bounding surface registered).
    Reverted,

    Cancelled,
}

/// Emitted on the bus after teardown.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DragEndSnapshot {
    pub session_id: u64,
    pub item: ItemId,
    pub kind: ItemKind,
    pub outcome: DragOutcome,
}
