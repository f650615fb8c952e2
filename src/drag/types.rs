use egui::{Pos2, Vec2, ViewportId};

/// Opaque handle for anything that can be dragged: a tab, a panel group, a tool group, a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ItemId(pub u64);

/// Identifies one drop-zone instance (one column, one tab strip, one toolbar...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ZoneId(pub u64);

/// Semantic type of a dragged item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ItemKind {
    /// A leaf item, e.g. a single tab.
    ListItem,

    /// A panel group hosting leaf items behind a tab strip.
    ListGroup,

    /// A group living in a toolbar.
    ToolGroup,

    /// A whole top-level rendering surface (popped-out window host).
    Surface,
}

impl ItemKind {
    /// Groups are moved as a unit instead of being wrapped.
    pub fn is_group(self) -> bool {
        matches!(self, Self::ListGroup | Self::ToolGroup)
    }
}

/// The container families that can receive drops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ZoneKind {
    /// Vertical list of panel groups.
    Column,

    /// Horizontal list of panel groups.
    Row,

    /// Tab header strip holding leaf items directly.
    TabStrip,

    /// Auxiliary tool container holding tool groups.
    Toolbar,
}

impl ZoneKind {
    pub const ALL: [Self; 4] = [Self::Column, Self::Row, Self::TabStrip, Self::Toolbar];

    /// The usual axis for containers of this kind; a layout may orient single instances
    /// differently.
    pub fn axis(self) -> Axis {
        match self {
            Self::Column => Axis::Vertical,
            Self::Row | Self::TabStrip | Self::Toolbar => Axis::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The component of `pos` along this axis.
    pub fn scalar(self, pos: Pos2) -> f32 {
        match self {
            Self::Horizontal => pos.x,
            Self::Vertical => pos.y,
        }
    }
}

/// A low-level pointer sample, in the coordinates of the surface that raised it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: u64,
    pub surface: ViewportId,
    pub pos: Pos2,
}

impl PointerEvent {
    pub fn new(pointer_id: u64, surface: ViewportId, pos: Pos2) -> Self {
        Self {
            pointer_id,
            surface,
            pos,
        }
    }

    /// A sample on the primary surface.
    pub fn primary(pointer_id: u64, pos: Pos2) -> Self {
        Self::new(pointer_id, ViewportId::ROOT, pos)
    }
}

/// Raised by a drag source (tab header, group handle, title bar) to start a drag.
///
/// Both `source_visual` and `pointer_event` must be present, otherwise the request is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct DragRequest {
    pub item: ItemId,
    pub kind: ItemKind,
    pub source_visual: Option<super::visual::NodeId>,
    pub pointer_event: Option<PointerEvent>,

    /// Offset from the item's origin to the grab point.
    pub grab_offset: Vec2,
}

/// A pointer position resolved against the visual tree, in primary-surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragPoint {
    pub pos: Pos2,

    /// The node the pointer is over: a zone root, the placeholder, or nothing.
    pub target: Option<super::visual::NodeId>,
}
