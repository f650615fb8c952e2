//! Drag-and-drop coordination for docking layouts built on [`egui`].
//!
//! The crate owns the hard part of docking: picking up a tab, a panel group, a toolbar group or
//! a whole surface, giving live "drop here" feedback while the pointer moves across structurally
//! different containers (possibly on another native window), and finishing the move on release.
//!
//! The application keeps its own layout model and exposes it through [`DockLayout`]. Everything
//! the engine touches is passed in explicitly through a [`DockContext`], so several independent
//! engines can coexist (e.g. one per test).
//!
//! ```no_run
//! # use egui_dock_drag::*;
//! # fn frame(
//! #     engine: &mut DragEngine,
//! #     visuals: &mut VisualTree,
//! #     layout: &mut dyn DockLayout,
//! #     floating: &mut FloatingManager,
//! #     surfaces: &Surfaces,
//! #     bus: &mut NotificationBus,
//! #     events: &[PointerEvent],
//! # ) {
//! let mut cx = DockContext { visuals, layout, floating, surfaces, bus };
//! engine.pump(&mut cx);
//! for &event in events {
//!     engine.pointer_moved(event, &mut cx);
//! }
//! engine.frame(&mut cx);
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod drag;

pub use drag::{
    Axis, ChromeLimits, DockContext, DockLayout, DockNotification, DragEndSnapshot, DragEngine,
    DragOptions, DragOutcome, DragPoint, DragRequest, DragSession, DropStrategy, FloatingManager,
    ItemId, ItemKind, ListStrategy, NodeId, NotificationBus, PointerEvent, StrategyContext,
    SurfaceGeometry, Surfaces, TabStripStrategy, ToolbarStrategy, VisualTree, ZoneChild, ZoneId,
    ZoneKind,
};

#[cfg(feature = "serde")]
pub use drag::{FLOATING_SNAPSHOT_VERSION, FloatingItemSnapshot, FloatingSnapshot};
