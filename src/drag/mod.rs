use std::collections::{BTreeMap, VecDeque};

use egui::{Pos2, Rect};

mod bus;
mod debug;
mod floating;
mod geometry;
mod ghost;
mod integrity;
mod layout;
mod list_strategy;
mod options;
#[cfg(feature = "serde")]
mod persistence;
mod placeholder;
mod session;
mod strategy;
mod surface;
mod tab_strip_strategy;
mod toolbar_strategy;
mod types;
mod visual;

#[cfg(test)]
mod test_layout;

pub use bus::{DockNotification, NotificationBus};
pub use floating::FloatingManager;
pub use ghost::GhostManager;
pub use layout::{DockLayout, ZoneChild};
pub use list_strategy::ListStrategy;
pub use options::{ChromeLimits, DragOptions};
#[cfg(feature = "serde")]
pub use persistence::{FLOATING_SNAPSHOT_VERSION, FloatingItemSnapshot, FloatingSnapshot};
pub use placeholder::Placeholder;
pub use session::{DragEndSnapshot, DragOutcome, DragSession};
pub use strategy::{
    CachedChild, DropStrategy, DropTarget, GeometryCache, StrategyContext, ZoneHover,
};
pub use surface::{SurfaceGeometry, Surfaces};
pub use tab_strip_strategy::TabStripStrategy;
pub use toolbar_strategy::ToolbarStrategy;
pub use types::{Axis, DragPoint, DragRequest, ItemId, ItemKind, PointerEvent, ZoneId, ZoneKind};
pub use visual::{NodeId, NodeRole, VisualNode, VisualTree, ZoneTag};

use session::TransitStyle;

/// The collaborators a drag touches, passed explicitly on every call.
pub struct DockContext<'a> {
    pub visuals: &'a mut VisualTree,
    pub layout: &'a mut dyn DockLayout,
    pub floating: &'a mut FloatingManager,
    pub surfaces: &'a Surfaces,
    pub bus: &'a mut NotificationBus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ActiveZone {
    zone: ZoneId,
    kind: ZoneKind,
}

/// Coordinates one drag at a time, from pick-up to drop.
///
/// Feed it pointer events and call [`Self::frame`] once per paint frame:
/// - A drag starts from [`Self::begin_drag`] (or a [`DockNotification::DragRequested`] picked up
///   by [`Self::pump`]).
/// - Moves are coalesced; the latest sample is hit-tested on the next frame and forwarded to the
///   [`DropStrategy`] registered for the zone kind under the pointer.
/// - Release asks that strategy to drop. If nobody takes it, the item becomes free-floating.
/// - Release, cancel and interruption all share the same teardown, which always removes the
///   placeholder and the ghost and restores the source visual.
#[derive(Debug)]
pub struct DragEngine {
    pub options: DragOptions,

    strategies: BTreeMap<ZoneKind, Box<dyn DropStrategy>>,

    session: Option<DragSession>,
    next_session_id: u64,

    active_zone: Option<ActiveZone>,
    last_point: Option<DragPoint>,
    last_index: Option<usize>,
    pending_move: Option<PointerEvent>,

    ghost: GhostManager,
    placeholder: Placeholder,

    debug_log: VecDeque<String>,
    debug_frame: u64,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new(DragOptions::default())
    }
}

impl DragEngine {
    /// An engine without any strategies; every drop falls back to floating.
    pub fn new(options: DragOptions) -> Self {
        let placeholder = Placeholder::new(options.placeholder_thickness);
        Self {
            options,
            strategies: BTreeMap::new(),
            session: None,
            next_session_id: 1,
            active_zone: None,
            last_point: None,
            last_index: None,
            pending_move: None,
            ghost: GhostManager::default(),
            placeholder,
            debug_log: VecDeque::new(),
            debug_frame: 0,
        }
    }

    /// An engine with the column, row, tab-strip and toolbar strategies registered.
    pub fn with_default_strategies(options: DragOptions) -> Self {
        let mut engine = Self::new(options);
        engine.register_strategy(ZoneKind::Column, Box::new(ListStrategy::column()));
        engine.register_strategy(ZoneKind::Row, Box::new(ListStrategy::row()));
        engine.register_strategy(ZoneKind::TabStrip, Box::new(TabStripStrategy::default()));
        engine.register_strategy(ZoneKind::Toolbar, Box::new(ToolbarStrategy::default()));
        engine
    }

    /// Associate `kind` with `strategy`, replacing any previous one.
    ///
    /// A strategy that doesn't support `kind` is rejected with a warning.
    pub fn register_strategy(&mut self, kind: ZoneKind, strategy: Box<dyn DropStrategy>) -> bool {
        if !strategy.supports_zone(kind) {
            log::warn!(
                "strategy '{}' does not support zone kind {kind:?}; ignoring registration",
                strategy.name()
            );
            return false;
        }
        if let Some(previous) = self.strategies.insert(kind, strategy) {
            log::debug!("replaced strategy '{}' for {kind:?}", previous.name());
        }
        true
    }

    pub fn has_strategy(&self, kind: ZoneKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    /// The zone currently hovered by the drag, if a strategy is handling it.
    pub fn active_zone(&self) -> Option<ZoneId> {
        self.active_zone.map(|a| a.zone)
    }

    /// The insertion index shown by the placeholder, if any.
    pub fn hover_index(&self) -> Option<usize> {
        self.last_index
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    pub fn ghost(&self) -> &GhostManager {
        &self.ghost
    }

    /// Start every drag requested on the bus since the last call.
    pub fn pump(&mut self, cx: &mut DockContext<'_>) {
        for request in cx.bus.take_drag_requests() {
            self.begin_drag(request, cx);
        }
    }

    /// Pick up an item. Returns `false` (and does nothing) if a drag is already running or the
    /// request lacks its source visual or pointer event.
    pub fn begin_drag(&mut self, request: DragRequest, cx: &mut DockContext<'_>) -> bool {
        if let Some(active) = &self.session {
            log::debug!(
                "drag request for {:?} ignored: session {} is active",
                request.item,
                active.id
            );
            return false;
        }
        let (Some(source_visual), Some(event)) = (request.source_visual, request.pointer_event)
        else {
            log::debug!("drag request for {:?} ignored: incomplete payload", request.item);
            return false;
        };
        if !cx.visuals.contains(source_visual) {
            log::warn!("drag request for {:?} names an unknown visual", request.item);
            return false;
        }

        let pos = cx.surfaces.to_primary(event.surface, event.pos);
        let was_floating = cx.floating.contains(request.item);
        let transit = self.suppress_source(cx.visuals, source_visual, request.kind, was_floating);

        self.ghost.create(
            cx.visuals,
            source_visual,
            pos,
            request.grab_offset,
            self.options.ghost_opacity,
        );

        let id = self.next_session_id;
        self.next_session_id = self.next_session_id.saturating_add(1);
        self.session = Some(DragSession {
            id,
            item: request.item,
            kind: request.kind,
            source_visual,
            grab_offset: request.grab_offset,
            pointer_id: event.pointer_id,
            origin_surface: event.surface,
            start_pos: pos,
            last_pos: pos,
            was_floating,
            active: true,
            transit,
        });
        self.active_zone = None;
        self.last_point = None;
        self.last_index = None;
        self.pending_move = None;

        log::debug!("drag START id={id} item={:?} kind={:?}", request.item, request.kind);
        self.debug_log_event(format!(
            "drag START id={id} item={:?} kind={:?} surface={:?} pos=({:.1},{:.1})",
            request.item, request.kind, event.surface, pos.x, pos.y
        ));
        true
    }

    /// A pointer went down. During a drag this interrupts (cancels) it.
    pub fn pointer_down(
        &mut self,
        event: PointerEvent,
        cx: &mut DockContext<'_>,
    ) -> Option<DragEndSnapshot> {
        if !self.is_dragging() {
            return None;
        }
        self.debug_log_event(format!(
            "drag INTERRUPTED by pointer {} on {:?}",
            event.pointer_id, event.surface
        ));
        self.teardown(cx, DragOutcome::Cancelled)
    }

    /// A pointer moved. Samples for other pointers or surfaces are ignored.
    pub fn pointer_moved(&mut self, event: PointerEvent, cx: &mut DockContext<'_>) {
        if !self.owns(event) {
            return;
        }
        if self.options.coalesce_pointer_moves {
            // The latest sample before the frame boundary wins.
            self.pending_move = Some(event);
        } else {
            self.evaluate(event, cx);
        }
    }

    /// Per-frame callback: evaluates the latest coalesced pointer sample, if any.
    pub fn frame(&mut self, cx: &mut DockContext<'_>) {
        self.debug_frame = self.debug_frame.wrapping_add(1);
        if let Some(event) = self.pending_move.take()
            && self.is_dragging()
        {
            self.evaluate(event, cx);
        }
        self.debug_check_integrity(cx.visuals);
    }

    /// Release: drop into the hovered zone, or float the item where it was let go.
    pub fn pointer_up(
        &mut self,
        event: PointerEvent,
        cx: &mut DockContext<'_>,
    ) -> Option<DragEndSnapshot> {
        if !self.owns(event) {
            return None;
        }
        self.pending_move = None;
        self.evaluate(event, cx);
        let outcome = self.resolve_drop(event, cx);
        self.teardown(cx, outcome)
    }

    /// The platform cancelled the pointer (e.g. focus loss). Nothing is dropped.
    pub fn pointer_cancel(
        &mut self,
        event: PointerEvent,
        cx: &mut DockContext<'_>,
    ) -> Option<DragEndSnapshot> {
        if !self.owns(event) {
            return None;
        }
        self.teardown(cx, DragOutcome::Cancelled)
    }

    /// Abort the current drag, if any.
    pub fn cancel(&mut self, cx: &mut DockContext<'_>) -> Option<DragEndSnapshot> {
        self.session.as_ref()?;
        self.teardown(cx, DragOutcome::Cancelled)
    }

    fn owns(&self, event: PointerEvent) -> bool {
        let owned = self
            .session
            .as_ref()
            .is_some_and(|s| s.owns_pointer(event.pointer_id, event.surface));
        if !owned && self.session.is_some() {
            log::trace!(
                "ignoring pointer {} on {:?}: not captured by this drag",
                event.pointer_id,
                event.surface
            );
        }
        owned
    }

    fn suppress_source(
        &self,
        visuals: &mut VisualTree,
        source: NodeId,
        kind: ItemKind,
        was_floating: bool,
    ) -> Option<TransitStyle> {
        let node = visuals.get_mut(source)?;
        if kind == ItemKind::Surface || was_floating {
            let previous_opacity = node.opacity;
            let previous_pointer_events = node.pointer_events;
            node.opacity = self.options.transit_opacity;
            node.pointer_events = false;
            Some(TransitStyle::Faded {
                previous_opacity,
                previous_pointer_events,
            })
        } else {
            let previous_pointer_events = node.pointer_events;
            node.pointer_events = false;
            Some(TransitStyle::PassThrough {
                previous_pointer_events,
            })
        }
    }

    fn restore_source(visuals: &mut VisualTree, session: &DragSession) {
        let Some(node) = visuals.get_mut(session.source_visual) else {
            return;
        };
        match session.transit {
            Some(TransitStyle::Faded {
                previous_opacity,
                previous_pointer_events,
            }) => {
                node.opacity = previous_opacity;
                node.pointer_events = previous_pointer_events;
            }
            Some(TransitStyle::PassThrough {
                previous_pointer_events,
            }) => {
                node.pointer_events = previous_pointer_events;
            }
            None => {}
        }
    }

    /// Floating groups and surfaces drag their ghost inside the bounding surface.
    fn ghost_bounds(&self, cx: &DockContext<'_>) -> Option<Rect> {
        let session = self.session.as_ref()?;
        let constrained = session.kind == ItemKind::Surface
            || (session.kind == ItemKind::ListGroup && session.was_floating);
        if constrained {
            cx.floating.bounds(cx.visuals)
        } else {
            None
        }
    }

    fn hit_test(&self, visuals: &VisualTree, pos: Pos2) -> DragPoint {
        let placeholder = self.placeholder.node();
        let target = visuals.hit_test(pos, |id, node| {
            node.zone.is_some() || Some(id) == placeholder
        });
        DragPoint { pos, target }
    }

    /// The nearest zone at or above the hit target that has a registered strategy.
    fn resolve_zone(&self, point: &DragPoint, cx: &DockContext<'_>) -> Option<ActiveZone> {
        let target = point.target?;
        let mut found = None;
        cx.visuals.nearest_ancestor(target, |id, node| {
            let Some(tag) = node.zone else {
                return false;
            };
            let Some(kind) = tag.kind else {
                log::warn!("visual {id:?} is tagged as zone {:?} without a kind", tag.zone);
                return false;
            };
            if cx.layout.zone_kind(tag.zone) != Some(kind) {
                log::warn!("zone {:?} tag says {kind:?} but the layout disagrees", tag.zone);
                return false;
            }
            if !self.strategies.contains_key(&kind) {
                return false;
            }
            found = Some(ActiveZone {
                zone: tag.zone,
                kind,
            });
            true
        });
        found
    }

    /// One evaluation of the drag at `event`: move the ghost, re-hit-test, handle zone
    /// transitions and forward the hover.
    fn evaluate(&mut self, event: PointerEvent, cx: &mut DockContext<'_>) {
        let pos = cx.surfaces.to_primary(event.surface, event.pos);
        let bounds = self.ghost_bounds(cx);
        self.ghost.update(cx.visuals, pos, bounds);

        let point = self.hit_test(cx.visuals, pos);
        let zone = self.resolve_zone(&point, cx);

        let Self {
            strategies,
            session,
            active_zone,
            last_point,
            last_index,
            placeholder,
            ..
        } = self;
        let Some(session) = session.as_mut() else {
            return;
        };
        session.last_pos = pos;
        *last_point = Some(point);

        let mut scx = StrategyContext {
            visuals: &mut *cx.visuals,
            layout: &mut *cx.layout,
            placeholder,
        };

        let mut transition = None;
        if zone != *active_zone {
            if let Some(old) = active_zone.take()
                && let Some(strategy) = strategies.get_mut(&old.kind)
            {
                strategy.handle_leave(&point, old.zone, session, &mut scx);
            }
            if let Some(new) = zone
                && let Some(strategy) = strategies.get_mut(&new.kind)
            {
                strategy.handle_enter(&point, new.zone, session, &mut scx);
            }
            *active_zone = zone;
            *last_index = None;
            transition = Some(zone);
        }

        if let Some(active) = *active_zone
            && let Some(strategy) = strategies.get_mut(&active.kind)
        {
            *last_index = strategy.handle_over(&point, active.zone, session, &mut scx);
        } else {
            scx.placeholder.hide(scx.visuals);
        }

        log::trace!(
            "drag sample pos=({:.1},{:.1}) zone={:?} index={:?}",
            pos.x,
            pos.y,
            active_zone.map(|a| a.zone),
            last_index
        );
        if let Some(zone) = transition {
            let index = *last_index;
            self.debug_log_event(format!(
                "zone {} {:?} index={index:?}",
                if zone.is_some() { "ENTER" } else { "LEAVE" },
                zone.map(|z| z.zone)
            ));
        }
    }

    fn resolve_drop(&mut self, event: PointerEvent, cx: &mut DockContext<'_>) -> DragOutcome {
        let pos = cx.surfaces.to_primary(event.surface, event.pos);
        let point = self.last_point.unwrap_or(DragPoint { pos, target: None });
        let release_zone = self.resolve_zone(&point, cx);

        let Self {
            strategies,
            session,
            active_zone,
            last_index,
            placeholder,
            ..
        } = self;
        let Some(session) = session.as_ref() else {
            return DragOutcome::Cancelled;
        };

        if let Some(active) = *active_zone
            && release_zone == Some(active)
            && let Some(strategy) = strategies.get_mut(&active.kind)
        {
            let index = *last_index;
            let mut scx = StrategyContext {
                visuals: &mut *cx.visuals,
                layout: &mut *cx.layout,
                placeholder,
            };
            if strategy.handle_drop(&point, active.zone, session, &mut scx) {
                if cx.floating.contains(session.item) {
                    cx.floating
                        .remove_floating(cx.visuals, &mut *cx.layout, session.item);
                }
                log::debug!(
                    "drop consumed by '{}' zone={:?} index={index:?}",
                    strategy.name(),
                    active.zone
                );
                return DragOutcome::Dropped {
                    zone: active.zone,
                    index: index.unwrap_or_default(),
                };
            }
            log::debug!("strategy '{}' declined the drop", strategy.name());
        }

        placeholder.hide(cx.visuals);
        match cx
            .floating
            .convert_drop_to_floating(cx.visuals, &mut *cx.layout, session, pos)
        {
            Some(position) => DragOutcome::Floated { position },
            None => {
                log::warn!("could not float {:?}; leaving it where it was", session.item);
                DragOutcome::Reverted
            }
        }
    }

    /// The single exit path of every drag.
    fn teardown(&mut self, cx: &mut DockContext<'_>, outcome: DragOutcome) -> Option<DragEndSnapshot> {
        self.pending_move = None;
        self.active_zone = None;
        self.last_point = None;
        self.last_index = None;

        for strategy in self.strategies.values_mut() {
            strategy.reset();
        }
        self.placeholder.hide(cx.visuals);
        self.ghost.destroy(cx.visuals);

        let mut session = self.session.take()?;
        Self::restore_source(cx.visuals, &session);
        session.active = false;

        let snapshot = DragEndSnapshot {
            session_id: session.id,
            item: session.item,
            kind: session.kind,
            outcome,
        };
        log::debug!("drag END id={} outcome={outcome:?}", session.id);
        self.debug_log_event(format!("drag END id={} outcome={outcome:?}", session.id));
        cx.bus.publish(DockNotification::DragEnded(snapshot));
        self.debug_check_integrity(cx.visuals);
        Some(snapshot)
    }
}
