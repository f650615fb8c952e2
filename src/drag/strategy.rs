use egui::Rect;

use super::geometry::{insertion_index, is_noop_index, midpoint, placeholder_rect};
use super::layout::DockLayout;
use super::placeholder::Placeholder;
use super::session::DragSession;
use super::types::{Axis, DragPoint, ItemId, ItemKind, ZoneId, ZoneKind};
use super::visual::{NodeId, VisualTree};

/// Everything a strategy may touch while handling a hover or a drop.
pub struct StrategyContext<'a> {
    pub visuals: &'a mut VisualTree,
    pub layout: &'a mut dyn DockLayout,
    pub placeholder: &'a mut Placeholder,
}

/// The kind-specific half of drag-and-drop: hover feedback and drop completion for one
/// container family.
///
/// The engine calls `handle_enter` once when the pointer starts hovering a zone,
/// `handle_over` on every evaluated sample, `handle_leave` when it moves elsewhere and
/// `handle_drop` on release. `reset` is called during teardown whatever happened.
pub trait DropStrategy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Can this strategy be registered for `kind`?
    fn supports_zone(&self, kind: ZoneKind) -> bool;

    /// Does this strategy know how to receive items of `kind`?
    fn accepts(&self, kind: ItemKind) -> bool;

    fn handle_enter(
        &mut self,
        _point: &DragPoint,
        _zone: ZoneId,
        _session: &DragSession,
        _cx: &mut StrategyContext<'_>,
    ) {
    }

    /// Update the placeholder and return the resolved insertion index, or `None` if no feedback
    /// is showing.
    fn handle_over(
        &mut self,
        point: &DragPoint,
        zone: ZoneId,
        session: &DragSession,
        cx: &mut StrategyContext<'_>,
    ) -> Option<usize>;

    fn handle_leave(
        &mut self,
        _point: &DragPoint,
        _zone: ZoneId,
        _session: &DragSession,
        _cx: &mut StrategyContext<'_>,
    ) {
    }

    /// Perform the structural move. Returns `false` if the drop was not consumed.
    fn handle_drop(
        &mut self,
        point: &DragPoint,
        zone: ZoneId,
        session: &DragSession,
        cx: &mut StrategyContext<'_>,
    ) -> bool;

    /// Forget any cached geometry.
    fn reset(&mut self) {}
}

/// Snapshot of one zone child taken when the hover began.
#[derive(Clone, Copy, Debug)]
pub struct CachedChild {
    pub item: ItemId,
    pub visual: NodeId,
    pub rect: Rect,
    pub midpoint: f32,
}

/// Child geometry for one continuous hover over one zone.
#[derive(Clone, Debug)]
pub struct GeometryCache {
    pub zone: ZoneId,
    pub root: NodeId,
    pub axis: Axis,
    pub children: Vec<CachedChild>,

    /// Index of the dragged item if it lives in this zone.
    pub original_index: Option<usize>,

    /// The zone instance holding the dragged item when the hover began.
    pub source_zone: Option<ZoneId>,
}

impl GeometryCache {
    pub fn build(
        zone: ZoneId,
        session: &DragSession,
        visuals: &VisualTree,
        layout: &dyn DockLayout,
        placeholder: Option<NodeId>,
    ) -> Option<Self> {
        let Some(kind) = layout.zone_kind(zone) else {
            log::warn!("zone {zone:?} has no kind; ignoring it");
            return None;
        };
        let root = layout.zone_root(zone)?;
        let axis = layout.zone_axis(zone).unwrap_or(kind.axis());

        let children: Vec<CachedChild> = layout
            .child_items(zone)
            .into_iter()
            .filter(|child| Some(child.visual) != placeholder)
            .filter_map(|child| {
                let rect = visuals.rect(child.visual)?;
                Some(CachedChild {
                    item: child.item,
                    visual: child.visual,
                    rect,
                    midpoint: midpoint(rect, axis),
                })
            })
            .collect();

        let original_index = children.iter().position(|c| c.item == session.item);

        Some(Self {
            zone,
            root,
            axis,
            children,
            original_index,
            source_zone: layout.container_of(session.item),
        })
    }

    /// First child whose midpoint lies after the pointer, or `len` to append.
    pub fn resolve_index(&self, point: &DragPoint) -> usize {
        insertion_index(
            self.children.iter().map(|c| c.midpoint),
            self.axis.scalar(point.pos),
        )
    }
}

/// Where a consumed drop should land.
#[derive(Clone, Copy, Debug)]
pub struct DropTarget {
    /// Insertion index as shown by the placeholder (pre-removal).
    pub index: usize,
    pub original_index: Option<usize>,
    pub source_zone: Option<ZoneId>,
}

/// Hover bookkeeping shared by all list-like strategies: geometry cache, insertion index,
/// placeholder placement and the no-op rule.
#[derive(Debug, Default)]
pub struct ZoneHover {
    cache: Option<GeometryCache>,
    resolved: Option<usize>,
}

impl ZoneHover {
    pub fn cache(&self) -> Option<&GeometryCache> {
        self.cache.as_ref()
    }

    pub fn resolved_index(&self) -> Option<usize> {
        self.resolved
    }

    pub fn enter(&mut self, zone: ZoneId, session: &DragSession, cx: &StrategyContext<'_>) {
        self.resolved = None;
        self.cache = GeometryCache::build(
            zone,
            session,
            &*cx.visuals,
            &*cx.layout,
            cx.placeholder.node(),
        );
    }

    pub fn over(
        &mut self,
        point: &DragPoint,
        zone: ZoneId,
        session: &DragSession,
        accepts: bool,
        cx: &mut StrategyContext<'_>,
    ) -> Option<usize> {
        if self.cache.as_ref().is_none_or(|c| c.zone != zone) {
            self.enter(zone, session, cx);
        }
        let Some(cache) = &self.cache else {
            self.resolved = None;
            return None;
        };

        // Strict containment: only the zone root itself or our own marker count. Anything else
        // belongs to a nested zone.
        let on_root = point.target == Some(cache.root);
        let on_placeholder = point.target.is_some() && point.target == cx.placeholder.node();
        if !(on_root || on_placeholder) || !accepts {
            self.resolved = None;
            hide_placeholder_in(cache.root, cx);
            return None;
        }

        let index = cache.resolve_index(point);
        if is_noop_index(index, cache.original_index) {
            log::trace!("zone {zone:?}: index {index} is a no-op for {:?}", session.item);
            self.resolved = None;
            hide_placeholder_in(cache.root, cx);
            return None;
        }

        let before = cache.children.get(index).map(|c| c.visual);
        let prev = index
            .checked_sub(1)
            .and_then(|i| cache.children.get(i))
            .map(|c| c.rect);
        let next = cache.children.get(index).map(|c| c.rect);
        let zone_rect = cx.visuals.rect(cache.root).unwrap_or(Rect::NOTHING);
        let rect = placeholder_rect(zone_rect, prev, next, cache.axis, cx.placeholder.thickness());

        if !cx
            .placeholder
            .show(cx.visuals, cache.root, before, cache.axis, rect)
        {
            log::warn!("failed to insert placeholder into zone {zone:?}");
            self.resolved = None;
            hide_placeholder_in(cache.root, cx);
            return None;
        }

        self.resolved = Some(index);
        Some(index)
    }

    pub fn leave(&mut self, cx: &mut StrategyContext<'_>) {
        cx.placeholder.hide(cx.visuals);
        self.clear();
    }

    /// Take the drop target if the placeholder is showing in this zone; clears the hover.
    pub fn take_drop_target(&mut self, zone: ZoneId, cx: &mut StrategyContext<'_>) -> Option<DropTarget> {
        let cache = self.cache.take().filter(|c| c.zone == zone)?;
        let index = self.resolved.take()?;
        if !cx.placeholder.is_inserted_in(cx.visuals, cache.root) {
            return None;
        }
        cx.placeholder.hide(cx.visuals);
        Some(DropTarget {
            index,
            original_index: cache.original_index,
            source_zone: cache.source_zone,
        })
    }

    pub fn clear(&mut self) {
        self.cache = None;
        self.resolved = None;
    }
}

fn hide_placeholder_in(root: NodeId, cx: &mut StrategyContext<'_>) {
    if cx.placeholder.is_inserted_in(cx.visuals, root) {
        cx.placeholder.hide(cx.visuals);
    }
}
