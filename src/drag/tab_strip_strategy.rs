use super::geometry::index_after_removal;
use super::session::DragSession;
use super::strategy::{DropStrategy, StrategyContext, ZoneHover};
use super::types::{DragPoint, ItemKind, ZoneId, ZoneKind};

/// Drops into a tab strip, which holds leaf items directly.
///
/// A dragged group is merged: its tabs are moved into the strip in order and the emptied group
/// is detached, whether it was docked or floating. If any tab refuses to move, the ones already
/// moved go back and the drop is declined. Strips without a hosting group get one from the
/// layout before anything lands.
#[derive(Debug, Default)]
pub struct TabStripStrategy {
    hover: ZoneHover,
}

impl TabStripStrategy {
    pub fn hover(&self) -> &ZoneHover {
        &self.hover
    }
}

impl DropStrategy for TabStripStrategy {
    fn name(&self) -> &'static str {
        "tab_strip"
    }

    fn supports_zone(&self, kind: ZoneKind) -> bool {
        kind == ZoneKind::TabStrip
    }

    fn accepts(&self, kind: ItemKind) -> bool {
        matches!(kind, ItemKind::ListItem | ItemKind::ListGroup)
    }

    fn handle_enter(
        &mut self,
        _point: &DragPoint,
        zone: ZoneId,
        session: &DragSession,
        cx: &mut StrategyContext<'_>,
    ) {
        self.hover.enter(zone, session, cx);
    }

    fn handle_over(
        &mut self,
        point: &DragPoint,
        zone: ZoneId,
        session: &DragSession,
        cx: &mut StrategyContext<'_>,
    ) -> Option<usize> {
        let accepts = self.accepts(session.kind);
        self.hover.over(point, zone, session, accepts, cx)
    }

    fn handle_leave(
        &mut self,
        _point: &DragPoint,
        _zone: ZoneId,
        _session: &DragSession,
        cx: &mut StrategyContext<'_>,
    ) {
        self.hover.leave(cx);
    }

    fn handle_drop(
        &mut self,
        _point: &DragPoint,
        zone: ZoneId,
        session: &DragSession,
        cx: &mut StrategyContext<'_>,
    ) -> bool {
        let Some(target) = self.hover.take_drop_target(zone, cx) else {
            return false;
        };

        if cx.layout.host_group_for_tab_zone(cx.visuals, zone).is_none() {
            log::warn!("tab strip {zone:?} has no hosting group and none could be created");
            return false;
        }

        match session.kind {
            ItemKind::ListItem => {
                let index = index_after_removal(target.index, target.original_index);
                cx.layout.insert_at(cx.visuals, zone, session.item, index)
            }
            ItemKind::ListGroup => {
                let Some(source_tabs) = cx.layout.tab_zone_of_group(session.item) else {
                    log::warn!("dragged group {:?} has no tab strip", session.item);
                    return false;
                };
                let tabs = cx.layout.child_items(source_tabs);
                for (offset, tab) in tabs.iter().enumerate() {
                    if !cx
                        .layout
                        .insert_at(cx.visuals, zone, tab.item, target.index + offset)
                    {
                        log::warn!(
                            "failed to merge tab {:?} into {zone:?}; putting {:?} back",
                            tab.item,
                            session.item
                        );
                        for (index, moved) in tabs[..offset].iter().enumerate() {
                            cx.layout.insert_at(cx.visuals, source_tabs, moved.item, index);
                        }
                        return false;
                    }
                }

                if cx.layout.container_of(session.item).is_some() {
                    cx.layout.remove(cx.visuals, session.item);
                } else if let Some(visual) = cx.layout.item_visual(session.item) {
                    // Floating groups have no container; take the empty shell off the surface.
                    cx.visuals.detach(visual);
                }
                true
            }
            ItemKind::ToolGroup | ItemKind::Surface => false,
        }
    }

    fn reset(&mut self) {
        self.hover.clear();
    }
}
