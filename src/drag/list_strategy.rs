use super::geometry::index_after_removal;
use super::session::DragSession;
use super::strategy::{DropStrategy, StrategyContext, ZoneHover};
use super::types::{DragPoint, ItemKind, ZoneId, ZoneKind};

/// Drops into a column or a row of panel groups.
///
/// Groups move as a unit. A single tab can't live bare in a column, so it gets wrapped in a
/// freshly created group inserted at the resolved index.
#[derive(Debug)]
pub struct ListStrategy {
    zone_kind: ZoneKind,
    hover: ZoneHover,
}

impl ListStrategy {
    /// Vertical list: compares pointer `y` against child midpoints.
    pub fn column() -> Self {
        Self {
            zone_kind: ZoneKind::Column,
            hover: ZoneHover::default(),
        }
    }

    /// Horizontal list: compares pointer `x` against child midpoints.
    pub fn row() -> Self {
        Self {
            zone_kind: ZoneKind::Row,
            hover: ZoneHover::default(),
        }
    }

    pub fn hover(&self) -> &ZoneHover {
        &self.hover
    }
}

impl DropStrategy for ListStrategy {
    fn name(&self) -> &'static str {
        match self.zone_kind {
            ZoneKind::Row => "row",
            _ => "column",
        }
    }

    fn supports_zone(&self, kind: ZoneKind) -> bool {
        kind == self.zone_kind
    }

    fn accepts(&self, kind: ItemKind) -> bool {
        matches!(kind, ItemKind::ListGroup | ItemKind::ListItem)
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

        match session.kind {
            ItemKind::ListGroup => {
                let index = index_after_removal(target.index, target.original_index);
                cx.layout.insert_at(cx.visuals, zone, session.item, index)
            }
            ItemKind::ListItem => {
                let Some(group) = cx.layout.create_group(cx.visuals) else {
                    log::warn!("layout could not create a group to host {:?}", session.item);
                    return false;
                };
                let wrapped = match cx.layout.tab_zone_of_group(group) {
                    Some(tabs) => {
                        cx.layout.insert_at(cx.visuals, zone, group, target.index)
                            && cx.layout.insert_at(cx.visuals, tabs, session.item, 0)
                    }
                    None => {
                        log::warn!("new group {group:?} has no tab strip");
                        false
                    }
                };
                if !wrapped {
                    log::warn!("could not wrap {:?} in {group:?}; undoing the group", session.item);
                    cx.layout.remove(cx.visuals, group);
                }
                wrapped
            }
            ItemKind::ToolGroup | ItemKind::Surface => false,
        }
    }

    fn reset(&mut self) {
        self.hover.clear();
    }
}
