use super::geometry::index_after_removal;
use super::session::DragSession;
use super::strategy::{DropStrategy, StrategyContext, ZoneHover};
use super::types::{DragPoint, ItemKind, ZoneId, ZoneKind};

/// Drops into a toolbar. Tool groups can move within one toolbar or between toolbar
/// instances (e.g. top toolbar to side toolbar).
#[derive(Debug, Default)]
pub struct ToolbarStrategy {
    hover: ZoneHover,
}

impl ToolbarStrategy {
    pub fn hover(&self) -> &ZoneHover {
        &self.hover
    }
}

impl DropStrategy for ToolbarStrategy {
    fn name(&self) -> &'static str {
        "toolbar"
    }

    fn supports_zone(&self, kind: ZoneKind) -> bool {
        kind == ZoneKind::Toolbar
    }

    fn accepts(&self, kind: ItemKind) -> bool {
        kind == ItemKind::ToolGroup
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
        if session.kind != ItemKind::ToolGroup {
            return false;
        }

        if target.source_zone != Some(zone) {
            log::debug!(
                "moving tool group {:?} from {:?} to {zone:?}",
                session.item,
                target.source_zone
            );
        }
        let index = index_after_removal(target.index, target.original_index);
        cx.layout.insert_at(cx.visuals, zone, session.item, index)
    }

    fn reset(&mut self) {
        self.hover.clear();
    }
}
