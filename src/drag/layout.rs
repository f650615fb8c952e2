use super::types::{Axis, ItemId, ItemKind, ZoneId, ZoneKind};
use super::visual::{NodeId, VisualTree};

/// One child of a drop zone, in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneChild {
    pub item: ItemId,
    pub visual: NodeId,
}

/// What the drag engine needs from the application's layout containers.
///
/// Containers that want to receive drops tag their root visual with
/// [`VisualTree::tag_zone`] and answer the queries below for their [`ZoneId`]. Every mutating
/// call receives the shared [`VisualTree`] so the container can move its visuals along with its
/// model.
pub trait DockLayout {
    /// `None` means the zone is unknown, or its container never declared a kind.
    fn zone_kind(&self, zone: ZoneId) -> Option<ZoneKind>;

    /// The axis this zone instance lays its children out along.
    ///
    /// Defaults to the kind's usual axis. Containers that can be oriented either way (a toolbar
    /// docked to the side of a window) override it per instance.
    fn zone_axis(&self, zone: ZoneId) -> Option<Axis> {
        self.zone_kind(zone).map(ZoneKind::axis)
    }

    fn zone_root(&self, zone: ZoneId) -> Option<NodeId>;

    /// Children in layout order. Must not include the placeholder.
    fn child_items(&self, zone: ZoneId) -> Vec<ZoneChild>;

    fn item_kind(&self, item: ItemId) -> Option<ItemKind>;

    fn item_visual(&self, item: ItemId) -> Option<NodeId>;

    /// The zone currently holding `item`, if it is docked anywhere.
    fn container_of(&self, item: ItemId) -> Option<ZoneId>;

    /// Insert `item` into `zone` at `index`, detaching it from any previous container.
    ///
    /// `index` is relative to the zone's children *after* the item has been removed.
    fn insert_at(&mut self, visuals: &mut VisualTree, zone: ZoneId, item: ItemId, index: usize)
    -> bool;

    /// Detach `item` from its container. Returns `false` if it wasn't docked.
    fn remove(&mut self, visuals: &mut VisualTree, item: ItemId) -> bool;

    /// Create a new, empty panel group (not yet inserted anywhere).
    fn create_group(&mut self, visuals: &mut VisualTree) -> Option<ItemId>;

    /// The tab strip zone belonging to a panel group.
    fn tab_zone_of_group(&self, group: ItemId) -> Option<ZoneId>;

    /// The group hosting a tab strip, creating a wrapper group if the strip has none yet.
    fn host_group_for_tab_zone(&mut self, visuals: &mut VisualTree, zone: ZoneId) -> Option<ItemId>;

    /// Switch the item's presentation between docked and free-floating.
    fn set_floating(&mut self, visuals: &mut VisualTree, item: ItemId, floating: bool);
}
