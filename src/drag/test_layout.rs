//! A small in-memory workspace used by the drag tests.
//!
//! ```text
//! surface (0,0)-(800,600), also the floating bounds
//! ├── column  (0,0)-(200,600)      groups 200x100, each with a 20px tab strip (tabs 60x20)
//! ├── row     (300,0)-(800,100)    groups 100x100
//! ├── strip   (300,200)-(500,220)  tab strip without a hosting group
//! ├── toolbar (300,500)-(800,540)  tool groups 50x40
//! ├── toolbar (300,550)-(800,590)
//! └── toolbar (720,120)-(770,480)  vertical, on the side
//! ```

use std::collections::{BTreeMap, BTreeSet};

use egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::bus::NotificationBus;
use super::floating::FloatingManager;
use super::layout::{DockLayout, ZoneChild};
use super::surface::Surfaces;
use super::types::{Axis, DragRequest, ItemId, ItemKind, PointerEvent, ZoneId, ZoneKind};
use super::visual::{NodeId, VisualTree};
use super::{DockContext, DragOptions};

pub(super) fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

pub(super) const TAB_STRIP_HEIGHT: f32 = 20.0;
pub(super) const TAB_SIZE: Vec2 = vec2(60.0, 20.0);
pub(super) const COLUMN_GROUP_SIZE: Vec2 = vec2(200.0, 100.0);
pub(super) const ROW_GROUP_SIZE: Vec2 = vec2(100.0, 100.0);
pub(super) const TOOL_GROUP_SIZE: Vec2 = vec2(50.0, 40.0);

#[derive(Debug)]
struct ZoneEntry {
    kind: Option<ZoneKind>,
    root: NodeId,
    children: Vec<ItemId>,

    /// Overrides the kind's axis.
    axis: Option<Axis>,

    /// For tab strips: the group they belong to.
    host_group: Option<ItemId>,
}

#[derive(Debug)]
struct ItemEntry {
    kind: ItemKind,
    visual: NodeId,
    size: Vec2,
    container: Option<ZoneId>,
    tabs: Option<ZoneId>,
    floating: bool,
}

#[derive(Debug, Default)]
pub(super) struct TestLayout {
    zones: BTreeMap<ZoneId, ZoneEntry>,
    items: BTreeMap<ItemId, ItemEntry>,
    next_zone: u64,
    next_item: u64,
    pub(super) created_groups: Vec<ItemId>,

    /// `insert_at` refuses to move these items.
    pub(super) refused_items: BTreeSet<ItemId>,
}

impl TestLayout {
    fn add_zone(
        &mut self,
        visuals: &mut VisualTree,
        kind: Option<ZoneKind>,
        rect: Rect,
        parent: Option<NodeId>,
    ) -> ZoneId {
        self.next_zone += 1;
        let zone = ZoneId(self.next_zone);
        let root = visuals.create_node(rect);
        visuals.tag_zone(root, kind, zone);
        if let Some(parent) = parent {
            visuals.append_child(parent, root);
        }
        self.zones.insert(
            zone,
            ZoneEntry {
                kind,
                root,
                children: Vec::new(),
                axis: None,
                host_group: None,
            },
        );
        zone
    }

    fn add_item(&mut self, visuals: &mut VisualTree, kind: ItemKind, size: Vec2) -> ItemId {
        self.next_item += 1;
        let item = ItemId(self.next_item);
        let visual = visuals.create_node(Rect::from_min_size(Pos2::ZERO, size));
        self.items.insert(
            item,
            ItemEntry {
                kind,
                visual,
                size,
                container: None,
                tabs: None,
                floating: false,
            },
        );
        item
    }

    fn new_group(&mut self, visuals: &mut VisualTree, size: Vec2) -> ItemId {
        let group = self.add_item(visuals, ItemKind::ListGroup, size);
        let group_visual = self.items[&group].visual;
        let strip_rect = Rect::from_min_size(Pos2::ZERO, vec2(size.x, TAB_STRIP_HEIGHT));
        let tabs = self.add_zone(visuals, Some(ZoneKind::TabStrip), strip_rect, Some(group_visual));
        if let Some(entry) = self.zones.get_mut(&tabs) {
            entry.host_group = Some(group);
        }
        if let Some(entry) = self.items.get_mut(&group) {
            entry.tabs = Some(tabs);
        }
        group
    }

    /// Lay out every zone's children one after another along the zone's axis.
    fn relayout(&self, visuals: &mut VisualTree) {
        for zone in self.zones.iter().filter(|(_, z)| z.host_group.is_none()) {
            self.layout_children(visuals, *zone.0);
        }
        for item in self.items.values() {
            let Some(tabs) = item.tabs else {
                continue;
            };
            let (Some(group_rect), Some(strip)) = (visuals.rect(item.visual), self.zones.get(&tabs))
            else {
                continue;
            };
            visuals.set_rect(
                strip.root,
                Rect::from_min_size(group_rect.min, vec2(group_rect.width(), TAB_STRIP_HEIGHT)),
            );
            self.layout_children(visuals, tabs);
        }
    }

    fn layout_children(&self, visuals: &mut VisualTree, zone: ZoneId) {
        let Some(entry) = self.zones.get(&zone) else {
            return;
        };
        let Some(root_rect) = visuals.rect(entry.root) else {
            return;
        };
        let axis = self.zone_axis(zone);
        let mut cursor = root_rect.min;
        for child in &entry.children {
            let item = &self.items[child];
            visuals.set_rect(item.visual, Rect::from_min_size(cursor, item.size));
            match axis {
                Some(Axis::Vertical) => cursor.y += item.size.y,
                _ => cursor.x += item.size.x,
            }
        }
    }

    pub(super) fn children(&self, zone: ZoneId) -> Vec<ItemId> {
        self.zones
            .get(&zone)
            .map(|z| z.children.clone())
            .unwrap_or_default()
    }

    pub(super) fn is_floating(&self, item: ItemId) -> bool {
        self.items.get(&item).is_some_and(|i| i.floating)
    }

    pub(super) fn host_group(&self, zone: ZoneId) -> Option<ItemId> {
        self.zones.get(&zone)?.host_group
    }

    pub(super) fn zone_root_of(&self, zone: ZoneId) -> NodeId {
        self.zones[&zone].root
    }

    pub(super) fn visual_of(&self, item: ItemId) -> NodeId {
        self.items[&item].visual
    }
}

impl DockLayout for TestLayout {
    fn zone_kind(&self, zone: ZoneId) -> Option<ZoneKind> {
        self.zones.get(&zone)?.kind
    }

    fn zone_axis(&self, zone: ZoneId) -> Option<Axis> {
        let entry = self.zones.get(&zone)?;
        entry.axis.or(entry.kind.map(ZoneKind::axis))
    }

    fn zone_root(&self, zone: ZoneId) -> Option<NodeId> {
        self.zones.get(&zone).map(|z| z.root)
    }

    fn child_items(&self, zone: ZoneId) -> Vec<ZoneChild> {
        self.children(zone)
            .into_iter()
            .map(|item| ZoneChild {
                item,
                visual: self.items[&item].visual,
            })
            .collect()
    }

    fn item_kind(&self, item: ItemId) -> Option<ItemKind> {
        self.items.get(&item).map(|i| i.kind)
    }

    fn item_visual(&self, item: ItemId) -> Option<NodeId> {
        self.items.get(&item).map(|i| i.visual)
    }

    fn container_of(&self, item: ItemId) -> Option<ZoneId> {
        self.items.get(&item)?.container
    }

    fn insert_at(
        &mut self,
        visuals: &mut VisualTree,
        zone: ZoneId,
        item: ItemId,
        index: usize,
    ) -> bool {
        if !self.zones.contains_key(&zone) || !self.items.contains_key(&item) {
            return false;
        }
        if self.refused_items.contains(&item) {
            return false;
        }
        if let Some(old) = self.items[&item].container
            && let Some(entry) = self.zones.get_mut(&old)
        {
            entry.children.retain(|&c| c != item);
        }

        let visual = self.items[&item].visual;
        let Some(entry) = self.zones.get_mut(&zone) else {
            return false;
        };
        let index = index.min(entry.children.len());
        let before = entry.children.get(index).map(|c| self.items[c].visual);
        entry.children.insert(index, item);
        let root = entry.root;

        if let Some(entry) = self.items.get_mut(&item) {
            entry.container = Some(zone);
        }
        visuals.insert_before(root, visual, before);
        self.relayout(visuals);
        true
    }

    fn remove(&mut self, visuals: &mut VisualTree, item: ItemId) -> bool {
        let Some(container) = self.items.get_mut(&item).and_then(|i| i.container.take()) else {
            return false;
        };
        if let Some(entry) = self.zones.get_mut(&container) {
            entry.children.retain(|&c| c != item);
        }
        visuals.detach(self.items[&item].visual);
        self.relayout(visuals);
        true
    }

    fn create_group(&mut self, visuals: &mut VisualTree) -> Option<ItemId> {
        let group = self.new_group(visuals, COLUMN_GROUP_SIZE);
        self.created_groups.push(group);
        Some(group)
    }

    fn tab_zone_of_group(&self, group: ItemId) -> Option<ZoneId> {
        self.items.get(&group)?.tabs
    }

    fn host_group_for_tab_zone(&mut self, visuals: &mut VisualTree, zone: ZoneId) -> Option<ItemId> {
        let entry = self.zones.get(&zone)?;
        if entry.kind != Some(ZoneKind::TabStrip) {
            return None;
        }
        if let Some(group) = entry.host_group {
            return Some(group);
        }

        // Wrap the strip in a new group standing where the strip was.
        let root = entry.root;
        let strip_rect = visuals.rect(root)?;
        let group = self.add_item(visuals, ItemKind::ListGroup, COLUMN_GROUP_SIZE);
        let group_visual = self.items[&group].visual;
        visuals.set_rect(group_visual, Rect::from_min_size(strip_rect.min, COLUMN_GROUP_SIZE));
        if let Some(parent) = visuals.parent(root) {
            visuals.insert_before(parent, group_visual, Some(root));
        }
        visuals.append_child(group_visual, root);

        if let Some(entry) = self.zones.get_mut(&zone) {
            entry.host_group = Some(group);
        }
        if let Some(entry) = self.items.get_mut(&group) {
            entry.tabs = Some(zone);
        }
        self.created_groups.push(group);
        self.relayout(visuals);
        Some(group)
    }

    fn set_floating(&mut self, visuals: &mut VisualTree, item: ItemId, floating: bool) {
        if let Some(entry) = self.items.get_mut(&item) {
            entry.floating = floating;
        }
        self.relayout(visuals);
    }
}

/// The whole workspace plus named handles into it.
#[derive(Debug)]
pub(super) struct TestDock {
    pub visuals: VisualTree,
    pub layout: TestLayout,
    pub floating: FloatingManager,
    pub surfaces: Surfaces,
    pub bus: NotificationBus,

    pub surface: NodeId,
    pub column: ZoneId,
    pub row: ZoneId,
    pub orphan_strip: ZoneId,
    pub toolbar_top: ZoneId,
    pub toolbar_bottom: ZoneId,
    pub toolbar_side: ZoneId,

    /// Column groups, top to bottom.
    pub groups: Vec<ItemId>,
    pub row_groups: Vec<ItemId>,
    pub tools_top: Vec<ItemId>,
    pub tools_bottom: Vec<ItemId>,

    /// Stacked top to bottom.
    pub tools_side: Vec<ItemId>,
}

impl TestDock {
    /// Column groups get 2, 1 and 3 tabs; row groups one tab each; 3 + 1 + 2 tool groups.
    pub(super) fn new() -> Self {
        Self::with_options(&DragOptions::default())
    }

    pub(super) fn with_options(options: &DragOptions) -> Self {
        let mut visuals = VisualTree::new();
        let mut layout = TestLayout::default();

        let surface = visuals.create_node(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)));
        visuals.add_root(surface);

        let column = layout.add_zone(
            &mut visuals,
            Some(ZoneKind::Column),
            Rect::from_min_max(pos2(0.0, 0.0), pos2(200.0, 600.0)),
            Some(surface),
        );
        let row = layout.add_zone(
            &mut visuals,
            Some(ZoneKind::Row),
            Rect::from_min_max(pos2(300.0, 0.0), pos2(800.0, 100.0)),
            Some(surface),
        );
        let orphan_strip = layout.add_zone(
            &mut visuals,
            Some(ZoneKind::TabStrip),
            Rect::from_min_max(pos2(300.0, 200.0), pos2(500.0, 220.0)),
            Some(surface),
        );
        let toolbar_top = layout.add_zone(
            &mut visuals,
            Some(ZoneKind::Toolbar),
            Rect::from_min_max(pos2(300.0, 500.0), pos2(800.0, 540.0)),
            Some(surface),
        );
        let toolbar_bottom = layout.add_zone(
            &mut visuals,
            Some(ZoneKind::Toolbar),
            Rect::from_min_max(pos2(300.0, 550.0), pos2(800.0, 590.0)),
            Some(surface),
        );
        let toolbar_side = layout.add_zone(
            &mut visuals,
            Some(ZoneKind::Toolbar),
            Rect::from_min_max(pos2(720.0, 120.0), pos2(770.0, 480.0)),
            Some(surface),
        );
        if let Some(entry) = layout.zones.get_mut(&toolbar_side) {
            entry.axis = Some(Axis::Vertical);
        }

        let mut groups = Vec::new();
        for tab_count in [2, 1, 3] {
            let group = layout.new_group(&mut visuals, COLUMN_GROUP_SIZE);
            layout.insert_at(&mut visuals, column, group, usize::MAX);
            let tabs = layout.items[&group].tabs.unwrap_or(ZoneId(0));
            for _ in 0..tab_count {
                let tab = layout.add_item(&mut visuals, ItemKind::ListItem, TAB_SIZE);
                layout.insert_at(&mut visuals, tabs, tab, usize::MAX);
            }
            groups.push(group);
        }

        let mut row_groups = Vec::new();
        for _ in 0..2 {
            let group = layout.new_group(&mut visuals, ROW_GROUP_SIZE);
            layout.insert_at(&mut visuals, row, group, usize::MAX);
            let tabs = layout.items[&group].tabs.unwrap_or(ZoneId(0));
            let tab = layout.add_item(&mut visuals, ItemKind::ListItem, TAB_SIZE);
            layout.insert_at(&mut visuals, tabs, tab, usize::MAX);
            row_groups.push(group);
        }

        let mut tools_top = Vec::new();
        for _ in 0..3 {
            let tool = layout.add_item(&mut visuals, ItemKind::ToolGroup, TOOL_GROUP_SIZE);
            layout.insert_at(&mut visuals, toolbar_top, tool, usize::MAX);
            tools_top.push(tool);
        }
        let tool = layout.add_item(&mut visuals, ItemKind::ToolGroup, TOOL_GROUP_SIZE);
        layout.insert_at(&mut visuals, toolbar_bottom, tool, usize::MAX);
        let tools_bottom = vec![tool];

        let mut tools_side = Vec::new();
        for _ in 0..2 {
            let tool = layout.add_item(&mut visuals, ItemKind::ToolGroup, TOOL_GROUP_SIZE);
            layout.insert_at(&mut visuals, toolbar_side, tool, usize::MAX);
            tools_side.push(tool);
        }

        let mut floating = FloatingManager::new(options.floating_z_base);
        floating.register_bounding_surface(surface);

        Self {
            visuals,
            layout,
            floating,
            surfaces: Surfaces::new(options.chrome),
            bus: NotificationBus::default(),
            surface,
            column,
            row,
            orphan_strip,
            toolbar_top,
            toolbar_bottom,
            toolbar_side,
            groups,
            row_groups,
            tools_top,
            tools_bottom,
            tools_side,
        }
    }

    pub(super) fn cx(&mut self) -> DockContext<'_> {
        DockContext {
            visuals: &mut self.visuals,
            layout: &mut self.layout,
            floating: &mut self.floating,
            surfaces: &self.surfaces,
            bus: &mut self.bus,
        }
    }

    pub(super) fn tabs_of(&self, group: ItemId) -> ZoneId {
        self.layout.items[&group].tabs.unwrap_or(ZoneId(0))
    }

    pub(super) fn rect_of(&self, item: ItemId) -> Rect {
        self.visuals
            .rect(self.layout.visual_of(item))
            .unwrap_or(Rect::NOTHING)
    }

    /// A drag request grabbing `item` at its center with pointer 1 on the primary surface.
    pub(super) fn request(&self, item: ItemId) -> DragRequest {
        let rect = self.rect_of(item);
        self.request_at(item, PointerEvent::primary(1, rect.center()))
    }

    pub(super) fn request_at(&self, item: ItemId, event: PointerEvent) -> DragRequest {
        let rect = self.rect_of(item);
        DragRequest {
            item,
            kind: self.layout.items[&item].kind,
            source_visual: Some(self.layout.visual_of(item)),
            pointer_event: Some(event),
            grab_offset: rect.center() - rect.min,
        }
    }
}
