use egui::{Pos2, Rect};

use super::geometry::clamp_min_into;
use super::layout::DockLayout;
use super::options::DragOptions;
use super::session::DragSession;
use super::types::ItemId;
use super::visual::{NodeId, VisualTree};

/// Tracks free-floating items and their stacking order.
///
/// Positions handed to and returned from this type are relative to the registered bounding
/// surface. The registry order is the paint order (last = top-most), and z-indices are always
/// recomputed as `base, base + 1, …` so they never grow with repeated focus changes.
#[derive(Debug)]
pub struct FloatingManager {
    bounding_surface: Option<NodeId>,
    registry: Vec<ItemId>,
    z_base: i32,
}

impl Default for FloatingManager {
    fn default() -> Self {
        Self::new(DragOptions::default().floating_z_base)
    }
}

impl FloatingManager {
    pub fn new(z_base: i32) -> Self {
        Self {
            bounding_surface: None,
            registry: Vec::new(),
            z_base,
        }
    }

    pub fn register_bounding_surface(&mut self, surface: NodeId) {
        self.bounding_surface = Some(surface);
    }

    pub fn bounding_surface(&self) -> Option<NodeId> {
        self.bounding_surface
    }

    /// Bounding surface rect in primary-surface coordinates.
    pub fn bounds(&self, visuals: &VisualTree) -> Option<Rect> {
        visuals.rect(self.bounding_surface?)
    }

    /// Floating items, bottom-most first.
    pub fn items(&self) -> &[ItemId] {
        &self.registry
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.registry.contains(&item)
    }

    pub fn z_base(&self) -> i32 {
        self.z_base
    }

    /// Position of a floating item relative to the bounding surface.
    pub fn position(&self, visuals: &VisualTree, layout: &dyn DockLayout, item: ItemId) -> Option<Pos2> {
        let bounds = self.bounds(visuals)?;
        let rect = visuals.rect(layout.item_visual(item)?)?;
        Some(Pos2::ZERO + (rect.min - bounds.min))
    }

    /// Detach `item` from the layout and show it free-floating at `pos`.
    pub fn add_floating(
        &mut self,
        visuals: &mut VisualTree,
        layout: &mut dyn DockLayout,
        item: ItemId,
        pos: Pos2,
    ) -> bool {
        let Some(surface) = self.bounding_surface else {
            log::warn!("no bounding surface registered; cannot float {item:?}");
            return false;
        };
        let (Some(bounds), Some(visual)) = (visuals.rect(surface), layout.item_visual(item)) else {
            log::warn!("cannot float {item:?}: missing bounding surface or item visual");
            return false;
        };

        if layout.container_of(item).is_some() {
            layout.remove(visuals, item);
        }
        if visuals.parent(visual) != Some(surface) && !visuals.append_child(surface, visual) {
            log::warn!("cannot reparent {item:?} onto the bounding surface");
            return false;
        }
        layout.set_floating(visuals, item, true);

        let size = visuals.rect(visual).map(|r| r.size()).unwrap_or_default();
        visuals.set_rect(visual, Rect::from_min_size(bounds.min + pos.to_vec2(), size));

        if !self.registry.contains(&item) {
            self.registry.push(item);
        }
        self.renormalize_z(visuals, layout);
        true
    }

    /// Return `item` to docked presentation. It stays where it is in the visual tree until the
    /// layout docks it somewhere.
    pub fn remove_floating(
        &mut self,
        visuals: &mut VisualTree,
        layout: &mut dyn DockLayout,
        item: ItemId,
    ) -> bool {
        let Some(index) = self.registry.iter().position(|&i| i == item) else {
            return false;
        };
        self.registry.remove(index);

        layout.set_floating(visuals, item, false);
        if let Some(node) = layout.item_visual(item).and_then(|v| visuals.get_mut(v)) {
            node.z_index = None;
        }
        self.renormalize_z(visuals, layout);
        true
    }

    pub fn bring_to_front(
        &mut self,
        visuals: &mut VisualTree,
        layout: &dyn DockLayout,
        item: ItemId,
    ) -> bool {
        if !self.registry.contains(&item) {
            return false;
        }
        self.registry.retain(|&i| i != item);
        self.registry.push(item);
        self.renormalize_z(visuals, layout);
        true
    }

    /// Clamp `desired` so the whole item stays inside `bounds` (both relative to the bounding
    /// surface), move the item there and return the applied position.
    pub fn constrain_position(
        &self,
        visuals: &mut VisualTree,
        layout: &dyn DockLayout,
        item: ItemId,
        desired: Pos2,
        bounds: Rect,
    ) -> Pos2 {
        let Some(visual) = layout.item_visual(item) else {
            return desired;
        };
        let Some(rect) = visuals.rect(visual) else {
            return desired;
        };

        let applied = clamp_min_into(desired, rect.size(), bounds);
        let origin = self.bounds(visuals).map(|b| b.min).unwrap_or(Pos2::ZERO);
        visuals.set_rect(visual, Rect::from_min_size(origin + applied.to_vec2(), rect.size()));
        applied
    }

    /// Fallback for drops nobody consumed: float the dragged item where it was released.
    ///
    /// `release` is in primary-surface coordinates. Returns the applied position relative to
    /// the bounding surface.
    pub fn convert_drop_to_floating(
        &mut self,
        visuals: &mut VisualTree,
        layout: &mut dyn DockLayout,
        session: &DragSession,
        release: Pos2,
    ) -> Option<Pos2> {
        let bounds = self.bounds(visuals)?;
        let desired = Pos2::ZERO + (release - bounds.min) - session.grab_offset;

        if !self.add_floating(visuals, layout, session.item, desired) {
            return None;
        }
        self.bring_to_front(visuals, layout, session.item);

        let local_bounds = Rect::from_min_size(Pos2::ZERO, bounds.size());
        Some(self.constrain_position(visuals, layout, session.item, desired, local_bounds))
    }

    fn renormalize_z(&self, visuals: &mut VisualTree, layout: &dyn DockLayout) {
        let mut z = self.z_base;
        for &item in &self.registry {
            if let Some(node) = layout.item_visual(item).and_then(|v| visuals.get_mut(v)) {
                node.z_index = Some(z);
            }
            z = z.saturating_add(1);
        }
    }

    /// Z-indices currently assigned to the registry, in registry order.
    pub fn z_indices(&self, visuals: &VisualTree, layout: &dyn DockLayout) -> Vec<Option<i32>> {
        self.registry
            .iter()
            .map(|&item| {
                layout
                    .item_visual(item)
                    .and_then(|v| visuals.get(v))
                    .and_then(|n| n.z_index)
            })
            .collect()
    }
}
