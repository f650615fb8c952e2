use egui::{Pos2, Rect, Vec2};

use super::geometry::clamp_min_into;
use super::visual::{NodeId, NodeRole, VisualTree};

#[derive(Clone, Copy, Debug)]
struct GhostProxy {
    node: NodeId,
    grab_offset: Vec2,
    size: Vec2,
}

/// Owns the pointer-following proxy of the item being dragged.
///
/// The proxy is a top-level, non-interactive node sized like the source. It never takes part in
/// hit-testing, so the zones underneath stay reachable.
#[derive(Debug, Default)]
pub struct GhostManager {
    proxy: Option<GhostProxy>,
}

impl GhostManager {
    pub fn node(&self) -> Option<NodeId> {
        self.proxy.map(|p| p.node)
    }

    pub fn is_active(&self) -> bool {
        self.proxy.is_some()
    }

    /// Create a proxy for `source`, anchored so that `grab_offset` inside it sits under `pointer`.
    ///
    /// Any previous proxy is destroyed first.
    pub fn create(
        &mut self,
        visuals: &mut VisualTree,
        source: NodeId,
        pointer: Pos2,
        grab_offset: Vec2,
        opacity: f32,
    ) -> Option<NodeId> {
        self.destroy(visuals);

        let size = visuals.rect(source)?.size();
        let node = visuals.create_node_with_role(
            Rect::from_min_size(pointer - grab_offset, size),
            NodeRole::Ghost,
        );
        if let Some(n) = visuals.get_mut(node) {
            n.pointer_events = false;
            n.opacity = opacity;
        }
        visuals.add_root(node);

        self.proxy = Some(GhostProxy {
            node,
            grab_offset,
            size,
        });
        Some(node)
    }

    /// Move the proxy under `pointer`, keeping it entirely inside `bounds` when given.
    pub fn update(&self, visuals: &mut VisualTree, pointer: Pos2, bounds: Option<Rect>) {
        let Some(proxy) = self.proxy else {
            return;
        };
        let mut min = pointer - proxy.grab_offset;
        if let Some(bounds) = bounds {
            min = clamp_min_into(min, proxy.size, bounds);
        }
        visuals.set_rect(proxy.node, Rect::from_min_size(min, proxy.size));
    }

    /// Remove the proxy. Calling this without an active proxy does nothing.
    pub fn destroy(&mut self, visuals: &mut VisualTree) {
        if let Some(proxy) = self.proxy.take() {
            visuals.remove_subtree(proxy.node);
        }
    }
}
