use egui::Rect;

use super::types::Axis;
use super::visual::{NodeId, NodeRole, VisualTree};

/// The single shared "drop here" marker.
///
/// Created lazily in the visual tree and reused for every hover; it has at most one parent at
/// any time because [`VisualTree::insert_before`] always detaches first.
#[derive(Debug)]
pub struct Placeholder {
    node: Option<NodeId>,
    axis: Axis,
    thickness: f32,
}

impl Placeholder {
    pub fn new(thickness: f32) -> Self {
        Self {
            node: None,
            axis: Axis::Horizontal,
            thickness,
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    fn ensure_node(&mut self, visuals: &mut VisualTree) -> NodeId {
        if let Some(node) = self.node
            && visuals.contains(node)
        {
            return node;
        }
        let node = visuals.create_node_with_role(Rect::NOTHING, NodeRole::Placeholder);
        self.node = Some(node);
        node
    }

    /// Show the marker inside `parent`, before `before` (or last), oriented along `axis`.
    pub fn show(
        &mut self,
        visuals: &mut VisualTree,
        parent: NodeId,
        before: Option<NodeId>,
        axis: Axis,
        rect: Rect,
    ) -> bool {
        let node = self.ensure_node(visuals);
        self.axis = axis;
        visuals.set_rect(node, rect);
        visuals.insert_before(parent, node, before)
    }

    /// Is the marker currently inserted anywhere?
    pub fn is_inserted(&self, visuals: &VisualTree) -> bool {
        self.node.and_then(|n| visuals.parent(n)).is_some()
    }

    /// Is the marker currently inserted under `parent`?
    pub fn is_inserted_in(&self, visuals: &VisualTree, parent: NodeId) -> bool {
        self.node.and_then(|n| visuals.parent(n)) == Some(parent)
    }

    pub fn hide(&self, visuals: &mut VisualTree) {
        if let Some(node) = self.node {
            visuals.detach(node);
        }
    }
}
