use ahash::HashMap;
use egui::{Pos2, Rect};
use itertools::Itertools as _;

use super::types::{ZoneId, ZoneKind};

/// Handle to a node in the [`VisualTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeRole {
    #[default]
    Normal,

    /// The shared "drop here" marker.
    Placeholder,

    /// A pointer-following drag proxy.
    Ghost,
}

/// Back-reference from a container's root node to the drop zone it implements.
///
/// `kind == None` is a misconfigured container: it claims to be a zone but never said which.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneTag {
    pub kind: Option<ZoneKind>,
    pub zone: ZoneId,
}

#[derive(Clone, Debug)]
pub struct VisualNode {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    /// Bounds in primary-surface coordinates.
    pub rect: Rect,
    pub zone: Option<ZoneTag>,

    /// When `false` the node and its whole subtree are invisible to hit-testing.
    pub pointer_events: bool,
    pub opacity: f32,
    pub z_index: Option<i32>,
    pub role: NodeRole,
}

impl VisualNode {
    fn new(rect: Rect, role: NodeRole) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            rect,
            zone: None,
            pointer_events: true,
            opacity: 1.0,
            z_index: None,
            role,
        }
    }
}

/// A minimal retained visual tree: enough structure for hit-testing, placeholder insertion,
/// ghost proxies and stacking of floating items.
///
/// Top-level nodes are kept in `roots`, in paint order (last = top-most).
#[derive(Debug, Default)]
pub struct VisualTree {
    nodes: HashMap<NodeId, VisualNode>,
    roots: Vec<NodeId>,
    next_id: u64,
}

impl VisualTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self, rect: Rect) -> NodeId {
        self.create_node_with_role(rect, NodeRole::Normal)
    }

    pub fn create_node_with_role(&mut self, rect: Rect, role: NodeRole) -> NodeId {
        self.next_id = self.next_id.saturating_add(1);
        let id = NodeId(self.next_id);
        self.nodes.insert(id, VisualNode::new(rect, role));
        id
    }

    /// Make a detached node a top-level root, painted above the existing ones.
    pub fn add_root(&mut self, node: NodeId) -> bool {
        if !self.nodes.contains_key(&node) {
            return false;
        }
        self.detach(node);
        self.roots.push(node);
        true
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(&node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &VisualNode)> + '_ {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node).map(|n| n.rect)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.rect = rect;
        }
    }

    pub fn tag_zone(&mut self, node: NodeId, kind: Option<ZoneKind>, zone: ZoneId) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.zone = Some(ZoneTag { kind, zone });
        }
    }

    /// Is `ancestor` equal to `node` or one of its ancestors?
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Walk from `node` up to the root, returning the first node matching `pred`.
    pub fn nearest_ancestor(
        &self,
        node: NodeId,
        mut pred: impl FnMut(NodeId, &VisualNode) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.nodes.get(&id)?;
            if pred(id, n) {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    /// Remove `node` from its parent (or from the root list). The node itself stays alive.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            self.roots.retain(|&r| r != node);
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|&c| c != node);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent`, immediately before `before` (or last).
    ///
    /// The child is detached from wherever it was first, so a node never has two parents.
    /// `before` values that are not children of `parent` mean "append".
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) -> bool {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("refusing to insert {child:?} under its own descendant {parent:?}");
            return false;
        }

        self.detach(child);

        let Some(p) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let at = before
            .filter(|&b| b != child)
            .and_then(|b| p.children.iter().position(|&c| c == b))
            .unwrap_or(p.children.len());
        p.children.insert(at, child);

        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        true
    }

    /// Remove `node` and all of its descendants.
    pub fn remove_subtree(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                stack.extend(n.children);
            }
        }
    }

    /// Find the deepest, top-most node under `pos` that passes `filter`.
    ///
    /// Subtrees with `pointer_events == false` are skipped entirely. Nodes failing `filter` are
    /// see-through but their children are still tested.
    pub fn hit_test(&self, pos: Pos2, filter: impl Fn(NodeId, &VisualNode) -> bool) -> Option<NodeId> {
        self.roots
            .iter()
            .rev()
            .find_map(|&root| self.hit_test_node(root, pos, &filter))
    }

    fn hit_test_node(
        &self,
        id: NodeId,
        pos: Pos2,
        filter: &dyn Fn(NodeId, &VisualNode) -> bool,
    ) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        if !node.pointer_events {
            return None;
        }

        // Paint order: z-index first, then document order. Test the top-most first.
        let hit_child = node
            .children
            .iter()
            .enumerate()
            .sorted_by_key(|&(index, child)| (self.z_index(*child), index))
            .rev()
            .find_map(|(_, &child)| self.hit_test_node(child, pos, filter));
        if hit_child.is_some() {
            return hit_child;
        }

        (node.rect.contains(pos) && filter(id, node)).then_some(id)
    }

    fn z_index(&self, node: NodeId) -> i32 {
        self.nodes
            .get(&node)
            .and_then(|n| n.z_index)
            .unwrap_or_default()
    }
}
