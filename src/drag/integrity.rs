use std::collections::HashSet;

use super::visual::{NodeId, NodeRole, VisualTree};

/// Consistency problems around the shared drag visuals: parent/child links, the placeholder
/// and the ghost.
pub(super) fn drag_integrity_issues(
    visuals: &VisualTree,
    placeholder: Option<NodeId>,
    ghost: Option<NodeId>,
) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    let mut sorted: Vec<(NodeId, &super::visual::VisualNode)> = visuals.iter().collect();
    sorted.sort_by_key(|(id, _)| *id);

    let mut placeholders = 0;
    for (id, node) in &sorted {
        if node.role == NodeRole::Placeholder {
            placeholders += 1;
        }

        if let Some(parent) = node.parent {
            let count = visuals.children(parent).iter().filter(|&&c| c == *id).count();
            if count != 1 {
                issues.push(format!(
                    "integrity: {id:?} lists parent {parent:?} which holds it {count} times"
                ));
            }
        } else if node.role == NodeRole::Ghost && !visuals.roots().contains(id) {
            issues.push(format!("integrity: ghost {id:?} is detached"));
        }

        let mut local: HashSet<NodeId> = HashSet::new();
        for child in &node.children {
            if !local.insert(*child) {
                issues.push(format!("integrity: {id:?} contains duplicate child {child:?}"));
            }
            if visuals.parent(*child) != Some(*id) {
                issues.push(format!(
                    "integrity: {id:?} holds {child:?} whose parent is {:?}",
                    visuals.parent(*child)
                ));
            }
        }
    }

    if placeholders > 1 {
        issues.push(format!("integrity: {placeholders} placeholder nodes exist"));
    }
    if let Some(node) = placeholder
        && visuals.get(node).is_some_and(|n| n.role != NodeRole::Placeholder)
    {
        issues.push(format!("integrity: placeholder {node:?} has the wrong role"));
    }
    if let Some(node) = ghost {
        match visuals.get(node) {
            None => issues.push(format!("integrity: ghost {node:?} missing")),
            Some(n) if n.pointer_events => {
                issues.push(format!("integrity: ghost {node:?} intercepts pointer events"));
            }
            Some(n) if n.parent.is_some() => {
                issues.push(format!("integrity: ghost {node:?} is attached to {:?}", n.parent));
            }
            Some(_) => {}
        }
    }

    issues
}
