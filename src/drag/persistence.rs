use egui::Pos2;

use super::floating::FloatingManager;
use super::layout::DockLayout;
use super::types::ItemId;
use super::visual::VisualTree;

pub const FLOATING_SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FloatingItemSnapshot {
    pub item: ItemId,

    /// Relative to the bounding surface.
    pub position: Pos2,
}

/// Floating items in stacking order (bottom-most first).
///
/// The state service serializes this next to its own layout data and replays it through
/// [`FloatingManager::restore`] after the layout has been rebuilt.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FloatingSnapshot {
    pub version: u32,
    pub items: Vec<FloatingItemSnapshot>,
}

impl FloatingManager {
    pub fn snapshot(&self, visuals: &VisualTree, layout: &dyn DockLayout) -> FloatingSnapshot {
        let items = self
            .items()
            .iter()
            .filter_map(|&item| {
                let position = self.position(visuals, layout, item)?;
                Some(FloatingItemSnapshot { item, position })
            })
            .collect();
        FloatingSnapshot {
            version: FLOATING_SNAPSHOT_VERSION,
            items,
        }
    }

    /// Re-float every item of `snapshot`, in order. Items the layout no longer knows are skipped.
    ///
    /// Returns how many items were restored.
    pub fn restore(
        &mut self,
        snapshot: &FloatingSnapshot,
        visuals: &mut VisualTree,
        layout: &mut dyn DockLayout,
    ) -> usize {
        if snapshot.version != FLOATING_SNAPSHOT_VERSION {
            log::warn!(
                "unsupported floating snapshot version: {} (expected {FLOATING_SNAPSHOT_VERSION})",
                snapshot.version
            );
            return 0;
        }

        let mut restored = 0;
        for entry in &snapshot.items {
            if layout.item_visual(entry.item).is_none() {
                log::debug!("skipping unknown floating item {:?}", entry.item);
                continue;
            }
            if self.add_floating(visuals, layout, entry.item, entry.position) {
                self.bring_to_front(visuals, layout, entry.item);
                restored += 1;
            }
        }
        restored
    }
}
