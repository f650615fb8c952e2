use super::DragEngine;

impl DragEngine {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    pub(super) fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log
            .push_back(format!("[frame {}] {}", self.debug_frame, message));
    }

    /// Clear the debug event log.
    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// The debug event log, one event per line (empty unless `debug_event_log` is set).
    pub fn debug_log_text(&self) -> String {
        self.debug_log.iter().cloned().collect::<Vec<_>>().join("\n")
    }

    pub(super) fn debug_check_integrity(&mut self, visuals: &super::VisualTree) {
        if !self.options.debug_integrity {
            return;
        }

        let issues = super::integrity::drag_integrity_issues(
            visuals,
            self.placeholder.node(),
            self.ghost.node(),
        );
        if issues.is_empty() {
            return;
        }

        log::warn!("drag integrity FAIL issues={}", issues.len());
        self.push_debug_log_line(format!("integrity FAIL issues={}", issues.len()));
        for issue in &issues {
            log::warn!("{issue}");
            self.push_debug_log_line(issue.clone());
        }

        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!("egui_dock_drag integrity failure\n{}", issues.join("\n"));
        }
    }
}
