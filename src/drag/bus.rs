use std::collections::VecDeque;

use super::session::DragEndSnapshot;
use super::types::DragRequest;

/// Messages exchanged between drag sources, the engine and observers.
#[derive(Clone, Copy, Debug)]
pub enum DockNotification {
    /// A header/handle wants to start dragging its item.
    DragRequested(DragRequest),

    /// A drag finished and everything was torn down.
    DragEnded(DragEndSnapshot),
}

/// A plain FIFO shared by everything that takes part in docking.
///
/// Publishers push; the engine takes the requests addressed to it in [`super::DragEngine::pump`];
/// observers drain the rest.
#[derive(Debug, Default)]
pub struct NotificationBus {
    queue: VecDeque<DockNotification>,
}

impl NotificationBus {
    pub fn publish(&mut self, notification: DockNotification) {
        self.queue.push_back(notification);
    }

    pub fn request_drag(&mut self, request: DragRequest) {
        self.publish(DockNotification::DragRequested(request));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove and return all pending drag requests, leaving other notifications queued.
    pub fn take_drag_requests(&mut self) -> Vec<DragRequest> {
        let mut requests = Vec::new();
        self.queue.retain(|n| match n {
            DockNotification::DragRequested(request) => {
                requests.push(*request);
                false
            }
            DockNotification::DragEnded(_) => true,
        });
        requests
    }

    /// Remove and return everything.
    pub fn drain(&mut self) -> Vec<DockNotification> {
        self.queue.drain(..).collect()
    }

    /// Remove and return the pending drag-ended notifications.
    pub fn take_drag_ended(&mut self) -> Vec<DragEndSnapshot> {
        let mut ended = Vec::new();
        self.queue.retain(|n| match n {
            DockNotification::DragEnded(snapshot) => {
                ended.push(*snapshot);
                false
            }
            DockNotification::DragRequested(_) => true,
        });
        ended
    }
}
