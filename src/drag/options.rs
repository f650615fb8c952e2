/// Plausibility limits for the window-chrome estimate used when translating pointer positions
/// from a secondary surface into the primary one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ChromeLimits {
    /// Largest side border (in points) we believe a real window frame has.
    pub max_border: f32,

    /// Side border used when the measured one is negative or above `max_border`.
    pub fallback_border: f32,

    /// Largest title bar (in points) we believe a real window frame has.
    pub max_title_bar: f32,

    /// Title bar height used when the measured one is implausible.
    pub fallback_title_bar: f32,
}

impl Default for ChromeLimits {
    fn default() -> Self {
        Self {
            max_border: 16.0,
            fallback_border: 8.0,
            max_title_bar: 64.0,
            fallback_title_bar: 28.0,
        }
    }
}

/// Options for [`super::DragEngine`] and [`super::FloatingManager`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DragOptions {
    /// Z-index given to the bottom-most floating item. The rest follow contiguously.
    pub floating_z_base: i32,

    /// Thickness (in points) of the insertion placeholder across the zone's axis.
    pub placeholder_thickness: f32,

    /// Opacity of the ghost proxy that follows the pointer.
    pub ghost_opacity: f32,

    /// Opacity given to a floating item or surface while it is being dragged.
    ///
    /// Other sources keep their opacity and only stop receiving pointer events.
    pub transit_opacity: f32,

    /// Limits for the cross-surface chrome estimate.
    pub chrome: ChromeLimits,

    /// If true, pointer moves are coalesced and evaluated once per [`super::DragEngine::frame`].
    ///
    /// If false, each move is evaluated immediately (useful for headless drivers without a frame
    /// clock).
    pub coalesce_pointer_moves: bool,

    /// If true, record drag decisions in a small ring buffer (see [`super::DragEngine::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, check placeholder/ghost/visual-tree consistency after every evaluation.
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug builds only).
    pub debug_integrity_panic: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            floating_z_base: 100,
            placeholder_thickness: 4.0,
            ghost_opacity: 0.7,
            transit_opacity: 0.0,
            chrome: ChromeLimits::default(),
            coalesce_pointer_moves: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: false,
            debug_integrity_panic: false,
        }
    }
}
