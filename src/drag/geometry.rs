use egui::{Pos2, Rect, Vec2, pos2, vec2};

use super::options::ChromeLimits;
use super::types::Axis;

/// Center of `rect` along `axis`.
pub fn midpoint(rect: Rect, axis: Axis) -> f32 {
    axis.scalar(rect.center())
}

/// First index whose midpoint lies after `scalar`; `len` (append) if there is none.
pub fn insertion_index(midpoints: impl IntoIterator<Item = f32>, scalar: f32) -> usize {
    let mut count = 0;
    for (index, mid) in midpoints.into_iter().enumerate() {
        if scalar < mid {
            return index;
        }
        count = index + 1;
    }
    count
}

/// Dropping an item at its own index, or right after itself, leaves the order unchanged once
/// the item is removed from its old slot.
pub fn is_noop_index(index: usize, original_index: Option<usize>) -> bool {
    original_index.is_some_and(|k| index == k || index == k + 1)
}

/// Index to insert at after the dragged item has been removed from the same list.
pub fn index_after_removal(index: usize, original_index: Option<usize>) -> usize {
    match original_index {
        Some(k) if k < index => index - 1,
        _ => index,
    }
}

/// Clamp the top-left corner of a `size`-sized box so the box stays inside `bounds`.
///
/// When the box is larger than `bounds` it is pinned to the top-left edge.
pub fn clamp_min_into(desired_min: Pos2, size: Vec2, bounds: Rect) -> Pos2 {
    let max_x = (bounds.max.x - size.x).max(bounds.min.x);
    let max_y = (bounds.max.y - size.y).max(bounds.min.y);
    pos2(
        desired_min.x.clamp(bounds.min.x, max_x),
        desired_min.y.clamp(bounds.min.y, max_y),
    )
}

/// Where the `axis`-thick placeholder goes when placed before `next` (or after `prev`).
pub fn placeholder_rect(
    zone: Rect,
    prev: Option<Rect>,
    next: Option<Rect>,
    axis: Axis,
    thickness: f32,
) -> Rect {
    let edge = match (prev, next) {
        (_, Some(next)) => match axis {
            Axis::Horizontal => next.min.x,
            Axis::Vertical => next.min.y,
        },
        (Some(prev), None) => match axis {
            Axis::Horizontal => prev.max.x,
            Axis::Vertical => prev.max.y,
        },
        (None, None) => match axis {
            Axis::Horizontal => zone.min.x,
            Axis::Vertical => zone.min.y,
        },
    };
    let half = thickness * 0.5;
    match axis {
        Axis::Horizontal => Rect::from_x_y_ranges((edge - half)..=(edge + half), zone.y_range()),
        Axis::Vertical => Rect::from_x_y_ranges(zone.x_range(), (edge - half)..=(edge + half)),
    }
}

/// Estimate the window chrome between a surface's outer frame and its content area.
///
/// Returns `(left, top)`: the side border is taken as half the width difference, the top chrome
/// is whatever height is left after the bottom border. Implausible values (negative or above the
/// configured threshold) fall back to fixed estimates.
pub fn estimate_chrome(outer: Rect, inner_size: Vec2, limits: &ChromeLimits) -> Vec2 {
    let side = (outer.width() - inner_size.x) * 0.5;
    let side = if side.is_finite() && (0.0..=limits.max_border).contains(&side) {
        side
    } else {
        limits.fallback_border
    };

    let top = outer.height() - inner_size.y - side;
    let top = if top.is_finite() && (0.0..=limits.max_title_bar).contains(&top) {
        top
    } else {
        limits.fallback_title_bar
    };

    vec2(side, top)
}

/// Screen position of a surface's content origin.
pub fn content_origin(outer: Rect, inner_size: Vec2, limits: &ChromeLimits) -> Pos2 {
    outer.min + estimate_chrome(outer, inner_size, limits)
}

/// Translate `local` from one surface's content space into another's.
pub fn translate_between_surfaces(local: Pos2, from_origin: Pos2, to_origin: Pos2) -> Pos2 {
    local + (from_origin - to_origin)
}
