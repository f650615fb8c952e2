
use egui::{Pos2, Rect, ViewportId, ViewportIdMap};

use super::geometry::{content_origin, translate_between_surfaces};
use super::options::ChromeLimits;

/// Screen-space geometry of one rendering surface (the main window or a popped-out one).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    /// Window frame including decorations.
    pub outer_rect: Rect,

    /// Content area. Only its size is trusted; some backends report a bogus position.
    pub inner_rect: Rect,
}

/// Known rendering surfaces, keyed by viewport.
///
/// Pointer events carry the surface they came from; everything downstream of the engine works
/// in the content space of `ViewportId::ROOT`.
#[derive(Clone, Debug, Default)]
pub struct Surfaces {
    surfaces: ViewportIdMap<SurfaceGeometry>,
    chrome: ChromeLimits,
}

impl Surfaces {
    pub fn new(chrome: ChromeLimits) -> Self {
        Self {
            surfaces: ViewportIdMap::default(),
            chrome,
        }
    }

    pub fn set(&mut self, surface: ViewportId, geometry: SurfaceGeometry) {
        self.surfaces.insert(surface, geometry);
    }

    pub fn remove(&mut self, surface: ViewportId) {
        self.surfaces.remove(&surface);
    }

    pub fn get(&self, surface: ViewportId) -> Option<SurfaceGeometry> {
        self.surfaces.get(&surface).copied()
    }

    /// Screen position of the surface's content origin, with the chrome estimate applied.
    pub fn content_origin(&self, surface: ViewportId) -> Option<Pos2> {
        let g = self.surfaces.get(&surface)?;
        Some(content_origin(g.outer_rect, g.inner_rect.size(), &self.chrome))
    }

    /// Translate a surface-local position into primary-surface coordinates.
    ///
    /// Positions on the primary surface pass through. If either surface is unknown, the local
    /// position is returned unchanged and a warning is logged.
    pub fn to_primary(&self, surface: ViewportId, local: Pos2) -> Pos2 {
        if surface == ViewportId::ROOT {
            return local;
        }

        match (self.content_origin(surface), self.content_origin(ViewportId::ROOT)) {
            (Some(from), Some(to)) => translate_between_surfaces(local, from, to),
            _ => {
                log::warn!("no geometry for surface {surface:?}; using local pointer coordinates");
                local
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::{pos2, vec2};

    use super::*;

    fn geometry(outer_min: Pos2, inner_size: egui::Vec2, border: f32, title: f32) -> SurfaceGeometry {
        let outer = Rect::from_min_size(
            outer_min,
            inner_size + vec2(2.0 * border, title + border),
        );
        let inner = Rect::from_min_size(outer_min + vec2(border, title), inner_size);
        SurfaceGeometry {
            outer_rect: outer,
            inner_rect: inner,
        }
    }

    #[test]
    fn primary_positions_pass_through() {
        let surfaces = Surfaces::default();
        let p = pos2(12.0, 34.0);
        assert_eq!(surfaces.to_primary(ViewportId::ROOT, p), p);
    }

    #[test]
    fn secondary_positions_land_on_same_screen_point() {
        let limits = ChromeLimits::default();
        let mut surfaces = Surfaces::new(limits);
        let main = geometry(pos2(0.0, 0.0), vec2(1200.0, 800.0), 4.0, 30.0);
        let popup = geometry(pos2(600.0, 300.0), vec2(400.0, 300.0), 6.0, 24.0);
        let popup_id = ViewportId::from_hash_of("popup");
        surfaces.set(ViewportId::ROOT, main);
        surfaces.set(popup_id, popup);

        // Same logical screen location, expressed once per surface.
        let screen = pos2(750.0, 420.0);
        let in_popup = screen - popup.inner_rect.min.to_vec2();
        let in_main = screen - main.inner_rect.min.to_vec2();

        let translated = surfaces.to_primary(popup_id, in_popup);
        let tolerance = 2.0 * (limits.max_border + limits.max_title_bar);
        assert!(translated.distance(in_main) <= tolerance);
        assert!(translated.distance(in_main) < 1e-3, "exact when chrome is plausible");
    }

    #[test]
    fn implausible_chrome_stays_within_clamped_tolerance() {
        let limits = ChromeLimits::default();
        let mut surfaces = Surfaces::new(limits);
        let main = geometry(pos2(0.0, 0.0), vec2(1200.0, 800.0), 4.0, 30.0);
        // A backend that reports a huge frame: the estimate falls back to fixed values.
        let popup = geometry(pos2(600.0, 300.0), vec2(400.0, 300.0), 90.0, 200.0);
        let popup_id = ViewportId::from_hash_of("popup");
        surfaces.set(ViewportId::ROOT, main);
        surfaces.set(popup_id, popup);

        let screen = pos2(800.0, 650.0);
        let in_popup = screen - popup.inner_rect.min.to_vec2();
        let in_main = screen - main.inner_rect.min.to_vec2();

        let translated = surfaces.to_primary(popup_id, in_popup);
        let err = translated - in_main;
        assert!(err.x.abs() <= 90.0 + limits.max_border);
        assert!(err.y.abs() <= 200.0 + limits.max_title_bar);
    }

    #[test]
    fn unknown_surface_falls_back_to_local() {
        let surfaces = Surfaces::default();
        let p = pos2(5.0, 6.0);
        assert_eq!(surfaces.to_primary(ViewportId::from_hash_of("nope"), p), p);
    }
}
