use eframe::egui::{Pos2, Vec2};

pub(in crate::app) const MIN_ZOOM: f32 = 0.2;
pub(in crate::app) const MAX_ZOOM: f32 = 3.0;

/// Affine map between world space and (viewport-relative) screen space:
/// `screen = world * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Transform {
    pub(in crate::app) pan: Vec2,
    pub(in crate::app) zoom: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Transform {
    pub(in crate::app) fn to_screen(&self, world: Vec2) -> Pos2 {
        (world * self.zoom + self.pan).to_pos2()
    }

    pub(in crate::app) fn to_world(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.pan) / self.zoom
    }

    /// Multiply zoom by `factor`, clamped to bounds, keeping the world point
    /// under `anchor` fixed on screen: `pan' = anchor - (anchor - pan) * (zoom'/zoom)`.
    pub(in crate::app) fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let next = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = anchor.to_vec2() - (anchor.to_vec2() - self.pan) * (next / self.zoom);
        self.zoom = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};
    use proptest::prelude::*;

    #[test]
    fn screen_world_round_trip() {
        let transform = Transform {
            pan: vec2(130.0, -42.0),
            zoom: 1.7,
        };
        let world = vec2(87.5, -311.25);
        let back = transform.to_world(transform.to_screen(world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn zoom_stays_within_bounds() {
        let mut transform = Transform::default();
        for _ in 0..200 {
            transform.zoom_at(pos2(100.0, 100.0), 1.15);
        }
        assert_eq!(transform.zoom, MAX_ZOOM);

        for _ in 0..200 {
            transform.zoom_at(pos2(100.0, 100.0), 0.85);
        }
        assert_eq!(transform.zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_preserves_anchor_world_point() {
        let mut transform = Transform {
            pan: vec2(40.0, -15.0),
            zoom: 0.8,
        };
        let anchor = pos2(320.0, 200.0);
        let before = transform.to_world(anchor);
        transform.zoom_at(anchor, 1.3);
        let after = transform.to_world(anchor);
        assert!((after - before).length() < 1e-3);
    }

    proptest! {
        #[test]
        fn zoom_preserves_anchor_for_any_state(
            pan_x in -2000.0f32..2000.0,
            pan_y in -2000.0f32..2000.0,
            zoom in MIN_ZOOM..MAX_ZOOM,
            anchor_x in 0.0f32..1600.0,
            anchor_y in 0.0f32..1000.0,
            factor in 0.85f32..1.15,
        ) {
            let mut transform = Transform { pan: vec2(pan_x, pan_y), zoom };
            let anchor = pos2(anchor_x, anchor_y);
            let before = transform.to_world(anchor);
            transform.zoom_at(anchor, factor);
            let after = transform.to_world(anchor);
            prop_assert!((after - before).length() < 0.05);
        }
    }
}
