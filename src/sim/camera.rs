//! World/screen transform with continuous zoom-out

use glam::Vec2;

/// Follows the player and slowly zooms out over time
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Current scale factor (1.0 = world units are screen pixels)
    pub zoom: f32,
    /// World-space focal point, drawn at the screen centre
    pub focus: Vec2,
    /// Screen size in pixels
    pub viewport: Vec2,
    decay_per_sec: f32,
    min_zoom: f32,
}

impl Camera {
    pub fn new(viewport: Vec2, decay_per_sec: f32, min_zoom: f32) -> Self {
        Self {
            zoom: 1.0,
            focus: viewport / 2.0,
            viewport,
            decay_per_sec,
            min_zoom,
        }
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    /// Screen centre in pixels
    pub fn screen_center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    /// Hard-snap onto a world position
    pub fn follow(&mut self, target: Vec2) {
        self.focus = target;
    }

    /// Decay zoom by `decay_per_sec ^ dt`, never below the floor
    pub fn apply_zoom(&mut self, dt: f32) {
        self.zoom = (self.zoom * self.decay_per_sec.powf(dt)).max(self.min_zoom);
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.focus) * self.zoom + self.screen_center()
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.screen_center()) / self.zoom + self.focus
    }

    /// World length to screen length
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(800.0, 600.0), 0.98, 0.2)
    }

    #[test]
    fn test_initial_focus_is_screen_center() {
        let cam = camera();
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(cam.world_to_screen(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_follow_centers_target() {
        let mut cam = camera();
        cam.follow(Vec2::new(-1234.0, 56.0));
        cam.zoom = 0.5;
        assert_eq!(cam.world_to_screen(Vec2::new(-1234.0, 56.0)), cam.screen_center());
        // 100 world units to the right land 50 pixels right of centre
        assert_eq!(
            cam.world_to_screen(Vec2::new(-1134.0, 56.0)),
            Vec2::new(450.0, 300.0)
        );
    }

    #[test]
    fn test_zoom_decays_then_clamps() {
        let mut cam = camera();
        let mut last = cam.zoom;
        let mut steps = 0;
        while cam.zoom > cam.min_zoom() {
            cam.apply_zoom(1.0);
            assert!(cam.zoom < last);
            last = cam.zoom;
            steps += 1;
            assert!(steps < 1000, "zoom never reached the floor");
        }
        for _ in 0..10 {
            cam.apply_zoom(1.0);
            assert_eq!(cam.zoom, 0.2);
        }
    }

    #[test]
    fn test_zero_dt_keeps_zoom() {
        let mut cam = camera();
        cam.apply_zoom(0.0);
        assert_eq!(cam.zoom, 1.0);
    }

    proptest! {
        #[test]
        fn prop_screen_world_inverse(
            x in -1.0e5f32..1.0e5,
            y in -1.0e5f32..1.0e5,
            fx in -1.0e4f32..1.0e4,
            fy in -1.0e4f32..1.0e4,
            zoom in 0.2f32..=1.0,
        ) {
            let mut cam = camera();
            cam.follow(Vec2::new(fx, fy));
            cam.zoom = zoom;
            let world = Vec2::new(x, y);
            let back = cam.screen_to_world(cam.world_to_screen(world));
            let magnitude = world.abs().max_element()
                + cam.focus.abs().max_element()
                + cam.viewport.max_element() / zoom;
            let tolerance = 1.0e-5 * (1.0 + magnitude);
            prop_assert!((back - world).abs().max_element() <= tolerance);
        }

        #[test]
        fn prop_zoom_never_below_floor(dts in proptest::collection::vec(0.0f32..5.0, 1..200)) {
            let mut cam = camera();
            for dt in dts {
                let before = cam.zoom;
                cam.apply_zoom(dt);
                prop_assert!(cam.zoom >= 0.2);
                prop_assert!(cam.zoom <= before);
            }
        }
    }
}
