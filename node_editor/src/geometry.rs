//! Hit-testing math and the pan/zoom viewport transform.

use egui::{Pos2, Rect, Vec2};

/// Returns true when `c` lies within `line_width` of the segment `a..b`.
///
/// Points whose projection falls outside the segment are rejected first.
/// The distance test compares squared quantities,
/// `|AB|²·|AC|² <= width²·|AB|² + (AC·AB)²`, so no square root is taken.
/// A zero-length segment never matches.
pub fn is_point_on_line(a: Pos2, b: Pos2, c: Pos2, line_width: f32) -> bool {
    let ab = b - a;
    let ac = c - a;
    let ab_len_sq = ab.length_sq();
    if ab_len_sq == 0.0 {
        return false;
    }

    let dot = ac.dot(ab);
    if dot < 0.0 || dot > ab_len_sq {
        return false;
    }

    ab_len_sq * ac.length_sq() <= line_width * line_width * ab_len_sq + dot * dot
}

/// Viewport transform between graph space and the host's draw area.
///
/// `screen = area.min + pan + graph * zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Pan offset in screen pixels.
    pub pan: Vec2,
    /// Zoom level (1.0 = 100%).
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn graph_to_screen(&self, area: Rect, point: Pos2) -> Pos2 {
        area.min + self.pan + point.to_vec2() * self.zoom
    }

    pub fn screen_to_graph(&self, area: Rect, point: Pos2) -> Pos2 {
        ((point - area.min - self.pan) / self.zoom).to_pos2()
    }

    pub fn graph_rect_to_screen(&self, area: Rect, rect: Rect) -> Rect {
        Rect::from_min_max(
            self.graph_to_screen(area, rect.min),
            self.graph_to_screen(area, rect.max),
        )
    }

    pub fn screen_delta_to_graph(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Changes the zoom while keeping the graph point under `anchor` fixed.
    pub fn zoom_around(&mut self, area: Rect, anchor: Pos2, new_zoom: f32) {
        let graph_pos = (anchor - area.min - self.pan) / self.zoom;
        self.pan = anchor - area.min - graph_pos * new_zoom;
        self.zoom = new_zoom;
    }

    /// Resets an unusable zoom (zero, negative, NaN) to 100%.
    pub(crate) fn sanitize(&mut self) {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            self.zoom = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Pos2 {
        Pos2::new(x, y)
    }

    #[test]
    fn test_point_within_width_is_on_line() {
        assert!(is_point_on_line(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 2.0), 3.0));
        assert!(is_point_on_line(p(0.0, 0.0), p(10.0, 0.0), p(5.0, -2.9), 3.0));
    }

    #[test]
    fn test_point_at_exact_width_is_on_line() {
        assert!(is_point_on_line(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 3.0), 3.0));
    }

    #[test]
    fn test_point_beyond_width_is_not_on_line() {
        assert!(!is_point_on_line(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 3.1), 3.0));
    }

    #[test]
    fn test_point_outside_projection_range_is_rejected() {
        // Close to the infinite line but past either end of the segment.
        assert!(!is_point_on_line(p(0.0, 0.0), p(10.0, 0.0), p(-0.5, 0.0), 3.0));
        assert!(!is_point_on_line(p(0.0, 0.0), p(10.0, 0.0), p(10.5, 0.1), 3.0));
    }

    #[test]
    fn test_segment_endpoints_are_on_line() {
        assert!(is_point_on_line(p(1.0, 1.0), p(4.0, 5.0), p(1.0, 1.0), 0.5));
        assert!(is_point_on_line(p(1.0, 1.0), p(4.0, 5.0), p(4.0, 5.0), 0.5));
    }

    #[test]
    fn test_diagonal_segment_distance() {
        // Distance from (0, 2) to the line y = x is sqrt(2).
        let a = p(-5.0, -5.0);
        let b = p(5.0, 5.0);
        assert!(is_point_on_line(a, b, p(0.0, 2.0), 1.5));
        assert!(!is_point_on_line(a, b, p(0.0, 2.0), 1.4));
    }

    #[test]
    fn test_zero_length_segment_never_matches() {
        assert!(!is_point_on_line(p(2.0, 2.0), p(2.0, 2.0), p(2.0, 2.0), 10.0));
    }

    #[test]
    fn test_camera_round_trip() {
        let area = Rect::from_min_size(p(100.0, 50.0), Vec2::new(800.0, 600.0));
        let camera = Camera {
            pan: Vec2::new(30.0, -20.0),
            zoom: 2.0,
        };
        let graph = p(12.5, 40.0);
        let screen = camera.graph_to_screen(area, graph);
        assert_eq!(screen, p(100.0 + 30.0 + 25.0, 50.0 - 20.0 + 80.0));
        assert_eq!(camera.screen_to_graph(area, screen), graph);
    }

    #[test]
    fn test_zoom_around_keeps_anchor_fixed() {
        let area = Rect::from_min_size(p(0.0, 0.0), Vec2::new(800.0, 600.0));
        let mut camera = Camera::default();
        let anchor = p(200.0, 100.0);
        let before = camera.screen_to_graph(area, anchor);
        camera.zoom_around(area, anchor, 2.0);
        let after = camera.screen_to_graph(area, anchor);
        assert!((before - after).length() < 1e-4);
        assert_eq!(camera.zoom, 2.0);
    }

    #[test]
    fn test_sanitize_resets_invalid_zoom() {
        let mut camera = Camera {
            pan: Vec2::ZERO,
            zoom: 0.0,
        };
        camera.sanitize();
        assert_eq!(camera.zoom, 1.0);
        camera.zoom = f32::NAN;
        camera.sanitize();
        assert_eq!(camera.zoom, 1.0);
    }
}
