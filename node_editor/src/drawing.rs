//! Drawing utilities for the node editor.

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use crate::canvas::Canvas;

/// Draw a background grid.
pub fn draw_grid(canvas: &mut dyn Canvas, rect: Rect, pan: Vec2, color: Color32, spacing: f32) {
    if !(spacing.is_finite() && spacing > 1.0) {
        return;
    }
    let start_x = rect.min.x + pan.x.rem_euclid(spacing);
    let start_y = rect.min.y + pan.y.rem_euclid(spacing);

    let mut x = start_x;
    while x < rect.max.x {
        canvas.line(
            Pos2::new(x, rect.min.y),
            Pos2::new(x, rect.max.y),
            Stroke::new(1.0, color),
        );
        x += spacing;
    }

    let mut y = start_y;
    while y < rect.max.y {
        canvas.line(
            Pos2::new(rect.min.x, y),
            Pos2::new(rect.max.x, y),
            Stroke::new(1.0, color),
        );
        y += spacing;
    }
}

/// Triangle centred on `center` pointing along `direction`.
pub fn arrow_triangle(center: Pos2, direction: Vec2, size: f32) -> [Pos2; 3] {
    let dir = direction.normalized();
    let side = dir.rot90() * (size * 0.6);
    let back = center - dir * (size * 0.5);
    [center + dir * size, back + side, back - side]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_grid_lines_cover_rect() {
        let mut canvas = RecordingCanvas::new();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 50.0));
        draw_grid(&mut canvas, rect, Vec2::ZERO, Color32::GRAY, 25.0);
        // x = 0, 25, 50, 75 and y = 0, 25
        assert_eq!(canvas.commands.len(), 6);
    }

    #[test]
    fn test_grid_offset_follows_negative_pan() {
        let mut canvas = RecordingCanvas::new();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(30.0, 1.0));
        draw_grid(&mut canvas, rect, Vec2::new(-5.0, 0.0), Color32::GRAY, 10.0);
        let first = canvas.commands.first().cloned();
        match first {
            Some(DrawCommand::Line { from, .. }) => assert_eq!(from.x, 5.0),
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_spacing_draws_nothing() {
        let mut canvas = RecordingCanvas::new();
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0));
        draw_grid(&mut canvas, rect, Vec2::ZERO, Color32::GRAY, 0.0);
        assert!(canvas.commands.is_empty());
    }

    #[test]
    fn test_arrow_points_along_direction() {
        let [tip, left, right] = arrow_triangle(Pos2::new(10.0, 10.0), Vec2::new(3.0, 0.0), 4.0);
        assert_eq!(tip, Pos2::new(14.0, 10.0));
        assert_eq!(left.x, 8.0);
        assert_eq!(right.x, 8.0);
        assert!((left.y - right.y).abs() > 0.0);
    }
}
