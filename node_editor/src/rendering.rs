//! Node and connector drawing primitives.

use egui::{Align2, Pos2, Rect, Stroke};

use crate::canvas::Canvas;
use crate::drawing::arrow_triangle;
use crate::theme::{NodeEditorTheme, style};

/// Draw a node body and its centred title at a screen rectangle.
pub(crate) fn draw_node(
    canvas: &mut dyn Canvas,
    theme: &NodeEditorTheme,
    rect: Rect,
    title: &str,
    is_selected: bool,
    zoom: f32,
) {
    let mut body = theme.style(if is_selected {
        style::NODE_SELECTED
    } else {
        style::NODE
    });
    body.rounding *= zoom;
    canvas.rect(rect, &body);

    canvas.text(
        rect.center(),
        Align2::CENTER_CENTER,
        title,
        theme.title_size * zoom,
        theme.title_color,
    );
}

/// Draw a connector between two screen points with a direction marker at
/// its midpoint.
pub(crate) fn draw_connector(
    canvas: &mut dyn Canvas,
    theme: &NodeEditorTheme,
    from: Pos2,
    to: Pos2,
    is_selected: bool,
    zoom: f32,
) {
    let color = if is_selected {
        theme.connector_selected_color
    } else {
        theme.connector_color
    };
    canvas.line(from, to, Stroke::new(theme.connector_width, color));

    let direction = to - from;
    if direction.length_sq() > 0.0 {
        let mid = from + direction * 0.5;
        let points = arrow_triangle(mid, direction, theme.arrow_size * zoom);
        canvas.convex_polygon(points.to_vec(), color);
    }
}
