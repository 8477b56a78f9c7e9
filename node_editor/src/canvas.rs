//! The drawing surface the editor renders onto.

use egui::{Align2, Color32, Pos2, Rect, Stroke};

/// Fill, outline and corner rounding for a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxStyle {
    pub fill: Color32,
    pub stroke: Stroke,
    pub rounding: f32,
}

impl BoxStyle {
    pub fn filled(fill: Color32) -> Self {
        Self {
            fill,
            stroke: Stroke::NONE,
            rounding: 0.0,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_rounding(mut self, rounding: f32) -> Self {
        self.rounding = rounding;
        self
    }
}

/// Primitive drawing operations, in screen coordinates.
pub trait Canvas {
    fn rect(&mut self, rect: Rect, style: &BoxStyle);

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn convex_polygon(&mut self, points: Vec<Pos2>, fill: Color32);

    fn text(&mut self, anchor: Pos2, align: Align2, text: &str, size: f32, color: Color32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        style: BoxStyle,
    },
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Pos2>,
        fill: Color32,
    },
    Text {
        anchor: Pos2,
        align: Align2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// A canvas that records every call, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn polygon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count()
    }

    pub fn rects_with_style(&self, style: &BoxStyle) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, style: s } if s == style => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn rect(&mut self, rect: Rect, style: &BoxStyle) {
        self.commands.push(DrawCommand::Rect {
            rect,
            style: *style,
        });
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn convex_polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.commands.push(DrawCommand::Polygon { points, fill });
    }

    fn text(&mut self, anchor: Pos2, align: Align2, text: &str, size: f32, color: Color32) {
        self.commands.push(DrawCommand::Text {
            anchor,
            align,
            text: text.to_string(),
            size,
            color,
        });
    }
}
