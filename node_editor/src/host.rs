//! egui host adapter: turns a frame of egui input into [`GuiEvent`]s and
//! draws through an [`egui::Painter`].

use egui::{Align2, Color32, FontId, PointerButton, Pos2, Rect, Shape, Stroke, StrokeKind};

use crate::canvas::{BoxStyle, Canvas};
use crate::editor::NodeEditor;
use crate::event::GuiEvent;

/// [`Canvas`] implementation over an egui painter.
pub struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a egui::Painter) -> Self {
        Self { painter }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn rect(&mut self, rect: Rect, style: &BoxStyle) {
        self.painter.rect(
            rect,
            style.rounding,
            style.fill,
            style.stroke,
            StrokeKind::Inside,
        );
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter.line_segment([from, to], stroke);
    }

    fn convex_polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.painter
            .add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }

    fn text(&mut self, anchor: Pos2, align: Align2, text: &str, size: f32, color: Color32) {
        self.painter
            .text(anchor, align, text, FontId::proportional(size), color);
    }
}

fn held_button(pointer: &egui::PointerState) -> Option<PointerButton> {
    if pointer.primary_down() {
        Some(PointerButton::Primary)
    } else if pointer.secondary_down() {
        Some(PointerButton::Secondary)
    } else if pointer.middle_down() {
        Some(PointerButton::Middle)
    } else {
        None
    }
}

/// Collects this frame's input for a canvas occupying `rect`.
///
/// Presses outside the canvas are ignored; releases, movement and keys are
/// always forwarded so gestures that leave the canvas still finish. Keys
/// are dropped while a text field has focus.
pub fn collect_events(ui: &egui::Ui, rect: Rect) -> Vec<GuiEvent> {
    let typing = ui.ctx().wants_keyboard_input();
    ui.input(|input| {
        let mut events = Vec::new();
        let hover = input.pointer.hover_pos();

        let delta = input.pointer.delta();
        if let Some(pos) = hover {
            if delta != egui::Vec2::ZERO {
                let event = match held_button(&input.pointer) {
                    Some(button) => GuiEvent::mouse_drag(pos, button, delta),
                    None => GuiEvent::mouse_move(pos, delta),
                };
                events.push(event.with_modifiers(input.modifiers));
            }
        }

        for event in &input.events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    modifiers,
                } => {
                    if *pressed && !rect.contains(*pos) {
                        continue;
                    }
                    let gui_event = if *pressed {
                        GuiEvent::mouse_down(*pos, *button)
                    } else {
                        GuiEvent::mouse_up(*pos, *button)
                    };
                    events.push(gui_event.with_modifiers(*modifiers));
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if !typing => {
                    let pos = hover.unwrap_or(rect.center());
                    events.push(GuiEvent::key_down(*key, pos).with_modifiers(*modifiers));
                }
                _ => {}
            }
        }

        if let Some(pos) = hover.filter(|p| rect.contains(*p)) {
            let scroll = input.smooth_scroll_delta;
            if scroll.y != 0.0 {
                events.push(GuiEvent::scroll(pos, scroll).with_modifiers(input.modifiers));
            }
        }

        events
    })
}

/// Shows the editor in the remaining space of `ui`. Returns whether the
/// editor asked for a repaint.
pub fn show_editor<T: 'static>(ui: &mut egui::Ui, editor: &mut NodeEditor<T>) -> bool {
    let available = ui.available_rect_before_wrap();
    let (response, painter) = ui.allocate_painter(available.size(), egui::Sense::click_and_drag());
    let rect = response.rect;

    let mut events = collect_events(ui, rect);
    events.push(GuiEvent::repaint());

    let mut canvas = PainterCanvas::new(&painter);
    let needs_repaint = editor.on_gui(rect, &mut events, &mut canvas);
    if needs_repaint {
        ui.ctx().request_repaint();
    }
    needs_repaint
}
