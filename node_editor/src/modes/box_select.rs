use egui::{PointerButton, Pos2, Rect};

use crate::canvas::Canvas;
use crate::event::GuiEvent;
use crate::mode::{InputMode, ModeContext};
use crate::state::EditorState;
use crate::theme::style;
use crate::types::GraphItem;

/// Rubber-band selection started by a primary press on empty space.
///
/// The box only counts once the drag has covered
/// `EditorSettings::box_select_threshold` screen pixels; on release every
/// node intersecting it is selected. Ctrl/shift/command adds to the
/// current selection instead of replacing it.
#[derive(Debug, Default)]
pub struct BoxSelectMode {
    /// Drag origin in graph space.
    start: Option<Pos2>,
    /// Current corner in graph space.
    current: Pos2,
    spanning: bool,
}

impl BoxSelectMode {
    fn graph_rect(&self) -> Option<Rect> {
        self.start.map(|start| Rect::from_two_pos(start, self.current))
    }

    fn anchor(&mut self, start: Pos2) {
        self.start = Some(start);
        self.current = start;
        self.spanning = false;
    }
}

fn starts_on_empty_space<T>(state: &EditorState<T>, event: &GuiEvent) -> bool {
    event.is_mouse_down(PointerButton::Primary)
        && state.node_under_mouse(event.position).is_none()
        && state.connector_under_mouse(event.position).is_none()
}

impl<T> InputMode<T> for BoxSelectMode {
    fn name(&self) -> &'static str {
        "box_select"
    }

    fn should_activate(&self, state: &EditorState<T>, event: &GuiEvent) -> bool {
        starts_on_empty_space(state, event)
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_, T>, event: Option<&mut GuiEvent>) {
        let Some(event) = event else {
            ctx.deactivate();
            return;
        };
        self.anchor(ctx.screen_to_graph(event.position));
    }

    /// A new press while still active means the previous release was lost.
    fn before_editor_events(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        if !event.is_mouse_down(PointerButton::Primary) {
            return;
        }
        if starts_on_empty_space::<T>(ctx, event) {
            self.anchor(ctx.screen_to_graph(event.position));
        } else {
            ctx.deactivate();
        }
    }

    fn on_deactivated(&mut self, _ctx: &mut ModeContext<'_, T>) {
        self.start = None;
        self.spanning = false;
    }

    fn on_mouse_drag(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        if event.button != Some(PointerButton::Primary) {
            return;
        }
        let Some(start) = self.start else {
            return;
        };
        self.current = ctx.screen_to_graph(event.position);
        if !self.spanning {
            let travelled = (self.current - start).length() * ctx.camera.zoom;
            self.spanning = travelled >= ctx.settings.box_select_threshold;
        }
        if self.spanning {
            ctx.mark_changed();
            event.use_event();
        }
    }

    fn on_mouse_up(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        if event.button != Some(PointerButton::Primary) {
            return;
        }
        if self.spanning {
            if let Some(rect) = self.graph_rect() {
                if !event.is_additive() {
                    ctx.unselect_all();
                }
                let hits: Vec<_> = ctx
                    .nodes()
                    .iter()
                    .filter(|n| n.visible && n.rect().intersects(rect))
                    .map(|n| n.id())
                    .collect();
                for id in hits {
                    ctx.select(GraphItem::Node(id));
                }
            }
            event.use_event();
        }
        ctx.deactivate();
    }

    fn draw_overlay(&self, state: &EditorState<T>, canvas: &mut dyn Canvas) {
        if !self.spanning {
            return;
        }
        if let Some(rect) = self.graph_rect() {
            canvas.rect(
                state.graph_rect_to_screen(rect),
                &state.theme.style(style::SELECTION_BOX),
            );
        }
    }
}
