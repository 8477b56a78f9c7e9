use egui::PointerButton;

use crate::event::GuiEvent;
use crate::mode::{InputMode, ModeContext};
use crate::state::EditorState;
use crate::types::GraphItem;

fn starts_on_selected_node<T>(state: &EditorState<T>, event: &GuiEvent) -> bool {
    if !event.is_mouse_down(PointerButton::Primary) {
        return false;
    }
    state
        .node_under_mouse(event.position)
        .and_then(|id| state.node(id))
        .is_some_and(|node| node.draggable && state.is_selected(GraphItem::Node(node.id())))
}

/// Moves the selected nodes while the primary button is held on one of
/// them. Screen deltas are divided by the zoom factor.
#[derive(Debug, Default)]
pub struct NodeDragMode {
    moved: bool,
}

impl<T> InputMode<T> for NodeDragMode {
    fn name(&self) -> &'static str {
        "node_drag"
    }

    fn should_activate(&self, state: &EditorState<T>, event: &GuiEvent) -> bool {
        starts_on_selected_node(state, event)
    }

    fn on_activated(&mut self, _ctx: &mut ModeContext<'_, T>, _event: Option<&mut GuiEvent>) {
        self.moved = false;
    }

    /// A new press while still active means the previous release was lost.
    fn before_editor_events(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        if !event.is_mouse_down(PointerButton::Primary) {
            return;
        }
        if starts_on_selected_node::<T>(ctx, event) {
            self.moved = false;
        } else {
            ctx.deactivate();
        }
    }

    fn on_mouse_drag(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        if event.button != Some(PointerButton::Primary) {
            return;
        }
        let delta = ctx.camera.screen_delta_to_graph(event.delta);
        ctx.translate_selected_nodes(delta);
        self.moved = true;
        event.use_event();
    }

    fn on_mouse_up(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        if event.button != Some(PointerButton::Primary) {
            return;
        }
        if self.moved {
            event.use_event();
        }
        ctx.deactivate();
    }
}
