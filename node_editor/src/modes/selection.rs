use egui::PointerButton;

use crate::event::GuiEvent;
use crate::mode::{InputMode, ModeContext};
use crate::state::EditorState;
use crate::types::GraphItem;

/// Click selection shared by the node and connector modes.
///
/// With ctrl/shift/command the clicked item is toggled. Without a modifier
/// an unselected item becomes the sole selection and an already selected
/// one keeps the current selection so it can be dragged as a group.
fn click_select<T>(ctx: &mut ModeContext<'_, T>, item: GraphItem, event: &GuiEvent) {
    if !ctx.is_selectable(item) {
        return;
    }
    if event.is_additive() {
        ctx.toggle_selection(item);
    } else if !ctx.is_selected(item) {
        ctx.select_only(item);
    }
}

fn is_empty_space<T>(state: &EditorState<T>, event: &GuiEvent) -> bool {
    state.node_under_mouse(event.position).is_none()
        && state.connector_under_mouse(event.position).is_none()
}

/// Single-click node selection. A click on empty space clears the
/// selection unless a modifier is held. Never consumes the event.
#[derive(Debug, Default)]
pub struct NodeSelectMode;

impl<T> InputMode<T> for NodeSelectMode {
    fn name(&self) -> &'static str {
        "node_select"
    }

    fn should_activate(&self, _state: &EditorState<T>, event: &GuiEvent) -> bool {
        event.is_mouse_down(PointerButton::Primary)
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_, T>, event: Option<&mut GuiEvent>) {
        if let Some(event) = event {
            if let Some(id) = ctx.node_under_mouse(event.position) {
                click_select(ctx, GraphItem::Node(id), event);
            } else if is_empty_space::<T>(ctx, event) && !event.is_additive() {
                ctx.unselect_all();
            }
        }
        ctx.deactivate();
    }
}

/// Single-click connector selection; nodes on top of a connector win.
#[derive(Debug, Default)]
pub struct ConnectorSelectMode;

impl<T> InputMode<T> for ConnectorSelectMode {
    fn name(&self) -> &'static str {
        "connector_select"
    }

    fn should_activate(&self, _state: &EditorState<T>, event: &GuiEvent) -> bool {
        event.is_mouse_down(PointerButton::Primary)
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_, T>, event: Option<&mut GuiEvent>) {
        if let Some(event) = event {
            if ctx.node_under_mouse(event.position).is_none() {
                if let Some(id) = ctx.connector_under_mouse(event.position) {
                    click_select(ctx, GraphItem::Connector(id), event);
                } else if !event.is_additive() {
                    ctx.unselect_all();
                }
            }
        }
        ctx.deactivate();
    }
}
