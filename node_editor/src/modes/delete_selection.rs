use egui::Key;

use crate::event::GuiEvent;
use crate::mode::{InputMode, ModeContext};
use crate::state::EditorState;

/// Delete/Backspace removes every selected node and connector.
#[derive(Debug, Default)]
pub struct DeleteSelectionMode;

impl<T> InputMode<T> for DeleteSelectionMode {
    fn name(&self) -> &'static str {
        "delete_selection"
    }

    fn should_activate(&self, state: &EditorState<T>, event: &GuiEvent) -> bool {
        (event.is_key_down(Key::Delete) || event.is_key_down(Key::Backspace))
            && state.has_selection()
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_, T>, event: Option<&mut GuiEvent>) {
        for id in ctx.selected_connectors() {
            ctx.remove_connector(id);
        }
        for id in ctx.selected_nodes() {
            ctx.remove_node(id);
        }
        if let Some(event) = event {
            event.use_event();
        }
        ctx.deactivate();
    }
}
