//! The input-mode abstraction the editor dispatches events through.

use std::ops::{Deref, DerefMut};

use egui::Pos2;

use crate::canvas::Canvas;
use crate::event::GuiEvent;
use crate::menu::ContextMenu;
use crate::state::EditorState;
use crate::types::GraphItem;

/// Handle of an input mode registered with a [`crate::NodeEditor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeId(usize);

impl ModeId {
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// An interaction handler with an `Inactive -> Active -> Inactive` lifecycle.
///
/// Each event the editor first runs [`InputMode::before_editor_events`] on
/// active modes and [`InputMode::should_activate`] on inactive ones, in
/// ascending priority, then offers the event to every active mode's
/// event hook in the same order. Once a mode calls
/// [`GuiEvent::use_event`] the remaining modes do not see the event.
///
/// Modes decide their own exclusivity through `should_activate`; nothing
/// stops a mode from consuming every event.
pub trait InputMode<T> {
    fn name(&self) -> &'static str;

    /// Predicate checked for inactive modes on every unconsumed event.
    fn should_activate(&self, _state: &EditorState<T>, _event: &GuiEvent) -> bool {
        false
    }

    /// Runs for active modes before any mode's event hooks.
    fn before_editor_events(&mut self, _ctx: &mut ModeContext<'_, T>, _event: &mut GuiEvent) {}

    /// `event` is the triggering event, or `None` when the host activated
    /// the mode directly.
    fn on_activated(&mut self, _ctx: &mut ModeContext<'_, T>, _event: Option<&mut GuiEvent>) {}

    fn on_deactivated(&mut self, _ctx: &mut ModeContext<'_, T>) {}

    fn on_mouse_down(&mut self, _ctx: &mut ModeContext<'_, T>, _event: &mut GuiEvent) {}

    fn on_mouse_up(&mut self, _ctx: &mut ModeContext<'_, T>, _event: &mut GuiEvent) {}

    fn on_mouse_drag(&mut self, _ctx: &mut ModeContext<'_, T>, _event: &mut GuiEvent) {}

    fn on_mouse_move(&mut self, _ctx: &mut ModeContext<'_, T>, _event: &mut GuiEvent) {}

    fn on_key_down(&mut self, _ctx: &mut ModeContext<'_, T>, _event: &mut GuiEvent) {}

    /// Draws on top of the graph while the mode is active.
    fn draw_overlay(&self, _state: &EditorState<T>, _canvas: &mut dyn Canvas) {}
}

/// Mutable view of the editor handed to a running mode hook.
pub struct ModeContext<'a, T> {
    state: &'a mut EditorState<T>,
    mode: ModeId,
    deactivate_requested: bool,
}

impl<'a, T> ModeContext<'a, T> {
    pub(crate) fn new(state: &'a mut EditorState<T>, mode: ModeId) -> Self {
        Self {
            state,
            mode,
            deactivate_requested: false,
        }
    }

    pub fn mode_id(&self) -> ModeId {
        self.mode
    }

    /// Returns the running mode to `Inactive` once the current hook returns.
    pub fn deactivate(&mut self) {
        self.deactivate_requested = true;
    }

    pub(crate) fn deactivate_requested(&self) -> bool {
        self.deactivate_requested
    }

    /// Shows `menu` at `position` as the editor's active menu, owned by the
    /// running mode, which is subscribed to its hide notification.
    pub fn open_context_menu(&mut self, mut menu: ContextMenu, target: GraphItem, position: Pos2) {
        menu.show(position);
        let _ = self
            .state
            .change_active_context_menu(menu, self.mode, Some(target));
    }

    /// Unsubscribes from and drops the active menu if this mode owns it.
    pub fn release_context_menu(&mut self) {
        self.state.release_context_menu(self.mode);
    }
}

impl<T> Deref for ModeContext<'_, T> {
    type Target = EditorState<T>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl<T> DerefMut for ModeContext<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}
