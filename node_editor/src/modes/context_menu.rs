use std::marker::PhantomData;

use egui::{PointerButton, Pos2};

use crate::event::GuiEvent;
use crate::mode::{InputMode, ModeContext};
use crate::state::EditorState;
use crate::types::GraphItem;

/// Which kind of entity a [`ContextMenuInput`] opens menus for.
pub trait MenuTargets {
    const NAME: &'static str;

    fn item_under<T>(state: &EditorState<T>, screen: Pos2) -> Option<GraphItem>;
}

#[derive(Debug, Default)]
pub struct NodeMenus;

impl MenuTargets for NodeMenus {
    const NAME: &'static str = "node_right_click";

    fn item_under<T>(state: &EditorState<T>, screen: Pos2) -> Option<GraphItem> {
        state.node_under_mouse(screen).map(GraphItem::Node)
    }
}

#[derive(Debug, Default)]
pub struct ConnectorMenus;

impl MenuTargets for ConnectorMenus {
    const NAME: &'static str = "connector_right_click";

    fn item_under<T>(state: &EditorState<T>, screen: Pos2) -> Option<GraphItem> {
        state.connector_under_mouse(screen).map(GraphItem::Connector)
    }
}

/// Opens an entity's context menu on right-click.
///
/// Activates only when the entity under the pointer carries a non-empty
/// menu; otherwise the click is left for lower-priority modes. The clicked
/// entity becomes the sole selection unless it is already selected. The
/// mode stays active until the menu is hidden.
#[derive(Debug)]
pub struct ContextMenuInput<S> {
    target: Option<GraphItem>,
    _targets: PhantomData<S>,
}

pub type NodeRightClickMode = ContextMenuInput<NodeMenus>;
pub type ConnectorRightClickMode = ContextMenuInput<ConnectorMenus>;

impl<S> Default for ContextMenuInput<S> {
    fn default() -> Self {
        Self {
            target: None,
            _targets: PhantomData,
        }
    }
}

impl<S> ContextMenuInput<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity whose menu this mode currently has open.
    pub fn target(&self) -> Option<GraphItem> {
        self.target
    }
}

impl<T, S: MenuTargets> InputMode<T> for ContextMenuInput<S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn should_activate(&self, state: &EditorState<T>, event: &GuiEvent) -> bool {
        event.is_mouse_down(PointerButton::Secondary)
            && S::item_under(state, event.position).is_some_and(|item| state.has_context_menu(item))
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_, T>, event: Option<&mut GuiEvent>) {
        let Some(event) = event else {
            ctx.deactivate();
            return;
        };
        let Some(item) = S::item_under::<T>(ctx, event.position) else {
            ctx.deactivate();
            return;
        };
        let Some(menu) = ctx.item_menu(item).cloned() else {
            ctx.deactivate();
            return;
        };

        if ctx.is_selectable(item) && !ctx.is_selected(item) {
            ctx.select_only(item);
        }
        ctx.open_context_menu(menu, item, event.position);
        self.target = Some(item);
        event.use_event();
    }

    fn on_deactivated(&mut self, ctx: &mut ModeContext<'_, T>) {
        self.target = None;
        ctx.release_context_menu();
    }
}
