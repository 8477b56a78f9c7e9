use egui::{Key, PointerButton, Stroke};
use log::{debug, info, warn};

use crate::canvas::Canvas;
use crate::event::{EventKind, GuiEvent};
use crate::menu::ContextMenu;
use crate::mode::{InputMode, ModeContext};
use crate::state::EditorState;
use crate::types::{Connector, NodeId};

/// Two-click connector creation, armed by the host with
/// [`crate::NodeEditor::activate_mode`].
///
/// The first click on a node records the source, the second click on a
/// different node creates the connector. A click on empty space, a
/// right-click or Escape cancels. While armed the mode consumes every
/// mouse press before lower-priority modes can react to it.
#[derive(Debug, Default)]
pub struct ConnectNodeMode {
    source: Option<NodeId>,
    connector_menu: Option<ContextMenu>,
}

impl ConnectNodeMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context menu given to every connector this mode creates.
    pub fn with_connector_menu(mut self, menu: ContextMenu) -> Self {
        self.connector_menu = Some(menu);
        self
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    fn finish<T>(&mut self, ctx: &mut ModeContext<'_, T>, source: NodeId, target: NodeId) {
        let mut connector = Connector::new(source, target);
        if let Some(menu) = &self.connector_menu {
            connector = connector.with_context_menu(menu.clone());
        }
        match ctx.add_connector(connector) {
            Ok(id) => info!("Created {} from {} to {}", id, source, target),
            Err(e) => warn!("Failed to create connector: {}", e),
        }
        ctx.deactivate();
    }
}

impl<T> InputMode<T> for ConnectNodeMode {
    fn name(&self) -> &'static str {
        "connect_nodes"
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_, T>, _event: Option<&mut GuiEvent>) {
        self.source = None;
        ctx.mark_changed();
    }

    fn on_deactivated(&mut self, ctx: &mut ModeContext<'_, T>) {
        self.source = None;
        ctx.mark_changed();
    }

    fn before_editor_events(&mut self, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
        match event.kind {
            EventKind::MouseDown if event.button == Some(PointerButton::Primary) => {
                event.use_event();
                match (self.source, ctx.node_under_mouse(event.position)) {
                    (_, None) => {
                        debug!("Connection cancelled");
                        ctx.deactivate();
                    }
                    (None, Some(node)) => {
                        self.source = Some(node);
                        ctx.mark_changed();
                    }
                    (Some(source), Some(node)) if source == node => {}
                    (Some(source), Some(node)) => self.finish(ctx, source, node),
                }
            }
            EventKind::MouseDown if event.button == Some(PointerButton::Secondary) => {
                event.use_event();
                ctx.deactivate();
            }
            EventKind::KeyDown(Key::Escape) => {
                event.use_event();
                ctx.deactivate();
            }
            EventKind::MouseMove | EventKind::MouseDrag if self.source.is_some() => {
                ctx.mark_changed();
            }
            _ => {}
        }
    }

    fn draw_overlay(&self, state: &EditorState<T>, canvas: &mut dyn Canvas) {
        let Some(source) = self.source.and_then(|id| state.node(id)) else {
            return;
        };
        let Some(pointer) = state.pointer() else {
            return;
        };
        canvas.line(
            state.graph_to_screen(source.center()),
            pointer,
            Stroke::new(state.theme.connector_width, state.theme.connector_pending_color),
        );
    }
}
