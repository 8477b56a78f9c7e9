//! Graph, selection, viewport and context-menu state owned by the editor.

use std::collections::HashSet;

use egui::{Pos2, Rect, Vec2};
use log::{debug, info};

use crate::error::NodeEditorError;
use crate::geometry::{Camera, is_point_on_line};
use crate::menu::ContextMenu;
use crate::mode::ModeId;
use crate::settings::EditorSettings;
use crate::theme::NodeEditorTheme;
use crate::types::{Connector, ConnectorId, GraphItem, Node, NodeId};

/// The context menu currently on screen.
#[derive(Debug)]
pub struct ActiveMenu {
    pub menu: ContextMenu,
    /// Input mode that opened the menu.
    pub owner: ModeId,
    /// Entity the menu was opened for.
    pub target: Option<GraphItem>,
}

/// A menu item picked by the user, queued for the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuCommand {
    pub command: String,
    pub target: Option<GraphItem>,
}

/// Everything an input mode may read or mutate.
///
/// Removing an entity also drops it from the selection and prunes every
/// connector that references it, so the selection is always a subset of
/// the live graph.
pub struct EditorState<T> {
    nodes: Vec<Node<T>>,
    connectors: Vec<Connector>,
    selected_nodes: HashSet<NodeId>,
    selected_connectors: HashSet<ConnectorId>,
    active_menu: Option<ActiveMenu>,
    menu_commands: Vec<MenuCommand>,
    pending_deactivations: Vec<ModeId>,
    pub camera: Camera,
    pub theme: NodeEditorTheme,
    pub settings: EditorSettings,
    /// Draw area of the current frame, in host window coordinates.
    area: Rect,
    /// Last known pointer position, in host window coordinates.
    pointer: Option<Pos2>,
    changed: bool,
}

impl<T> Default for EditorState<T> {
    fn default() -> Self {
        Self::new(NodeEditorTheme::default(), EditorSettings::default())
    }
}

impl<T> EditorState<T> {
    pub fn new(theme: NodeEditorTheme, settings: EditorSettings) -> Self {
        Self {
            nodes: Vec::new(),
            connectors: Vec::new(),
            selected_nodes: HashSet::new(),
            selected_connectors: HashSet::new(),
            active_menu: None,
            menu_commands: Vec::new(),
            pending_deactivations: Vec::new(),
            camera: Camera::default(),
            theme,
            settings: settings.validated(),
            area: Rect::ZERO,
            pointer: None,
            changed: false,
        }
    }

    // -----------------------------------------------------------------------
    // Graph
    // -----------------------------------------------------------------------

    /// Adds a node on top of the draw order.
    pub fn add_node(&mut self, mut node: Node<T>) -> NodeId {
        node.fit_to_content(&self.theme);
        let id = node.id();
        info!("Added {} ({})", id, node.title());
        self.nodes.push(node);
        self.changed = true;
        id
    }

    /// Removes a node with its connectors. No-op for unknown ids.
    /// Hosts go through [`crate::NodeEditor::remove_node`], which also runs
    /// the deactivations a closed menu queues.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<Node<T>> {
        let index = self.nodes.iter().position(|n| n.id() == id)?;
        let node = self.nodes.remove(index);
        self.selected_nodes.remove(&id);

        let dangling: Vec<ConnectorId> = self
            .connectors
            .iter()
            .filter(|c| c.touches(id))
            .map(|c| c.id())
            .collect();
        for connector_id in dangling {
            self.remove_connector(connector_id);
        }

        if self.context_menu_target() == Some(GraphItem::Node(id)) {
            self.clear_context_menu();
        }
        info!("Removed {}", id);
        self.changed = true;
        Some(node)
    }

    pub fn add_connector(&mut self, connector: Connector) -> Result<ConnectorId, NodeEditorError> {
        let (from, to) = (connector.from(), connector.to());
        for endpoint in [from, to] {
            if self.node(endpoint).is_none() {
                return Err(NodeEditorError::UnknownNode(endpoint));
            }
        }
        if from == to {
            return Err(NodeEditorError::SelfConnection(from));
        }
        if self
            .connectors
            .iter()
            .any(|c| c.from() == from && c.to() == to)
        {
            return Err(NodeEditorError::DuplicateConnector(from, to));
        }

        let id = connector.id();
        info!("Connected {} -> {} ({})", from, to, id);
        self.connectors.push(connector);
        self.changed = true;
        Ok(id)
    }

    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<ConnectorId, NodeEditorError> {
        self.add_connector(Connector::new(from, to))
    }

    /// Removes a connector. No-op for unknown ids.
    pub(crate) fn remove_connector(&mut self, id: ConnectorId) -> Option<Connector> {
        let index = self.connectors.iter().position(|c| c.id() == id)?;
        let connector = self.connectors.remove(index);
        self.selected_connectors.remove(&id);
        if self.context_menu_target() == Some(GraphItem::Connector(id)) {
            self.clear_context_menu();
        }
        self.changed = true;
        Some(connector)
    }

    /// Swaps the endpoints of a connector.
    pub fn reverse_connector(&mut self, id: ConnectorId) -> Result<(), NodeEditorError> {
        let connector = self
            .connectors
            .iter()
            .find(|c| c.id() == id)
            .ok_or(NodeEditorError::UnknownConnector(id))?;
        let (from, to) = (connector.from(), connector.to());
        if self
            .connectors
            .iter()
            .any(|c| c.from() == to && c.to() == from)
        {
            return Err(NodeEditorError::DuplicateConnector(to, from));
        }
        if let Some(connector) = self.connectors.iter_mut().find(|c| c.id() == id) {
            connector.reverse();
            self.changed = true;
        }
        Ok(())
    }

    /// Nodes in draw order (last is on top).
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Changes a node's title and refits its size. False for unknown ids.
    pub fn rename_node(&mut self, id: NodeId, title: impl Into<String>) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n.id() == id) else {
            return false;
        };
        let node = &mut self.nodes[index];
        node.title = title.into();
        node.fit_to_content(&self.theme);
        self.changed = true;
        true
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.changed = true;
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id() == id)
    }

    pub fn connector_mut(&mut self, id: ConnectorId) -> Option<&mut Connector> {
        self.changed = true;
        self.connectors.iter_mut().find(|c| c.id() == id)
    }

    pub fn contains(&self, item: GraphItem) -> bool {
        match item {
            GraphItem::Node(id) => self.node(id).is_some(),
            GraphItem::Connector(id) => self.connector(id).is_some(),
        }
    }

    /// Graph-space endpoints of a connector whose nodes are both visible.
    pub fn connector_endpoints(&self, connector: &Connector) -> Option<(Pos2, Pos2)> {
        let from = self.node(connector.from()).filter(|n| n.visible)?;
        let to = self.node(connector.to()).filter(|n| n.visible)?;
        Some((from.center(), to.center()))
    }

    // -----------------------------------------------------------------------
    // Hit testing
    // -----------------------------------------------------------------------

    /// Topmost visible node containing a graph-space point.
    pub fn node_at(&self, point: Pos2) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.visible && n.rect().contains(point))
            .map(|n| n.id())
    }

    /// Topmost connector passing within the hit width of a graph-space point.
    pub fn connector_at(&self, point: Pos2) -> Option<ConnectorId> {
        let width = self.settings.connector_hit_width / self.camera.zoom;
        self.connectors
            .iter()
            .rev()
            .find(|c| {
                self.connector_endpoints(c)
                    .is_some_and(|(a, b)| is_point_on_line(a, b, point, width))
            })
            .map(|c| c.id())
    }

    pub fn node_under_mouse(&self, screen: Pos2) -> Option<NodeId> {
        self.node_at(self.screen_to_graph(screen))
    }

    pub fn connector_under_mouse(&self, screen: Pos2) -> Option<ConnectorId> {
        self.connector_at(self.screen_to_graph(screen))
    }

    pub fn item_menu(&self, item: GraphItem) -> Option<&ContextMenu> {
        let menu = match item {
            GraphItem::Node(id) => self.node(id)?.context_menu.as_ref(),
            GraphItem::Connector(id) => self.connector(id)?.context_menu.as_ref(),
        };
        menu.filter(|m| !m.is_empty())
    }

    pub fn has_context_menu(&self, item: GraphItem) -> bool {
        self.item_menu(item).is_some()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn is_selectable(&self, item: GraphItem) -> bool {
        match item {
            GraphItem::Node(id) => self.node(id).is_some_and(|n| n.selectable && n.visible),
            GraphItem::Connector(id) => self.connector(id).is_some_and(|c| c.selectable),
        }
    }

    /// Adds an item to the selection. Returns false when it is not
    /// selectable or already selected.
    pub fn select(&mut self, item: GraphItem) -> bool {
        if !self.is_selectable(item) {
            return false;
        }
        let inserted = match item {
            GraphItem::Node(id) => self.selected_nodes.insert(id),
            GraphItem::Connector(id) => self.selected_connectors.insert(id),
        };
        self.changed |= inserted;
        inserted
    }

    pub fn deselect(&mut self, item: GraphItem) -> bool {
        let removed = match item {
            GraphItem::Node(id) => self.selected_nodes.remove(&id),
            GraphItem::Connector(id) => self.selected_connectors.remove(&id),
        };
        self.changed |= removed;
        removed
    }

    pub fn toggle_selection(&mut self, item: GraphItem) {
        if !self.deselect(item) {
            self.select(item);
        }
    }

    pub fn unselect_all(&mut self) {
        if !self.selected_nodes.is_empty() || !self.selected_connectors.is_empty() {
            self.selected_nodes.clear();
            self.selected_connectors.clear();
            self.changed = true;
        }
    }

    /// Makes `item` the only selected entity.
    pub fn select_only(&mut self, item: GraphItem) {
        self.unselect_all();
        self.select(item);
    }

    pub fn is_selected(&self, item: GraphItem) -> bool {
        match item {
            GraphItem::Node(id) => self.selected_nodes.contains(&id),
            GraphItem::Connector(id) => self.selected_connectors.contains(&id),
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_nodes.is_empty() || !self.selected_connectors.is_empty()
    }

    /// Selected nodes in draw order.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .map(|n| n.id())
            .filter(|id| self.selected_nodes.contains(id))
            .collect()
    }

    pub fn selected_connectors(&self) -> Vec<ConnectorId> {
        self.connectors
            .iter()
            .map(|c| c.id())
            .filter(|id| self.selected_connectors.contains(id))
            .collect()
    }

    /// Moves every selected, draggable node by a graph-space delta.
    pub fn translate_selected_nodes(&mut self, delta: Vec2) {
        for node in self.nodes.iter_mut() {
            if node.draggable && self.selected_nodes.contains(&node.id()) {
                node.position += delta;
                self.changed = true;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Context menu
    // -----------------------------------------------------------------------

    /// Makes `menu` the active menu, hiding and returning the one it replaces.
    ///
    /// The replaced menu's owner is notified through the hide notification
    /// and unsubscribed, so at most one menu is ever active.
    pub fn change_active_context_menu(
        &mut self,
        mut menu: ContextMenu,
        owner: ModeId,
        target: Option<GraphItem>,
    ) -> Option<ContextMenu> {
        let displaced = self.active_menu.take().map(|mut previous| {
            for listener in previous.menu.hide() {
                if listener != owner {
                    self.pending_deactivations.push(listener);
                }
            }
            previous.menu.unsubscribe_hidden(previous.owner);
            previous.menu
        });

        menu.subscribe_hidden(owner);
        debug!("Context menu opened by {:?} for {:?}", owner, target);
        self.active_menu = Some(ActiveMenu {
            menu,
            owner,
            target,
        });
        self.changed = true;
        displaced
    }

    /// Hides the active menu, if any, and notifies its subscribers.
    pub fn clear_context_menu(&mut self) {
        if let Some(mut active) = self.active_menu.take() {
            let listeners = active.menu.hide();
            self.pending_deactivations.extend(listeners);
            debug!("Context menu closed ({:?})", active.target);
            self.changed = true;
        }
    }

    /// Drops the active menu if `owner` opened it. Safe to call when no menu
    /// is active or another mode owns it.
    pub fn release_context_menu(&mut self, owner: ModeId) {
        let owned = self
            .active_menu
            .as_ref()
            .is_some_and(|active| active.owner == owner);
        if !owned {
            return;
        }
        if let Some(mut active) = self.active_menu.take() {
            active.menu.unsubscribe_hidden(owner);
            let listeners = active.menu.hide();
            self.pending_deactivations.extend(listeners);
            self.changed = true;
        }
    }

    pub fn active_context_menu(&self) -> Option<&ActiveMenu> {
        self.active_menu.as_ref()
    }

    pub fn context_menu_target(&self) -> Option<GraphItem> {
        self.active_menu.as_ref().and_then(|a| a.target)
    }

    /// The node whose context menu is open.
    pub fn node_under_context_menu(&self) -> Option<NodeId> {
        self.context_menu_target().and_then(|t| t.as_node())
    }

    pub fn connector_under_context_menu(&self) -> Option<ConnectorId> {
        self.context_menu_target().and_then(|t| t.as_connector())
    }

    pub(crate) fn push_menu_command(&mut self, command: MenuCommand) {
        info!("Menu command {:?} for {:?}", command.command, command.target);
        self.menu_commands.push(command);
    }

    pub fn take_menu_commands(&mut self) -> Vec<MenuCommand> {
        std::mem::take(&mut self.menu_commands)
    }

    pub(crate) fn take_pending_deactivations(&mut self) -> Vec<ModeId> {
        std::mem::take(&mut self.pending_deactivations)
    }

    // -----------------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------------

    pub fn area(&self) -> Rect {
        self.area
    }

    pub(crate) fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn pointer(&self) -> Option<Pos2> {
        self.pointer
    }

    pub(crate) fn set_pointer(&mut self, pointer: Pos2) {
        self.pointer = Some(pointer);
    }

    pub fn screen_to_graph(&self, screen: Pos2) -> Pos2 {
        self.camera.screen_to_graph(self.area, screen)
    }

    pub fn graph_to_screen(&self, graph: Pos2) -> Pos2 {
        self.camera.graph_to_screen(self.area, graph)
    }

    pub fn graph_rect_to_screen(&self, rect: Rect) -> Rect {
        self.camera.graph_rect_to_screen(self.area, rect)
    }

    /// Flags that the next frame must be repainted.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub(crate) fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}
