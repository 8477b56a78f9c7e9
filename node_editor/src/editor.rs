//! The editor: owns the graph state and dispatches input to the mode stack.

use egui::{Key, PointerButton, Rect};
use log::debug;

use crate::canvas::Canvas;
use crate::drawing::draw_grid;
use crate::error::NodeEditorError;
use crate::event::{EventKind, GuiEvent};
use crate::menu::ContextMenu;
use crate::mode::{InputMode, ModeContext, ModeId};
use crate::rendering;
use crate::settings::EditorSettings;
use crate::state::{EditorState, MenuCommand};
use crate::theme::{NodeEditorTheme, style};
use crate::types::{ConnectorId, GraphItem, Node, NodeId};

struct ModeSlot<T> {
    id: ModeId,
    priority: i32,
    active: bool,
    mode: Box<dyn InputMode<T>>,
}

/// Runs one hook on a mode, then applies a deactivation it requested.
fn run_hook<T, F>(slot: &mut ModeSlot<T>, state: &mut EditorState<T>, hook: F)
where
    F: FnOnce(&mut dyn InputMode<T>, &mut ModeContext<'_, T>),
{
    let requested = {
        let mut ctx = ModeContext::new(state, slot.id);
        hook(slot.mode.as_mut(), &mut ctx);
        ctx.deactivate_requested()
    };
    if requested && slot.active {
        slot.active = false;
        let mut ctx = ModeContext::new(state, slot.id);
        slot.mode.on_deactivated(&mut ctx);
        debug!("Input mode {} deactivated", slot.mode.name());
    }
}

fn dispatch<T>(mode: &mut dyn InputMode<T>, ctx: &mut ModeContext<'_, T>, event: &mut GuiEvent) {
    match event.kind {
        EventKind::MouseDown => mode.on_mouse_down(ctx, event),
        EventKind::MouseUp => mode.on_mouse_up(ctx, event),
        EventKind::MouseDrag => mode.on_mouse_drag(ctx, event),
        EventKind::MouseMove => mode.on_mouse_move(ctx, event),
        EventKind::KeyDown(_) => mode.on_key_down(ctx, event),
        EventKind::Scroll | EventKind::Repaint => {}
    }
}

/// A node graph editor driven once per frame by its host.
pub struct NodeEditor<T> {
    state: EditorState<T>,
    /// Sorted by ascending priority; equal priorities keep registration order.
    modes: Vec<ModeSlot<T>>,
    next_mode_id: usize,
}

impl<T: 'static> Default for NodeEditor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> NodeEditor<T> {
    pub fn new() -> Self {
        Self::with_config(NodeEditorTheme::default(), EditorSettings::default())
    }

    pub fn with_config(theme: NodeEditorTheme, settings: EditorSettings) -> Self {
        Self {
            state: EditorState::new(theme, settings),
            modes: Vec::new(),
            next_mode_id: 0,
        }
    }

    pub fn state(&self) -> &EditorState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState<T> {
        &mut self.state
    }

    // -----------------------------------------------------------------------
    // Graph
    // -----------------------------------------------------------------------

    pub fn add_node(&mut self, node: Node<T>) -> NodeId {
        self.state.add_node(node)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Node<T>> {
        let removed = self.state.remove_node(id);
        self.flush_deactivations();
        removed
    }

    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<ConnectorId, NodeEditorError> {
        self.state.connect(from, to)
    }

    pub fn remove_connector(&mut self, id: ConnectorId) {
        self.state.remove_connector(id);
        self.flush_deactivations();
    }

    pub fn node_under_mouse(&self, screen: egui::Pos2) -> Option<NodeId> {
        self.state.node_under_mouse(screen)
    }

    pub fn connector_under_mouse(&self, screen: egui::Pos2) -> Option<ConnectorId> {
        self.state.connector_under_mouse(screen)
    }

    pub fn node_under_context_menu(&self) -> Option<NodeId> {
        self.state.node_under_context_menu()
    }

    pub fn select(&mut self, item: GraphItem) -> bool {
        self.state.select(item)
    }

    pub fn deselect(&mut self, item: GraphItem) -> bool {
        self.state.deselect(item)
    }

    pub fn unselect_all(&mut self) {
        self.state.unselect_all();
    }

    pub fn take_menu_commands(&mut self) -> Vec<MenuCommand> {
        self.state.take_menu_commands()
    }

    // -----------------------------------------------------------------------
    // Input modes
    // -----------------------------------------------------------------------

    /// Registers a mode. Lower priorities see events first.
    pub fn enable_input_mode<M>(&mut self, mode: M, priority: i32) -> ModeId
    where
        M: InputMode<T> + 'static,
    {
        let id = ModeId::from_raw(self.next_mode_id);
        self.next_mode_id += 1;
        let index = self
            .modes
            .iter()
            .position(|slot| slot.priority > priority)
            .unwrap_or(self.modes.len());
        debug!("Enabled input mode {} at priority {}", mode.name(), priority);
        self.modes.insert(
            index,
            ModeSlot {
                id,
                priority,
                active: false,
                mode: Box::new(mode),
            },
        );
        id
    }

    pub fn enable_default_input_mode<M>(&mut self, priority: i32) -> ModeId
    where
        M: InputMode<T> + Default + 'static,
    {
        self.enable_input_mode(M::default(), priority)
    }

    /// Deactivates and unregisters a mode.
    pub fn disable_input_mode(&mut self, id: ModeId) -> bool {
        self.deactivate_mode(id);
        let before = self.modes.len();
        self.modes.retain(|slot| slot.id != id);
        before != self.modes.len()
    }

    /// Arms a mode from outside the event flow, e.g. from a menu command.
    pub fn activate_mode(&mut self, id: ModeId) {
        let Some(slot) = self.modes.iter_mut().find(|s| s.id == id) else {
            return;
        };
        if slot.active {
            return;
        }
        slot.active = true;
        debug!("Input mode {} activated by host", slot.mode.name());
        run_hook(slot, &mut self.state, |mode, ctx| mode.on_activated(ctx, None));
        self.flush_deactivations();
    }

    pub fn deactivate_mode(&mut self, id: ModeId) {
        if let Some(slot) = self.modes.iter_mut().find(|s| s.id == id) {
            run_hook(slot, &mut self.state, |_, ctx| ctx.deactivate());
        }
        self.flush_deactivations();
    }

    pub fn is_mode_active(&self, id: ModeId) -> bool {
        self.modes.iter().any(|s| s.id == id && s.active)
    }

    /// Registered modes in dispatch order.
    pub fn mode_order(&self) -> Vec<ModeId> {
        self.modes.iter().map(|s| s.id).collect()
    }

    /// See [`EditorState::change_active_context_menu`]. The displaced menu's
    /// owner is deactivated before this returns.
    pub fn change_active_context_menu(
        &mut self,
        menu: ContextMenu,
        owner: ModeId,
        target: Option<GraphItem>,
    ) -> Option<ContextMenu> {
        let displaced = self.state.change_active_context_menu(menu, owner, target);
        self.flush_deactivations();
        displaced
    }

    pub fn clear_context_menu(&mut self) {
        self.state.clear_context_menu();
        self.flush_deactivations();
    }

    fn flush_deactivations(&mut self) {
        loop {
            let pending = self.state.take_pending_deactivations();
            if pending.is_empty() {
                break;
            }
            for id in pending {
                if let Some(slot) = self.modes.iter_mut().find(|s| s.id == id) {
                    run_hook(slot, &mut self.state, |_, ctx| ctx.deactivate());
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per-frame entry points
    // -----------------------------------------------------------------------

    /// Handles this frame's events, then draws. Returns whether the host
    /// should repaint.
    pub fn on_gui(&mut self, area: Rect, events: &mut [GuiEvent], canvas: &mut dyn Canvas) -> bool {
        let mut needs_repaint = false;
        for event in events.iter_mut() {
            needs_repaint |= self.handle_event(area, event);
        }
        self.draw(area, canvas);
        needs_repaint
    }

    /// Routes one event through the active menu, the viewport and the mode
    /// stack. Returns whether anything visible changed.
    pub fn handle_event(&mut self, area: Rect, event: &mut GuiEvent) -> bool {
        self.state.set_area(area);
        self.state.camera.sanitize();
        if event.is_pointer_event() {
            self.state.set_pointer(event.position);
        }

        self.handle_menu_event(event);
        self.handle_viewport_event(area, event);

        // Phase 1: let active modes see the event first and inactive ones
        // decide whether it activates them.
        for slot in self.modes.iter_mut() {
            if event.is_used() {
                break;
            }
            if slot.active {
                run_hook(slot, &mut self.state, |mode, ctx| {
                    mode.before_editor_events(ctx, event)
                });
            } else if slot.mode.should_activate(&self.state, event) {
                slot.active = true;
                debug!("Input mode {} activated", slot.mode.name());
                run_hook(slot, &mut self.state, |mode, ctx| {
                    mode.on_activated(ctx, Some(&mut *event))
                });
            }
        }
        self.flush_deactivations();

        // Phase 2: event hooks, in priority order, until one uses the event.
        for slot in self.modes.iter_mut() {
            if event.is_used() {
                break;
            }
            if !slot.active {
                continue;
            }
            run_hook(slot, &mut self.state, |mode, ctx| dispatch(mode, ctx, event));
        }
        self.flush_deactivations();

        let changed = self.state.take_changed();
        changed || event.is_used()
    }

    fn handle_menu_event(&mut self, event: &mut GuiEvent) {
        let Some(active) = self.state.active_context_menu() else {
            return;
        };
        if !active.menu.is_visible() {
            return;
        }

        match event.kind {
            EventKind::MouseDown => {
                let theme = &self.state.theme;
                let inside = active
                    .menu
                    .rect(theme)
                    .is_some_and(|r| r.contains(event.position));
                let picked = active
                    .menu
                    .item_at(event.position, theme)
                    .and_then(|i| active.menu.command(i))
                    .map(|command| MenuCommand {
                        command: command.to_string(),
                        target: active.target,
                    });

                event.use_event();
                if let Some(command) = picked {
                    self.state.push_menu_command(command);
                    self.clear_context_menu();
                } else if !inside {
                    self.clear_context_menu();
                }
            }
            EventKind::KeyDown(Key::Escape) => {
                event.use_event();
                self.clear_context_menu();
            }
            EventKind::MouseUp if event.button == Some(PointerButton::Secondary) => {
                // The release of the click that opened the menu.
                event.use_event();
            }
            EventKind::MouseMove => self.state.mark_changed(),
            _ => {}
        }
    }

    fn handle_viewport_event(&mut self, area: Rect, event: &mut GuiEvent) {
        if event.is_used() {
            return;
        }
        match event.kind {
            EventKind::MouseDrag if event.button == Some(PointerButton::Middle) => {
                self.state.camera.pan += event.delta;
                self.state.mark_changed();
                event.use_event();
            }
            EventKind::Scroll if event.delta.y != 0.0 => {
                let settings = &self.state.settings;
                let new_zoom = settings
                    .clamp_zoom(self.state.camera.zoom + event.delta.y * settings.zoom_speed);
                self.state
                    .camera
                    .zoom_around(area, event.position, new_zoom);
                self.state.mark_changed();
                event.use_event();
            }
            _ => {}
        }
    }

    /// Draws background, nodes, connectors, mode overlays and the active menu.
    pub fn draw(&self, area: Rect, canvas: &mut dyn Canvas) {
        let state = &self.state;
        let theme = &state.theme;
        let zoom = state.camera.zoom;

        canvas.rect(area, &theme.style(style::BACKGROUND));
        if state.settings.show_grid {
            draw_grid(
                canvas,
                area,
                state.camera.pan,
                theme.grid_color,
                state.settings.grid_spacing * zoom,
            );
        }

        for node in state.nodes().iter().filter(|n| n.visible) {
            let rect = state.camera.graph_rect_to_screen(area, node.rect());
            let selected = state.is_selected(GraphItem::Node(node.id()));
            rendering::draw_node(canvas, theme, rect, node.title(), selected, zoom);
        }

        for connector in state.connectors() {
            let Some((from, to)) = state.connector_endpoints(connector) else {
                continue;
            };
            let selected = state.is_selected(GraphItem::Connector(connector.id()));
            rendering::draw_connector(
                canvas,
                theme,
                state.camera.graph_to_screen(area, from),
                state.camera.graph_to_screen(area, to),
                selected,
                zoom,
            );
        }

        for slot in self.modes.iter().filter(|s| s.active) {
            slot.mode.draw_overlay(state, canvas);
        }

        if let Some(active) = state.active_context_menu() {
            active.menu.draw(canvas, theme, state.pointer());
        }
    }
}
