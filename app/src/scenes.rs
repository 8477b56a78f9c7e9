//! Scene-transition authoring on top of the node editor: scenes are nodes,
//! transitions are connectors.

use eframe::egui::Pos2;
use log::{info, warn};
use node_editor::modes::{
    BoxSelectMode, ConnectNodeMode, ConnectorRightClickMode, ConnectorSelectMode,
    DeleteSelectionMode, NodeDragMode, NodeRightClickMode, NodeSelectMode,
};
use node_editor::{
    Connector, ContextMenu, EditorSettings, GraphItem, MenuCommand, ModeId, Node, NodeEditor,
    NodeEditorTheme, NodeId,
};

pub const MAKE_TRANSITION: &str = "make_transition";
pub const DELETE_SCENE: &str = "delete_scene";
pub const REVERSE_TRANSITION: &str = "reverse_transition";
pub const DELETE_TRANSITION: &str = "delete_transition";

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: String,
}

pub fn scene_menu() -> ContextMenu {
    ContextMenu::new()
        .with_item("Make Transition", MAKE_TRANSITION)
        .with_separator()
        .with_item("Delete Scene", DELETE_SCENE)
}

pub fn transition_menu() -> ContextMenu {
    ContextMenu::new()
        .with_item("Reverse", REVERSE_TRANSITION)
        .with_item("Delete Transition", DELETE_TRANSITION)
}

pub struct SceneGraph {
    editor: NodeEditor<Scene>,
    connect_mode: ModeId,
}

impl SceneGraph {
    /// Builds an empty graph with the full interaction stack enabled.
    pub fn new(settings: EditorSettings) -> Self {
        let mut editor = NodeEditor::with_config(NodeEditorTheme::default(), settings);
        let connect_mode = editor.enable_input_mode(
            ConnectNodeMode::new().with_connector_menu(transition_menu()),
            0,
        );
        editor.enable_default_input_mode::<NodeRightClickMode>(10);
        editor.enable_default_input_mode::<ConnectorRightClickMode>(11);
        // Selection runs before dragging so a press on an unselected scene
        // selects it and starts the drag in the same event.
        editor.enable_default_input_mode::<NodeSelectMode>(20);
        editor.enable_default_input_mode::<ConnectorSelectMode>(21);
        editor.enable_default_input_mode::<NodeDragMode>(30);
        editor.enable_default_input_mode::<BoxSelectMode>(40);
        editor.enable_default_input_mode::<DeleteSelectionMode>(50);
        Self {
            editor,
            connect_mode,
        }
    }

    /// A small starter graph shown on launch.
    pub fn demo(settings: EditorSettings) -> Self {
        let mut graph = Self::new(settings);
        let title = graph.add_scene("Title Screen", Pos2::new(80.0, 120.0));
        let level = graph.add_scene("Level 1", Pos2::new(360.0, 60.0));
        let game_over = graph.add_scene("Game Over", Pos2::new(360.0, 220.0));
        for (from, to) in [(title, level), (level, game_over), (game_over, title)] {
            graph.add_transition(from, to);
        }
        graph
    }

    pub fn editor(&self) -> &NodeEditor<Scene> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut NodeEditor<Scene> {
        &mut self.editor
    }

    pub fn add_scene(&mut self, name: &str, position: Pos2) -> NodeId {
        let scene = Scene {
            name: name.to_string(),
        };
        self.editor
            .add_node(Node::new(name, position, scene).with_context_menu(scene_menu()))
    }

    pub fn add_transition(&mut self, from: NodeId, to: NodeId) {
        let connector = Connector::new(from, to).with_context_menu(transition_menu());
        if let Err(e) = self.editor.state_mut().add_connector(connector) {
            warn!("Failed to add transition: {}", e);
        }
    }

    /// True while the editor waits for the clicks of a new transition.
    pub fn is_connecting(&self) -> bool {
        self.editor.is_mode_active(self.connect_mode)
    }

    pub fn scene_count(&self) -> usize {
        self.editor.state().nodes().len()
    }

    /// Transitions as `(from, to)` scene names, in draw order.
    pub fn transitions(&self) -> Vec<(String, String)> {
        let state = self.editor.state();
        let name = |id: NodeId| state.node(id).map(|n| n.data.name.clone());
        state
            .connectors()
            .iter()
            .filter_map(|c| Some((name(c.from())?, name(c.to())?)))
            .collect()
    }

    /// Executes the menu picks queued since the last call.
    pub fn apply_menu_commands(&mut self) -> usize {
        let commands = self.editor.take_menu_commands();
        let count = commands.len();
        for command in commands {
            self.apply(command);
        }
        count
    }

    fn apply(&mut self, command: MenuCommand) {
        match (command.command.as_str(), command.target) {
            (MAKE_TRANSITION, _) => {
                info!("Pick the source scene, then the destination");
                self.editor.activate_mode(self.connect_mode);
            }
            (DELETE_SCENE, Some(GraphItem::Node(id))) => {
                if let Some(node) = self.editor.remove_node(id) {
                    info!("Deleted scene {}", node.data.name);
                }
            }
            (REVERSE_TRANSITION, Some(GraphItem::Connector(id))) => {
                if let Err(e) = self.editor.state_mut().reverse_connector(id) {
                    warn!("Failed to reverse transition: {}", e);
                }
            }
            (DELETE_TRANSITION, Some(GraphItem::Connector(id))) => {
                self.editor.remove_connector(id);
            }
            (other, target) => warn!("Unhandled menu command {} for {:?}", other, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{PointerButton, Rect, Vec2};
    use node_editor::GuiEvent;

    fn area() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    fn send(graph: &mut SceneGraph, mut event: GuiEvent) {
        graph.editor_mut().handle_event(area(), &mut event);
    }

    fn click(graph: &mut SceneGraph, at: Pos2, button: PointerButton) {
        send(graph, GuiEvent::mouse_down(at, button));
        send(graph, GuiEvent::mouse_up(at, button));
    }

    fn pick_menu_item(graph: &mut SceneGraph, index: usize) {
        let at = {
            let state = graph.editor().state();
            let menu = &state.active_context_menu().unwrap().menu;
            menu.item_rect(index, &state.theme).unwrap().center()
        };
        click(graph, at, PointerButton::Primary);
        graph.apply_menu_commands();
    }

    fn two_scenes() -> SceneGraph {
        let mut graph = SceneGraph::new(EditorSettings::default());
        graph.add_scene("Intro", Pos2::new(100.0, 100.0));
        graph.add_scene("Outro", Pos2::new(400.0, 100.0));
        graph
    }

    #[test]
    fn test_make_transition_from_scene_menu() {
        let mut graph = two_scenes();

        click(&mut graph, Pos2::new(150.0, 120.0), PointerButton::Secondary);
        pick_menu_item(&mut graph, 0);
        assert!(graph.is_connecting());

        click(&mut graph, Pos2::new(150.0, 120.0), PointerButton::Primary);
        click(&mut graph, Pos2::new(450.0, 120.0), PointerButton::Primary);

        assert!(!graph.is_connecting());
        assert_eq!(
            graph.transitions(),
            vec![("Intro".to_string(), "Outro".to_string())]
        );
    }

    #[test]
    fn test_transition_menu_reverses_and_deletes() {
        let mut graph = two_scenes();
        let ids: Vec<_> = graph.editor().state().nodes().iter().map(|n| n.id()).collect();
        graph.add_transition(ids[0], ids[1]);

        // The line runs between the centres at y = 120.
        click(&mut graph, Pos2::new(300.0, 120.0), PointerButton::Secondary);
        pick_menu_item(&mut graph, 0);
        assert_eq!(
            graph.transitions(),
            vec![("Outro".to_string(), "Intro".to_string())]
        );

        click(&mut graph, Pos2::new(300.0, 120.0), PointerButton::Secondary);
        pick_menu_item(&mut graph, 1);
        assert!(graph.transitions().is_empty());
    }

    #[test]
    fn test_delete_scene_drops_its_transitions() {
        let mut graph = SceneGraph::demo(EditorSettings::default());
        assert_eq!(graph.transitions().len(), 3);

        // "Title Screen" sits at (80, 120).
        click(&mut graph, Pos2::new(100.0, 130.0), PointerButton::Secondary);
        // Entry 1 is the separator.
        pick_menu_item(&mut graph, 2);

        assert_eq!(graph.scene_count(), 2);
        assert_eq!(
            graph.transitions(),
            vec![("Level 1".to_string(), "Game Over".to_string())]
        );
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let mut graph = two_scenes();
        graph.apply(MenuCommand {
            command: "teleport".to_string(),
            target: None,
        });
        assert_eq!(graph.scene_count(), 2);
    }
}
