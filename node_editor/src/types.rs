//! Graph entities: nodes and the connectors between them.

use std::fmt;

use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::menu::ContextMenu;
use crate::theme::NodeEditorTheme;

/// Identifier of a node inside a [`crate::NodeEditor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Identifier of a connector inside a [`crate::NodeEditor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectorId(Uuid);

impl ConnectorId {
    fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector:{}", self.0)
    }
}

/// Anything the editor can select or attach a context menu to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphItem {
    Node(NodeId),
    Connector(ConnectorId),
}

impl GraphItem {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            GraphItem::Node(id) => Some(*id),
            GraphItem::Connector(_) => None,
        }
    }

    pub fn as_connector(&self) -> Option<ConnectorId> {
        match self {
            GraphItem::Connector(id) => Some(*id),
            GraphItem::Node(_) => None,
        }
    }
}

/// A positioned box in graph space carrying an opaque payload.
///
/// The hit-test rectangle is `position .. position + size`. The size is
/// derived from the title when the node is added to an editor and again on
/// [`crate::EditorState::rename_node`]; the title is read-only otherwise.
#[derive(Debug)]
pub struct Node<T> {
    id: NodeId,
    pub(crate) title: String,
    pub position: Pos2,
    size: Vec2,
    pub data: T,
    pub context_menu: Option<ContextMenu>,
    /// Hidden nodes are neither drawn nor hit.
    pub visible: bool,
    pub selectable: bool,
    pub draggable: bool,
}

impl<T> Node<T> {
    pub fn new(title: impl Into<String>, position: Pos2, data: T) -> Self {
        Self {
            id: NodeId::new_v4(),
            title: title.into(),
            position,
            size: Vec2::ZERO,
            data,
            context_menu: None,
            visible: true,
            selectable: true,
            draggable: true,
        }
    }

    pub fn with_context_menu(mut self, menu: ContextMenu) -> Self {
        self.context_menu = Some(menu);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Hit-test rectangle in graph space.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }

    /// True when a non-empty context menu is attached.
    pub fn has_context_menu(&self) -> bool {
        self.context_menu.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Recomputes the size from the title using the theme's text metrics.
    pub fn fit_to_content(&mut self, theme: &NodeEditorTheme) {
        let text_w = self.title.chars().count() as f32 * theme.title_char_width;
        self.size = Vec2::new(
            (text_w + theme.node_padding * 2.0).max(theme.node_min_width),
            theme.node_height,
        );
    }
}

/// A directed edge between two nodes. Endpoints are ids, not owned nodes.
#[derive(Clone, Debug)]
pub struct Connector {
    id: ConnectorId,
    from: NodeId,
    to: NodeId,
    pub context_menu: Option<ContextMenu>,
    pub selectable: bool,
}

impl Connector {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            id: ConnectorId::new_v4(),
            from,
            to,
            context_menu: None,
            selectable: true,
        }
    }

    pub fn with_context_menu(mut self, menu: ContextMenu) -> Self {
        self.context_menu = Some(menu);
        self
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    pub(crate) fn reverse(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn has_context_menu(&self) -> bool {
        self.context_menu.as_ref().is_some_and(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_content_respects_minimum_width() {
        let theme = NodeEditorTheme::default();
        let mut node = Node::new("A", Pos2::ZERO, ());
        node.fit_to_content(&theme);
        assert_eq!(node.size().x, theme.node_min_width);
        assert_eq!(node.size().y, theme.node_height);
    }

    #[test]
    fn test_fit_to_content_grows_with_title() {
        let theme = NodeEditorTheme::default();
        let mut short = Node::new("A", Pos2::ZERO, ());
        let mut long = Node::new("A".repeat(60), Pos2::ZERO, ());
        short.fit_to_content(&theme);
        long.fit_to_content(&theme);
        assert!(long.size().x > short.size().x);
        assert_eq!(
            long.size().x,
            60.0 * theme.title_char_width + theme.node_padding * 2.0
        );
    }

    #[test]
    fn test_connector_reverse_swaps_endpoints() {
        let a = Node::new("a", Pos2::ZERO, ()).id();
        let b = Node::new("b", Pos2::ZERO, ()).id();
        let mut c = Connector::new(a, b);
        c.reverse();
        assert_eq!((c.from(), c.to()), (b, a));
        assert!(c.touches(a) && c.touches(b));
    }

    #[test]
    fn test_empty_menu_is_not_a_context_menu() {
        let node = Node::new("a", Pos2::ZERO, ()).with_context_menu(ContextMenu::new());
        assert!(!node.has_context_menu());
    }
}
