//! Theming for the node editor.

use egui::{Color32, Stroke};

use crate::canvas::BoxStyle;

/// Names accepted by [`NodeEditorTheme::style`].
pub mod style {
    pub const BACKGROUND: &str = "background";
    pub const NODE: &str = "node";
    pub const NODE_SELECTED: &str = "node_selected";
    pub const MENU: &str = "menu";
    pub const MENU_ITEM_HOVER: &str = "menu_item_hover";
    pub const SELECTION_BOX: &str = "selection_box";
}

/// Theme configuration for the node editor.
#[derive(Clone, Debug)]
pub struct NodeEditorTheme {
    /// Minimum node width in graph units.
    pub node_min_width: f32,
    /// Node height in graph units.
    pub node_height: f32,
    /// Horizontal padding around the title.
    pub node_padding: f32,
    /// Approximate advance of one title character, used to size nodes.
    pub title_char_width: f32,
    pub title_size: f32,
    /// Corner rounding for nodes.
    pub node_rounding: f32,
    /// Background color.
    pub background_color: Color32,
    /// Grid line color.
    pub grid_color: Color32,
    /// Node body color (unselected).
    pub node_body_color: Color32,
    /// Node body color (selected).
    pub node_body_selected_color: Color32,
    pub node_border_color: Color32,
    /// Selection outline color.
    pub selection_color: Color32,
    pub title_color: Color32,
    /// Connection color (default).
    pub connector_color: Color32,
    /// Connection color (selected).
    pub connector_selected_color: Color32,
    /// Rubber band drawn while a connection is being made.
    pub connector_pending_color: Color32,
    pub connector_width: f32,
    /// Half-length of the direction triangle drawn on connectors.
    pub arrow_size: f32,
    pub menu_width: f32,
    pub menu_item_height: f32,
    pub menu_separator_height: f32,
    pub menu_padding: f32,
    pub menu_text_size: f32,
    pub menu_color: Color32,
    pub menu_hover_color: Color32,
    pub menu_text_color: Color32,
    pub menu_disabled_text_color: Color32,
}

impl Default for NodeEditorTheme {
    fn default() -> Self {
        Self {
            node_min_width: 120.0,
            node_height: 40.0,
            node_padding: 12.0,
            title_char_width: 7.0,
            title_size: 12.0,
            node_rounding: 4.0,
            background_color: Color32::from_rgb(30, 30, 30),
            grid_color: Color32::from_rgb(40, 40, 40),
            node_body_color: Color32::from_rgb(45, 45, 50),
            node_body_selected_color: Color32::from_rgb(55, 55, 65),
            node_border_color: Color32::from_rgb(70, 70, 80),
            selection_color: Color32::from_rgb(100, 150, 255),
            title_color: Color32::WHITE,
            connector_color: Color32::from_rgb(180, 180, 180),
            connector_selected_color: Color32::from_rgb(100, 150, 255),
            connector_pending_color: Color32::from_rgb(200, 200, 200),
            connector_width: 2.0,
            arrow_size: 8.0,
            menu_width: 180.0,
            menu_item_height: 22.0,
            menu_separator_height: 7.0,
            menu_padding: 4.0,
            menu_text_size: 12.0,
            menu_color: Color32::from_rgb(50, 50, 55),
            menu_hover_color: Color32::from_rgb(70, 90, 140),
            menu_text_color: Color32::from_rgb(220, 220, 220),
            menu_disabled_text_color: Color32::from_rgb(120, 120, 120),
        }
    }
}

impl NodeEditorTheme {
    /// Resolves a named box style. Unknown names fall back to the node style.
    pub fn style(&self, name: &str) -> BoxStyle {
        match name {
            style::BACKGROUND => BoxStyle::filled(self.background_color),
            style::NODE_SELECTED => BoxStyle::filled(self.node_body_selected_color)
                .with_stroke(Stroke::new(2.0, self.selection_color))
                .with_rounding(self.node_rounding),
            style::MENU => BoxStyle::filled(self.menu_color)
                .with_stroke(Stroke::new(1.0, self.node_border_color))
                .with_rounding(3.0),
            style::MENU_ITEM_HOVER => BoxStyle::filled(self.menu_hover_color).with_rounding(2.0),
            style::SELECTION_BOX => {
                BoxStyle::filled(Color32::from_rgba_unmultiplied(100, 150, 255, 30))
                    .with_stroke(Stroke::new(1.0, self.selection_color))
            }
            _ => BoxStyle::filled(self.node_body_color)
                .with_stroke(Stroke::new(1.0, self.node_border_color))
                .with_rounding(self.node_rounding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_style_falls_back_to_node() {
        let theme = NodeEditorTheme::default();
        assert_eq!(theme.style("no_such_style"), theme.style(style::NODE));
    }

    #[test]
    fn test_selected_node_style_differs() {
        let theme = NodeEditorTheme::default();
        assert_ne!(theme.style(style::NODE), theme.style(style::NODE_SELECTED));
    }
}
