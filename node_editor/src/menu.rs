//! Context menus attached to nodes and connectors.

use egui::{Align2, Pos2, Rect, Stroke, Vec2};

use crate::canvas::Canvas;
use crate::mode::ModeId;
use crate::theme::{NodeEditorTheme, style};

#[derive(Clone, Debug, PartialEq)]
pub enum MenuEntry {
    Item {
        label: String,
        /// Command id reported to the host when the item is picked.
        command: String,
        enabled: bool,
    },
    Separator,
}

/// A popup menu with a show/hide lifecycle.
///
/// Input modes subscribe to the hide notification; [`ContextMenu::hide`]
/// returns the subscribers so the editor can deactivate them.
#[derive(Clone, Debug, Default)]
pub struct ContextMenu {
    entries: Vec<MenuEntry>,
    /// Screen position of the top-left corner while visible.
    position: Option<Pos2>,
    hidden_listeners: Vec<ModeId>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, label: impl Into<String>, command: impl Into<String>) -> Self {
        self.add_item(label, command);
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.add_separator();
        self
    }

    pub fn add_item(&mut self, label: impl Into<String>, command: impl Into<String>) {
        self.entries.push(MenuEntry::Item {
            label: label.into(),
            command: command.into(),
            enabled: true,
        });
    }

    pub fn add_disabled_item(&mut self, label: impl Into<String>) {
        self.entries.push(MenuEntry::Item {
            label: label.into(),
            command: String::new(),
            enabled: false,
        });
    }

    pub fn add_separator(&mut self) {
        self.entries.push(MenuEntry::Separator);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// A menu without any item (separators do not count) is never opened.
    pub fn is_empty(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|e| matches!(e, MenuEntry::Item { .. }))
    }

    pub fn show(&mut self, position: Pos2) {
        self.position = Some(position);
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<Pos2> {
        self.position
    }

    /// Hides the menu and returns the modes to notify. Hiding an already
    /// hidden menu notifies nobody.
    #[must_use = "hidden listeners must be notified"]
    pub fn hide(&mut self) -> Vec<ModeId> {
        match self.position.take() {
            Some(_) => self.hidden_listeners.clone(),
            None => Vec::new(),
        }
    }

    pub fn subscribe_hidden(&mut self, mode: ModeId) {
        if !self.hidden_listeners.contains(&mode) {
            self.hidden_listeners.push(mode);
        }
    }

    pub fn unsubscribe_hidden(&mut self, mode: ModeId) {
        self.hidden_listeners.retain(|m| *m != mode);
    }

    pub fn hidden_listeners(&self) -> &[ModeId] {
        &self.hidden_listeners
    }

    pub fn command(&self, index: usize) -> Option<&str> {
        match self.entries.get(index)? {
            MenuEntry::Item {
                command, enabled, ..
            } if *enabled => Some(command.as_str()),
            _ => None,
        }
    }

    fn entry_height(entry: &MenuEntry, theme: &NodeEditorTheme) -> f32 {
        match entry {
            MenuEntry::Item { .. } => theme.menu_item_height,
            MenuEntry::Separator => theme.menu_separator_height,
        }
    }

    /// Screen rectangle of the whole popup while visible.
    pub fn rect(&self, theme: &NodeEditorTheme) -> Option<Rect> {
        let pos = self.position?;
        let height: f32 = self
            .entries
            .iter()
            .map(|e| Self::entry_height(e, theme))
            .sum::<f32>()
            + theme.menu_padding * 2.0;
        Some(Rect::from_min_size(pos, Vec2::new(theme.menu_width, height)))
    }

    /// Screen rectangle of one entry while visible.
    pub fn item_rect(&self, index: usize, theme: &NodeEditorTheme) -> Option<Rect> {
        let pos = self.position?;
        let entry = self.entries.get(index)?;
        let top: f32 = self.entries[..index]
            .iter()
            .map(|e| Self::entry_height(e, theme))
            .sum();
        Some(Rect::from_min_size(
            Pos2::new(pos.x, pos.y + theme.menu_padding + top),
            Vec2::new(theme.menu_width, Self::entry_height(entry, theme)),
        ))
    }

    /// Index of the enabled item under `point`, if any.
    pub fn item_at(&self, point: Pos2, theme: &NodeEditorTheme) -> Option<usize> {
        (0..self.entries.len()).find(|&i| {
            self.command(i).is_some()
                && self
                    .item_rect(i, theme)
                    .is_some_and(|r| r.contains(point))
        })
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, theme: &NodeEditorTheme, pointer: Option<Pos2>) {
        let Some(menu_rect) = self.rect(theme) else {
            return;
        };
        canvas.rect(menu_rect, &theme.style(style::MENU));

        let hovered = pointer.and_then(|p| self.item_at(p, theme));
        for (i, entry) in self.entries.iter().enumerate() {
            let Some(rect) = self.item_rect(i, theme) else {
                continue;
            };
            match entry {
                MenuEntry::Item { label, enabled, .. } => {
                    if hovered == Some(i) {
                        canvas.rect(rect.shrink(1.0), &theme.style(style::MENU_ITEM_HOVER));
                    }
                    let color = if *enabled {
                        theme.menu_text_color
                    } else {
                        theme.menu_disabled_text_color
                    };
                    canvas.text(
                        Pos2::new(rect.min.x + 8.0, rect.center().y),
                        Align2::LEFT_CENTER,
                        label,
                        theme.menu_text_size,
                        color,
                    );
                }
                MenuEntry::Separator => {
                    let y = rect.center().y;
                    canvas.line(
                        Pos2::new(rect.min.x + 4.0, y),
                        Pos2::new(rect.max.x - 4.0, y),
                        Stroke::new(1.0, theme.node_border_color),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    fn sample_menu() -> ContextMenu {
        let mut menu = ContextMenu::new()
            .with_item("Open", "open")
            .with_separator();
        menu.add_disabled_item("Locked");
        menu.add_item("Delete", "delete");
        menu
    }

    #[test]
    fn test_hidden_menu_has_no_geometry() {
        let theme = NodeEditorTheme::default();
        let menu = sample_menu();
        assert!(!menu.is_visible());
        assert!(menu.rect(&theme).is_none());
        assert!(menu.item_at(Pos2::ZERO, &theme).is_none());
    }

    #[test]
    fn test_item_at_skips_separators_and_disabled_items() {
        let theme = NodeEditorTheme::default();
        let mut menu = sample_menu();
        menu.show(Pos2::new(10.0, 10.0));

        let open = menu.item_rect(0, &theme).unwrap();
        let separator = menu.item_rect(1, &theme).unwrap();
        let locked = menu.item_rect(2, &theme).unwrap();
        let delete = menu.item_rect(3, &theme).unwrap();

        assert_eq!(menu.item_at(open.center(), &theme), Some(0));
        assert_eq!(menu.item_at(separator.center(), &theme), None);
        assert_eq!(menu.item_at(locked.center(), &theme), None);
        assert_eq!(menu.item_at(delete.center(), &theme), Some(3));
        assert_eq!(menu.command(3), Some("delete"));
        assert_eq!(menu.command(2), None);
    }

    #[test]
    fn test_hide_notifies_subscribers_once() {
        let mut menu = sample_menu();
        menu.subscribe_hidden(ModeId::from_raw(1));
        menu.subscribe_hidden(ModeId::from_raw(1));
        menu.subscribe_hidden(ModeId::from_raw(2));
        menu.show(Pos2::ZERO);

        assert_eq!(
            menu.hide(),
            vec![ModeId::from_raw(1), ModeId::from_raw(2)]
        );
        assert!(menu.hide().is_empty());
    }

    #[test]
    fn test_unsubscribe_removes_listener() {
        let mut menu = sample_menu();
        menu.subscribe_hidden(ModeId::from_raw(7));
        menu.unsubscribe_hidden(ModeId::from_raw(7));
        menu.show(Pos2::ZERO);
        assert!(menu.hide().is_empty());
    }

    #[test]
    fn test_menu_of_separators_is_empty() {
        let menu = ContextMenu::new().with_separator();
        assert!(menu.is_empty());
        assert!(!sample_menu().is_empty());
    }

    #[test]
    fn test_draw_renders_every_label() {
        let theme = NodeEditorTheme::default();
        let mut menu = sample_menu();
        menu.show(Pos2::new(5.0, 5.0));
        let mut canvas = RecordingCanvas::new();
        menu.draw(&mut canvas, &theme, None);
        let labels: Vec<&str> = canvas.texts().collect();
        assert_eq!(labels, vec!["Open", "Locked", "Delete"]);
    }
}
