//! Raw per-frame input events handed to the editor by the host.

use egui::{Key, Modifiers, PointerButton, Pos2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseDrag,
    Scroll,
    KeyDown(Key),
    Repaint,
}

/// One input event in the host window's local coordinates.
///
/// Handlers call [`GuiEvent::use_event`] to mark it consumed; the editor
/// stops offering a consumed event to further input modes.
#[derive(Clone, Debug)]
pub struct GuiEvent {
    pub kind: EventKind,
    pub button: Option<PointerButton>,
    pub modifiers: Modifiers,
    pub position: Pos2,
    /// Pointer movement for drag/move events, scroll amount for scroll events.
    pub delta: Vec2,
    used: bool,
}

impl GuiEvent {
    fn new(kind: EventKind, position: Pos2) -> Self {
        Self {
            kind,
            button: None,
            modifiers: Modifiers::NONE,
            position,
            delta: Vec2::ZERO,
            used: false,
        }
    }

    pub fn mouse_down(position: Pos2, button: PointerButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(EventKind::MouseDown, position)
        }
    }

    pub fn mouse_up(position: Pos2, button: PointerButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(EventKind::MouseUp, position)
        }
    }

    pub fn mouse_drag(position: Pos2, button: PointerButton, delta: Vec2) -> Self {
        Self {
            button: Some(button),
            delta,
            ..Self::new(EventKind::MouseDrag, position)
        }
    }

    pub fn mouse_move(position: Pos2, delta: Vec2) -> Self {
        Self {
            delta,
            ..Self::new(EventKind::MouseMove, position)
        }
    }

    pub fn scroll(position: Pos2, delta: Vec2) -> Self {
        Self {
            delta,
            ..Self::new(EventKind::Scroll, position)
        }
    }

    pub fn key_down(key: Key, position: Pos2) -> Self {
        Self::new(EventKind::KeyDown(key), position)
    }

    pub fn repaint() -> Self {
        Self::new(EventKind::Repaint, Pos2::ZERO)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn use_event(&mut self) {
        self.used = true;
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn is_mouse_down(&self, button: PointerButton) -> bool {
        self.kind == EventKind::MouseDown && self.button == Some(button)
    }

    pub fn is_mouse_up(&self, button: PointerButton) -> bool {
        self.kind == EventKind::MouseUp && self.button == Some(button)
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.kind == EventKind::KeyDown(key)
    }

    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::MouseDown | EventKind::MouseUp | EventKind::MouseMove | EventKind::MouseDrag
        )
    }

    /// Ctrl, shift or command extends a selection instead of replacing it.
    pub fn is_additive(&self) -> bool {
        self.modifiers.ctrl || self.modifiers.shift || self.modifiers.command
    }
}
