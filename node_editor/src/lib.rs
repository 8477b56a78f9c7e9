//! Host-agnostic node graph editor core.
//!
//! The editor owns a graph of [`Node`]s and [`Connector`]s, a pan/zoom
//! [`Camera`] and a selection set. Interaction is handled by a stack of
//! [`InputMode`]s that the host assembles with
//! [`NodeEditor::enable_input_mode`]; each frame the host forwards its raw
//! input as [`GuiEvent`]s to [`NodeEditor::on_gui`] together with a
//! [`Canvas`] to draw on. The [`host`] module adapts both ends to egui.

pub mod canvas;
pub mod drawing;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod menu;
pub mod mode;
pub mod modes;
mod rendering;
pub mod settings;
pub mod state;
pub mod theme;
pub mod types;

pub use canvas::{BoxStyle, Canvas, DrawCommand, RecordingCanvas};
pub use editor::NodeEditor;
pub use error::NodeEditorError;
pub use event::{EventKind, GuiEvent};
pub use geometry::{Camera, is_point_on_line};
pub use menu::{ContextMenu, MenuEntry};
pub use mode::{InputMode, ModeContext, ModeId};
pub use settings::EditorSettings;
pub use state::{ActiveMenu, EditorState, MenuCommand};
pub use theme::NodeEditorTheme;
pub use types::*;
