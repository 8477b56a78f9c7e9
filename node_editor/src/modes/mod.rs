//! Stock input modes. Hosts pick the ones they need and choose priorities.

mod box_select;
mod connect_nodes;
mod context_menu;
mod delete_selection;
mod node_drag;
mod selection;

pub use box_select::BoxSelectMode;
pub use connect_nodes::ConnectNodeMode;
pub use context_menu::{
    ConnectorMenus, ConnectorRightClickMode, ContextMenuInput, MenuTargets, NodeMenus,
    NodeRightClickMode,
};
pub use delete_selection::DeleteSelectionMode;
pub use node_drag::NodeDragMode;
pub use selection::{ConnectorSelectMode, NodeSelectMode};
