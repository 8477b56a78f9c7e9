use thiserror::Error;

use crate::types::{ConnectorId, NodeId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeEditorError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Unknown connector: {0}")]
    UnknownConnector(ConnectorId),
    #[error("Cannot connect {0} to itself")]
    SelfConnection(NodeId),
    #[error("{0} is already connected to {1}")]
    DuplicateConnector(NodeId, NodeId),
}
