//! Error types for tree operations
//!
//! Searches never fail. Only arena lookups and parser input can.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Arena has no root node")]
    NoRoot,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
