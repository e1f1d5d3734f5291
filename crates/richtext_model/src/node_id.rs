//! Identity types for buffer nodes and style definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node in the rich text buffer.
/// Uses UUID v4 so IDs stay stable across serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a new random NodeId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a style definition.
///
/// Style sheets add and remove definitions by identity rather than by name,
/// so two distinct definitions may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleDefId(Uuid);

impl StyleDefId {
    /// Create a new random StyleDefId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StyleDefId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StyleDefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
