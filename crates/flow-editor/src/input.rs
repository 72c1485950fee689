//! Editor event abstraction.
//!
//! Everything the rendering collaborator reports (drags, handle buttons,
//! key presses, viewport changes) arrives as one typed `EditorEvent`.
//! Rendered elements such as an edge's delete button send these straight
//! to the controller instead of going through a document-wide event bus.

use flow_core::{CanvasSize, Connection, EdgeId, HandleSide, NodeId, Position, Viewport};
use serde::Deserialize;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A discrete input for the edit controller.
///
/// Deserializes from `{"type": "connect", "source": ..., ...}` so a host can
/// post events as JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorEvent {
    /// Toolbar "Add Node".
    AddNode,

    /// "+" button on a node's right or bottom handle.
    AddConnectedNode { source: NodeId, side: HandleSide },

    /// Connect gesture finished over a target handle.
    Connect(Connection),

    /// Delete button on an edge label.
    RemoveEdge { id: EdgeId },

    /// Toolbar "Delete Selected".
    DeleteSelected,

    /// Selection changed in the collaborator.
    Select {
        #[serde(default)]
        nodes: Vec<NodeId>,
        #[serde(default)]
        edges: Vec<EdgeId>,
    },

    DragStart { id: NodeId },
    DragMove { id: NodeId, position: Position },
    DragEnd { id: NodeId },

    /// Toolbar "Auto Arrange".
    AutoArrange,

    /// The settle delay requested by `AutoArrange` has elapsed.
    ArrangeSettled,

    Undo,
    Redo,

    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        input_focused: bool,
    },

    /// Pan/zoom changed.
    Viewport(Viewport),

    /// Canvas container was (re)measured.
    Resize(CanvasSize),
}

impl EditorEvent {
    /// Parse a JSON-encoded event.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid editor event: {e}"))
    }
}
