//! Core data model for flow graphs.
//!
//! A flow graph is an ordered list of positioned nodes and an ordered list
//! of directed edges between them. Edges attach to named handles on the
//! node border (`<node-id>-right`, `<node-id>-top`, ...). Array order is
//! meaningful: auto-layout walks roots and edges in the order they appear.
//!
//! Every type here owns its data outright, so `Clone` is a deep,
//! reference-free copy. History snapshots rely on that.

use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in graph (flow) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Pan/zoom state of the rendering collaborator.
///
/// `x`/`y` are the pan offset in screen pixels, `zoom` is the scale factor.
/// The core only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Measured size of the canvas container in screen pixels.
///
/// `0 × 0` (the default) means the container has not been measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Category tag shown in the node footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Input,
    #[default]
    Default,
    Output,
}

/// Payload carried by a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub category: NodeCategory,
}

impl NodeData {
    pub fn new(label: impl Into<String>, content: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
            category,
        }
    }
}

/// Renderer component the collaborator draws nodes and edges with.
pub const CUSTOM_ELEMENT: &str = "custom";

fn custom_element() -> String {
    CUSTOM_ELEMENT.to_string()
}

/// A positioned, labelled vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Renderer component name, `"custom"` unless the host says otherwise.
    #[serde(rename = "type", default = "custom_element")]
    pub element: String,
    pub position: Position,
    pub data: NodeData,
    #[serde(default)]
    pub selected: bool,
}

impl Node {
    pub fn new(id: NodeId, position: Position, data: NodeData) -> Self {
        Self {
            id,
            element: custom_element(),
            position,
            data,
            selected: false,
        }
    }

    /// Copy of this node moved to `position`.
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

// ─── Handles & Edges ─────────────────────────────────────────────────────

/// Which border of a node a handle sits on.
///
/// `Left` and `Top` accept incoming edges; `Right` and `Bottom` emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Left,
    Top,
    Right,
    Bottom,
}

impl HandleSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleSide::Left => "left",
            HandleSide::Top => "top",
            HandleSide::Right => "right",
            HandleSide::Bottom => "bottom",
        }
    }

    /// Handle name for this side of `node`, e.g. `node-1-right`.
    pub fn handle_for(&self, node: NodeId) -> String {
        format!("{}-{}", node.as_str(), self.as_str())
    }

    pub fn from_name(name: &str) -> Option<HandleSide> {
        match name {
            "left" => Some(HandleSide::Left),
            "top" => Some(HandleSide::Top),
            "right" => Some(HandleSide::Right),
            "bottom" => Some(HandleSide::Bottom),
            _ => None,
        }
    }

    /// Recover the side from a handle name by its `-<side>` suffix.
    pub fn of_handle(handle: &str) -> Option<HandleSide> {
        let (_, suffix) = handle.rsplit_once('-')?;
        Self::from_name(suffix)
    }

    /// The target-side handle an edge from this side lands on.
    pub fn opposite_target(&self) -> HandleSide {
        match self {
            HandleSide::Right | HandleSide::Left => HandleSide::Left,
            HandleSide::Bottom | HandleSide::Top => HandleSide::Top,
        }
    }
}

impl fmt::Display for HandleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by an edge. The edge renderer reads `data.label`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    #[serde(rename = "type", default = "custom_element")]
    pub element: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
    #[serde(default)]
    pub data: EdgeData,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub selected: bool,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            element: custom_element(),
            source,
            target,
            source_handle: None,
            target_handle: None,
            data: EdgeData::default(),
            animated: false,
            selected: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.data.label.as_deref()
    }

    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = Some(source_handle.into());
        self.target_handle = Some(target_handle.into());
        self
    }

    /// Side of the source node this edge leaves from, if its handle is named.
    pub fn source_side(&self) -> Option<HandleSide> {
        self.source_handle.as_deref().and_then(HandleSide::of_handle)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// A connect gesture as reported by the rendering collaborator.
///
/// Handles are optional because the collaborator reports partial drags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

// ─── Snapshots ───────────────────────────────────────────────────────────

/// The full graph state at one instant.
///
/// Snapshots own deep copies of every node and edge; comparing two
/// snapshots is plain structural equality.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Deep-copy the given slices.
    pub fn capture(nodes: &[Node], edges: &[Edge]) -> Self {
        Self {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        }
    }

    /// Structural comparison against live slices, without cloning them.
    pub fn matches(&self, nodes: &[Node], edges: &[Edge]) -> bool {
        self.nodes.as_slice() == nodes && self.edges.as_slice() == edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_side_from_suffix() {
        assert_eq!(HandleSide::of_handle("node-1-right"), Some(HandleSide::Right));
        assert_eq!(HandleSide::of_handle("node-1-bottom"), Some(HandleSide::Bottom));
        assert_eq!(HandleSide::of_handle("a-top"), Some(HandleSide::Top));
        assert_eq!(HandleSide::of_handle("right"), None);
        assert_eq!(HandleSide::of_handle("node-1-middle"), None);
    }

    #[test]
    fn handle_names_roundtrip() {
        let id = NodeId::intern("node-3");
        let name = HandleSide::Bottom.handle_for(id);
        assert_eq!(name, "node-3-bottom");
        assert_eq!(HandleSide::of_handle(&name), Some(HandleSide::Bottom));
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let mut nodes = vec![Node::new(
            NodeId::intern("n"),
            Position::new(1.0, 2.0),
            NodeData::default(),
        )];
        let snap = GraphSnapshot::capture(&nodes, &[]);
        nodes[0].position.x = 99.0;
        nodes[0].data.label.push_str("changed");
        assert_eq!(snap.nodes[0].position.x, 1.0);
        assert!(snap.nodes[0].data.label.is_empty());
        assert!(!snap.matches(&nodes, &[]));
    }

    #[test]
    fn edge_json_uses_collaborator_field_names() {
        let edge = Edge::new(
            NodeId::intern("e1"),
            NodeId::intern("a"),
            NodeId::intern("b"),
        )
        .with_handles("a-right", "b-left");
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["sourceHandle"], "a-right");
        assert_eq!(json["targetHandle"], "b-left");
        assert_eq!(edge.source_side(), Some(HandleSide::Right));
    }

    #[test]
    fn edge_label_lives_under_data() {
        let json = r#"{
            "id": "edge-node-1-node-2",
            "source": "node-1",
            "target": "node-2",
            "sourceHandle": "node-1-right",
            "targetHandle": "node-2-left",
            "type": "custom",
            "animated": true,
            "data": { "label": "connected" }
        }"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.label(), Some("connected"));
        assert_eq!(edge.element, "custom");
        assert!(edge.animated);

        let out = serde_json::to_value(&edge).unwrap();
        assert_eq!(out["data"]["label"], "connected");
        assert_eq!(out["type"], "custom");
        assert!(out.get("label").is_none());
    }

    #[test]
    fn node_type_roundtrips_and_defaults_to_custom() {
        let json = r#"{
            "id": "node-1",
            "type": "custom",
            "position": { "x": 50, "y": 50 },
            "data": { "label": "Start Node", "content": "hi", "type": "input" }
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.element, "custom");
        assert_eq!(node.data.category, NodeCategory::Input);
        let out = serde_json::to_value(&node).unwrap();
        assert_eq!(out["type"], "custom");
        assert_eq!(out["data"]["type"], "input");

        let bare: Node = serde_json::from_str(
            r#"{"id":"n","position":{"x":0,"y":0},"data":{"label":"","content":""}}"#,
        )
        .unwrap();
        assert_eq!(bare.element, CUSTOM_ELEMENT);
    }

    #[test]
    fn node_category_serializes_as_type_tag() {
        let data = NodeData::new("Start", "hello", NodeCategory::Input);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "input");
    }

    #[test]
    fn canvas_measured_only_when_both_dimensions_known() {
        assert!(!CanvasSize::default().is_measured());
        assert!(!CanvasSize::new(800.0, 0.0).is_measured());
        assert!(CanvasSize::new(800.0, 600.0).is_measured());
    }
}
