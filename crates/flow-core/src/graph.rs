//! In-memory graph store.
//!
//! `FlowGraph` holds the live node and edge arrays that the rendering
//! collaborator draws. History and the editor only reach them through the
//! `GraphStore` trait, so a host that keeps its own arrays can plug in
//! instead.

use crate::id::{EdgeId, NodeId};
use crate::model::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read/replace access to the live graph arrays.
pub trait GraphStore {
    fn nodes(&self) -> &[Node];
    fn edges(&self) -> &[Edge];

    /// Swap in new arrays wholesale.
    fn replace(&mut self, nodes: Vec<Node>, edges: Vec<Edge>);

    /// Deep copy of the current state.
    fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(self.nodes(), self.edges())
    }

    /// Replace the live state with a copy of `snapshot`.
    fn restore(&mut self, snapshot: &GraphSnapshot) {
        self.replace(snapshot.nodes.clone(), snapshot.edges.clone());
    }
}

/// Ordered nodes and edges of the flow being edited.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// The single "Start Node" a fresh editor opens with.
    pub fn starter() -> Self {
        let node = Node::new(
            NodeId::intern("node-1"),
            Position::new(50.0, 50.0),
            NodeData::new(
                "Start Node",
                "Click the handles to add connected nodes",
                NodeCategory::Input,
            ),
        );
        Self::from_parts(vec![node], Vec::new())
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges touching `id`, in either direction.
    pub fn connection_count(&self, id: NodeId) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    /// Whether an edge with exactly these endpoints and handles exists.
    pub fn has_connection(
        &self,
        source: NodeId,
        target: NodeId,
        source_handle: Option<&str>,
        target_handle: Option<&str>,
    ) -> bool {
        self.edges.iter().any(|e| {
            e.source == source
                && e.target == target
                && e.source_handle.as_deref() == source_handle
                && e.target_handle.as_deref() == target_handle
        })
    }

    /// First free `node-<n>` id, starting from `node_count() + 1`.
    pub fn next_node_id(&self) -> NodeId {
        let mut n = self.nodes.len() + 1;
        loop {
            let id = NodeId::intern(&format!("node-{n}"));
            if !self.contains_node(id) {
                return id;
            }
            n += 1;
        }
    }

    /// `base` if no edge uses it yet, otherwise `base-2`, `base-3`, ...
    pub fn unique_edge_id(&self, base: &str) -> EdgeId {
        let id = NodeId::intern(base);
        if self.edge(id).is_none() {
            return id;
        }
        let mut n = 2;
        loop {
            let id = NodeId::intern(&format!("{base}-{n}"));
            if self.edge(id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Remove an edge by id. Returns `false` if it did not exist.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    /// Remove every selected node and edge.
    ///
    /// Edges attached to a removed node go with it.
    pub fn remove_selected(&mut self) -> bool {
        let removed: HashSet<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id)
            .collect();
        let before = (self.nodes.len(), self.edges.len());

        self.nodes.retain(|n| !n.selected);
        self.edges.retain(|e| {
            !e.selected && !removed.contains(&e.source) && !removed.contains(&e.target)
        });

        before != (self.nodes.len(), self.edges.len())
    }

    /// Mark exactly the given nodes and edges as selected.
    pub fn set_selection(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        for node in &mut self.nodes {
            node.selected = nodes.contains(&node.id);
        }
        for edge in &mut self.edges {
            edge.selected = edges.contains(&edge.id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(&[], &[]);
    }

    // ─── JSON boundary ───────────────────────────────────────────────────

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"nodes":[],"edges":[]}"#.to_string())
    }

    /// Parse `{"nodes":[...],"edges":[...]}` as sent by the collaborator.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid graph JSON: {e}"))
    }
}

impl GraphStore for FlowGraph {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn replace(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes = nodes;
        self.edges = edges;
    }
}

impl From<GraphSnapshot> for FlowGraph {
    fn from(snapshot: GraphSnapshot) -> Self {
        Self::from_parts(snapshot.nodes, snapshot.edges)
    }
}
