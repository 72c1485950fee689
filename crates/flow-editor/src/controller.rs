//! Edit controller: turns user gestures into graph edits.
//!
//! The controller owns the live graph, the history, and the last viewport
//! and canvas size reported by the collaborator. Its one rule is that only
//! *completed* discrete actions reach the history:
//!
//! | gesture | commits |
//! |---------|---------|
//! | add node / add connected node | immediately |
//! | connect (both handles named) | immediately |
//! | remove edge / delete selection | immediately |
//! | drag | on drag end only |
//! | auto-arrange | once, when the settle delay elapses |
//! | selection, viewport, resize, bounding | never |

use crate::config::EditorConfig;
use crate::history::History;
use crate::input::{EditorEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use flow_core::{
    CanvasSize, Connection, Edge, EdgeId, FlowGraph, HandleSide, Node, NodeCategory, NodeData,
    NodeId, Position, Viewport, apply_layout, auto_layout, bound_nodes,
};
use serde::Serialize;

/// Offset of a node spawned from a handle's "+" button.
const RIGHT_SPAWN_OFFSET: (f32, f32) = (250.0, 0.0);
const BOTTOM_SPAWN_OFFSET: (f32, f32) = (0.0, 150.0);

/// Label given to edges created by the editor.
const EDGE_LABEL: &str = "connected";

/// What a dispatched event did, for the host to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Outcome {
    /// The live graph changed and should be re-rendered.
    pub changed: bool,

    /// Call `finish_arrange` (or dispatch `ArrangeSettled`) after this many ms.
    pub settle_after_ms: Option<u32>,

    /// Fit the view with this padding.
    pub fit_view_padding: Option<f32>,

    /// Shortcut resolved from a key event, if any.
    pub action: Option<ShortcutAction>,
}

impl Outcome {
    fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }
}

/// UI affordance flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub arranging: bool,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Orchestrates graph edits, history, layout and bounding.
pub struct FlowEditor {
    graph: FlowGraph,
    history: History,
    config: EditorConfig,
    viewport: Viewport,
    canvas: CanvasSize,
    /// Node currently being dragged.
    dragging: Option<NodeId>,
    /// An auto-arrange was applied and is waiting to settle.
    arranging: bool,
}

impl Default for FlowEditor {
    fn default() -> Self {
        Self::new(FlowGraph::starter(), EditorConfig::default())
    }
}

impl FlowEditor {
    /// Create an editor whose history starts at `graph`.
    pub fn new(graph: FlowGraph, config: EditorConfig) -> Self {
        let history = History::from_store(&graph, config.history_depth);
        Self {
            graph,
            history,
            config,
            viewport: Viewport::default(),
            canvas: CanvasSize::default(),
            dragging: None,
            arranging: false,
        }
    }

    /// Replace the graph and start a fresh history from it.
    pub fn load(&mut self, graph: FlowGraph) {
        self.history = History::from_store(&graph, self.config.history_depth);
        self.graph = graph;
        self.dragging = None;
        self.arranging = false;
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_arranging(&self) -> bool {
        self.arranging
    }

    pub fn state(&self) -> EditorState {
        EditorState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            arranging: self.arranging,
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
        }
    }

    // ─── Node creation ───────────────────────────────────────────────────

    /// Toolbar "Add Node": append a fresh node and commit.
    pub fn add_node(&mut self) -> NodeId {
        let count = self.graph.node_count();
        let id = self.graph.next_node_id();
        let step = (count % 10) as f32 * 30.0;
        let node = Node::new(
            id,
            Position::new(50.0 + step, 50.0 + step),
            NodeData::new(
                format!("Node {}", count + 1),
                "New node content",
                NodeCategory::Default,
            ),
        );
        self.graph.push_node(node);
        self.enforce_bounds();
        self.commit();
        id
    }

    /// Handle "+" button: spawn a node beside `source` and connect to it.
    ///
    /// Only source-side handles (`Right`, `Bottom`) spawn nodes.
    pub fn add_connected_node(&mut self, source: NodeId, side: HandleSide) -> Option<NodeId> {
        let (dx, dy) = match side {
            HandleSide::Right => RIGHT_SPAWN_OFFSET,
            HandleSide::Bottom => BOTTOM_SPAWN_OFFSET,
            HandleSide::Left | HandleSide::Top => return None,
        };
        let origin = self.graph.node(source)?.position;

        let id = self.graph.next_node_id();
        let node = Node::new(
            id,
            origin.offset(dx, dy),
            NodeData::new(
                format!("Node {}", self.graph.node_count() + 1),
                "Connected node",
                NodeCategory::Default,
            ),
        );
        let edge_id = self.graph.unique_edge_id(&format!("edge-{source}-{id}"));
        let mut edge = Edge::new(edge_id, source, id)
            .with_handles(side.handle_for(source), side.opposite_target().handle_for(id))
            .with_label(EDGE_LABEL);
        edge.animated = true;

        self.graph.push_node(node);
        self.graph.push_edge(edge);
        self.enforce_bounds();
        self.commit();
        Some(id)
    }

    // ─── Edges ───────────────────────────────────────────────────────────

    /// Connect gesture. Silently rejected unless both handles are named,
    /// both endpoints exist, and the same connection is not already there.
    pub fn connect(&mut self, connection: Connection) -> bool {
        let (Some(source_handle), Some(target_handle)) =
            (connection.source_handle, connection.target_handle)
        else {
            log::debug!(
                "connect: rejected partial connection {} -> {}",
                connection.source,
                connection.target
            );
            return false;
        };
        if !self.graph.contains_node(connection.source)
            || !self.graph.contains_node(connection.target)
        {
            log::debug!(
                "connect: rejected, unknown endpoint {} -> {}",
                connection.source,
                connection.target
            );
            return false;
        }
        if self.graph.has_connection(
            connection.source,
            connection.target,
            Some(&source_handle),
            Some(&target_handle),
        ) {
            return false;
        }

        let edge_id = self.graph.unique_edge_id(&format!(
            "edge-{}{source_handle}-{}{target_handle}",
            connection.source, connection.target
        ));
        let mut edge = Edge::new(edge_id, connection.source, connection.target)
            .with_handles(source_handle, target_handle)
            .with_label(EDGE_LABEL);
        edge.animated = true;

        self.graph.push_edge(edge);
        self.commit();
        true
    }

    /// Edge delete button.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        if !self.graph.remove_edge(id) {
            return false;
        }
        self.commit();
        true
    }

    /// Remove selected nodes (with their edges) and selected edges.
    pub fn delete_selected(&mut self) -> bool {
        if !self.graph.remove_selected() {
            return false;
        }
        self.commit();
        true
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        self.graph.set_selection(nodes, edges);
    }

    pub fn clear_selection(&mut self) {
        self.graph.clear_selection();
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    pub fn drag_start(&mut self, id: NodeId) -> bool {
        if !self.graph.contains_node(id) {
            return false;
        }
        self.dragging = Some(id);
        true
    }

    /// Intermediate drag frame: move the node live, never commit.
    pub fn drag_to(&mut self, id: NodeId, position: Position) -> bool {
        let Some(node) = self.graph.node_mut(id) else {
            return false;
        };
        node.position = position;
        if self.dragging.is_none() {
            self.dragging = Some(id);
        }
        self.enforce_bounds();
        true
    }

    /// Drag finished: commit the final position.
    pub fn drag_end(&mut self, id: NodeId) -> bool {
        match self.dragging.take() {
            Some(dragged) => {
                if dragged != id {
                    log::debug!("drag: ended {id} while dragging {dragged}");
                }
                self.commit()
            }
            None => false,
        }
    }

    // ─── Auto-arrange ────────────────────────────────────────────────────

    /// Lay the graph out and mark the editor busy.
    ///
    /// Returns the settle delay after which `finish_arrange` must be called;
    /// `None` when there is nothing to arrange.
    pub fn auto_arrange(&mut self) -> Option<u32> {
        if self.graph.nodes.is_empty() {
            return None;
        }
        let positions = auto_layout(&self.graph.nodes, &self.graph.edges, &self.config.layout);
        self.graph.nodes = apply_layout(&self.graph.nodes, &positions);
        self.arranging = true;
        Some(self.config.arrange_settle_ms)
    }

    /// Settle continuation for `auto_arrange`: commit once and clear the
    /// busy flag. Returns `false` if no arrange was pending.
    pub fn finish_arrange(&mut self) -> bool {
        if !self.arranging {
            return false;
        }
        self.arranging = false;
        self.commit();
        true
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Step back one snapshot, then re-bound it to the current view.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.graph) {
            return false;
        }
        self.enforce_bounds();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.graph) {
            return false;
        }
        self.enforce_bounds();
        true
    }

    fn commit(&mut self) -> bool {
        self.history.commit_store(&self.graph)
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.enforce_bounds()
    }

    pub fn set_canvas_size(&mut self, canvas: CanvasSize) -> bool {
        self.canvas = canvas;
        self.enforce_bounds()
    }

    /// Clamp nodes into the visible canvas. Never recorded in history.
    pub fn enforce_bounds(&mut self) -> bool {
        let bounded = bound_nodes(
            &self.graph.nodes,
            self.viewport,
            self.canvas,
            &self.config.bounds,
        );
        if !bounded.changed {
            return false;
        }
        let nodes = bounded.into_nodes();
        self.graph.nodes = nodes;
        true
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Resolve and run a keyboard shortcut.
    pub fn handle_key(&mut self, key: &str, mods: Modifiers, input_focused: bool) -> Outcome {
        let Some(action) =
            ShortcutMap::resolve(key, mods.ctrl, mods.shift, mods.alt, mods.meta, input_focused)
        else {
            return Outcome::default();
        };
        let changed = match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selected(),
        };
        Outcome {
            changed,
            action: Some(action),
            ..Outcome::default()
        }
    }

    /// Single entry point for collaborator events.
    pub fn dispatch(&mut self, event: EditorEvent) -> Outcome {
        match event {
            EditorEvent::AddNode => {
                self.add_node();
                Outcome::changed(true)
            }
            EditorEvent::AddConnectedNode { source, side } => {
                Outcome::changed(self.add_connected_node(source, side).is_some())
            }
            EditorEvent::Connect(connection) => Outcome::changed(self.connect(connection)),
            EditorEvent::RemoveEdge { id } => Outcome::changed(self.remove_edge(id)),
            EditorEvent::DeleteSelected => Outcome::changed(self.delete_selected()),
            EditorEvent::Select { nodes, edges } => {
                self.select(&nodes, &edges);
                Outcome::changed(true)
            }
            EditorEvent::DragStart { id } => Outcome::changed(self.drag_start(id)),
            EditorEvent::DragMove { id, position } => Outcome::changed(self.drag_to(id, position)),
            EditorEvent::DragEnd { id } => Outcome::changed(self.drag_end(id)),
            EditorEvent::AutoArrange => match self.auto_arrange() {
                Some(ms) => Outcome {
                    changed: true,
                    settle_after_ms: Some(ms),
                    ..Outcome::default()
                },
                None => Outcome::default(),
            },
            EditorEvent::ArrangeSettled => {
                if self.finish_arrange() {
                    Outcome {
                        changed: true,
                        fit_view_padding: Some(self.config.fit_view_padding),
                        ..Outcome::default()
                    }
                } else {
                    Outcome::default()
                }
            }
            EditorEvent::Undo => Outcome::changed(self.undo()),
            EditorEvent::Redo => Outcome::changed(self.redo()),
            EditorEvent::Key {
                key,
                modifiers,
                input_focused,
            } => self.handle_key(&key, modifiers, input_focused),
            EditorEvent::Viewport(viewport) => Outcome::changed(self.set_viewport(viewport)),
            EditorEvent::Resize(canvas) => Outcome::changed(self.set_canvas_size(canvas)),
        }
    }
}
