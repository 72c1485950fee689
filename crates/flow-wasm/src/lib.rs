//! WASM bridge for the flow editor: exposes `FlowEditor` to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns
//! rendering and timers; it forwards gestures here and re-reads the
//! node/edge JSON whenever a call reports a change.

use flow_core::{CanvasSize, Connection, FlowGraph, HandleSide, NodeId, Position, Viewport};
use flow_editor::{EditorConfig, EditorEvent, FlowEditor, Modifiers, Outcome};
use wasm_bindgen::prelude::*;

/// The WASM-facing editor handle.
///
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct FlowCanvas {
    editor: FlowEditor,
}

#[wasm_bindgen]
impl FlowCanvas {
    /// Create an editor on the starter graph, sized to the canvas.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        let mut editor = FlowEditor::default();
        editor.set_canvas_size(CanvasSize::new(width as f32, height as f32));
        Self { editor }
    }

    /// Create an editor from a JSON `EditorConfig`. Unknown or missing
    /// fields fall back to defaults; malformed JSON is an error.
    pub fn with_config(width: f64, height: f64, config_json: &str) -> Result<FlowCanvas, JsValue> {
        console_error_panic_hook_setup();

        let config = EditorConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?;
        let mut editor = FlowEditor::new(FlowGraph::starter(), config);
        editor.set_canvas_size(CanvasSize::new(width as f32, height as f32));
        Ok(Self { editor })
    }

    /// Replace the graph from `{"nodes":[...],"edges":[...]}` and reset history.
    /// Returns `false` on malformed JSON.
    pub fn load_json(&mut self, json: &str) -> bool {
        match FlowGraph::from_json(json) {
            Ok(graph) => {
                self.editor.load(graph);
                self.editor.enforce_bounds();
                true
            }
            Err(e) => {
                log::warn!("load_json: {e}");
                false
            }
        }
    }

    // ─── Read side ───────────────────────────────────────────────────────

    pub fn graph_json(&self) -> String {
        self.editor.graph().to_json()
    }

    pub fn nodes_json(&self) -> String {
        to_json(self.editor.nodes())
    }

    pub fn edges_json(&self) -> String {
        to_json(self.editor.edges())
    }

    /// `{"canUndo":..,"canRedo":..,"arranging":..,"nodeCount":..,"edgeCount":..}`
    pub fn state_json(&self) -> String {
        to_json(&self.editor.state())
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    pub fn is_arranging(&self) -> bool {
        self.editor.is_arranging()
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Toolbar "Add Node". Returns the new node's id.
    pub fn add_node(&mut self) -> String {
        self.editor.add_node().as_str().to_string()
    }

    /// Handle "+" button. `side` is `"right"` or `"bottom"`.
    /// Returns the new node's id, or an empty string if nothing was added.
    pub fn add_connected_node(&mut self, source: &str, side: &str) -> String {
        let Some(side) = HandleSide::from_name(side) else {
            return String::new();
        };
        self.editor
            .add_connected_node(NodeId::intern(source), side)
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> bool {
        self.editor.connect(Connection {
            source: NodeId::intern(source),
            target: NodeId::intern(target),
            source_handle,
            target_handle,
        })
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        self.editor.remove_edge(NodeId::intern(edge_id))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Replace the selection from two arrays of id strings.
    pub fn select(&mut self, nodes: &js_sys::Array, edges: &js_sys::Array) {
        let nodes = ids_of(nodes);
        let edges = ids_of(edges);
        self.editor.select(&nodes, &edges);
    }

    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    pub fn drag_start(&mut self, node_id: &str) -> bool {
        self.editor.drag_start(NodeId::intern(node_id))
    }

    pub fn drag_to(&mut self, node_id: &str, x: f32, y: f32) -> bool {
        self.editor.drag_to(NodeId::intern(node_id), Position::new(x, y))
    }

    pub fn drag_end(&mut self, node_id: &str) -> bool {
        self.editor.drag_end(NodeId::intern(node_id))
    }

    // ─── Auto-arrange ────────────────────────────────────────────────────

    /// Lay out the graph. Returns the settle delay in ms after which the
    /// host must call `finish_arrange`, or 0 when nothing was arranged.
    pub fn auto_arrange(&mut self) -> u32 {
        self.editor.auto_arrange().unwrap_or(0)
    }

    pub fn finish_arrange(&mut self) -> bool {
        self.editor.finish_arrange()
    }

    /// Padding for the fit-view the host runs after an arrange settles.
    pub fn fit_view_padding(&self) -> f32 {
        self.editor.config().fit_view_padding
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, x: f32, y: f32, zoom: f32) -> bool {
        self.editor.set_viewport(Viewport { x, y, zoom })
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.editor
            .set_canvas_size(CanvasSize::new(width as f32, height as f32))
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool,"action":"<action_name>"}`
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        input_focused: bool,
    ) -> String {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let outcome = self.editor.handle_key(key, mods, input_focused);
        serde_json::json!({
            "changed": outcome.changed,
            "action": outcome.action.map_or("none", |a| a.name()),
        })
        .to_string()
    }

    /// Dispatch one `EditorEvent` given as JSON, e.g. `{"type":"undo"}`.
    /// Returns `{"ok":true,...outcome}` or `{"ok":false,"error":"..."}`.
    pub fn dispatch_json(&mut self, json: &str) -> String {
        match EditorEvent::from_json(json) {
            Ok(event) => outcome_json(&self.editor.dispatch(event)),
            Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn outcome_json(outcome: &Outcome) -> String {
    serde_json::json!({
        "ok": true,
        "changed": outcome.changed,
        "settleAfterMs": outcome.settle_after_ms,
        "fitViewPadding": outcome.fit_view_padding,
        "action": outcome.action.map(|a| a.name()),
    })
    .to_string()
}

fn ids_of(array: &js_sys::Array) -> Vec<NodeId> {
    array
        .iter()
        .filter_map(|v| v.as_string())
        .map(|s| NodeId::intern(&s))
        .collect()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("flow editor panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
