//! Integration tests: full editing sessions through `FlowEditor`.
//!
//! Each test plays a sequence of user gestures and checks the resulting
//! graph and history, the way the browser host drives the editor.

use flow_core::*;
use flow_editor::{EditorConfig, EditorEvent, FlowEditor, Modifiers, ShortcutAction};
use pretty_assertions::assert_eq;

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

fn handle_conn(source: NodeId, side: HandleSide, target: NodeId) -> Connection {
    Connection {
        source,
        target,
        source_handle: Some(side.handle_for(source)),
        target_handle: Some(side.opposite_target().handle_for(target)),
    }
}

fn position_of(editor: &FlowEditor, node: NodeId) -> Position {
    editor.graph().node(node).expect("node missing").position
}

// ─── Build, arrange, undo ───────────────────────────────────────────────

#[test]
fn build_arrange_and_undo_back_to_start() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut editor = FlowEditor::default();
    let initial = editor.graph().clone();
    let n1 = id("node-1");

    let n2 = editor.add_node();
    let n3 = editor.add_node();
    assert!(editor.connect(handle_conn(n1, HandleSide::Right, n2)));
    assert!(editor.connect(handle_conn(n1, HandleSide::Bottom, n3)));

    assert_eq!(editor.auto_arrange(), Some(500));
    assert!(editor.finish_arrange());

    let p1 = position_of(&editor, n1);
    assert_eq!(position_of(&editor, n2), Position::new(p1.x + 300.0, p1.y));
    assert_eq!(position_of(&editor, n3), Position::new(p1.x, p1.y + 400.0));

    // Commits: add, add, connect, connect, arrange.
    assert_eq!(editor.history().undo_depth(), 6);

    for _ in 0..3 {
        assert!(editor.undo());
    }
    // Back to both nodes added, nothing connected yet.
    assert_eq!(editor.nodes().len(), 3);
    assert!(editor.edges().is_empty());

    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.graph(), &initial);
    assert!(!editor.can_undo());
    assert!(!editor.undo());
}

#[test]
fn rearranging_same_graph_is_stable() {
    let mut editor = FlowEditor::default();
    let n1 = id("node-1");
    let a = editor.add_connected_node(n1, HandleSide::Right).unwrap();
    editor.add_connected_node(a, HandleSide::Bottom).unwrap();
    editor.add_connected_node(n1, HandleSide::Bottom).unwrap();

    editor.auto_arrange();
    editor.finish_arrange();
    let first = editor.graph().clone();
    let depth = editor.history().undo_depth();

    editor.auto_arrange();
    editor.finish_arrange();
    assert_eq!(editor.graph(), &first);
    // Same state → no new snapshot.
    assert_eq!(editor.history().undo_depth(), depth);
}

// ─── Connections ────────────────────────────────────────────────────────

#[test]
fn source_only_connection_creates_nothing() {
    let mut editor = FlowEditor::default();
    let n2 = editor.add_node();
    let before = editor.graph().clone();
    let depth = editor.history().undo_depth();

    let out = editor.dispatch(EditorEvent::Connect(Connection {
        source: id("node-1"),
        target: n2,
        source_handle: Some("node-1-right".into()),
        target_handle: None,
    }));
    assert!(!out.changed);
    assert_eq!(editor.graph(), &before);
    assert_eq!(editor.history().undo_depth(), depth);
}

#[test]
fn edge_delete_button_commits_and_undoes() {
    let mut editor = FlowEditor::default();
    let n2 = editor.add_connected_node(id("node-1"), HandleSide::Right).unwrap();
    let edge_id = editor.edges()[0].id;
    assert_eq!(editor.graph().connection_count(n2), 1);

    let out = editor.dispatch(EditorEvent::RemoveEdge { id: edge_id });
    assert!(out.changed);
    assert!(editor.edges().is_empty());

    assert!(editor.undo());
    assert_eq!(editor.edges().len(), 1);
    assert_eq!(editor.edges()[0].id, edge_id);
}

// ─── Deletion ───────────────────────────────────────────────────────────

#[test]
fn delete_key_removes_selection_with_its_edges() {
    let mut editor = FlowEditor::default();
    let n1 = id("node-1");
    let n2 = editor.add_connected_node(n1, HandleSide::Right).unwrap();
    let n3 = editor.add_connected_node(n2, HandleSide::Right).unwrap();

    editor.select(&[n2], &[]);
    let out = editor.dispatch(EditorEvent::Key {
        key: "Backspace".into(),
        modifiers: Modifiers::default(),
        input_focused: false,
    });
    assert_eq!(out.action, Some(ShortcutAction::Delete));
    assert!(out.changed);

    let ids: Vec<NodeId> = editor.nodes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![n1, n3]);
    assert!(editor.edges().is_empty());

    let out = editor.dispatch(EditorEvent::Key {
        key: "z".into(),
        modifiers: Modifiers {
            meta: true,
            ..Modifiers::default()
        },
        input_focused: false,
    });
    assert_eq!(out.action, Some(ShortcutAction::Undo));
    assert_eq!(editor.nodes().len(), 3);
    assert_eq!(editor.edges().len(), 2);
}

// ─── Drag + bounding ────────────────────────────────────────────────────

#[test]
fn drag_is_bounded_and_committed_once() {
    let mut editor = FlowEditor::default();
    let n1 = id("node-1");
    editor.dispatch(EditorEvent::Resize(CanvasSize::new(800.0, 600.0)));
    assert!(!editor.can_undo());

    editor.dispatch(EditorEvent::DragStart { id: n1 });
    for step in 1..=10 {
        editor.dispatch(EditorEvent::DragMove {
            id: n1,
            position: Position::new(50.0 + step as f32 * 100.0, 50.0),
        });
    }
    assert!(!editor.can_undo());
    editor.dispatch(EditorEvent::DragEnd { id: n1 });

    // 800 - 180 - 20
    assert_eq!(position_of(&editor, n1), Position::new(600.0, 50.0));
    assert_eq!(editor.history().undo_depth(), 2);

    editor.undo();
    assert_eq!(position_of(&editor, n1), Position::new(50.0, 50.0));
}

#[test]
fn panning_reclamps_without_history() {
    let mut editor = FlowEditor::default();
    editor.set_canvas_size(CanvasSize::new(800.0, 600.0));
    assert_eq!(position_of(&editor, id("node-1")), Position::new(50.0, 50.0));

    // Pan left by 200px: visible min.x = 200 + 20.
    let out = editor.dispatch(EditorEvent::Viewport(Viewport {
        x: -200.0,
        y: 0.0,
        zoom: 1.0,
    }));
    assert!(out.changed);
    assert_eq!(position_of(&editor, id("node-1")), Position::new(220.0, 50.0));
    assert!(!editor.can_undo());
}

// ─── Config ─────────────────────────────────────────────────────────────

#[test]
fn small_history_bound_from_config() {
    let config = EditorConfig {
        history_depth: 3,
        ..EditorConfig::default()
    };
    let mut editor = FlowEditor::new(FlowGraph::starter(), config);
    for _ in 0..5 {
        editor.add_node();
    }
    assert_eq!(editor.history().undo_depth(), 3);
    let mut undos = 0;
    while editor.undo() {
        undos += 1;
    }
    assert_eq!(undos, 2);
    assert_eq!(editor.nodes().len(), 4);
}

#[test]
fn json_events_drive_the_editor() {
    let mut editor = FlowEditor::default();
    let events = [
        r#"{"type":"addConnectedNode","source":"node-1","side":"right"}"#,
        r#"{"type":"autoArrange"}"#,
        r#"{"type":"arrangeSettled"}"#,
        r#"{"type":"undo"}"#,
        r#"{"type":"redo"}"#,
    ];
    for json in events {
        let event = EditorEvent::from_json(json).unwrap();
        editor.dispatch(event);
    }
    assert_eq!(position_of(&editor, id("node-1")), Position::new(0.0, 0.0));
    assert_eq!(position_of(&editor, id("node-2")), Position::new(300.0, 0.0));
    assert!(!editor.is_arranging());
    assert!(!editor.can_redo());
}
