//! Snapshot-based undo/redo.
//!
//! Every completed edit commits a full deep copy of the graph. Undo and redo
//! move snapshots between two stacks and write the new current one back to
//! the store. There are no inverse operations to model: a drag, a delete, a
//! connect and a whole auto-layout all reduce to "compare and commit".
//!
//! The top of the undo stack is always the current state, so the stack
//! starts out holding the initial graph and undo needs at least two entries.

use flow_core::{Edge, GraphSnapshot, GraphStore, Node};

/// Default bound on the undo stack.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Undo/redo stacks of graph snapshots, most recent last.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<GraphSnapshot>,
    redo_stack: Vec<GraphSnapshot>,
    /// Maximum undo depth, including the current state.
    max_depth: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: GraphSnapshot, max_depth: usize) -> Self {
        Self {
            undo_stack: vec![initial],
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Start from whatever the store currently holds.
    pub fn from_store(store: &impl GraphStore, max_depth: usize) -> Self {
        Self::new(store.snapshot(), max_depth)
    }

    /// Record a completed edit.
    ///
    /// A state deep-equal to the current top is ignored. Otherwise a copy is
    /// pushed, redo is cleared, and the oldest entry is dropped once the
    /// stack exceeds `max_depth`. Returns whether a snapshot was pushed.
    pub fn commit(&mut self, nodes: &[Node], edges: &[Edge]) -> bool {
        if self
            .undo_stack
            .last()
            .is_some_and(|top| top.matches(nodes, edges))
        {
            return false;
        }

        self.undo_stack.push(GraphSnapshot::capture(nodes, edges));
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        log::debug!(
            "history: commit ({} nodes, {} edges), depth {}",
            nodes.len(),
            edges.len(),
            self.undo_stack.len()
        );
        true
    }

    /// Commit whatever the store currently holds.
    pub fn commit_store(&mut self, store: &impl GraphStore) -> bool {
        self.commit(store.nodes(), store.edges())
    }

    /// Step back one snapshot. No-op when only the initial state is left.
    pub fn undo(&mut self, store: &mut impl GraphStore) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        let Some(current) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(current);

        if let Some(previous) = self.undo_stack.last() {
            store.restore(previous);
        }
        log::debug!(
            "history: undo, depth {} / redo {}",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Re-apply the most recently undone snapshot. No-op when redo is empty.
    pub fn redo(&mut self, store: &mut impl GraphStore) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        store.restore(&next);
        self.undo_stack.push(next);
        log::debug!(
            "history: redo, depth {} / redo {}",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The snapshot matching the current state.
    pub fn current(&self) -> Option<&GraphSnapshot> {
        self.undo_stack.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::{FlowGraph, NodeData, NodeId, Position};

    fn graph_with(n: usize) -> FlowGraph {
        let nodes = (0..n)
            .map(|i| {
                Node::new(
                    NodeId::intern(&format!("h{i}")),
                    Position::new(i as f32, 0.0),
                    NodeData::default(),
                )
            })
            .collect();
        FlowGraph::from_parts(nodes, Vec::new())
    }

    #[test]
    fn fresh_history_has_nothing_to_undo() {
        let mut g = graph_with(1);
        let mut h = History::from_store(&g, DEFAULT_MAX_DEPTH);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(!h.undo(&mut g));
        assert!(!h.redo(&mut g));
        assert_eq!(g, graph_with(1));
    }

    #[test]
    fn unbounded_depth_does_not_preallocate() {
        let mut g = graph_with(1);
        let mut h = History::from_store(&g, usize::MAX);
        assert_eq!(h.max_depth(), usize::MAX);
        g = graph_with(2);
        assert!(h.commit_store(&g));
        assert_eq!(h.undo_depth(), 2);
    }

    #[test]
    fn duplicate_commit_is_noop() {
        let g = graph_with(1);
        let mut h = History::from_store(&g, DEFAULT_MAX_DEPTH);
        assert!(!h.commit_store(&g));
        assert_eq!(h.undo_depth(), 1);
    }

    #[test]
    fn undo_then_redo_restores_exact_state() {
        let mut g = graph_with(1);
        let mut h = History::from_store(&g, DEFAULT_MAX_DEPTH);
        g = graph_with(2);
        h.commit_store(&g);
        let before_undo = g.clone();

        assert!(h.undo(&mut g));
        assert_eq!(g, graph_with(1));
        assert!(h.can_redo());
        assert!(!h.can_undo());

        assert!(h.redo(&mut g));
        assert_eq!(g, before_undo);
        assert!(!h.can_redo());
        assert!(h.can_undo());
    }

    #[test]
    fn commit_clears_redo() {
        let mut g = graph_with(1);
        let mut h = History::from_store(&g, DEFAULT_MAX_DEPTH);
        g = graph_with(2);
        h.commit_store(&g);
        h.undo(&mut g);
        assert!(h.can_redo());

        g = graph_with(3);
        assert!(h.commit_store(&g));
        assert!(!h.can_redo());
        assert_eq!(h.redo_depth(), 0);
    }

    #[test]
    fn max_depth_evicts_oldest() {
        let g = graph_with(0);
        let mut h = History::from_store(&g, 3);
        for n in 1..=5 {
            h.commit_store(&graph_with(n));
        }
        assert_eq!(h.undo_depth(), 3);
        // Newest survives; oldest (0, 1, 2) are gone.
        assert_eq!(h.current().map(|s| s.nodes.len()), Some(5));

        let mut live = graph_with(5);
        let mut steps = 0;
        while h.undo(&mut live) {
            steps += 1;
        }
        assert_eq!(steps, 2);
        assert_eq!(live, graph_with(3));
    }

    #[test]
    fn stored_snapshot_survives_live_mutation() {
        let mut g = graph_with(1);
        let mut h = History::from_store(&g, DEFAULT_MAX_DEPTH);
        g = graph_with(2);
        h.commit_store(&g);

        g.nodes[0].position.x = 1234.0;
        g.nodes[1].data.label = "mutated".into();
        let top = h.current().unwrap();
        assert_eq!(top.nodes[0].position.x, 0.0);
        assert!(top.nodes[1].data.label.is_empty());
    }
}
