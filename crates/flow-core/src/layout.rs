//! Automatic grid layout.
//!
//! Walks the connection graph depth-first from every root node (a node no
//! edge points at) and assigns grid coordinates:
//!
//! - roots get their own column at `y = 0`,
//! - children reached through a `-right` handle go one column right,
//!   fanned down by `vertical_gap` per sibling,
//! - children reached through a `-bottom` handle stay in the column and
//!   drop by `vertical_gap + level_offset`.
//!
//! Each node is placed once, by the first path that reaches it, so cycles
//! and diamonds terminate. Placement depends only on topology and array
//! order, never on current coordinates.

use crate::config::LayoutConfig;
use crate::id::NodeId;
use crate::model::*;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{EdgeRef, VisitMap, Visitable};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Which way a child hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Right,
    Bottom,
}

/// Edge weight in the traversal index: edge array position + branch.
#[derive(Debug, Clone, Copy)]
struct Link {
    order: usize,
    branch: Branch,
}

/// Node weight. Edges may name ids that are not in the node list; those
/// still take part in the walk but never receive a position.
#[derive(Debug, Clone, Copy)]
struct Slot {
    id: NodeId,
    live: bool,
}

type Children = SmallVec<[NodeIndex; 4]>;

/// Compute grid positions for every node reachable from a root.
///
/// Nodes that no root reaches are absent from the result; `apply_layout`
/// leaves them where they are.
pub fn auto_layout(
    nodes: &[Node],
    edges: &[Edge],
    config: &LayoutConfig,
) -> HashMap<NodeId, Position> {
    let mut positions = HashMap::with_capacity(nodes.len());
    if nodes.is_empty() {
        return positions;
    }

    let mut graph: DiGraph<Slot, Link> = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        index.entry(node.id).or_insert_with(|| {
            graph.add_node(Slot {
                id: node.id,
                live: true,
            })
        });
    }

    for (order, edge) in edges.iter().enumerate() {
        let branch = match edge.source_side() {
            Some(HandleSide::Right) => Branch::Right,
            Some(HandleSide::Bottom) => Branch::Bottom,
            _ => continue,
        };
        let source = slot_for(&mut graph, &mut index, edge.source);
        let target = slot_for(&mut graph, &mut index, edge.target);
        graph.add_edge(source, target, Link { order, branch });
    }

    let targets: HashSet<NodeId> = edges.iter().map(|e| e.target).collect();
    let mut visited = graph.visit_map();
    let mut stack: Vec<(NodeIndex, Position)> = Vec::new();
    let mut root_count = 0usize;

    for (root_index, root) in nodes
        .iter()
        .filter(|n| !targets.contains(&n.id))
        .enumerate()
    {
        root_count += 1;
        let start = Position::new(root_index as f32 * config.horizontal_gap, 0.0);
        stack.push((index[&root.id], start));

        while let Some((idx, pos)) = stack.pop() {
            if !visited.visit(idx) {
                continue;
            }
            let slot = graph[idx];
            if slot.live {
                log::trace!("layout: {} at ({}, {})", slot.id, pos.x, pos.y);
                positions.insert(slot.id, pos);
            }

            let (right, bottom) = children_of(&graph, idx);

            // Pushed in reverse so they pop right-first, in array order.
            for &child in bottom.iter().rev() {
                stack.push((
                    child,
                    pos.offset(0.0, config.vertical_gap + config.level_offset),
                ));
            }
            for (k, &child) in right.iter().enumerate().rev() {
                stack.push((
                    child,
                    pos.offset(config.horizontal_gap, k as f32 * config.vertical_gap),
                ));
            }
        }
    }

    log::debug!(
        "auto-layout: placed {} of {} nodes from {} roots",
        positions.len(),
        nodes.len(),
        root_count
    );
    positions
}

/// New node list with laid-out positions; unplaced nodes keep theirs.
pub fn apply_layout(nodes: &[Node], positions: &HashMap<NodeId, Position>) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| match positions.get(&node.id) {
            Some(&pos) => node.with_position(pos),
            None => node.clone(),
        })
        .collect()
}

fn slot_for(
    graph: &mut DiGraph<Slot, Link>,
    index: &mut HashMap<NodeId, NodeIndex>,
    id: NodeId,
) -> NodeIndex {
    *index
        .entry(id)
        .or_insert_with(|| graph.add_node(Slot { id, live: false }))
}

/// Outgoing children split by branch, each in edge array order.
fn children_of(graph: &DiGraph<Slot, Link>, idx: NodeIndex) -> (Children, Children) {
    let mut links: SmallVec<[(Link, NodeIndex); 8]> = graph
        .edges(idx)
        .map(|e| (*e.weight(), e.target()))
        .collect();
    links.sort_by_key(|(link, _)| link.order);

    let mut right = Children::new();
    let mut bottom = Children::new();
    for (link, target) in links {
        match link.branch {
            Branch::Right => right.push(target),
            Branch::Bottom => bottom.push(target),
        }
    }
    (right, bottom)
}
