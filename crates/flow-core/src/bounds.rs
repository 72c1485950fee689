//! Keep nodes inside the visible canvas.
//!
//! The visible area in graph coordinates depends on the current pan/zoom:
//!
//! ```text
//! min = -pan / zoom + padding
//! max = (canvas - node_size * zoom) / zoom - pan / zoom - padding
//! ```
//!
//! computed independently for x and y. Nodes outside `[min, max]` are moved
//! to the nearest edge; nodes already inside are handed back untouched.

use crate::config::BoundsConfig;
use crate::model::*;
use std::borrow::Cow;

/// Result of a bounding pass.
///
/// `nodes[i]` is `Cow::Borrowed` (pointing into the input) when node `i` was
/// already in range and `Cow::Owned` when it had to be moved.
#[derive(Debug)]
pub struct Bounded<'a> {
    pub nodes: Vec<Cow<'a, Node>>,
    pub changed: bool,
}

impl<'a> Bounded<'a> {
    fn untouched(nodes: &'a [Node]) -> Self {
        Self {
            nodes: nodes.iter().map(Cow::Borrowed).collect(),
            changed: false,
        }
    }

    /// Owned node list, cloning only the untouched entries.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes.into_iter().map(Cow::into_owned).collect()
    }
}

/// Allowed position range along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: f32,
    max: f32,
}

impl Range {
    fn along(pan: f32, zoom: f32, canvas: f32, node: f32, padding: f32) -> Self {
        Self {
            min: -pan / zoom + padding,
            max: (canvas - node * zoom) / zoom - pan / zoom - padding,
        }
    }

    /// `min` wins when the range is inverted (canvas smaller than a node).
    fn fit(&self, v: f32) -> Option<f32> {
        if v < self.min {
            Some(self.min)
        } else if v > self.max {
            Some(self.max)
        } else {
            None
        }
    }
}

/// Clamp every node into the visible canvas.
///
/// Returns immediately, with nothing changed, until the canvas has been
/// measured.
pub fn bound_nodes<'a>(
    nodes: &'a [Node],
    viewport: Viewport,
    canvas: CanvasSize,
    config: &BoundsConfig,
) -> Bounded<'a> {
    if !canvas.is_measured() || viewport.zoom <= 0.0 {
        return Bounded::untouched(nodes);
    }

    let xr = Range::along(
        viewport.x,
        viewport.zoom,
        canvas.width,
        config.node_width,
        config.padding,
    );
    let yr = Range::along(
        viewport.y,
        viewport.zoom,
        canvas.height,
        config.node_height,
        config.padding,
    );

    let mut changed = false;
    let bounded = nodes
        .iter()
        .map(|node| {
            let nx = xr.fit(node.position.x);
            let ny = yr.fit(node.position.y);
            if nx.is_none() && ny.is_none() {
                return Cow::Borrowed(node);
            }
            changed = true;
            let pos = Position::new(
                nx.unwrap_or(node.position.x),
                ny.unwrap_or(node.position.y),
            );
            log::trace!(
                "bounds: {} ({}, {}) -> ({}, {})",
                node.id,
                node.position.x,
                node.position.y,
                pos.x,
                pos.y
            );
            Cow::Owned(node.with_position(pos))
        })
        .collect();

    Bounded {
        nodes: bounded,
        changed,
    }
}
