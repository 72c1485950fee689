//! Tunables for auto-layout and viewport bounding.
//!
//! Both structs deserialize with per-field defaults so a host can pass a
//! partial JSON object and override only what it cares about.

use serde::{Deserialize, Serialize};

// ─── Layout ──────────────────────────────────────────────────────────────

/// Grid spacing used by `auto_layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Distance between columns (roots and right-hand children). Default: **300**.
    pub horizontal_gap: f32,

    /// Distance between fanned right-hand siblings, and the base step for
    /// bottom children. Default: **300**.
    pub vertical_gap: f32,

    /// Extra step added on top of `vertical_gap` for bottom children. Default: **100**.
    pub level_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_gap: 300.0,
            vertical_gap: 300.0,
            level_offset: 100.0,
        }
    }
}

// ─── Bounding ────────────────────────────────────────────────────────────

/// Node footprint and margin used by `bound_nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundsConfig {
    /// Rendered node width in graph units. Default: **180**.
    pub node_width: f32,

    /// Rendered node height in graph units. Default: **150**.
    pub node_height: f32,

    /// Margin kept between nodes and the canvas edge. Default: **20**.
    pub padding: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 150.0,
            padding: 20.0,
        }
    }
}
