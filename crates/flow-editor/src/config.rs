//! Editor configuration.

use crate::history::DEFAULT_MAX_DEPTH;
use flow_core::{BoundsConfig, LayoutConfig};
use serde::Deserialize;

/// Configuration for `FlowEditor`.
///
/// Every field has a default, so a host may pass `{}` or any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo stack bound, including the current state. Default: **50**.
    pub history_depth: usize,

    pub layout: LayoutConfig,

    pub bounds: BoundsConfig,

    /// Delay before an auto-arrange is committed, letting the collaborator's
    /// transition finish. Default: **500** ms.
    pub arrange_settle_ms: u32,

    /// Padding for the fit-view requested once an arrange settles. Default: **0.3**.
    pub fit_view_padding: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_MAX_DEPTH,
            layout: LayoutConfig::default(),
            bounds: BoundsConfig::default(),
            arrange_settle_ms: 500,
            fit_view_padding: 0.3,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid editor config: {e}"))
    }
}
