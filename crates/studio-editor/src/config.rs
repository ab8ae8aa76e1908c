//! Editing session configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a `Studio` editing session.
///
/// Every field has a default, so hosts only spell out what they change.
/// Deserializes from camelCase JSON (`{"historyLimit": 50}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo entries kept, including the base entry.
    /// Oldest entries are dropped past this. Default: **30**.
    pub history_limit: usize,

    /// Offset (percentage units, both axes) applied to duplicates so the
    /// copy is visibly distinct. Default: **2.0**.
    pub duplicate_offset: f32,

    /// Arrow-key nudge distance in percentage units. Default: **1.0**.
    pub nudge_step: f32,

    /// Shift+arrow nudge distance. Default: **10.0**.
    pub nudge_step_large: f32,

    /// Clamp `x`/`y` to [0, 100] and keep `scale` positive on every write.
    /// Off by default: placement limits belong to the drag handlers.
    pub clamp_placement: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 30,
            duplicate_offset: 2.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            clamp_placement: false,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config. An empty string yields the defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
    }
}
