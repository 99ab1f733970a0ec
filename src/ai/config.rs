//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Minimax search configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the current position (default: 3).
    /// The root move counts as the first ply.
    pub depth: u32,

    /// Prune with alpha-beta (default: true).
    /// Disabling it searches full-width; the returned scores are identical.
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            alpha_beta: true,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with pruning enabled or disabled.
    #[must_use]
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }
}
