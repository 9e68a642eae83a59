// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the navigation-bar animation envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Fade duration applied when the caller omits `duration` (milliseconds).
    pub default_animation_ms: u32,
    /// Duration of the follow-up fade back to full opacity (milliseconds).
    pub restore_fade_ms: u32,
    /// Alpha the window content dips to during the transition.
    pub dim_alpha: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_animation_ms: 400,
            restore_fade_ms: 200,
            dim_alpha: 0.5,
        }
    }
}
