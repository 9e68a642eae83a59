// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Every trait method returns `PlatformUnavailable` — the real implementation
// lives in the `android` module.

use streamline_core::error::{Result, StreamlineError};
use streamline_core::types::SystemUiFlags;

use crate::traits::{AuthFlowLauncher, PlatformBridge, WindowChrome};

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl AuthFlowLauncher for StubBridge {
    fn launch_sign_in(&self, _server_client_id: &str) -> Result<()> {
        tracing::warn!("AuthFlowLauncher::launch_sign_in called on stub bridge");
        Err(StreamlineError::PlatformUnavailable)
    }

    fn sign_out(&self) -> Result<()> {
        tracing::warn!("AuthFlowLauncher::sign_out called on stub bridge");
        Err(StreamlineError::PlatformUnavailable)
    }
}

impl WindowChrome for StubBridge {
    fn system_ui_flags(&self) -> Result<SystemUiFlags> {
        tracing::warn!("WindowChrome::system_ui_flags called on stub bridge");
        Err(StreamlineError::PlatformUnavailable)
    }

    fn apply_system_ui_flags(&self, _flags: SystemUiFlags) -> Result<()> {
        tracing::warn!("WindowChrome::apply_system_ui_flags called on stub bridge");
        Err(StreamlineError::PlatformUnavailable)
    }

    fn fade_pulse(&self, _dim_alpha: f32, _duration_ms: u32, _restore_ms: u32) -> Result<()> {
        Err(StreamlineError::PlatformUnavailable)
    }
}
