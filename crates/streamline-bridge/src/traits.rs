// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The channel layer never touches a platform SDK directly — it talks to
// these traits, and the `android`/`stub` modules supply the implementations.

use streamline_core::error::Result;
use streamline_core::types::SystemUiFlags;

/// Unified bridge that groups all native capabilities.
///
/// Platforms that cannot provide a capability (desktop/CI) return
/// `StreamlineError::PlatformUnavailable` from the stub implementation.
pub trait PlatformBridge: AuthFlowLauncher + WindowChrome {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Launch and tear down the external Google Sign-In flow.
///
/// The launch is fire-and-forget: the outcome arrives later through the host
/// activity's result callback, which the embedder must forward to
/// `SignInArbitrator::complete_sign_in`.
pub trait AuthFlowLauncher: Send + Sync {
    /// Start the external sign-in flow for the given server client ID.
    ///
    /// Dispatches exactly one flow per call and returns as soon as the flow
    /// has been handed to the platform. Never yields the sign-in result.
    fn launch_sign_in(&self, server_client_id: &str) -> Result<()>;

    /// Tear down the provider session, if one exists.
    ///
    /// "No active session" is not an error — implementations return `Ok(())`
    /// in that case.
    fn sign_out(&self) -> Result<()>;
}

/// Read and write system-UI visibility flags on the host window.
pub trait WindowChrome: Send + Sync {
    /// Currently-applied system-UI flag set on the decor view.
    fn system_ui_flags(&self) -> Result<SystemUiFlags>;

    /// Replace the system-UI flag set on the decor view.
    fn apply_system_ui_flags(&self, flags: SystemUiFlags) -> Result<()>;

    /// Fade window content to `dim_alpha` over `duration_ms`, then restore
    /// it to full opacity over `restore_ms`.
    ///
    /// Returns once the animation has been scheduled; completion is not
    /// observed.
    fn fade_pulse(&self, dim_alpha: f32, duration_ms: u32, restore_ms: u32) -> Result<()>;
}
