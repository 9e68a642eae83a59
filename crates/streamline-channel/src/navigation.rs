// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Navigation-bar visibility control.
//
// Stateless per call: every operation reads or writes the live window flags
// through the `WindowChrome` trait and nothing is cached here. The animated
// transitions share one envelope — apply the flag change, then dip window
// opacity and restore it.

use std::sync::Arc;

use tracing::{debug, instrument};

use streamline_bridge::traits::WindowChrome;
use streamline_core::config::BridgeConfig;
use streamline_core::error::Result;
use streamline_core::types::{NavVisibility, SystemUiFlags};

/// Flag set applied when hiding the navigation bar.
const HIDDEN_FLAGS: SystemUiFlags = SystemUiFlags(
    SystemUiFlags::HIDE_NAVIGATION.0
        | SystemUiFlags::LAYOUT_HIDE_NAVIGATION.0
        | SystemUiFlags::IMMERSIVE_STICKY.0,
);

/// Flag set applied when showing the navigation bar: layout stays stable and
/// immersive-sticky remains, but the forced hide is dropped.
const SHOWN_FLAGS: SystemUiFlags =
    SystemUiFlags(SystemUiFlags::LAYOUT_HIDE_NAVIGATION.0 | SystemUiFlags::IMMERSIVE_STICKY.0);

/// The strongest combination: navigation and status bar hidden, fullscreen
/// layout, sticky immersion.
const IMMERSIVE_FULLSCREEN_FLAGS: SystemUiFlags = SystemUiFlags(
    SystemUiFlags::IMMERSIVE_STICKY.0
        | SystemUiFlags::LAYOUT_HIDE_NAVIGATION.0
        | SystemUiFlags::HIDE_NAVIGATION.0
        | SystemUiFlags::LAYOUT_FULLSCREEN.0
        | SystemUiFlags::FULLSCREEN.0,
);

/// Applies navigation-bar visibility states to the host window.
pub struct NavigationController {
    chrome: Arc<dyn WindowChrome>,
    config: BridgeConfig,
}

impl NavigationController {
    pub fn new(chrome: Arc<dyn WindowChrome>, config: BridgeConfig) -> Self {
        Self { chrome, config }
    }

    /// Hide the navigation bar with an animated fade.
    ///
    /// The flag change lands at animation start; `duration_ms` of `None`
    /// falls back to the configured default.
    #[instrument(skip(self))]
    pub fn hide(&self, duration_ms: Option<u32>) -> Result<()> {
        self.transition(HIDDEN_FLAGS, duration_ms)
    }

    /// Show the navigation bar with the same animation envelope.
    #[instrument(skip(self))]
    pub fn show(&self, duration_ms: Option<u32>) -> Result<()> {
        self.transition(SHOWN_FLAGS, duration_ms)
    }

    /// Read current visibility and dispatch to `hide` or `show`.
    #[instrument(skip(self))]
    pub fn toggle(&self, duration_ms: Option<u32>) -> Result<()> {
        match self.visibility()? {
            NavVisibility::Visible => self.hide(duration_ms),
            NavVisibility::Hidden => self.show(duration_ms),
        }
    }

    /// Whether the navigation bar is currently visible. Derived from the
    /// live window flags; no side effect.
    pub fn is_visible(&self) -> Result<bool> {
        Ok(self.visibility()? == NavVisibility::Visible)
    }

    /// Apply the full immersive-fullscreen flag set, unanimated and
    /// unconditional.
    #[instrument(skip(self))]
    pub fn set_immersive_fullscreen(&self) -> Result<()> {
        self.chrome.apply_system_ui_flags(IMMERSIVE_FULLSCREEN_FLAGS)
    }

    fn visibility(&self) -> Result<NavVisibility> {
        Ok(self.chrome.system_ui_flags()?.nav_visibility())
    }

    fn transition(&self, flags: SystemUiFlags, duration_ms: Option<u32>) -> Result<()> {
        let duration = duration_ms.unwrap_or(self.config.default_animation_ms);
        self.chrome.apply_system_ui_flags(flags)?;
        self.chrome
            .fade_pulse(self.config.dim_alpha, duration, self.config.restore_fade_ms)?;
        debug!(duration, "navigation transition applied: flags {:#06x}", flags.0);
        Ok(())
    }
}
