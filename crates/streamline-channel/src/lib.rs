// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Streamline — Method-channel layer.
//
// One logical bridge, two independently testable components: the Sign-In
// Arbitrator (single-slot request admission + exactly-once result
// correlation) and the Navigation-Visibility Controller (window-flag
// mapping with an animated fade envelope). `host` assembles both behind
// the channel-facing dispatch surface.

pub mod host;
pub mod method;
pub mod navigation;
pub mod signin;

pub use host::BridgeHost;
pub use method::{ChannelError, MethodCall};
pub use navigation::NavigationController;
pub use signin::SignInArbitrator;
