// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Streamline — Native platform bridge abstractions.
//
// This crate defines the traits the channel layer programs against and the
// platform dispatch logic selecting the concrete implementation: Android
// (ART/JNI) on-device, a warn-and-refuse stub everywhere else.

use std::sync::Arc;

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Retrieves the bridge implementation for the target operating system.
///
/// RETURNS: a shared trait object (`dyn PlatformBridge`) that abstracts away
/// the underlying native SDK details. Upcast the handle to
/// `Arc<dyn AuthFlowLauncher>` / `Arc<dyn WindowChrome>` to hand each
/// capability to the component that needs it.
pub fn platform_bridge() -> Arc<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: uses `jni-rs` to invoke methods on the JVM/ART.
        Arc::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: mock implementation so non-native builds link and run.
        Arc::new(stub::StubBridge)
    }
}
