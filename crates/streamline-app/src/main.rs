// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Streamline — Native bridge host.
//
// Entry point. Initialises logging and the bridge host, then runs a short
// channel smoke sequence. On-device the embedded runtime drives the
// channels instead; on desktop this exercises the stub bridge so the
// dispatch path stays honest in CI.

use serde_json::Value;

use streamline_channel::host::{GOOGLE_SIGN_IN_CHANNEL, SYSTEM_UI_CHANNEL};
use streamline_channel::{BridgeHost, MethodCall};
use streamline_core::config::BridgeConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Streamline bridge host starting");

    let host = BridgeHost::new(BridgeConfig::default());
    tracing::info!(platform = host.platform_name(), "bridge ready");

    // Smoke the system-UI channel.
    let visible = host.handle_system_ui(&MethodCall::new("isNavigationBarVisible", Value::Null));
    match visible {
        Ok(v) => tracing::info!(channel = SYSTEM_UI_CHANNEL, reply = %v, "isNavigationBarVisible"),
        Err(e) => tracing::warn!(
            channel = SYSTEM_UI_CHANNEL,
            code = e.channel_code(),
            "isNavigationBarVisible unavailable: {e}"
        ),
    }

    // Smoke the sign-in channel. signOut resolves true on every platform.
    match host
        .handle_sign_in(&MethodCall::new("signOut", Value::Null))
        .await
    {
        Ok(v) => tracing::info!(channel = GOOGLE_SIGN_IN_CHANNEL, reply = %v, "signOut"),
        Err(e) => tracing::warn!(
            channel = GOOGLE_SIGN_IN_CHANNEL,
            code = e.channel_code(),
            "signOut failed: {e}"
        ),
    }

    tracing::info!("bridge host smoke sequence complete");
}
