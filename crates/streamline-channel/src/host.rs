// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge host — assembles the arbitrator and the navigation controller
// behind the two method channels the embedded runtime invokes.
//
// The embedder owns the transport: it forwards each incoming call to
// `handle_system_ui` / `handle_sign_in` and delivers the platform's
// activity-result callback to `on_sign_in_result`.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use streamline_bridge::platform_bridge;
use streamline_bridge::traits::{AuthFlowLauncher, WindowChrome};
use streamline_core::config::BridgeConfig;
use streamline_core::error::{Result, StreamlineError};
use streamline_core::types::{AccountClaims, PendingSignInInfo, SignInOutcome};

use crate::method::MethodCall;
use crate::navigation::NavigationController;
use crate::signin::SignInArbitrator;

/// Channel carrying the navigation-bar methods.
pub const SYSTEM_UI_CHANNEL: &str = "com.streamline.app/system_ui";

/// Channel carrying the sign-in methods.
pub const GOOGLE_SIGN_IN_CHANNEL: &str = "com.example.streamline/google_sign_in";

/// One logical bridge exposing both channels.
///
/// Cheaply cloneable (Arc-wrapped components) so the embedder can hand it to
/// the channel callback and the activity-result callback independently.
#[derive(Clone)]
pub struct BridgeHost {
    arbitrator: Arc<SignInArbitrator>,
    navigation: Arc<NavigationController>,
    platform_name: String,
}

impl BridgeHost {
    /// Assemble the host against the bridge for the current platform.
    pub fn new(config: BridgeConfig) -> Self {
        let bridge = platform_bridge();
        let platform_name = bridge.platform_name().to_string();
        info!(platform = %platform_name, "bridge host initialised");
        Self::with_bridges(bridge.clone(), bridge, config, platform_name)
    }

    /// Assemble the host from explicit capability handles (used by tests and
    /// embedders that supply their own bridge).
    pub fn with_bridges(
        launcher: Arc<dyn AuthFlowLauncher>,
        chrome: Arc<dyn WindowChrome>,
        config: BridgeConfig,
        platform_name: String,
    ) -> Self {
        Self {
            arbitrator: Arc::new(SignInArbitrator::new(launcher)),
            navigation: Arc::new(NavigationController::new(chrome, config)),
            platform_name,
        }
    }

    /// Name of the platform backing this host.
    pub fn platform_name(&self) -> &str {
        &self.platform_name
    }

    /// Handle one call on the system-UI channel. Synchronous: every method
    /// completes against the live window flags before returning.
    #[instrument(skip(self, call), fields(method = %call.method))]
    pub fn handle_system_ui(&self, call: &MethodCall) -> Result<Value> {
        match call.method.as_str() {
            "hideNavigationBar" => {
                self.navigation.hide(call.arg_u32("duration"))?;
                Ok(Value::Bool(true))
            }
            "showNavigationBar" => {
                self.navigation.show(call.arg_u32("duration"))?;
                Ok(Value::Bool(true))
            }
            "toggleNavigationBar" => {
                self.navigation.toggle(call.arg_u32("duration"))?;
                Ok(Value::Bool(true))
            }
            "isNavigationBarVisible" => Ok(Value::Bool(self.navigation.is_visible()?)),
            "setImmersiveFullscreen" => {
                self.navigation.set_immersive_fullscreen()?;
                Ok(Value::Bool(true))
            }
            other => Err(StreamlineError::NotImplemented(other.to_string())),
        }
    }

    /// Handle one call on the sign-in channel.
    ///
    /// `signIn` returns only after the external flow completes: the request
    /// is admitted (or rejected) immediately, then the resolver is awaited.
    /// The await never blocks a thread — completion arrives through
    /// [`BridgeHost::on_sign_in_result`].
    #[instrument(skip(self, call), fields(method = %call.method))]
    pub async fn handle_sign_in(&self, call: &MethodCall) -> Result<Value> {
        match call.method.as_str() {
            "signIn" => {
                let client_id = call.arg_str("serverClientId").unwrap_or_default();
                let rx = self.arbitrator.begin_sign_in(client_id)?;
                // A dropped resolver means the arbitrator went away mid-flight;
                // surface it the same way as an interrupted flow.
                let claims: AccountClaims =
                    rx.await.map_err(|_| StreamlineError::SignInAborted)??;
                Ok(serde_json::to_value(claims)?)
            }
            "signOut" => Ok(Value::Bool(self.arbitrator.sign_out())),
            other => Err(StreamlineError::NotImplemented(other.to_string())),
        }
    }

    /// Forward the platform's activity-result callback to the arbitrator.
    ///
    /// Safe to call with no sign-in pending (stale or duplicate callbacks
    /// are ignored).
    pub fn on_sign_in_result(&self, outcome: SignInOutcome) {
        self.arbitrator.complete_sign_in(outcome);
    }

    /// Whether a sign-in request is currently in flight.
    pub fn sign_in_pending(&self) -> Option<PendingSignInInfo> {
        self.arbitrator.pending_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;

    use streamline_core::types::SystemUiFlags;

    struct FakeLauncher {
        launches: Mutex<Vec<String>>,
    }

    impl AuthFlowLauncher for FakeLauncher {
        fn launch_sign_in(&self, server_client_id: &str) -> Result<()> {
            self.launches
                .lock()
                .expect("launch log lock")
                .push(server_client_id.to_string());
            Ok(())
        }

        fn sign_out(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FakeChrome {
        flags: Mutex<SystemUiFlags>,
    }

    impl WindowChrome for FakeChrome {
        fn system_ui_flags(&self) -> Result<SystemUiFlags> {
            Ok(*self.flags.lock().expect("flags lock"))
        }

        fn apply_system_ui_flags(&self, flags: SystemUiFlags) -> Result<()> {
            *self.flags.lock().expect("flags lock") = flags;
            Ok(())
        }

        fn fade_pulse(&self, _dim_alpha: f32, _duration_ms: u32, _restore_ms: u32) -> Result<()> {
            Ok(())
        }
    }

    fn host() -> (Arc<FakeLauncher>, BridgeHost) {
        let launcher = Arc::new(FakeLauncher {
            launches: Mutex::new(Vec::new()),
        });
        let chrome = Arc::new(FakeChrome {
            flags: Mutex::new(SystemUiFlags::empty()),
        });
        let host = BridgeHost::with_bridges(
            launcher.clone(),
            chrome,
            BridgeConfig::default(),
            "Test".into(),
        );
        (launcher, host)
    }

    #[test]
    fn system_ui_methods_resolve_true() {
        let (_, host) = host();

        for method in [
            "hideNavigationBar",
            "showNavigationBar",
            "toggleNavigationBar",
            "setImmersiveFullscreen",
        ] {
            let reply = host
                .handle_system_ui(&MethodCall::new(method, Value::Null))
                .expect(method);
            assert_eq!(reply, Value::Bool(true));
        }
    }

    #[test]
    fn visibility_query_tracks_hide_and_show() {
        let (_, host) = host();

        let visible = |host: &BridgeHost| {
            host.handle_system_ui(&MethodCall::new("isNavigationBarVisible", Value::Null))
                .expect("query")
        };

        assert_eq!(visible(&host), Value::Bool(true));

        host.handle_system_ui(&MethodCall::new("hideNavigationBar", json!({ "duration": 100 })))
            .expect("hide");
        assert_eq!(visible(&host), Value::Bool(false));

        host.handle_system_ui(&MethodCall::new("toggleNavigationBar", Value::Null))
            .expect("toggle");
        assert_eq!(visible(&host), Value::Bool(true));
    }

    #[test]
    fn unknown_system_ui_method_is_not_implemented() {
        let (_, host) = host();
        let err = host
            .handle_system_ui(&MethodCall::new("fullscreenPlease", Value::Null))
            .expect_err("must reject");
        assert_eq!(err.channel_code(), "NOT_IMPLEMENTED");
    }

    #[tokio::test]
    async fn sign_in_dispatch_resolves_with_claims_map() {
        let (launcher, host) = host();

        let call = MethodCall::new("signIn", json!({ "serverClientId": "client-123" }));
        let pending_host = host.clone();
        let task = tokio::spawn(async move { pending_host.handle_sign_in(&call).await });

        // Wait for the request to occupy the slot, then complete it as the
        // activity callback would.
        while host.sign_in_pending().is_none() {
            tokio::task::yield_now().await;
        }
        host.on_sign_in_result(SignInOutcome::Success(AccountClaims {
            id_token: Some("tok".into()),
            email: Some("a@b.com".into()),
            ..AccountClaims::default()
        }));

        let reply = task.await.expect("join").expect("sign-in result");
        assert_eq!(reply["idToken"], "tok");
        assert_eq!(reply["email"], "a@b.com");
        assert!(reply["displayName"].is_null());
        assert_eq!(launcher.launches.lock().expect("lock").as_slice(), ["client-123"]);
    }

    #[tokio::test]
    async fn sign_in_without_client_id_is_rejected() {
        let (_, host) = host();
        let err = host
            .handle_sign_in(&MethodCall::new("signIn", Value::Null))
            .await
            .expect_err("must reject");
        assert_eq!(err.channel_code(), "MISSING_CLIENT_ID");
        assert!(host.sign_in_pending().is_none());
    }

    #[tokio::test]
    async fn sign_out_resolves_true_without_prior_sign_in() {
        let (_, host) = host();
        let reply = host
            .handle_sign_in(&MethodCall::new("signOut", Value::Null))
            .await
            .expect("sign out");
        assert_eq!(reply, Value::Bool(true));
    }

    #[tokio::test]
    async fn unknown_sign_in_method_is_not_implemented() {
        let (_, host) = host();
        let err = host
            .handle_sign_in(&MethodCall::new("linkAccount", Value::Null))
            .await
            .expect_err("must reject");
        assert!(matches!(err, StreamlineError::NotImplemented(_)));
    }

    #[test]
    fn stale_sign_in_result_is_ignored() {
        let (_, host) = host();
        // No pending request — must be a silent no-op.
        host.on_sign_in_result(SignInOutcome::Aborted);
        assert!(host.sign_in_pending().is_none());
    }
}
