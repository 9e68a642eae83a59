// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sign-in request arbitration and result correlation.
//
// At most one sign-in request is admitted at a time. The accepted request's
// resolver sits in a single slot until the external flow reports back through
// `complete_sign_in`, which resolves the original caller exactly once and
// clears the slot on every path. A request left pending forever (the external
// flow never completes) blocks new attempts — intentional, matching the
// original bridge; no timeout is enforced here.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use streamline_bridge::traits::AuthFlowLauncher;
use streamline_core::error::{Result, StreamlineError};
use streamline_core::types::{AccountClaims, PendingSignInInfo, RequestId, SignInOutcome};

/// Receiver half handed to the caller of an accepted sign-in request.
///
/// Resolves exactly once, when the external flow's outcome is forwarded to
/// [`SignInArbitrator::complete_sign_in`].
pub type SignInReceiver = oneshot::Receiver<Result<AccountClaims>>;

/// The one in-flight request. The sender is a single-shot resolver — it
/// consumes itself on first use, so double resolution is unrepresentable.
struct PendingSignIn {
    request_id: RequestId,
    resolver: oneshot::Sender<Result<AccountClaims>>,
    launched_at: DateTime<Utc>,
}

/// Admits at most one sign-in request at a time and correlates the
/// asynchronous platform callback back to the original caller.
///
/// The slot is guarded by a mutex so that the check-and-set in
/// `begin_sign_in` is a single atomic step even under a multi-threaded host;
/// two near-simultaneous requests can never both observe an empty slot.
pub struct SignInArbitrator {
    launcher: Arc<dyn AuthFlowLauncher>,
    pending: Mutex<Option<PendingSignIn>>,
}

impl SignInArbitrator {
    pub fn new(launcher: Arc<dyn AuthFlowLauncher>) -> Self {
        Self {
            launcher,
            pending: Mutex::new(None),
        }
    }

    /// Accept a sign-in request and launch the external flow.
    ///
    /// Returns the receiver the caller awaits; this call itself never
    /// resolves it. Fails with `MissingClientId` for an empty identifier and
    /// `AlreadyInProgress` while another request occupies the slot — the new
    /// request is neither queued nor allowed to overwrite.
    #[instrument(skip(self))]
    pub fn begin_sign_in(&self, server_client_id: &str) -> Result<SignInReceiver> {
        if server_client_id.is_empty() {
            return Err(StreamlineError::MissingClientId);
        }

        let request_id = RequestId::new();
        let (tx, rx) = oneshot::channel();

        {
            let mut slot = self.pending.lock().expect("pending slot lock poisoned");
            if let Some(ref existing) = *slot {
                warn!(
                    pending_request = %existing.request_id,
                    "sign-in rejected — another request is in flight"
                );
                return Err(StreamlineError::AlreadyInProgress);
            }
            *slot = Some(PendingSignIn {
                request_id,
                resolver: tx,
                launched_at: Utc::now(),
            });
        }

        // Exactly one external launch per accepted request. A failed launch
        // would leave the slot occupied with no completion ever coming, so
        // clear it and surface the launcher error instead.
        if let Err(e) = self.launcher.launch_sign_in(server_client_id) {
            self.pending.lock().expect("pending slot lock poisoned").take();
            warn!(error = %e, "external sign-in launch failed");
            return Err(e);
        }

        info!(request_id = %request_id, "sign-in accepted, external flow launched");
        Ok(rx)
    }

    /// Deliver the external flow's outcome to the pending caller.
    ///
    /// Called once per flow completion, from whatever thread the platform
    /// callback arrives on. With no pending request this is a no-op. The
    /// slot is taken before the outcome is inspected, so it is cleared on
    /// every path — success, failure, or abort.
    #[instrument(skip(self, outcome))]
    pub fn complete_sign_in(&self, outcome: SignInOutcome) {
        let pending = self.pending.lock().expect("pending slot lock poisoned").take();

        let Some(pending) = pending else {
            warn!("sign-in completion with no pending request — ignoring");
            return;
        };

        let result = match outcome {
            SignInOutcome::Success(claims) => {
                info!(request_id = %pending.request_id, "sign-in succeeded");
                Ok(claims)
            }
            SignInOutcome::Failure { status_code, message } => {
                warn!(
                    request_id = %pending.request_id,
                    status_code,
                    "sign-in failed: {message}"
                );
                Err(StreamlineError::SignInFailed {
                    code: status_code,
                    message,
                })
            }
            SignInOutcome::Aborted => {
                info!(request_id = %pending.request_id, "sign-in aborted");
                Err(StreamlineError::SignInAborted)
            }
        };

        // A dropped receiver means the caller went away; nothing to resolve.
        if pending.resolver.send(result).is_err() {
            debug!(
                request_id = %pending.request_id,
                "sign-in caller no longer waiting"
            );
        }
    }

    /// Tear down the provider session. Always resolves `true`: a missing
    /// session and a successful sign-out are indistinguishable to the
    /// caller, and launcher errors are logged rather than surfaced. Does not
    /// touch a pending sign-in request.
    #[instrument(skip(self))]
    pub fn sign_out(&self) -> bool {
        if let Err(e) = self.launcher.sign_out() {
            warn!(error = %e, "sign-out reported an error — resolving true anyway");
        }
        true
    }

    /// Whether a request currently occupies the slot.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .expect("pending slot lock poisoned")
            .is_some()
    }

    /// Diagnostic snapshot of the pending request, if any.
    pub fn pending_info(&self) -> Option<PendingSignInInfo> {
        self.pending
            .lock()
            .expect("pending slot lock poisoned")
            .as_ref()
            .map(|p| PendingSignInInfo {
                request_id: p.request_id,
                launched_at: p.launched_at,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Records launches; optionally fails them.
    struct FakeLauncher {
        launches: StdMutex<Vec<String>>,
        fail_launch: bool,
        fail_sign_out: bool,
    }

    impl FakeLauncher {
        fn new() -> Self {
            Self {
                launches: StdMutex::new(Vec::new()),
                fail_launch: false,
                fail_sign_out: false,
            }
        }

        fn launches(&self) -> Vec<String> {
            self.launches.lock().expect("launch log lock").clone()
        }
    }

    impl AuthFlowLauncher for FakeLauncher {
        fn launch_sign_in(&self, server_client_id: &str) -> Result<()> {
            self.launches
                .lock()
                .expect("launch log lock")
                .push(server_client_id.to_string());
            if self.fail_launch {
                return Err(StreamlineError::Bridge("launch refused".into()));
            }
            Ok(())
        }

        fn sign_out(&self) -> Result<()> {
            if self.fail_sign_out {
                return Err(StreamlineError::PlatformUnavailable);
            }
            Ok(())
        }
    }

    fn arbitrator() -> (Arc<FakeLauncher>, SignInArbitrator) {
        let launcher = Arc::new(FakeLauncher::new());
        let arb = SignInArbitrator::new(launcher.clone());
        (launcher, arb)
    }

    #[test]
    fn empty_client_id_is_rejected_without_creating_a_request() {
        let (launcher, arb) = arbitrator();

        let err = arb.begin_sign_in("").expect_err("must reject");
        assert!(matches!(err, StreamlineError::MissingClientId));
        assert!(!arb.is_pending());
        assert!(launcher.launches().is_empty());
    }

    #[test]
    fn accepted_request_launches_exactly_once() {
        let (launcher, arb) = arbitrator();

        let _rx = arb.begin_sign_in("client-123").expect("accept");
        assert!(arb.is_pending());
        assert_eq!(launcher.launches(), vec!["client-123".to_string()]);
    }

    #[test]
    fn second_request_conflicts_and_leaves_first_untouched() {
        let (launcher, arb) = arbitrator();

        let first_rx = arb.begin_sign_in("first").expect("accept first");
        let first_info = arb.pending_info().expect("pending info");

        let err = arb.begin_sign_in("second").expect_err("must conflict");
        assert!(matches!(err, StreamlineError::AlreadyInProgress));

        // First slot untouched, no second launch dispatched.
        assert_eq!(arb.pending_info().expect("still pending"), first_info);
        assert_eq!(launcher.launches(), vec!["first".to_string()]);

        // The first caller still resolves normally.
        arb.complete_sign_in(SignInOutcome::Success(AccountClaims::default()));
        let mut first_rx = first_rx;
        first_rx
            .try_recv()
            .expect("resolved")
            .expect("success result");
    }

    #[test]
    fn completion_with_no_pending_request_is_a_no_op() {
        let (_, arb) = arbitrator();
        // Must neither panic nor resolve anyone.
        arb.complete_sign_in(SignInOutcome::Aborted);
        assert!(!arb.is_pending());
    }

    #[test]
    fn success_passes_claims_through_verbatim() {
        let (_, arb) = arbitrator();
        let mut rx = arb.begin_sign_in("client-123").expect("accept");

        let claims = AccountClaims {
            id_token: Some("tok".into()),
            email: Some("a@b.com".into()),
            ..AccountClaims::default()
        };
        arb.complete_sign_in(SignInOutcome::Success(claims.clone()));

        let resolved = rx.try_recv().expect("resolved").expect("success");
        assert_eq!(resolved, claims);
        assert!(resolved.display_name.is_none());
        assert!(!arb.is_pending());
    }

    #[test]
    fn failure_carries_provider_code_and_message() {
        let (_, arb) = arbitrator();
        let mut rx = arb.begin_sign_in("client-123").expect("accept");

        arb.complete_sign_in(SignInOutcome::Failure {
            status_code: 7,
            message: "m".into(),
        });

        let err = rx.try_recv().expect("resolved").expect_err("failure");
        match err {
            StreamlineError::SignInFailed { code, message } => {
                assert_eq!(code, 7);
                assert_eq!(message, "m");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!arb.is_pending());
    }

    #[test]
    fn abort_resolves_as_generic_failure_and_clears_slot() {
        let (_, arb) = arbitrator();
        let mut rx = arb.begin_sign_in("client-123").expect("accept");

        arb.complete_sign_in(SignInOutcome::Aborted);

        let err = rx.try_recv().expect("resolved").expect_err("aborted");
        assert!(matches!(err, StreamlineError::SignInAborted));
        assert!(!arb.is_pending());
    }

    #[test]
    fn slot_is_reusable_after_any_completion() {
        let (launcher, arb) = arbitrator();

        let _rx = arb.begin_sign_in("one").expect("accept one");
        arb.complete_sign_in(SignInOutcome::Aborted);

        let mut rx = arb.begin_sign_in("two").expect("accept two");
        arb.complete_sign_in(SignInOutcome::Success(AccountClaims::default()));
        rx.try_recv().expect("resolved").expect("success");

        assert_eq!(launcher.launches(), vec!["one".to_string(), "two".to_string()]);
        assert!(!arb.is_pending());
    }

    #[test]
    fn failed_launch_clears_the_slot() {
        let launcher = Arc::new(FakeLauncher {
            fail_launch: true,
            ..FakeLauncher::new()
        });
        let arb = SignInArbitrator::new(launcher.clone());

        let err = arb.begin_sign_in("client-123").expect_err("launch fails");
        assert!(matches!(err, StreamlineError::Bridge(_)));
        assert!(!arb.is_pending());

        // A fresh attempt is admitted (and fails the same way).
        arb.begin_sign_in("client-123").expect_err("launch fails again");
        assert_eq!(launcher.launches().len(), 2);
    }

    #[test]
    fn completion_with_dropped_caller_still_clears_slot() {
        let (_, arb) = arbitrator();

        let rx = arb.begin_sign_in("client-123").expect("accept");
        drop(rx);

        arb.complete_sign_in(SignInOutcome::Success(AccountClaims::default()));
        assert!(!arb.is_pending());
    }

    #[test]
    fn sign_out_always_resolves_true() {
        let (_, arb) = arbitrator();
        assert!(arb.sign_out());

        let failing = SignInArbitrator::new(Arc::new(FakeLauncher {
            fail_sign_out: true,
            ..FakeLauncher::new()
        }));
        assert!(failing.sign_out());
    }

    #[test]
    fn sign_out_does_not_disturb_a_pending_request() {
        let (_, arb) = arbitrator();
        let mut rx = arb.begin_sign_in("client-123").expect("accept");

        assert!(arb.sign_out());
        assert!(arb.is_pending());

        arb.complete_sign_in(SignInOutcome::Success(AccountClaims::default()));
        rx.try_recv().expect("resolved").expect("success");
    }

    #[tokio::test]
    async fn end_to_end_success_scenario() {
        let (launcher, arb) = arbitrator();
        let arb = Arc::new(arb);

        let rx = arb.begin_sign_in("client-123").expect("accept");
        assert_eq!(launcher.launches(), vec!["client-123".to_string()]);

        // Completion arrives from another task, as the platform callback would.
        let completer = arb.clone();
        tokio::spawn(async move {
            completer.complete_sign_in(SignInOutcome::Success(AccountClaims {
                id_token: Some("tok".into()),
                email: Some("a@b.com".into()),
                ..AccountClaims::default()
            }));
        });

        let claims = rx.await.expect("resolved").expect("success");
        assert_eq!(claims.id_token.as_deref(), Some("tok"));
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert!(claims.family_name.is_none());

        // Slot is empty — the next request is admitted.
        assert!(!arb.is_pending());
        let _rx = arb.begin_sign_in("client-456").expect("next accepted");
    }
}
