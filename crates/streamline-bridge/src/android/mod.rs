// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Window-flag reads/writes and animator scheduling complete synchronously
// via JNI and are expected to run on the platform main thread (the method
// channel handler already does).
//
// `launch_sign_in` dispatches the Google Sign-In Intent through
// `startActivityForResult` and returns immediately. The host Activity must
// recognise [`REQUEST_SIGN_IN`] in its `onActivityResult` override, extract
// the `GoogleSignInAccount` (or the `ApiException` status), and forward the
// outcome to `SignInArbitrator::complete_sign_in`.

#![cfg(target_os = "android")]

use jni::JNIEnv;
use jni::objects::{JObject, JString, JValue, JValueOwned};

use streamline_core::error::{Result, StreamlineError};
use streamline_core::types::SystemUiFlags;

use crate::traits::{AuthFlowLauncher, PlatformBridge, WindowChrome};

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Request code for the sign-in `startActivityForResult` round trip. The
/// host Activity must recognise this in its `onActivityResult` override.
pub const REQUEST_SIGN_IN: i32 = 1001;

const SIGN_IN_OPTIONS_CLASS: &str = "com/google/android/gms/auth/api/signin/GoogleSignInOptions";
const SIGN_IN_OPTIONS_BUILDER_CLASS: &str =
    "com/google/android/gms/auth/api/signin/GoogleSignInOptions$Builder";
const SIGN_IN_CLASS: &str = "com/google/android/gms/auth/api/signin/GoogleSignIn";
const SIGN_IN_CLIENT_CLASS: &str = "com/google/android/gms/auth/api/signin/GoogleSignInClient";

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by the NDK glue code, then attaches the current thread if it is not
/// already attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| StreamlineError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    vm.attach_current_thread()
        .map_err(|e| StreamlineError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(StreamlineError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `StreamlineError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> StreamlineError {
    StreamlineError::Bridge(format!("{context}: {e}"))
}

/// Resolve the decor view of the hosting Activity's window.
fn decor_view<'a>(env: &mut JNIEnv<'a>, activity: &JObject<'a>) -> Result<JObject<'a>> {
    let window: JObject = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])
        .map_err(|e| jni_err("getWindow", e))?
        .l()
        .map_err(|e| jni_err("getWindow->l", e))?;

    env.call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
        .map_err(|e| jni_err("getDecorView", e))?
        .l()
        .map_err(|e| jni_err("getDecorView->l", e))
}

/// Unwrap an object return value, mapping both failure layers to `Bridge`.
fn object_result<'a>(context: &str, v: jni::errors::Result<JValueOwned<'a>>) -> Result<JObject<'a>> {
    v.map_err(|e| jni_err(context, e))?
        .l()
        .map_err(|e| jni_err(&format!("{context}->l"), e))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Streamline platform bridge.
///
/// All methods go through JNI to call the Android SDK. The struct is
/// zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }

    /// Build a `GoogleSignInClient` for the hosting Activity.
    ///
    /// `server_client_id` of `Some` requests an ID token on top of the
    /// default email scope; `None` yields the default options (sufficient
    /// for `signOut`).
    fn sign_in_client<'a>(
        env: &mut JNIEnv<'a>,
        activity: &JObject<'a>,
        server_client_id: Option<&str>,
    ) -> Result<JObject<'a>> {
        // GoogleSignInOptions.DEFAULT_SIGN_IN
        let default_options = env
            .get_static_field(
                SIGN_IN_OPTIONS_CLASS,
                "DEFAULT_SIGN_IN",
                format!("L{SIGN_IN_OPTIONS_CLASS};"),
            )
            .map_err(|e| jni_err("DEFAULT_SIGN_IN", e))?
            .l()
            .map_err(|e| jni_err("DEFAULT_SIGN_IN->l", e))?;

        // new GoogleSignInOptions.Builder(DEFAULT_SIGN_IN).requestEmail()
        let builder: JObject = env
            .new_object(
                SIGN_IN_OPTIONS_BUILDER_CLASS,
                format!("(L{SIGN_IN_OPTIONS_CLASS};)V"),
                &[JValue::Object(&default_options)],
            )
            .map_err(|e| jni_err("new GoogleSignInOptions.Builder", e))?;

        let builder = object_result(
            "requestEmail",
            env.call_method(
                &builder,
                "requestEmail",
                format!("()L{SIGN_IN_OPTIONS_BUILDER_CLASS};"),
                &[],
            ),
        )?;

        // .requestIdToken(serverClientId) — only when an ID was supplied
        let builder = match server_client_id {
            Some(id) => {
                let j_id: JString = env
                    .new_string(id)
                    .map_err(|e| jni_err("new_string(serverClientId)", e))?;
                object_result(
                    "requestIdToken",
                    env.call_method(
                        &builder,
                        "requestIdToken",
                        format!("(Ljava/lang/String;)L{SIGN_IN_OPTIONS_BUILDER_CLASS};"),
                        &[JValue::Object(&j_id)],
                    ),
                )?
            }
            None => builder,
        };

        let options = object_result(
            "GoogleSignInOptions.Builder.build",
            env.call_method(
                &builder,
                "build",
                format!("()L{SIGN_IN_OPTIONS_CLASS};"),
                &[],
            ),
        )?;

        // GoogleSignIn.getClient(activity, options)
        object_result(
            "GoogleSignIn.getClient",
            env.call_static_method(
                SIGN_IN_CLASS,
                "getClient",
                format!("(Landroid/content/Context;L{SIGN_IN_OPTIONS_CLASS};)L{SIGN_IN_CLIENT_CLASS};"),
                &[JValue::Object(activity), JValue::Object(&options)],
            ),
        )
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// AuthFlowLauncher — com.google.android.gms.auth.api.signin
// ---------------------------------------------------------------------------

impl AuthFlowLauncher for AndroidBridge {
    /// Dispatch the Google Sign-In chooser via `startActivityForResult`.
    ///
    /// Returns once the Intent is in flight. The account (or the failure
    /// status) arrives asynchronously via `onActivityResult` with request
    /// code [`REQUEST_SIGN_IN`].
    fn launch_sign_in(&self, server_client_id: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!("Android: launching Google Sign-In intent");

        let client = Self::sign_in_client(&mut env, &activity, Some(server_client_id))?;

        let sign_in_intent = object_result(
            "getSignInIntent",
            env.call_method(&client, "getSignInIntent", "()Landroid/content/Intent;", &[]),
        )?;

        env.call_method(
            &activity,
            "startActivityForResult",
            "(Landroid/content/Intent;I)V",
            &[JValue::Object(&sign_in_intent), JValue::Int(REQUEST_SIGN_IN)],
        )
        .map_err(|e| jni_err("startActivityForResult(signIn)", e))?;

        tracing::info!(
            request_code = REQUEST_SIGN_IN,
            "Android: sign-in intent dispatched — awaiting onActivityResult"
        );
        Ok(())
    }

    /// Tear down the Google session via `GoogleSignInClient.signOut()`.
    ///
    /// The returned `Task` is not awaited — the original channel contract
    /// resolves `true` regardless of its completion, and a missing session
    /// is indistinguishable from a successful sign-out.
    fn sign_out(&self) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let client = Self::sign_in_client(&mut env, &activity, None)?;

        env.call_method(
            &client,
            "signOut",
            "()Lcom/google/android/gms/tasks/Task;",
            &[],
        )
        .map_err(|e| jni_err("GoogleSignInClient.signOut", e))?;

        tracing::info!("Android: sign-out dispatched");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WindowChrome — android.view.View system-UI visibility
// ---------------------------------------------------------------------------

impl WindowChrome for AndroidBridge {
    fn system_ui_flags(&self) -> Result<SystemUiFlags> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let decor = decor_view(&mut env, &activity)?;

        let raw = env
            .call_method(&decor, "getSystemUiVisibility", "()I", &[])
            .map_err(|e| jni_err("getSystemUiVisibility", e))?
            .i()
            .map_err(|e| jni_err("getSystemUiVisibility->i", e))?;

        Ok(SystemUiFlags(raw as u32))
    }

    fn apply_system_ui_flags(&self, flags: SystemUiFlags) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let decor = decor_view(&mut env, &activity)?;

        env.call_method(
            &decor,
            "setSystemUiVisibility",
            "(I)V",
            &[JValue::Int(flags.0 as i32)],
        )
        .map_err(|e| jni_err("setSystemUiVisibility", e))?;

        tracing::debug!("Android: system-UI flags applied: {:#06x}", flags.0);
        Ok(())
    }

    /// Schedule the fade envelope on the decor view.
    ///
    /// Implemented as a single keyframed `ObjectAnimator` (1.0 → dim → 1.0)
    /// rather than chained `ViewPropertyAnimator` end-actions, which would
    /// require a Java `Runnable` shim.
    fn fade_pulse(&self, dim_alpha: f32, duration_ms: u32, restore_ms: u32) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let decor = decor_view(&mut env, &activity)?;

        let keyframes = env
            .new_float_array(3)
            .map_err(|e| jni_err("new_float_array", e))?;
        env.set_float_array_region(&keyframes, 0, &[1.0, dim_alpha, 1.0])
            .map_err(|e| jni_err("set_float_array_region", e))?;

        let j_property: JString = env
            .new_string("alpha")
            .map_err(|e| jni_err("new_string(alpha)", e))?;

        let animator = object_result(
            "ObjectAnimator.ofFloat",
            env.call_static_method(
                "android/animation/ObjectAnimator",
                "ofFloat",
                "(Ljava/lang/Object;Ljava/lang/String;[F)Landroid/animation/ObjectAnimator;",
                &[
                    JValue::Object(&decor),
                    JValue::Object(&j_property),
                    JValue::Object(&keyframes),
                ],
            ),
        )?;

        env.call_method(
            &animator,
            "setDuration",
            "(J)Landroid/animation/ObjectAnimator;",
            &[JValue::Long(i64::from(duration_ms + restore_ms))],
        )
        .map_err(|e| jni_err("setDuration", e))?;

        env.call_method(&animator, "start", "()V", &[])
            .map_err(|e| jni_err("ObjectAnimator.start", e))?;

        tracing::debug!(duration_ms, restore_ms, "Android: fade pulse scheduled");
        Ok(())
    }
}
