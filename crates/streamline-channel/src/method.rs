// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-call envelope and channel error shape.
//
// The embedded runtime delivers each invocation as a method name plus a JSON
// argument map; replies are a JSON value or an error triple of
// (code, message, details). The transport itself is the embedder's concern.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use streamline_core::error::StreamlineError;

/// A single invocation received over a method channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name, e.g. `"hideNavigationBar"`.
    pub method: String,
    /// JSON argument map. `Value::Null` when the method takes no arguments.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// Look up a string argument. Absent or non-string values yield `None`.
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }

    /// Look up a non-negative integer argument. Absent, negative, or
    /// out-of-range values yield `None` so the caller's default applies.
    pub fn arg_u32(&self, key: &str) -> Option<u32> {
        self.arguments
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }
}

/// Error reply surfaced to the embedded runtime.
///
/// Mirrors the transport's three-part error shape. For `SIGN_IN_FAILED` the
/// `message` carries the provider status code rendered as a string and
/// `details` the provider message, matching the original channel contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<StreamlineError> for ChannelError {
    fn from(err: StreamlineError) -> Self {
        let code = err.channel_code().to_string();
        match err {
            StreamlineError::SignInFailed { code: status, message } => Self {
                code,
                message: status.to_string(),
                details: Some(message),
            },
            other => Self {
                code,
                message: other.to_string(),
                details: None,
            },
        }
    }
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
