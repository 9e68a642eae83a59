// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Streamline.

use thiserror::Error;

/// Top-level error type for all Streamline operations.
#[derive(Debug, Error)]
pub enum StreamlineError {
    // -- Sign-in errors --
    #[error("serverClientId is required")]
    MissingClientId,

    #[error("a sign-in is already in progress")]
    AlreadyInProgress,

    #[error("sign-in failed: provider status {code}: {message}")]
    SignInFailed { code: i32, message: String },

    #[error("sign-in aborted before the external flow produced a result")]
    SignInAborted,

    // -- Method channel --
    #[error("method not implemented: {0}")]
    NotImplemented(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl StreamlineError {
    /// Stable error code reported over the method channel.
    ///
    /// These strings are part of the wire contract with the embedded runtime
    /// and must not change between releases.
    pub fn channel_code(&self) -> &'static str {
        match self {
            Self::MissingClientId => "MISSING_CLIENT_ID",
            Self::AlreadyInProgress => "ALREADY_IN_PROGRESS",
            Self::SignInFailed { .. } => "SIGN_IN_FAILED",
            Self::SignInAborted => "SIGN_IN_ABORTED",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Bridge(_) => "BRIDGE_ERROR",
            Self::PlatformUnavailable => "PLATFORM_UNAVAILABLE",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StreamlineError>;
