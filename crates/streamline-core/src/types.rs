// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Streamline native bridge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a caller awaiting a sign-in result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account claims returned by a successful sign-in.
///
/// Every field is optional — the provider may withhold any of them.  Fields
/// serialize in camelCase so the embedded runtime sees `idToken`, `photoUrl`,
/// etc., with absent values surfaced as JSON `null` rather than omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountClaims {
    pub id_token: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Terminal result of an external authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The external flow produced an account.
    Success(AccountClaims),
    /// The external flow reported a provider-specific error.
    Failure { status_code: i32, message: String },
    /// The external flow was cancelled or interrupted before producing any
    /// status (e.g. the user backed out of the chooser).
    Aborted,
}

/// Derived navigation-bar visibility.  Computed from the current window
/// flags on every query — never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavVisibility {
    Visible,
    Hidden,
}

/// System-UI visibility flag bitset applied to the host window's decor view.
///
/// Values mirror the Android `View.SYSTEM_UI_FLAG_*` constants so the JNI
/// layer can pass them through unmodified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemUiFlags(pub u32);

impl SystemUiFlags {
    /// `View.SYSTEM_UI_FLAG_HIDE_NAVIGATION`
    pub const HIDE_NAVIGATION: Self = Self(0x0000_0002);
    /// `View.SYSTEM_UI_FLAG_FULLSCREEN`
    pub const FULLSCREEN: Self = Self(0x0000_0004);
    /// `View.SYSTEM_UI_FLAG_LAYOUT_HIDE_NAVIGATION`
    pub const LAYOUT_HIDE_NAVIGATION: Self = Self(0x0000_0200);
    /// `View.SYSTEM_UI_FLAG_LAYOUT_FULLSCREEN`
    pub const LAYOUT_FULLSCREEN: Self = Self(0x0000_0400);
    /// `View.SYSTEM_UI_FLAG_IMMERSIVE_STICKY`
    pub const IMMERSIVE_STICKY: Self = Self(0x0000_1000);

    /// Empty flag set (all system UI shown, normal layout).
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Derive navigation-bar visibility from this flag set.
    pub const fn nav_visibility(self) -> NavVisibility {
        if self.contains(Self::HIDE_NAVIGATION) {
            NavVisibility::Hidden
        } else {
            NavVisibility::Visible
        }
    }
}

impl std::ops::BitOr for SystemUiFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for SystemUiFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Diagnostic snapshot of a pending sign-in request.
///
/// Exposed for logging and debugging only — the resolver itself never leaves
/// the arbitrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSignInInfo {
    pub request_id: RequestId,
    pub launched_at: DateTime<Utc>,
}
