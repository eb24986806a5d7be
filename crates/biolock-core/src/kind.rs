//! Error taxonomy and failure policy
//!
//! Raw platform error codes are folded into a closed set of
//! [`AuthErrorKind`] values by [`classify`], and every kind maps to exactly
//! one [`FailurePolicy`] that tells the session what to do next.

use serde::{Deserialize, Serialize};

/// Raw platform error codes for the biometric subsystem.
///
/// These follow the host framework's numbering. The legacy fingerprint-era
/// constants share values with their renamed successors, so they fold into
/// the same kinds.
pub mod raw {
    pub const AUTHENTICATION_FAILED: i32 = -1;
    pub const USER_CANCEL: i32 = -2;
    pub const USER_FALLBACK: i32 = -3;
    pub const SYSTEM_CANCEL: i32 = -4;
    pub const PASSCODE_NOT_SET: i32 = -5;
    pub const BIOMETRY_NOT_AVAILABLE: i32 = -6;
    pub const BIOMETRY_NOT_ENROLLED: i32 = -7;
    pub const BIOMETRY_LOCKOUT: i32 = -8;
    pub const APP_CANCEL: i32 = -9;
    pub const INVALID_CONTEXT: i32 = -10;
}

/// Closed taxonomy of authentication failures
///
/// Every raw platform code maps into exactly one of these; codes unknown to
/// the mapping table become [`AuthErrorKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthErrorKind {
    /// The embedding application cancelled the attempt
    AppCancel,
    /// The user tapped the cancel button
    UserCancel,
    /// The OS cancelled the attempt out-of-band (e.g. app lost focus)
    SystemCancel,
    /// The user tapped the fallback button, asking for passcode entry
    UserFallback,
    /// No device passcode is configured
    PasscodeNotSet,
    /// No biometric identity is enrolled on the device
    BiometryNotEnrolled,
    /// Biometry is locked after too many failed attempts
    BiometryLockedOut,
    /// The device has no usable biometric sensor
    BiometryNotAvailable,
    /// The evaluation context was invalidated
    InvalidContext,
    /// The presented biometric did not match
    AuthenticationFailed,
    /// Any code not covered by the mapping table
    Other,
}

/// What the session should do after a failure of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Retry automatically, but only once the app is foregrounded again
    RetryOnForeground,
    /// Switch to a passcode evaluation carrying the failure message as reason
    PasscodeFallback,
    /// Offer to redirect the user to system settings (or alert, if disabled)
    SettingsPrompt,
    /// Deliberate cancellation: surface to the caller, no dialog, no retry
    TerminalSilent,
    /// Show the failure message and offer a manual retry
    TerminalWithAlert,
}

/// Map a raw platform error code into the closed taxonomy.
///
/// Total over `i32`: unmapped codes return [`AuthErrorKind::Other`].
pub fn classify(raw_code: i32) -> AuthErrorKind {
    match raw_code {
        raw::AUTHENTICATION_FAILED => AuthErrorKind::AuthenticationFailed,
        raw::USER_CANCEL => AuthErrorKind::UserCancel,
        raw::USER_FALLBACK => AuthErrorKind::UserFallback,
        raw::SYSTEM_CANCEL => AuthErrorKind::SystemCancel,
        raw::PASSCODE_NOT_SET => AuthErrorKind::PasscodeNotSet,
        raw::BIOMETRY_NOT_AVAILABLE => AuthErrorKind::BiometryNotAvailable,
        raw::BIOMETRY_NOT_ENROLLED => AuthErrorKind::BiometryNotEnrolled,
        raw::BIOMETRY_LOCKOUT => AuthErrorKind::BiometryLockedOut,
        raw::APP_CANCEL => AuthErrorKind::AppCancel,
        raw::INVALID_CONTEXT => AuthErrorKind::InvalidContext,
        _ => AuthErrorKind::Other,
    }
}

impl AuthErrorKind {
    /// The failure policy associated with this kind
    pub fn policy(self) -> FailurePolicy {
        match self {
            AuthErrorKind::SystemCancel => FailurePolicy::RetryOnForeground,
            AuthErrorKind::UserFallback | AuthErrorKind::BiometryLockedOut => {
                FailurePolicy::PasscodeFallback
            }
            AuthErrorKind::BiometryNotEnrolled | AuthErrorKind::PasscodeNotSet => {
                FailurePolicy::SettingsPrompt
            }
            AuthErrorKind::UserCancel | AuthErrorKind::AppCancel => FailurePolicy::TerminalSilent,
            AuthErrorKind::BiometryNotAvailable
            | AuthErrorKind::InvalidContext
            | AuthErrorKind::AuthenticationFailed
            | AuthErrorKind::Other => FailurePolicy::TerminalWithAlert,
        }
    }
}
