//! User-facing message table
//!
//! Every string shown during the authentication flow lives here so the
//! embedding application can override the table wholesale (or per field,
//! via serde defaults).

use serde::{Deserialize, Serialize};

use crate::kind::AuthErrorKind;
use crate::types::BiometryClass;

/// Display strings for the authentication flow, with English defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTable {
    // General
    pub app_cancel: String,
    pub invalid_credentials: String,
    pub biometry_not_available: String,
    pub system_cancelled: String,
    pub user_cancelled: String,
    pub user_fallback: String,
    pub invalid_context: String,

    // Button titles
    pub settings: String,
    pub cancel: String,
    pub try_again: String,

    // Fingerprint class
    pub fingerprint_auth_reason: String,
    pub fingerprint_locked: String,
    pub set_passcode_for_fingerprint: String,
    pub no_fingerprint_enrolled: String,
    pub fingerprint_failed: String,

    // Face class
    pub face_auth_reason: String,
    pub face_locked: String,
    pub set_passcode_for_face: String,
    pub no_face_enrolled: String,
    pub face_failed: String,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self {
            app_cancel: "Authentication was cancelled by application.".into(),
            invalid_credentials: "Failed to provide valid credentials.".into(),
            biometry_not_available: "Biometric authentication is not available for this device."
                .into(),
            system_cancelled: "Biometric authentication is cancelled by system.".into(),
            user_cancelled: "Authentication was cancelled by user".into(),
            user_fallback: "Enter Passcode".into(),
            invalid_context: "The context is invalid".into(),

            settings: "Settings".into(),
            cancel: "Cancel".into(),
            try_again: "Try Again".into(),

            fingerprint_auth_reason: "Touch ID required to authenticate.".into(),
            fingerprint_locked: "Touch ID is locked now, because of too many failed attempts. \
                                 Enter passcode to unlock Touch ID."
                .into(),
            set_passcode_for_fingerprint: "Please set device passcode to use Touch ID for \
                                           authentication."
                .into(),
            no_fingerprint_enrolled: "There are no fingerprints enrolled in the device. Please \
                                      go to Device Settings -> Touch ID & Passcode and enroll \
                                      your fingerprints."
                .into(),
            fingerprint_failed: "Touch ID does not recognize your fingerprint. Please try again \
                                 with your enrolled fingerprint."
                .into(),

            face_auth_reason: "Face ID required to authenticate.".into(),
            face_locked: "Face ID is locked now, because of too many failed attempts. Enter \
                          passcode to unlock Face ID."
                .into(),
            set_passcode_for_face: "Please set device passcode to use Face ID for \
                                    authentication."
                .into(),
            no_face_enrolled: "There is no face enrolled in the device. Please go to Device \
                               Settings -> Face ID & Passcode and enroll your face."
                .into(),
            face_failed: "Face ID does not recognize your face. Please try again with your \
                          enrolled face."
                .into(),
        }
    }
}

impl MessageTable {
    /// Resolve the display message for a failure kind.
    ///
    /// Enrollment, lockout, and default-failure messages depend on the
    /// device's biometry class; a face-class device gets the face strings,
    /// everything else gets the fingerprint strings.
    pub fn message(&self, kind: AuthErrorKind, class: BiometryClass) -> &str {
        let face = class == BiometryClass::Face;
        match kind {
            AuthErrorKind::AppCancel => &self.app_cancel,
            AuthErrorKind::AuthenticationFailed => &self.invalid_credentials,
            AuthErrorKind::UserFallback => &self.user_fallback,
            AuthErrorKind::UserCancel => &self.user_cancelled,
            AuthErrorKind::SystemCancel => &self.system_cancelled,
            AuthErrorKind::BiometryNotAvailable => &self.biometry_not_available,
            AuthErrorKind::PasscodeNotSet => {
                if face {
                    &self.set_passcode_for_face
                } else {
                    &self.set_passcode_for_fingerprint
                }
            }
            AuthErrorKind::BiometryNotEnrolled => {
                if face {
                    &self.no_face_enrolled
                } else {
                    &self.no_fingerprint_enrolled
                }
            }
            AuthErrorKind::BiometryLockedOut => {
                if face {
                    &self.face_locked
                } else {
                    &self.fingerprint_locked
                }
            }
            AuthErrorKind::InvalidContext | AuthErrorKind::Other => {
                if face {
                    &self.face_failed
                } else {
                    &self.fingerprint_failed
                }
            }
        }
    }

    /// Default reason for a biometric evaluation when the caller gave none
    pub fn default_auth_reason(&self, class: BiometryClass) -> &str {
        if class == BiometryClass::Face {
            &self.face_auth_reason
        } else {
            &self.fingerprint_auth_reason
        }
    }

    /// Default reason for a passcode evaluation (shown after lockout)
    pub fn default_passcode_reason(&self, class: BiometryClass) -> &str {
        if class == BiometryClass::Face {
            &self.face_locked
        } else {
            &self.fingerprint_locked
        }
    }
}
