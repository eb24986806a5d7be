//! Shared types for the authentication flow

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which sensor modality the device exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiometryClass {
    /// No biometric sensor available
    #[default]
    None,
    /// Face-recognition class sensor
    Face,
    /// Fingerprint class sensor
    Fingerprint,
}

/// Authentication strength requested from the platform capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalPolicy {
    /// Biometrics only; the user may still request fallback via the prompt
    Biometry,
    /// Biometrics or the device passcode
    DeviceOwner,
}

/// One authentication request, immutable for the lifetime of the attempt
/// chain (automatic retries re-issue the same request).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    /// Reason shown in the authentication dialog. `None` selects a default
    /// based on the device's biometry class.
    pub reason: Option<String>,
    /// Fallback button title. `None` uses the message table's default;
    /// an empty string hides the button.
    pub fallback_title: Option<String>,
    /// Cancel button title. `None` uses the platform default.
    pub cancel_title: Option<String>,
    /// Window after a successful device unlock within which the platform
    /// may skip re-prompting.
    pub reuse_duration: Option<Duration>,
}

impl AuthRequest {
    /// Request with a caller-supplied reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Request using the default per-class reason
    pub fn with_default_reason() -> Self {
        Self::default()
    }

    /// Set the fallback button title
    pub fn fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = Some(title.into());
        self
    }

    /// Set the cancel button title
    pub fn cancel_title(mut self, title: impl Into<String>) -> Self {
        self.cancel_title = Some(title.into());
        self
    }

    /// Honor a successful unlock from up to `duration` ago
    pub fn reuse_duration(mut self, duration: Duration) -> Self {
        self.reuse_duration = Some(duration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = AuthRequest::new("pay")
            .fallback_title("Use Passcode")
            .cancel_title("Not Now")
            .reuse_duration(Duration::from_secs(10));

        assert_eq!(request.reason.as_deref(), Some("pay"));
        assert_eq!(request.fallback_title.as_deref(), Some("Use Passcode"));
        assert_eq!(request.cancel_title.as_deref(), Some("Not Now"));
        assert_eq!(request.reuse_duration, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_default_request_has_no_reason() {
        let request = AuthRequest::with_default_reason();
        assert!(request.reason.is_none());
    }
}
