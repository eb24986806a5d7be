//! Platform capability seam
//!
//! The host biometric subsystem is reduced to a single asynchronous
//! evaluation call plus two synchronous capability queries. Everything else
//! in this workspace is policy layered on top of this trait.

use std::time::Duration;

use async_trait::async_trait;

use biolock_core::{BiometryClass, EvalPolicy};

/// Everything the platform needs to present one authentication dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalPrompt {
    /// Reason displayed in the authentication dialog
    pub reason: String,
    /// Cancel button title, `None` for the platform default
    pub cancel_title: Option<String>,
    /// Fallback button title, `None` hides or defaults per platform rules
    pub fallback_title: Option<String>,
    /// Accept a successful device unlock from up to this long ago
    pub reuse_duration: Option<Duration>,
}

/// The host biometric/passcode subsystem.
///
/// `evaluate` is the one opaque external call: it resolves asynchronously
/// with success or a raw platform error code, and its timeout/lockout policy
/// is the platform's own. The capability queries are re-evaluated on every
/// call since enrollment state can change between them; none of them mutate
/// session state.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// Run one evaluation of the given policy. `Err` carries the raw
    /// platform error code.
    async fn evaluate(&self, policy: EvalPolicy, prompt: &EvalPrompt)
        -> std::result::Result<(), i32>;

    /// Whether the given policy can currently be evaluated at all
    fn can_evaluate(&self, policy: EvalPolicy) -> bool;

    /// Which sensor modality the device exposes
    fn biometry_class(&self) -> BiometryClass;

    /// Device supports some biometric factor and it is currently usable
    fn can_authenticate(&self) -> bool {
        self.can_evaluate(EvalPolicy::Biometry)
    }

    /// Usable face-class sensor present
    fn has_face_class(&self) -> bool {
        self.can_evaluate(EvalPolicy::Biometry) && self.biometry_class() == BiometryClass::Face
    }

    /// Usable fingerprint-class sensor present
    fn has_fingerprint_class(&self) -> bool {
        self.can_evaluate(EvalPolicy::Biometry)
            && self.biometry_class() == BiometryClass::Fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDevice {
        usable: bool,
        class: BiometryClass,
    }

    #[async_trait]
    impl Authenticator for StubDevice {
        async fn evaluate(
            &self,
            _policy: EvalPolicy,
            _prompt: &EvalPrompt,
        ) -> std::result::Result<(), i32> {
            Ok(())
        }

        fn can_evaluate(&self, _policy: EvalPolicy) -> bool {
            self.usable
        }

        fn biometry_class(&self) -> BiometryClass {
            self.class
        }
    }

    #[test]
    fn test_capability_queries() {
        let face = StubDevice {
            usable: true,
            class: BiometryClass::Face,
        };
        assert!(face.can_authenticate());
        assert!(face.has_face_class());
        assert!(!face.has_fingerprint_class());

        let finger = StubDevice {
            usable: true,
            class: BiometryClass::Fingerprint,
        };
        assert!(finger.has_fingerprint_class());
        assert!(!finger.has_face_class());
    }

    #[test]
    fn test_unusable_sensor_reports_no_class() {
        // An enrolled-but-locked or missing sensor must not claim a class.
        let device = StubDevice {
            usable: false,
            class: BiometryClass::Face,
        };
        assert!(!device.can_authenticate());
        assert!(!device.has_face_class());
        assert!(!device.has_fingerprint_class());
    }
}
