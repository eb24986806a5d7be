//! System settings redirection
//!
//! When biometry is unavailable because nothing is enrolled (or no passcode
//! is set), the session can offer to send the user to the system settings
//! surface. Opening that surface is a host concern behind [`SettingsOpener`].

/// Well-known URI for the host's app settings surface
pub const SETTINGS_URI: &str = "app-settings:";

/// Host hook for opening a system settings surface.
///
/// Returns `true` if the host accepted the request; the session only arms
/// its return-to-foreground retry when the redirect actually happened.
pub trait SettingsOpener: Send + Sync + 'static {
    fn open(&self, uri: &str) -> bool;
}

/// Default opener for hosts without a settings surface; always refuses.
pub struct NoopSettingsOpener;

impl SettingsOpener for NoopSettingsOpener {
    fn open(&self, _uri: &str) -> bool {
        false
    }
}
