//! Biolock Session - retry/fallback controller over a platform biometric
//! capability
//!
//! This crate owns the authentication attempt lifecycle: it drives the
//! platform's evaluation call through the [`Authenticator`] seam, folds raw
//! failures into the `biolock-core` taxonomy, and applies the per-kind
//! policy (foreground-deferred retry, passcode fallback, settings redirect,
//! terminal alert). Presentation stays outside: the session emits
//! [`Intent`]s and the embedding adapter answers them.

pub mod authenticator;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod settings;

pub use authenticator::{Authenticator, EvalPrompt};
pub use config::{ConfigError, SessionConfig};
pub use error::{Result, SessionError};
pub use lifecycle::{LifecycleEvent, LifecycleRelay};
pub use session::{
    Intent, PromptChoice, SessionBuilder, SessionHandle, SessionSnapshot, SessionState,
};
pub use settings::{NoopSettingsOpener, SettingsOpener, SETTINGS_URI};

pub use biolock_core::{
    classify, AuthErrorKind, AuthRequest, BiometryClass, EvalPolicy, FailurePolicy, MessageTable,
};
