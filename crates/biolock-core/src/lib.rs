//! Biolock Core - Error taxonomy and policy mapping for biometric sessions
//!
//! This crate provides the pure, platform-independent pieces of the biolock
//! authentication flow: the closed error taxonomy, the raw-code classifier,
//! the per-kind failure policy, and the overridable message table.

pub mod kind;
pub mod text;
pub mod types;

pub use kind::{classify, AuthErrorKind, FailurePolicy};
pub use text::MessageTable;
pub use types::{AuthRequest, BiometryClass, EvalPolicy};
