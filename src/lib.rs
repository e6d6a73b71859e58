//! Bridges a platform's native biometric prompt (fingerprint, face, or
//! device-credential fallback) to an application layer through two
//! asynchronous operations: a capability probe and an authentication
//! challenge. Platform status codes are folded into a small closed set of
//! stable failure codes; no failure escapes uncategorized and every call
//! settles exactly once.

pub mod error;
pub mod gateway;
pub mod platform;
pub mod subsystem;

pub use error::{Error, Rejection, Result};
pub use gateway::BiometricGateway;
pub use platform::NativePlatform;
pub use subsystem::{
    ALLOWED_AUTHENTICATORS, AuthenticatorPolicy, BiometricPlatform, CapabilityStatus, PromptEvent,
    PromptRequest, PromptSettle,
};
