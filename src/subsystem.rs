use std::sync::{Arc, Mutex};

use derive_more::Display;
use log::warn;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::error::Result;

/// Set of acceptable authentication methods for a capability probe or a
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthenticatorPolicy(u32);

impl AuthenticatorPolicy {
    pub const STRONG_BIOMETRIC: Self = Self(1 << 0);
    pub const DEVICE_CREDENTIAL: Self = Self(1 << 1);

    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn allows(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Strong biometric with device credential (PIN/pattern) fallback. Fixed
/// policy, not caller configurable.
pub const ALLOWED_AUTHENTICATORS: AuthenticatorPolicy =
    AuthenticatorPolicy::STRONG_BIOMETRIC.with(AuthenticatorPolicy::DEVICE_CREDENTIAL);

/// What the platform reports when asked whether the user can authenticate.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    #[display("success")]
    Success,
    #[display("no hardware")]
    NoHardware,
    #[display("hardware unavailable")]
    HardwareUnavailable,
    #[display("none enrolled")]
    NoneEnrolled,
    #[display("status {_0}")]
    Other(i32),
}

/// Prompt parameters, passed through to the platform unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRequest {
    pub title: String,
    pub subtitle: String,
    pub authenticators: AuthenticatorPolicy,
}

impl PromptRequest {
    pub fn new<T, S>(title: T, subtitle: S) -> Self
    where
        T: AsRef<str>,
        S: AsRef<str>,
    {
        Self {
            title: title.as_ref().into(),
            subtitle: subtitle.as_ref().into(),
            authenticators: ALLOWED_AUTHENTICATORS,
        }
    }
}

/// Terminal outcome of a prompt, reported by the platform callback.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    #[display("succeeded")]
    Succeeded,
    #[display("failed")]
    Failed,
    #[display("error {code}: {message}")]
    Error { code: i32, message: String },
}

/// Settle-once handle given to the platform alongside a prompt request.
///
/// Platform callback surfaces expose several notification methods; the
/// first one to fire wins and later notifications are logged and dropped,
/// so a prompt settles exactly once no matter how the platform behaves.
#[derive(Clone)]
pub struct PromptSettle {
    tx: Arc<Mutex<Option<oneshot::Sender<PromptEvent>>>>,
}

impl PromptSettle {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<PromptEvent>) {
        let (tx, rx) = oneshot::channel();

        let settle = Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        };

        (settle, rx)
    }

    pub fn succeeded(&self) {
        self.settle(PromptEvent::Succeeded);
    }

    pub fn failed(&self) {
        self.settle(PromptEvent::Failed);
    }

    pub fn error<M>(&self, code: i32, message: M)
    where
        M: Into<String>,
    {
        self.settle(PromptEvent::Error {
            code,
            message: message.into(),
        });
    }

    fn settle(&self, event: PromptEvent) {
        let mut slot = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match slot.take() {
            Some(tx) => {
                if tx.send(event).is_err() {
                    warn!("prompt receiver dropped before the result arrived");
                }
            }
            None => warn!("prompt already settled, dropping {event}"),
        }
    }
}

/// Seam to the operating system's biometric subsystem.
pub trait BiometricPlatform {
    /// Read-only probe: can the user authenticate under `policy`?
    fn capability(&self, policy: AuthenticatorPolicy) -> Result<CapabilityStatus>;

    /// Whether a foreground context capable of hosting a modal prompt
    /// exists.
    fn has_active_context(&self) -> bool;

    /// Display the prompt and report the terminal outcome through
    /// `settle`, invoked from the host's main executor. Implementations
    /// convert their own failures into `settle.error(..)` events rather
    /// than returning them.
    fn present_prompt(&self, request: PromptRequest, settle: PromptSettle);
}
