use log::{info, warn};

use crate::{
    error::{Error, Result},
    subsystem::{
        ALLOWED_AUTHENTICATORS, BiometricPlatform, CapabilityStatus, PromptEvent, PromptRequest,
        PromptSettle,
    },
};

/// Reported when the platform drops the prompt without firing any callback.
const PROMPT_NO_RESULT: i32 = -1;

/// Bridges the two biometric operations an application layer needs to the
/// platform subsystem behind [`BiometricPlatform`]. Holds no state between
/// calls and does not serialize concurrent prompts; the platform's own
/// modal discipline governs that.
pub struct BiometricGateway<P> {
    platform: P,
}

impl<P> BiometricGateway<P>
where
    P: BiometricPlatform,
{
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Read-only probe for whether authentication is possible under the
    /// fixed strong-biometric-or-device-credential policy. Every failure
    /// path comes back as a categorized [`Error`]; nothing escapes
    /// uncategorized.
    pub async fn check_availability(&self) -> Result<bool> {
        let status = match self.platform.capability(ALLOWED_AUTHENTICATORS) {
            Ok(status) => status,
            Err(e) => return Err(Error::Subsystem(e.to_string())),
        };

        match status {
            CapabilityStatus::Success => Ok(true),
            CapabilityStatus::NoHardware => Err(Error::NoHardware),
            CapabilityStatus::HardwareUnavailable => Err(Error::HardwareUnavailable),
            CapabilityStatus::NoneEnrolled => Err(Error::NoneEnrolled),
            CapabilityStatus::Other(status) => {
                warn!("unrecognized capability status {status}");
                Err(Error::Unknown)
            }
        }
    }

    /// Presents the platform prompt and suspends until the user interaction
    /// reaches a terminal outcome. `title` and `subtitle` are opaque
    /// display strings passed through unmodified.
    ///
    /// A rejected attempt ([`Error::AuthFailed`]) is not terminal on the
    /// platform side; any retry UI belongs to the subsystem, never to this
    /// gateway.
    pub async fn authenticate<T, S>(&self, title: T, subtitle: S) -> Result<bool>
    where
        T: AsRef<str>,
        S: AsRef<str>,
    {
        if !self.platform.has_active_context() {
            return Err(Error::NoActiveContext);
        }

        let request = PromptRequest::new(title, subtitle);

        let (settle, outcome) = PromptSettle::channel();

        self.platform.present_prompt(request, settle);

        let event = match outcome.await {
            Ok(event) => event,
            Err(_) => {
                warn!("platform dropped the prompt without reporting a result");
                return Err(Error::AuthError {
                    code: PROMPT_NO_RESULT,
                    message: "prompt dismissed without a result".to_string(),
                });
            }
        };

        match event {
            PromptEvent::Succeeded => {
                info!("biometric authentication succeeded");
                Ok(true)
            }
            PromptEvent::Failed => Err(Error::AuthFailed),
            PromptEvent::Error { code, message } => Err(Error::AuthError { code, message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use anyhow::Result;

    use super::*;
    use crate::subsystem::AuthenticatorPolicy;

    #[derive(Clone, Copy)]
    enum PromptScript {
        Succeed,
        SucceedTwice,
        Fail,
        Error(i32, &'static str),
        ErrorAfterSuccess,
        Silent,
    }

    struct FakePlatform {
        status: CapabilityStatus,
        probe_error: Option<&'static str>,
        active_context: bool,
        script: PromptScript,
        prompt_shown: Arc<AtomicBool>,
    }

    impl FakePlatform {
        fn new(status: CapabilityStatus) -> Self {
            Self {
                status,
                probe_error: None,
                active_context: true,
                script: PromptScript::Succeed,
                prompt_shown: Arc::new(AtomicBool::new(false)),
            }
        }

        fn scripted(script: PromptScript) -> Self {
            Self {
                script,
                ..Self::new(CapabilityStatus::Success)
            }
        }
    }

    impl BiometricPlatform for FakePlatform {
        fn capability(&self, _policy: AuthenticatorPolicy) -> crate::error::Result<CapabilityStatus> {
            if let Some(message) = self.probe_error {
                return Err(Error::Subsystem(message.to_string()));
            }

            Ok(self.status)
        }

        fn has_active_context(&self) -> bool {
            self.active_context
        }

        fn present_prompt(&self, _request: PromptRequest, settle: PromptSettle) {
            self.prompt_shown.store(true, Ordering::SeqCst);

            match self.script {
                PromptScript::Succeed => settle.succeeded(),
                PromptScript::SucceedTwice => {
                    settle.succeeded();
                    settle.succeeded();
                }
                PromptScript::Fail => settle.failed(),
                PromptScript::Error(code, message) => settle.error(code, message),
                PromptScript::ErrorAfterSuccess => {
                    settle.succeeded();
                    settle.error(5, "canceled");
                }
                PromptScript::Silent => drop(settle),
            }
        }
    }

    #[tokio::test]
    async fn test_availability_status_mapping() -> Result<()> {
        let gateway = BiometricGateway::new(FakePlatform::new(CapabilityStatus::Success));
        assert!(gateway.check_availability().await?);

        let cases = [
            (CapabilityStatus::NoHardware, "NO_HARDWARE", "No biometric hardware available"),
            (CapabilityStatus::HardwareUnavailable, "HW_UNAVAILABLE", "Biometric hardware unavailable"),
            (CapabilityStatus::NoneEnrolled, "NONE_ENROLLED", "No biometric enrolled"),
            (CapabilityStatus::Other(42), "UNKNOWN", "Unknown error"),
        ];

        for (status, code, message) in cases {
            let gateway = BiometricGateway::new(FakePlatform::new(status));

            let err = gateway.check_availability().await.unwrap_err();

            assert_eq!(err.code(), code);
            assert_eq!(err.to_string(), message);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_availability_probe_error() {
        let mut platform = FakePlatform::new(CapabilityStatus::Success);
        platform.probe_error = Some("sensor service crashed");

        let gateway = BiometricGateway::new(platform);

        let err = gateway.check_availability().await.unwrap_err();

        assert_eq!(err.code(), "ERROR");
        assert_eq!(err.to_string(), "sensor service crashed");
    }

    #[tokio::test]
    async fn test_authenticate_without_context() {
        let mut platform = FakePlatform::new(CapabilityStatus::Success);
        platform.active_context = false;
        let prompt_shown = platform.prompt_shown.clone();

        let gateway = BiometricGateway::new(platform);

        let err = gateway
            .authenticate("Sign in", "Use your fingerprint")
            .await
            .unwrap_err();

        assert_eq!(err.code(), "NO_ACTIVITY");
        assert_eq!(err.to_string(), "Activity not found");
        assert!(!prompt_shown.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_authenticate_success() -> Result<()> {
        let gateway = BiometricGateway::new(FakePlatform::scripted(PromptScript::Succeed));

        assert!(gateway.authenticate("Sign in", "Use your fingerprint").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_success_settles_once() -> Result<()> {
        let gateway = BiometricGateway::new(FakePlatform::scripted(PromptScript::SucceedTwice));

        assert!(gateway.authenticate("Sign in", "Use your fingerprint").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_error_after_success_is_dropped() -> Result<()> {
        let gateway = BiometricGateway::new(FakePlatform::scripted(PromptScript::ErrorAfterSuccess));

        assert!(gateway.authenticate("Sign in", "Use your fingerprint").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_attempt_is_not_a_prompt_error() {
        let gateway = BiometricGateway::new(FakePlatform::scripted(PromptScript::Fail));

        let err = gateway
            .authenticate("Sign in", "Use your fingerprint")
            .await
            .unwrap_err();

        assert_eq!(err.code(), "AUTH_FAILED");
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[tokio::test]
    async fn test_user_cancellation() {
        let gateway =
            BiometricGateway::new(FakePlatform::scripted(PromptScript::Error(10, "User canceled")));

        let err = gateway
            .authenticate("Sign in", "Use your fingerprint")
            .await
            .unwrap_err();

        assert_eq!(err.code(), "AUTH_ERROR");
        assert_eq!(err.to_string(), "User canceled");

        match err {
            Error::AuthError { code, .. } => assert_eq!(code, 10),
            other => panic!("expected AuthError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dropped_prompt_still_settles() {
        let gateway = BiometricGateway::new(FakePlatform::scripted(PromptScript::Silent));

        let err = gateway
            .authenticate("Sign in", "Use your fingerprint")
            .await
            .unwrap_err();

        assert_eq!(err.code(), "AUTH_ERROR");
        assert_eq!(err.to_string(), "prompt dismissed without a result");
    }
}
