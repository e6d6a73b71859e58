use localauthentication_rs::{LAPolicy, LocalAuthentication};

use crate::{
    error::Result,
    subsystem::{
        AuthenticatorPolicy, BiometricPlatform, CapabilityStatus, PromptRequest, PromptSettle,
    },
};

/// Reported when LocalAuthentication denies the policy evaluation.
const EVALUATION_DENIED: i32 = 1;

#[derive(Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl BiometricPlatform for NativePlatform {
    fn capability(&self, _policy: AuthenticatorPolicy) -> Result<CapabilityStatus> {
        // LocalAuthentication exposes no probe short of evaluating the
        // policy itself; report success and let the prompt surface errors.
        Ok(CapabilityStatus::Success)
    }

    fn has_active_context(&self) -> bool {
        true
    }

    fn present_prompt(&self, request: PromptRequest, settle: PromptSettle) {
        // evaluate_policy blocks until the user responds.
        tokio::task::spawn_blocking(move || {
            let local_authentication = LocalAuthentication::new();

            let policy = if request
                .authenticators
                .allows(AuthenticatorPolicy::DEVICE_CREDENTIAL)
            {
                LAPolicy::DeviceOwnerAuthentication
            } else {
                LAPolicy::DeviceOwnerAuthenticationWithBiometrics
            };

            let granted = local_authentication.evaluate_policy(policy, &request.title);

            if granted {
                settle.succeeded();
            } else {
                settle.error(EVALUATION_DENIED, "authentication was not granted");
            }
        });
    }
}
