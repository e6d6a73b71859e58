use crate::{
    error::Result,
    subsystem::{
        AuthenticatorPolicy, BiometricPlatform, CapabilityStatus, PromptRequest, PromptSettle,
    },
};

const UNSUPPORTED: i32 = -1;

#[derive(Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl BiometricPlatform for NativePlatform {
    fn capability(&self, _policy: AuthenticatorPolicy) -> Result<CapabilityStatus> {
        Ok(CapabilityStatus::NoHardware)
    }

    fn has_active_context(&self) -> bool {
        true
    }

    fn present_prompt(&self, _request: PromptRequest, settle: PromptSettle) {
        settle.error(
            UNSUPPORTED,
            "Biometric authentication is not supported on this platform",
        );
    }
}
