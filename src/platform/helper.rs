//! Linux has no system biometric prompt, so this adapter shells out to a
//! `biogate-helper` binary (typically an fprintd frontend) found on PATH or
//! in `~/.cargo/bin`.
//!
//! Helper contract:
//! - `biogate-helper check` prints a capability status: `0` ok, `1` no
//!   hardware, `2` hardware unavailable, `3` none enrolled.
//! - `biogate-helper prompt <title> <subtitle>` prints `1` when the user
//!   authenticated, `0` when the attempt was rejected; a non-zero exit is a
//!   terminal prompt error with the message on stderr.

use std::{path::PathBuf, process::Stdio};

use log::{error, info};
use tokio::process::Command;
use which::which;

use crate::{
    error::{Error, Result},
    subsystem::{
        AuthenticatorPolicy, BiometricPlatform, CapabilityStatus, PromptRequest, PromptSettle,
    },
};

const HELPER_BIN: &str = "biogate-helper";

/// Reported when the helper is missing or cannot be executed.
const HELPER_UNAVAILABLE: i32 = -2;

fn cargo_bin() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| Error::Subsystem("home not found".to_string()))?;

    Ok(home.join(".cargo").join("bin"))
}

fn find_helper() -> Result<PathBuf> {
    let helper = match which(HELPER_BIN) {
        Ok(v) => v,
        Err(_) => cargo_bin()?.join(HELPER_BIN),
    };

    Ok(helper)
}

#[derive(Default)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl BiometricPlatform for NativePlatform {
    fn capability(&self, _policy: AuthenticatorPolicy) -> Result<CapabilityStatus> {
        let helper = find_helper()?;

        let out = std::process::Command::new(&helper).arg("check").output()?;

        if !out.status.success() {
            let message = String::from_utf8_lossy(&out.stderr).trim().to_string();
            return Err(Error::Subsystem(message));
        }

        let stdout = String::from_utf8(out.stdout)?;

        match stdout.trim() {
            "0" => Ok(CapabilityStatus::Success),
            "1" => Ok(CapabilityStatus::NoHardware),
            "2" => Ok(CapabilityStatus::HardwareUnavailable),
            "3" => Ok(CapabilityStatus::NoneEnrolled),
            other => {
                let status = other
                    .parse()
                    .map_err(|_| Error::Subsystem(format!("invalid helper status {other:?}")))?;

                Ok(CapabilityStatus::Other(status))
            }
        }
    }

    fn has_active_context(&self) -> bool {
        true
    }

    fn present_prompt(&self, request: PromptRequest, settle: PromptSettle) {
        tokio::spawn(async move {
            let helper = match find_helper() {
                Ok(v) => v,
                Err(e) => {
                    error!("unable to find {HELPER_BIN} ({e})");
                    settle.error(HELPER_UNAVAILABLE, e.to_string());
                    return;
                }
            };

            info!("executing {}", helper.display());

            let out = match Command::new(&helper)
                .arg("prompt")
                .arg(&request.title)
                .arg(&request.subtitle)
                .stdout(Stdio::piped())
                .output()
                .await
            {
                Ok(v) => v,
                Err(e) => {
                    error!("{} failed with {e}", helper.display());
                    settle.error(HELPER_UNAVAILABLE, e.to_string());
                    return;
                }
            };

            if !out.status.success() {
                let message = String::from_utf8_lossy(&out.stderr).trim().to_string();
                settle.error(out.status.code().unwrap_or(HELPER_UNAVAILABLE), message);
                return;
            }

            match String::from_utf8_lossy(&out.stdout).trim() {
                "1" => settle.succeeded(),
                _ => settle.failed(),
            }
        });
    }
}
