use serde::Serialize;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    //
    // 1st party
    //
    #[error("No biometric hardware available")]
    NoHardware,
    #[error("Biometric hardware unavailable")]
    HardwareUnavailable,
    #[error("No biometric enrolled")]
    NoneEnrolled,
    #[error("Unknown error")]
    Unknown,
    #[error("{0}")]
    Subsystem(String),
    #[error("Activity not found")]
    NoActiveContext,
    #[error("{message}")]
    AuthError { code: i32, message: String },
    #[error("Authentication failed")]
    AuthFailed,

    //
    // 2d party
    //
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Stable code handed to the application layer next to the display
    /// message. The set is closed; bridge layers key their own messaging
    /// off these strings.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NoHardware => "NO_HARDWARE",
            Error::HardwareUnavailable => "HW_UNAVAILABLE",
            Error::NoneEnrolled => "NONE_ENROLLED",
            Error::Unknown => "UNKNOWN",
            Error::NoActiveContext => "NO_ACTIVITY",
            Error::AuthError { .. } => "AUTH_ERROR",
            Error::AuthFailed => "AUTH_FAILED",
            Error::Subsystem(_) | Error::Io(_) | Error::Utf8(_) => "ERROR",
        }
    }

    pub fn rejection(&self) -> Rejection {
        Rejection {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Code and message pair in the shape a cross-language bridge carries back
/// to the application layer.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub code: &'static str,
    pub message: String,
}
