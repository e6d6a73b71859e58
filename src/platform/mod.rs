#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use macos::NativePlatform;

#[cfg(target_os = "linux")]
mod helper;
#[cfg(target_os = "linux")]
pub use helper::NativePlatform;

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
mod no_op;
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub use no_op::NativePlatform;
