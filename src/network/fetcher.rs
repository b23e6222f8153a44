//! Interface fetching trait and error types.

use super::InterfaceSnapshot;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// The watchdog treats every variant as an inconclusive check.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// `getifaddrs` failed.
    #[cfg(unix)]
    #[error("getifaddrs failed: {0}")]
    Os(#[from] nix::errno::Errno),

    /// The OS answered but the data could not be interpreted,
    /// e.g. an adapter name that is not valid UTF-16.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for enumerating network interfaces and their addresses.
///
/// Enables dependency injection for testing with fake interface tables.
pub trait AddressFetcher: Send + Sync {
    /// Fetches the current state of all network interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform cannot enumerate interfaces.
    ///
    /// # Implementation Notes
    ///
    /// - Implementations return ALL interfaces, up or down, loopback included;
    ///   filtering is done by the caller
    /// - This is a synchronous operation and must query the OS on every call
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_displays_message() {
        let error = FetchError::Platform {
            message: "unsupported operation".to_string(),
        };
        assert_eq!(error.to_string(), "Platform error: unsupported operation");
    }

    #[cfg(unix)]
    #[test]
    fn os_error_wraps_errno() {
        let error = FetchError::from(nix::errno::Errno::EACCES);
        assert!(error.to_string().starts_with("getifaddrs failed"));
    }
}
