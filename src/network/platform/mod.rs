//! Platform-specific interface fetcher implementations.
//!
//! - **Unix**: `getifaddrs` via the `nix` crate.
//! - **Windows**: `GetAdaptersAddresses` via the `windows` crate.
//!
//! Both are re-exported as [`PlatformFetcher`].

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixFetcher;
#[cfg(unix)]
pub use unix::UnixFetcher as PlatformFetcher;

#[cfg(windows)]
pub use windows::WindowsFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher as PlatformFetcher;
