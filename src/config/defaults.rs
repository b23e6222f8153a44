//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Config file path used when `--config` is not given.
pub const CONFIG_PATH: &str = "./configs/config.toml";

/// Config file tried after [`CONFIG_PATH`] (or the `--config` value).
pub const FALLBACK_CONFIG_PATH: &str = "config.toml";

/// Shell invocation prefix for recovery commands.
pub const RECOVERY_SHELL: [&str; 3] = ["sudo", "bash", "-c"];

/// Rotated log file size threshold in megabytes.
pub const ROTATION_MAX_SIZE_MB: u64 = 100;

/// Default recovery shell as owned strings.
#[must_use]
pub fn recovery_shell() -> Vec<String> {
    RECOVERY_SHELL.iter().map(ToString::to_string).collect()
}
